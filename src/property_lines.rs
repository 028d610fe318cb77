//! Parses lines of UCD property files such as `GraphemeBreakProperty.txt`,
//! `emoji-data.txt`, and `PropList.txt` into [`RangeEntry`] values.
//!
//! Each data line has the shape
//!
//! ```text
//! <code points> ; <property> # <comment>
//! ```
//!
//! where `<code points>` is a single hexadecimal code point (`000D`), a range
//! (`0300..036F`), or a whitespace-separated pair (`1F1E6 1F1E7`) treated as
//! `lo` and `hi`.  Lines for properties outside [`Category`] are skipped.
//! A data line with more than two fields is malformed.

use crate::category::Category;
use crate::error::{Error, Result};
use crate::types::{CodePoint, RangeEntry};

/// Iterator over the range entries described by a sequence of lines, in line
/// order.  Yields an error, once, for the first line with an unparseable
/// code point field.
pub struct PropertyLines<I> {
    lines: std::iter::Enumerate<I>,
    failed: bool,
}

impl<I> PropertyLines<I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    pub fn new<T>(lines: T) -> PropertyLines<I>
    where
        T: IntoIterator<IntoIter = I>,
    {
        PropertyLines {
            lines: lines.into_iter().enumerate(),
            failed: false,
        }
    }
}

impl<I> Iterator for PropertyLines<I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    type Item = Result<RangeEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        loop {
            let (index, line) = self.lines.next()?;
            let line = line.as_ref();
            match parse_line(line) {
                Ok(Some(entry)) => return Some(Ok(entry)),
                Ok(None) => continue,
                Err(Malformed) => {
                    self.failed = true;
                    return Some(Err(Error::MalformedCodePoint {
                        line: index + 1,
                        text: line.to_string(),
                    }));
                }
            }
        }
    }
}

/// Parse every line, failing as a whole if any line is malformed.
pub fn parse_lines<T>(lines: T) -> Result<Vec<RangeEntry>>
where
    T: IntoIterator,
    T::Item: AsRef<str>,
{
    PropertyLines::new(lines).collect()
}

struct Malformed;

fn parse_line(line: &str) -> std::result::Result<Option<RangeEntry>, Malformed> {
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (code_points, property) = match line.split_once(';') {
        Some(fields) => fields,
        None => return Ok(None),
    };

    let property = property
        .split('#')
        .next()
        .expect("splitting returns at least one string")
        .trim();
    if property.contains(';') {
        return Err(Malformed);
    }
    let category = match Category::from_name(property) {
        Some(category) => category,
        None => return Ok(None),
    };

    let (lo, hi) = parse_code_points(code_points.trim()).ok_or(Malformed)?;
    Ok(Some(RangeEntry::new(lo, hi, category)))
}

/// Parse `lo..hi`, `lo hi`, or `code` (in that order of precedence).
fn parse_code_points(field: &str) -> Option<(CodePoint, CodePoint)> {
    let (lo, hi) = if let Some((lo, hi)) = field.split_once("..") {
        (parse_hex(lo.trim())?, parse_hex(hi.trim())?)
    } else if field.contains(char::is_whitespace) {
        let mut parts = field.split_whitespace();
        let lo = parse_hex(parts.next()?)?;
        let hi = parse_hex(parts.next()?)?;
        if parts.next().is_some() {
            return None;
        }
        (lo, hi)
    } else {
        let code = parse_hex(field)?;
        (code, code)
    };

    if lo > hi {
        return None;
    }
    Some((lo, hi))
}

fn parse_hex(digits: &str) -> Option<CodePoint> {
    // `from_str_radix` tolerates a leading sign; UCD files never have one.
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(digits, 16).ok()
}

#[cfg(test)]
fn parse_one(line: &str) -> Option<RangeEntry> {
    let entries = parse_lines([line].iter()).expect("well-formed line");
    assert!(entries.len() <= 1);
    entries.into_iter().next()
}

#[test]
fn parses_range() {
    assert_eq!(
        parse_one("0041..0044 ; Extend"),
        Some(RangeEntry::new(0x41, 0x44, Category::Extend))
    );
    assert_eq!(
        parse_one("1160..11A7    ; V # Lo  [72] HANGUL JUNGSEONG FILLER..HANGUL JUNGSEONG O-YAE"),
        Some(RangeEntry::new(0x1160, 0x11A7, Category::V))
    );
}

#[test]
fn parses_tuple() {
    assert_eq!(
        parse_one("1F1E6 1F1E7 ; Regional_Indicator"),
        Some(RangeEntry::new(0x1F1E6, 0x1F1E7, Category::RegionalIndicator))
    );
}

#[test]
fn parses_singleton() {
    assert_eq!(
        parse_one("000D ; CR"),
        Some(RangeEntry::new(0xD, 0xD, Category::CR))
    );
    assert_eq!(
        parse_one("200D          ; ZWJ # Cf       ZERO WIDTH JOINER"),
        Some(RangeEntry::new(0x200D, 0x200D, Category::ZWJ))
    );
}

#[test]
fn skips_lines_without_data() {
    assert_eq!(parse_one(""), None);
    assert_eq!(parse_one("# GraphemeBreakProperty-16.0.0.txt"), None);
    assert_eq!(parse_one("#  0600..0605 ; Prepend"), None);
    assert_eq!(parse_one("   "), None);
    assert_eq!(parse_one("no separator here"), None);
}

#[test]
fn skips_unrecognized_categories() {
    let lines = [
        "00A9 ; Extended_Pictographic # E0.6   [1] (©️)       copyright",
        "0300..036F ; Extend",
        "0021 ; Emoji_Component",
    ];
    let entries = parse_lines(lines.iter()).expect("well-formed lines");
    assert_eq!(entries, vec![RangeEntry::new(0x300, 0x36F, Category::Extend)]);
}

#[test]
fn unrecognized_categories_are_not_validated() {
    // Only lines contributing an entry have their code points parsed.
    assert_eq!(parse_one("XYZZY ; Diacritic"), None);
}

#[test]
fn rejects_malformed_code_points() {
    let lines = ["000A ; LF", "XYZZY ; CR", "000D ; CR"];
    match parse_lines(lines.iter()) {
        Err(Error::MalformedCodePoint { line, text }) => {
            assert_eq!(line, 2);
            assert_eq!(text, "XYZZY ; CR");
        }
        other => panic!("expected a malformed code point, got {:?}", other),
    }

    for bad in [
        "+41 ; CR",
        "0041.. ; Extend",
        "0044..0041 ; Extend",
        "0041 0042 0043 ; Extend",
        " ; Extend",
    ]
    .iter()
    {
        assert!(parse_lines([*bad].iter()).is_err(), "{:?} is malformed", bad);
    }
}

#[test]
fn rejects_extra_fields() {
    let lines = ["0041 ; Extend ; extra", "0041;Extend"];
    match parse_lines(lines.iter()) {
        Err(Error::MalformedCodePoint { line, text }) => {
            assert_eq!(line, 1);
            assert_eq!(text, "0041 ; Extend ; extra");
        }
        other => panic!("expected a malformed line, got {:?}", other),
    }

    // Whatever a trailing comment says is not a field.
    assert_eq!(
        parse_one("0041 ; Extend # see; also"),
        Some(RangeEntry::new(0x41, 0x41, Category::Extend))
    );
    assert!(parse_lines(["0041 ; Diacritic ; extra"].iter()).is_err());
}

#[test]
fn iteration_stops_after_an_error() {
    let lines = ["XYZZY ; CR", "000D ; CR"];
    let mut iter = PropertyLines::new(lines.iter());
    assert!(matches!(iter.next(), Some(Err(_))));
    assert!(iter.next().is_none());
}

#[test]
fn preserves_line_order_and_duplicates() {
    let lines = [
        "# grapheme",
        "1F1E6..1F1FF ; Regional_Indicator",
        "000D ; CR",
        "# emoji",
        "1F1E6..1F1FF ; Extended_Pictographic",
        "# proplist",
        "000D ; Control",
        "0041..0044 ; Extend",
    ];
    let entries = parse_lines(lines.iter()).expect("well-formed lines");
    assert_eq!(
        entries,
        vec![
            RangeEntry::new(0x1F1E6, 0x1F1FF, Category::RegionalIndicator),
            RangeEntry::new(0xD, 0xD, Category::CR),
            RangeEntry::new(0xD, 0xD, Category::Control),
            RangeEntry::new(0x41, 0x44, Category::Extend),
        ]
    );
}
