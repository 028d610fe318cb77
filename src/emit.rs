//! Renders a [`RangeTable`] as a C header declaring the grapheme class enum
//! and record type, plus a C source file holding the data array.

use crate::category::Category;
use crate::table::RangeTable;
use chrono::NaiveDate;
use std::fmt::Write;

/// Format revision of the generated files.  Bump when their shape changes.
pub const FORMAT_VERSION: u32 = 1;

/// Metadata stamped at the top of every generated file.  It never affects
/// the table contents.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Header {
    pub version: u32,
    pub date: NaiveDate,
}

impl Header {
    pub fn new(date: NaiveDate) -> Header {
        Header {
            version: FORMAT_VERSION,
            date,
        }
    }

    /// The banner as lines, without comment markers.
    pub(crate) fn lines(&self) -> Vec<String> {
        vec![
            "@warning This file is auto-generated. Do not edit directly.".to_string(),
            "@brief Grapheme cluster break property data.".to_string(),
            "@ref Unicode UCD - Generated by generate_grapheme_data".to_string(),
            format!("@version {}", self.version),
            format!("@date {}", self.date.format("%Y-%m-%d")),
        ]
    }
}

/// The two rendered files of one generation run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artifacts {
    /// Type declarations: the class enum, the record type, and external
    /// declarations of the array and its length.
    pub declarations: String,
    /// The ordered array of range records and its length.
    pub data: String,
}

/// Path by which the data file includes the header.
pub const C_HEADER_INCLUDE: &str = "utf8/grapheme-data.h";

const C_INCLUDE_GUARD: &str = "UTF8_GRAPHEME_DATA_H";

fn write_c_banner(out: &mut String, header: &Header) {
    out.push_str("/**\n");
    for line in header.lines() {
        out.push_str(" * ");
        out.push_str(&line);
        out.push('\n');
    }
    out.push_str(" */\n\n");
}

/// Render the header file.  Its enum lists every [`Category`] regardless of
/// which appear in the table.
pub fn c_declarations(header: &Header) -> String {
    let mut out = String::new();
    write_c_banner(&mut out, header);

    // Writing to a `String` cannot fail.
    let _ = writeln!(out, "#ifndef {}", C_INCLUDE_GUARD);
    let _ = writeln!(out, "#define {}\n", C_INCLUDE_GUARD);
    out.push_str("#include <stddef.h>\n");
    out.push_str("#include <stdint.h>\n\n");

    out.push_str("typedef enum UTF8GraphemeClass {\n");
    for category in Category::ALL.iter() {
        let _ = writeln!(out, "    {} = {},", category.ident(), category.value());
    }
    out.push_str("} UTF8GraphemeClass;\n\n");

    out.push_str("typedef struct UTF8Grapheme {\n");
    out.push_str("    uint32_t lo, hi;\n");
    out.push_str("    UTF8GraphemeClass cls;\n");
    out.push_str("} UTF8Grapheme;\n\n");

    out.push_str("extern const UTF8Grapheme graphemes[];\n");
    out.push_str("extern const size_t UTF8_GRAPHEME_SIZE;\n\n");

    let _ = writeln!(out, "#endif // {}", C_INCLUDE_GUARD);
    out
}

/// Render the source file.  Records appear exactly in table order; the
/// element count is derived from the array by `sizeof`, never written out.
pub fn c_data(table: &RangeTable, header: &Header) -> String {
    let mut out = String::new();
    write_c_banner(&mut out, header);

    let _ = writeln!(out, "#include \"{}\"\n", C_HEADER_INCLUDE);

    out.push_str("const UTF8Grapheme graphemes[] = {\n");
    for entry in table {
        let _ = writeln!(
            out,
            "    {{0x{:06X}, 0x{:06X}, {}}}, // {}",
            entry.lo,
            entry.hi,
            entry.category.ident(),
            entry.category.name()
        );
    }
    out.push_str("};\n\n");

    out.push_str(
        "const size_t UTF8_GRAPHEME_SIZE = sizeof(graphemes) / sizeof(UTF8Grapheme);\n",
    );
    out
}

pub fn render_c(table: &RangeTable, header: &Header) -> Artifacts {
    Artifacts {
        declarations: c_declarations(header),
        data: c_data(table, header),
    }
}

#[cfg(test)]
fn test_header() -> Header {
    Header::new(NaiveDate::from_ymd_opt(2024, 9, 10).expect("valid date"))
}

#[cfg(test)]
use crate::types::RangeEntry;

#[test]
fn c_declarations_list_every_category() {
    let text = c_declarations(&test_header());

    assert!(text.starts_with("/**\n * @warning This file is auto-generated."));
    assert!(text.contains(" * @version 1\n * @date 2024-09-10\n */\n\n#ifndef UTF8_GRAPHEME_DATA_H\n"));
    assert!(text.contains("    uint32_t lo, hi;\n    UTF8GraphemeClass cls;\n"));
    assert!(text.contains("extern const UTF8Grapheme graphemes[];\n"));
    assert!(text.contains("extern const size_t UTF8_GRAPHEME_SIZE;\n"));
    assert!(text.ends_with("#endif // UTF8_GRAPHEME_DATA_H\n"));

    for category in Category::ALL.iter() {
        let line = format!("    {} = {},\n", category.ident(), category.value());
        assert!(text.contains(&line), "missing {:?}", line);
    }
    assert!(text.contains("    GCB_SPACINGMARK = 6,\n    GCB_REGIONAL_INDICATOR = 7,\n"));
}

#[test]
fn c_data_rows() {
    let table = RangeTable::new(vec![
        RangeEntry::new(0x1F1E6, 0x1F1FF, Category::RegionalIndicator),
        RangeEntry::new(0xD, 0xD, Category::CR),
        RangeEntry::new(0x300, 0x36F, Category::Extend),
    ]);
    let text = c_data(&table, &test_header());

    let expected_body = "\
#include \"utf8/grapheme-data.h\"

const UTF8Grapheme graphemes[] = {
    {0x01F1E6, 0x01F1FF, GCB_REGIONAL_INDICATOR}, // Regional_Indicator
    {0x00000D, 0x00000D, GCB_CR}, // CR
    {0x000300, 0x00036F, GCB_EXTEND}, // Extend
};

const size_t UTF8_GRAPHEME_SIZE = sizeof(graphemes) / sizeof(UTF8Grapheme);
";
    assert!(text.ends_with(expected_body), "unexpected data:\n{}", text);
}

#[test]
fn c_data_without_entries() {
    let text = c_data(&RangeTable::default(), &test_header());
    assert!(text.contains("const UTF8Grapheme graphemes[] = {\n};\n"));
}
