//! Fetch, parse, render, write.

use crate::config::{Config, Language};
use crate::emit::{self, Artifacts, Header};
use crate::emit_rust;
use crate::error::{Error, Result};
use crate::fetch::{CachedFetcher, UcdSource};
use crate::property_lines::parse_lines;
use crate::table::{OverlapKind, RangeTable};
use crate::ucd_file::UcdFile;
use std::fs;
use std::path::{Path, PathBuf};

/// Concatenate every [`UcdFile`] in order and parse the result.
pub fn build_table(source: &mut dyn UcdSource) -> Result<RangeTable> {
    let mut lines = Vec::new();
    for file in UcdFile::ALL.iter() {
        let file_lines = source.lines(*file)?;
        log::debug!("{:?}: {} lines", file, file_lines.len());
        lines.extend(file_lines);
    }

    let table = RangeTable::new(parse_lines(&lines)?);
    log::debug!("parsed {} range entries", table.len());
    report_overlaps(&table);
    Ok(table)
}

fn report_overlaps(table: &RangeTable) {
    if !log::log_enabled!(log::Level::Debug) {
        return;
    }

    let overlaps = table.overlaps();
    let cross = overlaps
        .iter()
        .filter(|overlap| overlap.kind == OverlapKind::CrossCategory)
        .collect::<Vec<_>>();
    log::debug!(
        "{} overlapping entry pairs, {} across categories",
        overlaps.len(),
        cross.len()
    );
    let entries = table.entries();
    for overlap in cross {
        let (first, second) = (&entries[overlap.first], &entries[overlap.second]);
        log::debug!(
            "{:04X}..{:04X} {} shadows {:04X}..{:04X} {}",
            first.lo,
            first.hi,
            first.category.name(),
            second.lo,
            second.hi,
            second.category.name()
        );
    }
}

/// Build the table from `source` and render it in `language`.
pub fn generate(source: &mut dyn UcdSource, language: Language, header: &Header) -> Result<Artifacts> {
    let table = build_table(source)?;
    match language {
        Language::C => Ok(emit::render_c(&table, header)),
        Language::Rust => emit_rust::render_rust(&table, header),
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write both artifacts to their configured locations.  Each is first written
/// beside its destination and only renamed into place once both writes
/// succeeded.
pub fn write_artifacts(config: &Config, artifacts: &Artifacts) -> Result<()> {
    let targets = [
        (config.declarations_path(), &artifacts.declarations),
        (config.data_path(), &artifacts.data),
    ];

    let mut staged: Vec<(PathBuf, &PathBuf)> = Vec::with_capacity(targets.len());
    for (path, text) in targets.iter() {
        let staging = staging_path(path);
        let written = path
            .parent()
            .map_or(Ok(()), fs::create_dir_all)
            .and_then(|()| fs::write(&staging, text));
        if let Err(err) = written {
            discard_staged(staged.iter().map(|(staging, _)| staging));
            let _ = fs::remove_file(&staging);
            return Err(Error::io(path, err));
        }
        staged.push((staging, path));
    }

    for (i, (staging, path)) in staged.iter().enumerate() {
        if let Err(err) = fs::rename(staging, path) {
            discard_staged(staged[i..].iter().map(|(staging, _)| staging));
            return Err(Error::io(*path, err));
        }
        log::debug!("wrote {}", path.display());
    }
    Ok(())
}

/// Best-effort removal of staging files that won't be renamed into place.
fn discard_staged<'a>(paths: impl Iterator<Item = &'a PathBuf>) {
    for path in paths {
        if let Err(err) = fs::remove_file(path) {
            log::debug!("could not remove {}: {}", path.display(), err);
        }
    }
}

/// Generate from `source` and write the result as `config` directs.  Nothing
/// is written unless generation succeeds.
pub fn run_with(source: &mut dyn UcdSource, config: &Config, header: &Header) -> Result<()> {
    let artifacts = generate(source, config.language, header)?;
    write_artifacts(config, &artifacts)
}

/// A full run against the UCD cache, stamped with today's date.
pub fn run(config: &Config) -> Result<()> {
    let mut fetcher = CachedFetcher::new(config.base_url.clone(), config.cache_dir.clone());
    let header = Header::new(chrono::Local::now().date_naive());
    run_with(&mut fetcher, config, &header)
}

#[cfg(test)]
use crate::{category::Category, fetch::InMemorySource, types::RangeEntry};

#[cfg(test)]
fn test_header() -> Header {
    Header::new(chrono::NaiveDate::from_ymd_opt(2024, 9, 10).expect("valid date"))
}

#[cfg(test)]
fn sample_source() -> InMemorySource {
    InMemorySource::new()
        .with_file(
            UcdFile::GraphemeBreakProperty,
            "\
# GraphemeBreakProperty-16.0.0.txt

0600..0605    ; Prepend # Cf   [6] ARABIC NUMBER SIGN..ARABIC NUMBER MARK ABOVE
000D          ; CR # Cc       <control-000D>
000A          ; LF # Cc       <control-000A>
0000..0009    ; Control # Cc  [10] <control-0000>..<control-0009>
1F1E6..1F1FF  ; Regional_Indicator # So  [26] REGIONAL INDICATOR SYMBOL LETTER A..Z
200D          ; ZWJ # Cf       ZERO WIDTH JOINER
",
        )
        .with_file(
            UcdFile::EmojiData,
            "\
# emoji-data.txt
00A9          ; Extended_Pictographic# E0.6   [1] (©️)       copyright
1F1E6 1F1E7   ; Regional_Indicator # tuple form
",
        )
        .with_file(
            UcdFile::PropList,
            "\
# PropList.txt
0009..000D    ; White_Space # Cc   [5] <control-0009>..<control-000D>
000D          ; Control # shadowed by CR above
0300..036F    ; Extend
",
        )
}

#[test]
fn end_to_end_table() {
    let table = build_table(&mut sample_source()).expect("valid input");
    assert_eq!(
        table.entries(),
        &[
            RangeEntry::new(0x600, 0x605, Category::Prepend),
            RangeEntry::new(0xD, 0xD, Category::CR),
            RangeEntry::new(0xA, 0xA, Category::LF),
            RangeEntry::new(0x0, 0x9, Category::Control),
            RangeEntry::new(0x1F1E6, 0x1F1FF, Category::RegionalIndicator),
            RangeEntry::new(0x200D, 0x200D, Category::ZWJ),
            RangeEntry::new(0x1F1E6, 0x1F1E7, Category::RegionalIndicator),
            RangeEntry::new(0xD, 0xD, Category::Control),
            RangeEntry::new(0x300, 0x36F, Category::Extend),
        ][..]
    );
    assert_eq!(table.first_match(0xD), Category::CR);
}

#[test]
fn end_to_end_c_artifacts() {
    let artifacts = generate(&mut sample_source(), Language::C, &test_header()).expect("valid input");

    let rows = artifacts
        .data
        .lines()
        .filter(|line| line.starts_with("    {0x"))
        .collect::<Vec<_>>();
    assert_eq!(rows.len(), 9);
    assert_eq!(rows[0], "    {0x000600, 0x000605, GCB_PREPEND}, // Prepend");
    assert_eq!(rows[1], "    {0x00000D, 0x00000D, GCB_CR}, // CR");
    assert_eq!(rows[6], "    {0x01F1E6, 0x01F1E7, GCB_REGIONAL_INDICATOR}, // Regional_Indicator");
    assert_eq!(rows[7], "    {0x00000D, 0x00000D, GCB_CONTROL}, // Control");
    assert!(artifacts
        .data
        .ends_with("const size_t UTF8_GRAPHEME_SIZE = sizeof(graphemes) / sizeof(UTF8Grapheme);\n"));

    // The enum is the fixed set, not what happened to appear in the input.
    let enum_lines = artifacts
        .declarations
        .lines()
        .filter(|line| line.starts_with("    GCB_"))
        .count();
    assert_eq!(enum_lines, Category::ALL.len());
    assert!(artifacts.declarations.contains("    GCB_LVT = 12,\n"));
}

#[test]
fn generation_is_idempotent() {
    let first = generate(&mut sample_source(), Language::C, &test_header()).expect("valid input");
    let second = generate(&mut sample_source(), Language::C, &test_header()).expect("valid input");
    assert_eq!(first, second);

    let rust_first = generate(&mut sample_source(), Language::Rust, &test_header()).expect("valid input");
    let rust_second = generate(&mut sample_source(), Language::Rust, &test_header()).expect("valid input");
    assert_eq!(rust_first, rust_second);
}

#[test]
fn writes_artifacts_to_fixed_locations() {
    let dir = tempfile::tempdir().expect("temporary directory");
    let config = Config {
        output_root: dir.path().to_path_buf(),
        ..Config::default()
    };

    run_with(&mut sample_source(), &config, &test_header()).expect("run succeeds");

    let header = fs::read_to_string(dir.path().join("include/utf8/grapheme-data.h")).expect("header written");
    let data = fs::read_to_string(dir.path().join("src/utf8/grapheme-data.c")).expect("data written");
    assert!(header.contains("typedef enum UTF8GraphemeClass {"));
    assert!(data.contains("#include \"utf8/grapheme-data.h\""));
    assert!(!dir.path().join("src/utf8/grapheme-data.c.tmp").exists());
    assert!(!dir.path().join("include/utf8/grapheme-data.h.tmp").exists());
}

#[test]
fn malformed_input_writes_nothing() {
    let dir = tempfile::tempdir().expect("temporary directory");
    let config = Config {
        output_root: dir.path().to_path_buf(),
        ..Config::default()
    };
    let mut source = sample_source().with_file(UcdFile::PropList, "000D ; Control\nXYZZY ; Extend\n");

    match run_with(&mut source, &config, &test_header()) {
        Err(Error::MalformedCodePoint { text, .. }) => assert_eq!(text, "XYZZY ; Extend"),
        other => panic!("expected a malformed code point, got {:?}", other),
    }
    assert_eq!(fs::read_dir(dir.path()).expect("list output root").count(), 0);
}

#[test]
fn failed_rename_leaves_no_staging_files() {
    let dir = tempfile::tempdir().expect("temporary directory");
    let config = Config {
        output_root: dir.path().to_path_buf(),
        ..Config::default()
    };

    // A non-empty directory where the data file belongs can't be renamed
    // over, so the second rename fails after the first succeeded.
    let blocker = config.data_path();
    fs::create_dir_all(&blocker).expect("create blocking directory");
    fs::write(blocker.join("keep"), "").expect("populate blocking directory");

    match run_with(&mut sample_source(), &config, &test_header()) {
        Err(Error::Io { path, .. }) => assert_eq!(path, blocker),
        other => panic!("expected an I/O error, got {:?}", other),
    }
    assert!(!staging_path(&config.data_path()).exists());
    assert!(!staging_path(&config.declarations_path()).exists());
}

#[cfg(test)]
fn write_upstream(root: &Path, file: UcdFile, text: &str) {
    let path = root.join(file.relative_url());
    fs::create_dir_all(path.parent().expect("file has a parent")).expect("create upstream dirs");
    fs::write(path, text).expect("write upstream file");
}

#[test]
fn missing_cache_files_are_fetched_and_kept() {
    let upstream = tempfile::tempdir().expect("temporary directory");
    write_upstream(upstream.path(), UcdFile::GraphemeBreakProperty, "000D ; CR\n");
    write_upstream(upstream.path(), UcdFile::EmojiData, "00A9 ; Extended_Pictographic\n");
    write_upstream(upstream.path(), UcdFile::PropList, "0300 ; Extend\n");

    let work = tempfile::tempdir().expect("temporary directory");
    let config = Config {
        base_url: format!("file://{}", upstream.path().display()),
        cache_dir: work.path().join("data"),
        output_root: work.path().join("out"),
        ..Config::default()
    };

    run(&config).expect("run succeeds");

    assert_eq!(
        fs::read_to_string(config.cache_dir.join("PropList.txt")).expect("cached"),
        "0300 ; Extend\n"
    );
    assert_eq!(
        fs::read_to_string(config.cache_dir.join("GraphemeBreakProperty.txt")).expect("cached"),
        "000D ; CR\n"
    );
    assert!(config.cache_dir.join("emoji-data.txt").is_file());

    let data = fs::read_to_string(config.data_path()).expect("data written");
    let rows = data
        .lines()
        .filter(|line| line.starts_with("    {0x"))
        .collect::<Vec<_>>();
    assert_eq!(
        rows,
        vec![
            "    {0x00000D, 0x00000D, GCB_CR}, // CR",
            "    {0x000300, 0x000300, GCB_EXTEND}, // Extend",
        ]
    );
}

#[test]
fn fetch_failure_writes_nothing() {
    let work = tempfile::tempdir().expect("temporary directory");
    let config = Config {
        base_url: "file:///nonexistent-ucd-root".to_string(),
        cache_dir: work.path().join("data"),
        output_root: work.path().join("out"),
        ..Config::default()
    };

    match run(&config) {
        Err(Error::Fetch { url, .. }) => assert_eq!(
            url,
            "file:///nonexistent-ucd-root/auxiliary/GraphemeBreakProperty.txt"
        ),
        other => panic!("expected a fetch failure, got {:?}", other),
    }
    assert!(!config.output_root.exists());
    assert!(!config.cache_dir.join("GraphemeBreakProperty.txt").exists());
}

#[test]
fn staging_path_is_a_sibling() {
    assert_eq!(
        staging_path(Path::new("src/utf8/grapheme-data.c")),
        Path::new("src/utf8/grapheme-data.c.tmp")
    );
}
