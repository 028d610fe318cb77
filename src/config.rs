//! Where inputs come from and where generated files go.

use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const DEFAULT_BASE_URL: &str = "https://www.unicode.org/Public/UCD/latest/ucd";
pub const DEFAULT_CACHE_DIR: &str = "data";

/// The language of the generated files.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Language {
    C,
    Rust,
}

impl Default for Language {
    fn default() -> Language {
        Language::C
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Language, String> {
        match s {
            "c" => Ok(Language::C),
            "rust" => Ok(Language::Rust),
            other => Err(format!("invalid language: {:?}", other)),
        }
    }
}

impl Language {
    /// Declarations and data file locations, relative to the output root.
    pub fn output_paths(self) -> (&'static str, &'static str) {
        match self {
            Language::C => ("include/utf8/grapheme-data.h", "src/utf8/grapheme-data.c"),
            Language::Rust => ("src/grapheme_data/types.rs", "src/grapheme_data/table.rs"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// UCD root URL; file paths such as `emoji/emoji-data.txt` are appended.
    pub base_url: String,
    /// One cached text file per UCD file lives here.
    pub cache_dir: PathBuf,
    /// Output paths are resolved against this directory.
    pub output_root: PathBuf,
    pub language: Language,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            base_url: DEFAULT_BASE_URL.to_string(),
            cache_dir: PathBuf::from(DEFAULT_CACHE_DIR),
            output_root: PathBuf::from("."),
            language: Language::default(),
        }
    }
}

impl Config {
    pub fn declarations_path(&self) -> PathBuf {
        self.output_root.join(Path::new(self.language.output_paths().0))
    }

    pub fn data_path(&self) -> PathBuf {
        self.output_root.join(Path::new(self.language.output_paths().1))
    }
}

#[test]
fn default_output_locations() {
    let config = Config::default();
    assert_eq!(
        config.declarations_path(),
        Path::new(".").join("include/utf8/grapheme-data.h")
    );
    assert_eq!(config.data_path(), Path::new(".").join("src/utf8/grapheme-data.c"));
    assert_eq!(config.cache_dir, Path::new("data"));
}

#[test]
fn languages_parse() {
    assert_eq!("c".parse::<Language>(), Ok(Language::C));
    assert_eq!("rust".parse::<Language>(), Ok(Language::Rust));
    assert!("C++".parse::<Language>().is_err());
}
