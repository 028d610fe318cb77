//! Sources of UCD file text.
//!
//! The pipeline only ever asks a [`UcdSource`] for the lines of a file, so it
//! can run against the disk cache and network or against in-memory text.

use crate::error::{Error, Result};
use crate::ucd_file::UcdFile;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

pub trait UcdSource {
    /// The lines of `file`, without line terminators.
    fn lines(&mut self, file: UcdFile) -> Result<Vec<String>>;
}

/// Reads UCD files from a cache directory, downloading and storing any that
/// are missing.  A cached file is trusted as-is and never refreshed.
pub struct CachedFetcher {
    base_url: String,
    cache_dir: PathBuf,
}

impl CachedFetcher {
    pub fn new(base_url: impl Into<String>, cache_dir: impl Into<PathBuf>) -> CachedFetcher {
        CachedFetcher {
            base_url: base_url.into(),
            cache_dir: cache_dir.into(),
        }
    }

    pub fn cache_path(&self, file: UcdFile) -> PathBuf {
        self.cache_dir.join(file.file_name())
    }
}

impl UcdSource for CachedFetcher {
    fn lines(&mut self, file: UcdFile) -> Result<Vec<String>> {
        let path = self.cache_path(file);
        if path.is_file() {
            log::debug!("using cached {}", path.display());
            let text = fs::read_to_string(&path).map_err(|err| Error::io(&path, err))?;
            return Ok(split_lines(&text));
        }

        let url = file.url(&self.base_url);
        log::debug!("fetching {}", url);
        let lines = split_lines(&download(&url)?);

        fs::create_dir_all(&self.cache_dir).map_err(|err| Error::io(&self.cache_dir, err))?;
        write_lines(&path, &lines)?;
        log::debug!("cached {} lines in {}", lines.len(), path.display());
        Ok(lines)
    }
}

fn split_lines(text: &str) -> Vec<String> {
    text.lines().map(str::to_string).collect()
}

fn write_lines(path: &Path, lines: &[String]) -> Result<()> {
    let mut text = String::with_capacity(lines.iter().map(|line| line.len() + 1).sum());
    for line in lines {
        text.push_str(line);
        text.push('\n');
    }
    fs::write(path, text).map_err(|err| Error::io(path, err))
}

/// Fetch `url` with `curl`, failing on any HTTP error status.
fn download(url: &str) -> Result<String> {
    let fetch_error = |reason: String| Error::Fetch {
        url: url.to_string(),
        reason,
    };

    let output = Command::new("curl")
        .args(&["--silent", "--show-error", "--fail", "--location", url])
        .output()
        .map_err(|err| fetch_error(format!("could not run curl: {}", err)))?;
    if !output.status.success() {
        return Err(fetch_error(format!(
            "curl exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    String::from_utf8(output.stdout).map_err(|err| fetch_error(format!("response is not UTF-8: {}", err)))
}

/// File text held in memory, for running the pipeline without touching the
/// network or the disk.
#[derive(Clone, Debug, Default)]
pub struct InMemorySource {
    files: HashMap<UcdFile, String>,
}

impl InMemorySource {
    pub fn new() -> InMemorySource {
        InMemorySource::default()
    }

    pub fn with_file(mut self, file: UcdFile, text: impl Into<String>) -> InMemorySource {
        self.files.insert(file, text.into());
        self
    }
}

impl UcdSource for InMemorySource {
    /// Files never supplied read as empty.
    fn lines(&mut self, file: UcdFile) -> Result<Vec<String>> {
        Ok(self
            .files
            .get(&file)
            .map(|text| split_lines(text))
            .unwrap_or_default())
    }
}

#[test]
fn cached_files_skip_the_network() {
    let dir = tempfile::tempdir().expect("temporary directory");
    fs::write(
        dir.path().join("PropList.txt"),
        "# PropList\n0009..000D    ; White_Space\n",
    )
    .expect("seed cache");

    // An unroutable base URL: any fetch attempt would fail.
    let mut fetcher = CachedFetcher::new("http://invalid.invalid", dir.path());
    let lines = fetcher.lines(UcdFile::PropList).expect("served from cache");
    assert_eq!(lines, vec!["# PropList", "0009..000D    ; White_Space"]);
}

#[test]
fn cache_path_uses_file_name() {
    let fetcher = CachedFetcher::new("https://example.org/ucd", "data");
    assert_eq!(
        fetcher.cache_path(UcdFile::GraphemeBreakProperty),
        Path::new("data").join("GraphemeBreakProperty.txt")
    );
}

#[test]
fn write_through_round_trip() {
    let dir = tempfile::tempdir().expect("temporary directory");
    let path = dir.path().join("emoji-data.txt");
    let lines = vec!["# emoji".to_string(), String::new(), "00A9 ; Emoji".to_string()];
    write_lines(&path, &lines).expect("write cache file");
    assert_eq!(
        fs::read_to_string(&path).expect("read back"),
        "# emoji\n\n00A9 ; Emoji\n"
    );
    assert_eq!(split_lines(&fs::read_to_string(&path).expect("read back")), lines);
}

#[test]
fn in_memory_source() {
    let mut source = InMemorySource::new().with_file(UcdFile::EmojiData, "a\r\nb\n");
    assert_eq!(source.lines(UcdFile::EmojiData).expect("lines"), vec!["a", "b"]);
    assert!(source.lines(UcdFile::PropList).expect("lines").is_empty());
}
