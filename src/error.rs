//! Everything that can abort a generation run.

use std::fmt;
use std::io;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

pub enum Error {
    /// Retrieving an uncached UCD file failed.
    Fetch { url: String, reason: String },

    /// Reading or writing a cache file or an output artifact failed.
    Io { path: PathBuf, source: io::Error },

    /// A code point field that isn't one or two hexadecimal values, a range
    /// that runs backwards, or a data line with more than two fields.  `line`
    /// is 1-based within the concatenated input.
    MalformedCodePoint { line: usize, text: String },

    /// Generated Rust source that `syn` refuses to parse.
    InvalidGeneratedCode { reason: String },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Error {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Fetch { url, reason } => write!(fmt, "failed to fetch {}: {}", url, reason),
            Error::Io { path, .. } => write!(fmt, "I/O error on {}", path.display()),
            Error::MalformedCodePoint { line, text } => {
                write!(fmt, "malformed code point field on line {}: {:?}", line, text)
            }
            Error::InvalidGeneratedCode { reason } => {
                write!(fmt, "generated Rust source does not parse: {}", reason)
            }
        }
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io { path, source } => {
                write!(fmt, "I/O error on {}: {}", path.display(), source)
            }
            _ => fmt::Display::fmt(self, fmt),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[test]
fn malformed_code_point_message() {
    let err = Error::MalformedCodePoint {
        line: 3,
        text: "XYZZY ; CR".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "malformed code point field on line 3: \"XYZZY ; CR\""
    );
}
