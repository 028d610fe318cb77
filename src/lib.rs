//! A crate that compiles the UCD grapheme cluster break data into an ordered
//! table of code point ranges, rendered as C (or Rust) source for a
//! dependency-free segmentation library.

pub mod category;
pub mod config;
pub mod driver;
pub mod emit;
pub mod emit_rust;
pub mod error;
pub mod fetch;
pub mod property_lines;
pub mod table;
pub mod types;
pub mod ucd_file;

pub use crate::error::{Error, Result};
