//! Renders a [`RangeTable`] as Rust source, for consumers that `include!` the
//! table instead of linking C.
//!
//! The declarations file defines `GraphemeClass` and `Grapheme`; the data file
//! defines `GRAPHEMES` and `GRAPHEME_SIZE` and expects both types in scope.
//! Both are laid out one field, variant, or record per line.

use crate::category::Category;
use crate::emit::{Artifacts, Header};
use crate::error::{Error, Result};
use crate::table::RangeTable;
use crate::types::RangeEntry;
use proc_macro2::Literal;
use quote::{format_ident, quote};
use std::fmt::Write;

/// A fixed-width hexadecimal literal, `0x00000D` style.
fn hex_literal(value: u32) -> Literal {
    format!("0x{:06X}", value)
        .parse()
        .expect("hexadecimal integer literal lexes")
}

/// The `GraphemeClass` variant path for `category`.
fn class_path(category: Category) -> String {
    format!("GraphemeClass::{}", format_ident!("{}", category.ident()))
}

/// A `Grapheme` struct literal on one line.
fn record(entry: &RangeEntry) -> String {
    format!(
        "Grapheme {{ lo: {}, hi: {}, cls: {} }}",
        hex_literal(entry.lo),
        hex_literal(entry.hi),
        class_path(entry.category)
    )
}

fn write_rust_banner(out: &mut String, header: &Header) {
    for line in header.lines() {
        let _ = writeln!(out, "// {}", line);
    }
    out.push('\n');
}

/// Syntax-check generated source.  Names are resolved only by the consumer.
fn validate(text: &str) -> Result<()> {
    syn::parse_file(text)
        .map(|_| ())
        .map_err(|err| Error::InvalidGeneratedCode {
            reason: err.to_string(),
        })
}

pub fn rust_declarations(header: &Header) -> String {
    let mut out = String::new();
    write_rust_banner(&mut out, header);

    out.push_str("#[allow(non_camel_case_types)]\n");
    out.push_str("#[derive(Copy, Clone, Debug, PartialEq, Eq)]\n");
    out.push_str("#[repr(u8)]\n");
    out.push_str("pub enum GraphemeClass {\n");
    for category in Category::ALL.iter() {
        let ident = format_ident!("{}", category.ident());
        let value = Literal::u8_unsuffixed(category.value());
        let _ = writeln!(out, "    {},", quote!(#ident = #value));
    }
    out.push_str("}\n\n");

    out.push_str("#[derive(Copy, Clone, Debug, PartialEq, Eq)]\n");
    out.push_str("pub struct Grapheme {\n");
    out.push_str("    pub lo: u32,\n");
    out.push_str("    pub hi: u32,\n");
    out.push_str("    pub cls: GraphemeClass,\n");
    out.push_str("}\n");
    out
}

/// One record per line in table order, each tagged with its class name.
pub fn rust_data(table: &RangeTable, header: &Header) -> String {
    let mut out = String::new();
    write_rust_banner(&mut out, header);

    out.push_str("pub const GRAPHEMES: &[Grapheme] = &[\n");
    for entry in table {
        let _ = writeln!(out, "    {}, // {}", record(entry), entry.category.name());
    }
    out.push_str("];\n\n");

    out.push_str("pub const GRAPHEME_SIZE: usize = GRAPHEMES.len();\n");
    out
}

pub fn render_rust(table: &RangeTable, header: &Header) -> Result<Artifacts> {
    let artifacts = Artifacts {
        declarations: rust_declarations(header),
        data: rust_data(table, header),
    };
    validate(&artifacts.declarations)?;
    validate(&artifacts.data)?;
    Ok(artifacts)
}

#[cfg(test)]
fn test_header() -> Header {
    Header::new(chrono::NaiveDate::from_ymd_opt(2024, 9, 10).expect("valid date"))
}

#[test]
fn rust_output_parses() {
    let table = RangeTable::new(vec![
        RangeEntry::new(0xD, 0xD, Category::CR),
        RangeEntry::new(0x1F1E6, 0x1F1FF, Category::RegionalIndicator),
    ]);
    let artifacts = render_rust(&table, &test_header()).expect("valid Rust");

    let declarations = syn::parse_file(&artifacts.declarations).expect("declarations parse");
    let variant_count = declarations
        .items
        .iter()
        .find_map(|item| match item {
            syn::Item::Enum(e) if e.ident == "GraphemeClass" => Some(e.variants.len()),
            _ => None,
        })
        .expect("GraphemeClass is declared");
    assert_eq!(variant_count, Category::ALL.len());

    assert!(artifacts.data.starts_with("// @warning This file is auto-generated."));
    assert!(artifacts.data.contains("// @date 2024-09-10\n"));
    assert!(artifacts
        .data
        .contains("pub const GRAPHEME_SIZE: usize = GRAPHEMES.len();\n"));
}

#[test]
fn rust_data_rows_are_in_table_order() {
    let table = RangeTable::new(vec![
        RangeEntry::new(0x1F1E6, 0x1F1FF, Category::RegionalIndicator),
        RangeEntry::new(0xD, 0xD, Category::CR),
    ]);
    let data = rust_data(&table, &test_header());
    let rows = data
        .lines()
        .filter(|line| line.starts_with("    Grapheme"))
        .collect::<Vec<_>>();

    assert_eq!(rows.len(), 2);
    assert_eq!(
        rows[0],
        "    Grapheme { lo: 0x01F1E6, hi: 0x01F1FF, cls: GraphemeClass::GCB_REGIONAL_INDICATOR }, // Regional_Indicator"
    );
    assert_eq!(
        rows[1],
        "    Grapheme { lo: 0x00000D, hi: 0x00000D, cls: GraphemeClass::GCB_CR }, // CR"
    );
}

#[test]
fn discriminants_are_explicit() {
    let declarations = rust_declarations(&test_header());
    assert!(declarations.contains("pub enum GraphemeClass {\n    GCB_OTHER = 0,\n    GCB_PREPEND = 1,\n"));
    assert!(declarations.contains("    GCB_REGIONAL_INDICATOR = 7,\n"));
    assert!(declarations.contains("    GCB_ZWJ = 13,\n}\n"));
    assert!(declarations.ends_with("pub struct Grapheme {\n    pub lo: u32,\n    pub hi: u32,\n    pub cls: GraphemeClass,\n}\n"));
}
