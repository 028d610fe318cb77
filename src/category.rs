//! The closed set of grapheme cluster break classes this crate emits.
//!
//! The set is fixed here rather than derived from the UCD input, so that the
//! generated identifiers and their integer values stay the same no matter
//! which Unicode version the tables are regenerated from.

/// A grapheme cluster break property value, per UAX #29.
///
/// Every variant carries a hand-assigned discriminant.  Consumers may persist
/// these values, so an existing variant's number must never change; new
/// variants get new numbers.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[allow(clippy::upper_case_acronyms)]
#[repr(u8)]
pub enum Category {
    Other = 0,
    Prepend = 1,
    CR = 2,
    LF = 3,
    Control = 4,
    Extend = 5,
    SpacingMark = 6,
    RegionalIndicator = 7,
    L = 8,
    V = 9,
    T = 10,
    LV = 11,
    LVT = 12,
    ZWJ = 13,
}

/// Prefix of every generated identifier.
pub const IDENT_PREFIX: &str = "GCB_";

impl Category {
    /// Every category, in discriminant order.
    pub const ALL: [Category; 14] = [
        Category::Other,
        Category::Prepend,
        Category::CR,
        Category::LF,
        Category::Control,
        Category::Extend,
        Category::SpacingMark,
        Category::RegionalIndicator,
        Category::L,
        Category::V,
        Category::T,
        Category::LV,
        Category::LVT,
        Category::ZWJ,
    ];

    /// Look up the category spelled `name` in a UCD property file.  Property
    /// values outside the fixed set (`Extended_Pictographic`, `Diacritic`,
    /// ...) yield `None`.
    pub fn from_name(name: &str) -> Option<Category> {
        let category = match name {
            "Other" => Category::Other,
            "Prepend" => Category::Prepend,
            "CR" => Category::CR,
            "LF" => Category::LF,
            "Control" => Category::Control,
            "Extend" => Category::Extend,
            "SpacingMark" => Category::SpacingMark,
            "Regional_Indicator" => Category::RegionalIndicator,
            "L" => Category::L,
            "V" => Category::V,
            "T" => Category::T,
            "LV" => Category::LV,
            "LVT" => Category::LVT,
            "ZWJ" => Category::ZWJ,
            _ => return None,
        };
        Some(category)
    }

    /// The property value name as spelled in the UCD.
    pub fn name(self) -> &'static str {
        match self {
            Category::Other => "Other",
            Category::Prepend => "Prepend",
            Category::CR => "CR",
            Category::LF => "LF",
            Category::Control => "Control",
            Category::Extend => "Extend",
            Category::SpacingMark => "SpacingMark",
            Category::RegionalIndicator => "Regional_Indicator",
            Category::L => "L",
            Category::V => "V",
            Category::T => "T",
            Category::LV => "LV",
            Category::LVT => "LVT",
            Category::ZWJ => "ZWJ",
        }
    }

    /// The stable integer written into generated tables.
    pub fn value(self) -> u8 {
        self as u8
    }

    /// The generated constant name, e.g. `GCB_REGIONAL_INDICATOR`.
    pub fn ident(self) -> String {
        format!("{}{}", IDENT_PREFIX, self.name().to_uppercase())
    }
}

#[test]
fn category_names_round_trip() {
    for category in Category::ALL.iter() {
        assert_eq!(Category::from_name(category.name()), Some(*category));
    }
}

#[test]
fn category_values_are_stable() {
    // Persisted by consumers; never renumber.
    assert_eq!(Category::Other.value(), 0);
    assert_eq!(Category::CR.value(), 2);
    assert_eq!(Category::SpacingMark.value(), 6);
    assert_eq!(Category::RegionalIndicator.value(), 7);
    assert_eq!(Category::ZWJ.value(), 13);

    for (i, category) in Category::ALL.iter().enumerate() {
        assert_eq!(category.value() as usize, i, "ALL is in value order");
    }
}

#[test]
fn unknown_names_are_not_categories() {
    assert_eq!(Category::from_name("Extended_Pictographic"), None);
    assert_eq!(Category::from_name("Diacritic"), None);
    assert_eq!(Category::from_name("extend"), None);
    assert_eq!(Category::from_name(""), None);
}

#[test]
fn generated_identifiers() {
    assert_eq!(Category::RegionalIndicator.ident(), "GCB_REGIONAL_INDICATOR");
    assert_eq!(Category::SpacingMark.ident(), "GCB_SPACINGMARK");
    assert_eq!(Category::ZWJ.ident(), "GCB_ZWJ");
    assert_eq!(Category::LVT.ident(), "GCB_LVT");
}
