//! Common types used across this crate, with meaning not defined within a
//! specific module.

use crate::category::Category;

/// A Unicode code point value.
pub type CodePoint = u32;

/// An inclusive code point interval `lo..=hi` assigned to one [`Category`].
///
/// For a singleton code point `lo == hi`.  Entries are immutable once
/// parsed.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq)]
pub struct RangeEntry {
    pub lo: CodePoint,
    pub hi: CodePoint,
    pub category: Category,
}

impl RangeEntry {
    pub fn new(lo: CodePoint, hi: CodePoint, category: Category) -> RangeEntry {
        debug_assert!(lo <= hi, "range entries are never inverted");
        RangeEntry { lo, hi, category }
    }

    pub fn contains(&self, code: CodePoint) -> bool {
        self.lo <= code && code <= self.hi
    }

    /// Whether `self` and `other` share at least one code point.
    pub fn intersects(&self, other: &RangeEntry) -> bool {
        self.lo <= other.hi && other.lo <= self.hi
    }
}

#[test]
fn range_entry_bounds_are_inclusive() {
    let entry = RangeEntry::new(0x41, 0x44, Category::Extend);
    assert!(!entry.contains(0x40));
    assert!(entry.contains(0x41));
    assert!(entry.contains(0x44));
    assert!(!entry.contains(0x45));

    let single = RangeEntry::new(0xD, 0xD, Category::CR);
    assert!(single.contains(0xD));
    assert!(single.intersects(&RangeEntry::new(0x0, 0xD, Category::Control)));
    assert!(!single.intersects(&RangeEntry::new(0xE, 0x1F, Category::Control)));
}
