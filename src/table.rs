//! An ordered table of range entries, looked up first-match-wins.
//!
//! The same code point may appear in several entries (say, once from
//! `GraphemeBreakProperty.txt` and again from `PropList.txt`).  The table never
//! merges or reorders them: the earliest entry containing a code point decides
//! its category.

use crate::category::Category;
use crate::types::{CodePoint, RangeEntry};
use itertools::Itertools;

/// Whether two overlapping entries agree on their category.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq)]
pub enum OverlapKind {
    SameCategory,
    CrossCategory,
}

/// Two entries, by index into the table, sharing at least one code point.
/// `first < second`, so `first` wins for the shared code points.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Overlap {
    pub first: usize,
    pub second: usize,
    pub kind: OverlapKind,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RangeTable {
    entries: Vec<RangeEntry>,
}

impl RangeTable {
    pub fn new(entries: Vec<RangeEntry>) -> RangeTable {
        RangeTable { entries }
    }

    pub fn entries(&self) -> &[RangeEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RangeEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The category of the earliest entry containing `code`, or
    /// [`Category::Other`] if none does.
    pub fn first_match(&self, code: CodePoint) -> Category {
        self.entries
            .iter()
            .find(|entry| entry.contains(code))
            .map_or(Category::Other, |entry| entry.category)
    }

    /// Every pair of entries sharing a code point, in table order.
    ///
    /// This is purely diagnostic.  Overlaps are legal; only cross-category
    /// ones make table order observable to a lookup.
    pub fn overlaps(&self) -> Vec<Overlap> {
        self.entries
            .iter()
            .enumerate()
            .tuple_combinations()
            .filter(|((_, a), (_, b))| a.intersects(b))
            .map(|((first, a), (second, b))| Overlap {
                first,
                second,
                kind: if a.category == b.category {
                    OverlapKind::SameCategory
                } else {
                    OverlapKind::CrossCategory
                },
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a RangeTable {
    type Item = &'a RangeEntry;
    type IntoIter = std::slice::Iter<'a, RangeEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
fn sample_table() -> RangeTable {
    RangeTable::new(vec![
        RangeEntry::new(0xD, 0xD, Category::CR),
        RangeEntry::new(0x0, 0x1F, Category::Control),
        RangeEntry::new(0x300, 0x36F, Category::Extend),
        RangeEntry::new(0x340, 0x341, Category::Extend),
    ])
}

#[test]
fn first_match_wins() {
    let table = sample_table();
    assert_eq!(table.first_match(0xD), Category::CR);
    assert_eq!(table.first_match(0xA), Category::Control);
    assert_eq!(table.first_match(0x340), Category::Extend);
    assert_eq!(table.first_match(0x41), Category::Other);
}

#[test]
fn overlaps_are_classified() {
    let table = sample_table();
    assert_eq!(
        table.overlaps(),
        vec![
            Overlap {
                first: 0,
                second: 1,
                kind: OverlapKind::CrossCategory,
            },
            Overlap {
                first: 2,
                second: 3,
                kind: OverlapKind::SameCategory,
            },
        ]
    );
}

#[test]
fn empty_table() {
    let table = RangeTable::default();
    assert!(table.is_empty());
    assert_eq!(table.first_match(0), Category::Other);
    assert!(table.overlaps().is_empty());
}
