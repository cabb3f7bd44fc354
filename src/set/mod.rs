/*!
Sets of codepoints and the machinery for building them.

[`CodePointSet`] is the immutable value handed to a tree builder for every
character class. Classes are assembled in a mutable accumulator that is
checked out of a per-parser pool, and are only frozen into a `CodePointSet`
once complete.
*/

use std::fmt;

pub use self::{fold::CaseFoldAlgorithm, interval::CodePointRange};

pub(crate) mod accumulator;
pub(crate) mod fold;
mod interval;
pub(crate) mod tables;
pub(crate) mod unicode;

/// An immutable set of codepoints.
///
/// The set is stored as a sorted sequence of ranges in which no two ranges
/// overlap or are adjacent. All set operations return new sets.
#[derive(Clone, Default, Eq, Hash, PartialEq)]
pub struct CodePointSet {
    ranges: Vec<CodePointRange>,
}

impl CodePointSet {
    /// Returns a set containing no codepoints.
    pub fn empty() -> CodePointSet {
        CodePointSet { ranges: vec![] }
    }

    /// Create a new set from a sequence of ranges. The ranges may be given in
    /// any order and may overlap.
    pub fn new<I>(ranges: I) -> CodePointSet
    where
        I: IntoIterator<Item = CodePointRange>,
    {
        let mut ranges: Vec<CodePointRange> = ranges.into_iter().collect();
        interval::canonicalize(&mut ranges);
        CodePointSet { ranges }
    }

    /// Returns a set containing exactly one codepoint.
    pub fn single(cp: u32) -> CodePointSet {
        CodePointSet { ranges: vec![CodePointRange::single(cp)] }
    }

    /// Returns a set containing every codepoint in `start..=end`.
    pub fn range(start: u32, end: u32) -> CodePointSet {
        CodePointSet { ranges: vec![CodePointRange::new(start, end)] }
    }

    /// Build a set from one of the static tables of inclusive pairs.
    pub(crate) fn from_table(table: &[(u32, u32)]) -> CodePointSet {
        CodePointSet::new(
            table.iter().map(|&(start, end)| CodePointRange::new(start, end)),
        )
    }

    /// Wrap a sequence of ranges that is already canonical.
    pub(crate) fn from_canonical(ranges: Vec<CodePointRange>) -> CodePointSet {
        debug_assert!(interval::is_canonical(&ranges));
        CodePointSet { ranges }
    }

    /// Return the ranges in this set, in ascending order.
    pub fn ranges(&self) -> &[CodePointRange] {
        &self.ranges
    }

    /// Returns true if this set contains no codepoints.
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Returns true if this set contains every codepoint in `0..=max`.
    pub fn is_full(&self, max: u32) -> bool {
        match self.ranges.first() {
            Some(r) => r.start() == 0 && r.end() >= max,
            None => false,
        }
    }

    /// Returns true if the given codepoint is in this set.
    pub fn contains(&self, cp: u32) -> bool {
        self.ranges
            .binary_search_by(|r| {
                if r.end() < cp {
                    std::cmp::Ordering::Less
                } else if r.start() > cp {
                    std::cmp::Ordering::Greater
                } else {
                    std::cmp::Ordering::Equal
                }
            })
            .is_ok()
    }

    /// Returns the sole codepoint in this set, if it contains exactly one.
    pub fn single_char(&self) -> Option<u32> {
        match self.ranges[..] {
            [r] if r.start() == r.end() => Some(r.start()),
            _ => None,
        }
    }

    /// Returns true if this set matches exactly one codepoint.
    pub fn matches_single_char(&self) -> bool {
        self.single_char().is_some()
    }

    /// Returns the union of this set and `other`.
    #[must_use]
    pub fn union(&self, other: &CodePointSet) -> CodePointSet {
        let mut ranges = self.ranges.clone();
        interval::union(&mut ranges, &other.ranges);
        CodePointSet { ranges }
    }

    /// Returns the intersection of this set and `other`.
    #[must_use]
    pub fn intersect(&self, other: &CodePointSet) -> CodePointSet {
        let mut ranges = self.ranges.clone();
        interval::intersect(&mut ranges, &other.ranges);
        CodePointSet { ranges }
    }

    /// Returns the codepoints in this set that are not in `other`.
    #[must_use]
    pub fn difference(&self, other: &CodePointSet) -> CodePointSet {
        let mut ranges = self.ranges.clone();
        interval::difference(&mut ranges, &other.ranges);
        CodePointSet { ranges }
    }

    /// Returns the complement of this set within `0..=max`, where `max` is
    /// the largest codepoint of the encoding in use.
    #[must_use]
    pub fn invert(&self, max: u32) -> CodePointSet {
        let mut ranges = self.ranges.clone();
        interval::negate(&mut ranges, max);
        CodePointSet { ranges }
    }
}

impl fmt::Debug for CodePointSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.ranges.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(ranges: &[(u32, u32)]) -> CodePointSet {
        CodePointSet::from_table(ranges)
    }

    fn pairs(set: &CodePointSet) -> Vec<(u32, u32)> {
        set.ranges().iter().map(|r| (r.start(), r.end())).collect()
    }

    #[test]
    fn canonical() {
        let s = set(&[(10, 20), (5, 9), (15, 30), (40, 40), (41, 42)]);
        assert_eq!(vec![(5, 30), (40, 42)], pairs(&s));
        assert_eq!(
            vec![(3, 7)],
            pairs(&CodePointSet::new(vec![CodePointRange::new(7, 3)]))
        );
    }

    #[test]
    fn union() {
        let a = set(&[(b'a' as u32, b'c' as u32)]);
        let b = set(&[(b'd' as u32, b'f' as u32), (b'x' as u32, b'z' as u32)]);
        assert_eq!(
            vec![(b'a' as u32, b'f' as u32), (b'x' as u32, b'z' as u32)],
            pairs(&a.union(&b))
        );
        assert_eq!(a, a.union(&CodePointSet::empty()));
    }

    #[test]
    fn intersect() {
        let a = set(&[(0, 10), (20, 30), (40, 50)]);
        let b = set(&[(5, 25), (45, 100)]);
        assert_eq!(vec![(5, 10), (20, 25), (45, 50)], pairs(&a.intersect(&b)));
        assert!(a.intersect(&CodePointSet::empty()).is_empty());
        assert!(set(&[(0, 5)]).intersect(&set(&[(6, 9)])).is_empty());
    }

    #[test]
    fn difference() {
        let a = set(&[(b'a' as u32, b't' as u32)]);
        let b = set(&[
            (b'a' as u32, b'c' as u32),
            (b'g' as u32, b'i' as u32),
            (b'r' as u32, b't' as u32),
            (b'x' as u32, b'z' as u32),
        ]);
        assert_eq!(
            vec![(b'd' as u32, b'f' as u32), (b'j' as u32, b'q' as u32)],
            pairs(&a.difference(&b))
        );

        let a = set(&[(0, 10), (20, 30)]);
        let b = set(&[(5, 25)]);
        assert_eq!(vec![(0, 4), (26, 30)], pairs(&a.difference(&b)));

        let a = set(&[(0, 100)]);
        let b = set(&[(0, 100)]);
        assert!(a.difference(&b).is_empty());
    }

    #[test]
    fn invert() {
        let max = 0x10FFFF;
        assert_eq!(vec![(0, max)], pairs(&CodePointSet::empty().invert(max)));
        assert!(CodePointSet::range(0, max).invert(max).is_empty());

        let s = set(&[(0x0A, 0x0A)]);
        assert_eq!(vec![(0, 0x09), (0x0B, max)], pairs(&s.invert(max)));

        let s = set(&[(0, 5), (10, 20)]);
        assert_eq!(vec![(6, 9), (21, max)], pairs(&s.invert(max)));

        // Codepoints beyond the encoding are dropped.
        let s = set(&[(0x41, 0x41), (0x100, 0x200)]);
        assert_eq!(vec![(0, 0x40), (0x42, 0xFF)], pairs(&s.invert(0xFF)));
    }

    #[test]
    fn membership() {
        let s = set(&[(b'a' as u32, b'c' as u32), (0x2028, 0x2029)]);
        assert!(s.contains(b'b' as u32));
        assert!(s.contains(0x2029));
        assert!(!s.contains(b'd' as u32));
        assert!(!s.matches_single_char());
        assert_eq!(Some(0x61), CodePointSet::single(0x61).single_char());
        assert!(CodePointSet::range(0, 0x10FFFF).is_full(0x10FFFF));
        assert!(!s.is_full(0x10FFFF));
    }
}
