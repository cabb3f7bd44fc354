use std::cmp;

// This module contains the in-place algorithms shared by the immutable
// `CodePointSet` and the mutable class accumulator.
//
// The primary invariant is canonical ordering. That is, a canonical sequence
// of ranges is sorted and no two ranges are overlapping or adjacent. The
// routines below accept and produce canonical sequences, with the exception
// of `canonicalize`, which restores the invariant after ranges were pushed
// in arbitrary order.
//
// Most operations append their result to the end of the vector being
// modified and then drain the original prefix. This keeps the sequential
// representation without needing a second allocation.

/// A single inclusive range of codepoints.
///
/// Codepoints are plain `u32` values rather than `char`, since the source
/// flavor can name surrogate codepoints through escapes.
#[derive(Clone, Copy, Default, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct CodePointRange {
    start: u32,
    end: u32,
}

impl CodePointRange {
    /// Create a new range. The bounds are swapped if `start > end`.
    pub fn new(start: u32, end: u32) -> CodePointRange {
        if start <= end {
            CodePointRange { start, end }
        } else {
            CodePointRange { start: end, end: start }
        }
    }

    /// Create a range containing exactly one codepoint.
    pub fn single(cp: u32) -> CodePointRange {
        CodePointRange { start: cp, end: cp }
    }

    /// The inclusive lower bound of this range.
    pub fn start(&self) -> u32 {
        self.start
    }

    /// The inclusive upper bound of this range.
    pub fn end(&self) -> u32 {
        self.end
    }

    /// Union the given overlapping range into this range.
    ///
    /// If the two ranges aren't contiguous, then this returns `None`.
    fn union(&self, other: &CodePointRange) -> Option<CodePointRange> {
        if !self.is_contiguous(other) {
            return None;
        }
        let start = cmp::min(self.start, other.start);
        let end = cmp::max(self.end, other.end);
        Some(CodePointRange::new(start, end))
    }

    /// Intersect this range with the given range and return the result.
    ///
    /// If the intersection is empty, then this returns `None`.
    fn intersect(&self, other: &CodePointRange) -> Option<CodePointRange> {
        let start = cmp::max(self.start, other.start);
        let end = cmp::min(self.end, other.end);
        if start <= end {
            Some(CodePointRange::new(start, end))
        } else {
            None
        }
    }

    /// Subtract the given range from this range and return the resulting
    /// ranges.
    ///
    /// If subtraction would result in an empty range, then no ranges are
    /// returned.
    fn difference(
        &self,
        other: &CodePointRange,
    ) -> (Option<CodePointRange>, Option<CodePointRange>) {
        if self.is_subset(other) {
            return (None, None);
        }
        if self.is_intersection_empty(other) {
            return (Some(*self), None);
        }
        let add_lower = other.start > self.start;
        let add_upper = other.end < self.end;
        let mut ret = (None, None);
        // Since !self.is_subset(other) and the intersection is non-empty, at
        // least one of these is true. And 'other.start > self.start >= 0'
        // means the decrement can't underflow (similarly for the increment).
        if add_lower {
            ret.0 = Some(CodePointRange::new(self.start, other.start - 1));
        }
        if add_upper {
            let range = CodePointRange::new(other.end + 1, self.end);
            if ret.0.is_none() {
                ret.0 = Some(range);
            } else {
                ret.1 = Some(range);
            }
        }
        ret
    }

    /// Returns true if and only if the two ranges are contiguous. Two ranges
    /// are contiguous if and only if the ranges are either overlapping or
    /// adjacent.
    fn is_contiguous(&self, other: &CodePointRange) -> bool {
        cmp::max(self.start, other.start)
            <= cmp::min(self.end, other.end).saturating_add(1)
    }

    /// Returns true if and only if the intersection of this range and the
    /// other range is empty.
    fn is_intersection_empty(&self, other: &CodePointRange) -> bool {
        cmp::max(self.start, other.start) > cmp::min(self.end, other.end)
    }

    /// Returns true if and only if this range is a subset of the other range.
    fn is_subset(&self, other: &CodePointRange) -> bool {
        other.start <= self.start && self.end <= other.end
    }
}

impl std::fmt::Debug for CodePointRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.start == self.end {
            write!(f, "{:X}", self.start)
        } else {
            write!(f, "{:X}-{:X}", self.start, self.end)
        }
    }
}

/// Converts the given ranges into a canonical ordering.
pub(crate) fn canonicalize(ranges: &mut Vec<CodePointRange>) {
    if is_canonical(ranges) {
        return;
    }
    ranges.sort();

    // We maintain the canonicalization results in-place at `0..newi`.
    // `newi` will keep track of the end of the canonicalized ranges.
    let mut newi = 0;
    for oldi in 1..ranges.len() {
        // The last new range gets merged with current old range when
        // unionable. If not, we update `newi` and store it as a new range.
        if let Some(union) = ranges[newi].union(&ranges[oldi]) {
            ranges[newi] = union;
        } else {
            newi += 1;
            ranges[newi] = ranges[oldi];
        }
    }
    ranges.truncate(newi + 1);
}

/// Returns true if and only if the given ranges are in a canonical ordering.
pub(crate) fn is_canonical(ranges: &[CodePointRange]) -> bool {
    for pair in ranges.windows(2) {
        if pair[0] >= pair[1] {
            return false;
        }
        if pair[0].is_contiguous(&pair[1]) {
            return false;
        }
    }
    true
}

/// Union `other` into `ranges`, in place.
pub(crate) fn union(
    ranges: &mut Vec<CodePointRange>,
    other: &[CodePointRange],
) {
    if other.is_empty() || ranges[..] == *other {
        return;
    }
    // This could almost certainly be done more efficiently.
    ranges.extend_from_slice(other);
    canonicalize(ranges);
}

/// Intersect `ranges` with `other`, in place.
pub(crate) fn intersect(
    ranges: &mut Vec<CodePointRange>,
    other: &[CodePointRange],
) {
    if ranges.is_empty() {
        return;
    }
    if other.is_empty() {
        ranges.clear();
        return;
    }

    // Append the intersection to the end of the vector, and then drain the
    // original ranges before we're done.
    let drain_end = ranges.len();
    let (mut a, mut b) = (0, 0);
    while a < drain_end && b < other.len() {
        if let Some(ab) = ranges[a].intersect(&other[b]) {
            ranges.push(ab);
        }
        if ranges[a].end < other[b].end {
            a += 1;
        } else {
            b += 1;
        }
    }
    ranges.drain(..drain_end);
}

/// Subtract `other` from `ranges`, in place.
pub(crate) fn difference(
    ranges: &mut Vec<CodePointRange>,
    other: &[CodePointRange],
) {
    if ranges.is_empty() || other.is_empty() {
        return;
    }

    // Remember, we can assume the canonical format invariant here, which
    // says that all ranges are sorted, not overlapping and not adjacent in
    // each set.
    let drain_end = ranges.len();

    let mut b = 0;
    for a in 0..drain_end {
        // Subtracting a range from another range could yield two ranges, and
        // after subtracting a range, it's possible that later `b` ranges
        // still apply to the current `a` range. So we keep subtracting from
        // the last pushed piece until `b` is past the end of `a`.
        let mut rest = Some(ranges[a]);
        while let Some(cur) = rest {
            if b >= other.len() || other[b].start > cur.end {
                ranges.push(cur);
                rest = None;
                continue;
            }
            match cur.difference(&other[b]) {
                (None, None) => rest = None,
                (Some(r), None) => {
                    if r.end < other[b].start {
                        // Entirely below the subtracted range.
                        ranges.push(r);
                        rest = None;
                    } else {
                        rest = Some(r);
                        b += 1;
                    }
                }
                (Some(lower), Some(upper)) => {
                    ranges.push(lower);
                    rest = Some(upper);
                    b += 1;
                }
                (None, Some(r)) => rest = Some(r),
            }
        }
        // `b` is only bumped once it lies entirely below the rest of `a`, so
        // the current `b` range may still have more to contribute to the
        // next `a`.
    }
    ranges.drain(..drain_end);
}

/// Negate `ranges` relative to the universe `0..=max`, in place.
///
/// Any codepoints above `max` are discarded first.
pub(crate) fn negate(ranges: &mut Vec<CodePointRange>, max: u32) {
    intersect(ranges, &[CodePointRange::new(0, max)]);
    if ranges.is_empty() {
        ranges.push(CodePointRange::new(0, max));
        return;
    }

    // The canonical ordering invariant means none of the increments or
    // decrements below can overflow.
    if ranges[0].start > 0 {
        let mut pre_upper = ranges[0].end;
        ranges[0] = CodePointRange::new(0, ranges[0].start - 1);
        for i in 1..ranges.len() {
            let lower = pre_upper + 1;
            pre_upper = ranges[i].end;
            ranges[i] = CodePointRange::new(lower, ranges[i].start - 1);
        }
        if pre_upper < max {
            ranges.push(CodePointRange::new(pre_upper + 1, max));
        }
    } else {
        for i in 1..ranges.len() {
            let (start, end) = (ranges[i - 1].end + 1, ranges[i].start - 1);
            ranges[i - 1] = CodePointRange::new(start, end);
        }
        let last = ranges.len() - 1;
        if ranges[last].end < max {
            ranges[last] = CodePointRange::new(ranges[last].end + 1, max);
        } else {
            ranges.pop();
        }
    }
}
