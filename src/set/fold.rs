use regex_syntax::hir::{ClassUnicode, ClassUnicodeRange};

use super::interval::{self, CodePointRange};

/// The case folding algorithm applied to character classes when matching
/// case insensitively.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CaseFoldAlgorithm {
    /// Only `A-Z` and `a-z` are considered case equivalent.
    Ascii,
    /// Unicode simple case folding, e.g., `k`, `K` and the Kelvin sign are
    /// all equivalent.
    Unicode,
}

/// Expand the given canonical ranges such that they contain every case
/// equivalent of every codepoint they contain. The result is canonical.
pub(crate) fn case_fold(
    ranges: &mut Vec<CodePointRange>,
    algorithm: CaseFoldAlgorithm,
) {
    match algorithm {
        CaseFoldAlgorithm::Ascii => fold_ascii(ranges),
        CaseFoldAlgorithm::Unicode => fold_unicode(ranges),
    }
    interval::canonicalize(ranges);
}

fn fold_ascii(ranges: &mut Vec<CodePointRange>) {
    const LOWER: (u32, u32) = (0x61, 0x7A);
    const UPPER: (u32, u32) = (0x41, 0x5A);
    const DELTA: u32 = 0x20;

    let len = ranges.len();
    for i in 0..len {
        let (start, end) = (ranges[i].start(), ranges[i].end());
        let (lo, hi) = (start.max(LOWER.0), end.min(LOWER.1));
        if lo <= hi {
            ranges.push(CodePointRange::new(lo - DELTA, hi - DELTA));
        }
        let (lo, hi) = (start.max(UPPER.0), end.min(UPPER.1));
        if lo <= hi {
            ranges.push(CodePointRange::new(lo + DELTA, hi + DELTA));
        }
    }
}

fn fold_unicode(ranges: &mut Vec<CodePointRange>) {
    // Surrogates and anything beyond U+10FFFF have no case mappings, so they
    // are simply left out of the class handed to the folding tables.
    let mut class = ClassUnicode::new(ranges.iter().flat_map(|r| {
        scalar_ranges(*r).into_iter().flatten().filter_map(|(s, e)| {
            let (start, end) = (char::from_u32(s)?, char::from_u32(e)?);
            Some(ClassUnicodeRange::new(start, end))
        })
    }));
    if class.try_case_fold_simple().is_err() {
        debug!("Unicode case folding unavailable, falling back to ASCII");
        fold_ascii(ranges);
        return;
    }
    ranges.extend(class.iter().map(|r| {
        CodePointRange::new(u32::from(r.start()), u32::from(r.end()))
    }));
}

/// Split a range of codepoints into at most two ranges of Unicode scalar
/// values.
fn scalar_ranges(range: CodePointRange) -> [Option<(u32, u32)>; 2] {
    const SURROGATE_START: u32 = 0xD800;
    const SURROGATE_END: u32 = 0xDFFF;
    const MAX: u32 = 0x10FFFF;

    let (start, end) = (range.start(), range.end().min(MAX));
    if start > end {
        return [None, None];
    }
    let below = if start < SURROGATE_START {
        Some((start, end.min(SURROGATE_START - 1)))
    } else {
        None
    };
    let above = if end > SURROGATE_END {
        Some((start.max(SURROGATE_END + 1), end))
    } else {
        None
    };
    [below, above]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fold(pairs: &[(u32, u32)], algo: CaseFoldAlgorithm) -> Vec<(u32, u32)> {
        let mut ranges: Vec<CodePointRange> =
            pairs.iter().map(|&(s, e)| CodePointRange::new(s, e)).collect();
        interval::canonicalize(&mut ranges);
        case_fold(&mut ranges, algo);
        ranges.iter().map(|r| (r.start(), r.end())).collect()
    }

    #[test]
    fn ascii() {
        assert_eq!(
            vec![(0x41, 0x41), (0x61, 0x61)],
            fold(&[(0x61, 0x61)], CaseFoldAlgorithm::Ascii)
        );
        assert_eq!(
            vec![(0x30, 0x39)],
            fold(&[(0x30, 0x39)], CaseFoldAlgorithm::Ascii)
        );
        // The Kelvin sign is left alone by ASCII folding.
        assert_eq!(
            vec![(0x4B, 0x4B), (0x6B, 0x6B)],
            fold(&[(0x6B, 0x6B)], CaseFoldAlgorithm::Ascii)
        );
    }

    #[test]
    fn unicode() {
        assert_eq!(
            vec![(0x4B, 0x4B), (0x6B, 0x6B), (0x212A, 0x212A)],
            fold(&[(0x6B, 0x6B)], CaseFoldAlgorithm::Unicode)
        );
    }

    #[test]
    fn surrogates_survive() {
        assert_eq!(
            vec![(0xD800, 0xDFFF)],
            fold(&[(0xD800, 0xDFFF)], CaseFoldAlgorithm::Unicode)
        );
    }
}
