use super::{
    fold::{self, CaseFoldAlgorithm},
    interval::{self, CodePointRange},
    CodePointSet,
};

/// A mutable set of codepoints used while a character class is being parsed.
///
/// The ranges are kept canonical after every operation, so freezing the
/// accumulator into a [`CodePointSet`] is a plain copy.
#[derive(Clone, Debug, Default)]
pub(crate) struct ClassAccumulator {
    ranges: Vec<CodePointRange>,
}

impl ClassAccumulator {
    /// Remove every codepoint, keeping the allocation around.
    pub(crate) fn clear(&mut self) {
        self.ranges.clear();
    }

    pub(crate) fn add_code_point(&mut self, cp: u32) {
        self.add_range(cp, cp);
    }

    pub(crate) fn add_range(&mut self, start: u32, end: u32) {
        self.ranges.push(CodePointRange::new(start, end));
        interval::canonicalize(&mut self.ranges);
    }

    pub(crate) fn add_set(&mut self, set: &CodePointSet) {
        interval::union(&mut self.ranges, set.ranges());
    }

    pub(crate) fn add_accumulator(&mut self, other: &ClassAccumulator) {
        interval::union(&mut self.ranges, &other.ranges);
    }

    /// Keep only the codepoints that are also in `other`.
    pub(crate) fn intersect_with(&mut self, other: &ClassAccumulator) {
        interval::intersect(&mut self.ranges, &other.ranges);
    }

    /// Complement this set within `0..=max`.
    pub(crate) fn invert(&mut self, max: u32) {
        interval::negate(&mut self.ranges, max);
    }

    pub(crate) fn case_fold(&mut self, algorithm: CaseFoldAlgorithm) {
        fold::case_fold(&mut self.ranges, algorithm);
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub(crate) fn matches_single_char(&self) -> bool {
        matches!(self.ranges[..], [r] if r.start() == r.end())
    }

    /// Freeze the current contents into an immutable set.
    pub(crate) fn to_set(&self) -> CodePointSet {
        CodePointSet::from_canonical(self.ranges.clone())
    }
}

/// A free list of class accumulators.
///
/// Parsing a nested class or the right hand side of an intersection checks
/// out a fresh accumulator, so that the enclosing class can keep its own
/// accumulator untouched until the nested result is merged back. Every
/// accumulator acquired from the pool is handed back with `release` once its
/// contents have been merged. An accumulator is owned by exactly one party at
/// a time: either the pool or the parser frame that acquired it.
#[derive(Debug, Default)]
pub(crate) struct ClassPool {
    free: Vec<ClassAccumulator>,
    outstanding: usize,
}

impl ClassPool {
    /// Check out an empty accumulator, reusing a released one if possible.
    pub(crate) fn acquire(&mut self) -> ClassAccumulator {
        self.outstanding += 1;
        self.free.pop().unwrap_or_default()
    }

    /// Return an accumulator to the pool.
    pub(crate) fn release(&mut self, mut acc: ClassAccumulator) {
        acc.clear();
        self.outstanding = self.outstanding.saturating_sub(1);
        self.free.push(acc);
    }

    /// The number of accumulators acquired but not yet released.
    pub(crate) fn outstanding(&self) -> usize {
        self.outstanding
    }
}
