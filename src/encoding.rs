use crate::set::CodePointSet;

/// Describes the encoding of the strings a translated pattern will be matched
/// against.
///
/// The encoding determines the universe of codepoints: inverting a class
/// complements it within `0..=max_code_point()`, and escapes denoting larger
/// codepoints are rejected.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Encoding {
    name: &'static str,
    max: u32,
}

impl Encoding {
    /// UTF-32. Every codepoint, surrogates included.
    pub const UTF_32: Encoding = Encoding { name: "UTF-32", max: 0x10FFFF };
    /// UTF-16. Lone surrogates are representable.
    pub const UTF_16: Encoding = Encoding { name: "UTF-16", max: 0x10FFFF };
    /// ISO-8859-1.
    pub const LATIN_1: Encoding = Encoding { name: "LATIN-1", max: 0xFF };
    /// 7-bit ASCII.
    pub const ASCII: Encoding = Encoding { name: "ASCII", max: 0x7F };

    /// Returns the encoding with the given name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Encoding> {
        [
            Encoding::UTF_32,
            Encoding::UTF_16,
            Encoding::LATIN_1,
            Encoding::ASCII,
        ]
        .into_iter()
        .find(|enc| enc.name.eq_ignore_ascii_case(name))
    }

    /// The name of this encoding, e.g., `UTF-16`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The largest codepoint this encoding can represent.
    pub fn max_code_point(&self) -> u32 {
        self.max
    }

    /// Returns the set of every codepoint in this encoding.
    pub fn full_set(&self) -> CodePointSet {
        CodePointSet::range(0, self.max)
    }

    /// Drop every codepoint in `set` that this encoding can't represent.
    pub(crate) fn trim(&self, set: &CodePointSet) -> CodePointSet {
        if set.ranges().last().map_or(true, |r| r.end() <= self.max) {
            return set.clone();
        }
        set.intersect(&self.full_set())
    }
}

impl Default for Encoding {
    fn default() -> Encoding {
        Encoding::UTF_32
    }
}
