use regex_syntax::hir::{Class, HirKind};

use super::{CodePointRange, CodePointSet};

/// Resolve a Unicode property name, e.g., `L`, `Lu`, `Greek` or
/// `Script=Latin`, to the set of codepoints it denotes.
///
/// The lookup is delegated to the Unicode tables in `regex-syntax`. Names
/// that are unknown there (including Unicode blocks) resolve to `None`.
pub(crate) fn property(name: &str) -> Option<CodePointSet> {
    let is_name_char = |c: char| {
        c.is_ascii_alphanumeric() || matches!(c, '_' | '=' | ' ' | '-' | '.')
    };
    // The name is spliced into a pattern below, so reject anything that
    // could change the meaning of that pattern.
    if name.is_empty() || !name.chars().all(is_name_char) {
        return None;
    }
    let pattern = format!(r"\p{{{}}}", name);
    let mut parser = regex_syntax::ParserBuilder::new().build();
    let hir = parser.parse(&pattern).ok()?;
    match hir.kind() {
        HirKind::Class(Class::Unicode(cls)) => {
            Some(CodePointSet::new(cls.iter().map(|r| {
                CodePointRange::new(u32::from(r.start()), u32::from(r.end()))
            })))
        }
        // A property containing a single codepoint is simplified into a
        // literal.
        HirKind::Literal(lit) => {
            let mut chars = std::str::from_utf8(&lit.0).ok()?.chars();
            let c = chars.next()?;
            if chars.next().is_some() {
                return None;
            }
            Some(CodePointSet::single(u32::from(c)))
        }
        HirKind::Empty => Some(CodePointSet::empty()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn general_category() {
        let lu = property("Lu").unwrap();
        assert!(lu.contains(u32::from('A')));
        assert!(lu.contains(u32::from('Ω')));
        assert!(!lu.contains(u32::from('a')));
    }

    #[test]
    fn script() {
        let greek = property("Greek").unwrap();
        assert!(greek.contains(u32::from('α')));
        assert!(!greek.contains(u32::from('a')));
    }

    #[test]
    fn unknown() {
        assert_eq!(None, property("NotAProperty"));
        assert_eq!(None, property("L}|a"));
        assert_eq!(None, property(""));
    }
}
