/*!
This module provides a tree builder that prints the target dialect.
*/

use std::fmt::Write;

use crate::{
    builder::{Quantifier, TreeBuilder},
    is_syntax_character,
    set::CodePointSet,
};

/// Classes are printed relative to the full Unicode range.
const MAX_CODE_POINT: u32 = 0x10FFFF;

/// A tree builder that renders the calls it receives as a pattern string in
/// the target dialect, which uses ECMAScript syntax.
///
/// The printed pattern does not resemble the source pattern much, since
/// classes are written out in full, e.g., `\d` in Unicode mode prints as a
/// long list of ranges. Every printed pattern is parseable again, and
/// parsing it yields the same calls modulo class formatting.
///
/// Non-printable and non-ASCII codepoints are printed as `\u{HEX}` escapes,
/// so the output assumes the target engine's Unicode mode.
#[derive(Debug, Default)]
pub struct Printer {
    out: String,
    frames: Vec<Frame>,
    /// Set right after a backreference, so that a digit following it isn't
    /// read as part of the group number.
    after_backref: bool,
}

/// An open group in the output.
#[derive(Debug)]
struct Frame {
    /// Where this group's opening text begins.
    start: usize,
    /// Where the most recent term in the current alternative begins.
    term: Option<usize>,
}

impl Printer {
    /// Create a new printer.
    pub fn new() -> Printer {
        Printer::default()
    }

    /// Return the pattern printed so far.
    pub fn pattern(&self) -> &str {
        &self.out
    }

    /// Consume this printer and return the pattern.
    pub fn into_pattern(self) -> String {
        self.out
    }

    fn open(&mut self, prefix: &str) {
        self.after_backref = false;
        let start = self.out.len();
        self.out.push_str(prefix);
        self.frames.push(Frame { start, term: None });
    }

    /// Record that a new term starts at the current end of the output.
    fn begin_term(&mut self) {
        self.after_backref = false;
        let pos = self.out.len();
        if let Some(frame) = self.frames.last_mut() {
            frame.term = Some(pos);
        }
    }

    fn write_literal(&mut self, cp: u32, in_class: bool) {
        let escape = match cp {
            0x09 => "\\t",
            0x0A => "\\n",
            0x0B => "\\v",
            0x0C => "\\f",
            0x0D => "\\r",
            0x20..=0x7E => {
                let c = char::from(cp as u8);
                if is_syntax_character(c) || (in_class && c == '-') {
                    self.out.push('\\');
                }
                self.out.push(c);
                return;
            }
            _ => {
                // Writing to a String never fails.
                let _ = write!(self.out, "\\u{{{:X}}}", cp);
                return;
            }
        };
        self.out.push_str(escape);
    }

    fn write_class(&mut self, set: &CodePointSet) {
        if let Some(cp) = set.single_char() {
            self.write_literal(cp, false);
            return;
        }
        if set.is_empty() {
            self.out.push_str("[]");
            return;
        }
        let complement = set.invert(MAX_CODE_POINT);
        if complement.is_empty() {
            self.out.push_str("[^]");
            return;
        }
        let (open, ranges) =
            if complement.ranges().len() <= set.ranges().len() {
                ("[^", complement.ranges())
            } else {
                ("[", set.ranges())
            };
        self.out.push_str(open);
        for r in ranges {
            self.write_literal(r.start(), true);
            if r.end() > r.start() {
                self.out.push('-');
                self.write_literal(r.end(), true);
            }
        }
        self.out.push(']');
    }
}

impl TreeBuilder for Printer {
    fn push_root_group(&mut self) {
        self.out.clear();
        self.frames.clear();
        self.after_backref = false;
        self.frames.push(Frame { start: 0, term: None });
    }

    fn pop_root_group(&mut self) {
        self.frames.pop();
    }

    fn push_group(&mut self) {
        self.open("(?:");
    }

    fn push_capture_group(&mut self) {
        self.open("(");
    }

    fn push_look_ahead_assertion(&mut self, negate: bool) {
        self.open(if negate { "(?!" } else { "(?=" });
    }

    fn push_look_behind_assertion(&mut self, negate: bool) {
        self.open(if negate { "(?<!" } else { "(?<=" });
    }

    fn pop_group(&mut self) {
        self.after_backref = false;
        self.out.push(')');
        if let Some(frame) = self.frames.pop() {
            if let Some(parent) = self.frames.last_mut() {
                parent.term = Some(frame.start);
            }
        }
    }

    fn next_sequence(&mut self) {
        self.after_backref = false;
        self.out.push('|');
        if let Some(frame) = self.frames.last_mut() {
            frame.term = None;
        }
    }

    fn add_char_class(&mut self, set: &CodePointSet, _single_char: bool) {
        let digit =
            set.single_char().map_or(false, |cp| (0x30..=0x39).contains(&cp));
        if self.after_backref && digit {
            self.out.push_str("(?:)");
        }
        self.begin_term();
        self.write_class(set);
    }

    fn add_caret(&mut self) {
        self.begin_term();
        self.out.push('^');
    }

    fn add_dollar(&mut self) {
        self.begin_term();
        self.out.push('$');
    }

    fn add_quantifier(&mut self, q: Quantifier) {
        self.after_backref = false;
        // Writing to a String never fails.
        let _ = match (q.min, q.max) {
            (0, None) => write!(self.out, "*"),
            (1, None) => write!(self.out, "+"),
            (0, Some(1)) => write!(self.out, "?"),
            (min, None) => write!(self.out, "{{{},}}", min),
            (min, Some(max)) if min == max => write!(self.out, "{{{}}}", min),
            (min, Some(max)) => write!(self.out, "{{{},{}}}", min, max),
        };
        if !q.greedy {
            self.out.push('?');
        }
    }

    fn add_back_reference(&mut self, group: u32) {
        self.begin_term();
        let _ = write!(self.out, "\\{}", group);
        self.after_backref = true;
    }

    fn add_dead_node(&mut self) {
        self.begin_term();
        self.out.push_str("[]");
    }

    fn wrap_cur_term_in_group(&mut self) {
        let start = match self.frames.last().and_then(|f| f.term) {
            Some(start) => start,
            None => return,
        };
        self.out.insert_str(start, "(?:");
        self.out.push(')');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class(set: &CodePointSet) -> String {
        let mut p = Printer::new();
        p.push_root_group();
        p.add_char_class(set, false);
        p.pop_root_group();
        p.into_pattern()
    }

    #[test]
    fn print_classes() {
        assert_eq!("a", class(&CodePointSet::single(0x61)));
        assert_eq!("\\.", class(&CodePointSet::single(0x2E)));
        assert_eq!("\\n", class(&CodePointSet::single(0x0A)));
        assert_eq!("\\u{E9}", class(&CodePointSet::single(0xE9)));
        assert_eq!("[]", class(&CodePointSet::empty()));
        assert_eq!("[^]", class(&CodePointSet::range(0, 0x10FFFF)));
        assert_eq!("[a-z]", class(&CodePointSet::range(0x61, 0x7A)));
        let pair = |a: u32, b: u32| {
            CodePointSet::single(a).union(&CodePointSet::single(b))
        };
        assert_eq!("[Aa]", class(&pair(0x41, 0x61)));
        assert_eq!(
            "[^\\n]",
            class(&CodePointSet::single(0x0A).invert(0x10FFFF))
        );
        assert_eq!("[\\-\\]]", class(&pair(0x2D, 0x5D)));
    }

    #[test]
    fn print_groups_and_quantifiers() {
        let mut p = Printer::new();
        p.push_root_group();
        p.push_capture_group();
        p.add_char_class(&CodePointSet::single(0x61), true);
        p.add_quantifier(Quantifier { min: 2, max: Some(5), greedy: false });
        p.pop_group();
        p.add_quantifier(Quantifier::zero_or_more(true));
        p.next_sequence();
        p.add_back_reference(1);
        p.add_quantifier(Quantifier { min: 3, max: None, greedy: true });
        p.pop_root_group();
        assert_eq!("(a{2,5}?)*|\\1{3,}", p.pattern());
    }

    #[test]
    fn print_digit_after_backreference() {
        let mut p = Printer::new();
        p.push_root_group();
        p.push_capture_group();
        p.pop_group();
        p.add_back_reference(1);
        p.add_char_class(&CodePointSet::single(0x30), true);
        p.add_char_class(&CodePointSet::single(0x31), true);
        p.pop_root_group();
        assert_eq!("()\\1(?:)01", p.pattern());
    }

    #[test]
    fn print_wrapped_term() {
        let mut p = Printer::new();
        p.push_root_group();
        p.add_char_class(&CodePointSet::single(0x61), true);
        p.add_caret();
        p.wrap_cur_term_in_group();
        p.add_quantifier(Quantifier::zero_or_one(true));
        p.pop_root_group();
        assert_eq!("a(?:^)?", p.pattern());
    }
}
