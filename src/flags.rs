use std::{fmt, str::FromStr};

use crate::error::{Error, SyntaxError, SyntaxErrorKind};

/// An immutable set of matching modes.
///
/// Flags are values: [`Flags::add`] and [`Flags::remove`] return new sets and
/// never modify the receiver. A set of flags can be parsed from its textual
/// form, e.g., `"im".parse::<Flags>()`.
///
/// | char | flag |
/// |------|------|
/// | `i`  | [`Flags::CASE_INSENSITIVE`] |
/// | `m`  | [`Flags::MULTI_LINE`] |
/// | `s`  | [`Flags::DOT_ALL`] |
/// | `x`  | [`Flags::EXTENDED`] |
/// | `d`  | [`Flags::UNIX_LINES`] |
/// | `u`  | [`Flags::UNICODE`] |
/// | `y`  | [`Flags::STICKY`] |
#[derive(Clone, Copy, Default, Eq, Hash, PartialEq)]
pub struct Flags(u8);

impl Flags {
    /// Match letters without regard to case.
    pub const CASE_INSENSITIVE: Flags = Flags(1 << 0);
    /// `^` and `$` additionally match at line boundaries.
    pub const MULTI_LINE: Flags = Flags(1 << 1);
    /// `.` matches every codepoint, line terminators included.
    pub const DOT_ALL: Flags = Flags(1 << 2);
    /// Whitespace and `#` comments outside of classes are ignored.
    pub const EXTENDED: Flags = Flags(1 << 3);
    /// Only `\n` is a line terminator for `.`.
    pub const UNIX_LINES: Flags = Flags(1 << 4);
    /// Unicode mode: Unicode case folding, Unicode digits and strict
    /// escapes. Once set, it cannot be turned off.
    pub const UNICODE: Flags = Flags(1 << 5);
    /// Matches must begin exactly where the search begins.
    pub const STICKY: Flags = Flags(1 << 6);

    /// The flags and their textual form, in canonical order.
    const ALL: &'static [(char, Flags)] = &[
        ('i', Flags::CASE_INSENSITIVE),
        ('m', Flags::MULTI_LINE),
        ('s', Flags::DOT_ALL),
        ('x', Flags::EXTENDED),
        ('d', Flags::UNIX_LINES),
        ('u', Flags::UNICODE),
        ('y', Flags::STICKY),
    ];

    /// Returns a set with no flags enabled.
    pub const fn empty() -> Flags {
        Flags(0)
    }

    /// Returns the single flag denoted by the given character, if any.
    pub fn from_char(c: char) -> Option<Flags> {
        Flags::ALL.iter().find(|&&(ch, _)| ch == c).map(|&(_, flag)| flag)
    }

    /// Returns true when every flag in `other` is also in this set.
    pub const fn contains(self, other: Flags) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns a copy of this set with the given flags enabled.
    #[must_use]
    pub const fn add(self, other: Flags) -> Flags {
        Flags(self.0 | other.0)
    }

    /// Returns a copy of this set with the given flags disabled.
    #[must_use]
    pub const fn remove(self, other: Flags) -> Flags {
        Flags(self.0 & !other.0)
    }

    /// Returns true if no flags are enabled.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns true if this set contains a "type" flag. A type flag changes
    /// the matching mode irreversibly, so it may be enabled inline but never
    /// disabled.
    pub const fn has_type_flag(self) -> bool {
        self.0 & Flags::UNICODE.0 != 0
    }

    /// Returns true if every flag in this set may appear in an inline flag
    /// group. Stickiness is a property of the whole search and can only be
    /// set globally.
    pub const fn is_inline(self) -> bool {
        self.0 & Flags::STICKY.0 == 0
    }

    /// `i`
    pub fn case_insensitive(self) -> bool {
        self.contains(Flags::CASE_INSENSITIVE)
    }

    /// `m`
    pub fn multi_line(self) -> bool {
        self.contains(Flags::MULTI_LINE)
    }

    /// `s`
    pub fn dot_all(self) -> bool {
        self.contains(Flags::DOT_ALL)
    }

    /// `x`
    pub fn extended(self) -> bool {
        self.contains(Flags::EXTENDED)
    }

    /// `d`
    pub fn unix_lines(self) -> bool {
        self.contains(Flags::UNIX_LINES)
    }

    /// `u`
    pub fn unicode(self) -> bool {
        self.contains(Flags::UNICODE)
    }

    /// `y`
    pub fn sticky(self) -> bool {
        self.contains(Flags::STICKY)
    }
}

impl FromStr for Flags {
    type Err = Error;

    /// Parse the global flags of a pattern. Every character must name a
    /// flag, and no flag may be repeated. Positions in errors are offsets
    /// into the flag text.
    fn from_str(text: &str) -> Result<Flags, Error> {
        let mut flags = Flags::empty();
        for (i, c) in text.chars().enumerate() {
            let flag = match Flags::from_char(c) {
                Some(flag) => flag,
                None => {
                    let kind = SyntaxErrorKind::FlagUnrecognized(c);
                    return Err(SyntaxError::new(kind, i).into());
                }
            };
            if flags.contains(flag) {
                let kind = SyntaxErrorKind::FlagDuplicate(c);
                return Err(SyntaxError::new(kind, i).into());
            }
            flags = flags.add(flag);
        }
        Ok(flags)
    }
}

impl fmt::Display for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &(c, flag) in Flags::ALL {
            if self.contains(flag) {
                write!(f, "{}", c)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Flags({})", self)
    }
}

/// A stack of flag sets that tracks lexically scoped flag changes.
///
/// The global flags sit at the bottom and are never popped, so the stack is
/// never empty. Every group pushes a copy of the current flags when it opens
/// and pops it when it closes. An open ended flag group, e.g., `(?i)`,
/// replaces the top of the stack, which makes it last until the enclosing
/// group closes.
#[derive(Clone, Debug)]
pub struct FlagsStack {
    stack: Vec<Flags>,
}

impl FlagsStack {
    /// Create a new stack with the given global flags at the bottom.
    pub fn new(global: Flags) -> FlagsStack {
        FlagsStack { stack: vec![global] }
    }

    /// Return the flags currently in effect.
    pub fn current(&self) -> Flags {
        // The bottom of the stack is never popped.
        self.stack.last().copied().unwrap_or_default()
    }

    /// Return the global flags.
    pub fn global(&self) -> Flags {
        self.stack[0]
    }

    /// Enter a new scope with the given flags in effect.
    pub fn push(&mut self, flags: Flags) {
        self.stack.push(flags);
    }

    /// Leave the innermost scope, returning its flags.
    ///
    /// This returns `None` and leaves the stack unchanged when only the
    /// global flags remain.
    pub fn pop(&mut self) -> Option<Flags> {
        if self.stack.len() == 1 {
            return None;
        }
        self.stack.pop()
    }

    /// Replace the flags of the innermost scope.
    pub fn set_current(&mut self, flags: Flags) {
        if let Some(top) = self.stack.last_mut() {
            *top = flags;
        }
    }

    /// Return the number of scopes on this stack, including the global one.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_flags() {
        let flags: Flags = "mi".parse().unwrap();
        assert!(flags.case_insensitive());
        assert!(flags.multi_line());
        assert!(!flags.dot_all());
        assert_eq!("im", flags.to_string());
        assert_eq!(Flags::empty(), "".parse().unwrap());
    }

    #[test]
    fn parse_flags_errors() {
        let err = "imq".parse::<Flags>().unwrap_err();
        assert_eq!(Some(2), err.position());
        match err {
            Error::Syntax(ref err) => assert_eq!(
                &SyntaxErrorKind::FlagUnrecognized('q'),
                err.kind()
            ),
            _ => unreachable!(),
        }

        let err = "sis".parse::<Flags>().unwrap_err();
        assert_eq!(Some(2), err.position());
    }

    #[test]
    fn values_are_immutable() {
        let base = Flags::CASE_INSENSITIVE;
        let more = base.add(Flags::MULTI_LINE);
        assert_eq!(Flags::CASE_INSENSITIVE, base);
        assert!(more.multi_line());
        assert_eq!(Flags::MULTI_LINE, more.remove(Flags::CASE_INSENSITIVE));
    }

    #[test]
    fn type_and_inline_flags() {
        assert!(Flags::UNICODE.has_type_flag());
        assert!(!Flags::CASE_INSENSITIVE.has_type_flag());
        assert!(!Flags::STICKY.is_inline());
        assert!(Flags::DOT_ALL.is_inline());
    }

    #[test]
    fn stack_never_empty() {
        let mut stack = FlagsStack::new(Flags::MULTI_LINE);
        stack.push(Flags::CASE_INSENSITIVE);
        assert_eq!(Flags::CASE_INSENSITIVE, stack.current());
        stack.set_current(Flags::DOT_ALL);
        assert_eq!(Some(Flags::DOT_ALL), stack.pop());
        assert_eq!(None, stack.pop());
        assert_eq!(1, stack.depth());
        assert_eq!(Flags::MULTI_LINE, stack.current());
        assert_eq!(Flags::MULTI_LINE, stack.global());
    }
}
