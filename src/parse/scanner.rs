use crate::error::{Error, SyntaxError, SyntaxErrorKind};

/// A cursor over the codepoints of a pattern.
///
/// Positions are codepoint offsets, never byte offsets. The cursor may sit
/// at `len()`, which means the whole pattern has been consumed.
#[derive(Clone, Debug)]
pub(crate) struct Scanner {
    chars: Vec<char>,
    pos: usize,
}

impl Scanner {
    pub(crate) fn new(pattern: &str) -> Scanner {
        Scanner { chars: pattern.chars().collect(), pos: 0 }
    }

    pub(crate) fn len(&self) -> usize {
        self.chars.len()
    }

    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    /// Move the cursor to a position recorded earlier.
    pub(crate) fn reset(&mut self, pos: usize) {
        debug_assert!(pos <= self.chars.len());
        self.pos = pos;
    }

    pub(crate) fn is_done(&self) -> bool {
        self.pos >= self.chars.len()
    }

    /// The position reported by errors detected at the end of the pattern.
    pub(crate) fn eof_pos(&self) -> usize {
        self.chars.len().saturating_sub(1)
    }

    /// Return the codepoint under the cursor, if any.
    pub(crate) fn cur(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    /// Return the codepoint `n` positions past the cursor, if any.
    pub(crate) fn peek(&self, n: usize) -> Option<char> {
        self.chars.get(self.pos + n).copied()
    }

    /// Returns true if the codepoint under the cursor is `c`.
    pub(crate) fn at(&self, c: char) -> bool {
        self.cur() == Some(c)
    }

    /// Consume and return the codepoint under the cursor.
    pub(crate) fn consume(&mut self) -> Result<char, Error> {
        match self.cur() {
            Some(c) => {
                self.pos += 1;
                Ok(c)
            }
            None => Err(self.eof_error()),
        }
    }

    /// Move the cursor forward by one codepoint, unless at the end.
    pub(crate) fn bump(&mut self) {
        if !self.is_done() {
            self.pos += 1;
        }
    }

    /// Move the cursor forward by `n` codepoints.
    pub(crate) fn advance(&mut self, n: usize) -> Result<(), Error> {
        if self.pos + n > self.chars.len() {
            return Err(self.eof_error());
        }
        self.pos += n;
        Ok(())
    }

    /// Move the cursor back by one codepoint.
    pub(crate) fn retreat(&mut self) {
        debug_assert!(self.pos > 0);
        self.pos = self.pos.saturating_sub(1);
    }

    /// Consume `literal` if the pattern continues with it. Otherwise the
    /// cursor stays where it is.
    pub(crate) fn matches(&mut self, literal: &str) -> bool {
        let mut end = self.pos;
        for c in literal.chars() {
            if self.chars.get(end) != Some(&c) {
                return false;
            }
            end += 1;
        }
        self.pos = end;
        true
    }

    /// Like `matches`, but fails with an error naming `literal` when the
    /// pattern doesn't continue with it.
    pub(crate) fn must_match(
        &mut self,
        literal: &'static str,
    ) -> Result<(), Error> {
        if self.matches(literal) {
            return Ok(());
        }
        let pos = if self.is_done() { self.eof_pos() } else { self.pos };
        Err(SyntaxError::new(SyntaxErrorKind::Expected(literal), pos).into())
    }

    /// Consume the longest run of codepoints satisfying `pred`.
    pub(crate) fn get_many<F>(&mut self, pred: F) -> String
    where
        F: Fn(char) -> bool,
    {
        self.get_up_to(usize::MAX, pred)
    }

    /// Consume the longest run of at most `limit` codepoints satisfying
    /// `pred`.
    pub(crate) fn get_up_to<F>(&mut self, limit: usize, pred: F) -> String
    where
        F: Fn(char) -> bool,
    {
        let mut run = String::new();
        let mut count = 0;
        while count < limit {
            match self.cur() {
                Some(c) if pred(c) => {
                    run.push(c);
                    self.pos += 1;
                    count += 1;
                }
                _ => break,
            }
        }
        run
    }

    /// Build a syntax error at the given position.
    pub(crate) fn error(&self, kind: SyntaxErrorKind, pos: usize) -> Error {
        SyntaxError::new(kind, pos).into()
    }

    fn eof_error(&self) -> Error {
        self.error(SyntaxErrorKind::UnexpectedEof, self.eof_pos())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codepoint_positions() {
        let mut s = Scanner::new("αβc");
        assert_eq!(3, s.len());
        assert_eq!(Some('α'), s.cur());
        assert_eq!('α', s.consume().unwrap());
        assert_eq!(1, s.pos());
        assert_eq!(Some('c'), s.peek(1));
        s.advance(2).unwrap();
        assert!(s.is_done());
        let err = s.consume().unwrap_err();
        assert_eq!(Some(2), err.position());
        s.retreat();
        assert_eq!(Some('c'), s.cur());
    }

    #[test]
    fn match_literals() {
        let mut s = Scanner::new("(?<=a");
        assert!(!s.matches("(?<!"));
        assert_eq!(0, s.pos());
        assert!(s.matches("(?<="));
        assert_eq!(4, s.pos());
        let err = s.must_match(")").unwrap_err();
        assert_eq!(Some(4), err.position());
        assert!(s.advance(2).is_err());
    }

    #[test]
    fn runs() {
        let mut s = Scanner::new("12345x");
        assert_eq!("123", s.get_up_to(3, |c| c.is_ascii_digit()));
        assert_eq!("45", s.get_many(|c| c.is_ascii_digit()));
        assert_eq!("", s.get_many(|c| c.is_ascii_digit()));
        assert_eq!(Some('x'), s.cur());
    }
}
