use crate::{
    error::{Error, SyntaxErrorKind},
    is_syntax_character,
    set::{tables, unicode, CodePointSet},
};

use super::{
    is_hex, is_octal,
    token::{Anchor, Token},
    ParserI,
};

/// A prefix of a control or meta escape, e.g., the `\c` of `\cA`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Modifier {
    Control,
    Meta,
}

impl Modifier {
    fn apply(self, cp: u32) -> u32 {
        match self {
            Modifier::Control => cp & 0x9F,
            Modifier::Meta => (cp & 0xFF) | 0x80,
        }
    }
}

impl<'p, 'b> ParserI<'p, 'b> {
    /// Parse an escape outside of a class. The backslash has been consumed.
    ///
    /// `None` is returned for escapes that were fully handled while being
    /// read.
    pub(super) fn escape(&mut self) -> Result<Option<Token>, Error> {
        let backslash = self.token_start;
        let c = match self.scanner.cur() {
            Some(c) => c,
            None => {
                return Err(self
                    .scanner
                    .error(SyntaxErrorKind::EscapeIncomplete, backslash))
            }
        };
        let anchor = match c {
            'A' => Some(Anchor::StartText),
            'z' => Some(Anchor::EndText),
            'Z' => Some(Anchor::EndTextOptionalNewline),
            'b' => Some(Anchor::WordBoundary),
            'B' => Some(Anchor::NotWordBoundary),
            'G' => Some(Anchor::StartSearch),
            _ => None,
        };
        if let Some(anchor) = anchor {
            self.scanner.bump();
            return Ok(Some(Token::Anchor(anchor)));
        }
        let token = match c {
            '1'..='9' => self.backreference(),
            'k' => {
                self.scanner.bump();
                self.named_backreference(backslash)?
            }
            'Q' => {
                self.scanner.bump();
                self.quoted()?;
                return Ok(None);
            }
            'R' | 'X' => {
                self.scanner.bump();
                self.bailout(if c == 'R' {
                    "linebreak escapes are not supported"
                } else {
                    "grapheme cluster escapes are not supported"
                });
                let set = CodePointSet::empty();
                Token::CharClass { set, single_char: false }
            }
            c => match self.class_escape(c, backslash)? {
                Some(set) => Token::CharClass { set, single_char: false },
                None => {
                    let cp = self.char_escape(backslash, false)?;
                    self.literal(cp)
                }
            },
        };
        Ok(Some(token))
    }

    /// `\1` through `\99...`. A number with several digits refers to the
    /// longest prefix that doesn't exceed the number of groups opened so
    /// far, and the remaining digits are literals.
    fn backreference(&mut self) -> Token {
        let opened = self.groups.capture_count();
        let mut number = 0u32;
        while let Some(d) = self.scanner.cur().and_then(|c| c.to_digit(10)) {
            let next = number.saturating_mul(10).saturating_add(d);
            if number != 0 && next > opened {
                break;
            }
            number = next;
            self.scanner.bump();
        }
        if number > opened {
            return Token::BackReference(vec![]);
        }
        Token::BackReference(vec![number])
    }

    /// `\k<name>`. The `k` has been consumed.
    fn named_backreference(
        &mut self,
        backslash: usize,
    ) -> Result<Token, Error> {
        self.scanner.must_match("<")?;
        let name = self.group_name()?;
        match self.groups.lookup(&name) {
            Some(numbers) => Ok(Token::BackReference(numbers.to_vec())),
            None => Err(self
                .scanner
                .error(SyntaxErrorKind::GroupNameUnknown(name), backslash)),
        }
    }

    /// `\Q...\E`: everything up to `\E` or the end of the pattern is a
    /// literal. The `Q` has been consumed.
    fn quoted(&mut self) -> Result<(), Error> {
        while let Some(c) = self.scanner.cur() {
            if c == '\\' && self.scanner.peek(1) == Some('E') {
                self.scanner.advance(2)?;
                break;
            }
            self.scanner.bump();
            let token = self.literal(u32::from(c));
            self.apply(token)?;
        }
        Ok(())
    }

    /// Parse a class escape, e.g., `\d` or `\p{Greek}`, if the escape under
    /// the cursor is one. The returned set has already been inverted if
    /// necessary and limited to the encoding.
    pub(super) fn class_escape(
        &mut self,
        c: char,
        backslash: usize,
    ) -> Result<Option<CodePointSet>, Error> {
        let flags = self.flags();
        let table = match c.to_ascii_lowercase() {
            'd' if flags.unicode() => tables::DIGIT_UNICODE,
            'd' => tables::DIGIT,
            's' if self.config.legacy_whitespace => {
                tables::WHITESPACE_LEGACY
            }
            's' => tables::WHITESPACE,
            'h' => tables::HORIZONTAL_SPACE,
            'v' => tables::VERTICAL_SPACE,
            'w' if flags.unicode() && flags.case_insensitive() => {
                tables::WORD_UNICODE_IGNORE_CASE
            }
            'w' => tables::WORD,
            'p' => {
                self.scanner.bump();
                let set = self.property(c == 'P', backslash)?;
                return Ok(Some(set));
            }
            _ => return Ok(None),
        };
        self.scanner.bump();
        let mut set = CodePointSet::from_table(table);
        if c.is_ascii_uppercase() {
            set = set.invert(self.config.encoding.max_code_point());
        }
        Ok(Some(self.config.encoding.trim(&set)))
    }

    /// `\pL`, `\p{Name}` and their negations. The `p` or `P` has been
    /// consumed.
    fn property(
        &mut self,
        negate: bool,
        backslash: usize,
    ) -> Result<CodePointSet, Error> {
        let name = if self.scanner.matches("{") {
            let name = self.scanner.get_many(|c| c != '}');
            self.scanner.must_match("}")?;
            name
        } else {
            match self.scanner.consume() {
                Ok(c) => c.to_string(),
                Err(_) => {
                    return Err(self
                        .scanner
                        .error(SyntaxErrorKind::EscapeIncomplete, backslash))
                }
            }
        };
        if name.is_empty() {
            return Err(self
                .scanner
                .error(SyntaxErrorKind::EscapeInvalid, backslash));
        }
        let set = match tables::posix_property(&name) {
            Some(table) => Some(CodePointSet::from_table(table)),
            None => {
                unicode::property(name.strip_prefix("Is").unwrap_or(&name))
            }
        };
        let mut set = match set {
            Some(set) => set,
            None => {
                let reason = format!("unsupported Unicode property {}", name);
                self.bailout(&reason);
                CodePointSet::empty()
            }
        };
        // Folded before negation, as bracketed classes are.
        if self.flags().case_insensitive() {
            let mut acc = self.pool.acquire();
            acc.add_set(&set);
            acc.case_fold(self.fold_algorithm());
            set = acc.to_set();
            self.pool.release(acc);
        }
        if negate {
            set = set.invert(self.config.encoding.max_code_point());
        }
        Ok(self.config.encoding.trim(&set))
    }

    /// Parse an escape denoting a single codepoint. The backslash has been
    /// consumed and the cursor is at the character after it.
    pub(super) fn char_escape(
        &mut self,
        backslash: usize,
        in_class: bool,
    ) -> Result<u32, Error> {
        let c = match self.scanner.cur() {
            Some(c) => c,
            None => {
                return Err(self
                    .scanner
                    .error(SyntaxErrorKind::EscapeIncomplete, backslash))
            }
        };
        match c {
            'x' => {
                self.scanner.bump();
                self.hex_escape(backslash)
            }
            'u' => {
                self.scanner.bump();
                self.unicode_escape(backslash)
            }
            '0' => {
                self.scanner.bump();
                if self.flags().unicode()
                    && self.scanner.cur().map_or(false, |c| c.is_ascii_digit())
                {
                    return Err(self
                        .scanner
                        .error(SyntaxErrorKind::EscapeInvalid, backslash));
                }
                Ok(self.octal(0, 3))
            }
            '1'..='7' if in_class => {
                if self.flags().unicode() {
                    return Err(self
                        .scanner
                        .error(SyntaxErrorKind::EscapeInvalid, backslash));
                }
                self.scanner.bump();
                Ok(self.octal(u32::from(c) - u32::from('0'), 2))
            }
            'b' if in_class => {
                self.scanner.bump();
                Ok(0x08)
            }
            'a' | 'e' | 'f' | 'n' | 'r' | 't' | 'c' | 'C' | 'M' => {
                self.control_escape(backslash)
            }
            c => {
                self.scanner.bump();
                let syntax = is_syntax_character(c) || (in_class && c == '-');
                if !syntax && self.flags().unicode() {
                    return Err(self
                        .scanner
                        .error(SyntaxErrorKind::EscapeInvalid, backslash));
                }
                Ok(u32::from(c))
            }
        }
    }

    /// Read up to `max_digits` more octal digits after `first`, stopping
    /// early once the value could no longer be a byte.
    fn octal(&mut self, first: u32, max_digits: usize) -> u32 {
        let mut value = first;
        for _ in 0..max_digits {
            let digit = match self.scanner.cur().filter(|&c| is_octal(c)) {
                Some(c) => u32::from(c) - u32::from('0'),
                None => break,
            };
            if value * 8 > 0xFF {
                break;
            }
            value = value * 8 + digit;
            self.scanner.bump();
        }
        value
    }

    /// `\xHH` and `\x{H...}`. The `x` has been consumed.
    fn hex_escape(&mut self, backslash: usize) -> Result<u32, Error> {
        if self.scanner.matches("{") {
            return self.hex_brace(backslash);
        }
        let digits = self.scanner.get_up_to(2, is_hex);
        if digits.len() < 2 {
            return Err(self
                .scanner
                .error(SyntaxErrorKind::EscapeIncomplete, backslash));
        }
        let value = self.hex_value(&digits, backslash)?;
        if value > 0x7F {
            self.bailout("unsupported multibyte escape");
        }
        Ok(value)
    }

    /// `\uHHHH` and `\u{H...}`. The `u` has been consumed.
    fn unicode_escape(&mut self, backslash: usize) -> Result<u32, Error> {
        if self.scanner.matches("{") {
            return self.hex_brace(backslash);
        }
        let digits = self.scanner.get_up_to(4, is_hex);
        if digits.len() < 4 {
            return Err(self
                .scanner
                .error(SyntaxErrorKind::EscapeIncomplete, backslash));
        }
        let high = self.hex_value(&digits, backslash)?;
        if !(0xD800..=0xDBFF).contains(&high) {
            return Ok(high);
        }
        // A high surrogate followed by an escaped low surrogate is a single
        // supplementary codepoint.
        let restore = self.scanner.pos();
        if self.scanner.matches("\\u") {
            let digits = self.scanner.get_up_to(4, is_hex);
            let low = match u32::from_str_radix(&digits, 16) {
                Ok(low) if digits.len() == 4 => low,
                _ => 0,
            };
            if (0xDC00..=0xDFFF).contains(&low) {
                let cp = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
                if cp <= self.config.encoding.max_code_point() {
                    return Ok(cp);
                }
            }
        }
        self.scanner.reset(restore);
        Ok(high)
    }

    /// The digits of `\x{...}` or `\u{...}`. The `{` has been consumed.
    fn hex_brace(&mut self, backslash: usize) -> Result<u32, Error> {
        let digits = self.scanner.get_many(is_hex);
        self.scanner.must_match("}")?;
        if digits.is_empty() {
            return Err(self
                .scanner
                .error(SyntaxErrorKind::EscapeInvalid, backslash));
        }
        self.hex_value(&digits, backslash)
    }

    /// Convert hex digits to a codepoint within the encoding.
    fn hex_value(&self, digits: &str, backslash: usize) -> Result<u32, Error> {
        match u32::from_str_radix(digits, 16) {
            Ok(cp) if cp <= self.config.encoding.max_code_point() => Ok(cp),
            _ => Err(self
                .scanner
                .error(SyntaxErrorKind::EscapeInvalid, backslash)),
        }
    }

    /// The letter escapes `\a \e \f \n \r \t`, along with control and meta
    /// escapes, whose operand may itself be any of these escapes, e.g.,
    /// `\M-\cA`. The cursor is at the letter.
    fn control_escape(&mut self, backslash: usize) -> Result<u32, Error> {
        // Operands that are escapes themselves nest to the right, so collect
        // the modifiers and apply them innermost first once the innermost
        // operand is known.
        let mut modifiers = vec![];
        let inner = loop {
            let letter = match self.scanner.consume() {
                Ok(c) => c,
                Err(_) => return Err(self.incomplete(backslash)),
            };
            let modifier = match letter {
                'a' => break 0x07,
                'e' => break 0x1B,
                'f' => break 0x0C,
                'n' => break 0x0A,
                'r' => break 0x0D,
                't' => break 0x09,
                'c' => Modifier::Control,
                'C' | 'M' => {
                    if self.scanner.is_done() {
                        return Err(self.incomplete(backslash));
                    }
                    if !self.scanner.matches("-") {
                        let kind = SyntaxErrorKind::EscapeInvalid;
                        return Err(self.scanner.error(kind, backslash));
                    }
                    if letter == 'C' {
                        Modifier::Control
                    } else {
                        Modifier::Meta
                    }
                }
                c => break u32::from(c),
            };
            let operand = match self.scanner.consume() {
                Ok(c) => c,
                Err(_) => return Err(self.incomplete(backslash)),
            };
            match operand {
                '\\' => modifiers.push(modifier),
                '?' if modifier == Modifier::Control => break 0x7F,
                c => break modifier.apply(u32::from(c)),
            }
        };
        Ok(modifiers.iter().rev().fold(inner, |cp, m| m.apply(cp)))
    }

    fn incomplete(&self, backslash: usize) -> Error {
        self.scanner.error(SyntaxErrorKind::EscapeIncomplete, backslash)
    }
}
