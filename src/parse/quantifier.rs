use num_bigint::BigUint;
use num_traits::ToPrimitive;

use crate::{
    builder::Quantifier,
    error::{Error, SyntaxErrorKind},
};

use super::{
    token::{LookDirection, TermCategory, Token},
    ParserI,
};

impl<'p, 'b> ParserI<'p, 'b> {
    /// Read the quantifier starting with `c`, which has been consumed.
    ///
    /// A malformed counted repetition, e.g., `{,5}`, is either an error or
    /// a literal `{`, depending on the mode.
    pub(super) fn quantifier(&mut self, c: char) -> Result<Token, Error> {
        let (min, max) = match c {
            '*' => (0, None),
            '+' => (1, None),
            '?' => (0, Some(1)),
            _ => {
                let reset = self.scanner.pos();
                match self.counted_repetition()? {
                    Some(bounds) => bounds,
                    None => return self.malformed_braces(reset),
                }
            }
        };
        let greedy = !self.scanner.matches("?");
        if greedy && self.scanner.matches("+") {
            self.bailout("possessive quantifiers are not supported");
        }
        Ok(Token::Quantifier(Quantifier { min, max, greedy }))
    }

    /// The bounds of `{n}`, `{n,}` or `{n,m}`, after the `{`. `None` is
    /// returned when the braces don't hold one of these forms.
    ///
    /// Bounds are compared exactly, no matter how large. Only then are they
    /// saturated to fit in a `u32`.
    fn counted_repetition(
        &mut self,
    ) -> Result<Option<(u32, Option<u32>)>, Error> {
        let min = match self.decimal() {
            Some(min) => min,
            None => return Ok(None),
        };
        let max = if self.scanner.matches("}") {
            Some(min.clone())
        } else if self.scanner.matches(",}") {
            None
        } else {
            if !self.scanner.matches(",") {
                return Ok(None);
            }
            let max = match self.decimal() {
                Some(max) => max,
                None => return Ok(None),
            };
            if !self.scanner.matches("}") {
                return Ok(None);
            }
            if min > max {
                return Err(self.scanner.error(
                    SyntaxErrorKind::RepetitionCountInvalid,
                    self.token_start,
                ));
            }
            Some(max)
        };
        let min = min.to_u32().unwrap_or(u32::MAX);
        Ok(Some((min, max.and_then(|max| max.to_u32()))))
    }

    /// A run of decimal digits of any length.
    fn decimal(&mut self) -> Option<BigUint> {
        let digits = self.scanner.get_many(|c| c.is_ascii_digit());
        BigUint::parse_bytes(digits.as_bytes(), 10)
    }

    fn malformed_braces(&mut self, reset: usize) -> Result<Token, Error> {
        if self.flags().unicode() || !self.config.literal_malformed_braces {
            return Err(self.scanner.error(
                SyntaxErrorKind::RepetitionCountUnclosed,
                self.token_start,
            ));
        }
        self.scanner.reset(reset);
        Ok(self.literal(u32::from('{')))
    }

    /// Apply a quantifier to the previous term, if it may be quantified.
    pub(super) fn apply_quantifier(
        &mut self,
        quantifier: Quantifier,
    ) -> Result<(), Error> {
        let unicode = self.flags().unicode();
        let kind = match self.last {
            TermCategory::None => Some(SyntaxErrorKind::RepetitionMissing),
            TermCategory::Quantifier => {
                Some(SyntaxErrorKind::RepetitionRepeated)
            }
            TermCategory::LookAroundAssertion(LookDirection::Ahead)
                if unicode =>
            {
                Some(SyntaxErrorKind::RepetitionLookahead)
            }
            TermCategory::LookAroundAssertion(LookDirection::Behind) => {
                Some(SyntaxErrorKind::RepetitionLookbehind)
            }
            _ => None,
        };
        if let Some(kind) = kind {
            return Err(self.scanner.error(kind, self.token_start));
        }
        if self.last == TermCategory::OtherAssertion {
            self.emit(|b| b.wrap_cur_term_in_group());
        }
        self.emit(|b| b.add_quantifier(quantifier));
        self.last = TermCategory::Quantifier;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        builder::{Event, Quantifier, Recorder},
        error::{Error, SyntaxErrorKind},
        ParserBuilder, Printer,
    };

    fn quantifiers(pattern: &str, flags: &str) -> Vec<Quantifier> {
        let mut rec = Recorder::new();
        ParserBuilder::new()
            .flags(flags.parse().unwrap())
            .build()
            .parse(pattern, &mut rec)
            .unwrap();
        rec.into_events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Quantifier(q) => Some(q),
                _ => None,
            })
            .collect()
    }

    fn print(pattern: &str, flags: &str) -> String {
        let mut printer = Printer::new();
        ParserBuilder::new()
            .flags(flags.parse().unwrap())
            .build()
            .parse(pattern, &mut printer)
            .unwrap();
        printer.into_pattern()
    }

    fn error(pattern: &str, flags: &str) -> (SyntaxErrorKind, usize) {
        let p = ParserBuilder::new().flags(flags.parse().unwrap()).build();
        match p.validate(pattern) {
            Err(Error::Syntax(err)) => (err.kind().clone(), err.position()),
            result => panic!("expected syntax error, got {:?}", result),
        }
    }

    #[test]
    fn simple_forms() {
        assert_eq!(
            vec![
                Quantifier::zero_or_more(true),
                Quantifier::one_or_more(false),
                Quantifier::zero_or_one(true),
            ],
            quantifiers("a*b+?c?", "")
        );
    }

    #[test]
    fn counted_forms() {
        let q = |min, max| Quantifier { min, max, greedy: true };
        assert_eq!(vec![q(3, Some(3))], quantifiers("a{3}", ""));
        assert_eq!(vec![q(3, None)], quantifiers("a{3,}", ""));
        assert_eq!(vec![q(0, Some(0))], quantifiers("a{0,0}", ""));
        assert_eq!("a{2,}?", print("a{2,}?", ""));
    }

    #[test]
    fn oversized_bounds_saturate() {
        let q = |min, max| Quantifier { min, max, greedy: true };
        assert_eq!(
            vec![q(1, None)],
            quantifiers("a{1,99999999999999999999}", "")
        );
        assert_eq!(
            vec![q(u32::MAX, None)],
            quantifiers("a{99999999999999999999}", "")
        );
        assert_eq!(
            vec![q(u32::MAX, None)],
            quantifiers("a{4294967296,4294967297}", "")
        );
    }

    #[test]
    fn bounds_are_compared_exactly() {
        assert_eq!(
            (SyntaxErrorKind::RepetitionCountInvalid, 1),
            error("a{99999999999999999999,9999999999999999999}", "")
        );
        assert_eq!(
            (SyntaxErrorKind::RepetitionCountInvalid, 1),
            error("a{5,4}", "")
        );
    }

    #[test]
    fn malformed_braces() {
        assert_eq!(r"a\{,5\}", print("a{,5}", ""));
        assert_eq!(r"a\{1", print("a{1", ""));
        assert_eq!(r"\{", print("{", ""));
        assert_eq!(r"a\{x\}", print("a{x}", ""));
        assert_eq!(
            (SyntaxErrorKind::RepetitionCountUnclosed, 1),
            error("a{,5}", "u")
        );
        assert_eq!(
            (SyntaxErrorKind::RepetitionCountUnclosed, 1),
            error("a{1,2", "u")
        );
        let p = ParserBuilder::new().literal_malformed_braces(false).build();
        assert!(p.validate("a{,5}").is_err());
    }

    #[test]
    fn possessive() {
        let p = ParserBuilder::new().build();
        let err = p.parse("a*+", &mut Recorder::new()).unwrap_err();
        assert!(err.is_unsupported());
        assert_eq!(Ok(()), p.validate("a*+"));
        assert_eq!(
            (SyntaxErrorKind::RepetitionRepeated, 3),
            error("a*?+", "")
        );
    }

    #[test]
    fn assertions_are_wrapped() {
        let mut rec = Recorder::new();
        ParserBuilder::new().build().parse("$+", &mut rec).unwrap();
        assert_eq!(
            &[
                Event::Dollar,
                Event::WrapCurTermInGroup,
                Event::Quantifier(Quantifier::one_or_more(true)),
            ][..],
            &rec.events()[1..4]
        );
    }
}
