use crate::{
    error::{Error, SyntaxErrorKind},
    set::{
        accumulator::ClassAccumulator,
        tables::{self, POSIX_NAME_MAX_LEN},
        CodePointSet,
    },
};

use super::{token::Token, ParserI};

/// A single member of a bracketed class.
#[derive(Clone, Debug, Eq, PartialEq)]
enum Member {
    /// A single codepoint, which may start or end a range.
    Char(u32),
    /// A predefined class, e.g., `\d` or `[:alpha:]`.
    Set(CodePointSet),
    /// A nested class. Its contents have already been merged into the
    /// enclosing class.
    Nested,
}

/// The outcome of looking for a POSIX class after a `[`.
enum Posix {
    Class(CodePointSet),
    /// A name too long to be a POSIX class. The `[` is a literal.
    Literal,
    /// Not a POSIX class. The cursor hasn't moved.
    NotPosix,
}

impl<'p, 'b> ParserI<'p, 'b> {
    /// Parse a bracketed class. The opening `[` has been consumed.
    pub(super) fn class(&mut self) -> Result<Token, Error> {
        self.nested(|p| {
            let mut acc = p.pool.acquire();
            let result = p.class_body(&mut acc);
            let set = p.config.encoding.trim(&acc.to_set());
            p.pool.release(acc);
            let single_char = result?;
            Ok(Token::CharClass { set, single_char })
        })
    }

    /// Parse the contents of a class into `acc`, through the closing `]`.
    ///
    /// Returns whether the class was written as a single codepoint.
    fn class_body(
        &mut self,
        acc: &mut ClassAccumulator,
    ) -> Result<bool, Error> {
        let begin = self.scanner.pos() - 1;
        self.skip_extended();
        let negated = self.scanner.matches("^");
        self.class_items(acc, begin, true)?;
        let single_char = !negated && acc.matches_single_char();
        if self.flags().case_insensitive() {
            acc.case_fold(self.fold_algorithm());
        }
        if negated {
            acc.invert(self.config.encoding.max_code_point());
        }
        Ok(single_char)
    }

    /// Parse class members into `acc` until the `]` closing the class
    /// opened at `begin`. A `]` is a literal when it is the first member.
    fn class_items(
        &mut self,
        acc: &mut ClassAccumulator,
        begin: usize,
        mut first: bool,
    ) -> Result<(), Error> {
        loop {
            self.skip_extended();
            let start = self.scanner.pos();
            match self.scanner.cur() {
                None => {
                    let kind = SyntaxErrorKind::ClassUnclosed;
                    return Err(self.scanner.error(kind, begin));
                }
                Some(']') if !first => {
                    self.scanner.bump();
                    return Ok(());
                }
                _ => {}
            }
            first = false;
            if self.config.class_intersection && self.scanner.matches("&&") {
                return self.class_intersection(acc, begin, start);
            }
            let lo = match self.class_member(acc)? {
                Member::Nested => continue,
                lo => lo,
            };
            self.skip_extended();
            if !self.scanner.matches("-") {
                add_member(acc, lo);
                continue;
            }
            self.skip_extended();
            // A hyphen at the end of the class, or in front of a nested class
            // or an intersection, is a literal rather than a range operator.
            let literal = match self.scanner.cur() {
                None | Some(']') => true,
                Some('[') => self.config.nested_classes,
                Some('&') => {
                    self.config.class_intersection
                        && self.scanner.peek(1) == Some('&')
                }
                Some(_) => false,
            };
            if literal {
                add_member(acc, lo);
                acc.add_code_point(u32::from('-'));
                continue;
            }
            match (lo, self.class_member(acc)?) {
                (Member::Char(lo), Member::Char(hi)) if lo <= hi => {
                    acc.add_range(lo, hi);
                }
                _ => {
                    let kind = SyntaxErrorKind::ClassRangeInvalid;
                    return Err(self.scanner.error(kind, start));
                }
            }
        }
    }

    /// `&&`: intersect everything parsed so far with the rest of the class.
    fn class_intersection(
        &mut self,
        acc: &mut ClassAccumulator,
        begin: usize,
        op: usize,
    ) -> Result<(), Error> {
        self.token_start = op;
        self.nested(|p| {
            let mut rhs = p.pool.acquire();
            let result = p.class_items(&mut rhs, begin, false);
            if result.is_ok() {
                if p.flags().case_insensitive() {
                    acc.case_fold(p.fold_algorithm());
                    rhs.case_fold(p.fold_algorithm());
                }
                acc.intersect_with(&rhs);
            }
            p.pool.release(rhs);
            result
        })
    }

    /// Parse a single class member. The cursor is at its first character.
    fn class_member(
        &mut self,
        acc: &mut ClassAccumulator,
    ) -> Result<Member, Error> {
        let pos = self.scanner.pos();
        match self.scanner.consume()? {
            '\\' => {
                let c = match self.scanner.cur() {
                    Some(c) => c,
                    None => {
                        let kind = SyntaxErrorKind::EscapeIncomplete;
                        return Err(self.scanner.error(kind, pos));
                    }
                };
                match self.class_escape(c, pos)? {
                    Some(set) => Ok(Member::Set(set)),
                    None => Ok(Member::Char(self.char_escape(pos, true)?)),
                }
            }
            '[' => self.bracket(acc, pos),
            c => Ok(Member::Char(u32::from(c))),
        }
    }

    /// A `[` inside a class, at `open`: a POSIX class, a nested class or a
    /// literal `[`, depending on what follows and on the configuration.
    fn bracket(
        &mut self,
        acc: &mut ClassAccumulator,
        open: usize,
    ) -> Result<Member, Error> {
        if self.config.posix_classes {
            match self.posix_class() {
                Posix::Class(set) => return Ok(Member::Set(set)),
                Posix::Literal => return Ok(Member::Char(u32::from('['))),
                Posix::NotPosix => {}
            }
        }
        if !self.config.nested_classes {
            return Ok(Member::Char(u32::from('[')));
        }
        self.token_start = open;
        self.nested(|p| {
            let mut inner = p.pool.acquire();
            let result = p.class_body(&mut inner);
            if result.is_ok() {
                acc.add_accumulator(&inner);
            }
            p.pool.release(inner);
            result.map(|_| Member::Nested)
        })
    }

    /// `[:name:]` or `[:^name:]`, with the cursor after the `[`.
    fn posix_class(&mut self) -> Posix {
        let restore = self.scanner.pos();
        if !self.scanner.matches(":") {
            return Posix::NotPosix;
        }
        let negated = self.scanner.matches("^");
        let name = self.scanner.get_up_to(POSIX_NAME_MAX_LEN + 1, |c| {
            c != '\\' && c != ':' && c != ']'
        });
        if name.chars().count() > POSIX_NAME_MAX_LEN {
            self.scanner.reset(restore);
            return Posix::Literal;
        }
        let table = if self.scanner.matches(":]") {
            tables::posix_class(&name)
        } else {
            None
        };
        let table = match table {
            Some(table) => table,
            None => {
                self.scanner.reset(restore);
                return Posix::NotPosix;
            }
        };
        let mut set = CodePointSet::from_table(table);
        if negated {
            set = set.invert(self.config.encoding.max_code_point());
        }
        Posix::Class(self.config.encoding.trim(&set))
    }
}

fn add_member(acc: &mut ClassAccumulator, member: Member) {
    match member {
        Member::Char(cp) => acc.add_code_point(cp),
        Member::Set(set) => acc.add_set(&set),
        Member::Nested => {}
    }
}
