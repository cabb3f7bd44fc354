use std::collections::BTreeMap;

use crate::{
    builder::TreeBuilder,
    error::{Error, SyntaxErrorKind},
    flags::Flags,
};

use super::{
    token::{GroupKind, LookDirection, TermCategory, Token},
    ParserI, Stop,
};

/// An open capturing group.
#[derive(Clone, Copy, Debug)]
struct Group {
    number: u32,
}

/// Keeps track of capturing groups: their numbering, the groups that are
/// currently open and the names given to them.
#[derive(Clone, Debug, Default)]
pub(super) struct GroupTracker {
    count: u32,
    open: Vec<Group>,
    names: BTreeMap<String, Vec<u32>>,
}

impl GroupTracker {
    /// Open the next capturing group and return its number. Groups are
    /// numbered from 1 in the order they are opened.
    pub(super) fn open(&mut self, name: Option<String>) -> u32 {
        self.count += 1;
        let number = self.count;
        self.open.push(Group { number });
        if let Some(name) = name {
            self.names.entry(name).or_default().push(number);
        }
        number
    }

    /// Close the innermost open capturing group, returning its number.
    pub(super) fn close(&mut self) -> Option<u32> {
        self.open.pop().map(|group| group.number)
    }

    /// The number of capturing groups opened so far.
    pub(super) fn capture_count(&self) -> u32 {
        self.count
    }

    /// Return the numbers of the groups with the given name. A name used by
    /// more than one group is ambiguous.
    pub(super) fn lookup(&self, name: &str) -> Option<&[u32]> {
        self.names.get(name).map(|numbers| &numbers[..])
    }

    pub(super) fn into_names(self) -> BTreeMap<String, Vec<u32>> {
        self.names
    }
}

impl<'p, 'b> ParserI<'p, 'b> {
    /// Read the construct opened by `(`, which has been consumed.
    pub(super) fn group_start(&mut self) -> Result<Token, Error> {
        if !self.scanner.matches("?") {
            return Ok(Token::GroupBegin(GroupKind::Capturing(None)));
        }
        let ext_pos = self.scanner.pos();
        let c = self.scanner.consume()?;
        let token = match c {
            ':' => Token::GroupBegin(GroupKind::NonCapturing),
            '=' | '!' => Token::LookaroundBegin {
                direction: LookDirection::Ahead,
                negate: c == '!',
            },
            '<' if self.scanner.matches("=") => Token::LookaroundBegin {
                direction: LookDirection::Behind,
                negate: false,
            },
            '<' if self.scanner.matches("!") => Token::LookaroundBegin {
                direction: LookDirection::Behind,
                negate: true,
            },
            '<' => {
                let name = self.group_name()?;
                Token::GroupBegin(GroupKind::Capturing(Some(name)))
            }
            '>' => {
                if !self.config.ignore_atomic_groups {
                    self.bailout("atomic groups are not supported");
                }
                Token::GroupBegin(GroupKind::NonCapturing)
            }
            '-' | 'i' | 'm' | 's' | 'x' | 'd' | 'u' => {
                self.scanner.retreat();
                self.inline_flags()?
            }
            c => {
                return Err(self.scanner.error(
                    SyntaxErrorKind::GroupExtensionUnknown(c),
                    ext_pos,
                ))
            }
        };
        Ok(token)
    }

    /// Parse a group name terminated by `>`. The cursor is at the first
    /// character of the name.
    pub(super) fn group_name(&mut self) -> Result<String, Error> {
        let start = self.scanner.pos();
        let name = self.scanner.get_many(|c| c != '>');
        if !self.scanner.matches(">") {
            return Err(self.scanner.error(
                SyntaxErrorKind::GroupNameUnexpectedEof,
                self.scanner.eof_pos(),
            ));
        }
        if name.is_empty() {
            return Err(
                self.scanner.error(SyntaxErrorKind::GroupNameEmpty, start)
            );
        }
        let mut chars = name.chars();
        let valid = chars.next().map_or(false, |c| c.is_ascii_alphabetic())
            && chars.all(|c| c.is_ascii_alphanumeric());
        if !valid {
            return Err(
                self.scanner.error(SyntaxErrorKind::GroupNameInvalid, start)
            );
        }
        Ok(name)
    }

    /// Parse the flags of `(?flags)` or `(?flags:`. The cursor is at the
    /// first flag character.
    fn inline_flags(&mut self) -> Result<Token, Error> {
        let mut flags = self.flags();
        let mut negate = false;
        loop {
            let pos = self.scanner.pos();
            let c = match self.scanner.cur() {
                Some(c) => c,
                None => {
                    return Err(self.scanner.error(
                        SyntaxErrorKind::FlagUnexpectedEof,
                        self.scanner.eof_pos(),
                    ))
                }
            };
            self.scanner.bump();
            let flag = match c {
                ')' => return Ok(Token::InlineFlags(flags)),
                ':' => return Ok(Token::GroupBegin(GroupKind::Flags(flags))),
                '-' => {
                    negate = true;
                    continue;
                }
                c => Flags::from_char(c).filter(|f| f.is_inline()),
            };
            let kind = match flag {
                Some(flag) if !negate => {
                    flags = flags.add(flag);
                    continue;
                }
                Some(flag) if !flag.has_type_flag() => {
                    flags = flags.remove(flag);
                    continue;
                }
                Some(_) => SyntaxErrorKind::FlagTypeNegated(c),
                None if c.is_alphabetic() => {
                    SyntaxErrorKind::FlagUnrecognized(c)
                }
                None => SyntaxErrorKind::FlagMissingDelimiter,
            };
            return Err(self.scanner.error(kind, pos));
        }
    }

    /// Parse the body of a group through its closing parenthesis.
    pub(super) fn group(&mut self, kind: GroupKind) -> Result<(), Error> {
        let flags = match kind {
            GroupKind::Flags(flags) => flags,
            _ => self.flags(),
        };
        match kind {
            GroupKind::Capturing(name) => {
                self.groups.open(name);
                trace!(
                    "open group {} at {}",
                    self.groups.capture_count(),
                    self.token_start
                );
                let result =
                    self.group_body(flags, |b| b.push_capture_group());
                self.groups.close();
                result?;
            }
            GroupKind::NonCapturing | GroupKind::Flags(_) => {
                self.group_body(flags, |b| b.push_group())?;
            }
        }
        self.last = TermCategory::Atom;
        Ok(())
    }

    /// Parse the body of a lookaround assertion through its closing
    /// parenthesis.
    pub(super) fn lookaround(
        &mut self,
        direction: LookDirection,
        negate: bool,
    ) -> Result<(), Error> {
        let flags = self.flags();
        match direction {
            LookDirection::Ahead => self
                .group_body(flags, |b| b.push_look_ahead_assertion(negate))?,
            LookDirection::Behind => {
                self.lookbehind_depth += 1;
                let result = self.group_body(flags, |b| {
                    b.push_look_behind_assertion(negate)
                });
                self.lookbehind_depth -= 1;
                result?;
            }
        }
        self.last = TermCategory::LookAroundAssertion(direction);
        Ok(())
    }

    /// Parse alternatives up to and including the `)` that closes the group
    /// opened by `open`, with `flags` in effect.
    fn group_body<F>(&mut self, flags: Flags, open: F) -> Result<(), Error>
    where
        F: FnOnce(&mut dyn TreeBuilder),
    {
        self.nested(|p| {
            p.emit(open);
            let result = p.with_flags(flags, |p| p.disjunction());
            p.emit(|b| b.pop_group());
            trace!("close group at {}", p.scanner.pos());
            match result? {
                Stop::GroupEnd(_) => Ok(()),
                Stop::End | Stop::Alternation => Err(p.scanner.error(
                    SyntaxErrorKind::GroupUnclosed,
                    p.scanner.eof_pos(),
                )),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbering_and_names() {
        let mut groups = GroupTracker::default();
        assert_eq!(1, groups.open(Some("a".to_string())));
        assert_eq!(2, groups.open(None));
        assert_eq!(Some(2), groups.close());
        assert_eq!(3, groups.open(Some("a".to_string())));
        assert_eq!(Some(3), groups.close());
        assert_eq!(Some(1), groups.close());
        assert_eq!(None, groups.close());
        assert_eq!(3, groups.capture_count());
        assert_eq!(Some(&[1, 3][..]), groups.lookup("a"));
        assert_eq!(None, groups.lookup("b"));
    }
}
