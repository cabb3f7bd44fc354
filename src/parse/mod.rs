/*!
This module provides a parser that translates a pattern into calls on a
[`TreeBuilder`].

The parser is a recursive descent parser over the grammar

```text
Pattern     := Disjunction
Disjunction := Alternative ('|' Alternative)*
Alternative := Term*
```

Each term is first read into a [`Token`](token::Token) and then applied,
which either forwards the token to the builder or, for constructs that have
no direct counterpart in the target dialect, expands it into several builder
calls.
*/

use std::collections::BTreeMap;

use crate::{
    builder::TreeBuilder,
    encoding::Encoding,
    error::{Error, SyntaxErrorKind, Unsupported},
    flags::{Flags, FlagsStack},
    set::{
        accumulator::ClassPool, tables, CaseFoldAlgorithm, CodePointSet,
    },
};

use self::{
    group::GroupTracker,
    scanner::Scanner,
    token::{Anchor, TermCategory, Token},
};

mod class;
mod escape;
mod group;
mod quantifier;
mod scanner;
mod token;

/// The configuration shared by every parse performed by a [`Parser`].
#[derive(Clone, Debug)]
struct Config {
    flags: Flags,
    nest_limit: u32,
    ignore_atomic_groups: bool,
    legacy_whitespace: bool,
    encoding: Encoding,
    posix_classes: bool,
    nested_classes: bool,
    class_intersection: bool,
    literal_malformed_braces: bool,
    lookbehind_backreferences: bool,
}

/// A builder for a regular expression parser.
///
/// This builder permits modifying configuration options for the parser.
/// Every option has a default that corresponds to the source flavor, so
/// `ParserBuilder::new().build()` is a parser for that flavor with no global
/// flags.
#[derive(Clone, Debug)]
pub struct ParserBuilder {
    config: Config,
}

impl Default for ParserBuilder {
    fn default() -> ParserBuilder {
        ParserBuilder::new()
    }
}

impl ParserBuilder {
    /// Create a new parser builder with a default configuration.
    pub fn new() -> ParserBuilder {
        ParserBuilder {
            config: Config {
                flags: Flags::empty(),
                nest_limit: 250,
                ignore_atomic_groups: false,
                legacy_whitespace: false,
                encoding: Encoding::default(),
                posix_classes: true,
                nested_classes: true,
                class_intersection: true,
                literal_malformed_braces: true,
                lookbehind_backreferences: true,
            },
        }
    }

    /// Build a parser from this configuration.
    pub fn build(&self) -> Parser {
        Parser { config: self.config.clone() }
    }

    /// Set the global flags of every pattern parsed.
    ///
    /// Flags are usually obtained by parsing their textual form, e.g.,
    /// `"im".parse::<Flags>()`.
    pub fn flags(&mut self, flags: Flags) -> &mut ParserBuilder {
        self.config.flags = flags;
        self
    }

    /// Set the nesting limit for the parser.
    ///
    /// The nesting limit bounds how deeply groups, lookaround assertions,
    /// inline flag scopes and nested classes may be nested. The parser
    /// recurses once per level of nesting, so this limit also bounds the
    /// amount of stack space a parse may use. A pattern that exceeds the
    /// limit is rejected with [`SyntaxErrorKind::NestLimitExceeded`].
    ///
    /// The default limit is `250`.
    pub fn nest_limit(&mut self, limit: u32) -> &mut ParserBuilder {
        self.config.nest_limit = limit;
        self
    }

    /// When enabled, atomic groups `(?>...)` are translated into plain
    /// non-capturing groups instead of being rejected as unsupported.
    ///
    /// This changes the semantics of some patterns, so it is disabled by
    /// default.
    pub fn ignore_atomic_groups(&mut self, yes: bool) -> &mut ParserBuilder {
        self.config.ignore_atomic_groups = yes;
        self
    }

    /// When enabled, `\s` also matches the Mongolian vowel separator
    /// (U+180E), which older versions of Unicode classified as whitespace.
    ///
    /// This is disabled by default.
    pub fn legacy_whitespace(&mut self, yes: bool) -> &mut ParserBuilder {
        self.config.legacy_whitespace = yes;
        self
    }

    /// Set the encoding of the strings translated patterns are matched
    /// against. Every class is limited to the codepoints of this encoding.
    ///
    /// The default is [`Encoding::UTF_32`].
    pub fn encoding(&mut self, encoding: Encoding) -> &mut ParserBuilder {
        self.config.encoding = encoding;
        self
    }

    /// Whether `[:name:]` inside a class denotes a POSIX class.
    ///
    /// This is enabled by default.
    pub fn posix_classes(&mut self, yes: bool) -> &mut ParserBuilder {
        self.config.posix_classes = yes;
        self
    }

    /// Whether `[` inside a class opens a nested class. When disabled, it is
    /// a literal `[`.
    ///
    /// This is enabled by default.
    pub fn nested_classes(&mut self, yes: bool) -> &mut ParserBuilder {
        self.config.nested_classes = yes;
        self
    }

    /// Whether `&&` inside a class intersects the class with the rest of
    /// the class. When disabled, `&&` is two literal `&` characters.
    ///
    /// This is enabled by default.
    pub fn class_intersection(&mut self, yes: bool) -> &mut ParserBuilder {
        self.config.class_intersection = yes;
        self
    }

    /// Whether a malformed counted repetition, e.g., `a{,5}`, is read as
    /// literal text. When disabled, it is a syntax error, as it always is
    /// in Unicode mode.
    ///
    /// This is enabled by default.
    pub fn literal_malformed_braces(
        &mut self,
        yes: bool,
    ) -> &mut ParserBuilder {
        self.config.literal_malformed_braces = yes;
        self
    }

    /// Whether backreferences may appear inside lookbehind assertions. When
    /// disabled, such backreferences are rejected as unsupported, which is
    /// useful for builders whose lookbehinds can't match backwards across
    /// a backreference.
    ///
    /// This is enabled by default.
    pub fn lookbehind_backreferences(
        &mut self,
        yes: bool,
    ) -> &mut ParserBuilder {
        self.config.lookbehind_backreferences = yes;
        self
    }
}

/// A regular expression parser.
///
/// A parser holds nothing but its configuration, so a single parser may be
/// used for any number of patterns. All of the state of a parse lives only
/// as long as a call to [`Parser::parse`] or [`Parser::validate`].
///
/// # Example
///
/// ```
/// use regex_flavor::{ParserBuilder, Printer};
///
/// let parser = ParserBuilder::new().flags("m".parse()?).build();
/// let mut printer = Printer::new();
/// let translation = parser.parse(r"^(a)\1$", &mut printer)?;
/// assert_eq!(1, translation.capture_group_count());
/// assert_eq!(r"(?:^|(?<=\n)(?=[^]))(a)\1(?:$|(?=\n))", printer.pattern());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug)]
pub struct Parser {
    config: Config,
}

impl Default for Parser {
    fn default() -> Parser {
        Parser::new()
    }
}

impl Parser {
    /// Create a new parser with a default configuration.
    ///
    /// To configure the parser, use a [`ParserBuilder`].
    pub fn new() -> Parser {
        ParserBuilder::new().build()
    }

    /// Translate `pattern`, driving `builder` with the result.
    ///
    /// On success, a summary of the translated pattern is returned. On
    /// failure, the builder may have received some calls already and should
    /// throw away whatever it built.
    pub fn parse(
        &self,
        pattern: &str,
        builder: &mut dyn TreeBuilder,
    ) -> Result<Translation, Error> {
        ParserI::new(&self.config, pattern, Some(builder)).parse()
    }

    /// Check that `pattern` is syntactically valid, without translating it.
    ///
    /// This accepts exactly the patterns [`Parser::parse`] accepts, except
    /// that patterns using constructs with no translation are accepted too.
    /// When this returns a syntax error, `parse` returns the same error.
    pub fn validate(&self, pattern: &str) -> Result<(), Error> {
        ParserI::new(&self.config, pattern, None).parse().map(|_| ())
    }
}

/// A summary of a successfully translated pattern.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Translation {
    capture_groups: u32,
    named_groups: BTreeMap<String, Vec<u32>>,
    flags: Flags,
    sticky: bool,
}

impl Translation {
    /// The number of capturing groups in the pattern, not counting the
    /// implicit group around the whole match.
    pub fn capture_group_count(&self) -> u32 {
        self.capture_groups
    }

    /// Return the indices of the groups with the given name. There is more
    /// than one index when the name is used more than once.
    pub fn group_indices(&self, name: &str) -> Option<&[u32]> {
        self.named_groups.get(name).map(|indices| &indices[..])
    }

    /// Return every group name along with the indices of the groups with
    /// that name, ordered by name.
    pub fn named_groups(&self) -> impl Iterator<Item = (&str, &[u32])> {
        self.named_groups.iter().map(|(name, idx)| (name.as_str(), &idx[..]))
    }

    /// The global flags the pattern was parsed with.
    pub fn flags(&self) -> Flags {
        self.flags
    }

    /// Whether matches must begin exactly where the search begins. This is
    /// the case when the sticky flag is set, or when every top-level
    /// alternative starts with `\G`.
    pub fn is_sticky(&self) -> bool {
        self.sticky
    }
}

/// Why an alternative ended.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Stop {
    /// The end of the pattern.
    End,
    /// A `|`, which has been consumed.
    Alternation,
    /// A `)` at the given position, which has been consumed.
    GroupEnd(usize),
}

/// The state of a single parse.
struct ParserI<'p, 'b> {
    config: &'p Config,
    scanner: Scanner,
    /// Where the builder calls go. `None` in validate mode, and after a
    /// construct without a translation has been found.
    builder: Option<&'b mut dyn TreeBuilder>,
    silent: bool,
    /// The first construct found that has no translation.
    unsupported: Option<Unsupported>,
    flags: FlagsStack,
    pool: ClassPool,
    groups: GroupTracker,
    /// The category of the last term emitted in the current alternative.
    last: TermCategory,
    /// The position at which the current token starts.
    token_start: usize,
    /// The current nesting depth, bounded by the nest limit.
    depth: u32,
    /// The number of lookbehind assertions enclosing the cursor.
    lookbehind_depth: u32,
    /// For each top-level alternative, whether it starts with `\G`.
    search_anchors: Vec<bool>,
    search_anchored: bool,
}

impl<'p, 'b> ParserI<'p, 'b> {
    fn new(
        config: &'p Config,
        pattern: &str,
        builder: Option<&'b mut dyn TreeBuilder>,
    ) -> ParserI<'p, 'b> {
        ParserI {
            config,
            scanner: Scanner::new(pattern),
            silent: builder.is_none(),
            builder,
            unsupported: None,
            flags: FlagsStack::new(config.flags),
            pool: ClassPool::default(),
            groups: GroupTracker::default(),
            last: TermCategory::None,
            token_start: 0,
            depth: 0,
            lookbehind_depth: 0,
            search_anchors: vec![],
            search_anchored: false,
        }
    }

    fn parse(mut self) -> Result<Translation, Error> {
        debug!(
            "parsing pattern of length {} with flags '{}' ({})",
            self.scanner.len(),
            self.config.flags,
            if self.silent { "validate" } else { "translate" },
        );
        self.emit(|b| b.push_root_group());
        let global = self.flags.global();
        let result = self.with_flags(global, |p| p.disjunction());
        self.emit(|b| b.pop_root_group());
        if let Stop::GroupEnd(pos) = result? {
            let kind = SyntaxErrorKind::GroupUnopened;
            return Err(self.scanner.error(kind, pos));
        }
        debug_assert_eq!(0, self.pool.outstanding());
        debug_assert_eq!(0, self.lookbehind_depth);
        let sticky = self.sticky();
        if let Some(unsupported) = self.unsupported.take() {
            return Err(unsupported.into());
        }
        debug!(
            "translated pattern with {} capture groups",
            self.groups.capture_count()
        );
        Ok(Translation {
            capture_groups: self.groups.capture_count(),
            named_groups: self.groups.into_names(),
            flags: global,
            sticky,
        })
    }

    /// Parse alternatives up to the end of the pattern or the `)` closing
    /// the enclosing group.
    fn disjunction(&mut self) -> Result<Stop, Error> {
        loop {
            self.last = TermCategory::None;
            self.search_anchored = false;
            let stop = self.alternative()?;
            if self.depth == 0 {
                self.search_anchors.push(self.search_anchored);
            }
            match stop {
                Stop::Alternation => self.emit(|b| b.next_sequence()),
                stop => return Ok(stop),
            }
        }
    }

    fn alternative(&mut self) -> Result<Stop, Error> {
        loop {
            self.skip_extended();
            self.token_start = self.scanner.pos();
            if self.scanner.is_done() {
                return Ok(Stop::End);
            }
            if self.scanner.matches("|") {
                return Ok(Stop::Alternation);
            }
            let token = match self.term()? {
                Some(token) => token,
                None => continue,
            };
            match token {
                Token::GroupEnd => return Ok(Stop::GroupEnd(self.token_start)),
                Token::InlineFlags(flags) => {
                    return self.open_ended_flags(flags)
                }
                token => self.apply(token)?,
            }
        }
    }

    /// Read the term starting at the cursor. `None` is returned for terms
    /// that were fully handled while being read.
    fn term(&mut self) -> Result<Option<Token>, Error> {
        let c = self.scanner.consume()?;
        let token = match c {
            '\\' => return self.escape(),
            '[' => self.class()?,
            '*' | '+' | '?' | '{' => self.quantifier(c)?,
            '.' => Token::CharClass { set: self.dot(), single_char: false },
            '(' => self.group_start()?,
            ')' => Token::GroupEnd,
            '^' => Token::Caret,
            '$' => Token::Dollar,
            c => self.literal(u32::from(c)),
        };
        Ok(Some(token))
    }

    fn apply(&mut self, token: Token) -> Result<(), Error> {
        match token {
            Token::CharClass { set, single_char } => {
                self.emit(|b| b.add_char_class(&set, single_char));
                self.last = TermCategory::Atom;
            }
            Token::Quantifier(q) => self.apply_quantifier(q)?,
            Token::Anchor(anchor) => self.anchor(anchor),
            Token::GroupBegin(kind) => self.group(kind)?,
            Token::LookaroundBegin { direction, negate } => {
                self.lookaround(direction, negate)?
            }
            Token::BackReference(indices) => {
                if self.in_lookbehind()
                    && !self.config.lookbehind_backreferences
                {
                    self.bailout(
                        "backreferences inside lookbehind assertions are \
                         not supported",
                    );
                }
                match indices[..] {
                    [] => self.emit(|b| b.add_dead_node()),
                    [index] => self.emit(|b| b.add_back_reference(index)),
                    _ => self.bailout(
                        "backreferences to ambiguous group names are \
                         not supported",
                    ),
                }
                self.last = TermCategory::Atom;
            }
            Token::Caret => self.caret(),
            Token::Dollar => self.dollar(),
            Token::GroupEnd | Token::InlineFlags(_) => {
                unreachable!("handled by alternative")
            }
        }
        Ok(())
    }

    /// `^`. In multi-line mode this also matches after a newline, as long
    /// as the input doesn't end there.
    fn caret(&mut self) {
        if self.flags().multi_line() {
            let newline = CodePointSet::from_table(tables::NEWLINE);
            let any = self.config.encoding.full_set();
            self.emit(|b| {
                b.push_group();
                b.add_caret();
                b.next_sequence();
                b.push_look_behind_assertion(false);
                b.add_char_class(&newline, true);
                b.pop_group();
                b.push_look_ahead_assertion(false);
                b.add_char_class(&any, false);
                b.pop_group();
                b.pop_group();
            });
        } else {
            self.emit(|b| b.add_caret());
        }
        self.last = TermCategory::OtherAssertion;
    }

    /// `$`. In multi-line mode this also matches before a newline.
    fn dollar(&mut self) {
        if self.flags().multi_line() {
            let newline = CodePointSet::from_table(tables::NEWLINE);
            self.emit(|b| {
                b.push_group();
                b.add_dollar();
                b.next_sequence();
                b.push_look_ahead_assertion(false);
                b.add_char_class(&newline, true);
                b.pop_group();
                b.pop_group();
            });
        } else {
            self.emit(|b| b.add_dollar());
        }
        self.last = TermCategory::OtherAssertion;
    }

    fn anchor(&mut self, anchor: Anchor) {
        match anchor {
            Anchor::StartText => self.emit(|b| b.add_caret()),
            Anchor::EndText => self.emit(|b| b.add_dollar()),
            Anchor::EndTextOptionalNewline => {
                let line_end = CodePointSet::from_table(tables::CR_LF);
                self.emit(|b| {
                    b.push_group();
                    b.add_dollar();
                    b.next_sequence();
                    b.push_look_ahead_assertion(false);
                    b.add_char_class(&line_end, false);
                    b.add_dollar();
                    b.pop_group();
                    b.pop_group();
                });
            }
            Anchor::WordBoundary | Anchor::NotWordBoundary => {
                let word = self.word_set();
                let negate = anchor == Anchor::NotWordBoundary;
                // \b is (?:(?<=\w)(?!\w)|(?<!\w)(?=\w)) and \B is
                // (?:(?<=\w)(?=\w)|(?<!\w)(?!\w)).
                self.emit(|b| {
                    b.push_group();
                    for behind_negated in [false, true] {
                        if behind_negated {
                            b.next_sequence();
                        }
                        b.push_look_behind_assertion(behind_negated);
                        b.add_char_class(&word, false);
                        b.pop_group();
                        b.push_look_ahead_assertion(behind_negated == negate);
                        b.add_char_class(&word, false);
                        b.pop_group();
                    }
                    b.pop_group();
                });
            }
            Anchor::StartSearch => {
                if self.depth == 0 && self.last == TermCategory::None {
                    self.search_anchored = true;
                    return;
                }
                self.bailout(
                    "\\G anchor is only supported at the beginning of \
                     top-level alternatives",
                );
            }
        }
        self.last = TermCategory::OtherAssertion;
    }

    /// Decide whether the pattern is sticky once every top-level
    /// alternative has been seen.
    fn sticky(&mut self) -> bool {
        let anchored = self.search_anchors.iter().filter(|&&a| a).count();
        if anchored == 0 {
            return self.flags.global().sticky();
        }
        if anchored < self.search_anchors.len() {
            self.bailout(
                "\\G anchor is only supported at the beginning of \
                 top-level alternatives",
            );
            return false;
        }
        true
    }

    /// `.`
    fn dot(&self) -> CodePointSet {
        let flags = self.flags();
        let full = self.config.encoding.full_set();
        if flags.dot_all() {
            return full;
        }
        let terminators = if flags.unix_lines() {
            tables::NEWLINE
        } else {
            tables::LINE_TERMINATORS
        };
        full.difference(&CodePointSet::from_table(terminators))
    }

    /// A literal codepoint, expanded to all of its case variants when
    /// matching case insensitively.
    fn literal(&mut self, cp: u32) -> Token {
        if !self.flags().case_insensitive() {
            let set = self.config.encoding.trim(&CodePointSet::single(cp));
            return Token::CharClass { set, single_char: true };
        }
        let mut acc = self.pool.acquire();
        acc.add_code_point(cp);
        acc.case_fold(self.fold_algorithm());
        let set = self.config.encoding.trim(&acc.to_set());
        self.pool.release(acc);
        Token::CharClass { set, single_char: true }
    }

    /// Skip whitespace and comments in extended mode.
    fn skip_extended(&mut self) {
        if !self.flags().extended() {
            return;
        }
        while let Some(c) = self.scanner.cur() {
            if is_whitespace(c) {
                self.scanner.bump();
            } else if c == '#' {
                while let Some(c) = self.scanner.cur() {
                    self.scanner.bump();
                    if c == '\n' {
                        break;
                    }
                }
            } else {
                break;
            }
        }
    }

    /// `(?flags)`: the flags hold until the enclosing group closes, and the
    /// rest of the current alternative is wrapped in a group since the
    /// target dialect has no open ended flag syntax.
    fn open_ended_flags(&mut self, flags: Flags) -> Result<Stop, Error> {
        trace!("open ended flags '{}' at {}", flags, self.token_start);
        self.flags.set_current(flags);
        self.nested(|p| {
            p.emit(|b| b.push_group());
            p.last = TermCategory::None;
            let result = p.alternative();
            p.emit(|b| b.pop_group());
            p.last = TermCategory::Atom;
            result
        })
    }

    /// Run `f` one level of nesting deeper.
    fn nested<T, F>(&mut self, f: F) -> Result<T, Error>
    where
        F: FnOnce(&mut ParserI<'p, 'b>) -> Result<T, Error>,
    {
        if self.depth >= self.config.nest_limit {
            let limit = self.config.nest_limit;
            return Err(self.scanner.error(
                SyntaxErrorKind::NestLimitExceeded(limit),
                self.token_start,
            ));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// Run `f` with `flags` in effect, restoring the previous flags
    /// afterwards.
    fn with_flags<T, F>(&mut self, flags: Flags, f: F) -> Result<T, Error>
    where
        F: FnOnce(&mut ParserI<'p, 'b>) -> Result<T, Error>,
    {
        self.flags.push(flags);
        let result = f(self);
        self.flags.pop();
        result
    }

    /// The flags currently in effect.
    fn flags(&self) -> Flags {
        self.flags.current()
    }

    fn in_lookbehind(&self) -> bool {
        self.lookbehind_depth > 0
    }

    fn fold_algorithm(&self) -> CaseFoldAlgorithm {
        if self.flags().unicode() {
            CaseFoldAlgorithm::Unicode
        } else {
            CaseFoldAlgorithm::Ascii
        }
    }

    /// The set of word characters used by `\w` and word boundaries.
    fn word_set(&self) -> CodePointSet {
        let flags = self.flags();
        let table = if flags.unicode() && flags.case_insensitive() {
            tables::WORD_UNICODE_IGNORE_CASE
        } else {
            tables::WORD
        };
        self.config.encoding.trim(&CodePointSet::from_table(table))
    }

    /// Forward a call to the builder, unless there is none.
    fn emit<F>(&mut self, f: F)
    where
        F: FnOnce(&mut dyn TreeBuilder),
    {
        if let Some(ref mut builder) = self.builder {
            f(&mut **builder);
        }
    }

    /// Record a construct with no translation.
    ///
    /// Parsing carries on without a builder, so that syntax errors later in
    /// the pattern are still reported exactly as in validate mode. The first
    /// construct recorded is reported once the whole pattern is parsed.
    fn bailout(&mut self, reason: &str) {
        if self.silent || self.unsupported.is_some() {
            return;
        }
        debug!("bailout at {}: {}", self.token_start, reason);
        self.unsupported = Some(Unsupported::new(reason));
        self.builder = None;
    }
}

/// Whitespace skipped in extended mode.
fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
}

fn is_hex(c: char) -> bool {
    c.is_ascii_hexdigit()
}

fn is_octal(c: char) -> bool {
    ('0'..='7').contains(&c)
}

#[cfg(test)]
mod tests {
    use crate::{
        builder::{Event, Quantifier, Recorder},
        error::SyntaxErrorKind,
        set::{CodePointRange, CodePointSet},
        Error, Flags, ParserBuilder, Printer,
    };

    use super::*;

    fn parser(flags: &str) -> Parser {
        ParserBuilder::new().flags(flags.parse().unwrap()).build()
    }

    fn events(pattern: &str, flags: &str) -> Vec<Event> {
        let mut rec = Recorder::new();
        parser(flags).parse(pattern, &mut rec).unwrap();
        assert!(rec.is_balanced());
        let events = rec.into_events();
        events[1..events.len() - 1].to_vec()
    }

    fn print(pattern: &str, flags: &str) -> String {
        let mut printer = Printer::new();
        parser(flags).parse(pattern, &mut printer).unwrap();
        printer.into_pattern()
    }

    fn syntax(pattern: &str, flags: &str) -> (SyntaxErrorKind, usize) {
        let p = parser(flags);
        let err = p.parse(pattern, &mut Recorder::new()).unwrap_err();
        let err = match err {
            Error::Syntax(err) => err,
            err => panic!("expected syntax error for {:?}: {}", pattern, err),
        };
        // Validate mode must report the very same error.
        assert_eq!(Err(Error::Syntax(err.clone())), p.validate(pattern));
        (err.kind().clone(), err.position())
    }

    fn unsupported(pattern: &str, flags: &str) {
        let p = parser(flags);
        let err = p.parse(pattern, &mut Recorder::new()).unwrap_err();
        assert!(err.is_unsupported(), "{:?}: {}", pattern, err);
        assert_eq!(Ok(()), p.validate(pattern));
    }

    fn class(c: char) -> Event {
        Event::CharClass {
            set: CodePointSet::single(u32::from(c)),
            single_char: true,
        }
    }

    #[test]
    fn counted_repetition() {
        assert_eq!(
            vec![
                class('a'),
                Event::Quantifier(Quantifier {
                    min: 2,
                    max: Some(5),
                    greedy: true
                }),
            ],
            events("a{2,5}", "")
        );
        assert_eq!(
            vec![
                class('a'),
                Event::Quantifier(Quantifier {
                    min: 2,
                    max: Some(5),
                    greedy: false
                }),
            ],
            events("a{2,5}?", "")
        );
    }

    #[test]
    fn class_intersection() {
        let consonants = [
            (0x62, 0x64),
            (0x66, 0x68),
            (0x6A, 0x6E),
            (0x70, 0x74),
            (0x76, 0x7A),
        ];
        let expected = CodePointSet::new(
            consonants.iter().map(|&(s, e)| CodePointRange::new(s, e)),
        );
        assert_eq!(
            vec![Event::CharClass { set: expected, single_char: false }],
            events("[a-z&&[^aeiou]]", "")
        );
    }

    #[test]
    fn quantifier_on_quantifier() {
        assert_eq!(
            (SyntaxErrorKind::RepetitionRepeated, 2),
            syntax("a**", "")
        );
        assert_eq!((SyntaxErrorKind::RepetitionMissing, 0), syntax("*a", ""));
        assert_eq!((SyntaxErrorKind::RepetitionMissing, 2), syntax("a|?", ""));
        assert_eq!((SyntaxErrorKind::RepetitionMissing, 1), syntax("(+)", ""));
    }

    #[test]
    fn ambiguous_group_name() {
        let translation = parser("")
            .parse("(?<n>a)(?<n>b)", &mut Recorder::new())
            .unwrap();
        assert_eq!(2, translation.capture_group_count());
        assert_eq!(Some(&[1, 2][..]), translation.group_indices("n"));
        unsupported(r"(?<n>a)(?<n>b)\k<n>", "");
    }

    #[test]
    fn multi_line_anchors() {
        assert_eq!(r"(?:^|(?<=\n)(?=[^]))a(?:$|(?=\n))", print("^a$", "m"));
        assert_eq!("^a$", print("^a$", ""));
        assert_eq!(r"^(?:(?:$|(?=\n)))", print("^(?m)$", ""));
        assert_eq!(Event::PushGroup, events("^a$", "m")[0]);
    }

    #[test]
    fn group_numbering() {
        let translation = parser("")
            .parse("(?:(a)(?=(b))(?<x>c))((d))", &mut Recorder::new())
            .unwrap();
        assert_eq!(5, translation.capture_group_count());
        assert_eq!(Some(&[3][..]), translation.group_indices("x"));
    }

    #[test]
    fn groups() {
        assert_eq!("(?:a)(b)(?=c)(?!d)(?<=e)(?<!f)", print(
            "(?:a)(b)(?=c)(?!d)(?<=e)(?<!f)",
            "",
        ));
        assert_eq!("(?:[Aa]|[Bb])", print("(?i:a|b)", ""));
        assert_eq!((SyntaxErrorKind::GroupUnclosed, 2), syntax("(ab", ""));
        assert_eq!((SyntaxErrorKind::GroupUnopened, 2), syntax("ab)", ""));
        assert_eq!((SyntaxErrorKind::GroupUnclosed, 0), syntax("(", ""));
        assert_eq!(
            (SyntaxErrorKind::GroupExtensionUnknown('#'), 2),
            syntax("(?#a)", "")
        );
    }

    #[test]
    fn inline_flags() {
        assert_eq!("a(?:[Bb]|[Cc])", print("a(?i:b|c)", ""));
        assert_eq!("a(?:[Bb])|[Cc]", print("a(?i)b|c", ""));
        assert_eq!("((?:[Aa])|[Bb])c", print("((?i)a|b)c", ""));
        assert_eq!("[Aa](?:b)", print("a(?-i)b", "i"));
        assert_eq!(
            (SyntaxErrorKind::FlagTypeNegated('u'), 4),
            syntax("(?i-u)", "")
        );
        assert_eq!(
            (SyntaxErrorKind::FlagUnrecognized('q'), 3),
            syntax("(?iq)", "")
        );
        assert_eq!(
            (SyntaxErrorKind::FlagUnrecognized('y'), 3),
            syntax("(?iy)", "")
        );
        assert_eq!(
            (SyntaxErrorKind::FlagMissingDelimiter, 3),
            syntax("(?i!)", "")
        );
        assert_eq!((SyntaxErrorKind::FlagUnexpectedEof, 2), syntax("(?i", ""));
    }

    #[test]
    fn flag_scopes_are_restored() {
        // The flags of a group end with it, even when set open ended.
        assert_eq!("(?:(?:[Aa]))a", print("(?:(?i)a)a", ""));
        assert_eq!("(?:[Aa])a", print("(?i:a)a", ""));
    }

    #[test]
    fn dot() {
        assert_eq!(r"[^\n\r\u{85}\u{2028}-\u{2029}]", print(".", ""));
        assert_eq!(r"[^\n]", print(".", "d"));
        assert_eq!("[^]", print(".", "s"));
    }

    #[test]
    fn assertions() {
        assert_eq!(r"(?:$|(?=[\n\r]$))", print(r"\Z", ""));
        assert_eq!("^$", print(r"\A\z", ""));
        let w = "[0-9A-Z_a-z]";
        assert_eq!(
            format!("(?:(?<={w})(?!{w})|(?<!{w})(?={w}))", w = w),
            print(r"\b", "")
        );
        assert_eq!(
            format!("(?:(?<={w})(?={w})|(?<!{w})(?!{w}))", w = w),
            print(r"\B", "")
        );
        assert_eq!("(?:^)*", print("^*", ""));
    }

    #[test]
    fn search_anchor() {
        let mut rec = Recorder::new();
        let t = parser("").parse(r"\Ga|\Gb", &mut rec).unwrap();
        assert!(t.is_sticky());
        let t = parser("y").parse("a", &mut Recorder::new()).unwrap();
        assert!(t.is_sticky());
        let t = parser("").parse("a", &mut Recorder::new()).unwrap();
        assert!(!t.is_sticky());
        unsupported(r"\Ga|b", "");
        unsupported(r"a\G", "");
        unsupported(r"(\Ga)", "");
    }

    #[test]
    fn lookaround_quantifiers() {
        assert_eq!(
            (SyntaxErrorKind::RepetitionLookbehind, 6),
            syntax("(?<=a)*", "")
        );
        assert_eq!(
            (SyntaxErrorKind::RepetitionLookahead, 5),
            syntax("(?=a)*", "u")
        );
        assert_eq!("(?=a)*", print("(?=a)*", ""));
    }

    #[test]
    fn backreferences() {
        assert_eq!(r"(a)\1", print(r"(a)\1", ""));
        // Extra digits are only taken while they name an existing group.
        assert_eq!(r"(a)\1(?:)1", print(r"(a)\11", ""));
        assert_eq!("[]", print(r"\1", ""));
        assert_eq!(r"(a)\1", print(r"(?<x>a)\k<x>", ""));
        assert_eq!(
            (SyntaxErrorKind::GroupNameUnknown("y".to_string()), 0),
            syntax(r"\k<y>", "")
        );
        assert_eq!((SyntaxErrorKind::Expected("<"), 2), syntax(r"\kx", ""));
    }

    #[test]
    fn atomic_groups() {
        unsupported("(?>a)", "");
        let p = ParserBuilder::new().ignore_atomic_groups(true).build();
        let mut printer = Printer::new();
        p.parse("(?>a)", &mut printer).unwrap();
        assert_eq!("(?:a)", printer.pattern());
    }

    #[test]
    fn extended_mode() {
        assert_eq!("ab*", print("a b # comment\n *", "x"));
        assert_eq!("a b", print("a b", ""));
        assert_eq!(" ", print("[ ]", ""));
    }

    #[test]
    fn extended_mode_classes() {
        assert_eq!("(?:a)", print("(?x)[ a ]", ""));
        assert_eq!("[a-c]", print("[ a - c # comment\n]", "x"));
        assert_eq!("[^a]", print("[ ^ a ]", "x"));
        assert_eq!(r"[\-a]", print("[a - ]", "x"));
        assert_eq!(" ", print(r"[\ ]", "x"));
        assert_eq!((SyntaxErrorKind::ClassUnclosed, 0), syntax("[ ]", "x"));
    }

    #[test]
    fn case_insensitive_properties() {
        assert_eq!("[A-Za-z]", print(r"\p{Lower}", "i"));
        assert_eq!("[A-Za-z]", print(r"\p{Upper}", "i"));
        for flags in ["i", "iu"] {
            for name in ["Lower", "Upper", "Lu", "Ll"] {
                for p in ["p", "P"] {
                    let bare = format!(r"\{}{{{}}}", p, name);
                    let bracketed = format!("[{}]", bare);
                    assert_eq!(
                        print(&bracketed, flags),
                        print(&bare, flags),
                        "{} with flags {:?}",
                        bare,
                        flags,
                    );
                }
            }
        }
        assert_eq!("[A-Z]", print(r"\p{Upper}", ""));
    }

    #[test]
    fn surrogate_pairs() {
        assert_eq!(r"\u{1F600}", print(r"\uD83D\uDE00", ""));
        assert_eq!(r"\u{1F600}", print(r"[\uD83D\uDE00]", ""));
        assert_eq!(r"\u{D83D}a", print(r"\uD83Da", ""));
        assert_eq!(r"\u{D83D}A", print(r"\uD83D\u0041", ""));
        assert_eq!(r"\u{DE00}\u{D83D}", print(r"\uDE00\uD83D", ""));
    }

    #[test]
    fn lookbehind_backreferences() {
        assert_eq!(r"(a)(?<=\1)", print(r"(a)(?<=\1)", ""));
        let p = ParserBuilder::new().lookbehind_backreferences(false).build();
        let err = p.parse(r"(a)(?<=b\1)", &mut Recorder::new()).unwrap_err();
        assert!(err.is_unsupported());
        assert_eq!(Ok(()), p.validate(r"(a)(?<=b\1)"));
        let mut printer = Printer::new();
        p.parse(r"(a)(?<=b)\1(?=\1)", &mut printer).unwrap();
        assert_eq!(r"(a)(?<=b)\1(?=\1)", printer.pattern());
    }

    #[test]
    fn quoting() {
        assert_eq!(r"a\*b+c", print(r"\Qa*b\E+c", ""));
        assert_eq!(r"\.\*", print(r"\Q.*", ""));
    }

    #[test]
    fn case_insensitive_literals() {
        assert_eq!("[Kk]", print("k", "i"));
        assert_eq!(r"[Kk\u{212A}]", print("k", "iu"));
        assert_eq!("1", print("1", "i"));
        let events = events("a", "i");
        assert_eq!(
            vec![Event::CharClass {
                set: CodePointSet::single(0x41)
                    .union(&CodePointSet::single(0x61)),
                single_char: true,
            }],
            events
        );
    }

    #[test]
    fn nest_limit() {
        let p = ParserBuilder::new().nest_limit(3).build();
        assert_eq!(Ok(()), p.validate("(((a)))"));
        let err = p.validate("((((a))))").unwrap_err();
        assert_eq!(Some(3), err.position());
        match err {
            Error::Syntax(err) => assert_eq!(
                &SyntaxErrorKind::NestLimitExceeded(3),
                err.kind()
            ),
            err => panic!("unexpected error: {}", err),
        }
        assert!(p.validate("(?i)(?m)(?s)(?x)").is_err());
        assert!(p.validate("[[[[a]]]]").is_err());
    }

    #[test]
    fn pool_is_drained() {
        let config = ParserBuilder::new().config;
        let mut rec = Recorder::new();
        let builder: &mut dyn TreeBuilder = &mut rec;
        let mut p = ParserI::new(&config, "[a[b&&[c]]]", Some(builder));
        p.emit(|b| b.push_root_group());
        let stop = p.disjunction().unwrap();
        assert_eq!(Stop::End, stop);
        assert_eq!(0, p.pool.outstanding());

        let mut p = ParserI::new(&config, "[a[b&&[c", None);
        assert!(p.disjunction().is_err());
        assert_eq!(0, p.pool.outstanding());
    }

    #[test]
    fn global_flags_are_reported() {
        let flags: Flags = "im".parse().unwrap();
        let t = ParserBuilder::new()
            .flags(flags)
            .build()
            .parse("(?-i)a", &mut Recorder::new())
            .unwrap();
        assert_eq!(flags, t.flags());
    }
}
