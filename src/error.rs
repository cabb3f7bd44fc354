use std::fmt;

/// An error that occurred while parsing a pattern.
///
/// There are exactly two kinds of errors. A [`SyntaxError`] means the pattern
/// violates the grammar of the source flavor. An [`Unsupported`] error means
/// the pattern is valid, but uses a construct that has no equivalent in the
/// target dialect. Callers typically report the former to the user and react
/// to the latter by falling back to some other regex engine.
///
/// Unsupported errors are never reported by
/// [`Parser::validate`](crate::Parser::validate). Syntax errors are reported
/// identically in both validation and translation.
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// The pattern is not syntactically valid.
    Syntax(SyntaxError),
    /// The pattern is valid but cannot be translated.
    Unsupported(Unsupported),
}

impl Error {
    /// Returns true if and only if this is a syntax error.
    pub fn is_syntax(&self) -> bool {
        matches!(*self, Error::Syntax(_))
    }

    /// Returns true if and only if this error reports an untranslatable
    /// construct.
    pub fn is_unsupported(&self) -> bool {
        matches!(*self, Error::Unsupported(_))
    }

    /// Return the codepoint offset at which a syntax error occurred.
    ///
    /// This returns `None` for unsupported constructs.
    pub fn position(&self) -> Option<usize> {
        match *self {
            Error::Syntax(ref err) => Some(err.position()),
            Error::Unsupported(_) => None,
        }
    }
}

impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Error::Syntax(ref x) => x.fmt(f),
            Error::Unsupported(ref x) => x.fmt(f),
        }
    }
}

impl From<SyntaxError> for Error {
    fn from(err: SyntaxError) -> Error {
        Error::Syntax(err)
    }
}

impl From<Unsupported> for Error {
    fn from(err: Unsupported) -> Error {
        Error::Unsupported(err)
    }
}

/// A syntax error, consisting of a message code and the position at which it
/// was detected.
///
/// Positions are codepoint offsets into the pattern. An error that is only
/// detected because the pattern ended prematurely points at the last
/// codepoint of the pattern.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SyntaxError {
    kind: SyntaxErrorKind,
    pos: usize,
}

impl SyntaxError {
    pub(crate) fn new(kind: SyntaxErrorKind, pos: usize) -> SyntaxError {
        SyntaxError { kind, pos }
    }

    /// Return the type of this error.
    pub fn kind(&self) -> &SyntaxErrorKind {
        &self.kind
    }

    /// Return the codepoint offset of this error.
    pub fn position(&self) -> usize {
        self.pos
    }
}

impl std::error::Error for SyntaxError {}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "regex parse error at position {}: {}", self.pos, self.kind)
    }
}

/// The type of a syntax error that occurred.
///
/// Each kind is reported from as few places in the parser as possible, so
/// that a kind (together with its position) pinpoints the rule that was
/// violated.
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum SyntaxErrorKind {
    /// The pattern ended where more input was required.
    UnexpectedEof,
    /// A specific token was required but not found.
    Expected(&'static str),
    /// A bracketed character class was never closed.
    ClassUnclosed,
    /// A character class range whose end is smaller than its start, or whose
    /// operands are not single codepoints.
    ClassRangeInvalid,
    /// An escape sequence ended before it was complete, e.g., `\u12`.
    EscapeIncomplete,
    /// An escape sequence that is not permitted in the current mode, or that
    /// denotes a codepoint outside of the encoding.
    EscapeInvalid,
    /// A quantifier with nothing before it to repeat.
    RepetitionMissing,
    /// A quantifier applied directly to another quantifier.
    RepetitionRepeated,
    /// A quantifier applied to a lookahead assertion in Unicode mode.
    RepetitionLookahead,
    /// A quantifier applied to a lookbehind assertion.
    RepetitionLookbehind,
    /// A counted repetition whose minimum exceeds its maximum.
    RepetitionCountInvalid,
    /// A malformed counted repetition in Unicode mode.
    RepetitionCountUnclosed,
    /// An opening parenthesis without a matching closing parenthesis.
    GroupUnclosed,
    /// A closing parenthesis without a matching opening parenthesis.
    GroupUnopened,
    /// An unrecognized character following `(?`.
    GroupExtensionUnknown(char),
    /// A group name that was never terminated by `>`.
    GroupNameUnexpectedEof,
    /// An empty group name, e.g., `(?<>a)`.
    GroupNameEmpty,
    /// A group name containing characters that are not allowed.
    GroupNameInvalid,
    /// A backreference to a group name that does not exist.
    GroupNameUnknown(String),
    /// An unrecognized flag.
    FlagUnrecognized(char),
    /// An attempt to turn off a flag that cannot be turned off once set.
    FlagTypeNegated(char),
    /// The same flag given more than once in the global flags.
    FlagDuplicate(char),
    /// An inline flag group contained something other than a flag, `-`, `:`
    /// or `)`.
    FlagMissingDelimiter,
    /// The pattern ended in the middle of an inline flag group.
    FlagUnexpectedEof,
    /// The pattern exceeds the configured nesting limit.
    NestLimitExceeded(u32),
}

impl std::error::Error for SyntaxErrorKind {}

impl fmt::Display for SyntaxErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use self::SyntaxErrorKind::*;
        match *self {
            UnexpectedEof => write!(f, "unexpected end of pattern"),
            Expected(what) => write!(f, "expected '{}'", what),
            ClassUnclosed => write!(f, "unterminated character set"),
            ClassRangeInvalid => write!(f, "bad character range"),
            EscapeIncomplete => write!(f, "incomplete escape sequence"),
            EscapeInvalid => write!(f, "invalid escape sequence"),
            RepetitionMissing => write!(f, "quantifier without target"),
            RepetitionRepeated => write!(f, "quantifier on quantifier"),
            RepetitionLookahead => {
                write!(f, "quantifier on lookahead assertion")
            }
            RepetitionLookbehind => {
                write!(f, "quantifier on lookbehind assertion")
            }
            RepetitionCountInvalid => write!(f, "quantifier out of order"),
            RepetitionCountUnclosed => write!(f, "incomplete quantifier"),
            GroupUnclosed => write!(f, "unterminated subpattern"),
            GroupUnopened => write!(f, "unmatched ')'"),
            GroupExtensionUnknown(c) => {
                write!(f, "unknown extension ?{}", c)
            }
            GroupNameUnexpectedEof => write!(f, "unterminated group name"),
            GroupNameEmpty => write!(f, "missing group name"),
            GroupNameInvalid => write!(f, "invalid group name"),
            GroupNameUnknown(ref name) => {
                write!(f, "unknown group name '{}'", name)
            }
            FlagUnrecognized(c) => write!(f, "undefined group option '{}'", c),
            FlagTypeNegated(c) => {
                write!(f, "flag '{}' cannot be turned off", c)
            }
            FlagDuplicate(c) => write!(f, "duplicate flag '{}'", c),
            FlagMissingDelimiter => {
                write!(f, "missing dash, colon or closing parenthesis")
            }
            FlagUnexpectedEof => write!(
                f,
                "missing flag, dash, colon or closing parenthesis"
            ),
            NestLimitExceeded(limit) => write!(
                f,
                "exceed the maximum number of nested groups ({})",
                limit
            ),
        }
    }
}

/// An error reporting a syntactically valid construct that has no
/// translation into the target dialect.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Unsupported {
    reason: String,
}

impl Unsupported {
    pub(crate) fn new<S: Into<String>>(reason: S) -> Unsupported {
        Unsupported { reason: reason.into() }
    }

    /// A human readable description of the construct that was rejected.
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl std::error::Error for Unsupported {}

impl fmt::Display for Unsupported {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported regex feature: {}", self.reason)
    }
}
