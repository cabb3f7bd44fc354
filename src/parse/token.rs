use crate::{builder::Quantifier, flags::Flags, set::CodePointSet};

/// The direction of a lookaround assertion.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum LookDirection {
    Ahead,
    Behind,
}

/// An assertion written as an escape.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Anchor {
    /// `\A`
    StartText,
    /// `\z`
    EndText,
    /// `\Z`
    EndTextOptionalNewline,
    /// `\b`
    WordBoundary,
    /// `\B`
    NotWordBoundary,
    /// `\G`
    StartSearch,
}

/// The kind of group an opening parenthesis starts.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum GroupKind {
    NonCapturing,
    /// A capturing group, along with its name if it has one.
    Capturing(Option<String>),
    /// `(?flags:...)`: a non-capturing group with its own flags.
    Flags(Flags),
}

/// A single syntactic element read by the term dispatcher.
///
/// Tokens are consumed immediately after being read, so none of them ever
/// outlives the term it was read from.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum Token {
    CharClass { set: CodePointSet, single_char: bool },
    Quantifier(Quantifier),
    Anchor(Anchor),
    GroupBegin(GroupKind),
    /// A closing parenthesis. Its position is the one before the cursor.
    GroupEnd,
    LookaroundBegin { direction: LookDirection, negate: bool },
    /// `(?flags)`: changes the flags for the rest of the alternative.
    InlineFlags(Flags),
    /// A backreference to one of the given groups. An empty list means the
    /// group does not exist.
    BackReference(Vec<u32>),
    Caret,
    Dollar,
}

/// What the most recently emitted term was, as far as quantifiers are
/// concerned.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum TermCategory {
    /// Nothing has been emitted in the current alternative.
    None,
    Atom,
    Quantifier,
    /// Caret, dollar and the assertions written as escapes.
    OtherAssertion,
    LookAroundAssertion(LookDirection),
}
