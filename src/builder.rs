/*!
The interface between the parser and whatever consumes its output.

The parser never builds a tree itself. Instead, it drives a [`TreeBuilder`]
with a sequence of calls describing the translated pattern in the target
dialect. Two builders are provided: [`Recorder`], which remembers every call
as an [`Event`], and [`Printer`](crate::Printer), which renders the calls as
a pattern string.
*/

use crate::set::CodePointSet;

/// A repetition operator in the target dialect.
///
/// Counted repetitions whose bounds don't fit in a `u32` are saturated: an
/// oversized maximum becomes `None` (unbounded) and an oversized minimum
/// becomes `u32::MAX`. The parser always checks the exact bounds for
/// ordering before saturating them.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Quantifier {
    /// The minimum number of repetitions.
    pub min: u32,
    /// The maximum number of repetitions, or `None` when unbounded.
    pub max: Option<u32>,
    /// Whether the repetition prefers more repetitions over fewer.
    pub greedy: bool,
}

impl Quantifier {
    /// The `*` quantifier.
    pub const fn zero_or_more(greedy: bool) -> Quantifier {
        Quantifier { min: 0, max: None, greedy }
    }

    /// The `+` quantifier.
    pub const fn one_or_more(greedy: bool) -> Quantifier {
        Quantifier { min: 1, max: None, greedy }
    }

    /// The `?` quantifier.
    pub const fn zero_or_one(greedy: bool) -> Quantifier {
        Quantifier { min: 0, max: Some(1), greedy }
    }
}

/// A consumer of parser output.
///
/// The calls a parser makes on a builder obey the following contract:
///
/// * `push_root_group` is the first call and `pop_root_group` the last.
/// * Every `push_group`, `push_capture_group`, `push_look_ahead_assertion`
/// and `push_look_behind_assertion` is matched by exactly one `pop_group`
/// before the enclosing group is popped.
/// * `next_sequence` starts a new alternative in the innermost open group.
/// * All other calls append a term to the current alternative.
///
/// When parsing fails, the calls made so far are still balanced as far as
/// the parser got, but the builder should discard whatever it built.
pub trait TreeBuilder {
    /// Begin the pattern. This is always the first call.
    fn push_root_group(&mut self);

    /// End the pattern. This is always the last call.
    fn pop_root_group(&mut self);

    /// Open a non-capturing group.
    fn push_group(&mut self);

    /// Open the next capturing group. Capturing groups are numbered from 1
    /// in the order they are opened.
    fn push_capture_group(&mut self);

    /// Open a lookahead assertion, which is negative if `negate` is set.
    fn push_look_ahead_assertion(&mut self, negate: bool);

    /// Open a lookbehind assertion, which is negative if `negate` is set.
    fn push_look_behind_assertion(&mut self, negate: bool);

    /// Close the innermost open group.
    fn pop_group(&mut self);

    /// Start a new alternative in the innermost open group.
    fn next_sequence(&mut self);

    /// Append a character class. `single_char` reports whether the class
    /// was written as a single character in the source pattern, before any
    /// case folding was applied.
    fn add_char_class(&mut self, set: &CodePointSet, single_char: bool);

    /// Append an assertion matching at the beginning of the input.
    fn add_caret(&mut self);

    /// Append an assertion matching at the end of the input.
    fn add_dollar(&mut self);

    /// Apply a quantifier to the most recently added term.
    fn add_quantifier(&mut self, quantifier: Quantifier);

    /// Append a backreference to the capturing group with the given number.
    fn add_back_reference(&mut self, group: u32);

    /// Append a term that never matches.
    fn add_dead_node(&mut self);

    /// Wrap the most recently added term in a non-capturing group, so that
    /// it can be quantified.
    fn wrap_cur_term_in_group(&mut self);
}

/// A single call made on a [`TreeBuilder`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Event {
    /// `push_root_group`
    PushRootGroup,
    /// `pop_root_group`
    PopRootGroup,
    /// `push_group`
    PushGroup,
    /// `push_capture_group`
    PushCaptureGroup,
    /// `push_look_ahead_assertion`
    PushLookAhead {
        /// Whether the assertion is negative.
        negate: bool,
    },
    /// `push_look_behind_assertion`
    PushLookBehind {
        /// Whether the assertion is negative.
        negate: bool,
    },
    /// `pop_group`
    PopGroup,
    /// `next_sequence`
    NextSequence,
    /// `add_char_class`
    CharClass {
        /// The codepoints matched by the class.
        set: CodePointSet,
        /// Whether the class was written as a single character.
        single_char: bool,
    },
    /// `add_caret`
    Caret,
    /// `add_dollar`
    Dollar,
    /// `add_quantifier`
    Quantifier(Quantifier),
    /// `add_back_reference`
    BackReference(u32),
    /// `add_dead_node`
    DeadNode,
    /// `wrap_cur_term_in_group`
    WrapCurTermInGroup,
}

/// A tree builder that records every call it receives.
///
/// This is mostly useful for testing and debugging.
#[derive(Clone, Debug, Default)]
pub struct Recorder {
    events: Vec<Event>,
}

impl Recorder {
    /// Create a new recorder with no events.
    pub fn new() -> Recorder {
        Recorder::default()
    }

    /// Return the events recorded so far, in the order they were received.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Consume this recorder and return its events.
    pub fn into_events(self) -> Vec<Event> {
        self.events
    }

    /// Returns true if the recorded events honor the nesting contract of
    /// [`TreeBuilder`]: a root group brackets everything and every other
    /// group is closed exactly once.
    pub fn is_balanced(&self) -> bool {
        let (first, last) = match (self.events.first(), self.events.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return false,
        };
        if *first != Event::PushRootGroup || *last != Event::PopRootGroup {
            return false;
        }
        let inner = &self.events[1..self.events.len() - 1];
        let mut depth: usize = 0;
        for event in inner {
            match *event {
                Event::PushGroup
                | Event::PushCaptureGroup
                | Event::PushLookAhead { .. }
                | Event::PushLookBehind { .. } => depth += 1,
                Event::PopGroup => match depth.checked_sub(1) {
                    Some(d) => depth = d,
                    None => return false,
                },
                Event::PushRootGroup | Event::PopRootGroup => return false,
                _ => {}
            }
        }
        depth == 0
    }
}

impl TreeBuilder for Recorder {
    fn push_root_group(&mut self) {
        self.events.push(Event::PushRootGroup);
    }

    fn pop_root_group(&mut self) {
        self.events.push(Event::PopRootGroup);
    }

    fn push_group(&mut self) {
        self.events.push(Event::PushGroup);
    }

    fn push_capture_group(&mut self) {
        self.events.push(Event::PushCaptureGroup);
    }

    fn push_look_ahead_assertion(&mut self, negate: bool) {
        self.events.push(Event::PushLookAhead { negate });
    }

    fn push_look_behind_assertion(&mut self, negate: bool) {
        self.events.push(Event::PushLookBehind { negate });
    }

    fn pop_group(&mut self) {
        self.events.push(Event::PopGroup);
    }

    fn next_sequence(&mut self) {
        self.events.push(Event::NextSequence);
    }

    fn add_char_class(&mut self, set: &CodePointSet, single_char: bool) {
        self.events.push(Event::CharClass { set: set.clone(), single_char });
    }

    fn add_caret(&mut self) {
        self.events.push(Event::Caret);
    }

    fn add_dollar(&mut self) {
        self.events.push(Event::Dollar);
    }

    fn add_quantifier(&mut self, quantifier: Quantifier) {
        self.events.push(Event::Quantifier(quantifier));
    }

    fn add_back_reference(&mut self, group: u32) {
        self.events.push(Event::BackReference(group));
    }

    fn add_dead_node(&mut self) {
        self.events.push(Event::DeadNode);
    }

    fn wrap_cur_term_in_group(&mut self) {
        self.events.push(Event::WrapCurTermInGroup);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balance() {
        let mut rec = Recorder::new();
        assert!(!rec.is_balanced());
        rec.push_root_group();
        rec.push_group();
        rec.add_caret();
        rec.pop_group();
        rec.pop_root_group();
        assert!(rec.is_balanced());

        let mut rec = Recorder::new();
        rec.push_root_group();
        rec.push_capture_group();
        rec.pop_root_group();
        assert!(!rec.is_balanced());

        let mut rec = Recorder::new();
        rec.push_root_group();
        rec.pop_group();
        rec.pop_root_group();
        assert!(!rec.is_balanced());
    }
}
