/*!
This crate provides a parser that translates regular expressions written in a
source flavor into a canonical target dialect.

The source flavor is Java-like: it has nested classes and class
intersections, POSIX classes, possessive and counted quantifiers with bounds
of any size, open ended inline flags, `\Q...\E` quoting and a variety of
control and meta escapes. The target dialect is ECMAScript-like and has none
of these. Translating a pattern therefore rewrites many constructs into
equivalent ones, e.g., `^` in multi-line mode becomes an alternation with a
lookbehind, and every class is computed in full.

The parser doesn't build a syntax tree itself. Instead, it drives a
[`TreeBuilder`] with a sequence of calls describing the translated pattern,
which leaves the choice of tree representation to the caller. This crate
provides two builders: [`Recorder`], which records every call, and
[`Printer`], which prints the translated pattern.

# Example: translating a pattern

The simplest way to translate a pattern is with [`translate`]:

```
let translated = regex_flavor::translate(r"a{2,}?|[\w&&[^\d]]", "")?;
assert_eq!("a{2,}?|[A-Z_a-z]", translated);
# Ok::<(), regex_flavor::Error>(())
```

# Example: syntax errors and unsupported constructs

Every error is either a syntax error, which carries the codepoint offset at
which it was detected, or an unsupported construct, which is valid in the
source flavor but has no translation.

```
use regex_flavor::{Error, SyntaxErrorKind};

let err = regex_flavor::translate("a**", "").unwrap_err();
assert_eq!(Some(2), err.position());
match err {
    Error::Syntax(ref err) => {
        assert_eq!(&SyntaxErrorKind::RepetitionRepeated, err.kind());
    }
    _ => unreachable!(),
}

// Atomic groups have no translation, but the pattern is valid.
assert!(regex_flavor::translate("(?>a)", "").unwrap_err().is_unsupported());
assert!(regex_flavor::validate("(?>a)", "").is_ok());
# Ok::<(), regex_flavor::Error>(())
```

# Configuration

A [`ParserBuilder`] sets the global flags, the nesting limit, the encoding
of the strings translated patterns are matched against and a handful of
flavor options. A [`Parser`] holds only its configuration and may be used to
parse any number of patterns.

# Crate features

* **logging** - Adds a dependency on the `log` crate and emits debug and
trace messages while parsing. This is useful for debugging the parser, but
should usually be disabled.
*/

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![warn(missing_debug_implementations)]

#[macro_use]
mod macros;

mod builder;
mod encoding;
mod error;
mod flags;
mod parse;
mod print;
mod set;

pub use crate::{
    builder::{Event, Quantifier, Recorder, TreeBuilder},
    encoding::Encoding,
    error::{Error, SyntaxError, SyntaxErrorKind, Unsupported},
    flags::{Flags, FlagsStack},
    parse::{Parser, ParserBuilder, Translation},
    print::Printer,
    set::{CaseFoldAlgorithm, CodePointRange, CodePointSet},
};

/// Translate `pattern` with the given global flags into the target dialect,
/// using a default parser configuration.
///
/// To configure the parser, or to drive a builder of your own, use a
/// [`ParserBuilder`].
pub fn translate(pattern: &str, flags: &str) -> Result<String, Error> {
    let parser = ParserBuilder::new().flags(flags.parse()?).build();
    let mut printer = Printer::new();
    parser.parse(pattern, &mut printer)?;
    Ok(printer.into_pattern())
}

/// Check that `pattern` is syntactically valid with the given global flags,
/// using a default parser configuration.
///
/// Patterns that are valid but use constructs without a translation are
/// accepted.
pub fn validate(pattern: &str, flags: &str) -> Result<(), Error> {
    ParserBuilder::new().flags(flags.parse()?).build().validate(pattern)
}

/// Returns true if the given character has significance in the target
/// dialect, and must therefore be escaped to be matched literally.
///
/// These are `$ ( ) * + . ? [ \ ] ^ { | }`. Escaping any of them in a source
/// pattern is permitted in every mode.
pub fn is_syntax_character(c: char) -> bool {
    matches!(
        c,
        '$' | '(' | ')' | '*' | '+' | '.' | '?' | '[' | '\\' | ']' | '^'
            | '{' | '|' | '}'
    )
}
