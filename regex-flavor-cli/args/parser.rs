use {
    anyhow::Context,
    lexopt::{Arg, Parser, ValueExt},
    regex_flavor::{Encoding, Flags, ParserBuilder},
};

use crate::args::{self, Configurable, Usage};

/// Exposes every configuration knob of a `regex_flavor::ParserBuilder` via
/// CLI flags.
#[derive(Debug, Default)]
pub struct Config {
    builder: ParserBuilder,
}

impl Config {
    /// Build a parser from this configuration.
    pub fn parser(&self) -> regex_flavor::Parser {
        self.builder.build()
    }
}

impl Configurable for Config {
    fn configure(
        &mut self,
        p: &mut Parser,
        arg: &mut Arg,
    ) -> anyhow::Result<bool> {
        match *arg {
            Arg::Short('y') | Arg::Long("flags") => {
                let flags: Flags = args::parse(p, "-y/--flags")?;
                self.builder.flags(flags);
            }
            Arg::Long("nest-limit") => {
                let limit = args::parse(p, "--nest-limit")?;
                self.builder.nest_limit(limit);
            }
            Arg::Long("encoding") => {
                let name = p
                    .value()
                    .context("--encoding needs a value")?
                    .string()
                    .context("--encoding must be valid UTF-8")?;
                let encoding = Encoding::from_name(&name)
                    .with_context(|| format!("unknown encoding '{}'", name))?;
                self.builder.encoding(encoding);
            }
            Arg::Long("ignore-atomic-groups") => {
                self.builder.ignore_atomic_groups(true);
            }
            Arg::Long("legacy-whitespace") => {
                self.builder.legacy_whitespace(true);
            }
            Arg::Long("no-posix-classes") => {
                self.builder.posix_classes(false);
            }
            Arg::Long("no-nested-classes") => {
                self.builder.nested_classes(false);
            }
            Arg::Long("no-class-intersection") => {
                self.builder.class_intersection(false);
            }
            Arg::Long("strict-braces") => {
                self.builder.literal_malformed_braces(false);
            }
            Arg::Long("no-lookbehind-backreferences") => {
                self.builder.lookbehind_backreferences(false);
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn usage(&self) -> &[Usage] {
        const USAGES: &'static [Usage] = &[
            Usage::new(
                "-y, --flags <flags>",
                "Set the global flags, e.g., 'im'.",
                r#"
Sets the global flags every pattern is parsed with. Each flag is a single
character:

i: case insensitive, m: multi-line, s: dot matches all, x: extended (ignore
whitespace and comments), d: unix lines, u: unicode, y: sticky.

Each flag may be given at most once.
"#,
            ),
            Usage::new(
                "--nest-limit <limit>",
                "Set the nesting limit of the parser.",
                r#"
Sets how deeply groups, lookaround assertions, inline flag scopes and classes
may be nested. Patterns that nest more deeply are rejected. The default is
250.
"#,
            ),
            Usage::new(
                "--encoding <name>",
                "One of: UTF-32, UTF-16, LATIN-1, ASCII.",
                r#"
Sets the encoding of the strings translated patterns are matched against.
Every class is limited to the codepoints of this encoding, and escapes
denoting codepoints outside of it are rejected. The default is UTF-32.
"#,
            ),
            Usage::new(
                "--ignore-atomic-groups",
                "Translate atomic groups into plain groups.",
                r#"
By default, atomic groups have no translation. When this is set, they are
translated into non-capturing groups instead, which may change what the
pattern matches.
"#,
            ),
            Usage::new(
                "--legacy-whitespace",
                r"Include U+180E in \s.",
                r#"
Makes \s match the Mongolian vowel separator (U+180E), which older versions
of Unicode classified as whitespace.
"#,
            ),
            Usage::new(
                "--no-posix-classes",
                "Disable [:name:] inside classes.",
                r#"
Disables POSIX classes inside bracketed classes. '[[:alpha:]]' then contains
a nested class of the characters ':', 'a', 'l', 'p' and 'h'.
"#,
            ),
            Usage::new(
                "--no-nested-classes",
                "Treat '[' inside a class as a literal.",
                r#"
Disables nested classes, so that '[' inside a bracketed class is a literal.
"#,
            ),
            Usage::new(
                "--no-class-intersection",
                "Treat '&&' inside a class as literals.",
                r#"
Disables class intersection, so that '&&' inside a bracketed class is two
literal ampersands.
"#,
            ),
            Usage::new(
                "--strict-braces",
                "Reject malformed counted repetitions.",
                r#"
By default, a '{' that doesn't start a well formed counted repetition, as in
'a{,5}', is a literal. When this is set, it is a syntax error instead, as it
always is in unicode mode.
"#,
            ),
            Usage::new(
                "--no-lookbehind-backreferences",
                "Reject backreferences inside lookbehinds.",
                r#"
Reports backreferences inside lookbehind assertions as unsupported, for
engines that can't match a backreference backwards.
"#,
            ),
        ];
        USAGES
    }
}
