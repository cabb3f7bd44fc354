use std::io::{stdout, Write};

use crate::args;

pub fn run(p: &mut lexopt::Parser) -> anyhow::Result<()> {
    const USAGE: &'static str = "\
Checks that each pattern given is syntactically valid, and prints the syntax
error of each pattern that isn't.

Validation accepts patterns that use constructs with no translation. It fails
if at least one pattern is invalid.

USAGE:
    regex-flavor validate [<pattern> ...]

TIP:
    use -h for short docs and --help for long docs

OPTIONS:
%options%
";

    let mut common = args::common::Config::default();
    let mut patterns = args::patterns::Config::default();
    let mut parser = args::parser::Config::default();
    args::configure(p, USAGE, &mut [&mut common, &mut patterns, &mut parser])?;

    let pats = patterns.get();
    anyhow::ensure!(!pats.is_empty(), "at least one pattern is required");
    let parser = parser.parser();
    let mut invalid = 0;
    for (i, pat) in pats.iter().enumerate() {
        let err = match parser.validate(pat) {
            Ok(()) => continue,
            Err(err) => err,
        };
        invalid += 1;
        if common.quiet {
            continue;
        }
        let prefix = format!("pattern {i}: '");
        writeln!(stdout(), "{prefix}{pat}'")?;
        if let Some(pos) = err.position() {
            // Point at the offending codepoint. Patterns with wide or
            // combining characters will be a bit off.
            let indent = prefix.chars().count() + pos;
            writeln!(stdout(), "{}^", " ".repeat(indent))?;
        }
        writeln!(stdout(), "{}", err)?;
    }
    anyhow::ensure!(
        invalid == 0,
        "{} of {} patterns are invalid",
        invalid,
        pats.len()
    );
    Ok(())
}
