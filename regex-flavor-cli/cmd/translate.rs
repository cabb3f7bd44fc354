use std::io::{stdout, Write};

use {
    anyhow::Context,
    regex_flavor::{Printer, Translation},
};

use crate::{
    args,
    util::{self, Table},
};

pub fn run(p: &mut lexopt::Parser) -> anyhow::Result<()> {
    const USAGE: &'static str = "\
Translates each pattern given into the target dialect and prints the result,
one translation per line.

Patterns that are valid but use constructs with no translation are reported
as errors, as are patterns with syntax errors.

USAGE:
    regex-flavor translate [<pattern> ...]

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
    let mut printer = Printer::new();
    for (i, pat) in pats.iter().enumerate() {
        let (result, time) = util::timeit(|| parser.parse(pat, &mut printer));
        let translation = result.with_context(|| {
            format!("failed to translate pattern {i}: '{pat}'")
        })?;
        if common.table() {
            table(&translation, time).print(stdout())?;
        }
        if !common.quiet {
            writeln!(stdout(), "{}", printer.pattern())?;
        }
    }
    Ok(())
}

fn table(t: &Translation, time: std::time::Duration) -> Table {
    let mut table = Table::empty();
    table.add("parse time", time);
    table.add("flags", t.flags().to_string());
    table.add("capture groups", t.capture_group_count());
    table.add("sticky", t.is_sticky());
    for (name, indices) in t.named_groups() {
        table.add(&format!("group '{}'", name), indices.to_vec());
    }
    table
}
