use std::io::{stdout, Write};

use {
    anyhow::Context,
    regex_flavor::{Event, Recorder},
};

use crate::{
    args,
    util::{self, Table},
};

pub fn run(p: &mut lexopt::Parser) -> anyhow::Result<()> {
    const USAGE: &'static str = "\
Prints the sequence of tree builder calls a pattern is translated into, one
call per line and indented by nesting depth.

This is useful for seeing how constructs without a direct counterpart in the
target dialect are expanded, e.g., multi-line anchors and word boundaries.
Set RUST_LOG=trace to also see what the parser does along the way.

USAGE:
    regex-flavor debug <pattern>

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
    anyhow::ensure!(
        pats.len() == 1,
        "only one pattern is allowed, but {} were given",
        pats.len(),
    );
    let mut rec = Recorder::new();
    let (result, time) =
        util::timeit(|| parser.parser().parse(&pats[0], &mut rec));
    let translation = result.context("failed to translate pattern")?;

    let mut table = Table::empty();
    table.add("parse time", time);
    table.add("builder calls", rec.events().len());
    table.add("capture groups", translation.capture_group_count());
    table.add("sticky", translation.is_sticky());
    if common.table() {
        table.print(stdout())?;
    }
    if !common.quiet {
        if common.table() {
            writeln!(stdout(), "")?;
        }
        print_events(rec.events())?;
    }
    Ok(())
}

fn print_events(events: &[Event]) -> anyhow::Result<()> {
    let mut out = stdout().lock();
    let mut depth: usize = 0;
    for event in events {
        if matches!(*event, Event::PopGroup | Event::PopRootGroup) {
            depth = depth.saturating_sub(1);
        }
        writeln!(out, "{}{:?}", "  ".repeat(depth), event)?;
        if matches!(
            *event,
            Event::PushRootGroup
                | Event::PushGroup
                | Event::PushCaptureGroup
                | Event::PushLookAhead { .. }
                | Event::PushLookBehind { .. }
        ) {
            depth += 1;
        }
    }
    Ok(())
}
