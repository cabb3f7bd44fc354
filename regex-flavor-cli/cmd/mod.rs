mod debug;
mod translate;
mod validate;

const USAGE: &'static str = "\
A tool for translating regular expressions from the source flavor into the
target dialect on the command line.

USAGE:
    regex-flavor <command> ...

COMMANDS:
    debug      Print the builder calls a pattern is translated into.
    translate  Print the translation of each pattern.
    validate   Check that each pattern is syntactically valid.
";

pub fn run(p: &mut lexopt::Parser) -> anyhow::Result<()> {
    let cmd = crate::args::next_as_command(USAGE, p)?;
    match &*cmd {
        "debug" => debug::run(p),
        "translate" => translate::run(p),
        "validate" => validate::run(p),
        unk => anyhow::bail!("unrecognized command '{unk}'"),
    }
}
