use lexopt::{Arg, Parser};

use crate::args::{Configurable, Usage};

/// Flags that every command accepts and that control how much it prints.
#[derive(Debug, Default)]
pub struct Config {
    pub quiet: bool,
    pub no_table: bool,
}

impl Config {
    pub fn table(&self) -> bool {
        !self.no_table
    }
}

impl Configurable for Config {
    fn configure(
        &mut self,
        _: &mut Parser,
        arg: &mut Arg,
    ) -> anyhow::Result<bool> {
        match *arg {
            Arg::Short('q') | Arg::Long("quiet") => {
                self.quiet = true;
            }
            Arg::Long("no-table") => {
                self.no_table = true;
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn usage(&self) -> &[Usage] {
        const USAGES: &'static [Usage] = &[
            Usage::new(
                "-q, --quiet",
                "Suppress some output.",
                r#"
Suppresses the main output of a command. For 'translate' this is the
translated pattern and for 'debug' it is the list of builder calls. The table
of properties is still printed unless --no-table is given, so this is useful
for timing a parse on its own.
"#,
            ),
            Usage::new(
                "--no-table",
                "Omit the table of properties from the output.",
                r#"
Most commands print a table of properties about the pattern they processed,
e.g., the time it took to parse and the number of capturing groups. Passing
this flag suppresses that table.
"#,
            ),
        ];
        USAGES
    }
}
