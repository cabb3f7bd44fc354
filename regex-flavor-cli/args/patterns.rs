use std::path::PathBuf;

use {
    anyhow::Context,
    bstr::ByteSlice,
    lexopt::{Arg, Parser, ValueExt},
};

use crate::args::{Configurable, Usage};

/// Reads patterns from positional arguments, `-p/--pattern` and
/// `-f/--pattern-file`.
#[derive(Debug, Default)]
pub struct Config {
    patterns: Vec<String>,
    fixed_strings: bool,
}

impl Config {
    /// Returns every pattern given, escaped if requested. This may be empty.
    pub fn get(&self) -> Vec<String> {
        if !self.fixed_strings {
            return self.patterns.clone();
        }
        self.patterns.iter().map(|p| escape(p)).collect()
    }
}

/// Escape every character that has significance in a pattern.
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if regex_flavor::is_syntax_character(c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

impl Configurable for Config {
    fn configure(
        &mut self,
        p: &mut Parser,
        arg: &mut Arg,
    ) -> anyhow::Result<bool> {
        match *arg {
            Arg::Short('p') | Arg::Long("pattern") => {
                let pat = p.value().context("-p/--pattern needs a value")?;
                let pat = pat
                    .string()
                    .context("-p/--pattern must be valid UTF-8")?;
                self.patterns.push(pat);
            }
            Arg::Short('F') | Arg::Long("fixed-strings") => {
                self.fixed_strings = true;
            }
            Arg::Short('f') | Arg::Long("pattern-file") => {
                let path =
                    PathBuf::from(p.value().context("-f/--pattern-file")?);
                let contents = std::fs::read(&path).with_context(|| {
                    format!("failed to read {}", path.display())
                })?;
                for (i, line) in contents.lines().enumerate() {
                    let line = line.to_str().with_context(|| {
                        format!(
                            "{}:{}: pattern is not valid UTF-8",
                            path.display(),
                            i + 1
                        )
                    })?;
                    self.patterns.push(line.to_string());
                }
            }
            Arg::Value(ref mut v) => {
                let v = std::mem::take(v);
                self.patterns
                    .push(v.string().context("patterns must be valid UTF-8")?);
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn usage(&self) -> &[Usage] {
        const USAGES: &'static [Usage] = &[
            Usage::new(
                "-p, --pattern <pattern>",
                "Add a pattern to this command.",
                r#"
Adds a pattern to this command. Patterns may also be given as positional
arguments, but this flag permits patterns that start with a dash.

All patterns given must be valid UTF-8.
"#,
            ),
            Usage::new(
                "-f, --pattern-file",
                "Read patterns from the file given.",
                r#"
Reads patterns, one per line, from the file given. Each line is processed
as a separate pattern.

All patterns given must be valid UTF-8.
"#,
            ),
            Usage::new(
                "-F, --fixed-strings",
                "Interpret all patterns literally.",
                r#"
When set, every character with significance in a pattern is escaped before
the pattern is processed. For example, '+' matches a literal plus sign.
"#,
            ),
        ];
        USAGES
    }
}
