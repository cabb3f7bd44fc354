use {
    quickcheck::{Arbitrary, Gen, QuickCheck, Testable},
    regex_flavor::{Error, ParserBuilder, Printer, Recorder},
};

fn qc<T: Testable>(t: T) {
    QuickCheck::new().tests(10_000).max_tests(20_000).quickcheck(t);
}

/// A pattern made mostly of fragments with meaning in the source flavor,
/// so that random patterns exercise more than the literal path.
#[derive(Clone, Debug)]
struct Pattern(String);

const FRAGMENTS: &[&str] = &[
    "a", "b", "K", "1", "-", "&", ":", " ", "#", "\n", "é", "(", ")", "(?:",
    "(?=", "(?!", "(?<=", "(?<!", "(?>", "(?<n>", "(?i)", "(?-i)", "(?x:",
    "(?u)", "[", "[^", "]", "&&", "[:alpha:]", "[:^digit:]", "|", "*", "+",
    "?", "{", "}", "{2}", "{1,}", "{2,1}", ",", "^", "$", ".", r"\",
    r"\1", r"\k<n>", r"\b", r"\B", r"\A", r"\G", r"\Z", r"\z", r"\d", r"\W",
    r"\s", r"\p{Lu}", r"\P{Alpha}", r"\Q", r"\E", r"\x41", r"\x{1F600}",
    r"é", r"\0101", r"\cA", r"\M-\C-a", r"\R",
];

impl Arbitrary for Pattern {
    fn arbitrary(g: &mut Gen) -> Pattern {
        let len = usize::arbitrary(g) % (g.size() + 1);
        let mut pattern = String::new();
        for _ in 0..len {
            if bool::arbitrary(g) {
                pattern.push(char::arbitrary(g));
            } else if let Some(fragment) = g.choose(FRAGMENTS) {
                pattern.push_str(fragment);
            }
        }
        Pattern(pattern)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Pattern>> {
        Box::new(self.0.shrink().map(Pattern))
    }
}

#[test]
fn validate_agrees_with_parse() {
    fn prop(pattern: Pattern, flags: u8) -> bool {
        let flags = ["", "i", "m", "x", "u", "iu", "sx"][flags as usize % 7];
        let parser =
            ParserBuilder::new().flags(flags.parse().unwrap()).build();
        let validated = parser.validate(&pattern.0);
        match parser.parse(&pattern.0, &mut Recorder::new()) {
            Err(Error::Syntax(err)) => validated == Err(Error::Syntax(err)),
            _ => validated.is_ok(),
        }
    }
    qc(prop as fn(Pattern, u8) -> bool);
}

#[test]
fn successful_parses_are_balanced() {
    fn prop(pattern: Pattern) -> bool {
        let mut rec = Recorder::new();
        match ParserBuilder::new().build().parse(&pattern.0, &mut rec) {
            Ok(_) => rec.is_balanced(),
            Err(_) => true,
        }
    }
    qc(prop as fn(Pattern) -> bool);
}

#[test]
fn syntax_errors_point_into_the_pattern() {
    fn prop(pattern: Pattern) -> bool {
        match ParserBuilder::new().build().validate(&pattern.0) {
            Err(err) => match err.position() {
                Some(pos) => pos < pattern.0.chars().count().max(1),
                None => false,
            },
            Ok(()) => true,
        }
    }
    qc(prop as fn(Pattern) -> bool);
}

#[test]
fn escaped_literals_translate_to_themselves() {
    fn prop(text: String) -> bool {
        let mut pattern = String::new();
        for c in text.chars().filter(|c| (' '..='~').contains(c)) {
            if c == '\\' || regex_flavor::is_syntax_character(c) {
                pattern.push('\\');
            }
            pattern.push(c);
        }
        let mut printer = Printer::new();
        match ParserBuilder::new().build().parse(&pattern, &mut printer) {
            Ok(_) => printer.pattern() == pattern,
            Err(_) => false,
        }
    }
    qc(prop as fn(String) -> bool);
}

#[test]
fn groups_are_numbered_in_opening_order() {
    fn prop(kinds: Vec<(u8, bool)>) -> bool {
        let mut pattern = String::new();
        let mut open = 0;
        let mut count = 0;
        let mut names = vec![];
        for (i, &(kind, nest)) in kinds.iter().enumerate() {
            match kind % 4 {
                0 => {
                    count += 1;
                    pattern.push('(');
                }
                1 => pattern.push_str("(?:"),
                2 => pattern.push_str("(?="),
                _ => {
                    count += 1;
                    names.push((format!("g{}", i), count));
                    pattern.push_str(&format!("(?<g{}>", i));
                }
            }
            pattern.push('a');
            if nest {
                open += 1;
            } else {
                pattern.push(')');
            }
        }
        pattern.push_str(&")".repeat(open));
        let t = match ParserBuilder::new()
            .build()
            .parse(&pattern, &mut Recorder::new())
        {
            Ok(t) => t,
            Err(_) => return false,
        };
        t.capture_group_count() == count
            && names.iter().all(|(name, number)| {
                t.group_indices(name) == Some(&[*number][..])
            })
    }
    QuickCheck::new()
        .tests(1_000)
        .gen(Gen::new(200))
        .quickcheck(prop as fn(Vec<(u8, bool)>) -> bool);
}
