use {
    anyhow::Result,
    regex_flavor::{
        Encoding, Error, Flags, Parser, ParserBuilder, Printer,
    },
    regex_flavor_test::{FlavorTest, TestResult, TestRunner},
};

/// Runs every test twice: once translating the pattern, and once merely
/// validating it. Validation must report the same syntax errors as
/// translation, and must accept patterns that only lack a translation.
#[test]
fn default() -> Result<()> {
    TestRunner::new()?
        .expand(&["translate", "validate"], |_| true)
        .test_iter(crate::suite()?.iter(), run_test)
        .assert();
    Ok(())
}

fn run_test(test: &FlavorTest) -> TestResult {
    let parser = match parser(test) {
        Ok(parser) => parser,
        Err(why) => return TestResult::fail(&why),
    };
    match test.additional_name() {
        "translate" => {
            let mut printer = Printer::new();
            match parser.parse(test.pattern(), &mut printer) {
                Ok(t) => TestResult::translated(
                    printer.into_pattern(),
                    t.capture_group_count(),
                    t.is_sticky(),
                ),
                Err(err) => error_result(err),
            }
        }
        "validate" => match parser.validate(test.pattern()) {
            Ok(()) => TestResult::valid(),
            Err(err) => error_result(err),
        },
        name => TestResult::fail(&format!("unrecognized test name: {}", name)),
    }
}

fn parser(test: &FlavorTest) -> Result<Parser, String> {
    let flags: Flags = test
        .flags()
        .parse()
        .map_err(|err| format!("invalid flags {:?}: {}", test.flags(), err))?;
    let encoding = match test.encoding() {
        None => Encoding::default(),
        Some(name) => Encoding::from_name(name)
            .ok_or_else(|| format!("unknown encoding {:?}", name))?,
    };
    Ok(ParserBuilder::new()
        .flags(flags)
        .encoding(encoding)
        .ignore_atomic_groups(test.ignore_atomic_groups())
        .legacy_whitespace(test.legacy_whitespace())
        .build())
}

fn error_result(err: Error) -> TestResult {
    match err {
        Error::Syntax(err) => TestResult::syntax_error(
            format!("{:?}", err.kind()),
            err.position(),
        ),
        Error::Unsupported(err) => {
            TestResult::unsupported(err.reason().to_string())
        }
        err => TestResult::fail(&format!("unknown error: {}", err)),
    }
}
