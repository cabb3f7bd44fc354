// Regression tests for inputs that nest deeply, any of which would overflow
// the stack without the nest limit. Each one must fail gracefully with the
// default configuration.

use regex_flavor::{Error, ParserBuilder, Printer, SyntaxErrorKind};

fn assert_nest_limit(pattern: &str) {
    let parser = ParserBuilder::new().build();
    let err = parser.parse(pattern, &mut Printer::new()).unwrap_err();
    match err {
        Error::Syntax(ref err) => {
            assert_eq!(&SyntaxErrorKind::NestLimitExceeded(250), err.kind())
        }
        ref err => panic!("expected nest limit error, got {}", err),
    }
    assert_eq!(Err(err), parser.validate(pattern));
}

#[test]
fn deep_groups() {
    assert_nest_limit(&"(".repeat(1 << 15));
    assert_nest_limit(&format!("{}a{}", "(".repeat(300), ")".repeat(300)));
}

#[test]
fn deep_lookarounds() {
    assert_nest_limit(&"(?=(?<!".repeat(1 << 12));
}

#[test]
fn deep_classes() {
    assert_nest_limit(&"[".repeat(1 << 15));
    assert_nest_limit(&"[a&&".repeat(1 << 12));
}

#[test]
fn many_open_ended_flags() {
    assert_nest_limit(&"(?i)".repeat(1 << 12));
    assert_nest_limit(&"a(?-i)".repeat(1 << 12));
}

#[test]
fn limit_is_reached_exactly() {
    let pattern = format!("{}a{}", "(".repeat(250), ")".repeat(250));
    assert!(ParserBuilder::new().build().validate(&pattern).is_ok());
    let pattern = format!("{}a{}", "(".repeat(251), ")".repeat(251));
    let err = ParserBuilder::new().build().validate(&pattern).unwrap_err();
    assert_eq!(Some(250), err.position());
}

#[test]
fn many_zero_to_many_reps() {
    let pattern = format!(".{}", "*".repeat(1 << 15));
    let err = regex_flavor::validate(&pattern, "").unwrap_err();
    assert_eq!(Some(2), err.position());
}

#[test]
fn long_posix_name() {
    let pattern = format!("[[:{}", "a".repeat(1 << 15));
    assert!(regex_flavor::validate(&pattern, "").is_err());
}
