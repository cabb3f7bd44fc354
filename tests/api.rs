use regex_flavor::{
    Encoding, Error, Event, Flags, ParserBuilder, Printer, Recorder,
    SyntaxErrorKind,
};

fn syntax_kind(err: &Error) -> &SyntaxErrorKind {
    match *err {
        Error::Syntax(ref err) => err.kind(),
        ref err => panic!("expected syntax error, got {}", err),
    }
}

#[test]
fn error_messages() {
    let err = regex_flavor::translate("a(", "").unwrap_err();
    assert_eq!(
        "regex parse error at position 1: unterminated subpattern",
        err.to_string()
    );
    let err = regex_flavor::translate("(?>a)", "").unwrap_err();
    assert_eq!(
        "unsupported regex feature: atomic groups are not supported",
        err.to_string()
    );
    assert_eq!(None, err.position());
}

#[test]
fn global_flags() {
    let flags: Flags = "imsxduy".parse().unwrap();
    assert!(flags.case_insensitive());
    assert!(flags.sticky());
    assert_eq!("imsxduy", flags.to_string());

    let err = "iqm".parse::<Flags>().unwrap_err();
    assert_eq!(&SyntaxErrorKind::FlagUnrecognized('q'), syntax_kind(&err));
    assert_eq!(Some(1), err.position());
    let err = "imi".parse::<Flags>().unwrap_err();
    assert_eq!(&SyntaxErrorKind::FlagDuplicate('i'), syntax_kind(&err));
    assert_eq!(Some(2), err.position());
}

#[test]
fn nest_limit() {
    let p = ParserBuilder::new().nest_limit(2).build();
    assert!(p.validate("((a))").is_ok());
    assert!(p.validate("[[a]]").is_ok());
    let err = p.validate("(?=(?<=(a)))").unwrap_err();
    assert_eq!(&SyntaxErrorKind::NestLimitExceeded(2), syntax_kind(&err));
    assert_eq!(Some(7), err.position());

    let p = ParserBuilder::new().nest_limit(0).build();
    assert!(p.validate("abc").is_ok());
    assert!(p.validate("(a)").is_err());
    assert!(p.validate("[a]").is_err());
    assert!(p.validate("(?i)a").is_err());
}

#[test]
fn builder_calls_are_balanced() {
    let patterns = [
        "",
        "a|b",
        r"(a(?:b)(?=c)(?<!d))\1",
        "^a$",
        r"\b\B\Z",
        "(?i)a(?-i:b)|c",
        "[a-z&&[^b]]+?",
    ];
    let parser = ParserBuilder::new().flags("m".parse().unwrap()).build();
    for pattern in patterns {
        let mut rec = Recorder::new();
        parser.parse(pattern, &mut rec).unwrap();
        assert!(rec.is_balanced(), "{:?}: {:?}", pattern, rec.events());
    }
}

#[test]
fn recorded_events() {
    let mut rec = Recorder::new();
    ParserBuilder::new().build().parse("(a)|", &mut rec).unwrap();
    let events = rec.into_events();
    assert_eq!(Event::PushRootGroup, events[0]);
    assert_eq!(Event::PushCaptureGroup, events[1]);
    assert_eq!(Event::PopGroup, events[3]);
    assert_eq!(Event::NextSequence, events[4]);
    assert_eq!(Event::PopRootGroup, events[5]);
    assert_eq!(6, events.len());
}

#[test]
fn translation_summary() {
    let mut printer = Printer::new();
    let t = ParserBuilder::new()
        .build()
        .parse("(?<a>x)(y)(?<b>z)(?<a>w)", &mut printer)
        .unwrap();
    assert_eq!(4, t.capture_group_count());
    assert_eq!(Some(&[1, 4][..]), t.group_indices("a"));
    assert_eq!(Some(&[3][..]), t.group_indices("b"));
    assert_eq!(None, t.group_indices("c"));
    let names: Vec<&str> = t.named_groups().map(|(name, _)| name).collect();
    assert_eq!(vec!["a", "b"], names);
    assert_eq!("(x)(y)(z)(w)", printer.pattern());
}

#[test]
fn printer_is_reusable() {
    let parser = ParserBuilder::new().build();
    let mut printer = Printer::new();
    parser.parse("abc", &mut printer).unwrap();
    parser.parse("x", &mut printer).unwrap();
    assert_eq!("x", printer.pattern());
}

#[test]
fn encodings() {
    assert_eq!(Some(Encoding::LATIN_1), Encoding::from_name("latin-1"));
    assert_eq!(Some(Encoding::UTF_16), Encoding::from_name("UTF-16"));
    assert_eq!(None, Encoding::from_name("EBCDIC"));
    assert_eq!(0xFF, Encoding::LATIN_1.max_code_point());
    assert_eq!("ASCII", Encoding::ASCII.name());

    let p = ParserBuilder::new().encoding(Encoding::ASCII).build();
    let mut printer = Printer::new();
    p.parse(r"\W", &mut printer).unwrap();
    // The complement is printed when it is no longer than the class.
    assert_eq!(r"[^0-9A-Z_a-z\u{80}-\u{10FFFF}]", printer.pattern());
}

#[test]
fn flavor_options() {
    let p = ParserBuilder::new().posix_classes(false).build();
    let mut printer = Printer::new();
    p.parse("[[:a:]]", &mut printer).unwrap();
    assert_eq!("[:a]", printer.pattern());

    let p = ParserBuilder::new().literal_malformed_braces(false).build();
    let err = p.validate("a{x}").unwrap_err();
    assert_eq!(&SyntaxErrorKind::RepetitionCountUnclosed, syntax_kind(&err));

    let p = ParserBuilder::new().lookbehind_backreferences(false).build();
    let err = p.parse(r"(a)(?<!\1)", &mut Recorder::new()).unwrap_err();
    assert!(err.is_unsupported());
    assert!(p.validate(r"(a)(?<!\1)").is_ok());
}
