#![no_main]

use {
    libfuzzer_sys::fuzz_target,
    regex_flavor::{Error, Recorder},
};

// Validation must reject exactly the patterns that translation rejects with
// a syntax error, and must report the very same error.
fuzz_target!(|data: &[u8]| {
    let _ = env_logger::try_init();

    let Ok(pattern) = std::str::from_utf8(data) else { return };
    let parser = regex_flavor::Parser::new();
    let validated = parser.validate(pattern);
    match parser.parse(pattern, &mut Recorder::new()) {
        Err(Error::Syntax(err)) => {
            assert_eq!(Err(Error::Syntax(err)), validated)
        }
        _ => assert_eq!(Ok(()), validated),
    }
});
