#![no_main]

use {
    libfuzzer_sys::fuzz_target,
    regex_flavor::{Encoding, ParserBuilder, Printer, Recorder},
};

#[derive(arbitrary::Arbitrary)]
struct FuzzData {
    pattern: String,
    flags: u8,
    encoding: u8,
    ignore_atomic_groups: bool,
    legacy_whitespace: bool,
    posix_classes: bool,
    nested_classes: bool,
    class_intersection: bool,
    literal_malformed_braces: bool,
    lookbehind_backreferences: bool,
}

impl std::fmt::Debug for FuzzData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FuzzData")
            .field("pattern", &self.pattern)
            .field("flags", &flags(self.flags).to_string())
            .field("encoding", &encoding(self.encoding).name())
            .finish()
    }
}

fn flags(bits: u8) -> regex_flavor::Flags {
    let mut flags = regex_flavor::Flags::empty();
    for (i, c) in "imsxduy".chars().enumerate() {
        if bits & (1 << i) != 0 {
            if let Some(flag) = regex_flavor::Flags::from_char(c) {
                flags = flags.add(flag);
            }
        }
    }
    flags
}

fn encoding(n: u8) -> Encoding {
    match n % 4 {
        0 => Encoding::UTF_32,
        1 => Encoding::UTF_16,
        2 => Encoding::LATIN_1,
        _ => Encoding::ASCII,
    }
}

fuzz_target!(|data: FuzzData| {
    let _ = env_logger::try_init();

    let parser = ParserBuilder::new()
        .flags(flags(data.flags))
        .encoding(encoding(data.encoding))
        .ignore_atomic_groups(data.ignore_atomic_groups)
        .legacy_whitespace(data.legacy_whitespace)
        .posix_classes(data.posix_classes)
        .nested_classes(data.nested_classes)
        .class_intersection(data.class_intersection)
        .literal_malformed_braces(data.literal_malformed_braces)
        .lookbehind_backreferences(data.lookbehind_backreferences)
        .build();
    let mut rec = Recorder::new();
    if parser.parse(&data.pattern, &mut rec).is_ok() {
        assert!(rec.is_balanced());
        // The printer must cope with anything the parser emits.
        let mut printer = Printer::new();
        parser.parse(&data.pattern, &mut printer).unwrap();
    }
});
