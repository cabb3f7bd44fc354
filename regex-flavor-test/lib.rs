/*!
A crate for defining regex flavor translation tests in a TOML format and
applying them to translator implementations.

This crate does not come with any actual tests. It merely defines the test
format and provides some convenient routines for executing tests within the
context of Rust unit tests.

# Format

The entire test corpus is derived from zero or more TOML files. Each TOML
file contains zero or more tests, where each test is defined as a table via
`[[test]]`.

Each test has the following fields:

* `name` - A name for the test. It must be unique within its file. A test's
[`FlavorTest::full_name`] is derived either via `{group_name}/{name}` or
`{group_name}/{name}/{additional_name}`, with the latter being used only when
[`TestRunner::expand`] is used. The `group_name` is derived from the file stem
(the file name without the `.toml` suffix).
* `pattern` - The pattern to translate, written in the source flavor.
* `flags` - The global flags to translate the pattern with. This is optional
and defaults to no flags.
* `translation` - The expected translation, as printed in the target dialect.
When absent, the translation isn't checked, but the pattern is still expected
to translate successfully unless one of the error fields below is given.
* `syntax-error` - A table with a `kind` and a `position` field. When given,
the pattern is expected to be rejected with a syntax error of the given kind
at the given codepoint offset. The kind is the name of the error kind without
any of its data, e.g., `GroupExtensionUnknown`.
* `unsupported` - When `true`, the pattern is expected to be valid but to have
no translation. This is disabled by default.
* `capture-groups` - An optional number of capturing groups the pattern is
expected to have.
* `sticky` - An optional boolean that, when present, is compared against
whether the translation is sticky.
* `encoding` - An optional encoding name, e.g., `LATIN-1`. Implementations
should default to `UTF-32`.
* `ignore-atomic-groups` - Whether atomic groups should be translated to
plain groups instead of being rejected. This is disabled by default.
* `legacy-whitespace` - Whether `\s` should include U+180E. This is disabled
by default.

At most one of `translation`, `syntax-error` and `unsupported` may be given.
*/

#![deny(missing_docs)]

/// For convenience, `anyhow::Error` is used to represents errors in this
/// crate.
///
/// For this reason, `anyhow` is a public dependency and is re-exported here.
pub extern crate anyhow;

use std::{borrow::Borrow, collections::HashSet, fs, path::Path};

use {
    anyhow::{bail, Context, Result},
    bstr::{BString, ByteSlice, ByteVec},
    serde::Deserialize,
};

const ENV_REGEX_FLAVOR_TEST: &str = "REGEX_FLAVOR_TEST";
const ENV_REGEX_FLAVOR_TEST_VERBOSE: &str = "REGEX_FLAVOR_TEST_VERBOSE";

/// A collection of translation tests.
#[derive(Clone, Debug, Deserialize)]
pub struct FlavorTests {
    /// 'default' permits an empty TOML file.
    #[serde(default, rename = "test")]
    tests: Vec<FlavorTest>,
    #[serde(skip)]
    seen: HashSet<String>,
}

impl FlavorTests {
    /// Create a new empty collection of translation tests.
    pub fn new() -> FlavorTests {
        FlavorTests { tests: vec![], seen: HashSet::new() }
    }

    /// Loads all of the tests in the given TOML file. The group name assigned
    /// to each test is the stem of the file name. For example, if one loads
    /// `foo/bar.toml`, then the group name for each test will be `bar`.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        let data = fs::read(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let group_name = path
            .file_stem()
            .with_context(|| {
                format!("failed to get file name of {}", path.display())
            })?
            .to_str()
            .with_context(|| {
                format!("invalid UTF-8 found in {}", path.display())
            })?;
        self.load_slice(&group_name, &data)
            .with_context(|| format!("error loading {}", path.display()))?;
        Ok(())
    }

    /// Load all of the TOML encoded tests in `data` into this collection.
    /// The given group name is assigned to all loaded tests.
    pub fn load_slice(&mut self, group_name: &str, data: &[u8]) -> Result<()> {
        let data = std::str::from_utf8(&data).with_context(|| {
            format!("data in {} is not valid UTF-8", group_name)
        })?;
        let mut index = 1;
        let mut tests: FlavorTests =
            toml::from_str(&data).with_context(|| {
                format!("error decoding TOML for '{}'", group_name)
            })?;
        for t in &mut tests.tests {
            t.group = group_name.to_string();
            if t.name.is_empty() {
                t.name = format!("{}", index);
                index += 1;
            }
            t.full_name = format!("{}/{}", t.group, t.name);
            let outcomes = [
                t.translation.is_some(),
                t.syntax_error.is_some(),
                t.unsupported,
            ];
            anyhow::ensure!(
                outcomes.iter().filter(|&&x| x).count() <= 1,
                "test '{}' expects more than one outcome",
                t.full_name,
            );
            if self.seen.contains(t.full_name()) {
                bail!("found duplicate tests for name '{}'", t.full_name());
            }
            self.seen.insert(t.full_name().to_string());
        }
        self.tests.extend(tests.tests);
        Ok(())
    }

    /// Return an iterator over all translation tests that have been loaded.
    /// The order of the iterator corresponds to the order in which the tests
    /// were loaded.
    ///
    /// This is useful to pass to [`TestRunner::test_iter`].
    pub fn iter(&self) -> FlavorTestsIter {
        FlavorTestsIter(self.tests.iter())
    }
}

/// A translation test describes a pattern, the options it is translated with
/// and the expected outcome.
///
/// Each `FlavorTest` represents a single `[[test]]` table in a TOML test
/// file.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FlavorTest {
    #[serde(skip)]
    group: String,
    #[serde(default)]
    name: String,
    #[serde(skip)]
    additional_name: String,
    #[serde(skip)]
    full_name: String,
    pattern: String,
    #[serde(default)]
    flags: String,
    translation: Option<String>,
    #[serde(rename = "syntax-error")]
    syntax_error: Option<ExpectedSyntaxError>,
    #[serde(default)]
    unsupported: bool,
    #[serde(rename = "capture-groups")]
    capture_groups: Option<u32>,
    sticky: Option<bool>,
    encoding: Option<String>,
    #[serde(default, rename = "ignore-atomic-groups")]
    ignore_atomic_groups: bool,
    #[serde(default, rename = "legacy-whitespace")]
    legacy_whitespace: bool,
}

impl FlavorTest {
    /// Return the group name of this test.
    ///
    /// When using [`FlavorTests::load`], the group name corresponds to the
    /// file stem (the file name without the `.toml` suffix). Otherwise, the
    /// group name is whatever is given to [`FlavorTests::load_slice`].
    pub fn group(&self) -> &str {
        &self.group
    }

    /// The name of this test, as given in the `[[test]]` block.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The additional name for this test.
    ///
    /// This is only non-empty when the test runner was expanded with
    /// [`TestRunner::expand`].
    pub fn additional_name(&self) -> &str {
        &self.additional_name
    }

    /// The full name of this test, which is formed by joining the group
    /// name, the test name and the additional name with a `/`.
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// The pattern to translate.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The global flags, in their textual form.
    pub fn flags(&self) -> &str {
        &self.flags
    }

    /// The name of the encoding to translate for, if one was given.
    pub fn encoding(&self) -> Option<&str> {
        self.encoding.as_deref()
    }

    /// Whether atomic groups should be downgraded to plain groups.
    pub fn ignore_atomic_groups(&self) -> bool {
        self.ignore_atomic_groups
    }

    /// Whether `\s` should include the Mongolian vowel separator.
    pub fn legacy_whitespace(&self) -> bool {
        self.legacy_whitespace
    }

    /// Returns true if the pattern is expected to be syntactically valid.
    pub fn is_valid(&self) -> bool {
        self.syntax_error.is_none()
    }

    fn with_additional_name(&self, name: &str) -> FlavorTest {
        let additional_name = name.to_string();
        let full_name = format!("{}/{}", self.full_name, additional_name);
        FlavorTest { additional_name, full_name, ..self.clone() }
    }

    /// Check the result reported by an implementation against this test,
    /// returning a description of the mismatch if there is one.
    fn check(&self, result: &TestResultKind) -> Option<String> {
        match *result {
            TestResultKind::Translated {
                ref pattern,
                capture_groups,
                sticky,
            } => {
                if let Some(ref err) = self.syntax_error {
                    return Some(format!("expected syntax error {}", err));
                }
                if self.unsupported {
                    return Some("expected an unsupported construct".into());
                }
                if let Some(ref expected) = self.translation {
                    if expected != pattern {
                        return Some(format!(
                            "expected translation {:?}, but got {:?}",
                            expected, pattern
                        ));
                    }
                }
                if let Some(expected) = self.capture_groups {
                    if expected != capture_groups {
                        return Some(format!(
                            "expected {} capture groups, but got {}",
                            expected, capture_groups
                        ));
                    }
                }
                if let Some(expected) = self.sticky {
                    if expected != sticky {
                        return Some(format!(
                            "expected sticky={}, but got sticky={}",
                            expected, sticky
                        ));
                    }
                }
                None
            }
            TestResultKind::Valid => match self.syntax_error {
                Some(ref err) => {
                    Some(format!("expected syntax error {}", err))
                }
                None => None,
            },
            TestResultKind::SyntaxError { ref kind, position } => {
                let got = ExpectedSyntaxError {
                    kind: kind_name(kind).to_string(),
                    position,
                };
                match self.syntax_error {
                    Some(ref err) if *err == got => None,
                    Some(ref err) => Some(format!(
                        "expected syntax error {}, but got {}",
                        err, got
                    )),
                    None => Some(format!("unexpected syntax error {}", got)),
                }
            }
            TestResultKind::Unsupported { ref reason } => {
                if self.unsupported {
                    None
                } else {
                    Some(format!("unexpected unsupported error: {}", reason))
                }
            }
            TestResultKind::Skip | TestResultKind::Fail { .. } => None,
        }
    }
}

/// A syntax error as written in a test: the name of its kind, and the
/// codepoint offset at which it is reported.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
struct ExpectedSyntaxError {
    kind: String,
    position: usize,
}

impl std::fmt::Display for ExpectedSyntaxError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} at {}", self.kind, self.position)
    }
}

/// The name of an error kind without its data, e.g., `Expected` for
/// `Expected("}")`.
fn kind_name(kind: &str) -> &str {
    kind.split(|c| c == '(' || c == ' ' || c == '{').next().unwrap_or(kind)
}

/// The outcome of translating (or validating) the pattern of a test.
///
/// When using the test runner, callers must provide a closure that takes a
/// `FlavorTest` and returns a `TestResult`.
#[derive(Debug, Clone)]
pub struct TestResult {
    kind: TestResultKind,
}

#[derive(Debug, Clone)]
enum TestResultKind {
    Translated { pattern: String, capture_groups: u32, sticky: bool },
    Valid,
    SyntaxError { kind: String, position: usize },
    Unsupported { reason: String },
    Skip,
    Fail { why: String },
}

impl TestResult {
    /// Create a test result for a pattern that was translated successfully.
    pub fn translated(
        pattern: String,
        capture_groups: u32,
        sticky: bool,
    ) -> TestResult {
        TestResult {
            kind: TestResultKind::Translated {
                pattern,
                capture_groups,
                sticky,
            },
        }
    }

    /// Create a test result for a pattern that was only validated, and found
    /// to be syntactically valid.
    pub fn valid() -> TestResult {
        TestResult { kind: TestResultKind::Valid }
    }

    /// Create a test result for a pattern rejected with a syntax error.
    ///
    /// The kind is usually the `Debug` representation of the error kind.
    /// Only its name is compared, so any data it carries is ignored.
    pub fn syntax_error(kind: String, position: usize) -> TestResult {
        TestResult { kind: TestResultKind::SyntaxError { kind, position } }
    }

    /// Create a test result for a valid pattern without a translation.
    pub fn unsupported(reason: String) -> TestResult {
        TestResult { kind: TestResultKind::Unsupported { reason } }
    }

    /// Indicate that this test should be skipped. It will not be counted as
    /// a failure.
    pub fn skip() -> TestResult {
        TestResult { kind: TestResultKind::Skip }
    }

    /// Indicate that this test should be failed for the reason given.
    ///
    /// This is useful when a test needs to be failed for reasons that the
    /// test runner itself cannot check.
    pub fn fail(why: &str) -> TestResult {
        TestResult { kind: TestResultKind::Fail { why: why.to_string() } }
    }
}

/// A runner for executing translation tests.
///
/// This runner is intended to be used within a Rust unit test, marked with
/// the `#[test]` attribute. Typical usage corresponds to calling
/// [`TestRunner::test_iter`] on an iterator of `FlavorTest`s, and then
/// calling `assert` once done. If any tests failed, then `assert` will panic
/// with an error message containing all test failures.
///
/// # Skipping tests
///
/// If the `REGEX_FLAVOR_TEST` environment variable is set, then it may
/// contain a comma separated list of substrings. Each substring corresponds
/// to a whitelisted item, unless it starts with a `-`, in which case it
/// corresponds to a blacklisted item.
///
/// If there are any whitelist items, then a test's full name must contain at
/// least one of the whitelist substrings in order to be run, and does not
/// contain any blacklist substrings. If there are no whitelist substrings,
/// then a test is run only when it does not match any blacklist substrings.
///
/// The last substring that a test name matches takes precedent.
#[derive(Debug)]
pub struct TestRunner {
    include: Vec<IncludePattern>,
    results: FlavorTestResults,
    expanders: Vec<Expander>,
}

impl TestRunner {
    /// Create a new runner for executing tests.
    ///
    /// This returns an error if there was a problem reading the
    /// `REGEX_FLAVOR_TEST` environment variable, which may be set to include
    /// or exclude tests. See the docs on `TestRunner` for its format.
    pub fn new() -> Result<TestRunner> {
        let mut runner = TestRunner {
            include: vec![],
            results: FlavorTestResults::new(),
            expanders: vec![],
        };
        for mut substring in read_env(ENV_REGEX_FLAVOR_TEST)?.split(",") {
            substring = substring.trim();
            if substring.is_empty() {
                continue;
            }
            if let Some(substring) = substring.strip_prefix("-") {
                runner.blacklist(substring);
            } else {
                runner.whitelist(substring);
            }
        }
        Ok(runner)
    }

    /// Assert that all tests run have either passed or have been skipped.
    ///
    /// If any tests have failed, then a panic occurs with a report of all
    /// failures.
    ///
    /// If `REGEX_FLAVOR_TEST_VERBOSE` is set to `1`, then a longer report of
    /// tests that passed, failed or skipped is printed.
    pub fn assert(&mut self) {
        self.results.assert();
    }

    /// Whitelist the given substring.
    pub fn whitelist(&mut self, substring: &str) -> &mut TestRunner {
        self.include.push(IncludePattern {
            blacklist: false,
            substring: BString::from(substring),
        });
        self
    }

    /// Blacklist the given substring.
    ///
    /// A blacklisted test is never run, unless a whitelisted substring added
    /// after the blacklisted substring matches it.
    pub fn blacklist(&mut self, substring: &str) -> &mut TestRunner {
        self.include.push(IncludePattern {
            blacklist: true,
            substring: BString::from(substring),
        });
        self
    }

    /// Set an expansion predicate that appends each entry in
    /// `additional_names` to the end the name for every test that `predicate`
    /// returns true. The corresponding additional name is made available via
    /// [`FlavorTest::additional_name`].
    ///
    /// For example, every test can be run once in translation mode and once
    /// in validation mode:
    ///
    /// ```ignore
    /// TestRunner::new()?
    ///     .expand(&["translate", "validate"], |_| true)
    ///     .test_iter(tests.iter(), run)
    ///     .assert()
    /// ```
    pub fn expand<S: AsRef<str>>(
        &mut self,
        additional_names: &[S],
        predicate: impl FnMut(&FlavorTest) -> bool + 'static,
    ) -> &mut TestRunner {
        self.expanders.push(Expander {
            predicate: Box::new(predicate),
            additional_names: additional_names
                .iter()
                .map(|s| s.as_ref().to_string())
                .collect(),
        });
        self
    }

    /// Run all of the given tests using the given translator.
    ///
    /// Failures are merely collected. Use [`TestRunner::assert`] to fail the
    /// current test by panicking if there were any failures.
    pub fn test_iter<I, T>(
        &mut self,
        it: I,
        mut run: impl FnMut(&FlavorTest) -> TestResult,
    ) -> &mut TestRunner
    where
        I: IntoIterator<Item = T>,
        T: Borrow<FlavorTest>,
    {
        for test in it {
            let test = test.borrow();
            let mut additional = vec![];
            for expander in &mut self.expanders {
                if (expander.predicate)(test) {
                    for name in expander.additional_names.iter() {
                        additional.push(test.with_additional_name(name));
                    }
                    break;
                }
            }
            if additional.is_empty() {
                additional.push(test.to_owned());
            }
            for test in &additional {
                if self.should_skip(test) {
                    self.results.skip(test);
                    continue;
                }
                self.test(test, |t| run(t));
            }
        }
        self
    }

    /// Run a single test, bypassing any whitelist or blacklist.
    pub fn test(
        &mut self,
        test: &FlavorTest,
        run: impl FnOnce(&FlavorTest) -> TestResult,
    ) -> &mut TestRunner {
        let result = match safe(|| run(test)) {
            Ok(result) => result,
            Err(msg) => {
                // Translators should never panic. It's auto-fail if they do.
                self.results.fail(test, FailureKind::UnexpectedPanic(msg));
                return self;
            }
        };
        match result.kind {
            TestResultKind::Skip => self.results.skip(test),
            TestResultKind::Fail { why } => {
                self.results.fail(test, FailureKind::UserFailure { why })
            }
            ref kind => match test.check(kind) {
                None => self.results.pass(test),
                Some(why) => {
                    self.results.fail(test, FailureKind::Mismatch { why })
                }
            },
        }
        self
    }

    /// Return true if and only if the given test should be skipped.
    fn should_skip(&self, test: &FlavorTest) -> bool {
        if self.include.is_empty() {
            return false;
        }
        let mut skip = self.include.iter().any(|pat| !pat.blacklist);
        for pat in &self.include {
            if test.full_name().as_bytes().contains_str(&pat.substring) {
                skip = pat.blacklist;
            }
        }
        skip
    }
}

#[derive(Debug)]
struct IncludePattern {
    blacklist: bool,
    substring: BString,
}

struct Expander {
    predicate: Box<dyn FnMut(&FlavorTest) -> bool>,
    additional_names: Vec<String>,
}

impl std::fmt::Debug for Expander {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Expander")
            .field("predicate", &"<FnMut(..)>")
            .field("additional_names", &self.additional_names)
            .finish()
    }
}

/// A collection of test results, corresponding to passed, skipped and failed
/// tests.
#[derive(Debug)]
struct FlavorTestResults {
    pass: Vec<FlavorTest>,
    fail: Vec<FlavorTestFailure>,
    skip: Vec<FlavorTest>,
}

/// A test that failed along with the reason why.
#[derive(Debug)]
struct FlavorTestFailure {
    test: FlavorTest,
    kind: FailureKind,
}

#[derive(Debug)]
enum FailureKind {
    /// The implementation failed the test explicitly.
    UserFailure { why: String },
    /// The outcome didn't match the expected outcome.
    Mismatch { why: String },
    /// A panic occurred while running the test.
    UnexpectedPanic(String),
}

impl FlavorTestResults {
    fn new() -> FlavorTestResults {
        FlavorTestResults { pass: vec![], fail: vec![], skip: vec![] }
    }

    fn pass(&mut self, test: &FlavorTest) {
        self.pass.push(test.clone());
    }

    fn fail(&mut self, test: &FlavorTest, kind: FailureKind) {
        self.fail.push(FlavorTestFailure { test: test.clone(), kind });
    }

    fn skip(&mut self, test: &FlavorTest) {
        self.skip.push(test.clone());
    }

    fn assert(&self) {
        if read_env(ENV_REGEX_FLAVOR_TEST_VERBOSE).map_or(false, |s| s == "1")
        {
            self.verbose();
        }
        if self.fail.is_empty() {
            return;
        }
        let failures = self
            .fail
            .iter()
            .map(|f| f.to_string())
            .collect::<Vec<String>>()
            .join("\n\n");
        panic!(
            "found {} failures:\n{}\n{}\n{}\n\n\
             Set the REGEX_FLAVOR_TEST environment variable to filter \n\
             tests, e.g., REGEX_FLAVOR_TEST=foo,-foo2 runs every test whose \n\
             name contains foo but not foo2\n\n",
            self.fail.len(),
            "~".repeat(79),
            failures.trim(),
            "~".repeat(79),
        )
    }

    fn verbose(&self) {
        println!("{}", "~".repeat(79));
        for t in &self.skip {
            println!("skip: {}", t.full_name());
        }
        for t in &self.pass {
            println!("pass: {}", t.full_name());
        }
        for t in &self.fail {
            println!("FAIL: {}", t.test.full_name());
        }
        println!(
            "\npassed: {}, skipped: {}, failed: {}",
            self.pass.len(),
            self.skip.len(),
            self.fail.len()
        );
        println!("{}", "~".repeat(79));
    }
}

impl std::fmt::Display for FlavorTestFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let why = match self.kind {
            FailureKind::UserFailure { ref why } => {
                format!("failed by implementor because: {}", why)
            }
            FailureKind::Mismatch { ref why } => why.clone(),
            FailureKind::UnexpectedPanic(ref msg) => {
                format!("got unexpected panic:\n{}", msg)
            }
        };
        write!(
            f,
            "{}: {}\n\
             pattern:     {:?}\n\
             flags:       {:?}",
            self.test.full_name(),
            why,
            self.test.pattern(),
            self.test.flags(),
        )
    }
}

/// An iterator over translation tests.
///
/// This iterator is created by the [`FlavorTests::iter`] method.
#[derive(Debug)]
pub struct FlavorTestsIter<'a>(std::slice::Iter<'a, FlavorTest>);

impl<'a> Iterator for FlavorTestsIter<'a> {
    type Item = &'a FlavorTest;

    fn next(&mut self) -> Option<&'a FlavorTest> {
        self.0.next()
    }
}

/// Read the environment variable given. If it doesn't exist, then return an
/// empty string. Otherwise, check that it is valid UTF-8. If it isn't, return
/// a useful error message.
fn read_env(var: &str) -> Result<String> {
    let val = match std::env::var_os(var) {
        None => return Ok("".to_string()),
        Some(val) => val,
    };
    let val = val.into_string().map_err(|os| {
        anyhow::anyhow!(
            "invalid UTF-8 in env var {}={:?}",
            var,
            Vec::from_os_str_lossy(&os)
        )
    })?;
    Ok(val)
}

/// Runs the given closure such that any panics are caught and converted into
/// errors. If the panic'd value could not be converted to a known error type,
/// then a generic string error message is used.
fn safe<T, F>(fun: F) -> Result<T, String>
where
    F: FnOnce() -> T,
{
    use std::panic;

    panic::catch_unwind(panic::AssertUnwindSafe(fun)).map_err(|any_err| {
        // Extract common types of panic payload:
        // panic and assert produce &str or String
        if let Some(&s) = any_err.downcast_ref::<&str>() {
            s.to_owned()
        } else if let Some(s) = any_err.downcast_ref::<String>() {
            s.to_owned()
        } else {
            "UNABLE TO SHOW RESULT OF PANIC.".to_owned()
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(data: &str) -> Result<FlavorTests> {
        let mut tests = FlavorTests::new();
        tests.load_slice("test", data.as_bytes())?;
        Ok(tests)
    }

    #[test]
    fn load_tests() {
        let tests = load(
            r#"
[[test]]
name = "a"
pattern = "a|b"
translation = "a|b"

[[test]]
pattern = "(a"
syntax-error = { kind = "GroupUnclosed", position = 1 }
"#,
        )
        .unwrap();
        let names: Vec<&str> = tests.iter().map(|t| t.full_name()).collect();
        assert_eq!(vec!["test/a", "test/1"], names);
    }

    #[test]
    fn err_duplicate_names() {
        let data = r#"
[[test]]
name = "a"
pattern = "a"

[[test]]
name = "a"
pattern = "b"
"#;
        assert!(load(data).is_err());
    }

    #[test]
    fn err_conflicting_outcomes() {
        let data = r#"
[[test]]
pattern = "a"
translation = "a"
unsupported = true
"#;
        assert!(load(data).is_err());
    }

    #[test]
    fn err_unknown_field() {
        let data = r#"
[[test]]
pattern = "a"
haystack = "a"
"#;
        assert!(load(data).is_err());
    }

    #[test]
    fn check_outcomes() {
        let tests = load(
            r#"
[[test]]
name = "error"
pattern = "(?#)"
syntax-error = { kind = "GroupExtensionUnknown", position = 2 }
"#,
        )
        .unwrap();
        let t = tests.iter().next().unwrap();
        let got = TestResultKind::SyntaxError {
            kind: "GroupExtensionUnknown('#')".to_string(),
            position: 2,
        };
        assert_eq!(None, t.check(&got));
        assert!(t.check(&TestResultKind::Valid).is_some());
        let got = TestResultKind::SyntaxError {
            kind: "GroupExtensionUnknown('#')".to_string(),
            position: 3,
        };
        assert!(t.check(&got).is_some());
    }
}
