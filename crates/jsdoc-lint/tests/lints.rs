//! The lint fixture tests.
//!
//! Every directory in `tests/lints` is a test containing:
//!
//! * `source.js` - the linted source; its first line is a `//` comment naming
//!   the rule under test.
//! * `source.errors` - the expected diagnostics.
//! * `source.fixed.js` - the expected source after fixing; optional.
//! * `config.toml` - the lint configuration; optional.
//!
//! Setting the `BLESS` environment variable writes the expected files instead
//! of comparing against them. Passing test names after `--` runs only those
//! tests.

use std::env;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use codespan_reporting::files::Files;
use codespan_reporting::files::SimpleFile;
use colored::Colorize;
use jsdoc_lint::Config;
use jsdoc_lint::Diagnostic;
use jsdoc_lint::Linter;
use jsdoc_lint::Rule;
use jsdoc_lint::rules::rules;
use pretty_assertions::StrComparison;
use tracing_subscriber::EnvFilter;

/// A fixture directory.
struct Test {
    /// The name of the directory.
    name: String,
    /// The directory.
    dir: PathBuf,
}

impl Test {
    /// Collects the tests, keeping only those named on the command line, if
    /// any are.
    fn all() -> Vec<Self> {
        let wanted: Vec<String> = env::args()
            .skip_while(|a| a != "--")
            .skip(1)
            .filter(|a| !a.starts_with('-'))
            .collect();

        let mut tests: Vec<Self> = fs::read_dir("tests/lints")
            .expect("`tests/lints` should be readable")
            .filter_map(|entry| {
                let dir = entry.expect("directory entry should be readable").path();
                let name = dir.file_name()?.to_str()?.to_string();
                (dir.is_dir() && (wanted.is_empty() || wanted.contains(&name)))
                    .then_some(Self { name, dir })
            })
            .collect();
        tests.sort_by(|a, b| a.name.cmp(&b.name));
        tests
    }

    /// Reads a file of the test.
    fn read(&self, file: &str) -> Result<String, String> {
        fs::read_to_string(self.dir.join(file))
            .map(|s| s.replace("\r\n", "\n"))
            .map_err(|e| format!("failed to read `{file}`: {e}"))
    }

    /// Creates a linter running only the rule named on the first line of the
    /// source.
    fn linter(&self, source: &str) -> Result<Linter, String> {
        let id = source
            .lines()
            .next()
            .and_then(|l| l.strip_prefix("//"))
            .map(str::trim)
            .ok_or("the first line of `source.js` must name a rule")?;

        let config = match self.read("config.toml") {
            Ok(text) => Config::from_toml(&text).map_err(|e| e.to_string())?,
            Err(_) => Config::default(),
        };

        let selected: Vec<_> = rules(&config).into_iter().filter(|r| r.id() == id).collect();
        if selected.is_empty() {
            return Err(format!("unknown rule `{id}`"));
        }

        Ok(Linter::new(config.settings.clone(), selected))
    }

    /// Checks an output of the test against its expected file, or writes the
    /// file when blessing.
    fn expect(&self, file: &str, actual: &str) -> Result<(), String> {
        if env::var_os("BLESS").is_some() {
            return fs::write(self.dir.join(file), actual)
                .map_err(|e| format!("failed to write `{file}`: {e}"));
        }

        let expected = self.read(file)?;
        if expected != actual {
            return Err(format!(
                "`{file}` does not match:\n{diff}",
                diff = StrComparison::new(&expected, actual),
            ));
        }

        Ok(())
    }

    /// Runs the test.
    fn run(&self) -> Result<(), String> {
        let source = self.read("source.js")?;
        let mut linter = self.linter(&source)?;
        let diagnostics = linter.lint(&source);
        self.expect("source.errors", &render(&diagnostics, &source))?;

        let has_fixed = self.dir.join("source.fixed.js").exists();
        let blessing_fix =
            env::var_os("BLESS").is_some() && diagnostics.iter().any(Diagnostic::is_fixable);
        if has_fixed || blessing_fix {
            linter.reset();
            self.expect("source.fixed.js", &linter.fix(&source))?;
        }

        Ok(())
    }
}

/// Renders diagnostics one per line, prefixed with their line and column.
fn render(diagnostics: &[Diagnostic], source: &str) -> String {
    let file = SimpleFile::new("source.js", source);
    let mut out = String::new();
    for diagnostic in diagnostics {
        let offset = diagnostic.primary_span().map_or(0, |s| s.start());
        let location = file
            .location((), offset)
            .expect("diagnostic should be within the source");
        let _ = writeln!(
            out,
            "{line}:{column}: {severity}[{rule}]: {message}",
            line = location.line_number,
            column = location.column_number,
            severity = diagnostic.severity(),
            rule = diagnostic.rule().unwrap_or_default(),
            message = diagnostic.message(),
        );

        if let Some(fix) = diagnostic.fix() {
            let _ = writeln!(out, "  = fix: {fix}");
        }
    }

    out
}

fn main() -> ExitCode {
    // Fix passes are logged at the `debug` level
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();

    let tests = Test::all();
    println!("\nrunning {count} tests\n", count = tests.len());

    let failures: Vec<(&str, String)> = tests
        .iter()
        .filter_map(|test| {
            let result = test.run();
            let status = match &result {
                Ok(()) => "ok".green(),
                Err(_) => "FAILED".red(),
            };
            println!("test {name} ... {status}", name = test.name);
            result.err().map(|e| (test.name.as_str(), e))
        })
        .collect();

    if failures.is_empty() {
        println!("\ntest result: ok. {count} passed\n", count = tests.len());
        return ExitCode::SUCCESS;
    }

    eprintln!("\nfailures:");
    for (name, message) in &failures {
        eprintln!("\n---- {name} ----\n{message}", message = message.red());
    }

    eprintln!(
        "\ntest result: {failed}. {passed} passed; {count} failed\n",
        failed = "FAILED".red(),
        passed = tests.len() - failures.len(),
        count = failures.len(),
    );
    ExitCode::FAILURE
}
