//! The alignment fixture tests.
//!
//! Every directory in `tests/format` is a test containing:
//!
//! * `source.js` - the JavaScript source whose comments are aligned.
//! * `source.formatted.js` - the expected output.
//! * `tags` - the aligned tags, one per line; optional.
//! * `wrap-indent` - the wrap indent, without the trailing newline; optional.
//!
//! Setting the `BLESS` environment variable writes `source.formatted.js`
//! instead of comparing against it.

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use anyhow::Context as _;
use anyhow::Result;
use anyhow::bail;
use jsdoc_format::Formatter;
use jsdoc_format::config::Builder;
use jsdoc_grammar::scanner::parse_source;
use libtest_mimic::Arguments;
use libtest_mimic::Trial;
use pretty_assertions::StrComparison;

/// Replaces CRLF line endings.
fn normalize(s: &str) -> String {
    s.replace("\r\n", "\n")
}

/// Gets the source with its documentation comments removed.
fn code_of(source: &str) -> String {
    let mut code = String::new();
    let mut last = 0;
    for (comment, _) in parse_source(source) {
        code.push_str(&source[last..comment.span.start]);
        last = comment.span.end;
    }

    code.push_str(&source[last..]);
    code
}

/// Creates the formatter configured by the files of a test.
fn formatter(test: &Path) -> Result<Formatter> {
    let mut builder = Builder::default();
    if let Ok(tags) = fs::read_to_string(test.join("tags")) {
        builder = builder.tags(tags.lines().map(str::trim).filter(|t| !t.is_empty()));
    }

    if let Ok(indent) = fs::read_to_string(test.join("wrap-indent")) {
        builder = builder.wrap_indent(indent.trim_end_matches('\n'));
    }

    Ok(Formatter::new(
        builder.try_build().context("building the configuration")?,
    ))
}

/// Checks a result against the expected file, or writes it when blessing.
fn compare_result(path: &Path, result: &str) -> Result<()> {
    if env::var_os("BLESS").is_some() {
        return fs::write(path, result)
            .with_context(|| format!("writing `{path}`", path = path.display()));
    }

    let expected = fs::read_to_string(path)
        .map(|s| normalize(&s))
        .with_context(|| format!("reading `{path}`", path = path.display()))?;

    if expected != result {
        bail!(
            "result from `{path}` is not as expected:\n{diff}",
            path = path.display(),
            diff = StrComparison::new(&expected, result),
        );
    }

    Ok(())
}

/// Runs a single test.
fn run_test(test: &Path) -> Result<()> {
    let source = fs::read_to_string(test.join("source.js"))
        .map(|s| normalize(&s))
        .context("reading `source.js`")?;

    let formatter = formatter(test)?;
    let formatted = formatter.format(&source);
    if code_of(&formatted) != code_of(&source) {
        bail!("aligning changed code outside of documentation comments");
    }

    compare_result(&test.join("source.formatted.js"), &formatted)?;

    let again = formatter.format(&formatted);
    if again != formatted {
        bail!(
            "aligning is not idempotent:\n{diff}",
            diff = StrComparison::new(&formatted, &again),
        );
    }

    Ok(())
}

/// Collects a trial for every test directory.
fn find_tests() -> Result<Vec<Trial>> {
    let mut dirs: Vec<PathBuf> = fs::read_dir(Path::new("tests").join("format"))
        .context("reading `tests/format`")?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<_, _>>()?;
    dirs.retain(|p| p.is_dir());
    dirs.sort();

    Ok(dirs
        .into_iter()
        .map(|dir| {
            let name = dir
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            Trial::test(name, move || Ok(run_test(&dir)?))
        })
        .collect())
}

fn main() -> Result<()> {
    let args = Arguments::from_args();
    libtest_mimic::run(&args, find_tests()?).exit();
}
