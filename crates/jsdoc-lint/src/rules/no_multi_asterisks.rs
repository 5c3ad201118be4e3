//! A lint rule for repeated asterisks at the start and end of comment lines.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use serde::Serialize;

use crate::Diagnostic;
use crate::Diagnostics;
use crate::DocComment;
use crate::Span;
use crate::Tag;
use crate::TagSet;
use crate::fix::Replacement;
use crate::rules::Rule;

/// The identifier for the no multi asterisks rule.
const ID: &str = "NoMultiAsterisks";

/// Matches the extra asterisks before the end of a single-line comment.
static SINGLE_LINE_END: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*((?:\*|[ \t])*)\*$").expect("single line end pattern should compile")
});

/// Matches the extra asterisks before the end of the last line of a
/// comment.
static MULTI_LINE_END: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"((?:\*|[ \t])*)\*$").expect("multi line end pattern should compile")
});

/// Matches the extra asterisks before the end of a single-line comment,
/// allowing whitespace between them.
static SINGLE_LINE_END_NO_WS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*(\**)\*$").expect("single line end pattern should compile")
});

/// Matches the extra asterisks before the end of the last line of a
/// comment, allowing whitespace between them.
static MULTI_LINE_END_NO_WS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\**)\*$").expect("multi line end pattern should compile")
});

/// The options of the [`NoMultiAsterisksRule`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct NoMultiAsterisksOptions {
    /// Whether whitespace may precede extra asterisks.
    pub allow_whitespace: bool,
    /// Whether extra asterisks before the closing `*/` are reported.
    pub prevent_at_end: bool,
    /// Whether extra asterisks at the start of middle lines are reported.
    pub prevent_at_middle_lines: bool,
}

impl Default for NoMultiAsterisksOptions {
    fn default() -> Self {
        Self {
            allow_whitespace: false,
            prevent_at_end: true,
            prevent_at_middle_lines: true,
        }
    }
}

/// Creates a "multiple asterisks on a middle line" diagnostic.
fn middle_line(span: Span, replacement: Replacement) -> Diagnostic {
    Diagnostic::warning("Should be no multiple asterisks on middle lines.")
        .with_rule(ID)
        .with_highlight(span)
        .with_fix("remove the extra asterisks")
        .with_replacement(replacement)
}

/// Creates a "multiple asterisks on the end line" diagnostic.
fn end_line(span: Span, replacement: Replacement) -> Diagnostic {
    Diagnostic::warning("Should be no multiple asterisks on end lines.")
        .with_rule(ID)
        .with_highlight(span)
        .with_fix("remove the extra asterisks before `*/`")
        .with_replacement(replacement)
}

/// Gets the length of the run of extra asterisks at the start of a line's
/// description.
///
/// Whitespace and single asterisks count toward the run; an asterisk
/// followed by another stops it.
fn middle_asterisks(description: &str) -> usize {
    let mut len = 0;
    let mut chars = description.char_indices().peekable();
    while let Some((_, c)) = chars.next() {
        let next = chars.peek().map(|(_, c)| *c);
        match c {
            ' ' | '\t' => len += 1,
            '*' if next != Some('*') => len += 1,
            _ => break,
        }
    }

    // A run of only whitespace is not an asterisk
    if description[..len].contains('*') {
        len
    } else {
        0
    }
}

/// Gets the length of the leading asterisks of a line's text.
fn leading_asterisks(text: &str) -> usize {
    text.len() - text.trim_start_matches('*').len()
}

/// Detects comment lines starting or ending with more than one asterisk.
#[derive(Debug)]
pub struct NoMultiAsterisksRule {
    /// The options of the rule.
    options: NoMultiAsterisksOptions,
}

impl NoMultiAsterisksRule {
    /// Creates the rule with the given options.
    pub fn new(options: NoMultiAsterisksOptions) -> Self {
        Self { options }
    }
}

impl Rule for NoMultiAsterisksRule {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Ensures comment lines do not start or end with more than one asterisk."
    }

    fn explanation(&self) -> &'static str {
        "Lines of a documentation comment are delimited by a single leading asterisk and the \
         comment is closed by `*/`. Extra asterisks at the start of a middle line or before the \
         closing `*/` are noise, and are often left behind by editing."
    }

    fn tags(&self) -> TagSet {
        TagSet::new(&[Tag::Style])
    }

    fn doc_comment(&mut self, diagnostics: &mut Diagnostics, comment: &DocComment<'_>) {
        let allow_whitespace = self.options.allow_whitespace;
        for (index, line) in comment.block().source.iter().enumerate() {
            let tokens = &line.tokens;
            if self.options.prevent_at_middle_lines
                && tokens.end.is_empty()
                && tokens.tag.is_empty()
                && tokens.ty.is_empty()
                && tokens.name.is_empty()
            {
                let mut block = comment.block().clone();
                let fixed = &mut block.source[index].tokens;
                let found = if allow_whitespace {
                    let text = format!("{}{}", tokens.post_delimiter, tokens.description);
                    let len = leading_asterisks(&text);
                    if len > 0 {
                        let rest = text[len..].to_string();
                        fixed.post_delimiter.clear();
                        fixed.description = rest;
                    }
                    len > 0
                } else {
                    let len = middle_asterisks(&tokens.description);
                    if len > 0 {
                        fixed.description = tokens.description[len..].to_string();
                    }
                    len > 0
                };

                if found {
                    diagnostics.add(middle_line(
                        comment.line_span(index),
                        comment.replace_with(&block),
                    ));
                    return;
                }
            }

            if !self.options.prevent_at_end || tokens.end.is_empty() {
                continue;
            }

            let single_line = tokens.delimiter == "/**";
            let delimiter = if single_line { "*" } else { tokens.delimiter.as_str() };
            let pattern = match (allow_whitespace, single_line) {
                (false, true) => &SINGLE_LINE_END,
                (false, false) => &MULTI_LINE_END,
                (true, true) => &SINGLE_LINE_END_NO_WS,
                (true, false) => &MULTI_LINE_END_NO_WS,
            };

            let text = format!("{}{}", tokens.description, delimiter);
            let Some(captures) = pattern.captures(&text) else {
                continue;
            };

            let extra = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
            if !single_line && !extra.is_empty() && extra.trim().is_empty() {
                continue;
            }

            let mut block = comment.block().clone();
            let fixed = &mut block.source[index].tokens;
            if !single_line {
                fixed.delimiter.clear();
            }
            fixed.description = pattern.replace(&text, "").into_owned();

            diagnostics.add(end_line(
                comment.line_span(index),
                comment.replace_with(&block),
            ));
            return;
        }
    }
}
