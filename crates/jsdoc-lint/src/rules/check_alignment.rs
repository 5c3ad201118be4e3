//! A lint rule for the alignment of the asterisks of a comment.

use crate::Diagnostic;
use crate::Diagnostics;
use crate::DocComment;
use crate::Span;
use crate::Tag;
use crate::TagSet;
use crate::fix::Replacement;
use crate::rules::Rule;

/// The identifier for the check alignment rule.
const ID: &str = "CheckAlignment";

/// Creates a "misaligned block" diagnostic.
fn misaligned(span: Span, replacement: Replacement) -> Diagnostic {
    Diagnostic::warning("Expected JSDoc block to be aligned.")
        .with_rule(ID)
        .with_highlight(span)
        .with_fix("align the asterisks one column right of the opening `/**`")
        .with_replacement(replacement)
}

/// Gets the text before the first asterisk of a line.
fn asterisk_prefix(line: &str) -> &str {
    line.split('*').next().unwrap_or_default()
}

/// Detects comment lines whose asterisk is not one column right of the
/// opening `/**`.
#[derive(Debug, Clone, Copy)]
pub struct CheckAlignmentRule;

impl Rule for CheckAlignmentRule {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Ensures that the asterisks of a comment are aligned."
    }

    fn explanation(&self) -> &'static str {
        "Each line of a documentation comment after the first should start with an asterisk \
         indented one column further than the opening `/**`, so the asterisks form a straight \
         column. Lines with text before their asterisk are left alone."
    }

    fn tags(&self) -> TagSet {
        TagSet::new(&[Tag::Spacing])
    }

    fn related_rules(&self) -> &[&'static str] {
        &["CheckLineAlignment"]
    }

    fn doc_comment(&mut self, diagnostics: &mut Diagnostics, comment: &DocComment<'_>) {
        let indent = comment.indent();
        let expected = indent.len() + 1;

        let misaligned_line = comment
            .text()
            .split('\n')
            .enumerate()
            .skip(1)
            .map(|(i, line)| (i, asterisk_prefix(line)))
            .find(|(_, prefix)| prefix.trim_start().is_empty() && prefix.len() != expected);

        let Some((line, _)) = misaligned_line else {
            return;
        };

        let fixed = comment
            .text()
            .split('\n')
            .enumerate()
            .map(|(i, line)| {
                if i == 0 || !asterisk_prefix(line).trim_start().is_empty() {
                    line.to_string()
                } else {
                    format!("{indent} {line}", line = line.trim_start())
                }
            })
            .collect::<Vec<_>>()
            .join("\n");

        diagnostics.add(misaligned(
            comment.line_span(line),
            comment.replace_text(fixed),
        ));
    }
}
