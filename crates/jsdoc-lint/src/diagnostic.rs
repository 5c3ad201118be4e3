//! Diagnostics reported by lint rules.

use std::collections::HashSet;
use std::fmt;
use std::ops::Range;

use codespan_reporting::diagnostic as codespan;
use tracing::warn;

use crate::fix::Replacement;

/// A byte range of the linted source.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    /// The offset of the first byte.
    start: usize,
    /// The offset one past the last byte.
    end: usize,
}

impl Span {
    /// Gets the offset of the first byte.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Gets the offset one past the last byte.
    pub fn end(&self) -> usize {
        self.end
    }

    /// Gets the length in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Determines if the span covers no bytes.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{start}..{end}", start = self.start, end = self.end)
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Self {
            start: range.start,
            end: range.end.max(range.start),
        }
    }
}

/// How serious a diagnostic is.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, serde::Deserialize, serde::Serialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The comment cannot be understood.
    Error,
    /// The comment breaks a configured convention.
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Error => "error",
            Self::Warning => "warning",
        })
    }
}

/// A highlighted span of a diagnostic, with an optional message.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Label {
    /// The highlighted span.
    span: Span,
    /// The message shown next to the span; may be empty.
    message: String,
}

impl Label {
    /// Gets the highlighted span.
    pub fn span(&self) -> Span {
        self.span
    }

    /// Gets the message of the label.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A problem found in a documentation comment.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Diagnostic {
    /// The rule that reported the problem.
    rule: Option<String>,
    /// The severity.
    severity: Severity,
    /// The message.
    message: String,
    /// A description of how to fix the problem.
    fix: Option<String>,
    /// The highlighted spans; the first is the primary one.
    labels: Vec<Label>,
    /// The edits that fix the problem.
    replacements: Vec<Replacement>,
}

impl Ord for Diagnostic {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (
            &self.labels,
            &self.rule,
            self.severity,
            &self.message,
            &self.fix,
        )
            .cmp(&(
                &other.labels,
                &other.rule,
                other.severity,
                &other.message,
                &other.fix,
            ))
    }
}

impl PartialOrd for Diagnostic {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Diagnostic {
    /// Creates a diagnostic with the given severity and message.
    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            rule: None,
            severity,
            message: message.into(),
            fix: None,
            labels: Vec::new(),
            replacements: Vec::new(),
        }
    }

    /// Creates an error.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Creates a warning.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    /// Sets the rule that reported the diagnostic.
    pub fn with_rule(mut self, rule: impl Into<String>) -> Self {
        self.rule = Some(rule.into());
        self
    }

    /// Sets the description of how to fix the problem.
    pub fn with_fix(mut self, fix: impl Into<String>) -> Self {
        self.fix = Some(fix.into());
        self
    }

    /// Highlights a span without a message.
    pub fn with_highlight(mut self, span: impl Into<Span>) -> Self {
        self.labels.push(Label {
            span: span.into(),
            message: String::new(),
        });
        self
    }

    /// Highlights a span with a message.
    pub fn with_label(mut self, message: impl Into<String>, span: impl Into<Span>) -> Self {
        self.labels.push(Label {
            span: span.into(),
            message: message.into(),
        });
        self
    }

    /// Adds an edit that fixes the problem.
    pub fn with_replacement(mut self, replacement: Replacement) -> Self {
        self.replacements.push(replacement);
        self
    }

    /// Gets the rule that reported the diagnostic.
    pub fn rule(&self) -> Option<&str> {
        self.rule.as_deref()
    }

    /// Gets the severity.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Gets the message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Gets the description of how to fix the problem.
    pub fn fix(&self) -> Option<&str> {
        self.fix.as_deref()
    }

    /// Gets the highlighted spans.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Gets the primary highlighted span.
    pub fn primary_span(&self) -> Option<Span> {
        self.labels.first().map(Label::span)
    }

    /// Gets the edits that fix the problem.
    pub fn replacements(&self) -> &[Replacement] {
        &self.replacements
    }

    /// Determines if the problem can be fixed automatically.
    pub fn is_fixable(&self) -> bool {
        !self.replacements.is_empty()
    }

    /// Converts the diagnostic for rendering with `codespan-reporting`.
    pub fn to_codespan<FileId: Copy>(&self, file_id: FileId) -> codespan::Diagnostic<FileId> {
        let diagnostic = match self.severity {
            Severity::Error => codespan::Diagnostic::error(),
            Severity::Warning => codespan::Diagnostic::warning(),
        }
        .with_message(&self.message);

        let diagnostic = match &self.rule {
            Some(rule) => diagnostic.with_code(rule),
            None => diagnostic,
        };

        let notes = self.fix.iter().map(|fix| format!("fix: {fix}")).collect();
        let labels = self
            .labels
            .iter()
            .enumerate()
            .map(|(i, label)| {
                let style = if i == 0 {
                    codespan::LabelStyle::Primary
                } else {
                    codespan::LabelStyle::Secondary
                };
                codespan::Label::new(style, file_id, label.span.start..label.span.end)
                    .with_message(&label.message)
            })
            .collect();

        diagnostic.with_labels(labels).with_notes(notes)
    }
}

/// The diagnostics collected over one lint run.
///
/// Besides the diagnostics themselves, the collection remembers which
/// settings problems were already reported so that each is reported once per
/// run no matter how many comments trigger it.
#[derive(Debug, Default)]
pub struct Diagnostics {
    /// The diagnostics reported so far.
    diagnostics: Vec<Diagnostic>,
    /// The settings messages reported so far.
    warned: HashSet<String>,
}

impl Diagnostics {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a diagnostic.
    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Reports a problem with the shared settings.
    ///
    /// Returns `false` without adding anything if the message was already
    /// reported during this run.
    pub fn add_settings_problem(&mut self, message: &str, span: impl Into<Span>) -> bool {
        if !self.warned.insert(message.to_string()) {
            return false;
        }

        warn!(message, "invalid settings");
        self.add(
            Diagnostic::warning(message)
                .with_rule(crate::SETTINGS_RULE_ID)
                .with_highlight(span),
        );
        true
    }

    /// Determines if the given settings message was reported during this run.
    pub fn has_warned(&self, message: &str) -> bool {
        self.warned.contains(message)
    }

    /// Gets the diagnostics reported so far.
    pub fn as_slice(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Gets the number of diagnostics.
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Determines if no diagnostic was reported.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Takes the diagnostics, keeping the record of reported settings
    /// problems.
    pub fn take(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    /// Clears the diagnostics and the record of reported settings problems.
    pub fn reset(&mut self) {
        self.diagnostics.clear();
        self.warned.clear();
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn settings_problems_are_reported_once() {
        let mut diagnostics = Diagnostics::new();
        assert!(diagnostics.add_settings_problem("bad settings", 0..3));
        assert!(!diagnostics.add_settings_problem("bad settings", 10..13));
        assert!(diagnostics.has_warned("bad settings"));
        assert_eq!(diagnostics.len(), 1);

        let taken = diagnostics.take();
        assert_eq!(taken.len(), 1);
        assert!(!diagnostics.add_settings_problem("bad settings", 0..3));

        diagnostics.reset();
        assert!(diagnostics.add_settings_problem("bad settings", 0..3));
    }

    #[test]
    fn codespan_conversion() {
        let diagnostic = Diagnostic::warning("Invalid JSDoc tag name \"arg\".")
            .with_rule("CheckTagNames")
            .with_fix("replace `@arg` with `@param`")
            .with_highlight(4..20)
            .with_label("declared here", 30..34);

        let converted = diagnostic.to_codespan(());
        assert_eq!(converted.code.as_deref(), Some("CheckTagNames"));
        assert_eq!(converted.notes, ["fix: replace `@arg` with `@param`"]);
        assert_eq!(converted.labels.len(), 2);
        assert_eq!(converted.labels[0].range, 4..20);
        assert_eq!(converted.labels[1].message, "declared here");
    }

    #[test]
    fn ordering_by_position() {
        let mut all = vec![
            Diagnostic::warning("b").with_highlight(10..11),
            Diagnostic::warning("a").with_highlight(2..3),
        ];
        all.sort();
        assert_eq!(all[0].message(), "a");
        assert_eq!(all[0].primary_span(), Some(Span::from(2..3)));
    }
}
