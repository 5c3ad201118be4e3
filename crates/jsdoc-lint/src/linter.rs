//! Implementation of the linter.

use std::ops::Range;

use indexmap::IndexMap;
use jsdoc_grammar::Block;
use jsdoc_grammar::Grammar;
use jsdoc_grammar::Mode;
use jsdoc_grammar::Tag;
use jsdoc_grammar::scanner::Scanner;
use jsdoc_grammar::scanner::SourceComment;
use jsdoc_grammar::stringify;
use tracing::debug;
use tracing::trace;

use crate::Config;
use crate::Diagnostic;
use crate::Diagnostics;
use crate::Rule;
use crate::Span;
use crate::fix::Replacement;
use crate::fix::apply_fixes;
use crate::imports::ImportResolver;
use crate::imports::SyntacticImportResolver;
use crate::rules;
use crate::settings::Settings;
use crate::util::lines_with_offset;

/// The maximum number of times [`Linter::fix`] lints and fixes a source.
const MAX_FIX_PASSES: usize = 10;

/// What the host knows about the code a comment documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeContext {
    /// Whether the comment is attached to a node.
    pub attached: bool,
    /// Whether the node is in an ambient context: a `declare` statement or
    /// the top level of a declaration (`.d.ts`) file.
    pub ambient: bool,
}

impl NodeContext {
    /// The context of a comment in a declaration file.
    pub fn ambient() -> Self {
        Self {
            attached: true,
            ambient: true,
        }
    }

    /// The context of a comment attached to nothing.
    pub fn detached() -> Self {
        Self {
            attached: false,
            ambient: false,
        }
    }
}

impl Default for NodeContext {
    fn default() -> Self {
        Self {
            attached: true,
            ambient: false,
        }
    }
}

/// A documentation comment being linted.
#[allow(missing_debug_implementations)]
pub struct DocComment<'a> {
    /// The source containing the comment.
    source: &'a str,
    /// The comment as found in the source.
    comment: SourceComment<'a>,
    /// The parsed comment.
    block: Block,
    /// The whitespace standing in for the text preceding the comment on its
    /// first line.
    indent: String,
    /// The byte range in the source of each line of the comment, excluding
    /// line endings.
    lines: Vec<Range<usize>>,
    /// What the host knows about the documented code.
    context: NodeContext,
    /// The shared settings.
    settings: &'a Settings,
    /// The tag grammar with the structured tag overrides applied.
    grammar: &'a Grammar,
    /// The resolver for `@import` statements.
    imports: &'a dyn ImportResolver,
}

impl<'a> DocComment<'a> {
    /// Creates a new comment for linting.
    pub fn new(
        source: &'a str,
        comment: SourceComment<'a>,
        context: NodeContext,
        settings: &'a Settings,
        grammar: &'a Grammar,
        imports: &'a dyn ImportResolver,
    ) -> Self {
        let block = comment.parse();
        let indent = " ".repeat(comment.column);
        let lines = lines_with_offset(comment.text)
            .map(|(line, start, _)| {
                let start = comment.span.start + start;
                start..start + line.len()
            })
            .collect();

        Self {
            source,
            comment,
            block,
            indent,
            lines,
            context,
            settings,
            grammar,
            imports,
        }
    }

    /// Gets the text of the comment, from `/**` through `*/`.
    pub fn text(&self) -> &'a str {
        self.comment.text
    }

    /// Gets the span of the comment.
    pub fn span(&self) -> Span {
        self.comment.span.clone().into()
    }

    /// Gets the parsed comment.
    ///
    /// The first line of the block is indented by the comment's column.
    pub fn block(&self) -> &Block {
        &self.block
    }

    /// Gets the indentation of the comment's first line.
    pub fn indent(&self) -> &str {
        &self.indent
    }

    /// Gets the zero-based line of the source on which the comment starts.
    pub fn line(&self) -> usize {
        self.comment.line
    }

    /// Gets what the host knows about the documented code.
    pub fn context(&self) -> NodeContext {
        self.context
    }

    /// Gets the shared settings.
    pub fn settings(&self) -> &'a Settings {
        self.settings
    }

    /// Gets the tag grammar.
    pub fn grammar(&self) -> &'a Grammar {
        self.grammar
    }

    /// Gets the mode comments are written in.
    pub fn mode(&self) -> Mode {
        self.settings.mode
    }

    /// Gets the resolver for `@import` statements.
    pub fn imports(&self) -> &'a dyn ImportResolver {
        self.imports
    }

    /// Gets the span of a line of the comment.
    ///
    /// The first line starts at the comment's opening marker.
    pub fn line_span(&self, index: usize) -> Span {
        self.lines
            .get(index)
            .or(self.lines.last())
            .cloned()
            .unwrap_or(self.comment.span.clone())
            .into()
    }

    /// Gets the span of the first line of a tag.
    pub fn tag_span(&self, tag: &Tag) -> Span {
        self.line_span(tag.first_line())
    }

    /// Gets the source range of a tag's type, braces included.
    ///
    /// Returns `None` when the tag has no type or its type spans lines.
    pub fn type_range(&self, tag: &Tag) -> Option<Range<usize>> {
        let mut typed = self
            .block
            .lines_of(tag)
            .iter()
            .enumerate()
            .filter(|(_, line)| !line.tokens.ty.is_empty());
        let (offset, line) = typed.next()?;
        if typed.next().is_some() {
            return None;
        }

        let index = tag.first_line() + offset;
        let tokens = &line.tokens;
        let mut before = tokens.delimiter.len()
            + tokens.post_delimiter.len()
            + tokens.tag.len()
            + tokens.post_tag.len();
        // The first line's leading whitespace is not part of the comment
        if index > 0 {
            before += tokens.start.len();
        }

        let start = self.lines.get(index)?.start + before;
        let range = start..start + tokens.ty.len();
        let relative = range.start.checked_sub(self.comment.span.start)?
            ..range.end.checked_sub(self.comment.span.start)?;
        (self.comment.text.get(relative) == Some(tokens.ty.as_str())).then_some(range)
    }

    /// Creates a replacement of the whole comment with new text.
    pub fn replace_text(&self, text: impl Into<String>) -> Replacement {
        Replacement::replace(self.comment.span.clone(), text)
    }

    /// Creates a replacement of the whole comment with a modified block.
    pub fn replace_with(&self, block: &Block) -> Replacement {
        let text = stringify(block);
        let text = text.strip_prefix(&self.indent).unwrap_or(&text);
        self.replace_text(text)
    }

    /// Creates a replacement removing the comment from the source.
    ///
    /// A comment standing alone on its lines is removed along with them.
    pub fn remove(&self) -> Replacement {
        let source = self.source;
        let Range { mut start, mut end } = self.comment.span.clone();
        let line_start = source[..start].rfind('\n').map(|i| i + 1).unwrap_or(0);
        let rest = &source[end..];
        let line_end = rest.find('\n').map(|i| end + i + 1).unwrap_or(source.len());
        if source[line_start..start].trim().is_empty() && source[end..line_end].trim().is_empty() {
            start = line_start;
            end = line_end;
        }

        Replacement::replace(start..end, "")
    }
}

/// Runs lint rules over the documentation comments of JavaScript source.
///
/// By default, the linter runs all lint rules with the default
/// configuration.
#[allow(missing_debug_implementations)]
pub struct Linter {
    /// The map of rule name to rule.
    rules: IndexMap<&'static str, Box<dyn Rule>>,
    /// The shared settings.
    settings: Settings,
    /// The tag grammar with the structured tag overrides applied.
    grammar: Grammar,
    /// The problem with the structured tag overrides, if any.
    grammar_error: Option<String>,
    /// The resolver for `@import` statements.
    imports: Box<dyn ImportResolver>,
    /// The diagnostics of the current run.
    diagnostics: Diagnostics,
}

impl Linter {
    /// Creates a new linter with the given settings and rules.
    pub fn new(settings: Settings, rules: impl IntoIterator<Item = Box<dyn Rule>>) -> Self {
        let (grammar, grammar_error) = match settings.grammar() {
            Ok(grammar) => (grammar, None),
            Err(e) => (
                Grammar::new(settings.mode),
                Some(format!("Invalid `settings.structured-tags`: {e}.")),
            ),
        };

        Self {
            rules: rules.into_iter().map(|r| (r.id(), r)).collect(),
            settings,
            grammar,
            grammar_error,
            imports: Box::new(SyntacticImportResolver),
            diagnostics: Diagnostics::new(),
        }
    }

    /// Creates a linter running every rule with the given configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.settings.clone(), rules::rules(config))
    }

    /// Replaces the resolver for `@import` statements.
    pub fn with_import_resolver(mut self, resolver: impl ImportResolver + 'static) -> Self {
        self.imports = Box::new(resolver);
        self
    }

    /// Gets the shared settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Iterates the identifiers of the rules the linter runs.
    pub fn rule_ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.keys().copied()
    }

    /// Lints the documentation comments of the given source.
    ///
    /// Every comment is linted as attached to a node outside of an ambient
    /// context.
    pub fn lint(&mut self, source: &str) -> Vec<Diagnostic> {
        self.lint_with_context(source, |_| NodeContext::default())
    }

    /// Lints the documentation comments of the given source, asking the
    /// callback for the context of each comment.
    pub fn lint_with_context<F>(&mut self, source: &str, mut context: F) -> Vec<Diagnostic>
    where
        F: FnMut(&SourceComment<'_>) -> NodeContext,
    {
        for comment in Scanner::new(source) {
            if comment.text.starts_with("/***") {
                continue;
            }

            let node = context(&comment);
            let doc = DocComment::new(
                source,
                comment,
                node,
                &self.settings,
                &self.grammar,
                self.imports.as_ref(),
            );
            if doc.block().source.is_empty() {
                continue;
            }

            trace!(line = doc.line() + 1, "linting documentation comment");
            if let Some(e) = &self.grammar_error {
                self.diagnostics.add_settings_problem(e, doc.line_span(0));
            }

            for rule in self.rules.values_mut() {
                rule.doc_comment(&mut self.diagnostics, &doc);
            }
        }

        let mut diagnostics = self.diagnostics.take();
        diagnostics.sort();
        diagnostics
    }

    /// Lints the source and applies fixes until no fixable diagnostic
    /// remains.
    pub fn fix(&mut self, source: &str) -> String {
        let mut source = source.to_string();
        for pass in 0..MAX_FIX_PASSES {
            let diagnostics = self.lint(&source);
            if !diagnostics.iter().any(Diagnostic::is_fixable) {
                break;
            }

            let fixed = apply_fixes(&source, &diagnostics);
            debug!(pass, "applied lint fixes");
            if fixed == source {
                break;
            }
            source = fixed;
        }

        source
    }

    /// Resets the state of every rule and forgets the settings problems
    /// already reported.
    pub fn reset(&mut self) {
        for rule in self.rules.values_mut() {
            rule.reset();
        }

        self.diagnostics.reset();
    }
}

impl Default for Linter {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}
