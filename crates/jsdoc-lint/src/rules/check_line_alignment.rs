//! A lint rule for the alignment of the columns of tag lines.

use jsdoc_format::align;
use jsdoc_format::config::Builder;
use jsdoc_format::config::CustomSpacings;
use jsdoc_format::config::DEFAULT_TAGS;
use jsdoc_grammar::Tokens;
use jsdoc_grammar::stringify;
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

/// The identifier for the check line alignment rule.
const ID: &str = "CheckLineAlignment";

/// Whether tag lines are aligned.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// The columns of tag lines must be aligned.
    Always,
    /// Tag lines must use single spacing.
    #[default]
    Never,
    /// Only the wrap indent of tag lines is checked.
    Any,
}

/// The options of the [`CheckLineAlignmentRule`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct CheckLineAlignmentOptions {
    /// Whether tag lines are aligned.
    pub alignment: Alignment,
    /// The tags whose lines are checked.
    pub tags: Vec<String>,
    /// The spacing after each token.
    pub custom_spacings: CustomSpacings,
    /// Whether the spacing after the delimiter of the main description is
    /// left as written when aligning.
    pub preserve_main_description_post_delimiter: bool,
    /// The whitespace expected after the delimiter's single space on
    /// wrapped tag lines.
    pub wrap_indent: String,
    /// Whether the indentation of wrapped tag lines is left unchecked.
    pub disable_wrap_indent: bool,
}

impl Default for CheckLineAlignmentOptions {
    fn default() -> Self {
        Self {
            alignment: Alignment::default(),
            tags: DEFAULT_TAGS.iter().map(|t| t.to_string()).collect(),
            custom_spacings: CustomSpacings::default(),
            preserve_main_description_post_delimiter: false,
            wrap_indent: String::new(),
            disable_wrap_indent: false,
        }
    }
}

/// Creates a "lines not aligned" diagnostic.
fn not_aligned(span: Span, replacement: Replacement) -> Diagnostic {
    Diagnostic::warning("Expected JSDoc block lines to be aligned.")
        .with_rule(ID)
        .with_highlight(span)
        .with_fix("align the tag, type, name and description columns")
        .with_replacement(replacement)
}

/// Creates a "lines aligned" diagnostic.
fn aligned(span: Span, replacement: Replacement) -> Diagnostic {
    Diagnostic::warning("Expected JSDoc block lines to not be aligned.")
        .with_rule(ID)
        .with_highlight(span)
        .with_fix("separate the tag, type, name and description with single spaces")
        .with_replacement(replacement)
}

/// Creates a "wrong wrap indent" diagnostic.
fn wrap_indent(span: Span, replacement: Replacement) -> Diagnostic {
    Diagnostic::warning("Expected wrap indent")
        .with_rule(ID)
        .with_highlight(span)
        .with_fix("indent wrapped lines of the tag with the configured wrap indent")
        .with_replacement(replacement)
}

/// The spacing tokens of a tag line, each followed by its content.
#[derive(Debug, Clone, Copy)]
enum Spacer {
    /// The spacing after the delimiter, followed by the tag.
    PostDelimiter,
    /// The spacing after the tag, followed by the type.
    PostTag,
    /// The spacing after the type, followed by the name or description.
    PostType,
    /// The spacing after the name, followed by the description.
    PostName,
}

impl Spacer {
    /// Gets the configured spacing.
    fn spacing(self, spacings: &CustomSpacings) -> usize {
        match self {
            Self::PostDelimiter => spacings.post_delimiter(),
            Self::PostTag => spacings.post_tag(),
            Self::PostType => spacings.post_type(),
            Self::PostName => spacings.post_name(),
        }
    }

    /// Gets the spacing token and the content that follows it.
    fn tokens(self, tokens: &Tokens, has_name: bool) -> (&str, &str) {
        match self {
            Self::PostDelimiter => (tokens.post_delimiter.as_str(), tokens.tag.as_str()),
            Self::PostTag => (tokens.post_tag.as_str(), tokens.ty.as_str()),
            Self::PostType if has_name => (tokens.post_type.as_str(), tokens.name.as_str()),
            Self::PostType => (tokens.post_type.as_str(), tokens.description.as_str()),
            Self::PostName => (tokens.post_name.as_str(), tokens.description.as_str()),
        }
    }

    /// Gets the spacing token for modification.
    fn token_mut(self, tokens: &mut Tokens) -> &mut String {
        match self {
            Self::PostDelimiter => &mut tokens.post_delimiter,
            Self::PostTag => &mut tokens.post_tag,
            Self::PostType => &mut tokens.post_type,
            Self::PostName => &mut tokens.post_name,
        }
    }
}

/// Determines if a description starts with a hyphen followed by whitespace.
fn has_hyphen(description: &str) -> bool {
    description
        .trim_start()
        .strip_prefix('-')
        .is_some_and(|rest| rest.starts_with(char::is_whitespace))
}

/// Determines if a description's leading hyphen is followed by exactly the
/// given number of whitespace characters.
fn has_exact_hyphen_spacing(description: &str, spacing: usize) -> bool {
    let Some(rest) = description.trim_start().strip_prefix('-') else {
        return false;
    };

    rest.chars().take_while(|c| c.is_whitespace()).count() == spacing
}

/// Replaces the whitespace around a description's leading hyphen.
fn respace_hyphen(description: &str, spacing: usize) -> String {
    let rest = description.trim_start();
    match rest.strip_prefix('-') {
        Some(after) if after.starts_with(char::is_whitespace) => {
            format!("-{pad}{after}", pad = " ".repeat(spacing), after = after.trim_start())
        }
        _ => description.to_string(),
    }
}

/// Detects tag lines whose columns are aligned, or not aligned, against the
/// configured alignment.
#[derive(Debug)]
pub struct CheckLineAlignmentRule {
    /// The options of the rule.
    options: CheckLineAlignmentOptions,
    /// The alignment configuration, or the problem building it.
    config: Result<jsdoc_format::Config, String>,
}

impl CheckLineAlignmentRule {
    /// Creates the rule with the given options.
    pub fn new(options: CheckLineAlignmentOptions) -> Self {
        let config = Builder::default()
            .tags(options.tags.iter().cloned())
            .custom_spacings(options.custom_spacings)
            .preserve_main_description_post_delimiter(
                options.preserve_main_description_post_delimiter,
            )
            .wrap_indent(options.wrap_indent.clone())
            .disable_wrap_indent(options.disable_wrap_indent)
            .try_build()
            .map_err(|e| format!("Invalid `check-line-alignment` options: {e}."));

        Self { options, config }
    }

    /// Checks that a multi-line comment is aligned.
    fn check_aligned(
        &self,
        config: &jsdoc_format::Config,
        diagnostics: &mut Diagnostics,
        comment: &DocComment<'_>,
    ) {
        if !comment.text().contains('\n') {
            return;
        }

        let formatted = stringify(&align(comment.block(), comment.indent(), config));
        let formatted = formatted.trim_start();
        if formatted != comment.text() {
            diagnostics.add(not_aligned(
                comment.line_span(0),
                comment.replace_text(formatted),
            ));
        }
    }

    /// Checks that a tag line is separated by single spacing.
    fn check_not_aligned(
        &self,
        diagnostics: &mut Diagnostics,
        comment: &DocComment<'_>,
        tag: &jsdoc_grammar::Tag,
    ) {
        let Some(line) = comment.block().source.get(tag.first_line()) else {
            return;
        };

        let spacings = &self.options.custom_spacings;
        let has_name = comment.grammar().might_have_namepath(&tag.tag);
        let spacers: &[Spacer] = if has_name {
            &[
                Spacer::PostDelimiter,
                Spacer::PostTag,
                Spacer::PostType,
                Spacer::PostName,
            ]
        } else {
            &[Spacer::PostDelimiter, Spacer::PostTag, Spacer::PostType]
        };

        let tokens = &line.tokens;
        let post_hyphen = spacings.post_hyphen();
        let exact_hyphen = has_exact_hyphen_spacing(&tokens.description, post_hyphen);
        let spaced = spacers.iter().all(|spacer| {
            let (space, _) = spacer.tokens(tokens, has_name);
            space.is_empty() || space.len() == spacer.spacing(spacings)
        });
        if spaced && (!has_hyphen(&tokens.description) || exact_hyphen) {
            return;
        }

        let mut block = comment.block().clone();
        let fixed = &mut block.source[tag.first_line()].tokens;
        for spacer in spacers {
            let (_, content) = spacer.tokens(tokens, has_name);
            *spacer.token_mut(fixed) = if content.is_empty() {
                String::new()
            } else {
                " ".repeat(spacer.spacing(spacings))
            };
        }

        if !exact_hyphen {
            fixed.description = respace_hyphen(&fixed.description, post_hyphen);
        }

        diagnostics.add(aligned(comment.tag_span(tag), comment.replace_with(&block)));
    }

    /// Checks the indentation of the wrapped lines of the tags.
    ///
    /// Only the first misindented line of a comment is reported.
    fn check_wrap_indent(
        &self,
        diagnostics: &mut Diagnostics,
        comment: &DocComment<'_>,
        tags: &[&jsdoc_grammar::Tag],
    ) {
        if self.options.disable_wrap_indent {
            return;
        }

        let expected = &self.options.wrap_indent;
        for tag in tags {
            let lines = comment.block().lines_of(tag);
            for (i, line) in lines.iter().enumerate().skip(1) {
                let tokens = &line.tokens;
                if tokens.description.is_empty() || !tokens.ty.is_empty() || !tokens.name.is_empty()
                {
                    continue;
                }

                let mut chars = tokens.post_delimiter.chars();
                let first = chars.next();
                if chars.as_str() == expected {
                    continue;
                }

                let index = tag.first_line() + i;
                let mut block = comment.block().clone();
                block.source[index].tokens.post_delimiter =
                    first.map(String::from).unwrap_or_default() + expected;
                diagnostics.add(wrap_indent(
                    comment.line_span(index),
                    comment.replace_with(&block),
                ));
                return;
            }
        }
    }
}

impl Rule for CheckLineAlignmentRule {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Ensures the columns of tag lines are aligned, or not, as configured."
    }

    fn explanation(&self) -> &'static str {
        "With `alignment = \"always\"`, the tag, type, name and description of the configured \
         tags must start in the same columns on every line of a multi-line comment. With \
         `\"never\"`, they must be separated by the configured spacing (a single space by \
         default). With either `\"never\"` or `\"any\"`, wrapped lines of a tag must be indented \
         with the configured wrap indent."
    }

    fn tags(&self) -> TagSet {
        TagSet::new(&[Tag::Spacing])
    }

    fn related_rules(&self) -> &[&'static str] {
        &["CheckAlignment", "RequireHyphenBeforeParamDescription"]
    }

    fn doc_comment(&mut self, diagnostics: &mut Diagnostics, comment: &DocComment<'_>) {
        let config = match &self.config {
            Ok(config) => config,
            Err(e) => {
                diagnostics.add_settings_problem(e, comment.line_span(0));
                return;
            }
        };

        if self.options.alignment == Alignment::Always {
            self.check_aligned(config, diagnostics, comment);
            return;
        }

        let tags: Vec<_> = comment
            .block()
            .tags
            .iter()
            .filter(|t| self.options.tags.contains(&t.tag))
            .collect();

        if self.options.alignment == Alignment::Never {
            for tag in &tags {
                self.check_not_aligned(diagnostics, comment, tag);
            }
        }

        self.check_wrap_indent(diagnostics, comment, &tags);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::Settings;
    use crate::rules::test::fix;
    use crate::rules::test::lint;
    use crate::rules::test::messages;

    /// Creates the rule with the given alignment.
    fn rule(alignment: Alignment) -> CheckLineAlignmentRule {
        CheckLineAlignmentRule::new(CheckLineAlignmentOptions {
            alignment,
            ..Default::default()
        })
    }

    #[test]
    fn always() {
        let source = "/**\n * Desc.\n *\n * @param {string} lorem Description.\n * @param {int} sit Description multi words.\n */\n";
        let diagnostics = lint(rule(Alignment::Always), Settings::default(), source);
        assert_eq!(
            messages(&diagnostics),
            ["Expected JSDoc block lines to be aligned."]
        );
        assert_eq!(
            fix(rule(Alignment::Always), Settings::default(), source),
            "/**\n * Desc.\n *\n * @param {string} lorem Description.\n * @param {int}    sit   Description multi words.\n */\n"
        );
        assert!(lint(rule(Alignment::Always), Settings::default(), "/** @param {string} a b */").is_empty());
    }

    #[test]
    fn never() {
        let source = "/**\n * @param {string}  lorem Description.\n * @param {int} sit -   Desc.\n * @returns {string} Ok.\n */\n";
        let diagnostics = lint(rule(Alignment::Never), Settings::default(), source);
        assert_eq!(
            messages(&diagnostics),
            [
                "Expected JSDoc block lines to not be aligned.",
                "Expected JSDoc block lines to not be aligned."
            ]
        );
        assert_eq!(
            fix(rule(Alignment::Never), Settings::default(), source),
            "/**\n * @param {string} lorem Description.\n * @param {int} sit - Desc.\n * @returns {string} Ok.\n */\n"
        );
    }

    #[test]
    fn never_without_a_type() {
        let source = "/**\n * @param  lorem   Description.\n */\n";
        assert_eq!(
            fix(rule(Alignment::Never), Settings::default(), source),
            "/**\n * @param lorem Description.\n */\n"
        );
    }

    #[test]
    fn wrap_indent() {
        let options = CheckLineAlignmentOptions {
            wrap_indent: "  ".to_string(),
            ..Default::default()
        };
        let source = "/**\n * @param {string} lorem Description\n * continues here.\n */\n";
        let diagnostics = lint(
            CheckLineAlignmentRule::new(options.clone()),
            Settings::default(),
            source,
        );
        assert_eq!(messages(&diagnostics), ["Expected wrap indent"]);
        assert_eq!(
            fix(CheckLineAlignmentRule::new(options), Settings::default(), source),
            "/**\n * @param {string} lorem Description\n *   continues here.\n */\n"
        );
    }

    #[test]
    fn invalid_wrap_indent() {
        let rule = CheckLineAlignmentRule::new(CheckLineAlignmentOptions {
            wrap_indent: "->".to_string(),
            ..Default::default()
        });
        let diagnostics = lint(rule, Settings::default(), "/** a */\n/** b */\n");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].rule(), Some(crate::SETTINGS_RULE_ID));
    }
}
