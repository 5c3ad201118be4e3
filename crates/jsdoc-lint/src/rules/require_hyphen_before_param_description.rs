//! A lint rule for the hyphen separating a tag's name from its description.

use indexmap::IndexMap;
use indexmap::IndexSet;
use jsdoc_grammar::tag_names::preferred_tag_name;
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

/// The identifier for the require hyphen before param description rule.
const ID: &str = "RequireHyphenBeforeParamDescription";

/// Whether a description must start with a hyphen.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Usage {
    /// Descriptions must start with a hyphen.
    #[default]
    Always,
    /// Descriptions must not start with a hyphen.
    Never,
}

/// The options of the [`RequireHyphenBeforeParamDescriptionRule`].
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct RequireHyphenBeforeParamDescriptionOptions {
    /// The usage for `@param` descriptions.
    pub usage: Usage,
    /// The usage for the descriptions of other tags.
    ///
    /// The key `*` applies to every tag not named otherwise.
    pub tags: IndexMap<String, Usage>,
}

/// Creates a "missing hyphen" diagnostic.
fn missing_hyphen(tag: &str, span: Span, replacement: Replacement) -> Diagnostic {
    Diagnostic::warning(format!("There must be a hyphen before @{tag} description."))
        .with_rule(ID)
        .with_highlight(span)
        .with_fix("add `- ` before the description")
        .with_replacement(replacement)
}

/// Creates an "unexpected hyphen" diagnostic.
fn unexpected_hyphen(tag: &str, span: Span, replacement: Replacement) -> Diagnostic {
    Diagnostic::warning(format!("There must be no hyphen before @{tag} description."))
        .with_rule(ID)
        .with_highlight(span)
        .with_fix("remove the hyphen before the description")
        .with_replacement(replacement)
}

/// Detects tag descriptions with, or without, a leading hyphen.
#[derive(Debug)]
pub struct RequireHyphenBeforeParamDescriptionRule {
    /// The options of the rule.
    options: RequireHyphenBeforeParamDescriptionOptions,
}

impl RequireHyphenBeforeParamDescriptionRule {
    /// Creates the rule with the given options.
    pub fn new(options: RequireHyphenBeforeParamDescriptionOptions) -> Self {
        Self { options }
    }

    /// Checks every tag spelled as the preferred name of the given tag.
    fn check_preferred(
        &self,
        diagnostics: &mut Diagnostics,
        comment: &DocComment<'_>,
        name: &str,
        usage: Usage,
    ) {
        let preferences = &comment.settings().tag_name_preference;
        let preferred = preferred_tag_name(comment.mode(), name, preferences);
        let Some(target) = preferred.name() else {
            return;
        };

        for tag in comment.block().tags_named(target) {
            check(diagnostics, comment, tag, target, usage);
        }
    }
}

/// Checks the description of a tag.
fn check(
    diagnostics: &mut Diagnostics,
    comment: &DocComment<'_>,
    tag: &jsdoc_grammar::Tag,
    target: &str,
    usage: Usage,
) {
    let description = tag.description.trim();
    if description.is_empty() {
        return;
    }

    let lines = comment.block().lines_of(tag);
    let Some(offset) = lines
        .iter()
        .position(|l| !l.tokens.description.is_empty())
    else {
        return;
    };

    let index = tag.first_line() + offset;
    let mut block = comment.block().clone();
    let fixed = &mut block.source[index].tokens;
    match (usage, description.starts_with('-')) {
        (Usage::Always, false) => {
            fixed.description = format!("- {description}", description = fixed.description);
            diagnostics.add(missing_hyphen(
                target,
                comment.tag_span(tag),
                comment.replace_with(&block),
            ));
        }
        (Usage::Never, true) => {
            let trimmed = fixed.description.trim_start();
            let trimmed = trimmed.strip_prefix('-').unwrap_or(trimmed).trim_start();
            fixed.description = trimmed.to_string();
            diagnostics.add(unexpected_hyphen(
                target,
                comment.line_span(index),
                comment.replace_with(&block),
            ));
        }
        _ => {}
    }
}

impl Rule for RequireHyphenBeforeParamDescriptionRule {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Ensures a hyphen separates a parameter's name from its description, or that none does."
    }

    fn explanation(&self) -> &'static str {
        "A hyphen between the name of a parameter and its description sets the description apart \
         when the two are read together. Whichever convention is chosen should be applied \
         consistently. Other tags may be configured with their own usage, or all of them with \
         the `*` key."
    }

    fn tags(&self) -> TagSet {
        TagSet::new(&[Tag::Style, Tag::Clarity])
    }

    fn related_rules(&self) -> &[&'static str] {
        &["CheckLineAlignment"]
    }

    fn doc_comment(&mut self, diagnostics: &mut Diagnostics, comment: &DocComment<'_>) {
        self.check_preferred(diagnostics, comment, "param", self.options.usage);

        for (name, usage) in &self.options.tags {
            if name != "*" {
                self.check_preferred(diagnostics, comment, name, *usage);
                continue;
            }

            let preferences = &comment.settings().tag_name_preference;
            let param = preferred_tag_name(comment.mode(), "param", preferences);
            let others: IndexSet<&str> = comment
                .block()
                .tags
                .iter()
                .map(|t| t.tag.as_str())
                .filter(|t| Some(*t) != param.name() && !self.options.tags.contains_key(*t))
                .collect();

            for other in others {
                self.check_preferred(diagnostics, comment, other, *usage);
            }
        }
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

    /// Creates the rule with the given usage and tag usages.
    fn rule(usage: Usage, tags: &[(&str, Usage)]) -> RequireHyphenBeforeParamDescriptionRule {
        RequireHyphenBeforeParamDescriptionRule::new(RequireHyphenBeforeParamDescriptionOptions {
            usage,
            tags: tags.iter().map(|(t, u)| (t.to_string(), *u)).collect(),
        })
    }

    #[test]
    fn always() {
        let source = "/**\n * @param foo Foo.\n * @param bar - Bar.\n * @param baz\n */";
        let diagnostics = lint(rule(Usage::Always, &[]), Settings::default(), source);
        assert_eq!(
            messages(&diagnostics),
            ["There must be a hyphen before @param description."]
        );
        assert_eq!(
            fix(rule(Usage::Always, &[]), Settings::default(), source),
            "/**\n * @param foo - Foo.\n * @param bar - Bar.\n * @param baz\n */"
        );
    }

    #[test]
    fn single_line() {
        assert_eq!(
            fix(
                rule(Usage::Always, &[]),
                Settings::default(),
                "/** @param foo Foo. */"
            ),
            "/** @param foo - Foo. */"
        );
    }

    #[test]
    fn never() {
        let source = "/**\n * @param foo -  Foo.\n */";
        let diagnostics = lint(rule(Usage::Never, &[]), Settings::default(), source);
        assert_eq!(
            messages(&diagnostics),
            ["There must be no hyphen before @param description."]
        );
        assert_eq!(
            fix(rule(Usage::Never, &[]), Settings::default(), source),
            "/**\n * @param foo Foo.\n */"
        );
    }

    #[test]
    fn preferred_tag_names() {
        let settings: Settings = toml::from_str("[tag-name-preference]\nparam = \"arg\"\n").unwrap();
        let source = "/**\n * @arg foo Foo.\n */";
        let diagnostics = lint(rule(Usage::Always, &[]), settings, source);
        assert_eq!(
            messages(&diagnostics),
            ["There must be a hyphen before @arg description."]
        );
    }

    #[test]
    fn other_tags() {
        let source = "/**\n * @param foo - Foo.\n * @returns - The value.\n * @throws Error Oops.\n */";
        let diagnostics = lint(
            rule(Usage::Always, &[("returns", Usage::Never), ("*", Usage::Always)]),
            Settings::default(),
            source,
        );
        assert_eq!(
            messages(&diagnostics),
            [
                "There must be no hyphen before @returns description.",
                "There must be a hyphen before @throws description."
            ]
        );
    }
}
