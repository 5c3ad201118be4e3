//! A lint rule for unknown, blocked and non-preferred tag names.

use jsdoc_grammar::Block;
use jsdoc_grammar::Line;
use jsdoc_grammar::tag_names::PreferredTagName;
use jsdoc_grammar::tag_names::is_valid_tag;
use jsdoc_grammar::tag_names::preferred_tag_name;
use jsdoc_grammar::tag_names::tag_names;
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
use crate::settings::INVALID_TAG_NAME_PREFERENCE;
use crate::util::closest;

/// The identifier for the check tag names rule.
const ID: &str = "CheckTagNames";

/// The tags of JSX pragmas.
const JSX_TAGS: &[&str] = &["jsx", "jsxFrag", "jsxImportSource", "jsxRuntime"];

/// The tags a type system always makes redundant.
const ALWAYS_REDUNDANT_WHEN_TYPED: &[&str] = &[
    "augments",
    "callback",
    "class",
    "enum",
    "implements",
    "private",
    "property",
    "protected",
    "public",
    "readonly",
    "this",
    "type",
    "typedef",
];

/// The tags a type system makes redundant unless they have a name.
const REDUNDANT_WHEN_TYPED_WITHOUT_NAME: &[&str] = &["template"];

/// The tags a type system makes redundant outside of ambient contexts.
const REDUNDANT_WHEN_TYPED_OUTSIDE_AMBIENT: &[&str] = &[
    "abstract",
    "access",
    "class",
    "constant",
    "constructs",
    "default",
    "enum",
    "export",
    "exports",
    "function",
    "global",
    "inherits",
    "instance",
    "interface",
    "member",
    "memberof",
    "memberOf",
    "method",
    "mixes",
    "mixin",
    "module",
    "name",
    "namespace",
    "override",
    "property",
    "requires",
    "static",
    "this",
];

/// The options of the [`CheckTagNamesRule`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct CheckTagNamesOptions {
    /// Additional tag names to accept.
    pub defined_tags: Vec<String>,
    /// Whether redundant tags are removed when fixing.
    pub enable_fixer: bool,
    /// Whether JSX pragma tags are accepted.
    pub jsx_tags: bool,
    /// Whether the comments document code checked by a type system.
    pub typed: bool,
}

impl Default for CheckTagNamesOptions {
    fn default() -> Self {
        Self {
            defined_tags: Vec::new(),
            enable_fixer: true,
            jsx_tags: false,
            typed: false,
        }
    }
}

/// Creates an "invalid tag name" diagnostic.
fn invalid_tag_name(name: &str, span: Span, suggestion: Option<&str>) -> Diagnostic {
    let diagnostic = Diagnostic::warning(format!("Invalid JSDoc tag name \"{name}\"."))
        .with_rule(ID)
        .with_highlight(span);
    match suggestion {
        Some(s) => diagnostic.with_fix(format!("did you mean `@{s}`?")),
        None => diagnostic,
    }
}

/// Creates a "blocked tag" diagnostic.
fn blocked_tag(name: &str, message: Option<&str>, span: Span) -> Diagnostic {
    let message = match message {
        Some(message) => message.to_string(),
        None => format!("Blacklisted tag found (`@{name}`)"),
    };
    Diagnostic::warning(message)
        .with_rule(ID)
        .with_highlight(span)
        .with_fix("remove the tag")
}

/// Creates a "non-preferred tag name" diagnostic.
fn non_preferred_tag_name(
    name: &str,
    preferred: &str,
    message: Option<&str>,
    span: Span,
    replacement: Replacement,
) -> Diagnostic {
    let message = match message {
        Some(message) => message.to_string(),
        None => format!(
            "Invalid JSDoc tag (preference). Replace \"{name}\" JSDoc tag with \"{preferred}\"."
        ),
    };
    Diagnostic::warning(message)
        .with_rule(ID)
        .with_highlight(span)
        .with_fix(format!("replace `@{name}` with `@{preferred}`"))
        .with_replacement(replacement)
}

/// Removes a tag from a block.
///
/// The opening and closing lines are kept with their content cleared.
fn remove_tag(block: &Block, tag: &jsdoc_grammar::Tag) -> Block {
    let source: Vec<Line> = block
        .source
        .iter()
        .enumerate()
        .filter_map(|(i, line)| {
            if !tag.lines.contains(&i) {
                return Some(line.clone());
            }

            if !line.is_opening() && !line.is_closing() {
                return None;
            }

            let mut line = line.clone();
            let is_opening = line.is_opening();
            let tokens = &mut line.tokens;
            if !is_opening {
                tokens.delimiter.clear();
            }
            for token in [
                &mut tokens.post_delimiter,
                &mut tokens.tag,
                &mut tokens.post_tag,
                &mut tokens.ty,
                &mut tokens.post_type,
                &mut tokens.name,
                &mut tokens.post_name,
                &mut tokens.description,
            ] {
                token.clear();
            }
            Some(line)
        })
        .collect();

    Block {
        source,
        ..block.clone()
    }
}

/// Detects tags that are unknown, blocked, spelled other than preferred, or
/// redundant when a type system is in use.
#[derive(Debug)]
pub struct CheckTagNamesRule {
    /// The options of the rule.
    options: CheckTagNamesOptions,
}

impl CheckTagNamesRule {
    /// Creates the rule with the given options.
    pub fn new(options: CheckTagNamesOptions) -> Self {
        Self { options }
    }

    /// Reports a tag made redundant by a type system.
    fn redundant(
        &self,
        diagnostics: &mut Diagnostics,
        comment: &DocComment<'_>,
        tag: &jsdoc_grammar::Tag,
        message: String,
        remove_tag_token: bool,
    ) {
        let mut diagnostic = Diagnostic::warning(message)
            .with_rule(ID)
            .with_highlight(comment.tag_span(tag))
            .with_fix("remove the tag");

        if self.options.enable_fixer {
            let block = comment.block();
            let replacement = if !tag.description.trim().is_empty() {
                let mut block = block.clone();
                let tokens = &mut block.source[tag.first_line()].tokens;
                tokens.ty.clear();
                tokens.post_type.clear();
                if remove_tag_token {
                    tokens.tag.clear();
                    tokens.post_tag.clear();
                }
                comment.replace_with(&block)
            } else if block.tags.len() == 1 && block.description.trim().is_empty() {
                comment.remove()
            } else {
                comment.replace_with(&remove_tag(block, tag))
            };
            diagnostic = diagnostic.with_replacement(replacement);
        }

        diagnostics.add(diagnostic);
    }

    /// Checks whether a tag is redundant when a type system is in use.
    ///
    /// Returns `true` if the tag was reported.
    fn check_typed(
        &self,
        diagnostics: &mut Diagnostics,
        comment: &DocComment<'_>,
        tag: &jsdoc_grammar::Tag,
    ) -> bool {
        let name = tag.tag.as_str();
        if ALWAYS_REDUNDANT_WHEN_TYPED.contains(&name) {
            self.redundant(
                diagnostics,
                comment,
                tag,
                format!("'@{name}' is redundant when using a type system."),
                true,
            );
            return true;
        }

        let context = comment.context();
        if REDUNDANT_WHEN_TYPED_OUTSIDE_AMBIENT.contains(&name)
            && name != "default"
            && context.attached
            && !context.ambient
        {
            self.redundant(
                diagnostics,
                comment,
                tag,
                format!(
                    "'@{name}' is redundant outside of ambient (`declare`/`.d.ts`) contexts \
                     when using a type system."
                ),
                false,
            );
            return true;
        }

        if REDUNDANT_WHEN_TYPED_WITHOUT_NAME.contains(&name) && tag.name.is_empty() {
            self.redundant(
                diagnostics,
                comment,
                tag,
                format!("'@{name}' without a name is redundant when using a type system."),
                false,
            );
            return true;
        }

        false
    }
}

impl Rule for CheckTagNamesRule {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Ensures tag names are known and spelled as preferred."
    }

    fn explanation(&self) -> &'static str {
        "Tags not known to the configured mode are usually typos, and tags spelled with an alias \
         (`@arg` for `@param`) make comments inconsistent. Blocked tags may be configured in the \
         `tag-name-preference` settings. When `typed` is set, tags that only repeat what a type \
         system already knows are reported as redundant."
    }

    fn tags(&self) -> TagSet {
        TagSet::new(&[Tag::Naming, Tag::Correctness])
    }

    fn related_rules(&self) -> &[&'static str] {
        &["ValidTypes"]
    }

    fn doc_comment(&mut self, diagnostics: &mut Diagnostics, comment: &DocComment<'_>) {
        let settings = comment.settings();
        let mode = comment.mode();
        if settings.has_invalid_tag_name_preference() {
            diagnostics.add_settings_problem(INVALID_TAG_NAME_PREFERENCE, comment.line_span(0));
        }

        let mut valid: Vec<&str> = self.options.defined_tags.iter().map(String::as_str).collect();
        valid.extend(settings.preferred_tag_names());
        valid.extend(
            settings
                .tag_name_preference
                .keys()
                .map(|k| k.strip_prefix("tag ").unwrap_or(k)),
        );
        valid.extend(settings.structured_tags.keys().map(String::as_str));
        if self.options.typed {
            valid.extend(REDUNDANT_WHEN_TYPED_WITHOUT_NAME);
        }

        for tag in &comment.block().tags {
            let name = tag.tag.as_str();
            if self.options.jsx_tags && JSX_TAGS.contains(&name) {
                continue;
            }

            if self.options.typed && self.check_typed(diagnostics, comment, tag) {
                continue;
            }

            if !is_valid_tag(mode, name, &valid) {
                let candidates = tag_names(mode)
                    .iter()
                    .flat_map(|(canonical, aliases)| {
                        std::iter::once(*canonical).chain(aliases.iter().copied())
                    })
                    .chain(valid.iter().copied());
                diagnostics.add(invalid_tag_name(
                    name,
                    comment.tag_span(tag),
                    closest(name, candidates),
                ));
                continue;
            }

            let (preferred, message) =
                match preferred_tag_name(mode, name, &settings.tag_name_preference) {
                    PreferredTagName::Blocked { message } => {
                        diagnostics.add(blocked_tag(name, message, comment.tag_span(tag)));
                        continue;
                    }
                    PreferredTagName::Name(preferred) => (preferred, None),
                    PreferredTagName::Custom {
                        message,
                        replacement,
                    } => (replacement, message),
                };

            if preferred == name {
                continue;
            }

            let mut block = comment.block().clone();
            block.source[tag.first_line()].tokens.tag = format!("@{preferred}");
            diagnostics.add(non_preferred_tag_name(
                name,
                preferred,
                message,
                comment.tag_span(tag),
                comment.replace_with(&block),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::NodeContext;
    use crate::Settings;
    use crate::rules::test::fix;
    use crate::rules::test::lint;
    use crate::rules::test::lint_in;
    use crate::rules::test::messages;

    /// Creates the rule with the default options.
    fn rule() -> CheckTagNamesRule {
        CheckTagNamesRule::new(CheckTagNamesOptions::default())
    }

    /// Creates the rule for typed code.
    fn typed() -> CheckTagNamesRule {
        CheckTagNamesRule::new(CheckTagNamesOptions {
            typed: true,
            ..Default::default()
        })
    }

    #[test]
    fn invalid_names() {
        let diagnostics = lint(rule(), Settings::default(), "/**\n * @parma foo\n * @foo\n */");
        assert_eq!(
            messages(&diagnostics),
            [
                "Invalid JSDoc tag name \"parma\".",
                "Invalid JSDoc tag name \"foo\"."
            ]
        );
        assert_eq!(diagnostics[0].fix(), Some("did you mean `@param`?"));
        assert!(!diagnostics[0].is_fixable());
    }

    #[test]
    fn defined_tags() {
        let rule = CheckTagNamesRule::new(CheckTagNamesOptions {
            defined_tags: vec!["foo".to_string()],
            ..Default::default()
        });
        assert!(lint(rule, Settings::default(), "/** @foo */").is_empty());
    }

    #[test]
    fn preferred_names() {
        let source = "/**\n * @arg foo\n * @return {string}\n */";
        let diagnostics = lint(rule(), Settings::default(), source);
        assert_eq!(
            messages(&diagnostics),
            [
                "Invalid JSDoc tag (preference). Replace \"arg\" JSDoc tag with \"param\".",
                "Invalid JSDoc tag (preference). Replace \"return\" JSDoc tag with \"returns\"."
            ]
        );
        assert_eq!(
            fix(rule(), Settings::default(), source),
            "/**\n * @param foo\n * @returns {string}\n */"
        );
    }

    #[test]
    fn configured_preferences() {
        let settings: Settings = toml::from_str(
            r#"
[tag-name-preference]
todo = false
param = "arg"
abstract = { message = "Use a base class instead.", replacement = "virtual" }
"#,
        )
        .unwrap();
        let source = "/**\n * @todo Fix.\n * @param foo\n * @abstract\n */";
        let diagnostics = lint(rule(), settings, source);
        assert_eq!(
            messages(&diagnostics),
            [
                "Blacklisted tag found (`@todo`)",
                "Invalid JSDoc tag (preference). Replace \"param\" JSDoc tag with \"arg\".",
                "Use a base class instead."
            ]
        );
    }

    #[test]
    fn invalid_preference_setting() {
        let settings: Settings = toml::from_str("[tag-name-preference]\nparam = true\n").unwrap();
        let diagnostics = lint(rule(), settings, "/** @param foo */\n/** @param bar */");
        assert_eq!(messages(&diagnostics), [INVALID_TAG_NAME_PREFERENCE]);
    }

    #[test]
    fn jsx_tags() {
        let rule = CheckTagNamesRule::new(CheckTagNamesOptions {
            jsx_tags: true,
            ..Default::default()
        });
        assert!(lint(rule, Settings::default(), "/** @jsx h */").is_empty());
        assert_eq!(
            messages(&lint(self::rule(), Settings::default(), "/** @jsx h */")),
            ["Invalid JSDoc tag name \"jsx\"."]
        );
    }

    #[test]
    fn typed_tags() {
        let source = "/**\n * @type {string}\n */\nconst a = 1;\n";
        let diagnostics = lint(typed(), Settings::default(), source);
        assert_eq!(
            messages(&diagnostics),
            ["'@type' is redundant when using a type system."]
        );
        assert_eq!(fix(typed(), Settings::default(), source), "const a = 1;\n");

        let source = "/**\n * Desc.\n * @abstract\n */\nclass A {}\n";
        assert_eq!(
            messages(&lint(typed(), Settings::default(), source)),
            ["'@abstract' is redundant outside of ambient (`declare`/`.d.ts`) contexts when using \
              a type system."]
        );
        assert_eq!(
            fix(typed(), Settings::default(), source),
            "/**\n * Desc.\n */\nclass A {}\n"
        );
        assert!(lint_in(typed(), Settings::default(), NodeContext::ambient(), source).is_empty());
        assert!(lint_in(typed(), Settings::default(), NodeContext::detached(), source).is_empty());

        assert_eq!(
            messages(&lint(typed(), Settings::default(), "/** @template */")),
            ["'@template' without a name is redundant when using a type system."]
        );
        assert!(lint(typed(), Settings::default(), "/** @template T */").is_empty());
    }

    #[test]
    fn typed_tags_with_descriptions() {
        let source = "/**\n * @enum {string} The colors.\n */";
        assert_eq!(
            fix(typed(), Settings::default(), source),
            "/**\n * The colors.\n */"
        );
    }
}
