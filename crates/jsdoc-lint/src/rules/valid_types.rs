//! A lint rule for the syntax of types, names and namepaths.

use std::sync::LazyLock;

use jsdoc_grammar::InlineTag;
use jsdoc_grammar::Mode;
use jsdoc_grammar::TriState;
use jsdoc_grammar::parse_template_names;
use jsdoc_types::ObjectField;
use jsdoc_types::Position;
use jsdoc_types::TypeNode;
use jsdoc_types::traverse;
use regex::Regex;
use serde::Deserialize;
use serde::Serialize;

use crate::Diagnostic;
use crate::Diagnostics;
use crate::DocComment;
use crate::Span;
use crate::Tag;
use crate::TagSet;
use crate::rules::Rule;

/// The identifier for the valid types rule.
const ID: &str = "ValidTypes";

/// The inline tags that must have content.
const LINK_TAGS: &[&str] = &["link", "linkcode", "linkplain", "tutorial"];

/// Keywords accepted as namepaths.
const KEYWORDS: &[&str] = &["typeof", "readonly", "import", "is"];

/// The tags whose name may be omitted even though it is required.
const OPTIONAL_NAME_TAGS: &[&str] = &["param", "arg", "argument", "property", "prop"];

/// The diagnostic groups of the Closure Compiler that may be suppressed.
const SUPPRESS_TYPES: &[&str] = &[
    "accessControls",
    "checkDebuggerStatement",
    "checkPrototypalTypes",
    "checkRegExp",
    "checkTypes",
    "checkVars",
    "closureDepMethodUsageChecks",
    "const",
    "constantProperty",
    "deprecated",
    "duplicate",
    "es5Strict",
    "externsValidation",
    "extraProvide",
    "extraRequire",
    "globalThis",
    "invalidCasts",
    "lateProvide",
    "legacyGoogScopeRequire",
    "lintChecks",
    "messageConventions",
    "misplacedTypeAnnotation",
    "missingOverride",
    "missingPolyfill",
    "missingProperties",
    "missingProvide",
    "missingRequire",
    "missingSourcesWarnings",
    "moduleLoad",
    "nonStandardJsDocs",
    "partialAlias",
    "polymer",
    "reportUnknownTypes",
    "strictMissingProperties",
    "strictModuleDepCheck",
    "strictPrimitiveOperators",
    "suspiciousCode",
    "switch",
    "transitionalSuspiciousCodeWarnings",
    "undefinedNames",
    "undefinedVars",
    "underscore",
    "unknownDefines",
    "untranspilableFeatures",
    "unusedLocalVariables",
    "unusedPrivateMembers",
    "useOfGoogProvide",
    "uselessCode",
    "visibility",
    "with",
];

/// Matches the `as` of a `@borrows` description.
static AS_EXPRESSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"as\s+").expect("as pattern should compile"));

/// The options of the [`ValidTypesRule`].
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct ValidTypesOptions {
    /// Whether tags that require a namepath may omit it.
    pub allow_empty_namepaths: bool,
}

/// Determines if a namepath parses.
fn parses(namepath: &str) -> bool {
    jsdoc_types::try_parse(namepath).is_ok()
}

/// Determines if a namepath is valid for the given tag.
fn is_valid_namepath(namepath: &str, tag: Option<&str>) -> bool {
    if parses(namepath) || KEYWORDS.contains(&namepath) {
        return true;
    }

    match tag {
        Some("requires" | "module") => {
            !namepath.starts_with("module:") && parses(&format!("module:{namepath}"))
        }
        Some("memberof" | "memberof!") => namepath
            .strip_suffix(['#', '.', '~'])
            .is_some_and(parses),
        Some("borrows") => namepath.strip_prefix(['#', '.', '~']).is_some_and(parses),
        _ => false,
    }
}

/// Gets the mode suffix of a message for an allowance.
fn allowance_info(allowance: TriState, mode: Mode) -> String {
    match allowance {
        TriState::Never => String::new(),
        _ => format!(" in \"{mode}\" mode", mode = mode.as_str()),
    }
}

/// Gets the mode suffix of a message for a requirement.
fn requirement_info(requirement: TriState, mode: Mode) -> String {
    match requirement {
        TriState::Always => String::new(),
        _ => format!(" in \"{mode}\" mode", mode = mode.as_str()),
    }
}

/// Determines if an inline link tag has neither a target nor text.
fn is_empty_link(inline: &InlineTag) -> bool {
    LINK_TAGS.contains(&inline.tag.as_str())
        && inline.text.is_empty()
        && inline.namepath_or_url.is_empty()
}

/// Creates an "invalid" diagnostic.
fn invalid(message: String, span: Span) -> Diagnostic {
    Diagnostic::warning(message).with_rule(ID).with_highlight(span)
}

/// Reports nullable suffixes on the values of fields and parameters.
///
/// Closure and TypeScript read a trailing `?` there as marking the key
/// optional.
fn check_nullable_values(diagnostics: &mut Diagnostics, root: &TypeNode, span: Span) {
    traverse(root, |visit| {
        let right = match visit.node {
            TypeNode::KeyValue {
                right: Some(right), ..
            } => Some(right.as_ref()),
            TypeNode::Object(fields, _) => {
                for field in fields {
                    if let ObjectField::KeyValue {
                        right: Some(right @ TypeNode::Nullable(_, Position::Suffix)),
                        ..
                    } = field
                    {
                        diagnostics.add(invalid(
                            format!(
                                "Syntax error in type: {right}",
                                right = jsdoc_types::stringify(right)
                            ),
                            span,
                        ));
                    }
                }
                None
            }
            _ => None,
        };

        if let Some(right @ TypeNode::Nullable(_, Position::Suffix)) = right {
            diagnostics.add(invalid(
                format!(
                    "Syntax error in type: {right}",
                    right = jsdoc_types::stringify(right)
                ),
                span,
            ));
        }
    });
}

/// Detects malformed types, names and namepaths.
#[derive(Debug)]
pub struct ValidTypesRule {
    /// The options of the rule.
    options: ValidTypesOptions,
}

impl ValidTypesRule {
    /// Creates the rule with the given options.
    pub fn new(options: ValidTypesOptions) -> Self {
        Self { options }
    }

    /// Checks one tag.
    fn check_tag(
        &self,
        diagnostics: &mut Diagnostics,
        comment: &DocComment<'_>,
        tag: &jsdoc_grammar::Tag,
    ) {
        let span = comment.tag_span(tag);
        let grammar = comment.grammar();
        let mode = comment.mode();
        let name = tag.tag.as_str();
        let allow_empty = self.options.allow_empty_namepaths;

        let namepath = |diagnostics: &mut Diagnostics, path: &str, tag: Option<&str>| {
            let valid = is_valid_namepath(path, tag);
            if !valid {
                diagnostics.add(invalid(format!("Syntax error in namepath: {path}"), span));
            }
            valid
        };

        if !tag.problems.is_empty() {
            let problems: Vec<&str> = tag.problems.iter().map(|p| p.message()).collect();
            diagnostics.add(invalid(
                format!("Invalid name: {problems}", problems = problems.join("; ")),
                span,
            ));
            return;
        }

        if name == "import" {
            let mut statement = String::from("import ");
            if !tag.ty.is_empty() {
                statement.push_str(&format!("{{{ty}}} ", ty = tag.ty));
            }
            statement.push_str(&tag.name);
            if !tag.description.is_empty() {
                statement.push(' ');
                statement.push_str(&tag.description);
            }

            if comment.imports().resolve(&statement).is_none() {
                diagnostics.add(invalid("Bad @import tag".to_string(), span));
            }
            return;
        }

        if name == "borrows" {
            let this = AS_EXPRESSION.replace(&tag.description, "");
            let this = this.trim();
            if !AS_EXPRESSION.is_match(&tag.description) || this.is_empty() {
                diagnostics.add(invalid(
                    format!(
                        "@borrows must have an \"as\" expression. Found \"{description}\"",
                        description = tag.description
                    ),
                    span,
                ));
                return;
            }

            if namepath(diagnostics, this, Some("borrows")) {
                namepath(diagnostics, &tag.name, None);
            }
            return;
        }

        if name == "suppress" && mode == Mode::Closure {
            if let Ok(root) = jsdoc_types::try_parse(&tag.ty) {
                traverse(&root, |visit| {
                    let value = match visit.node {
                        TypeNode::Name(value)
                        | TypeNode::StringValue(value, _)
                        | TypeNode::SpecialName(_, value) => value,
                        _ => return,
                    };

                    if !SUPPRESS_TYPES.contains(&value.as_str()) {
                        diagnostics.add(invalid(
                            format!("Syntax error in suppress type: {value}"),
                            span,
                        ));
                    }
                });
            }
        }

        let might_have_name = grammar.might_have_name(name);
        if !might_have_name.is_always() && !tag.name.is_empty() {
            diagnostics.add(invalid(
                format!(
                    "@{name} should not have a name{info}.",
                    info = allowance_info(might_have_name, mode)
                ),
                span,
            ));
            return;
        }

        let might_have_type = grammar.might_have_type(name);
        if !might_have_type.is_always() && !tag.ty.is_empty() {
            diagnostics.add(invalid(
                format!(
                    "@{name} should not have a bracketed type{info}.",
                    info = allowance_info(might_have_type, mode)
                ),
                span,
            ));
            return;
        }

        let must_have_name = grammar.must_have_name(name);
        if !must_have_name.is_never()
            && tag.name.is_empty()
            && !allow_empty
            && !OPTIONAL_NAME_TAGS.contains(&name)
            && (name != "see" || !tag.description.contains("{@link"))
        {
            diagnostics.add(invalid(
                format!(
                    "Tag @{name} must have a name/namepath{info}.",
                    info = requirement_info(must_have_name, mode)
                ),
                span,
            ));
            return;
        }

        let must_have_type = grammar.must_have_type(name);
        if !must_have_type.is_never() && tag.ty.is_empty() {
            diagnostics.add(invalid(
                format!(
                    "Tag @{name} must have a type{info}.",
                    info = requirement_info(must_have_type, mode)
                ),
                span,
            ));
            return;
        }

        let missing = grammar.missing_required_type_or_namepath(tag);
        if !missing.is_never() && !allow_empty {
            diagnostics.add(invalid(
                format!(
                    "Tag @{name} must have either a type or namepath{info}.",
                    info = requirement_info(missing, mode)
                ),
                span,
            ));
            return;
        }

        if might_have_type.is_always() && !tag.ty.is_empty() {
            let parsed = match mode {
                Mode::Permissive => jsdoc_types::try_parse(&tag.ty),
                mode => jsdoc_types::parse(&tag.ty, mode),
            };

            match parsed {
                Ok(root) => {
                    if matches!(mode, Mode::Closure | Mode::Typescript) {
                        check_nullable_values(diagnostics, &root, span);
                    }
                }
                Err(_) => {
                    diagnostics.add(invalid(format!("Syntax error in type: {}", tag.ty), span))
                }
            }
        }

        if (!must_have_name.is_never() || grammar.might_have_namepath(name))
            && !tag.name.is_empty()
        {
            if mode != Mode::Jsdoc && name == "template" {
                for template in parse_template_names(&tag.name) {
                    namepath(diagnostics, &template, None);
                }
            } else {
                namepath(diagnostics, &tag.name, Some(name));
            }
        }

        for inline in tag.inline_tags.iter().filter(|t| is_empty_link(t)) {
            diagnostics.add(invalid(
                format!("Inline tag \"{tag}\" missing content", tag = inline.tag),
                span,
            ));
        }
    }
}

impl Rule for ValidTypesRule {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Ensures types, names and namepaths are free of syntax errors."
    }

    fn explanation(&self) -> &'static str {
        "Each tag is checked against the tag grammar of the current mode: tags that may not \
         carry a name or a type must not have one, and tags that require one must have it. \
         Types must parse in the current mode, and names and namepaths must parse as \
         namepaths. Inline link tags must have a target or text."
    }

    fn tags(&self) -> TagSet {
        TagSet::new(&[Tag::Correctness])
    }

    fn related_rules(&self) -> &[&'static str] {
        &["CheckTypes", "CheckTagNames"]
    }

    fn doc_comment(&mut self, diagnostics: &mut Diagnostics, comment: &DocComment<'_>) {
        for tag in &comment.block().tags {
            self.check_tag(diagnostics, comment, tag);
        }

        for inline in comment.block().inline_tags.iter().filter(|t| is_empty_link(t)) {
            diagnostics.add(invalid(
                format!("Inline tag \"{tag}\" missing content", tag = inline.tag),
                comment.line_span(0),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::Settings;
    use crate::rules::test::lint;
    use crate::rules::test::messages;

    /// Creates the rule with the default options.
    fn rule() -> ValidTypesRule {
        ValidTypesRule::new(ValidTypesOptions::default())
    }

    /// Lints a source in the given mode and gets the messages.
    fn check(mode: Mode, source: &str) -> Vec<String> {
        messages(&lint(rule(), Settings::with_mode(mode), source))
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn valid() {
        for source in [
            "/**\n * @param {string} foo - The foo.\n * @returns {Array<number>}\n */",
            "/** @borrows foo as bar */",
            "/** @memberof Foo# */",
            "/** @requires foo/bar */",
            "/** @see {@link Foo} */",
            "/** @param foo */",
            "/** See {@link Foo}. */",
        ] {
            assert!(
                check(Mode::Jsdoc, source).is_empty(),
                "`{source}` should be valid"
            );
        }
    }

    #[test]
    fn type_syntax() {
        assert_eq!(
            check(Mode::Jsdoc, "/** @param {Array<string} foo */"),
            ["Syntax error in type: Array<string"]
        );
        assert_eq!(
            check(Mode::Closure, "/** @param {{a: string?}} foo */"),
            ["Syntax error in type: string?"]
        );

        let deep = format!("{}string{}", "Array<".repeat(5_000), ">".repeat(5_000));
        let found = check(Mode::Jsdoc, &format!("/** @param {{{deep}}} foo */"));
        assert_eq!(found, [format!("Syntax error in type: {deep}")]);
    }

    #[test]
    fn namepath_syntax() {
        assert_eq!(
            check(Mode::Jsdoc, "/** @callback foo^bar */"),
            ["Syntax error in namepath: foo^bar"]
        );
    }

    #[test]
    fn positions() {
        assert_eq!(
            check(Mode::Jsdoc, "/** @internal foo */"),
            ["@internal should not have a name."]
        );
        assert_eq!(
            check(Mode::Jsdoc, "/** @emits {string} foo */"),
            ["@emits should not have a bracketed type."]
        );
        assert_eq!(
            check(Mode::Jsdoc, "/** @export {Foo} */"),
            ["@export should not have a bracketed type in \"jsdoc\" mode."]
        );
        assert_eq!(
            check(Mode::Jsdoc, "/** @callback */"),
            ["Tag @callback must have a name/namepath."]
        );
        assert_eq!(
            check(Mode::Jsdoc, "/** @type */"),
            ["Tag @type must have a type."]
        );
        assert_eq!(
            check(Mode::Jsdoc, "/** @mixes */"),
            ["Tag @mixes must have either a type or namepath."]
        );
    }

    #[test]
    fn empty_namepaths() {
        let rule = ValidTypesRule::new(ValidTypesOptions {
            allow_empty_namepaths: true,
        });
        assert!(lint(rule, Settings::default(), "/** @callback */").is_empty());
    }

    #[test]
    fn borrows() {
        assert_eq!(
            check(Mode::Jsdoc, "/** @borrows foo */"),
            ["@borrows must have an \"as\" expression. Found \"\""]
        );
        assert_eq!(
            check(Mode::Jsdoc, "/** @borrows foo as */"),
            ["@borrows must have an \"as\" expression. Found \"as\""]
        );
    }

    #[test]
    fn suppress() {
        assert_eq!(
            check(Mode::Closure, "/** @suppress {visibility|foo} */"),
            ["Syntax error in suppress type: foo"]
        );
    }

    #[test]
    fn imports() {
        assert!(check(Mode::Typescript, "/** @import {Foo} from \"./foo\" */").is_empty());
        assert_eq!(
            check(Mode::Typescript, "/** @import Foo */"),
            ["Bad @import tag"]
        );
    }

    #[test]
    fn inline_tags() {
        assert_eq!(
            check(Mode::Jsdoc, "/**\n * See {@link}.\n * @param foo See {@link}.\n */"),
            [
                "Inline tag \"link\" missing content",
                "Inline tag \"link\" missing content"
            ]
        );
    }

    #[test]
    fn name_problems() {
        let messages = check(Mode::Jsdoc, "/** @param [foo */");
        assert_eq!(messages, ["Invalid name: unpaired brackets"]);
    }
}
