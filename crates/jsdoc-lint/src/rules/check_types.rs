//! A lint rule for type names that are not preferred.
//!
//! Every name in the type expression of a tag is checked against the
//! `preferred-types` settings, the type names permitted by the structured
//! tag settings, and the casing of the native types. Preferred names are
//! rewritten in the parsed expression, which is then written back over the
//! tag's type.

use std::sync::LazyLock;

use indexmap::IndexMap;
use jsdoc_grammar::Mode;
use jsdoc_grammar::structure::TypeSetting;
use jsdoc_types::Brackets;
use jsdoc_types::NodePath;
use jsdoc_types::Property;
use jsdoc_types::TypeNode;
use jsdoc_types::Visit;
use jsdoc_types::traverse;
use regex::Captures;
use regex::Regex;
use serde::Deserialize;
use serde::Serialize;

use crate::Diagnostic;
use crate::Diagnostics;
use crate::DocComment;
use crate::Tag;
use crate::TagSet;
use crate::fix::Replacement;
use crate::rules::Rule;
use crate::settings::INVALID_PREFERRED_TYPES;
use crate::settings::PreferredType;
use crate::util::quoted;

/// The identifier for the check types rule.
const ID: &str = "CheckTypes";

/// The native types whose casing is checked.
const STRICT_NATIVE_TYPES: &[&str] = &[
    "undefined",
    "null",
    "boolean",
    "number",
    "bigint",
    "string",
    "symbol",
    "object",
    "Array",
    "Function",
    "Date",
    "RegExp",
];

/// Matches a placeholder of a custom message.
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*(\w+)\s*\}\}").expect("placeholder pattern should compile")
});

/// The types a tag is exempt from having checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExemptTypes {
    /// `true` exempts every type.
    All(bool),
    /// The exempt types, as written in the tag.
    Types(Vec<String>),
}

/// A tag whose types are not checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExemptTagContext {
    /// The name of the tag.
    pub tag: String,
    /// The exempt types.
    pub types: ExemptTypes,
}

impl ExemptTagContext {
    /// Determines if the context exempts a tag's type.
    fn exempts(&self, tag: &jsdoc_grammar::Tag) -> bool {
        self.tag == tag.tag
            && match &self.types {
                ExemptTypes::All(all) => *all,
                ExemptTypes::Types(types) => types.contains(&tag.ty),
            }
    }
}

/// The options of the [`CheckTypesRule`].
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct CheckTypesOptions {
    /// Whether the casing of native types is left unchecked.
    pub no_defaults: bool,
    /// Whether the names of generics are checked against preferences for
    /// their generic syntax (`Array<>`, `[]`) wherever they appear.
    pub unify_parent_and_child_type_checks: bool,
    /// Tags whose types are not checked.
    pub exempt_tag_contexts: Vec<ExemptTagContext>,
}

/// Gets the info message for `object` or `Object` generics in TypeScript.
fn object_info(upper: bool) -> PreferredType {
    let name = if upper { "Object" } else { "object" };
    PreferredType::Custom {
        message: Some(format!(
            "Use object shorthand or index signatures instead of `{name}`, e.g., `{{[key: \
             string]: string}}`"
        )),
        replacement: None,
        skip_root_checking: false,
    }
}

/// Gets the preferred types with the default preferences for `Object`
/// injected unless any is configured.
fn preferred_types(
    mode: Mode,
    configured: &IndexMap<String, PreferredType>,
) -> IndexMap<String, PreferredType> {
    let inject = !["Object", "object", "object.<>", "Object.<>", "object<>"]
        .iter()
        .any(|k| configured.contains_key(*k));

    let mut preferred = IndexMap::new();
    if inject {
        let name = |s: &str| PreferredType::Name(s.to_string());
        preferred.insert("Object".to_string(), name("object"));
        if mode == Mode::Typescript {
            preferred.insert("object.<>".to_string(), object_info(false));
            preferred.insert("Object.<>".to_string(), object_info(true));
            preferred.insert("object<>".to_string(), object_info(false));
            preferred.insert("Object<>".to_string(), object_info(true));
        } else {
            preferred.insert("object.<>".to_string(), name("Object<>"));
            preferred.insert("Object.<>".to_string(), name("Object<>"));
            preferred.insert("object<>".to_string(), name("Object<>"));
        }
    }

    preferred.extend(configured.iter().map(|(k, v)| (k.clone(), v.clone())));
    preferred
}

/// Determines if a preference is set to a value that is not falsy.
fn is_truthy(preference: Option<&PreferredType>) -> bool {
    match preference {
        None | Some(PreferredType::Enabled(false)) => false,
        Some(PreferredType::Name(name)) => !name.is_empty(),
        Some(_) => true,
    }
}

/// Strips a generic suffix (`.<>`, `<>`, `[]` or `.`) from a type name.
fn strip_generic_suffix(name: &str) -> &str {
    [".<>", "<>", "[]", "."]
        .iter()
        .find_map(|suffix| name.strip_suffix(suffix))
        .unwrap_or(name)
}

/// Gets the bracket style of a parent generic.
fn generic_meta(parent: Option<&TypeNode>) -> Option<(Brackets, bool)> {
    match parent {
        Some(TypeNode::Generic { brackets, dot, .. }) => Some((*brackets, *dot)),
        _ => None,
    }
}

/// A type name that is not preferred.
#[derive(Debug)]
struct InvalidType {
    /// The name as written, or the generic syntax matched.
    bad: String,
    /// The preferred name, if there is one.
    preferred: Option<String>,
    /// A custom message.
    message: Option<String>,
}

/// A rewrite of a name node of the expression.
#[derive(Debug)]
struct Rename {
    /// The path of the node.
    path: NodePath,
    /// The new name.
    value: String,
    /// The new bracket style of the parent generic.
    parent: Option<(NodePath, Brackets, bool)>,
}

/// What was found checking the names of one type expression.
#[derive(Debug, Default)]
struct Findings {
    /// The names that are not preferred.
    invalid: Vec<InvalidType>,
    /// The rewrites making the expression preferred.
    renames: Vec<Rename>,
    /// Whether a preference had the invalid value `true`.
    invalid_setting: bool,
}

/// Checks the names of the type expressions of one comment.
struct Checker<'a> {
    /// The options of the rule.
    options: &'a CheckTypesOptions,
    /// The comment being checked.
    comment: &'a DocComment<'a>,
    /// The preferred types, with injected defaults.
    preferred: IndexMap<String, PreferredType>,
    /// The tags of the comment that may carry a type.
    tags: Vec<&'a jsdoc_grammar::Tag>,
}

impl Checker<'_> {
    /// Finds the preference matching a name.
    ///
    /// Returns whether a preference matches, the key it matched under, and
    /// whether it matched the syntax of the parent generic.
    fn preferred_type_info(
        &self,
        name: &str,
        parent: Option<&TypeNode>,
        property: Option<Property>,
    ) -> (bool, String, bool) {
        let unify = self.options.unify_parent_and_child_type_checks;
        let generic = generic_meta(parent);
        let mut type_name = name.to_string();
        let mut generic_match = false;

        if unify || (generic.is_some() && property == Some(Property::Left)) {
            if let Some((Brackets::Angle, dot)) = generic {
                let postfixes: &[&str] = if dot { &[".", ".<>"] } else { &["<>"] };
                if let Some(postfix) = postfixes
                    .iter()
                    .find(|p| self.preferred.contains_key(&format!("{name}{p}")))
                {
                    type_name.push_str(postfix);
                    generic_match = true;
                }
            }

            if let (false, Some(_), Some((brackets, dot))) = (generic_match, property, generic) {
                let postfixes: &[&str] = match (dot, brackets) {
                    (true, _) => &[".", ".<>"],
                    (false, Brackets::Angle) => &["<>"],
                    (false, Brackets::Square) => &["[]"],
                };
                if let Some(postfix) = postfixes
                    .iter()
                    .find(|p| self.preferred.contains_key(**p))
                {
                    type_name = postfix.to_string();
                    generic_match = true;
                }
            }
        }

        let direct = self.preferred.contains_key(name)
            && !self.preferred.values().any(|v| v.as_name() == Some(name));
        generic_match |= property.is_some() && direct && unify;

        (
            generic_match || (direct && property.is_none()),
            type_name,
            generic_match,
        )
    }

    /// Checks the casing of a native type name.
    fn check_native_type(
        &self,
        name: &str,
        parent: Option<&TypeNode>,
        findings: &mut Findings,
    ) -> Option<String> {
        let object_generic = matches!(
            parent,
            Some(TypeNode::Generic { left, elements, .. })
                if !elements.is_empty() && left.as_name() == Some("Object")
        );

        for native in STRICT_NATIVE_TYPES {
            if *native == "object" && (!is_truthy(self.preferred.get(name)) || object_generic) {
                continue;
            }

            if *native != name
                && native.eq_ignore_ascii_case(name)
                && !self.preferred.contains_key(*native)
            {
                findings.invalid.push(InvalidType {
                    bad: name.to_string(),
                    preferred: Some(native.to_string()),
                    message: None,
                });
                return Some(native.to_string());
            }
        }

        None
    }

    /// Checks one name or `*` node of a tag's type expression.
    fn check_node(
        &self,
        index: usize,
        tag: &jsdoc_grammar::Tag,
        visit: &Visit<'_>,
        findings: &mut Findings,
    ) {
        let (name, is_any) = match visit.node {
            TypeNode::Name(name) => (name.as_str(), false),
            TypeNode::Any => ("*", true),
            _ => return,
        };

        let (matched, type_name, generic_match) =
            self.preferred_type_info(name, visit.parent, visit.property);
        let mut type_node_name = name;
        let mut preferred = None;

        if matched {
            if type_name == "[]" {
                type_node_name = "[]";
            }

            match self.preferred.get(&type_name) {
                Some(PreferredType::Enabled(true)) => {
                    findings.invalid_setting = true;
                    return;
                }
                Some(PreferredType::Name(p)) if !p.is_empty() => {
                    preferred = Some(p.clone());
                    findings.invalid.push(InvalidType {
                        bad: type_node_name.to_string(),
                        preferred: Some(p.clone()),
                        message: None,
                    });
                }
                Some(PreferredType::Custom {
                    message,
                    replacement,
                    skip_root_checking,
                }) => {
                    let skipped = *skip_root_checking
                        && self.tags.get(index + 1).is_some_and(|next| {
                            next.name.starts_with(&format!("{name}.", name = tag.name))
                        });
                    if !skipped {
                        preferred = replacement.clone().filter(|r| !r.is_empty());
                        findings.invalid.push(InvalidType {
                            bad: type_node_name.to_string(),
                            preferred: preferred.clone(),
                            message: message.clone(),
                        });
                    }
                }
                _ => findings.invalid.push(InvalidType {
                    bad: type_node_name.to_string(),
                    preferred: None,
                    message: None,
                }),
            }
        } else if let Some(types) = self
            .comment
            .settings()
            .structured_tags
            .get(&tag.tag)
            .and_then(|s| match &s.ty {
                Some(TypeSetting::Names(types)) => Some(types),
                _ => None,
            })
            .filter(|types| !types.iter().any(|t| t == type_node_name))
        {
            findings.invalid.push(InvalidType {
                bad: type_node_name.to_string(),
                preferred: Some(types.join(",")),
                message: None,
            });
        } else if !self.options.no_defaults && !is_any {
            preferred = self.check_native_type(name, visit.parent, findings);
        }

        let Some(preferred) = preferred else {
            return;
        };

        let mut value = preferred.as_str();
        let mut parent = None;
        if generic_match {
            let meta = generic_meta(visit.parent);
            let change = if preferred == "[]" {
                value = "Array";
                Some((Brackets::Square, false))
            } else if let Some(stripped) = preferred
                .strip_suffix(".<>")
                .or_else(|| preferred.strip_suffix('.'))
            {
                value = stripped;
                Some((Brackets::Angle, true))
            } else if let Some(stripped) = preferred.strip_suffix("<>") {
                value = stripped;
                Some((Brackets::Angle, false))
            } else if matches!(meta, Some((Brackets::Square, _)))
                && (type_node_name == "[]" || type_node_name == "Array")
            {
                Some((Brackets::Angle, false))
            } else {
                None
            };

            if let (Some((brackets, dot)), Some(_), Some(path)) =
                (change, meta, visit.path.parent())
            {
                parent = Some((path, brackets, dot));
            }
        }

        let value = if value.is_empty() {
            type_node_name.to_string()
        } else {
            strip_generic_suffix(value).to_string()
        };

        // A generic match leaves `*` in place
        if is_any && generic_match {
            return;
        }

        findings.renames.push(Rename {
            path: visit.path.clone(),
            value,
            parent,
        });
    }

    /// Checks the type expression of one tag.
    fn check_tag(&self, diagnostics: &mut Diagnostics, index: usize, tag: &jsdoc_grammar::Tag) {
        let mode = self.comment.mode();
        let parsed = match mode {
            Mode::Permissive => jsdoc_types::try_parse(&tag.ty),
            mode => jsdoc_types::parse(&tag.ty, mode),
        };
        let Ok(root) = parsed else {
            return;
        };

        let mut findings = Findings::default();
        traverse(&root, |visit| self.check_node(index, tag, &visit, &mut findings));

        let span = self.comment.tag_span(tag);
        if findings.invalid_setting {
            diagnostics.add_settings_problem(INVALID_PREFERRED_TYPES, span);
        }

        if findings.invalid.is_empty() {
            return;
        }

        let mut fixed = root.clone();
        for rename in &findings.renames {
            if let Some((path, b, d)) = &rename.parent {
                if let Some(TypeNode::Generic { brackets, dot, .. }) = fixed.get_mut(path) {
                    *brackets = *b;
                    *dot = *d;
                }
            }

            if let Some(node) = fixed.get_mut(&rename.path) {
                *node = TypeNode::Name(rename.value.clone());
            }
        }

        let fixed = jsdoc_types::stringify(&fixed);
        let replacement = self
            .comment
            .type_range(tag)
            .filter(|_| fixed != tag.ty)
            .map(|range| Replacement::replace(range, format!("{{{fixed}}}")));

        let tag_value = quoted(&tag.name);
        for invalid in findings.invalid {
            if self.options.exempt_tag_contexts.iter().any(|c| c.exempts(tag)) {
                continue;
            }

            let message = match &invalid.message {
                Some(message) => PLACEHOLDER
                    .replace_all(message, |caps: &Captures<'_>| match &caps[1] {
                        "tagName" => tag.tag.clone(),
                        "tagValue" => tag_value.clone(),
                        _ => caps[0].to_string(),
                    })
                    .into_owned(),
                None => {
                    let prefer = invalid
                        .preferred
                        .as_deref()
                        .map(|p| format!(" Prefer: {p}."))
                        .unwrap_or_default();
                    format!(
                        "Invalid JSDoc @{tag}{tag_value} type \"{bad}\".{prefer}",
                        tag = tag.tag,
                        bad = invalid.bad
                    )
                }
            };

            let mut diagnostic = Diagnostic::warning(message).with_rule(ID).with_highlight(span);
            if let Some(preferred) = &invalid.preferred {
                diagnostic = diagnostic.with_fix(format!("use `{preferred}`"));
                if let Some(replacement) = &replacement {
                    diagnostic = diagnostic.with_replacement(replacement.clone());
                }
            }

            diagnostics.add(diagnostic);
        }
    }
}

/// Detects type names that are not preferred.
#[derive(Debug)]
pub struct CheckTypesRule {
    /// The options of the rule.
    options: CheckTypesOptions,
}

impl CheckTypesRule {
    /// Creates the rule with the given options.
    pub fn new(options: CheckTypesOptions) -> Self {
        Self { options }
    }
}

impl Rule for CheckTypesRule {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Ensures type names are spelled as preferred."
    }

    fn explanation(&self) -> &'static str {
        "Native types should be written with their canonical casing (`string`, not `String`), \
         and type names may be replaced or reported through the `preferred-types` settings. \
         Preferences keyed by a generic syntax (`Array.<>`, `Array<>` or `[]`) also convert \
         between the generic forms."
    }

    fn tags(&self) -> TagSet {
        TagSet::new(&[Tag::Style, Tag::Portability])
    }

    fn related_rules(&self) -> &[&'static str] {
        &["ValidTypes"]
    }

    fn doc_comment(&mut self, diagnostics: &mut Diagnostics, comment: &DocComment<'_>) {
        let grammar = comment.grammar();
        let checker = Checker {
            options: &self.options,
            comment,
            preferred: preferred_types(comment.mode(), &comment.settings().preferred_types),
            tags: comment
                .block()
                .tags
                .iter()
                .filter(|t| grammar.might_have_type(&t.tag).is_always())
                .collect(),
        };

        for (index, tag) in checker.tags.iter().enumerate() {
            checker.check_tag(diagnostics, index, tag);
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

    /// Creates the rule with the default options.
    fn rule() -> CheckTypesRule {
        CheckTypesRule::new(CheckTypesOptions::default())
    }

    /// Parses settings from TOML.
    fn settings(toml: &str) -> Settings {
        toml::from_str(toml).unwrap()
    }

    #[test]
    fn native_types() {
        let source = "/**\n * @param {String} foo\n * @returns {Array.<Number>}\n */";
        let diagnostics = lint(rule(), Settings::default(), source);
        assert_eq!(
            messages(&diagnostics),
            [
                "Invalid JSDoc @param \"foo\" type \"String\". Prefer: string.",
                "Invalid JSDoc @returns type \"Number\". Prefer: number."
            ]
        );
        assert_eq!(
            fix(rule(), Settings::default(), source),
            "/**\n * @param {string} foo\n * @returns {Array.<number>}\n */"
        );
    }

    #[test]
    fn no_defaults() {
        let rule = CheckTypesRule::new(CheckTypesOptions {
            no_defaults: true,
            ..Default::default()
        });
        assert!(lint(rule, Settings::default(), "/** @param {String} foo */").is_empty());
    }

    #[test]
    fn object() {
        let source = "/** @param {Object} foo */";
        assert_eq!(
            messages(&lint(rule(), Settings::default(), source)),
            ["Invalid JSDoc @param \"foo\" type \"Object\". Prefer: object."]
        );
        assert_eq!(
            fix(rule(), Settings::default(), source),
            "/** @param {object} foo */"
        );
        assert!(lint(rule(), Settings::default(), "/** @param {Object<string, number>} foo */").is_empty());

        let diagnostics = lint(
            rule(),
            Settings::with_mode(Mode::Typescript),
            "/** @param {Object<string, number>} foo */",
        );
        assert_eq!(
            messages(&diagnostics),
            ["Use object shorthand or index signatures instead of `Object`, e.g., `{[key: \
              string]: string}`"]
        );
        assert!(!diagnostics[0].is_fixable());
    }

    #[test]
    fn generic_preferences() {
        let settings = settings("[preferred-types]\n\"Array.<>\" = \"[]\"\n");
        let source = "/** @param {Array.<string>} foo */";
        assert_eq!(
            messages(&lint(rule(), settings.clone(), source)),
            ["Invalid JSDoc @param \"foo\" type \"Array\". Prefer: []."]
        );
        assert_eq!(
            fix(rule(), settings, source),
            "/** @param {string[]} foo */"
        );

        let settings = settings_with_square();
        let source = "/** @param {string[]} foo */";
        assert_eq!(
            messages(&lint(rule(), settings.clone(), source)),
            ["Invalid JSDoc @param \"foo\" type \"[]\". Prefer: Array<>."]
        );
        assert_eq!(
            fix(rule(), settings, source),
            "/** @param {Array<string>} foo */"
        );
    }

    #[test]
    fn preferred_generic_base() {
        let source = "/** @param {Object<string, number>} foo */";
        let expected = "/** @param {object<string, number>} foo */";

        // A plain preference only applies to a generic's base when unified
        let plain = settings("[preferred-types]\nObject = \"object\"\n");
        assert!(lint(rule(), plain.clone(), source).is_empty());

        let unified = || {
            CheckTypesRule::new(CheckTypesOptions {
                unify_parent_and_child_type_checks: true,
                ..Default::default()
            })
        };
        assert_eq!(
            messages(&lint(unified(), plain.clone(), source)),
            ["Invalid JSDoc @param \"foo\" type \"Object\". Prefer: object."]
        );
        assert_eq!(fix(unified(), plain, source), expected);

        let generic = settings("[preferred-types]\n\"Object<>\" = \"object<>\"\n");
        assert_eq!(
            messages(&lint(rule(), generic.clone(), source)),
            ["Invalid JSDoc @param \"foo\" type \"Object\". Prefer: object<>."]
        );
        assert_eq!(fix(rule(), generic, source), expected);
    }

    #[test]
    fn fixes_only_the_type() {
        let source = "/**\n * @param {String} foo Like {String}.\n * @returns {String}\n */";
        assert_eq!(
            fix(rule(), Settings::default(), source),
            "/**\n * @param {string} foo Like {String}.\n * @returns {string}\n */"
        );

        // Types spanning lines are reported without a fix
        let source = "/**\n * @param {String|\n *   number} foo\n */";
        let diagnostics = lint(rule(), Settings::default(), source);
        assert_eq!(diagnostics.len(), 1);
        assert!(!diagnostics[0].is_fixable());
    }

    /// Settings preferring angle brackets over square brackets.
    fn settings_with_square() -> Settings {
        settings("[preferred-types]\n\"[]\" = \"Array<>\"\n")
    }

    #[test]
    fn custom_messages() {
        let settings = settings(
            "[preferred-types]\n\"*\" = { message = \"Use a specific type for @{{tagName}}{{ \
             tagValue }}.\" }\n",
        );
        let diagnostics = lint(rule(), settings, "/** @param {*} foo */");
        assert_eq!(
            messages(&diagnostics),
            ["Use a specific type for @param \"foo\"."]
        );
        assert!(!diagnostics[0].is_fixable());
    }

    #[test]
    fn replacements() {
        let settings = settings("[preferred-types]\nabc = \"Abc\"\n\"*\" = \"unknown\"\n");
        let source = "/**\n * @param {*} foo\n * @param {abc|string} bar\n */";
        assert_eq!(
            fix(rule(), settings.clone(), source),
            "/**\n * @param {unknown} foo\n * @param {abc|string} bar\n */"
        );

        let rule = CheckTypesRule::new(CheckTypesOptions {
            unify_parent_and_child_type_checks: true,
            ..Default::default()
        });
        assert_eq!(
            fix(rule, settings, source),
            "/**\n * @param {unknown} foo\n * @param {Abc | string} bar\n */"
        );
    }

    #[test]
    fn skip_root_checking() {
        let settings = settings(
            "[preferred-types]\nobject = { replacement = \"Object\", skip-root-checking = true }\n",
        );
        let source = "/**\n * @param {object} cfg\n * @param {string} cfg.name\n */";
        assert!(lint(rule(), settings.clone(), source).is_empty());

        let diagnostics = lint(rule(), settings, "/** @param {object} cfg */");
        assert_eq!(
            messages(&diagnostics),
            ["Invalid JSDoc @param \"cfg\" type \"object\". Prefer: Object."]
        );
    }

    #[test]
    fn exempt_contexts() {
        let settings = settings("[preferred-types]\n\"*\" = false\n");
        let source = "/** @param {*} foo */";
        assert_eq!(
            messages(&lint(rule(), settings.clone(), source)),
            ["Invalid JSDoc @param \"foo\" type \"*\"."]
        );

        let options: CheckTypesOptions =
            toml::from_str("[[exempt-tag-contexts]]\ntag = \"param\"\ntypes = [\"*\"]\n").unwrap();
        assert!(lint(CheckTypesRule::new(options), settings.clone(), source).is_empty());

        let options: CheckTypesOptions =
            toml::from_str("[[exempt-tag-contexts]]\ntag = \"param\"\ntypes = true\n").unwrap();
        assert!(lint(CheckTypesRule::new(options), settings, source).is_empty());
    }

    #[test]
    fn structured_tag_types() {
        let settings = settings("[structured-tags.throws]\ntype = [\"Error\", \"TypeError\"]\n");
        let diagnostics = lint(rule(), settings, "/** @throws {string} */");
        assert_eq!(
            messages(&diagnostics),
            ["Invalid JSDoc @throws type \"string\". Prefer: Error,TypeError."]
        );
        assert!(!diagnostics[0].is_fixable());
    }

    #[test]
    fn invalid_setting() {
        let settings = settings("[preferred-types]\nString = true\n");
        let diagnostics = lint(rule(), settings, "/** @param {String} foo */");
        assert_eq!(messages(&diagnostics), [INVALID_PREFERRED_TYPES]);
    }
}
