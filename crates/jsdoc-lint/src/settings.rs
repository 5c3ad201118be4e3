//! The settings shared by every rule.

use indexmap::IndexMap;
use jsdoc_grammar::Grammar;
use jsdoc_grammar::Mode;
use jsdoc_grammar::structure::StructureError;
use jsdoc_grammar::structure::StructuredTag;
use jsdoc_grammar::tag_names::TagPreference;
use serde::Deserialize;
use serde::Serialize;

/// The message reported for a tag name preference of `true`.
pub const INVALID_TAG_NAME_PREFERENCE: &str = "Invalid `settings.tag-name-preference`. Values \
                                               must be falsy, a string, or an object.";

/// The message reported for a preferred type of `true`.
pub const INVALID_PREFERRED_TYPES: &str =
    "Invalid `settings.preferred-types`. Values must be falsy, a string, or an object.";

/// A user preference for a type name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PreferredType {
    /// Replace the type with the given name.
    Name(String),
    /// `false` reports the type without a replacement; `true` is invalid.
    Enabled(bool),
    /// Replace or report the type with a custom message.
    Custom {
        /// The message to report.
        ///
        /// `{{tagName}}` and `{{tagValue}}` are replaced with the name of the
        /// tag and the quoted name of the documented item.
        #[serde(default)]
        message: Option<String>,
        /// The replacement type name.
        #[serde(default)]
        replacement: Option<String>,
        /// Whether a tag followed by a tag documenting one of its properties
        /// is left alone.
        #[serde(default, rename = "skip-root-checking")]
        skip_root_checking: bool,
    },
}

impl PreferredType {
    /// Gets the replacement name if the preference is a plain string.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Self::Name(name) => Some(name),
            _ => None,
        }
    }
}

/// The settings shared by every rule.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Settings {
    /// The dialect comments are written in.
    pub mode: Mode,
    /// The preferred spelling of tags, keyed by the spelling to replace.
    pub tag_name_preference: IndexMap<String, TagPreference>,
    /// The preferred type names, keyed by the type name to replace.
    ///
    /// Keys may carry a generic suffix (`Array.<>`, `Array<>`, `Array.`)
    /// or be a bare `[]`, `<>`, `.<>` or `.` to match any generic of that
    /// syntax.
    pub preferred_types: IndexMap<String, PreferredType>,
    /// Overrides of the tag grammar.
    pub structured_tags: IndexMap<String, StructuredTag>,
}

impl Settings {
    /// Creates the settings for the given mode.
    pub fn with_mode(mode: Mode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Builds the tag grammar with the structured tag overrides applied.
    pub fn grammar(&self) -> Result<Grammar, StructureError> {
        Grammar::with_structured_tags(self.mode, &self.structured_tags)
    }

    /// Gets the preferred spellings of tags, excluding blocked tags.
    pub fn preferred_tag_names(&self) -> impl Iterator<Item = &str> {
        self.tag_name_preference.values().filter_map(|p| match p {
            TagPreference::Name(name) => Some(name.as_str()),
            TagPreference::Custom {
                replacement: Some(r),
                ..
            } => Some(r.as_str()),
            _ => None,
        })
    }

    /// Determines if any tag name preference has the invalid value `true`.
    pub fn has_invalid_tag_name_preference(&self) -> bool {
        self.tag_name_preference
            .values()
            .any(|p| *p == TagPreference::Enabled(true))
    }
}

#[cfg(test)]
mod tests {
    use jsdoc_grammar::TriState;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn deserialize() {
        let settings: Settings = toml::from_str(
            r#"
mode = "typescript"

[tag-name-preference]
arg = "param"
todo = false
"tag constructor" = { message = "Use class", replacement = "class" }

[preferred-types]
Object = "object"
"*" = false
"[]" = { message = "Use Array<>", replacement = "Array<>", skip-root-checking = true }

[structured-tags.see]
name = "namepath-referencing"
required = ["name"]
"#,
        )
        .unwrap();

        assert_eq!(settings.mode, Mode::Typescript);
        assert_eq!(
            settings.tag_name_preference["arg"],
            TagPreference::Name("param".to_string())
        );
        assert_eq!(
            settings.tag_name_preference["todo"],
            TagPreference::Enabled(false)
        );
        assert_eq!(
            settings.preferred_tag_names().collect::<Vec<_>>(),
            ["param", "class"]
        );
        assert_eq!(settings.preferred_types["Object"].as_name(), Some("object"));
        assert_eq!(settings.preferred_types["*"], PreferredType::Enabled(false));
        assert_eq!(
            settings.preferred_types["[]"],
            PreferredType::Custom {
                message: Some("Use Array<>".to_string()),
                replacement: Some("Array<>".to_string()),
                skip_root_checking: true,
            }
        );

        let grammar = settings.grammar().unwrap();
        assert_eq!(grammar.must_have_name("see"), TriState::Always);
    }

    #[test]
    fn invalid_tag_name_preference() {
        let settings: Settings = toml::from_str("[tag-name-preference]\nparam = true\n").unwrap();
        assert!(settings.has_invalid_tag_name_preference());
        assert!(!Settings::default().has_invalid_tag_name_preference());
    }

    #[test]
    fn contradictory_structured_tag() {
        let settings: Settings = toml::from_str(
            "[structured-tags.foo]\nname = false\nrequired = [\"name\"]\n",
        )
        .unwrap();
        assert!(settings.grammar().is_err());
    }
}
