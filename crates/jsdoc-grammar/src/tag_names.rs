//! The registry of known tag names and their aliases.
//!
//! There is one table per dialect. The TypeScript table extends the JSDoc
//! table and the Closure table is derived from the TypeScript table by
//! dropping the tags Closure does not know and adding its own. Permissive mode
//! uses the Closure table.

use std::sync::LazyLock;

use indexmap::IndexMap;
use serde::Deserialize;
use serde::Serialize;

use crate::Mode;

/// A table mapping canonical tag names to their recognized aliases.
pub type AliasTable = IndexMap<&'static str, &'static [&'static str]>;

/// Tags understood by JSDoc but not documented by it.
const JSDOC_UNDOCUMENTED: &[(&str, &[&str])] = &[("modifies", &[])];

/// The JSDoc tags.
const JSDOC: &[(&str, &[&str])] = &[
    ("abstract", &["virtual"]),
    ("access", &[]),
    ("alias", &[]),
    ("async", &[]),
    ("augments", &["extends"]),
    ("author", &[]),
    ("borrows", &[]),
    ("callback", &[]),
    ("class", &["constructor"]),
    ("classdesc", &[]),
    ("constant", &["const"]),
    ("constructs", &[]),
    ("copyright", &[]),
    ("default", &["defaultvalue"]),
    ("deprecated", &[]),
    ("description", &["desc"]),
    ("enum", &[]),
    ("event", &[]),
    ("example", &[]),
    ("exports", &[]),
    ("external", &["host"]),
    ("file", &["fileoverview", "overview"]),
    ("fires", &["emits"]),
    ("function", &["func", "method"]),
    ("generator", &[]),
    ("global", &[]),
    ("hideconstructor", &[]),
    ("ignore", &[]),
    ("implements", &[]),
    ("inheritdoc", &[]),
    // Closure requires this casing.
    ("inheritDoc", &[]),
    ("inner", &[]),
    ("instance", &[]),
    ("interface", &[]),
    ("kind", &[]),
    ("lends", &[]),
    ("license", &[]),
    ("listens", &[]),
    ("member", &["var"]),
    ("memberof", &[]),
    ("memberof!", &[]),
    ("mixes", &[]),
    ("mixin", &[]),
    ("module", &[]),
    ("name", &[]),
    ("namespace", &[]),
    ("override", &[]),
    ("package", &[]),
    ("param", &["arg", "argument"]),
    ("private", &[]),
    ("property", &["prop"]),
    ("protected", &[]),
    ("public", &[]),
    ("readonly", &[]),
    ("requires", &[]),
    ("returns", &["return"]),
    ("see", &[]),
    ("since", &[]),
    ("static", &[]),
    ("summary", &[]),
    ("this", &[]),
    ("throws", &["exception"]),
    ("todo", &[]),
    ("tutorial", &[]),
    ("type", &[]),
    ("typedef", &[]),
    ("variation", &[]),
    ("version", &[]),
    ("yields", &["yield"]),
];

/// The tags TypeScript adds to JSDoc.
const TYPESCRIPT: &[(&str, &[&str])] = &[
    ("import", &[]),
    ("internal", &[]),
    ("overload", &[]),
    ("satisfies", &[]),
    ("template", &[]),
];

/// The TypeScript tags Closure does not know.
const NOT_IN_CLOSURE: &[&str] = &["inheritdoc", "internal", "overload", "satisfies", "returns"];

/// Tags used by Closure but not documented by it.
const CLOSURE_UNDOCUMENTED: &[(&str, &[&str])] = &[
    ("closurePrimitive", &[]),
    ("customElement", &[]),
    ("expose", &[]),
    ("hidden", &[]),
    ("idGenerator", &[]),
    ("meaning", &[]),
    ("mixinClass", &[]),
    ("mixinFunction", &[]),
    ("ngInject", &[]),
    ("owner", &[]),
    ("typeSummary", &[]),
    ("wizaction", &[]),
];

/// The tags Closure adds.
const CLOSURE: &[(&str, &[&str])] = &[
    ("define", &[]),
    ("dict", &[]),
    ("export", &[]),
    ("externs", &[]),
    ("final", &[]),
    ("implicitCast", &[]),
    ("noalias", &[]),
    ("nocollapse", &[]),
    ("nocompile", &[]),
    ("noinline", &[]),
    ("nosideeffects", &[]),
    ("polymer", &[]),
    ("polymerBehavior", &[]),
    ("preserve", &[]),
    ("record", &[]),
    ("return", &["returns"]),
    ("struct", &[]),
    ("suppress", &[]),
    ("unrestricted", &[]),
];

/// The JSDoc alias table.
static JSDOC_TABLE: LazyLock<AliasTable> = LazyLock::new(|| {
    JSDOC_UNDOCUMENTED
        .iter()
        .chain(JSDOC)
        .map(|(t, a)| (*t, *a))
        .collect()
});

/// The TypeScript alias table.
static TYPESCRIPT_TABLE: LazyLock<AliasTable> = LazyLock::new(|| {
    let mut table = JSDOC_TABLE.clone();
    table.extend(TYPESCRIPT.iter().map(|(t, a)| (*t, *a)));
    table
});

/// The Closure alias table.
static CLOSURE_TABLE: LazyLock<AliasTable> = LazyLock::new(|| {
    let mut table = TYPESCRIPT_TABLE.clone();
    table.retain(|t, _| !NOT_IN_CLOSURE.contains(t));
    table.extend(CLOSURE_UNDOCUMENTED.iter().chain(CLOSURE).map(|(t, a)| (*t, *a)));
    table
});

/// Gets the alias table of the given mode.
pub fn tag_names(mode: Mode) -> &'static AliasTable {
    match mode {
        Mode::Jsdoc => &JSDOC_TABLE,
        Mode::Typescript => &TYPESCRIPT_TABLE,
        Mode::Closure | Mode::Permissive => &CLOSURE_TABLE,
    }
}

/// Gets the canonical name of a tag that is spelled as an alias.
///
/// Returns `None` if the name is not an alias in the given mode.
pub fn canonical_name(mode: Mode, name: &str) -> Option<&'static str> {
    tag_names(mode)
        .iter()
        .find(|(_, aliases)| aliases.contains(&name))
        .map(|(canonical, _)| *canonical)
}

/// Determines if the name is a canonical tag, an alias, or one of the
/// user-defined tags.
pub fn is_valid_tag<S: AsRef<str>>(mode: Mode, name: &str, defined_tags: &[S]) -> bool {
    let table = tag_names(mode);
    table.contains_key(name)
        || table.values().any(|aliases| aliases.contains(&name))
        || defined_tags.iter().any(|t| t.as_ref() == name)
}

/// A user preference for the spelling of a tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagPreference {
    /// Replace the tag with the given name.
    Name(String),
    /// `false` blocks the tag; `true` has no effect.
    Enabled(bool),
    /// Replace or block the tag with a custom message.
    Custom {
        /// The message to report.
        message: Option<String>,
        /// The replacement tag name; the tag is blocked when absent.
        replacement: Option<String>,
    },
}

/// The outcome of looking up the preferred spelling of a tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreferredTagName<'a> {
    /// The tag should be spelled with the given name.
    Name(&'a str),
    /// The tag should not be used at all.
    Blocked {
        /// A custom message to report.
        message: Option<&'a str>,
    },
    /// The tag should be replaced and reported with a custom message.
    Custom {
        /// The message to report.
        message: Option<&'a str>,
        /// The replacement tag name.
        replacement: &'a str,
    },
}

impl PreferredTagName<'_> {
    /// Gets the preferred name if the tag is not blocked.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Name(name) => Some(name),
            Self::Custom { replacement, .. } => Some(replacement),
            Self::Blocked { .. } => None,
        }
    }
}

/// Gets the preferred spelling of a tag.
///
/// A name that is itself the target of a preference is kept. Otherwise a
/// preference keyed by the name (optionally written as `tag <name>`) is used,
/// and failing that the canonical name of an alias.
pub fn preferred_tag_name<'a>(
    mode: Mode,
    name: &'a str,
    preferences: &'a IndexMap<String, TagPreference>,
) -> PreferredTagName<'a> {
    let is_target = preferences.values().any(|p| match p {
        TagPreference::Name(n) => n == name,
        TagPreference::Custom {
            replacement: Some(r),
            ..
        } => r == name,
        _ => false,
    });
    if is_target {
        return PreferredTagName::Name(name);
    }

    let preference = preferences
        .iter()
        .find(|(key, _)| key.strip_prefix("tag ").unwrap_or(key) == name)
        .map(|(_, p)| p);
    match preference {
        Some(TagPreference::Name(n)) => return PreferredTagName::Name(n.as_str()),
        Some(TagPreference::Enabled(false)) => {
            return PreferredTagName::Blocked { message: None };
        }
        Some(TagPreference::Custom {
            message,
            replacement: Some(replacement),
        }) => {
            return PreferredTagName::Custom {
                message: message.as_deref(),
                replacement: replacement.as_str(),
            };
        }
        Some(TagPreference::Custom {
            message,
            replacement: None,
        }) => {
            return PreferredTagName::Blocked {
                message: message.as_deref(),
            };
        }
        Some(TagPreference::Enabled(true)) | None => {}
    }

    PreferredTagName::Name(canonical_name(mode, name).unwrap_or(name))
}
