//! The per-mode tag grammar table.
//!
//! Every known tag is listed exactly once in a declarative table. Each facet
//! of a row names the modes in which it holds, so the four dialects share a
//! single table and differ only where a row says so.
//!
//! A facet that a row leaves unset is distinct from one set to `false`: the
//! resolver treats unset facets permissively.

use std::collections::BTreeMap;
use std::fmt;

use indexmap::IndexMap;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::Mode;
use crate::ModeSet;

/// The role the name position of a tag plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RoleSetting", into = "RoleSetting")]
pub enum NamepathRole {
    /// The name defines a new namepath.
    Defining,
    /// The name refers to an existing namepath.
    Referencing,
    /// The name refers to an existing namepath or to a URL.
    OrUrlReferencing,
    /// The name is free text.
    Text,
    /// The tag takes a name that is not a namepath.
    Plain,
    /// The tag takes no name.
    Forbidden,
}

impl NamepathRole {
    /// Gets the setting string of the role, if it has one.
    pub fn as_str(&self) -> Option<&'static str> {
        match self {
            Self::Defining => Some("namepath-defining"),
            Self::Referencing => Some("namepath-referencing"),
            Self::OrUrlReferencing => Some("namepath-or-url-referencing"),
            Self::Text => Some("text"),
            Self::Plain | Self::Forbidden => None,
        }
    }

    /// Determines if a name may appear in the name position.
    pub fn allows_name(&self) -> bool {
        !matches!(self, Self::Forbidden)
    }

    /// Determines if the name position holds a namepath.
    pub fn is_namepath(&self) -> bool {
        matches!(self, Self::Defining | Self::Referencing)
    }
}

impl fmt::Display for NamepathRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_str() {
            Some(s) => f.write_str(s),
            None => write!(f, "{}", self.allows_name()),
        }
    }
}

/// The serialized form of a [`NamepathRole`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RoleSetting {
    /// `true` for a plain name or `false` for no name.
    Flag(bool),
    /// One of the namepath role strings.
    Role(String),
}

impl TryFrom<RoleSetting> for NamepathRole {
    type Error = String;

    fn try_from(value: RoleSetting) -> Result<Self, Self::Error> {
        match value {
            RoleSetting::Flag(true) => Ok(Self::Plain),
            RoleSetting::Flag(false) => Ok(Self::Forbidden),
            RoleSetting::Role(role) => match role.as_str() {
                "namepath-defining" => Ok(Self::Defining),
                "namepath-referencing" => Ok(Self::Referencing),
                "namepath-or-url-referencing" => Ok(Self::OrUrlReferencing),
                "text" => Ok(Self::Text),
                _ => Err(format!("unknown namepath role `{role}`")),
            },
        }
    }
}

impl From<NamepathRole> for RoleSetting {
    fn from(value: NamepathRole) -> Self {
        match value.as_str() {
            Some(s) => Self::Role(s.to_string()),
            None => Self::Flag(value.allows_name()),
        }
    }
}

/// The facets of one tag in one mode.
///
/// `None` means the facet is unset.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Facets {
    /// The role of the name position.
    pub namepath_role: Option<NamepathRole>,
    /// Whether a name is required.
    pub name_required: Option<bool>,
    /// Whether a name is allowed even without a namepath role.
    pub name_allowed: Option<bool>,
    /// Whether a type is allowed.
    pub type_allowed: Option<bool>,
    /// Whether a type is required.
    pub type_required: Option<bool>,
    /// Whether at least one of a type or a name is required.
    pub type_or_name_required: Option<bool>,
}

/// A role facet that may differ between modes.
#[derive(Debug, Clone, Copy)]
struct RoleRow {
    /// The modes in which `role` applies.
    modes: ModeSet,
    /// The role within `modes`.
    role: NamepathRole,
    /// The role outside of `modes`.
    otherwise: NamepathRole,
}

/// One row of the declarative grammar table.
///
/// Boolean facets are expressed as the set of modes in which they are true.
#[derive(Debug, Clone, Copy)]
struct Row {
    /// The tag name.
    tag: &'static str,
    /// The role of the name position.
    role: Option<RoleRow>,
    /// The modes requiring a name.
    name_required: Option<ModeSet>,
    /// The modes allowing a name.
    name_allowed: Option<ModeSet>,
    /// The modes allowing a type.
    type_allowed: Option<ModeSet>,
    /// The modes requiring a type.
    type_required: Option<ModeSet>,
    /// The modes requiring a type or a name.
    type_or_name_required: Option<ModeSet>,
}

impl Row {
    /// Starts a row with every facet unset.
    const fn new(tag: &'static str) -> Self {
        Self {
            tag,
            role: None,
            name_required: None,
            name_allowed: None,
            type_allowed: None,
            type_required: None,
            type_or_name_required: None,
        }
    }

    /// Sets a role that applies in every mode.
    const fn role(self, role: NamepathRole) -> Self {
        self.role_in(ModeSet::ALL, role, role)
    }

    /// Sets a role that applies in the given modes, with another role
    /// elsewhere.
    const fn role_in(mut self, modes: ModeSet, role: NamepathRole, otherwise: NamepathRole) -> Self {
        self.role = Some(RoleRow {
            modes,
            role,
            otherwise,
        });
        self
    }

    /// Sets the modes requiring a name.
    const fn name_required(mut self, modes: ModeSet) -> Self {
        self.name_required = Some(modes);
        self
    }

    /// Sets the modes allowing a name.
    const fn name_allowed(mut self, modes: ModeSet) -> Self {
        self.name_allowed = Some(modes);
        self
    }

    /// Sets the modes allowing a type.
    const fn type_allowed(mut self, modes: ModeSet) -> Self {
        self.type_allowed = Some(modes);
        self
    }

    /// Sets the modes requiring a type.
    const fn type_required(mut self, modes: ModeSet) -> Self {
        self.type_required = Some(modes);
        self
    }

    /// Sets the modes requiring a type or a name.
    const fn type_or_name_required(mut self, modes: ModeSet) -> Self {
        self.type_or_name_required = Some(modes);
        self
    }

    /// Grades the row for one mode.
    fn facets(&self, mode: Mode) -> Facets {
        let grade = |set: Option<ModeSet>| set.map(|s| s.contains(mode));
        Facets {
            namepath_role: self.role.map(|r| {
                if r.modes.contains(mode) {
                    r.role
                } else {
                    r.otherwise
                }
            }),
            name_required: grade(self.name_required),
            name_allowed: grade(self.name_allowed),
            type_allowed: grade(self.type_allowed),
            type_required: grade(self.type_required),
            type_or_name_required: grade(self.type_or_name_required),
        }
    }
}

/// Every mode.
const ALL: ModeSet = ModeSet::ALL;
/// No mode.
const NONE: ModeSet = ModeSet::NONE;
/// Plain JSDoc only.
const JSDOC: ModeSet = ModeSet::new(&[Mode::Jsdoc]);
/// Closure only.
const CLOSURE: ModeSet = ModeSet::new(&[Mode::Closure]);
/// Closure or permissive.
const CLOSURE_OR_PERMISSIVE: ModeSet = ModeSet::new(&[Mode::Closure, Mode::Permissive]);
/// JSDoc or permissive.
const JSDOC_OR_PERMISSIVE: ModeSet = ModeSet::new(&[Mode::Jsdoc, Mode::Permissive]);
/// TypeScript or Closure.
const TYPESCRIPT_OR_CLOSURE: ModeSet = ModeSet::new(&[Mode::Typescript, Mode::Closure]);
/// Every mode but plain JSDoc.
const NOT_JSDOC: ModeSet = ModeSet::except(Mode::Jsdoc);
/// Every mode but Closure.
const NOT_CLOSURE: ModeSet = ModeSet::except(Mode::Closure);
/// Every mode but TypeScript.
const NOT_TYPESCRIPT: ModeSet = ModeSet::except(Mode::Typescript);

use NamepathRole::Defining;
use NamepathRole::Forbidden;
use NamepathRole::OrUrlReferencing;
use NamepathRole::Plain;
use NamepathRole::Referencing;
use NamepathRole::Text;

/// The grammar table.
const ROWS: &[Row] = &[
    Row::new("alias").role(Defining).type_or_name_required(ALL),
    Row::new("arg").role(Defining).name_required(ALL).type_allowed(ALL),
    Row::new("argument").role(Defining).name_required(ALL).type_allowed(ALL),
    Row::new("augments").role(Referencing).type_allowed(ALL).type_or_name_required(ALL),
    Row::new("borrows").role(Referencing).type_or_name_required(ALL),
    Row::new("callback").role(Defining).name_required(ALL),
    Row::new("class").role(Defining).name_allowed(ALL).type_allowed(ALL),
    Row::new("const").role(Defining).type_allowed(ALL),
    Row::new("constant").role(Defining).type_allowed(ALL),
    Row::new("constructor").role(Defining).type_allowed(ALL),
    Row::new("constructs").role(Defining).name_required(NONE).type_allowed(NONE),
    Row::new("define").type_required(CLOSURE),
    Row::new("emits").role(Referencing).name_required(ALL).type_allowed(NONE),
    Row::new("enum").type_allowed(ALL),
    Row::new("event").name_required(ALL).role(Defining),
    Row::new("exception").type_allowed(ALL),
    Row::new("export").type_allowed(CLOSURE_OR_PERMISSIVE),
    Row::new("exports").role(Defining).name_required(JSDOC).type_allowed(CLOSURE_OR_PERMISSIVE),
    Row::new("extends")
        .role(Referencing)
        .type_allowed(NOT_JSDOC)
        .name_required(JSDOC)
        .type_or_name_required(NOT_JSDOC),
    Row::new("external").role(Defining).name_required(ALL).type_allowed(NONE),
    Row::new("fires").role(Referencing).name_required(ALL).type_allowed(NONE),
    Row::new("function").role(Defining).name_required(NONE).type_allowed(NONE),
    Row::new("func").role(Defining),
    Row::new("host").role(Defining).name_required(ALL).type_allowed(NONE),
    Row::new("interface")
        .role_in(NOT_CLOSURE, Defining, Forbidden)
        .name_allowed(CLOSURE)
        .type_allowed(NONE),
    Row::new("internal").role(Forbidden).name_allowed(NONE),
    Row::new("implements").type_required(ALL),
    Row::new("lends").role(Referencing).type_or_name_required(ALL),
    Row::new("link").role(OrUrlReferencing),
    Row::new("linkcode").role(OrUrlReferencing),
    Row::new("linkplain").role(OrUrlReferencing),
    Row::new("listens").role(Referencing).name_required(ALL).type_allowed(NONE),
    Row::new("member").role(Defining).type_allowed(ALL),
    Row::new("memberof").role(Referencing).type_or_name_required(ALL),
    Row::new("memberof!").role(Referencing).type_or_name_required(ALL),
    Row::new("method").role(Defining),
    Row::new("mixes").role(Referencing).type_or_name_required(ALL),
    Row::new("mixin").role(Defining).name_required(NONE).type_allowed(NONE),
    Row::new("modifies").type_allowed(ALL),
    Row::new("module").role_in(JSDOC, Defining, Text).type_allowed(ALL),
    Row::new("name").role(Defining).name_required(ALL).type_or_name_required(ALL),
    Row::new("namespace").role(Defining).type_allowed(ALL),
    Row::new("package").type_allowed(CLOSURE_OR_PERMISSIVE),
    Row::new("param").role(Defining).name_required(ALL).type_allowed(ALL),
    Row::new("private").type_allowed(CLOSURE_OR_PERMISSIVE),
    Row::new("prop").role(Defining).name_required(ALL).type_allowed(ALL),
    Row::new("property").role(Defining).name_required(ALL).type_allowed(ALL),
    Row::new("protected").type_allowed(CLOSURE_OR_PERMISSIVE),
    Row::new("public").type_allowed(CLOSURE_OR_PERMISSIVE),
    Row::new("requires").role(Referencing).name_required(ALL).type_allowed(NONE),
    Row::new("returns").type_allowed(ALL),
    Row::new("return").type_allowed(ALL),
    Row::new("satisfies").type_required(ALL),
    Row::new("see").role(Text),
    Row::new("static").type_allowed(CLOSURE_OR_PERMISSIVE),
    Row::new("suppress").role_in(NOT_CLOSURE, Plain, Forbidden).type_required(CLOSURE),
    Row::new("template")
        .role_in(JSDOC, Text, Referencing)
        .name_required(NOT_JSDOC)
        .type_allowed(NOT_JSDOC),
    Row::new("this")
        .role_in(JSDOC, Referencing, Forbidden)
        .type_required(TYPESCRIPT_OR_CLOSURE)
        .type_or_name_required(JSDOC),
    Row::new("throws").type_allowed(ALL),
    Row::new("tutorial").name_required(ALL).type_allowed(NONE),
    Row::new("type").type_required(ALL),
    Row::new("typedef")
        .role(Defining)
        .name_required(JSDOC_OR_PERMISSIVE)
        .type_allowed(ALL)
        .type_or_name_required(NOT_TYPESCRIPT),
    Row::new("var").role(Defining).type_allowed(ALL),
    Row::new("yields").type_allowed(ALL),
    Row::new("yield").type_allowed(ALL),
];

/// A position a structured tag may require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Requirement {
    /// The tag requires a name.
    #[serde(rename = "name")]
    Name,
    /// The tag requires a type.
    #[serde(rename = "type")]
    Type,
    /// The tag requires a type or a name.
    #[serde(rename = "typeOrNameRequired")]
    TypeOrName,
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name => write!(f, "name"),
            Self::Type => write!(f, "type"),
            Self::TypeOrName => write!(f, "typeOrNameRequired"),
        }
    }
}

/// The type position setting of a structured tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeSetting {
    /// Whether a type is allowed at all.
    Allowed(bool),
    /// The type names that are permitted.
    Names(Vec<String>),
}

impl TypeSetting {
    /// Determines if a type is allowed.
    pub fn allows_type(&self) -> bool {
        !matches!(self, Self::Allowed(false))
    }
}

/// A user-supplied override of a tag's grammar.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredTag {
    /// The role of the name position.
    #[serde(default)]
    pub name: Option<NamepathRole>,
    /// Whether the tag takes a type, or which type names it permits.
    #[serde(default, rename = "type")]
    pub ty: Option<TypeSetting>,
    /// The positions the tag requires.
    #[serde(default)]
    pub required: Vec<Requirement>,
}

/// An error for a structured tag override that contradicts itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructureError {
    /// A requirement was added for a name the override forbids.
    #[error("cannot add \"{requirement}\" to `required` with the tag's `name` set to `false`")]
    NameForbidden {
        /// The tag being overridden.
        tag: String,
        /// The contradicting requirement.
        requirement: Requirement,
    },
    /// A requirement was added for a type the override forbids.
    #[error("cannot add \"{requirement}\" to `required` with the tag's `type` set to `false`")]
    TypeForbidden {
        /// The tag being overridden.
        tag: String,
        /// The contradicting requirement.
        requirement: Requirement,
    },
}

/// The grammar table for one mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagStructure {
    /// The mode the table was graded for.
    mode: Mode,
    /// The facets of each known tag.
    tags: IndexMap<String, Facets>,
}

impl TagStructure {
    /// Grades the default table for the given mode.
    pub fn for_mode(mode: Mode) -> Self {
        Self {
            mode,
            tags: ROWS
                .iter()
                .map(|row| (row.tag.to_string(), row.facets(mode)))
                .collect(),
        }
    }

    /// Grades the default table for the given mode and applies the given
    /// overrides.
    pub fn with_overrides(
        mode: Mode,
        overrides: &IndexMap<String, StructuredTag>,
    ) -> Result<Self, StructureError> {
        let mut structure = Self::for_mode(mode);
        for (tag, tag_override) in overrides {
            structure.apply(tag, tag_override)?;
        }

        Ok(structure)
    }

    /// Applies one structured tag override.
    fn apply(&mut self, tag: &str, tag_override: &StructuredTag) -> Result<(), StructureError> {
        let name_forbidden = tag_override.name == Some(NamepathRole::Forbidden);
        let type_forbidden = tag_override
            .ty
            .as_ref()
            .is_some_and(|t| !t.allows_type());
        let requires = |r| tag_override.required.contains(&r);

        for requirement in [Requirement::Name, Requirement::TypeOrName] {
            if requires(requirement) && name_forbidden {
                return Err(StructureError::NameForbidden {
                    tag: tag.to_string(),
                    requirement,
                });
            }
        }

        for requirement in [Requirement::Type, Requirement::TypeOrName] {
            if requires(requirement) && type_forbidden {
                return Err(StructureError::TypeForbidden {
                    tag: tag.to_string(),
                    requirement,
                });
            }
        }

        let facets = self.tags.entry(tag.to_string()).or_default();
        facets.namepath_role = tag_override.name;
        facets.type_allowed = tag_override.ty.as_ref().map(TypeSetting::allows_type);
        facets.name_required = Some(requires(Requirement::Name));
        facets.type_required = Some(requires(Requirement::Type));
        facets.type_or_name_required = Some(requires(Requirement::TypeOrName));
        Ok(())
    }

    /// Gets the mode of the table.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Gets the facets of a tag, if the tag is known.
    pub fn get(&self, tag: &str) -> Option<&Facets> {
        self.tags.get(tag)
    }

    /// Iterates the known tags and their facets.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Facets)> {
        self.tags.iter().map(|(t, f)| (t.as_str(), f))
    }

    /// Summarizes the table as a sorted map, for display and comparison.
    pub fn summary(&self) -> BTreeMap<&str, Facets> {
        self.tags.iter().map(|(t, f)| (t.as_str(), *f)).collect()
    }
}
