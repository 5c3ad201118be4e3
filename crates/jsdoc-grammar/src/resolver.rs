//! Answers questions about what a tag may carry in the current mode.
//!
//! Answers that depend on the other modes are tri-state: a facet may hold
//! always, never, or only in some modes.

use std::fmt;

use indexmap::IndexMap;

use crate::Mode;
use crate::Tag;
use crate::structure::Facets;
use crate::structure::NamepathRole;
use crate::structure::StructureError;
use crate::structure::StructuredTag;
use crate::structure::TagStructure;

/// A three-valued answer about a tag facet across modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriState {
    /// The facet holds in the current mode (and, for requirements, in every
    /// mode).
    Always,
    /// The facet holds in no relevant mode.
    Never,
    /// The facet holds in some modes but not in every one.
    ModeDependent,
}

impl TriState {
    /// Grades an allowance: `Always` if it holds now, `ModeDependent` if it
    /// holds in another mode, `Never` otherwise.
    fn allowance(current: bool, mut others: impl Iterator<Item = bool>) -> Self {
        if current {
            Self::Always
        } else if others.any(|b| b) {
            Self::ModeDependent
        } else {
            Self::Never
        }
    }

    /// Grades a requirement: `Never` if it does not hold now, `Always` if it
    /// holds in every mode, `ModeDependent` otherwise.
    fn requirement(current: bool, mut others: impl Iterator<Item = bool>) -> Self {
        if !current {
            Self::Never
        } else if others.all(|b| b) {
            Self::Always
        } else {
            Self::ModeDependent
        }
    }

    /// Determines if the answer is [`TriState::Always`].
    pub fn is_always(&self) -> bool {
        matches!(self, Self::Always)
    }

    /// Determines if the answer is [`TriState::Never`].
    pub fn is_never(&self) -> bool {
        matches!(self, Self::Never)
    }
}

impl fmt::Display for TriState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Always => write!(f, "always"),
            Self::Never => write!(f, "never"),
            Self::ModeDependent => write!(f, "mode-dependent"),
        }
    }
}

/// The tag grammar of every mode, with one of them current.
#[derive(Debug, Clone)]
pub struct Grammar {
    /// The current mode.
    mode: Mode,
    /// The table of each mode, indexed by `Mode as usize`.
    tables: [TagStructure; 4],
}

impl Grammar {
    /// Creates the default grammar with the given mode current.
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            tables: Mode::ALL.map(TagStructure::for_mode),
        }
    }

    /// Creates a grammar with the given structured tag overrides applied to
    /// every mode.
    pub fn with_structured_tags(
        mode: Mode,
        overrides: &IndexMap<String, StructuredTag>,
    ) -> Result<Self, StructureError> {
        let [jsdoc, typescript, closure, permissive] = Mode::ALL;
        Ok(Self {
            mode,
            tables: [
                TagStructure::with_overrides(jsdoc, overrides)?,
                TagStructure::with_overrides(typescript, overrides)?,
                TagStructure::with_overrides(closure, overrides)?,
                TagStructure::with_overrides(permissive, overrides)?,
            ],
        })
    }

    /// Gets the current mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Gets the table of the current mode.
    pub fn structure(&self) -> &TagStructure {
        self.table(self.mode)
    }

    /// Gets the table of the given mode.
    pub fn table(&self, mode: Mode) -> &TagStructure {
        &self.tables[mode as usize]
    }

    /// Gets the facets of a tag in a mode.
    ///
    /// Unknown tags have every facet unset.
    fn facets(&self, mode: Mode, tag: &str) -> Facets {
        self.table(mode).get(tag).copied().unwrap_or_default()
    }

    /// Evaluates a facet predicate in the current mode and in each other
    /// mode.
    ///
    /// In other modes only tags known to that mode are consulted; unknown
    /// tags answer `false` there.
    fn across<F>(&self, tag: &str, f: F) -> (bool, impl Iterator<Item = bool>)
    where
        F: Fn(&Facets) -> bool,
    {
        let current = f(&self.facets(self.mode, tag));
        let others = self
            .mode
            .others()
            .map(|m| self.table(m).get(tag).is_some_and(&f))
            .collect::<Vec<_>>();
        (current, others.into_iter())
    }

    /// Determines if the tag may carry a name in the current mode.
    fn name_allowed_in(facets: &Facets) -> bool {
        facets.namepath_role.is_none_or(|r| r.allows_name())
    }

    /// Determines if the tag may carry a type in the current mode.
    fn type_allowed_in(facets: &Facets) -> bool {
        facets.type_required == Some(true) || facets.type_allowed.unwrap_or(true)
    }

    /// Gets the role of a tag's name position in the current mode.
    pub fn namepath_role(&self, tag: &str) -> Option<NamepathRole> {
        self.facets(self.mode, tag).namepath_role
    }

    /// Determines if the tag may carry a name.
    pub fn might_have_name(&self, tag: &str) -> TriState {
        let (current, others) = self.across(tag, Self::name_allowed_in);
        TriState::allowance(current, others)
    }

    /// Determines if the tag may carry a type.
    pub fn might_have_type(&self, tag: &str) -> TriState {
        let (current, others) = self.across(tag, Self::type_allowed_in);
        TriState::allowance(current, others)
    }

    /// Determines if the tag must carry a name.
    pub fn must_have_name(&self, tag: &str) -> TriState {
        let (current, others) = self.across(tag, |f| f.name_required == Some(true));
        TriState::requirement(current, others)
    }

    /// Determines if the tag must carry a type.
    pub fn must_have_type(&self, tag: &str) -> TriState {
        let (current, others) = self.across(tag, |f| f.type_required == Some(true));
        TriState::requirement(current, others)
    }

    /// Determines if the tag lacks both a type and a name when it requires
    /// one of them.
    pub fn missing_required_type_or_namepath(&self, tag: &Tag) -> TriState {
        let missing = tag.ty.is_empty() && tag.name.is_empty();
        let (current, others) = self.across(&tag.tag, |f| {
            missing && f.type_or_name_required == Some(true)
        });
        TriState::requirement(current, others)
    }

    /// Determines if the name position of the tag holds a namepath in the
    /// current mode.
    pub fn might_have_namepath(&self, tag: &str) -> bool {
        self.namepath_role(tag).is_some_and(|r| r.is_namepath())
    }

    /// Determines if the tag defines a namepath in the current mode.
    pub fn is_namepath_defining(&self, tag: &str) -> bool {
        self.namepath_role(tag) == Some(NamepathRole::Defining)
    }

    /// Determines if the tag refers to a namepath in the current mode.
    pub fn is_namepath_referencing(&self, tag: &str) -> bool {
        self.namepath_role(tag) == Some(NamepathRole::Referencing)
    }

    /// Determines if the tag refers to a namepath or URL in the current mode.
    pub fn is_namepath_or_url_referencing(&self, tag: &str) -> bool {
        self.namepath_role(tag) == Some(NamepathRole::OrUrlReferencing)
    }

    /// Determines if the tag may carry either a type or a name in the current
    /// mode.
    pub fn might_have_either_type_or_name(&self, tag: &str) -> bool {
        self.might_have_type(tag).is_always() || self.might_have_name(tag).is_always()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn tri_states() {
        let jsdoc = Grammar::new(Mode::Jsdoc);
        assert_eq!(jsdoc.might_have_name("param"), TriState::Always);
        assert_eq!(jsdoc.must_have_name("param"), TriState::Always);
        assert_eq!(jsdoc.might_have_type("this"), TriState::Always);
        assert_eq!(jsdoc.might_have_type("export"), TriState::ModeDependent);
        assert_eq!(jsdoc.must_have_type("define"), TriState::Never);
        assert_eq!(jsdoc.must_have_name("typedef"), TriState::ModeDependent);
        assert_eq!(jsdoc.might_have_name("internal"), TriState::Never);
        assert_eq!(jsdoc.might_have_type("constructs"), TriState::Never);

        let closure = Grammar::new(Mode::Closure);
        assert_eq!(closure.must_have_type("define"), TriState::ModeDependent);
        assert_eq!(closure.might_have_name("suppress"), TriState::ModeDependent);
        assert_eq!(closure.must_have_type("type"), TriState::Always);
    }

    #[test]
    fn unknown_tags_are_permissive() {
        let grammar = Grammar::new(Mode::Typescript);
        assert_eq!(grammar.might_have_name("madeUp"), TriState::Always);
        assert_eq!(grammar.might_have_type("madeUp"), TriState::Always);
        assert_eq!(grammar.must_have_name("madeUp"), TriState::Never);
        assert_eq!(grammar.must_have_type("madeUp"), TriState::Never);
        assert!(!grammar.might_have_namepath("madeUp"));
    }

    #[test]
    fn namepath_roles() {
        let jsdoc = Grammar::new(Mode::Jsdoc);
        assert!(jsdoc.is_namepath_defining("typedef"));
        assert!(jsdoc.is_namepath_referencing("memberof"));
        assert!(jsdoc.is_namepath_or_url_referencing("link"));
        assert!(!jsdoc.might_have_namepath("template"));
        assert!(Grammar::new(Mode::Typescript).might_have_namepath("template"));
        assert!(jsdoc.might_have_either_type_or_name("see"));
    }

    #[test]
    fn missing_type_or_namepath() {
        let grammar = Grammar::new(Mode::Jsdoc);
        let tag = Tag {
            tag: "alias".to_string(),
            ..Default::default()
        };
        assert_eq!(
            grammar.missing_required_type_or_namepath(&tag),
            TriState::Always
        );

        let named = Tag {
            name: "foo".to_string(),
            ..tag
        };
        assert_eq!(
            grammar.missing_required_type_or_namepath(&named),
            TriState::Never
        );
    }

    #[test]
    fn requirements_imply_allowances() {
        for mode in Mode::ALL {
            let grammar = Grammar::new(mode);
            for (tag, _) in grammar.structure().iter() {
                if grammar.must_have_type(tag) != TriState::Never {
                    assert_eq!(grammar.might_have_type(tag), TriState::Always, "{mode} {tag}");
                }
                if grammar.must_have_name(tag) != TriState::Never {
                    assert_eq!(grammar.might_have_name(tag), TriState::Always, "{mode} {tag}");
                }
            }
        }
    }

    #[test]
    fn structured_tags_apply_to_every_mode() {
        let overrides: IndexMap<String, StructuredTag> =
            serde_json::from_str(r#"{"custom": {"name": "text", "required": ["name"]}}"#).unwrap();
        let grammar = Grammar::with_structured_tags(Mode::Jsdoc, &overrides).unwrap();
        assert_eq!(grammar.must_have_name("custom"), TriState::Always);
        assert_eq!(grammar.namepath_role("custom"), Some(NamepathRole::Text));
    }
}
