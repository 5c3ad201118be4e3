//! Lint rules for documentation comments.

use crate::Config;
use crate::Diagnostics;
use crate::DocComment;
use crate::TagSet;

mod check_alignment;
mod check_line_alignment;
mod check_tag_names;
mod check_types;
mod no_multi_asterisks;
mod require_hyphen_before_param_description;
mod valid_types;

pub use check_alignment::*;
pub use check_line_alignment::*;
pub use check_tag_names::*;
pub use check_types::*;
pub use no_multi_asterisks::*;
pub use require_hyphen_before_param_description::*;
pub use valid_types::*;

/// A trait implemented by lint rules.
pub trait Rule {
    /// The unique identifier for the lint rule.
    ///
    /// The identifier is required to be pascal case.
    ///
    /// This is the identifier diagnostics are reported with and by which a
    /// lint rule is configured.
    fn id(&self) -> &'static str;

    /// A short, single sentence description of the lint rule.
    fn description(&self) -> &'static str;

    /// Get the long-form explanation of the lint rule.
    fn explanation(&self) -> &'static str;

    /// Get the tags of the lint rule.
    fn tags(&self) -> TagSet;

    /// Gets the optional URL of the lint rule.
    fn url(&self) -> Option<&'static str> {
        None
    }

    /// Gets the identifiers of rules related to this one.
    fn related_rules(&self) -> &[&'static str] {
        &[]
    }

    /// Resets any state the rule keeps between comments.
    fn reset(&mut self) {}

    /// Checks a documentation comment.
    fn doc_comment(&mut self, diagnostics: &mut Diagnostics, comment: &DocComment<'_>);
}

/// Gets the rule set configured with the given options.
pub fn rules(config: &Config) -> Vec<Box<dyn Rule>> {
    let rules: Vec<Box<dyn Rule>> = vec![
        Box::new(CheckAlignmentRule),
        Box::new(CheckLineAlignmentRule::new(
            config.check_line_alignment.clone(),
        )),
        Box::new(NoMultiAsterisksRule::new(config.no_multi_asterisks.clone())),
        Box::new(RequireHyphenBeforeParamDescriptionRule::new(
            config.require_hyphen_before_param_description.clone(),
        )),
        Box::new(CheckTagNamesRule::new(config.check_tag_names.clone())),
        Box::new(CheckTypesRule::new(config.check_types.clone())),
        Box::new(ValidTypesRule::new(config.valid_types.clone())),
    ];

    // Ensure all the rule ids are unique and pascal case
    #[cfg(debug_assertions)]
    {
        use convert_case::Case;
        use convert_case::Casing;
        let mut set = std::collections::HashSet::new();
        for r in rules.iter() {
            if r.id().to_case(Case::Pascal) != r.id() {
                panic!("lint rule id `{id}` is not pascal case", id = r.id());
            }

            if !set.insert(r.id()) {
                panic!("duplicate rule id `{id}`", id = r.id());
            }
        }
    }

    rules
}
