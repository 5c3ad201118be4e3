//! The minimum spacing after each token of an aligned line.

use serde::Deserialize;
use serde::Serialize;

/// Custom spacing after the delimiter, tag, type, name and hyphen.
///
/// An unset or zero spacing after a token means a single space. The spacing
/// after a hyphen may be zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct CustomSpacings {
    /// The spacing after the `*` delimiter.
    pub post_delimiter: Option<usize>,
    /// The spacing after a description's leading hyphen.
    pub post_hyphen: Option<usize>,
    /// The spacing after the name.
    pub post_name: Option<usize>,
    /// The spacing after the tag.
    pub post_tag: Option<usize>,
    /// The spacing after the type.
    pub post_type: Option<usize>,
}

/// Resolves a spacing where zero means the default of one.
fn or_one(spacing: Option<usize>) -> usize {
    spacing.filter(|s| *s != 0).unwrap_or(1)
}

impl CustomSpacings {
    /// Gets the spacing after the delimiter.
    pub fn post_delimiter(&self) -> usize {
        or_one(self.post_delimiter)
    }

    /// Gets the spacing after a leading hyphen.
    pub fn post_hyphen(&self) -> usize {
        self.post_hyphen.unwrap_or(1)
    }

    /// Gets the spacing after the name.
    pub fn post_name(&self) -> usize {
        or_one(self.post_name)
    }

    /// Gets the spacing after the tag.
    pub fn post_tag(&self) -> usize {
        or_one(self.post_tag)
    }

    /// Gets the spacing after the type.
    pub fn post_type(&self) -> usize {
        or_one(self.post_type)
    }
}
