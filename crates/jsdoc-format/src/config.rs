//! Formatting configuration.

mod builder;
mod spacings;

pub use builder::Builder;
pub use builder::Error as BuilderError;
pub use spacings::CustomSpacings;

/// The tags aligned when none are configured.
pub const DEFAULT_TAGS: &[&str] = &[
    "param", "arg", "argument", "property", "prop", "returns", "return",
];

/// Configuration for aligning comments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// The tags whose lines are aligned.
    tags: Vec<String>,
    /// The minimum spacing after each token.
    custom_spacings: CustomSpacings,
    /// Whether the spacing after the delimiter of the main description is
    /// kept as written.
    preserve_main_description_post_delimiter: bool,
    /// The text appended after the delimiter of wrapped tag lines.
    wrap_indent: String,
    /// Whether wrapped tag lines are left without a wrap indent.
    disable_wrap_indent: bool,
}

impl Config {
    /// Gets the tags whose lines are aligned.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Gets the custom spacings.
    pub fn custom_spacings(&self) -> CustomSpacings {
        self.custom_spacings
    }

    /// Gets whether the spacing after the delimiter of the main description
    /// is kept as written.
    pub fn preserve_main_description_post_delimiter(&self) -> bool {
        self.preserve_main_description_post_delimiter
    }

    /// Gets the wrap indent.
    pub fn wrap_indent(&self) -> &str {
        &self.wrap_indent
    }

    /// Gets whether wrap indentation is disabled.
    pub fn disable_wrap_indent(&self) -> bool {
        self.disable_wrap_indent
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tags: DEFAULT_TAGS.iter().map(|t| t.to_string()).collect(),
            custom_spacings: CustomSpacings::default(),
            preserve_main_description_post_delimiter: false,
            wrap_indent: String::new(),
            disable_wrap_indent: false,
        }
    }
}
