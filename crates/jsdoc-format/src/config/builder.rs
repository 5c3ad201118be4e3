//! Builders for formatting configuration.

use thiserror::Error;

use crate::Config;
use crate::config::CustomSpacings;

/// An error related to a [`Builder`].
#[derive(Debug, Error)]
pub enum Error {
    /// A required value was missing for a builder field.
    #[error("missing required value for '{0}' in a formatter configuration builder")]
    Missing(&'static str),
    /// The wrap indent contained something other than whitespace.
    #[error("the wrap indent `{0}` must contain only whitespace")]
    InvalidWrapIndent(String),
}

/// A [`Result`](std::result::Result) with an [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// A builder for a [`Config`].
#[derive(Debug)]
pub struct Builder {
    /// The tags whose lines are aligned.
    tags: Option<Vec<String>>,
    /// The minimum spacing after each token.
    custom_spacings: Option<CustomSpacings>,
    /// Whether the spacing after the main description's delimiter is kept.
    preserve_main_description_post_delimiter: bool,
    /// The text appended after the delimiter of wrapped tag lines.
    wrap_indent: Option<String>,
    /// Whether wrapped tag lines are left without a wrap indent.
    disable_wrap_indent: bool,
}

impl Builder {
    /// Sets the tags whose lines are aligned.
    ///
    /// # Notes
    ///
    /// This silently overwrites any previously provided tags.
    pub fn tags<S: Into<String>>(mut self, tags: impl IntoIterator<Item = S>) -> Self {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the custom spacings.
    pub fn custom_spacings(mut self, spacings: CustomSpacings) -> Self {
        self.custom_spacings = Some(spacings);
        self
    }

    /// Sets whether the spacing after the main description's delimiter is
    /// kept as written.
    pub fn preserve_main_description_post_delimiter(mut self, preserve: bool) -> Self {
        self.preserve_main_description_post_delimiter = preserve;
        self
    }

    /// Sets the wrap indent.
    pub fn wrap_indent(mut self, indent: impl Into<String>) -> Self {
        self.wrap_indent = Some(indent.into());
        self
    }

    /// Sets whether wrap indentation is disabled.
    pub fn disable_wrap_indent(mut self, disable: bool) -> Self {
        self.disable_wrap_indent = disable;
        self
    }

    /// Consumes `self` and attempts to build a [`Config`].
    pub fn try_build(self) -> Result<Config> {
        let tags = self.tags.ok_or(Error::Missing("tags"))?;
        let custom_spacings = self
            .custom_spacings
            .ok_or(Error::Missing("custom_spacings"))?;
        let wrap_indent = self.wrap_indent.ok_or(Error::Missing("wrap_indent"))?;
        if !wrap_indent.chars().all(char::is_whitespace) {
            return Err(Error::InvalidWrapIndent(wrap_indent));
        }

        Ok(Config {
            tags,
            custom_spacings,
            preserve_main_description_post_delimiter: self
                .preserve_main_description_post_delimiter,
            wrap_indent,
            disable_wrap_indent: self.disable_wrap_indent,
        })
    }
}

impl Default for Builder {
    fn default() -> Self {
        let config = Config::default();
        Self {
            tags: Some(config.tags),
            custom_spacings: Some(config.custom_spacings),
            preserve_main_description_post_delimiter: config
                .preserve_main_description_post_delimiter,
            wrap_indent: Some(config.wrap_indent),
            disable_wrap_indent: config.disable_wrap_indent,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn defaults() {
        let config = Builder::default().try_build().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.tags().len(), 7);
    }

    #[test]
    fn overrides() {
        let config = Builder::default()
            .tags(["param"])
            .wrap_indent("  ")
            .disable_wrap_indent(true)
            .try_build()
            .unwrap();
        assert_eq!(config.tags(), ["param".to_string()]);
        assert_eq!(config.wrap_indent(), "  ");
        assert!(config.disable_wrap_indent());
    }

    #[test]
    fn invalid_wrap_indent() {
        let err = Builder::default().wrap_indent("->").try_build().unwrap_err();
        assert_eq!(
            err.to_string(),
            "the wrap indent `->` must contain only whitespace"
        );
    }
}
