//! Linter config definition.

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::rules::CheckLineAlignmentOptions;
use crate::rules::CheckTagNamesOptions;
use crate::rules::CheckTypesOptions;
use crate::rules::NoMultiAsterisksOptions;
use crate::rules::RequireHyphenBeforeParamDescriptionOptions;
use crate::rules::ValidTypesOptions;
use crate::settings::Settings;

/// Define the lint rule config and doc generation utilities.
macro_rules! define_lint_rule_config {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $(
                $(#[doc = $doc:literal])+
                #[lints($($lints:ident),+ $(,)?)]
                $field:ident: $ty:ty = $default:expr,
            )+
        }
    ) => {
        $(#[$meta])*
        pub struct $name {
            $(
                $(#[doc = $doc])+
                pub $field: $ty,
            )+
        }

        impl Default for $name {
            fn default() -> Self {
                Self {
                    $(
                        $field: $default,
                    )+
                }
            }
        }

        impl $name {
            /// **(NOT A PUBLIC API)** Get the metadata for all config fields
            #[doc(hidden)]
            pub fn fields() -> &'static [ConfigField] {
                &[
                    $(
                        ConfigField {
                            name: stringify!($field),
                            applicable_lints: &[$(stringify!($lints)),+,]
                        }
                    ),+
                ]
            }
        }
    }
}

/// **(NOT A PUBLIC API)** A field in the `jsdoc-lint` [`Config`].
#[doc(hidden)]
#[derive(Debug)]
pub struct ConfigField {
    /// The name of the field.
    pub name: &'static str,
    /// All lints that this field applies to.
    pub applicable_lints: &'static [&'static str],
}

/// An error reading a linter configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration was not valid TOML or had unknown keys.
    #[error("invalid lint configuration: {0}")]
    Toml(#[from] toml::de::Error),
}

define_lint_rule_config! {
    /// The configuration for lint rules.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
    pub struct Config {
        /// The settings shared by every rule.
        ///
        /// ## Example
        ///
        /// ```toml
        /// [settings]
        /// mode = "typescript"
        ///
        /// [settings.tag-name-preference]
        /// arg = "param"
        /// ```
        #[lints(CheckTagNames, CheckTypes, ValidTypes, RequireHyphenBeforeParamDescription)]
        settings: Settings = Settings::default(),
        /// The options of the [`CheckLineAlignment`] lint.
        ///
        /// ## Example
        ///
        /// ```toml
        /// [check-line-alignment]
        /// alignment = "always"
        /// tags = ["param", "returns"]
        /// ```
        ///
        /// [`CheckLineAlignment`]: crate::rules::CheckLineAlignmentRule
        #[lints(CheckLineAlignment)]
        check_line_alignment: CheckLineAlignmentOptions = CheckLineAlignmentOptions::default(),
        /// The options of the [`NoMultiAsterisks`] lint.
        ///
        /// [`NoMultiAsterisks`]: crate::rules::NoMultiAsterisksRule
        #[lints(NoMultiAsterisks)]
        no_multi_asterisks: NoMultiAsterisksOptions = NoMultiAsterisksOptions::default(),
        /// The options of the [`RequireHyphenBeforeParamDescription`] lint.
        ///
        /// ## Example
        ///
        /// ```toml
        /// [require-hyphen-before-param-description]
        /// usage = "never"
        /// tags = { returns = "always" }
        /// ```
        ///
        /// [`RequireHyphenBeforeParamDescription`]: crate::rules::RequireHyphenBeforeParamDescriptionRule
        #[lints(RequireHyphenBeforeParamDescription)]
        require_hyphen_before_param_description: RequireHyphenBeforeParamDescriptionOptions =
            RequireHyphenBeforeParamDescriptionOptions::default(),
        /// The options of the [`CheckTagNames`] lint.
        ///
        /// [`CheckTagNames`]: crate::rules::CheckTagNamesRule
        #[lints(CheckTagNames)]
        check_tag_names: CheckTagNamesOptions = CheckTagNamesOptions::default(),
        /// The options of the [`CheckTypes`] lint.
        ///
        /// [`CheckTypes`]: crate::rules::CheckTypesRule
        #[lints(CheckTypes)]
        check_types: CheckTypesOptions = CheckTypesOptions::default(),
        /// The options of the [`ValidTypes`] lint.
        ///
        /// [`ValidTypes`]: crate::rules::ValidTypesRule
        #[lints(ValidTypes)]
        valid_types: ValidTypesOptions = ValidTypesOptions::default(),
    }
}

impl Config {
    /// Reads a configuration from TOML.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }
}
