//! Lint rules for the documentation comments of JavaScript and TypeScript
//! sources.
//!
//! # Examples
//!
//! An example of linting a source with the default rules:
//!
//! ```rust
//! use jsdoc_lint::Linter;
//!
//! let source = "/**\n * @arg {String} name - The name.\n */\nfunction greet(name) {}\n";
//!
//! let mut linter = Linter::default();
//! let diagnostics = linter.lint(source);
//! assert_eq!(diagnostics.len(), 2);
//! assert_eq!(diagnostics[0].rule(), Some("CheckTagNames"));
//! assert_eq!(diagnostics[1].rule(), Some("CheckTypes"));
//!
//! assert_eq!(
//!     linter.fix(source),
//!     "/**\n * @param {string} name - The name.\n */\nfunction greet(name) {}\n"
//! );
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(rust_2021_compatibility)]
#![warn(missing_debug_implementations)]
#![warn(clippy::missing_docs_in_private_items)]
#![warn(rustdoc::broken_intra_doc_links)]

mod config;
mod diagnostic;
mod fix;
mod imports;
mod linter;
pub mod rules;
mod settings;
mod tags;
pub(crate) mod util;

pub use config::*;
pub use diagnostic::*;
pub use fix::*;
pub use imports::*;
pub use jsdoc_grammar as grammar;
pub use linter::*;
pub use rules::Rule;
pub use settings::*;
pub use tags::*;

/// The rule identifier of diagnostics reporting invalid settings.
pub const SETTINGS_RULE_ID: &str = "Settings";
