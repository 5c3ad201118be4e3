//! Alignment of JSDoc comments.
//!
//! # Examples
//!
//! ```rust
//! use jsdoc_format::Formatter;
//!
//! let source = "/**\n * @param {string} a First.\n * @param {number} bb Second.\n */";
//! let formatted = Formatter::default().format(source);
//! assert_eq!(
//!     formatted,
//!     "/**\n * @param {string} a  First.\n * @param {number} bb Second.\n */"
//! );
//! ```

#![warn(missing_debug_implementations)]

mod align;
pub mod config;

pub use align::align;
pub use align::indent_of;
pub use config::Config;
use jsdoc_grammar::Block;
use jsdoc_grammar::scanner::Scanner;
use jsdoc_grammar::stringify;
use tracing::debug;

/// Aligns the documentation comments of JavaScript source.
#[derive(Debug, Default)]
pub struct Formatter {
    /// The configuration.
    config: Config,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Gets the configuration for this formatter.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Aligns a block indented by the leading whitespace of its first line.
    pub fn align(&self, block: &Block) -> Block {
        align(block, indent_of(block), &self.config)
    }

    /// Aligns a block whose opening line is indented by `indent`.
    pub fn align_with_indent(&self, block: &Block, indent: &str) -> Block {
        align(block, indent, &self.config)
    }

    /// Aligns every multi-line documentation comment in the given source.
    ///
    /// Text outside of documentation comments is left untouched.
    pub fn format(&self, source: &str) -> String {
        let mut result = String::with_capacity(source.len());
        let mut copied = 0;

        for comment in Scanner::new(source) {
            if !comment.text.contains('\n') {
                continue;
            }

            let block = comment.parse();
            let indent = " ".repeat(comment.column);
            let formatted = stringify(&self.align_with_indent(&block, &indent));
            let formatted = formatted.trim_start();
            if formatted == comment.text {
                continue;
            }

            debug!(line = comment.line + 1, "realigned documentation comment");
            result.push_str(&source[copied..comment.span.start]);
            result.push_str(formatted);
            copied = comment.span.end;
        }

        result.push_str(&source[copied..]);
        result
    }
}
