//! A lossless parser and tag grammar for JSDoc documentation comments.
//!
//! # Examples
//!
//! Parsing a comment and asking the grammar about one of its tags:
//!
//! ```rust
//! use jsdoc_grammar::Grammar;
//! use jsdoc_grammar::Mode;
//! use jsdoc_grammar::TriState;
//!
//! let block = jsdoc_grammar::parse("/**\n * @param {string} name The name.\n */");
//! assert_eq!(block.tags[0].name, "name");
//! assert_eq!(jsdoc_grammar::stringify(&block), "/**\n * @param {string} name The name.\n */");
//!
//! let grammar = Grammar::new(Mode::Jsdoc);
//! assert_eq!(grammar.must_have_name("param"), TriState::Always);
//! ```

#![warn(missing_debug_implementations)]

mod block;
mod inline;
mod mode;
mod parser;
mod resolver;
pub mod scanner;
pub mod structure;
mod stringify;
pub mod tag_names;

pub use block::*;
pub use inline::*;
pub use mode::*;
pub use parser::*;
pub use resolver::*;
pub use stringify::*;

/// Parses the first documentation comment in the given text with the default
/// parser.
pub fn parse(text: &str) -> Block {
    Parser::new().parse(text)
}
