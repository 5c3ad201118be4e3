//! A parser for the type expressions found in JSDoc, TypeScript-flavored and
//! Closure-flavored documentation comments.
//!
//! # Examples
//!
//! ```rust
//! use jsdoc_grammar::Mode;
//! use jsdoc_types::TypeNode;
//!
//! let node = jsdoc_types::parse("Array.<string|number>", Mode::Closure).unwrap();
//! assert!(matches!(node, TypeNode::Generic { dot: true, .. }));
//! assert_eq!(jsdoc_types::stringify(&node), "Array.<string | number>");
//!
//! // Permissive parsing never fails.
//! assert!(jsdoc_types::parse("{string", Mode::Permissive).is_ok());
//! ```

#![warn(missing_debug_implementations)]

mod lexer;
mod node;
mod parser;
mod stringify;
mod traverse;

pub use lexer::Token;
pub use node::*;
pub use parser::*;
pub use stringify::*;
pub use traverse::*;
