//! Serialization of blocks back to comment text.

use crate::block::Block;

/// Serializes a block by joining the tokens of its source lines.
///
/// For a block returned by the parser this reproduces the parsed text
/// exactly.
pub fn stringify(block: &Block) -> String {
    block
        .source
        .iter()
        .map(|line| line.tokens.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
