//! The lossless representation of a parsed documentation comment.

use std::fmt;
use std::ops::Range;

use serde::Serialize;

use crate::inline::InlineTag;

/// The substrings making up one physical line of a comment.
///
/// Concatenating the fields in declaration order reproduces the line.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tokens {
    /// Leading whitespace before the delimiter.
    pub start: String,
    /// The line delimiter: `/**`, `*` or empty.
    pub delimiter: String,
    /// Whitespace following the delimiter.
    pub post_delimiter: String,
    /// The tag including its `@` prefix.
    pub tag: String,
    /// Whitespace following the tag.
    pub post_tag: String,
    /// The type including its enclosing braces.
    #[serde(rename = "type")]
    pub ty: String,
    /// Whitespace following the type.
    pub post_type: String,
    /// The name as written, including any optional brackets.
    pub name: String,
    /// Whitespace following the name.
    pub post_name: String,
    /// The remaining description text.
    pub description: String,
    /// The close marker (`*/`) and any whitespace following it.
    pub end: String,
    /// A carriage return preceding the line feed, if any.
    pub line_end: String,
}

impl Tokens {
    /// Determines if the line carries a tag.
    pub fn has_tag(&self) -> bool {
        !self.tag.is_empty()
    }
}

impl fmt::Display for Tokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for part in [
            &self.start,
            &self.delimiter,
            &self.post_delimiter,
            &self.tag,
            &self.post_tag,
            &self.ty,
            &self.post_type,
            &self.name,
            &self.post_name,
            &self.description,
            &self.end,
            &self.line_end,
        ] {
            f.write_str(part)?;
        }

        Ok(())
    }
}

/// One physical line of a comment.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct Line {
    /// The zero-based line number relative to the start of the parsed text.
    pub number: usize,
    /// The tokens of the line.
    pub tokens: Tokens,
}

impl Line {
    /// Creates a new line.
    pub fn new(number: usize, tokens: Tokens) -> Self {
        Self { number, tokens }
    }

    /// Determines if this is the opening line of a block.
    pub fn is_opening(&self) -> bool {
        self.tokens.delimiter == "/**"
    }

    /// Determines if this is the closing line of a block.
    pub fn is_closing(&self) -> bool {
        !self.tokens.end.is_empty()
    }
}

/// The kind of a problem found while tokenizing a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ProblemKind {
    /// A tag section did not start with `@`.
    #[serde(rename = "spec:tag:prefix")]
    TagPrefix,
    /// The braces of a type were not balanced.
    #[serde(rename = "spec:type:unpaired-curlies")]
    UnpairedCurlies,
    /// The brackets of an optional name were not balanced.
    #[serde(rename = "spec:name:unpaired-brackets")]
    UnpairedBrackets,
    /// An optional name was empty.
    #[serde(rename = "spec:name:empty-name")]
    EmptyName,
    /// An optional name had an empty default value.
    #[serde(rename = "spec:name:empty-default")]
    EmptyDefault,
    /// An optional name had a malformed default value.
    #[serde(rename = "spec:name:invalid-default")]
    InvalidDefault,
}

impl ProblemKind {
    /// Gets the stable code of the problem.
    pub fn code(&self) -> &'static str {
        match self {
            Self::TagPrefix => "spec:tag:prefix",
            Self::UnpairedCurlies => "spec:type:unpaired-curlies",
            Self::UnpairedBrackets => "spec:name:unpaired-brackets",
            Self::EmptyName => "spec:name:empty-name",
            Self::EmptyDefault => "spec:name:empty-default",
            Self::InvalidDefault => "spec:name:invalid-default",
        }
    }

    /// Gets the human readable message for the problem.
    pub fn message(&self) -> &'static str {
        match self {
            Self::TagPrefix => "tag should start with \"@\" symbol",
            Self::UnpairedCurlies => "unpaired curlies",
            Self::UnpairedBrackets => "unpaired brackets",
            Self::EmptyName => "empty name",
            Self::EmptyDefault => "empty default value",
            Self::InvalidDefault => "invalid default value syntax",
        }
    }
}

impl fmt::Display for ProblemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A malformed token found while tokenizing a tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Problem {
    /// The kind of the problem.
    pub kind: ProblemKind,
    /// The line number of the tag's first line.
    pub line: usize,
    /// Whether the problem stopped tokenizing the rest of the tag.
    pub critical: bool,
}

impl Problem {
    /// Creates a new critical problem for the given line.
    pub(crate) fn critical(kind: ProblemKind, line: usize) -> Self {
        Self {
            kind,
            line,
            critical: true,
        }
    }

    /// Gets the human readable message for the problem.
    pub fn message(&self) -> &'static str {
        self.kind.message()
    }
}

/// One `@tag` declaration of a comment block.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    /// The tag name without the `@` prefix.
    pub tag: String,
    /// The text inside the type braces, empty if absent.
    #[serde(rename = "type")]
    pub ty: String,
    /// The name or namepath, empty if absent.
    pub name: String,
    /// Whether the name was written as `[name]`.
    pub optional: bool,
    /// The default value of an optional name.
    pub default: Option<String>,
    /// The description following the name.
    pub description: String,
    /// The problems found while tokenizing the tag.
    pub problems: Vec<Problem>,
    /// The inline tags found in the description.
    pub inline_tags: Vec<InlineTag>,
    /// The indexes into the block's source lines belonging to this tag.
    pub lines: Range<usize>,
}

impl Tag {
    /// Gets the index of the first source line of the tag.
    pub fn first_line(&self) -> usize {
        self.lines.start
    }
}

/// A parsed documentation comment.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct Block {
    /// The free text preceding the first tag.
    pub description: String,
    /// The tags in source order.
    pub tags: Vec<Tag>,
    /// Every physical line of the comment.
    pub source: Vec<Line>,
    /// The inline tags found in the description.
    pub inline_tags: Vec<InlineTag>,
    /// The problems of every tag.
    pub problems: Vec<Problem>,
}

impl Block {
    /// Gets the source lines of the given tag.
    pub fn lines_of(&self, tag: &Tag) -> &[Line] {
        self.source.get(tag.lines.clone()).unwrap_or_default()
    }

    /// Iterates the tags with the given name.
    pub fn tags_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Tag> {
        self.tags.iter().filter(move |t| t.tag == name)
    }

    /// Determines if the comment spans more than one line.
    pub fn is_multiline(&self) -> bool {
        self.source.len() > 1
    }
}
