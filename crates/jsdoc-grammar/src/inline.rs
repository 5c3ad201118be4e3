//! Parsing of inline tags such as `{@link Foo}`.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Matches an inline tag with an optional `[text]` prefix.
static INLINE_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\[([^\]]+)\])?\{@([^}\s]+)(\s*)([^}\s|]*)(?:(\||\s+)([^}]*))?\}")
        .expect("inline tag pattern should compile")
});

/// How the link text of an inline tag was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InlineFormat {
    /// `{@link target}`.
    Plain,
    /// `{@link target|text}`.
    Pipe,
    /// `{@link target text}`.
    Space,
    /// `[text]{@link target}`.
    Prefix,
}

/// An inline tag found in a description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineTag {
    /// The tag name without the `@` prefix.
    pub tag: String,
    /// The link target.
    pub namepath_or_url: String,
    /// The link text.
    pub text: String,
    /// How the link text was written.
    pub format: InlineFormat,
    /// The byte range of the inline tag within the description.
    pub span: Range<usize>,
}

/// Parses the inline tags of a description.
pub fn parse_inline_tags(description: &str) -> Vec<InlineTag> {
    INLINE_TAG
        .captures_iter(description)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let prefix = caps.get(1).map(|m| m.as_str());
            let separator = caps.get(5).map(|m| m.as_str());
            let trailing = caps.get(6).map(|m| m.as_str().trim()).unwrap_or_default();

            let (text, format) = match (prefix, separator) {
                (Some(text), _) => (text.to_string(), InlineFormat::Prefix),
                (None, Some("|")) => (trailing.to_string(), InlineFormat::Pipe),
                (None, Some(_)) if !trailing.is_empty() => {
                    (trailing.to_string(), InlineFormat::Space)
                }
                _ => (String::new(), InlineFormat::Plain),
            };

            Some(InlineTag {
                tag: caps[2].to_string(),
                namepath_or_url: caps
                    .get(4)
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_default(),
                text,
                format,
                span: whole.range(),
            })
        })
        .collect()
}
