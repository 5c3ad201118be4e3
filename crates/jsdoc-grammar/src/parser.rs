//! Tokenization of documentation comments into blocks.
//!
//! Parsing happens in three stages:
//!
//! 1. Each physical line is split into its delimiter and spacing tokens and
//!    collected into a block once the close marker is seen.
//! 2. The lines of a block are grouped into sections; every line whose
//!    description starts with an `@word` opens a new tag section unless it
//!    lies within a fenced code region.
//! 3. Each tag section runs through the tag, type, name and description
//!    tokenizers. A critical problem stops the remaining tokenizers for that
//!    tag.
//!
//! Whitespace is always captured into tokens and never inferred, so
//! [`stringify`](crate::stringify) reproduces the parsed text exactly.

use std::collections::HashSet;
use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use crate::block::Block;
use crate::block::Line;
use crate::block::Problem;
use crate::block::ProblemKind;
use crate::block::Tag;
use crate::block::Tokens;
use crate::inline::parse_inline_tags;

/// The marker opening a documentation comment.
pub const START: &str = "/**";
/// A marker that looks like an opening but is not a documentation comment.
const NO_START: &str = "/***";
/// The marker that prefixes continuation lines.
pub const DELIMITER: &str = "*";
/// The marker closing a comment.
pub const END: &str = "*/";

/// The tags that never carry a type.
pub const DEFAULT_NO_TYPES: &[&str] = &[
    "default",
    "defaultvalue",
    "description",
    "example",
    "file",
    "fileoverview",
    "license",
    "overview",
    "see",
    "summary",
];

/// The tags that never carry a name.
pub const DEFAULT_NO_NAMES: &[&str] = &[
    "access",
    "author",
    "default",
    "defaultvalue",
    "description",
    "example",
    "exception",
    "file",
    "fileoverview",
    "kind",
    "license",
    "overview",
    "return",
    "returns",
    "since",
    "summary",
    "throws",
    "version",
    "variation",
];

/// Matches the tag at the start of a tag section.
static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(@(\S+))(\s*)").expect("tag pattern should compile"));

/// Matches a `@see` description linking to its target.
static SEE_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{@link.+?\}").expect("see pattern should compile"));

/// How descriptions spanning multiple lines are joined.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Spacing {
    /// Each line is trimmed and empty lines are dropped; lines are joined
    /// with a single space.
    #[default]
    Compact,
    /// Line structure is kept; lines are joined with newlines.
    Preserve,
}

/// Splits leading whitespace off a string.
fn split_space(s: &str) -> (&str, &str) {
    let rest = s.trim_start();
    s.split_at(s.len() - rest.len())
}

/// Determines if a description opens a new tag section.
fn starts_tag(description: &str) -> bool {
    let word = description.split(char::is_whitespace).next().unwrap_or("");
    word.len() > 1 && word.starts_with('@') && !word[1..].contains('/')
}

/// Collects physical lines into comment blocks.
#[derive(Debug, Default)]
struct LineCollector {
    /// The lines of the currently open block.
    block: Option<Vec<Line>>,
    /// The number of the next line.
    number: usize,
}

impl LineCollector {
    /// Pushes a physical line, returning the lines of a block once its close
    /// marker is seen.
    fn push(&mut self, source: &str) -> Option<Vec<Line>> {
        let mut tokens = Tokens::default();

        let mut rest = match source.strip_suffix('\r') {
            Some(rest) => {
                tokens.line_end = "\r".to_string();
                rest
            }
            None => source,
        };

        let (start, r) = split_space(rest);
        tokens.start = start.to_string();
        rest = r;

        if self.block.is_none() && rest.starts_with(START) && !rest.starts_with(NO_START) {
            self.block = Some(Vec::new());
            tokens.delimiter = START.to_string();
            let (post, r) = split_space(&rest[START.len()..]);
            tokens.post_delimiter = post.to_string();
            rest = r;
        }

        let number = self.number;
        self.number += 1;
        let block = self.block.as_mut()?;

        let closed = rest.trim_end().ends_with(END);

        if tokens.delimiter.is_empty() && rest.starts_with(DELIMITER) && !rest.starts_with(END) {
            tokens.delimiter = DELIMITER.to_string();
            let (post, r) = split_space(&rest[DELIMITER.len()..]);
            tokens.post_delimiter = post.to_string();
            rest = r;
        }

        if closed {
            let trimmed = rest.trim_end();
            if let Some(body) = trimmed.strip_suffix(END) {
                tokens.end = rest[body.len()..].to_string();
                rest = body;
            }
        }

        tokens.description = rest.to_string();
        block.push(Line::new(number, tokens));

        if closed { self.block.take() } else { None }
    }
}

/// A configurable documentation comment parser.
#[derive(Debug, Clone)]
pub struct Parser {
    /// How multi-line descriptions and types are joined.
    spacing: Spacing,
    /// The marker delimiting fenced code regions.
    fence: String,
    /// The tags for which no type is tokenized.
    no_types: HashSet<String>,
    /// The tags for which no name is tokenized.
    no_names: HashSet<String>,
}

impl Parser {
    /// Creates a parser with compact spacing and the default tag sets.
    pub fn new() -> Self {
        Self {
            spacing: Spacing::Compact,
            fence: "```".to_string(),
            no_types: DEFAULT_NO_TYPES.iter().map(|t| t.to_string()).collect(),
            no_names: DEFAULT_NO_NAMES.iter().map(|t| t.to_string()).collect(),
        }
    }

    /// Sets how multi-line descriptions and types are joined.
    pub fn with_spacing(mut self, spacing: Spacing) -> Self {
        self.spacing = spacing;
        self
    }

    /// Sets the marker delimiting fenced code regions.
    pub fn with_fence(mut self, fence: impl Into<String>) -> Self {
        self.fence = fence.into();
        self
    }

    /// Replaces the set of tags for which no type is tokenized.
    pub fn with_no_types<S: Into<String>>(mut self, tags: impl IntoIterator<Item = S>) -> Self {
        self.no_types = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the set of tags for which no name is tokenized.
    pub fn with_no_names<S: Into<String>>(mut self, tags: impl IntoIterator<Item = S>) -> Self {
        self.no_names = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Parses every documentation comment in the given text.
    ///
    /// Text outside of comments is skipped.
    pub fn parse_all(&self, text: &str) -> Vec<Block> {
        let mut collector = LineCollector::default();
        text.split('\n')
            .filter_map(|line| collector.push(line))
            .filter(|lines| !lines.is_empty())
            .map(|lines| self.parse_block(lines))
            .collect()
    }

    /// Parses the first documentation comment in the given text.
    ///
    /// Returns an empty block if the text contains no complete comment.
    pub fn parse(&self, text: &str) -> Block {
        self.parse_all(text).into_iter().next().unwrap_or_default()
    }

    /// Parses the lines of one block.
    fn parse_block(&self, mut source: Vec<Line>) -> Block {
        let sections = self.sections(&source);
        let (head, rest) = sections.split_first().expect("there is always a head section");

        let description = self.join_description(&source[head.clone()]);
        let tags: Vec<Tag> = rest
            .iter()
            .map(|range| self.parse_tag(&mut source, range.clone()))
            .collect();
        let problems = tags.iter().flat_map(|t| t.problems.iter().cloned()).collect();
        trace!(tags = tags.len(), lines = source.len(), "parsed comment block");

        Block {
            inline_tags: parse_inline_tags(&description),
            description,
            tags,
            source,
            problems,
        }
    }

    /// Groups the lines of a block into a head section followed by one
    /// section per tag.
    fn sections(&self, source: &[Line]) -> Vec<Range<usize>> {
        let mut sections = vec![0..0];
        let mut fenced = false;
        for (i, line) in source.iter().enumerate() {
            let description = &line.tokens.description;
            if starts_tag(description) && !fenced {
                sections.push(i..i + 1);
            } else if let Some(last) = sections.last_mut() {
                last.end = i + 1;
            }

            if !self.fence.is_empty() && description.matches(self.fence.as_str()).count() % 2 == 1 {
                fenced = !fenced;
            }
        }

        sections
    }

    /// Runs the tokenizers over one tag section.
    fn parse_tag(&self, source: &mut [Line], range: Range<usize>) -> Tag {
        let mut tag = Tag {
            lines: range.clone(),
            ..Default::default()
        };
        let lines = &mut source[range];

        tokenize_tag(&mut tag, lines);
        if is_critical(&tag) {
            return tag;
        }

        if !self.no_types.contains(&tag.tag) {
            tokenize_type(&mut tag, lines, self.spacing);
            if is_critical(&tag) {
                return tag;
            }
        }

        if tag.tag == "template" {
            tokenize_template_names(&mut tag, lines);
        } else if !self.no_names.contains(&tag.tag) && !is_see_with_link(&tag, lines) {
            tokenize_name(&mut tag, lines);
            if is_critical(&tag) {
                return tag;
            }
        }

        tag.description = self.join_description(lines);
        tag.inline_tags = parse_inline_tags(&tag.description);
        tag
    }

    /// Joins the description tokens of the given lines.
    fn join_description(&self, lines: &[Line]) -> String {
        match self.spacing {
            Spacing::Compact => lines
                .iter()
                .map(|l| l.tokens.description.trim())
                .filter(|d| !d.is_empty())
                .collect::<Vec<_>>()
                .join(" "),
            Spacing::Preserve => preserve_description(lines),
        }
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// Determines if the last problem of the tag is critical.
fn is_critical(tag: &Tag) -> bool {
    tag.problems.last().is_some_and(|p| p.critical)
}

/// Determines if a `@see` tag links to its target inline.
fn is_see_with_link(tag: &Tag, lines: &[Line]) -> bool {
    tag.tag == "see" && SEE_LINK.is_match(&lines[0].tokens.description)
}

/// Gets the index of the last line holding part of a type, or zero.
fn last_type_line(lines: &[Line]) -> usize {
    lines
        .iter()
        .enumerate()
        .filter(|(_, l)| !l.tokens.ty.is_empty())
        .map(|(i, _)| i)
        .last()
        .unwrap_or(0)
}

/// Joins description lines keeping their line structure.
fn preserve_description(mut lines: &[Line]) -> String {
    if let Some(first) = lines.first()
        && first.tokens.description.is_empty()
        && first.tokens.delimiter == START
    {
        lines = &lines[1..];
    }

    if let Some(last) = lines.last()
        && last.tokens.description.is_empty()
        && last.tokens.end.ends_with(END)
    {
        lines = &lines[..lines.len() - 1];
    }

    lines = &lines[last_type_line(lines)..];
    lines
        .iter()
        .map(|l| {
            let lead = if l.tokens.delimiter.is_empty() {
                l.tokens.start.as_str()
            } else {
                l.tokens.post_delimiter.get(1..).unwrap_or("")
            };
            format!("{lead}{description}", description = l.tokens.description)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Tokenizes the `@tag` of the first line.
fn tokenize_tag(tag: &mut Tag, lines: &mut [Line]) {
    let line = lines[0].number;
    let tokens = &mut lines[0].tokens;
    let Some(caps) = TAG.captures(&tokens.description) else {
        tag.problems.push(Problem::critical(ProblemKind::TagPrefix, line));
        return;
    };

    let consumed = caps[0].len();
    tokens.tag = caps[1].to_string();
    tokens.post_tag = caps[3].to_string();
    tag.tag = caps[2].to_string();
    tokens.description = tokens.description[consumed..].to_string();
}

/// Tracks brace depth across the characters of a type.
#[derive(Debug, Default)]
struct CurlyCounter {
    /// The current depth.
    depth: i32,
    /// The quote character of an open string literal.
    quote: Option<char>,
    /// Whether the previous character was an escaping backslash.
    escaped: bool,
}

impl CurlyCounter {
    /// Feeds a character to the counter.
    fn feed(&mut self, ch: char) {
        if let Some(q) = self.quote {
            if self.escaped {
                self.escaped = false;
            } else if ch == '\\' {
                self.escaped = true;
            } else if ch == q {
                self.quote = None;
            }
            return;
        }

        match ch {
            '{' => self.depth += 1,
            '}' => self.depth -= 1,
            '"' | '\'' | '`' => self.quote = Some(ch),
            _ => {}
        }
    }
}

/// Tokenizes the `{type}` following the tag, which may span several lines.
fn tokenize_type(tag: &mut Tag, lines: &mut [Line], spacing: Spacing) {
    let mut counter = CurlyCounter::default();
    let mut found: Vec<(usize, String)> = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        let description = &line.tokens.description;
        if i == 0 && !description.starts_with('{') {
            return;
        }

        let mut ty = String::new();
        for ch in description.chars() {
            counter.feed(ch);
            ty.push(ch);
            if counter.depth == 0 {
                break;
            }
        }

        found.push((i, ty));
        if counter.depth == 0 {
            break;
        }
    }

    if counter.depth != 0 {
        tag.problems.push(Problem::critical(ProblemKind::UnpairedCurlies, lines[0].number));
        return;
    }

    let offset = lines[0].tokens.post_delimiter.len();
    let mut parts = Vec::with_capacity(found.len());
    for (k, (i, ty)) in found.into_iter().enumerate() {
        let tokens = &mut lines[i].tokens;
        let rest = tokens.description[ty.len()..].to_string();
        if k == 0 {
            tokens.ty = ty;
        } else {
            let pd = std::mem::take(&mut tokens.post_delimiter);
            let cut = if pd.is_char_boundary(offset.min(pd.len())) {
                offset.min(pd.len())
            } else {
                pd.len()
            };
            tokens.post_delimiter = pd[..cut].to_string();
            tokens.ty = format!("{extra}{ty}", extra = &pd[cut..]);
        }

        let (post, description) = split_space(&rest);
        tokens.post_type = post.to_string();
        tokens.description = description.to_string();
        parts.push(tokens.ty.clone());
    }

    if let Some(first) = parts.first_mut() {
        first.remove(0);
    }
    if let Some(last) = parts.last_mut() {
        last.pop();
    }

    tag.ty = match spacing {
        Spacing::Compact => parts.iter().map(|p| p.trim()).collect(),
        Spacing::Preserve => parts.join("\n"),
    };
}

/// Determines if a default value is a double quoted string.
fn is_quoted(s: &str) -> bool {
    s.len() > 1 && s.starts_with('"') && s.ends_with('"')
}

/// Determines if a default value contains an `=` that does not start `=>`.
fn has_bare_equals(s: &str) -> bool {
    s.char_indices()
        .any(|(i, c)| c == '=' && !s[i + 1..].starts_with('>'))
}

/// Tokenizes the name on the line where the type ends.
fn tokenize_name(tag: &mut Tag, lines: &mut [Line]) {
    let line = lines[0].number;
    let tokens = &mut lines[last_type_line(lines)].tokens;
    let source = tokens.description.trim_start().to_string();

    let groups: Vec<&str> = source.split('"').collect();
    if groups.len() > 1 && groups[0].is_empty() && groups.len() % 2 == 1 {
        tag.name = groups[1].to_string();
        tokens.name = format!("\"{name}\"", name = groups[1]);
        let (post, description) = split_space(&source[tokens.name.len()..]);
        tokens.post_name = post.to_string();
        tokens.description = description.to_string();
        return;
    }

    let mut brackets = 0i32;
    let mut name = String::new();
    for ch in source.chars() {
        if brackets == 0 && ch.is_whitespace() {
            break;
        }
        match ch {
            '[' => brackets += 1,
            ']' => brackets -= 1,
            _ => {}
        }
        name.push(ch);
    }

    if brackets != 0 {
        tag.problems.push(Problem::critical(ProblemKind::UnpairedBrackets, line));
        return;
    }

    let token = name.clone();
    if name.len() >= 2 && name.starts_with('[') && name.ends_with(']') {
        let inner = &token[1..token.len() - 1];
        let mut parts = inner.split('=');
        let bare = parts.next().unwrap_or("").trim();
        let rest: Vec<&str> = parts.collect();
        let default = (!rest.is_empty()).then(|| rest.join("=").trim().to_string());

        if bare.is_empty() {
            tag.problems.push(Problem::critical(ProblemKind::EmptyName, line));
            return;
        }

        if let Some(default) = &default {
            if default.is_empty() {
                tag.problems.push(Problem::critical(ProblemKind::EmptyDefault, line));
                return;
            }

            if !is_quoted(default) && has_bare_equals(default) {
                tag.problems.push(Problem::critical(ProblemKind::InvalidDefault, line));
                return;
            }
        }

        tag.optional = true;
        tag.default = default;
        name = bare.to_string();
    }

    tag.name = name;
    let (post, description) = split_space(&source[token.len()..]);
    tokens.name = token;
    tokens.post_name = post.to_string();
    tokens.description = description.to_string();
}

/// Finds the first whitespace not preceded by whitespace or a comma.
fn template_name_end(s: &str) -> Option<usize> {
    let mut prev: Option<char> = None;
    for (i, c) in s.char_indices() {
        if c.is_whitespace() && !prev.is_some_and(|p| p.is_whitespace() || p == ',') {
            return Some(i);
        }
        prev = Some(c);
    }

    None
}

/// Tokenizes the comma separated names of a `@template` tag.
fn tokenize_template_names(tag: &mut Tag, lines: &mut [Line]) {
    let tokens = &mut lines[0].tokens;
    let remainder = std::mem::take(&mut tokens.description);

    let end = match remainder.rfind(']') {
        Some(close) if remainder.starts_with('[') => {
            template_name_end(&remainder[close..]).map(|p| p + close)
        }
        _ => template_name_end(&remainder),
    };

    let (name, post, description) = match end {
        Some(end) => {
            let (post, description) = split_space(&remainder[end..]);
            (&remainder[..end], post, description)
        }
        None => (remainder.as_str(), "", ""),
    };

    let inner = name
        .strip_prefix('[')
        .and_then(|n| n.strip_suffix(']'))
        .filter(|n| !n.is_empty() && !n.contains(char::is_whitespace));
    tag.optional = inner.is_some();
    tag.name = inner.unwrap_or(name).trim().to_string();
    tokens.name = name.to_string();
    tokens.post_name = post.to_string();
    tokens.description = description.to_string();
}

/// Splits the names of a Closure or TypeScript `@template` tag.
///
/// Default values written as `[T=Default]` are dropped.
pub fn parse_template_names(name: &str) -> Vec<String> {
    name.split(',')
        .map(|n| {
            let n = n.trim();
            match n.strip_prefix('[').and_then(|n| n.strip_suffix(']')) {
                Some(inner) if inner.contains('=') => {
                    inner.split('=').next().unwrap_or(inner).to_string()
                }
                _ => n.to_string(),
            }
        })
        .collect()
}

/// Parses one documentation comment with the default parser settings used
/// by lint rules.
///
/// The comment is prefixed with `indent` spaces so that the first line's
/// `start` token reflects the column at which the comment begins in its
/// source file.
pub fn parse_comment(text: &str, indent: usize) -> Block {
    let text = format!("{pad}{text}", pad = " ".repeat(indent));
    Parser::new().with_spacing(Spacing::Preserve).parse(&text)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::stringify;

    /// Parses a comment with the default parser.
    fn parse(text: &str) -> Block {
        Parser::new().parse(text)
    }

    #[test]
    fn line_tokens() {
        let block = parse("/**\n * @param {string} name The name.\n */");
        assert_eq!(block.source.len(), 3);
        let tokens = &block.source[1].tokens;
        assert_eq!(tokens.start, " ");
        assert_eq!(tokens.delimiter, "*");
        assert_eq!(tokens.post_delimiter, " ");
        assert_eq!(tokens.tag, "@param");
        assert_eq!(tokens.post_tag, " ");
        assert_eq!(tokens.ty, "{string}");
        assert_eq!(tokens.post_type, " ");
        assert_eq!(tokens.name, "name");
        assert_eq!(tokens.post_name, " ");
        assert_eq!(tokens.description, "The name.");
        assert_eq!(block.source[2].tokens.end, "*/");
        assert!(block.source[0].is_opening());
        assert!(block.source[2].is_closing());

        let tag = &block.tags[0];
        assert_eq!(tag.tag, "param");
        assert_eq!(tag.ty, "string");
        assert_eq!(tag.name, "name");
        assert_eq!(tag.description, "The name.");
        assert_eq!(tag.lines, 1..3);
    }

    #[test]
    fn single_line() {
        let block = parse("/** @type {number} */");
        assert_eq!(block.source.len(), 1);
        let tokens = &block.source[0].tokens;
        assert_eq!(tokens.delimiter, "/**");
        assert_eq!(tokens.post_delimiter, " ");
        assert_eq!(tokens.tag, "@type");
        assert_eq!(tokens.ty, "{number}");
        assert_eq!(tokens.end, "*/");
        assert_eq!(block.tags[0].ty, "number");
    }

    #[test]
    fn description_and_tags() {
        let block = parse("/**\n * Adds things.\n * More.\n *\n * @returns {number} Sum.\n */");
        assert_eq!(block.description, "Adds things. More.");
        assert_eq!(block.tags.len(), 1);
        assert_eq!(block.tags[0].tag, "returns");
        assert_eq!(block.tags[0].name, "");
        assert_eq!(block.tags[0].description, "Sum.");
    }

    #[test]
    fn preserved_description() {
        let block = parse_comment("/**\n * Adds things.\n *\n * More.\n */", 0);
        assert_eq!(block.description, "Adds things.\n\nMore.");
    }

    #[test]
    fn round_trip() {
        for text in [
            "/** */",
            "/**\n * Foo.\n */",
            "  /**\r\n   * @param {Object<string, number>} [a=1] - Thing\r\n   */",
            "/**\n * @param {{\n *   a: string\n * }} b desc\n */",
            "/**\n     no delimiter @here\n*/  ",
            "/**\n * ```\n * @notatag\n * ```\n * @since 1.0\n */",
        ] {
            let blocks = Parser::new().parse_all(text);
            assert_eq!(blocks.len(), 1, "`{text}` should be one block");
            assert_eq!(stringify(&blocks[0]), text);
        }
    }

    #[test]
    fn fenced_tags_are_description() {
        let block = parse("/**\n * ```\n * @notatag\n * ```\n * @since 1.0\n */");
        assert_eq!(block.tags.len(), 1);
        assert_eq!(block.tags[0].tag, "since");
        assert!(block.description.contains("@notatag"));
    }

    #[test]
    fn multiline_type() {
        let block = parse("/**\n * @param {{\n *   a: string\n * }} b desc\n */");
        let tag = &block.tags[0];
        assert_eq!(tag.ty, "{a: string}");
        assert_eq!(tag.name, "b");
        assert_eq!(tag.description, "desc");
        assert_eq!(block.source[2].tokens.post_delimiter, " ");
        assert_eq!(block.source[2].tokens.ty, "  a: string");
        assert_eq!(block.source[3].tokens.ty, "}}");
        assert_eq!(block.source[3].tokens.name, "b");
    }

    #[test]
    fn braces_in_strings() {
        let block = parse("/** @param {'}' | \"{\"} a */");
        assert!(block.problems.is_empty());
        assert_eq!(block.tags[0].ty, "'}' | \"{\"");
        assert_eq!(block.tags[0].name, "a");
    }

    #[test]
    fn optional_names() {
        let block = parse("/**\n * @param {string} [a=\"x y\"] desc\n * @param [b]\n */");
        assert_eq!(block.tags[0].name, "a");
        assert!(block.tags[0].optional);
        assert_eq!(block.tags[0].default.as_deref(), Some("\"x y\""));
        assert_eq!(block.tags[0].description, "desc");
        assert_eq!(block.tags[1].name, "b");
        assert!(block.tags[1].optional);
        assert_eq!(block.tags[1].default, None);
    }

    #[test]
    fn quoted_name() {
        let block = parse("/** @event \"change:value\" fired */");
        assert_eq!(block.tags[0].name, "change:value");
        assert_eq!(block.source[0].tokens.name, "\"change:value\"");
        assert_eq!(block.tags[0].description, "fired");
    }

    #[test]
    fn name_problems() {
        let cases = [
            ("/** @param {string} [a */", ProblemKind::UnpairedBrackets),
            ("/** @param {string} [] */", ProblemKind::EmptyName),
            ("/** @param {string} [a=] */", ProblemKind::EmptyDefault),
            ("/** @param {string} [a=b=c] */", ProblemKind::InvalidDefault),
            ("/** @param {string */", ProblemKind::UnpairedCurlies),
        ];
        for (text, kind) in cases {
            let block = parse(text);
            assert_eq!(block.problems.len(), 1, "`{text}`");
            assert_eq!(block.problems[0].kind, kind, "`{text}`");
            assert!(block.problems[0].critical);
            assert_eq!(stringify(&block), text);
        }

        let block = parse("/** @param {Function} [cb=() => {}] */");
        assert!(block.problems.is_empty());
        assert_eq!(block.tags[0].default.as_deref(), Some("() => {}"));
    }

    #[test]
    fn nameless_tags() {
        let block = parse("/**\n * @returns {string} The thing.\n * @see {@link foo} bar\n */");
        assert_eq!(block.tags[0].name, "");
        assert_eq!(block.tags[0].description, "The thing.");
        assert_eq!(block.tags[1].name, "");
        assert_eq!(block.tags[1].inline_tags.len(), 1);
    }

    #[test]
    fn template_names() {
        let block = parse("/** @template T, U Some types */");
        assert_eq!(block.tags[0].name, "T, U");
        assert_eq!(block.tags[0].description, "Some types");

        let block = parse("/** @template [T=string] desc */");
        assert_eq!(block.tags[0].name, "T=string");
        assert!(block.tags[0].optional);

        assert_eq!(parse_template_names("T, [U=number], V"), ["T", "U", "V"]);
    }

    #[test]
    fn indented_comment() {
        let block = parse_comment("/**\n     * @param a\n     */", 4);
        assert_eq!(block.source[0].tokens.start, "    ");
        assert_eq!(block.source[1].tokens.start, "     ");
    }
}
