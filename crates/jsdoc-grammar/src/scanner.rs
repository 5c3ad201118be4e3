//! Locates documentation comments within JavaScript source text.
//!
//! The scanner is a lexer over just enough of JavaScript to avoid mistaking
//! the contents of string literals, template literals and line comments for
//! comment openers. Regular expression literals are not recognized.

use std::ops::Range;

use logos::Logos;

use crate::Block;
use crate::parse_comment;

/// A token of JavaScript source as seen by the scanner.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
enum Token {
    /// A `/** ... */` comment.
    #[regex(r"/\*\*[^*]*\*+([^/*][^*]*\*+)*/", priority = 10)]
    DocComment,

    /// Any other block comment.
    #[regex(r"/\*[^*]*\*+([^/*][^*]*\*+)*/")]
    BlockComment,

    /// A line comment.
    #[regex(r"//[^\r\n]*", allow_greedy = true)]
    LineComment,

    /// A double quoted string literal.
    #[regex(r#""([^"\\\r\n]|\\(.|\n))*""#)]
    DoubleQuoted,

    /// A single quoted string literal.
    #[regex(r"'([^'\\\r\n]|\\(.|\n))*'")]
    SingleQuoted,

    /// A template literal.
    #[regex(r"`([^`\\]|\\(.|\n))*`")]
    Template,

    /// A run of text containing nothing the scanner cares about.
    #[regex(r#"[^/"'`]+"#)]
    Text,

    /// A lone slash.
    #[token("/")]
    Slash,
}

/// A documentation comment found in source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceComment<'a> {
    /// The text of the comment, from `/**` through `*/`.
    pub text: &'a str,
    /// The byte range of the comment within the source.
    pub span: Range<usize>,
    /// The zero-based line on which the comment starts.
    pub line: usize,
    /// The column, in characters, at which the comment starts.
    pub column: usize,
}

impl SourceComment<'_> {
    /// Parses the comment, indenting its first line by its column.
    pub fn parse(&self) -> Block {
        parse_comment(self.text, self.column)
    }
}

/// Iterates the documentation comments of JavaScript source text.
#[allow(missing_debug_implementations)]
pub struct Scanner<'a> {
    /// The underlying logos lexer.
    lexer: logos::Lexer<'a, Token>,
    /// The byte offset up to which lines have been counted.
    counted: usize,
    /// The number of line feeds before `counted`.
    line: usize,
}

impl<'a> Scanner<'a> {
    /// Creates a new scanner over the given source.
    pub fn new(source: &'a str) -> Self {
        Self {
            lexer: Token::lexer(source),
            counted: 0,
            line: 0,
        }
    }

    /// Builds the comment found at the given span.
    fn comment(&mut self, span: Range<usize>) -> SourceComment<'a> {
        let source = self.lexer.source();
        self.line += source[self.counted..span.start].matches('\n').count();
        self.counted = span.start;

        let line_start = source[..span.start].rfind('\n').map(|i| i + 1).unwrap_or(0);
        SourceComment {
            text: &source[span.clone()],
            line: self.line,
            column: source[line_start..span.start].chars().count(),
            span,
        }
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = SourceComment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            // Unterminated literals lex as errors; skip past them
            match self.lexer.next()? {
                Ok(Token::DocComment) => {
                    let span = self.lexer.span();
                    return Some(self.comment(span));
                }
                Ok(_) | Err(_) => continue,
            }
        }
    }
}

/// Finds and parses every documentation comment in the given source.
pub fn parse_source(source: &str) -> Vec<(SourceComment<'_>, Block)> {
    Scanner::new(source)
        .map(|comment| {
            let block = comment.parse();
            (comment, block)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn finds_doc_comments() {
        let source = r#"/** One */
const a = "/** not a comment */";
// /** also not */
/* plain */
function f() {
    /**
     * Two
     */
    return `/** ${a} */` / 2;
}
"#;
        let comments: Vec<_> = Scanner::new(source).collect();
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].text, "/** One */");
        assert_eq!(comments[0].line, 0);
        assert_eq!(comments[0].column, 0);
        assert_eq!(comments[1].text, "/**\n     * Two\n     */");
        assert_eq!(comments[1].line, 5);
        assert_eq!(comments[1].column, 4);
        assert_eq!(&source[comments[1].span.clone()], comments[1].text);
    }

    #[test]
    fn parses_with_indent() {
        let source = "class A {\n  /**\n   * @param {string} a\n   */\n  m(a) {}\n}\n";
        let parsed = parse_source(source);
        assert_eq!(parsed.len(), 1);
        let (_, block) = &parsed[0];
        assert_eq!(block.source[0].tokens.start, "  ");
        assert_eq!(block.tags[0].name, "a");
    }
}
