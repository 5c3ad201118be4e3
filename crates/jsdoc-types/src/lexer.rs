//! The lexer for type expressions.

use std::ops::Range;

use logos::Logos;

use crate::TypeError;

/// A token of a type expression.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token {
    /// An identifier or keyword.
    #[regex(r"[A-Za-z_$\u{80}-\u{10FFFF}][A-Za-z0-9_$\u{80}-\u{10FFFF}]*")]
    Identifier,

    /// A `module:`, `event:` or `external:` name.
    #[regex(r#"(module|event|external):([A-Za-z0-9_$@/\-\u{80}-\u{10FFFF}]+|"[^"]*"|'[^']*')"#)]
    SpecialName,

    /// A double quoted string.
    #[regex(r#""([^"\\\n]|\\.)*""#)]
    DoubleQuoted,

    /// A single quoted string.
    #[regex(r"'([^'\\\n]|\\.)*'")]
    SingleQuoted,

    /// A number literal.
    #[regex(r"-?[0-9]+(\.[0-9]+)?([eE][+-]?[0-9]+)?")]
    Number,

    /// `{`
    #[token("{")]
    OpenBrace,
    /// `}`
    #[token("}")]
    CloseBrace,
    /// `(`
    #[token("(")]
    OpenParen,
    /// `)`
    #[token(")")]
    CloseParen,
    /// `[`
    #[token("[")]
    OpenBracket,
    /// `]`
    #[token("]")]
    CloseBracket,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// `,`
    #[token(",")]
    Comma,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `:`
    #[token(":")]
    Colon,
    /// `|`
    #[token("|")]
    Pipe,
    /// `&`
    #[token("&")]
    Ampersand,
    /// `!`
    #[token("!")]
    Bang,
    /// `?`
    #[token("?")]
    Question,
    /// `=`
    #[token("=")]
    Equals,
    /// `=>`
    #[token("=>")]
    Arrow,
    /// `.`
    #[token(".")]
    Dot,
    /// `...`
    #[token("...")]
    Ellipsis,
    /// `#`
    #[token("#")]
    Hash,
    /// `~`
    #[token("~")]
    Tilde,
    /// `*`
    #[token("*")]
    Asterisk,
}

impl Token {
    /// Determines if the token can begin a type.
    pub fn starts_type(&self) -> bool {
        matches!(
            self,
            Self::Identifier
                | Self::SpecialName
                | Self::DoubleQuoted
                | Self::SingleQuoted
                | Self::Number
                | Self::OpenBrace
                | Self::OpenParen
                | Self::OpenBracket
                | Self::Bang
                | Self::Question
                | Self::Ellipsis
                | Self::Asterisk
        )
    }

    /// Describes the token for error messages.
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Identifier => "identifier",
            Self::SpecialName => "special name",
            Self::DoubleQuoted | Self::SingleQuoted => "string",
            Self::Number => "number",
            Self::OpenBrace => "`{`",
            Self::CloseBrace => "`}`",
            Self::OpenParen => "`(`",
            Self::CloseParen => "`)`",
            Self::OpenBracket => "`[`",
            Self::CloseBracket => "`]`",
            Self::Less => "`<`",
            Self::Greater => "`>`",
            Self::Comma => "`,`",
            Self::Semicolon => "`;`",
            Self::Colon => "`:`",
            Self::Pipe => "`|`",
            Self::Ampersand => "`&`",
            Self::Bang => "`!`",
            Self::Question => "`?`",
            Self::Equals => "`=`",
            Self::Arrow => "`=>`",
            Self::Dot => "`.`",
            Self::Ellipsis => "`...`",
            Self::Hash => "`#`",
            Self::Tilde => "`~`",
            Self::Asterisk => "`*`",
        }
    }
}

/// Lexes a type expression into its tokens and their spans.
pub fn lex(text: &str) -> Result<Vec<(Token, Range<usize>)>, TypeError> {
    let mut lexer = Token::lexer(text);
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next() {
        match token {
            Ok(token) => tokens.push((token, lexer.span())),
            Err(()) => {
                return Err(TypeError::InvalidCharacter {
                    text: lexer.slice().to_string(),
                    offset: lexer.span().start,
                });
            }
        }
    }

    Ok(tokens)
}
