//! A recursive descent parser for type expressions.
//!
//! The grammar in order of increasing precedence:
//!
//! ```text
//! type         := union ('extends' union '?' type ':' type)?
//! union        := intersection ('|' intersection)*
//! intersection := prefix ('&' prefix)*
//! prefix       := ('?' | '!' | '...' | 'keyof' | 'typeof' | 'readonly') prefix
//!               | postfix
//! postfix      := primary ('[]' | '?' | '!' | '=' | '...' | '.' segment
//!               | '#' segment | '~' segment | '.'? '<' types '>' | 'is' union)*
//! ```
//!
//! Constructs outside of the active dialect are rejected with
//! [`TypeError::Unsupported`].

use std::ops::Range;

use jsdoc_grammar::Mode;
use thiserror::Error;
use tracing::trace;

use crate::Brackets;
use crate::Key;
use crate::ObjectField;
use crate::PathKind;
use crate::PathSegment;
use crate::Position;
use crate::Quote;
use crate::Separator;
use crate::SpecialKind;
use crate::TypeNode;
use crate::lexer::Token;
use crate::lexer::lex;

/// An error for a type expression that does not parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    /// The expression was empty.
    #[error("empty type expression")]
    Empty,
    /// The expression ended early.
    #[error("unexpected end of type expression")]
    UnexpectedEnd,
    /// A token appeared where it is not allowed.
    #[error("unexpected {found} `{text}` at offset {offset}")]
    UnexpectedToken {
        /// A description of the token.
        found: &'static str,
        /// The text of the token.
        text: String,
        /// The byte offset of the token.
        offset: usize,
    },
    /// A character that cannot start any token.
    #[error("invalid character `{text}` at offset {offset}")]
    InvalidCharacter {
        /// The offending text.
        text: String,
        /// The byte offset of the text.
        offset: usize,
    },
    /// A construct of another dialect was used.
    #[error("{construct} is not supported in {mode} mode")]
    Unsupported {
        /// The name of the construct.
        construct: &'static str,
        /// The active mode.
        mode: Mode,
        /// The byte offset of the construct.
        offset: usize,
    },
    /// The expression nests deeper than [`MAX_DEPTH`].
    #[error("type expression nested too deeply at offset {offset}")]
    TooDeep {
        /// The byte offset at which the limit was reached.
        offset: usize,
    },
}

/// The deepest nesting of types and prefix operators a parse descends into.
pub const MAX_DEPTH: usize = 256;

/// The result type for parsing.
type Result<T> = std::result::Result<T, TypeError>;

/// A parser over the tokens of one type expression.
struct Parser<'a> {
    /// The text being parsed.
    text: &'a str,
    /// The tokens of the text.
    tokens: Vec<(Token, Range<usize>)>,
    /// The index of the next token.
    pos: usize,
    /// The mode whose grammar is used.
    mode: Mode,
    /// Whether TypeScript-only constructs are accepted.
    typescript: bool,
    /// Whether `typeof` is accepted.
    type_of: bool,
    /// Whether missing closing delimiters at the end are tolerated.
    recover: bool,
    /// The current nesting depth.
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Creates a parser for the given text and mode.
    fn new(text: &'a str, mode: Mode) -> Result<Self> {
        let tokens = lex(text)?;
        Ok(Self {
            text,
            tokens,
            pos: 0,
            mode,
            typescript: matches!(mode, Mode::Typescript | Mode::Permissive),
            type_of: mode != Mode::Jsdoc,
            recover: false,
            depth: 0,
        })
    }

    /// Makes the parser tolerate missing closing delimiters.
    fn recovering(mut self) -> Self {
        self.recover = true;
        self
    }

    /// Peeks at the token `n` positions ahead.
    fn peek_at(&self, n: usize) -> Option<Token> {
        self.tokens.get(self.pos + n).map(|(t, _)| *t)
    }

    /// Peeks at the next token.
    fn peek(&self) -> Option<Token> {
        self.peek_at(0)
    }

    /// Gets the text of the token at the given index.
    fn slice(&self, index: usize) -> &'a str {
        &self.text[self.tokens[index].1.clone()]
    }

    /// Gets the byte offset of the next token.
    fn offset(&self) -> usize {
        self.tokens
            .get(self.pos)
            .map(|(_, s)| s.start)
            .unwrap_or(self.text.len())
    }

    /// Consumes the next token, returning it and its index.
    fn bump(&mut self) -> Option<(Token, usize)> {
        let token = self.peek()?;
        self.pos += 1;
        Some((token, self.pos - 1))
    }

    /// Determines if the next token is the given one.
    fn at(&self, token: Token) -> bool {
        self.peek() == Some(token)
    }

    /// Determines if the next token is the given keyword.
    fn at_keyword(&self, keyword: &str) -> bool {
        self.at(Token::Identifier) && self.slice(self.pos) == keyword
    }

    /// Determines if the token after the next one can start a type.
    fn followed_by_type(&self) -> bool {
        self.peek_at(1).is_some_and(|t| t.starts_type())
    }

    /// Determines if the tokens `n` positions ahead are `[]`.
    fn array_suffix_at(&self, n: usize) -> bool {
        self.peek_at(n) == Some(Token::OpenBracket)
            && self.peek_at(n + 1) == Some(Token::CloseBracket)
    }

    /// Consumes the next token if it is the given one.
    fn eat(&mut self, token: Token) -> bool {
        if self.at(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consumes the given token or fails.
    fn expect(&mut self, token: Token) -> Result<()> {
        if self.eat(token) {
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    /// Consumes a closing delimiter, tolerating its absence at the end of a
    /// recovering parse.
    fn close(&mut self, token: Token) -> Result<()> {
        if self.recover && self.peek().is_none() {
            trace!(delimiter = token.describe(), "recovered a missing delimiter");
            return Ok(());
        }

        self.expect(token)
    }

    /// Creates an error for the token at the given index, or for the end of
    /// input.
    fn unexpected_at(&self, index: usize) -> TypeError {
        match self.tokens.get(index) {
            Some((token, span)) => TypeError::UnexpectedToken {
                found: token.describe(),
                text: self.text[span.clone()].to_string(),
                offset: span.start,
            },
            None => TypeError::UnexpectedEnd,
        }
    }

    /// Creates an error for the next token.
    fn unexpected(&self) -> TypeError {
        self.unexpected_at(self.pos)
    }

    /// Fails unless TypeScript constructs are accepted.
    fn require_typescript(&self, construct: &'static str, offset: usize) -> Result<()> {
        if self.typescript {
            Ok(())
        } else {
            Err(TypeError::Unsupported {
                construct,
                mode: self.mode,
                offset,
            })
        }
    }

    /// Runs a nested parse, failing once the nesting exceeds [`MAX_DEPTH`].
    fn nested<T>(&mut self, parse: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.depth >= MAX_DEPTH {
            return Err(TypeError::TooDeep {
                offset: self.offset(),
            });
        }

        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    /// Parses the whole input as one type.
    fn parse_root(&mut self) -> Result<TypeNode> {
        if self.tokens.is_empty() {
            return Err(TypeError::Empty);
        }

        let node = self.parse_type()?;
        if self.pos < self.tokens.len() {
            return Err(self.unexpected());
        }

        Ok(node)
    }

    /// Parses a type, including a conditional type.
    fn parse_type(&mut self) -> Result<TypeNode> {
        self.nested(Self::parse_conditional)
    }

    /// Parses a union, then the branches of a conditional type if one
    /// follows.
    fn parse_conditional(&mut self) -> Result<TypeNode> {
        let check = self.parse_union()?;
        if !self.typescript || !self.at_keyword("extends") {
            return Ok(check);
        }

        self.pos += 1;
        let extends = self.parse_union()?;
        self.expect(Token::Question)?;
        let then = self.parse_type()?;
        self.expect(Token::Colon)?;
        let otherwise = self.parse_type()?;
        Ok(TypeNode::Conditional {
            check: Box::new(check),
            extends: Box::new(extends),
            then: Box::new(then),
            otherwise: Box::new(otherwise),
        })
    }

    /// Parses a union.
    fn parse_union(&mut self) -> Result<TypeNode> {
        let first = self.parse_intersection()?;
        if !self.at(Token::Pipe) {
            return Ok(first);
        }

        let mut elements = vec![first];
        while self.eat(Token::Pipe) {
            elements.push(self.parse_intersection()?);
        }

        Ok(TypeNode::Union(elements))
    }

    /// Parses an intersection.
    fn parse_intersection(&mut self) -> Result<TypeNode> {
        let first = self.parse_prefix()?;
        if !self.at(Token::Ampersand) {
            return Ok(first);
        }

        self.require_typescript("intersection", self.offset())?;
        let mut elements = vec![first];
        while self.eat(Token::Ampersand) {
            elements.push(self.parse_prefix()?);
        }

        Ok(TypeNode::Intersection(elements))
    }

    /// Parses prefix operators.
    fn parse_prefix(&mut self) -> Result<TypeNode> {
        self.nested(Self::parse_prefix_operator)
    }

    /// Parses one prefix operator and its operand, or a postfix expression.
    fn parse_prefix_operator(&mut self) -> Result<TypeNode> {
        match self.peek() {
            Some(Token::Question) if self.followed_by_type() => {
                self.pos += 1;
                let element = self.parse_prefix()?;
                Ok(TypeNode::Nullable(Box::new(element), Position::Prefix))
            }
            Some(Token::Bang) => {
                self.pos += 1;
                let element = self.parse_prefix()?;
                Ok(TypeNode::NotNullable(Box::new(element), Position::Prefix))
            }
            Some(Token::Ellipsis) => {
                self.pos += 1;
                if self.peek().is_some_and(|t| t.starts_type()) {
                    let element = self.parse_prefix()?;
                    Ok(TypeNode::Variadic(Some(Box::new(element)), Position::Prefix))
                } else {
                    Ok(TypeNode::Variadic(None, Position::Prefix))
                }
            }
            Some(Token::Identifier) if self.followed_by_type() => {
                match self.slice(self.pos) {
                    "keyof" if self.typescript => {
                        self.pos += 1;
                        Ok(TypeNode::KeyOf(Box::new(self.parse_prefix()?)))
                    }
                    "typeof" if self.type_of => {
                        self.pos += 1;
                        Ok(TypeNode::TypeOf(Box::new(self.parse_prefix()?)))
                    }
                    "readonly" if self.typescript => {
                        self.pos += 1;
                        Ok(TypeNode::ReadonlyArray(Box::new(self.parse_prefix()?)))
                    }
                    _ => self.parse_postfix(),
                }
            }
            _ => self.parse_postfix(),
        }
    }

    /// Parses a primary type followed by postfix operators.
    fn parse_postfix(&mut self) -> Result<TypeNode> {
        let mut node = self.parse_primary()?;
        loop {
            node = match self.peek() {
                Some(Token::OpenBracket) if self.array_suffix_at(0) => {
                    self.pos += 2;
                    TypeNode::Generic {
                        left: Box::new(TypeNode::name("Array")),
                        elements: vec![node],
                        brackets: Brackets::Square,
                        dot: false,
                    }
                }
                Some(Token::Question) if !self.followed_by_type() || self.array_suffix_at(1) => {
                    self.pos += 1;
                    TypeNode::Nullable(Box::new(node), Position::Suffix)
                }
                Some(Token::Bang) if !self.followed_by_type() || self.array_suffix_at(1) => {
                    self.pos += 1;
                    TypeNode::NotNullable(Box::new(node), Position::Suffix)
                }
                Some(Token::Equals) => {
                    self.pos += 1;
                    TypeNode::Optional(Box::new(node), Position::Suffix)
                }
                Some(Token::Ellipsis) if !self.followed_by_type() => {
                    self.pos += 1;
                    TypeNode::Variadic(Some(Box::new(node)), Position::Suffix)
                }
                Some(Token::Dot) if self.peek_at(1) == Some(Token::Less) => {
                    self.pos += 1;
                    self.parse_generic(node, true)?
                }
                Some(Token::Less) => self.parse_generic(node, false)?,
                Some(Token::Dot) => self.parse_path(node, PathKind::Property)?,
                Some(Token::Hash) => self.parse_path(node, PathKind::Instance)?,
                Some(Token::Tilde) => self.parse_path(node, PathKind::Inner)?,
                Some(Token::Identifier)
                    if self.typescript
                        && self.at_keyword("is")
                        && node.as_name().is_some()
                        && self.followed_by_type() =>
                {
                    self.pos += 1;
                    let right = self.parse_union()?;
                    let TypeNode::Name(name) = node else {
                        unreachable!("predicates are only parsed after names")
                    };
                    return Ok(TypeNode::Predicate(name, Box::new(right)));
                }
                _ => return Ok(node),
            };
        }
    }

    /// Parses the type arguments of a generic; the next token is `<`.
    fn parse_generic(&mut self, left: TypeNode, dot: bool) -> Result<TypeNode> {
        self.expect(Token::Less)?;
        let mut elements = vec![self.parse_type()?];
        while self.eat(Token::Comma) {
            elements.push(self.parse_type()?);
        }

        self.close(Token::Greater)?;
        Ok(TypeNode::Generic {
            left: Box::new(left),
            elements,
            brackets: Brackets::Angle,
            dot,
        })
    }

    /// Parses the segment of a name path; the next token is the separator.
    fn parse_path(&mut self, left: TypeNode, kind: PathKind) -> Result<TypeNode> {
        self.pos += 1;
        let right = match self.bump() {
            Some((Token::Identifier | Token::Number, index)) => {
                PathSegment::Name(self.slice(index).to_string())
            }
            Some((Token::DoubleQuoted, index)) => {
                PathSegment::Quoted(unquote(self.slice(index)).to_string(), Quote::Double)
            }
            Some((Token::SingleQuoted, index)) => {
                PathSegment::Quoted(unquote(self.slice(index)).to_string(), Quote::Single)
            }
            Some((Token::SpecialName, index)) => {
                let (kind, value) = special_name(self.slice(index));
                PathSegment::Special(kind, value.to_string())
            }
            Some((_, index)) => return Err(self.unexpected_at(index)),
            None => return Err(TypeError::UnexpectedEnd),
        };

        Ok(TypeNode::Namepath {
            left: Box::new(left),
            right,
            kind,
        })
    }

    /// Parses a primary type.
    fn parse_primary(&mut self) -> Result<TypeNode> {
        let offset = self.offset();
        let Some((token, index)) = self.bump() else {
            return Err(TypeError::UnexpectedEnd);
        };

        match token {
            Token::Identifier => {
                let text = self.slice(index);
                match text {
                    "function" if self.at(Token::OpenParen) => self.parse_function(),
                    "new" if self.typescript && self.at(Token::OpenParen) => {
                        self.pos += 1;
                        match self.parse_arrow(true)? {
                            Some(node) => Ok(node),
                            None => Err(self.unexpected()),
                        }
                    }
                    "import" if self.typescript && self.at(Token::OpenParen) => {
                        self.pos += 1;
                        let node = match self.bump() {
                            Some((Token::DoubleQuoted, index)) => {
                                TypeNode::Import(unquote(self.slice(index)).to_string(), Quote::Double)
                            }
                            Some((Token::SingleQuoted, index)) => {
                                TypeNode::Import(unquote(self.slice(index)).to_string(), Quote::Single)
                            }
                            Some((_, index)) => return Err(self.unexpected_at(index)),
                            None => return Err(TypeError::UnexpectedEnd),
                        };
                        self.close(Token::CloseParen)?;
                        Ok(node)
                    }
                    _ => Ok(TypeNode::name(text)),
                }
            }
            Token::SpecialName => {
                let (kind, value) = special_name(self.slice(index));
                Ok(TypeNode::SpecialName(kind, value.to_string()))
            }
            Token::DoubleQuoted => Ok(TypeNode::StringValue(
                unquote(self.slice(index)).to_string(),
                Quote::Double,
            )),
            Token::SingleQuoted => Ok(TypeNode::StringValue(
                unquote(self.slice(index)).to_string(),
                Quote::Single,
            )),
            Token::Number => Ok(TypeNode::NumberValue(self.slice(index).to_string())),
            Token::Asterisk => Ok(TypeNode::Any),
            Token::Question => Ok(TypeNode::Unknown),
            Token::OpenParen => {
                if self.typescript
                    && let Some(node) = self.parse_arrow(false)?
                {
                    return Ok(node);
                }

                let inner = self.parse_type()?;
                self.close(Token::CloseParen)?;
                Ok(TypeNode::Parenthesis(Box::new(inner)))
            }
            Token::OpenBrace => self.parse_object(),
            Token::OpenBracket => {
                self.require_typescript("tuple", offset)?;
                let mut elements = Vec::new();
                while !self.at(Token::CloseBracket) && self.peek().is_some() {
                    elements.push(self.parse_type()?);
                    if !self.eat(Token::Comma) {
                        break;
                    }
                }

                self.close(Token::CloseBracket)?;
                Ok(TypeNode::Tuple(elements))
            }
            _ => Err(self.unexpected_at(index)),
        }
    }

    /// Parses a Closure function type; the next token is `(`.
    fn parse_function(&mut self) -> Result<TypeNode> {
        self.expect(Token::OpenParen)?;
        let mut parameters = Vec::new();
        while !self.at(Token::CloseParen) && self.peek().is_some() {
            let named = self.at(Token::Identifier)
                && self.peek_at(1) == Some(Token::Colon)
                && (self.typescript || matches!(self.slice(self.pos), "this" | "new"));
            if named {
                let key = self.slice(self.pos).to_string();
                self.pos += 2;
                let right = self.parse_type()?;
                parameters.push(TypeNode::KeyValue {
                    key,
                    right: Some(Box::new(right)),
                    optional: false,
                    variadic: false,
                });
            } else {
                parameters.push(self.parse_type()?);
            }

            if !self.eat(Token::Comma) {
                break;
            }
        }

        self.close(Token::CloseParen)?;
        let returns = if self.eat(Token::Colon) {
            Some(Box::new(self.parse_prefix()?))
        } else {
            None
        };

        Ok(TypeNode::Function {
            parameters,
            returns,
            arrow: false,
            constructor: false,
        })
    }

    /// Attempts to parse an arrow function whose `(` was consumed.
    ///
    /// Returns `None` with the position restored if the parenthesized text is
    /// not an arrow parameter list.
    fn parse_arrow(&mut self, constructor: bool) -> Result<Option<TypeNode>> {
        let start = self.pos;
        let Some(parameters) = self.arrow_parameters() else {
            self.pos = start;
            return Ok(None);
        };

        let returns = self.parse_type()?;
        Ok(Some(TypeNode::Function {
            parameters,
            returns: Some(Box::new(returns)),
            arrow: true,
            constructor,
        }))
    }

    /// Parses arrow parameters through the closing `)` and the `=>`.
    fn arrow_parameters(&mut self) -> Option<Vec<TypeNode>> {
        let mut parameters = Vec::new();
        while !self.at(Token::CloseParen) {
            let variadic = self.eat(Token::Ellipsis);
            if !self.at(Token::Identifier) {
                return None;
            }

            let key = self.slice(self.pos).to_string();
            self.pos += 1;
            let optional = self.eat(Token::Question);
            let right = if self.eat(Token::Colon) {
                Some(Box::new(self.parse_type().ok()?))
            } else {
                None
            };

            parameters.push(TypeNode::KeyValue {
                key,
                right,
                optional,
                variadic,
            });

            if !self.eat(Token::Comma) {
                break;
            }
        }

        (self.eat(Token::CloseParen) && self.eat(Token::Arrow)).then_some(parameters)
    }

    /// Parses an object type; the `{` was consumed.
    fn parse_object(&mut self) -> Result<TypeNode> {
        let mut fields = Vec::new();
        let mut separator = Separator::Comma;
        while !self.at(Token::CloseBrace) && self.peek().is_some() {
            fields.push(self.parse_field()?);
            if self.eat(Token::Comma) {
                separator = Separator::Comma;
            } else if self.eat(Token::Semicolon) {
                separator = Separator::Semicolon;
            } else {
                break;
            }
        }

        self.close(Token::CloseBrace)?;
        Ok(TypeNode::Object(fields, separator))
    }

    /// Parses one field of an object type.
    fn parse_field(&mut self) -> Result<ObjectField> {
        if self.at(Token::OpenBracket) {
            self.require_typescript("index signature", self.offset())?;
            self.pos += 1;
            if !self.at(Token::Identifier) {
                return Err(self.unexpected());
            }

            let key = self.slice(self.pos).to_string();
            self.pos += 1;
            let mapped = self.at_keyword("in");
            if mapped {
                self.pos += 1;
            } else {
                self.expect(Token::Colon)?;
            }

            let index = self.parse_type()?;
            self.expect(Token::CloseBracket)?;
            self.expect(Token::Colon)?;
            let right = self.parse_type()?;
            return Ok(if mapped {
                ObjectField::Mapped {
                    key,
                    over: index,
                    right,
                }
            } else {
                ObjectField::Index { key, index, right }
            });
        }

        let readonly = self.typescript
            && self.at_keyword("readonly")
            && matches!(
                self.peek_at(1),
                Some(Token::Identifier | Token::DoubleQuoted | Token::SingleQuoted | Token::Number)
            );
        if readonly {
            self.pos += 1;
        }

        let key = match self.bump() {
            Some((Token::Identifier | Token::Number, index)) => {
                Key::Name(self.slice(index).to_string())
            }
            Some((Token::DoubleQuoted, index)) => {
                Key::Quoted(unquote(self.slice(index)).to_string(), Quote::Double)
            }
            Some((Token::SingleQuoted, index)) => {
                Key::Quoted(unquote(self.slice(index)).to_string(), Quote::Single)
            }
            Some((_, index)) => return Err(self.unexpected_at(index)),
            None => return Err(TypeError::UnexpectedEnd),
        };

        let optional = self.eat(Token::Question);
        let right = if self.eat(Token::Colon) {
            Some(self.parse_type()?)
        } else {
            None
        };

        Ok(ObjectField::KeyValue {
            key,
            right,
            optional,
            readonly,
        })
    }
}

/// Strips the quotes of a string token.
fn unquote(text: &str) -> &str {
    &text[1..text.len() - 1]
}

/// Splits a special name token into its kind and value.
fn special_name(text: &str) -> (SpecialKind, &str) {
    let (prefix, value) = text.split_once(':').unwrap_or((text, ""));
    let kind = match prefix {
        "module" => SpecialKind::Module,
        "event" => SpecialKind::Event,
        _ => SpecialKind::External,
    };
    (kind, value)
}

/// Parses a type expression with the grammar of the given mode.
///
/// In [`Mode::Permissive`] this never fails: the TypeScript, Closure and
/// JSDoc grammars are tried in turn, then a parse that tolerates missing
/// closing delimiters, and finally the text is kept as an opaque node.
pub fn parse(text: &str, mode: Mode) -> Result<TypeNode> {
    if mode == Mode::Permissive {
        return Ok(parse_permissive(text));
    }

    Parser::new(text, mode)?.parse_root()
}

/// Parses a type expression with the first of the TypeScript, Closure and
/// JSDoc grammars that accepts it.
///
/// Returns the error of the TypeScript grammar if none does.
pub fn try_parse(text: &str) -> Result<TypeNode> {
    let mut first = None;
    for mode in [Mode::Typescript, Mode::Closure, Mode::Jsdoc] {
        match parse(text, mode) {
            Ok(node) => return Ok(node),
            Err(e) => {
                first.get_or_insert(e);
            }
        }
    }

    Err(first.unwrap_or(TypeError::Empty))
}

/// Parses a type expression in permissive mode.
fn parse_permissive(text: &str) -> TypeNode {
    if let Ok(node) = try_parse(text) {
        return node;
    }

    match Parser::new(text, Mode::Permissive).and_then(|p| p.recovering().parse_root()) {
        Ok(node) => {
            trace!(text, "recovered a malformed type expression");
            node
        }
        Err(e) => {
            trace!(text, error = %e, "keeping a malformed type expression verbatim");
            TypeNode::Opaque(text.trim().to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    /// Parses text in TypeScript mode.
    fn ts(text: &str) -> TypeNode {
        parse(text, Mode::Typescript).unwrap()
    }

    #[test]
    fn generics() {
        assert_eq!(
            parse("Object<string, number>", Mode::Jsdoc).unwrap(),
            TypeNode::Generic {
                left: Box::new(TypeNode::name("Object")),
                elements: vec![TypeNode::name("string"), TypeNode::name("number")],
                brackets: Brackets::Angle,
                dot: false,
            }
        );
        assert!(matches!(
            parse("Array.<string>", Mode::Closure).unwrap(),
            TypeNode::Generic { dot: true, .. }
        ));
        assert_eq!(
            parse("string[]", Mode::Jsdoc).unwrap(),
            TypeNode::Generic {
                left: Box::new(TypeNode::name("Array")),
                elements: vec![TypeNode::name("string")],
                brackets: Brackets::Square,
                dot: false,
            }
        );
    }

    #[test]
    fn modifiers() {
        assert_eq!(
            parse("?string", Mode::Closure).unwrap(),
            TypeNode::Nullable(Box::new(TypeNode::name("string")), Position::Prefix)
        );
        assert_eq!(
            parse("string=", Mode::Closure).unwrap(),
            TypeNode::Optional(Box::new(TypeNode::name("string")), Position::Suffix)
        );
        assert_eq!(
            parse("...number", Mode::Jsdoc).unwrap(),
            TypeNode::Variadic(Some(Box::new(TypeNode::name("number"))), Position::Prefix)
        );
        assert_eq!(parse("?", Mode::Jsdoc).unwrap(), TypeNode::Unknown);
        assert_eq!(parse("*", Mode::Jsdoc).unwrap(), TypeNode::Any);
        assert_eq!(
            parse("{a: string?}", Mode::Typescript).unwrap(),
            TypeNode::Object(
                vec![ObjectField::KeyValue {
                    key: Key::Name("a".to_string()),
                    right: Some(TypeNode::Nullable(
                        Box::new(TypeNode::name("string")),
                        Position::Suffix
                    )),
                    optional: false,
                    readonly: false,
                }],
                Separator::Comma
            )
        );
    }

    #[test]
    fn namepaths() {
        assert_eq!(
            parse("module:foo/bar", Mode::Jsdoc).unwrap(),
            TypeNode::SpecialName(SpecialKind::Module, "foo/bar".to_string())
        );
        assert!(parse("foo.bar#baz~qux", Mode::Jsdoc).is_ok());
        assert!(matches!(
            parse("Foo#event:change", Mode::Jsdoc).unwrap(),
            TypeNode::Namepath {
                right: PathSegment::Special(SpecialKind::Event, _),
                kind: PathKind::Instance,
                ..
            }
        ));
    }

    #[test]
    fn functions() {
        assert!(matches!(
            parse("function(this:Foo, string=): number", Mode::Closure).unwrap(),
            TypeNode::Function { arrow: false, ref parameters, .. } if parameters.len() == 2
        ));
        assert!(matches!(
            ts("(a: string, ...rest: number[]) => void"),
            TypeNode::Function { arrow: true, constructor: false, ref parameters, .. }
                if parameters.len() == 2
        ));
        assert!(matches!(
            ts("new () => Foo"),
            TypeNode::Function { arrow: true, constructor: true, .. }
        ));
        assert!(matches!(ts("(string)"), TypeNode::Parenthesis(_)));
        assert_eq!(parse("function", Mode::Jsdoc).unwrap(), TypeNode::name("function"));
    }

    #[test]
    fn typescript_constructs() {
        assert!(matches!(ts("[string, number]"), TypeNode::Tuple(ref e) if e.len() == 2));
        assert!(matches!(ts("A & B | C"), TypeNode::Union(ref e) if e.len() == 2));
        assert!(matches!(ts("keyof typeof foo"), TypeNode::KeyOf(_)));
        assert!(matches!(ts("import('./foo').Bar"), TypeNode::Namepath { .. }));
        assert!(matches!(ts("x is string"), TypeNode::Predicate(ref x, _) if x == "x"));
        assert!(matches!(
            ts("T extends string ? 'a' : 'b'"),
            TypeNode::Conditional { .. }
        ));
        assert!(matches!(ts("readonly string[]"), TypeNode::ReadonlyArray(_)));
        assert!(matches!(
            ts("{[key: string]: number; readonly a?: string}"),
            TypeNode::Object(ref f, Separator::Semicolon) if f.len() == 2
        ));
        assert!(matches!(ts("{[K in Keys]: V}"), TypeNode::Object(..)));
    }

    #[test]
    fn dialect_restrictions() {
        assert!(matches!(
            parse("[string]", Mode::Jsdoc),
            Err(TypeError::Unsupported { construct: "tuple", mode: Mode::Jsdoc, .. })
        ));
        assert!(matches!(
            parse("A & B", Mode::Closure),
            Err(TypeError::Unsupported { construct: "intersection", .. })
        ));
        assert!(parse("typeof foo", Mode::Jsdoc).is_err());
        assert!(parse("typeof foo", Mode::Closure).is_ok());
        assert!(parse("(a: string) => void", Mode::Jsdoc).is_err());
    }

    #[test]
    fn syntax_errors() {
        assert_eq!(parse("", Mode::Jsdoc), Err(TypeError::Empty));
        assert_eq!(parse("Array<string", Mode::Jsdoc), Err(TypeError::UnexpectedEnd));
        assert_eq!(parse("{string", Mode::Jsdoc), Err(TypeError::UnexpectedEnd));
        assert!(matches!(
            parse("string number", Mode::Jsdoc),
            Err(TypeError::UnexpectedToken { offset: 7, .. })
        ));
    }

    #[test]
    fn permissive_never_fails() {
        assert_eq!(
            parse("{string", Mode::Permissive).unwrap(),
            TypeNode::Object(
                vec![ObjectField::KeyValue {
                    key: Key::Name("string".to_string()),
                    right: None,
                    optional: false,
                    readonly: false,
                }],
                Separator::Comma
            )
        );
        assert_eq!(
            parse("a b c", Mode::Permissive).unwrap(),
            TypeNode::Opaque("a b c".to_string())
        );
        assert!(matches!(
            parse("A & B", Mode::Permissive).unwrap(),
            TypeNode::Intersection(_)
        ));
    }

    #[test]
    fn suffix_modifiers_before_array_brackets() {
        assert_eq!(
            parse("string?[]", Mode::Jsdoc).unwrap(),
            TypeNode::Generic {
                left: Box::new(TypeNode::name("Array")),
                elements: vec![TypeNode::Nullable(
                    Box::new(TypeNode::name("string")),
                    Position::Suffix
                )],
                brackets: Brackets::Square,
                dot: false,
            }
        );
        assert!(matches!(
            parse("Foo![]", Mode::Closure).unwrap(),
            TypeNode::Generic { ref elements, .. }
                if matches!(elements[0], TypeNode::NotNullable(_, Position::Suffix))
        ));
        assert_eq!(
            crate::stringify(&parse("string?[]", Mode::Jsdoc).unwrap()),
            "string?[]"
        );
    }

    #[test]
    fn nesting_limit() {
        let deep = format!("{}a{}", "Array<".repeat(50_000), ">".repeat(50_000));
        assert!(matches!(
            parse(&deep, Mode::Typescript),
            Err(TypeError::TooDeep { .. })
        ));
        assert_eq!(
            parse(&deep, Mode::Permissive).unwrap(),
            TypeNode::Opaque(deep.clone())
        );

        let bangs = format!("{}a", "!".repeat(50_000));
        assert!(matches!(
            parse(&bangs, Mode::Closure),
            Err(TypeError::TooDeep { offset: 255 })
        ));

        let shallow = format!("{}a{}", "Array<".repeat(20), ">".repeat(20));
        assert!(parse(&shallow, Mode::Jsdoc).is_ok());
    }

    #[test]
    fn try_parse_prefers_typescript() {
        assert!(matches!(try_parse("A & B").unwrap(), TypeNode::Intersection(_)));
        assert!(try_parse("foo.bar#baz").is_ok());
        assert!(try_parse("Array<").is_err());
    }
}
