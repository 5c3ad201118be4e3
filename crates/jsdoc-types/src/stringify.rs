//! Serialization of type expressions back to text.

use std::fmt;

use crate::Brackets;
use crate::Key;
use crate::ObjectField;
use crate::PathSegment;
use crate::Position;
use crate::Separator;
use crate::TypeNode;

/// Writes the items separated by the given text.
fn join<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T], separator: &str) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(separator)?;
        }
        write!(f, "{item}")?;
    }

    Ok(())
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => f.write_str(name),
            Self::Quoted(value, quote) => {
                let q = quote.as_char();
                write!(f, "{q}{value}{q}")
            }
            Self::Special(kind, value) => write!(f, "{kind}:{value}", kind = kind.as_str()),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => f.write_str(name),
            Self::Quoted(value, quote) => {
                let q = quote.as_char();
                write!(f, "{q}{value}{q}")
            }
        }
    }
}

impl fmt::Display for ObjectField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KeyValue {
                key,
                right,
                optional,
                readonly,
            } => {
                if *readonly {
                    f.write_str("readonly ")?;
                }
                write!(f, "{key}")?;
                if *optional {
                    f.write_str("?")?;
                }
                if let Some(right) = right {
                    write!(f, ": {right}")?;
                }
                Ok(())
            }
            Self::Index { key, index, right } => write!(f, "[{key}: {index}]: {right}"),
            Self::Mapped { key, over, right } => write!(f, "[{key} in {over}]: {right}"),
        }
    }
}

impl fmt::Display for TypeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) | Self::NumberValue(name) | Self::Opaque(name) => f.write_str(name),
            Self::Any => f.write_str("*"),
            Self::Unknown => f.write_str("?"),
            Self::StringValue(value, quote) => {
                let q = quote.as_char();
                write!(f, "{q}{value}{q}")
            }
            Self::SpecialName(kind, value) => write!(f, "{kind}:{value}", kind = kind.as_str()),
            Self::Namepath { left, right, kind } => {
                write!(f, "{left}{sep}{right}", sep = kind.as_char())
            }
            Self::Generic {
                elements,
                brackets: Brackets::Square,
                ..
            } => {
                join(f, elements, ", ")?;
                f.write_str("[]")
            }
            Self::Generic {
                left,
                elements,
                brackets: Brackets::Angle,
                dot,
            } => {
                write!(f, "{left}{dot}<", dot = if *dot { "." } else { "" })?;
                join(f, elements, ", ")?;
                f.write_str(">")
            }
            Self::Union(elements) => join(f, elements, " | "),
            Self::Intersection(elements) => join(f, elements, " & "),
            Self::Nullable(element, Position::Prefix) => write!(f, "?{element}"),
            Self::Nullable(element, Position::Suffix) => write!(f, "{element}?"),
            Self::NotNullable(element, Position::Prefix) => write!(f, "!{element}"),
            Self::NotNullable(element, Position::Suffix) => write!(f, "{element}!"),
            Self::Optional(element, Position::Prefix) => write!(f, "={element}"),
            Self::Optional(element, Position::Suffix) => write!(f, "{element}="),
            Self::Variadic(None, _) => f.write_str("..."),
            Self::Variadic(Some(element), Position::Prefix) => write!(f, "...{element}"),
            Self::Variadic(Some(element), Position::Suffix) => write!(f, "{element}..."),
            Self::Function {
                parameters,
                returns,
                arrow: true,
                constructor,
            } => {
                if *constructor {
                    f.write_str("new ")?;
                }
                f.write_str("(")?;
                join(f, parameters, ", ")?;
                f.write_str(") => ")?;
                match returns {
                    Some(returns) => write!(f, "{returns}"),
                    None => f.write_str("void"),
                }
            }
            Self::Function {
                parameters,
                returns,
                arrow: false,
                ..
            } => {
                f.write_str("function(")?;
                join(f, parameters, ", ")?;
                f.write_str(")")?;
                match returns {
                    Some(returns) => write!(f, ": {returns}"),
                    None => Ok(()),
                }
            }
            Self::KeyValue {
                key,
                right,
                optional,
                variadic,
            } => {
                if *variadic {
                    f.write_str("...")?;
                }
                f.write_str(key)?;
                if *optional {
                    f.write_str("?")?;
                }
                match right {
                    Some(right) => write!(f, ": {right}"),
                    None => Ok(()),
                }
            }
            Self::Object(fields, separator) => {
                f.write_str("{")?;
                join(
                    f,
                    fields,
                    match separator {
                        Separator::Comma => ", ",
                        Separator::Semicolon => "; ",
                    },
                )?;
                f.write_str("}")
            }
            Self::Tuple(elements) => {
                f.write_str("[")?;
                join(f, elements, ", ")?;
                f.write_str("]")
            }
            Self::Parenthesis(element) => write!(f, "({element})"),
            Self::KeyOf(element) => write!(f, "keyof {element}"),
            Self::TypeOf(element) => write!(f, "typeof {element}"),
            Self::Import(path, quote) => {
                let q = quote.as_char();
                write!(f, "import({q}{path}{q})")
            }
            Self::Predicate(name, right) => write!(f, "{name} is {right}"),
            Self::Conditional {
                check,
                extends,
                then,
                otherwise,
            } => write!(f, "{check} extends {extends} ? {then} : {otherwise}"),
            Self::ReadonlyArray(element) => write!(f, "readonly {element}"),
        }
    }
}

/// Serializes a type expression to text.
pub fn stringify(node: &TypeNode) -> String {
    node.to_string()
}

#[cfg(test)]
mod tests {
    use jsdoc_grammar::Mode;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::parse;

    /// Parses, stringifies and parses again, asserting the trees match.
    fn stable(text: &str, mode: Mode) -> String {
        let node = parse(text, mode).unwrap();
        let out = stringify(&node);
        assert_eq!(parse(&out, mode).unwrap(), node, "reparsing `{out}`");
        out
    }

    #[test]
    fn canonical_spacing() {
        assert_eq!(stable("Array.<string>", Mode::Closure), "Array.<string>");
        assert_eq!(stable("Object<string,number>", Mode::Jsdoc), "Object<string, number>");
        assert_eq!(stable("string[]", Mode::Jsdoc), "string[]");
        assert_eq!(stable("(string|number)[]", Mode::Jsdoc), "(string | number)[]");
        assert_eq!(stable("?string=", Mode::Closure), "?string=");
        assert_eq!(stable("string?", Mode::Jsdoc), "string?");
        assert_eq!(stable("!Foo", Mode::Closure), "!Foo");
        assert_eq!(stable("...*", Mode::Jsdoc), "...*");
        assert_eq!(stable("{a:string,'b':number=}", Mode::Closure), "{a: string, 'b': number=}");
        assert_eq!(
            stable("function(this:Foo,string):number", Mode::Closure),
            "function(this: Foo, string): number"
        );
        assert_eq!(stable("module:foo/bar~baz", Mode::Jsdoc), "module:foo/bar~baz");
    }

    #[test]
    fn typescript_spacing() {
        assert_eq!(
            stable("(a:string,b?:number)=>void", Mode::Typescript),
            "(a: string, b?: number) => void"
        );
        assert_eq!(stable("[string,number]", Mode::Typescript), "[string, number]");
        assert_eq!(stable("A&B|C", Mode::Typescript), "A & B | C");
        assert_eq!(stable("keyof typeof foo", Mode::Typescript), "keyof typeof foo");
        assert_eq!(stable("import(\"x\").Y", Mode::Typescript), "import(\"x\").Y");
        assert_eq!(
            stable("T extends U?X:Y", Mode::Typescript),
            "T extends U ? X : Y"
        );
        assert_eq!(
            stable("{readonly a: T; [k: string]: U}", Mode::Typescript),
            "{readonly a: T; [k: string]: U}"
        );
    }

    #[test]
    fn renamed_generic_keeps_brackets() {
        let mut node = parse("Object<string, number>", Mode::Jsdoc).unwrap();
        if let TypeNode::Generic { left, .. } = &mut node {
            **left = TypeNode::name("object");
        }
        assert_eq!(stringify(&node), "object<string, number>");
    }
}
