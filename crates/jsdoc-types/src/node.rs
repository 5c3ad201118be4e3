//! The type expression tree.

/// The quote style of a string literal or quoted key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quote {
    /// `'...'`
    Single,
    /// `"..."`
    Double,
}

impl Quote {
    /// Gets the quote character.
    pub fn as_char(&self) -> char {
        match self {
            Self::Single => '\'',
            Self::Double => '"',
        }
    }
}

/// Where a modifier such as `?` or `...` was written relative to its
/// operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    /// Before the operand, as in `?string`.
    Prefix,
    /// After the operand, as in `string?`.
    Suffix,
}

/// The bracket style of a generic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Brackets {
    /// `Array<string>` or `Array.<string>`.
    Angle,
    /// `string[]`.
    Square,
}

/// The kind of a special name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialKind {
    /// `module:`
    Module,
    /// `event:`
    Event,
    /// `external:`
    External,
}

impl SpecialKind {
    /// Gets the prefix of the special name, without the colon.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Module => "module",
            Self::Event => "event",
            Self::External => "external",
        }
    }
}

/// The separator between the segments of a name path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathKind {
    /// A static member, `a.b`.
    Property,
    /// An instance member, `a#b`.
    Instance,
    /// An inner member, `a~b`.
    Inner,
}

impl PathKind {
    /// Gets the separator character.
    pub fn as_char(&self) -> char {
        match self {
            Self::Property => '.',
            Self::Instance => '#',
            Self::Inner => '~',
        }
    }
}

/// The right-hand segment of a name path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A plain identifier.
    Name(String),
    /// A quoted segment.
    Quoted(String, Quote),
    /// A special name such as `event:change`.
    Special(SpecialKind, String),
}

/// The separator between the fields of an object type.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Separator {
    /// `{a: A, b: B}`
    #[default]
    Comma,
    /// `{a: A; b: B}`
    Semicolon,
}

/// The key of an object field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// An identifier or number key.
    Name(String),
    /// A quoted key.
    Quoted(String, Quote),
}

impl Key {
    /// Gets the unquoted text of the key.
    pub fn value(&self) -> &str {
        match self {
            Self::Name(value) | Self::Quoted(value, _) => value,
        }
    }
}

/// A field of an object type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ObjectField {
    /// `key`, `key: T`, `key?: T` or `readonly key: T`.
    KeyValue {
        /// The field key.
        key: Key,
        /// The field type, if written.
        right: Option<TypeNode>,
        /// Whether the key was marked `?`.
        optional: bool,
        /// Whether the field was marked `readonly`.
        readonly: bool,
    },
    /// An index signature, `[key: K]: T`.
    Index {
        /// The name of the index key.
        key: String,
        /// The type of the index key.
        index: TypeNode,
        /// The field type.
        right: TypeNode,
    },
    /// A mapped key, `[K in T]: U`.
    Mapped {
        /// The name of the mapped key.
        key: String,
        /// The type iterated over.
        over: TypeNode,
        /// The field type.
        right: TypeNode,
    },
}

/// A parsed type expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeNode {
    /// A bare name such as `string` or `Foo`.
    Name(String),
    /// `*`
    Any,
    /// `?` on its own.
    Unknown,
    /// A string literal.
    StringValue(String, Quote),
    /// A number literal, as written.
    NumberValue(String),
    /// A special name such as `module:foo/bar`.
    SpecialName(SpecialKind, String),
    /// A name path such as `Foo#bar`.
    Namepath {
        /// The owner of the member.
        left: Box<TypeNode>,
        /// The member.
        right: PathSegment,
        /// The separator used.
        kind: PathKind,
    },
    /// A generic such as `Array<string>`, `Array.<string>` or `string[]`.
    ///
    /// For square brackets `left` is the name `Array` and the single
    /// element is the item type.
    Generic {
        /// The generic type.
        left: Box<TypeNode>,
        /// The type arguments.
        elements: Vec<TypeNode>,
        /// The bracket style.
        brackets: Brackets,
        /// Whether angle brackets were preceded by a dot.
        dot: bool,
    },
    /// `A | B`
    Union(Vec<TypeNode>),
    /// `A & B`
    Intersection(Vec<TypeNode>),
    /// `?T` or `T?`
    Nullable(Box<TypeNode>, Position),
    /// `!T` or `T!`
    NotNullable(Box<TypeNode>, Position),
    /// `T=`
    Optional(Box<TypeNode>, Position),
    /// `...T`, `T...` or a bare `...`.
    Variadic(Option<Box<TypeNode>>, Position),
    /// A Closure function, an arrow function or a constructor type.
    Function {
        /// The parameters.
        parameters: Vec<TypeNode>,
        /// The return type, if written.
        returns: Option<Box<TypeNode>>,
        /// Whether the function was written with `=>`.
        arrow: bool,
        /// Whether the function was written with `new`.
        constructor: bool,
    },
    /// A named parameter or a `this:`/`new:` marker of a function.
    KeyValue {
        /// The parameter name.
        key: String,
        /// The parameter type, if written.
        right: Option<Box<TypeNode>>,
        /// Whether the name was marked `?`.
        optional: bool,
        /// Whether the name was marked `...`.
        variadic: bool,
    },
    /// An object type.
    Object(Vec<ObjectField>, Separator),
    /// A tuple type.
    Tuple(Vec<TypeNode>),
    /// A parenthesized type.
    Parenthesis(Box<TypeNode>),
    /// `keyof T`
    KeyOf(Box<TypeNode>),
    /// `typeof x`
    TypeOf(Box<TypeNode>),
    /// `import("path")`
    Import(String, Quote),
    /// `x is T`
    Predicate(String, Box<TypeNode>),
    /// `A extends B ? C : D`
    Conditional {
        /// The checked type.
        check: Box<TypeNode>,
        /// The constraint.
        extends: Box<TypeNode>,
        /// The type when the constraint holds.
        then: Box<TypeNode>,
        /// The type when it does not.
        otherwise: Box<TypeNode>,
    },
    /// `readonly T[]`
    ReadonlyArray(Box<TypeNode>),
    /// Text that could not be parsed, kept verbatim.
    Opaque(String),
}

impl TypeNode {
    /// Creates a name node.
    pub fn name(value: impl Into<String>) -> Self {
        Self::Name(value.into())
    }

    /// Gets the name of the node if it is a bare name.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Self::Name(name) => Some(name),
            _ => None,
        }
    }

    /// Gets the leaf text a rule compares against preferences.
    ///
    /// This is `*` for [`TypeNode::Any`] and the value of names and
    /// literals.
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Name(value) | Self::NumberValue(value) | Self::StringValue(value, _) => {
                Some(value)
            }
            Self::SpecialName(_, value) => Some(value),
            Self::Any => Some("*"),
            _ => None,
        }
    }

    /// Determines if the node is a generic with type arguments.
    pub fn is_generic(&self) -> bool {
        matches!(self, Self::Generic { .. })
    }
}
