//! Depth-first traversal of type expressions.
//!
//! A traversal is read-only. Each visited node carries a [`NodePath`] so a
//! caller can collect the nodes it wants to rewrite and mutate them
//! afterwards with [`TypeNode::get_mut`].

use crate::ObjectField;
use crate::TypeNode;

/// The slot of its parent that a node occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    /// The owner of a name path or the base of a generic.
    Left,
    /// A field or parameter type, or the right side of a predicate.
    Right,
    /// The operand of a modifier or type operator.
    Element,
    /// A member of a union, intersection, tuple or generic arguments list.
    Elements,
    /// A function parameter.
    Parameters,
    /// A function return type.
    Returns,
    /// The key type of an index signature or mapped type.
    Index,
    /// The checked type of a conditional.
    Check,
    /// The constraint of a conditional.
    Extends,
    /// The branch taken when a conditional holds.
    Then,
    /// The branch taken when a conditional does not hold.
    Otherwise,
}

/// The child indexes leading from the root to a node.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    /// Gets the path of the parent node, if there is one.
    pub fn parent(&self) -> Option<NodePath> {
        let (_, rest) = self.0.split_last()?;
        Some(Self(rest.to_vec()))
    }

    /// Determines if this is the path of the root.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Gets the child indexes of the path.
    pub fn indexes(&self) -> &[usize] {
        &self.0
    }
}

/// A node reached by a traversal.
#[derive(Debug, Clone)]
pub struct Visit<'a> {
    /// The node.
    pub node: &'a TypeNode,
    /// The parent of the node.
    pub parent: Option<&'a TypeNode>,
    /// The slot of the parent the node occupies.
    pub property: Option<Property>,
    /// The path to the node.
    pub path: NodePath,
}

impl TypeNode {
    /// Gets the children of the node in source order.
    pub fn children(&self) -> Vec<(Property, &TypeNode)> {
        let mut children = Vec::new();
        match self {
            Self::Name(_)
            | Self::Any
            | Self::Unknown
            | Self::StringValue(..)
            | Self::NumberValue(_)
            | Self::SpecialName(..)
            | Self::Import(..)
            | Self::Opaque(_)
            | Self::Variadic(None, _) => {}
            Self::Namepath { left, .. } => children.push((Property::Left, &**left)),
            Self::Generic { left, elements, .. } => {
                children.push((Property::Left, &**left));
                children.extend(elements.iter().map(|e| (Property::Elements, e)));
            }
            Self::Union(elements) | Self::Intersection(elements) | Self::Tuple(elements) => {
                children.extend(elements.iter().map(|e| (Property::Elements, e)));
            }
            Self::Nullable(element, _)
            | Self::NotNullable(element, _)
            | Self::Optional(element, _)
            | Self::Variadic(Some(element), _)
            | Self::Parenthesis(element)
            | Self::KeyOf(element)
            | Self::TypeOf(element)
            | Self::ReadonlyArray(element) => children.push((Property::Element, &**element)),
            Self::Function {
                parameters,
                returns,
                ..
            } => {
                children.extend(parameters.iter().map(|p| (Property::Parameters, p)));
                children.extend(returns.iter().map(|r| (Property::Returns, &**r)));
            }
            Self::KeyValue { right, .. } => {
                children.extend(right.iter().map(|r| (Property::Right, &**r)));
            }
            Self::Object(fields, _) => {
                for field in fields {
                    match field {
                        ObjectField::KeyValue { right, .. } => {
                            children.extend(right.iter().map(|r| (Property::Right, r)));
                        }
                        ObjectField::Index { index, right, .. } => {
                            children.push((Property::Index, index));
                            children.push((Property::Right, right));
                        }
                        ObjectField::Mapped { over, right, .. } => {
                            children.push((Property::Index, over));
                            children.push((Property::Right, right));
                        }
                    }
                }
            }
            Self::Predicate(_, right) => children.push((Property::Right, &**right)),
            Self::Conditional {
                check,
                extends,
                then,
                otherwise,
            } => {
                children.push((Property::Check, &**check));
                children.push((Property::Extends, &**extends));
                children.push((Property::Then, &**then));
                children.push((Property::Otherwise, &**otherwise));
            }
        }

        children
    }

    /// Gets mutable references to the children of the node, in the same
    /// order as [`TypeNode::children`].
    pub fn children_mut(&mut self) -> Vec<&mut TypeNode> {
        let mut children: Vec<&mut TypeNode> = Vec::new();
        match self {
            Self::Name(_)
            | Self::Any
            | Self::Unknown
            | Self::StringValue(..)
            | Self::NumberValue(_)
            | Self::SpecialName(..)
            | Self::Import(..)
            | Self::Opaque(_)
            | Self::Variadic(None, _) => {}
            Self::Namepath { left, .. } => children.push(left),
            Self::Generic { left, elements, .. } => {
                children.push(left);
                children.extend(elements.iter_mut());
            }
            Self::Union(elements) | Self::Intersection(elements) | Self::Tuple(elements) => {
                children.extend(elements.iter_mut());
            }
            Self::Nullable(element, _)
            | Self::NotNullable(element, _)
            | Self::Optional(element, _)
            | Self::Variadic(Some(element), _)
            | Self::Parenthesis(element)
            | Self::KeyOf(element)
            | Self::TypeOf(element)
            | Self::ReadonlyArray(element) => children.push(element),
            Self::Function {
                parameters,
                returns,
                ..
            } => {
                children.extend(parameters.iter_mut());
                children.extend(returns.iter_mut().map(|r| &mut **r));
            }
            Self::KeyValue { right, .. } => children.extend(right.iter_mut().map(|r| &mut **r)),
            Self::Object(fields, _) => {
                for field in fields {
                    match field {
                        ObjectField::KeyValue { right, .. } => children.extend(right.iter_mut()),
                        ObjectField::Index { index, right, .. } => {
                            children.push(index);
                            children.push(right);
                        }
                        ObjectField::Mapped { over, right, .. } => {
                            children.push(over);
                            children.push(right);
                        }
                    }
                }
            }
            Self::Predicate(_, right) => children.push(right),
            Self::Conditional {
                check,
                extends,
                then,
                otherwise,
            } => {
                children.push(check);
                children.push(extends);
                children.push(then);
                children.push(otherwise);
            }
        }

        children
    }

    /// Gets the node at the given path.
    pub fn get(&self, path: &NodePath) -> Option<&TypeNode> {
        let mut node = self;
        for index in path.indexes() {
            node = node.children().into_iter().nth(*index)?.1;
        }

        Some(node)
    }

    /// Gets the node at the given path mutably.
    pub fn get_mut(&mut self, path: &NodePath) -> Option<&mut TypeNode> {
        let mut node = self;
        for index in path.indexes() {
            node = node.children_mut().into_iter().nth(*index)?;
        }

        Some(node)
    }
}

/// Visits every node of the tree in depth-first pre-order.
pub fn traverse<'a, F>(root: &'a TypeNode, mut visit: F)
where
    F: FnMut(Visit<'a>),
{
    /// Visits a node and then its children.
    fn walk<'a, F>(
        node: &'a TypeNode,
        parent: Option<(&'a TypeNode, Property)>,
        path: &mut Vec<usize>,
        visit: &mut F,
    ) where
        F: FnMut(Visit<'a>),
    {
        visit(Visit {
            node,
            parent: parent.map(|(p, _)| p),
            property: parent.map(|(_, p)| p),
            path: NodePath(path.clone()),
        });

        for (i, (property, child)) in node.children().into_iter().enumerate() {
            path.push(i);
            walk(child, Some((node, property)), path, visit);
            path.pop();
        }
    }

    walk(root, None, &mut Vec::new(), &mut visit);
}

#[cfg(test)]
mod tests {
    use jsdoc_grammar::Mode;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::parse;

    #[test]
    fn pre_order_with_parents() {
        let node = parse("Array.<string|Foo>", Mode::Closure).unwrap();
        let mut seen = Vec::new();
        traverse(&node, |visit| {
            seen.push((
                visit.node.to_string(),
                visit.parent.map(|p| p.to_string()),
                visit.property,
            ));
        });

        assert_eq!(
            seen,
            [
                ("Array.<string | Foo>".to_string(), None, None),
                (
                    "Array".to_string(),
                    Some("Array.<string | Foo>".to_string()),
                    Some(Property::Left)
                ),
                (
                    "string | Foo".to_string(),
                    Some("Array.<string | Foo>".to_string()),
                    Some(Property::Elements)
                ),
                (
                    "string".to_string(),
                    Some("string | Foo".to_string()),
                    Some(Property::Elements)
                ),
                (
                    "Foo".to_string(),
                    Some("string | Foo".to_string()),
                    Some(Property::Elements)
                ),
            ]
        );
    }

    #[test]
    fn rewrite_by_path() {
        let mut node = parse("{a: Object, b: function(String): ?Number}", Mode::Closure).unwrap();
        let mut paths = Vec::new();
        traverse(&node, |visit| {
            if let Some(name) = visit.node.as_name()
                && name.chars().next().is_some_and(char::is_uppercase)
            {
                paths.push((visit.path, name.to_lowercase()));
            }
        });

        for (path, name) in paths {
            *node.get_mut(&path).unwrap() = TypeNode::name(name);
        }

        assert_eq!(node.to_string(), "{a: object, b: function(string): ?number}");
        let path = NodePath(vec![1, 0]);
        assert_eq!(node.get(&path).unwrap().to_string(), "string");
        assert_eq!(path.parent(), Some(NodePath(vec![1])));
    }
}
