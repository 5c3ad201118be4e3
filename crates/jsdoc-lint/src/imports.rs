//! Resolution of the import statements written in `@import` tags.

use std::sync::LazyLock;

use regex::Regex;

/// Matches an import statement with an import clause.
static IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^import\s+(?:(type)\s+)?(.+?)\s*\bfrom\s*(["'])([^"']*)(["'])\s*;?\s*$"#)
        .expect("import pattern should compile")
});

/// Matches an import statement without an import clause.
static SIDE_EFFECT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^import\s*(["'])([^"']*)(["'])\s*;?\s*$"#)
        .expect("side effect import pattern should compile")
});

/// Matches a namespace import clause.
static NAMESPACE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\*\s*as\s+([A-Za-z_$][\w$]*)$").expect("namespace pattern should compile")
});

/// Matches one specifier of a named import clause.
static SPECIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^(?:(type)\s+)?(?:([A-Za-z_$][\w$]*)|"([^"]*)"|'([^']*)')(?:\s+as\s+([A-Za-z_$][\w$]*))?$"#,
    )
    .expect("specifier pattern should compile")
});

/// Matches an identifier.
static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_$][\w$]*$").expect("identifier pattern should compile"));

/// How a binding is imported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImportKind {
    /// `import a from "m"`
    Default,
    /// `import * as a from "m"`
    Namespace,
    /// `import { a } from "m"`
    Named,
}

/// One binding introduced by an import statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDescriptor {
    /// How the binding is imported.
    pub kind: ImportKind,
    /// The exported name, `default` for default imports and `*` for namespace
    /// imports.
    pub imported: String,
    /// The local name of the binding.
    pub local: String,
    /// The module specifier.
    pub module: String,
    /// Whether only the type of the binding is imported.
    pub type_only: bool,
}

/// Resolves the import statement written in an `@import` tag.
pub trait ImportResolver {
    /// Resolves an import statement into the bindings it introduces.
    ///
    /// Returns `None` if the statement is not a valid import.
    fn resolve(&self, statement: &str) -> Option<Vec<ImportDescriptor>>;
}

/// Resolves import statements by their syntax alone.
#[derive(Debug, Default, Clone, Copy)]
pub struct SyntacticImportResolver;

impl SyntacticImportResolver {
    /// Parses the bindings of a named import clause without its braces.
    fn named(
        clause: &str,
        module: &str,
        type_only: bool,
        into: &mut Vec<ImportDescriptor>,
    ) -> Option<()> {
        let specifiers: Vec<&str> = clause.split(',').map(str::trim).collect();
        let count = specifiers.len();
        for (i, specifier) in specifiers.into_iter().enumerate() {
            if specifier.is_empty() {
                // Only a trailing comma may leave an empty specifier
                if i + 1 == count && i > 0 {
                    continue;
                }
                if count == 1 {
                    return Some(());
                }
                return None;
            }

            let caps = SPECIFIER.captures(specifier)?;
            let imported = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))?
                .as_str();
            let quoted = caps.get(2).is_none();
            let local = match caps.get(5) {
                Some(local) => local.as_str(),
                None if quoted => return None,
                None => imported,
            };

            into.push(ImportDescriptor {
                kind: ImportKind::Named,
                imported: imported.to_string(),
                local: local.to_string(),
                module: module.to_string(),
                type_only: type_only || caps.get(1).is_some(),
            });
        }

        Some(())
    }

    /// Parses an import clause.
    fn clause(clause: &str, module: &str, type_only: bool) -> Option<Vec<ImportDescriptor>> {
        let mut descriptors = Vec::new();
        let mut rest = clause.trim();

        if !rest.starts_with('{') && !rest.starts_with('*') {
            let (default, remainder) = match rest.split_once(',') {
                Some((default, remainder)) => (default.trim(), Some(remainder.trim())),
                None => (rest, None),
            };
            if !IDENTIFIER.is_match(default) {
                return None;
            }

            descriptors.push(ImportDescriptor {
                kind: ImportKind::Default,
                imported: "default".to_string(),
                local: default.to_string(),
                module: module.to_string(),
                type_only,
            });

            match remainder {
                // A type-only import names a default or named bindings, not both
                Some(_) if type_only => return None,
                Some(remainder) => rest = remainder,
                None => return Some(descriptors),
            }
        }

        if let Some(caps) = NAMESPACE.captures(rest) {
            descriptors.push(ImportDescriptor {
                kind: ImportKind::Namespace,
                imported: "*".to_string(),
                local: caps[1].to_string(),
                module: module.to_string(),
                type_only,
            });
            return Some(descriptors);
        }

        let named = rest.strip_prefix('{')?.strip_suffix('}')?;
        Self::named(named, module, type_only, &mut descriptors)?;
        Some(descriptors)
    }
}

impl ImportResolver for SyntacticImportResolver {
    fn resolve(&self, statement: &str) -> Option<Vec<ImportDescriptor>> {
        let statement = statement.trim();
        if let Some(caps) = SIDE_EFFECT.captures(statement) {
            return (caps[1] == caps[3]).then(Vec::new);
        }

        let caps = IMPORT.captures(statement)?;
        if caps[3] != caps[5] {
            return None;
        }

        Self::clause(&caps[2], &caps[4], caps.get(1).is_some())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    /// Resolves a statement into `(kind, imported, local, type_only)` tuples.
    fn resolve(statement: &str) -> Option<Vec<(ImportKind, String, String, bool)>> {
        SyntacticImportResolver.resolve(statement).map(|d| {
            d.into_iter()
                .map(|d| {
                    assert_eq!(d.module, "./mod.js");
                    (d.kind, d.imported, d.local, d.type_only)
                })
                .collect()
        })
    }

    #[test]
    fn default_and_namespace() {
        assert_eq!(
            resolve(r#"import Foo from "./mod.js""#),
            Some(vec![(
                ImportKind::Default,
                "default".to_string(),
                "Foo".to_string(),
                false
            )])
        );
        assert_eq!(
            resolve(r#"import * as ns from './mod.js';"#),
            Some(vec![(
                ImportKind::Namespace,
                "*".to_string(),
                "ns".to_string(),
                false
            )])
        );
        assert_eq!(resolve(r#"import Foo, * as ns from "./mod.js""#).map(|d| d.len()), Some(2));
    }

    #[test]
    fn named() {
        assert_eq!(
            resolve(r#"import {A, B as C, type D,} from "./mod.js""#),
            Some(vec![
                (ImportKind::Named, "A".to_string(), "A".to_string(), false),
                (ImportKind::Named, "B".to_string(), "C".to_string(), false),
                (ImportKind::Named, "D".to_string(), "D".to_string(), true),
            ])
        );
        assert_eq!(
            resolve(r#"import type {A} from "./mod.js""#),
            Some(vec![(ImportKind::Named, "A".to_string(), "A".to_string(), true)])
        );
        assert_eq!(
            resolve(r#"import {"a-b" as ab} from "./mod.js""#),
            Some(vec![(ImportKind::Named, "a-b".to_string(), "ab".to_string(), false)])
        );
        assert_eq!(resolve(r#"import {} from "./mod.js""#), Some(vec![]));
        assert_eq!(resolve(r#"import "./mod.js""#), Some(vec![]));
    }

    #[test]
    fn invalid() {
        assert_eq!(resolve(r#"import {A from "./mod.js""#), None);
        assert_eq!(resolve(r#"import {A,,B} from "./mod.js""#), None);
        assert_eq!(resolve(r#"import {"a-b"} from "./mod.js""#), None);
        assert_eq!(resolve(r#"import type A, {B} from "./mod.js""#), None);
        assert_eq!(resolve(r#"import A from "./mod.js'"#), None);
        assert_eq!(resolve(r#"import 1A from "./mod.js""#), None);
        assert_eq!(resolve("import A"), None);
    }
}
