//! Target-language type references
//!
//! A [`Symbol`] is what a symbol provider resolves a shape or member to: a
//! type name, where it lives, whether it may be absent, and which runtime
//! artifacts the generated code must depend on to use it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Runtime artifact required by generated code
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SymbolDependency {
    /// Maven-style coordinate, e.g. `aws.smithy.kotlin:runtime-core`
    pub artifact: String,
    pub version: String,
}

impl SymbolDependency {
    pub fn new(artifact: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            artifact: artifact.into(),
            version: version.into(),
        }
    }
}

impl fmt::Display for SymbolDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.artifact, self.version)
    }
}

/// A resolved type reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    /// Simple type name, possibly with type arguments (`List<kotlin.String>`)
    pub name: String,
    /// Package the type lives in; empty for types in the default package
    pub namespace: String,
    /// Whether a value of this type may be absent
    pub nullable: bool,
    /// Primitive held behind a reference because it is nullable
    pub boxed: bool,
    #[serde(default)]
    pub dependencies: Vec<SymbolDependency>,
}

impl Symbol {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            nullable: false,
            boxed: false,
            dependencies: Vec::new(),
        }
    }

    /// Marks the symbol nullable. `boxed` records whether a primitive got boxed.
    pub fn into_nullable(mut self, boxed: bool) -> Self {
        self.nullable = true;
        self.boxed = boxed;
        self
    }

    pub fn with_dependency(mut self, dependency: SymbolDependency) -> Self {
        if !self.dependencies.contains(&dependency) {
            self.dependencies.push(dependency);
        }
        self
    }

    pub fn with_dependencies(self, dependencies: impl IntoIterator<Item = SymbolDependency>) -> Self {
        dependencies
            .into_iter()
            .fold(self, |symbol, dep| symbol.with_dependency(dep))
    }

    /// Name without type arguments, which is what gets imported.
    pub fn raw_name(&self) -> &str {
        self.name
            .split_once('<')
            .map(|(raw, _)| raw)
            .unwrap_or(&self.name)
    }

    /// `namespace.Name`, or just the name in the default package
    pub fn fully_qualified_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }

    /// Import path for this symbol, without type arguments
    pub fn import_path(&self) -> Option<String> {
        if self.namespace.is_empty() {
            None
        } else {
            Some(format!("{}.{}", self.namespace, self.raw_name()))
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fully_qualified_name())?;
        if self.nullable {
            f.write_str("?")?;
        }
        Ok(())
    }
}
