//! Scoped symbol tables with positional register assignment.

use crate::error::semantic_error;
use core_types::CompileError;
use std::collections::HashMap;
use std::fmt;

/// Storage class of a declared variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SymbolKind {
    /// Class-level, shared across instances
    Static,
    /// Class-level, per instance
    Field,
    /// Subroutine parameter
    Argument,
    /// Subroutine local variable
    Local,
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SymbolKind::Static => "static",
            SymbolKind::Field => "field",
            SymbolKind::Argument => "argument",
            SymbolKind::Local => "local",
        };
        write!(f, "{name}")
    }
}

/// What a table's owner is. Instance methods reserve argument slot 0 for
/// the receiver, which shifts their parameter numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    /// The class-level scope (`static`/`field` entries)
    Class,
    /// A constructor's scope
    Constructor,
    /// A static function's scope
    Function,
    /// An instance method's scope
    Method,
}

/// One declared variable.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolEntry {
    /// Declared name
    pub name: String,
    /// Storage class
    pub kind: SymbolKind,
    /// Declared type text
    pub ty: String,
    /// Slot within the `(scope, kind)` pair
    pub index: usize,
}

/// A single scope: the name-to-entry map owned by a class or a subroutine.
///
/// Lookup here is in-scope only; chained resolution across the subroutine
/// and class scopes is performed by [`ScopeChain`].
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolTable {
    name: String,
    kind: TableKind,
    entries: HashMap<String, SymbolEntry>,
}

impl SymbolTable {
    /// Create an empty table owned by `name`.
    pub fn new(name: &str, kind: TableKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            entries: HashMap::new(),
        }
    }

    /// The owning class or subroutine name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The owner kind of this table.
    pub fn kind(&self) -> TableKind {
        self.kind
    }

    /// Define a new symbol in this scope.
    ///
    /// The index is one past the largest existing index of the same kind.
    /// The first `argument` of a method scope gets index 1; slot 0 belongs
    /// to the receiver and is never materialized as an entry. Redefining a
    /// name already present in this scope is a semantic error; shadowing an
    /// outer scope is not checked.
    pub fn define(&mut self, name: &str, kind: SymbolKind, ty: &str) -> Result<(), CompileError> {
        if self.entries.contains_key(name) {
            return Err(semantic_error(format!(
                "Symbol {name} was already defined in {}",
                self.name
            )));
        }
        let base = if self.kind == TableKind::Method && kind == SymbolKind::Argument {
            1
        } else {
            0
        };
        let index = self
            .entries
            .values()
            .filter(|entry| entry.kind == kind)
            .map(|entry| entry.index)
            .max()
            .map_or(base, |max| max + 1);
        self.entries.insert(
            name.to_string(),
            SymbolEntry {
                name: name.to_string(),
                kind,
                ty: ty.to_string(),
                index,
            },
        );
        Ok(())
    }

    /// Number of entries of `kind` in this scope.
    pub fn count(&self, kind: SymbolKind) -> usize {
        self.entries
            .values()
            .filter(|entry| entry.kind == kind)
            .count()
    }

    /// Entry for `name` in this scope only.
    pub fn lookup(&self, name: &str) -> Option<&SymbolEntry> {
        self.entries.get(name)
    }

    /// All entries of this scope, in no particular order.
    pub fn entries(&self) -> impl Iterator<Item = &SymbolEntry> {
        self.entries.values()
    }
}

/// Innermost-first name resolution over the active scopes.
///
/// Replaces a mutable process-wide scope stack: the chain is built per
/// subroutine visit and threaded through code generation explicitly.
#[derive(Debug, Clone, Copy)]
pub struct ScopeChain<'a> {
    class: &'a SymbolTable,
    subroutine: &'a SymbolTable,
}

impl<'a> ScopeChain<'a> {
    /// A chain with an active subroutine scope over the class scope.
    pub fn with_subroutine(class: &'a SymbolTable, subroutine: &'a SymbolTable) -> Self {
        Self { class, subroutine }
    }

    /// Resolve `name`, walking the subroutine scope then the class scope.
    pub fn resolve(&self, name: &str) -> Option<&'a SymbolEntry> {
        self.subroutine
            .lookup(name)
            .or_else(|| self.class.lookup(name))
    }

    /// Name of the innermost active scope, for diagnostics.
    pub fn innermost_name(&self) -> &'a str {
        self.subroutine.name()
    }
}
