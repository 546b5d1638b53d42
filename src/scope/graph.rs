//! Scope Graph data structure for name binding
//!
//! The scope graph tracks:
//! - Scope hierarchy (parent/child relationships)
//! - Bindings declared within each scope
//! - Which variable records each binding produced
//! - Reference sites resolved to each binding

use std::collections::HashMap;
use crate::variable::SourceLocation;

/// Unique identifier for a scope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(pub u32);

impl ScopeId {
    /// Create a root scope ID
    pub fn root() -> Self {
        Self(0)
    }
}

/// Unique identifier for a binding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BindingId(pub usize);

/// The kind of scope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    /// Module/file level scope
    Module,
    /// Class body scope
    Class,
    /// Function/method scope (receives `var` declarations)
    Function,
    /// Block scope (if, for, catch, etc.)
    Block,
}

impl ScopeKind {
    /// Whether `var`-style declarations hoist to this scope
    pub fn is_hoisting_target(&self) -> bool {
        matches!(self, ScopeKind::Module | ScopeKind::Function)
    }
}

/// A name bound in a scope.
#[derive(Debug, Clone)]
pub struct Binding {
    /// The bound name
    pub name: String,
    /// The scope the name is bound in
    pub scope: ScopeId,
    /// Indices of the variable records declaring this binding.
    /// Empty for parameters, imports and destructured names.
    pub declarations: Vec<usize>,
    /// Resolved reference sites, in the order they were added
    pub references: Vec<SourceLocation>,
}

/// Scope graph for tracking name bindings and references
#[derive(Debug, Default)]
pub struct ScopeGraph {
    /// Next scope ID to assign
    next_id: u32,
    /// Scope hierarchy (child → parent)
    parents: HashMap<ScopeId, ScopeId>,
    /// Scope kind
    kinds: HashMap<ScopeId, ScopeKind>,
    /// Definitions: (scope, name) → binding
    definitions: HashMap<(ScopeId, String), BindingId>,
    /// All bindings, indexed by `BindingId`
    bindings: Vec<Binding>,
}

impl ScopeGraph {
    /// Create a new scope graph with a root module scope
    pub fn new() -> Self {
        let mut graph = Self::default();
        graph.kinds.insert(ScopeId::root(), ScopeKind::Module);
        graph.next_id = 1;
        graph
    }

    /// Create a new child scope
    pub fn add_scope(&mut self, parent: ScopeId, kind: ScopeKind) -> ScopeId {
        let id = ScopeId(self.next_id);
        self.next_id += 1;
        self.parents.insert(id, parent);
        self.kinds.insert(id, kind);
        id
    }

    /// Bind a name in a scope.
    ///
    /// Binding an already bound name in the same scope reuses the existing
    /// binding (`var x = 1; var x = 2;` is one binding with two declarations).
    pub fn bind(&mut self, scope: ScopeId, name: impl Into<String>, declaration: Option<usize>) -> BindingId {
        let name = name.into();
        let id = match self.definitions.get(&(scope, name.clone())) {
            Some(id) => *id,
            None => {
                let id = BindingId(self.bindings.len());
                self.bindings.push(Binding {
                    name: name.clone(),
                    scope,
                    declarations: Vec::new(),
                    references: Vec::new(),
                });
                self.definitions.insert((scope, name), id);
                id
            }
        };
        if let Some(index) = declaration {
            self.bindings[id.0].declarations.push(index);
        }
        id
    }

    /// Record a resolved reference site for a binding
    pub fn add_reference(&mut self, binding: BindingId, location: SourceLocation) {
        if let Some(b) = self.bindings.get_mut(binding.0) {
            b.references.push(location);
        }
    }

    /// Get the parent of a scope
    pub fn parent(&self, scope: ScopeId) -> Option<ScopeId> {
        self.parents.get(&scope).copied()
    }

    /// Get the kind of a scope
    pub fn kind(&self, scope: ScopeId) -> Option<ScopeKind> {
        self.kinds.get(&scope).copied()
    }

    /// Nearest scope (starting at `scope`) that receives hoisted declarations
    pub fn hoisting_scope(&self, scope: ScopeId) -> ScopeId {
        self.scope_chain(scope)
            .into_iter()
            .find(|s| self.kind(*s).is_some_and(|k| k.is_hoisting_target()))
            .unwrap_or(ScopeId::root())
    }

    /// Look up a binding in a scope (not walking parents)
    pub fn lookup_local(&self, scope: ScopeId, name: &str) -> Option<BindingId> {
        self.definitions.get(&(scope, name.to_string())).copied()
    }

    /// Look up a binding walking up the scope chain
    pub fn lookup(&self, scope: ScopeId, name: &str) -> Option<BindingId> {
        let mut current = Some(scope);
        while let Some(s) = current {
            if let Some(id) = self.lookup_local(s, name) {
                return Some(id);
            }
            current = self.parent(s);
        }
        None
    }

    /// Get a binding by id
    pub fn binding(&self, id: BindingId) -> Option<&Binding> {
        self.bindings.get(id.0)
    }

    /// Get all bindings
    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// Get scope chain from a scope up to root
    pub fn scope_chain(&self, scope: ScopeId) -> Vec<ScopeId> {
        let mut chain = vec![scope];
        let mut current = scope;
        while let Some(parent) = self.parent(current) {
            chain.push(parent);
            current = parent;
        }
        chain
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_hierarchy() {
        let mut graph = ScopeGraph::new();

        let fn_scope = graph.add_scope(ScopeId::root(), ScopeKind::Function);
        let block_scope = graph.add_scope(fn_scope, ScopeKind::Block);

        assert_eq!(graph.parent(block_scope), Some(fn_scope));
        assert_eq!(graph.parent(fn_scope), Some(ScopeId::root()));
        assert_eq!(graph.parent(ScopeId::root()), None);
        assert_eq!(graph.hoisting_scope(block_scope), fn_scope);
    }

    #[test]
    fn test_binding_lookup() {
        let mut graph = ScopeGraph::new();

        let fn_scope = graph.add_scope(ScopeId::root(), ScopeKind::Function);
        let block_scope = graph.add_scope(fn_scope, ScopeKind::Block);

        let outer = graph.bind(ScopeId::root(), "x", Some(0));
        let inner = graph.bind(fn_scope, "x", Some(1));

        assert_eq!(graph.lookup_local(fn_scope, "x"), Some(inner));
        assert_eq!(graph.lookup(block_scope, "x"), Some(inner));
        assert_eq!(graph.lookup(ScopeId::root(), "x"), Some(outer));
        assert!(graph.lookup(block_scope, "y").is_none());
    }

    #[test]
    fn test_rebinding_same_scope_shares_binding() {
        let mut graph = ScopeGraph::new();

        let first = graph.bind(ScopeId::root(), "x", Some(0));
        let second = graph.bind(ScopeId::root(), "x", Some(1));
        let param = graph.bind(ScopeId::root(), "x", None);

        assert_eq!(first, second);
        assert_eq!(first, param);
        assert_eq!(graph.binding(first).unwrap().declarations, vec![0, 1]);
    }

    #[test]
    fn test_scope_chain() {
        let mut graph = ScopeGraph::new();

        let s1 = graph.add_scope(ScopeId::root(), ScopeKind::Class);
        let s2 = graph.add_scope(s1, ScopeKind::Function);
        let s3 = graph.add_scope(s2, ScopeKind::Block);

        let chain = graph.scope_chain(s3);
        assert_eq!(chain, vec![s3, s2, s1, ScopeId::root()]);
    }
}
