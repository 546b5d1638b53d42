//! Name Resolver - Resolves references to bindings
//!
//! Resolution algorithm:
//! 1. Walk outward through scopes
//! 2. The innermost scope binding the name wins (shadowing)
//! 3. Names bound nowhere (globals, builtins) stay unresolved
//!
//! Lookups are memoized per `(scope, name)` for the lifetime of the resolver,
//! which covers one file.

use std::collections::HashMap;
use crate::variable::SourceLocation;
use super::graph::{BindingId, ScopeGraph, ScopeId};

/// Name resolver using scope graph
pub struct NameResolver<'a> {
    scope_graph: &'a mut ScopeGraph,
    cache: HashMap<(ScopeId, String), Option<BindingId>>,
}

impl<'a> NameResolver<'a> {
    /// Create a new resolver
    pub fn new(scope_graph: &'a mut ScopeGraph) -> Self {
        Self {
            scope_graph,
            cache: HashMap::new(),
        }
    }

    /// Resolve a single name read in `scope`
    pub fn resolve(&mut self, scope: ScopeId, name: &str) -> Option<BindingId> {
        if let Some(hit) = self.cache.get(&(scope, name.to_string())) {
            return *hit;
        }
        let resolved = self.scope_graph.lookup(scope, name);
        self.cache.insert((scope, name.to_string()), resolved);
        resolved
    }

    /// Resolve a read and record its location on the binding.
    /// Returns the binding it resolved to, if any.
    pub fn record_reference(&mut self, scope: ScopeId, name: &str, location: SourceLocation) -> Option<BindingId> {
        let binding = self.resolve(scope, name)?;
        self.scope_graph.add_reference(binding, location);
        Some(binding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scope::graph::ScopeKind;

    fn loc(line: usize) -> SourceLocation {
        SourceLocation::new(line, 1, line * 10)
    }

    #[test]
    fn test_resolve_local() {
        let mut graph = ScopeGraph::new();
        let func_scope = graph.add_scope(ScopeId::root(), ScopeKind::Function);
        let binding = graph.bind(func_scope, "local_var", Some(0));

        let mut resolver = NameResolver::new(&mut graph);
        assert_eq!(resolver.resolve(func_scope, "local_var"), Some(binding));
        assert_eq!(resolver.resolve(ScopeId::root(), "local_var"), None);
    }

    #[test]
    fn test_resolve_parent_scope() {
        let mut graph = ScopeGraph::new();
        let fn_scope = graph.add_scope(ScopeId::root(), ScopeKind::Function);
        let block = graph.add_scope(fn_scope, ScopeKind::Block);
        let binding = graph.bind(ScopeId::root(), "config", Some(0));

        let mut resolver = NameResolver::new(&mut graph);
        assert_eq!(resolver.resolve(block, "config"), Some(binding));
    }

    #[test]
    fn test_shadowed_reference_goes_to_inner_binding() {
        let mut graph = ScopeGraph::new();
        let block = graph.add_scope(ScopeId::root(), ScopeKind::Block);
        let outer = graph.bind(ScopeId::root(), "x", Some(0));
        let inner = graph.bind(block, "x", Some(1));

        {
            let mut resolver = NameResolver::new(&mut graph);
            assert_eq!(resolver.record_reference(block, "x", loc(3)), Some(inner));
            assert_eq!(resolver.record_reference(ScopeId::root(), "x", loc(5)), Some(outer));
            assert_eq!(resolver.record_reference(block, "console", loc(4)), None);
        }

        assert_eq!(graph.binding(inner).unwrap().references, vec![loc(3)]);
        assert_eq!(graph.binding(outer).unwrap().references, vec![loc(5)]);
    }
}
