//! Scope Graph - name binding model for the grammar-based adapters
//!
//! Adapters declare scopes and bindings while walking a syntax tree, then
//! resolve identifier reads through the graph to attach reference sites to
//! the declarations they belong to.

pub mod graph;
pub mod resolver;

pub use graph::{Binding, BindingId, ScopeGraph, ScopeId, ScopeKind};
pub use resolver::NameResolver;
