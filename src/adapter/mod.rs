//! Language Adapter Framework
//!
//! Two adapter families implement one extraction contract:
//! - `javascript`: tree-sitter grammars with scope-aware reference tracking
//! - `heuristic`: bounded scanners for languages without an embedded grammar
//!
//! Every supported language is bound to exactly one adapter.

pub mod framework;
pub mod javascript;
pub mod heuristic;

pub use framework::{LanguageAdapter, AdapterRegistry, adapter_for, default_registry};
pub use heuristic::{HeuristicOptions, PythonAdapter, TypedAdapter};
pub use javascript::JavaScriptAdapter;
