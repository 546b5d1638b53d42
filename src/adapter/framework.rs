//! Core adapter framework
//!
//! Defines the trait that all language adapters implement and the static
//! registry mapping each language tag to exactly one adapter.

use crate::Result;
use crate::language::{AdapterFamily, LanguageTag};
use crate::variable::VariableRecord;
use super::heuristic::{HeuristicOptions, PythonAdapter, TypedAdapter};
use super::javascript::JavaScriptAdapter;

/// Trait for language adapters
///
/// Each language adapter is responsible for:
/// 1. Declaring which language tags it handles
/// 2. Finding variable declarations in a source text
/// 3. Classifying each initializer into a [`crate::ValueKind`]
/// 4. Returning records ordered by declaration position
///
/// Adapters hold no mutable state, so one instance can serve concurrent calls.
pub trait LanguageAdapter: Send + Sync {
    /// Get the language name (for display)
    fn language_name(&self) -> &str;

    /// Get the language tags this adapter handles
    fn languages(&self) -> &[LanguageTag];

    /// The adapter family this implementation belongs to
    fn family(&self) -> AdapterFamily;

    /// Check if this adapter handles a tag
    fn handles(&self, tag: LanguageTag) -> bool {
        self.languages().contains(&tag)
    }

    /// Extract all variable declarations from `text`
    fn extract(&self, text: &str) -> Result<Vec<VariableRecord>>;
}

/// Registry of language adapters
#[derive(Default)]
pub struct AdapterRegistry {
    adapters: Vec<Box<dyn LanguageAdapter>>,
}

impl AdapterRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an adapter
    pub fn register(&mut self, adapter: impl LanguageAdapter + 'static) {
        self.adapters.push(Box::new(adapter));
    }

    /// Find the adapter for a language tag
    pub fn find_adapter(&self, tag: LanguageTag) -> Option<&dyn LanguageAdapter> {
        self.adapters
            .iter()
            .find(|a| a.handles(tag))
            .map(|a| a.as_ref())
    }

    /// Get all registered adapters
    pub fn adapters(&self) -> &[Box<dyn LanguageAdapter>] {
        &self.adapters
    }
}

/// Build the adapter bound to one language.
///
/// The match is exhaustive over [`LanguageTag`], so adding a tag without
/// choosing its adapter does not compile.
pub fn adapter_for(tag: LanguageTag, options: &HeuristicOptions) -> Box<dyn LanguageAdapter> {
    match tag {
        LanguageTag::JavaScript => Box::new(JavaScriptAdapter::javascript()),
        LanguageTag::TypeScript => Box::new(JavaScriptAdapter::typescript()),
        LanguageTag::Tsx => Box::new(JavaScriptAdapter::tsx()),
        LanguageTag::Python => Box::new(PythonAdapter::with_options(options.clone())),
        LanguageTag::Java => Box::new(TypedAdapter::java(options.clone())),
        LanguageTag::Cpp => Box::new(TypedAdapter::cpp(options.clone())),
    }
}

/// Create a registry with one built-in adapter per supported language
pub fn default_registry(options: &HeuristicOptions) -> AdapterRegistry {
    let adapters = LanguageTag::all()
        .iter()
        .map(|tag| adapter_for(*tag, options))
        .collect();
    AdapterRegistry { adapters }
}
