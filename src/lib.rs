//! # Aliasbot - Multi-language variable extraction
//!
//! Finds variable declarations in source text so that better names can be
//! suggested and reviewed.
//!
//! Aliasbot provides:
//! - A uniform [`VariableRecord`] output for every supported language
//! - Tree-sitter based adapters with scope-aware reference tracking
//! - Bounded heuristic scanners for languages handled without a grammar
//! - Parsing of naming suggestions returned by a language model

pub mod variable;
pub mod language;
pub mod scope;
pub mod adapter;
pub mod engine;
pub mod suggestion;
pub mod config;
pub mod ignore;
pub mod ui;

// Re-exports for convenient access
pub use variable::{SourceLocation, ValueKind, VariableRecord, NO_VALUE};
pub use language::{AdapterFamily, LanguageTag};
pub use engine::ExtractionEngine;
pub use adapter::HeuristicOptions;
pub use suggestion::{parse_suggestions, SuggestionSet};

/// Result type alias for Aliasbot operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Aliasbot operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("Parse error in {language} source{}", describe_location(.line, .offset))]
    Parse {
        language: LanguageTag,
        line: Option<usize>,
        offset: Option<usize>,
    },

    #[error("Grammar error: {0}")]
    Grammar(String),

    #[error("Invalid value kind: {0:?}")]
    InvalidKind(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn describe_location(line: &Option<usize>, offset: &Option<usize>) -> String {
    match (line, offset) {
        (Some(line), Some(offset)) => format!(" at line {} (offset {})", line, offset),
        (Some(line), None) => format!(" at line {}", line),
        (None, Some(offset)) => format!(" at offset {}", offset),
        (None, None) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = Error::Parse {
            language: LanguageTag::JavaScript,
            line: Some(3),
            offset: Some(42),
        };
        assert_eq!(err.to_string(), "Parse error in javascript source at line 3 (offset 42)");

        let err = Error::Parse {
            language: LanguageTag::Tsx,
            line: None,
            offset: None,
        };
        assert_eq!(err.to_string(), "Parse error in typescriptreact source");
    }
}
