//! Supported language tags
//!
//! Tags follow editor language identifiers (`javascript`, `typescriptreact`, ...)
//! with a few short aliases accepted on input.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// The fixed set of languages the engine can extract from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageTag {
    /// JavaScript, including JSX
    JavaScript,
    TypeScript,
    /// TypeScript with JSX
    #[serde(rename = "typescriptreact")]
    Tsx,
    Python,
    Java,
    Cpp,
}

/// Which adapter family extracts a language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdapterFamily {
    /// Full syntax tree with scope-aware reference tracking
    Grammar,
    /// Bounded pattern scanning, no reference tracking
    Heuristic,
}

impl AdapterFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdapterFamily::Grammar => "grammar",
            AdapterFamily::Heuristic => "heuristic",
        }
    }
}

impl std::fmt::Display for AdapterFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl LanguageTag {
    /// Canonical editor identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageTag::JavaScript => "javascript",
            LanguageTag::TypeScript => "typescript",
            LanguageTag::Tsx => "typescriptreact",
            LanguageTag::Python => "python",
            LanguageTag::Java => "java",
            LanguageTag::Cpp => "cpp",
        }
    }

    /// Get all supported tags
    pub fn all() -> &'static [LanguageTag] {
        &[
            LanguageTag::JavaScript,
            LanguageTag::TypeScript,
            LanguageTag::Tsx,
            LanguageTag::Python,
            LanguageTag::Java,
            LanguageTag::Cpp,
        ]
    }

    /// The adapter family bound to this language
    pub fn family(&self) -> AdapterFamily {
        match self {
            LanguageTag::JavaScript | LanguageTag::TypeScript | LanguageTag::Tsx => {
                AdapterFamily::Grammar
            }
            LanguageTag::Python | LanguageTag::Java | LanguageTag::Cpp => AdapterFamily::Heuristic,
        }
    }

    /// Default file extensions for this language
    pub fn file_extensions(&self) -> &'static [&'static str] {
        match self {
            LanguageTag::JavaScript => &["js", "jsx", "mjs", "cjs"],
            LanguageTag::TypeScript => &["ts", "mts", "cts"],
            LanguageTag::Tsx => &["tsx"],
            LanguageTag::Python => &["py", "pyi"],
            LanguageTag::Java => &["java"],
            LanguageTag::Cpp => &["cpp", "cc", "cxx", "hpp", "hh", "hxx", "h"],
        }
    }

    /// Detect a language from a file's extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|tag| tag.file_extensions().contains(&ext.as_str()))
    }
}

impl FromStr for LanguageTag {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "javascript" | "javascriptreact" | "js" | "jsx" => Ok(LanguageTag::JavaScript),
            "typescript" | "ts" => Ok(LanguageTag::TypeScript),
            "typescriptreact" | "tsx" => Ok(LanguageTag::Tsx),
            "python" | "py" => Ok(LanguageTag::Python),
            "java" => Ok(LanguageTag::Java),
            "cpp" | "c++" => Ok(LanguageTag::Cpp),
            _ => Err(Error::UnsupportedLanguage(s.to_string())),
        }
    }
}

impl std::fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_roundtrip() {
        for tag in LanguageTag::all() {
            let parsed: LanguageTag = tag.as_str().parse().unwrap();
            assert_eq!(*tag, parsed);
        }
    }

    #[test]
    fn test_serialized_tag_is_canonical() {
        for tag in LanguageTag::all() {
            let json = serde_json::to_value(tag).unwrap();
            assert_eq!(json, serde_json::json!(tag.as_str()));
            let back: LanguageTag = serde_json::from_value(json).unwrap();
            assert_eq!(back, *tag);
        }
    }

    #[test]
    fn test_tag_aliases() {
        assert_eq!(LanguageTag::from_str("JSX").unwrap(), LanguageTag::JavaScript);
        assert_eq!(LanguageTag::from_str("javascriptreact").unwrap(), LanguageTag::JavaScript);
        assert_eq!(LanguageTag::from_str("c++").unwrap(), LanguageTag::Cpp);
        assert_eq!(LanguageTag::from_str(" py ").unwrap(), LanguageTag::Python);
    }

    #[test]
    fn test_unsupported_tag_names_offender() {
        match LanguageTag::from_str("cobol") {
            Err(Error::UnsupportedLanguage(tag)) => assert_eq!(tag, "cobol"),
            other => panic!("expected UnsupportedLanguage, got {:?}", other),
        }
    }

    #[test]
    fn test_from_path() {
        assert_eq!(LanguageTag::from_path(Path::new("src/app.tsx")), Some(LanguageTag::Tsx));
        assert_eq!(LanguageTag::from_path(Path::new("Main.JAVA")), Some(LanguageTag::Java));
        assert_eq!(LanguageTag::from_path(Path::new("README.md")), None);
        assert_eq!(LanguageTag::from_path(Path::new("Makefile")), None);
    }

    #[test]
    fn test_families() {
        assert_eq!(LanguageTag::TypeScript.family(), AdapterFamily::Grammar);
        assert_eq!(LanguageTag::Cpp.family(), AdapterFamily::Heuristic);
    }
}
