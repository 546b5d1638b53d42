//! Extraction engine
//!
//! Single entry point: resolves a language tag to its adapter and returns
//! that adapter's records. The engine holds no per-call state and can be
//! shared across threads.

use std::path::Path;

use crate::adapter::{AdapterRegistry, HeuristicOptions, LanguageAdapter, default_registry};
use crate::language::{AdapterFamily, LanguageTag};
use crate::variable::VariableRecord;
use crate::{Error, Result};

/// One supported language, as reported by [`ExtractionEngine::languages`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageInfo {
    pub tag: LanguageTag,
    pub adapter: String,
    pub family: AdapterFamily,
}

/// Dispatches extraction requests to language adapters
pub struct ExtractionEngine {
    registry: AdapterRegistry,
}

impl ExtractionEngine {
    /// Create an engine with default heuristic options
    pub fn new() -> Self {
        Self::with_options(HeuristicOptions::default())
    }

    /// Create an engine whose heuristic adapters use `options`
    pub fn with_options(options: HeuristicOptions) -> Self {
        Self {
            registry: default_registry(&options),
        }
    }

    /// Extract variable declarations from `text` written in the language named by `tag`.
    ///
    /// Fails with [`Error::UnsupportedLanguage`] if `tag` names no supported
    /// language, and with [`Error::Parse`] if a grammar-based adapter finds
    /// syntax errors.
    pub fn extract(&self, text: &str, tag: &str) -> Result<Vec<VariableRecord>> {
        let language: LanguageTag = tag.parse()?;
        self.extract_language(text, language)
    }

    /// Extract with an already resolved language tag
    pub fn extract_language(&self, text: &str, language: LanguageTag) -> Result<Vec<VariableRecord>> {
        let adapter = self.adapter(language)?;
        let _span = tracing::debug_span!("extract", language = %language, bytes = text.len()).entered();
        adapter.extract(text)
    }

    /// Read and extract one file.
    ///
    /// The language is taken from `language` when given, otherwise detected
    /// from the file extension.
    pub fn extract_file(&self, path: &Path, language: Option<LanguageTag>) -> Result<Vec<VariableRecord>> {
        let language = match language.or_else(|| LanguageTag::from_path(path)) {
            Some(language) => language,
            None => {
                let extension = path
                    .extension()
                    .and_then(|e| e.to_str())
                    .unwrap_or_default();
                return Err(Error::UnsupportedLanguage(extension.to_string()));
            }
        };
        let text = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), language = %language, "extracting file");
        self.extract_language(&text, language)
    }

    /// All supported languages with their adapters
    pub fn languages(&self) -> Vec<LanguageInfo> {
        LanguageTag::all()
            .iter()
            .filter_map(|tag| {
                let adapter = self.registry.find_adapter(*tag)?;
                Some(LanguageInfo {
                    tag: *tag,
                    adapter: adapter.language_name().to_string(),
                    family: adapter.family(),
                })
            })
            .collect()
    }

    fn adapter(&self, language: LanguageTag) -> Result<&dyn LanguageAdapter> {
        self.registry
            .find_adapter(language)
            .ok_or_else(|| Error::UnsupportedLanguage(language.to_string()))
    }
}

impl Default for ExtractionEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variable::ValueKind;
    use tempfile::TempDir;

    fn names(records: &[VariableRecord]) -> Vec<&str> {
        records.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let engine = ExtractionEngine::new();
        let sources = [
            ("javascript", "let a = 1;\nconst b = a + 1;\nuse(a, b);\n"),
            ("python", "a = 1\nb = a + 1\n"),
            ("java", "int a = 1;\nint b = a + 1;\n"),
            ("cpp", "int a = 1;\nauto b = a + 1;\n"),
        ];
        for (tag, text) in sources {
            let first = engine.extract(text, tag).unwrap();
            let second = engine.extract(text, tag).unwrap();
            assert_eq!(first, second, "{} output differs between runs", tag);
        }
    }

    #[test]
    fn test_records_follow_declaration_order() {
        let engine = ExtractionEngine::new();
        let sources = [
            ("js", "let x = 1;\nlet y = 2;\n"),
            ("py", "x = 1\ny = 2\n"),
            ("java", "int x = 1;\nint y = 2;\n"),
            ("c++", "int x = 1;\nint y = 2;\n"),
        ];
        for (tag, text) in sources {
            let records = engine.extract(text, tag).unwrap();
            assert_eq!(names(&records), vec!["x", "y"], "order for {}", tag);
            assert_eq!(records[0].assigned_value, "1");
        }
    }

    #[test]
    fn test_shadowed_declarations_keep_separate_references() {
        let text = "let a = 1;\nfunction f() {\n  let a = 2;\n  return a;\n}\nconsole.log(a);\n";
        let records = ExtractionEngine::new().extract(text, "javascript").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].reference_lines(), vec![6]);
        assert_eq!(records[1].reference_lines(), vec![4]);
    }

    #[test]
    fn test_kind_classification() {
        let text = r#"const s = "hi";
const n = 42;
const b = true;
const arr = [1, 2];
const obj = { k: 1 };
const fn1 = () => 1;
const ref = n;
const t = `x${n}`;
"#;
        let kinds: Vec<_> = ExtractionEngine::new()
            .extract(text, "javascript")
            .unwrap()
            .into_iter()
            .map(|r| r.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                ValueKind::String,
                ValueKind::Number,
                ValueKind::Boolean,
                ValueKind::Array,
                ValueKind::Object,
                ValueKind::Function,
                ValueKind::Reference,
                ValueKind::TemplateString,
            ]
        );
    }

    #[test]
    fn test_destructuring_produces_no_records() {
        let records = ExtractionEngine::new()
            .extract("const { a, b } = obj;\nconst [c, d] = list;\n", "javascript")
            .unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_heuristic_values_are_contained() {
        let records = ExtractionEngine::new()
            .extract("config = {\n    'a': 1,\n    'b': 2,\n}\nnext_value = 3\n", "python")
            .unwrap();
        assert_eq!(names(&records), vec!["config", "next_value"]);
        assert_eq!(records[0].assigned_value, "{ 'a': 1, 'b': 2, }");
        assert!(!records[0].assigned_value.contains("next_value"));
    }

    #[test]
    fn test_malformed_input_asymmetry() {
        let engine = ExtractionEngine::new();
        assert!(matches!(
            engine.extract("const = = ;", "javascript"),
            Err(Error::Parse { language: LanguageTag::JavaScript, .. })
        ));
        assert!(engine.extract("= = ;", "python").unwrap().is_empty());
        assert!(engine.extract("int = ;", "java").unwrap().is_empty());
    }

    #[test]
    fn test_unsupported_language() {
        match ExtractionEngine::new().extract("x = 1", "cobol") {
            Err(Error::UnsupportedLanguage(tag)) => assert_eq!(tag, "cobol"),
            other => panic!("expected unsupported language, got {:?}", other),
        }
    }

    #[test]
    fn test_lookahead_option_reaches_heuristic_adapters() {
        let engine = ExtractionEngine::with_options(HeuristicOptions { max_lookahead: 4 });
        let records = engine.extract("long_name = [1, 2, 3]\nx = 1\n", "python").unwrap();
        assert_eq!(names(&records), vec!["x"]);
    }

    #[test]
    fn test_extract_file_detects_language() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sample.py");
        std::fs::write(&path, "answer = 42\n").unwrap();

        let engine = ExtractionEngine::new();
        let records = engine.extract_file(&path, None).unwrap();
        assert_eq!(records[0].kind, ValueKind::Number);

        let unknown = dir.path().join("notes.txt");
        std::fs::write(&unknown, "x").unwrap();
        assert!(matches!(
            engine.extract_file(&unknown, None),
            Err(Error::UnsupportedLanguage(ext)) if ext == "txt"
        ));
        assert!(matches!(
            engine.extract_file(&dir.path().join("missing.py"), None),
            Err(Error::Io(_))
        ));
    }

    #[test]
    fn test_languages_cover_every_tag() {
        let languages = ExtractionEngine::new().languages();
        assert_eq!(languages.len(), LanguageTag::all().len());
        let python = languages.iter().find(|l| l.tag == LanguageTag::Python).unwrap();
        assert_eq!(python.family, AdapterFamily::Heuristic);
    }
}
