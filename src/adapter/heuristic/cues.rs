//! Shallow kind cues for heuristically extracted initializers
//!
//! Only the outer shape of the value text is inspected: leading quotes,
//! numeric literals, boolean keywords, enclosing brackets, lambda heads and
//! bare identifiers. Anything else is `Unknown`.

use std::sync::LazyLock;

use regex::Regex;

use crate::variable::ValueKind;

/// Literal spelling differences between language families
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CueFlavor {
    Python,
    CLike,
}

impl CueFlavor {
    fn booleans(self) -> [&'static str; 2] {
        match self {
            Self::Python => ["True", "False"],
            Self::CLike => ["true", "false"],
        }
    }

    fn null_words(self) -> &'static [&'static str] {
        match self {
            Self::Python => &["None", "self", "cls"],
            Self::CLike => &["null", "nullptr", "NULL", "this"],
        }
    }
}

static NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[+-]?(?:0[xXbBoO][0-9a-fA-F_']+|(?:\d[\d_']*(?:\.\d[\d_']*)?|\.\d[\d_']*)(?:[eE][+-]?\d+)?)[jJlLuUfFdD]*$",
    )
    .expect("NUMBER regex is invalid")
});

static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\W\d]\w*$").expect("IDENTIFIER regex is invalid"));

static LAMBDA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:lambda\b|\[[^\]]*\]\s*(?:\(|\{|mutable\b)|(?:\([^)]*\)\s*|[^\W\d]\w*\s+)->)")
        .expect("LAMBDA regex is invalid")
});

/// Python string prefix (`f`, `rb`, ...) before the opening quote, if any
fn string_prefix(value: &str, flavor: CueFlavor) -> Option<&str> {
    let quote = value.find(['"', '\''])?;
    let prefix = &value[..quote];
    let valid = match flavor {
        CueFlavor::Python => {
            prefix.len() <= 2 && prefix.chars().all(|c| matches!(c.to_ascii_lowercase(), 'r' | 'b' | 'u' | 'f'))
        }
        CueFlavor::CLike => matches!(prefix, "" | "L" | "u" | "U" | "u8" | "R" | "LR" | "uR" | "UR" | "u8R"),
    };
    valid.then_some(prefix)
}

/// Infer a value kind from the leading shape of an initializer
pub fn infer_kind(value: &str, flavor: CueFlavor) -> ValueKind {
    let value = value.trim();
    if value.is_empty() {
        return ValueKind::Uninitialized;
    }

    if let Some(prefix) = string_prefix(value, flavor) {
        if flavor == CueFlavor::Python && prefix.contains(['f', 'F']) {
            return ValueKind::TemplateString;
        }
        return ValueKind::String;
    }
    if NUMBER.is_match(value) {
        return ValueKind::Number;
    }
    if flavor.booleans().contains(&value) {
        return ValueKind::Boolean;
    }
    if LAMBDA.is_match(value) {
        return ValueKind::Function;
    }
    if value.starts_with('[') && value.ends_with(']') {
        return ValueKind::Array;
    }
    if value.starts_with('{') && value.ends_with('}') {
        return ValueKind::Object;
    }
    if IDENTIFIER.is_match(value) && !flavor.null_words().contains(&value) {
        return ValueKind::Reference;
    }
    ValueKind::Unknown
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_python_cues() {
        let cases = [
            ("'hi'", ValueKind::String),
            ("rb\"raw\"", ValueKind::String),
            ("f\"{name}!\"", ValueKind::TemplateString),
            ("42", ValueKind::Number),
            ("-3.5e10", ValueKind::Number),
            ("0xFF", ValueKind::Number),
            ("1_000_000", ValueKind::Number),
            ("2j", ValueKind::Number),
            ("True", ValueKind::Boolean),
            ("[1, 2]", ValueKind::Array),
            ("{'a': 1}", ValueKind::Object),
            ("lambda x: x + 1", ValueKind::Function),
            ("other", ValueKind::Reference),
            ("None", ValueKind::Unknown),
            ("compute(1)", ValueKind::Unknown),
            ("a + b", ValueKind::Unknown),
        ];
        for (value, expected) in cases {
            assert_eq!(infer_kind(value, CueFlavor::Python), expected, "value {}", value);
        }
    }

    #[test]
    fn test_c_like_cues() {
        let cases = [
            ("\"text\"", ValueKind::String),
            ("'c'", ValueKind::String),
            ("u8\"utf\"", ValueKind::String),
            ("10L", ValueKind::Number),
            ("1'000", ValueKind::Number),
            ("3.0f", ValueKind::Number),
            ("false", ValueKind::Boolean),
            ("{1, 2, 3}", ValueKind::Object),
            ("[&](int x) { return x; }", ValueKind::Function),
            ("(a, b) -> a + b", ValueKind::Function),
            ("x -> x * 2", ValueKind::Function),
            ("count", ValueKind::Reference),
            ("node->next", ValueKind::Unknown),
            ("nullptr", ValueKind::Unknown),
            ("new ArrayList<>()", ValueKind::Unknown),
        ];
        for (value, expected) in cases {
            assert_eq!(infer_kind(value, CueFlavor::CLike), expected, "value {}", value);
        }
    }

    #[test]
    fn test_non_ascii_identifiers_are_references() {
        assert_eq!(infer_kind("café", CueFlavor::Python), ValueKind::Reference);
        assert_eq!(infer_kind("größe", CueFlavor::CLike), ValueKind::Reference);
        assert_eq!(infer_kind("9lives", CueFlavor::Python), ValueKind::Unknown);
    }

    #[test]
    fn test_identifier_with_quote_later_is_not_string() {
        assert_eq!(infer_kind("name + 'x'", CueFlavor::Python), ValueKind::Unknown);
    }
}
