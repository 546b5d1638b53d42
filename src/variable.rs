//! Variable records - the uniform output of every language adapter
//!
//! Every adapter maps its language's literal and expression forms onto one
//! shared vocabulary of value kinds:
//! - `String`, `Number`, `Boolean`: scalar literals
//! - `Array`, `Object`: container literals
//! - `Function`: function-valued initializers
//! - `Reference`: an initializer that is another variable's name
//! - `TemplateString`: interpolated strings
//! - `Unknown`: anything else
//! - `Uninitialized`: declared with no initializer
//!
//! Statically typed languages may additionally report `Declared(type)`.

use crate::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

/// Sentinel `assigned_value` for declarations without an initializer.
pub const NO_VALUE: &str = "No value assigned";

/// Placeholder substituted for each interpolated expression of a template string.
pub const TEMPLATE_PLACEHOLDER: &str = "${...}";

/// Classification of an initializer's value category.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueKind {
    String,
    Number,
    Boolean,
    Array,
    Object,
    Function,
    /// The initializer is the name of another variable
    Reference,
    /// Interpolated string (JS template literal, Python f-string)
    TemplateString,
    /// Expression that maps to none of the other kinds
    Unknown,
    /// Declaration without an initializer
    Uninitialized,
    /// Raw declared type name, reported by statically typed heuristic adapters
    Declared(String),
}

impl ValueKind {
    /// Get the string representation of the value kind
    pub fn as_str(&self) -> &str {
        match self {
            ValueKind::String => "string",
            ValueKind::Number => "number",
            ValueKind::Boolean => "boolean",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
            ValueKind::Function => "function",
            ValueKind::Reference => "reference",
            ValueKind::TemplateString => "template string",
            ValueKind::Unknown => "unknown",
            ValueKind::Uninitialized => "uninitialized",
            ValueKind::Declared(type_name) => type_name,
        }
    }

    /// Get all shared (language independent) kinds
    pub fn shared() -> &'static [ValueKind] {
        &[
            ValueKind::String,
            ValueKind::Number,
            ValueKind::Boolean,
            ValueKind::Array,
            ValueKind::Object,
            ValueKind::Function,
            ValueKind::Reference,
            ValueKind::TemplateString,
            ValueKind::Unknown,
            ValueKind::Uninitialized,
        ]
    }

    /// Whether this kind belongs to the shared vocabulary
    pub fn is_shared(&self) -> bool {
        !matches!(self, ValueKind::Declared(_))
    }
}

impl FromStr for ValueKind {
    type Err = Error;

    /// Parses a shared tag; any other non-empty text is a declared type name.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(Error::InvalidKind(s.to_string()));
        }
        Ok(ValueKind::shared()
            .iter()
            .find(|kind| kind.as_str() == trimmed)
            .cloned()
            .unwrap_or_else(|| ValueKind::Declared(trimmed.to_string())))
    }
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for ValueKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ValueKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A position in source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    /// Line number (1-indexed)
    pub line: usize,
    /// Column in bytes (1-indexed)
    pub column: usize,
    /// Byte offset from the start of the text
    pub offset: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Self { line, column, offset }
    }

    /// Compute the location of a byte offset within `text`.
    pub fn at_offset(text: &str, offset: usize) -> Self {
        let offset = offset.min(text.len());
        let before = &text.as_bytes()[..offset];
        let line = before.iter().filter(|&&b| b == b'\n').count() + 1;
        let line_start = before
            .iter()
            .rposition(|&b| b == b'\n')
            .map(|i| i + 1)
            .unwrap_or(0);
        Self {
            line,
            column: offset - line_start + 1,
            offset,
        }
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// One variable declaration found in a source text.
///
/// Records are value objects: built once per extraction and never mutated by
/// the consumers that receive them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableRecord {
    /// Declared identifier (never empty)
    pub name: String,
    /// Initializer text, or [`NO_VALUE`]
    pub assigned_value: String,
    /// Value category of the initializer
    pub kind: ValueKind,
    /// Where the name is subsequently read, in document order
    pub reference_locations: Vec<SourceLocation>,
    /// Where the declared name appears
    pub declared_at: SourceLocation,
}

impl VariableRecord {
    /// Create a record with no reference locations
    pub fn new(
        name: impl Into<String>,
        assigned_value: impl Into<String>,
        kind: ValueKind,
        declared_at: SourceLocation,
    ) -> Self {
        Self {
            name: name.into(),
            assigned_value: assigned_value.into(),
            kind,
            reference_locations: Vec::new(),
            declared_at,
        }
    }

    /// Create a record for a declaration that has no initializer
    pub fn uninitialized(name: impl Into<String>, declared_at: SourceLocation) -> Self {
        Self::new(name, NO_VALUE, ValueKind::Uninitialized, declared_at)
    }

    /// Whether an initializer was present
    pub fn has_value(&self) -> bool {
        self.assigned_value != NO_VALUE
    }

    /// Line numbers of all reference sites (1-indexed)
    pub fn reference_lines(&self) -> Vec<usize> {
        self.reference_locations.iter().map(|loc| loc.line).collect()
    }
}

/// Sort records by declaration position. The sort is stable, so records
/// declared at the same offset keep their discovery order.
pub fn sort_by_position(records: &mut [VariableRecord]) {
    records.sort_by_key(|record| record.declared_at.offset);
}
