//! Naming suggestions returned by a language model
//!
//! Responses are free text. Only lines of the shape
//! ``- `name:suggestedName` `` carry suggestions; everything else is ignored.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::variable::VariableRecord;

static SUGGESTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"- `(\w+):(.+?)`").expect("SUGGESTION regex is invalid"));

/// Candidate names for one variable
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub variable: String,
    pub candidates: Vec<String>,
}

/// Suggestions grouped per variable, in order of first appearance
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SuggestionSet {
    entries: Vec<Suggestion>,
}

/// A record paired with the names suggested for it
#[derive(Debug, Clone, Serialize)]
pub struct Review<'a> {
    pub record: &'a VariableRecord,
    pub candidates: &'a [String],
}

impl SuggestionSet {
    pub fn entries(&self) -> &[Suggestion] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Candidates suggested for `variable`, empty if none
    pub fn candidates(&self, variable: &str) -> &[String] {
        self.entries
            .iter()
            .find(|entry| entry.variable == variable)
            .map(|entry| entry.candidates.as_slice())
            .unwrap_or(&[])
    }

    fn add(&mut self, variable: &str, candidate: &str) {
        let index = match self.entries.iter().position(|entry| entry.variable == variable) {
            Some(index) => index,
            None => {
                self.entries.push(Suggestion {
                    variable: variable.to_string(),
                    candidates: Vec::new(),
                });
                self.entries.len() - 1
            }
        };
        let candidates = &mut self.entries[index].candidates;
        if !candidates.iter().any(|c| c == candidate) {
            candidates.push(candidate.to_string());
        }
    }

    /// Pair every record with its candidates, keeping record order
    pub fn for_records<'a>(&'a self, records: &'a [VariableRecord]) -> Vec<Review<'a>> {
        records
            .iter()
            .map(|record| Review {
                record,
                candidates: self.candidates(&record.name),
            })
            .collect()
    }
}

/// Parse a model response into suggestions.
///
/// A variable may appear on several lines; its candidates are kept in the
/// order given, without duplicates.
pub fn parse_suggestions(text: &str) -> SuggestionSet {
    let mut set = SuggestionSet::default();
    for line in text.lines() {
        let Some(captures) = SUGGESTION.captures(line) else {
            continue;
        };
        let candidate = captures[2].trim();
        if candidate.is_empty() {
            continue;
        }
        set.add(&captures[1], candidate);
    }
    tracing::debug!(variables = set.len(), "parsed suggestions");
    set
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variable::{SourceLocation, ValueKind};

    const RESPONSE: &str = "Here are some better names:\n\
        - `x:userCount`\n\
        - `tmp:pendingRequests`\n\
        Some commentary - not a suggestion\n\
        - `x:activeUsers`\n\
        - `x:userCount`\n\
        * `y:ignored`\n";

    #[test]
    fn test_parse_groups_by_first_appearance() {
        let set = parse_suggestions(RESPONSE);
        let variables: Vec<_> = set.entries().iter().map(|e| e.variable.as_str()).collect();
        assert_eq!(variables, vec!["x", "tmp"]);
        assert_eq!(set.candidates("x"), ["userCount", "activeUsers"]);
        assert_eq!(set.candidates("tmp"), ["pendingRequests"]);
        assert!(set.candidates("y").is_empty());
    }

    #[test]
    fn test_non_matching_text_is_ignored() {
        assert!(parse_suggestions("no suggestions here\n- plain bullet\n- `missing colon`").is_empty());
    }

    #[test]
    fn test_non_ascii_variable_names() {
        let set = parse_suggestions("- `café:coffeeShop`\n- `größe:size`\n");
        assert_eq!(set.candidates("café"), ["coffeeShop"]);
        assert_eq!(set.candidates("größe"), ["size"]);
    }

    #[test]
    fn test_join_with_records() {
        let set = parse_suggestions(RESPONSE);
        let records = vec![
            VariableRecord::new("tmp", "[]", ValueKind::Array, SourceLocation::new(1, 7, 6)),
            VariableRecord::new("other", "1", ValueKind::Number, SourceLocation::new(2, 7, 20)),
        ];
        let reviews = set.for_records(&records);
        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[0].record.name, "tmp");
        assert_eq!(reviews[0].candidates, ["pendingRequests"]);
        assert!(reviews[1].candidates.is_empty());
    }
}
