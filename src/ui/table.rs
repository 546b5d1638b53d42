use tabled::{settings::Style, Table, Tabled};

use crate::engine::LanguageInfo;
use crate::suggestion::Review;
use crate::variable::VariableRecord;

const VALUE_WIDTH: usize = 48;

#[derive(Tabled)]
struct RecordRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Line")]
    line: usize,
    #[tabled(rename = "References")]
    references: String,
}

#[derive(Tabled)]
struct ReviewRow {
    #[tabled(rename = "Variable")]
    variable: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Suggestions")]
    suggestions: String,
}

#[derive(Tabled)]
struct LanguageRow {
    #[tabled(rename = "Tag")]
    tag: String,
    #[tabled(rename = "Adapter")]
    adapter: String,
    #[tabled(rename = "Family")]
    family: String,
    #[tabled(rename = "Extensions")]
    extensions: String,
}

/// Shorten `text` to `max` characters, marking the cut with an ellipsis
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept)
}

fn render<T: Tabled>(rows: &[T]) -> String {
    if rows.is_empty() {
        return String::new();
    }
    Table::new(rows).with(Style::rounded()).to_string()
}

pub fn records_table(records: &[VariableRecord]) -> String {
    let rows: Vec<RecordRow> = records
        .iter()
        .map(|record| RecordRow {
            name: record.name.clone(),
            value: truncate(&record.assigned_value, VALUE_WIDTH),
            kind: record.kind.to_string(),
            line: record.declared_at.line,
            references: record
                .reference_lines()
                .iter()
                .map(|line| line.to_string())
                .collect::<Vec<_>>()
                .join(", "),
        })
        .collect();
    render(&rows)
}

pub fn review_table(reviews: &[Review<'_>]) -> String {
    let rows: Vec<ReviewRow> = reviews
        .iter()
        .map(|review| ReviewRow {
            variable: review.record.name.clone(),
            value: truncate(&review.record.assigned_value, VALUE_WIDTH),
            suggestions: if review.candidates.is_empty() {
                "No suggestions available".to_string()
            } else {
                review.candidates.join(", ")
            },
        })
        .collect();
    render(&rows)
}

pub fn languages_table(languages: &[LanguageInfo]) -> String {
    let rows: Vec<LanguageRow> = languages
        .iter()
        .map(|info| LanguageRow {
            tag: info.tag.to_string(),
            adapter: info.adapter.clone(),
            family: info.family.to_string(),
            extensions: info.tag.file_extensions().join(", "),
        })
        .collect();
    render(&rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::suggestion::parse_suggestions;
    use crate::variable::{SourceLocation, ValueKind};

    fn record(name: &str, value: &str) -> VariableRecord {
        let mut record = VariableRecord::new(name, value, ValueKind::Unknown, SourceLocation::new(3, 1, 10));
        record.reference_locations = vec![SourceLocation::new(5, 2, 30), SourceLocation::new(9, 4, 80)];
        record
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
        assert_eq!(truncate("ééééé", 3), "éé…");
    }

    #[test]
    fn test_records_table() {
        let table = records_table(&[record("counter", "0")]);
        assert!(table.contains("counter"));
        assert!(table.contains("References"));
        assert!(table.contains("5, 9"));
        assert!(records_table(&[]).is_empty());
    }

    #[test]
    fn test_review_table() {
        let records = vec![record("x", "1"), record("y", "2")];
        let set = parse_suggestions("- `x:retryCount`");
        let table = review_table(&set.for_records(&records));
        assert!(table.contains("retryCount"));
        assert!(table.contains("No suggestions available"));
    }
}
