//! Python declaration scanner
//!
//! Recognizes at each logical statement start:
//! - annotated assignment: `name: Type = value` and bare `name: Type`
//! - chained assignment: `a = b = value` (every target gets a record)
//!
//! A statement ends at a newline outside brackets and strings, unless the
//! line ends with a backslash, or at `;`.

use crate::Result;
use crate::adapter::framework::LanguageAdapter;
use crate::language::{AdapterFamily, LanguageTag};
use crate::variable::{self, VariableRecord};
use super::cues::{CueFlavor, infer_kind};
use super::scanner::{self, LineIndex, PYTHON, Scanner, Stop, Terminators, ValueScan};
use super::{HeuristicOptions, Matched};

const KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
    "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise",
    "return", "try", "while", "with", "yield",
];

const STATEMENT_END: Terminators = Terminators {
    newline: true,
    semicolon: true,
    colon: false,
    assignment: false,
    declarator_comma: false,
};

const ANNOTATION_END: Terminators = Terminators {
    assignment: true,
    ..STATEMENT_END
};

/// Statements that are not declarations also end at a block colon
const SKIP_END: Terminators = Terminators {
    colon: true,
    ..STATEMENT_END
};

/// Heuristic adapter for Python sources
#[derive(Debug, Clone, Default)]
pub struct PythonAdapter {
    options: HeuristicOptions,
}

impl PythonAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: HeuristicOptions) -> Self {
        Self { options }
    }

    fn match_statement(&self, scanner: &Scanner, lines: &LineIndex, start: usize) -> Option<Matched> {
        let (name, name_end) = scanner.ident_at(start)?;
        if KEYWORDS.contains(&name) {
            return None;
        }
        let after = scanner.skip_inline_space(name_end);
        match scanner.byte(after)? {
            b':' if scanner.byte(after + 1) != Some(b'=') => {
                self.match_annotated(scanner, lines, (name, start), after + 1)
            }
            b'=' if scanner.is_lone_equals(after) => {
                self.match_chained(scanner, lines, (name, start), after + 1)
            }
            _ => None,
        }
    }

    fn match_annotated(
        &self,
        scanner: &Scanner,
        lines: &LineIndex,
        target: (&str, usize),
        annotation_start: usize,
    ) -> Option<Matched> {
        let scan = self.scan(scanner, target.1, annotation_start, ANNOTATION_END);
        let annotation = scanner.slice(annotation_start, scan.end).trim();
        let next = match scan.stop {
            Stop::Limit => return Some(self.dropped(scanner, target)),
            Stop::Unbalanced(_) => return None,
            _ if annotation.is_empty() => return None,
            Stop::Terminator(eq) if scanner.byte(eq) == Some(b'=') => {
                return self.match_value(scanner, lines, vec![target], eq + 1);
            }
            Stop::Terminator(end) => end + 1,
            Stop::EndOfText => scanner.len(),
        };

        let (name, at) = target;
        Some(Matched {
            records: vec![VariableRecord::uninitialized(name, lines.location(at))],
            next,
        })
    }

    fn match_chained<'s>(
        &self,
        scanner: &Scanner<'s>,
        lines: &LineIndex,
        first: (&'s str, usize),
        after_equals: usize,
    ) -> Option<Matched> {
        let mut targets = vec![first];
        let mut pos = scanner.skip_inline_space(after_equals);
        while let Some((name, end)) = scanner.ident_at(pos) {
            let eq = scanner.skip_inline_space(end);
            if KEYWORDS.contains(&name) || !scanner.is_lone_equals(eq) {
                break;
            }
            targets.push((name, pos));
            pos = scanner.skip_inline_space(eq + 1);
        }
        self.match_value(scanner, lines, targets, pos)
    }

    fn match_value(
        &self,
        scanner: &Scanner,
        lines: &LineIndex,
        targets: Vec<(&str, usize)>,
        value_start: usize,
    ) -> Option<Matched> {
        let value_start = scanner.skip_inline_space(value_start);
        let scan = self.scan(scanner, targets[0].1, value_start, STATEMENT_END);
        let next = match scan.stop {
            Stop::Limit => return Some(self.dropped(scanner, targets[0])),
            Stop::Terminator(end) => end + 1,
            Stop::Unbalanced(end) => end,
            Stop::EndOfText => scanner.len(),
        };

        let value = scanner::collapse_whitespace(&scanner.code_text(value_start, scan.end));
        if value.is_empty() {
            return None;
        }
        let kind = infer_kind(&value, CueFlavor::Python);
        let records = targets
            .into_iter()
            .map(|(name, at)| VariableRecord::new(name, value.clone(), kind.clone(), lines.location(at)))
            .collect();
        Some(Matched { records, next })
    }

    /// Scan a value of the statement at `statement`. An unclosed bracket
    /// gives up at the first line that starts a new declaration no deeper
    /// than the statement itself.
    fn scan(&self, scanner: &Scanner, statement: usize, start: usize, terminators: Terminators) -> ValueScan {
        let indent = scanner.indentation(statement);
        scanner.scan_value_until(start, terminators, self.options.max_lookahead, |line| {
            starts_declaration(scanner, line, indent)
        })
    }

    /// Give up on an oversized candidate and resume on the next line
    fn dropped(&self, scanner: &Scanner, (name, at): (&str, usize)) -> Matched {
        tracing::warn!(
            variable = name,
            offset = at,
            max_lookahead = self.options.max_lookahead,
            "declaration exceeds lookahead, skipping"
        );
        Matched {
            records: Vec::new(),
            next: scanner.line_end(at) + 1,
        }
    }

    fn skip_statement(&self, scanner: &Scanner, start: usize) -> usize {
        let scan = self.scan(scanner, start, start, SKIP_END);
        match scan.stop {
            Stop::Terminator(end) | Stop::Unbalanced(end) => end + 1,
            Stop::EndOfText => scanner.len(),
            Stop::Limit => scanner.line_end(start) + 1,
        }
    }
}

/// Whether the line at `line` opens `name =` or `name:` indented at most `indent`
fn starts_declaration(scanner: &Scanner, line: usize, indent: usize) -> bool {
    let pos = scanner.skip_inline_space(line);
    if pos - line > indent {
        return false;
    }
    let Some((name, end)) = scanner.ident_at(pos) else {
        return false;
    };
    let after = scanner.skip_inline_space(end);
    !KEYWORDS.contains(&name)
        && match scanner.byte(after) {
            Some(b'=') => scanner.is_lone_equals(after),
            Some(b':') => scanner.byte(after + 1) != Some(b'='),
            _ => false,
        }
}

impl LanguageAdapter for PythonAdapter {
    fn language_name(&self) -> &str {
        "Python"
    }

    fn languages(&self) -> &[LanguageTag] {
        &[LanguageTag::Python]
    }

    fn family(&self) -> AdapterFamily {
        AdapterFamily::Heuristic
    }

    fn extract(&self, text: &str) -> Result<Vec<VariableRecord>> {
        let scanner = Scanner::new(text, &PYTHON);
        let lines = LineIndex::new(text);
        let mut records = Vec::new();
        let mut pos = 0;

        while pos < scanner.len() {
            pos = scanner.skip_inline_space(pos);
            match scanner.byte(pos) {
                None => break,
                Some(b'\n' | b';') => {
                    pos += 1;
                    continue;
                }
                _ => {}
            }
            if let Some(end) = scanner.comment_end(pos) {
                pos = end;
                continue;
            }
            match self.match_statement(&scanner, &lines, pos) {
                Some(matched) => {
                    records.extend(matched.records);
                    pos = matched.next;
                }
                None => pos = self.skip_statement(&scanner, pos),
            }
        }

        variable::sort_by_position(&mut records);
        tracing::debug!(language = %LanguageTag::Python, records = records.len(), "extracted declarations");
        Ok(records)
    }
}
