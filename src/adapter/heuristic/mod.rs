//! Heuristic adapters
//!
//! Python, Java and C++ are handled without a grammar. A bounded scanner
//! walks statement starts, matches declaration shapes and cuts each
//! initializer at the nearest real statement terminator. These adapters
//! never fail and never report reference locations; malformed input simply
//! yields fewer records.

pub mod cues;
pub mod python;
pub mod scanner;
pub mod typed;

pub use python::PythonAdapter;
pub use typed::TypedAdapter;

use crate::variable::VariableRecord;

/// Default bound on how far a single declaration may extend (16 KiB)
pub const DEFAULT_MAX_LOOKAHEAD: usize = 16 * 1024;

/// Tuning for the heuristic scanners
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeuristicOptions {
    /// Maximum bytes scanned for one declaration before it is dropped
    pub max_lookahead: usize,
}

impl Default for HeuristicOptions {
    fn default() -> Self {
        Self {
            max_lookahead: DEFAULT_MAX_LOOKAHEAD,
        }
    }
}

/// Outcome of matching a declaration at one statement start
#[derive(Debug)]
pub(crate) struct Matched {
    pub records: Vec<VariableRecord>,
    /// Where scanning resumes
    pub next: usize,
}
