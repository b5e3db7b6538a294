//! Pure rule-conformance evaluation (no IO).
//!
//! Input: fixture texts and raw analyzer findings gathered elsewhere.
//! Output: a sorted, immutable [`ConformanceResult`] of discrepancies.

#![forbid(unsafe_code)]

pub mod analysis;
pub mod collect;
pub mod compare;
pub mod error;
pub mod filter;
pub mod marker;
pub mod model;
pub mod parser;
pub mod policy;
pub mod report;

mod engine;
mod fingerprint;

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;

pub use analysis::{AnalysisOutput, AnalyzerRunner};
pub use collect::ActualIssueCollector;
pub use compare::IssueComparator;
pub use engine::evaluate;
pub use error::{AnalysisUnavailable, ConformanceError};
pub use filter::IssueFilter;
pub use fingerprint::fingerprint_for_diff;
pub use marker::{IssueDialect, Marker, MarkerDialect, MarkerSyntaxError, NoncompliantDialect};
pub use model::{ActualIssue, ConformanceResult, ConformanceStats, DiffEntry, ExpectedIssue, IssueKey};
pub use parser::ExpectedIssueParser;
