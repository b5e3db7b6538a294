//! Stable DTOs and IDs used across the ruleconf workspace.
//!
//! This crate is intentionally boring:
//! - data types for the emitted report and the analyzer wire format
//! - stable string IDs and codes
//! - canonical corpus-relative path handling
//! - explain registry for remediation guidance

#![forbid(unsafe_code)]

pub mod explain;
pub mod finding;
pub mod ids;
pub mod path;
pub mod report;

pub use explain::{Explanation, lookup_explanation};
pub use finding::{DumpedIssue, IssueDump, RawFinding, SecondaryLocation};
pub use path::CorpusPath;
pub use report::{
    ConformanceData, ConformanceReport, DiffKind, DiffRecord, ReportEnvelope, RunMeta,
    SCHEMA_REPORT_V1, ToolMeta, Verdict, VerdictCounts, VerdictStatus,
};
