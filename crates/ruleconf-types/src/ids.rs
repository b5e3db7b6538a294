//! Stable identifiers for diff kinds and fatal error codes.
//!
//! All codes are snake_case; they appear in rendered text, JSON reports, and `ruleconf explain`.

// Diff kinds
pub const DIFF_MISSING: &str = "missing";
pub const DIFF_UNEXPECTED: &str = "unexpected";
pub const DIFF_MISMATCHED: &str = "mismatched";

// Fatal errors
pub const ERROR_MALFORMED_MARKER: &str = "malformed_marker";
pub const ERROR_ANALYSIS_UNAVAILABLE: &str = "analysis_unavailable";
pub const ERROR_EMPTY_CORPUS: &str = "empty_corpus";

// Verdict reasons
pub const REASON_MISSING_ISSUES: &str = "missing_issues";
pub const REASON_UNEXPECTED_ISSUES: &str = "unexpected_issues";
pub const REASON_MISMATCHED_MESSAGES: &str = "mismatched_messages";

// Tool
pub const TOOL_NAME: &str = "ruleconf";
