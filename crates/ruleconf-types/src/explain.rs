//! Explain registry for diff kinds and fatal error codes.
//!
//! Maps codes to human-readable explanations with remediation guidance.

use crate::ids;

/// Explanation entry for a diff kind or error code.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// Short description of the code.
    pub title: &'static str,
    /// What the code means for a conformance run.
    pub description: &'static str,
    /// How to resolve it.
    pub remediation: &'static str,
    /// Fixture snippet illustrating the situation.
    pub example: &'static str,
}

/// Look up an explanation by code.
///
/// Returns `None` if the identifier is not recognized.
pub fn lookup_explanation(identifier: &str) -> Option<Explanation> {
    match identifier {
        ids::DIFF_MISSING => Some(explain_missing()),
        ids::DIFF_UNEXPECTED => Some(explain_unexpected()),
        ids::DIFF_MISMATCHED => Some(explain_mismatched()),

        ids::ERROR_MALFORMED_MARKER => Some(explain_malformed_marker()),
        ids::ERROR_ANALYSIS_UNAVAILABLE => Some(explain_analysis_unavailable()),
        ids::ERROR_EMPTY_CORPUS => Some(explain_empty_corpus()),

        _ => None,
    }
}

/// Diff kinds: discrepancies that fail the verdict but never abort a run.
pub fn all_diff_kinds() -> &'static [&'static str] {
    &[ids::DIFF_MISSING, ids::DIFF_UNEXPECTED, ids::DIFF_MISMATCHED]
}

/// Fatal error codes: abort the run before a result is produced.
pub fn all_error_codes() -> &'static [&'static str] {
    &[
        ids::ERROR_MALFORMED_MARKER,
        ids::ERROR_ANALYSIS_UNAVAILABLE,
        ids::ERROR_EMPTY_CORPUS,
    ]
}

fn explain_missing() -> Explanation {
    Explanation {
        title: "Missing Issue",
        description: "\
A fixture marker expects an issue that the analyzer did not report.

Each marker count expands to one slot, so a rule that fires fewer times than the
marker's count produces one missing entry per absent occurrence.",
        remediation: "\
Either the rule regressed (fix the analyzer) or the fixture is stale (remove or
lower the marker count).",
        example: "let x = 1 // Noncompliant S1438",
    }
}

fn explain_unexpected() -> Explanation {
    Explanation {
        title: "Unexpected Issue",
        description: "\
The analyzer reported an issue on a line where no marker expects it, or more
times than the marker's count.",
        remediation: "\
If the finding is legitimate, add a marker (or raise its count). Otherwise the
rule raises a false positive and the analyzer needs fixing.",
        example: "let x = 1; // Noncompliant S1438 2",
    }
}

fn explain_mismatched() -> Explanation {
    Explanation {
        title: "Mismatched Message",
        description: "\
An issue was reported at the expected line for the expected rule, but its
message does not match the marker under the configured message mode
(exact, contains, or pattern).",
        remediation: "\
Update the `{{...}}` message in the marker, switch to a looser message mode, or
fix the rule's message.",
        example: "let x = 1 // Noncompliant S1438 {{Add a semicolon at the end of this statement.}}",
    }
}

fn explain_malformed_marker() -> Explanation {
    Explanation {
        title: "Malformed Marker",
        description: "\
A marker comment was found but could not be decoded: invalid rule id, non-numeric
or zero count, unterminated message, line adjustment before line 1, or two
markers resolving to the same file, line, and rule.

A corrupted fixture invalidates its comparisons, so the whole run aborts.",
        remediation: "Fix the marker at the reported file and line.",
        example: "let x = 1 // Noncompliant S14$38 2x",
    }
}

fn explain_analysis_unavailable() -> Explanation {
    Explanation {
        title: "Analysis Unavailable",
        description: "\
The analyzer could not be reached, crashed, returned unreadable output, or did not
finish within `timeout_ms`. The failure is reported once and never retried, so
analyzer nondeterminism cannot masquerade as a passing run.",
        remediation: "\
Inspect the analyzer's own logs; raise `timeout_ms` only if the corpus genuinely
needs more time.",
        example: "timeout_ms = 600000",
    }
}

fn explain_empty_corpus() -> Explanation {
    Explanation {
        title: "Empty Corpus",
        description: "\
No fixture files were found under the corpus root after applying the corpus
include/exclude globs. This is treated as a configuration mistake, not a pass.",
        remediation: "Point `--corpus` at the fixture directory or widen `[corpus] include`.",
        example: "[corpus]\ninclude = [\"**/*.ts\", \"**/*.tsx\"]",
    }
}
