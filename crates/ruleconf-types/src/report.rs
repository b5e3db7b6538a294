use crate::CorpusPath;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Stable schema identifier for ruleconf reports.
pub const SCHEMA_REPORT_V1: &str = "ruleconf.report.v1";

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum DiffKind {
    Missing,
    Unexpected,
    Mismatched,
}

impl DiffKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DiffKind::Missing => crate::ids::DIFF_MISSING,
            DiffKind::Unexpected => crate::ids::DIFF_UNEXPECTED,
            DiffKind::Mismatched => crate::ids::DIFF_MISMATCHED,
        }
    }
}

/// Serialized form of one discrepancy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DiffRecord {
    pub kind: DiffKind,
    pub path: CorpusPath,
    pub line: u32,
    pub rule: String,
    /// Disambiguates repeated issues of the same rule on the same line (0-based).
    pub ordinal: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_message: Option<String>,
    /// Stable identifier intended for dedup and trending:
    /// `sha256(kind|path|line|rule|ordinal)`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum VerdictStatus {
    Pass,
    Fail,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct VerdictCounts {
    pub missing: u32,
    pub unexpected: u32,
    pub mismatched: u32,
}

impl VerdictCounts {
    pub fn total(&self) -> u32 {
        self.missing + self.unexpected + self.mismatched
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Verdict {
    pub status: VerdictStatus,
    pub counts: VerdictCounts,
    #[serde(default)]
    pub reasons: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RunMeta {
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[schemars(with = "Option<String>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub ended_at: Option<OffsetDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

/// Ruleconf-specific summary payload for the report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
pub struct ConformanceData {
    pub profile: String,
    pub message_mode: String,

    pub fixtures_scanned: u32,
    pub expected_total: u32,
    pub actual_total: u32,
    pub diffs_total: u32,
}

/// A generic report envelope.
///
/// Generic over the payload so the outer shape stays stable while `data` evolves.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReportEnvelope<TData = ConformanceData> {
    /// Versioned schema identifier for the envelope shape.
    pub schema: String,
    pub tool: ToolMeta,
    pub run: RunMeta,
    pub verdict: Verdict,
    pub diffs: Vec<DiffRecord>,
    pub data: TData,
}

pub type ConformanceReport = ReportEnvelope<ConformanceData>;
