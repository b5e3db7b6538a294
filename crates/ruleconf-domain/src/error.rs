use ruleconf_types::{CorpusPath, ids};
use thiserror::Error;

/// Fatal conditions that abort a conformance run before a result exists.
///
/// Discrepancies between expected and actual issues are never errors; they are
/// [`DiffEntry`](crate::DiffEntry) values.
#[derive(Debug, Error)]
pub enum ConformanceError {
    #[error("malformed marker at {path}:{line}: {reason}")]
    MalformedMarker {
        path: CorpusPath,
        line: u32,
        reason: String,
    },

    #[error("analysis unavailable: {0}")]
    AnalysisUnavailable(#[from] AnalysisUnavailable),

    #[error("empty corpus: no fixture files found under {root}")]
    EmptyCorpus { root: String },

    #[error("read {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ConformanceError {
    /// Stable code for the error kind (see `ruleconf explain`).
    pub fn code(&self) -> &'static str {
        match self {
            ConformanceError::MalformedMarker { .. } => ids::ERROR_MALFORMED_MARKER,
            ConformanceError::AnalysisUnavailable(_) => ids::ERROR_ANALYSIS_UNAVAILABLE,
            ConformanceError::EmptyCorpus { .. } => ids::ERROR_EMPTY_CORPUS,
            ConformanceError::Io { .. } => "io_error",
            ConformanceError::Config(_) => "config_error",
        }
    }
}

/// Why the analyzer collaborator produced no analysis.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AnalysisUnavailable {
    #[error("analyzer unreachable: {0}")]
    Unreachable(String),

    #[error("analyzer crashed: {0}")]
    Crashed(String),

    #[error("analyzer timed out after {timeout_ms} ms")]
    Timeout { timeout_ms: u64 },

    #[error("analyzer returned invalid output: {0}")]
    InvalidOutput(String),
}
