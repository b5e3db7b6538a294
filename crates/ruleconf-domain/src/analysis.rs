//! Seam to the external analyzer.

use crate::error::AnalysisUnavailable;
use crate::policy::AnalysisConfig;
use camino::Utf8Path;
use ruleconf_types::RawFinding;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Runs a static analyzer over a whole corpus in one blocking call.
///
/// Implementations may call a library in-process, spawn a subprocess, or talk to a
/// long-lived service. Timeouts are enforced by the caller as well, so an
/// implementation that hangs cannot hang the run.
pub trait AnalyzerRunner: Send + Sync {
    fn analyze(
        &self,
        corpus_root: &Utf8Path,
        config: &AnalysisConfig,
    ) -> Result<AnalysisOutput, AnalysisUnavailable>;
}

/// Raw findings of one analyzer run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnalysisOutput {
    findings: Vec<RawFinding>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireOutput {
    Bare(Vec<RawFinding>),
    Wrapped { findings: Vec<RawFinding> },
}

impl AnalysisOutput {
    pub fn new(findings: Vec<RawFinding>) -> Self {
        Self { findings }
    }

    /// Accepts either a JSON array of findings or `{ "findings": [...] }`.
    pub fn from_json(text: &str) -> Result<Self, AnalysisUnavailable> {
        let wire: WireOutput = serde_json::from_str(text)
            .map_err(|e| AnalysisUnavailable::InvalidOutput(e.to_string()))?;
        let findings = match wire {
            WireOutput::Bare(findings) | WireOutput::Wrapped { findings } => findings,
        };
        Ok(Self { findings })
    }

    pub fn len(&self) -> usize {
        self.findings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn findings(&self) -> &[RawFinding] {
        &self.findings
    }

    /// Raw path as reported -> findings, in reporting order within each file.
    pub fn findings_by_file(&self) -> BTreeMap<&str, Vec<&RawFinding>> {
        let mut out: BTreeMap<&str, Vec<&RawFinding>> = BTreeMap::new();
        for f in &self.findings {
            out.entry(f.path.as_str()).or_default().push(f);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_and_wrapped_outputs() {
        let bare = r#"[{"path": "a.ts", "line": 5, "rule": "S1438", "message": "m"}]"#;
        let wrapped = r#"{"findings": [{"path": "a.ts", "line": 5, "rule": "S1438", "message": "m"}]}"#;
        let a = AnalysisOutput::from_json(bare).expect("bare");
        let b = AnalysisOutput::from_json(wrapped).expect("wrapped");
        assert_eq!(a, b);
        assert_eq!(a.len(), 1);
    }

    #[test]
    fn garbage_is_invalid_output() {
        let err = AnalysisOutput::from_json("Segmentation fault").unwrap_err();
        assert!(matches!(err, AnalysisUnavailable::InvalidOutput(_)));
    }

    #[test]
    fn groups_by_reported_path() {
        let out = AnalysisOutput::new(vec![
            RawFinding::new("b.ts", 1, "S1", "x"),
            RawFinding::new("a.ts", 2, "S1", "y"),
            RawFinding::new("b.ts", 3, "S2", "z"),
        ]);
        let by_file = out.findings_by_file();
        assert_eq!(by_file.keys().copied().collect::<Vec<_>>(), vec!["a.ts", "b.ts"]);
        assert_eq!(by_file["b.ts"].len(), 2);
    }
}
