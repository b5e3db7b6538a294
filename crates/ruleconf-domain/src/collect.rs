use crate::analysis::AnalysisOutput;
use crate::marker::normalize_rule;
use crate::model::ActualIssue;
use camino::Utf8PathBuf;
use ruleconf_types::CorpusPath;
use std::collections::BTreeMap;

/// Projects raw analyzer findings into [`ActualIssue`]s keyed by corpus-relative path.
///
/// Everything comparison does not need (severity, effort, analyzer-specific metadata) is
/// dropped so output stays stable across analyzer versions. Input is never mutated.
#[derive(Clone, Debug)]
pub struct ActualIssueCollector {
    corpus_root: Utf8PathBuf,
    strip_repository: bool,
}

impl ActualIssueCollector {
    pub fn new(corpus_root: impl Into<Utf8PathBuf>, strip_repository: bool) -> Self {
        Self {
            corpus_root: corpus_root.into(),
            strip_repository,
        }
    }

    pub fn collect(&self, output: &AnalysisOutput) -> BTreeMap<CorpusPath, Vec<ActualIssue>> {
        let mut out: BTreeMap<CorpusPath, Vec<ActualIssue>> = BTreeMap::new();
        for (raw_path, findings) in output.findings_by_file() {
            let path = CorpusPath::relative_to(&self.corpus_root, raw_path);
            let issues = out.entry(path.clone()).or_default();
            for f in findings {
                issues.push(ActualIssue {
                    path: path.clone(),
                    line: f.line.unwrap_or(0),
                    rule: normalize_rule(&f.rule, self.strip_repository),
                    message: f.message.trim().to_string(),
                    secondary_lines: f.secondary_locations.iter().map(|s| s.line).collect(),
                });
            }
        }
        for issues in out.values_mut() {
            issues.sort();
        }
        out
    }
}
