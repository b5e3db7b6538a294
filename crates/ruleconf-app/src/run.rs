//! `run_conformance`: the single entry point for a conformance run.

use camino::Utf8Path;
use ruleconf_domain::policy::{AnalysisConfig, EffectiveConfig};
use ruleconf_domain::{
    ActualIssue, ActualIssueCollector, AnalysisOutput, AnalysisUnavailable, AnalyzerRunner,
    ConformanceError, ConformanceResult, ExpectedIssue,
};
use ruleconf_types::CorpusPath;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Everything one run produced. Only built when no fatal error occurred.
#[derive(Clone, Debug)]
pub struct ConformanceRun {
    pub fixtures: Vec<CorpusPath>,
    pub expected: BTreeMap<CorpusPath, Vec<ExpectedIssue>>,
    pub actual: BTreeMap<CorpusPath, Vec<ActualIssue>>,
    pub result: ConformanceResult,
}

/// Parse every fixture under `corpus_root`, analyze the corpus once, and compare.
///
/// The root is canonicalized first, so the analyzer always receives an absolute path and
/// absolute finding paths relativize against it.
///
/// Fatal errors abort before any result exists:
/// - no fixture files: [`ConformanceError::EmptyCorpus`]
/// - a marker that cannot be decoded: [`ConformanceError::MalformedMarker`]
/// - the analyzer is unreachable, crashes, or exceeds `timeout_ms`:
///   [`ConformanceError::AnalysisUnavailable`]. The analyzer is never retried.
pub fn run_conformance(
    corpus_root: &Utf8Path,
    analyzer: Arc<dyn AnalyzerRunner>,
    cfg: &EffectiveConfig,
) -> Result<ConformanceRun, ConformanceError> {
    let canonical = corpus_root
        .canonicalize_utf8()
        .map_err(|source| ConformanceError::Io {
            path: corpus_root.to_string(),
            source,
        })?;
    let corpus_root = canonical.as_path();
    debug!(root = %corpus_root, "resolved corpus root");

    let fixtures = ruleconf_corpus::discover_fixtures(corpus_root, &cfg.corpus)?;
    if fixtures.is_empty() {
        return Err(ConformanceError::EmptyCorpus {
            root: corpus_root.to_string(),
        });
    }

    let expected = ruleconf_corpus::load_expected(corpus_root, &fixtures, cfg)?;

    let output = analyze_with_timeout(analyzer, corpus_root, &cfg.analysis)?;
    debug!(findings = output.len(), "analyzer finished");

    let actual = ActualIssueCollector::new(corpus_root, cfg.strip_repository).collect(&output);
    let result = ruleconf_domain::evaluate(&fixtures, &expected, &actual, cfg)?;

    info!(
        fixtures = fixtures.len(),
        diffs = result.diffs().len(),
        passed = result.passed(),
        "conformance run complete"
    );

    Ok(ConformanceRun {
        fixtures,
        expected,
        actual,
        result,
    })
}

/// Run the analyzer on its own thread and wait at most `timeout_ms` for it.
///
/// On timeout the worker thread is abandoned; its eventual result is dropped.
fn analyze_with_timeout(
    analyzer: Arc<dyn AnalyzerRunner>,
    corpus_root: &Utf8Path,
    config: &AnalysisConfig,
) -> Result<AnalysisOutput, AnalysisUnavailable> {
    let (tx, rx) = mpsc::channel();
    let root = corpus_root.to_owned();
    let worker_config = config.clone();

    std::thread::Builder::new()
        .name("ruleconf-analyzer".to_string())
        .spawn(move || {
            let _ = tx.send(analyzer.analyze(&root, &worker_config));
        })
        .map_err(|e| AnalysisUnavailable::Unreachable(format!("spawn analyzer thread: {e}")))?;

    match rx.recv_timeout(Duration::from_millis(config.timeout_ms)) {
        Ok(result) => {
            if let Err(err) = &result {
                warn!(error = %err, "analyzer unavailable");
            }
            result
        }
        Err(RecvTimeoutError::Timeout) => {
            warn!(timeout_ms = config.timeout_ms, "analyzer timed out");
            Err(AnalysisUnavailable::Timeout {
                timeout_ms: config.timeout_ms,
            })
        }
        Err(RecvTimeoutError::Disconnected) => Err(AnalysisUnavailable::Crashed(
            "analyzer panicked before reporting".to_string(),
        )),
    }
}
