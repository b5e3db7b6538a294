use camino::Utf8Path;
use rayon::prelude::*;
use ruleconf_domain::policy::EffectiveConfig;
use ruleconf_domain::{ConformanceError, ExpectedIssue, ExpectedIssueParser};
use ruleconf_types::CorpusPath;
use std::collections::BTreeMap;

/// Read every fixture and decode its markers with the configured dialect.
///
/// Files are parsed in parallel. When several files are malformed, the error of the first one
/// in path order is returned, so the outcome does not depend on scheduling. Every fixture
/// gets an entry, possibly empty.
pub fn load_expected(
    corpus_root: &Utf8Path,
    fixtures: &[CorpusPath],
    cfg: &EffectiveConfig,
) -> Result<BTreeMap<CorpusPath, Vec<ExpectedIssue>>, ConformanceError> {
    let results: Vec<Result<(CorpusPath, Vec<ExpectedIssue>), ConformanceError>> = fixtures
        .par_iter()
        .map(|path| {
            let dialect = cfg.dialect.dialect();
            let parser = ExpectedIssueParser::new(dialect.as_ref(), cfg.strip_repository);
            let abs = corpus_root.join(path.as_str());
            let bytes = std::fs::read(&abs).map_err(|source| ConformanceError::Io {
                path: abs.to_string(),
                source,
            })?;
            // Fixtures may hold arbitrary bytes; markers are ASCII.
            let text = String::from_utf8_lossy(&bytes);
            let issues = parser.parse(path, &text)?;
            Ok((path.clone(), issues))
        })
        .collect();

    let mut out = BTreeMap::new();
    for result in results {
        let (path, issues) = result?;
        out.insert(path, issues);
    }

    tracing::debug!(
        fixtures = out.len(),
        markers = out.values().map(Vec::len).sum::<usize>(),
        "loaded expected issues"
    );
    Ok(out)
}
