use crate::compare::IssueComparator;
use crate::error::ConformanceError;
use crate::filter::IssueFilter;
use crate::model::{ActualIssue, ConformanceResult, ConformanceStats, ExpectedIssue};
use crate::policy::EffectiveConfig;
use ruleconf_types::CorpusPath;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Compare every file of the corpus and aggregate into one result.
///
/// Files reported by the analyzer but absent from `fixtures` are compared too: any issue
/// there is unexpected. There is no short-circuit on the first differing file.
pub fn evaluate(
    fixtures: &[CorpusPath],
    expected: &BTreeMap<CorpusPath, Vec<ExpectedIssue>>,
    actual: &BTreeMap<CorpusPath, Vec<ActualIssue>>,
    cfg: &EffectiveConfig,
) -> Result<ConformanceResult, ConformanceError> {
    let filter = IssueFilter::from_config(cfg)?;
    let comparator = IssueComparator::new(cfg.message_mode);

    let paths: BTreeSet<&CorpusPath> = expected.keys().chain(actual.keys()).collect();

    let mut diffs = Vec::new();
    let mut stats = ConformanceStats {
        fixtures: fixtures.len() as u32,
        ..ConformanceStats::default()
    };

    for path in paths {
        let exp: Vec<ExpectedIssue> = expected
            .get(path)
            .into_iter()
            .flatten()
            .filter(|i| filter.keeps(path, &i.rule))
            .cloned()
            .collect();
        let act: Vec<ActualIssue> = actual
            .get(path)
            .into_iter()
            .flatten()
            .filter(|i| filter.keeps(path, &i.rule))
            .cloned()
            .collect();

        stats.expected_slots += exp.iter().map(|i| i.count).sum::<u32>();
        stats.actual_issues += act.len() as u32;

        let file_diffs = comparator.compare_file(path, &exp, &act);
        if !file_diffs.is_empty() {
            debug!(path = %path, diffs = file_diffs.len(), "fixture differs");
        }
        diffs.extend(file_diffs);
    }

    Ok(ConformanceResult::new(diffs, stats))
}
