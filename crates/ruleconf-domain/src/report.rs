//! Projection of a [`ConformanceResult`] into stable report DTOs.

use crate::fingerprint::fingerprint_for_diff;
use crate::model::{ActualIssue, ConformanceResult, DiffEntry, ExpectedIssue};
use ruleconf_types::{
    CorpusPath, DiffKind, DiffRecord, DumpedIssue, IssueDump, Verdict, VerdictCounts,
    VerdictStatus, ids,
};
use std::collections::BTreeMap;

pub fn diff_record(entry: &DiffEntry) -> DiffRecord {
    let key = entry.key();
    DiffRecord {
        kind: entry.kind(),
        path: key.path.clone(),
        line: key.line,
        rule: key.rule.clone(),
        ordinal: key.ordinal,
        expected_message: entry.expected_message().map(str::to_string),
        actual_message: entry.actual_message().map(str::to_string),
        fingerprint: Some(fingerprint_for_diff(
            entry.kind(),
            key.path.as_str(),
            key.line,
            &key.rule,
            key.ordinal,
        )),
    }
}

pub fn counts(result: &ConformanceResult) -> VerdictCounts {
    VerdictCounts {
        missing: result.count(DiffKind::Missing) as u32,
        unexpected: result.count(DiffKind::Unexpected) as u32,
        mismatched: result.count(DiffKind::Mismatched) as u32,
    }
}

pub fn verdict(result: &ConformanceResult) -> Verdict {
    let counts = counts(result);
    let mut reasons = Vec::new();
    if counts.missing > 0 {
        reasons.push(ids::REASON_MISSING_ISSUES.to_string());
    }
    if counts.unexpected > 0 {
        reasons.push(ids::REASON_UNEXPECTED_ISSUES.to_string());
    }
    if counts.mismatched > 0 {
        reasons.push(ids::REASON_MISMATCHED_MESSAGES.to_string());
    }
    Verdict {
        status: if result.passed() {
            VerdictStatus::Pass
        } else {
            VerdictStatus::Fail
        },
        counts,
        reasons,
    }
}

/// One entry per identity slot, so a `count` of 2 dumps twice.
pub fn expected_dump(expected: &BTreeMap<CorpusPath, Vec<ExpectedIssue>>) -> IssueDump {
    expected
        .iter()
        .map(|(path, issues)| {
            let mut dumped: Vec<DumpedIssue> = issues
                .iter()
                .flat_map(|issue| {
                    (0..issue.count).map(move |ordinal| DumpedIssue {
                        line: issue.line,
                        rule: issue.rule.clone(),
                        message: issue.message_for(ordinal).map(str::to_string),
                    })
                })
                .collect();
            dumped.sort();
            (path.clone(), dumped)
        })
        .collect()
}

pub fn actual_dump(actual: &BTreeMap<CorpusPath, Vec<ActualIssue>>) -> IssueDump {
    actual
        .iter()
        .map(|(path, issues)| {
            let mut dumped: Vec<DumpedIssue> = issues
                .iter()
                .map(|issue| DumpedIssue {
                    line: issue.line,
                    rule: issue.rule.clone(),
                    message: Some(issue.message.clone()),
                })
                .collect();
            dumped.sort();
            (path.clone(), dumped)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ConformanceStats, IssueKey};
    use crate::test_support::{actual, expected};

    #[test]
    fn verdict_lists_reasons_in_kind_order() {
        let key = IssueKey {
            path: CorpusPath::new("a.ts"),
            line: 5,
            rule: "S1438".to_string(),
            ordinal: 0,
        };
        let result = ConformanceResult::new(
            vec![
                DiffEntry::Unexpected {
                    key: key.clone(),
                    actual_message: "m".to_string(),
                },
                DiffEntry::Missing {
                    key,
                    expected_message: None,
                },
            ],
            ConformanceStats::default(),
        );
        let verdict = verdict(&result);
        assert_eq!(verdict.status, VerdictStatus::Fail);
        assert_eq!(verdict.counts.total(), 2);
        assert_eq!(
            verdict.reasons,
            vec!["missing_issues".to_string(), "unexpected_issues".to_string()]
        );

        let record = diff_record(&result.diffs()[0]);
        assert_eq!(record.kind, DiffKind::Missing);
        assert!(record.fingerprint.is_some());
    }

    #[test]
    fn empty_result_is_an_explicit_pass() {
        let verdict = verdict(&ConformanceResult::new(Vec::new(), ConformanceStats::default()));
        assert_eq!(verdict.status, VerdictStatus::Pass);
        assert!(verdict.reasons.is_empty());
    }

    #[test]
    fn expected_dump_expands_counts() {
        let mut exp = BTreeMap::new();
        exp.insert(
            CorpusPath::new("a.ts"),
            vec![expected("a.ts", 3, "S1", 2, &["first", "second"])],
        );
        let dump = expected_dump(&exp);
        let issues = &dump[&CorpusPath::new("a.ts")];
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].message.as_deref(), Some("first"));
        assert_eq!(issues[1].message.as_deref(), Some("second"));
    }

    #[test]
    fn actual_dump_keeps_messages() {
        let mut act = BTreeMap::new();
        act.insert(
            CorpusPath::new("a.ts"),
            vec![actual("a.ts", 9, "S2", "b"), actual("a.ts", 1, "S2", "a")],
        );
        let dump = actual_dump(&act);
        let lines: Vec<u32> = dump[&CorpusPath::new("a.ts")].iter().map(|i| i.line).collect();
        assert_eq!(lines, vec![1, 9]);
    }
}
