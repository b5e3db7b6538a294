//! Property-based tests for the domain crate.
//!
//! These tests use proptest to verify invariants around:
//! - Marker parsing determinism
//! - Self-consistency of comparison when analyzer output mirrors the markers
//! - Collected, compared and rendered output under shuffled raw analyzer findings

use crate::analysis::AnalysisOutput;
use crate::collect::ActualIssueCollector;
use crate::compare::IssueComparator;
use crate::engine::evaluate;
use crate::marker::NoncompliantDialect;
use crate::model::{ActualIssue, ConformanceResult, ExpectedIssue};
use crate::parser::ExpectedIssueParser;
use crate::policy::MessageMode;
use crate::test_support::config;
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use ruleconf_render::{
    RenderableData, RenderableDiff, RenderableDiffKind, RenderableResult, render_differences,
};
use ruleconf_types::{CorpusPath, DiffKind, RawFinding};
use std::collections::BTreeMap;

const CORPUS_ROOT: &str = "/corpus";

// ============================================================================
// Strategies
// ============================================================================

/// Plain source lines that never contain a marker keyword.
fn arb_code_line() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z ;=(){}0-9]{0,40}").unwrap()
}

fn arb_rule() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("S100".to_string()),
        Just("S1438".to_string()),
        Just("S3776".to_string()),
    ]
}

fn arb_message() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Za-z][A-Za-z ]{0,20}[a-z]").unwrap()
}

/// (rule, count, optional shared message) for one marked line.
fn arb_marker() -> impl Strategy<Value = (String, u32, Option<String>)> {
    (arb_rule(), 1u32..=3, prop::option::of(arb_message()))
}

/// A fixture of code lines, some carrying a same-line marker.
fn arb_fixture() -> impl Strategy<Value = String> {
    prop::collection::vec(
        (arb_code_line(), prop::option::of(arb_marker())),
        0..20,
    )
    .prop_map(|lines| {
        lines
            .into_iter()
            .map(|(code, marker)| match marker {
                None => code,
                Some((rule, count, None)) => format!("{code} // Noncompliant {rule} {count}"),
                Some((rule, count, Some(msg))) => {
                    format!("{code} // Noncompliant {rule} {count} {{{{{msg}}}}}")
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    })
}

fn parse(text: &str) -> Vec<ExpectedIssue> {
    let dialect = NoncompliantDialect;
    ExpectedIssueParser::new(&dialect, true)
        .parse(&CorpusPath::new("fixture.js"), text)
        .expect("generated fixtures are well formed")
}

/// Analyzer output that reports exactly what the markers promise.
fn mirror(expected: &[ExpectedIssue]) -> Vec<ActualIssue> {
    expected
        .iter()
        .flat_map(|issue| {
            (0..issue.count).map(move |ordinal| ActualIssue {
                path: issue.path.clone(),
                line: issue.line,
                rule: issue.rule.clone(),
                message: issue.message_for(ordinal).unwrap_or("reported").to_string(),
                secondary_lines: Vec::new(),
            })
        })
        .collect()
}

/// Raw findings as an analyzer would print them: absolute paths, some with a repository
/// prefix on the rule.
fn arb_raw_findings() -> impl Strategy<Value = Vec<RawFinding>> {
    prop::collection::vec(
        (1u32..30, arb_rule(), arb_message(), any::<bool>(), any::<bool>()),
        0..12,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .map(|(line, rule, message, absolute, prefixed)| {
                let path = if absolute {
                    format!("{CORPUS_ROOT}/fixture.js")
                } else {
                    "fixture.js".to_string()
                };
                let rule = if prefixed { format!("javascript:{rule}") } else { rule };
                RawFinding::new(&path, line, &rule, &message)
            })
            .collect()
    })
}

fn differences_text(result: &ConformanceResult) -> String {
    let diffs = result
        .diffs()
        .iter()
        .map(|d| RenderableDiff {
            kind: match d.kind() {
                DiffKind::Missing => RenderableDiffKind::Missing,
                DiffKind::Unexpected => RenderableDiffKind::Unexpected,
                DiffKind::Mismatched => RenderableDiffKind::Mismatched,
            },
            path: d.key().path.to_string(),
            line: d.key().line,
            rule: d.key().rule.clone(),
            ordinal: d.key().ordinal,
            expected_message: d.expected_message().map(str::to_string),
            actual_message: d.actual_message().map(str::to_string),
        })
        .collect();
    render_differences(&RenderableResult {
        passed: result.passed(),
        diffs,
        data: RenderableData {
            profile: "strict".to_string(),
            message_mode: "exact".to_string(),
            fixtures_scanned: 1,
            expected_total: 0,
            actual_total: 0,
        },
    })
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn text_without_markers_has_no_expectations(
        lines in prop::collection::vec(arb_code_line(), 0..30)
    ) {
        let text = lines.join("\n");
        prop_assert!(parse(&text).is_empty());
    }

    #[test]
    fn parsing_is_deterministic(text in arb_fixture()) {
        prop_assert_eq!(parse(&text), parse(&text));
    }

    #[test]
    fn mirrored_output_has_no_diffs(text in arb_fixture()) {
        let expected = parse(&text);
        let actual = mirror(&expected);
        let mode = if expected.iter().all(|e| !e.messages.is_empty()) {
            MessageMode::Exact
        } else {
            MessageMode::Ignore
        };
        let diffs = IssueComparator::new(mode).compare_file(
            &CorpusPath::new("fixture.js"),
            &expected,
            &actual,
        );
        prop_assert!(diffs.is_empty(), "unexpected diffs: {:?}", diffs);
    }

    #[test]
    fn dropping_one_reported_issue_yields_one_missing(text in arb_fixture()) {
        let expected = parse(&text);
        let mut actual = mirror(&expected);
        prop_assume!(!actual.is_empty());
        actual.pop();
        let diffs = IssueComparator::new(MessageMode::Ignore).compare_file(
            &CorpusPath::new("fixture.js"),
            &expected,
            &actual,
        );
        prop_assert_eq!(diffs.len(), 1);
        prop_assert_eq!(diffs[0].kind(), ruleconf_types::DiffKind::Missing);
    }

    #[test]
    fn differences_ignore_raw_finding_order(
        text in arb_fixture(),
        mut findings in arb_raw_findings(),
    ) {
        let path = CorpusPath::new("fixture.js");
        let mut exp_map = BTreeMap::new();
        exp_map.insert(path.clone(), parse(&text));
        let fixtures = vec![path];
        let cfg = config();
        let collector = ActualIssueCollector::new(CORPUS_ROOT, cfg.strip_repository);

        let run = |findings: &[RawFinding]| {
            let actual = collector.collect(&AnalysisOutput::new(findings.to_vec()));
            evaluate(&fixtures, &exp_map, &actual, &cfg).expect("evaluate")
        };

        let baseline = run(&findings);
        let baseline_text = differences_text(&baseline);
        prop_assert_eq!(baseline.passed(), baseline_text.is_empty());

        for seed in [1u64, 7, 42] {
            let mut rng = StdRng::seed_from_u64(seed);
            findings.shuffle(&mut rng);
            let shuffled = run(&findings);
            prop_assert_eq!(&baseline, &shuffled);
            prop_assert_eq!(&baseline_text, &differences_text(&shuffled));
        }
    }
}
