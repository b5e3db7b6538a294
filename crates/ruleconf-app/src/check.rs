//! The `check` use case: resolve config, run conformance, and produce every artifact.

use anyhow::Context;
use camino::Utf8Path;
use ruleconf_domain::AnalyzerRunner;
use ruleconf_domain::report::{actual_dump, expected_dump};
use ruleconf_settings::{Overrides, ResolvedConfig, RuleconfConfigV1};
use ruleconf_types::{ConformanceReport, IssueDump, VerdictStatus};
use std::sync::Arc;
use time::OffsetDateTime;

use crate::render::render_differences;
use crate::report::build_report;
use crate::run::run_conformance;

/// Input for the check use case.
#[derive(Clone)]
pub struct CheckInput<'a> {
    /// Corpus root directory.
    pub corpus_root: &'a Utf8Path,
    /// Config file contents (empty string if not found).
    pub config_text: &'a str,
    /// CLI overrides.
    pub overrides: Overrides,
    pub analyzer: Arc<dyn AnalyzerRunner>,
}

/// Output from the check use case.
#[derive(Clone, Debug)]
pub struct CheckOutput {
    pub report: ConformanceReport,
    /// Rendered differences file; empty iff the run passed.
    pub differences: String,
    pub expected_dump: IssueDump,
    pub actual_dump: IssueDump,
    pub resolved_config: ResolvedConfig,
}

/// Run the check use case. Fatal run errors come back as a [`ruleconf_domain::ConformanceError`]
/// inside the `anyhow::Error`, so callers can `downcast_ref` for the error code.
pub fn run_check(input: CheckInput<'_>) -> anyhow::Result<CheckOutput> {
    let started_at = OffsetDateTime::now_utc();

    let resolved = resolve(input.config_text, input.overrides.clone())?;

    let run = run_conformance(input.corpus_root, input.analyzer.clone(), &resolved.effective)?;

    let ended_at = OffsetDateTime::now_utc();
    let report = build_report(&run, &resolved.effective, started_at, ended_at);
    let differences = render_differences(&report);

    Ok(CheckOutput {
        differences,
        expected_dump: expected_dump(&run.expected),
        actual_dump: actual_dump(&run.actual),
        report,
        resolved_config: resolved,
    })
}

/// Parse and resolve config text (empty is allowed, defaults apply).
pub(crate) fn resolve(config_text: &str, overrides: Overrides) -> anyhow::Result<ResolvedConfig> {
    let cfg = if config_text.trim().is_empty() {
        RuleconfConfigV1::default()
    } else {
        ruleconf_settings::parse_config_toml(config_text).context("parse config")?
    };
    ruleconf_settings::resolve_config(cfg, overrides).context("resolve config")
}

/// Map verdict to exit code: 0 = pass, 2 = discrepancies.
pub fn verdict_exit_code(status: VerdictStatus) -> i32 {
    match status {
        VerdictStatus::Pass => 0,
        VerdictStatus::Fail => 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::run::tests::{FakeAnalyzer, single_fixture_corpus, utf8_root};
    use ruleconf_domain::ConformanceError;
    use ruleconf_types::RawFinding;
    use tempfile::TempDir;

    #[test]
    fn passing_run_renders_empty_differences() {
        let tmp = TempDir::new().expect("temp dir");
        let root = single_fixture_corpus(&tmp);
        let output = run_check(CheckInput {
            corpus_root: &root,
            config_text: "",
            overrides: Overrides::default(),
            analyzer: FakeAnalyzer::new(vec![RawFinding::new("a.ts", 5, "S1438", "m")]),
        })
        .expect("run_check");

        assert_eq!(output.differences, "");
        assert_eq!(output.report.verdict.status, VerdictStatus::Pass);
        assert_eq!(output.resolved_config.effective.profile, "strict");
        assert_eq!(output.expected_dump.len(), 1);
        assert_eq!(output.actual_dump.len(), 1);
    }

    #[test]
    fn silent_analyzer_renders_one_missing_line() {
        let tmp = TempDir::new().expect("temp dir");
        let root = single_fixture_corpus(&tmp);
        let output = run_check(CheckInput {
            corpus_root: &root,
            config_text: "profile = \"locations\"",
            overrides: Overrides::default(),
            analyzer: FakeAnalyzer::new(Vec::new()),
        })
        .expect("run_check");

        assert_eq!(output.differences, "a.ts:5: missing S1438\n");
        assert_eq!(verdict_exit_code(output.report.verdict.status), 2);
    }

    #[test]
    fn fatal_errors_downcast_to_conformance_error() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);
        let err = run_check(CheckInput {
            corpus_root: &root,
            config_text: "",
            overrides: Overrides::default(),
            analyzer: FakeAnalyzer::new(Vec::new()),
        })
        .expect_err("empty corpus");
        let conformance = err
            .downcast_ref::<ConformanceError>()
            .expect("conformance error");
        assert_eq!(conformance.code(), "empty_corpus");
    }

    #[test]
    fn bad_config_is_an_error() {
        let tmp = TempDir::new().expect("temp dir");
        let root = single_fixture_corpus(&tmp);
        let err = run_check(CheckInput {
            corpus_root: &root,
            config_text: "message_mode = \"fuzzy\"",
            overrides: Overrides::default(),
            analyzer: FakeAnalyzer::new(Vec::new()),
        })
        .expect_err("bad config");
        assert!(format!("{err:#}").contains("unknown message_mode"));
    }

    #[test]
    fn verdict_exit_codes() {
        assert_eq!(verdict_exit_code(VerdictStatus::Pass), 0);
        assert_eq!(verdict_exit_code(VerdictStatus::Fail), 2);
    }
}
