//! Build the `ruleconf.report.v1` envelope from a finished run.

use crate::run::ConformanceRun;
use ruleconf_domain::policy::EffectiveConfig;
use ruleconf_domain::report as domain_report;
use ruleconf_types::{
    ConformanceData, ConformanceReport, RunMeta, SCHEMA_REPORT_V1, ToolMeta, ids,
};
use time::OffsetDateTime;

pub fn build_report(
    run: &ConformanceRun,
    cfg: &EffectiveConfig,
    started_at: OffsetDateTime,
    ended_at: OffsetDateTime,
) -> ConformanceReport {
    let duration_ms = (ended_at - started_at).whole_milliseconds().max(0) as u64;
    let stats = run.result.stats();
    let diffs: Vec<_> = run
        .result
        .diffs()
        .iter()
        .map(domain_report::diff_record)
        .collect();

    ConformanceReport {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: ids::TOOL_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        run: RunMeta {
            started_at,
            ended_at: Some(ended_at),
            duration_ms: Some(duration_ms),
        },
        verdict: domain_report::verdict(&run.result),
        data: ConformanceData {
            profile: cfg.profile.clone(),
            message_mode: cfg.message_mode.as_str().to_string(),
            fixtures_scanned: stats.fixtures,
            expected_total: stats.expected_slots,
            actual_total: stats.actual_issues,
            diffs_total: diffs.len() as u32,
        },
        diffs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::run::tests::{FakeAnalyzer, effective, single_fixture_corpus};
    use crate::run_conformance;
    use ruleconf_types::{DiffKind, VerdictStatus};
    use tempfile::TempDir;

    #[test]
    fn report_carries_verdict_diffs_and_counts() {
        let tmp = TempDir::new().expect("temp dir");
        let root = single_fixture_corpus(&tmp);
        let cfg = effective(5_000);
        let run = run_conformance(&root, FakeAnalyzer::new(Vec::new()), &cfg).expect("run");

        let now = OffsetDateTime::now_utc();
        let report = build_report(&run, &cfg, now, now);
        assert_eq!(report.schema, SCHEMA_REPORT_V1);
        assert_eq!(report.verdict.status, VerdictStatus::Fail);
        assert_eq!(report.verdict.counts.missing, 1);
        assert_eq!(report.diffs.len(), 1);
        assert_eq!(report.diffs[0].kind, DiffKind::Missing);
        assert!(report.diffs[0].fingerprint.is_some());
        assert_eq!(report.data.fixtures_scanned, 1);
        assert_eq!(report.data.expected_total, 1);
        assert_eq!(report.data.actual_total, 0);
        assert_eq!(report.data.message_mode, "exact");
        assert_eq!(report.run.duration_ms, Some(0));
    }
}
