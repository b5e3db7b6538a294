//! Render use cases over in-memory reports, plus artifact writing.

use anyhow::Context;
use camino::Utf8Path;
use ruleconf_render::{RenderableData, RenderableDiff, RenderableDiffKind, RenderableResult};
use ruleconf_types::{ConformanceReport, DiffKind, IssueDump, SCHEMA_REPORT_V1, VerdictStatus};

pub fn to_renderable(report: &ConformanceReport) -> RenderableResult {
    RenderableResult {
        passed: report.verdict.status == VerdictStatus::Pass,
        diffs: report
            .diffs
            .iter()
            .map(|d| RenderableDiff {
                kind: match d.kind {
                    DiffKind::Missing => RenderableDiffKind::Missing,
                    DiffKind::Unexpected => RenderableDiffKind::Unexpected,
                    DiffKind::Mismatched => RenderableDiffKind::Mismatched,
                },
                path: d.path.as_str().to_string(),
                line: d.line,
                rule: d.rule.clone(),
                ordinal: d.ordinal,
                expected_message: d.expected_message.clone(),
                actual_message: d.actual_message.clone(),
            })
            .collect(),
        data: RenderableData {
            profile: report.data.profile.clone(),
            message_mode: report.data.message_mode.clone(),
            fixtures_scanned: report.data.fixtures_scanned,
            expected_total: report.data.expected_total,
            actual_total: report.data.actual_total,
        },
    }
}

pub fn render_differences(report: &ConformanceReport) -> String {
    ruleconf_render::render_differences(&to_renderable(report))
}

pub fn render_markdown(report: &ConformanceReport) -> String {
    ruleconf_render::render_markdown(&to_renderable(report))
}

pub fn render_annotations(report: &ConformanceReport, max: usize) -> Vec<String> {
    ruleconf_render::render_github_annotations(&to_renderable(report))
        .into_iter()
        .take(max)
        .collect()
}

pub fn serialize_report(report: &ConformanceReport) -> anyhow::Result<Vec<u8>> {
    serde_json::to_vec_pretty(report).context("serialize report")
}

pub fn serialize_dump(dump: &IssueDump) -> anyhow::Result<Vec<u8>> {
    serde_json::to_vec_pretty(dump).context("serialize issue dump")
}

pub fn parse_report_json(text: &str) -> anyhow::Result<ConformanceReport> {
    let report: ConformanceReport = serde_json::from_str(text).context("parse report JSON")?;
    if report.schema != SCHEMA_REPORT_V1 {
        anyhow::bail!(
            "unsupported report schema: {} (expected {SCHEMA_REPORT_V1})",
            report.schema
        );
    }
    Ok(report)
}

/// Write `bytes` to `path`, creating parent directories.
pub fn write_text(path: &Utf8Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_str().is_empty()
    {
        std::fs::create_dir_all(parent).with_context(|| format!("create dir {parent}"))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write {path}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ruleconf_types::{
        ConformanceData, CorpusPath, DiffRecord, RunMeta, ToolMeta, Verdict, VerdictCounts,
    };
    use time::macros::datetime;

    fn sample_report() -> ConformanceReport {
        ConformanceReport {
            schema: SCHEMA_REPORT_V1.to_string(),
            tool: ToolMeta {
                name: "ruleconf".to_string(),
                version: "0.1.0".to_string(),
            },
            run: RunMeta {
                started_at: datetime!(2026-01-01 0:00 UTC),
                ended_at: None,
                duration_ms: None,
            },
            verdict: Verdict {
                status: VerdictStatus::Fail,
                counts: VerdictCounts {
                    missing: 1,
                    unexpected: 1,
                    mismatched: 0,
                },
                reasons: vec!["missing_issues".to_string(), "unexpected_issues".to_string()],
            },
            diffs: vec![
                DiffRecord {
                    kind: DiffKind::Missing,
                    path: CorpusPath::new("a.ts"),
                    line: 5,
                    rule: "S1438".to_string(),
                    ordinal: 0,
                    expected_message: None,
                    actual_message: None,
                    fingerprint: None,
                },
                DiffRecord {
                    kind: DiffKind::Unexpected,
                    path: CorpusPath::new("b.ts"),
                    line: 2,
                    rule: "S100".to_string(),
                    ordinal: 0,
                    expected_message: None,
                    actual_message: Some("rename".to_string()),
                    fingerprint: None,
                },
            ],
            data: ConformanceData::default(),
        }
    }

    #[test]
    fn differences_follow_report_order() {
        assert_eq!(
            render_differences(&sample_report()),
            "a.ts:5: missing S1438\nb.ts:2: unexpected S100 actual \"rename\"\n"
        );
    }

    #[test]
    fn render_annotations_respects_max() {
        assert_eq!(render_annotations(&sample_report(), 1).len(), 1);
    }

    #[test]
    fn report_json_round_trips_and_checks_schema() {
        let bytes = serialize_report(&sample_report()).expect("serialize");
        let text = String::from_utf8(bytes).expect("utf8");
        assert_eq!(parse_report_json(&text).expect("parse"), sample_report());

        let wrong = text.replace(SCHEMA_REPORT_V1, "other.v9");
        assert!(parse_report_json(&wrong).is_err());
    }

    #[test]
    fn write_text_creates_parent_dirs() {
        let tmp = tempfile::tempdir().expect("temp dir");
        let root = Utf8Path::from_path(tmp.path()).expect("utf8 path");
        let path = root.join("nested/out/differences.txt");
        write_text(&path, b"").expect("write");
        assert_eq!(std::fs::read_to_string(&path).expect("read"), "");
    }
}
