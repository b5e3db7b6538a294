use crate::{RenderableDiffKind, RenderableResult};

/// Render diffs as GitHub Actions workflow command annotations.
///
/// Format:
/// `::error file={path},line={line}::{message}`
///
/// Missing and unexpected issues are errors; message mismatches are warnings. File-level
/// issues (line 0) omit `line`.
pub fn render_github_annotations(result: &RenderableResult) -> Vec<String> {
    let mut out = Vec::new();

    for d in &result.diffs {
        let level = match d.kind {
            RenderableDiffKind::Missing | RenderableDiffKind::Unexpected => "error",
            RenderableDiffKind::Mismatched => "warning",
        };

        let mut meta = format!("file={}", d.path);
        if d.line > 0 {
            meta.push_str(&format!(",line={}", d.line));
        }

        let detail = match d.kind {
            RenderableDiffKind::Missing => "expected issue was not reported".to_string(),
            RenderableDiffKind::Unexpected => format!(
                "unexpected issue: {}",
                d.actual_message.as_deref().unwrap_or("")
            ),
            RenderableDiffKind::Mismatched => format!(
                "expected message {:?} but was {:?}",
                d.expected_message.as_deref().unwrap_or(""),
                d.actual_message.as_deref().unwrap_or("")
            ),
        };
        let message = format!("[ruleconf:{}] {}", d.rule, detail)
            .replace('%', "%25")
            .replace('\r', "%0D")
            .replace('\n', "%0A");

        out.push(format!("::{} {}::{}", level, meta, message));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RenderableData, RenderableDiff};

    fn result(diffs: Vec<RenderableDiff>) -> RenderableResult {
        RenderableResult {
            passed: diffs.is_empty(),
            diffs,
            data: RenderableData {
                profile: "strict".to_string(),
                message_mode: "exact".to_string(),
                fixtures_scanned: 1,
                expected_total: 0,
                actual_total: 0,
            },
        }
    }

    #[test]
    fn escapes_and_levels() {
        let lines = render_github_annotations(&result(vec![
            RenderableDiff {
                kind: RenderableDiffKind::Missing,
                path: "a.ts".to_string(),
                line: 0,
                rule: "S1".to_string(),
                ordinal: 0,
                expected_message: None,
                actual_message: None,
            },
            RenderableDiff {
                kind: RenderableDiffKind::Unexpected,
                path: "a.ts".to_string(),
                line: 4,
                rule: "S2".to_string(),
                ordinal: 0,
                expected_message: None,
                actual_message: Some("100%\ndone".to_string()),
            },
        ]));
        assert_eq!(
            lines,
            vec![
                "::error file=a.ts::[ruleconf:S1] expected issue was not reported".to_string(),
                "::error file=a.ts,line=4::[ruleconf:S2] unexpected issue: 100%25%0Adone"
                    .to_string(),
            ]
        );
    }

    #[test]
    fn empty_result_has_no_annotations() {
        assert!(render_github_annotations(&result(Vec::new())).is_empty());
    }
}
