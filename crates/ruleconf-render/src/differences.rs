use crate::{RenderableDiff, RenderableDiffKind, RenderableResult};

/// Render the persisted differences file.
///
/// One line per diff, in input order:
/// `{path}:{line}: {kind} {rule}[#ordinal] [details]`
///
/// The ordinal suffix only appears for repeated slots (ordinal > 0). A passing result renders
/// as the empty string, so "the file is empty" is the shell-level pass check.
pub fn render_differences(result: &RenderableResult) -> String {
    let mut out = String::new();
    for diff in &result.diffs {
        out.push_str(&render_line(diff));
        out.push('\n');
    }
    out
}

fn render_line(diff: &RenderableDiff) -> String {
    let mut line = format!(
        "{}:{}: {} {}",
        diff.path,
        diff.line,
        diff.kind.label(),
        diff.rule
    );
    if diff.ordinal > 0 {
        line.push_str(&format!("#{}", diff.ordinal));
    }

    // Messages are Debug-quoted so embedded newlines stay on one line.
    match diff.kind {
        RenderableDiffKind::Missing => {
            if let Some(expected) = &diff.expected_message {
                line.push_str(&format!(" expected {expected:?}"));
            }
        }
        RenderableDiffKind::Unexpected => {
            if let Some(actual) = &diff.actual_message {
                line.push_str(&format!(" actual {actual:?}"));
            }
        }
        RenderableDiffKind::Mismatched => {
            line.push_str(&format!(
                " expected {:?} but was {:?}",
                diff.expected_message.as_deref().unwrap_or(""),
                diff.actual_message.as_deref().unwrap_or("")
            ));
        }
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RenderableData;

    fn data() -> RenderableData {
        RenderableData {
            profile: "strict".to_string(),
            message_mode: "exact".to_string(),
            fixtures_scanned: 1,
            expected_total: 1,
            actual_total: 0,
        }
    }

    fn diff(kind: RenderableDiffKind, line: u32, ordinal: u32) -> RenderableDiff {
        RenderableDiff {
            kind,
            path: "a.ts".to_string(),
            line,
            rule: "S1438".to_string(),
            ordinal,
            expected_message: None,
            actual_message: None,
        }
    }

    #[test]
    fn pass_renders_empty() {
        let result = RenderableResult {
            passed: true,
            diffs: Vec::new(),
            data: data(),
        };
        assert_eq!(render_differences(&result), "");
    }

    #[test]
    fn renders_one_line_per_diff() {
        let mut mismatched = diff(RenderableDiffKind::Mismatched, 9, 0);
        mismatched.expected_message = Some("Add a semicolon".to_string());
        mismatched.actual_message = Some("Missing semicolon.\nsee docs".to_string());

        let mut unexpected = diff(RenderableDiffKind::Unexpected, 12, 1);
        unexpected.actual_message = Some("extra".to_string());

        let mut missing_with_message = diff(RenderableDiffKind::Missing, 0, 0);
        missing_with_message.expected_message = Some("file level".to_string());

        let result = RenderableResult {
            passed: false,
            diffs: vec![
                missing_with_message,
                diff(RenderableDiffKind::Missing, 5, 0),
                mismatched,
                unexpected,
            ],
            data: data(),
        };

        insta::assert_snapshot!(render_differences(&result), @r#"
        a.ts:0: missing S1438 expected "file level"
        a.ts:5: missing S1438
        a.ts:9: mismatched S1438 expected "Add a semicolon" but was "Missing semicolon.\nsee docs"
        a.ts:12: unexpected S1438#1 actual "extra"
        "#);
    }
}
