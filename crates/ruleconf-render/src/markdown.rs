use crate::RenderableResult;

pub fn render_markdown(result: &RenderableResult) -> String {
    let mut out = String::new();

    out.push_str("# Ruleconf report\n\n");
    let verdict = if result.passed { "PASS" } else { "FAIL" };
    out.push_str(&format!(
        "- Verdict: **{}**\n- Profile: `{}` (messages: `{}`)\n- Fixtures: {}\n- Issues: {} expected / {} reported\n- Differences: {}\n\n",
        verdict,
        result.data.profile,
        result.data.message_mode,
        result.data.fixtures_scanned,
        result.data.expected_total,
        result.data.actual_total,
        result.diffs.len()
    ));

    if result.diffs.is_empty() {
        out.push_str("No differences.\n");
        return out;
    }

    out.push_str("## Differences\n\n");
    out.push_str("| Kind | Location | Rule | Expected | Actual |\n");
    out.push_str("|---|---|---|---|---|\n");
    for d in &result.diffs {
        out.push_str(&format!(
            "| {} | `{}:{}` | `{}` | {} | {} |\n",
            d.kind.label(),
            d.path,
            d.line,
            d.rule,
            cell(d.expected_message.as_deref()),
            cell(d.actual_message.as_deref())
        ));
    }

    out
}

fn cell(message: Option<&str>) -> String {
    match message {
        Some(m) => m.replace('|', "\\|").replace(['\r', '\n'], " "),
        None => String::new(),
    }
}
