//! The `explain` use case: look up diff kind / error code documentation.

use ruleconf_types::explain::{self, Explanation};

/// Output from the explain use case.
#[derive(Clone, Debug)]
pub enum ExplainOutput {
    Found(Explanation),
    /// Unknown identifier; includes every known code.
    NotFound {
        identifier: String,
        diff_kinds: &'static [&'static str],
        error_codes: &'static [&'static str],
    },
}

pub fn run_explain(identifier: &str) -> ExplainOutput {
    match explain::lookup_explanation(identifier) {
        Some(exp) => ExplainOutput::Found(exp),
        None => ExplainOutput::NotFound {
            identifier: identifier.to_string(),
            diff_kinds: explain::all_diff_kinds(),
            error_codes: explain::all_error_codes(),
        },
    }
}

/// Format an explanation for terminal display.
pub fn format_explanation(exp: &Explanation) -> String {
    let mut out = String::new();

    out.push_str(exp.title);
    out.push('\n');
    out.push_str(&"=".repeat(exp.title.len()));
    out.push_str("\n\n");
    out.push_str(exp.description);
    out.push_str("\n\n");
    out.push_str("Remediation\n");
    out.push_str("-----------\n");
    out.push_str(exp.remediation);
    out.push_str("\n\n");
    out.push_str("Example\n");
    out.push_str("-------\n\n");
    out.push_str("```\n");
    out.push_str(exp.example);
    out.push('\n');
    out.push_str("```\n");

    out
}

pub fn format_not_found(identifier: &str, diff_kinds: &[&str], error_codes: &[&str]) -> String {
    let mut out = String::new();

    out.push_str(&format!("Unknown diff kind or error code: {}\n\n", identifier));
    out.push_str("Diff kinds:\n");
    for kind in diff_kinds {
        out.push_str(&format!("  - {}\n", kind));
    }
    out.push_str("\nError codes:\n");
    for code in error_codes {
        out.push_str(&format!("  - {}\n", code));
    }

    out
}
