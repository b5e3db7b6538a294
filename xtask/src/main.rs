//! Developer tasks (schema generation, fixture conformance, explain coverage).
//!
//! Kept out of the end-user CLI.

use anyhow::{Context, bail};
use schemars::schema_for;
use std::fs;
use std::path::{Path, PathBuf};

/// Project root (parent of the xtask directory).
fn project_root() -> anyhow::Result<PathBuf> {
    let manifest_dir = match std::env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => std::env::current_dir().context("determine current directory")?,
    };

    if manifest_dir.ends_with("xtask") {
        manifest_dir
            .parent()
            .map(Path::to_path_buf)
            .context("xtask has no parent directory")
    } else {
        Ok(manifest_dir)
    }
}

struct SchemaSpec {
    filename: &'static str,
    generate: fn() -> schemars::Schema,
}

fn generate_report_schema() -> schemars::Schema {
    schema_for!(ruleconf_types::ConformanceReport)
}

fn generate_config_schema() -> schemars::Schema {
    schema_for!(ruleconf_settings::RuleconfConfigV1)
}

fn generate_findings_schema() -> schemars::Schema {
    schema_for!(Vec<ruleconf_types::RawFinding>)
}

fn schema_specs() -> Vec<SchemaSpec> {
    vec![
        SchemaSpec {
            filename: "ruleconf.report.v1.json",
            generate: generate_report_schema,
        },
        SchemaSpec {
            filename: "ruleconf.config.v1.json",
            generate: generate_config_schema,
        },
        SchemaSpec {
            filename: "ruleconf.findings.v1.json",
            generate: generate_findings_schema,
        },
    ]
}

/// Pretty-printed JSON with trailing newline.
fn serialize_schema(schema: &schemars::Schema) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(schema).context("serialize schema")?;
    json.push('\n');
    Ok(json)
}

fn emit_schemas() -> anyhow::Result<()> {
    let dir = project_root()?.join("schemas");
    fs::create_dir_all(&dir).context("create schemas directory")?;

    for spec in schema_specs() {
        let json = serialize_schema(&(spec.generate)())?;
        let path = dir.join(spec.filename);
        fs::write(&path, &json).with_context(|| format!("write {}", path.display()))?;
        println!("Wrote {}", path.display());
    }
    Ok(())
}

/// Fails unless every committed schema matches what the types generate.
fn validate_schemas() -> anyhow::Result<()> {
    let dir = project_root()?.join("schemas");
    let mut stale = Vec::new();

    for spec in schema_specs() {
        let path = dir.join(spec.filename);
        let expected = serialize_schema(&(spec.generate)())?;
        match fs::read_to_string(&path) {
            Ok(actual) if actual == expected => {}
            Ok(_) => stale.push(format!("{} (out of date)", spec.filename)),
            Err(_) => stale.push(format!("{} (missing)", spec.filename)),
        }
    }

    if stale.is_empty() {
        println!("All schemas are up to date.");
        return Ok(());
    }
    for name in &stale {
        eprintln!("  - {name}");
    }
    eprintln!("\nRun `cargo xtask emit-schemas` to regenerate.");
    bail!("schema validation failed")
}

/// Repo-relative, forward slashes, no parent segments.
fn is_clean_path(path: &str) -> bool {
    !(path.is_empty()
        || path.starts_with('/')
        || path.contains('\\')
        || path.split('/').any(|seg| seg == "..")
        || (path.len() >= 2 && path.as_bytes()[1] == b':'))
}

fn is_valid_token(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_lowercase())
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

/// Hygiene checks the schema cannot express.
fn report_hygiene(name: &str, report: &serde_json::Value) -> Vec<String> {
    let mut errors = Vec::new();

    if let Some(diffs) = report.get("diffs").and_then(|v| v.as_array()) {
        for (i, diff) in diffs.iter().enumerate() {
            if let Some(path) = diff.get("path").and_then(|v| v.as_str())
                && !is_clean_path(path)
            {
                errors.push(format!("{name}: diffs[{i}].path '{path}' is not clean"));
            }
        }
    }

    if let Some(reasons) = report
        .get("verdict")
        .and_then(|v| v.get("reasons"))
        .and_then(|v| v.as_array())
    {
        for (i, reason) in reasons.iter().enumerate() {
            if let Some(s) = reason.as_str()
                && !is_valid_token(s)
            {
                errors.push(format!("{name}: verdict.reasons[{i}] '{s}' is not a valid token"));
            }
        }
    }

    errors
}

/// Runs the built `ruleconf` binary over every fixture in `tests/fixtures/` that carries a
/// `findings.json`, then validates each report against the generated report schema and the
/// fixture's golden files.
fn conform() -> anyhow::Result<()> {
    let root = project_root()?;
    let schema = serde_json::to_value(generate_report_schema()).context("schema to JSON")?;
    let validator = jsonschema::validator_for(&schema)
        .map_err(|e| anyhow::anyhow!("compile report schema: {e}"))?;

    let mut bin = root.join("target").join("debug").join("ruleconf");
    if cfg!(target_os = "windows") {
        bin.set_extension("exe");
    }
    if !bin.exists() {
        bail!(
            "ruleconf binary not found at {}.\nRun `cargo build -p ruleconf-cli` first.",
            bin.display()
        );
    }

    let fixtures = root.join("tests").join("fixtures");
    let mut entries: Vec<PathBuf> = fs::read_dir(&fixtures)
        .with_context(|| format!("read {}", fixtures.display()))?
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| p.join("findings.json").exists())
        .collect();
    entries.sort();

    let mut errors = Vec::new();
    let mut checked = 0usize;

    for fixture in &entries {
        let name = fixture
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let tmp = tempfile::tempdir().context("create temp dir")?;
        let report_out = tmp.path().join("report.json");

        let output = std::process::Command::new(&bin)
            .arg("--corpus")
            .arg(fixture.join("corpus"))
            .arg("--config")
            .arg(fixture.join("ruleconf.toml"))
            .arg("check")
            .arg("--findings")
            .arg(fixture.join("findings.json"))
            .arg("--differences-out")
            .arg(tmp.path().join("differences.txt"))
            .arg("--report-out")
            .arg(&report_out)
            .output()
            .with_context(|| format!("run ruleconf on fixture '{name}'"))?;

        // Fatal fixtures have no report to validate.
        if output.status.code() == Some(1) {
            if fixture.join("expected.differences").exists() {
                errors.push(format!(
                    "fixture '{name}': ruleconf failed: {}",
                    String::from_utf8_lossy(&output.stderr)
                ));
            }
            continue;
        }

        let text = fs::read_to_string(&report_out)
            .with_context(|| format!("fixture '{name}': read report"))?;
        let report: serde_json::Value =
            serde_json::from_str(&text).with_context(|| format!("fixture '{name}': parse report"))?;

        for err in validator.iter_errors(&report) {
            errors.push(format!("fixture '{name}': schema validation: {err}"));
        }
        errors.extend(report_hygiene(&name, &report));

        let golden = fixture.join("expected.report.json");
        if golden.exists() {
            let golden: serde_json::Value = serde_json::from_str(&fs::read_to_string(&golden)?)
                .with_context(|| format!("fixture '{name}': parse golden"))?;
            if ruleconf_test_util::normalize_nondeterministic(report) != golden {
                errors.push(format!(
                    "fixture '{name}': report differs from expected.report.json"
                ));
            }
        }

        checked += 1;
        println!("  ok {name}");
    }

    if !errors.is_empty() {
        for err in &errors {
            eprintln!("  - {err}");
        }
        bail!("conformance failed with {} errors", errors.len());
    }
    println!("\n{checked} fixture reports conform.");
    Ok(())
}

/// Every diff kind and error code must have a complete explanation.
fn explain_coverage() -> anyhow::Result<()> {
    use ruleconf_types::explain::{all_diff_kinds, all_error_codes, lookup_explanation};

    let mut errors = Vec::new();
    for id in all_diff_kinds().iter().chain(all_error_codes()) {
        match lookup_explanation(id) {
            Some(exp) => {
                if exp.title.is_empty() || exp.description.is_empty() || exp.remediation.is_empty()
                {
                    errors.push(format!("'{id}' has an incomplete explanation"));
                }
            }
            None => errors.push(format!("'{id}' has no explanation")),
        }
    }

    if errors.is_empty() {
        println!(
            "{} diff kinds and {} error codes have explanations.",
            all_diff_kinds().len(),
            all_error_codes().len()
        );
        Ok(())
    } else {
        for err in &errors {
            eprintln!("  - {err}");
        }
        bail!("explain coverage failed with {} errors", errors.len())
    }
}

fn print_help() {
    eprintln!("xtask commands:");
    eprintln!("  help              Show this message");
    eprintln!("  emit-schemas      Generate JSON schemas from Rust types to schemas/");
    eprintln!("  validate-schemas  Check if schemas/ matches generated output (for CI)");
    eprintln!("  print-schema-ids  Print known schema IDs");
    eprintln!("  conform           Run ruleconf over tests/fixtures and validate the reports");
    eprintln!("  explain-coverage  Validate all diff kinds and error codes have explanations");
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cmd = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    match cmd {
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        "emit-schemas" => emit_schemas(),
        "validate-schemas" => validate_schemas(),
        "conform" => conform(),
        "explain-coverage" => explain_coverage(),
        "print-schema-ids" => {
            for spec in schema_specs() {
                println!("{}", spec.filename.trim_end_matches(".json"));
            }
            Ok(())
        }
        other => bail!("unknown xtask command: {other}\n\nRun `cargo xtask help` for usage."),
    }
    .context("xtask failed")
}
