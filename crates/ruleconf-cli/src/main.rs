//! CLI entry point for ruleconf.
//!
//! Thin by design: argument parsing, I/O, and exit codes. All logic lives in `ruleconf-app`.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{ArgAction, Parser, Subcommand};
use ruleconf_app::{
    CheckInput, CommandAnalyzer, ExplainOutput, MarkersInput, ReplayAnalyzer, parse_report_json,
    render_annotations, render_markdown, run_check, run_explain, run_markers, serialize_dump,
    serialize_report, verdict_exit_code, write_text,
};
use ruleconf_domain::{AnalyzerRunner, ConformanceError};
use ruleconf_settings::Overrides;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "ruleconf",
    version,
    about = "Rule-conformance verification for static analyzers"
)]
struct Cli {
    /// Corpus root (directory holding the fixture files).
    #[arg(long, default_value = ".")]
    corpus: Utf8PathBuf,

    /// Path to ruleconf config TOML. A missing file means defaults.
    #[arg(long, default_value = "ruleconf.toml")]
    config: Utf8PathBuf,

    /// Override profile (strict|lenient|locations).
    #[arg(long)]
    profile: Option<String>,

    /// Override message comparison (ignore|exact|contains|pattern).
    #[arg(long)]
    message_mode: Option<String>,

    /// Override the analyzer timeout in milliseconds.
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` wins when set.
    #[arg(long, short, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the analyzer over the corpus and write the differences file.
    Check {
        /// Analyzer command line; receives the corpus root as last argument and the
        /// analysis config as JSON on stdin, prints findings JSON on stdout.
        #[arg(long, conflicts_with = "findings", required_unless_present = "findings")]
        analyzer_cmd: Option<String>,

        /// Replay findings from a previously captured JSON file instead of running an analyzer.
        #[arg(long)]
        findings: Option<Utf8PathBuf>,

        /// Where to write the differences file (empty iff the run passed).
        #[arg(long, default_value = "artifacts/ruleconf/differences.txt")]
        differences_out: Utf8PathBuf,

        /// Where to write the JSON report.
        #[arg(long)]
        report_out: Option<Utf8PathBuf>,

        /// Where to write the expected issues, as JSON.
        #[arg(long)]
        expected_dump: Option<Utf8PathBuf>,

        /// Where to write the reported issues, as JSON.
        #[arg(long)]
        actual_dump: Option<Utf8PathBuf>,

        /// Write a Markdown summary.
        #[arg(long)]
        write_markdown: bool,

        /// Where to write the Markdown summary (if enabled).
        #[arg(long, default_value = "artifacts/ruleconf/comment.md")]
        markdown_out: Utf8PathBuf,
    },

    /// Print the expected issues encoded in the corpus markers, as JSON.
    Markers {
        /// Write to a file instead of stdout.
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },

    /// Render markdown from an existing JSON report.
    Md {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/ruleconf/report.json")]
        report: Utf8PathBuf,

        /// Where to write the Markdown output (if not specified, prints to stdout).
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },

    /// Render GitHub Actions annotations from an existing JSON report.
    Annotations {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/ruleconf/report.json")]
        report: Utf8PathBuf,

        /// Maximum number of annotations to emit.
        #[arg(long, default_value = "10")]
        max: usize,
    },

    /// Explain a diff kind or error code with remediation guidance.
    Explain {
        /// The diff kind (e.g., "missing") or error code (e.g., "empty_corpus") to explain.
        identifier: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.cmd {
        Commands::Check {
            ref analyzer_cmd,
            ref findings,
            ref differences_out,
            ref report_out,
            ref expected_dump,
            ref actual_dump,
            write_markdown,
            ref markdown_out,
        } => cmd_check(
            &cli,
            CheckArgs {
                analyzer_cmd: analyzer_cmd.clone(),
                findings: findings.clone(),
                differences_out: differences_out.clone(),
                report_out: report_out.clone(),
                expected_dump: expected_dump.clone(),
                actual_dump: actual_dump.clone(),
                markdown_out: write_markdown.then(|| markdown_out.clone()),
            },
        ),
        Commands::Markers { ref output } => cmd_markers(&cli, output.clone()),
        Commands::Md { report, output } => cmd_md(report, output),
        Commands::Annotations { report, max } => cmd_annotations(report, max),
        Commands::Explain { identifier } => cmd_explain(&identifier),
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

struct CheckArgs {
    analyzer_cmd: Option<String>,
    findings: Option<Utf8PathBuf>,
    differences_out: Utf8PathBuf,
    report_out: Option<Utf8PathBuf>,
    expected_dump: Option<Utf8PathBuf>,
    actual_dump: Option<Utf8PathBuf>,
    markdown_out: Option<Utf8PathBuf>,
}

fn cmd_check(cli: &Cli, args: CheckArgs) -> anyhow::Result<()> {
    let result = (|| -> anyhow::Result<i32> {
        let analyzer: Arc<dyn AnalyzerRunner> = match (&args.analyzer_cmd, &args.findings) {
            (Some(cmd), _) => Arc::new(
                CommandAnalyzer::from_command_line(cmd).context("--analyzer-cmd is empty")?,
            ),
            (None, Some(path)) => Arc::new(ReplayAnalyzer::new(path.clone())),
            (None, None) => anyhow::bail!("either --analyzer-cmd or --findings is required"),
        };

        let cfg_text = read_config(&cli.config)?;
        let output = run_check(CheckInput {
            corpus_root: &cli.corpus,
            config_text: &cfg_text,
            overrides: overrides(cli),
            analyzer,
        })?;

        write_text(&args.differences_out, output.differences.as_bytes())
            .context("write differences")?;
        tracing::debug!(path = %args.differences_out, bytes = output.differences.len(), "wrote differences");
        if let Some(path) = &args.report_out {
            write_text(path, &serialize_report(&output.report)?).context("write report json")?;
        }
        if let Some(path) = &args.expected_dump {
            write_text(path, &serialize_dump(&output.expected_dump)?)
                .context("write expected dump")?;
        }
        if let Some(path) = &args.actual_dump {
            write_text(path, &serialize_dump(&output.actual_dump)?).context("write actual dump")?;
        }
        if let Some(path) = &args.markdown_out {
            write_text(path, render_markdown(&output.report).as_bytes())
                .context("write markdown")?;
        }

        if !output.differences.is_empty() {
            eprint!("{}", output.differences);
        }
        Ok(verdict_exit_code(output.report.verdict.status))
    })();

    match result {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
        Err(err) => {
            // A stale differences file from an earlier run must not read as a pass.
            if args.differences_out.exists()
                && let Err(e) = std::fs::remove_file(&args.differences_out)
            {
                eprintln!(
                    "ruleconf warning: could not remove stale differences file {}: {e}",
                    args.differences_out
                );
            }
            match err.downcast_ref::<ConformanceError>() {
                Some(fatal) => eprintln!("ruleconf error: {}: {err:#}", fatal.code()),
                None => eprintln!("ruleconf error: {err:#}"),
            }
            std::process::exit(1);
        }
    }
}

fn overrides(cli: &Cli) -> Overrides {
    Overrides {
        profile: cli.profile.clone(),
        message_mode: cli.message_mode.clone(),
        timeout_ms: cli.timeout_ms,
    }
}

/// Missing config file is allowed (defaults apply); unreadable is not.
fn read_config(path: &Utf8Path) -> anyhow::Result<String> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(String::new()),
        Err(e) => Err(e).with_context(|| format!("read config: {path}")),
    }
}

fn cmd_markers(cli: &Cli, output: Option<Utf8PathBuf>) -> anyhow::Result<()> {
    let cfg_text = read_config(&cli.config)?;
    let dump = run_markers(MarkersInput {
        corpus_root: &cli.corpus,
        config_text: &cfg_text,
    })?;
    let mut json = serialize_dump(&dump)?;
    json.push(b'\n');

    match output {
        Some(path) => write_text(&path, &json).context("write markers")?,
        None => print!("{}", String::from_utf8_lossy(&json)),
    }
    Ok(())
}

fn cmd_md(report_path: Utf8PathBuf, output: Option<Utf8PathBuf>) -> anyhow::Result<()> {
    let report_text = std::fs::read_to_string(&report_path)
        .with_context(|| format!("read report: {}", report_path))?;
    let report = parse_report_json(&report_text)?;
    let md = render_markdown(&report);

    if let Some(out_path) = output {
        write_text(&out_path, md.as_bytes()).context("write markdown output")?;
    } else {
        print!("{}", md);
    }

    Ok(())
}

fn cmd_annotations(report_path: Utf8PathBuf, max: usize) -> anyhow::Result<()> {
    let report_text = std::fs::read_to_string(&report_path)
        .with_context(|| format!("read report: {}", report_path))?;
    let report = parse_report_json(&report_text)?;

    for annotation in render_annotations(&report, max) {
        println!("{}", annotation);
    }

    Ok(())
}

fn cmd_explain(identifier: &str) -> anyhow::Result<()> {
    match run_explain(identifier) {
        ExplainOutput::Found(exp) => {
            print!("{}", ruleconf_app::format_explanation(&exp));
            Ok(())
        }
        ExplainOutput::NotFound {
            identifier,
            diff_kinds,
            error_codes,
        } => {
            eprint!(
                "{}",
                ruleconf_app::format_not_found(&identifier, diff_kinds, error_codes)
            );
            std::process::exit(1);
        }
    }
}
