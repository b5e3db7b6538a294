//! Concrete [`AnalyzerRunner`] adapters.

use camino::{Utf8Path, Utf8PathBuf};
use ruleconf_domain::policy::AnalysisConfig;
use ruleconf_domain::{AnalysisOutput, AnalysisUnavailable, AnalyzerRunner};
use std::io::{Read, Write};
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};
use tracing::debug;

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Runs an external analyzer as a subprocess.
///
/// Protocol: the corpus root is appended as the last argument, the [`AnalysisConfig`] is
/// written to stdin as JSON, and findings are read from stdout (see
/// [`AnalysisOutput::from_json`]). A non-zero exit is a crash. The child is killed once
/// `timeout_ms` elapses.
#[derive(Clone, Debug)]
pub struct CommandAnalyzer {
    program: String,
    args: Vec<String>,
}

impl CommandAnalyzer {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Split a shell-like command line on whitespace. No quoting support.
    pub fn from_command_line(command: &str) -> Option<Self> {
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self::new(program, parts.collect()))
    }
}

impl AnalyzerRunner for CommandAnalyzer {
    fn analyze(
        &self,
        corpus_root: &Utf8Path,
        config: &AnalysisConfig,
    ) -> Result<AnalysisOutput, AnalysisUnavailable> {
        let payload = serde_json::to_vec(config)
            .map_err(|e| AnalysisUnavailable::Unreachable(format!("serialize config: {e}")))?;

        debug!(program = %self.program, root = %corpus_root, "spawning analyzer");
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg(corpus_root.as_str())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| AnalysisUnavailable::Unreachable(format!("spawn {}: {e}", self.program)))?;

        // All pipes are serviced off this thread; the deadline also covers a child that
        // blocks on a full pipe.
        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let stdout_reader = thread::spawn(move || read_all(stdout));
        let stderr_reader = thread::spawn(move || read_all(stderr));
        let stdin = child.stdin.take();
        let stdin_writer = thread::spawn(move || write_payload(stdin, &payload));

        let deadline = Instant::now() + Duration::from_millis(config.timeout_ms);
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) if Instant::now() >= deadline => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(AnalysisUnavailable::Timeout {
                        timeout_ms: config.timeout_ms,
                    });
                }
                Ok(None) => thread::sleep(POLL_INTERVAL),
                Err(e) => {
                    return Err(AnalysisUnavailable::Crashed(format!("wait for analyzer: {e}")));
                }
            }
        };

        if let Ok(Err(e)) = stdin_writer.join() {
            return Err(AnalysisUnavailable::Unreachable(format!("write config: {e}")));
        }

        let stdout = stdout_reader
            .join()
            .map_err(|_| AnalysisUnavailable::Crashed("stdout reader panicked".to_string()))?
            .map_err(|e| AnalysisUnavailable::Crashed(format!("read analyzer stdout: {e}")))?;
        let stderr = stderr_reader
            .join()
            .ok()
            .and_then(Result::ok)
            .unwrap_or_default();

        if !status.success() {
            return Err(AnalysisUnavailable::Crashed(format!(
                "{} exited with {status}: {}",
                self.program,
                stderr.trim()
            )));
        }

        AnalysisOutput::from_json(&stdout)
    }
}

/// A child that never reads its input may close the pipe early; that is not an error.
fn write_payload<W: Write>(sink: Option<W>, payload: &[u8]) -> std::io::Result<()> {
    let Some(mut sink) = sink else {
        return Ok(());
    };
    match sink.write_all(payload) {
        Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}

fn read_all<R: Read>(source: Option<R>) -> std::io::Result<String> {
    let mut buf = String::new();
    if let Some(mut source) = source {
        source.read_to_string(&mut buf)?;
    }
    Ok(buf)
}

/// Replays findings captured from an earlier analyzer run.
#[derive(Clone, Debug)]
pub struct ReplayAnalyzer {
    findings_path: Utf8PathBuf,
}

impl ReplayAnalyzer {
    pub fn new(findings_path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            findings_path: findings_path.into(),
        }
    }
}

impl AnalyzerRunner for ReplayAnalyzer {
    fn analyze(
        &self,
        _corpus_root: &Utf8Path,
        _config: &AnalysisConfig,
    ) -> Result<AnalysisOutput, AnalysisUnavailable> {
        let text = std::fs::read_to_string(&self.findings_path).map_err(|e| {
            AnalysisUnavailable::Unreachable(format!("read {}: {e}", self.findings_path))
        })?;
        AnalysisOutput::from_json(&text)
    }
}
