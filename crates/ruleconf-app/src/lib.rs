//! Use case orchestration for ruleconf.
//!
//! The application layer: use cases that coordinate the domain, corpus, settings, and render
//! layers, plus the concrete analyzer adapters. The CLI crate depends on this; it only handles
//! argument parsing and I/O.

#![forbid(unsafe_code)]

mod analyzer;
mod check;
mod explain;
mod markers;
mod render;
mod report;
mod run;

pub use analyzer::{CommandAnalyzer, ReplayAnalyzer};
pub use check::{CheckInput, CheckOutput, run_check, verdict_exit_code};
pub use explain::{ExplainOutput, format_explanation, format_not_found, run_explain};
pub use markers::{MarkersInput, run_markers};
pub use render::{
    parse_report_json, render_annotations, render_differences, render_markdown, serialize_dump,
    serialize_report, to_renderable, write_text,
};
pub use report::build_report;
pub use run::{ConformanceRun, run_conformance};
