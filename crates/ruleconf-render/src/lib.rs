//! Rendering utilities: the differences file plus CI surfaces (Markdown, GitHub annotations).
//!
//! Every renderer is a pure function of its input; equal inputs give byte-equal output.

#![forbid(unsafe_code)]

mod differences;
mod gha;
mod markdown;
mod model;

pub use differences::render_differences;
pub use gha::render_github_annotations;
pub use markdown::render_markdown;
pub use model::{RenderableData, RenderableDiff, RenderableDiffKind, RenderableResult};
