#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum RenderableDiffKind {
    Missing,
    Unexpected,
    Mismatched,
}

impl RenderableDiffKind {
    pub fn label(self) -> &'static str {
        match self {
            RenderableDiffKind::Missing => "missing",
            RenderableDiffKind::Unexpected => "unexpected",
            RenderableDiffKind::Mismatched => "mismatched",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableDiff {
    pub kind: RenderableDiffKind,
    pub path: String,
    /// 0 for a file-level issue.
    pub line: u32,
    pub rule: String,
    pub ordinal: u32,
    pub expected_message: Option<String>,
    pub actual_message: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableData {
    pub profile: String,
    pub message_mode: String,
    pub fixtures_scanned: u32,
    pub expected_total: u32,
    pub actual_total: u32,
}

/// Input to every renderer. `diffs` are expected in report order (path, line, rule).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableResult {
    pub passed: bool,
    pub diffs: Vec<RenderableDiff>,
    pub data: RenderableData,
}
