use ruleconf_types::{CorpusPath, DiffKind};
use std::cmp::Ordering;

/// One expected finding decoded from a fixture marker.
///
/// `count` expands to that many identity slots during comparison. `messages` holds either
/// nothing, one message shared by every slot, or exactly one message per slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpectedIssue {
    pub path: CorpusPath,
    pub line: u32,
    pub rule: String,
    pub count: u32,
    pub messages: Vec<String>,
}

impl ExpectedIssue {
    pub fn message_for(&self, ordinal: u32) -> Option<&str> {
        match self.messages.len() {
            0 => None,
            1 => Some(self.messages[0].as_str()),
            _ => self.messages.get(ordinal as usize).map(String::as_str),
        }
    }
}

/// One finding reported by the analyzer, projected to the fields comparison needs.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct ActualIssue {
    pub path: CorpusPath,
    pub line: u32,
    pub rule: String,
    pub message: String,
    pub secondary_lines: Vec<u32>,
}

/// Identity of one issue slot: ordinals disambiguate repeats of a rule on one line.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IssueKey {
    pub path: CorpusPath,
    pub line: u32,
    pub rule: String,
    pub ordinal: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DiffEntry {
    /// Expected but never reported.
    Missing {
        key: IssueKey,
        expected_message: Option<String>,
    },
    /// Reported but not expected.
    Unexpected { key: IssueKey, actual_message: String },
    /// Same location and rule, different message.
    Mismatched {
        key: IssueKey,
        expected_message: String,
        actual_message: String,
    },
}

impl DiffEntry {
    pub fn key(&self) -> &IssueKey {
        match self {
            DiffEntry::Missing { key, .. }
            | DiffEntry::Unexpected { key, .. }
            | DiffEntry::Mismatched { key, .. } => key,
        }
    }

    pub fn kind(&self) -> DiffKind {
        match self {
            DiffEntry::Missing { .. } => DiffKind::Missing,
            DiffEntry::Unexpected { .. } => DiffKind::Unexpected,
            DiffEntry::Mismatched { .. } => DiffKind::Mismatched,
        }
    }

    pub fn expected_message(&self) -> Option<&str> {
        match self {
            DiffEntry::Missing {
                expected_message, ..
            } => expected_message.as_deref(),
            DiffEntry::Mismatched {
                expected_message, ..
            } => Some(expected_message),
            DiffEntry::Unexpected { .. } => None,
        }
    }

    pub fn actual_message(&self) -> Option<&str> {
        match self {
            DiffEntry::Unexpected { actual_message, .. }
            | DiffEntry::Mismatched { actual_message, .. } => Some(actual_message),
            DiffEntry::Missing { .. } => None,
        }
    }
}

impl Ord for DiffEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // path, line, rule, kind, ordinal, then messages for a total order.
        let (a, b) = (self.key(), other.key());
        a.path
            .cmp(&b.path)
            .then(a.line.cmp(&b.line))
            .then(a.rule.cmp(&b.rule))
            .then(self.kind().cmp(&other.kind()))
            .then(a.ordinal.cmp(&b.ordinal))
            .then(self.expected_message().cmp(&other.expected_message()))
            .then(self.actual_message().cmp(&other.actual_message()))
    }
}

impl PartialOrd for DiffEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConformanceStats {
    pub fixtures: u32,
    pub expected_slots: u32,
    pub actual_issues: u32,
}

/// Outcome of one conformance run. Immutable once built; diffs are always sorted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConformanceResult {
    diffs: Vec<DiffEntry>,
    stats: ConformanceStats,
}

impl ConformanceResult {
    pub fn new(mut diffs: Vec<DiffEntry>, stats: ConformanceStats) -> Self {
        diffs.sort();
        Self { diffs, stats }
    }

    pub fn diffs(&self) -> &[DiffEntry] {
        &self.diffs
    }

    pub fn stats(&self) -> ConformanceStats {
        self.stats
    }

    /// True iff there is no discrepancy.
    pub fn passed(&self) -> bool {
        self.diffs.is_empty()
    }

    pub fn count(&self, kind: DiffKind) -> usize {
        self.diffs.iter().filter(|d| d.kind() == kind).count()
    }
}
