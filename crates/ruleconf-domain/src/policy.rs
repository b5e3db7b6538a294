use crate::marker::{IssueDialect, MarkerDialect, NoncompliantDialect};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// How expected marker messages are compared with reported messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageMode {
    /// Location and rule only.
    Ignore,
    Exact,
    /// Expected message is a fragment of the reported one.
    Contains,
    /// Expected message is a glob (`*`, `?`).
    Pattern,
}

impl MessageMode {
    pub fn as_str(self) -> &'static str {
        match self {
            MessageMode::Ignore => "ignore",
            MessageMode::Exact => "exact",
            MessageMode::Contains => "contains",
            MessageMode::Pattern => "pattern",
        }
    }

    pub fn compares_messages(self) -> bool {
        self != MessageMode::Ignore
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialectKind {
    Noncompliant,
    Issue,
}

impl DialectKind {
    pub fn dialect(self) -> Box<dyn MarkerDialect> {
        match self {
            DialectKind::Noncompliant => Box::new(NoncompliantDialect),
            DialectKind::Issue => Box::new(IssueDialect),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSelection {
    /// When non-empty, only these rules are compared.
    pub include: BTreeSet<String>,
    pub exclude: BTreeSet<String>,
}

/// Drop issues of `rule` (or any rule for `*`) on paths matching the `resource` glob.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IgnoreRule {
    pub rule: String,
    pub resource: String,
}

/// What the analyzer collaborator is told about the run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Language id -> quality profile name.
    pub language_profiles: BTreeMap<String, String>,
    pub rule_selection: RuleSelection,
    pub ignore: Vec<IgnoreRule>,
    pub timeout_ms: u64,
    pub per_rule_isolation: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CorpusSelection {
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct EffectiveConfig {
    pub profile: String,
    pub message_mode: MessageMode,
    pub dialect: DialectKind,
    /// Compare `typescript:S1438` and `S1438` as the same rule.
    pub strip_repository: bool,
    pub corpus: CorpusSelection,
    pub analysis: AnalysisConfig,
}
