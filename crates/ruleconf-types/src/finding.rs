//! Analyzer wire format and expected/actual dump shapes.

use crate::CorpusPath;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::collections::BTreeMap;

/// One finding as reported by an external analyzer.
///
/// Only `path`, `line`, `rule`, `message`, and `secondary_locations` are read; anything else the
/// analyzer attaches (severity, effort, debt, ...) lands in `extra` and is ignored by comparison.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RawFinding {
    pub path: String,
    /// `None` (or absent) means a file-level finding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    pub rule: String,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub secondary_locations: Vec<SecondaryLocation>,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

impl RawFinding {
    pub fn new(path: &str, line: u32, rule: &str, message: &str) -> Self {
        Self {
            path: path.to_string(),
            line: Some(line),
            rule: rule.to_string(),
            message: message.to_string(),
            secondary_locations: Vec::new(),
            extra: Map::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SecondaryLocation {
    pub line: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Issue as written to the expected/actual dump artifacts.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
pub struct DumpedIssue {
    pub line: u32,
    pub rule: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// `path -> issues`, sorted by path then issue.
pub type IssueDump = BTreeMap<CorpusPath, Vec<DumpedIssue>>;
