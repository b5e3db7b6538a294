use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `ruleconf.toml` schema v1.
///
/// User-facing and permissive: every field is optional and falls back to the profile preset.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RuleconfConfigV1 {
    /// Optional schema string for tooling (`ruleconf.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// `strict` (default), `lenient`, or `locations`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    /// `ignore`, `exact`, `contains`, or `pattern`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_mode: Option<String>,

    /// Upper bound on one analyzer invocation, in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,

    /// Only compare the rule named by each fixture's file stem.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_rule_isolation: Option<bool>,

    /// Marker syntax: `noncompliant` or `issue`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dialect: Option<String>,

    /// Language id -> quality profile name, forwarded to the analyzer.
    #[serde(default)]
    pub language_profiles: BTreeMap<String, String>,

    #[serde(default)]
    pub rules: RulesConfig,

    #[serde(default)]
    pub ignore: Vec<IgnoreEntry>,

    #[serde(default)]
    pub corpus: CorpusConfig,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RulesConfig {
    #[serde(default)]
    pub include: Vec<String>,

    #[serde(default)]
    pub exclude: Vec<String>,

    /// Treat `repo:key` and `key` as the same rule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strip_repository: Option<bool>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct IgnoreEntry {
    /// Rule id, or `*` for every rule.
    pub rule: String,

    /// Glob over corpus-relative paths.
    pub resource: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CorpusConfig {
    #[serde(default)]
    pub include: Vec<String>,

    #[serde(default)]
    pub exclude: Vec<String>,
}
