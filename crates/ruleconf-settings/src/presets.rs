use ruleconf_domain::policy::{
    AnalysisConfig, CorpusSelection, DialectKind, EffectiveConfig, MessageMode, RuleSelection,
};
use std::collections::BTreeMap;

pub const DEFAULT_TIMEOUT_MS: u64 = 600_000;

/// Preset profiles differ only in how messages are compared.
pub fn preset(profile: &str) -> EffectiveConfig {
    match profile {
        "lenient" => base("lenient", MessageMode::Contains),
        "locations" => base("locations", MessageMode::Ignore),
        // default
        _ => base("strict", MessageMode::Exact),
    }
}

fn base(profile: &str, message_mode: MessageMode) -> EffectiveConfig {
    EffectiveConfig {
        profile: profile.to_string(),
        message_mode,
        dialect: DialectKind::Noncompliant,
        strip_repository: true,
        corpus: CorpusSelection {
            include: vec!["**/*".to_string()],
            exclude: vec!["**/node_modules/**".to_string()],
        },
        analysis: AnalysisConfig {
            language_profiles: BTreeMap::new(),
            rule_selection: RuleSelection::default(),
            ignore: Vec::new(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            per_rule_isolation: false,
        },
    }
}
