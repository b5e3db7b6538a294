use crate::model::{ActualIssue, ExpectedIssue};
use crate::policy::{
    AnalysisConfig, CorpusSelection, DialectKind, EffectiveConfig, MessageMode, RuleSelection,
};
use ruleconf_types::CorpusPath;
use std::collections::BTreeMap;

pub fn config() -> EffectiveConfig {
    EffectiveConfig {
        profile: "strict".to_string(),
        message_mode: MessageMode::Exact,
        dialect: DialectKind::Noncompliant,
        strip_repository: true,
        corpus: CorpusSelection {
            include: vec!["**/*".to_string()],
            exclude: Vec::new(),
        },
        analysis: AnalysisConfig {
            language_profiles: BTreeMap::new(),
            rule_selection: RuleSelection::default(),
            ignore: Vec::new(),
            timeout_ms: 1_000,
            per_rule_isolation: false,
        },
    }
}

pub fn expected(path: &str, line: u32, rule: &str, count: u32, messages: &[&str]) -> ExpectedIssue {
    ExpectedIssue {
        path: CorpusPath::new(path),
        line,
        rule: rule.to_string(),
        count,
        messages: messages.iter().map(|m| m.to_string()).collect(),
    }
}

pub fn actual(path: &str, line: u32, rule: &str, message: &str) -> ActualIssue {
    ActualIssue {
        path: CorpusPath::new(path),
        line,
        rule: rule.to_string(),
        message: message.to_string(),
        secondary_lines: Vec::new(),
    }
}
