use crate::error::ConformanceError;
use crate::marker::normalize_rule;
use crate::policy::EffectiveConfig;
use globset::{Glob, GlobMatcher};
use ruleconf_types::CorpusPath;
use std::collections::BTreeSet;

/// Rule selection applied identically to expected and actual issues.
#[derive(Clone, Debug)]
pub struct IssueFilter {
    include: BTreeSet<String>,
    exclude: BTreeSet<String>,
    ignore: Vec<(Option<String>, GlobMatcher)>,
    per_rule_isolation: bool,
    strip_repository: bool,
}

impl IssueFilter {
    pub fn from_config(cfg: &EffectiveConfig) -> Result<Self, ConformanceError> {
        let strip = cfg.strip_repository;
        let selection = &cfg.analysis.rule_selection;

        let mut ignore = Vec::new();
        for entry in &cfg.analysis.ignore {
            let matcher = Glob::new(&entry.resource)
                .map_err(|e| {
                    ConformanceError::Config(format!(
                        "invalid ignore resource glob `{}`: {e}",
                        entry.resource
                    ))
                })?
                .compile_matcher();
            let rule = match entry.rule.trim() {
                "*" => None,
                r => Some(normalize_rule(r, strip)),
            };
            ignore.push((rule, matcher));
        }

        Ok(Self {
            include: selection
                .include
                .iter()
                .map(|r| normalize_rule(r, strip))
                .collect(),
            exclude: selection
                .exclude
                .iter()
                .map(|r| normalize_rule(r, strip))
                .collect(),
            ignore,
            per_rule_isolation: cfg.analysis.per_rule_isolation,
            strip_repository: strip,
        })
    }

    /// Whether an issue of the (already normalized) `rule` on `path` takes part in comparison.
    pub fn keeps(&self, path: &CorpusPath, rule: &str) -> bool {
        if !self.include.is_empty() && !self.include.contains(rule) {
            return false;
        }
        if self.exclude.contains(rule) {
            return false;
        }
        let ignored = self.ignore.iter().any(|(ignored_rule, matcher)| {
            ignored_rule.as_deref().is_none_or(|r| r == rule) && matcher.is_match(path.as_str())
        });
        if ignored {
            return false;
        }
        if self.per_rule_isolation {
            return path
                .file_stem()
                .is_some_and(|stem| normalize_rule(stem, self.strip_repository) == rule);
        }
        true
    }
}
