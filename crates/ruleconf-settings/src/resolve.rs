use crate::{model::RuleconfConfigV1, presets};
use anyhow::Context;
use globset::Glob;
use ruleconf_domain::marker::normalize_rule;
use ruleconf_domain::policy::{DialectKind, EffectiveConfig, IgnoreRule, MessageMode};

#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub profile: Option<String>,
    pub message_mode: Option<String>,
    pub timeout_ms: Option<u64>,
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub effective: EffectiveConfig,
}

pub fn resolve_config(
    cfg: RuleconfConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    let profile = overrides
        .profile
        .clone()
        .or(cfg.profile.clone())
        .unwrap_or_else(|| "strict".to_string());

    let mut effective = presets::preset(&profile);

    if let Some(mode) = overrides.message_mode.as_deref().or(cfg.message_mode.as_deref()) {
        effective.message_mode = parse_message_mode(mode)?;
    }

    if let Some(dialect) = cfg.dialect.as_deref() {
        effective.dialect = parse_dialect(dialect)?;
    }

    if let Some(strip) = cfg.rules.strip_repository {
        effective.strip_repository = strip;
    }

    if let Some(timeout_ms) = overrides.timeout_ms.or(cfg.timeout_ms) {
        if timeout_ms == 0 {
            anyhow::bail!("timeout_ms must be greater than zero");
        }
        effective.analysis.timeout_ms = timeout_ms;
    }

    if let Some(isolation) = cfg.per_rule_isolation {
        effective.analysis.per_rule_isolation = isolation;
    }

    // language profiles
    for (language, name) in &cfg.language_profiles {
        if name.trim().is_empty() {
            anyhow::bail!("empty quality profile name for language {language}");
        }
    }
    effective.analysis.language_profiles = cfg.language_profiles.clone();

    // rule selection, normalized the same way markers and findings are
    let strip = effective.strip_repository;
    effective.analysis.rule_selection.include = cfg
        .rules
        .include
        .iter()
        .map(|r| normalize_rule(r, strip))
        .collect();
    effective.analysis.rule_selection.exclude = cfg
        .rules
        .exclude
        .iter()
        .map(|r| normalize_rule(r, strip))
        .collect();

    for entry in &cfg.ignore {
        Glob::new(&entry.resource).with_context(|| {
            format!("invalid ignore resource glob for {}: {}", entry.rule, entry.resource)
        })?;
        effective.analysis.ignore.push(IgnoreRule {
            rule: normalize_rule(&entry.rule, strip),
            resource: entry.resource.clone(),
        });
    }

    if !cfg.corpus.include.is_empty() {
        validate_globs("corpus.include", &cfg.corpus.include)?;
        effective.corpus.include = cfg.corpus.include.clone();
    }
    if !cfg.corpus.exclude.is_empty() {
        validate_globs("corpus.exclude", &cfg.corpus.exclude)?;
        effective.corpus.exclude = cfg.corpus.exclude.clone();
    }

    Ok(ResolvedConfig { effective })
}

fn validate_globs(field: &str, patterns: &[String]) -> anyhow::Result<()> {
    for pattern in patterns {
        Glob::new(pattern).with_context(|| format!("invalid glob in {field}: {pattern}"))?;
    }
    Ok(())
}

fn parse_message_mode(v: &str) -> anyhow::Result<MessageMode> {
    match v {
        "ignore" => Ok(MessageMode::Ignore),
        "exact" => Ok(MessageMode::Exact),
        "contains" => Ok(MessageMode::Contains),
        "pattern" => Ok(MessageMode::Pattern),
        other => anyhow::bail!(
            "unknown message_mode: {other} (expected ignore|exact|contains|pattern)"
        ),
    }
}

fn parse_dialect(v: &str) -> anyhow::Result<DialectKind> {
    match v {
        "noncompliant" => Ok(DialectKind::Noncompliant),
        "issue" => Ok(DialectKind::Issue),
        other => anyhow::bail!("unknown dialect: {other} (expected noncompliant|issue)"),
    }
}
