//! Config parsing and profile/preset resolution.
//!
//! IO-free: configuration arrives as strings and leaves as an [`EffectiveConfig`].
//!
//! [`EffectiveConfig`]: ruleconf_domain::policy::EffectiveConfig

#![forbid(unsafe_code)]

mod model;
mod presets;
mod resolve;

pub use model::{CorpusConfig, IgnoreEntry, RuleconfConfigV1, RulesConfig};
pub use resolve::{Overrides, ResolvedConfig};

/// Parse `ruleconf.toml` (or equivalent) into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<RuleconfConfigV1> {
    let cfg: RuleconfConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Resolve the effective config used by a run (preset, then file, then overrides).
pub fn resolve_config(
    cfg: RuleconfConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    resolve::resolve_config(cfg, overrides)
}
