//! Fuzz target for `ruleconf.toml` parsing and resolution.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_config_parser
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data)
        && let Ok(cfg) = ruleconf_settings::parse_config_toml(text)
    {
        let _ = ruleconf_settings::resolve_config(cfg, ruleconf_settings::Overrides::default());
    }
});
