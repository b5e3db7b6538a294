//! Fuzz target for expected-issue marker parsing.
//!
//! The parser may reject input with a marker error but must never panic.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_marker_parser
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use ruleconf_domain::policy::DialectKind;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let _ = ruleconf_corpus::fuzz::parse_markers(DialectKind::Noncompliant, &text);
    let _ = ruleconf_corpus::fuzz::parse_markers(DialectKind::Issue, &text);
});
