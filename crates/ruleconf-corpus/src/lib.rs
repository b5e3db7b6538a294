//! Corpus adapters: discover fixture files and decode their markers.
//!
//! This crate reads the filesystem. It never runs the analyzer; that is the caller's job.

#![forbid(unsafe_code)]

mod discover;
mod load;

pub use discover::discover_fixtures;
pub use load::load_expected;

/// Fuzz-friendly API for exercising marker decoding without filesystem access.
/// These functions never panic on any input.
pub mod fuzz {
    use ruleconf_domain::policy::DialectKind;
    use ruleconf_domain::{ConformanceError, ExpectedIssueParser};
    use ruleconf_types::CorpusPath;

    /// Parse arbitrary text as a fixture in the given marker dialect.
    ///
    /// Returns the number of expected issues, or the first marker error.
    pub fn parse_markers(kind: DialectKind, text: &str) -> Result<usize, ConformanceError> {
        let path = CorpusPath::new("fuzz/S100.js");
        let dialect = kind.dialect();
        ExpectedIssueParser::new(dialect.as_ref(), true)
            .parse(&path, text)
            .map(|issues| issues.len())
    }
}
