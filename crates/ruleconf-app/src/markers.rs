//! The `markers` use case: show what the corpus expects, without running an analyzer.

use camino::Utf8Path;
use ruleconf_domain::ConformanceError;
use ruleconf_domain::report::expected_dump;
use ruleconf_settings::Overrides;
use ruleconf_types::IssueDump;

use crate::check::resolve;

#[derive(Clone, Debug)]
pub struct MarkersInput<'a> {
    pub corpus_root: &'a Utf8Path,
    pub config_text: &'a str,
}

pub fn run_markers(input: MarkersInput<'_>) -> anyhow::Result<IssueDump> {
    let resolved = resolve(input.config_text, Overrides::default())?;
    let cfg = &resolved.effective;

    let fixtures = ruleconf_corpus::discover_fixtures(input.corpus_root, &cfg.corpus)?;
    if fixtures.is_empty() {
        return Err(ConformanceError::EmptyCorpus {
            root: input.corpus_root.to_string(),
        }
        .into());
    }
    let expected = ruleconf_corpus::load_expected(input.corpus_root, &fixtures, cfg)?;
    Ok(expected_dump(&expected))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::run::tests::{single_fixture_corpus, utf8_root};
    use ruleconf_types::CorpusPath;
    use tempfile::TempDir;

    #[test]
    fn lists_expected_issues_per_fixture() {
        let tmp = TempDir::new().expect("temp dir");
        let root = single_fixture_corpus(&tmp);
        let dump = run_markers(MarkersInput {
            corpus_root: &root,
            config_text: "",
        })
        .expect("markers");
        let issues = &dump[&CorpusPath::new("a.ts")];
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].line, 5);
        assert_eq!(issues[0].rule, "S1438");
    }

    #[test]
    fn empty_corpus_is_an_error() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);
        assert!(
            run_markers(MarkersInput {
                corpus_root: &root,
                config_text: "",
            })
            .is_err()
        );
    }
}
