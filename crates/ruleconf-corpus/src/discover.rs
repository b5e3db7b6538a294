use camino::{Utf8Path, Utf8PathBuf};
use globset::{Glob, GlobSet, GlobSetBuilder};
use ruleconf_domain::ConformanceError;
use ruleconf_domain::policy::CorpusSelection;
use ruleconf_types::CorpusPath;
use std::path::PathBuf;
use walkdir::WalkDir;

/// Discover fixture files under `corpus_root`.
///
/// Behavior:
/// - Every regular file matching an `include` glob and no `exclude` glob is a fixture.
/// - Paths are corpus-relative with `/` separators, returned in sorted order.
/// - An empty result is not an error here; the caller decides.
pub fn discover_fixtures(
    corpus_root: &Utf8Path,
    selection: &CorpusSelection,
) -> Result<Vec<CorpusPath>, ConformanceError> {
    if !corpus_root.is_dir() {
        return Err(ConformanceError::Io {
            path: corpus_root.to_string(),
            source: std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "corpus root is not a directory",
            ),
        });
    }

    let include = build_globset("corpus.include", &selection.include)?;
    let exclude = build_globset("corpus.exclude", &selection.exclude)?;

    let mut out: Vec<CorpusPath> = Vec::new();
    for abs in WalkDir::new(corpus_root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| pathbuf_to_utf8(e.path().to_path_buf()))
    {
        let rel = CorpusPath::relative_to(corpus_root, abs.as_str());
        let included = selection.include.is_empty() || include.is_match(rel.as_str());
        if included && !exclude.is_match(rel.as_str()) {
            out.push(rel);
        }
    }

    // Stable order.
    out.sort();
    out.dedup();

    tracing::debug!(root = %corpus_root, fixtures = out.len(), "discovered corpus");
    Ok(out)
}

fn build_globset(field: &str, patterns: &[String]) -> Result<GlobSet, ConformanceError> {
    let mut b = GlobSetBuilder::new();
    for p in patterns {
        let glob = Glob::new(p)
            .map_err(|e| ConformanceError::Config(format!("invalid glob in {field}: {p}: {e}")))?;
        b.add(glob);
    }
    b.build()
        .map_err(|e| ConformanceError::Config(format!("compile {field} globset: {e}")))
}

fn pathbuf_to_utf8(path: PathBuf) -> Option<Utf8PathBuf> {
    Utf8PathBuf::from_path_buf(path).ok()
}
