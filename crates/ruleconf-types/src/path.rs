use camino::{Utf8Path, Utf8PathBuf};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Canonical corpus-relative path used for fixtures, findings, and diffs.
///
/// Normalization rules are intentionally simple and deterministic:
/// - always forward slashes (`/`)
/// - no leading `./`
/// - absolute paths are kept as-is; relativizing against the corpus root is the caller's job
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct CorpusPath(String);

impl Default for CorpusPath {
    fn default() -> Self {
        CorpusPath::new(".")
    }
}

impl CorpusPath {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        let mut v = s.as_ref().replace('\\', "/");
        while v.starts_with("./") {
            v = v.trim_start_matches("./").to_string();
        }
        // Avoid empty path; keep it explicit.
        if v.is_empty() {
            v = ".".to_string();
        }
        Self(v)
    }

    /// Normalize `raw` relative to `root` when it points inside the root.
    ///
    /// Paths outside the root are only slash-normalized.
    pub fn relative_to(root: &Utf8Path, raw: &str) -> Self {
        let normalized = raw.replace('\\', "/");
        let root_s = root.as_str().replace('\\', "/");
        let root_s = root_s.trim_end_matches('/');
        if !root_s.is_empty()
            && let Some(rest) = normalized.strip_prefix(root_s)
            && rest.starts_with('/')
        {
            return CorpusPath::new(rest.trim_start_matches('/'));
        }
        CorpusPath::new(normalized)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn to_utf8_pathbuf(&self) -> Utf8PathBuf {
        Utf8PathBuf::from(self.0.clone())
    }

    /// File name without its extensions (`rules/S1438.spec.ts` -> `S1438`).
    pub fn file_stem(&self) -> Option<&str> {
        let name = self.0.rsplit('/').next()?;
        let stem = name.split('.').next()?;
        if stem.is_empty() { None } else { Some(stem) }
    }
}

impl std::fmt::Display for CorpusPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&Utf8Path> for CorpusPath {
    fn from(value: &Utf8Path) -> Self {
        CorpusPath::new(value.as_str())
    }
}

impl From<Utf8PathBuf> for CorpusPath {
    fn from(value: Utf8PathBuf) -> Self {
        CorpusPath::new(value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_slashes_and_dot_prefix() {
        assert_eq!(CorpusPath::new(".\\src\\a.ts").as_str(), "src/a.ts");
        assert_eq!(CorpusPath::new("././a.ts").as_str(), "a.ts");
        assert_eq!(CorpusPath::new("").as_str(), ".");
    }

    #[test]
    fn relative_to_strips_root_prefix() {
        let root = Utf8Path::new("/work/corpus");
        assert_eq!(
            CorpusPath::relative_to(root, "/work/corpus/src/a.ts").as_str(),
            "src/a.ts"
        );
        assert_eq!(
            CorpusPath::relative_to(Utf8Path::new("/work/corpus/"), "/work/corpus/a.ts").as_str(),
            "a.ts"
        );
        // sibling directory sharing a prefix is not inside the root
        assert_eq!(
            CorpusPath::relative_to(root, "/work/corpus2/a.ts").as_str(),
            "/work/corpus2/a.ts"
        );
        assert_eq!(CorpusPath::relative_to(root, "./b.ts").as_str(), "b.ts");
    }

    #[test]
    fn file_stem_drops_all_extensions() {
        assert_eq!(CorpusPath::new("rules/S1438.spec.ts").file_stem(), Some("S1438"));
        assert_eq!(CorpusPath::new("a.ts").file_stem(), Some("a"));
        assert_eq!(CorpusPath::new(".eslintrc").file_stem(), None);
    }
}
