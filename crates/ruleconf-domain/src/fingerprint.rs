use ruleconf_types::DiffKind;
use sha2::{Digest, Sha256};

/// Compute a stable SHA-256 fingerprint for a diff entry.
///
/// Identity fields:
/// - diff kind
/// - path (corpus-relative)
/// - line
/// - rule id
/// - ordinal
pub fn fingerprint_for_diff(kind: DiffKind, path: &str, line: u32, rule: &str, ordinal: u32) -> String {
    let line = line.to_string();
    let ordinal = ordinal.to_string();
    let canonical = [kind.as_str(), path, line.as_str(), rule, ordinal.as_str()].join("|");

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    let digest = hasher.finalize();
    hex::encode(digest)
}
