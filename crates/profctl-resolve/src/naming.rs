//! Deterministic name and path composition

/// `-`-joined object name parts. No sanitization: parts are only ever
/// name components chosen by the subscription and definition.
pub fn join(parts: &[&str]) -> String {
    parts.join("-")
}

/// Final segment of a (possibly slash-qualified) logical name. Nested
/// artifacts carry `parent/name` logical names; object names must stay
/// DNS-safe, so only the base contributes.
pub fn base_name(name: &str) -> &str {
    name.rsplit('/').next().unwrap_or(name)
}

/// Slash-qualified logical name under a nested-profile prefix
pub fn qualify(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}/{name}")
    }
}

/// `<root>/artifacts/<artifact>/<path>` rewrite applied to every local
/// resource path. Always forward slashes: these paths end up inside
/// manifests, not on the local filesystem.
pub fn artifact_path(root_dir: &str, artifact_name: &str, path: &str) -> String {
    [root_dir, "artifacts", artifact_name, path].join("/")
}

/// Linear membership check over the visited repo keys
pub fn contains_key(keys: &[String], key: &str) -> bool {
    keys.iter().any(|k| k == key)
}
