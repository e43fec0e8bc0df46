//! Route-to-network resolution
//!
//! Derives the selected chain name from the navigation path. Pure and
//! reentrant: every navigation recomputes from the path alone.

/// Primary supported chain, used when the path names none
pub const DEFAULT_NETWORK: &str = "prysmdevnet";

/// Split a path on `/`, keeping the leading empty segment ("/a/b" -> ["", "a", "b"])
pub fn split_path(path: &str) -> Vec<String> {
    path.split('/').map(str::to_lowercase).collect()
}

/// Select a chain name for the given path segments.
///
/// Rules, first match wins:
/// 1. a `validator` segment selects the default network
/// 2. `feegrant`/`authz` pages use segment 3, except the `new-*` pages
/// 3. `builder`/`history` pages use segment 3
/// 4. any other path with three or more segments uses segment 2
/// 5. otherwise the default network
///
/// Segments are lower-cased. A missing or empty segment yields `""`.
pub fn resolve<S: AsRef<str>>(segments: &[S], default_network: &str) -> String {
    let parts: Vec<String> = segments
        .iter()
        .map(|s| s.as_ref().to_lowercase())
        .collect();
    let has = |name: &str| parts.iter().any(|p| p == name);
    let segment = |index: usize| parts.get(index).cloned().unwrap_or_default();

    if has("validator") {
        default_network.to_string()
    } else if has("feegrant") || has("authz") {
        if parts.len() >= 4 && !has("new-feegrant") && !has("new-authz") {
            segment(3)
        } else {
            default_network.to_string()
        }
    } else if has("builder") || has("history") {
        if parts.len() >= 4 {
            segment(3)
        } else {
            default_network.to_string()
        }
    } else if parts.len() >= 3 {
        segment(2)
    } else {
        default_network.to_string()
    }
}

/// Resolve straight from a URL path
pub fn resolve_path(path: &str, default_network: &str) -> String {
    resolve(&split_path(path), default_network)
}
