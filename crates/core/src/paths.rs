//! Translation between repository-relative and bundle-relative paths.
//!
//! A dump root is a plain string prefix (`"sub1/"` or `""`), so both directions
//! are string operations.

/// Strip the dump root from a repository-relative path.
///
/// Paths outside the root are returned unchanged.
pub fn to_bundle_path<'a>(repo_path: &'a str, root: &str) -> &'a str {
    repo_path.strip_prefix(root).unwrap_or(repo_path)
}

/// Prefix a bundle-relative path with the dump root.
pub fn to_repo_path(bundle_path: &str, root: &str) -> String {
    let mut path = String::with_capacity(root.len() + bundle_path.len());
    path.push_str(root);
    path.push_str(bundle_path);
    path
}
