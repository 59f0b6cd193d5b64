//! Dotted/indexed path construction for missing-data reporting.
//!
//! Grounded on the path-formatting rule in the Design Notes: field keys are
//! joined with `.`, sequence indices are glued to the parent path with no
//! separator (`address.lines[0]`), and the empty root path renders as the
//! literal `root` when it itself is reported missing.

/// Build the path for a nested field access: `parent.key`, or just `key`
/// when `parent` is the root (empty string).
pub fn build_field_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}.{key}")
    }
}

/// Build the path for a sequence element access: `parent[index]`.
pub fn build_index_path(parent: &str, index: usize) -> String {
    format!("{parent}[{index}]")
}

/// Render a path for reporting, substituting the literal `root` for the
/// empty path.
pub fn display_path(path: &str) -> String {
    if path.is_empty() {
        "root".to_string()
    } else {
        path.to_string()
    }
}
