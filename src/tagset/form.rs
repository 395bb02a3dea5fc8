//! Normalization of the comma-separated tag name entry field.

/// Split a comma-separated string of tag names into trimmed, non-empty
/// names. Empty tokens are discarded silently.
pub fn parse_tag_names(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
