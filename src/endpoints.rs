//! The API endpoint URIs.
//!
//! For endpoints that take a parameter, e.g., '/tags/{tag_id}/edit', use [format_endpoint].

/// The root route which redirects to the tag listing.
pub const ROOT: &str = "/";
/// The page for listing all tags.
pub const TAGS_VIEW: &str = "/tags";
/// The page for creating a new tag.
pub const NEW_TAG_VIEW: &str = "/tags/new";
/// The page for editing an existing tag and its relations.
pub const EDIT_TAG_VIEW: &str = "/tags/{tag_id}/edit";

/// The route to create a tag.
pub const POST_TAG: &str = "/api/tags";
/// The route to update a tag.
pub const PUT_TAG: &str = "/api/tags/{tag_id}";
/// The route to delete a tag.
pub const DELETE_TAG: &str = "/api/tags/{tag_id}";
/// The route to remove a subtag from a tag's inclusions.
pub const REMOVE_SUBTAG: &str = "/api/tags/{tag_id}/subtags/{subtag_id}";
/// The route to remove a supertag from a tag.
pub const REMOVE_SUPERTAG: &str = "/api/tags/{tag_id}/supertags/{supertag_id}";
/// The route to remove an exclusion between two tags.
pub const REMOVE_EXCLUSION: &str = "/api/tags/{tag_id}/exclusions/{excluded_id}";
/// The route to add tags to a tag set from a comma-separated name list.
pub const ADD_TAGSET_TAGS: &str = "/api/tagsets/{tagset_id}/tags";
/// The route to remove a single tag from a tag set.
pub const REMOVE_TAGSET_TAG: &str = "/api/tagsets/{tagset_id}/tags/{tag_id}";

/// Replace the first parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/tags/{tag_id}/edit', '{tag_id}' is
/// the parameter.
///
/// Paths with several parameters are formatted by applying this function
/// once per parameter, left to right.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let mut param_start = None;
    let mut param_end = None;

    for (i, c) in endpoint_path.chars().enumerate() {
        if c == '{' {
            param_start = Some(i);
        } else if param_start.is_some() && c == '}' {
            param_end = Some(i + 1);
            break;
        }
    }

    let param_start = match param_start {
        Some(start) => start,
        None => return endpoint_path.to_string(),
    };

    let param_end = param_end.unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
