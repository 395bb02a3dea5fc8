//! Core tag set domain types.

use serde::Deserialize;

use crate::database_id::DatabaseID;

/// Database identifier for a tag set.
pub type TagSetId = DatabaseID;

/// A collection of tags, optionally attached to a host entity.
///
/// The host key `(host_kind, host_id)` is unique per host; both parts are
/// `None` for sets that are not attached to anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagSet {
    pub id: TagSetId,
    pub host_kind: Option<String>,
    pub host_id: Option<DatabaseID>,
}

/// Form data for the bulk tag entry field.
#[derive(Debug, Deserialize)]
pub struct AddTagsFormData {
    /// Comma-separated tag names.
    pub tag_names: String,
}
