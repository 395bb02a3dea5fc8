//! Resolution of heterogeneous tag references to canonical [Tag] values.
//!
//! Callers refer to tags by an already-loaded [Tag], by unique name, or by
//! numeric ID. Every public engine operation funnels its arguments through
//! [resolve_tag] so that deeper layers only ever see canonical tags.

use std::collections::HashSet;

use rusqlite::Connection;

use crate::{
    Error,
    tag::{Tag, TagColor, TagId, TagName, create_tag, get_tag, get_tag_by_name},
};

/// A reference to a tag: an already-resolved tag, a unique name, or an ID.
#[derive(Debug, Clone)]
pub enum TagRef {
    /// An already-loaded tag, passed through unchanged.
    Handle(Tag),
    /// A tag name to look up (and optionally create).
    Name(String),
    /// A tag ID to look up. IDs are never created on demand.
    Id(TagId),
}

impl From<Tag> for TagRef {
    fn from(tag: Tag) -> Self {
        TagRef::Handle(tag)
    }
}

impl From<&Tag> for TagRef {
    fn from(tag: &Tag) -> Self {
        TagRef::Handle(tag.clone())
    }
}

impl From<TagId> for TagRef {
    fn from(id: TagId) -> Self {
        TagRef::Id(id)
    }
}

impl From<&str> for TagRef {
    fn from(name: &str) -> Self {
        TagRef::Name(name.to_string())
    }
}

impl From<String> for TagRef {
    fn from(name: String) -> Self {
        TagRef::Name(name)
    }
}

/// Resolve a [TagRef] to a canonical [Tag].
///
/// A name that does not resolve is created with the default color when
/// `create_nonexisting` is true. An ID that does not resolve always fails:
/// IDs are assigned by the store and cannot be named into existence.
///
/// # Errors
///
/// This function will return an [Error::NoSuchTag] if the reference does not
/// resolve and cannot be created, or [Error::SqlError] if there is an SQL
/// error.
pub fn resolve_tag(
    reference: &TagRef,
    create_nonexisting: bool,
    connection: &Connection,
) -> Result<Tag, Error> {
    match reference {
        TagRef::Handle(tag) => Ok(tag.clone()),
        TagRef::Name(name) => {
            let name = TagName::new(name).map_err(|_| Error::NoSuchTag)?;

            match get_tag_by_name(&name, connection) {
                Ok(tag) => Ok(tag),
                Err(Error::NotFound) if create_nonexisting => {
                    create_tag(name, TagColor::default(), connection)
                }
                Err(Error::NotFound) => Err(Error::NoSuchTag),
                Err(error) => Err(error),
            }
        }
        TagRef::Id(id) => match get_tag(*id, connection) {
            Ok(tag) => Ok(tag),
            Err(Error::NotFound) => Err(Error::NoSuchTag),
            Err(error) => Err(error),
        },
    }
}

/// Resolve several [TagRef]s to a deduplicated set of canonical [Tag]s.
///
/// Resolution order within the call is unspecified; the first reference that
/// fails to resolve fails the whole call.
pub fn resolve_tags(
    references: &[TagRef],
    create_nonexisting: bool,
    connection: &Connection,
) -> Result<HashSet<Tag>, Error> {
    let mut tags = HashSet::with_capacity(references.len());

    for reference in references {
        tags.insert(resolve_tag(reference, create_nonexisting, connection)?);
    }

    Ok(tags)
}
