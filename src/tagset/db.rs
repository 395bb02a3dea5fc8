//! Database operations for tag sets and their memberships.
//!
//! These are pure membership primitives with no invariant checking. The
//! supertag-closure and co-exclusion rules are enforced by
//! [crate::tagset::core], which is the only public write path for
//! memberships.

use rusqlite::{Connection, OptionalExtension, Row};

use crate::{
    Error,
    database_id::DatabaseID,
    tag::{Tag, TagId, db::map_row},
    tagset::{TagSet, TagSetId},
};

/// Create a tag set that is not attached to any host entity.
pub fn create_tagset(connection: &Connection) -> Result<TagSet, Error> {
    connection.execute(
        "INSERT INTO tag_set (host_kind, host_id) VALUES (NULL, NULL)",
        (),
    )?;

    Ok(TagSet {
        id: connection.last_insert_rowid(),
        host_kind: None,
        host_id: None,
    })
}

/// Retrieve a tag set by ID.
pub fn get_tagset(tagset_id: TagSetId, connection: &Connection) -> Result<TagSet, Error> {
    connection
        .prepare("SELECT id, host_kind, host_id FROM tag_set WHERE id = :id;")?
        .query_row(&[(":id", &tagset_id)], map_tagset_row)
        .map_err(|error| error.into())
}

/// Retrieve the tag set attached to the given host entity, creating it if
/// the host has none yet.
pub fn get_or_create_tagset(
    host_kind: &str,
    host_id: DatabaseID,
    connection: &Connection,
) -> Result<TagSet, Error> {
    let existing = connection
        .prepare("SELECT id, host_kind, host_id FROM tag_set WHERE host_kind = ?1 AND host_id = ?2")?
        .query_row((host_kind, host_id), map_tagset_row)
        .optional()?;

    if let Some(tagset) = existing {
        return Ok(tagset);
    }

    connection.execute(
        "INSERT INTO tag_set (host_kind, host_id) VALUES (?1, ?2)",
        (host_kind, host_id),
    )?;

    Ok(TagSet {
        id: connection.last_insert_rowid(),
        host_kind: Some(host_kind.to_string()),
        host_id: Some(host_id),
    })
}

/// Destroy the tag set attached to the given host entity, if any.
///
/// This is the entry point host runtimes call when the host is deleted. It
/// is idempotent: destroying a host without a tag set is a no-op. The set's
/// memberships are removed by the cascading foreign key; tags and relations
/// are untouched.
pub fn on_host_deleted(
    host_kind: &str,
    host_id: DatabaseID,
    connection: &Connection,
) -> Result<(), Error> {
    connection.execute(
        "DELETE FROM tag_set WHERE host_kind = ?1 AND host_id = ?2",
        (host_kind, host_id),
    )?;

    Ok(())
}

/// Insert a tag into a tag set. Inserting a present member is a no-op.
pub fn insert_member(
    tagset_id: TagSetId,
    tag_id: TagId,
    connection: &Connection,
) -> Result<(), Error> {
    connection.execute(
        "INSERT OR IGNORE INTO tag_set_membership (tag_set_id, tag_id) VALUES (?1, ?2)",
        (tagset_id, tag_id),
    )?;

    Ok(())
}

/// Remove a tag from a tag set. Removing an absent member is a no-op.
pub fn delete_member(
    tagset_id: TagSetId,
    tag_id: TagId,
    connection: &Connection,
) -> Result<(), Error> {
    connection.execute(
        "DELETE FROM tag_set_membership WHERE tag_set_id = ?1 AND tag_id = ?2",
        (tagset_id, tag_id),
    )?;

    Ok(())
}

/// Whether the tag set contains the given tag.
pub fn contains_tag(
    tagset_id: TagSetId,
    tag_id: TagId,
    connection: &Connection,
) -> Result<bool, Error> {
    let exists = connection.query_row(
        "SELECT EXISTS(
            SELECT 1 FROM tag_set_membership WHERE tag_set_id = ?1 AND tag_id = ?2
        )",
        (tagset_id, tag_id),
        |row| row.get(0),
    )?;

    Ok(exists)
}

/// Get all member tags of a tag set, ordered by name.
pub fn get_members(tagset_id: TagSetId, connection: &Connection) -> Result<Vec<Tag>, Error> {
    connection
        .prepare(
            "SELECT t.id, t.name, t.color
             FROM tag t
             INNER JOIN tag_set_membership m ON t.id = m.tag_id
             WHERE m.tag_set_id = ?1
             ORDER BY t.name",
        )?
        .query_map([tagset_id], map_row)?
        .map(|maybe_tag| maybe_tag.map_err(Error::SqlError))
        .collect()
}

/// Get the number of tags in a tag set.
pub fn count_members(tagset_id: TagSetId, connection: &Connection) -> Result<i64, Error> {
    let count = connection.query_row(
        "SELECT COUNT(*) FROM tag_set_membership WHERE tag_set_id = ?1",
        [tagset_id],
        |row| row.get(0),
    )?;

    Ok(count)
}

/// Get the IDs of all tag sets containing the given tag (the reverse
/// membership index).
pub fn get_tagsets_containing(
    tag_id: TagId,
    connection: &Connection,
) -> Result<Vec<TagSetId>, Error> {
    connection
        .prepare("SELECT tag_set_id FROM tag_set_membership WHERE tag_id = ?1")?
        .query_map([tag_id], |row| row.get(0))?
        .map(|maybe_id| maybe_id.map_err(Error::SqlError))
        .collect()
}

/// Whether any single tag set contains both tags.
pub fn share_a_tagset(a: TagId, b: TagId, connection: &Connection) -> Result<bool, Error> {
    let exists = connection.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM tag_set_membership m1
            INNER JOIN tag_set_membership m2 ON m1.tag_set_id = m2.tag_set_id
            WHERE m1.tag_id = ?1 AND m2.tag_id = ?2
        )",
        (a, b),
        |row| row.get(0),
    )?;

    Ok(exists)
}

/// Initialize the tag set tables and indexes.
pub fn create_tagset_tables(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS tag_set (
            id INTEGER PRIMARY KEY,
            host_kind TEXT,
            host_id INTEGER,
            UNIQUE(host_kind, host_id)
        );

        CREATE TABLE IF NOT EXISTS tag_set_membership (
            id INTEGER PRIMARY KEY,
            tag_set_id INTEGER NOT NULL,
            tag_id INTEGER NOT NULL,
            FOREIGN KEY(tag_set_id) REFERENCES tag_set(id) ON UPDATE CASCADE ON DELETE CASCADE,
            FOREIGN KEY(tag_id) REFERENCES tag(id) ON UPDATE CASCADE ON DELETE CASCADE,
            UNIQUE(tag_set_id, tag_id)
        );

        CREATE INDEX IF NOT EXISTS idx_tag_set_membership_tag_set_id
            ON tag_set_membership(tag_set_id);
        CREATE INDEX IF NOT EXISTS idx_tag_set_membership_tag_id
            ON tag_set_membership(tag_id);",
    )?;

    Ok(())
}

fn map_tagset_row(row: &Row) -> Result<TagSet, rusqlite::Error> {
    Ok(TagSet {
        id: row.get(0)?,
        host_kind: row.get(1)?,
        host_id: row.get(2)?,
    })
}
