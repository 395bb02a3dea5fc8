//! Database operations for tags.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    tag::{Tag, TagColor, TagId, TagName},
};

/// Create a tag and return it with its generated ID.
///
/// # Errors
///
/// This function will return an [Error::DuplicateTagName] if a tag with the
/// same name already exists, or [Error::SqlError] if there is some other SQL
/// error.
pub fn create_tag(name: TagName, color: TagColor, connection: &Connection) -> Result<Tag, Error> {
    connection.execute(
        "INSERT INTO tag (name, color) VALUES (?1, ?2);",
        (name.as_ref(), color.as_ref()),
    )?;

    let id = connection.last_insert_rowid();

    Ok(Tag { id, name, color })
}

/// Retrieve a single tag by ID.
pub fn get_tag(tag_id: TagId, connection: &Connection) -> Result<Tag, Error> {
    connection
        .prepare("SELECT id, name, color FROM tag WHERE id = :id;")?
        .query_row(&[(":id", &tag_id)], map_row)
        .map_err(|error| error.into())
}

/// Retrieve a single tag by its unique name.
pub fn get_tag_by_name(name: &TagName, connection: &Connection) -> Result<Tag, Error> {
    connection
        .prepare("SELECT id, name, color FROM tag WHERE name = :name;")?
        .query_row(&[(":name", &name.as_ref())], map_row)
        .map_err(|error| error.into())
}

/// Retrieve all tags ordered alphabetically by name.
pub fn get_all_tags(connection: &Connection) -> Result<Vec<Tag>, Error> {
    connection
        .prepare("SELECT id, name, color FROM tag ORDER BY name ASC;")?
        .query_map([], map_row)?
        .map(|maybe_tag| maybe_tag.map_err(|error| error.into()))
        .collect()
}

/// Update a tag's name and color. Returns an error if the tag doesn't exist.
pub fn update_tag(
    tag_id: TagId,
    new_name: TagName,
    new_color: TagColor,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE tag SET name = ?1, color = ?2 WHERE id = ?3",
        (new_name.as_ref(), new_color.as_ref(), tag_id),
    )?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingTag);
    }

    Ok(())
}

/// Delete a tag by ID. Returns an error if the tag doesn't exist.
///
/// Inclusion and exclusion edges incident to the tag and its tag set
/// memberships are removed by the cascading foreign keys.
pub fn delete_tag(tag_id: TagId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM tag WHERE id = ?1", [tag_id])?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingTag);
    }

    Ok(())
}

/// Initialize the tag table and indexes.
pub fn create_tag_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS tag (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            color TEXT NOT NULL DEFAULT 'd0d0d0'
        );

        CREATE INDEX IF NOT EXISTS idx_tag_name ON tag(name);",
    )?;

    Ok(())
}

pub(crate) fn map_row(row: &Row) -> Result<Tag, rusqlite::Error> {
    let id = row.get(0)?;
    let raw_name: String = row.get(1)?;
    let raw_color: String = row.get(2)?;

    Ok(Tag {
        id,
        name: TagName::new_unchecked(&raw_name),
        color: TagColor::new_unchecked(&raw_color),
    })
}

#[cfg(test)]
mod tag_name_tests {
    use crate::{
        Error,
        tag::{MAX_TAG_NAME_LENGTH, TagName},
    };

    #[test]
    fn new_fails_on_empty_string() {
        let tag_name = TagName::new("");

        assert_eq!(tag_name, Err(Error::EmptyTagName));
    }

    #[test]
    fn new_fails_on_just_whitespace() {
        let tag_name = TagName::new("\n\t \r");

        assert_eq!(tag_name, Err(Error::EmptyTagName));
    }

    #[test]
    fn new_fails_on_overlong_name() {
        let tag_name = TagName::new(&"x".repeat(MAX_TAG_NAME_LENGTH + 1));

        assert_eq!(tag_name, Err(Error::TagNameTooLong));
    }

    #[test]
    fn new_trims_surrounding_whitespace() {
        let tag_name = TagName::new("  Programming \n").unwrap();

        assert_eq!(tag_name.as_ref(), "Programming");
    }

    #[test]
    fn new_succeeds_on_non_empty_string() {
        let tag_name = TagName::new("🔥");

        assert!(tag_name.is_ok())
    }
}
