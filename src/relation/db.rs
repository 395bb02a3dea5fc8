//! Database operations for the inclusion and exclusion relations.
//!
//! These are pure edge primitives: they deduplicate edges and keep exclusion
//! storage symmetric, but perform no invariant checking. Acyclicity and the
//! coherence rules between the two relations are enforced by the functions
//! in [crate::relation::engine].

use rusqlite::Connection;

use crate::{
    Error,
    tag::{Tag, TagId, db::map_row},
};

/// Add the inclusion edge `supertag INCLUDES subtag`.
///
/// Adding an edge that already exists is a no-op.
pub fn add_inclusion_edge(
    supertag_id: TagId,
    subtag_id: TagId,
    connection: &Connection,
) -> Result<(), Error> {
    connection.execute(
        "INSERT OR IGNORE INTO tag_inclusion (supertag_id, subtag_id) VALUES (?1, ?2)",
        (supertag_id, subtag_id),
    )?;

    Ok(())
}

/// Remove the inclusion edge `supertag INCLUDES subtag`, if present.
pub fn remove_inclusion_edge(
    supertag_id: TagId,
    subtag_id: TagId,
    connection: &Connection,
) -> Result<(), Error> {
    connection.execute(
        "DELETE FROM tag_inclusion WHERE supertag_id = ?1 AND subtag_id = ?2",
        (supertag_id, subtag_id),
    )?;

    Ok(())
}

/// Add the symmetric exclusion edge between two tags.
///
/// The edge is stored once, normalized to `(min, max)`, so adding it from
/// either side results in the same single row.
pub fn add_exclusion_edge(a: TagId, b: TagId, connection: &Connection) -> Result<(), Error> {
    let (first, second) = ordered_pair(a, b);

    connection.execute(
        "INSERT OR IGNORE INTO tag_exclusion (first_tag_id, second_tag_id) VALUES (?1, ?2)",
        (first, second),
    )?;

    Ok(())
}

/// Remove the symmetric exclusion edge between two tags, if present.
pub fn remove_exclusion_edge(a: TagId, b: TagId, connection: &Connection) -> Result<(), Error> {
    let (first, second) = ordered_pair(a, b);

    connection.execute(
        "DELETE FROM tag_exclusion WHERE first_tag_id = ?1 AND second_tag_id = ?2",
        (first, second),
    )?;

    Ok(())
}

/// Whether the symmetric exclusion edge between two tags exists.
pub fn are_excluding(a: TagId, b: TagId, connection: &Connection) -> Result<bool, Error> {
    let (first, second) = ordered_pair(a, b);

    let exists = connection.query_row(
        "SELECT EXISTS(
            SELECT 1 FROM tag_exclusion WHERE first_tag_id = ?1 AND second_tag_id = ?2
        )",
        (first, second),
        |row| row.get(0),
    )?;

    Ok(exists)
}

/// Get the tags directly included by the given tag, ordered by name.
pub fn get_direct_subtags(tag_id: TagId, connection: &Connection) -> Result<Vec<Tag>, Error> {
    connection
        .prepare(
            "SELECT t.id, t.name, t.color
             FROM tag t
             INNER JOIN tag_inclusion i ON t.id = i.subtag_id
             WHERE i.supertag_id = ?1
             ORDER BY t.name",
        )?
        .query_map([tag_id], map_row)?
        .map(|maybe_tag| maybe_tag.map_err(Error::SqlError))
        .collect()
}

/// Get the tags directly including the given tag, ordered by name.
pub fn get_direct_supertags(tag_id: TagId, connection: &Connection) -> Result<Vec<Tag>, Error> {
    connection
        .prepare(
            "SELECT t.id, t.name, t.color
             FROM tag t
             INNER JOIN tag_inclusion i ON t.id = i.supertag_id
             WHERE i.subtag_id = ?1
             ORDER BY t.name",
        )?
        .query_map([tag_id], map_row)?
        .map(|maybe_tag| maybe_tag.map_err(Error::SqlError))
        .collect()
}

/// Get the tags excluded by (and hence, excluding) the given tag, ordered by
/// name.
pub fn get_direct_exclusions(tag_id: TagId, connection: &Connection) -> Result<Vec<Tag>, Error> {
    connection
        .prepare(
            "SELECT t.id, t.name, t.color
             FROM tag t
             INNER JOIN tag_exclusion e
                ON (t.id = e.first_tag_id AND e.second_tag_id = ?1)
                OR (t.id = e.second_tag_id AND e.first_tag_id = ?1)
             ORDER BY t.name",
        )?
        .query_map([tag_id], map_row)?
        .map(|maybe_tag| maybe_tag.map_err(Error::SqlError))
        .collect()
}

/// Initialize the relation tables and indexes.
pub fn create_relation_tables(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS tag_inclusion (
            id INTEGER PRIMARY KEY,
            supertag_id INTEGER NOT NULL,
            subtag_id INTEGER NOT NULL,
            FOREIGN KEY(supertag_id) REFERENCES tag(id) ON UPDATE CASCADE ON DELETE CASCADE,
            FOREIGN KEY(subtag_id) REFERENCES tag(id) ON UPDATE CASCADE ON DELETE CASCADE,
            UNIQUE(supertag_id, subtag_id)
        );

        CREATE INDEX IF NOT EXISTS idx_tag_inclusion_supertag_id ON tag_inclusion(supertag_id);
        CREATE INDEX IF NOT EXISTS idx_tag_inclusion_subtag_id ON tag_inclusion(subtag_id);

        CREATE TABLE IF NOT EXISTS tag_exclusion (
            id INTEGER PRIMARY KEY,
            first_tag_id INTEGER NOT NULL,
            second_tag_id INTEGER NOT NULL,
            FOREIGN KEY(first_tag_id) REFERENCES tag(id) ON UPDATE CASCADE ON DELETE CASCADE,
            FOREIGN KEY(second_tag_id) REFERENCES tag(id) ON UPDATE CASCADE ON DELETE CASCADE,
            UNIQUE(first_tag_id, second_tag_id),
            CHECK(first_tag_id < second_tag_id)
        );

        CREATE INDEX IF NOT EXISTS idx_tag_exclusion_first_tag_id ON tag_exclusion(first_tag_id);
        CREATE INDEX IF NOT EXISTS idx_tag_exclusion_second_tag_id ON tag_exclusion(second_tag_id);",
    )?;

    Ok(())
}

fn ordered_pair(a: TagId, b: TagId) -> (TagId, TagId) {
    if a <= b { (a, b) } else { (b, a) }
}

#[cfg(test)]
mod relation_edge_tests {
    use rusqlite::Connection;

    use crate::tag::{Tag, TagColor, TagName, create_tag, create_tag_table};

    use super::{
        add_exclusion_edge, add_inclusion_edge, are_excluding, create_relation_tables,
        get_direct_exclusions, get_direct_subtags, get_direct_supertags, remove_exclusion_edge,
        remove_inclusion_edge,
    };

    fn get_test_db_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        create_tag_table(&connection).expect("Could not create tag table");
        create_relation_tables(&connection).expect("Could not create relation tables");
        connection
    }

    fn create_test_tag(name: &str, connection: &Connection) -> Tag {
        create_tag(
            TagName::new_unchecked(name),
            TagColor::default(),
            connection,
        )
        .expect("Could not create test tag")
    }

    #[test]
    fn inclusion_edge_round_trip() {
        let connection = get_test_db_connection();
        let supertag = create_test_tag("Programming", &connection);
        let subtag = create_test_tag("Python", &connection);

        add_inclusion_edge(supertag.id, subtag.id, &connection)
            .expect("Could not add inclusion edge");

        assert_eq!(
            get_direct_subtags(supertag.id, &connection),
            Ok(vec![subtag.clone()])
        );
        assert_eq!(
            get_direct_supertags(subtag.id, &connection),
            Ok(vec![supertag.clone()])
        );

        remove_inclusion_edge(supertag.id, subtag.id, &connection)
            .expect("Could not remove inclusion edge");

        assert_eq!(get_direct_subtags(supertag.id, &connection), Ok(vec![]));
        assert_eq!(get_direct_supertags(subtag.id, &connection), Ok(vec![]));
    }

    #[test]
    fn duplicate_inclusion_edge_is_stored_once() {
        let connection = get_test_db_connection();
        let supertag = create_test_tag("Programming", &connection);
        let subtag = create_test_tag("Python", &connection);

        add_inclusion_edge(supertag.id, subtag.id, &connection)
            .expect("Could not add inclusion edge");
        add_inclusion_edge(supertag.id, subtag.id, &connection)
            .expect("Could not re-add inclusion edge");

        let subtags = get_direct_subtags(supertag.id, &connection).unwrap();
        assert_eq!(subtags.len(), 1);
    }

    #[test]
    fn exclusion_edge_is_symmetric() {
        let connection = get_test_db_connection();
        let first = create_test_tag("Fire", &connection);
        let second = create_test_tag("Water", &connection);

        add_exclusion_edge(second.id, first.id, &connection)
            .expect("Could not add exclusion edge");

        assert_eq!(are_excluding(first.id, second.id, &connection), Ok(true));
        assert_eq!(are_excluding(second.id, first.id, &connection), Ok(true));
        assert_eq!(
            get_direct_exclusions(first.id, &connection),
            Ok(vec![second.clone()])
        );
        assert_eq!(
            get_direct_exclusions(second.id, &connection),
            Ok(vec![first.clone()])
        );
    }

    #[test]
    fn exclusion_edge_added_from_both_sides_is_stored_once() {
        let connection = get_test_db_connection();
        let first = create_test_tag("Fire", &connection);
        let second = create_test_tag("Water", &connection);

        add_exclusion_edge(first.id, second.id, &connection)
            .expect("Could not add exclusion edge");
        add_exclusion_edge(second.id, first.id, &connection)
            .expect("Could not re-add exclusion edge");

        let exclusions = get_direct_exclusions(first.id, &connection).unwrap();
        assert_eq!(exclusions.len(), 1);
    }

    #[test]
    fn remove_exclusion_edge_works_from_either_side() {
        let connection = get_test_db_connection();
        let first = create_test_tag("Fire", &connection);
        let second = create_test_tag("Water", &connection);

        add_exclusion_edge(first.id, second.id, &connection)
            .expect("Could not add exclusion edge");
        remove_exclusion_edge(second.id, first.id, &connection)
            .expect("Could not remove exclusion edge");

        assert_eq!(are_excluding(first.id, second.id, &connection), Ok(false));
    }

    #[test]
    fn exclusion_does_not_leak_to_third_tags() {
        let connection = get_test_db_connection();
        let first = create_test_tag("Fire", &connection);
        let second = create_test_tag("Water", &connection);
        let third = create_test_tag("Earth", &connection);

        add_exclusion_edge(first.id, second.id, &connection)
            .expect("Could not add exclusion edge");
        add_exclusion_edge(first.id, third.id, &connection)
            .expect("Could not add exclusion edge");

        assert_eq!(are_excluding(second.id, third.id, &connection), Ok(false));
    }
}
