//! Database initialization for the application.

use rusqlite::{Connection, Error, Transaction as SqlTransaction};

use crate::{relation::create_relation_tables, tag::create_tag_table, tagset::create_tagset_tables};

/// Create all of the database tables for the application.
///
/// Also turns on foreign key enforcement for the connection, which SQLite
/// leaves off by default. The relation and membership tables rely on
/// cascading foreign keys to erase edges and memberships when a tag or tag
/// set is deleted.
///
/// # Errors
/// This function may return a [rusqlite::Error] if something went wrong creating the tables.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    connection.pragma_update(None, "foreign_keys", true)?;

    let transaction =
        SqlTransaction::new_unchecked(connection, rusqlite::TransactionBehavior::Exclusive)?;

    create_tag_table(&transaction)?;
    create_relation_tables(&transaction)?;
    create_tagset_tables(&transaction)?;

    transaction.commit()?;

    Ok(())
}

#[cfg(test)]
mod initialize_tests {
    use rusqlite::Connection;

    use super::initialize;

    #[test]
    fn creates_all_tables() {
        let connection = Connection::open_in_memory().unwrap();

        initialize(&connection).expect("Could not initialize database");

        let count: i64 = connection
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN
                ('tag', 'tag_inclusion', 'tag_exclusion', 'tag_set', 'tag_set_membership')",
                (),
                |row| row.get(0),
            )
            .unwrap();

        assert_eq!(count, 5);
    }

    #[test]
    fn is_idempotent() {
        let connection = Connection::open_in_memory().unwrap();

        initialize(&connection).expect("Could not initialize database");
        initialize(&connection).expect("Initializing twice should succeed");
    }
}
