//! Implements a struct that holds the state of the server.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

/// The state of the server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The database connection.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    pub fn new(db_connection: Connection) -> Self {
        Self {
            db_connection: Arc::new(Mutex::new(db_connection)),
        }
    }
}
