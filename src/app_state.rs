//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{Error, db::initialize, pagination::PaginationConfig};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The database connection.
    pub db_connection: Arc<Mutex<Connection>>,

    /// The HTTP client used to fetch the external seed dataset.
    pub http_client: reqwest::Client,

    /// The URL of the external seed dataset.
    pub seed_url: String,

    /// The config that controls how to display pages of data.
    pub pagination_config: PaginationConfig,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the table for
    /// the transaction model.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(
        db_connection: Connection,
        seed_url: &str,
        pagination_config: PaginationConfig,
    ) -> Result<Self, Error> {
        initialize(&db_connection)?;

        Ok(Self {
            db_connection: Arc::new(Mutex::new(db_connection)),
            http_client: reqwest::Client::new(),
            seed_url: seed_url.to_owned(),
            pagination_config,
        })
    }
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use crate::pagination::PaginationConfig;

    use super::AppState;

    #[test]
    fn new_initializes_the_database() {
        let conn = Connection::open_in_memory().unwrap();

        let state = AppState::new(conn, "http://localhost/dataset.json", PaginationConfig::default())
            .unwrap();

        let connection = state.db_connection.lock().unwrap();
        let count: i64 = connection
            .query_row("SELECT COUNT(*) FROM \"transaction\"", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }
}
