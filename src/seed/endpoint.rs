//! Defines the endpoint that seeds the transaction store.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
};
use rusqlite::Connection;
use serde::Serialize;

use crate::{
    AppState, Error,
    seed::dataset::{SeedTransaction, fetch_dataset},
};

/// The state needed to seed the transaction store.
#[derive(Debug, Clone)]
pub struct SeedState {
    /// The database connection holding the transaction store.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The HTTP client used to fetch the external dataset.
    pub http_client: reqwest::Client,
    /// The URL of the external dataset.
    pub seed_url: String,
}

impl FromRef<AppState> for SeedState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            http_client: state.http_client.clone(),
            seed_url: state.seed_url.clone(),
        }
    }
}

/// The response body of a successful seeding request.
#[derive(Debug, Serialize)]
pub struct SeedOutcome {
    /// A human-readable confirmation.
    pub message: String,
    /// The number of records now in the store.
    pub count: usize,
}

/// A route handler that replaces the whole transaction store with the
/// external dataset.
///
/// The dataset is fetched before the connection lock is taken, and the
/// delete and inserts run in a single SQL transaction, so concurrent
/// readers see either the old contents or the new contents, never an empty
/// store. On fetch failure the store is left untouched.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn initialize_database_endpoint(
    State(state): State<SeedState>,
) -> Result<Json<SeedOutcome>, Error> {
    let records = fetch_dataset(&state.http_client, &state.seed_url).await?;

    let mut connection = state.db_connection.lock().unwrap();
    let count = replace_transactions(&records, &mut connection)?;

    tracing::info!("Seeded the transaction store with {count} records");

    Ok(Json(SeedOutcome {
        message: "Database initialized successfully".to_owned(),
        count,
    }))
}

/// Replace the entire contents of the transaction store with `records`.
///
/// Runs as a single SQL transaction: either the store ends up holding
/// exactly `records`, or it is left unchanged.
///
/// # Errors
/// Returns [Error::SqlError] if the delete or any insert fails.
pub fn replace_transactions(
    records: &[SeedTransaction],
    connection: &mut Connection,
) -> Result<usize, Error> {
    let tx = connection.transaction()?;

    tx.execute("DELETE FROM \"transaction\"", ())?;

    {
        let mut statement = tx.prepare(
            "INSERT INTO \"transaction\" (title, description, price, date_of_sale, category, sold)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )?;

        for record in records {
            statement.execute((
                &record.title,
                &record.description,
                record.price,
                record.date_of_sale.date(),
                record.category,
                record.sold,
            ))?;
        }
    }

    tx.commit()?;

    Ok(records.len())
}
