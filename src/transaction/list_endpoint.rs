//! Defines the endpoint for listing a page of transactions.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Query, State},
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    pagination::{PaginationConfig, resolve_page_bounds},
    report::resolve_month,
    transaction::{
        Transaction,
        query::{TransactionListQuery, count_transactions_in_range, get_transactions_in_range},
    },
};

/// The state needed to list transactions.
#[derive(Debug, Clone)]
pub struct ListTransactionsState {
    /// The database connection for querying transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The config that controls how to display pages of data.
    pub pagination_config: PaginationConfig,
}

impl FromRef<AppState> for ListTransactionsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            pagination_config: state.pagination_config.clone(),
        }
    }
}

/// The query string for the listing endpoint.
#[derive(Debug, Deserialize)]
pub struct TransactionsQuery {
    /// The calendar month to list, 1 through 12.
    pub month: Option<i64>,
    /// Optional text to match against title, description or price.
    pub search: Option<String>,
    /// The page number, starting at 1.
    pub page: Option<u64>,
    /// The number of transactions per page.
    #[serde(rename = "perPage")]
    pub per_page: Option<u64>,
}

/// One page of transactions plus the total count for pagination.
#[derive(Debug, Serialize)]
pub struct TransactionPage {
    /// The number of transactions matching the filter across all pages.
    pub total: u64,
    /// The transactions on the requested page.
    pub transactions: Vec<Transaction>,
}

/// A route handler for listing a page of the requested month's transactions,
/// optionally filtered by a search term.
///
/// Responds with 400 if the month parameter is missing or out of range.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn list_transactions_endpoint(
    State(state): State<ListTransactionsState>,
    Query(query): Query<TransactionsQuery>,
) -> Result<Json<TransactionPage>, Error> {
    let range = resolve_month(query.month)?;
    let bounds = resolve_page_bounds(query.page, query.per_page, &state.pagination_config);

    let list_query = TransactionListQuery {
        range,
        search: query.search,
        bounds,
    };

    let connection = state.db_connection.lock().unwrap();
    let total = count_transactions_in_range(&list_query, &connection)?;
    let transactions = get_transactions_in_range(&list_query, &connection)?;

    Ok(Json(TransactionPage {
        total,
        transactions,
    }))
}
