//! Defines the endpoint for creating a new transaction.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    http::StatusCode,
};
use rusqlite::Connection;
use serde::Deserialize;
use time::Date;

use crate::{
    AppState, Error,
    transaction::{Category, Transaction, core::create_transaction},
};

/// The state needed to create a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The JSON body for creating a transaction.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransactionBody {
    /// The name of the item that was sold.
    pub title: String,
    /// A text description of the item.
    pub description: String,
    /// What the item sold for.
    pub price: f64,
    /// The date the sale happened. Defaults to today (UTC) when omitted.
    #[serde(default)]
    pub date_of_sale: Option<Date>,
    /// The product category of the item.
    pub category: Category,
    /// Whether the item actually sold. Defaults to true.
    #[serde(default)]
    pub sold: Option<bool>,
}

/// A route handler for creating a new transaction, responds with the stored
/// record and its assigned ID on success.
///
/// Responds with 400 if the body fails schema validation (blank title or
/// description, negative price).
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    Json(body): Json<NewTransactionBody>,
) -> Result<(StatusCode, Json<Transaction>), Error> {
    let mut builder = Transaction::build(&body.title, &body.description, body.price, body.category);

    if let Some(date_of_sale) = body.date_of_sale {
        builder = builder.date_of_sale(date_of_sale);
    }

    if let Some(sold) = body.sold {
        builder = builder.sold(sold);
    }

    let connection = state.db_connection.lock().unwrap();
    let transaction = create_transaction(builder, &connection)?;

    Ok((StatusCode::CREATED, Json(transaction)))
}
