//! Vendeur is a web API for browsing and charting monthly product sales.
//!
//! This library provides a JSON REST API over a single collection of sale
//! transactions: a paginated, searchable listing plus aggregate reports
//! (totals, price histogram, category histogram) for a selected month.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use tokio::signal;

mod app_state;
mod db;
mod endpoints;
mod logging;
mod pagination;
mod report;
mod routing;
mod seed;
mod transaction;

pub use app_state::AppState;
pub use db::initialize as initialize_db;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use pagination::PaginationConfig;
pub use routing::build_router;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The month query parameter was missing or outside 1 through 12.
    ///
    /// Reports are always scoped to a single calendar month, so handlers
    /// reject the request before running any query.
    #[error("month must be an integer between 1 and 12, got {0:?}")]
    InvalidMonth(Option<i64>),

    /// An empty or whitespace-only string was used for a required text field.
    #[error("{0} cannot be empty")]
    EmptyField(&'static str),

    /// A negative price was used to create a transaction.
    ///
    /// Prices record what an item sold for, so values below zero are not
    /// allowed.
    #[error("{0} is a negative price, which is not allowed")]
    NegativePrice(f64),

    /// A string that is not one of the known product categories.
    #[error("\"{0}\" is not a known category")]
    UnknownCategory(String),

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// The external seed dataset could not be fetched or decoded.
    ///
    /// The store is left untouched when this occurs; callers may simply
    /// retry the seeding request.
    #[error("could not fetch the seed dataset: {0}")]
    SeedFetch(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match self {
            Error::InvalidMonth(_)
            | Error::EmptyField(_)
            | Error::NegativePrice(_)
            | Error::UnknownCategory(_) => StatusCode::BAD_REQUEST,
            Error::NotFound => StatusCode::NOT_FOUND,
            Error::SeedFetch(_) | Error::SqlError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("An unexpected error occurred: {}", self);
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
