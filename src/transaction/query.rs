//! Database query helpers for the transaction listing endpoint.

use rusqlite::{Connection, named_params};

use crate::{
    Error,
    pagination::PageBounds,
    report::DateRange,
    transaction::{Transaction, map_transaction_row},
};

/// Defines how a page of transactions should be fetched.
#[derive(Debug, Clone)]
pub struct TransactionListQuery {
    /// Include transactions whose date of sale falls within this range
    /// (inclusive).
    pub range: DateRange,
    /// When set, include only transactions whose title or description
    /// contains this text (case-insensitive), or whose price rendered as
    /// text contains it.
    pub search: Option<String>,
    /// The row window selected by the page request.
    pub bounds: PageBounds,
}

/// Get one page of in-range transactions.
///
/// Results are ordered by date of sale, then by ID to keep the order stable
/// across pages.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub fn get_transactions_in_range(
    query: &TransactionListQuery,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    let pattern = query.search.as_ref().map(|term| format!("%{term}%"));

    connection
        .prepare(
            "SELECT id, title, description, price, date_of_sale, category, sold \
             FROM \"transaction\" \
             WHERE date_of_sale BETWEEN :start AND :end \
               AND (:pattern IS NULL \
                    OR title LIKE :pattern \
                    OR description LIKE :pattern \
                    OR CAST(price AS TEXT) LIKE :pattern) \
             ORDER BY date_of_sale ASC, id ASC \
             LIMIT :limit OFFSET :offset",
        )?
        .query_map(
            named_params! {
                ":start": query.range.start,
                ":end": query.range.end,
                ":pattern": pattern,
                ":limit": query.bounds.limit,
                ":offset": query.bounds.offset,
            },
            map_transaction_row,
        )?
        .map(|result| result.map_err(Error::SqlError))
        .collect()
}

/// Count all transactions matching the range and search filter of `query`,
/// ignoring its page bounds.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub fn count_transactions_in_range(
    query: &TransactionListQuery,
    connection: &Connection,
) -> Result<u64, Error> {
    let pattern = query.search.as_ref().map(|term| format!("%{term}%"));

    connection
        .query_row(
            "SELECT COUNT(*) FROM \"transaction\" \
             WHERE date_of_sale BETWEEN :start AND :end \
               AND (:pattern IS NULL \
                    OR title LIKE :pattern \
                    OR description LIKE :pattern \
                    OR CAST(price AS TEXT) LIKE :pattern)",
            named_params! {
                ":start": query.range.start,
                ":end": query.range.end,
                ":pattern": pattern,
            },
            |row| row.get(0),
        )
        .map_err(|error| error.into())
}
