//! Defines the endpoint for the monthly totals report.

use axum::{
    Json,
    extract::{Query, State},
};

use crate::{
    Error,
    report::{
        ReportState,
        aggregation::{Statistics, month_statistics},
        range::{MonthQuery, resolve_month},
    },
};

/// A route handler that reports the sales totals for the requested month.
///
/// Responds with 400 if the month parameter is missing or out of range.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn get_statistics_endpoint(
    State(state): State<ReportState>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<Statistics>, Error> {
    let range = resolve_month(query.month)?;

    let connection = state.db_connection.lock().unwrap();
    let statistics = month_statistics(range, &connection)?;

    Ok(Json(statistics))
}
