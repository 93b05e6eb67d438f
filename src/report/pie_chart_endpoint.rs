//! Defines the endpoint for the monthly category histogram.

use axum::{
    Json,
    extract::{Query, State},
};

use crate::{
    Error,
    report::{
        ReportState,
        aggregation::{CategoryCount, category_histogram},
        range::{MonthQuery, resolve_month},
    },
};

/// A route handler that reports the per-category transaction counts for the
/// requested month.
///
/// Responds with 400 if the month parameter is missing or out of range.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn get_pie_chart_endpoint(
    State(state): State<ReportState>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<Vec<CategoryCount>>, Error> {
    let range = resolve_month(query.month)?;

    let connection = state.db_connection.lock().unwrap();
    let counts = category_histogram(range, &connection)?;

    Ok(Json(counts))
}
