//! Defines the endpoint that serves all three monthly reports in one call.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Serialize;

use crate::{
    Error,
    report::{
        ReportState,
        aggregation::{
            CategoryCount, PriceBucket, Statistics, category_histogram, month_statistics,
            price_histogram,
        },
        range::{MonthQuery, resolve_month},
    },
};

/// All three monthly reports for clients that want a single round trip.
#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedReport {
    /// The monthly sales totals.
    pub statistics: Statistics,
    /// The price histogram.
    pub bar_chart_data: Vec<PriceBucket>,
    /// The category histogram.
    pub pie_chart_data: Vec<CategoryCount>,
}

/// A route handler that reports the totals, price histogram and category
/// histogram for the requested month in one response.
///
/// The date range is resolved once and shared by all three queries, which
/// run back to back while holding the connection lock.
/// Responds with 400 if the month parameter is missing or out of range.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn get_combined_endpoint(
    State(state): State<ReportState>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<CombinedReport>, Error> {
    let range = resolve_month(query.month)?;

    let connection = state.db_connection.lock().unwrap();
    let report = CombinedReport {
        statistics: month_statistics(range, &connection)?,
        bar_chart_data: price_histogram(range, &connection)?,
        pie_chart_data: category_histogram(range, &connection)?,
    };

    Ok(Json(report))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::{Query, State};
    use rusqlite::Connection;
    use time::OffsetDateTime;

    use crate::{
        Error,
        db::initialize,
        report::{ReportState, range::MonthQuery},
        transaction::{Category, Transaction, create_transaction},
    };

    use super::get_combined_endpoint;

    fn test_state() -> ReportState {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        ReportState {
            db_connection: Arc::new(Mutex::new(conn)),
        }
    }

    #[tokio::test]
    async fn all_reports_cover_the_same_range() {
        let state = test_state();
        let today = OffsetDateTime::now_utc().date();
        {
            let connection = state.db_connection.lock().unwrap();
            create_transaction(
                Transaction::build("Desk", "Standing desk", 450.0, Category::Furniture)
                    .date_of_sale(today),
                &connection,
            )
            .unwrap();
        }

        let query = MonthQuery {
            month: Some(today.month() as i64),
        };
        let response = get_combined_endpoint(State(state), Query(query))
            .await
            .unwrap();

        let report = response.0;
        assert_eq!(report.statistics.total_sold_items, 1);

        let histogram_total: u64 = report.bar_chart_data.iter().map(|bucket| bucket.count).sum();
        assert_eq!(histogram_total, 1);

        let category_total: u64 = report.pie_chart_data.iter().map(|entry| entry.count).sum();
        assert_eq!(category_total, 1);
    }

    #[tokio::test]
    async fn rejects_invalid_month_before_querying() {
        let state = test_state();

        let query = MonthQuery { month: Some(-1) };
        let result = get_combined_endpoint(State(state), Query(query)).await;

        assert_eq!(result.unwrap_err(), Error::InvalidMonth(Some(-1)));
    }
}
