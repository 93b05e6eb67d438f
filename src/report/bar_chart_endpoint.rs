//! Defines the endpoint for the monthly price histogram.

use axum::{
    Json,
    extract::{Query, State},
};

use crate::{
    Error,
    report::{
        ReportState,
        aggregation::{PriceBucket, price_histogram},
        range::{MonthQuery, resolve_month},
    },
};

/// A route handler that reports the price histogram for the requested month.
///
/// The response always carries all eleven buckets in ascending order.
/// Responds with 400 if the month parameter is missing or out of range.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn get_bar_chart_endpoint(
    State(state): State<ReportState>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<Vec<PriceBucket>>, Error> {
    let range = resolve_month(query.month)?;

    let connection = state.db_connection.lock().unwrap();
    let buckets = price_histogram(range, &connection)?;

    Ok(Json(buckets))
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

    use super::get_bar_chart_endpoint;

    fn test_state() -> ReportState {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        ReportState {
            db_connection: Arc::new(Mutex::new(conn)),
        }
    }

    #[tokio::test]
    async fn returns_all_buckets_with_counts() {
        let state = test_state();
        let today = OffsetDateTime::now_utc().date();
        {
            let connection = state.db_connection.lock().unwrap();
            create_transaction(
                Transaction::build("Novel", "Hardcover", 150.0, Category::Books)
                    .date_of_sale(today),
                &connection,
            )
            .unwrap();
        }

        let query = MonthQuery {
            month: Some(today.month() as i64),
        };
        let response = get_bar_chart_endpoint(State(state), Query(query))
            .await
            .unwrap();

        assert_eq!(response.0.len(), 11);
        let in_bucket = response
            .0
            .iter()
            .find(|bucket| bucket.bucket_label == "100-200")
            .unwrap();
        assert_eq!(in_bucket.count, 1);
    }

    #[tokio::test]
    async fn rejects_invalid_month_before_querying() {
        let state = test_state();

        let query = MonthQuery { month: Some(0) };
        let result = get_bar_chart_endpoint(State(state), Query(query)).await;

        assert_eq!(result.unwrap_err(), Error::InvalidMonth(Some(0)));
    }
}
