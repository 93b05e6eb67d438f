//! The reporting query layer for the sales dashboard.
//!
//! This module contains the month-to-date-range resolver, the aggregation
//! queries shared by every report, and the statistics, bar-chart, pie-chart
//! and combined endpoints built on top of them.

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use rusqlite::Connection;

use crate::AppState;

mod aggregation;
mod bar_chart_endpoint;
mod combined_endpoint;
mod pie_chart_endpoint;
pub mod range;
mod statistics_endpoint;

pub use aggregation::{
    CategoryCount, PriceBucket, Statistics, category_histogram, month_statistics, price_histogram,
};
pub use bar_chart_endpoint::get_bar_chart_endpoint;
pub use combined_endpoint::get_combined_endpoint;
pub use pie_chart_endpoint::get_pie_chart_endpoint;
pub use range::{DateRange, MonthQuery, resolve_month};
pub use statistics_endpoint::get_statistics_endpoint;

/// The state needed by the report endpoints.
#[derive(Debug, Clone)]
pub struct ReportState {
    /// The database connection for running the aggregation queries.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ReportState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}
