//! The API endpoint URIs.

/// The route to list or create transactions.
pub const TRANSACTIONS: &str = "/transactions";
/// The route to seed the store from the external dataset.
pub const INITIALIZE: &str = "/transactions/initialize";
/// The route for the monthly totals report.
pub const STATISTICS: &str = "/transactions/statistics";
/// The route for the monthly price histogram.
pub const BAR_CHART: &str = "/transactions/bar-chart";
/// The route for the monthly category histogram.
pub const PIE_CHART: &str = "/transactions/pie-chart";
/// The route for all three monthly reports in one round trip.
pub const COMBINED: &str = "/transactions/combined";
