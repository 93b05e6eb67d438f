//! One-time bulk seeding of the transaction store from an external dataset.

mod dataset;
mod endpoint;

pub use dataset::{SeedTransaction, fetch_dataset};
pub use endpoint::{initialize_database_endpoint, replace_transactions};
