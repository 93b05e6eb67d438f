//! Transaction management for the sales dashboard.
//!
//! This module contains everything related to sale transactions:
//! - The `Transaction` model, `Category` enum and `TransactionBuilder`
//! - Database functions for storing and querying transactions
//! - The listing and creation endpoints

mod core;
mod create_endpoint;
mod list_endpoint;
mod query;

pub use core::{
    Category, DatabaseId, Transaction, TransactionBuilder, create_transaction,
    create_transaction_table, map_transaction_row,
};
pub use create_endpoint::create_transaction_endpoint;
pub use list_endpoint::list_transactions_endpoint;
pub use query::{TransactionListQuery, count_transactions_in_range, get_transactions_in_range};

#[cfg(test)]
pub use core::count_transactions;
