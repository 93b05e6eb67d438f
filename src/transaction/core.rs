//! Defines the core data models and database queries for transactions.

use std::{fmt::Display, str::FromStr};

use rusqlite::{
    Connection, Row,
    types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::Error;

/// A unique identifier of a row in the database.
pub type DatabaseId = i64;

// ============================================================================
// MODELS
// ============================================================================

/// The fixed set of product categories a transaction may belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    /// Consumer electronics.
    Electronics,
    /// Clothing and apparel.
    Clothing,
    /// Food and groceries.
    Food,
    /// Books and print media.
    Books,
    /// Furniture and homeware.
    Furniture,
}

impl Category {
    /// The category name as stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Electronics => "Electronics",
            Self::Clothing => "Clothing",
            Self::Food => "Food",
            Self::Books => "Books",
            Self::Furniture => "Furniture",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        match text.to_ascii_lowercase().as_str() {
            "electronics" => Ok(Self::Electronics),
            "clothing" => Ok(Self::Clothing),
            "food" => Ok(Self::Food),
            "books" => Ok(Self::Books),
            "furniture" => Ok(Self::Furniture),
            _ => Err(Error::UnknownCategory(text.to_owned())),
        }
    }
}

impl ToSql for Category {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(self.as_str().into())
    }
}

impl FromSql for Category {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error: Error| FromSqlError::Other(Box::new(error)))
    }
}

/// The record of a single product sale.
///
/// To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: DatabaseId,
    /// The name of the item that was sold.
    pub title: String,
    /// A text description of the item.
    pub description: String,
    /// What the item sold for. Never negative.
    pub price: f64,
    /// The calendar date the sale happened on.
    pub date_of_sale: Date,
    /// The product category of the item.
    pub category: Category,
    /// Whether the item actually sold. Unsold listings come from the bulk
    /// seed dataset; individually created records default to sold.
    pub sold: bool,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(
        title: &str,
        description: &str,
        price: f64,
        category: Category,
    ) -> TransactionBuilder {
        TransactionBuilder {
            title: title.to_owned(),
            description: description.to_owned(),
            price,
            date_of_sale: OffsetDateTime::now_utc().date(),
            category,
            sold: true,
        }
    }
}

/// A builder for creating [Transaction] instances.
///
/// The date of sale defaults to today (UTC) and the sold flag defaults to
/// `true`, matching how individually created records behave. Pass the
/// finished builder to [create_transaction] to validate and store it.
#[derive(Debug, PartialEq, Clone)]
pub struct TransactionBuilder {
    /// The name of the item that was sold.
    pub title: String,
    /// A text description of the item.
    pub description: String,
    /// What the item sold for.
    pub price: f64,
    /// The calendar date the sale happened on.
    pub date_of_sale: Date,
    /// The product category of the item.
    pub category: Category,
    /// Whether the item actually sold.
    pub sold: bool,
}

impl TransactionBuilder {
    /// Set the date the sale happened on.
    pub fn date_of_sale(mut self, date_of_sale: Date) -> Self {
        self.date_of_sale = date_of_sale;
        self
    }

    /// Set whether the item actually sold.
    pub fn sold(mut self, sold: bool) -> Self {
        self.sold = sold;
        self
    }

    fn validate(&self) -> Result<(), Error> {
        if self.title.trim().is_empty() {
            return Err(Error::EmptyField("title"));
        }

        if self.description.trim().is_empty() {
            return Err(Error::EmptyField("description"));
        }

        // Also rejects NaN.
        if !(self.price >= 0.0) {
            return Err(Error::NegativePrice(self.price));
        }

        Ok(())
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create a new transaction in the database from a builder.
///
/// The builder is validated against the schema invariants first: title and
/// description must be non-empty and the price must not be negative.
///
/// # Errors
/// This function will return a:
/// - [Error::EmptyField] if the title or description is blank,
/// - or [Error::NegativePrice] if the price is below zero,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_transaction(
    builder: TransactionBuilder,
    connection: &Connection,
) -> Result<Transaction, Error> {
    builder.validate()?;

    let transaction = connection
        .prepare(
            "INSERT INTO \"transaction\" (title, description, price, date_of_sale, category, sold)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             RETURNING id, title, description, price, date_of_sale, category, sold",
        )?
        .query_one(
            (
                &builder.title,
                &builder.description,
                builder.price,
                builder.date_of_sale,
                builder.category,
                builder.sold,
            ),
            map_transaction_row,
        )?;

    Ok(transaction)
}

/// Get the total number of transactions in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is some SQL error.
pub fn count_transactions(connection: &Connection) -> Result<u64, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM \"transaction\";", [], |row| {
            row.get(0)
        })
        .map_err(|error| error.into())
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                description TEXT NOT NULL,
                price REAL NOT NULL CHECK (price >= 0.0),
                date_of_sale TEXT NOT NULL,
                category TEXT NOT NULL,
                sold INTEGER NOT NULL DEFAULT 1
                )",
        (),
    )?;

    // Ensure the sequence starts at 1
    connection.execute(
        "INSERT OR IGNORE INTO sqlite_sequence (name, seq) VALUES ('transaction', 0)",
        (),
    )?;

    // Composite index used by the report and listing queries.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_date_category \
         ON \"transaction\"(date_of_sale, category);",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let title = row.get(1)?;
    let description = row.get(2)?;
    let price = row.get(3)?;
    let date_of_sale = row.get(4)?;
    let category = row.get(5)?;
    let sold = row.get(6)?;

    Ok(Transaction {
        id,
        title,
        description,
        price,
        date_of_sale,
        category,
        sold,
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod database_tests {
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        Error,
        db::initialize,
        transaction::{Category, Transaction, count_transactions, create_transaction},
    };

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    #[test]
    fn create_succeeds() {
        let conn = get_test_connection();
        let price = 329.99;

        let result = create_transaction(
            Transaction::build("Laptop", "A refurbished ultrabook", price, Category::Electronics)
                .date_of_sale(date!(2024 - 03 - 15)),
            &conn,
        );

        match result {
            Ok(transaction) => {
                assert_eq!(transaction.id, 1);
                assert_eq!(transaction.price, price);
                assert_eq!(transaction.category, Category::Electronics);
                assert_eq!(transaction.date_of_sale, date!(2024 - 03 - 15));
                assert!(transaction.sold);
            }
            Err(error) => panic!("Unexpected error: {error}"),
        }
    }

    #[test]
    fn create_fails_on_empty_title() {
        let conn = get_test_connection();

        let result = create_transaction(
            Transaction::build("  ", "description", 1.0, Category::Books),
            &conn,
        );

        assert_eq!(result, Err(Error::EmptyField("title")));
    }

    #[test]
    fn create_fails_on_empty_description() {
        let conn = get_test_connection();

        let result =
            create_transaction(Transaction::build("title", "", 1.0, Category::Books), &conn);

        assert_eq!(result, Err(Error::EmptyField("description")));
    }

    #[test]
    fn create_fails_on_negative_price() {
        let conn = get_test_connection();

        let result = create_transaction(
            Transaction::build("title", "description", -0.01, Category::Books),
            &conn,
        );

        assert_eq!(result, Err(Error::NegativePrice(-0.01)));
    }

    #[test]
    fn create_keeps_unsold_flag() {
        let conn = get_test_connection();

        let transaction = create_transaction(
            Transaction::build("Bookshelf", "Oak, five shelves", 120.0, Category::Furniture)
                .sold(false),
            &conn,
        )
        .unwrap();

        assert!(!transaction.sold);
    }

    #[test]
    fn count_transactions_counts_all_rows() {
        let conn = get_test_connection();

        for i in 0..3 {
            create_transaction(
                Transaction::build(&format!("item #{i}"), "description", i as f64, Category::Food),
                &conn,
            )
            .unwrap();
        }

        assert_eq!(count_transactions(&conn).unwrap(), 3);
    }
}

#[cfg(test)]
mod category_tests {
    use crate::{Error, transaction::Category};

    #[test]
    fn parses_ignoring_case() {
        assert_eq!("electronics".parse::<Category>().unwrap(), Category::Electronics);
        assert_eq!("Furniture".parse::<Category>().unwrap(), Category::Furniture);
    }

    #[test]
    fn rejects_unknown_category() {
        let result = "Gadgets".parse::<Category>();

        assert_eq!(result, Err(Error::UnknownCategory("Gadgets".to_owned())));
    }
}
