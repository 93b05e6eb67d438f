//! The shared aggregation queries behind the statistics and chart endpoints.
//!
//! All report endpoints operate on the same month-derived [DateRange] and
//! call these read-only queries, so the four endpoints cannot drift apart in
//! how they filter or group transactions.

use rusqlite::Connection;
use serde::Serialize;

use crate::{Error, report::range::DateRange, transaction::Category};

/// The width of each fixed price histogram bucket.
const BUCKET_WIDTH: f64 = 100.0;

/// Prices at or above this value fall into the overflow bucket.
const OVERFLOW_THRESHOLD: f64 = 1000.0;

/// Ten fixed-width buckets plus the overflow bucket.
const BUCKET_COUNT: usize = 11;

/// The monthly sales totals.
#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    /// The sum of prices of transactions in the month.
    pub total_sales: f64,
    /// The number of transactions in the month.
    pub total_sold_items: u64,
    /// The number of transactions in the month marked as not sold.
    pub total_not_sold_items: u64,
}

/// A single bar of the price histogram.
#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBucket {
    /// The price range this bucket covers, e.g. "100-200" or "1000-above".
    pub bucket_label: String,
    /// The number of transactions whose price falls in this bucket.
    pub count: u64,
}

/// A single slice of the category histogram.
#[derive(Debug, PartialEq, Serialize)]
pub struct CategoryCount {
    /// The product category.
    pub category: Category,
    /// The number of transactions in this category.
    pub count: u64,
}

/// Sum prices and count transactions within `range`.
///
/// Returns zero-valued totals, never nulls, when no transactions match.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub fn month_statistics(range: DateRange, connection: &Connection) -> Result<Statistics, Error> {
    let (total_sales, total_sold_items) = connection.query_row(
        "SELECT COALESCE(SUM(price), 0.0), COUNT(*) FROM \"transaction\" \
         WHERE date_of_sale BETWEEN ?1 AND ?2",
        (range.start, range.end),
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;

    let total_not_sold_items = connection.query_row(
        "SELECT COUNT(*) FROM \"transaction\" \
         WHERE date_of_sale BETWEEN ?1 AND ?2 AND sold = 0",
        (range.start, range.end),
        |row| row.get(0),
    )?;

    Ok(Statistics {
        total_sales,
        total_sold_items,
        total_not_sold_items,
    })
}

/// Partition the prices of transactions within `range` into the fixed
/// buckets `[0,100), [100,200), ..., [900,1000)` plus an overflow bucket
/// for prices of 1000 and above.
///
/// All eleven buckets are always returned in ascending order, with a count
/// of zero where no price falls in the bucket.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub fn price_histogram(
    range: DateRange,
    connection: &Connection,
) -> Result<Vec<PriceBucket>, Error> {
    let mut counts = [0u64; BUCKET_COUNT];

    let mut statement = connection
        .prepare("SELECT price FROM \"transaction\" WHERE date_of_sale BETWEEN ?1 AND ?2")?;
    let prices = statement.query_map((range.start, range.end), |row| row.get::<usize, f64>(0))?;

    for price in prices {
        counts[bucket_index(price?)] += 1;
    }

    Ok(counts
        .iter()
        .enumerate()
        .map(|(index, &count)| PriceBucket {
            bucket_label: bucket_label(index),
            count,
        })
        .collect())
}

/// Count the transactions within `range` for each category present.
///
/// Categories with no transactions in the range are omitted; the result is
/// ordered by category name.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub fn category_histogram(
    range: DateRange,
    connection: &Connection,
) -> Result<Vec<CategoryCount>, Error> {
    connection
        .prepare(
            "SELECT category, COUNT(*) FROM \"transaction\" \
             WHERE date_of_sale BETWEEN ?1 AND ?2 \
             GROUP BY category \
             ORDER BY category ASC",
        )?
        .query_map((range.start, range.end), |row| {
            Ok(CategoryCount {
                category: row.get(0)?,
                count: row.get(1)?,
            })
        })?
        .map(|result| result.map_err(Error::SqlError))
        .collect()
}

fn bucket_index(price: f64) -> usize {
    if price >= OVERFLOW_THRESHOLD {
        BUCKET_COUNT - 1
    } else {
        (price / BUCKET_WIDTH) as usize
    }
}

fn bucket_label(index: usize) -> String {
    if index == BUCKET_COUNT - 1 {
        format!("{OVERFLOW_THRESHOLD}-above")
    } else {
        format!(
            "{}-{}",
            index as u64 * BUCKET_WIDTH as u64,
            (index as u64 + 1) * BUCKET_WIDTH as u64
        )
    }
}
