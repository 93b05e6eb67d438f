//! Fetching and decoding of the external seed dataset.

use serde::Deserialize;
use time::OffsetDateTime;

use crate::{Error, transaction::Category};

/// One record of the external seed dataset.
///
/// The dataset carries full RFC 3339 date-times; only the calendar date is
/// kept since every query buckets by day or month. Fields this application
/// does not store, such as the product image URL, are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedTransaction {
    /// The name of the item.
    pub title: String,
    /// A text description of the item.
    pub description: String,
    /// What the item is listed for.
    pub price: f64,
    /// The product category of the item.
    pub category: Category,
    /// Whether the item sold.
    pub sold: bool,
    /// When the sale happened.
    #[serde(with = "time::serde::rfc3339")]
    pub date_of_sale: OffsetDateTime,
}

/// Fetch and decode the seed dataset from `url`.
///
/// # Errors
/// Returns [Error::SeedFetch] if the request fails, the server responds
/// with an error status, or the payload cannot be decoded.
pub async fn fetch_dataset(
    client: &reqwest::Client,
    url: &str,
) -> Result<Vec<SeedTransaction>, Error> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|error| Error::SeedFetch(error.to_string()))?
        .error_for_status()
        .map_err(|error| Error::SeedFetch(error.to_string()))?;

    response
        .json()
        .await
        .map_err(|error| Error::SeedFetch(error.to_string()))
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use crate::transaction::Category;

    use super::SeedTransaction;

    #[test]
    fn decodes_dataset_record() {
        let json = r#"{
            "id": 42,
            "title": "Wooden Chair",
            "price": 329.49,
            "description": "Solid oak dining chair",
            "category": "Furniture",
            "image": "https://example.com/chair.jpg",
            "sold": false,
            "dateOfSale": "2024-03-15T20:29:54+05:30"
        }"#;

        let record: SeedTransaction = serde_json::from_str(json).unwrap();

        assert_eq!(record.title, "Wooden Chair");
        assert_eq!(record.price, 329.49);
        assert_eq!(record.category, Category::Furniture);
        assert!(!record.sold);
        assert_eq!(
            record.date_of_sale,
            datetime!(2024 - 03 - 15 20:29:54 +05:30)
        );
    }

    #[test]
    fn rejects_unknown_category() {
        let json = r#"{
            "title": "Widget",
            "price": 1.0,
            "description": "A widget",
            "category": "Gadgets",
            "sold": true,
            "dateOfSale": "2024-03-15T20:29:54Z"
        }"#;

        let result = serde_json::from_str::<SeedTransaction>(json);

        assert!(result.is_err());
    }
}
