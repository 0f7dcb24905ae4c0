//! Catalog entities as seen by the gateway.
//!
//! These are read-only snapshots fetched per request. The gateway never
//! caches or mutates them.

use serde::{Deserialize, Serialize};

use super::id::{ProductId, VariantId};
use super::price::Price;
use super::status::StockStatus;

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// URL-safe identifier, the last path segment of the permalink.
    pub slug: String,
    pub price: Option<Price>,
    pub stock_status: StockStatus,
    pub permalink: String,
}

/// A named attribute value on a variant (e.g. `Taglia` = `44`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantAttribute {
    pub name: String,
    pub option: String,
}

impl VariantAttribute {
    /// Create a new attribute.
    pub fn new(name: impl Into<String>, option: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            option: option.into(),
        }
    }
}

/// A purchasable configuration of a product, carrying its own stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    pub id: VariantId,
    pub sku: String,
    pub name: String,
    /// Attributes in the order the catalog returned them.
    pub attributes: Vec<VariantAttribute>,
    /// `None` when the catalog does not track quantity for this variant.
    pub stock_quantity: Option<i64>,
    pub stock_status: StockStatus,
}

/// Compact product entry returned to the shopper in search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub id: ProductId,
    pub name: String,
    pub price: Option<Price>,
    pub stock: StockStatus,
    pub url: String,
}

impl From<&Product> for ProductSummary {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            price: product.price,
            stock: product.stock_status,
            url: product.permalink.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_summary_from_product() {
        let product = Product {
            id: ProductId::new(7),
            name: "Sneaker Runner".to_string(),
            slug: "sneaker-runner".to_string(),
            price: Some("89.00".parse().expect("price")),
            stock_status: StockStatus::InStock,
            permalink: "https://shop.example/prodotto/sneaker-runner/".to_string(),
        };

        let summary = ProductSummary::from(&product);
        let json = serde_json::to_value(&summary).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({
                "id": 7,
                "name": "Sneaker Runner",
                "price": "89.00",
                "stock": "instock",
                "url": "https://shop.example/prodotto/sneaker-runner/"
            })
        );
    }
}
