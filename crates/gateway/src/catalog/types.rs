//! Catalog wire types and their conversion into core entities.

use serde::Deserialize;
use shop_assistant_core::{
    Price, Product, ProductId, StockStatus, Variant, VariantAttribute, VariantId,
};

/// Product as returned by `GET products`.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogProduct {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
    /// Decimal string, empty for products without a price.
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub stock_status: StockStatus,
    #[serde(default)]
    pub permalink: String,
}

/// Variation as returned by `GET products/{id}/variations`.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogVariation {
    pub id: u64,
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub attributes: Vec<CatalogAttribute>,
    #[serde(default)]
    pub stock_quantity: Option<i64>,
    #[serde(default)]
    pub stock_status: StockStatus,
}

/// Attribute on a variation.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogAttribute {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub option: String,
}

impl From<CatalogProduct> for Product {
    fn from(product: CatalogProduct) -> Self {
        let price = match Price::parse_optional(&product.price) {
            Ok(price) => price,
            Err(e) => {
                tracing::warn!(product_id = product.id, error = %e, "Ignoring unparseable price");
                None
            }
        };

        Self {
            id: ProductId::new(product.id),
            name: product.name,
            slug: product.slug,
            price,
            stock_status: product.stock_status,
            permalink: product.permalink,
        }
    }
}

impl From<CatalogVariation> for Variant {
    fn from(variation: CatalogVariation) -> Self {
        Self {
            id: VariantId::new(variation.id),
            sku: variation.sku,
            name: variation.name,
            attributes: variation
                .attributes
                .into_iter()
                .map(|a| VariantAttribute::new(a.name, a.option))
                .collect(),
            stock_quantity: variation.stock_quantity,
            stock_status: variation.stock_status,
        }
    }
}
