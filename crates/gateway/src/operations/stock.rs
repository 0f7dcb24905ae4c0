//! `check_stock`: size availability for one product.
//!
//! Unlike search, every failure here is reported to the shopper as an
//! error envelope.

use shop_assistant_core::{ProductId, StockAnswer, find_variant_by_size, slug_from_url};
use thiserror::Error;
use tracing::instrument;

use crate::catalog::{CatalogApi, CatalogError};

/// Stock check failures. `Display` is the user-facing message.
#[derive(Debug, Error)]
pub enum StockError {
    /// Neither a product ID nor a usable product URL was given.
    #[error("A productId or productUrl is required")]
    MissingIdentifier,

    /// The product ID is not a number.
    #[error("Invalid productId: {0}")]
    InvalidProductId(String),

    /// No product has the slug derived from the URL.
    #[error("Product not found for slug: {slug}")]
    ProductNotFound {
        /// Slug that was looked up.
        slug: String,
    },

    /// No variant carries the requested size.
    #[error("No variant found with size {size}")]
    VariantNotFound {
        /// Size as requested.
        size: String,
    },

    /// The catalog could not be queried.
    #[error("Check stock failed")]
    CheckStockFailed(#[source] CatalogError),
}

/// Which product and size to check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockRequest {
    /// Takes precedence over `product_url` when both are set.
    pub product_id: Option<String>,
    pub product_url: Option<String>,
    pub size: String,
}

/// Resolve the product, fetch its variants and answer for the first variant in `size`.
///
/// # Errors
///
/// Returns `StockError` if the product cannot be identified, no variant has
/// the size, or the catalog fails.
#[instrument(skip(catalog, size_hint), fields(size = %request.size))]
pub async fn check_stock(
    catalog: &dyn CatalogApi,
    request: &StockRequest,
    size_hint: &str,
) -> Result<StockAnswer, StockError> {
    let product_id = resolve_product_id(catalog, request).await?;

    let variants = catalog
        .list_variants(product_id)
        .await
        .map_err(StockError::CheckStockFailed)?;

    let variant = find_variant_by_size(&variants, &request.size, size_hint).ok_or_else(|| {
        StockError::VariantNotFound {
            size: request.size.clone(),
        }
    })?;

    tracing::info!(
        product_id = %product_id,
        sku = %variant.sku,
        stock_status = %variant.stock_status,
        "Variant matched"
    );

    Ok(StockAnswer::from_variant(product_id, &request.size, variant))
}

async fn resolve_product_id(
    catalog: &dyn CatalogApi,
    request: &StockRequest,
) -> Result<ProductId, StockError> {
    if let Some(raw) = &request.product_id {
        return raw
            .parse()
            .map_err(|_| StockError::InvalidProductId(raw.clone()));
    }

    let product_url = request
        .product_url
        .as_deref()
        .ok_or(StockError::MissingIdentifier)?;
    let slug = slug_from_url(product_url).ok_or(StockError::MissingIdentifier)?;

    match catalog.find_product_by_slug(&slug).await {
        Ok(Some(product)) => {
            tracing::debug!(slug = %slug, product_id = %product.id, "Resolved slug");
            Ok(product.id)
        }
        Ok(None) => Err(StockError::ProductNotFound { slug }),
        Err(e) => Err(StockError::CheckStockFailed(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_facing_messages() {
        assert_eq!(
            StockError::ProductNotFound {
                slug: "687174006007black".to_string()
            }
            .to_string(),
            "Product not found for slug: 687174006007black"
        );
        assert_eq!(
            StockError::VariantNotFound {
                size: "44".to_string()
            }
            .to_string(),
            "No variant found with size 44"
        );
        assert_eq!(
            StockError::CheckStockFailed(CatalogError::RateLimited(5)).to_string(),
            "Check stock failed"
        );
    }
}
