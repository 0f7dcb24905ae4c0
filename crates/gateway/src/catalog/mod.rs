//! Catalog REST API client.
//!
//! # Architecture
//!
//! - Read-only access to the store catalog over its REST API (products, variations)
//! - The catalog is the source of truth - NO caching, every request fetches fresh data
//! - HTTP basic auth with the consumer key/secret pair
//! - [`CatalogApi`] is the seam the dispatcher depends on, so tests can swap in fakes
//!
//! # Endpoints
//!
//! ```text
//! GET {base}/products?search=..&per_page=5[&attribute=..][&attribute=..]
//! GET {base}/products?slug=..
//! GET {base}/products/{id}/variations?per_page=50
//! ```

mod client;
pub mod query;
pub mod types;

pub use client::CatalogClient;
pub use query::SearchRequest;

use async_trait::async_trait;
use shop_assistant_core::{Product, ProductId, Variant};
use thiserror::Error;
use url::Url;

/// Errors that can occur when talking to the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed (connection, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Catalog answered with a non-success status.
    #[error("Catalog returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, as returned.
        body: String,
    },

    /// Credentials were rejected.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Rate limited by the catalog.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A request URL could not be built from the configured base.
    #[error("Invalid catalog URL: {0}")]
    InvalidUrl(String),
}

/// Read queries the gateway issues against the catalog.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// The exact URL a search request is sent to.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidUrl` if the base URL cannot carry a path.
    fn search_url(&self, request: &SearchRequest) -> Result<Url, CatalogError>;

    /// Search products by free text and attribute filters.
    async fn search_products(&self, request: &SearchRequest) -> Result<Vec<Product>, CatalogError>;

    /// Find the product whose slug equals `slug`.
    async fn find_product_by_slug(&self, slug: &str) -> Result<Option<Product>, CatalogError>;

    /// List a product's variants in catalog order.
    async fn list_variants(&self, product_id: ProductId) -> Result<Vec<Variant>, CatalogError>;
}
