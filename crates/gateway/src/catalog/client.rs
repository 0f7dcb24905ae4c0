//! Catalog REST client.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use shop_assistant_core::{Product, ProductId, Variant};
use tracing::instrument;
use url::Url;

use crate::config::CatalogConfig;

use super::query::{self, AttributeTaxonomies, SearchRequest};
use super::types::{CatalogProduct, CatalogVariation};
use super::{CatalogApi, CatalogError};

/// Catalog REST API client.
///
/// Cheap to clone; all clones share one connection pool.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    config: CatalogConfig,
    taxonomies: AttributeTaxonomies,
}

impl CatalogClient {
    /// Create a new catalog client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(CatalogClientInner {
                client,
                taxonomies: AttributeTaxonomies {
                    color: config.color_attribute.clone(),
                    size: config.size_attribute.clone(),
                },
                config: config.clone(),
            }),
        })
    }

    /// Issue an authenticated GET and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, CatalogError> {
        let config = &self.inner.config;
        let response = self
            .inner
            .client
            .get(url)
            .basic_auth(
                &config.consumer_key,
                Some(config.consumer_secret.expose_secret()),
            )
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::handle_error_status(status, response).await);
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Map a non-success status to an error.
    async fn handle_error_status(
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> CatalogError {
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            return CatalogError::RateLimited(retry_after);
        }

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return CatalogError::Unauthorized("Invalid consumer key or secret".to_string());
        }

        match response.text().await {
            Ok(body) => CatalogError::Status {
                status: status.as_u16(),
                body,
            },
            Err(e) => CatalogError::Http(e),
        }
    }
}

#[async_trait]
impl CatalogApi for CatalogClient {
    fn search_url(&self, request: &SearchRequest) -> Result<Url, CatalogError> {
        query::search_url(&self.inner.config.base_url, request, &self.inner.taxonomies)
    }

    #[instrument(skip(self), fields(query = %request.query))]
    async fn search_products(&self, request: &SearchRequest) -> Result<Vec<Product>, CatalogError> {
        let url = self.search_url(request)?;
        let products: Vec<CatalogProduct> = self.get_json(url).await?;
        tracing::debug!(count = products.len(), "Catalog search returned");
        Ok(products.into_iter().map(Product::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_product_by_slug(&self, slug: &str) -> Result<Option<Product>, CatalogError> {
        let url = query::slug_url(&self.inner.config.base_url, slug)?;
        let products: Vec<CatalogProduct> = self.get_json(url).await?;
        Ok(products.into_iter().next().map(Product::from))
    }

    #[instrument(skip(self), fields(product_id = %product_id))]
    async fn list_variants(&self, product_id: ProductId) -> Result<Vec<Variant>, CatalogError> {
        let url = query::variations_url(&self.inner.config.base_url, product_id.as_u64())?;
        let variations: Vec<CatalogVariation> = self.get_json(url).await?;
        tracing::debug!(count = variations.len(), "Catalog variations returned");
        Ok(variations.into_iter().map(Variant::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_client_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<CatalogClient>();
    }

    #[test]
    fn test_catalog_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CatalogClient>();
    }
}
