//! `search_products`: catalog search that degrades to no results on failure.

use shop_assistant_core::{ProductSummary, SearchMeta, SearchResults};
use tracing::instrument;

use crate::catalog::{CatalogApi, SearchRequest};

/// Search the catalog and map matches to product summaries.
///
/// Catalog failures are logged and reported as empty results; with `debug`
/// set the failure is echoed in `meta.error`. Successful debug responses
/// carry the exact query URL and the result count.
#[instrument(skip(catalog, debug), fields(query = %request.query))]
pub async fn search_products(
    catalog: &dyn CatalogApi,
    request: &SearchRequest,
    debug: bool,
) -> SearchResults {
    let query_url = catalog.search_url(request).ok().map(|url| url.to_string());

    match catalog.search_products(request).await {
        Ok(products) => {
            let results: Vec<ProductSummary> = products.iter().map(ProductSummary::from).collect();
            let count = results.len();
            tracing::info!(count, "Search completed");

            let results = SearchResults::new(results);
            if debug {
                results.with_meta(SearchMeta {
                    query_url,
                    count: Some(count),
                    error: None,
                })
            } else {
                results
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "Catalog search failed, returning no results");

            if debug {
                SearchResults::empty().with_meta(SearchMeta {
                    query_url,
                    count: None,
                    error: Some(e.to_string()),
                })
            } else {
                SearchResults::empty()
            }
        }
    }
}
