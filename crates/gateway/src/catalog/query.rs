//! Catalog request URL construction.
//!
//! Attribute filters are appended as repeated `attribute` entries, one per
//! constraint, never concatenated into a single value.

use url::Url;

use super::CatalogError;

/// Maximum products returned by a search.
pub const SEARCH_PAGE_SIZE: u32 = 5;

/// Maximum variants fetched for a stock check.
pub const VARIANT_PAGE_SIZE: u32 = 50;

/// A product search as requested by the shopper.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchRequest {
    /// Free text, may be empty.
    pub query: String,
    pub size: Option<String>,
    pub color: Option<String>,
}

impl SearchRequest {
    /// Create a search with no attribute filters.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }
}

/// Attribute taxonomies used for search filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeTaxonomies {
    pub color: String,
    pub size: String,
}

/// Build `{base}/products?search=..&per_page=5` plus one `attribute` entry per filter.
///
/// # Errors
///
/// Returns `CatalogError::InvalidUrl` if `base` cannot be a base URL.
pub fn search_url(
    base: &Url,
    request: &SearchRequest,
    taxonomies: &AttributeTaxonomies,
) -> Result<Url, CatalogError> {
    let mut url = endpoint(base, &["products"])?;
    {
        let mut pairs = url.query_pairs_mut();
        pairs
            .append_pair("search", &request.query)
            .append_pair("per_page", &SEARCH_PAGE_SIZE.to_string());
        if let Some(color) = &request.color {
            pairs.append_pair("attribute", &format!("{}:{color}", taxonomies.color));
        }
        if let Some(size) = &request.size {
            pairs.append_pair("attribute", &format!("{}:{size}", taxonomies.size));
        }
    }
    Ok(url)
}

/// Build `{base}/products?slug=..`.
///
/// # Errors
///
/// Returns `CatalogError::InvalidUrl` if `base` cannot be a base URL.
pub fn slug_url(base: &Url, slug: &str) -> Result<Url, CatalogError> {
    let mut url = endpoint(base, &["products"])?;
    url.query_pairs_mut().append_pair("slug", slug);
    Ok(url)
}

/// Build `{base}/products/{id}/variations?per_page=50`.
///
/// # Errors
///
/// Returns `CatalogError::InvalidUrl` if `base` cannot be a base URL.
pub fn variations_url(base: &Url, product_id: u64) -> Result<Url, CatalogError> {
    let id = product_id.to_string();
    let mut url = endpoint(base, &["products", id.as_str(), "variations"])?;
    url.query_pairs_mut()
        .append_pair("per_page", &VARIANT_PAGE_SIZE.to_string());
    Ok(url)
}

/// Append path segments to the base, tolerating a trailing slash on the base.
fn endpoint(base: &Url, segments: &[&str]) -> Result<Url, CatalogError> {
    let mut url = base.clone();
    url.set_query(None);
    url.set_fragment(None);
    url.path_segments_mut()
        .map_err(|()| CatalogError::InvalidUrl(base.to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://shop.example/wp-json/wc/v3").unwrap()
    }

    fn taxonomies() -> AttributeTaxonomies {
        AttributeTaxonomies {
            color: "pa_colore".to_string(),
            size: "pa_taglia".to_string(),
        }
    }

    fn attribute_values(url: &Url) -> Vec<String> {
        url.query_pairs()
            .filter(|(key, _)| key == "attribute")
            .map(|(_, value)| value.into_owned())
            .collect()
    }

    #[test]
    fn test_search_url_without_filters() {
        let url = search_url(&base(), &SearchRequest::new("sneaker"), &taxonomies()).unwrap();
        assert_eq!(
            url.as_str(),
            "https://shop.example/wp-json/wc/v3/products?search=sneaker&per_page=5"
        );
    }

    #[test]
    fn test_search_url_repeats_attribute_filters() {
        let request = SearchRequest {
            query: "sneaker".to_string(),
            size: Some("44".to_string()),
            color: Some("nero".to_string()),
        };
        let url = search_url(&base(), &request, &taxonomies()).unwrap();

        assert_eq!(attribute_values(&url), vec!["pa_colore:nero", "pa_taglia:44"]);
    }

    #[test]
    fn test_search_url_empty_query_kept() {
        let url = search_url(&base(), &SearchRequest::new(""), &taxonomies()).unwrap();
        assert!(url.query_pairs().any(|(k, v)| k == "search" && v.is_empty()));
    }

    #[test]
    fn test_trailing_slash_on_base() {
        let base = Url::parse("https://shop.example/wp-json/wc/v3/").unwrap();
        let url = variations_url(&base, 812).unwrap();
        assert_eq!(
            url.as_str(),
            "https://shop.example/wp-json/wc/v3/products/812/variations?per_page=50"
        );
    }

    #[test]
    fn test_slug_url_encodes_value() {
        let url = slug_url(&base(), "scarpa nera").unwrap();
        assert_eq!(
            url.as_str(),
            "https://shop.example/wp-json/wc/v3/products?slug=scarpa+nera"
        );
    }
}
