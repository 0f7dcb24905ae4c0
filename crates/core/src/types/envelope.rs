//! Response envelopes returned at the gateway boundary.
//!
//! Every request produces exactly one [`ResponseEnvelope`]. The variants
//! serialize untagged so the JSON body is one of:
//!
//! ```text
//! { "results": [...], "meta": {...}? }
//! { "productId": .., "product": .., "size": .., "stockQuantity": ..|null, "stockStatus": .., "sku": .. }
//! { "error": "..." }
//! { "reply": "..." }
//! ```

use serde::{Deserialize, Serialize};

use super::catalog::{ProductSummary, Variant};
use super::id::ProductId;
use super::status::StockStatus;

/// The single response shape for a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseEnvelope {
    /// Product search results.
    Search(SearchResults),
    /// Stock answer for one variant.
    Stock(StockAnswer),
    /// Operation-level failure, carried in the body.
    Error {
        /// User-facing message.
        error: String,
    },
    /// Conversational reply when no operation was selected.
    Reply {
        /// Assistant text, empty when the classifier returned none.
        reply: String,
    },
}

impl ResponseEnvelope {
    /// Build an error envelope.
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            error: message.into(),
        }
    }

    /// Build a reply envelope.
    pub fn reply(text: impl Into<String>) -> Self {
        Self::Reply { reply: text.into() }
    }

    /// Short label for logging.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Search(_) => "search",
            Self::Stock(_) => "stock",
            Self::Error { .. } => "error",
            Self::Reply { .. } => "reply",
        }
    }
}

impl From<SearchResults> for ResponseEnvelope {
    fn from(results: SearchResults) -> Self {
        Self::Search(results)
    }
}

impl From<StockAnswer> for ResponseEnvelope {
    fn from(answer: StockAnswer) -> Self {
        Self::Stock(answer)
    }
}

/// Search results, optionally annotated for debugging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResults {
    pub results: Vec<ProductSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<SearchMeta>,
}

impl SearchResults {
    /// Results without debug metadata.
    #[must_use]
    pub const fn new(results: Vec<ProductSummary>) -> Self {
        Self {
            results,
            meta: None,
        }
    }

    /// Empty results, the degraded outcome of a failed search.
    #[must_use]
    pub const fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Attach debug metadata.
    #[must_use]
    pub fn with_meta(mut self, meta: SearchMeta) -> Self {
        self.meta = Some(meta);
        self
    }
}

/// Debug metadata so callers can audit the catalog query that was sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Stock availability of one product in one size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockAnswer {
    pub product_id: ProductId,
    /// Variant name, empty when the catalog has none.
    pub product: String,
    /// Size as requested by the shopper.
    pub size: String,
    /// Always present in the JSON; `null` when untracked.
    pub stock_quantity: Option<i64>,
    pub stock_status: StockStatus,
    pub sku: String,
}

impl StockAnswer {
    /// Build the answer for a matched variant.
    #[must_use]
    pub fn from_variant(product_id: ProductId, size: &str, variant: &Variant) -> Self {
        Self {
            product_id,
            product: variant.name.clone(),
            size: size.to_string(),
            stock_quantity: variant.stock_quantity,
            stock_status: variant.stock_status,
            sku: variant.sku.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::types::VariantId;

    fn variant(quantity: Option<i64>) -> Variant {
        Variant {
            id: VariantId::new(11),
            sku: "RUN-44-BLK".to_string(),
            name: "Sneaker Runner - 44".to_string(),
            attributes: Vec::new(),
            stock_quantity: quantity,
            stock_status: StockStatus::InStock,
        }
    }

    #[test]
    fn test_stock_answer_null_quantity() {
        let answer = StockAnswer::from_variant(ProductId::new(5), "44", &variant(None));
        let json = serde_json::to_value(ResponseEnvelope::from(answer)).expect("serialize");
        assert_eq!(
            json,
            json!({
                "productId": 5,
                "product": "Sneaker Runner - 44",
                "size": "44",
                "stockQuantity": null,
                "stockStatus": "instock",
                "sku": "RUN-44-BLK"
            })
        );
    }

    #[test]
    fn test_search_envelope_without_meta() {
        let json = serde_json::to_value(ResponseEnvelope::from(SearchResults::empty()))
            .expect("serialize");
        assert_eq!(json, json!({ "results": [] }));
    }

    #[test]
    fn test_search_envelope_with_meta() {
        let results = SearchResults::empty().with_meta(SearchMeta {
            query_url: Some("https://shop.example/wp-json/wc/v3/products?search=x".to_string()),
            count: Some(0),
            error: None,
        });
        let json = serde_json::to_value(ResponseEnvelope::from(results)).expect("serialize");
        assert_eq!(json["meta"]["count"], 0);
        assert!(json["meta"]["queryUrl"].is_string());
        assert!(json["meta"].get("error").is_none());
    }

    #[test]
    fn test_error_and_reply_shapes() {
        assert_eq!(
            serde_json::to_value(ResponseEnvelope::error("boom")).expect("serialize"),
            json!({ "error": "boom" })
        );
        assert_eq!(
            serde_json::to_value(ResponseEnvelope::reply("")).expect("serialize"),
            json!({ "reply": "" })
        );
    }

    #[test]
    fn test_envelope_deserializes_each_shape() {
        let error: ResponseEnvelope =
            serde_json::from_value(json!({ "error": "x" })).expect("deserialize");
        assert_eq!(error.kind(), "error");

        let reply: ResponseEnvelope =
            serde_json::from_value(json!({ "reply": "ciao" })).expect("deserialize");
        assert_eq!(reply.kind(), "reply");

        let search: ResponseEnvelope =
            serde_json::from_value(json!({ "results": [], "meta": { "error": "timeout" } }))
                .expect("deserialize");
        assert_eq!(search.kind(), "search");
    }
}
