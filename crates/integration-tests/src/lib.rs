//! Test doubles for the shop assistant gateway.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shop-assistant-integration-tests
//! ```
//!
//! No network access is needed: [`FakeCatalog`] serves products from memory
//! and [`ScriptedClassifier`] returns a fixed decision. Both record what
//! they were asked so tests can assert on the calls the gateway made.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use shop_assistant_core::{
    DEFAULT_SIZE_HINT, Price, Product, ProductId, StockStatus, Variant, VariantAttribute, VariantId,
};
use shop_assistant_gateway::Dispatcher;
use shop_assistant_gateway::catalog::query::{self, AttributeTaxonomies};
use shop_assistant_gateway::catalog::{CatalogApi, CatalogError, SearchRequest};
use shop_assistant_gateway::classifier::{ClassifierError, Decision, IntentClassifier};
use shop_assistant_gateway::operations::OperationDescriptor;
use url::Url;

/// Base URL the fake catalog pretends to live at.
pub const BASE_URL: &str = "https://shop.example/wp-json/wc/v3";

/// A catalog call recorded by [`FakeCatalog`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogCall {
    Search(SearchRequest),
    FindBySlug(String),
    ListVariants(ProductId),
}

/// In-memory catalog.
#[derive(Default)]
pub struct FakeCatalog {
    products: Vec<Product>,
    variants: HashMap<ProductId, Vec<Variant>>,
    failing: bool,
    calls: Mutex<Vec<CatalogCall>>,
}

impl FakeCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a product.
    #[must_use]
    pub fn with_product(mut self, product: Product) -> Self {
        self.products.push(product);
        self
    }

    /// Set the variants of a product, in catalog order.
    #[must_use]
    pub fn with_variants(mut self, product_id: u64, variants: Vec<Variant>) -> Self {
        self.variants.insert(ProductId::new(product_id), variants);
        self
    }

    /// Make every call fail as if the catalog were unreachable.
    #[must_use]
    pub const fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    /// Calls made so far, in order.
    pub fn calls(&self) -> Vec<CatalogCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn record(&self, call: CatalogCall) -> Result<(), CatalogError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);

        if self.failing {
            Err(CatalogError::Status {
                status: 503,
                body: "Service Unavailable".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl CatalogApi for FakeCatalog {
    fn search_url(&self, request: &SearchRequest) -> Result<Url, CatalogError> {
        let base = Url::parse(BASE_URL).map_err(|e| CatalogError::InvalidUrl(e.to_string()))?;
        query::search_url(
            &base,
            request,
            &AttributeTaxonomies {
                color: "pa_colore".to_string(),
                size: "pa_taglia".to_string(),
            },
        )
    }

    async fn search_products(&self, request: &SearchRequest) -> Result<Vec<Product>, CatalogError> {
        self.record(CatalogCall::Search(request.clone()))?;

        let needle = request.query.to_lowercase();
        Ok(self
            .products
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .take(5)
            .cloned()
            .collect())
    }

    async fn find_product_by_slug(&self, slug: &str) -> Result<Option<Product>, CatalogError> {
        self.record(CatalogCall::FindBySlug(slug.to_string()))?;
        Ok(self.products.iter().find(|p| p.slug == slug).cloned())
    }

    async fn list_variants(&self, product_id: ProductId) -> Result<Vec<Variant>, CatalogError> {
        self.record(CatalogCall::ListVariants(product_id))?;
        Ok(self.variants.get(&product_id).cloned().unwrap_or_default())
    }
}

/// Classifier that always answers with the same decision, or fails.
pub struct ScriptedClassifier {
    decision: Option<Decision>,
    seen: Mutex<Vec<(String, Vec<String>)>>,
}

impl ScriptedClassifier {
    /// Always return `decision`.
    #[must_use]
    pub fn returning(decision: Decision) -> Self {
        Self {
            decision: Some(decision),
            seen: Mutex::new(Vec::new()),
        }
    }

    /// Always choose `name` with `arguments`.
    #[must_use]
    pub fn invoking(name: &str, arguments: serde_json::Value) -> Self {
        Self::returning(Decision::Invoke {
            name: name.to_string(),
            arguments,
            text: None,
        })
    }

    /// Always fail like an unreachable API.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            decision: None,
            seen: Mutex::new(Vec::new()),
        }
    }

    /// Messages received, each with the operation names offered.
    pub fn seen(&self) -> Vec<(String, Vec<String>)> {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl IntentClassifier for ScriptedClassifier {
    async fn classify(
        &self,
        message: &str,
        operations: &[OperationDescriptor],
    ) -> Result<Decision, ClassifierError> {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((
                message.to_string(),
                operations.iter().map(|op| op.name.to_string()).collect(),
            ));

        self.decision.clone().ok_or(ClassifierError::Overloaded)
    }
}

/// Build a dispatcher over shared fakes, keeping handles for assertions.
pub fn dispatcher(
    catalog: &Arc<FakeCatalog>,
    classifier: &Arc<ScriptedClassifier>,
) -> Dispatcher {
    Dispatcher::new(catalog.clone(), classifier.clone(), DEFAULT_SIZE_HINT)
}

/// A product with a permalink under `/prodotto/{slug}/`.
#[must_use]
pub fn product(id: u64, name: &str, slug: &str) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        slug: slug.to_string(),
        price: "89.00".parse::<Price>().ok(),
        stock_status: StockStatus::InStock,
        permalink: format!("https://shop.example/prodotto/{slug}/"),
    }
}

/// A variant with a single `Size` attribute.
#[must_use]
pub fn sized_variant(id: u64, size: &str, quantity: Option<i64>) -> Variant {
    Variant {
        id: VariantId::new(id),
        sku: format!("SKU-{id}"),
        name: format!("Variant {id}"),
        attributes: vec![VariantAttribute::new("Size", size)],
        stock_quantity: quantity,
        stock_status: if quantity.is_some_and(|q| q > 0) {
            StockStatus::InStock
        } else {
            StockStatus::OutOfStock
        },
    }
}
