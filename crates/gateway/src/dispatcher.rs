//! Request dispatch.
//!
//! Every request resolves to exactly one response envelope. Explicit
//! parameters bypass the classifier:
//!
//! 1. (`url` or `productId`) and `size` present: direct stock check
//! 2. `q` present: direct search
//! 3. otherwise the message goes to the intent classifier
//! 4. with no message at all the answer is an empty reply

use std::sync::Arc;

use shop_assistant_core::{Query, ResponseEnvelope};
use tracing::instrument;

use crate::catalog::{CatalogApi, CatalogClient, SearchRequest};
use crate::classifier::{ClaudeClient, ClaudeIntentClassifier, IntentClassifier};
use crate::config::GatewayConfig;
use crate::error::{StartupError, add_breadcrumb, report_error};
use crate::operations::{
    Operation, StockError, StockRequest, check_stock, descriptors, search_products,
};

/// Error shown when the classifier cannot be reached or answers garbage.
pub const ASSISTANT_UNAVAILABLE: &str = "Assistant unavailable";

/// How a request will be answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan {
    /// Product identifier and size given: check stock without classification.
    DirectStock(StockRequest),
    /// Search term given: search without classification.
    DirectSearch(SearchRequest),
    /// The message must be classified first.
    Infer {
        /// Shopper message, never blank.
        message: String,
    },
    /// Nothing to act on: answer with an empty reply.
    Empty,
}

impl Plan {
    /// Short label for logs and breadcrumbs.
    #[must_use]
    pub const fn mode(&self) -> &'static str {
        match self {
            Self::DirectStock(_) => "direct_stock",
            Self::DirectSearch(_) => "direct_search",
            Self::Infer { .. } => "inferred",
            Self::Empty => "empty",
        }
    }
}

/// Decide how a normalized query is answered.
///
/// Direct stock wins over direct search, which wins over classification.
/// Without a message there is nothing to classify.
#[must_use]
pub fn plan(query: Query) -> Plan {
    let Query {
        message,
        explicit_query,
        size,
        color,
        product_id,
        product_url,
        ..
    } = query;
    let has_identifier = product_id.is_some() || product_url.is_some();

    match (size, explicit_query, message) {
        (Some(size), _, _) if has_identifier => Plan::DirectStock(StockRequest {
            product_id,
            product_url,
            size,
        }),
        (size, Some(query), _) => Plan::DirectSearch(SearchRequest { query, size, color }),
        (_, None, Some(message)) => Plan::Infer { message },
        (_, None, None) => Plan::Empty,
    }
}

/// Routes queries to catalog operations.
#[derive(Clone)]
pub struct Dispatcher {
    catalog: Arc<dyn CatalogApi>,
    classifier: Arc<dyn IntentClassifier>,
    size_hint: String,
}

impl Dispatcher {
    /// Create a dispatcher over the given catalog and classifier.
    pub fn new(
        catalog: Arc<dyn CatalogApi>,
        classifier: Arc<dyn IntentClassifier>,
        size_hint: impl Into<String>,
    ) -> Self {
        Self {
            catalog,
            classifier,
            size_hint: size_hint.into(),
        }
    }

    /// Build the production dispatcher from configuration.
    ///
    /// # Errors
    ///
    /// Returns `StartupError` if either HTTP client cannot be built.
    pub fn from_config(config: &GatewayConfig) -> Result<Self, StartupError> {
        let catalog = CatalogClient::new(&config.catalog)?;
        let classifier = ClaudeIntentClassifier::new(ClaudeClient::new(&config.classifier)?);

        Ok(Self::new(
            Arc::new(catalog),
            Arc::new(classifier),
            config.catalog.size_hint.clone(),
        ))
    }

    /// Answer one query.
    #[instrument(skip(self, query), fields(mode))]
    pub async fn dispatch(&self, query: Query) -> ResponseEnvelope {
        let query = query.normalized();
        let debug = query.debug;
        let plan = plan(query);

        let mode = plan.mode();
        tracing::Span::current().record("mode", mode);
        add_breadcrumb("dispatch", mode, None);

        let operation = match plan {
            Plan::DirectStock(request) => Operation::CheckStock(request),
            Plan::DirectSearch(request) => Operation::SearchProducts(request),
            Plan::Empty => Operation::Reply(String::new()),
            Plan::Infer { message } => match self.infer(&message).await {
                Ok(operation) => operation,
                Err(envelope) => return envelope,
            },
        };

        let envelope = self.run(operation, debug).await;
        tracing::info!(mode, envelope = envelope.kind(), "Request answered");
        envelope
    }

    async fn infer(&self, message: &str) -> Result<Operation, ResponseEnvelope> {
        let decision = self
            .classifier
            .classify(message, descriptors())
            .await
            .map_err(|e| {
                sentry::with_scope(
                    |scope| {
                        scope.set_tag("classifier.error", e.kind());
                        scope.set_tag("classifier.outage", e.is_outage());
                    },
                    || report_error(&e, "Intent classification failed"),
                );
                ResponseEnvelope::error(ASSISTANT_UNAVAILABLE)
            })?;

        let operation = Operation::from_decision(decision).map_err(|e| {
            tracing::warn!(error = %e, "Classifier arguments rejected");
            ResponseEnvelope::error(e.to_string())
        })?;

        if let Some(name) = operation.name() {
            add_breadcrumb("dispatch", "classified", Some(&[("operation", name.as_str())]));
        }
        Ok(operation)
    }

    async fn run(&self, operation: Operation, debug: bool) -> ResponseEnvelope {
        match operation {
            Operation::SearchProducts(request) => {
                search_products(self.catalog.as_ref(), &request, debug)
                    .await
                    .into()
            }
            Operation::CheckStock(request) => {
                match check_stock(self.catalog.as_ref(), &request, &self.size_hint).await {
                    Ok(answer) => answer.into(),
                    Err(e) => {
                        if let StockError::CheckStockFailed(source) = &e {
                            report_error(source, "Check stock failed");
                        } else {
                            tracing::info!(error = %e, "Stock check unanswered");
                        }
                        ResponseEnvelope::error(e.to_string())
                    }
                }
            }
            Operation::Reply(text) => ResponseEnvelope::reply(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query() -> Query {
        Query::default()
    }

    #[test]
    fn test_plan_direct_stock_by_url() {
        let plan = plan(Query {
            product_url: Some("https://shop.example/prodotto/x/".to_string()),
            size: Some("44".to_string()),
            explicit_query: Some("sneaker".to_string()),
            message: Some("ciao".to_string()),
            ..query()
        });

        assert_eq!(plan.mode(), "direct_stock");
        assert_eq!(
            plan,
            Plan::DirectStock(StockRequest {
                product_id: None,
                product_url: Some("https://shop.example/prodotto/x/".to_string()),
                size: "44".to_string(),
            })
        );
    }

    #[test]
    fn test_plan_direct_stock_by_id() {
        let plan = plan(Query {
            product_id: Some("812".to_string()),
            size: Some("44".to_string()),
            ..query()
        });
        assert_eq!(plan.mode(), "direct_stock");
    }

    #[test]
    fn test_plan_identifier_without_size_searches() {
        let plan = plan(Query {
            product_url: Some("https://shop.example/prodotto/x/".to_string()),
            explicit_query: Some("sneaker".to_string()),
            color: Some("nero".to_string()),
            ..query()
        });

        assert_eq!(
            plan,
            Plan::DirectSearch(SearchRequest {
                query: "sneaker".to_string(),
                size: None,
                color: Some("nero".to_string()),
            })
        );
    }

    #[test]
    fn test_plan_query_wins_over_message() {
        let plan = plan(Query {
            explicit_query: Some("sneaker".to_string()),
            size: Some("44".to_string()),
            message: Some("avete delle sneaker?".to_string()),
            ..query()
        });
        assert!(matches!(
            plan,
            Plan::DirectSearch(SearchRequest { size: Some(s), .. }) if s == "44"
        ));
    }

    #[test]
    fn test_plan_message_is_inferred() {
        assert_eq!(
            plan(Query::message("avete le sneaker nere?")),
            Plan::Infer {
                message: "avete le sneaker nere?".to_string()
            }
        );
    }

    #[test]
    fn test_plan_without_message_is_empty() {
        assert_eq!(plan(query()), Plan::Empty);
        assert_eq!(
            plan(Query {
                size: Some("44".to_string()),
                color: Some("nero".to_string()),
                ..query()
            }),
            Plan::Empty
        );
        assert_eq!(plan(Query::message("   ").normalized()), Plan::Empty);
    }
}
