//! Catalog operations a request can resolve to.
//!
//! The classifier's raw decision is turned into a closed [`Operation`] here,
//! so the dispatcher matches on a type instead of comparing tool names.

pub mod registry;
pub mod search;
pub mod stock;

pub use registry::{OperationDescriptor, OperationName, descriptor, descriptors};
pub use search::search_products;
pub use stock::{StockError, StockRequest, check_stock};

use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use thiserror::Error;

use crate::catalog::SearchRequest;
use crate::classifier::Decision;

/// Errors turning a classifier decision into an operation.
#[derive(Debug, Error)]
pub enum OperationError {
    /// The classifier's arguments did not match the operation's schema.
    #[error("Invalid arguments for {operation}: {detail}")]
    InvalidArguments {
        /// Operation the classifier chose.
        operation: OperationName,
        /// What was wrong with the arguments.
        detail: String,
    },
}

/// An operation ready to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    SearchProducts(SearchRequest),
    CheckStock(StockRequest),
    /// No operation selected; answer with the classifier's text.
    Reply(String),
}

/// Arguments of `search_products` as produced by the classifier.
#[derive(Debug, Deserialize)]
struct SearchArgs {
    query: String,
    #[serde(default)]
    size: Option<String>,
    #[serde(default)]
    color: Option<String>,
}

/// Arguments of `check_stock` as produced by the classifier.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StockArgs {
    size: String,
    #[serde(default)]
    product_url: Option<String>,
    #[serde(default, deserialize_with = "number_or_text")]
    product_id: Option<String>,
}

impl Operation {
    /// Turn a classifier decision into an operation.
    ///
    /// A tool name that is not registered counts as no selection.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidArguments` if the arguments do not fit
    /// the chosen operation's schema.
    pub fn from_decision(decision: Decision) -> Result<Self, OperationError> {
        match decision {
            Decision::Reply(text) => Ok(Self::Reply(text.unwrap_or_default())),
            Decision::Invoke {
                name,
                arguments,
                text,
            } => match name.parse::<OperationName>() {
                Ok(operation @ OperationName::SearchProducts) => {
                    let args: SearchArgs = parse_arguments(operation, arguments)?;
                    Ok(Self::SearchProducts(SearchRequest {
                        query: args.query,
                        size: non_blank(args.size),
                        color: non_blank(args.color),
                    }))
                }
                Ok(operation @ OperationName::CheckStock) => {
                    let args: StockArgs = parse_arguments(operation, arguments)?;
                    if args.size.trim().is_empty() {
                        return Err(OperationError::InvalidArguments {
                            operation,
                            detail: "size must not be empty".to_string(),
                        });
                    }
                    Ok(Self::CheckStock(StockRequest {
                        product_id: non_blank(args.product_id),
                        product_url: non_blank(args.product_url),
                        size: args.size,
                    }))
                }
                Err(e) => {
                    tracing::warn!(tool = %name, error = %e, "Classifier chose an unregistered tool");
                    Ok(Self::Reply(text.unwrap_or_default()))
                }
            },
        }
    }

    /// Operation name for logging, `None` for a plain reply.
    #[must_use]
    pub const fn name(&self) -> Option<OperationName> {
        match self {
            Self::SearchProducts(_) => Some(OperationName::SearchProducts),
            Self::CheckStock(_) => Some(OperationName::CheckStock),
            Self::Reply(_) => None,
        }
    }
}

fn parse_arguments<T: DeserializeOwned>(
    operation: OperationName,
    arguments: serde_json::Value,
) -> Result<T, OperationError> {
    serde_json::from_value(arguments).map_err(|e| OperationError::InvalidArguments {
        operation,
        detail: e.to_string(),
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Accept a product ID sent either as a JSON number or as a string.
fn number_or_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrText {
        Number(u64),
        Text(String),
    }

    Ok(
        Option::<NumberOrText>::deserialize(deserializer)?.map(|value| match value {
            NumberOrText::Number(n) => n.to_string(),
            NumberOrText::Text(s) => s,
        }),
    )
}
