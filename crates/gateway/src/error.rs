//! Error handling with Sentry integration.
//!
//! Operation-level failures never become HTTP errors: they are carried in the
//! JSON body as `{ "error": ... }` with status 200. `AppError` covers requests
//! that cannot be read at all, and renders the same envelope.

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use shop_assistant_core::ResponseEnvelope;
use thiserror::Error;

use crate::catalog::CatalogError;
use crate::classifier::ClassifierError;

/// Request-level error for the gateway endpoint.
#[derive(Debug, Error)]
pub enum AppError {
    /// Query string could not be decoded.
    #[error("Invalid query parameters: {0}")]
    InvalidQuery(#[from] QueryRejection),

    /// JSON body could not be decoded.
    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::debug!(error = %self, "Rejected request");
        (StatusCode::OK, Json(ResponseEnvelope::error(self.to_string()))).into_response()
    }
}

/// Error building the gateway's outbound clients.
#[derive(Debug, Error)]
pub enum StartupError {
    /// Catalog client could not be built.
    #[error("Catalog client error: {0}")]
    Catalog(#[from] CatalogError),

    /// Classifier client could not be built.
    #[error("Classifier client error: {0}")]
    Classifier(#[from] ClassifierError),
}

/// Capture an unexpected failure to Sentry and log it with the event ID.
pub fn report_error<E>(error: &E, message: &str)
where
    E: std::error::Error + ?Sized,
{
    let event_id = sentry::capture_error(error);
    tracing::error!(
        error = %error,
        sentry_event_id = %event_id,
        "{message}"
    );
}

/// Add a breadcrumb for request handling steps.
///
/// Breadcrumbs appear in Sentry error reports to show how a request was
/// resolved before it failed.
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_startup_error_display() {
        let err = StartupError::Classifier(ClassifierError::Config("bad key".to_string()));
        assert_eq!(
            err.to_string(),
            "Classifier client error: configuration error: bad key"
        );
    }

    #[test]
    fn test_report_error_without_sentry_client() {
        // No client bound: capture is a no-op and must not panic.
        report_error(&CatalogError::RateLimited(1), "Catalog failed");
        add_breadcrumb("dispatch", "direct_stock", Some(&[("size", "44")]));
    }
}
