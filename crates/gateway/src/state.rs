//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::GatewayConfig;
use crate::dispatcher::Dispatcher;
use crate::error::StartupError;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    dispatcher: Dispatcher,
}

impl AppState {
    /// Create state around an existing dispatcher.
    #[must_use]
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            inner: Arc::new(AppStateInner { dispatcher }),
        }
    }

    /// Build state with the production catalog and classifier clients.
    ///
    /// # Errors
    ///
    /// Returns `StartupError` if an HTTP client cannot be built.
    pub fn from_config(config: &GatewayConfig) -> Result<Self, StartupError> {
        Ok(Self::new(Dispatcher::from_config(config)?))
    }

    /// Get the request dispatcher.
    #[must_use]
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.inner.dispatcher
    }
}
