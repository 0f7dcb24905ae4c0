//! Shop assistant gateway library.
//!
//! Turns a shopper request into exactly one catalog operation (search or
//! stock check) or a conversational reply. Exposed as a library so the
//! binary, the CLI and the integration tests share one dispatcher.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod classifier;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod operations;
pub mod routes;
pub mod state;

pub use dispatcher::Dispatcher;
pub use state::AppState;
