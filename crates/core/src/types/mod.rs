//! Core types for the shop assistant.
//!
//! This module provides type-safe wrappers for catalog concepts and the
//! request/response shapes exchanged at the gateway boundary.

pub mod catalog;
pub mod envelope;
pub mod id;
pub mod price;
pub mod query;
pub mod status;

pub use catalog::{Product, ProductSummary, Variant, VariantAttribute};
pub use envelope::{ResponseEnvelope, SearchMeta, SearchResults, StockAnswer};
pub use id::*;
pub use price::{Price, PriceError};
pub use query::{Query, parse_flag};
pub use status::StockStatus;
