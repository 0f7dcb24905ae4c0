//! Shop Assistant Core - Shared types library.
//!
//! This crate provides the types and pure algorithms used across the shop
//! assistant components:
//! - `gateway` - HTTP endpoint, catalog client, intent dispatch
//! - `cli` - Command-line runner for single requests
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients. This keeps the variant matching and envelope shapes testable in
//! isolation.
//!
//! # Modules
//!
//! - [`types`] - IDs, prices, stock status, catalog entities, queries and response envelopes
//! - [`matching`] - Slug derivation and size-based variant selection

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod matching;
pub mod types;

pub use matching::{DEFAULT_SIZE_HINT, find_variant_by_size, slug_from_url};
pub use types::*;
