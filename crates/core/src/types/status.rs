//! Stock status reported by the catalog.

use serde::{Deserialize, Serialize};

/// Stock status of a product or variant.
///
/// Maps to the catalog's `stock_status` values. Anything the catalog adds
/// later is kept as `Unknown` rather than failing the whole response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum StockStatus {
    #[serde(rename = "instock")]
    InStock,
    #[serde(rename = "outofstock")]
    OutOfStock,
    #[serde(rename = "onbackorder")]
    OnBackorder,
    #[default]
    #[serde(rename = "unknown", other)]
    Unknown,
}

impl StockStatus {
    /// The catalog's wire value for this status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InStock => "instock",
            Self::OutOfStock => "outofstock",
            Self::OnBackorder => "onbackorder",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
