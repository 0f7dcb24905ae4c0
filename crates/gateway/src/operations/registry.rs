//! Process-wide registry of the operations a shopper message can trigger.
//!
//! Descriptors are built once on first use and never mutated. The same
//! descriptors are offered to the intent classifier as tools.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use serde_json::json;

/// Name of a registered operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationName {
    SearchProducts,
    CheckStock,
}

impl OperationName {
    /// Wire name used in tool definitions.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SearchProducts => "search_products",
            Self::CheckStock => "check_stock",
        }
    }
}

impl fmt::Display for OperationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "search_products" => Ok(Self::SearchProducts),
            "check_stock" => Ok(Self::CheckStock),
            _ => Err(format!("unknown operation: {s}")),
        }
    }
}

/// A named, schema-described capability.
#[derive(Debug, Clone)]
pub struct OperationDescriptor {
    pub name: OperationName,
    pub description: &'static str,
    /// JSON Schema of the operation's arguments.
    pub parameter_schema: serde_json::Value,
}

static REGISTRY: LazyLock<Vec<OperationDescriptor>> = LazyLock::new(|| {
    vec![
        OperationDescriptor {
            name: OperationName::SearchProducts,
            description: "Search the store catalog by free text, optionally narrowed by size and color. Returns up to 5 products with price, stock status and page URL.",
            parameter_schema: json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "What the shopper is looking for (e.g., 'scarpe running')"
                    },
                    "size": {
                        "type": "string",
                        "description": "Size filter (e.g., '44', 'M')"
                    },
                    "color": {
                        "type": "string",
                        "description": "Color filter (e.g., 'nero')"
                    }
                },
                "required": ["query"]
            }),
        },
        OperationDescriptor {
            name: OperationName::CheckStock,
            description: "Check whether a specific product is available in a given size. Identify the product by its page URL or numeric ID.",
            parameter_schema: json!({
                "type": "object",
                "properties": {
                    "productUrl": {
                        "type": "string",
                        "description": "URL of the product page"
                    },
                    "productId": {
                        "type": "number",
                        "description": "Numeric product ID"
                    },
                    "size": {
                        "type": "string",
                        "description": "Size to check (e.g., '44')"
                    }
                },
                "required": ["size"]
            }),
        },
    ]
});

/// All registered operations, in a stable order.
#[must_use]
pub fn descriptors() -> &'static [OperationDescriptor] {
    &REGISTRY
}

/// Look up an operation by name.
#[must_use]
pub fn descriptor(name: OperationName) -> Option<&'static OperationDescriptor> {
    REGISTRY.iter().find(|d| d.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_has_both_operations() {
        let names: Vec<_> = descriptors().iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["search_products", "check_stock"]);
    }

    #[test]
    fn test_required_arguments() {
        let search = descriptor(OperationName::SearchProducts).expect("registered");
        assert_eq!(search.parameter_schema["required"], json!(["query"]));

        let stock = descriptor(OperationName::CheckStock).expect("registered");
        assert_eq!(stock.parameter_schema["required"], json!(["size"]));
        assert!(stock.parameter_schema["properties"]["productUrl"].is_object());
    }

    #[test]
    fn test_operation_name_round_trip() {
        for descriptor in descriptors() {
            let parsed: OperationName = descriptor.name.as_str().parse().expect("parse");
            assert_eq!(parsed, descriptor.name);
        }
        assert!("delete_product".parse::<OperationName>().is_err());
    }
}
