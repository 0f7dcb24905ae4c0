//! Slug derivation and size-based variant selection.
//!
//! Both functions are pure string logic so the stock check can be verified
//! without a catalog.

use url::Url;

use crate::types::Variant;

/// Attribute-name fragment identifying size attributes when none is configured.
pub const DEFAULT_SIZE_HINT: &str = "size";

/// Derive a product slug from a catalog page URL.
///
/// The slug is the last non-empty `/`-delimited path segment. Query string and
/// fragment are ignored. Input that does not parse as an absolute URL (for
/// example `/prodotto/scarpa-44/` or a bare slug) is split as a plain path.
///
/// Returns `None` when no segment remains.
#[must_use]
pub fn slug_from_url(product_url: &str) -> Option<String> {
    let path = match Url::parse(product_url.trim()) {
        Ok(url) => url.path().to_string(),
        Err(_) => product_url
            .trim()
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .to_string(),
    };

    path.split('/')
        .filter(|segment| !segment.is_empty())
        .next_back()
        .map(String::from)
}

/// Select the first variant whose size attribute equals `size`.
///
/// An attribute qualifies when its name contains `size_hint` and its option
/// equals `size`, both compared case-insensitively after trimming. The option
/// comparison is exact, so `"44"` does not match `"144"`.
///
/// Variants are scanned in the order given and the earliest match wins.
#[must_use]
pub fn find_variant_by_size<'a>(
    variants: &'a [Variant],
    size: &str,
    size_hint: &str,
) -> Option<&'a Variant> {
    let wanted = normalize(size);
    let hint = normalize(size_hint);

    variants.iter().find(|variant| {
        variant.attributes.iter().any(|attribute| {
            normalize(&attribute.name).contains(&hint) && normalize(&attribute.option) == wanted
        })
    })
}

fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{StockStatus, VariantAttribute, VariantId};

    fn variant(id: u64, attributes: &[(&str, &str)]) -> Variant {
        Variant {
            id: VariantId::new(id),
            sku: format!("SKU-{id}"),
            name: format!("Variant {id}"),
            attributes: attributes
                .iter()
                .map(|(name, option)| VariantAttribute::new(*name, *option))
                .collect(),
            stock_quantity: Some(3),
            stock_status: StockStatus::InStock,
        }
    }

    #[test]
    fn test_slug_from_absolute_url() {
        assert_eq!(
            slug_from_url("https://shop.example/prodotto/687174006007black/").as_deref(),
            Some("687174006007black")
        );
    }

    #[test]
    fn test_slug_ignores_query_and_fragment() {
        assert_eq!(
            slug_from_url("https://shop.example/prodotto/sneaker-runner/?utm_source=ig#reviews")
                .as_deref(),
            Some("sneaker-runner")
        );
    }

    #[test]
    fn test_slug_from_relative_path() {
        assert_eq!(
            slug_from_url("/prodotto/sneaker-runner//").as_deref(),
            Some("sneaker-runner")
        );
        assert_eq!(slug_from_url("sneaker-runner").as_deref(), Some("sneaker-runner"));
    }

    #[test]
    fn test_slug_missing() {
        assert_eq!(slug_from_url("https://shop.example/"), None);
        assert_eq!(slug_from_url("///"), None);
    }

    #[test]
    fn test_first_match_wins() {
        let variants = vec![
            variant(1, &[("Size", "42")]),
            variant(2, &[("Size", "44")]),
            variant(3, &[("Size", "44")]),
        ];

        let found = find_variant_by_size(&variants, "44", DEFAULT_SIZE_HINT).expect("match");
        assert_eq!(found.id, VariantId::new(2));
    }

    #[test]
    fn test_option_match_is_exact() {
        let variants = vec![variant(1, &[("size", "144")])];
        assert!(find_variant_by_size(&variants, "44", DEFAULT_SIZE_HINT).is_none());
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let variants = vec![
            variant(1, &[("Colore", "Nero"), ("Shoe SIZE", "xl")]),
            variant(2, &[("Shoe Size", "M")]),
        ];

        let found = find_variant_by_size(&variants, " XL ", DEFAULT_SIZE_HINT).expect("match");
        assert_eq!(found.id, VariantId::new(1));
    }

    #[test]
    fn test_attribute_name_must_contain_hint() {
        let variants = vec![variant(1, &[("Colore", "44")])];
        assert!(find_variant_by_size(&variants, "44", DEFAULT_SIZE_HINT).is_none());
    }

    #[test]
    fn test_custom_size_hint() {
        let variants = vec![variant(1, &[("pa_taglia", "44")])];
        assert!(find_variant_by_size(&variants, "44", DEFAULT_SIZE_HINT).is_none());
        assert!(find_variant_by_size(&variants, "44", "Taglia").is_some());
    }
}
