//! Inbound shopper request.

/// A single shopper request, either free text or explicit parameters.
///
/// Fields are kept as the caller sent them. Call [`Query::normalized`] before
/// dispatching so blank values count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    /// Free-form shopper message for intent classification.
    pub message: Option<String>,
    /// Raw search term (`q`), bypasses classification.
    pub explicit_query: Option<String>,
    pub size: Option<String>,
    pub color: Option<String>,
    /// Product ID as sent by the caller; validated when the stock check runs.
    pub product_id: Option<String>,
    /// Catalog page URL (`url`).
    pub product_url: Option<String>,
    pub debug: bool,
}

impl Query {
    /// Create a query carrying only a shopper message.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::default()
        }
    }

    /// Drop blank values so that `?q=` behaves like a missing `q`.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            message: non_blank(self.message),
            explicit_query: non_blank(self.explicit_query),
            size: non_blank(self.size),
            color: non_blank(self.color),
            product_id: non_blank(self.product_id),
            product_url: non_blank(self.product_url),
            debug: self.debug,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Interpret a textual flag such as `?debug=1`.
///
/// Any non-empty value is truthy except `0`, `false`, `no` and `off`.
#[must_use]
pub fn parse_flag(value: Option<&str>) -> bool {
    value.is_some_and(|v| {
        let v = v.trim();
        !v.is_empty()
            && !["0", "false", "no", "off"]
                .iter()
                .any(|falsy| v.eq_ignore_ascii_case(falsy))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_drops_blank_values() {
        let query = Query {
            message: Some("ciao".to_string()),
            explicit_query: Some(String::new()),
            size: Some("  ".to_string()),
            product_url: Some("https://shop.example/p/x".to_string()),
            ..Query::default()
        }
        .normalized();

        assert_eq!(query.message.as_deref(), Some("ciao"));
        assert!(query.explicit_query.is_none());
        assert!(query.size.is_none());
        assert!(query.product_url.is_some());
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag(Some("1")));
        assert!(parse_flag(Some("true")));
        assert!(parse_flag(Some("yes")));
        assert!(!parse_flag(Some("0")));
        assert!(!parse_flag(Some("FALSE")));
        assert!(!parse_flag(Some("off")));
        assert!(!parse_flag(Some("")));
        assert!(!parse_flag(None));
    }
}
