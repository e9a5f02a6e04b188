//! Field normalisation shared by the catalog operations.
//!
//! Text fields are trimmed and limited to [`MAX_LENGTH`] characters, slugs are
//! restricted to `[-a-zA-Z0-9_]`, and decimals must fit their column precision.

use crate::errors::{Error, Result};
use deunicode::deunicode;
use rust_decimal::Decimal;

/// Maximum length of every text column
pub const MAX_LENGTH: usize = 255;

/// Digits and decimal places of `products.price`
pub const PRICE_PRECISION: (u32, u32) = (15, 2);

/// Digits and decimal places of `property_values.value_decimal`
pub const VALUE_PRECISION: (u32, u32) = (11, 2);

/// Turns free text into a URL-safe slug.
///
/// Non-ASCII text is transliterated first (`Обувь` becomes `obuv`). Then ASCII
/// letters, digits and underscores are kept (lower-cased), runs of whitespace
/// and hyphens become a single hyphen, everything else is dropped, and leading
/// and trailing hyphens and underscores are trimmed.
#[must_use]
pub fn slugify(text: &str) -> String {
    let ascii = deunicode(text.trim());
    let mut slug = String::with_capacity(ascii.len());
    let mut pending_dash = false;

    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else if c.is_whitespace() || c == '-' {
            pending_dash = true;
        }
    }

    slug.trim_matches(|c| c == '-' || c == '_').to_string()
}

/// True for non-empty strings made of ASCII letters, digits, `-` and `_`
#[must_use]
pub fn is_valid_slug(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Trims `value` and checks it is non-empty and not too long
pub fn clean_text(field: &'static str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(Error::Validation {
            field,
            message: "cannot be empty".to_string(),
        });
    }
    if value.chars().count() > MAX_LENGTH {
        return Err(Error::Validation {
            field,
            message: format!("longer than {MAX_LENGTH} characters"),
        });
    }
    Ok(value.to_string())
}

/// Uses `value` as a slug, or derives one from `source` when absent
pub fn clean_slug(field: &'static str, value: Option<&str>, source: &str) -> Result<String> {
    let slug = value.map_or_else(|| slugify(source), |v| v.trim().to_string());
    if !is_valid_slug(&slug) {
        return Err(Error::Validation {
            field,
            message: format!(
                "'{slug}' must consist of letters, numbers, underscores or hyphens"
            ),
        });
    }
    if slug.len() > MAX_LENGTH {
        return Err(Error::Validation {
            field,
            message: format!("longer than {MAX_LENGTH} characters"),
        });
    }
    Ok(slug)
}

/// True when `value` fits a column of `(max_digits, places)`
#[must_use]
pub fn fits_precision(value: Decimal, (max_digits, places): (u32, u32)) -> bool {
    let normalized = value.normalize();
    if normalized.scale() > places {
        return false;
    }
    let integer_digits = max_digits - places;
    let limit = Decimal::from(10_u64.pow(integer_digits));
    value.abs().trunc() < limit
}

/// Checks a product price: non-negative and within the column precision
pub fn clean_price(price: Decimal) -> Result<Decimal> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(Error::InvalidPrice { price });
    }
    if !fits_precision(price, PRICE_PRECISION) {
        return Err(Error::InvalidPrice { price });
    }
    Ok(price)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello, World!"), "hello-world");
        assert_eq!(slugify("  Navy   Blue "), "navy-blue");
        assert_eq!(slugify("Screen size -- inches"), "screen-size-inches");
        assert_eq!(slugify("snake_case"), "snake_case");
        assert_eq!(slugify("13.3"), "133");
        assert_eq!(slugify("Ünïcode"), "unicode");
        assert_eq!(slugify("Обувь"), "obuv");
        assert_eq!(slugify("Обувь  Nike"), "obuv-nike");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_is_valid_slug() {
        assert!(is_valid_slug("t-shirts_2"));
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("t shirts"));
        assert!(!is_valid_slug("t/shirts"));
    }

    #[test]
    fn test_clean_text() {
        assert_eq!(clean_text("title", "  Widget ").unwrap(), "Widget");
        assert!(matches!(
            clean_text("title", "   "),
            Err(Error::Validation { field: "title", .. })
        ));
        assert!(clean_text("title", &"x".repeat(MAX_LENGTH)).is_ok());
        assert!(clean_text("title", &"x".repeat(MAX_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_clean_slug() {
        assert_eq!(clean_slug("slug", None, "Summer Shoes").unwrap(), "summer-shoes");
        assert_eq!(clean_slug("slug", Some(" given "), "ignored").unwrap(), "given");
        assert!(clean_slug("slug", Some("not valid"), "x").is_err());
        assert!(clean_slug("slug", None, "???").is_err());
    }

    #[test]
    fn test_clean_price() {
        assert!(clean_price(Decimal::ZERO).is_ok());
        assert!(clean_price(Decimal::new(1999, 2)).is_ok());
        assert!(clean_price(Decimal::new(15000, 3)).is_ok());
        assert!(matches!(
            clean_price(Decimal::new(-1, 0)),
            Err(Error::InvalidPrice { .. })
        ));
        assert!(clean_price(Decimal::new(1001, 3)).is_err());
        assert!(clean_price(Decimal::from(10_u64.pow(13))).is_err());
        assert!(clean_price(Decimal::from(10_u64.pow(13) - 1)).is_ok());
    }
}
