//! Utility functions

use crate::constants::{APP_NAME, SHOE_ROUTE};
use std::path::PathBuf;

/// Get the app data directory path
pub fn get_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Get the cache directory path
pub fn get_cache_dir() -> PathBuf {
    get_data_dir().join("cache")
}

/// Format an amount as dollars: "$89.99", "$1,499.50". Whole amounts drop the cents ("$120").
pub fn format_price(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let (whole, frac) = (cents / 100, cents % 100);
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if frac == 0 {
        format!("{}${}", sign, grouped)
    } else {
        format!("{}${}.{:02}", sign, grouped, frac)
    }
}

/// "1 Color", "0 Colors", "3 Colors"
pub fn pluralize(noun: &str, count: u32) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

/// Navigation target for a product page
pub fn product_path(slug: &str) -> String {
    format!("{}/{}", SHOE_ROUTE, slug)
}

/// Absolute product URL under a store base URL
pub fn product_url(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_prices() {
        assert_eq!(format_price(89.99), "$89.99");
        assert_eq!(format_price(120.0), "$120");
        assert_eq!(format_price(149.99), "$149.99");
        assert_eq!(format_price(0.0), "$0");
        assert_eq!(format_price(1499.5), "$1,499.50");
        assert_eq!(format_price(1_234_567.0), "$1,234,567");
        assert_eq!(format_price(999.999), "$1,000");
    }

    #[test]
    fn pluralizes_colors() {
        assert_eq!(pluralize("Color", 1), "1 Color");
        assert_eq!(pluralize("Color", 0), "0 Colors");
        assert_eq!(pluralize("Color", 2), "2 Colors");
        assert_eq!(pluralize("Color", 12), "12 Colors");
    }

    #[test]
    fn builds_product_paths() {
        assert_eq!(product_path("air-max-90"), "/shoe/air-max-90");
        assert_eq!(
            product_url("https://shop.example/", "/shoe/air-max-90"),
            "https://shop.example/shoe/air-max-90"
        );
        assert_eq!(
            product_url("https://shop.example", "/shoe/x"),
            "https://shop.example/shoe/x"
        );
    }
}
