//! Application constants and configuration

pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_NAME: &str = "Shoe Catalog";

/// Route prefix for product pages, e.g. `/shoe/air-max-90`
pub const SHOE_ROUTE: &str = "/shoe";

/// Days after release during which a shoe is flagged as new
pub const NEW_RELEASE_WINDOW_DAYS: i64 = 30;
pub const RECENCY_WINDOW_DAYS_MIN: i64 = 1;
pub const RECENCY_WINDOW_DAYS_MAX: i64 = 365;

/// Catalog shipped with the binary, imported when the database is empty
pub const BUNDLED_CATALOG: &str = include_str!("../assets/catalog.json");

/// Concurrent remote image downloads
pub const IMAGE_FETCH_CONCURRENCY: usize = 8;
