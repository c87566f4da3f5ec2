//! Common types and data structures

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Column to sort the grid by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortColumn {
    Name,
    Price,
    Newest,
}

impl SortColumn {
    pub const ALL: [SortColumn; 3] = [SortColumn::Name, SortColumn::Price, SortColumn::Newest];

    pub fn label(&self) -> &'static str {
        match self {
            SortColumn::Name => "Name",
            SortColumn::Price => "Price",
            SortColumn::Newest => "Newest",
        }
    }
}

/// Which variants the grid shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VariantFilter {
    All,
    NewRelease,
    OnSale,
    Regular,
}

impl VariantFilter {
    pub const ALL: [VariantFilter; 4] = [
        VariantFilter::All,
        VariantFilter::NewRelease,
        VariantFilter::OnSale,
        VariantFilter::Regular,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            VariantFilter::All => "All",
            VariantFilter::NewRelease => "New",
            VariantFilter::OnSale => "Sale",
            VariantFilter::Regular => "Regular",
        }
    }
}

/// Catalog file structure (bundled or user-imported JSON)
#[derive(Debug, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub version: String,
    #[serde(alias = "items")]
    pub shoes: Vec<CatalogShoe>,
}

/// Individual shoe entry in a catalog file
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogShoe {
    pub slug: String,
    pub name: String,
    #[serde(alias = "imageSrc")]
    pub image_src: String,
    pub price: f64,
    #[serde(default, alias = "salePrice")]
    pub sale_price: Option<f64>,
    #[serde(alias = "releaseDate", deserialize_with = "deserialize_release_date")]
    pub release_date: DateTime<Utc>,
    #[serde(default, alias = "numOfColors")]
    pub num_of_colors: u32,
}

/// Accepts an RFC 3339 timestamp or Unix epoch milliseconds
fn deserialize_release_date<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawDate {
        Millis(i64),
        Text(String),
    }

    match RawDate::deserialize(deserializer)? {
        RawDate::Millis(ms) => Utc
            .timestamp_millis_opt(ms)
            .single()
            .ok_or_else(|| serde::de::Error::custom(format!("timestamp out of range: {}", ms))),
        RawDate::Text(s) => DateTime::parse_from_rfc3339(&s)
            .map(|d| d.with_timezone(&Utc))
            .map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rfc3339_and_millis_dates() {
        let json = r#"{
            "version": "1",
            "shoes": [
                {"slug": "a", "name": "A", "image_src": "a.jpg", "price": 10,
                 "release_date": "2024-01-01T00:00:00Z", "num_of_colors": 1},
                {"slug": "b", "name": "B", "imageSrc": "b.jpg", "price": 20, "salePrice": 15,
                 "releaseDate": 1704067200000, "numOfColors": 2}
            ]
        }"#;
        let catalog: CatalogFile = serde_json::from_str(json).unwrap();
        assert_eq!(catalog.shoes.len(), 2);
        assert_eq!(catalog.shoes[0].release_date, catalog.shoes[1].release_date);
        assert_eq!(catalog.shoes[0].sale_price, None);
        assert_eq!(catalog.shoes[1].sale_price, Some(15.0));
        assert_eq!(catalog.shoes[1].image_src, "b.jpg");
    }

    #[test]
    fn zero_sale_price_is_present() {
        let json = r#"{"shoes": [{"slug": "z", "name": "Z", "image_src": "z.jpg", "price": 10,
            "sale_price": 0, "release_date": "2024-01-01T00:00:00Z"}]}"#;
        let catalog: CatalogFile = serde_json::from_str(json).unwrap();
        assert_eq!(catalog.shoes[0].sale_price, Some(0.0));
        assert_eq!(catalog.shoes[0].num_of_colors, 0);
    }

    #[test]
    fn rejects_malformed_date() {
        let json = r#"{"shoes": [{"slug": "z", "name": "Z", "image_src": "z.jpg", "price": 10,
            "release_date": "last tuesday"}]}"#;
        assert!(serde_json::from_str::<CatalogFile>(json).is_err());
    }
}
