//! Database module for Shoe Catalog
//! Handles SQLite storage for catalog items and metadata

use crate::types::CatalogShoe;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Result};
use std::path::Path;
use tracing::{debug, error, warn};

/// Catalog item stored in database
#[derive(Debug, Clone, PartialEq)]
pub struct Shoe {
    pub id: i64,
    pub slug: String,
    pub name: String,
    pub image_src: String,
    pub price: f64,
    pub sale_price: Option<f64>,
    pub release_date: DateTime<Utc>,
    pub num_of_colors: u32,
}

impl Shoe {
    /// Price the customer actually pays
    pub fn effective_price(&self) -> f64 {
        self.sale_price.unwrap_or(self.price)
    }
}

pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create database at the given path
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init_schema()?;
        debug!(path = %path.display(), "Database opened");
        Ok(db)
    }

    /// Open a throwaway in-memory database
    pub fn open_in_memory() -> Result<Self> {
        let db = Self {
            conn: Connection::open_in_memory()?,
        };
        db.init_schema()?;
        Ok(db)
    }

    /// Initialize database schema
    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS shoes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                slug TEXT NOT NULL UNIQUE,
                name TEXT NOT NULL,
                image_src TEXT NOT NULL,
                price REAL NOT NULL,
                sale_price REAL,
                release_date TEXT NOT NULL,
                num_of_colors INTEGER NOT NULL DEFAULT 0
            );

            CREATE INDEX IF NOT EXISTS idx_shoes_release_date ON shoes(release_date);

            CREATE TABLE IF NOT EXISTS metadata (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    /// Clear all shoes from database
    pub fn clear_shoes(&self) -> Result<()> {
        self.conn.execute("DELETE FROM shoes", [])?;
        Ok(())
    }

    /// Import shoes from catalog data, updating existing rows by slug
    pub fn import_shoes(&self, shoes: &[CatalogShoe]) -> Result<usize> {
        let mut imported = 0;

        for shoe in shoes {
            let result = self.conn.execute(
                "INSERT INTO shoes (slug, name, image_src, price, sale_price, release_date, num_of_colors)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                 ON CONFLICT(slug) DO UPDATE SET
                    name = excluded.name,
                    image_src = excluded.image_src,
                    price = excluded.price,
                    sale_price = excluded.sale_price,
                    release_date = excluded.release_date,
                    num_of_colors = excluded.num_of_colors",
                params![
                    shoe.slug,
                    shoe.name,
                    shoe.image_src,
                    shoe.price,
                    shoe.sale_price,
                    shoe.release_date.to_rfc3339(),
                    shoe.num_of_colors
                ],
            );

            match result {
                Ok(_) => imported += 1,
                Err(e) => error!(slug = %shoe.slug, error = %e, "Failed to import shoe"),
            }
        }

        debug!(imported = imported, total = shoes.len(), "Shoes imported");
        Ok(imported)
    }

    /// Get all shoes, skipping rows with an unreadable release date
    pub fn get_all_shoes(&self) -> Result<Vec<Shoe>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, slug, name, image_src, price, sale_price, release_date, num_of_colors
             FROM shoes ORDER BY name COLLATE NOCASE",
        )?;

        let rows = stmt
            .query_map([], |row| {
                let release_date: String = row.get(6)?;
                Ok((
                    Shoe {
                        id: row.get(0)?,
                        slug: row.get(1)?,
                        name: row.get(2)?,
                        image_src: row.get(3)?,
                        price: row.get(4)?,
                        sale_price: row.get(5)?,
                        release_date: DateTime::<Utc>::MIN_UTC,
                        num_of_colors: row.get(7)?,
                    },
                    release_date,
                ))
            })?
            .collect::<Result<Vec<_>>>()?;

        let shoes = rows
            .into_iter()
            .filter_map(|(mut shoe, raw)| match DateTime::parse_from_rfc3339(&raw) {
                Ok(date) => {
                    shoe.release_date = date.with_timezone(&Utc);
                    Some(shoe)
                }
                Err(e) => {
                    warn!(slug = %shoe.slug, value = %raw, error = %e, "Skipping shoe with bad release date");
                    None
                }
            })
            .collect();

        Ok(shoes)
    }

    /// Get catalog version
    pub fn get_catalog_version(&self) -> Result<Option<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT value FROM metadata WHERE key = 'catalog_version'")?;
        let mut rows = stmt.query([])?;

        if let Some(row) = rows.next()? {
            Ok(Some(row.get(0)?))
        } else {
            Ok(None)
        }
    }

    /// Set catalog version
    pub fn set_catalog_version(&self, version: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO metadata (key, value) VALUES ('catalog_version', ?1)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![version],
        )?;
        Ok(())
    }

    /// Get shoe count
    pub fn shoe_count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM shoes", [], |r| r.get(0))?;
        Ok(count as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn catalog_shoe(slug: &str, name: &str, sale_price: Option<f64>) -> CatalogShoe {
        CatalogShoe {
            slug: slug.to_string(),
            name: name.to_string(),
            image_src: format!("images/{}.jpg", slug),
            price: 120.0,
            sale_price,
            release_date: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            num_of_colors: 3,
        }
    }

    #[test]
    fn import_and_load_preserves_sale_price_presence() {
        let db = Database::open_in_memory().unwrap();
        let imported = db
            .import_shoes(&[
                catalog_shoe("full", "Full Price", None),
                catalog_shoe("free", "Free", Some(0.0)),
                catalog_shoe("deal", "Deal", Some(89.99)),
            ])
            .unwrap();
        assert_eq!(imported, 3);

        let shoes = db.get_all_shoes().unwrap();
        let by_slug = |slug: &str| shoes.iter().find(|s| s.slug == slug).unwrap().clone();
        assert_eq!(by_slug("full").sale_price, None);
        assert_eq!(by_slug("free").sale_price, Some(0.0));
        assert_eq!(by_slug("deal").sale_price, Some(89.99));
        assert_eq!(
            by_slug("deal").release_date,
            Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
        );
    }

    #[test]
    fn import_upserts_by_slug() {
        let db = Database::open_in_memory().unwrap();
        db.import_shoes(&[catalog_shoe("air-max-90", "Air Max 90", None)])
            .unwrap();
        db.import_shoes(&[catalog_shoe("air-max-90", "Air Max 90 SE", Some(99.0))])
            .unwrap();

        assert_eq!(db.shoe_count().unwrap(), 1);
        let shoes = db.get_all_shoes().unwrap();
        assert_eq!(shoes[0].name, "Air Max 90 SE");
        assert_eq!(shoes[0].sale_price, Some(99.0));
    }

    #[test]
    fn shoes_are_ordered_by_name_case_insensitive() {
        let db = Database::open_in_memory().unwrap();
        db.import_shoes(&[
            catalog_shoe("b", "blazer", None),
            catalog_shoe("a", "Air Force", None),
            catalog_shoe("c", "Cortez", None),
        ])
        .unwrap();
        let names: Vec<String> = db.get_all_shoes().unwrap().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["Air Force", "blazer", "Cortez"]);
    }

    #[test]
    fn skips_rows_with_unparseable_dates() {
        let db = Database::open_in_memory().unwrap();
        db.import_shoes(&[catalog_shoe("ok", "Ok", None)]).unwrap();
        db.conn
            .execute(
                "INSERT INTO shoes (slug, name, image_src, price, release_date) VALUES ('bad', 'Bad', 'x', 1.0, 'soon')",
                [],
            )
            .unwrap();
        let shoes = db.get_all_shoes().unwrap();
        assert_eq!(shoes.len(), 1);
        assert_eq!(shoes[0].slug, "ok");
    }

    #[test]
    fn catalog_version_round_trips() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(db.get_catalog_version().unwrap(), None);
        db.set_catalog_version("2026.10").unwrap();
        db.set_catalog_version("2026.11").unwrap();
        assert_eq!(db.get_catalog_version().unwrap().as_deref(), Some("2026.11"));
        db.clear_shoes().unwrap();
        assert_eq!(db.shoe_count().unwrap(), 0);
    }
}
