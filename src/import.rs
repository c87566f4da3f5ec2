//! Catalog import from JSON files

use crate::constants::BUNDLED_CATALOG;
use crate::db::Database;
use crate::types::CatalogFile;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("database error: {0}")]
    Db(#[from] rusqlite::Error),
}

pub fn parse_catalog(json: &str) -> Result<CatalogFile, ImportError> {
    Ok(serde_json::from_str(json)?)
}

/// Upsert a parsed catalog and record its version. Returns rows imported.
pub fn import_catalog(db: &Database, catalog: &CatalogFile) -> Result<usize, ImportError> {
    let imported = db.import_shoes(&catalog.shoes)?;
    if !catalog.version.is_empty() {
        db.set_catalog_version(&catalog.version)?;
    }
    info!(count = imported, version = %catalog.version, "Catalog imported");
    Ok(imported)
}

pub fn import_catalog_file(db: &Database, path: &Path) -> Result<usize, ImportError> {
    debug!(path = %path.display(), "Importing catalog file");
    let json = std::fs::read_to_string(path)?;
    import_catalog(db, &parse_catalog(&json)?)
}

/// Import the bundled catalog when the database has no shoes yet
pub fn seed_if_empty(db: &Database) -> Result<usize, ImportError> {
    if db.shoe_count()? > 0 {
        return Ok(0);
    }
    info!("Database empty, importing bundled catalog");
    import_catalog(db, &parse_catalog(BUNDLED_CATALOG)?)
}
