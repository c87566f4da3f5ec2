//! App module - contains the main application state and logic

mod context_menu;
mod filters;
mod thumbnails;
mod views;

pub use filters::variant_counts;

use thumbnails::InFlight;

use crate::db::{Database, Shoe};
use crate::import::{import_catalog_file, seed_if_empty, ImportError};
use crate::settings::Settings;
use crate::theme;
use crate::types::*;
use crate::utils::{get_cache_dir, product_url};
use crate::variant::RecencyWindow;
use eframe::egui;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

// ============================================================================
// APP STATE
// ============================================================================

pub struct App {
    pub(crate) db: Database,
    pub(crate) shoes: Vec<Shoe>,
    pub(crate) catalog_version: Option<String>,
    pub(crate) filtered_indices: Vec<usize>,
    pub(crate) search_query: String,
    // Filters
    pub(crate) variant_filter: VariantFilter,
    pub(crate) sort_column: SortColumn,
    pub(crate) sort_descending: bool,
    // View
    pub(crate) large_cards: bool,
    pub(crate) show_settings: bool,
    // Catalog settings
    pub(crate) recency_window_days: i64,
    pub(crate) store_base_url: String,
    // Images
    pub(crate) runtime: tokio::runtime::Runtime,
    pub(crate) image_cache: HashMap<String, Option<egui::TextureHandle>>,
    pub(crate) prefetch_started: bool,
    pub(crate) in_flight: InFlight,
    pub(crate) cache_dir: PathBuf,
    pub(crate) data_dir: PathBuf,
    // Toast notification
    pub(crate) toast_message: Option<String>,
    pub(crate) toast_start: Option<std::time::Instant>,
    // Window
    pub(crate) window_pos: Option<egui::Pos2>,
    pub(crate) window_size: Option<egui::Vec2>,
    pub(crate) needs_center: bool,
}

// ============================================================================
// APP INITIALIZATION & HELPERS
// ============================================================================

impl App {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        db: Database,
        settings: Settings,
        data_dir: PathBuf,
    ) -> std::io::Result<Self> {
        cc.egui_ctx.set_theme(egui::Theme::Light);

        // Phosphor icons for placeholders and menus
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        theme::apply_visuals(&cc.egui_ctx);

        let cache_dir = get_cache_dir();
        std::fs::create_dir_all(cache_dir.join("images"))?;

        let mut app = Self {
            db,
            shoes: Vec::new(),
            catalog_version: None,
            filtered_indices: Vec::new(),
            search_query: String::new(),
            variant_filter: settings.variant_filter,
            sort_column: settings.sort_column,
            sort_descending: settings.sort_descending,
            large_cards: settings.large_cards,
            show_settings: false,
            recency_window_days: settings.recency_window().duration().num_days(),
            store_base_url: settings.store_base_url().unwrap_or_default().to_string(),
            runtime: tokio::runtime::Runtime::new()?,
            image_cache: HashMap::new(),
            prefetch_started: false,
            in_flight: InFlight::default(),
            cache_dir,
            data_dir,
            toast_message: None,
            toast_start: None,
            window_pos: None,
            window_size: None,
            needs_center: false,
        };
        app.reload_shoes();
        Ok(app)
    }

    /// Re-read the catalog from the database and reset derived state
    pub fn reload_shoes(&mut self) {
        self.shoes = match self.db.get_all_shoes() {
            Ok(shoes) => shoes,
            Err(e) => {
                error!(error = %e, "Failed to load shoes");
                Vec::new()
            }
        };
        self.catalog_version = match self.db.get_catalog_version() {
            Ok(version) => version,
            Err(e) => {
                warn!(error = %e, "Failed to read catalog version");
                None
            }
        };
        self.image_cache.clear();
        self.prefetch_started = false;
        self.apply_filters();
        info!(count = self.shoes.len(), "Catalog loaded");
    }

    pub fn recency_window(&self) -> RecencyWindow {
        RecencyWindow::clamped_days(self.recency_window_days)
    }

    pub fn current_settings(&self) -> Settings {
        let store_base_url = self.store_base_url.trim();
        Settings {
            window_x: self.window_pos.map(|p| p.x),
            window_y: self.window_pos.map(|p| p.y),
            window_w: self.window_size.map(|s| s.x),
            window_h: self.window_size.map(|s| s.y),
            large_cards: self.large_cards,
            sort_column: self.sort_column,
            sort_descending: self.sort_descending,
            variant_filter: self.variant_filter,
            recency_window_days: self.recency_window_days,
            store_base_url: (!store_base_url.is_empty()).then(|| store_base_url.to_string()),
        }
    }

    /// Sidebar footer: app version, plus the catalog version once one is known
    pub fn footer_text(&self) -> String {
        footer_text(self.catalog_version.as_deref())
    }

    pub fn save_settings(&self) {
        self.current_settings().save(&self.data_dir);
    }

    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast_message = Some(message.into());
        self.toast_start = Some(std::time::Instant::now());
    }

    /// Import a catalog file and refresh the grid
    pub fn import_from_path(&mut self, path: &Path) {
        match import_catalog_file(&self.db, path) {
            Ok(count) => {
                self.reload_shoes();
                self.show_toast(format!("Imported {} shoes", count));
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "Catalog import failed");
                let message = match e {
                    ImportError::Json(_) => "Import failed: not a valid catalog file".to_string(),
                    other => format!("Import failed: {}", other),
                };
                self.show_toast(message);
            }
        }
    }

    /// Drop every shoe and re-import the bundled catalog
    pub fn reset_catalog(&mut self) {
        let result = self
            .db
            .clear_shoes()
            .map_err(ImportError::from)
            .and_then(|_| seed_if_empty(&self.db));
        match result {
            Ok(count) => {
                self.reload_shoes();
                self.show_toast(format!("Catalog reset ({} shoes)", count));
            }
            Err(e) => {
                error!(error = %e, "Catalog reset failed");
                self.show_toast(format!("Reset failed: {}", e));
            }
        }
    }

    /// Ask for a catalog file and import it
    pub fn import_with_dialog(&mut self) {
        let picked = rfd::FileDialog::new()
            .set_title("Import catalog")
            .add_filter("Catalog JSON", &["json"])
            .pick_file();
        if let Some(path) = picked {
            self.import_from_path(&path);
        }
    }

    /// Full URL for a product path, if a store URL is configured
    pub fn product_link(&self, href: &str) -> Option<String> {
        let base = self.store_base_url.trim();
        (!base.is_empty()).then(|| product_url(base, href))
    }

    /// Navigate to a product page in the browser
    pub fn open_product(&mut self, href: &str) {
        match self.product_link(href) {
            Some(url) => {
                info!(url = %url, "Opening product page");
                if let Err(e) = open::that(&url) {
                    warn!(url = %url, error = %e, "Failed to open browser");
                    self.show_toast("Could not open browser");
                }
            }
            None => {
                info!(path = %href, "No store URL configured");
                self.show_toast(format!("Set a store URL to open {}", href));
            }
        }
    }
}

pub(crate) fn footer_text(catalog_version: Option<&str>) -> String {
    match catalog_version {
        Some(v) => format!("v{}  ·  catalog {}", crate::constants::APP_VERSION, v),
        None => format!("v{}", crate::constants::APP_VERSION),
    }
}
