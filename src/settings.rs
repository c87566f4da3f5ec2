//! User settings stored as settings.json in the app data directory

use crate::constants::NEW_RELEASE_WINDOW_DAYS;
use crate::types::{SortColumn, VariantFilter};
use crate::variant::RecencyWindow;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Window geometry
    pub window_x: Option<f32>,
    pub window_y: Option<f32>,
    pub window_w: Option<f32>,
    pub window_h: Option<f32>,

    // View
    pub large_cards: bool,
    pub sort_column: SortColumn,
    pub sort_descending: bool,
    pub variant_filter: VariantFilter,

    // Catalog
    pub recency_window_days: i64,
    /// Product links open under this URL; unset means links are only logged
    pub store_base_url: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_x: None,
            window_y: None,
            window_w: None,
            window_h: None,
            large_cards: true,
            sort_column: SortColumn::Name,
            sort_descending: false,
            variant_filter: VariantFilter::All,
            recency_window_days: NEW_RELEASE_WINDOW_DAYS,
            store_base_url: None,
        }
    }
}

impl Settings {
    pub fn load(data_dir: &Path) -> Self {
        let path = data_dir.join("settings.json");
        match std::fs::read_to_string(&path) {
            Ok(s) => match serde_json::from_str(&s) {
                Ok(settings) => {
                    debug!(path = %path.display(), "Settings loaded");
                    settings
                }
                Err(e) => {
                    warn!(error = %e, "Failed to parse settings, using defaults");
                    Self::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No settings file found, using defaults");
                Self::default()
            }
            Err(e) => {
                warn!(error = %e, path = %path.display(), "Failed to read settings, using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self, data_dir: &Path) {
        let path = data_dir.join("settings.json");
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&path, json) {
                    warn!(error = %e, "Failed to save settings");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize settings"),
        }
    }

    /// Recency window clamped to the supported range
    pub fn recency_window(&self) -> RecencyWindow {
        RecencyWindow::clamped_days(self.recency_window_days)
    }

    /// Base URL with surrounding whitespace removed, `None` when blank
    pub fn store_base_url(&self) -> Option<&str> {
        self.store_base_url
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{RECENCY_WINDOW_DAYS_MAX, RECENCY_WINDOW_DAYS_MIN};

    fn temp_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("shoe-catalog-{}-{}", name, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = temp_dir("settings-roundtrip");
        let settings = Settings {
            large_cards: false,
            sort_column: SortColumn::Price,
            sort_descending: true,
            variant_filter: VariantFilter::OnSale,
            recency_window_days: 14,
            store_base_url: Some("https://shop.example".to_string()),
            ..Settings::default()
        };
        settings.save(&dir);
        assert_eq!(Settings::load(&dir), settings);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn missing_or_broken_file_falls_back_to_defaults() {
        let dir = temp_dir("settings-broken");
        assert_eq!(Settings::load(&dir), Settings::default());

        std::fs::write(dir.join("settings.json"), "{ not json").unwrap();
        assert_eq!(Settings::load(&dir), Settings::default());
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn unreadable_settings_fall_back_to_defaults() {
        let dir = temp_dir("settings-unreadable");
        // A directory where the file should be: the read fails with something other than NotFound
        std::fs::create_dir_all(dir.join("settings.json")).unwrap();
        assert_eq!(Settings::load(&dir), Settings::default());
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn recency_window_change_survives_a_save() {
        let dir = temp_dir("settings-recency");
        let mut settings = Settings::load(&dir);
        settings.recency_window_days = 90;
        settings.save(&dir);

        let reloaded = Settings::load(&dir);
        assert_eq!(reloaded.recency_window_days, 90);
        assert_eq!(reloaded.recency_window().duration().num_days(), 90);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_fields() {
        let settings: Settings = serde_json::from_str(r#"{"large_cards": false}"#).unwrap();
        assert!(!settings.large_cards);
        assert_eq!(settings.recency_window_days, NEW_RELEASE_WINDOW_DAYS);
        assert_eq!(settings.variant_filter, VariantFilter::All);
    }

    #[test]
    fn recency_window_is_clamped() {
        let mut settings = Settings::default();
        assert_eq!(settings.recency_window(), RecencyWindow::default());

        settings.recency_window_days = 0;
        assert_eq!(settings.recency_window(), RecencyWindow::days(RECENCY_WINDOW_DAYS_MIN));
        settings.recency_window_days = 10_000;
        assert_eq!(settings.recency_window(), RecencyWindow::days(RECENCY_WINDOW_DAYS_MAX));
    }

    #[test]
    fn blank_store_url_is_none() {
        let mut settings = Settings::default();
        settings.store_base_url = Some("   ".to_string());
        assert_eq!(settings.store_base_url(), None);
        settings.store_base_url = Some(" https://shop.example ".to_string());
        assert_eq!(settings.store_base_url(), Some("https://shop.example"));
    }
}
