//! Display variant classification for catalog items.
//!
//! Every shoe is shown as exactly one variant:
//! - `OnSale`: a sale price is present (zero included)
//! - `NewRelease`: released within the recency window
//! - `Default`: everything else
//!
//! The sale check runs first, so a discounted shoe released last week is
//! `OnSale`, never both.

use crate::constants::{NEW_RELEASE_WINDOW_DAYS, RECENCY_WINDOW_DAYS_MAX, RECENCY_WINDOW_DAYS_MIN};
use crate::theme;
use chrono::{DateTime, Duration, Utc};
use egui::Color32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    NewRelease,
    OnSale,
    Default,
}

/// How long after release a shoe counts as new.
///
/// The window is exclusive: a shoe released exactly one window ago is no
/// longer new.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecencyWindow(Duration);

impl RecencyWindow {
    pub fn days(days: i64) -> Self {
        Self(Duration::days(days))
    }

    /// Window from a user-supplied day count, clamped to the supported range
    pub fn clamped_days(days: i64) -> Self {
        Self::days(days.clamp(RECENCY_WINDOW_DAYS_MIN, RECENCY_WINDOW_DAYS_MAX))
    }

    pub fn duration(&self) -> Duration {
        self.0
    }

    /// Released less than one window before `now`. Future dates have a
    /// negative age and count as new.
    pub fn contains(&self, release_date: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(release_date) < self.0
    }
}

impl Default for RecencyWindow {
    fn default() -> Self {
        Self::days(NEW_RELEASE_WINDOW_DAYS)
    }
}

/// Classify a shoe. First match wins: sale, then recency, then default.
pub fn classify(
    sale_price: Option<f64>,
    release_date: DateTime<Utc>,
    now: DateTime<Utc>,
    window: RecencyWindow,
) -> Variant {
    if sale_price.is_some() {
        Variant::OnSale
    } else if window.contains(release_date, now) {
        Variant::NewRelease
    } else {
        Variant::Default
    }
}

/// Badge content for flagged variants
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlagStyle {
    pub label: &'static str,
    pub color: Color32,
}

/// Price text treatment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceStyle {
    pub strikethrough: bool,
    /// `None` inherits the row color
    pub color: Option<Color32>,
}

/// Presentation rules selected by variant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleRule {
    pub price: PriceStyle,
    pub show_sale_price: bool,
    pub flag: Option<FlagStyle>,
}

impl Variant {
    pub fn flag(&self) -> Option<FlagStyle> {
        match self {
            Variant::OnSale => Some(FlagStyle {
                label: "Sale",
                color: theme::COLOR_PRIMARY,
            }),
            Variant::NewRelease => Some(FlagStyle {
                label: "Just Released!",
                color: theme::COLOR_SECONDARY,
            }),
            Variant::Default => None,
        }
    }

    pub fn style_rule(&self) -> StyleRule {
        let on_sale = matches!(self, Variant::OnSale);
        StyleRule {
            price: PriceStyle {
                strikethrough: on_sale,
                color: on_sale.then_some(theme::GRAY_700),
            },
            show_sale_price: on_sale,
            flag: self.flag(),
        }
    }
}
