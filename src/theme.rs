//! Centralized theme constants for Shoe Catalog
//! All colors, weights, sizes, and styling should reference these constants

use egui::Color32;

// =============================================================================
// COLORS - Palette
// =============================================================================
pub const COLOR_WHITE: Color32 = Color32::WHITE;
pub const COLOR_PRIMARY: Color32 = Color32::from_rgb(0xc5, 0x29, 0x5d); // hsl(340 65% 47%)
pub const COLOR_SECONDARY: Color32 = Color32::from_rgb(0x67, 0x67, 0xd9); // hsl(240 60% 63%)

// =============================================================================
// COLORS - Grays
// =============================================================================
pub const GRAY_100: Color32 = Color32::from_rgb(0xf2, 0xf2, 0xf3);
pub const GRAY_300: Color32 = Color32::from_rgb(0xdb, 0xdc, 0xde);
pub const GRAY_500: Color32 = Color32::from_rgb(0x8d, 0x90, 0x96);
pub const GRAY_700: Color32 = Color32::from_rgb(0x61, 0x65, 0x6b); // muted text, struck prices
pub const GRAY_900: Color32 = Color32::from_rgb(0x32, 0x33, 0x35); // names, body text

// =============================================================================
// COLORS - Surfaces
// =============================================================================
pub const BG_BASE: Color32 = Color32::WHITE;
pub const BG_SIDEBAR: Color32 = Color32::from_rgb(0xfa, 0xfa, 0xfb);
pub const BG_IMAGE_PLACEHOLDER: Color32 = GRAY_100;
pub const BG_HOVER: Color32 = Color32::from_rgba_premultiplied(0x0c, 0x0c, 0x0d, 0x0d);
pub const BORDER_SUBTLE: Color32 = GRAY_300;

// =============================================================================
// TYPOGRAPHY - Weights
// =============================================================================

/// Font weight. egui ships a single weight, so bold is painted as a double stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weight {
    Normal,
    Medium,
    Bold,
}

// =============================================================================
// TYPOGRAPHY - Font Sizes
// =============================================================================
pub const FONT_TITLE: f32 = 18.0;
pub const FONT_BODY: f32 = 16.0; // 1rem
pub const FONT_LABEL: f32 = 13.0;
pub const FONT_FLAG: f32 = 14.0; // 14/16 rem
pub const FONT_SMALL: f32 = 11.0;

// =============================================================================
// DIMENSIONS - Layout
// =============================================================================
pub const SIDEBAR_WIDTH: f32 = 248.0;

// =============================================================================
// DIMENSIONS - Cards
// =============================================================================
pub const CARD_WIDTH_SMALL: f32 = 220.0;
pub const CARD_WIDTH_LARGE: f32 = 300.0;
/// Image height relative to card width
pub const CARD_IMAGE_ASPECT: f32 = 0.9;
pub const CARD_ROW_HEIGHT: f32 = 24.0;

// =============================================================================
// DIMENSIONS - Flag
// =============================================================================
pub const FLAG_HEIGHT: f32 = 32.0;
pub const FLAG_TOP: f32 = 12.0;
/// Negative right offset: the flag hangs past the card edge
pub const FLAG_OVERHANG: f32 = 4.0;
pub const FLAG_PADDING_X: f32 = 8.0;

// =============================================================================
// CORNER RADIUS
// =============================================================================
pub const RADIUS_SMALL: f32 = 2.0;
pub const RADIUS_DEFAULT: f32 = 4.0;
pub const RADIUS_LARGE: f32 = 8.0;

// =============================================================================
// STROKE WIDTHS
// =============================================================================
pub const STROKE_DEFAULT: f32 = 1.0;

// =============================================================================
// SPACING
// =============================================================================
pub const SPACING_XS: f32 = 2.0;
pub const SPACING_SM: f32 = 4.0;
pub const SPACING_MD: f32 = 8.0;
pub const SPACING_LG: f32 = 12.0;
pub const SPACING_XL: f32 = 16.0;
pub const SPACING_XXL: f32 = 32.0;

// =============================================================================
// HELPER - Apply global visuals
// =============================================================================
pub fn apply_visuals(ctx: &egui::Context) {
    ctx.set_visuals(egui::Visuals {
        dark_mode: false,
        panel_fill: BG_BASE,
        window_fill: BG_BASE,
        extreme_bg_color: BG_BASE,
        faint_bg_color: GRAY_100,
        hyperlink_color: COLOR_SECONDARY,
        selection: egui::style::Selection {
            bg_fill: Color32::from_rgb(0xd6, 0xd6, 0xf5),
            stroke: egui::Stroke::NONE,
        },
        widgets: egui::style::Widgets {
            noninteractive: egui::style::WidgetVisuals {
                bg_fill: BG_SIDEBAR,
                weak_bg_fill: GRAY_100,
                bg_stroke: egui::Stroke::new(STROKE_DEFAULT, BORDER_SUBTLE),
                fg_stroke: egui::Stroke::new(STROKE_DEFAULT, GRAY_900),
                corner_radius: RADIUS_DEFAULT.into(),
                expansion: 0.0,
            },
            inactive: egui::style::WidgetVisuals {
                bg_fill: GRAY_100,
                weak_bg_fill: GRAY_100,
                bg_stroke: egui::Stroke::new(STROKE_DEFAULT, BORDER_SUBTLE),
                fg_stroke: egui::Stroke::new(STROKE_DEFAULT, GRAY_900),
                corner_radius: RADIUS_DEFAULT.into(),
                expansion: 0.0,
            },
            hovered: egui::style::WidgetVisuals {
                bg_fill: GRAY_300,
                weak_bg_fill: GRAY_300,
                bg_stroke: egui::Stroke::NONE,
                fg_stroke: egui::Stroke::new(1.5, GRAY_900),
                corner_radius: RADIUS_DEFAULT.into(),
                expansion: 0.0,
            },
            active: egui::style::WidgetVisuals {
                bg_fill: GRAY_300,
                weak_bg_fill: GRAY_300,
                bg_stroke: egui::Stroke::NONE,
                fg_stroke: egui::Stroke::new(STROKE_DEFAULT, GRAY_900),
                corner_radius: RADIUS_DEFAULT.into(),
                expansion: -2.0,
            },
            open: egui::style::WidgetVisuals {
                bg_fill: GRAY_100,
                weak_bg_fill: GRAY_100,
                bg_stroke: egui::Stroke::new(STROKE_DEFAULT, BORDER_SUBTLE),
                fg_stroke: egui::Stroke::new(STROKE_DEFAULT, GRAY_900),
                corner_radius: RADIUS_DEFAULT.into(),
                expansion: 0.0,
            },
        },
        striped: false,
        interact_cursor: Some(egui::CursorIcon::PointingHand),
        popup_shadow: egui::epaint::Shadow {
            offset: [0, 4],
            blur: 12,
            spread: 0,
            color: Color32::from_black_alpha(40),
        },
        window_stroke: egui::Stroke::new(1.0, BORDER_SUBTLE),
        window_corner_radius: egui::CornerRadius::same(8),
        menu_corner_radius: egui::CornerRadius::same(8),
        ..egui::Visuals::light()
    });

    ctx.style_mut(|style| {
        style.interaction.selectable_labels = false;
        style.spacing.menu_margin = egui::Margin::symmetric(6, 4);
        style.spacing.item_spacing = egui::vec2(8.0, 6.0);
        style.spacing.button_padding = egui::vec2(12.0, 6.0);
        style.spacing.scroll.bar_width = 6.0;
        style.spacing.scroll.floating = false;
    });
}

// =============================================================================
// HELPER - Sidebar frame
// =============================================================================
pub fn sidebar_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(BG_SIDEBAR)
        .inner_margin(egui::Margin::same(SPACING_XL as i8))
        .stroke(egui::Stroke::new(STROKE_DEFAULT, BORDER_SUBTLE))
}

/// Creates a section panel frame with fill and border
pub fn section_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(BG_BASE)
        .stroke(egui::Stroke::new(STROKE_DEFAULT, BORDER_SUBTLE))
        .corner_radius(RADIUS_DEFAULT)
        .inner_margin(egui::Margin::same(12))
}

// =============================================================================
// HELPER - Buttons and menus
// =============================================================================

/// Default gray button
pub fn button(text: impl Into<String>) -> egui::Button<'static> {
    egui::Button::new(text.into())
        .fill(GRAY_100)
        .corner_radius(RADIUS_DEFAULT)
}

/// Pill used by the variant filter; selected pills take the accent color
pub fn filter_pill(ui: &mut egui::Ui, label: &str, selected: bool) -> egui::Response {
    let (fill, text) = if selected {
        (COLOR_SECONDARY, COLOR_WHITE)
    } else {
        (GRAY_100, GRAY_900)
    };
    ui.add(
        egui::Button::new(egui::RichText::new(label).size(FONT_LABEL).color(text))
            .fill(fill)
            .corner_radius(RADIUS_LARGE),
    )
}

/// Context menu item with icon. Returns true if clicked.
pub fn menu_item(ui: &mut egui::Ui, icon: &str, label: &str) -> bool {
    let text = format!("{}  {}", icon, label);
    let w = ui.available_width();
    let (rect, response) = ui.allocate_exact_size(egui::vec2(w, 24.0), egui::Sense::click());
    if response.hovered() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
        ui.painter().rect_filled(rect, RADIUS_DEFAULT, GRAY_100);
    }
    ui.painter().text(
        rect.left_center() + egui::vec2(8.0, 0.0),
        egui::Align2::LEFT_CENTER,
        text,
        egui::FontId::proportional(FONT_LABEL),
        GRAY_900,
    );
    response.clicked()
}

/// Sets context menu width to 1.5x the widest label.
pub fn set_menu_width(ui: &mut egui::Ui, labels: &[&str]) {
    let max_text = labels
        .iter()
        .map(|l| {
            ui.fonts(|f| {
                f.layout_no_wrap(l.to_string(), egui::FontId::proportional(FONT_LABEL), GRAY_900)
                    .rect
                    .width()
            })
        })
        .fold(0.0_f32, f32::max);
    let w = (max_text + 16.0) * 1.5;
    ui.set_min_width(w);
    ui.set_max_width(w);
}
