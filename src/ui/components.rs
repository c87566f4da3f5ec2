//! Reusable UI components
//!
//! Small widgets shared by the sidebar and settings panel.

use crate::theme;
use chrono::{DateTime, Utc};
use eframe::egui;

/// Short release date for tooltips, e.g. "Oct 7, 2026"
pub fn format_release_date(date: DateTime<Utc>) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Custom checkbox widget with consistent styling
pub fn styled_checkbox(ui: &mut egui::Ui, selected: bool, size: f32) -> egui::Response {
    let (rect, response) = ui.allocate_exact_size(egui::vec2(size, size), egui::Sense::click());

    if ui.is_rect_visible(rect) {
        let painter = ui.painter();
        let rounding = 3.0;

        if selected {
            painter.rect_filled(rect, rounding, theme::COLOR_SECONDARY);
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                egui_phosphor::regular::CHECK,
                egui::FontId::proportional(size * 0.7),
                theme::COLOR_WHITE,
            );
        } else {
            painter.rect_stroke(
                rect,
                rounding,
                egui::Stroke::new(1.5, theme::GRAY_500),
                egui::StrokeKind::Inside,
            );
        }
    }

    response
}

/// Checkbox followed by a label; the whole row is clickable. Returns true if toggled.
pub fn checkbox_row(ui: &mut egui::Ui, checked: &mut bool, label: &str) -> bool {
    let toggled = ui
        .horizontal(|ui| {
            let box_clicked = styled_checkbox(ui, *checked, 16.0).clicked();
            let label_clicked = ui
                .add(
                    egui::Label::new(egui::RichText::new(label).size(theme::FONT_LABEL).color(theme::GRAY_900))
                        .sense(egui::Sense::click()),
                )
                .clicked();
            box_clicked || label_clicked
        })
        .inner;
    if toggled {
        *checked = !*checked;
    }
    toggled
}
