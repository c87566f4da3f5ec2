//! View rendering (card grid, empty state, toast)

use super::context_menu::CardAction;
use super::App;
use crate::theme;
use crate::ui::card::{card_height, paint_card, render_card};
use crate::ui::components::format_release_date;
use chrono::Utc;
use eframe::egui;

const TOAST_SECONDS: f32 = 3.0;

/// Column count and card width that fill `available` with `spacing` between cards
pub(crate) fn grid_layout(available: f32, base_w: f32, spacing: f32) -> (usize, f32) {
    let num_cols = ((available + spacing) / (base_w + spacing)).floor().max(1.0);
    let card_w = ((available - spacing * (num_cols - 1.0)) / num_cols).floor().max(1.0);
    (num_cols as usize, card_w)
}

impl App {
    pub(crate) fn render_grid_view(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        if self.filtered_indices.is_empty() {
            ui.centered_and_justified(|ui| {
                ui.label(
                    egui::RichText::new("No shoes match your filters")
                        .size(theme::FONT_TITLE)
                        .color(theme::GRAY_500),
                );
            });
            return;
        }

        // Gap wide enough for the flag overhanging each card's right edge
        let spacing = theme::SPACING_XXL;
        let base_w = if self.large_cards {
            theme::CARD_WIDTH_LARGE
        } else {
            theme::CARD_WIDTH_SMALL
        };
        let now = Utc::now();
        let window = self.recency_window();
        let mut pending: Option<(CardAction, String)> = None;

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .id_salt("grid_scroll")
            .show(ui, |ui| {
                let (_, card_w) = grid_layout(ui.available_width() - theme::FLAG_OVERHANG, base_w, spacing);
                let card_h = card_height(card_w);
                ui.horizontal_wrapped(|ui| {
                    ui.spacing_mut().item_spacing = egui::vec2(spacing, spacing);
                    let indices = self.filtered_indices.clone();
                    for &shoe_idx in &indices {
                        let shoe = self.shoes[shoe_idx].clone();
                        let (rect, response) =
                            ui.allocate_exact_size(egui::vec2(card_w, card_h), egui::Sense::click());

                        let card = render_card(&shoe, now, window);
                        if ui.is_rect_visible(rect) {
                            let texture = self.load_image(ctx, &shoe);
                            paint_card(ui, rect, &card, texture.as_ref(), response.hovered());
                        }

                        if response.hovered() {
                            ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
                        }
                        let response = response.on_hover_text(format!(
                            "Released {}",
                            format_release_date(shoe.release_date)
                        ));

                        if response.clicked() {
                            pending = Some((CardAction::Open, card.href.clone()));
                        }
                        response.context_menu(|ui| {
                            if let Some(action) = self.card_context_menu(ui) {
                                pending = Some((action, card.href.clone()));
                            }
                        });
                    }
                });
            });

        if let Some((action, href)) = pending {
            self.run_card_action(ctx, action, &href);
        }
    }

    /// Toast anchored to the bottom of the grid, fades out
    pub(crate) fn render_toast(&mut self, ctx: &egui::Context, panel_rect: egui::Rect) {
        let Some(start) = self.toast_start else {
            return;
        };
        let elapsed = start.elapsed().as_secs_f32();
        if elapsed > TOAST_SECONDS {
            self.toast_message = None;
            self.toast_start = None;
            return;
        }
        let Some(message) = self.toast_message.clone() else {
            return;
        };
        let alpha = ((TOAST_SECONDS - elapsed) / 0.3).min(1.0);

        egui::Area::new(egui::Id::new("toast"))
            .order(egui::Order::Foreground)
            .pivot(egui::Align2::CENTER_BOTTOM)
            .fixed_pos(egui::pos2(panel_rect.center().x, panel_rect.bottom() - theme::SPACING_XL))
            .show(ctx, |ui| {
                ui.set_opacity(alpha);
                egui::Frame::new()
                    .fill(theme::GRAY_900)
                    .corner_radius(theme::RADIUS_LARGE)
                    .inner_margin(egui::Margin::symmetric(14, 8))
                    .show(ui, |ui| {
                        ui.label(
                            egui::RichText::new(message)
                                .size(theme::FONT_LABEL)
                                .color(theme::COLOR_WHITE),
                        );
                    });
            });
        ctx.request_repaint();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_fills_width() {
        let (cols, w) = grid_layout(1000.0, 300.0, 32.0);
        assert_eq!(cols, 3);
        assert!(w >= 300.0);
        assert!(cols as f32 * w + (cols as f32 - 1.0) * 32.0 <= 1000.0);
    }

    #[test]
    fn narrow_panel_still_gets_one_column() {
        let (cols, w) = grid_layout(150.0, 300.0, 32.0);
        assert_eq!(cols, 1);
        assert_eq!(w, 150.0);
    }
}
