//! Context menu for product cards

use super::App;
use crate::theme;
use eframe::egui;
use tracing::debug;

pub(crate) enum CardAction {
    Open,
    CopyLink,
}

impl App {
    pub(crate) fn card_context_menu(&self, ui: &mut egui::Ui) -> Option<CardAction> {
        ui.spacing_mut().item_spacing.y = 2.0;
        let labels = [
            format!("{}  Open product page", egui_phosphor::regular::ARROW_SQUARE_OUT),
            format!("{}  Copy link", egui_phosphor::regular::LINK),
        ];
        let label_refs: Vec<&str> = labels.iter().map(|s| s.as_str()).collect();
        theme::set_menu_width(ui, &label_refs);

        let mut action = None;
        if theme::menu_item(ui, egui_phosphor::regular::ARROW_SQUARE_OUT, "Open product page") {
            action = Some(CardAction::Open);
            ui.close_menu();
        }
        if theme::menu_item(ui, egui_phosphor::regular::LINK, "Copy link") {
            action = Some(CardAction::CopyLink);
            ui.close_menu();
        }
        action
    }

    pub(crate) fn run_card_action(&mut self, ctx: &egui::Context, action: CardAction, href: &str) {
        match action {
            CardAction::Open => self.open_product(href),
            CardAction::CopyLink => {
                let link = self.product_link(href).unwrap_or_else(|| href.to_string());
                debug!(link = %link, "Copied product link");
                ctx.copy_text(link);
                self.show_toast("Link copied");
            }
        }
    }
}
