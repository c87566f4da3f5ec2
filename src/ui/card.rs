//! Product card
//!
//! A card is built in two steps. [`build_card`] turns a shoe and its variant
//! into a [`CardView`], a plain tree with every conditional already decided
//! by the variant's [`StyleRule`](crate::variant::StyleRule). [`paint_card`] draws that tree into a rect.

use crate::db::Shoe;
use crate::theme::{self, Weight};
use crate::utils::{format_price, pluralize, product_path};
use crate::variant::{classify, RecencyWindow, Variant};
use chrono::{DateTime, Utc};
use eframe::egui;
use egui::Color32;
use std::sync::Arc;

/// A run of styled text
#[derive(Debug, Clone, PartialEq)]
pub struct TextNode {
    pub text: String,
    /// `None` inherits the card text color
    pub color: Option<Color32>,
    pub weight: Weight,
    pub strikethrough: bool,
}

impl TextNode {
    fn colored(text: String, color: Color32, weight: Weight) -> Self {
        Self {
            text,
            color: Some(color),
            weight,
            strikethrough: false,
        }
    }
}

/// Badge pinned to the card corner
#[derive(Debug, Clone, PartialEq)]
pub struct FlagView {
    pub label: String,
    pub color: Color32,
}

/// Everything needed to draw one product card
#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub variant: Variant,
    /// Navigation target, `/shoe/<slug>`
    pub href: String,
    pub image_src: String,
    pub name: TextNode,
    pub price: TextNode,
    pub color_info: TextNode,
    /// Shown next to the color count, only for sale items
    pub sale_price: Option<TextNode>,
    pub flag: Option<FlagView>,
}

/// Classify then build
pub fn render_card(shoe: &Shoe, now: DateTime<Utc>, window: RecencyWindow) -> CardView {
    let variant = classify(shoe.sale_price, shoe.release_date, now, window);
    build_card(shoe, variant)
}

pub fn build_card(shoe: &Shoe, variant: Variant) -> CardView {
    let rule = variant.style_rule();

    let price = TextNode {
        text: format_price(shoe.price),
        color: rule.price.color,
        weight: Weight::Normal,
        strikethrough: rule.price.strikethrough,
    };

    let sale_price = match (rule.show_sale_price, shoe.sale_price) {
        (true, Some(amount)) => Some(TextNode::colored(
            format_price(amount),
            theme::COLOR_PRIMARY,
            Weight::Medium,
        )),
        _ => None,
    };

    CardView {
        variant,
        href: product_path(&shoe.slug),
        image_src: shoe.image_src.clone(),
        name: TextNode::colored(shoe.name.clone(), theme::GRAY_900, Weight::Medium),
        price,
        color_info: TextNode::colored(pluralize("Color", shoe.num_of_colors), theme::GRAY_700, Weight::Normal),
        sale_price,
        flag: rule.flag.map(|f| FlagView {
            label: f.label.to_string(),
            color: f.color,
        }),
    }
}

/// Card height for a given width: image, spacer, two text rows
pub fn card_height(width: f32) -> f32 {
    width * theme::CARD_IMAGE_ASPECT + theme::SPACING_LG + theme::CARD_ROW_HEIGHT * 2.0
}

/// Paint a card into `rect`. The flag overhangs the right edge by a few pixels,
/// so the caller should leave horizontal spacing between cards.
pub fn paint_card(
    ui: &egui::Ui,
    rect: egui::Rect,
    card: &CardView,
    texture: Option<&egui::TextureHandle>,
    hovered: bool,
) {
    let painter = ui.painter();

    let image_rect = egui::Rect::from_min_size(
        rect.min,
        egui::vec2(rect.width(), rect.width() * theme::CARD_IMAGE_ASPECT),
    );
    match texture {
        Some(tex) => {
            let uv = cover_uv(tex.size_vec2(), image_rect.size());
            let mut shape = egui::epaint::RectShape::filled(
                image_rect,
                egui::CornerRadius::same(theme::RADIUS_LARGE as u8),
                Color32::WHITE,
            );
            shape.brush = Some(Arc::new(egui::epaint::Brush {
                fill_texture_id: tex.id(),
                uv,
            }));
            painter.add(shape);
        }
        None => {
            painter.rect_filled(image_rect, theme::RADIUS_LARGE, theme::BG_IMAGE_PLACEHOLDER);
            painter.text(
                image_rect.center(),
                egui::Align2::CENTER_CENTER,
                egui_phosphor::regular::IMAGE,
                egui::FontId::proportional(image_rect.width() * 0.25),
                theme::GRAY_300,
            );
        }
    }
    if hovered {
        painter.rect_filled(image_rect, theme::RADIUS_LARGE, theme::BG_HOVER);
    }

    // Text rows are clipped to the card so long names don't bleed into neighbours
    let text_painter = painter.with_clip_rect(rect);
    let row1 = egui::Rect::from_min_size(
        egui::pos2(rect.min.x, image_rect.max.y + theme::SPACING_LG),
        egui::vec2(rect.width(), theme::CARD_ROW_HEIGHT),
    );
    let row2 = row1.translate(egui::vec2(0.0, theme::CARD_ROW_HEIGHT));

    paint_row(&text_painter, row1, &card.name, Some(&card.price));
    paint_row(&text_painter, row2, &card.color_info, card.sale_price.as_ref());

    if let Some(flag) = &card.flag {
        paint_flag(ui, rect, flag);
    }
}

/// Leading text on the left, trailing text on the right. The leading text is
/// elided so it always stops `SPACING_MD` short of the trailing text.
fn paint_row(painter: &egui::Painter, row: egui::Rect, leading: &TextNode, trailing: Option<&TextNode>) {
    let trailing_w = match trailing {
        Some(node) => {
            let galley = text_galley(painter, node, theme::FONT_BODY, row.width());
            let width = galley.size().x;
            paint_galley(painter, row.right_center(), egui::Align2::RIGHT_CENTER, galley, node);
            width
        }
        None => 0.0,
    };
    let galley = text_galley(painter, leading, theme::FONT_BODY, leading_max_width(row.width(), trailing_w));
    paint_galley(painter, row.left_center(), egui::Align2::LEFT_CENTER, galley, leading);
}

/// Room left for the leading text of a row once the trailing text is placed
pub(crate) fn leading_max_width(row_width: f32, trailing_width: f32) -> f32 {
    if trailing_width > 0.0 {
        (row_width - trailing_width - theme::SPACING_MD).max(0.0)
    } else {
        row_width
    }
}

/// Single-row layout, cut with `…` past `max_width`
pub(crate) fn single_row_job(text: &str, font: egui::FontId, color: Color32, max_width: f32) -> egui::text::LayoutJob {
    let mut job = egui::text::LayoutJob::simple_singleline(text.to_owned(), font, color);
    job.wrap = egui::text::TextWrapping {
        max_width,
        max_rows: 1,
        break_anywhere: true,
        overflow_character: Some('…'),
    };
    job
}

fn paint_flag(ui: &egui::Ui, card_rect: egui::Rect, flag: &FlagView) {
    let painter = ui.painter();
    let node = TextNode::colored(flag.label.clone(), theme::COLOR_WHITE, Weight::Bold);
    let galley = text_galley(painter, &node, theme::FONT_FLAG, f32::INFINITY);
    let right = card_rect.max.x + theme::FLAG_OVERHANG;
    let flag_rect = egui::Rect::from_min_max(
        egui::pos2(
            right - galley.size().x - theme::FLAG_PADDING_X * 2.0,
            card_rect.min.y + theme::FLAG_TOP,
        ),
        egui::pos2(right, card_rect.min.y + theme::FLAG_TOP + theme::FLAG_HEIGHT),
    );
    painter.rect_filled(flag_rect, theme::RADIUS_SMALL, flag.color);
    paint_galley(painter, flag_rect.center(), egui::Align2::CENTER_CENTER, galley, &node);
}

fn text_color(node: &TextNode) -> Color32 {
    node.color.unwrap_or(theme::GRAY_900)
}

fn text_galley(painter: &egui::Painter, node: &TextNode, size: f32, max_width: f32) -> Arc<egui::Galley> {
    let job = single_row_job(&node.text, egui::FontId::proportional(size), text_color(node), max_width);
    painter.layout_job(job)
}

fn paint_galley(painter: &egui::Painter, pos: egui::Pos2, align: egui::Align2, galley: Arc<egui::Galley>, node: &TextNode) {
    let color = text_color(node);
    let rect = align.anchor_size(pos, galley.size());

    let embolden = match node.weight {
        Weight::Normal => 0.0,
        Weight::Medium => 0.35,
        Weight::Bold => 0.7,
    };
    if embolden > 0.0 {
        painter.galley(rect.min + egui::vec2(embolden, 0.0), galley.clone(), color);
    }
    painter.galley(rect.min, galley, color);

    if node.strikethrough {
        let y = rect.center().y;
        painter.line_segment(
            [egui::pos2(rect.min.x, y), egui::pos2(rect.max.x, y)],
            egui::Stroke::new(theme::STROKE_DEFAULT, color),
        );
    }
}

/// UV rect that scales an image to cover `target` while keeping its aspect ratio
pub fn cover_uv(image: egui::Vec2, target: egui::Vec2) -> egui::Rect {
    let full = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
    if image.x <= 0.0 || image.y <= 0.0 || target.x <= 0.0 || target.y <= 0.0 {
        return full;
    }
    let image_aspect = image.x / image.y;
    let target_aspect = target.x / target.y;
    if image_aspect > target_aspect {
        // Wider than the slot: crop left and right
        let visible = target_aspect / image_aspect;
        let inset = (1.0 - visible) / 2.0;
        egui::Rect::from_min_max(egui::pos2(inset, 0.0), egui::pos2(1.0 - inset, 1.0))
    } else {
        let visible = image_aspect / target_aspect;
        let inset = (1.0 - visible) / 2.0;
        egui::Rect::from_min_max(egui::pos2(0.0, inset), egui::pos2(1.0, 1.0 - inset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap()
    }

    fn shoe(
        slug: &str,
        price: f64,
        sale_price: Option<f64>,
        released_days_ago: i64,
        num_of_colors: u32,
    ) -> Shoe {
        Shoe {
            id: 1,
            slug: slug.to_string(),
            name: slug.replace('-', " "),
            image_src: format!("images/{}.jpg", slug),
            price,
            sale_price,
            release_date: now() - Duration::days(released_days_ago),
            num_of_colors,
        }
    }

    #[test]
    fn new_release_card() {
        let card = render_card(&shoe("air-jordan-1", 100.0, None, 10, 1), now(), RecencyWindow::default());

        assert_eq!(card.variant, Variant::NewRelease);
        assert_eq!(card.href, "/shoe/air-jordan-1");
        assert_eq!(card.image_src, "images/air-jordan-1.jpg");
        assert_eq!(card.flag.as_ref().unwrap().label, "Just Released!");
        assert_eq!(card.flag.as_ref().unwrap().color, theme::COLOR_SECONDARY);
        assert_eq!(card.color_info.text, "1 Color");
        assert_eq!(card.price.text, "$100");
        assert!(!card.price.strikethrough);
        assert!(card.sale_price.is_none());
    }

    #[test]
    fn on_sale_card() {
        let card = render_card(&shoe("air-max-90", 120.0, Some(89.99), 730, 3), now(), RecencyWindow::default());

        assert_eq!(card.variant, Variant::OnSale);
        assert!(card.price.strikethrough);
        assert_eq!(card.price.color, Some(theme::GRAY_700));
        assert_eq!(card.price.text, "$120");

        let sale = card.sale_price.as_ref().unwrap();
        assert_eq!(sale.text, "$89.99");
        assert_eq!(sale.color, Some(theme::COLOR_PRIMARY));
        assert_eq!(sale.weight, Weight::Medium);

        assert_eq!(card.flag.as_ref().unwrap().label, "Sale");
        assert_eq!(card.flag.as_ref().unwrap().color, theme::COLOR_PRIMARY);
        assert_eq!(card.color_info.text, "3 Colors");
    }

    #[test]
    fn default_card_has_no_flag() {
        let card = render_card(&shoe("classic-slip-on", 60.0, None, 365 * 5, 2), now(), RecencyWindow::default());

        assert_eq!(card.variant, Variant::Default);
        assert!(card.flag.is_none());
        assert!(card.sale_price.is_none());
        assert!(!card.price.strikethrough);
        assert_eq!(card.price.color, None);
        assert_eq!(card.color_info.text, "2 Colors");
    }

    #[test]
    fn free_item_is_on_sale_with_zero_price_shown() {
        let card = render_card(&shoe("giveaway", 80.0, Some(0.0), 2, 0), now(), RecencyWindow::default());
        assert_eq!(card.variant, Variant::OnSale);
        assert_eq!(card.sale_price.unwrap().text, "$0");
        assert_eq!(card.color_info.text, "0 Colors");
    }

    #[test]
    fn rendering_is_idempotent() {
        let item = shoe("air-max-90", 120.0, Some(89.99), 730, 3);
        let first = render_card(&item, now(), RecencyWindow::default());
        let second = render_card(&item, now(), RecencyWindow::default());
        assert_eq!(first, second);
    }

    #[test]
    fn build_card_follows_given_variant() {
        // Sale price present but the variant says default: the row stays plain
        let card = build_card(&shoe("odd", 50.0, Some(40.0), 1000, 1), Variant::Default);
        assert!(card.sale_price.is_none());
        assert!(card.flag.is_none());
    }

    #[test]
    fn cover_uv_crops_the_long_side() {
        let wide = cover_uv(egui::vec2(200.0, 100.0), egui::vec2(100.0, 100.0));
        assert!((wide.min.x - 0.25).abs() < 1e-6);
        assert!((wide.max.x - 0.75).abs() < 1e-6);
        assert_eq!(wide.min.y, 0.0);

        let tall = cover_uv(egui::vec2(100.0, 200.0), egui::vec2(100.0, 100.0));
        assert!((tall.min.y - 0.25).abs() < 1e-6);
        assert_eq!(tall.min.x, 0.0);
    }

    #[test]
    fn leading_text_gets_the_rest_of_the_row() {
        assert_eq!(leading_max_width(220.0, 0.0), 220.0);
        assert_eq!(leading_max_width(220.0, 36.0), 220.0 - 36.0 - theme::SPACING_MD);
        assert_eq!(leading_max_width(20.0, 36.0), 0.0);
    }

    #[test]
    fn long_names_stop_before_the_price() {
        let ctx = egui::Context::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            let font = egui::FontId::proportional(theme::FONT_BODY);
            let card = render_card(&shoe("nikecourt-tech-challenge-20-limited", 120.0, None, 400, 2), now(), RecencyWindow::default());

            let price_w = ctx.fonts(|f| {
                f.layout_job(single_row_job(&card.price.text, font.clone(), Color32::BLACK, f32::INFINITY))
                    .size()
                    .x
            });
            let max_w = leading_max_width(theme::CARD_WIDTH_SMALL, price_w);
            let name = ctx.fonts(|f| f.layout_job(single_row_job(&card.name.text, font.clone(), Color32::BLACK, max_w)));
            let full = ctx.fonts(|f| f.layout_job(single_row_job(&card.name.text, font, Color32::BLACK, f32::INFINITY)));

            assert!(full.size().x > max_w, "name must be long enough to need eliding");
            assert_eq!(name.rows.len(), 1);
            assert!(name.size().x < theme::CARD_WIDTH_SMALL - price_w);
        });
    }

    #[test]
    fn card_height_scales_with_width() {
        assert!(card_height(300.0) > card_height(200.0));
        assert_eq!(
            card_height(100.0),
            100.0 * theme::CARD_IMAGE_ASPECT + theme::SPACING_LG + theme::CARD_ROW_HEIGHT * 2.0
        );
    }
}
