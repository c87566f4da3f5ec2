//! Filtering and sorting logic

use super::App;
use crate::db::Shoe;
use crate::types::*;
use crate::variant::{classify, RecencyWindow, Variant};
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use tracing::debug;

/// Query and ordering applied to the catalog grid
#[derive(Debug, Clone)]
pub struct GridQuery<'a> {
    pub search: &'a str,
    pub variant_filter: VariantFilter,
    pub sort_column: SortColumn,
    pub descending: bool,
    pub now: DateTime<Utc>,
    pub window: RecencyWindow,
}

/// Shoe counts per variant filter, in [`VariantFilter::ALL`] order
pub fn variant_counts(shoes: &[Shoe], now: DateTime<Utc>, window: RecencyWindow) -> [usize; 4] {
    let mut counts = [0; 4];
    counts[0] = shoes.len();
    for shoe in shoes {
        match classify(shoe.sale_price, shoe.release_date, now, window) {
            Variant::NewRelease => counts[1] += 1,
            Variant::OnSale => counts[2] += 1,
            Variant::Default => counts[3] += 1,
        }
    }
    counts
}

fn matches_variant(filter: VariantFilter, variant: Variant) -> bool {
    match filter {
        VariantFilter::All => true,
        VariantFilter::NewRelease => variant == Variant::NewRelease,
        VariantFilter::OnSale => variant == Variant::OnSale,
        VariantFilter::Regular => variant == Variant::Default,
    }
}

/// Search priority: lower is better, `None` excludes the shoe
fn search_score(shoe: &Shoe, query: &str, query_lower: &str) -> Option<u8> {
    if query.is_empty() {
        return Some(0);
    }
    if shoe.name.contains(query) {
        return Some(0);
    }
    if shoe.slug.contains(query) {
        return Some(1);
    }
    if shoe.name.to_lowercase().contains(query_lower) {
        return Some(2);
    }
    if shoe.slug.to_lowercase().contains(query_lower) {
        return Some(3);
    }
    None
}

fn compare(a: &Shoe, b: &Shoe, column: SortColumn) -> Ordering {
    match column {
        SortColumn::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        SortColumn::Price => a.effective_price().total_cmp(&b.effective_price()),
        SortColumn::Newest => b.release_date.cmp(&a.release_date),
    }
}

/// Indices into `shoes` that pass the query, in display order
pub fn filter_and_sort(shoes: &[Shoe], query: &GridQuery<'_>) -> Vec<usize> {
    let search = query.search.trim();
    let search_lower = search.to_lowercase();

    let mut scored: Vec<(usize, u8)> = shoes
        .iter()
        .enumerate()
        .filter(|(_, s)| {
            let variant = classify(s.sale_price, s.release_date, query.now, query.window);
            matches_variant(query.variant_filter, variant)
        })
        .filter_map(|(i, s)| search_score(s, search, &search_lower).map(|score| (i, score)))
        .collect();

    scored.sort_by(|&(a, score_a), &(b, score_b)| {
        let by_column = compare(&shoes[a], &shoes[b], query.sort_column);
        let by_column = if query.descending {
            by_column.reverse()
        } else {
            by_column
        };
        score_a.cmp(&score_b).then(by_column)
    });

    scored.into_iter().map(|(i, _)| i).collect()
}

impl App {
    pub fn apply_filters(&mut self) {
        let query = GridQuery {
            search: &self.search_query,
            variant_filter: self.variant_filter,
            sort_column: self.sort_column,
            descending: self.sort_descending,
            now: Utc::now(),
            window: self.recency_window(),
        };
        self.filtered_indices = filter_and_sort(&self.shoes, &query);
        debug!(
            shown = self.filtered_indices.len(),
            total = self.shoes.len(),
            "Filters applied"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap()
    }

    fn shoe(slug: &str, name: &str, price: f64, sale_price: Option<f64>, days_ago: i64) -> Shoe {
        Shoe {
            id: 0,
            slug: slug.to_string(),
            name: name.to_string(),
            image_src: String::new(),
            price,
            sale_price,
            release_date: now() - Duration::days(days_ago),
            num_of_colors: 1,
        }
    }

    fn catalog() -> Vec<Shoe> {
        vec![
            shoe("air-jordan-1", "Air Jordan 1", 100.0, None, 10),
            shoe("air-max-90", "Air Max 90", 120.0, Some(89.99), 730),
            shoe("classic-slip-on", "Classic Slip-On", 60.0, None, 1800),
            shoe("blazer-mid", "Blazer Mid", 105.0, Some(95.0), 5),
        ]
    }

    fn query(search: &str, variant_filter: VariantFilter, sort_column: SortColumn) -> GridQuery<'_> {
        GridQuery {
            search,
            variant_filter,
            sort_column,
            descending: false,
            now: now(),
            window: RecencyWindow::default(),
        }
    }

    fn slugs(shoes: &[Shoe], indices: &[usize]) -> Vec<String> {
        indices.iter().map(|&i| shoes[i].slug.clone()).collect()
    }

    #[test]
    fn counts_each_variant() {
        let counts = variant_counts(&catalog(), now(), RecencyWindow::default());
        assert_eq!(counts, [4, 1, 2, 1]);
    }

    #[test]
    fn variant_filter_uses_sale_precedence() {
        let shoes = catalog();
        let sale = filter_and_sort(&shoes, &query("", VariantFilter::OnSale, SortColumn::Name));
        assert_eq!(slugs(&shoes, &sale), vec!["air-max-90", "blazer-mid"]);

        let new = filter_and_sort(&shoes, &query("", VariantFilter::NewRelease, SortColumn::Name));
        assert_eq!(slugs(&shoes, &new), vec!["air-jordan-1"]);

        let regular = filter_and_sort(&shoes, &query("", VariantFilter::Regular, SortColumn::Name));
        assert_eq!(slugs(&shoes, &regular), vec!["classic-slip-on"]);
    }

    #[test]
    fn search_and_variant_filter_compose() {
        let shoes = catalog();
        let found = filter_and_sort(&shoes, &query("air", VariantFilter::OnSale, SortColumn::Name));
        assert_eq!(slugs(&shoes, &found), vec!["air-max-90"]);
    }

    #[test]
    fn exact_case_name_matches_rank_first() {
        let shoes = vec![
            shoe("a", "Slip Max", 10.0, None, 1000),
            shoe("b", "Air Max", 20.0, None, 1000),
        ];
        let exact = filter_and_sort(&shoes, &query("Air", VariantFilter::All, SortColumn::Name));
        assert_eq!(slugs(&shoes, &exact), vec!["b"]);

        let mixed = vec![
            shoe("air-max", "AIR MAX", 10.0, None, 1000),
            shoe("zoom", "Zoom Air", 20.0, None, 1000),
        ];
        let found = filter_and_sort(&mixed, &query("Air", VariantFilter::All, SortColumn::Name));
        assert_eq!(slugs(&mixed, &found), vec!["zoom", "air-max"]);
    }

    #[test]
    fn price_sort_uses_effective_price() {
        let shoes = catalog();
        let mut q = query("", VariantFilter::All, SortColumn::Price);
        let asc = filter_and_sort(&shoes, &q);
        assert_eq!(
            slugs(&shoes, &asc),
            vec!["classic-slip-on", "air-max-90", "blazer-mid", "air-jordan-1"]
        );

        q.descending = true;
        let desc = filter_and_sort(&shoes, &q);
        assert_eq!(
            slugs(&shoes, &desc),
            vec!["air-jordan-1", "blazer-mid", "air-max-90", "classic-slip-on"]
        );
    }

    #[test]
    fn newest_sort_puts_recent_first() {
        let shoes = catalog();
        let order = filter_and_sort(&shoes, &query("", VariantFilter::All, SortColumn::Newest));
        assert_eq!(
            slugs(&shoes, &order),
            vec!["blazer-mid", "air-jordan-1", "air-max-90", "classic-slip-on"]
        );
    }

    #[test]
    fn blank_search_matches_everything() {
        let shoes = catalog();
        assert_eq!(
            filter_and_sort(&shoes, &query("   ", VariantFilter::All, SortColumn::Name)).len(),
            4
        );
        assert!(filter_and_sort(&shoes, &query("yeezy", VariantFilter::All, SortColumn::Name)).is_empty());
    }
}
