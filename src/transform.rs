//!
//! Client-side transform pipeline
//! ------------------------------
//! Filters and sorts the products of the page already fetched. Nothing here
//! talks to the network: the result may hold fewer items than a full page and
//! that is expected.

use std::cmp::Ordering;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::model::{Product, SortKey};

/// Filter by `search_term`, then stably sort by `sort_key`.
pub fn transform(products: &[Product], search_term: &str, sort_key: SortKey) -> Vec<Product> {
    let mut out = filter_by_search(products, search_term);
    sort_products(&mut out, sort_key);
    out
}

/// Keep products whose title, description or brand contains the term,
/// case-insensitively. A blank term keeps everything.
pub fn filter_by_search(products: &[Product], search_term: &str) -> Vec<Product> {
    if search_term.trim().is_empty() {
        return products.to_vec();
    }
    let needle = search_term.to_lowercase();
    products.iter().filter(|p| matches_search(p, &needle)).cloned().collect()
}

fn matches_search(product: &Product, needle_lower: &str) -> bool {
    product.title.to_lowercase().contains(needle_lower)
        || product.description.to_lowercase().contains(needle_lower)
        || product.brand.to_lowercase().contains(needle_lower)
}

/// Stable in-place sort. `SortKey::None` leaves the order untouched.
/// Numeric keys use `f64::total_cmp`, so a NaN sorts above every number.
pub fn sort_products(products: &mut [Product], sort_key: SortKey) {
    match sort_key {
        SortKey::None => {}
        SortKey::PriceAsc => products.sort_by(|a, b| a.price.total_cmp(&b.price)),
        SortKey::PriceDesc => products.sort_by(|a, b| b.price.total_cmp(&a.price)),
        SortKey::NameAsc => products.sort_by(|a, b| collate(&a.title, &b.title)),
        SortKey::NameDesc => products.sort_by(|a, b| collate(&b.title, &a.title)),
        SortKey::RatingDesc => products.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        SortKey::DiscountDesc => products.sort_by(|a, b| b.discount_percentage.total_cmp(&a.discount_percentage)),
    }
}

/// Locale-style title comparison.
///
/// Primary: base letters only (accents stripped, case folded), so `"émile"`
/// sorts next to `"emile"` rather than after `"z"`. Secondary: accents.
/// Tertiary: lowercase before uppercase. Final tie-break on code points keeps
/// the ordering total.
pub fn collate(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(&primary_key(b))
        .then_with(|| secondary_key(a).cmp(&secondary_key(b)))
        .then_with(|| tertiary_cmp(a, b))
        .then_with(|| a.cmp(b))
}

fn primary_key(s: &str) -> Vec<char> {
    s.nfd().filter(|c| !is_combining_mark(*c)).flat_map(char::to_lowercase).collect()
}

fn secondary_key(s: &str) -> Vec<char> {
    s.nfd().flat_map(char::to_lowercase).collect()
}

fn tertiary_cmp(a: &str, b: &str) -> Ordering {
    for (ca, cb) in a.nfd().zip(b.nfd()) {
        let ord = match (ca.is_lowercase(), cb.is_lowercase()) {
            (true, false) if cb.is_uppercase() => Ordering::Less,
            (false, true) if ca.is_uppercase() => Ordering::Greater,
            _ => Ordering::Equal,
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}
