//! Text rendering of catalog views for the terminal.

use crate::model::{format_category_name, Product};
use crate::orchestrator::ViewState;
use crate::pagination::PaginationView;
use crate::session::{CatalogView, DetailView};

use super::table::{render_table, truncate};

pub const MSG_LOADING: &str = "Loading amazing products...";
pub const MSG_NO_PRODUCTS: &str = "No products found";
pub const MSG_NO_PRODUCTS_HINT: &str =
    "We couldn't find any products matching your criteria. Try adjusting your search or filters.";
pub const MSG_IMAGE_UNAVAILABLE: &str = "Image unavailable";

#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub width: usize,
    pub color: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions { width: 100, color: false }
    }
}

pub fn render_products(products: &[Product], opts: RenderOptions) -> String {
    if products.is_empty() {
        return format!("{}\n{}\n", MSG_NO_PRODUCTS, MSG_NO_PRODUCTS_HINT);
    }
    let rows: Vec<Vec<String>> = products
        .iter()
        .map(|p| {
            vec![
                p.id.to_string(),
                p.title.clone(),
                p.brand.clone(),
                format_category_name(&p.category),
                format!("${:.2}", p.price),
                if p.has_discount() { format!("{}%", p.discount_percentage.round()) } else { String::new() },
                format!("{:.2}", p.rating),
                p.stock.to_string(),
            ]
        })
        .collect();
    render_table(&["ID", "Title", "Brand", "Category", "Price", "Off", "Rating", "Stock"], &rows, opts.width, opts.color)
}

/// Range and page labels plus the page-number strip, e.g.
/// `1-12 of 194 products   Page 1 of 17` / `[1] 2 3 4 5 >`.
pub fn render_pagination(view: &PaginationView) -> String {
    let mut out = String::new();
    if let Some(range) = view.range_label() {
        out.push_str(&format!("{}   {}\n", range, view.page_label()));
    }
    if !view.is_applicable() {
        return out;
    }
    let mut strip: Vec<String> = Vec::new();
    if view.can_go_previous {
        strip.push("<".to_string());
    }
    for n in &view.page_numbers {
        if *n == view.current_page {
            strip.push(format!("[{}]", n));
        } else {
            strip.push(n.to_string());
        }
    }
    if view.can_go_next {
        strip.push(">".to_string());
    }
    out.push_str(&strip.join(" "));
    out.push('\n');
    out
}

pub fn render_detail(detail: &DetailView, width: usize) -> String {
    let product = match &detail.state {
        ViewState::Loading => return format!("{}\n", MSG_LOADING),
        ViewState::Error(msg) => return format!("Oops! Something went wrong\n{}\n", msg),
        ViewState::Ready(p) => p,
    };
    let mut out = String::new();
    out.push_str(&format!("#{} {}\n", product.id, product.title));
    let brand = if product.brand.is_empty() { "-" } else { product.brand.as_str() };
    out.push_str(&format!("{} · {}\n", brand, format_category_name(&product.category)));
    out.push_str(&format!("Rating {:.2} / 5\n", product.rating));
    if product.has_discount() {
        out.push_str(&format!(
            "${:.2}  (was ${:.2}, -{}% OFF, save ${:.0})\n",
            product.price,
            product.original_price(),
            product.discount_percentage.round(),
            product.savings()
        ));
    } else {
        out.push_str(&format!("${:.2}\n", product.price));
    }
    out.push_str(&format!("{} in stock\n", product.stock));
    if !product.description.is_empty() {
        out.push_str(&wrap(&product.description, width.max(20)));
    }
    match detail.current_image() {
        Some(url) => out.push_str(&format!(
            "Image {}/{}: {}\n",
            detail.image_index + 1,
            product.images.len(),
            truncate(url, width.max(20))
        )),
        None => out.push_str(&format!("{}\n", MSG_IMAGE_UNAVAILABLE)),
    }
    out
}

pub fn render_categories(categories: &[String]) -> String {
    let mut out = String::from("all  (All Categories)\n");
    for c in categories {
        out.push_str(&format!("{}  ({})\n", c, format_category_name(c)));
    }
    out
}

/// Full frame: filters, the list (or its loading / error state) and paging.
pub fn render_catalog(view: &CatalogView, opts: RenderOptions) -> String {
    let mut out = String::new();
    let q = &view.query;
    let category = if q.selected_category().is_empty() { "all" } else { q.selected_category() };
    out.push_str(&format!(
        "search: '{}'  category: {}  sort: {}\n",
        q.search_term(),
        category,
        q.sort_key().label()
    ));
    if let Some(err) = &view.categories_error {
        out.push_str(&format!("(categories unavailable: {})\n", err));
    }
    match &view.products {
        ViewState::Loading => out.push_str(&format!("{}\n", MSG_LOADING)),
        ViewState::Error(msg) => {
            out.push_str(&format!("Oops! Something went wrong\n{}\nType 'retry' to try again.\n", msg));
        }
        ViewState::Ready(products) => {
            out.push_str(&render_products(products, opts));
            out.push_str(&render_pagination(&view.pagination));
        }
    }
    out
}

fn wrap(text: &str, width: usize) -> String {
    let mut out = String::new();
    let mut line_len = 0;
    for word in text.split_whitespace() {
        let len = word.chars().count();
        if line_len > 0 && line_len + 1 + len > width {
            out.push('\n');
            line_len = 0;
        }
        if line_len > 0 {
            out.push(' ');
            line_len += 1;
        }
        out.push_str(word);
        line_len += len;
    }
    if !out.is_empty() {
        out.push('\n');
    }
    out
}
