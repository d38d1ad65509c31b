//! Terminal front end: table rendering, detail/paging text and the REPL.

pub mod render;
pub mod repl;
pub mod table;

use serde::Serialize;

use crate::model::Product;
use crate::pagination::PaginationView;

pub use render::{render_catalog, render_categories, render_detail, render_pagination, render_products, RenderOptions};
pub use repl::{execute, parse_command, run_repl, Command};

/// JSON document printed by `showcase list --json`.
#[derive(Debug, Serialize)]
pub struct ListOutput<'a> {
    pub page: u32,
    pub total_pages: u32,
    pub total: u64,
    pub start_result: Option<u64>,
    pub end_result: Option<u64>,
    pub page_numbers: &'a [u32],
    pub products: &'a [Product],
}

impl<'a> ListOutput<'a> {
    pub fn new(pagination: &'a PaginationView, products: &'a [Product]) -> Self {
        let range = pagination.range();
        ListOutput {
            page: pagination.current_page,
            total_pages: pagination.total_pages,
            total: pagination.total_count,
            start_result: range.map(|r| r.start),
            end_result: range.map(|r| r.end),
            page_numbers: &pagination.page_numbers,
            products,
        }
    }
}

/// Whether to print JSON instead of tables: explicit flag or `SHOWCASE_OUTPUT=json`.
pub fn wants_json(flag: bool) -> bool {
    flag || std::env::var("SHOWCASE_OUTPUT").map(|v| v.eq_ignore_ascii_case("json")).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_output_carries_range() {
        let pagination = PaginationView::compute(2, 30, 12, 5);
        let doc = serde_json::to_value(ListOutput::new(&pagination, &[])).unwrap();
        assert_eq!(doc["page"], 2);
        assert_eq!(doc["total_pages"], 3);
        assert_eq!(doc["start_result"], 13);
        assert_eq!(doc["end_result"], 24);
        assert_eq!(doc["page_numbers"], serde_json::json!([1, 2, 3]));
    }

    #[test]
    fn empty_list_output_has_no_range() {
        let pagination = PaginationView::compute(1, 0, 12, 5);
        let doc = serde_json::to_value(ListOutput::new(&pagination, &[])).unwrap();
        assert!(doc["start_result"].is_null());
    }
}
