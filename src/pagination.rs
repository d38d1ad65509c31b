//!
//! Pagination calculator
//! ---------------------
//! Derives page counts, the visible page-number window and result-range labels
//! from `(current_page, total_count, page_size)`. Nothing here is stored; a
//! [`PaginationView`] is recomputed whenever its inputs change.

use serde::Serialize;

/// `ceil(total_count / page_size)`; zero items means zero pages.
pub fn total_pages(total_count: u64, page_size: u32) -> u32 {
    let size = u64::from(page_size.max(1));
    let pages = total_count.div_ceil(size);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Zero-based offset of the first item on `page`.
pub fn skip_for(page: u32, page_size: u32) -> u64 {
    u64::from(page.max(1) - 1) * u64::from(page_size)
}

/// Contiguous page numbers to render as buttons.
///
/// All pages when they fit. Otherwise a window of `max_visible` pages
/// centred on `current_page`, pinned flush to the first or last page once
/// `current_page` is within `max_visible / 2` of that edge.
pub fn page_window(current_page: u32, total_pages: u32, max_visible: u32) -> Vec<u32> {
    let max_visible = max_visible.max(1);
    if total_pages <= max_visible {
        return (1..=total_pages).collect();
    }
    let half = max_visible / 2;
    let current = current_page.clamp(1, total_pages);
    let start = if current <= half + 1 {
        1
    } else if current >= total_pages - half {
        total_pages - max_visible + 1
    } else {
        current - half
    };
    (start..start + max_visible).collect()
}

/// First and last (1-based, inclusive) result numbers shown on a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResultRange {
    pub start: u64,
    pub end: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationView {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_count: u64,
    pub page_size: u32,
    pub page_numbers: Vec<u32>,
    pub can_go_previous: bool,
    pub can_go_next: bool,
}

impl PaginationView {
    pub fn compute(current_page: u32, total_count: u64, page_size: u32, max_visible: u32) -> Self {
        let total = total_pages(total_count, page_size);
        let current = current_page.max(1);
        PaginationView {
            current_page: current,
            total_pages: total,
            total_count,
            page_size: page_size.max(1),
            page_numbers: page_window(current, total, max_visible),
            can_go_previous: current > 1,
            can_go_next: current < total,
        }
    }

    pub fn start_result(&self) -> u64 {
        u64::from(self.current_page - 1) * u64::from(self.page_size) + 1
    }

    pub fn end_result(&self) -> u64 {
        (u64::from(self.current_page) * u64::from(self.page_size)).min(self.total_count)
    }

    /// `None` when there is nothing to count, so callers can hide the label.
    pub fn range(&self) -> Option<ResultRange> {
        if self.total_count == 0 {
            return None;
        }
        Some(ResultRange { start: self.start_result(), end: self.end_result() })
    }

    /// Page switching only makes sense with more than one page.
    pub fn is_applicable(&self) -> bool {
        self.total_pages > 1
    }

    /// e.g. `"1-12 of 194 products"`.
    pub fn range_label(&self) -> Option<String> {
        self.range().map(|r| format!("{}-{} of {} products", r.start, r.end, self.total_count))
    }

    /// e.g. `"Page 1 of 17"`.
    pub fn page_label(&self) -> String {
        format!("Page {} of {}", self.current_page, self.total_pages)
    }
}

/// Page navigation bounded by a known page count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    current_page: u32,
    total_pages: u32,
}

impl Pager {
    pub fn new(current_page: u32, total_pages: u32) -> Self {
        let mut pager = Pager { current_page: 1, total_pages };
        pager.set_page(current_page);
        pager
    }

    pub fn current_page(&self) -> u32 { self.current_page }
    pub fn total_pages(&self) -> u32 { self.total_pages }

    fn last_page(&self) -> u32 {
        self.total_pages.max(1)
    }

    /// Clamp `page` into `[1, total_pages]` and move there.
    pub fn set_page(&mut self, page: u32) -> u32 {
        self.current_page = page.clamp(1, self.last_page());
        self.current_page
    }

    pub fn next(&mut self) -> u32 {
        self.set_page(self.current_page.saturating_add(1))
    }

    pub fn previous(&mut self) -> u32 {
        self.set_page(self.current_page.saturating_sub(1))
    }

    pub fn can_go_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn can_go_previous(&self) -> bool {
        self.current_page > 1
    }
}
