//! User-controlled query state: search text, category filter, sort order and page.

use crate::model::SortKey;

/// What a state change requires of the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Nothing observable changed.
    None,
    /// Only the client-side transform has to be re-run.
    Retransform,
    /// The current page or category changed; a new page must be fetched.
    Refetch,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    search_term: String,
    selected_category: String,
    sort_key: SortKey,
    current_page: u32,
}

impl Default for QueryState {
    fn default() -> Self {
        QueryState {
            search_term: String::new(),
            selected_category: String::new(),
            sort_key: SortKey::None,
            current_page: 1,
        }
    }
}

impl QueryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search_term(&self) -> &str { &self.search_term }
    pub fn selected_category(&self) -> &str { &self.selected_category }
    pub fn sort_key(&self) -> SortKey { self.sort_key }
    pub fn current_page(&self) -> u32 { self.current_page }

    /// Category to request, `None` meaning all categories.
    pub fn category_filter(&self) -> Option<&str> {
        if self.selected_category.is_empty() { None } else { Some(&self.selected_category) }
    }

    /// Changing the search term sends the user back to page 1.
    pub fn set_search_term(&mut self, term: impl Into<String>) -> Effect {
        let term = term.into();
        if term == self.search_term {
            return Effect::None;
        }
        self.search_term = term;
        if self.reset_page() { Effect::Refetch } else { Effect::Retransform }
    }

    /// Changing the category sends the user back to page 1 and always refetches.
    pub fn set_selected_category(&mut self, category: impl Into<String>) -> Effect {
        let category = category.into();
        if category == self.selected_category {
            return Effect::None;
        }
        self.selected_category = category;
        self.reset_page();
        Effect::Refetch
    }

    /// Sorting is page-local, so the page is left alone.
    pub fn set_sort_key(&mut self, key: SortKey) -> Effect {
        if key == self.sort_key {
            return Effect::None;
        }
        self.sort_key = key;
        Effect::Retransform
    }

    /// Pages are 1-based; anything lower is clamped to 1. The upper bound is
    /// enforced by the pager, which knows the page count.
    pub fn set_page(&mut self, page: u32) -> Effect {
        let page = page.max(1);
        if page == self.current_page {
            return Effect::None;
        }
        self.current_page = page;
        Effect::Refetch
    }

    pub fn clear_filters(&mut self) -> Effect {
        let category_changed = !self.selected_category.is_empty();
        let search_changed = !self.search_term.is_empty();
        let sort_changed = self.sort_key != SortKey::None;
        self.search_term.clear();
        self.selected_category.clear();
        self.sort_key = SortKey::None;
        let page_changed = if category_changed || search_changed { self.reset_page() } else { false };
        if category_changed || page_changed {
            Effect::Refetch
        } else if search_changed || sort_changed {
            Effect::Retransform
        } else {
            Effect::None
        }
    }

    fn reset_page(&mut self) -> bool {
        let changed = self.current_page != 1;
        self.current_page = 1;
        changed
    }
}
