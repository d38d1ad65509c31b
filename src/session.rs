//!
//! Catalog session
//! ---------------
//! Glue between user actions and the rest of the crate: an [`Action`] updates
//! the [`QueryState`], a page or category change triggers exactly one fetch,
//! and [`CatalogSession::view`] derives everything the presentation layer needs
//! (transformed products, pagination, categories, detail view).

use tracing::debug;

use crate::config::Config;
use crate::model::{Product, SortKey};
use crate::orchestrator::{Completion, LoadStatus, Orchestrator, ViewState};
use crate::pagination::{total_pages, Pager, PaginationView};
use crate::query_state::{Effect, QueryState};
use crate::source::ProductSource;
use crate::transform::transform;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Search(String),
    /// Empty string selects all categories.
    Category(String),
    Sort(SortKey),
    Page(u32),
    Next,
    Previous,
    ClearFilters,
    Retry,
    Refresh,
    Open(u64),
    Close,
    NextImage,
    PreviousImage,
    /// Jump to an image of the open product (0-based, clamped to the last image).
    SelectImage(usize),
    LoadCategories,
}

/// Detail view of one product with an image carousel.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    pub state: ViewState<Product>,
    pub image_index: usize,
}

impl DetailView {
    pub fn current_image(&self) -> Option<&str> {
        match &self.state {
            ViewState::Ready(p) => p.images.get(self.image_index).map(String::as_str),
            _ => None,
        }
    }
}

/// Everything needed to render one frame of the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogView {
    pub query: QueryState,
    /// Loading / error / ready for the product list; ready carries the
    /// filtered and sorted products of the current page.
    pub products: ViewState<Vec<Product>>,
    pub pagination: PaginationView,
    pub categories: Vec<String>,
    pub categories_error: Option<String>,
    pub detail: Option<DetailView>,
}

pub struct CatalogSession<S> {
    query: QueryState,
    orchestrator: Orchestrator<S>,
    max_visible: u32,
    image_index: usize,
}

impl<S: ProductSource> CatalogSession<S> {
    pub fn new(source: S, config: &Config) -> Self {
        Self::with_orchestrator(Orchestrator::new(source, config.page_size), config.max_visible_pages)
    }

    pub fn with_orchestrator(orchestrator: Orchestrator<S>, max_visible: u32) -> Self {
        CatalogSession { query: QueryState::new(), orchestrator, max_visible: max_visible.max(1), image_index: 0 }
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    pub fn orchestrator(&self) -> &Orchestrator<S> {
        &self.orchestrator
    }

    /// Initial load: categories and the first page, concurrently.
    pub async fn start(&mut self) -> Completion {
        let page = self.query.current_page();
        let category = self.query.selected_category().to_string();
        let (_, list) = tokio::join!(self.orchestrator.load_categories(), self.orchestrator.load(page, &category));
        list
    }

    /// Jump straight to a full query (e.g. from command-line flags) with one
    /// fetch. A page past the end is clamped to the last page and refetched.
    pub async fn load_query(&mut self, search: &str, category: &str, sort: SortKey, page: u32) -> Completion {
        self.query.set_selected_category(category);
        self.query.set_search_term(search);
        self.query.set_sort_key(sort);
        self.query.set_page(page);
        let first = self.refetch().await;
        self.settle_page(first).await
    }

    /// Apply one user action. Returns the list fetch it caused, if any.
    pub async fn dispatch(&mut self, action: Action) -> Option<Completion> {
        debug!(target: "showcase::session", "action: {:?}", action);
        let effect = match action {
            Action::Search(term) => self.query.set_search_term(term),
            Action::Category(category) => self.query.set_selected_category(category),
            Action::Sort(key) => self.query.set_sort_key(key),
            Action::Page(n) => {
                let mut pager = self.pager();
                self.query.set_page(pager.set_page(n))
            }
            Action::Next => {
                let mut pager = self.pager();
                self.query.set_page(pager.next())
            }
            Action::Previous => {
                let mut pager = self.pager();
                self.query.set_page(pager.previous())
            }
            Action::ClearFilters => self.query.clear_filters(),
            Action::Retry => {
                let outcome = self.orchestrator.retry().await?;
                return Some(self.settle_page(outcome).await);
            }
            Action::Refresh => Effect::Refetch,
            Action::Open(id) => {
                self.image_index = 0;
                self.orchestrator.load_one(id).await;
                return None;
            }
            Action::Close => {
                self.image_index = 0;
                self.orchestrator.clear_detail();
                return None;
            }
            Action::NextImage => {
                self.step_image(true);
                return None;
            }
            Action::PreviousImage => {
                self.step_image(false);
                return None;
            }
            Action::SelectImage(index) => {
                self.select_image(index);
                return None;
            }
            Action::LoadCategories => {
                self.orchestrator.load_categories().await;
                return None;
            }
        };
        match effect {
            Effect::Refetch => {
                let outcome = self.refetch().await;
                Some(self.settle_page(outcome).await)
            }
            Effect::Retransform | Effect::None => None,
        }
    }

    /// After a successful fetch the reported total may have shrunk below the
    /// current page; move to the last page that exists and fetch it.
    async fn settle_page(&mut self, outcome: Completion) -> Completion {
        if outcome != Completion::Applied {
            return outcome;
        }
        let mut pager = self.pager();
        let clamped = pager.set_page(self.query.current_page());
        match self.query.set_page(clamped) {
            Effect::Refetch => {
                debug!(target: "showcase::session", "page out of range after fetch; moving to page {}", clamped);
                self.refetch().await
            }
            _ => outcome,
        }
    }

    async fn refetch(&self) -> Completion {
        let page = self.query.current_page();
        let category = self.query.selected_category().to_string();
        self.orchestrator.load(page, &category).await
    }

    fn pager(&self) -> Pager {
        let total = self.orchestrator.list_state().result.total;
        Pager::new(self.query.current_page(), total_pages(total, self.orchestrator.page_size()))
    }

    fn step_image(&mut self, forward: bool) {
        let count = match self.orchestrator.detail_state().product {
            Some(p) => p.images.len(),
            None => return,
        };
        if count == 0 {
            return;
        }
        self.image_index = if forward {
            if self.image_index + 1 >= count { 0 } else { self.image_index + 1 }
        } else if self.image_index == 0 {
            count - 1
        } else {
            self.image_index - 1
        };
    }

    fn select_image(&mut self, index: usize) {
        if let Some(p) = self.orchestrator.detail_state().product {
            if !p.images.is_empty() {
                self.image_index = index.min(p.images.len() - 1);
            }
        }
    }

    pub fn view(&self) -> CatalogView {
        let list = self.orchestrator.list_state();
        let products = match &list.status {
            LoadStatus::Idle | LoadStatus::Loading => ViewState::Loading,
            LoadStatus::Failed(msg) => ViewState::Error(msg.clone()),
            LoadStatus::Ready => {
                ViewState::Ready(transform(&list.result.products, self.query.search_term(), self.query.sort_key()))
            }
        };
        let pagination = PaginationView::compute(
            self.query.current_page(),
            list.result.total,
            self.orchestrator.page_size(),
            self.max_visible,
        );
        let categories = self.orchestrator.category_state();
        let detail = self
            .orchestrator
            .detail_view()
            .map(|state| DetailView { state, image_index: self.image_index });
        CatalogView {
            query: self.query.clone(),
            products,
            pagination,
            categories: categories.categories,
            categories_error: categories.status.error().map(str::to_string),
            detail,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_image_follows_index() {
        let product = Product {
            id: 1,
            title: "Lamp".into(),
            description: String::new(),
            price: 10.0,
            discount_percentage: 0.0,
            rating: 4.0,
            stock: 1,
            brand: String::new(),
            category: "home".into(),
            thumbnail: String::new(),
            images: vec!["a.png".into(), "b.png".into()],
        };
        let detail = DetailView { state: ViewState::Ready(product), image_index: 1 };
        assert_eq!(detail.current_image(), Some("b.png"));
        let loading = DetailView { state: ViewState::Loading, image_index: 0 };
        assert_eq!(loading.current_image(), None);
    }
}
