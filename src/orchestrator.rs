//!
//! Data fetch orchestrator
//! -----------------------
//! Turns query parameters into requests against a [`ProductSource`] and keeps
//! the resulting loading / error / ready state for three independent concerns:
//! the product list, a single product (detail view) and the category list.
//!
//! Several requests for the same concern may be in flight at once (the
//! orchestrator is cheap to clone and can be driven from different tasks).
//! Every request takes a fresh token when it starts; when it completes its
//! result is applied only if no newer request has started since. Late results
//! are dropped, which stands in for cancellation.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::error::CatalogError;
use crate::model::{PageResult, Product};
use crate::pagination::skip_for;
use crate::source::ProductSource;

pub const MSG_CATEGORIES_FAILED: &str = "Failed to load categories";
pub const MSG_DETAILS_FAILED: &str = "Failed to fetch product details";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed(String),
}

impl LoadStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadStatus::Idle | LoadStatus::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadStatus::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

/// What the presentation layer is allowed to see.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Loading,
    Error(String),
    Ready(T),
}

impl<T> ViewState<T> {
    fn from_status(status: &LoadStatus, data: impl FnOnce() -> T) -> Self {
        match status {
            LoadStatus::Idle | LoadStatus::Loading => ViewState::Loading,
            LoadStatus::Failed(msg) => ViewState::Error(msg.clone()),
            LoadStatus::Ready => ViewState::Ready(data()),
        }
    }
}

/// How a request ended from the orchestrator's point of view.
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    Applied,
    Failed(CatalogError),
    /// A newer request started first; this result was discarded.
    Stale,
}

/// Parameters of a list request, kept for retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadParams {
    pub page: u32,
    pub category: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListState {
    pub status: LoadStatus,
    pub result: PageResult,
    pub params: Option<LoadParams>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailState {
    pub status: LoadStatus,
    pub requested_id: Option<u64>,
    pub product: Option<Product>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryState {
    pub status: LoadStatus,
    pub categories: Vec<String>,
}

/// State for one concern plus the token of its newest request.
#[derive(Debug, Default)]
struct Slot<T> {
    latest: u64,
    state: T,
}

impl<T> Slot<T> {
    fn begin(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    fn is_current(&self, token: u64) -> bool {
        self.latest == token
    }
}

#[derive(Debug, Default)]
struct Inner {
    list: Slot<ListState>,
    detail: Slot<DetailState>,
    categories: Slot<CategoryState>,
}

pub struct Orchestrator<S> {
    source: Arc<S>,
    page_size: u32,
    inner: Arc<Mutex<Inner>>,
}

impl<S> Clone for Orchestrator<S> {
    fn clone(&self) -> Self {
        Orchestrator { source: Arc::clone(&self.source), page_size: self.page_size, inner: Arc::clone(&self.inner) }
    }
}

impl<S: ProductSource> Orchestrator<S> {
    pub fn new(source: S, page_size: u32) -> Self {
        Self::with_shared(Arc::new(source), page_size)
    }

    pub fn with_shared(source: Arc<S>, page_size: u32) -> Self {
        Orchestrator { source, page_size: page_size.max(1), inner: Arc::new(Mutex::new(Inner::default())) }
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetch one page. A non-empty `category` selects the category-scoped
    /// endpoint. On failure the product list and total are cleared.
    pub async fn load(&self, page: u32, category: &str) -> Completion {
        let params = LoadParams { page: page.max(1), category: category.to_string() };
        let token = {
            let mut inner = self.inner.lock();
            let token = inner.list.begin();
            inner.list.state.status = LoadStatus::Loading;
            inner.list.state.params = Some(params.clone());
            token
        };

        let limit = self.page_size;
        let skip = skip_for(params.page, limit);
        debug!(target: "showcase::orchestrator", "list #{}: page={}, category='{}', limit={}, skip={}", token, params.page, params.category, limit, skip);
        let res = if params.category.is_empty() {
            self.source.list(limit, skip).await
        } else {
            self.source.list_by_category(&params.category, limit, skip).await
        };

        let mut inner = self.inner.lock();
        if !inner.list.is_current(token) {
            debug!(target: "showcase::orchestrator", "list #{} superseded by #{}; dropping result", token, inner.list.latest);
            return Completion::Stale;
        }
        let state = &mut inner.list.state;
        match res {
            Ok(page) => {
                info!(target: "showcase::orchestrator", "list #{}: {} products (total {})", token, page.products.len(), page.total);
                state.result = PageResult::from(page);
                state.status = LoadStatus::Ready;
                Completion::Applied
            }
            Err(err) => {
                warn!(target: "showcase::orchestrator", "list #{} failed: {}", token, err);
                state.result = PageResult::default();
                state.status = LoadStatus::Failed(err.user_message());
                Completion::Failed(err)
            }
        }
    }

    /// Repeat the last list request. `None` when nothing was loaded yet.
    pub async fn retry(&self) -> Option<Completion> {
        let params = self.inner.lock().list.state.params.clone();
        match params {
            Some(p) => {
                info!(target: "showcase::orchestrator", "retrying page={}, category='{}'", p.page, p.category);
                Some(self.load(p.page, &p.category).await)
            }
            None => None,
        }
    }

    /// Fetch a single product for the detail view. Independent of paging.
    pub async fn load_one(&self, id: u64) -> Completion {
        let token = {
            let mut inner = self.inner.lock();
            let token = inner.detail.begin();
            inner.detail.state = DetailState { status: LoadStatus::Loading, requested_id: Some(id), product: None };
            token
        };

        let res = self.source.get(id).await;

        let mut inner = self.inner.lock();
        if !inner.detail.is_current(token) {
            debug!(target: "showcase::orchestrator", "detail #{} for id {} superseded; dropping result", token, id);
            return Completion::Stale;
        }
        let state = &mut inner.detail.state;
        match res {
            Ok(product) => {
                state.product = Some(product);
                state.status = LoadStatus::Ready;
                Completion::Applied
            }
            Err(err) => {
                warn!(target: "showcase::orchestrator", "product {} failed: {}", id, err);
                state.product = None;
                state.status = LoadStatus::Failed(format!("{}: {}", MSG_DETAILS_FAILED, err.user_message()));
                Completion::Failed(err)
            }
        }
    }

    /// Close the detail view; a detail request still in flight is ignored.
    pub fn clear_detail(&self) {
        let mut inner = self.inner.lock();
        inner.detail.begin();
        inner.detail.state = DetailState::default();
    }

    /// Fetch the category labels. Failure empties the list and records an
    /// error without touching the product list.
    pub async fn load_categories(&self) -> Completion {
        let token = {
            let mut inner = self.inner.lock();
            let token = inner.categories.begin();
            inner.categories.state.status = LoadStatus::Loading;
            token
        };

        let res = self.source.categories().await;

        let mut inner = self.inner.lock();
        if !inner.categories.is_current(token) {
            return Completion::Stale;
        }
        let state = &mut inner.categories.state;
        match res {
            Ok(categories) => {
                debug!(target: "showcase::orchestrator", "{} categories", categories.len());
                state.categories = categories;
                state.status = LoadStatus::Ready;
                Completion::Applied
            }
            Err(err) => {
                warn!(target: "showcase::orchestrator", "categories failed: {}", err);
                state.categories = Vec::new();
                state.status = LoadStatus::Failed(MSG_CATEGORIES_FAILED.to_string());
                Completion::Failed(err)
            }
        }
    }

    pub fn list_state(&self) -> ListState {
        self.inner.lock().list.state.clone()
    }

    pub fn detail_state(&self) -> DetailState {
        self.inner.lock().detail.state.clone()
    }

    pub fn category_state(&self) -> CategoryState {
        self.inner.lock().categories.state.clone()
    }

    pub fn list_view(&self) -> ViewState<PageResult> {
        let inner = self.inner.lock();
        let state = &inner.list.state;
        ViewState::from_status(&state.status, || state.result.clone())
    }

    pub fn detail_view(&self) -> Option<ViewState<Product>> {
        let inner = self.inner.lock();
        let state = &inner.detail.state;
        state.requested_id?;
        match (&state.status, &state.product) {
            (LoadStatus::Ready, Some(p)) => Some(ViewState::Ready(p.clone())),
            (LoadStatus::Failed(msg), _) => Some(ViewState::Error(msg.clone())),
            _ => Some(ViewState::Loading),
        }
    }

    pub fn categories_view(&self) -> ViewState<Vec<String>> {
        let inner = self.inner.lock();
        let state = &inner.categories.state;
        ViewState::from_status(&state.status, || state.categories.clone())
    }
}
