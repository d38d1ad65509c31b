#![allow(dead_code)]

use std::collections::VecDeque;
use std::net::TcpListener as StdTcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use parking_lot::Mutex;
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use showcase::error::{CatalogError, CatalogResult};
use showcase::model::{Product, ProductPage};
use showcase::source::ProductSource;

pub const CATEGORIES: [&str; 3] = ["beauty", "laptops", "groceries"];

pub fn product(id: u64, title: &str, price: f64) -> Product {
    Product {
        id,
        title: title.to_string(),
        description: format!("Description of {}", title),
        price,
        discount_percentage: (id % 20) as f64,
        rating: 3.0 + (id % 5) as f64 * 0.4,
        stock: (id * 7 % 100) as u32,
        brand: if id % 4 == 0 { String::new() } else { format!("Brand{}", id % 6) },
        category: CATEGORIES[(id as usize - 1) % CATEGORIES.len()].to_string(),
        thumbnail: format!("https://cdn.example/{}/thumbnail.png", id),
        images: (1..=3).map(|i| format!("https://cdn.example/{}/{}.png", id, i)).collect(),
    }
}

/// `total` products with ids `1..=total`, categories cycling through [`CATEGORIES`].
pub fn catalog(total: u64) -> Vec<Product> {
    (1..=total).map(|id| product(id, &format!("Product {}", id), 5.0 + (id * 37 % 200) as f64)).collect()
}

fn page_of(items: Vec<Product>, limit: u32, skip: u64) -> ProductPage {
    let total = items.len() as u64;
    let products = items.into_iter().skip(skip as usize).take(limit as usize).collect();
    ProductPage { products, total, skip, limit: u64::from(limit) }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List { limit: u32, skip: u64 },
    ByCategory { category: String, limit: u32, skip: u64 },
    Get(u64),
    Categories,
}

/// In-memory product source with scripted failures and gates that hold list
/// requests until the test releases them.
pub struct ScriptedSource {
    products: Mutex<Vec<Product>>,
    categories: Mutex<CatalogResult<Vec<String>>>,
    list_failures: Mutex<VecDeque<CatalogError>>,
    gates: Mutex<VecDeque<oneshot::Receiver<()>>>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedSource {
    pub fn new(products: Vec<Product>) -> Self {
        ScriptedSource {
            products: Mutex::new(products),
            categories: Mutex::new(Ok(CATEGORIES.iter().map(|c| c.to_string()).collect())),
            list_failures: Mutex::new(VecDeque::new()),
            gates: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_catalog(total: u64) -> Self {
        Self::new(catalog(total))
    }

    /// Replace the catalog served by later requests.
    pub fn set_products(&self, products: Vec<Product>) {
        *self.products.lock() = products;
    }

    /// The next list request fails with `err`.
    pub fn fail_next_list(&self, err: CatalogError) {
        self.list_failures.lock().push_back(err);
    }

    pub fn fail_categories(&self, err: CatalogError) {
        *self.categories.lock() = Err(err);
    }

    /// Hold the next list request until the returned sender fires.
    pub fn gate_next_list(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().push_back(rx);
        tx
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn list_calls(&self) -> usize {
        self.calls.lock().iter().filter(|c| matches!(c, Call::List { .. } | Call::ByCategory { .. })).count()
    }

    async fn list_common(&self, call: Call, items: Vec<Product>, limit: u32, skip: u64) -> CatalogResult<ProductPage> {
        self.calls.lock().push(call);
        let gate = self.gates.lock().pop_front();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        let failure = self.list_failures.lock().pop_front();
        if let Some(err) = failure {
            return Err(err);
        }
        Ok(page_of(items, limit, skip))
    }
}

impl ProductSource for ScriptedSource {
    async fn list(&self, limit: u32, skip: u64) -> CatalogResult<ProductPage> {
        let items = self.products.lock().clone();
        self.list_common(Call::List { limit, skip }, items, limit, skip).await
    }

    async fn list_by_category(&self, category: &str, limit: u32, skip: u64) -> CatalogResult<ProductPage> {
        let items: Vec<Product> = self.products.lock().iter().filter(|p| p.category == category).cloned().collect();
        let call = Call::ByCategory { category: category.to_string(), limit, skip };
        self.list_common(call, items, limit, skip).await
    }

    async fn get(&self, id: u64) -> CatalogResult<Product> {
        self.calls.lock().push(Call::Get(id));
        self.products
            .lock()
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| CatalogError::not_found("product_not_found", format!("Product with id '{}' not found", id)))
    }

    async fn categories(&self) -> CatalogResult<Vec<String>> {
        self.calls.lock().push(Call::Categories);
        self.categories.lock().clone()
    }
}

/// Yield until `cond` holds; spawned tasks only make progress when the test yields.
pub async fn wait_until(mut cond: impl FnMut() -> bool) {
    for _ in 0..10_000 {
        if cond() {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("condition not reached");
}

// --- In-process mock of the catalog HTTP API ---

pub struct MockApi {
    pub products: Vec<Product>,
    pub categories: Value,
    /// Number of upcoming list requests answered with HTTP 500.
    pub fail_lists: AtomicUsize,
    pub hits: AtomicUsize,
}

impl MockApi {
    pub fn new(products: Vec<Product>) -> Arc<Self> {
        Arc::new(MockApi {
            products,
            categories: json!([
                {"slug": "beauty", "name": "Beauty", "url": "https://dummyjson.com/products/category/beauty"},
                {"slug": "laptops", "name": "Laptops", "url": "https://dummyjson.com/products/category/laptops"},
                "groceries"
            ]),
            fail_lists: AtomicUsize::new(0),
            hits: AtomicUsize::new(0),
        })
    }
}

#[derive(Debug, Deserialize)]
struct PageQuery {
    limit: Option<u32>,
    skip: Option<u64>,
}

fn take_failure(api: &MockApi) -> bool {
    api.fail_lists
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| if n > 0 { Some(n - 1) } else { None })
        .is_ok()
}

fn page_response(api: &MockApi, items: Vec<Product>, q: PageQuery) -> Response {
    api.hits.fetch_add(1, Ordering::SeqCst);
    if take_failure(api) {
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"message": "boom"}))).into_response();
    }
    let page = page_of(items, q.limit.unwrap_or(30), q.skip.unwrap_or(0));
    Json(json!({
        "products": page.products,
        "total": page.total,
        "skip": page.skip,
        "limit": page.limit,
    }))
    .into_response()
}

async fn list_products(State(api): State<Arc<MockApi>>, Query(q): Query<PageQuery>) -> Response {
    let items = api.products.clone();
    page_response(&api, items, q)
}

async fn list_category(
    State(api): State<Arc<MockApi>>,
    Path(category): Path<String>,
    Query(q): Query<PageQuery>,
) -> Response {
    let items: Vec<Product> = api.products.iter().filter(|p| p.category == category).cloned().collect();
    page_response(&api, items, q)
}

async fn get_product(State(api): State<Arc<MockApi>>, Path(id): Path<String>) -> Response {
    api.hits.fetch_add(1, Ordering::SeqCst);
    let found = id.parse::<u64>().ok().and_then(|id| api.products.iter().find(|p| p.id == id).cloned());
    match found {
        Some(p) => Json(p).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({"message": format!("Product with id '{}' not found", id)}))).into_response(),
    }
}

async fn list_categories(State(api): State<Arc<MockApi>>) -> Response {
    api.hits.fetch_add(1, Ordering::SeqCst);
    Json(api.categories.clone()).into_response()
}

/// Serve `api` on an ephemeral localhost port. Returns the task handle (abort
/// it to stop) and the base URL.
pub async fn start_mock_api(api: Arc<MockApi>) -> (JoinHandle<()>, String) {
    let app = Router::new()
        .route("/products", get(list_products))
        .route("/products/categories", get(list_categories))
        .route("/products/category/{category}", get(list_category))
        .route("/products/{id}", get(get_product))
        .with_state(api);
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0)).await.expect("bind 127.0.0.1:0");
    let addr = listener.local_addr().expect("local addr");
    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("mock api task error: {e:?}");
        }
    });
    (handle, format!("http://{}", addr))
}

/// A localhost URL nothing is listening on.
pub fn dead_base_url() -> String {
    let listener = StdTcpListener::bind(("127.0.0.1", 0)).expect("bind 127.0.0.1:0");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}
