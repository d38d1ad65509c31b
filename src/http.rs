//!
//! HTTP product source
//! -------------------
//! `reqwest` adapter for a dummyjson-compatible catalog API. All endpoints are
//! plain JSON `GET`s; non-success statuses and transport failures become
//! [`CatalogError`]s here and never escape as panics.

use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{CatalogError, CatalogResult};
use crate::model::{normalize_categories, Product, ProductPage};
use crate::source::ProductSource;

#[derive(Clone)]
pub struct HttpProductSource {
    base: Url,
    client: reqwest::Client,
}

impl HttpProductSource {
    pub fn new(config: &Config) -> CatalogResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("showcase/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { base: config.base_url.clone(), client })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    pub fn products_url(&self, limit: u32, skip: u64) -> CatalogResult<Url> {
        let mut url = self.join("products")?;
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string())
            .append_pair("skip", &skip.to_string());
        Ok(url)
    }

    pub fn category_url(&self, category: &str, limit: u32, skip: u64) -> CatalogResult<Url> {
        let path = format!("products/category/{}", urlencoding::encode(category));
        let mut url = self.join(&path)?;
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string())
            .append_pair("skip", &skip.to_string());
        Ok(url)
    }

    pub fn product_url(&self, id: u64) -> CatalogResult<Url> {
        self.join(&format!("products/{}", id))
    }

    pub fn categories_url(&self) -> CatalogResult<Url> {
        self.join("products/categories")
    }

    fn join(&self, path: &str) -> CatalogResult<Url> {
        self.base
            .join(path)
            .map_err(|e| CatalogError::internal("bad_url", format!("cannot build URL for '{}': {}", path, e)))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> CatalogResult<T> {
        debug!(target: "showcase::http", "GET {}", url);
        let resp = self.client.get(url.clone()).send().await.map_err(|e| {
            warn!(target: "showcase::http", "GET {} failed: {}", url, e);
            CatalogError::from(e)
        })?;
        let status = resp.status();
        if !status.is_success() {
            warn!(target: "showcase::http", "GET {} -> HTTP {}", url, status);
            return Err(status_error(status, &url));
        }
        let body = resp.bytes().await?;
        serde_json::from_slice::<T>(&body).map_err(|e| {
            warn!(target: "showcase::http", "GET {} returned an unexpected body: {}", url, e);
            CatalogError::from(e)
        })
    }
}

fn status_error(status: StatusCode, url: &Url) -> CatalogError {
    if status == StatusCode::NOT_FOUND {
        return CatalogError::not_found("not_found", format!("Nothing found at {}", url.path()));
    }
    CatalogError::status("http_status", format!("HTTP error! status: {}", status.as_u16()), status.as_u16())
}

impl ProductSource for HttpProductSource {
    async fn list(&self, limit: u32, skip: u64) -> CatalogResult<ProductPage> {
        let url = self.products_url(limit, skip)?;
        self.get_json(url).await
    }

    async fn list_by_category(&self, category: &str, limit: u32, skip: u64) -> CatalogResult<ProductPage> {
        let url = self.category_url(category, limit, skip)?;
        self.get_json(url).await
    }

    async fn get(&self, id: u64) -> CatalogResult<Product> {
        let url = self.product_url(id)?;
        match self.get_json(url).await {
            Err(CatalogError::NotFound { .. }) => {
                Err(CatalogError::not_found("product_not_found", format!("Product with id '{}' not found", id)))
            }
            other => other,
        }
    }

    async fn categories(&self) -> CatalogResult<Vec<String>> {
        let url = self.categories_url()?;
        let payload: Value = self.get_json(url).await?;
        Ok(normalize_categories(payload))
    }
}
