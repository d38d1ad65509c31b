//! The remote product source seam.
//!
//! The orchestrator only talks to this trait, so tests can swap the HTTP
//! client for a scripted in-memory source.

use std::future::Future;

use crate::error::CatalogResult;
use crate::model::{Product, ProductPage};

pub trait ProductSource: Send + Sync {
    /// `GET /products?limit=..&skip=..`
    fn list(&self, limit: u32, skip: u64) -> impl Future<Output = CatalogResult<ProductPage>> + Send;

    /// `GET /products/category/{category}?limit=..&skip=..`
    fn list_by_category(
        &self,
        category: &str,
        limit: u32,
        skip: u64,
    ) -> impl Future<Output = CatalogResult<ProductPage>> + Send;

    /// `GET /products/{id}`
    fn get(&self, id: u64) -> impl Future<Output = CatalogResult<Product>> + Send;

    /// `GET /products/categories`, already normalized to labels.
    fn categories(&self) -> impl Future<Output = CatalogResult<Vec<String>>> + Send;
}
