//! Runtime configuration: where the catalog lives and how it is paged.
//!
//! Values come from built-in defaults, then the `SHOWCASE_*` environment
//! variables, then explicit overrides (command-line flags).

use std::time::Duration;

use reqwest::Url;
use tracing::debug;

use crate::error::{CatalogError, CatalogResult};

pub const DEFAULT_BASE_URL: &str = "https://dummyjson.com";
pub const PRODUCTS_PER_PAGE: u32 = 12;
pub const MAX_VISIBLE_PAGES: u32 = 5;
pub const MAX_VISIBLE_PAGES_COMPACT: u32 = 3;
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

pub const ENV_BASE_URL: &str = "SHOWCASE_BASE_URL";
pub const ENV_PAGE_SIZE: &str = "SHOWCASE_PAGE_SIZE";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub base_url: Url,
    pub page_size: u32,
    pub max_visible_pages: u32,
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: parse_base_url(DEFAULT_BASE_URL).unwrap_or_else(|_| unreachable!("default base url is valid")),
            page_size: PRODUCTS_PER_PAGE,
            max_visible_pages: MAX_VISIBLE_PAGES,
            timeout: REQUEST_TIMEOUT,
        }
    }
}

impl Config {
    /// Defaults overlaid with `SHOWCASE_BASE_URL` / `SHOWCASE_PAGE_SIZE`.
    pub fn from_env() -> CatalogResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Config::from_env`] but reads variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> CatalogResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Config::default();
        if let Some(base) = lookup(ENV_BASE_URL).filter(|s| !s.trim().is_empty()) {
            cfg = cfg.with_base_url(&base)?;
        }
        if let Some(size) = lookup(ENV_PAGE_SIZE).filter(|s| !s.trim().is_empty()) {
            let parsed = size
                .trim()
                .parse::<u32>()
                .map_err(|_| CatalogError::user("bad_page_size", format!("{}='{}' is not a number", ENV_PAGE_SIZE, size)))?;
            cfg = cfg.with_page_size(parsed)?;
        }
        debug!(target: "showcase::config", "config: base_url={}, page_size={}", cfg.base_url, cfg.page_size);
        Ok(cfg)
    }

    pub fn with_base_url(mut self, base: &str) -> CatalogResult<Self> {
        self.base_url = parse_base_url(base)?;
        Ok(self)
    }

    pub fn with_page_size(mut self, page_size: u32) -> CatalogResult<Self> {
        if page_size == 0 {
            return Err(CatalogError::user("bad_page_size", "page size must be at least 1"));
        }
        self.page_size = page_size;
        Ok(self)
    }

    pub fn with_max_visible_pages(mut self, max_visible: u32) -> CatalogResult<Self> {
        if max_visible == 0 {
            return Err(CatalogError::user("bad_max_visible", "at least one page button must be visible"));
        }
        self.max_visible_pages = max_visible;
        Ok(self)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Parse a base URL and make sure it ends with `/` so that `Url::join` keeps
/// any path prefix (e.g. `http://host/api`).
fn parse_base_url(base: &str) -> CatalogResult<Url> {
    let trimmed = base.trim();
    let with_slash = if trimmed.ends_with('/') { trimmed.to_string() } else { format!("{}/", trimmed) };
    let url = Url::parse(&with_slash)
        .map_err(|e| CatalogError::user("bad_base_url", format!("invalid base URL '{}': {}", base, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(CatalogError::user("bad_base_url", format!("unsupported scheme '{}' in base URL", other))),
    }
}
