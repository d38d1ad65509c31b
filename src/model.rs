//!
//! Catalog data model
//! ------------------
//! Wire types for the remote product API plus the small value types the rest of
//! the crate passes around (sort keys, normalized categories, price helpers).

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{CatalogError, CatalogResult};

/// A single catalog product. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub discount_percentage: f64,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub stock: u32,
    // Some products (groceries) come back without a brand.
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub images: Vec<String>,
}

impl Product {
    pub fn has_discount(&self) -> bool {
        self.discount_percentage > 0.0
    }

    pub fn original_price(&self) -> f64 {
        original_price(self.price, self.discount_percentage)
    }

    pub fn savings(&self) -> f64 {
        savings(self.price, self.discount_percentage)
    }
}

/// One page of products as returned by the list endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub total: u64,
    #[serde(default)]
    pub skip: u64,
    #[serde(default)]
    pub limit: u64,
}

/// Products of the current page plus the server-reported total, independent of
/// any client-side filtering applied afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageResult {
    pub products: Vec<Product>,
    pub total: u64,
}

impl From<ProductPage> for PageResult {
    fn from(page: ProductPage) -> Self {
        PageResult { products: page.products, total: page.total }
    }
}

/// Raw category entry: older API versions return bare strings, newer ones
/// return `{slug, name, url}` objects.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CategoryEntry {
    Label(String),
    Item {
        #[serde(default)]
        slug: Option<String>,
        #[serde(default)]
        name: Option<String>,
        #[serde(flatten)]
        rest: serde_json::Map<String, Value>,
    },
    Other(Value),
}

impl CategoryEntry {
    /// Collapse into a single label, preferring slug, then name, else the raw value.
    pub fn into_label(self) -> String {
        match self {
            CategoryEntry::Label(s) => s,
            CategoryEntry::Item { slug: Some(slug), .. } if !slug.is_empty() => slug,
            CategoryEntry::Item { name: Some(name), .. } if !name.is_empty() => name,
            CategoryEntry::Item { slug, name, rest } => {
                let mut obj = rest;
                if let Some(s) = slug { obj.insert("slug".into(), Value::String(s)); }
                if let Some(n) = name { obj.insert("name".into(), Value::String(n)); }
                Value::Object(obj).to_string()
            }
            CategoryEntry::Other(v) => match v {
                Value::String(s) => s,
                other => other.to_string(),
            },
        }
    }
}

/// Normalize a categories payload into plain labels. Accepts any JSON array;
/// a non-array payload yields no categories.
pub fn normalize_categories(payload: Value) -> Vec<String> {
    match payload {
        Value::Array(items) => items
            .into_iter()
            .map(|v| match serde_json::from_value::<CategoryEntry>(v.clone()) {
                Ok(entry) => entry.into_label(),
                Err(_) => CategoryEntry::Other(v).into_label(),
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Client-side sort order applied to the current page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortKey {
    #[default]
    None,
    PriceAsc,
    PriceDesc,
    NameAsc,
    NameDesc,
    RatingDesc,
    DiscountDesc,
}

impl SortKey {
    pub const ALL: [SortKey; 7] = [
        SortKey::None,
        SortKey::PriceAsc,
        SortKey::PriceDesc,
        SortKey::NameAsc,
        SortKey::NameDesc,
        SortKey::RatingDesc,
        SortKey::DiscountDesc,
    ];

    /// Parse a sort token. Unknown tokens map to `SortKey::None` so that an
    /// unrecognised order simply leaves the page as fetched.
    pub fn parse(token: &str) -> SortKey {
        match token.trim().to_ascii_lowercase().as_str() {
            "price-asc" => SortKey::PriceAsc,
            "price-desc" => SortKey::PriceDesc,
            "name-asc" => SortKey::NameAsc,
            "name-desc" => SortKey::NameDesc,
            "rating-desc" => SortKey::RatingDesc,
            "discount-desc" => SortKey::DiscountDesc,
            _ => SortKey::None,
        }
    }

    /// Parse a sort token typed by the user. Accepts `none` (any case) and the
    /// empty string as `SortKey::None`; anything else unknown is an error.
    pub fn parse_user(token: &str) -> CatalogResult<SortKey> {
        let trimmed = token.trim();
        let key = SortKey::parse(trimmed);
        if key == SortKey::None && !trimmed.is_empty() && !trimmed.eq_ignore_ascii_case("none") {
            return Err(CatalogError::user("bad_sort_key", format!("unknown sort key '{}'", trimmed)));
        }
        Ok(key)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::None => "",
            SortKey::PriceAsc => "price-asc",
            SortKey::PriceDesc => "price-desc",
            SortKey::NameAsc => "name-asc",
            SortKey::NameDesc => "name-desc",
            SortKey::RatingDesc => "rating-desc",
            SortKey::DiscountDesc => "discount-desc",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortKey::None => "Sort by",
            SortKey::PriceAsc => "Price: Low to High",
            SortKey::PriceDesc => "Price: High to Low",
            SortKey::NameAsc => "Name: A to Z",
            SortKey::NameDesc => "Name: Z to A",
            SortKey::RatingDesc => "Rating: High to Low",
            SortKey::DiscountDesc => "Discount: High to Low",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::None => f.write_str("none"),
            other => f.write_str(other.as_str()),
        }
    }
}

/// `"home-decoration"` -> `"Home decoration"`.
pub fn format_category_name(category: &str) -> String {
    let mut chars = category.chars();
    match chars.next() {
        Some(first) => {
            let rest: String = chars.collect();
            format!("{}{}", first.to_uppercase(), rest.replace('-', " "))
        }
        None => String::new(),
    }
}

/// List price before the discount was applied.
pub fn original_price(price: f64, discount_percentage: f64) -> f64 {
    if discount_percentage >= 100.0 {
        return price;
    }
    price / (1.0 - discount_percentage / 100.0)
}

pub fn savings(price: f64, discount_percentage: f64) -> f64 {
    original_price(price, discount_percentage) - price
}
