//! Paginated product catalog client.
//!
//! Fetches one page at a time from a dummyjson-compatible REST API, filters and
//! sorts the page client-side and derives paging controls. The [`session`]
//! module ties it together; [`cli`] renders it for the terminal.

pub mod error;
pub mod config;
pub mod model;
pub mod source;
pub mod http;
pub mod query_state;
pub mod transform;
pub mod pagination;
pub mod orchestrator;
pub mod session;
pub mod cli;

pub use error::{CatalogError, CatalogResult};
pub use model::{Product, ProductPage, SortKey};
pub use orchestrator::{Completion, Orchestrator, ViewState};
pub use session::{Action, CatalogSession, CatalogView};
pub use source::ProductSource;
