//! Unified catalog error model.
//! Every failure crossing the fetch boundary is one of these variants, each
//! carrying a stable machine code plus a human-readable message.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CatalogError {
    /// Transport failure: DNS, connect, timeout, reset.
    #[error("{code}: {message}")]
    Network { code: String, message: String },
    /// The source answered with a non-success HTTP status.
    #[error("{code}: {message}")]
    Status { code: String, message: String, status: u16 },
    /// The body did not match the expected shape.
    #[error("{code}: {message}")]
    Decode { code: String, message: String },
    #[error("{code}: {message}")]
    NotFound { code: String, message: String },
    #[error("{code}: {message}")]
    UserInput { code: String, message: String },
    #[error("{code}: {message}")]
    Internal { code: String, message: String },
}

impl CatalogError {
    pub fn code_str(&self) -> &str {
        match self {
            CatalogError::Network { code, .. }
            | CatalogError::Status { code, .. }
            | CatalogError::Decode { code, .. }
            | CatalogError::NotFound { code, .. }
            | CatalogError::UserInput { code, .. }
            | CatalogError::Internal { code, .. } => code.as_str(),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            CatalogError::Network { message, .. }
            | CatalogError::Status { message, .. }
            | CatalogError::Decode { message, .. }
            | CatalogError::NotFound { message, .. }
            | CatalogError::UserInput { message, .. }
            | CatalogError::Internal { message, .. } => message.as_str(),
        }
    }

    pub fn network(code: impl Into<String>, msg: impl Into<String>) -> Self { CatalogError::Network { code: code.into(), message: msg.into() } }
    pub fn status(code: impl Into<String>, msg: impl Into<String>, status: u16) -> Self { CatalogError::Status { code: code.into(), message: msg.into(), status } }
    pub fn decode(code: impl Into<String>, msg: impl Into<String>) -> Self { CatalogError::Decode { code: code.into(), message: msg.into() } }
    pub fn not_found(code: impl Into<String>, msg: impl Into<String>) -> Self { CatalogError::NotFound { code: code.into(), message: msg.into() } }
    pub fn user(code: impl Into<String>, msg: impl Into<String>) -> Self { CatalogError::UserInput { code: code.into(), message: msg.into() } }
    pub fn internal(code: impl Into<String>, msg: impl Into<String>) -> Self { CatalogError::Internal { code: code.into(), message: msg.into() } }

    /// Whether repeating the same request could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            CatalogError::Network { .. } => true,
            CatalogError::Status { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }

    /// Message shown to the user in place of the page content.
    pub fn user_message(&self) -> String {
        match self {
            CatalogError::Network { .. } => format!("Network error: {}", self.message()),
            CatalogError::Status { status, .. } => format!("HTTP error! status: {}", status),
            CatalogError::Decode { .. } => format!("Unexpected response from the catalog: {}", self.message()),
            CatalogError::NotFound { .. } | CatalogError::UserInput { .. } | CatalogError::Internal { .. } => {
                self.message().to_string()
            }
        }
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return CatalogError::decode("decode_error", err.to_string());
        }
        if let Some(status) = err.status() {
            return CatalogError::status("http_status", err.to_string(), status.as_u16());
        }
        if err.is_builder() {
            return CatalogError::internal("request_builder", err.to_string());
        }
        CatalogError::network("network_error", err.to_string())
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::decode("decode_error", err.to_string())
    }
}
