use thiserror::Error;

use crate::store::StoreError;

/// Failures of the catalog rules, independent of HTTP
#[derive(Debug, Error)]
pub enum ProductError {
    #[error("{message}")]
    Validation {
        message: String,
        field: Option<String>,
        sku: Option<String>,
    },

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Permission(String),

    /// The request carried no authorized-subdomain set
    #[error("Could not verify user permissions")]
    AuthContext,

    #[error("A variation with SKU '{0}' already exists for this product")]
    Conflict(String),

    #[error("Stored product could not be decoded: {0}")]
    Corrupt(#[source] serde_json::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ProductError {
    pub fn invalid_field(field: &str, message: impl Into<String>) -> Self {
        ProductError::Validation {
            message: message.into(),
            field: Some(field.to_string()),
            sku: None,
        }
    }

    pub fn invalid_variation(sku: &str, message: impl Into<String>) -> Self {
        ProductError::Validation {
            message: message.into(),
            field: Some("variations".to_string()),
            sku: Some(sku.to_string()),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        ProductError::Validation {
            message: message.into(),
            field: None,
            sku: None,
        }
    }
}
