// handlers/variations/mod.rs - Variation sub-resource handlers
//
// Every operation loads the parent product, checks the caller may modify
// its subdomain, edits the variation list and writes the whole product back.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::services::ProductError;

pub mod create; // POST /api/v1/products/:id/variations
pub mod delete; // DELETE /api/v1/products/:id/variations/:variation_id
pub mod update; // PATCH /api/v1/products/:id/variations/:variation_id

pub use create::variation_create;
pub use delete::variation_delete;
pub use update::variation_update;

/// Typed view of an already-parsed body; type mismatches are validation errors
fn parse_body<T: DeserializeOwned>(body: Value, what: &str) -> Result<T, ProductError> {
    serde_json::from_value(body).map_err(|e| ProductError::invalid(format!("Invalid {}: {}", what, e)))
}
