//! Product validation and the derived filter price.

use std::collections::HashSet;

use super::error::ProductError;
use crate::models::Product;

/// Checks the required fields for the product's mode.
///
/// A product with no variations is *simple* and needs `name`, `sku`,
/// `price > 0` and `project_id`. A product with variations needs `name` and
/// `project_id`, and every variation needs a `sku` and `price > 0`.
pub fn validate_product(product: &Product) -> Result<(), ProductError> {
    if product.name.trim().is_empty() {
        return Err(ProductError::invalid_field("name", "name is required"));
    }

    if product.is_simple() {
        if product.sku.as_deref().map_or(true, |s| s.trim().is_empty()) {
            return Err(ProductError::invalid_field("sku", "sku is required for a simple product"));
        }
        if !product.price.is_some_and(|p| p > 0.0) {
            return Err(ProductError::invalid_field(
                "price",
                "price must be greater than 0 for a simple product",
            ));
        }
    }

    if product.project_id.trim().is_empty() {
        return Err(ProductError::invalid_field("project_id", "project_id is required"));
    }

    for variation in &product.variations {
        if variation.sku.trim().is_empty() || variation.price <= 0.0 {
            return Err(ProductError::invalid_variation(
                &variation.sku,
                "each variation requires a sku and a price greater than 0",
            ));
        }
    }

    Ok(())
}

/// Creation-time rules: the mode rules plus unique SKUs across the payload's
/// variations.
pub fn validate_new_product(product: &Product) -> Result<(), ProductError> {
    validate_product(product)?;

    let mut seen = HashSet::new();
    for variation in &product.variations {
        if !seen.insert(variation.sku.as_str()) {
            return Err(ProductError::invalid_variation(
                &variation.sku,
                "variation SKUs must be unique within a product",
            ));
        }
    }
    Ok(())
}

/// `price` for a simple product, otherwise the lowest variation price.
/// The first variation wins ties.
pub fn derive_filter_price(product: &Product) -> f64 {
    let mut variations = product.variations.iter();
    match variations.next() {
        None => product.price.unwrap_or(0.0),
        Some(first) => variations.fold(first.price, |min, v| if v.price < min { v.price } else { min }),
    }
}
