//! Variation sub-resource rules.
//!
//! Each function edits the parent product in memory; the caller persists the
//! whole document afterwards.

use chrono::{DateTime, Utc};

use super::error::ProductError;
use super::validator::derive_filter_price;
use crate::models::{NewVariation, Product, Variation, VariationPatch};

pub fn validate_new_variation(input: &NewVariation) -> Result<(), ProductError> {
    if input.sku.trim().is_empty() || input.price <= 0.0 || input.attributes.is_empty() {
        return Err(ProductError::invalid_variation(
            &input.sku,
            "Missing required variation fields: sku, price, and attributes are required.",
        ));
    }
    Ok(())
}

/// Appends a new active variation. SKUs are compared against every existing
/// variation, including deactivated ones.
pub fn add_variation(product: &mut Product, input: NewVariation, now: DateTime<Utc>) -> Result<Variation, ProductError> {
    validate_new_variation(&input)?;

    if product.variations.iter().any(|v| v.sku == input.sku) {
        return Err(ProductError::Conflict(input.sku));
    }

    let variation = input.into_variation();
    product.variations.push(variation.clone());
    product.filter_price = derive_filter_price(product);
    product.updated_at = now;
    Ok(variation)
}

/// Applies `price`, `stock` and `imageUrl`; nothing else changes.
pub fn update_variation(
    product: &mut Product,
    variation_id: &str,
    patch: &VariationPatch,
    now: DateTime<Utc>,
) -> Result<Variation, ProductError> {
    let index = position(product, variation_id)?;

    if let Some(price) = patch.price {
        if price <= 0.0 {
            return Err(ProductError::invalid_field("price", "price must be greater than 0"));
        }
    }

    let variation = &mut product.variations[index];
    if let Some(price) = patch.price {
        variation.price = price;
    }
    if let Some(stock) = patch.stock {
        variation.stock = stock;
    }
    if let Some(image_url) = &patch.image_url {
        variation.image_url = Some(image_url.clone());
    }
    let updated = variation.clone();

    product.filter_price = derive_filter_price(product);
    product.updated_at = now;
    Ok(updated)
}

/// Soft delete in place; list order and membership are unchanged.
pub fn deactivate_variation(product: &mut Product, variation_id: &str, now: DateTime<Utc>) -> Result<Variation, ProductError> {
    let index = position(product, variation_id)?;

    let variation = &mut product.variations[index];
    variation.active = false;
    let updated = variation.clone();

    product.updated_at = now;
    Ok(updated)
}

fn position(product: &Product, variation_id: &str) -> Result<usize, ProductError> {
    product
        .variations
        .iter()
        .position(|v| v.id == variation_id)
        .ok_or(ProductError::NotFound("Variation"))
}
