//! Partial product updates.

use chrono::{DateTime, Utc};
use serde_json::Value;

use super::error::ProductError;
use super::validator::{derive_filter_price, validate_product};
use crate::models::Product;
use crate::store::Fields;

/// Never writable through a patch
pub const IMMUTABLE_FIELDS: [&str; 5] = ["id", "createdAt", "subdomain", "project_id", "variations"];

/// Stamped by the server on every write
pub const SERVER_FIELDS: [&str; 2] = ["updatedAt", "filter_price"];

pub const EDITABLE_FIELDS: [&str; 14] = [
    "name",
    "description",
    "brand",
    "category",
    "currency",
    "active",
    "sku",
    "price",
    "stock",
    "barcode",
    "imageUrl",
    "weight",
    "dimensions",
    "metadata",
];

/// Allow-listed field map accepted by `PATCH /products/{id}`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    fields: Fields,
}

impl ProductPatch {
    /// Keeps editable keys, drops everything else
    pub fn from_json(body: Value) -> Result<Self, ProductError> {
        let Value::Object(map) = body else {
            return Err(ProductError::invalid("update body must be a JSON object"));
        };

        let mut fields = Fields::new();
        for (key, value) in map {
            if EDITABLE_FIELDS.contains(&key.as_str()) {
                fields.insert(key, value);
            } else if IMMUTABLE_FIELDS.contains(&key.as_str()) || SERVER_FIELDS.contains(&key.as_str()) {
                tracing::debug!("dropping protected field '{}' from product patch", key);
            } else {
                tracing::debug!("dropping unknown field '{}' from product patch", key);
            }
        }
        Ok(Self { fields })
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    /// Merge onto `product` and re-check it.
    ///
    /// Returns the merged product and the fields to write: the accepted patch
    /// keys plus `updatedAt` and `filter_price`.
    pub fn apply(&self, product: &Product, now: DateTime<Utc>) -> Result<(Product, Fields), ProductError> {
        let mut doc = product.to_fields().map_err(ProductError::Corrupt)?;
        for (key, value) in &self.fields {
            doc.insert(key.clone(), value.clone());
        }

        let mut merged: Product = serde_json::from_value(Value::Object(doc))
            .map_err(|e| ProductError::invalid(format!("invalid field value: {}", e)))?;
        validate_product(&merged)?;

        merged.filter_price = derive_filter_price(&merged);
        merged.updated_at = now;

        let mut write = self.fields.clone();
        write.insert("filter_price".to_string(), Value::from(merged.filter_price));
        write.insert(
            "updatedAt".to_string(),
            serde_json::to_value(now).map_err(ProductError::Corrupt)?,
        );
        Ok((merged, write))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewProduct;
    use chrono::Duration;
    use serde_json::json;

    fn product() -> Product {
        NewProduct {
            name: "Shirt".into(),
            sku: Some("SH1".into()),
            price: Some(10.0),
            project_id: "p1".into(),
            subdomain: "acme".into(),
            ..Default::default()
        }
        .into_product(Utc::now() - Duration::hours(1))
    }

    #[test]
    fn drops_immutable_server_and_unknown_keys() {
        let patch = ProductPatch::from_json(json!({
            "id": "prod-x",
            "createdAt": "2000-01-01T00:00:00Z",
            "subdomain": "evil",
            "project_id": "p2",
            "variations": [],
            "updatedAt": "2000-01-01T00:00:00Z",
            "filter_price": 0.01,
            "owner": "mallory",
            "name": "Better Shirt"
        }))
        .unwrap();

        assert_eq!(patch.fields().len(), 1);
        assert_eq!(patch.fields()["name"], "Better Shirt");
    }

    #[test]
    fn non_object_body_is_invalid() {
        assert!(ProductPatch::from_json(json!([1, 2])).is_err());
        assert!(ProductPatch::from_json(json!("name")).is_err());
    }

    #[test]
    fn apply_keeps_protected_fields_and_stamps_time() {
        let original = product();
        let patch = ProductPatch::from_json(json!({"subdomain": "evil", "category": "tops"})).unwrap();
        let now = Utc::now();

        let (merged, write) = patch.apply(&original, now).unwrap();
        assert_eq!(merged.subdomain, "acme");
        assert_eq!(merged.id, original.id);
        assert_eq!(merged.created_at, original.created_at);
        assert_eq!(merged.category, "tops");
        assert_eq!(merged.updated_at, now);

        assert!(write.contains_key("category"));
        assert!(write.contains_key("updatedAt"));
        assert!(write.contains_key("filter_price"));
        assert!(!write.contains_key("subdomain"));
    }

    #[test]
    fn price_change_refreshes_filter_price() {
        let patch = ProductPatch::from_json(json!({"price": 15})).unwrap();
        let (merged, write) = patch.apply(&product(), Utc::now()).unwrap();
        assert_eq!(merged.filter_price, 15.0);
        assert_eq!(write["filter_price"], json!(15.0));
    }

    #[test]
    fn invalid_values_are_rejected() {
        let bad_type = ProductPatch::from_json(json!({"stock": "lots"})).unwrap();
        assert!(matches!(bad_type.apply(&product(), Utc::now()), Err(ProductError::Validation { .. })));

        let zero_price = ProductPatch::from_json(json!({"price": 0})).unwrap();
        assert!(matches!(zero_price.apply(&product(), Utc::now()), Err(ProductError::Validation { .. })));

        let blank_name = ProductPatch::from_json(json!({"name": ""})).unwrap();
        assert!(blank_name.apply(&product(), Utc::now()).is_err());
    }
}
