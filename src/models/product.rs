use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};
use uuid::Uuid;

use crate::store::{Document, Fields};

pub const PRODUCT_ID_PREFIX: &str = "prod-";
pub const VARIATION_ID_PREFIX: &str = "var-";

pub fn new_product_id() -> String {
    format!("{}{}", PRODUCT_ID_PREFIX, Uuid::new_v4())
}

pub fn new_variation_id() -> String {
    format!("{}{}", VARIATION_ID_PREFIX, Uuid::new_v4())
}

/// A sellable variant of a product (size, colour, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variation {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub sku: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
    #[serde(default)]
    pub price: f64,
    #[serde(rename = "imageUrl", default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "whole_number")]
    pub stock: i64,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    #[serde(default)]
    pub active: bool,
}

/// Stored product document.
///
/// Simple products carry their own `sku`/`price`/`stock`; variant-bearing
/// products carry a non-empty `variations` list and a derived `filter_price`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub project_id: String,
    #[serde(default)]
    pub subdomain: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub filter_price: f64,

    // Simple product fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "optional_whole_number")]
    pub stock: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
    #[serde(rename = "imageUrl", default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variations: Vec<Variation>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub dimensions: BTreeMap<String, f64>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub metadata: Map<String, Value>,
}

impl Product {
    pub fn is_simple(&self) -> bool {
        self.variations.is_empty()
    }

    /// Decode a stored document. The document ID wins over a missing body ID.
    pub fn from_document(doc: Document) -> Result<Self, serde_json::Error> {
        let mut product: Product = serde_json::from_value(Value::Object(doc.data))?;
        if product.id.is_empty() {
            product.id = doc.id;
        }
        Ok(product)
    }

    pub fn to_fields(&self) -> Result<Fields, serde_json::Error> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            other => Err(<serde_json::Error as serde::ser::Error>::custom(format!(
                "product serialized to {} instead of an object",
                other
            ))),
        }
    }
}

/// Create payload: a product minus its server-set fields
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewProduct {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub project_id: String,
    #[serde(default)]
    pub subdomain: String,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "optional_whole_number")]
    pub stock: Option<i64>,
    #[serde(default)]
    pub barcode: Option<String>,
    #[serde(rename = "imageUrl", default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub variations: Vec<NewVariation>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub dimensions: BTreeMap<String, f64>,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl NewProduct {
    /// Candidate product with fresh identity, timestamps and `active = true`.
    /// `filter_price` is left at zero for the validator to derive.
    pub fn into_product(self, now: DateTime<Utc>) -> Product {
        Product {
            id: new_product_id(),
            name: self.name,
            description: self.description,
            brand: self.brand,
            category: self.category,
            currency: self.currency,
            active: true,
            project_id: self.project_id,
            subdomain: self.subdomain,
            created_at: now,
            updated_at: now,
            filter_price: 0.0,
            sku: self.sku,
            price: self.price,
            stock: self.stock,
            barcode: self.barcode,
            image_url: self.image_url,
            variations: self.variations.into_iter().map(NewVariation::into_variation).collect(),
            weight: self.weight,
            dimensions: self.dimensions,
            metadata: self.metadata,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewVariation {
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub barcode: Option<String>,
    #[serde(default)]
    pub price: f64,
    #[serde(rename = "imageUrl", default)]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "whole_number")]
    pub stock: i64,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

impl NewVariation {
    pub fn into_variation(self) -> Variation {
        Variation {
            id: new_variation_id(),
            sku: self.sku,
            barcode: self.barcode,
            price: self.price,
            image_url: self.image_url,
            stock: self.stock,
            attributes: self.attributes,
            active: true,
        }
    }
}

/// The only variation fields editable after creation
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct VariationPatch {
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "optional_whole_number")]
    pub stock: Option<i64>,
    #[serde(rename = "imageUrl", default)]
    pub image_url: Option<String>,
}

/// Stock counts arrive as JSON numbers; `3.0` is accepted as `3`.
fn whole_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let number = Number::deserialize(deserializer)?;
    number_to_i64(&number).ok_or_else(|| D::Error::custom(format!("expected a whole number, got {}", number)))
}

fn optional_whole_number<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Number>::deserialize(deserializer)? {
        None => Ok(None),
        Some(number) => number_to_i64(&number)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("expected a whole number, got {}", number))),
    }
}

fn number_to_i64(number: &Number) -> Option<i64> {
    number.as_i64().or_else(|| {
        number
            .as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
            .map(|f| f as i64)
    })
}
