pub mod product;

pub use product::{NewProduct, NewVariation, Product, Variation, VariationPatch};
