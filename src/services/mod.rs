pub mod error;
pub mod guard;
pub mod patch;
pub mod product_service;
pub mod query;
pub mod validator;
pub mod variations;

pub use error::ProductError;
pub use guard::{authorize, is_subdomain_allowed, Action};
pub use patch::ProductPatch;
pub use product_service::{ProductListing, ProductService};
pub use query::scope_to_subdomain;
pub use validator::{derive_filter_price, validate_new_product, validate_product};
