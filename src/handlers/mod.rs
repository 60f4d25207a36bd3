// handlers/mod.rs - Route handlers
//
// public     → no authentication (/, /health)
// products   → product resource (/api/v1/products)
// variations → nested variation resource (/api/v1/products/:id/variations)

pub mod products;
pub mod public;
pub mod variations;

pub use public::{health, root};
