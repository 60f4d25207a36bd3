// handlers/products/mod.rs - Product resource handlers

pub mod create; // POST /api/v1/products
pub mod delete; // DELETE /api/v1/products/:id
pub mod search; // POST /api/v1/products/search
pub mod show; // GET /api/v1/products/:id
pub mod update; // PATCH /api/v1/products/:id

pub use create::product_create;
pub use delete::product_delete;
pub use search::product_search;
pub use show::product_show;
pub use update::product_update;
