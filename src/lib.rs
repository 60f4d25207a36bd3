pub mod app;
pub mod auth;
pub mod config;
pub mod context;
pub mod error;
pub mod filter;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;
pub mod store;

pub use app::app;
pub use state::AppState;
