pub mod api_key;
pub mod response;
pub mod session;

pub use api_key::{api_key_middleware, API_KEY_HEADER};
pub use response::{ApiResponse, ApiResult};
pub use session::{session_middleware, SESSION_HEADER, SUBDOMAIN_HEADER};
