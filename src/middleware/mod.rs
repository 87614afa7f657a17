pub mod auth;
pub mod cors;
pub mod response;

pub use auth::write_auth_middleware;
pub use cors::{cors_middleware, panic_response};
pub use response::{ApiResponse, ApiResult};
