// handlers/mod.rs - request handlers behind /api
//
// Collection routes (/api/categories, /api/projects) live in their own modules;
// id-addressed routes (/api/:resource/:id) dispatch from record.rs.
pub mod category;
pub mod project;
pub mod record;
pub mod utils;

use crate::error::ApiError;

/// Fallback for every unmatched method + path.
pub async fn not_found() -> ApiError {
    ApiError::route_not_found()
}
