use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
};

use crate::database::models::{Category, CategoryBody};
use crate::database::{Database, RunResult};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

use super::utils::parse_body;

const LIST_SQL: &str = "SELECT * FROM categories ORDER BY project_count DESC, category_name ASC";
const INSERT_SQL: &str = "INSERT INTO categories (category_name) VALUES (?)";
const UPDATE_SQL: &str = "UPDATE categories SET category_name = ? WHERE s_no = ?";

/// GET /api/categories - most populated first, then alphabetical
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Category>> {
    let categories = state.db.prepare(LIST_SQL).all::<Category>().await?;
    Ok(ApiResponse::success(categories))
}

/// POST /api/categories - body `{name}`
pub async fn create(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<RunResult> {
    let CategoryBody { name } = parse_body(&body?)?;

    let result = state.db.prepare(INSERT_SQL).bind(name).run().await?;
    tracing::info!("Created category s_no={}", result.meta.last_row_id);
    Ok(ApiResponse::created(result))
}

/// PUT /api/categories/:id - renames the category; `project_count` is left to storage
pub async fn update(db: &Database, id: i64, body: &Bytes) -> Result<RunResult, ApiError> {
    let CategoryBody { name } = parse_body(body)?;

    let result = db.prepare(UPDATE_SQL).bind(name).bind(id).run().await?;
    Ok(result)
}
