use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::Uri,
};

use crate::database::{Database, DatabaseError, RunResult};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

use super::utils::{record_segments, resolve_record_path, Resource};
use super::{category, project};

/// Tables a DELETE may name. The table is interpolated into SQL, so this list is checked
/// again right before the statement is built.
pub const DELETABLE_TABLES: [&str; 2] = ["projects", "categories"];

pub fn delete_sql(table: &str) -> Result<String, DatabaseError> {
    if !DELETABLE_TABLES.contains(&table) {
        return Err(DatabaseError::TableNotAllowed(table.to_string()));
    }
    Ok(format!("DELETE FROM {} WHERE s_no = ?", table))
}

/// DELETE by `s_no`. Zero matched rows is still a success.
pub async fn delete_by_id(db: &Database, resource: Resource, id: i64) -> Result<RunResult, DatabaseError> {
    let sql = delete_sql(resource.table_name())?;
    db.prepare(sql).bind(id).run().await
}

/// Resolve the record a request addresses from the raw pathname. Percent-encoded
/// segments never match.
fn resolve_uri(uri: &Uri) -> Result<(Resource, i64), ApiError> {
    let (resource, id) = record_segments(uri.path()).ok_or_else(ApiError::route_not_found)?;
    resolve_record_path(resource, id)
}

/// PUT /api/:resource/:id
pub async fn put(
    State(state): State<AppState>,
    uri: Uri,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<RunResult> {
    let (resource, id) = resolve_uri(&uri)?;
    let body = body?;

    let result = match resource {
        Resource::Projects => project::update(&state.db, id, &body).await?,
        Resource::Categories => category::update(&state.db, id, &body).await?,
    };

    tracing::info!(
        "Updated {} s_no={} ({} rows)",
        resource.table_name(),
        id,
        result.meta.changes
    );
    Ok(ApiResponse::success(result))
}

/// DELETE /api/:resource/:id
pub async fn delete(State(state): State<AppState>, uri: Uri) -> ApiResult<()> {
    let (resource, id) = resolve_uri(&uri)?;

    let result = delete_by_id(&state.db, resource, id).await?;

    tracing::info!(
        "Deleted {} s_no={} ({} rows)",
        resource.table_name(),
        id,
        result.meta.changes
    );
    Ok(ApiResponse::no_content())
}
