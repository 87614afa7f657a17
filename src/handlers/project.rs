use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, Query, State},
};

use crate::database::models::{Project, ProjectBody};
use crate::database::{Database, RunResult};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

use super::utils::parse_body;

// `visibility = 1 OR ?` keeps a single statement shape; binding true selects every row.
const LIST_SQL: &str =
    "SELECT * FROM projects WHERE visibility = 1 OR ? ORDER BY order_number ASC, s_no DESC";

const INSERT_SQL: &str = "INSERT INTO projects \
    (name, long_description, short_description, images, technologies, github_link, \
     circuit_diagram_link, video_link, category_name, order_number, visibility) \
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)";

// short_description and video_link are not part of the update; only POST sets them.
const UPDATE_SQL: &str = "UPDATE projects SET \
    name = ?, long_description = ?, images = ?, technologies = ?, github_link = ?, \
    circuit_diagram_link = ?, category_name = ?, order_number = ?, visibility = ? \
    WHERE s_no = ?";

pub const INCLUDE_HIDDEN_PARAM: &str = "includeHidden";

/// First `includeHidden` value wins; only the literal `true` enables hidden rows.
pub fn include_hidden(params: &[(String, String)]) -> bool {
    params
        .iter()
        .find(|(key, _)| key == INCLUDE_HIDDEN_PARAM)
        .is_some_and(|(_, value)| value == "true")
}

/// GET /api/projects[?includeHidden=true]
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> ApiResult<Vec<Project>> {
    let projects = state
        .db
        .prepare(LIST_SQL)
        .bind(include_hidden(&params))
        .all::<Project>()
        .await?;
    Ok(ApiResponse::success(projects))
}

/// POST /api/projects
pub async fn create(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<RunResult> {
    let project: ProjectBody = parse_body(&body?)?;

    let result = state
        .db
        .prepare(INSERT_SQL)
        .bind(project.name)
        .bind(project.long_description)
        .bind(project.short_description)
        .bind(project.images)
        .bind(project.technologies)
        .bind(project.github_link)
        .bind(project.circuit_diagram_link)
        .bind(project.video_link)
        .bind(project.category_name)
        .bind(project.order_number)
        .bind(project.visibility)
        .run()
        .await?;

    tracing::info!("Created project s_no={}", result.meta.last_row_id);
    Ok(ApiResponse::created(result))
}

/// PUT /api/projects/:id
pub async fn update(db: &Database, id: i64, body: &Bytes) -> Result<RunResult, ApiError> {
    let project: ProjectBody = parse_body(body)?;

    let result = db
        .prepare(UPDATE_SQL)
        .bind(project.name)
        .bind(project.long_description)
        .bind(project.images)
        .bind(project.technologies)
        .bind(project.github_link)
        .bind(project.circuit_diagram_link)
        .bind(project.category_name)
        .bind(project.order_number)
        .bind(project.visibility)
        .bind(id)
        .run()
        .await?;
    Ok(result)
}
