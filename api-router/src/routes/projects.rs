use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use common::{error::AppError, storage::types::project::Project};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::{api_state::ApiState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    pub name: Option<String>,
    pub category: Option<String>,
}

/// Provisions a new tenant: derives the index name and API key, creates the
/// remote index, then persists the record. A remote index left behind by a
/// failed insert is not cleaned up; index creation is idempotent and the
/// admin simply re-invokes.
pub async fn create_project(
    State(state): State<ApiState>,
    Json(input): Json<CreateProjectRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let name = input
        .name
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| ApiError::ValidationError("Missing name or category".to_string()))?;
    let category = input
        .category
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| ApiError::ValidationError("Missing name or category".to_string()))?;

    let project = Project::new(&name, &category);

    state.search.ensure_index(&project.index_name).await?;
    state
        .db
        .store_item(project.clone())
        .await
        .map_err(AppError::from)?;

    info!(
        project_id = %project.id,
        index_name = %project.index_name,
        "Created project"
    );

    Ok((
        StatusCode::OK,
        Json(json!({
            "project": project.name,
            "index": project.index_name,
            "api_key": project.api_key,
            "category": project.category
        })),
    ))
}

/// Lists every registered project as `{name, api_key}` pairs.
pub async fn get_projects(State(state): State<ApiState>) -> Result<impl IntoResponse, ApiError> {
    let projects = Project::list_summaries(&state.db).await?;

    Ok((StatusCode::OK, Json(projects)))
}
