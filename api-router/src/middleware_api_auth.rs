use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use common::storage::types::project::Project;

use crate::{api_state::ApiState, error::ApiError};

/// Resolves the tenant from its API key and stashes the `Project` as a
/// request extension. A missing header is a validation error, an unknown key
/// an authorization error.
pub async fn api_auth(
    State(state): State<ApiState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let api_key = extract_api_key(&request)
        .ok_or_else(|| ApiError::ValidationError("Missing API key".to_string()))?;

    let project = Project::find_by_api_key(&api_key, &state.db).await?;
    let project = project.ok_or_else(|| ApiError::Forbidden("Invalid API key".to_string()))?;

    request.extensions_mut().insert(project);

    Ok(next.run(request).await)
}

fn extract_api_key(request: &Request) -> Option<String> {
    request
        .headers()
        .get("X-API-Key")
        .and_then(|v| v.to_str().ok())
        .or_else(|| {
            request
                .headers()
                .get("Authorization")
                .and_then(|v| v.to_str().ok())
                .and_then(|auth| auth.strip_prefix("Bearer ").map(str::trim))
        })
        .map(String::from)
}
