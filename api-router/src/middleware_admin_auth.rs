use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::{api_state::ApiState, error::ApiError};

/// Gates project management on the single process-wide admin secret.
pub async fn admin_auth(
    State(state): State<ApiState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = request
        .headers()
        .get("X-Admin-Token")
        .and_then(|v| v.to_str().ok());

    if token != Some(state.config.admin_token.as_str()) {
        return Err(ApiError::Forbidden("Invalid admin token".to_string()));
    }

    Ok(next.run(request).await)
}
