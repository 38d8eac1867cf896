use std::path::Path;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Extension, Json};
use axum_typed_multipart::{FieldData, TryFromMultipart, TypedMultipart};
use common::{
    storage::types::project::Project,
    utils::{
        filename::sanitize_filename,
        text_extraction::{allowed_file, extract_text},
    },
};
use serde_json::json;
use tempfile::NamedTempFile;
use tracing::info;

use crate::{api_state::ApiState, error::ApiError};

#[derive(Debug, TryFromMultipart)]
pub struct UploadParams {
    // Size is capped by the router's `DefaultBodyLimit`, which reads
    // `config.upload_max_body_bytes`; no separate per-field limit.
    #[form_data(limit = "unlimited")]
    pub file: Option<FieldData<NamedTempFile>>,
}

/// Accepts one txt/pdf upload, extracts its text and indexes it into the
/// project's remote index. Validation happens before any remote call.
pub async fn upload_file(
    State(state): State<ApiState>,
    Extension(project): Extension<Project>,
    TypedMultipart(input): TypedMultipart<UploadParams>,
) -> Result<impl IntoResponse, ApiError> {
    let file = input
        .file
        .ok_or_else(|| ApiError::ValidationError("Missing API key or file".to_string()))?;

    let filename = sanitize_filename(file.metadata.file_name.as_deref().unwrap_or_default());
    if filename.is_empty() || !allowed_file(&filename) {
        return Err(ApiError::ValidationError(
            "Unsupported file type".to_string(),
        ));
    }

    info!(
        project_id = %project.id,
        index_name = %project.index_name,
        filename = %filename,
        "Received upload"
    );

    // Move the upload into the scratch directory before extraction
    tokio::fs::create_dir_all(&state.config.upload_dir).await?;
    let scratch_path = Path::new(&state.config.upload_dir).join(&filename);
    tokio::fs::copy(file.contents.path(), &scratch_path).await?;

    let text = extract_text(&scratch_path).await?;
    if text.trim().is_empty() {
        return Err(ApiError::ValidationError(
            "File is empty or unreadable".to_string(),
        ));
    }

    state
        .search
        .index_document(&project.index_name, &text, &filename)
        .await?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "message": format!(
                "File '{filename}' indexed successfully into {}",
                project.index_name
            )
        })),
    ))
}
