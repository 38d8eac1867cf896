use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use minijinja::context;
use tracing::error;

use crate::html_state::HtmlState;

/// Rendering failure for a shell page. Carries no caller-relevant detail,
/// the template name and error land in the log.
pub struct HtmlError(minijinja::Error);

impl From<minijinja::Error> for HtmlError {
    fn from(err: minijinja::Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for HtmlError {
    fn into_response(self) -> Response {
        error!("Template rendering failed: {:?}", self.0);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html("<h1>Internal Server Error</h1>".to_string()),
        )
            .into_response()
    }
}

fn render_page(state: &HtmlState, name: &str) -> Result<Html<String>, HtmlError> {
    let html = state.templates.render(name, &context! {})?;
    Ok(Html(html))
}

pub async fn index_page(State(state): State<HtmlState>) -> Result<Html<String>, HtmlError> {
    render_page(&state, "index.html")
}

pub async fn dashboard_page(State(state): State<HtmlState>) -> Result<Html<String>, HtmlError> {
    render_page(&state, "dashboard.html")
}

pub async fn api_keys_page(State(state): State<HtmlState>) -> Result<Html<String>, HtmlError> {
    render_page(&state, "api_keys.html")
}

pub async fn privacy_page(State(state): State<HtmlState>) -> Result<Html<String>, HtmlError> {
    render_page(&state, "privacy.html")
}
