use axum::{extract::FromRef, routing::get, Router};

use crate::{
    html_state::HtmlState,
    middlewares::compression::compression_layer,
    routes::{api_keys_page, dashboard_page, index_page, privacy_page},
};

pub mod html_state;
mod middlewares;
mod routes;

/// Router for the public HTML shell pages.
pub fn html_routes<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
    HtmlState: FromRef<S>,
{
    Router::new()
        .route("/", get(index_page))
        .route("/dashboard", get(dashboard_page))
        .route("/api_keys", get(api_keys_page))
        .route("/privacy", get(privacy_page))
        .layer(compression_layer())
}
