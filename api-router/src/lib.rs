use api_state::ApiState;
use axum::{
    extract::{DefaultBodyLimit, FromRef},
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use middleware_admin_auth::admin_auth;
use middleware_api_auth::api_auth;
use routes::{
    liveness::live, projects::create_project, projects::get_projects, query::query_index,
    readiness::ready, upload::upload_file,
};

pub mod api_state;
pub mod error;
mod middleware_admin_auth;
mod middleware_api_auth;
mod routes;

/// Router for the JSON API, nested under `/api`
pub fn api_routes<S>(app_state: &ApiState) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
    ApiState: FromRef<S>,
{
    // Public, unauthenticated endpoints (for k8s/systemd probes)
    let public = Router::new()
        .route("/ready", get(ready))
        .route("/live", get(live));

    // Project management, gated on the process-wide admin token
    let admin = Router::new()
        .route("/create_project", post(create_project))
        .route("/get_projects", get(get_projects))
        .route_layer(from_fn_with_state(app_state.clone(), admin_auth));

    // Tenant endpoints, gated on a project API key
    let keyed = Router::new()
        .route(
            "/upload",
            post(upload_file).layer(DefaultBodyLimit::max(
                app_state.config.upload_max_body_bytes,
            )),
        )
        .route("/query", post(query_index))
        .route_layer(from_fn_with_state(app_state.clone(), api_auth));

    public.merge(admin).merge(keyed)
}
