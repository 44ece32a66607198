use axum::extract::DefaultBodyLimit;
use axum::http::{header::CONTENT_TYPE, Method};
use axum::routing::{delete, post, put};
use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers;
use super::handlers::probes::{api_health, healthz, livez};
use super::state::AppState;
use crate::conf::settings;
use crate::prelude::Result;

//multipart framing and text fields on top of the configured file cap
const UPLOAD_OVERHEAD_BYTES: usize = 1024 * 1024;

pub async fn build_routes() -> Result<Router> {
    let state = AppState::new().await?;
    Ok(routes_with_state(state))
}

pub fn routes_with_state(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route("/api/health", get(api_health))
        .route("/api/job-openings", get(handlers::openings::companies))
        .route("/api/openings", get(handlers::openings::list))
        .route("/api/submissions", post(handlers::submissions::create))
        .route("/api/send-email", post(handlers::notify::send_email))
        .route(
            "/api/admin/job-openings-data",
            post(handlers::admin::job_openings_data),
        )
        .route("/api/admin/biodata-data", post(handlers::admin::biodata_data))
        .route("/api/admin/create-job", post(handlers::admin::create_job))
        .route("/api/admin/update-job/:id", put(handlers::admin::update_job))
        .route(
            "/api/admin/delete-job/:id",
            delete(handlers::admin::delete_job),
        )
        .route(
            "/api/admin/download-excel",
            post(handlers::admin::download_excel),
        )
        .route("/healthz", get(healthz))
        .route("/livez", get(livez))
        .layer(DefaultBodyLimit::max(
            settings.upload_max_bytes + UPLOAD_OVERHEAD_BYTES,
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::pkg::server::state::db_pool;

    #[tokio::test]
    async fn router_builds_with_an_offline_state() {
        let state = AppState {
            db_pool: Arc::new(db_pool().unwrap()),
            blob_store: None,
        };
        let _ = routes_with_state(state);
    }
}
