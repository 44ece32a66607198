use axum::{extract::State, Json};
use serde_json::{json, Value};
use sqlx::query;

use crate::{conf::settings, pkg::server::state::AppState, prelude::Result};

pub async fn livez() -> Result<()> {
    tracing::debug!("service is live");
    Ok(())
}

pub async fn healthz(State(state): State<AppState>) -> Result<()> {
    query("select 1").execute(&*state.db_pool).await?;
    tracing::debug!("service is healthy");
    Ok(())
}

pub async fn api_health() -> Json<Value> {
    Json(json!({
        "status": "OK",
        "message": format!("{} API is running", &settings.service_name)
    }))
}
