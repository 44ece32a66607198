use axum::{extract::State, Json};
use serde_json::{json, Value};
use tracing::error;

use crate::{
    errors::AppError,
    pkg::{
        internal::adaptors::openings::{
            selectors::OpeningSelector,
            spec::{CompanyEntry, OpeningEntry},
        },
        server::state::AppState,
    },
    prelude::Result,
};

/// Public listing for the registration form dropdown, company names only.
pub async fn companies(State(state): State<AppState>) -> Result<Json<Value>> {
    let companies = fetch_companies(&state).await.map_err(|err| {
        error!("public job openings fetch failed: {}", err);
        AppError::Internal("Failed to fetch job openings".into())
    })?;
    Ok(Json(json!({ "data": companies, "error": null })))
}

/// Full public listing with the posting details.
pub async fn list(State(state): State<AppState>) -> Result<Json<Value>> {
    let openings = fetch_openings(&state).await.map_err(|err| {
        error!("public openings fetch failed: {}", err);
        AppError::Internal("Failed to fetch job openings".into())
    })?;
    Ok(Json(json!({ "data": openings, "error": null })))
}

async fn fetch_companies(state: &AppState) -> Result<Vec<CompanyEntry>> {
    let mut tx = state.db_pool.begin().await?;
    OpeningSelector::new(&mut tx).get_companies().await
}

async fn fetch_openings(state: &AppState) -> Result<Vec<OpeningEntry>> {
    let mut tx = state.db_pool.begin().await?;
    OpeningSelector::new(&mut tx).get_all().await
}
