use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct OpeningEntry {
    pub sl_no: i32,
    pub company: String,
    pub location: Option<String>,
    pub timing: Option<String>,
    pub posted: Option<String>,
    pub salary_band: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub qualification: Option<String>,
    pub target: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Reduced projection served on the public listing, company names only.
#[derive(Debug, Serialize, FromRow)]
pub struct CompanyEntry {
    pub company: String,
}
