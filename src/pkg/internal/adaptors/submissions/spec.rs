use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One row of the biodata master. Column names follow the intake sheet the
/// registry was migrated from, including the `ref` referral column.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SubmissionEntry {
    pub sl_no: i32,
    pub name: String,
    pub email_id: String,
    pub mobile_number: String,
    pub dob: Option<NaiveDate>,
    pub age: Option<i32>,
    pub location: Option<String>,
    pub married: Option<String>,
    pub gender: Option<String>,
    pub qualification: String,
    pub year: i32,
    pub highest_qualification: Option<String>,
    pub highest_year: Option<i32>,
    pub designation: Option<String>,
    pub exp_1: Option<String>,
    pub exp_designation: Option<String>,
    pub exp_from_to: Option<String>,
    pub exp_2: Option<String>,
    pub exp_3: Option<String>,
    pub total_exp: Option<f64>,
    pub current_ctc: Option<f64>,
    pub expected_ctc: Option<f64>,
    #[sqlx(rename = "ref")]
    #[serde(rename = "ref")]
    pub reference: Option<String>,
    pub remark: Option<String>,
    pub resume_url: Option<String>,
    pub submission_date: DateTime<Utc>,
}
