use axum::{
    extract::{Multipart, State},
    Json,
};
use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use serde_json::{json, Value};
use std::str::FromStr;
use validator::{Validate, ValidationError};

use crate::{
    errors::AppError,
    pkg::{
        internal::pipeline::{self, ResumeUpload},
        server::state::AppState,
    },
    prelude::Result,
};

lazy_static! {
    static ref EMAIL_RE: Regex =
        Regex::new(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$").expect("email pattern");
    static ref MOBILE_RE: Regex = Regex::new(r"^\+?[1-9][0-9]{0,15}$").expect("mobile pattern");
}

#[derive(Debug, Default, Clone, Deserialize, Validate)]
pub struct SubmissionForm {
    #[validate(length(min = 1, message = "Name is required"))]
    #[serde(default)]
    pub name: String,
    #[validate(custom(function = validate_email_syntax))]
    #[serde(default)]
    pub email_id: String,
    #[validate(custom(function = validate_mobile_syntax))]
    #[serde(default)]
    pub mobile_number: String,
    #[serde(default)]
    pub dob: Option<NaiveDate>,
    #[serde(default)]
    pub age: Option<i32>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub married: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[validate(length(min = 1, message = "Qualification is required"))]
    #[serde(default)]
    pub qualification: String,
    #[validate(required(message = "Year is required"))]
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub highest_qualification: Option<String>,
    #[serde(default)]
    pub highest_year: Option<i32>,
    #[serde(default)]
    pub designation: Option<String>,
    #[serde(default)]
    pub exp_1: Option<String>,
    #[serde(default)]
    pub exp_designation: Option<String>,
    #[serde(default)]
    pub exp_from_to: Option<String>,
    #[serde(default)]
    pub exp_2: Option<String>,
    #[serde(default)]
    pub exp_3: Option<String>,
    #[serde(default)]
    pub total_exp: Option<f64>,
    #[serde(default)]
    pub current_ctc: Option<f64>,
    #[serde(default)]
    pub expected_ctc: Option<f64>,
    #[serde(default, rename = "ref")]
    pub reference: Option<String>,
    #[serde(default)]
    pub remark: Option<String>,
}

impl SubmissionForm {
    fn set_field(&mut self, name: &str, value: String) -> Result<()> {
        match name {
            "name" => self.name = trimmed(value),
            "email_id" => self.email_id = trimmed(value),
            "mobile_number" => self.mobile_number = trimmed(value),
            "dob" => self.dob = parse_opt(&value, "Invalid date of birth")?,
            "age" => self.age = parse_opt(&value, "Invalid age")?,
            "location" => self.location = non_empty(value),
            "married" => self.married = non_empty(value),
            "gender" => self.gender = non_empty(value),
            "qualification" => self.qualification = trimmed(value),
            "year" => self.year = parse_opt(&value, "Invalid year")?,
            "highest_qualification" => self.highest_qualification = non_empty(value),
            "highest_year" => {
                self.highest_year = parse_opt(&value, "Invalid highest qualification year")?
            }
            "designation" => self.designation = non_empty(value),
            "exp_1" => self.exp_1 = non_empty(value),
            "exp_designation" => self.exp_designation = non_empty(value),
            "exp_from_to" => self.exp_from_to = non_empty(value),
            "exp_2" => self.exp_2 = non_empty(value),
            "exp_3" => self.exp_3 = non_empty(value),
            "total_exp" => self.total_exp = parse_opt(&value, "Invalid total experience")?,
            "current_ctc" => self.current_ctc = parse_opt(&value, "Invalid current CTC")?,
            "expected_ctc" => self.expected_ctc = parse_opt(&value, "Invalid expected CTC")?,
            "ref" => self.reference = non_empty(value),
            "remark" => self.remark = non_empty(value),
            other => {
                tracing::debug!("ignoring unknown form field {}", other);
            }
        }
        Ok(())
    }
}

fn trimmed(value: String) -> String {
    value.trim().to_string()
}

fn non_empty(value: String) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn parse_opt<T: FromStr>(value: &str, invalid: &str) -> Result<Option<T>> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse::<T>()
        .map(Some)
        .map_err(|_| AppError::Validation(invalid.to_string()))
}

fn validate_email_syntax(value: &str) -> core::result::Result<(), ValidationError> {
    if value.is_empty() {
        return Err(field_error("required", "Email is required"));
    }
    if !EMAIL_RE.is_match(value) {
        return Err(field_error("email", "Invalid email address"));
    }
    Ok(())
}

fn validate_mobile_syntax(value: &str) -> core::result::Result<(), ValidationError> {
    if value.is_empty() {
        return Err(field_error("required", "Mobile number is required"));
    }
    if !MOBILE_RE.is_match(value) {
        return Err(field_error("mobile", "Invalid mobile number"));
    }
    Ok(())
}

fn field_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

pub async fn create(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Value>> {
    let mut form = SubmissionForm::default();
    let mut resume: Option<ResumeUpload> = None;
    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "resume" => {
                let filename = field.file_name().unwrap_or("resume.pdf").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field.bytes().await?;
                if !data.is_empty() {
                    resume = Some(ResumeUpload {
                        filename,
                        content_type,
                        bytes: data.to_vec(),
                    });
                }
            }
            _ => {
                let value = field.text().await?;
                form.set_field(&name, value)?;
            }
        }
    }
    let entry = pipeline::submit(&state, form, resume).await?;
    Ok(Json(json!({ "data": [entry], "error": null })))
}
