use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Internal(String),
    #[error("Invalid admin credentials")]
    InvalidCredentials,
    #[error("File type not allowed. Accepted: {0}")]
    UploadType(String),
    #[error("File size too large. Maximum {0}MB allowed.")]
    UploadSize(usize),
    #[error("Resume storage is not configured")]
    StorageUnconfigured,
    #[error("Mail relay is not configured")]
    RelayUnconfigured,
    #[error("Unable to create or access resume storage bucket: {0}")]
    BucketCreate(String),
    #[error("Upload failed: {0}")]
    Upload(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("invalid multipart payload: {0}")]
    Multipart(#[from] MultipartError),
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
    #[error("migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not build email: {0}")]
    Mail(#[from] lettre::error::Error),
    #[error("invalid email address: {0}")]
    Address(#[from] lettre::address::AddressError),
    #[error("smtp transport error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
    #[error("background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
    #[error("could not build workbook: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_)
            | AppError::UploadType(_)
            | AppError::UploadSize(_)
            | AppError::Multipart(_)
            | AppError::Address(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));
        let mut messages = Vec::new();
        for (field, errs) in fields {
            for err in errs {
                match &err.message {
                    Some(msg) => messages.push(msg.to_string()),
                    None => messages.push(format!("{} is invalid", field)),
                }
            }
        }
        AppError::Validation(messages.join(", "))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("{}", self);
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
