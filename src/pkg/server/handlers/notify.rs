use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::error;

use crate::{
    errors::AppError,
    pkg::internal::email::{
        alert::OperatorAlert, confirmation::RegistrationConfirmation, delivery_enabled, SendEmail,
    },
    prelude::Result,
};

#[derive(Debug, Deserialize)]
pub struct SendEmailInput {
    pub to: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

pub async fn send_email(Json(input): Json<SendEmailInput>) -> Result<Json<Value>> {
    let sent = if input.kind == "student" {
        RegistrationConfirmation {
            name: input.name.clone(),
        }
        .send(&input.to)
    } else {
        OperatorAlert {
            name: input.name.clone(),
            email: input.to.clone(),
        }
        .send(&input.to)
    };
    sent.map_err(|err| {
        error!("email send failed: {}", err);
        AppError::Internal("Failed to send email".into())
    })?;
    let message = if delivery_enabled() {
        "Email queued for delivery"
    } else {
        "Email logged to console"
    };
    Ok(Json(json!({ "success": true, "message": message })))
}

#[cfg(test)]
mod tests {
    use tracing_test::traced_test;

    use super::*;

    #[tokio::test]
    #[traced_test]
    async fn acknowledges_student_notifications() {
        let input = SendEmailInput {
            to: "asha@example.com".into(),
            name: "Asha".into(),
            kind: "student".into(),
        };
        let Json(value) = send_email(Json(input)).await.unwrap();
        assert_eq!(value["success"], true);
        assert!(value["message"].is_string());
    }

    #[tokio::test]
    #[traced_test]
    async fn unknown_kind_falls_back_to_operator_alert() {
        let input = SendEmailInput {
            to: "ops@example.com".into(),
            name: "Asha".into(),
            kind: String::new(),
        };
        let Json(value) = send_email(Json(input)).await.unwrap();
        assert_eq!(value["success"], true);
    }
}
