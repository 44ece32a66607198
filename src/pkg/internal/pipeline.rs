use chrono::{DateTime, Utc};
use tracing::{error, info};
use validator::Validate;

use crate::{
    conf::{settings, UploadSink},
    errors::AppError,
    pkg::{
        internal::{
            adaptors::submissions::{mutators::SubmissionMutator, spec::SubmissionEntry},
            email::{
                alert::OperatorAlert, confirmation::RegistrationConfirmation,
                send_email_with_attachment, SendEmail,
            },
        },
        server::{handlers::submissions::SubmissionForm, state::AppState},
    },
    prelude::Result,
};

pub struct ResumeUpload {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

pub fn check_upload_policy(upload: &ResumeUpload) -> Result<()> {
    let allowed = settings.upload_allowed_types();
    let content_type = upload.content_type.to_ascii_lowercase();
    if !allowed.iter().any(|t| t == &content_type) {
        return Err(AppError::UploadType(allowed.join(", ")));
    }
    if upload.bytes.len() > settings.upload_max_bytes {
        return Err(AppError::UploadSize(settings.upload_max_mb()));
    }
    Ok(())
}

/// Object keys keep the `{email}_{millis}.{ext}` shape the resume links in
/// the registry were written with.
pub fn blob_key(email: &str, at: &DateTime<Utc>, content_type: &str) -> String {
    format!(
        "{}_{}.{}",
        email,
        at.timestamp_millis(),
        extension_for(content_type)
    )
}

fn extension_for(content_type: &str) -> &'static str {
    match content_type.to_ascii_lowercase().as_str() {
        "application/pdf" => "pdf",
        "application/msword" => "doc",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => "docx",
        _ => "bin",
    }
}

/// Runs the intake pipeline: validate, place the resume, insert the row,
/// then notify. The resume is only placed once the form has passed
/// validation, and a stored object is removed again if the insert fails so
/// a rejected submission leaves nothing behind.
pub async fn submit(
    state: &AppState,
    form: SubmissionForm,
    resume: Option<ResumeUpload>,
) -> Result<SubmissionEntry> {
    form.validate()?;
    let submitted_at = Utc::now();
    let mut resume_url: Option<String> = None;
    let mut stored_key: Option<String> = None;
    let mut operator_notified = false;

    if let Some(upload) = resume {
        check_upload_policy(&upload)?;
        match settings.upload_sink() {
            UploadSink::Store => {
                let store = state
                    .blob_store
                    .as_ref()
                    .ok_or(AppError::StorageUnconfigured)?;
                store.ensure_bucket().await?;
                let key = blob_key(&form.email_id, &submitted_at, &upload.content_type);
                store
                    .upload_object(&key, upload.bytes, &upload.content_type)
                    .await?;
                resume_url = Some(store.public_url(&key));
                stored_key = Some(key);
            }
            UploadSink::MailRelay => {
                if settings.operator_email.is_empty() {
                    return Err(AppError::RelayUnconfigured);
                }
                let alert = OperatorAlert {
                    name: form.name.clone(),
                    email: form.email_id.clone(),
                };
                send_email_with_attachment(
                    &settings.operator_email,
                    &OperatorAlert::subject(),
                    &alert.to_string(),
                    &upload.filename,
                    upload.bytes,
                    &upload.content_type,
                )
                .await?;
                operator_notified = true;
            }
        }
    }

    let created = match insert_entry(state, &form, resume_url.as_deref(), submitted_at).await {
        Ok(entry) => entry,
        Err(err) => {
            if let (Some(store), Some(key)) = (state.blob_store.as_ref(), stored_key.as_ref()) {
                if let Err(cleanup_err) = store.delete_object(key).await {
                    error!("failed to remove orphaned resume {}: {}", key, cleanup_err);
                }
            }
            return Err(err);
        }
    };

    info!(
        "registered submission {} for {}",
        created.sl_no, &created.email_id
    );
    let confirmation = RegistrationConfirmation {
        name: created.name.clone(),
    };
    if let Err(err) = confirmation.send(&created.email_id) {
        error!("confirmation email failed: {}", err);
    }
    if !operator_notified && !settings.operator_email.is_empty() {
        let alert = OperatorAlert {
            name: created.name.clone(),
            email: created.email_id.clone(),
        };
        if let Err(err) = alert.send(&settings.operator_email) {
            error!("operator alert failed: {}", err);
        }
    }

    Ok(created)
}

async fn insert_entry(
    state: &AppState,
    form: &SubmissionForm,
    resume_url: Option<&str>,
    submitted_at: DateTime<Utc>,
) -> Result<SubmissionEntry> {
    let mut tx = state.db_pool.begin().await?;
    let row = SubmissionMutator::new(&mut tx)
        .create(form, resume_url, submitted_at)
        .await?;
    tx.commit().await?;
    Ok(row)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tracing_test::traced_test;

    use super::*;
    use crate::pkg::server::state::db_pool;

    fn offline_state() -> AppState {
        AppState {
            db_pool: Arc::new(db_pool().unwrap()),
            blob_store: None,
        }
    }

    fn valid_form() -> SubmissionForm {
        SubmissionForm {
            name: "Asha".into(),
            email_id: "asha@example.com".into(),
            mobile_number: "+919812345678".into(),
            qualification: "BSc".into(),
            year: Some(2022),
            ..Default::default()
        }
    }

    fn pdf_upload() -> ResumeUpload {
        ResumeUpload {
            filename: "resume.pdf".into(),
            content_type: "application/pdf".into(),
            bytes: b"%PDF-1.4".to_vec(),
        }
    }

    #[test]
    fn blob_keys_carry_email_millis_and_extension() {
        let at = DateTime::from_timestamp_millis(1_700_000_000_000).unwrap();
        assert_eq!(
            blob_key("asha@example.com", &at, "application/pdf"),
            "asha@example.com_1700000000000.pdf"
        );
        assert_eq!(
            blob_key("asha@example.com", &at, "application/msword"),
            "asha@example.com_1700000000000.doc"
        );
        assert_eq!(
            blob_key("asha@example.com", &at, "image/png"),
            "asha@example.com_1700000000000.bin"
        );
    }

    #[test]
    fn oversized_uploads_are_rejected() {
        let upload = ResumeUpload {
            bytes: vec![0u8; settings.upload_max_bytes + 1],
            ..pdf_upload()
        };
        let err = check_upload_policy(&upload).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!(
                "File size too large. Maximum {}MB allowed.",
                settings.upload_max_mb()
            )
        );
    }

    #[test]
    fn disallowed_content_types_are_rejected() {
        let upload = ResumeUpload {
            content_type: "image/png".into(),
            ..pdf_upload()
        };
        let err = check_upload_policy(&upload).unwrap_err();
        assert!(matches!(err, AppError::UploadType(_)));
        assert!(err.to_string().contains("application/pdf"));
    }

    #[test]
    fn content_type_comparison_ignores_case() {
        let upload = ResumeUpload {
            content_type: "Application/PDF".into(),
            ..pdf_upload()
        };
        assert!(check_upload_policy(&upload).is_ok());
    }

    #[tokio::test]
    #[traced_test]
    async fn validation_runs_before_any_storage() {
        let state = offline_state();
        let form = SubmissionForm {
            mobile_number: "abc".into(),
            ..valid_form()
        };
        let err = submit(&state, form, Some(pdf_upload())).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(err.to_string().contains("Invalid mobile number"));
    }

    #[tokio::test]
    #[traced_test]
    async fn upload_policy_runs_before_the_store_is_touched() {
        let state = offline_state();
        let upload = ResumeUpload {
            content_type: "image/png".into(),
            ..pdf_upload()
        };
        let err = submit(&state, valid_form(), Some(upload)).await.unwrap_err();
        assert!(matches!(err, AppError::UploadType(_)));
    }

    #[tokio::test]
    #[traced_test]
    async fn store_sink_requires_a_configured_store() {
        if settings.upload_sink() != UploadSink::Store || settings.storage_configured() {
            return;
        }
        let state = offline_state();
        let err = submit(&state, valid_form(), Some(pdf_upload()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::StorageUnconfigured));
    }

    #[tokio::test]
    #[traced_test]
    #[ignore = "needs postgres from DATABASE_URL with migrations applied"]
    async fn submission_without_resume_persists_a_null_resume_url() -> Result<()> {
        let state = AppState::new().await?;
        let entry = submit(&state, valid_form(), None).await?;
        assert!(entry.sl_no > 0);
        assert!(entry.resume_url.is_none());
        assert_eq!(entry.email_id, "asha@example.com");
        Ok(())
    }
}
