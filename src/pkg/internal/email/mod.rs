use lettre::message::header::ContentType;
use lettre::message::{Attachment, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use tracing::{debug, error, info};

pub mod alert;
pub mod confirmation;

use crate::{conf::settings, errors::AppError, prelude::Result};

pub trait SendEmail {
    fn send(&self, email: &str) -> Result<()>;
}

pub fn delivery_enabled() -> bool {
    settings.smtp_configured()
}

fn transport() -> SmtpTransport {
    if settings.smtp_user.is_empty() {
        SmtpTransport::builder_dangerous(&settings.smtp_server)
            .port(settings.smtp_port)
            .build()
    } else {
        let creds = Credentials::new(settings.smtp_user.clone(), settings.smtp_pass.clone());
        SmtpTransport::relay(&settings.smtp_server)
            .unwrap()
            .credentials(creds)
            .build()
    }
}

/// Fire and forget delivery. With no smtp server configured the message is
/// logged and dropped so the calling flow never stalls on mail.
pub fn send_email(email: &str, subject: &str, body: &str, is_html: bool) -> Result<()> {
    if !delivery_enabled() {
        info!("smtp not configured, logging email to {}: {}", email, subject);
        debug!("{}", body);
        return Ok(());
    }
    let (name, _) = email.split_once("@").unwrap_or(("unknown", ""));
    let name = name.to_string();
    let email = email.to_string();
    let subject = subject.to_string();
    let body = body.to_string();
    debug!("sending email to {}", &email);
    tokio::spawn(async move {
        let result = tokio::task::spawn_blocking(move || {
            let content_type = if is_html {
                ContentType::TEXT_HTML
            } else {
                ContentType::TEXT_PLAIN
            };

            let email = Message::builder()
                .from(
                    format!("{} <{}>", &settings.service_name, &settings.from_email)
                        .parse()
                        .unwrap(),
                )
                .to(format!("{} <{}>", &name, &email).parse().unwrap())
                .subject(subject)
                .header(content_type)
                .body(body)
                .unwrap();

            transport().send(&email)
        })
        .await;

        match result {
            Ok(Ok(_)) => info!("email sent successfully"),
            Ok(Err(e)) => error!("could not send email: {e:?}"),
            Err(e) => error!("email task failed to execute: {e:?}"),
        }
    });
    Ok(())
}

/// Relay delivery with the uploaded file attached. Unlike `send_email` this
/// waits for the smtp handshake, the caller needs to know the file went out.
pub async fn send_email_with_attachment(
    email: &str,
    subject: &str,
    body: &str,
    filename: &str,
    content: Vec<u8>,
    content_type: &str,
) -> Result<()> {
    if !delivery_enabled() {
        return Err(AppError::RelayUnconfigured);
    }
    let (name, _) = email.split_once("@").unwrap_or(("unknown", ""));
    let message = Message::builder()
        .from(format!("{} <{}>", &settings.service_name, &settings.from_email).parse()?)
        .to(format!("{} <{}>", name, email).parse()?)
        .subject(subject)
        .multipart(
            MultiPart::mixed()
                .singlepart(
                    SinglePart::builder()
                        .header(ContentType::TEXT_PLAIN)
                        .body(body.to_string()),
                )
                .singlepart(Attachment::new(filename.to_string()).body(
                    content,
                    ContentType::parse(content_type).unwrap_or(ContentType::TEXT_PLAIN),
                )),
        )?;
    tokio::task::spawn_blocking(move || transport().send(&message))
        .await??;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn attachment_relay_requires_smtp() {
        if delivery_enabled() {
            return;
        }
        let err = send_email_with_attachment(
            "ops@example.com",
            "New Student Registration",
            "resume attached",
            "resume.pdf",
            b"%PDF-1.4".to_vec(),
            "application/pdf",
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::RelayUnconfigured));
    }
}
