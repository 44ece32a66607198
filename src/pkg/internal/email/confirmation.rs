use crate::conf::settings;
use std::fmt::{self, Display};

use super::{send_email, SendEmail};

#[derive(Debug)]
pub struct RegistrationConfirmation {
    pub name: String,
}

impl Display for RegistrationConfirmation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Dear {},\n\nThank you for registering with {}! Your submission has been confirmed.\n\nOur team will review your profile and contact you when suitable opportunities arise.\n\nBest regards,\n{} Team",
            self.name, &settings.service_name, &settings.service_name
        )
    }
}

impl RegistrationConfirmation {
    pub fn subject() -> String {
        format!("Registration Confirmation - {}", &settings.service_name)
    }
}

impl SendEmail for RegistrationConfirmation {
    fn send(&self, email: &str) -> crate::prelude::Result<()> {
        send_email(
            email,
            &RegistrationConfirmation::subject(),
            &format!("{}", &self),
            false,
        )?;
        Ok(())
    }
}

#[cfg(test)]
pub mod tests {
    use tracing_test::traced_test;

    use super::*;
    use crate::prelude::Result;

    #[tokio::test]
    #[traced_test]
    async fn test_confirmation_template() -> Result<()> {
        let mail = RegistrationConfirmation { name: "Asha".into() };
        let body = format!("{}", &mail);
        assert!(body.starts_with("Dear Asha,"));
        assert!(body.contains("Your submission has been confirmed."));
        assert!(body.contains(&format!("{} Team", &settings.service_name)));
        assert!(RegistrationConfirmation::subject().starts_with("Registration Confirmation - "));
        mail.send("asha@example.com")?;
        Ok(())
    }
}
