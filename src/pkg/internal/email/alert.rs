use crate::conf::settings;
use std::fmt::{self, Display};

use super::{send_email, SendEmail};

#[derive(Debug)]
pub struct OperatorAlert {
    pub name: String,
    pub email: String,
}

impl Display for OperatorAlert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "New submission received from {} (Email: {}).\n\nPlease check the admin panel for details.",
            self.name, self.email
        )
    }
}

impl OperatorAlert {
    pub fn subject() -> String {
        format!("New Student Registration - {}", &settings.service_name)
    }
}

impl SendEmail for OperatorAlert {
    fn send(&self, email: &str) -> crate::prelude::Result<()> {
        send_email(email, &OperatorAlert::subject(), &format!("{}", &self), false)?;
        Ok(())
    }
}
