use serde::Deserialize;
use sha2::{Digest, Sha256};
use tracing::warn;

use crate::{conf::settings, errors::AppError, prelude::Result};

/// Credentials carried in the body of every admin request. The stored
/// password is a sha256 hex digest so the cleartext never lives in config.
#[derive(Debug, Deserialize)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
}

impl AdminCredentials {
    pub fn verify(&self) -> Result<()> {
        let digest = hex::encode(Sha256::digest(self.password.as_bytes()));
        if self.username == settings.admin_username
            && digest.eq_ignore_ascii_case(&settings.admin_password_sha256)
        {
            Ok(())
        } else {
            warn!("rejected admin credentials for '{}'", &self.username);
            Err(AppError::InvalidCredentials)
        }
    }
}

#[cfg(test)]
mod tests {
    use tracing_test::traced_test;

    use super::*;

    #[test]
    #[traced_test]
    fn test_default_credentials_verify() {
        let creds = AdminCredentials {
            username: "admin".into(),
            password: "numantra123".into(),
        };
        assert!(creds.verify().is_ok());
    }

    #[test]
    #[traced_test]
    fn test_wrong_password_is_rejected() {
        let creds = AdminCredentials {
            username: "admin".into(),
            password: "numantra124".into(),
        };
        assert!(matches!(
            creds.verify().unwrap_err(),
            AppError::InvalidCredentials
        ));
    }

    #[test]
    #[traced_test]
    fn test_wrong_username_is_rejected() {
        let creds = AdminCredentials {
            username: "root".into(),
            password: "numantra123".into(),
        };
        assert!(creds.verify().is_err());
    }
}
