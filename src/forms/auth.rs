use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

#[derive(Deserialize, Validate)]
pub struct LoginForm {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginFormPayload {
    /// Trimmed and lowercased.
    pub email: String,
    pub password: String,
}

#[derive(Debug, Error)]
pub enum LoginFormError {
    #[error("Please enter a valid email and password.")]
    Validation(#[from] ValidationErrors),
}

impl TryFrom<LoginForm> for LoginFormPayload {
    type Error = LoginFormError;

    fn try_from(mut value: LoginForm) -> Result<Self, Self::Error> {
        value.email = value.email.trim().to_lowercase();
        value.validate()?;
        Ok(Self {
            email: value.email,
            password: value.password,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_email() {
        let payload = LoginFormPayload::try_from(LoginForm {
            email: " Owner@Example.com ".into(),
            password: "secret".into(),
        })
        .unwrap();
        assert_eq!(payload.email, "owner@example.com");
    }

    #[test]
    fn rejects_blank_password() {
        let result = LoginFormPayload::try_from(LoginForm {
            email: "owner@example.com".into(),
            password: String::new(),
        });
        assert!(matches!(result, Err(LoginFormError::Validation(_))));
    }
}
