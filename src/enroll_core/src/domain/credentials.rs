use secrecy::Secret;

use crate::domain::{email::Email, password::Password, user::UserError};

/// The validated email/password pair extracted from a credential submission.
///
/// Built fresh per request from the raw form fields and discarded after use.
/// A field that is absent from the submission fails validation the same way a
/// malformed value does.
#[derive(Debug, Clone, PartialEq)]
pub struct Credentials {
    email: Email,
    password: Password,
}

impl Credentials {
    pub fn parse(
        email: Option<Secret<String>>,
        password: Option<Secret<String>>,
    ) -> Result<Self, UserError> {
        let email = Email::try_from(email.ok_or(UserError::MissingField("email"))?)?;
        let password = Password::try_from(password.ok_or(UserError::MissingField("password"))?)?;

        Ok(Self { email, password })
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password(&self) -> &Password {
        &self.password
    }

    pub fn into_parts(self) -> (Email, Password) {
        (self.email, self.password)
    }
}

#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    fn field(value: &str) -> Option<Secret<String>> {
        Some(Secret::from(value.to_string()))
    }

    #[test]
    fn parses_valid_submission() {
        let credentials = Credentials::parse(field("user@example.com"), field("secret1")).unwrap();
        assert_eq!(
            credentials.email().as_ref().expose_secret(),
            "user@example.com"
        );
    }

    #[test]
    fn rejects_malformed_email() {
        let result = Credentials::parse(field("bad"), field("secret1"));
        assert_eq!(result.unwrap_err(), UserError::InvalidEmail);
    }

    #[test]
    fn rejects_short_password() {
        let result = Credentials::parse(field("user@example.com"), field("abc"));
        assert_eq!(result.unwrap_err(), UserError::PasswordTooShort);
    }

    #[test]
    fn rejects_missing_email() {
        let result = Credentials::parse(None, field("secret1"));
        assert_eq!(result.unwrap_err(), UserError::MissingField("email"));
    }

    #[test]
    fn rejects_missing_password() {
        let result = Credentials::parse(field("user@example.com"), None);
        assert_eq!(result.unwrap_err(), UserError::MissingField("password"));
    }

    #[test]
    fn parsing_valid_input_twice_yields_the_same_pair() {
        let first = Credentials::parse(field("user@example.com"), field("secret1")).unwrap();

        // Re-validate the already-valid values; nothing is normalized away.
        let second = Credentials::parse(
            Some(first.email().as_ref().clone()),
            Some(first.password().as_ref().clone()),
        )
        .unwrap();

        assert_eq!(first, second);
    }
}
