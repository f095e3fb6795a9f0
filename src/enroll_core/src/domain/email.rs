use std::hash::{Hash, Hasher};
use std::sync::LazyLock;

use regex::Regex;
use secrecy::{ExposeSecret, Secret};

use crate::domain::user::UserError;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email pattern"));

/// A validated email address.
///
/// Construction goes through `TryFrom<Secret<String>>` so an `Email` value
/// always holds a well-formed address. The inner value stays wrapped in
/// `Secret` to keep addresses out of logs and debug output.
#[derive(Debug, Clone)]
pub struct Email(Secret<String>);

impl TryFrom<Secret<String>> for Email {
    type Error = UserError;

    fn try_from(value: Secret<String>) -> Result<Self, Self::Error> {
        if EMAIL_PATTERN.is_match(value.expose_secret()) {
            Ok(Self(value))
        } else {
            Err(UserError::InvalidEmail)
        }
    }
}

impl AsRef<Secret<String>> for Email {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

// Emails are used as user-store keys, so equality and hashing go through the
// exposed value rather than the Secret wrapper.
impl PartialEq for Email {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}

impl Eq for Email {}

impl Hash for Email {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.expose_secret().hash(state);
    }
}

#[cfg(test)]
mod tests {
    use fake::Fake;
    use fake::faker::internet::en::SafeEmail;

    use super::*;

    #[test]
    fn accepts_well_formed_address() {
        let email = Email::try_from(Secret::from("user@example.com".to_string())).unwrap();
        assert_eq!(email.as_ref().expose_secret(), "user@example.com");
    }

    #[test]
    fn accepts_generated_addresses() {
        for _ in 0..20 {
            let address: String = SafeEmail().fake();
            assert!(
                Email::try_from(Secret::from(address.clone())).is_ok(),
                "rejected {address}"
            );
        }
    }

    #[test]
    fn rejects_address_without_at_sign() {
        let result = Email::try_from(Secret::from("bad".to_string()));
        assert_eq!(result.unwrap_err(), UserError::InvalidEmail);
    }

    #[test]
    fn rejects_address_without_domain() {
        let result = Email::try_from(Secret::from("user@".to_string()));
        assert_eq!(result.unwrap_err(), UserError::InvalidEmail);
    }

    #[test]
    fn rejects_address_with_whitespace() {
        let result = Email::try_from(Secret::from("user name@example.com".to_string()));
        assert_eq!(result.unwrap_err(), UserError::InvalidEmail);
    }

    #[test]
    fn rejects_empty_string() {
        let result = Email::try_from(Secret::from(String::new()));
        assert_eq!(result.unwrap_err(), UserError::InvalidEmail);
    }
}
