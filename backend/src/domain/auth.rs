//! Authentication primitives: login credentials and sign-up details.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use zeroize::Zeroizing;

use crate::domain::user::{DisplayName, EmailAddress, UserValidationError};

/// Minimum accepted password length.
pub const PASSWORD_MIN: usize = 8;

/// Domain error returned when authentication payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthValidationError {
    InvalidEmail,
    EmptyPassword,
    PasswordTooWeak { min: usize },
    InvalidDisplayName(UserValidationError),
}

impl fmt::Display for AuthValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEmail => write!(f, "email address is not valid"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::PasswordTooWeak { min } => {
                write!(f, "password must be at least {min} characters")
            }
            Self::InvalidDisplayName(inner) => write!(f, "{inner}"),
        }
    }
}

impl std::error::Error for AuthValidationError {}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `email` satisfies [`EmailAddress`] validation.
/// - `password` is non-empty but otherwise unmodified, so credential
///   comparisons see exactly what the caller typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, AuthValidationError> {
        let email = EmailAddress::new(email).map_err(|_| AuthValidationError::InvalidEmail)?;
        if password.is_empty() {
            return Err(AuthValidationError::EmptyPassword);
        }
        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email address used for the account lookup.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Password exactly as provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validated registration details.
///
/// The password policy is enforced here, before any store call is made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupDetails {
    email: EmailAddress,
    password: Zeroizing<String>,
    name: DisplayName,
}

impl SignupDetails {
    /// Construct sign-up details from raw inputs.
    pub fn try_from_parts(
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<Self, AuthValidationError> {
        let email = EmailAddress::new(email).map_err(|_| AuthValidationError::InvalidEmail)?;
        if password.is_empty() {
            return Err(AuthValidationError::EmptyPassword);
        }
        if password.chars().count() < PASSWORD_MIN {
            return Err(AuthValidationError::PasswordTooWeak { min: PASSWORD_MIN });
        }
        let name = DisplayName::new(name).map_err(AuthValidationError::InvalidDisplayName)?;
        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
            name,
        })
    }

    /// Email address for the new account.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Plaintext password; hashed by the account service before storage.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Display name for the new account.
    pub fn name(&self) -> &DisplayName {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "password1", AuthValidationError::InvalidEmail)]
    #[case("not-an-email", "password1", AuthValidationError::InvalidEmail)]
    #[case("ada@example.com", "", AuthValidationError::EmptyPassword)]
    fn invalid_login_credentials(
        #[case] email: &str,
        #[case] password: &str,
        #[case] expected: AuthValidationError,
    ) {
        assert_eq!(
            LoginCredentials::try_from_parts(email, password).expect_err("invalid"),
            expected
        );
    }

    #[test]
    fn login_password_is_not_trimmed() {
        let creds = LoginCredentials::try_from_parts("ada@example.com", " pw with spaces ")
            .expect("valid shape");
        assert_eq!(creds.password(), " pw with spaces ");
    }

    #[rstest]
    #[case("ada@example.com", "short", "Ada")]
    #[case("ada@example.com", "1234567", "Ada")]
    fn weak_passwords_are_rejected(
        #[case] email: &str,
        #[case] password: &str,
        #[case] name: &str,
    ) {
        assert_eq!(
            SignupDetails::try_from_parts(email, password, name).expect_err("weak"),
            AuthValidationError::PasswordTooWeak { min: PASSWORD_MIN }
        );
    }

    #[test]
    fn signup_rejects_blank_name() {
        let err = SignupDetails::try_from_parts("ada@example.com", "password1", "  ")
            .expect_err("blank name");
        assert!(matches!(err, AuthValidationError::InvalidDisplayName(_)));
    }

    #[test]
    fn signup_accepts_valid_details() {
        let details = SignupDetails::try_from_parts("Ada@Example.com", "password1", "Ada")
            .expect("valid details");
        assert_eq!(details.email().as_ref(), "ada@example.com");
        assert_eq!(details.name().as_ref(), "Ada");
    }
}
