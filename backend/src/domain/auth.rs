//! Authentication primitives: credentials and password hashes.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use argon2::password_hash::{PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Argon2, PasswordHash as PhcString};
use zeroize::Zeroizing;

use super::{Error, UserValidationError, Username};

/// Minimum password length accepted at sign-up.
pub const PASSWORD_MIN: usize = 8;

/// Domain error returned when credential payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialsValidationError {
    /// Username failed validation.
    #[error(transparent)]
    Username(#[from] UserValidationError),
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
    /// Password shorter than [`PASSWORD_MIN`].
    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },
    /// Password and confirmation differ.
    #[error("password and confirmation must match")]
    PasswordMismatch,
}

/// Validated sign-in credentials.
///
/// ## Invariants
/// - `username` satisfies [`Username`] validation.
/// - `password` is non-empty; caller-provided whitespace is retained.
///
/// # Examples
/// ```
/// use recipe_backend::domain::Credentials;
///
/// let creds = Credentials::try_from_parts("chef_ada", "password1").unwrap();
/// assert_eq!(creds.username().as_ref(), "chef_ada");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    username: Username,
    password: Zeroizing<String>,
}

impl Credentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, CredentialsValidationError> {
        let username = Username::new(username)?;
        if password.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }
        Ok(Self {
            username,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Construct sign-up credentials, enforcing length and confirmation.
    pub fn try_for_sign_up(
        username: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<Self, CredentialsValidationError> {
        let credentials = Self::try_from_parts(username, password)?;
        if password.chars().count() < PASSWORD_MIN {
            return Err(CredentialsValidationError::PasswordTooShort { min: PASSWORD_MIN });
        }
        if password != confirm_password {
            return Err(CredentialsValidationError::PasswordMismatch);
        }
        Ok(credentials)
    }

    /// Username used for lookups.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Password provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Argon2id password hash in PHC string format.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Hash `password` with a fresh random salt.
    pub fn generate(password: &str) -> Result<Self, Error> {
        let salt_bytes: [u8; 16] = rand::random();
        let salt = SaltString::encode_b64(&salt_bytes)
            .map_err(|err| Error::internal(format!("failed to encode password salt: {err}")))?;
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|err| Error::internal(format!("failed to hash password: {err}")))?;
        Ok(Self(hash.to_string()))
    }

    /// Wrap a PHC string read back from storage.
    pub fn from_phc(phc: impl Into<String>) -> Self {
        Self(phc.into())
    }

    /// Check `password` against this hash.
    ///
    /// A malformed stored hash verifies as `false`; it never matches.
    pub fn verify(&self, password: &str) -> bool {
        match PhcString::new(&self.0) {
            Ok(parsed) => Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(error) => {
                tracing::warn!(%error, "stored password hash is malformed");
                false
            }
        }
    }

    /// PHC string for persistence.
    pub fn as_phc(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}
