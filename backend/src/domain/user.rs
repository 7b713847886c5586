//! User identity model.
//!
//! Users are created at sign-up and never mutated afterwards; they own zero
//! or more recipes. The credential hash lives beside the user in
//! [`UserAccount`] so the plain [`User`] can travel into views and sessions
//! without carrying secrets.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use uuid::Uuid;

use super::PasswordHash;

/// Validation errors returned by the user constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    #[error("user id must not be empty")]
    EmptyId,
    #[error("user id must be a valid UUID")]
    InvalidId,
    #[error("username must not be empty")]
    EmptyUsername,
    #[error("username must be at least {min} characters")]
    UsernameTooShort { min: usize },
    #[error("username must be at most {max} characters")]
    UsernameTooLong { max: usize },
    #[error("username may only contain letters, numbers, or underscores")]
    UsernameInvalidCharacters,
}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct UserId(Uuid);

impl UserId {
    /// Validate and construct a [`UserId`] from text.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let id = id.as_ref();
        if id.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(UserValidationError::InvalidId);
        }
        Uuid::parse_str(id)
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }

    /// Wrap a UUID read back from storage.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0.to_string()
    }
}

/// Unique sign-in name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct Username(String);

/// Minimum allowed length for a username.
pub const USERNAME_MIN: usize = 3;
/// Maximum allowed length for a username.
pub const USERNAME_MAX: usize = 32;

static USERNAME_RE: OnceLock<Regex> = OnceLock::new();

fn username_regex() -> &'static Regex {
    USERNAME_RE.get_or_init(|| {
        // Length is enforced separately; this regex constrains allowed characters.
        Regex::new("^[A-Za-z0-9_]+$")
            .unwrap_or_else(|error| panic!("username regex failed to compile: {error}"))
    })
}

impl Username {
    /// Validate and construct a [`Username`]; surrounding whitespace is trimmed.
    ///
    /// # Examples
    /// ```
    /// use recipe_backend::domain::Username;
    ///
    /// let name = Username::new("  chef_ada ").unwrap();
    /// assert_eq!(name.as_ref(), "chef_ada");
    /// assert!(Username::new("no spaces").is_err());
    /// ```
    pub fn new(username: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let username = username.as_ref().trim();
        if username.is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }

        let length = username.chars().count();
        if length < USERNAME_MIN {
            return Err(UserValidationError::UsernameTooShort { min: USERNAME_MIN });
        }
        if length > USERNAME_MAX {
            return Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX });
        }
        if !username_regex().is_match(username) {
            return Err(UserValidationError::UsernameInvalidCharacters);
        }

        Ok(Self(username.to_owned()))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

/// Application user as seen by views and sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    id: UserId,
    username: Username,
}

impl User {
    /// Build a new [`User`] from validated components.
    pub fn new(id: UserId, username: Username) -> Self {
        Self { id, username }
    }

    /// Fallible constructor from raw strings.
    pub fn try_from_strings(
        id: impl AsRef<str>,
        username: impl AsRef<str>,
    ) -> Result<Self, UserValidationError> {
        Ok(Self::new(UserId::new(id)?, Username::new(username)?))
    }

    /// Stable user identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Sign-in name.
    pub fn username(&self) -> &Username {
        &self.username
    }
}

/// Stored account: the user plus its credential hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    pub user: User,
    pub password_hash: PasswordHash,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const VALID_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

    #[rstest]
    #[case("", UserValidationError::EmptyId)]
    #[case("not-a-uuid", UserValidationError::InvalidId)]
    #[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6", UserValidationError::InvalidId)]
    fn rejects_invalid_ids(#[case] raw: &str, #[case] expected: UserValidationError) {
        assert_eq!(UserId::new(raw).expect_err("invalid id"), expected);
    }

    #[rstest]
    fn id_round_trips_through_text() {
        let id = UserId::new(VALID_ID).expect("valid id");
        assert_eq!(id.to_string(), VALID_ID);
        assert_eq!(UserId::from_uuid(*id.as_uuid()), id);
    }

    #[rstest]
    #[case("   ", UserValidationError::EmptyUsername)]
    #[case("ab", UserValidationError::UsernameTooShort { min: USERNAME_MIN })]
    #[case("bad$name", UserValidationError::UsernameInvalidCharacters)]
    #[case("two words", UserValidationError::UsernameInvalidCharacters)]
    fn rejects_invalid_usernames(#[case] raw: &str, #[case] expected: UserValidationError) {
        assert_eq!(Username::new(raw).expect_err("invalid username"), expected);
    }

    #[rstest]
    fn rejects_overlong_username() {
        let raw = "a".repeat(USERNAME_MAX + 1);
        assert_eq!(
            Username::new(raw).expect_err("too long"),
            UserValidationError::UsernameTooLong { max: USERNAME_MAX }
        );
    }

    #[rstest]
    fn user_serialises_id_as_string() {
        let user = User::try_from_strings(VALID_ID, "ada").expect("valid user");
        let value = serde_json::to_value(&user).expect("user serialises");
        assert_eq!(value["id"], VALID_ID);
        assert_eq!(value["username"], "ada");
    }
}
