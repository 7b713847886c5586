//! Sign-up and sign-in backed by the user repository port.

use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use tracing::{debug, info};

use super::persistence_error_mapping::map_user_persistence_error;
use super::ports::{AccountService, UserRepository};
use super::{Credentials, Error, PasswordHash, User, UserAccount, UserId};

const INVALID_CREDENTIALS: &str = "invalid credentials";
const DECOY_PASSWORD: &str = "decoy-password-never-matches";

/// [`AccountService`] implementation hashing passwords with Argon2id.
///
/// Sign-in for an unknown username still runs one Argon2 verification,
/// against a decoy hash built on first use, so both failure paths cost the
/// same.
#[derive(Clone)]
pub struct UserAccountsService<U> {
    users: Arc<U>,
    decoy: Arc<OnceLock<PasswordHash>>,
}

impl<U> UserAccountsService<U> {
    /// Create a service over the given user repository.
    pub fn new(users: Arc<U>) -> Self {
        Self {
            users,
            decoy: Arc::new(OnceLock::new()),
        }
    }

    /// Verify `password` against the decoy hash and discard the result.
    async fn verify_decoy(&self, password: String) -> Result<(), Error> {
        let decoy = Arc::clone(&self.decoy);
        tokio::task::spawn_blocking(move || {
            let hash = match decoy.get() {
                Some(hash) => hash,
                None => {
                    let generated = PasswordHash::generate(DECOY_PASSWORD)?;
                    decoy.get_or_init(|| generated)
                }
            };
            Ok::<bool, Error>(hash.verify(&password))
        })
        .await
        .map_err(|err| Error::internal(format!("password verification task failed: {err}")))??;
        Ok(())
    }
}

// Argon2 is deliberately slow; keep it off the async executor threads.
async fn hash_password(password: String) -> Result<PasswordHash, Error> {
    tokio::task::spawn_blocking(move || PasswordHash::generate(&password))
        .await
        .map_err(|err| Error::internal(format!("password hashing task failed: {err}")))?
}

async fn verify_password(hash: PasswordHash, password: String) -> Result<bool, Error> {
    tokio::task::spawn_blocking(move || hash.verify(&password))
        .await
        .map_err(|err| Error::internal(format!("password verification task failed: {err}")))
}

#[async_trait]
impl<U> AccountService for UserAccountsService<U>
where
    U: UserRepository,
{
    async fn sign_up(&self, credentials: &Credentials) -> Result<User, Error> {
        let password_hash = hash_password(credentials.password().to_owned()).await?;
        let user = User::new(UserId::random(), credentials.username().clone());
        let account = UserAccount {
            user: user.clone(),
            password_hash,
        };

        self.users
            .insert(&account)
            .await
            .map_err(map_user_persistence_error)?;
        info!(user_id = %user.id(), "user signed up");
        Ok(user)
    }

    async fn sign_in(&self, credentials: &Credentials) -> Result<User, Error> {
        let Some(account) = self
            .users
            .find_by_username(credentials.username())
            .await
            .map_err(map_user_persistence_error)?
        else {
            self.verify_decoy(credentials.password().to_owned()).await?;
            debug!("sign-in for unknown username");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };

        let matches = verify_password(
            account.password_hash.clone(),
            credentials.password().to_owned(),
        )
        .await?;
        if !matches {
            debug!(user_id = %account.user.id(), "sign-in with wrong password");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }
        Ok(account.user)
    }
}
