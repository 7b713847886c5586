//! Driving port for sign-up and sign-in.
//!
//! Inbound adapters call it to register or authenticate users without
//! knowing how credentials are stored.

use async_trait::async_trait;

use crate::domain::{Credentials, Error, User};

/// Domain use-case port for account management.
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Register a new user. A taken username yields `Conflict`.
    async fn sign_up(&self, credentials: &Credentials) -> Result<User, Error>;

    /// Verify credentials. Unknown usernames and wrong passwords both yield
    /// the same `Unauthorized` error.
    async fn sign_in(&self, credentials: &Credentials) -> Result<User, Error>;
}
