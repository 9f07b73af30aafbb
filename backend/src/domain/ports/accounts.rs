//! Driving port for account use-cases.
//!
//! Inbound adapters call this to register, authenticate, and edit profiles
//! without knowing the backing infrastructure, which keeps handler tests
//! deterministic.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, ProfileUpdate, SignupDetails, User, UserId};

/// Domain use-case port for accounts and authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Accounts: Send + Sync {
    /// Register a new email/password account and return the created profile.
    async fn register(&self, details: SignupDetails) -> Result<User, Error>;

    /// Validate credentials and return the authenticated profile.
    async fn login(&self, credentials: &LoginCredentials) -> Result<User, Error>;

    /// Verify a federated (Google) ID token, creating the profile on first
    /// sign-in, and return it.
    async fn login_with_google(&self, id_token: &str) -> Result<User, Error>;

    /// Fetch a profile. Store failures collapse to `None` (logged).
    async fn profile(&self, id: &UserId) -> Option<User>;

    /// Apply a profile edit. Store failures collapse to `false` (logged).
    async fn update_profile(&self, id: &UserId, update: ProfileUpdate) -> bool;
}

/// Fixture implementation that knows no accounts.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAccounts;

#[async_trait]
impl Accounts for FixtureAccounts {
    async fn register(&self, _details: SignupDetails) -> Result<User, Error> {
        Err(Error::service_unavailable("account registration unavailable"))
    }

    async fn login(&self, _credentials: &LoginCredentials) -> Result<User, Error> {
        Err(Error::unauthorized("invalid credentials"))
    }

    async fn login_with_google(&self, _id_token: &str) -> Result<User, Error> {
        Err(Error::unauthorized("invalid identity token"))
    }

    async fn profile(&self, _id: &UserId) -> Option<User> {
        None
    }

    async fn update_profile(&self, _id: &UserId, _update: ProfileUpdate) -> bool {
        false
    }
}
