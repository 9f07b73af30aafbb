//! Port for password credential storage.
//!
//! Only hashed credentials cross this boundary; the account service hashes
//! before storing and verifies after fetching. Federated accounts have no
//! credential record at all.

use async_trait::async_trait;

use crate::domain::UserId;

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by credential store adapters.
    pub enum CredentialStoreError {
        /// Store connection could not be established.
        Connection { message: String } => "credential store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "credential store query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Persist the password hash for a user.
    async fn store(&self, user_id: &UserId, password_hash: &str)
        -> Result<(), CredentialStoreError>;

    /// Fetch the stored password hash, `None` for accounts without one.
    async fn password_hash(
        &self,
        user_id: &UserId,
    ) -> Result<Option<String>, CredentialStoreError>;
}

/// Fixture implementation: remembers nothing, knows nobody.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCredentialStore;

#[async_trait]
impl CredentialStore for FixtureCredentialStore {
    async fn store(
        &self,
        _user_id: &UserId,
        _password_hash: &str,
    ) -> Result<(), CredentialStoreError> {
        Ok(())
    }

    async fn password_hash(
        &self,
        _user_id: &UserId,
    ) -> Result<Option<String>, CredentialStoreError> {
        Ok(None)
    }
}
