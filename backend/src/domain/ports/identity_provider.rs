//! Port for federated identity verification.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised while verifying a federated identity token.
    pub enum IdentityProviderError {
        /// The provider could not be reached.
        Network { message: String } => "identity provider unreachable: {message}",
        /// The provider rejected the token.
        Rejected { message: String } => "identity token rejected: {message}",
        /// The provider response could not be interpreted.
        Malformed { message: String } => "identity provider response malformed: {message}",
    }
}

/// A verified federated identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FederatedIdentity {
    /// Provider-scoped stable subject identifier.
    pub subject: String,
    /// Verified email address as reported by the provider.
    pub email: String,
    /// Display name as reported by the provider; may be empty.
    pub name: String,
}

/// Port for verifying federated (Google) sign-in tokens.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Verify an ID token and return the identity it attests.
    async fn verify(&self, id_token: &str) -> Result<FederatedIdentity, IdentityProviderError>;
}

/// Fixture implementation that rejects every token.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureIdentityProvider;

#[async_trait]
impl IdentityProvider for FixtureIdentityProvider {
    async fn verify(
        &self,
        _id_token: &str,
    ) -> Result<FederatedIdentity, IdentityProviderError> {
        Err(IdentityProviderError::rejected("fixture provider"))
    }
}
