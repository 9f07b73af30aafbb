//! Google ID-token verification adapter.
//!
//! Verifies tokens against Google's `tokeninfo` endpoint over HTTPS. The
//! endpoint checks the signature and expiry server-side; this adapter only
//! validates the audience when a client id is configured.

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::ports::{FederatedIdentity, IdentityProvider, IdentityProviderError};

const TOKENINFO_URL: &str = "https://oauth2.googleapis.com/tokeninfo";

/// Identity provider backed by Google's token-info endpoint.
#[derive(Clone)]
pub struct GoogleIdentityProvider {
    client: reqwest::Client,
    endpoint: String,
    client_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenInfoPayload {
    sub: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    aud: String,
}

impl GoogleIdentityProvider {
    /// Create a provider. When `client_id` is set, tokens minted for other
    /// applications are rejected.
    pub fn new(client_id: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: TOKENINFO_URL.to_owned(),
            client_id,
        }
    }

    #[cfg(test)]
    fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    fn check_audience(&self, payload: &TokenInfoPayload) -> Result<(), IdentityProviderError> {
        if let Some(expected) = &self.client_id {
            if &payload.aud != expected {
                return Err(IdentityProviderError::rejected(
                    "token audience does not match this application",
                ));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl IdentityProvider for GoogleIdentityProvider {
    async fn verify(&self, id_token: &str) -> Result<FederatedIdentity, IdentityProviderError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("id_token", id_token)])
            .send()
            .await
            .map_err(|err| IdentityProviderError::network(err.to_string()))?;

        if !response.status().is_success() {
            return Err(IdentityProviderError::rejected(format!(
                "token-info endpoint answered {}",
                response.status()
            )));
        }

        let payload: TokenInfoPayload = response
            .json()
            .await
            .map_err(|err| IdentityProviderError::malformed(err.to_string()))?;

        self.check_audience(&payload)?;
        if payload.email.is_empty() {
            return Err(IdentityProviderError::rejected(
                "token carries no email claim",
            ));
        }

        Ok(FederatedIdentity {
            subject: payload.sub,
            email: payload.email,
            name: payload.name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(aud: &str) -> TokenInfoPayload {
        TokenInfoPayload {
            sub: "google-sub-1".to_owned(),
            email: "ada@example.com".to_owned(),
            name: "Ada Lovelace".to_owned(),
            aud: aud.to_owned(),
        }
    }

    #[test]
    fn audience_is_ignored_without_a_configured_client_id() {
        let provider = GoogleIdentityProvider::new(None);
        assert!(provider.check_audience(&payload("anything")).is_ok());
    }

    #[test]
    fn mismatched_audience_is_rejected() {
        let provider = GoogleIdentityProvider::new(Some("my-client-id".to_owned()));
        let err = provider
            .check_audience(&payload("other-client-id"))
            .expect_err("rejected");
        assert!(matches!(err, IdentityProviderError::Rejected { .. }));
    }

    #[tokio::test]
    async fn unreachable_endpoint_maps_to_network_error() {
        let provider = GoogleIdentityProvider::new(None)
            .with_endpoint("http://127.0.0.1:1/tokeninfo");
        let err = provider.verify("token").await.expect_err("network error");
        assert!(matches!(err, IdentityProviderError::Network { .. }));
    }
}
