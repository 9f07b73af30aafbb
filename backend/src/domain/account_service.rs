//! Account domain service: registration, sign-in, federated sign-in, and
//! profile edits.
//!
//! Implements the [`Accounts`] driving port over the user repository,
//! credential store, and identity provider ports. Passwords are hashed with
//! argon2id before they reach the credential store; plaintext never crosses
//! a port boundary.

use std::sync::Arc;

use argon2::password_hash::{
    rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
};
use argon2::Argon2;
use async_trait::async_trait;
use chrono::Utc;
use tracing::warn;

use crate::domain::events::{IdentityEvent, IdentityEvents};
use crate::domain::ports::{
    Accounts, CredentialStore, CredentialStoreError, FederatedIdentity, IdentityProvider,
    IdentityProviderError, UserPersistenceError, UserRepository,
};
use crate::domain::{
    DisplayName, Error, LoginCredentials, ProfileUpdate, SignupDetails, User, UserId,
};

/// Account service implementing the [`Accounts`] driving port.
#[derive(Clone)]
pub struct AccountService<U, C, G> {
    users: Arc<U>,
    credentials: Arc<C>,
    identity_provider: Arc<G>,
    events: IdentityEvents,
}

impl<U, C, G> AccountService<U, C, G> {
    /// Create a new service with the given collaborators.
    pub fn new(
        users: Arc<U>,
        credentials: Arc<C>,
        identity_provider: Arc<G>,
        events: IdentityEvents,
    ) -> Self {
        Self {
            users,
            credentials,
            identity_provider,
            events,
        }
    }
}

impl<U, C, G> AccountService<U, C, G>
where
    U: UserRepository,
    C: CredentialStore,
    G: IdentityProvider,
{
    fn map_user_error(error: UserPersistenceError) -> Error {
        match error {
            UserPersistenceError::Connection { message } => {
                Error::service_unavailable(format!("user repository unavailable: {message}"))
            }
            UserPersistenceError::Query { message } => {
                Error::internal(format!("user repository error: {message}"))
            }
            UserPersistenceError::Conflict { .. } => {
                Error::conflict("email address is already registered")
            }
        }
    }

    fn map_credential_error(error: CredentialStoreError) -> Error {
        match error {
            CredentialStoreError::Connection { message } => {
                Error::service_unavailable(format!("credential store unavailable: {message}"))
            }
            CredentialStoreError::Query { message } => {
                Error::internal(format!("credential store error: {message}"))
            }
        }
    }

    fn map_identity_error(error: IdentityProviderError) -> Error {
        match error {
            IdentityProviderError::Network { message } => {
                Error::service_unavailable(format!("identity provider unreachable: {message}"))
            }
            IdentityProviderError::Rejected { .. } | IdentityProviderError::Malformed { .. } => {
                Error::unauthorized("invalid identity token")
            }
        }
    }

    fn hash_password(password: &str) -> Result<String, Error> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|err| Error::internal(format!("password hashing failed: {err}")))
    }

    fn verify_password(password: &str, stored_hash: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(stored_hash) else {
            warn!("stored password hash is not parseable");
            return false;
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }

    /// Pick a display name for a federated identity: the provider-reported
    /// name when usable, otherwise the local part of the email address.
    fn federated_display_name(identity: &FederatedIdentity) -> Result<DisplayName, Error> {
        if let Ok(name) = DisplayName::new(identity.name.clone()) {
            return Ok(name);
        }
        let local_part = identity.email.split('@').next().unwrap_or_default();
        DisplayName::new(local_part)
            .map_err(|err| Error::internal(format!("unusable federated identity name: {err}")))
    }

    fn signed_in(&self, user: &User) {
        self.events.publish(IdentityEvent::SignedIn { user_id: user.id });
    }
}

#[async_trait]
impl<U, C, G> Accounts for AccountService<U, C, G>
where
    U: UserRepository,
    C: CredentialStore,
    G: IdentityProvider,
{
    async fn register(&self, details: SignupDetails) -> Result<User, Error> {
        if self
            .users
            .find_by_email(details.email())
            .await
            .map_err(Self::map_user_error)?
            .is_some()
        {
            return Err(Error::conflict("email address is already registered"));
        }

        let password_hash = Self::hash_password(details.password())?;
        let user = User::register(details.name().clone(), details.email().clone(), Utc::now());

        self.users
            .insert(&user)
            .await
            .map_err(Self::map_user_error)?;
        self.credentials
            .store(&user.id, &password_hash)
            .await
            .map_err(Self::map_credential_error)?;

        self.signed_in(&user);
        Ok(user)
    }

    async fn login(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let user = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(Self::map_user_error)?
            .ok_or_else(|| Error::unauthorized("invalid credentials"))?;

        let stored_hash = self
            .credentials
            .password_hash(&user.id)
            .await
            .map_err(Self::map_credential_error)?
            .ok_or_else(|| Error::unauthorized("invalid credentials"))?;

        if !Self::verify_password(credentials.password(), &stored_hash) {
            return Err(Error::unauthorized("invalid credentials"));
        }

        self.signed_in(&user);
        Ok(user)
    }

    async fn login_with_google(&self, id_token: &str) -> Result<User, Error> {
        let identity = self
            .identity_provider
            .verify(id_token)
            .await
            .map_err(Self::map_identity_error)?;

        let email = crate::domain::EmailAddress::new(&identity.email)
            .map_err(|_| Error::unauthorized("identity token carries no usable email"))?;

        if let Some(user) = self
            .users
            .find_by_email(&email)
            .await
            .map_err(Self::map_user_error)?
        {
            self.signed_in(&user);
            return Ok(user);
        }

        // First federated sign-in: create the profile, exactly like the
        // email/password path but without credentials.
        let name = Self::federated_display_name(&identity)?;
        let user = User::register(name, email, Utc::now());
        self.users
            .insert(&user)
            .await
            .map_err(Self::map_user_error)?;

        self.signed_in(&user);
        Ok(user)
    }

    async fn profile(&self, id: &UserId) -> Option<User> {
        match self.users.find_by_id(id).await {
            Ok(user) => user,
            Err(error) => {
                warn!(user_id = %id, %error, "profile lookup failed");
                None
            }
        }
    }

    async fn update_profile(&self, id: &UserId, update: ProfileUpdate) -> bool {
        if update.is_empty() {
            return true;
        }
        match self.users.update_profile(id, &update).await {
            Ok(updated) => updated,
            Err(error) => {
                warn!(user_id = %id, %error, "profile update failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{
        FixtureCredentialStore, FixtureIdentityProvider, MockCredentialStore,
        MockIdentityProvider, MockUserRepository,
    };
    use crate::domain::{EmailAddress, ErrorCode};

    type Service<U, C, G> = AccountService<U, C, G>;

    fn sample_user(email: &str) -> User {
        User::register(
            DisplayName::new("Ada Lovelace").expect("name"),
            EmailAddress::new(email).expect("email"),
            Utc::now(),
        )
    }

    fn hash_of(password: &str) -> String {
        Service::<MockUserRepository, MockCredentialStore, MockIdentityProvider>::hash_password(
            password,
        )
        .expect("hashing succeeds")
    }

    #[tokio::test]
    async fn register_rejects_duplicate_email() {
        let mut users = MockUserRepository::new();
        let existing = sample_user("ada@example.com");
        users
            .expect_find_by_email()
            .times(1)
            .return_once(move |_| Ok(Some(existing)));
        users.expect_insert().times(0);

        let service = AccountService::new(
            Arc::new(users),
            Arc::new(FixtureCredentialStore),
            Arc::new(FixtureIdentityProvider),
            IdentityEvents::new(),
        );
        let details = SignupDetails::try_from_parts("ada@example.com", "password1", "Ada")
            .expect("valid details");

        let error = service.register(details).await.expect_err("conflict");
        assert_eq!(error.code(), ErrorCode::Conflict);
    }

    #[tokio::test]
    async fn register_persists_profile_and_credentials_and_signs_in() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .times(1)
            .return_once(|_| Ok(None));
        users.expect_insert().times(1).return_once(|_| Ok(()));

        let mut credentials = MockCredentialStore::new();
        credentials
            .expect_store()
            .withf(|_, hash| hash.starts_with("$argon2"))
            .times(1)
            .return_once(|_, _| Ok(()));

        let events = IdentityEvents::new();
        let mut event_rx = events.subscribe();
        let service = AccountService::new(
            Arc::new(users),
            Arc::new(credentials),
            Arc::new(FixtureIdentityProvider),
            events,
        );
        let details = SignupDetails::try_from_parts("ada@example.com", "password1", "Ada")
            .expect("valid details");

        let user = service.register(details).await.expect("registered");
        assert_eq!(user.review_count, 0);
        assert_eq!(
            event_rx.recv().await.expect("event"),
            IdentityEvent::SignedIn { user_id: user.id }
        );
    }

    #[tokio::test]
    async fn login_rejects_unknown_email() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .times(1)
            .return_once(|_| Ok(None));

        let service = AccountService::new(
            Arc::new(users),
            Arc::new(FixtureCredentialStore),
            Arc::new(FixtureIdentityProvider),
            IdentityEvents::new(),
        );
        let creds =
            LoginCredentials::try_from_parts("ada@example.com", "password1").expect("shape");

        let error = service.login(&creds).await.expect_err("unauthorized");
        assert_eq!(error.code(), ErrorCode::Unauthorized);
    }

    #[tokio::test]
    async fn login_rejects_wrong_password() {
        let user = sample_user("ada@example.com");
        let user_id = user.id;
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .times(1)
            .return_once(move |_| Ok(Some(user)));

        let stored = hash_of("correct-password");
        let mut credentials = MockCredentialStore::new();
        credentials
            .expect_password_hash()
            .withf(move |id| *id == user_id)
            .times(1)
            .return_once(move |_| Ok(Some(stored)));

        let service = AccountService::new(
            Arc::new(users),
            Arc::new(credentials),
            Arc::new(FixtureIdentityProvider),
            IdentityEvents::new(),
        );
        let creds =
            LoginCredentials::try_from_parts("ada@example.com", "wrong-password").expect("shape");

        let error = service.login(&creds).await.expect_err("unauthorized");
        assert_eq!(error.code(), ErrorCode::Unauthorized);
    }

    #[tokio::test]
    async fn login_accepts_valid_password() {
        let user = sample_user("ada@example.com");
        let expected_id = user.id;
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .times(1)
            .return_once(move |_| Ok(Some(user)));

        let stored = hash_of("password1");
        let mut credentials = MockCredentialStore::new();
        credentials
            .expect_password_hash()
            .times(1)
            .return_once(move |_| Ok(Some(stored)));

        let service = AccountService::new(
            Arc::new(users),
            Arc::new(credentials),
            Arc::new(FixtureIdentityProvider),
            IdentityEvents::new(),
        );
        let creds =
            LoginCredentials::try_from_parts("ada@example.com", "password1").expect("shape");

        let logged_in = service.login(&creds).await.expect("login succeeds");
        assert_eq!(logged_in.id, expected_id);
    }

    #[tokio::test]
    async fn google_sign_in_creates_profile_when_missing() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .times(1)
            .return_once(|_| Ok(None));
        users
            .expect_insert()
            .withf(|user: &User| user.email.as_ref() == "ada@example.com")
            .times(1)
            .return_once(|_| Ok(()));

        let mut provider = MockIdentityProvider::new();
        provider.expect_verify().times(1).return_once(|_| {
            Ok(FederatedIdentity {
                subject: "google-sub-1".to_owned(),
                email: "ada@example.com".to_owned(),
                name: "Ada Lovelace".to_owned(),
            })
        });

        let service = AccountService::new(
            Arc::new(users),
            Arc::new(FixtureCredentialStore),
            Arc::new(provider),
            IdentityEvents::new(),
        );

        let user = service
            .login_with_google("token")
            .await
            .expect("google sign-in");
        assert_eq!(user.name.as_ref(), "Ada Lovelace");
    }

    #[tokio::test]
    async fn google_sign_in_reuses_existing_profile() {
        let existing = sample_user("ada@example.com");
        let expected_id = existing.id;
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .times(1)
            .return_once(move |_| Ok(Some(existing)));
        users.expect_insert().times(0);

        let mut provider = MockIdentityProvider::new();
        provider.expect_verify().times(1).return_once(|_| {
            Ok(FederatedIdentity {
                subject: "google-sub-1".to_owned(),
                email: "ada@example.com".to_owned(),
                // Blank names fall back to the email local part, but the
                // existing profile wins regardless.
                name: String::new(),
            })
        });

        let service = AccountService::new(
            Arc::new(users),
            Arc::new(FixtureCredentialStore),
            Arc::new(provider),
            IdentityEvents::new(),
        );

        let user = service
            .login_with_google("token")
            .await
            .expect("google sign-in");
        assert_eq!(user.id, expected_id);
    }

    #[tokio::test]
    async fn profile_collapses_store_failure_to_none() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .times(1)
            .return_once(|_| Err(UserPersistenceError::connection("down")));

        let service = AccountService::new(
            Arc::new(users),
            Arc::new(FixtureCredentialStore),
            Arc::new(FixtureIdentityProvider),
            IdentityEvents::new(),
        );

        assert!(service.profile(&UserId::random()).await.is_none());
    }

    #[tokio::test]
    async fn empty_profile_update_is_a_no_op() {
        let mut users = MockUserRepository::new();
        users.expect_update_profile().times(0);

        let service = AccountService::new(
            Arc::new(users),
            Arc::new(FixtureCredentialStore),
            Arc::new(FixtureIdentityProvider),
            IdentityEvents::new(),
        );

        assert!(
            service
                .update_profile(&UserId::random(), ProfileUpdate::default())
                .await
        );
    }
}
