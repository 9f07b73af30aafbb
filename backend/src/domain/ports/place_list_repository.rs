//! Port for place-list persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{PlaceList, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by place-list repository adapters.
    pub enum PlaceListPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "place list repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "place list repository query failed: {message}",
        /// The owner already has a list.
        Conflict { message: String } => "place list conflict: {message}",
    }
}

/// Port for place-list storage.
///
/// # Membership contract
///
/// Membership is a set: [`PlaceListRepository::add_restaurant`] is a no-op
/// for an already-saved restaurant, and removal deletes the membership
/// outright. Both return `false` when the owner has no list; callers decide
/// whether to create one first.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlaceListRepository: Send + Sync {
    /// Fetch the owner's list, membership included.
    async fn find_by_owner(
        &self,
        owner: &UserId,
    ) -> Result<Option<PlaceList>, PlaceListPersistenceError>;

    /// Persist a new list. An existing list for the same owner surfaces as
    /// [`PlaceListPersistenceError::Conflict`].
    async fn insert(&self, list: &PlaceList) -> Result<(), PlaceListPersistenceError>;

    /// Add a restaurant to the owner's list. `false` when no list exists.
    async fn add_restaurant(
        &self,
        owner: &UserId,
        restaurant_id: Uuid,
    ) -> Result<bool, PlaceListPersistenceError>;

    /// Remove a restaurant from the owner's list. `false` when no list
    /// exists.
    async fn remove_restaurant(
        &self,
        owner: &UserId,
        restaurant_id: Uuid,
    ) -> Result<bool, PlaceListPersistenceError>;
}

/// Fixture implementation where nobody has a list.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePlaceListRepository;

#[async_trait]
impl PlaceListRepository for FixturePlaceListRepository {
    async fn find_by_owner(
        &self,
        _owner: &UserId,
    ) -> Result<Option<PlaceList>, PlaceListPersistenceError> {
        Ok(None)
    }

    async fn insert(&self, _list: &PlaceList) -> Result<(), PlaceListPersistenceError> {
        Ok(())
    }

    async fn add_restaurant(
        &self,
        _owner: &UserId,
        _restaurant_id: Uuid,
    ) -> Result<bool, PlaceListPersistenceError> {
        Ok(false)
    }

    async fn remove_restaurant(
        &self,
        _owner: &UserId,
        _restaurant_id: Uuid,
    ) -> Result<bool, PlaceListPersistenceError> {
        Ok(false)
    }
}
