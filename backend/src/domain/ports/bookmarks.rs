//! Driving port for bookmark / place-list use-cases.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{PlaceList, UserId};

/// Request payload for creating a place list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePlaceListRequest {
    pub title: String,
    pub notes: String,
    pub is_public: bool,
}

/// Domain use-case port for a user's saved-restaurant set.
///
/// Every operation collapses store failures into `false`/`None` and logs the
/// cause; callers surface a user-visible failure message themselves.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Bookmarks: Send + Sync {
    /// The owner's place list, if any. Absence is not an error.
    async fn place_list_for(&self, owner: &UserId) -> Option<PlaceList>;

    /// Create the owner's place list and return the hydrated entity.
    async fn create(&self, owner: &UserId, request: CreatePlaceListRequest) -> Option<PlaceList>;

    /// Save a restaurant. `false` when the owner has no list: creation is an
    /// explicit separate step, never implied by a save.
    async fn add_restaurant(&self, owner: &UserId, restaurant_id: Uuid) -> bool;

    /// Remove a saved restaurant. `false` when the owner has no list.
    async fn remove_restaurant(&self, owner: &UserId, restaurant_id: Uuid) -> bool;

    /// Membership check; `false` when the owner has no list.
    async fn is_bookmarked(&self, owner: &UserId, restaurant_id: Uuid) -> bool;
}

/// Fixture implementation where nobody has a list.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureBookmarks;

#[async_trait]
impl Bookmarks for FixtureBookmarks {
    async fn place_list_for(&self, _owner: &UserId) -> Option<PlaceList> {
        None
    }

    async fn create(
        &self,
        _owner: &UserId,
        _request: CreatePlaceListRequest,
    ) -> Option<PlaceList> {
        None
    }

    async fn add_restaurant(&self, _owner: &UserId, _restaurant_id: Uuid) -> bool {
        false
    }

    async fn remove_restaurant(&self, _owner: &UserId, _restaurant_id: Uuid) -> bool {
        false
    }

    async fn is_bookmarked(&self, _owner: &UserId, _restaurant_id: Uuid) -> bool {
        false
    }
}
