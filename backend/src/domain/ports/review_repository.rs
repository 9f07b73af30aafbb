//! Port for review persistence and the like toggle.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{LikeState, Review, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by review repository adapters.
    pub enum ReviewPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "review repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "review repository query failed: {message}",
    }
}

/// Port for review storage, retrieval, and likes.
///
/// # Compound-change contract
///
/// - [`ReviewRepository::insert`] persists the review *and* increments the
///   author's cumulative review count in one transaction, so the count can
///   never run ahead of or behind the reviews themselves.
/// - [`ReviewRepository::toggle_like`] decides like-vs-unlike from the liker
///   set as it exists at write time, inside one transaction, and returns the
///   resulting authoritative state. The like count is derived from the set,
///   never stored separately.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Persist a new review and bump the author's review count.
    async fn insert(&self, review: &Review) -> Result<(), ReviewPersistenceError>;

    /// Fetch a review by identifier.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Review>, ReviewPersistenceError>;

    /// All reviews for a restaurant, newest first.
    async fn list_for_restaurant(
        &self,
        restaurant_id: Uuid,
    ) -> Result<Vec<Review>, ReviewPersistenceError>;

    /// All reviews written by a user, newest first.
    async fn list_by_author(
        &self,
        author: &UserId,
    ) -> Result<Vec<Review>, ReviewPersistenceError>;

    /// Toggle the user's like on a review. Returns `None` when the review
    /// does not exist.
    async fn toggle_like(
        &self,
        review_id: Uuid,
        user: &UserId,
    ) -> Result<Option<LikeState>, ReviewPersistenceError>;

    /// Whether the user has liked the review. Missing reviews read as
    /// not-liked.
    async fn has_liked(
        &self,
        review_id: Uuid,
        user: &UserId,
    ) -> Result<bool, ReviewPersistenceError>;
}

/// Fixture implementation with no reviews at all.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureReviewRepository;

#[async_trait]
impl ReviewRepository for FixtureReviewRepository {
    async fn insert(&self, _review: &Review) -> Result<(), ReviewPersistenceError> {
        Ok(())
    }

    async fn find_by_id(&self, _id: Uuid) -> Result<Option<Review>, ReviewPersistenceError> {
        Ok(None)
    }

    async fn list_for_restaurant(
        &self,
        _restaurant_id: Uuid,
    ) -> Result<Vec<Review>, ReviewPersistenceError> {
        Ok(Vec::new())
    }

    async fn list_by_author(
        &self,
        _author: &UserId,
    ) -> Result<Vec<Review>, ReviewPersistenceError> {
        Ok(Vec::new())
    }

    async fn toggle_like(
        &self,
        _review_id: Uuid,
        _user: &UserId,
    ) -> Result<Option<LikeState>, ReviewPersistenceError> {
        Ok(None)
    }

    async fn has_liked(
        &self,
        _review_id: Uuid,
        _user: &UserId,
    ) -> Result<bool, ReviewPersistenceError> {
        Ok(false)
    }
}
