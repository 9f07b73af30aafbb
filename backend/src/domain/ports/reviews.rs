//! Driving port for review use-cases.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Error, LikeToggleOutcome, Review, ReviewDraft, UserId};

/// Domain use-case port for reviews and likes.
///
/// Lookup and like operations collapse store failures into empty/sentinel
/// results; only submission distinguishes validation failures from store
/// failures via [`Error`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Reviews: Send + Sync {
    /// Persist a validated draft and return the created review.
    async fn submit(&self, draft: ReviewDraft) -> Result<Review, Error>;

    /// Fetch a single review; failures and absence both read as `None`.
    async fn review(&self, id: Uuid) -> Option<Review>;

    /// All reviews for a restaurant; failures read as an empty list.
    async fn for_restaurant(&self, restaurant_id: Uuid) -> Vec<Review>;

    /// All reviews by an author; failures read as an empty list.
    async fn by_author(&self, author: &UserId) -> Vec<Review>;

    /// Toggle the user's like and return the authoritative outcome.
    async fn toggle_like(&self, review_id: Uuid, user: &UserId) -> LikeToggleOutcome;

    /// Whether the user has liked the review.
    async fn has_liked(&self, review_id: Uuid, user: &UserId) -> bool;
}

/// Fixture implementation with no reviews.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureReviews;

#[async_trait]
impl Reviews for FixtureReviews {
    async fn submit(&self, _draft: ReviewDraft) -> Result<Review, Error> {
        Err(Error::service_unavailable("review submission unavailable"))
    }

    async fn review(&self, _id: Uuid) -> Option<Review> {
        None
    }

    async fn for_restaurant(&self, _restaurant_id: Uuid) -> Vec<Review> {
        Vec::new()
    }

    async fn by_author(&self, _author: &UserId) -> Vec<Review> {
        Vec::new()
    }

    async fn toggle_like(&self, _review_id: Uuid, _user: &UserId) -> LikeToggleOutcome {
        LikeToggleOutcome::failure()
    }

    async fn has_liked(&self, _review_id: Uuid, _user: &UserId) -> bool {
        false
    }
}
