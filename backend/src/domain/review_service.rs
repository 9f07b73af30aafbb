//! Review domain service: submission, lookups, and the like toggle.
//!
//! Implements the [`Reviews`] driving port. Lookups and likes follow the
//! collapse-to-sentinel failure policy: store errors are logged and read as
//! "nothing there" so a flaky backend degrades to an empty page instead of
//! an error page.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::warn;
use uuid::Uuid;

use crate::domain::ports::{ReviewPersistenceError, ReviewRepository, Reviews};
use crate::domain::{Error, LikeToggleOutcome, Review, ReviewDraft, UserId};

/// Review service implementing the [`Reviews`] driving port.
#[derive(Clone)]
pub struct ReviewService<R> {
    reviews: Arc<R>,
}

impl<R> ReviewService<R> {
    /// Create a new service over the review repository.
    pub fn new(reviews: Arc<R>) -> Self {
        Self { reviews }
    }
}

impl<R> ReviewService<R>
where
    R: ReviewRepository,
{
    fn map_review_error(error: ReviewPersistenceError) -> Error {
        match error {
            ReviewPersistenceError::Connection { message } => {
                Error::service_unavailable(format!("review repository unavailable: {message}"))
            }
            ReviewPersistenceError::Query { message } => {
                Error::internal(format!("review repository error: {message}"))
            }
        }
    }
}

#[async_trait]
impl<R> Reviews for ReviewService<R>
where
    R: ReviewRepository,
{
    async fn submit(&self, draft: ReviewDraft) -> Result<Review, Error> {
        // The draft is already validated; the average is computed exactly
        // once here and persisted with the raw sub-ratings.
        let review = Review::create(draft, Utc::now());
        self.reviews
            .insert(&review)
            .await
            .map_err(Self::map_review_error)?;
        Ok(review)
    }

    async fn review(&self, id: Uuid) -> Option<Review> {
        match self.reviews.find_by_id(id).await {
            Ok(review) => review,
            Err(error) => {
                warn!(review_id = %id, %error, "review lookup failed");
                None
            }
        }
    }

    async fn for_restaurant(&self, restaurant_id: Uuid) -> Vec<Review> {
        match self.reviews.list_for_restaurant(restaurant_id).await {
            Ok(reviews) => reviews,
            Err(error) => {
                warn!(%restaurant_id, %error, "restaurant review listing failed");
                Vec::new()
            }
        }
    }

    async fn by_author(&self, author: &UserId) -> Vec<Review> {
        match self.reviews.list_by_author(author).await {
            Ok(reviews) => reviews,
            Err(error) => {
                warn!(user_id = %author, %error, "author review listing failed");
                Vec::new()
            }
        }
    }

    async fn toggle_like(&self, review_id: Uuid, user: &UserId) -> LikeToggleOutcome {
        match self.reviews.toggle_like(review_id, user).await {
            Ok(Some(state)) => LikeToggleOutcome::from_state(state),
            // Toggling a missing review reports failure with zeroed state.
            Ok(None) => LikeToggleOutcome::failure(),
            Err(error) => {
                warn!(%review_id, user_id = %user, %error, "like toggle failed");
                LikeToggleOutcome::failure()
            }
        }
    }

    async fn has_liked(&self, review_id: Uuid, user: &UserId) -> bool {
        match self.reviews.has_liked(review_id, user).await {
            Ok(liked) => liked,
            Err(error) => {
                warn!(%review_id, user_id = %user, %error, "like status check failed");
                false
            }
        }
    }
}
