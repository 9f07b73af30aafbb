//! PostgreSQL-backed `ReviewRepository` implementation using Diesel.
//!
//! Compound changes are kept transactional: a review insert bumps the
//! author's review count in the same transaction, and the like toggle
//! decides like-vs-unlike from the current liker set, mutates it, and
//! derives the count without leaving the transaction.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::dsl::count_star;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{ReviewPersistenceError, ReviewRepository};
use crate::domain::{LikeState, Review, ReviewValidationError, SubRatings, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewReviewLikeRow, NewReviewRow, ReviewRow};
use super::pool::{DbPool, PoolError};
use super::schema::{review_likes, reviews, users};

/// Diesel-backed implementation of the `ReviewRepository` port.
#[derive(Clone)]
pub struct DieselReviewRepository {
    pool: DbPool,
}

impl DieselReviewRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ReviewPersistenceError {
    map_basic_pool_error(error, ReviewPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> ReviewPersistenceError {
    map_basic_diesel_error(
        error,
        ReviewPersistenceError::query,
        ReviewPersistenceError::connection,
    )
}

fn map_row_error(error: ReviewValidationError) -> ReviewPersistenceError {
    ReviewPersistenceError::query(format!("stored review record is invalid: {error}"))
}

fn row_to_review(row: ReviewRow, likes: i64) -> Result<Review, ReviewPersistenceError> {
    let ratings = SubRatings::new(row.food_rating, row.service_rating, row.ambiance_rating)
        .map_err(map_row_error)?;
    Ok(Review {
        id: row.id,
        restaurant_id: row.restaurant_id,
        author: UserId::from_uuid(row.user_id),
        description: row.description,
        ratings,
        average_rating: row.average_rating,
        likes,
        photo_urls: row.photo_urls,
        video_url: row.video_url,
        created_at: row.created_at,
    })
}

impl DieselReviewRepository {
    /// Attach derived like counts to a batch of review rows.
    async fn hydrate_rows(
        &self,
        conn: &mut diesel_async::pooled_connection::bb8::PooledConnection<
            '_,
            diesel_async::AsyncPgConnection,
        >,
        rows: Vec<ReviewRow>,
    ) -> Result<Vec<Review>, ReviewPersistenceError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();

        let counts: Vec<(Uuid, i64)> = review_likes::table
            .filter(review_likes::review_id.eq_any(&ids))
            .group_by(review_likes::review_id)
            .select((review_likes::review_id, count_star()))
            .load(conn)
            .await
            .map_err(map_diesel_error)?;
        let counts: HashMap<Uuid, i64> = counts.into_iter().collect();

        rows.into_iter()
            .map(|row| {
                let likes = counts.get(&row.id).copied().unwrap_or(0);
                row_to_review(row, likes)
            })
            .collect()
    }
}

#[async_trait]
impl ReviewRepository for DieselReviewRepository {
    async fn insert(&self, review: &Review) -> Result<(), ReviewPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewReviewRow {
            id: review.id,
            restaurant_id: review.restaurant_id,
            user_id: *review.author.as_uuid(),
            description: &review.description,
            food_rating: review.ratings.food.value(),
            service_rating: review.ratings.service.value(),
            ambiance_rating: review.ratings.ambiance.value(),
            average_rating: review.average_rating,
            photo_urls: &review.photo_urls,
            video_url: review.video_url.as_deref(),
            created_at: review.created_at,
        };
        let author = *review.author.as_uuid();

        // Insert and author-count bump commit or roll back together.
        conn.transaction(|conn| {
            async move {
                diesel::insert_into(reviews::table)
                    .values(&new_row)
                    .execute(conn)
                    .await?;
                diesel::update(users::table.filter(users::id.eq(author)))
                    .set(users::review_count.eq(users::review_count + 1_i64))
                    .execute(conn)
                    .await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Review>, ReviewPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<ReviewRow> = reviews::table
            .filter(reviews::id.eq(id))
            .select(ReviewRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        let Some(row) = row else { return Ok(None) };
        let likes: i64 = review_likes::table
            .filter(review_likes::review_id.eq(id))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row_to_review(row, likes).map(Some)
    }

    async fn list_for_restaurant(
        &self,
        restaurant_id: Uuid,
    ) -> Result<Vec<Review>, ReviewPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ReviewRow> = reviews::table
            .filter(reviews::restaurant_id.eq(restaurant_id))
            .select(ReviewRow::as_select())
            .order_by(reviews::created_at.desc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        self.hydrate_rows(&mut conn, rows).await
    }

    async fn list_by_author(
        &self,
        author: &UserId,
    ) -> Result<Vec<Review>, ReviewPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ReviewRow> = reviews::table
            .filter(reviews::user_id.eq(author.as_uuid()))
            .select(ReviewRow::as_select())
            .order_by(reviews::created_at.desc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        self.hydrate_rows(&mut conn, rows).await
    }

    async fn toggle_like(
        &self,
        review_id: Uuid,
        user: &UserId,
    ) -> Result<Option<LikeState>, ReviewPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let user_uuid = *user.as_uuid();

        conn.transaction(|conn| {
            async move {
                let exists: Option<Uuid> = reviews::table
                    .filter(reviews::id.eq(review_id))
                    .select(reviews::id)
                    .first(conn)
                    .await
                    .optional()?;
                if exists.is_none() {
                    return Ok(None);
                }

                // The set membership at write time decides the direction; a
                // stale client flag cannot double-count.
                let removed = diesel::delete(
                    review_likes::table
                        .filter(review_likes::review_id.eq(review_id))
                        .filter(review_likes::user_id.eq(user_uuid)),
                )
                .execute(conn)
                .await?;

                let liked = if removed == 0 {
                    diesel::insert_into(review_likes::table)
                        .values(&NewReviewLikeRow {
                            review_id,
                            user_id: user_uuid,
                        })
                        .on_conflict_do_nothing()
                        .execute(conn)
                        .await?;
                    true
                } else {
                    false
                };

                let count: i64 = review_likes::table
                    .filter(review_likes::review_id.eq(review_id))
                    .count()
                    .get_result(conn)
                    .await?;

                Ok(Some(LikeState { liked, count }))
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn has_liked(
        &self,
        review_id: Uuid,
        user: &UserId,
    ) -> Result<bool, ReviewPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let membership: Option<Uuid> = review_likes::table
            .filter(review_likes::review_id.eq(review_id))
            .filter(review_likes::user_id.eq(user.as_uuid()))
            .select(review_likes::review_id)
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(membership.is_some())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use chrono::Utc;
    use rstest::rstest;

    fn sample_row() -> ReviewRow {
        ReviewRow {
            id: Uuid::new_v4(),
            restaurant_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            description: "Great noodles.".to_owned(),
            food_rating: 4.0,
            service_rating: 5.0,
            ambiance_rating: 3.0,
            average_rating: 4.0,
            photo_urls: vec![],
            video_url: None,
            created_at: Utc::now(),
        }
    }

    #[rstest]
    fn row_converts_with_derived_like_count() {
        let review = row_to_review(sample_row(), 6).expect("valid row");
        assert_eq!(review.likes, 6);
        assert!((review.average_rating - 4.0).abs() < f32::EPSILON);
    }

    #[rstest]
    fn corrupt_rating_surfaces_as_query_error() {
        let mut row = sample_row();
        row.food_rating = 0.0;
        assert!(matches!(
            row_to_review(row, 0),
            Err(ReviewPersistenceError::Query { .. })
        ));
    }

    #[rstest]
    fn diesel_error_maps_to_query_error() {
        assert!(matches!(
            map_diesel_error(diesel::result::Error::NotFound),
            ReviewPersistenceError::Query { .. }
        ));
    }
}
