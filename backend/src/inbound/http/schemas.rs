//! Response payloads shared by several handler modules.

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{Progression, Review, User};

/// Public representation of a user profile.
///
/// The level is derived from the review count on every read; it is not a
/// stored field.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub username: String,
    pub email: String,
    pub review_count: i64,
    pub level: u8,
    pub created_at: String,
}

impl From<User> for UserResponse {
    fn from(value: User) -> Self {
        let level = Progression::for_review_count(value.review_count).level;
        Self {
            id: value.id.to_string(),
            name: value.name.into(),
            username: value.handle.into(),
            email: value.email.into(),
            review_count: value.review_count,
            level,
            created_at: value.created_at.to_rfc3339(),
        }
    }
}

/// Public representation of a review.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponse {
    pub id: String,
    pub restaurant_id: String,
    pub user_id: String,
    pub description: String,
    pub food_rating: f32,
    pub service_rating: f32,
    pub ambiance_rating: f32,
    pub average_rating: f32,
    pub likes: i64,
    pub photo_urls: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    pub created_at: String,
}

impl From<Review> for ReviewResponse {
    fn from(value: Review) -> Self {
        Self {
            id: value.id.to_string(),
            restaurant_id: value.restaurant_id.to_string(),
            user_id: value.author.to_string(),
            description: value.description,
            food_rating: value.ratings.food.value(),
            service_rating: value.ratings.service.value(),
            ambiance_rating: value.ratings.ambiance.value(),
            average_rating: value.average_rating,
            likes: value.likes,
            photo_urls: value.photo_urls,
            video_url: value.video_url,
            created_at: value.created_at.to_rfc3339(),
        }
    }
}
