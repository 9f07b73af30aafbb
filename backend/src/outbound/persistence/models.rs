//! Internal Diesel row structs for database operations.
//!
//! Implementation details of the persistence layer; never exposed to the
//! domain. They exist solely to satisfy Diesel's type requirements for
//! queries and mutations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{credentials, place_lists, restaurants, review_likes, reviews, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    pub handle: String,
    pub review_count: i64,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub email: &'a str,
    pub display_name: &'a str,
    pub handle: &'a str,
    pub review_count: i64,
    pub created_at: DateTime<Utc>,
}

/// Changeset for profile edits; `None` fields are left untouched.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct ProfileChanges<'a> {
    pub display_name: Option<&'a str>,
    pub handle: Option<&'a str>,
}

/// Insertable struct for storing a password hash.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = credentials)]
pub(crate) struct NewCredentialRow<'a> {
    pub user_id: Uuid,
    pub password_hash: &'a str,
}

/// Row struct for reading from the restaurants table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = restaurants)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RestaurantRow {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub categories: Vec<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub rating: f32,
    pub review_count: i64,
    pub image_path: String,
    pub opening_hours: String,
    pub created_at: DateTime<Utc>,
}

/// Row struct for reading from the reviews table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = reviews)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ReviewRow {
    pub id: Uuid,
    pub restaurant_id: Uuid,
    pub user_id: Uuid,
    pub description: String,
    pub food_rating: f32,
    pub service_rating: f32,
    pub ambiance_rating: f32,
    pub average_rating: f32,
    pub photo_urls: Vec<String>,
    pub video_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new review records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = reviews)]
pub(crate) struct NewReviewRow<'a> {
    pub id: Uuid,
    pub restaurant_id: Uuid,
    pub user_id: Uuid,
    pub description: &'a str,
    pub food_rating: f32,
    pub service_rating: f32,
    pub ambiance_rating: f32,
    pub average_rating: f32,
    pub photo_urls: &'a [String],
    pub video_url: Option<&'a str>,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for adding a liker-set member.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = review_likes)]
pub(crate) struct NewReviewLikeRow {
    pub review_id: Uuid,
    pub user_id: Uuid,
}

/// Row struct for reading from the place_lists table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = place_lists)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PlaceListRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub notes: String,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new place lists.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = place_lists)]
pub(crate) struct NewPlaceListRow<'a> {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: &'a str,
    pub notes: &'a str,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
}
