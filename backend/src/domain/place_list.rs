//! Place lists: a user's saved-restaurant set.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::user::UserId;

/// A user-owned collection of bookmarked restaurants.
///
/// ## Invariants
/// - At most one list exists per owner (enforced by the store's uniqueness
///   constraint on the owner).
/// - Membership is a set: bookmarking an already-saved restaurant is a
///   no-op.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceList {
    pub id: Uuid,
    pub owner: UserId,
    pub title: String,
    pub notes: String,
    pub is_public: bool,
    pub restaurants: BTreeSet<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl PlaceList {
    /// Build a new empty list with a fresh identity.
    pub fn create(
        owner: UserId,
        title: String,
        notes: String,
        is_public: bool,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner,
            title,
            notes,
            is_public,
            restaurants: BTreeSet::new(),
            created_at,
        }
    }

    /// Membership test for a restaurant.
    pub fn contains(&self, restaurant_id: Uuid) -> bool {
        self.restaurants.contains(&restaurant_id)
    }
}
