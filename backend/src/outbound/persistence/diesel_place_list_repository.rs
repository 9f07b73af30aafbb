//! PostgreSQL-backed `PlaceListRepository` implementation using Diesel.
//!
//! The one-list-per-owner rule lives in the schema (unique owner column);
//! membership mutations resolve the owner's list and mutate the set inside
//! one transaction.

use std::collections::BTreeSet;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{PlaceListPersistenceError, PlaceListRepository};
use crate::domain::{PlaceList, UserId};

use super::diesel_basic_error_mapping::{
    is_unique_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{NewPlaceListRow, PlaceListRow};
use super::pool::{DbPool, PoolError};
use super::schema::{place_list_restaurants, place_lists};

/// Diesel-backed implementation of the `PlaceListRepository` port.
#[derive(Clone)]
pub struct DieselPlaceListRepository {
    pool: DbPool,
}

impl DieselPlaceListRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> PlaceListPersistenceError {
    map_basic_pool_error(error, PlaceListPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> PlaceListPersistenceError {
    if is_unique_violation(&error) {
        return PlaceListPersistenceError::conflict("owner already has a place list");
    }
    map_basic_diesel_error(
        error,
        PlaceListPersistenceError::query,
        PlaceListPersistenceError::connection,
    )
}

fn row_to_place_list(row: PlaceListRow, restaurants: BTreeSet<Uuid>) -> PlaceList {
    PlaceList {
        id: row.id,
        owner: UserId::from_uuid(row.owner_id),
        title: row.title,
        notes: row.notes,
        is_public: row.is_public,
        restaurants,
        created_at: row.created_at,
    }
}

#[async_trait]
impl PlaceListRepository for DieselPlaceListRepository {
    async fn find_by_owner(
        &self,
        owner: &UserId,
    ) -> Result<Option<PlaceList>, PlaceListPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<PlaceListRow> = place_lists::table
            .filter(place_lists::owner_id.eq(owner.as_uuid()))
            .select(PlaceListRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        let Some(row) = row else { return Ok(None) };

        let members: Vec<Uuid> = place_list_restaurants::table
            .filter(place_list_restaurants::place_list_id.eq(row.id))
            .select(place_list_restaurants::restaurant_id)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(Some(row_to_place_list(
            row,
            members.into_iter().collect::<BTreeSet<_>>(),
        )))
    }

    async fn insert(&self, list: &PlaceList) -> Result<(), PlaceListPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewPlaceListRow {
            id: list.id,
            owner_id: *list.owner.as_uuid(),
            title: &list.title,
            notes: &list.notes,
            is_public: list.is_public,
            created_at: list.created_at,
        };

        diesel::insert_into(place_lists::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn add_restaurant(
        &self,
        owner: &UserId,
        restaurant_id: Uuid,
    ) -> Result<bool, PlaceListPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let owner_uuid = *owner.as_uuid();

        conn.transaction(|conn| {
            async move {
                let list_id: Option<Uuid> = place_lists::table
                    .filter(place_lists::owner_id.eq(owner_uuid))
                    .select(place_lists::id)
                    .first(conn)
                    .await
                    .optional()?;
                let Some(list_id) = list_id else {
                    return Ok(false);
                };

                // Set semantics: re-saving an already-saved restaurant is a
                // no-op, not a duplicate entry.
                diesel::insert_into(place_list_restaurants::table)
                    .values((
                        place_list_restaurants::place_list_id.eq(list_id),
                        place_list_restaurants::restaurant_id.eq(restaurant_id),
                    ))
                    .on_conflict_do_nothing()
                    .execute(conn)
                    .await?;
                Ok(true)
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn remove_restaurant(
        &self,
        owner: &UserId,
        restaurant_id: Uuid,
    ) -> Result<bool, PlaceListPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let owner_uuid = *owner.as_uuid();

        conn.transaction(|conn| {
            async move {
                let list_id: Option<Uuid> = place_lists::table
                    .filter(place_lists::owner_id.eq(owner_uuid))
                    .select(place_lists::id)
                    .first(conn)
                    .await
                    .optional()?;
                let Some(list_id) = list_id else {
                    return Ok(false);
                };

                diesel::delete(
                    place_list_restaurants::table
                        .filter(place_list_restaurants::place_list_id.eq(list_id))
                        .filter(place_list_restaurants::restaurant_id.eq(restaurant_id)),
                )
                .execute(conn)
                .await?;
                Ok(true)
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use chrono::Utc;
    use rstest::rstest;

    #[rstest]
    fn unique_violation_maps_to_conflict() {
        let diesel_err = diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key".to_owned()),
        );
        assert!(matches!(
            map_diesel_error(diesel_err),
            PlaceListPersistenceError::Conflict { .. }
        ));
    }

    #[rstest]
    fn row_converts_with_membership_set() {
        let row = PlaceListRow {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            title: "Weekend spots".to_owned(),
            notes: String::new(),
            is_public: false,
            created_at: Utc::now(),
        };
        let members: BTreeSet<Uuid> = [Uuid::new_v4(), Uuid::new_v4()].into_iter().collect();

        let list = row_to_place_list(row, members.clone());
        assert_eq!(list.restaurants, members);
        assert_eq!(list.title, "Weekend spots");
    }
}
