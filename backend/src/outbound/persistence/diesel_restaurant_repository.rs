//! PostgreSQL-backed `RestaurantRepository` implementation using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{RestaurantPersistenceError, RestaurantRepository};
use crate::domain::Restaurant;

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::RestaurantRow;
use super::pool::{DbPool, PoolError};
use super::schema::restaurants;

/// Diesel-backed implementation of the `RestaurantRepository` port.
#[derive(Clone)]
pub struct DieselRestaurantRepository {
    pool: DbPool,
}

impl DieselRestaurantRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> RestaurantPersistenceError {
    map_basic_pool_error(error, RestaurantPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> RestaurantPersistenceError {
    map_basic_diesel_error(
        error,
        RestaurantPersistenceError::query,
        RestaurantPersistenceError::connection,
    )
}

fn row_to_restaurant(row: RestaurantRow) -> Restaurant {
    Restaurant {
        id: row.id,
        name: row.name,
        address: row.address,
        categories: row.categories,
        latitude: row.latitude,
        longitude: row.longitude,
        rating: row.rating,
        review_count: row.review_count,
        image_path: row.image_path,
        opening_hours: row.opening_hours,
        created_at: row.created_at,
    }
}

#[async_trait]
impl RestaurantRepository for DieselRestaurantRepository {
    async fn list_all(&self) -> Result<Vec<Restaurant>, RestaurantPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<RestaurantRow> = restaurants::table
            .select(RestaurantRow::as_select())
            .order_by(restaurants::name)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_restaurant).collect())
    }

    async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<Restaurant>, RestaurantPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<RestaurantRow> = restaurants::table
            .filter(restaurants::id.eq(id))
            .select(RestaurantRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(row_to_restaurant))
    }

    async fn find_by_ids(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<Restaurant>, RestaurantPersistenceError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<RestaurantRow> = restaurants::table
            .filter(restaurants::id.eq_any(ids))
            .select(RestaurantRow::as_select())
            .order_by(restaurants::name)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_restaurant).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rstest::rstest;

    #[rstest]
    fn row_converts_to_domain_restaurant() {
        let row = RestaurantRow {
            id: Uuid::new_v4(),
            name: "Warung Sederhana".to_owned(),
            address: "Jl. Example 1".to_owned(),
            categories: vec!["Indonesian".to_owned(), "Halal".to_owned()],
            latitude: -6.2,
            longitude: 106.8,
            rating: 4.5,
            review_count: 128,
            image_path: "restaurants/ws.jpg".to_owned(),
            opening_hours: "10.00 - 22.00".to_owned(),
            created_at: Utc::now(),
        };

        let restaurant = row_to_restaurant(row);
        assert_eq!(restaurant.categories.len(), 2);
        assert_eq!(restaurant.review_count, 128);
    }

    #[rstest]
    fn diesel_error_maps_to_query_error() {
        assert!(matches!(
            map_diesel_error(diesel::result::Error::NotFound),
            RestaurantPersistenceError::Query { .. }
        ));
    }
}
