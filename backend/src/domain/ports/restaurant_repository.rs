//! Port for the read-mostly restaurant catalogue.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Restaurant;

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by restaurant repository adapters.
    pub enum RestaurantPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "restaurant repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } => "restaurant repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RestaurantRepository: Send + Sync {
    /// Fetch the whole catalogue.
    async fn list_all(&self) -> Result<Vec<Restaurant>, RestaurantPersistenceError>;

    /// Fetch a restaurant by identifier. Absence is not an error.
    async fn find_by_id(&self, id: Uuid)
        -> Result<Option<Restaurant>, RestaurantPersistenceError>;

    /// Fetch the restaurants matching the given identifiers. Unknown ids are
    /// silently skipped.
    async fn find_by_ids(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<Restaurant>, RestaurantPersistenceError>;
}

/// Fixture implementation serving an empty catalogue.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRestaurantRepository;

#[async_trait]
impl RestaurantRepository for FixtureRestaurantRepository {
    async fn list_all(&self) -> Result<Vec<Restaurant>, RestaurantPersistenceError> {
        Ok(Vec::new())
    }

    async fn find_by_id(
        &self,
        _id: Uuid,
    ) -> Result<Option<Restaurant>, RestaurantPersistenceError> {
        Ok(None)
    }

    async fn find_by_ids(
        &self,
        _ids: &[Uuid],
    ) -> Result<Vec<Restaurant>, RestaurantPersistenceError> {
        Ok(Vec::new())
    }
}
