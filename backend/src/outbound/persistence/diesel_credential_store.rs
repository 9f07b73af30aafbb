//! PostgreSQL-backed `CredentialStore` implementation using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CredentialStore, CredentialStoreError};
use crate::domain::UserId;

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::NewCredentialRow;
use super::pool::{DbPool, PoolError};
use super::schema::credentials;

/// Diesel-backed implementation of the `CredentialStore` port.
#[derive(Clone)]
pub struct DieselCredentialStore {
    pool: DbPool,
}

impl DieselCredentialStore {
    /// Create a new store with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CredentialStoreError {
    map_basic_pool_error(error, CredentialStoreError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> CredentialStoreError {
    map_basic_diesel_error(
        error,
        CredentialStoreError::query,
        CredentialStoreError::connection,
    )
}

#[async_trait]
impl CredentialStore for DieselCredentialStore {
    async fn store(
        &self,
        user_id: &UserId,
        password_hash: &str,
    ) -> Result<(), CredentialStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewCredentialRow {
            user_id: *user_id.as_uuid(),
            password_hash,
        };

        diesel::insert_into(credentials::table)
            .values(&new_row)
            .on_conflict(credentials::user_id)
            .do_update()
            .set(credentials::password_hash.eq(password_hash))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn password_hash(
        &self,
        user_id: &UserId,
    ) -> Result<Option<String>, CredentialStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        credentials::table
            .filter(credentials::user_id.eq(user_id.as_uuid()))
            .select(credentials::password_hash)
            .first::<String>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        assert!(matches!(
            map_pool_error(PoolError::checkout("refused")),
            CredentialStoreError::Connection { .. }
        ));
    }

    #[rstest]
    fn diesel_error_maps_to_query_error() {
        assert!(matches!(
            map_diesel_error(diesel::result::Error::NotFound),
            CredentialStoreError::Query { .. }
        ));
    }
}
