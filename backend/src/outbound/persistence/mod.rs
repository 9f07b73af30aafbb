//! PostgreSQL persistence adapters (Diesel, async).

mod diesel_basic_error_mapping;
mod diesel_credential_store;
mod diesel_place_list_repository;
mod diesel_restaurant_repository;
mod diesel_review_repository;
mod diesel_user_repository;
pub mod migrations;
mod models;
pub mod pool;
pub mod schema;

pub use diesel_credential_store::DieselCredentialStore;
pub use diesel_place_list_repository::DieselPlaceListRepository;
pub use diesel_restaurant_repository::DieselRestaurantRepository;
pub use diesel_review_repository::DieselReviewRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
