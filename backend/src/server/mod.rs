//! Server assembly: configuration and port wiring.

mod config;

pub use config::AppConfig;

use std::sync::Arc;

use crate::domain::{AccountService, IdentityEvents, PlaceListService, ReviewService};
use crate::inbound::http::state::HttpState;
use crate::outbound::identity::GoogleIdentityProvider;
use crate::outbound::persistence::{
    DbPool, DieselCredentialStore, DieselPlaceListRepository, DieselRestaurantRepository,
    DieselReviewRepository, DieselUserRepository,
};

/// Wire the HTTP state: Diesel-backed ports when a pool is available,
/// fixture ports otherwise.
pub fn build_http_state(pool: Option<DbPool>, google_client_id: Option<String>) -> HttpState {
    let Some(pool) = pool else {
        return HttpState::fixtures();
    };

    let identity_events = IdentityEvents::new();
    let users = Arc::new(DieselUserRepository::new(pool.clone()));
    let credentials = Arc::new(DieselCredentialStore::new(pool.clone()));
    let identity_provider = Arc::new(GoogleIdentityProvider::new(google_client_id));

    let accounts = Arc::new(AccountService::new(
        users,
        credentials,
        identity_provider,
        identity_events.clone(),
    ));
    let reviews = Arc::new(ReviewService::new(Arc::new(DieselReviewRepository::new(
        pool.clone(),
    ))));
    let bookmarks = Arc::new(PlaceListService::new(Arc::new(
        DieselPlaceListRepository::new(pool.clone()),
    )));
    let restaurants = Arc::new(DieselRestaurantRepository::new(pool));

    HttpState::new(accounts, reviews, bookmarks, restaurants, identity_events)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_pool_wires_fixture_ports() {
        // Fixture state is inert: no accounts, empty catalogue.
        let state = build_http_state(None, None);
        let receiver = state.identity_events.subscribe();
        drop(receiver);
    }
}
