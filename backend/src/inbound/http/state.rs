//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    Accounts, Bookmarks, FixtureAccounts, FixtureBookmarks, FixtureRestaurantRepository,
    FixtureReviews, RestaurantRepository, Reviews,
};
use crate::domain::IdentityEvents;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<dyn Accounts>,
    pub reviews: Arc<dyn Reviews>,
    pub bookmarks: Arc<dyn Bookmarks>,
    pub restaurants: Arc<dyn RestaurantRepository>,
    pub identity_events: IdentityEvents,
}

impl HttpState {
    /// Construct state from port implementations.
    pub fn new(
        accounts: Arc<dyn Accounts>,
        reviews: Arc<dyn Reviews>,
        bookmarks: Arc<dyn Bookmarks>,
        restaurants: Arc<dyn RestaurantRepository>,
        identity_events: IdentityEvents,
    ) -> Self {
        Self {
            accounts,
            reviews,
            bookmarks,
            restaurants,
            identity_events,
        }
    }

    /// State backed entirely by fixture ports, for tests and dry runs.
    pub fn fixtures() -> Self {
        Self {
            accounts: Arc::new(FixtureAccounts),
            reviews: Arc::new(FixtureReviews),
            bookmarks: Arc::new(FixtureBookmarks),
            restaurants: Arc::new(FixtureRestaurantRepository),
            identity_events: IdentityEvents::new(),
        }
    }
}
