//! Place-list domain service: the bookmark consistency logic.
//!
//! Implements the [`Bookmarks`] driving port. All store failures collapse to
//! `false`/`None` with the cause logged; callers are responsible for
//! surfacing a user-visible failure message.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::warn;
use uuid::Uuid;

use crate::domain::ports::{Bookmarks, CreatePlaceListRequest, PlaceListRepository};
use crate::domain::{PlaceList, UserId};

/// Place-list service implementing the [`Bookmarks`] driving port.
#[derive(Clone)]
pub struct PlaceListService<P> {
    place_lists: Arc<P>,
}

impl<P> PlaceListService<P> {
    /// Create a new service over the place-list repository.
    pub fn new(place_lists: Arc<P>) -> Self {
        Self { place_lists }
    }
}

#[async_trait]
impl<P> Bookmarks for PlaceListService<P>
where
    P: PlaceListRepository,
{
    async fn place_list_for(&self, owner: &UserId) -> Option<PlaceList> {
        match self.place_lists.find_by_owner(owner).await {
            Ok(list) => list,
            Err(error) => {
                warn!(owner = %owner, %error, "place list lookup failed");
                None
            }
        }
    }

    async fn create(&self, owner: &UserId, request: CreatePlaceListRequest) -> Option<PlaceList> {
        let list = PlaceList::create(
            *owner,
            request.title,
            request.notes,
            request.is_public,
            Utc::now(),
        );
        match self.place_lists.insert(&list).await {
            Ok(()) => Some(list),
            Err(error) => {
                warn!(owner = %owner, %error, "place list creation failed");
                None
            }
        }
    }

    async fn add_restaurant(&self, owner: &UserId, restaurant_id: Uuid) -> bool {
        // No list means the save fails outright; creating one is an explicit
        // separate action.
        match self.place_lists.add_restaurant(owner, restaurant_id).await {
            Ok(saved) => saved,
            Err(error) => {
                warn!(owner = %owner, %restaurant_id, %error, "bookmark add failed");
                false
            }
        }
    }

    async fn remove_restaurant(&self, owner: &UserId, restaurant_id: Uuid) -> bool {
        match self
            .place_lists
            .remove_restaurant(owner, restaurant_id)
            .await
        {
            Ok(removed) => removed,
            Err(error) => {
                warn!(owner = %owner, %restaurant_id, %error, "bookmark remove failed");
                false
            }
        }
    }

    async fn is_bookmarked(&self, owner: &UserId, restaurant_id: Uuid) -> bool {
        self.place_list_for(owner)
            .await
            .is_some_and(|list| list.contains(restaurant_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockPlaceListRepository, PlaceListPersistenceError};
    use std::collections::BTreeSet;

    fn request() -> CreatePlaceListRequest {
        CreatePlaceListRequest {
            title: "Weekend spots".to_owned(),
            notes: String::new(),
            is_public: false,
        }
    }

    fn list_with(owner: UserId, restaurants: &[Uuid]) -> PlaceList {
        PlaceList {
            id: Uuid::new_v4(),
            owner,
            title: "Weekend spots".to_owned(),
            notes: String::new(),
            is_public: false,
            restaurants: restaurants.iter().copied().collect::<BTreeSet<_>>(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn create_returns_hydrated_list() {
        let owner = UserId::random();
        let mut repo = MockPlaceListRepository::new();
        repo.expect_insert()
            .withf(move |list: &PlaceList| list.owner == owner && list.restaurants.is_empty())
            .times(1)
            .return_once(|_| Ok(()));

        let service = PlaceListService::new(Arc::new(repo));
        let list = service.create(&owner, request()).await.expect("created");
        assert_eq!(list.owner, owner);
        assert_eq!(list.title, "Weekend spots");
    }

    #[tokio::test]
    async fn create_collapses_conflict_to_none() {
        let mut repo = MockPlaceListRepository::new();
        repo.expect_insert()
            .times(1)
            .return_once(|_| Err(PlaceListPersistenceError::conflict("owner already has one")));

        let service = PlaceListService::new(Arc::new(repo));
        assert!(service.create(&UserId::random(), request()).await.is_none());
    }

    #[tokio::test]
    async fn add_without_a_list_fails_instead_of_creating_one() {
        let mut repo = MockPlaceListRepository::new();
        repo.expect_add_restaurant()
            .times(1)
            .return_once(|_, _| Ok(false));
        repo.expect_insert().times(0);

        let service = PlaceListService::new(Arc::new(repo));
        assert!(
            !service
                .add_restaurant(&UserId::random(), Uuid::new_v4())
                .await
        );
    }

    #[tokio::test]
    async fn add_then_remove_report_success() {
        let owner = UserId::random();
        let spot = Uuid::new_v4();
        let mut repo = MockPlaceListRepository::new();
        repo.expect_add_restaurant()
            .withf(move |o, r| *o == owner && *r == spot)
            .times(1)
            .return_once(|_, _| Ok(true));
        repo.expect_remove_restaurant()
            .withf(move |o, r| *o == owner && *r == spot)
            .times(1)
            .return_once(|_, _| Ok(true));

        let service = PlaceListService::new(Arc::new(repo));
        assert!(service.add_restaurant(&owner, spot).await);
        assert!(service.remove_restaurant(&owner, spot).await);
    }

    #[tokio::test]
    async fn is_bookmarked_reflects_membership() {
        let owner = UserId::random();
        let saved = Uuid::new_v4();
        let other = Uuid::new_v4();
        let mut repo = MockPlaceListRepository::new();
        repo.expect_find_by_owner()
            .times(2)
            .returning(move |_| Ok(Some(list_with(owner, &[saved]))));

        let service = PlaceListService::new(Arc::new(repo));
        assert!(service.is_bookmarked(&owner, saved).await);
        assert!(!service.is_bookmarked(&owner, other).await);
    }

    #[tokio::test]
    async fn is_bookmarked_is_false_without_a_list() {
        let mut repo = MockPlaceListRepository::new();
        repo.expect_find_by_owner().times(1).return_once(|_| Ok(None));

        let service = PlaceListService::new(Arc::new(repo));
        assert!(!service.is_bookmarked(&UserId::random(), Uuid::new_v4()).await);
    }

    #[tokio::test]
    async fn store_failures_collapse_to_false() {
        let mut repo = MockPlaceListRepository::new();
        repo.expect_add_restaurant()
            .times(1)
            .return_once(|_, _| Err(PlaceListPersistenceError::connection("down")));
        repo.expect_find_by_owner()
            .times(1)
            .return_once(|_| Err(PlaceListPersistenceError::query("boom")));

        let service = PlaceListService::new(Arc::new(repo));
        assert!(
            !service
                .add_restaurant(&UserId::random(), Uuid::new_v4())
                .await
        );
        assert!(service.place_list_for(&UserId::random()).await.is_none());
    }
}
