//! Place-list (bookmark) HTTP handlers.
//!
//! ```text
//! GET    /api/v1/users/me/place-list
//! POST   /api/v1/users/me/place-list
//! GET    /api/v1/users/me/place-list/restaurants
//! PUT    /api/v1/users/me/place-list/restaurants/{restaurantId}
//! DELETE /api/v1/users/me/place-list/restaurants/{restaurantId}
//! GET    /api/v1/users/me/place-list/restaurants/{restaurantId}
//! ```
//!
//! The domain collapses store failures into `false`/`None`; this adapter
//! turns those sentinels into the user-visible failure responses.

use actix_web::{delete, get, post, put, web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::domain::ports::CreatePlaceListRequest;
use crate::domain::{Error, PlaceList};
use crate::inbound::http::restaurants::RestaurantResponse;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{missing_field_error, parse_uuid};
use crate::inbound::http::ApiResult;

/// Request body for `POST /api/v1/users/me/place-list`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlaceListBody {
    pub title: Option<String>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub is_public: bool,
}

/// Public representation of a place list.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlaceListResponse {
    pub id: String,
    pub creator_id: String,
    pub title: String,
    pub notes: String,
    pub is_public: bool,
    pub restaurant_ids: Vec<String>,
    pub created_at: String,
}

impl From<PlaceList> for PlaceListResponse {
    fn from(value: PlaceList) -> Self {
        Self {
            id: value.id.to_string(),
            creator_id: value.owner.to_string(),
            title: value.title,
            notes: value.notes,
            is_public: value.is_public,
            restaurant_ids: value
                .restaurants
                .into_iter()
                .map(|id| id.to_string())
                .collect(),
            created_at: value.created_at.to_rfc3339(),
        }
    }
}

/// Membership status of one restaurant in the caller's place list.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkStatusResponse {
    pub bookmarked: bool,
}

/// Fetch the authenticated user's place list.
#[utoipa::path(
    get,
    path = "/api/v1/users/me/place-list",
    responses(
        (status = 200, description = "The place list", body = PlaceListResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "No place list yet", body = Error)
    ),
    tags = ["place-lists"],
    operation_id = "getPlaceList"
)]
#[get("/users/me/place-list")]
pub async fn get_place_list(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<PlaceListResponse>> {
    let user_id = session.require_user_id()?;
    let list = state
        .bookmarks
        .place_list_for(&user_id)
        .await
        .ok_or_else(|| Error::not_found("no place list yet"))?;
    Ok(web::Json(PlaceListResponse::from(list)))
}

/// Create the authenticated user's place list.
#[utoipa::path(
    post,
    path = "/api/v1/users/me/place-list",
    request_body = CreatePlaceListBody,
    responses(
        (status = 201, description = "Created place list", body = PlaceListResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 409, description = "A place list already exists", body = Error)
    ),
    tags = ["place-lists"],
    operation_id = "createPlaceList"
)]
#[post("/users/me/place-list")]
pub async fn create_place_list(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreatePlaceListBody>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let payload = payload.into_inner();
    let title = payload.title.ok_or_else(|| missing_field_error("title"))?;

    if state.bookmarks.place_list_for(&user_id).await.is_some() {
        return Err(Error::conflict("a place list already exists"));
    }

    let list = state
        .bookmarks
        .create(
            &user_id,
            CreatePlaceListRequest {
                title,
                notes: payload.notes,
                is_public: payload.is_public,
            },
        )
        .await
        .ok_or_else(|| Error::service_unavailable("could not create the place list"))?;
    Ok(HttpResponse::Created().json(PlaceListResponse::from(list)))
}

/// List the saved restaurants, hydrated from the catalogue.
///
/// Restaurants that have vanished from the catalogue are silently skipped,
/// exactly like a dangling bookmark.
#[utoipa::path(
    get,
    path = "/api/v1/users/me/place-list/restaurants",
    responses(
        (status = 200, description = "Saved restaurants", body = [RestaurantResponse]),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["place-lists"],
    operation_id = "listBookmarkedRestaurants"
)]
#[get("/users/me/place-list/restaurants")]
pub async fn list_bookmarked_restaurants(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<RestaurantResponse>>> {
    let user_id = session.require_user_id()?;
    let Some(list) = state.bookmarks.place_list_for(&user_id).await else {
        return Ok(web::Json(Vec::new()));
    };

    let ids: Vec<_> = list.restaurants.iter().copied().collect();
    let restaurants = match state.restaurants.find_by_ids(&ids).await {
        Ok(restaurants) => restaurants,
        Err(error) => {
            tracing::warn!(owner = %user_id, %error, "bookmarked restaurant lookup failed");
            Vec::new()
        }
    };
    Ok(web::Json(
        restaurants.into_iter().map(RestaurantResponse::from).collect(),
    ))
}

/// Save a restaurant into the place list.
///
/// Fails when no list exists yet; creating one is an explicit step.
#[utoipa::path(
    put,
    path = "/api/v1/users/me/place-list/restaurants/{restaurantId}",
    params(("restaurantId" = String, Path, description = "Restaurant identifier")),
    responses(
        (status = 204, description = "Saved"),
        (status = 400, description = "Invalid identifier", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "No place list yet", body = Error)
    ),
    tags = ["place-lists"],
    operation_id = "addBookmark"
)]
#[put("/users/me/place-list/restaurants/{restaurantId}")]
pub async fn add_bookmark(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let restaurant_id = parse_uuid(&path.into_inner(), "restaurantId")?;
    if state
        .bookmarks
        .add_restaurant(&user_id, restaurant_id)
        .await
    {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Err(Error::not_found("no place list to save into"))
    }
}

/// Remove a restaurant from the place list.
#[utoipa::path(
    delete,
    path = "/api/v1/users/me/place-list/restaurants/{restaurantId}",
    params(("restaurantId" = String, Path, description = "Restaurant identifier")),
    responses(
        (status = 204, description = "Removed"),
        (status = 400, description = "Invalid identifier", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "No place list yet", body = Error)
    ),
    tags = ["place-lists"],
    operation_id = "removeBookmark"
)]
#[delete("/users/me/place-list/restaurants/{restaurantId}")]
pub async fn remove_bookmark(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let restaurant_id = parse_uuid(&path.into_inner(), "restaurantId")?;
    if state
        .bookmarks
        .remove_restaurant(&user_id, restaurant_id)
        .await
    {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Err(Error::not_found("no place list to remove from"))
    }
}

/// Membership check for one restaurant.
///
/// Having no list at all reads as "not bookmarked", not as an error.
#[utoipa::path(
    get,
    path = "/api/v1/users/me/place-list/restaurants/{restaurantId}",
    params(("restaurantId" = String, Path, description = "Restaurant identifier")),
    responses(
        (status = 200, description = "Membership status", body = BookmarkStatusResponse),
        (status = 400, description = "Invalid identifier", body = Error),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["place-lists"],
    operation_id = "getBookmarkStatus"
)]
#[get("/users/me/place-list/restaurants/{restaurantId}")]
pub async fn bookmark_status(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<BookmarkStatusResponse>> {
    let user_id = session.require_user_id()?;
    let restaurant_id = parse_uuid(&path.into_inner(), "restaurantId")?;
    let bookmarked = state.bookmarks.is_bookmarked(&user_id, restaurant_id).await;
    Ok(web::Json(BookmarkStatusResponse { bookmarked }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::{authenticated_request, test_app};
    use actix_web::http::StatusCode;
    use actix_web::test;
    use serde_json::{json, Value};

    const BOOKMARK_URI: &str =
        "/users/me/place-list/restaurants/3fa85f64-5717-4562-b3fc-2c963f66afa6";

    #[actix_web::test]
    async fn place_list_requires_a_session() {
        let app = test::init_service(test_app().service(get_place_list)).await;
        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/users/me/place-list")
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn missing_place_list_reads_as_not_found() {
        let app = test::init_service(test_app().service(get_place_list)).await;
        let req =
            authenticated_request(&app, test::TestRequest::get().uri("/users/me/place-list"))
                .await;
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn create_requires_a_title() {
        let app = test::init_service(test_app().service(create_place_list)).await;
        let req = authenticated_request(
            &app,
            test::TestRequest::post()
                .uri("/users/me/place-list")
                .set_json(json!({ "notes": "" })),
        )
        .await;
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn saving_without_a_list_fails_rather_than_creating_one() {
        let app = test::init_service(test_app().service(add_bookmark)).await;
        let req =
            authenticated_request(&app, test::TestRequest::put().uri(BOOKMARK_URI)).await;
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn hydrated_listing_is_empty_without_a_list() {
        let app = test::init_service(test_app().service(list_bookmarked_restaurants)).await;
        let req = authenticated_request(
            &app,
            test::TestRequest::get().uri("/users/me/place-list/restaurants"),
        )
        .await;
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body.as_array().map(Vec::len), Some(0));
    }

    #[actix_web::test]
    async fn malformed_restaurant_id_is_a_bad_request() {
        let app = test::init_service(test_app().service(bookmark_status)).await;
        let req = authenticated_request(
            &app,
            test::TestRequest::get().uri("/users/me/place-list/restaurants/not-a-uuid"),
        )
        .await;
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn bookmark_status_defaults_to_false() {
        let app = test::init_service(test_app().service(bookmark_status)).await;
        let req =
            authenticated_request(&app, test::TestRequest::get().uri(BOOKMARK_URI)).await;
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body.get("bookmarked").and_then(Value::as_bool), Some(false));
    }
}
