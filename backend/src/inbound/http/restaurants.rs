//! Restaurant catalogue HTTP handlers.
//!
//! ```text
//! GET /api/v1/restaurants
//! GET /api/v1/restaurants/{id}
//! ```

use actix_web::{get, web, HttpResponse};
use serde::Serialize;
use tracing::warn;
use uuid::Uuid;

use crate::domain::{Error, Restaurant};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Public representation of a restaurant.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantResponse {
    pub id: String,
    pub name: String,
    pub address: String,
    pub categories: Vec<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub rating: f32,
    pub review_count: i64,
    pub image_path: String,
    pub opening_hours: String,
}

impl From<Restaurant> for RestaurantResponse {
    fn from(value: Restaurant) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name,
            address: value.address,
            categories: value.categories,
            latitude: value.latitude,
            longitude: value.longitude,
            rating: value.rating,
            review_count: value.review_count,
            image_path: value.image_path,
            opening_hours: value.opening_hours,
        }
    }
}

/// List the whole catalogue.
///
/// A failing store degrades to an empty catalogue rather than an error
/// page; the cause is logged.
#[utoipa::path(
    get,
    path = "/api/v1/restaurants",
    responses(
        (status = 200, description = "All restaurants", body = [RestaurantResponse])
    ),
    tags = ["restaurants"],
    operation_id = "listRestaurants",
    security([])
)]
#[get("/restaurants")]
pub async fn list_restaurants(state: web::Data<HttpState>) -> HttpResponse {
    let restaurants = match state.restaurants.list_all().await {
        Ok(restaurants) => restaurants,
        Err(error) => {
            warn!(%error, "restaurant catalogue listing failed");
            Vec::new()
        }
    };
    HttpResponse::Ok().json(
        restaurants
            .into_iter()
            .map(RestaurantResponse::from)
            .collect::<Vec<_>>(),
    )
}

/// Fetch a single restaurant.
#[utoipa::path(
    get,
    path = "/api/v1/restaurants/{id}",
    params(("id" = Uuid, Path, description = "Restaurant identifier")),
    responses(
        (status = 200, description = "The restaurant", body = RestaurantResponse),
        (status = 404, description = "Unknown restaurant", body = Error)
    ),
    tags = ["restaurants"],
    operation_id = "getRestaurant",
    security([])
)]
#[get("/restaurants/{id}")]
pub async fn get_restaurant(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<RestaurantResponse>> {
    let id = path.into_inner();
    let restaurant = state
        .restaurants
        .find_by_id(id)
        .await
        .map_err(|error| {
            warn!(restaurant_id = %id, %error, "restaurant lookup failed");
            Error::service_unavailable("restaurant catalogue unavailable")
        })?
        .ok_or_else(|| Error::not_found("restaurant not found"))?;
    Ok(web::Json(RestaurantResponse::from(restaurant)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::test_app;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use serde_json::Value;

    #[actix_web::test]
    async fn empty_catalogue_lists_as_empty_array() {
        let app = test::init_service(test_app().service(list_restaurants)).await;
        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/restaurants").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body.as_array().map(Vec::len), Some(0));
    }

    #[actix_web::test]
    async fn unknown_restaurant_is_not_found() {
        let app = test::init_service(test_app().service(get_restaurant)).await;
        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/restaurants/3fa85f64-5717-4562-b3fc-2c963f66afa6")
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
