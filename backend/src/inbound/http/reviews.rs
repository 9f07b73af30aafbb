//! Review HTTP handlers: listing, submission, and likes.
//!
//! ```text
//! GET  /api/v1/restaurants/{id}/reviews
//! POST /api/v1/restaurants/{id}/reviews
//! POST /api/v1/reviews/{id}/like
//! GET  /api/v1/reviews/{id}/like
//! ```

use actix_web::{get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::domain::{Error, ReviewDraft, ReviewValidationError, SubRatings};
use crate::inbound::http::schemas::ReviewResponse;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::missing_field_error;
use crate::inbound::http::ApiResult;

/// Request body for `POST /api/v1/restaurants/{id}/reviews`.
///
/// Media files are uploaded to the external file store by the client; only
/// the resulting URLs are submitted here.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReviewRequest {
    pub description: Option<String>,
    pub food_rating: Option<f32>,
    pub service_rating: Option<f32>,
    pub ambiance_rating: Option<f32>,
    #[serde(default)]
    pub photo_urls: Vec<String>,
    pub video_url: Option<String>,
}

/// Response for the like toggle, mirroring the optimistic-update contract:
/// the caller's speculative flip is replaced by these authoritative values,
/// or rolled back when `success` is `false`.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LikeToggleResponse {
    pub success: bool,
    pub is_liked: bool,
    pub new_like_count: i64,
}

/// Response for the like status check.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LikeStatusResponse {
    pub liked: bool,
}

fn map_review_validation_error(err: ReviewValidationError) -> Error {
    match &err {
        ReviewValidationError::EmptyDescription => Error::invalid_request(err.to_string())
            .with_details(json!({ "field": "description", "code": "empty_description" })),
        ReviewValidationError::RatingOutOfRange { field, value } => {
            let details = json!({
                "field": format!("{field}Rating"),
                "value": value,
                "code": "rating_out_of_range",
            });
            Error::invalid_request(err.to_string()).with_details(details)
        }
    }
}

/// List a restaurant's reviews, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/restaurants/{id}/reviews",
    params(("id" = Uuid, Path, description = "Restaurant identifier")),
    responses(
        (status = 200, description = "Reviews for the restaurant", body = [ReviewResponse])
    ),
    tags = ["reviews"],
    operation_id = "listRestaurantReviews",
    security([])
)]
#[get("/restaurants/{id}/reviews")]
pub async fn list_restaurant_reviews(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> web::Json<Vec<ReviewResponse>> {
    let reviews = state.reviews.for_restaurant(path.into_inner()).await;
    web::Json(reviews.into_iter().map(ReviewResponse::from).collect())
}

/// Submit a review for a restaurant.
///
/// The description must be non-empty and all three sub-ratings within
/// `(0, 5]`; zero means "not rated" and is rejected before anything reaches
/// the store.
#[utoipa::path(
    post,
    path = "/api/v1/restaurants/{id}/reviews",
    params(("id" = Uuid, Path, description = "Restaurant identifier")),
    request_body = SubmitReviewRequest,
    responses(
        (status = 201, description = "Review created", body = ReviewResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Unknown restaurant", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["reviews"],
    operation_id = "submitReview"
)]
#[post("/restaurants/{id}/reviews")]
pub async fn submit_review(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
    payload: web::Json<SubmitReviewRequest>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let restaurant_id = path.into_inner();
    let payload = payload.into_inner();

    let description = payload
        .description
        .ok_or_else(|| missing_field_error("description"))?;
    let food = payload
        .food_rating
        .ok_or_else(|| missing_field_error("foodRating"))?;
    let service = payload
        .service_rating
        .ok_or_else(|| missing_field_error("serviceRating"))?;
    let ambiance = payload
        .ambiance_rating
        .ok_or_else(|| missing_field_error("ambianceRating"))?;

    let ratings =
        SubRatings::new(food, service, ambiance).map_err(map_review_validation_error)?;
    let draft = ReviewDraft::new(
        restaurant_id,
        user_id,
        &description,
        ratings,
        payload.photo_urls,
        payload.video_url.filter(|url| !url.is_empty()),
    )
    .map_err(map_review_validation_error)?;

    // Validation is done; only now may the store be involved.
    if state
        .restaurants
        .find_by_id(restaurant_id)
        .await
        .map_err(|error| {
            tracing::warn!(%restaurant_id, %error, "restaurant lookup failed");
            Error::service_unavailable("restaurant catalogue unavailable")
        })?
        .is_none()
    {
        return Err(Error::not_found("restaurant not found"));
    }

    let review = state.reviews.submit(draft).await?;
    Ok(HttpResponse::Created().json(ReviewResponse::from(review)))
}

/// Toggle the authenticated user's like on a review.
///
/// The decision between like and unlike is made from the liker set as it
/// exists at write time, so duplicate clicks converge instead of
/// double-counting.
#[utoipa::path(
    post,
    path = "/api/v1/reviews/{id}/like",
    params(("id" = Uuid, Path, description = "Review identifier")),
    responses(
        (status = 200, description = "Authoritative like state", body = LikeToggleResponse),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["reviews"],
    operation_id = "toggleReviewLike"
)]
#[post("/reviews/{id}/like")]
pub async fn toggle_review_like(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<LikeToggleResponse>> {
    let user_id = session.require_user_id()?;
    let outcome = state.reviews.toggle_like(path.into_inner(), &user_id).await;
    Ok(web::Json(LikeToggleResponse {
        success: outcome.success,
        is_liked: outcome.liked,
        new_like_count: outcome.like_count,
    }))
}

/// Whether the authenticated user has liked a review.
#[utoipa::path(
    get,
    path = "/api/v1/reviews/{id}/like",
    params(("id" = Uuid, Path, description = "Review identifier")),
    responses(
        (status = 200, description = "Like status", body = LikeStatusResponse),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["reviews"],
    operation_id = "getReviewLikeStatus"
)]
#[get("/reviews/{id}/like")]
pub async fn review_like_status(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<LikeStatusResponse>> {
    let user_id = session.require_user_id()?;
    let liked = state.reviews.has_liked(path.into_inner(), &user_id).await;
    Ok(web::Json(LikeStatusResponse { liked }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::{authenticated_request, test_app};
    use actix_web::http::StatusCode;
    use actix_web::test;
    use serde_json::Value;

    const REVIEW_URI: &str = "/restaurants/3fa85f64-5717-4562-b3fc-2c963f66afa6/reviews";

    fn valid_payload() -> Value {
        json!({
            "description": "Great noodles.",
            "foodRating": 4.0,
            "serviceRating": 5.0,
            "ambianceRating": 3.0
        })
    }

    #[actix_web::test]
    async fn zero_rating_is_rejected_before_any_store_write() {
        let app = test::init_service(test_app().service(submit_review)).await;
        let mut payload = valid_payload();
        payload["foodRating"] = json!(0.0);
        let req = authenticated_request(
            &app,
            test::TestRequest::post().uri(REVIEW_URI).set_json(payload),
        )
        .await;
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(
            body.pointer("/details/code").and_then(Value::as_str),
            Some("rating_out_of_range")
        );
    }

    #[actix_web::test]
    async fn blank_description_is_rejected() {
        let app = test::init_service(test_app().service(submit_review)).await;
        let mut payload = valid_payload();
        payload["description"] = json!("   ");
        let req = authenticated_request(
            &app,
            test::TestRequest::post().uri(REVIEW_URI).set_json(payload),
        )
        .await;
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn submission_requires_a_session() {
        let app = test::init_service(test_app().service(submit_review)).await;
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri(REVIEW_URI)
                .set_json(valid_payload())
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn unknown_restaurant_is_not_found() {
        // Fixture catalogue is empty, so a valid payload 404s after
        // validation passes.
        let app = test::init_service(test_app().service(submit_review)).await;
        let req = authenticated_request(
            &app,
            test::TestRequest::post()
                .uri(REVIEW_URI)
                .set_json(valid_payload()),
        )
        .await;
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn failed_toggle_reports_zeroed_state() {
        let app = test::init_service(test_app().service(toggle_review_like)).await;
        let req = authenticated_request(
            &app,
            test::TestRequest::post()
                .uri("/reviews/3fa85f64-5717-4562-b3fc-2c963f66afa6/like"),
        )
        .await;
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body.get("success").and_then(Value::as_bool), Some(false));
        assert_eq!(body.get("newLikeCount").and_then(Value::as_i64), Some(0));
    }
}
