//! Current-user HTTP handlers: profile, profile edits, progression, reviews.
//!
//! ```text
//! GET /api/v1/users/me
//! PUT /api/v1/users/me/profile
//! GET /api/v1/users/me/level
//! GET /api/v1/users/me/reviews
//! ```

use actix_web::{get, put, web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{
    DisplayName, Error, Handle, ProfileUpdate, Progression, UserValidationError,
};
use crate::inbound::http::schemas::{ReviewResponse, UserResponse};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Request body for `PUT /api/v1/users/me/profile`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdateRequest {
    pub name: Option<String>,
    pub username: Option<String>,
}

/// One tier of the progression ladder.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LevelTierResponse {
    pub level: u8,
    pub required_xp: u64,
    pub label: String,
    pub icon: String,
}

/// Response for `GET /api/v1/users/me/level`.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LevelResponse {
    pub level: u8,
    pub current_xp: u64,
    /// Absent at the maximum tier, where there is nothing left to earn.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xp_to_next_level: Option<u64>,
    pub progress_percentage: f32,
    pub tiers: Vec<LevelTierResponse>,
}

impl From<Progression> for LevelResponse {
    fn from(value: Progression) -> Self {
        Self {
            level: value.level,
            current_xp: value.current_xp,
            xp_to_next_level: (!value.at_max_level()).then_some(value.xp_to_next_level),
            progress_percentage: value.progress_percentage,
            tiers: Progression::tiers()
                .iter()
                .map(|tier| LevelTierResponse {
                    level: tier.level,
                    required_xp: tier.required_xp,
                    label: tier.label.to_owned(),
                    icon: tier.icon.to_owned(),
                })
                .collect(),
        }
    }
}

fn map_profile_validation_error(err: &UserValidationError, field: &'static str) -> Error {
    Error::invalid_request(err.to_string()).with_details(json!({
        "field": field,
        "code": "invalid_value",
    }))
}

fn parse_profile_update(payload: ProfileUpdateRequest) -> Result<ProfileUpdate, Error> {
    let name = payload
        .name
        .map(|raw| DisplayName::new(raw).map_err(|err| map_profile_validation_error(&err, "name")))
        .transpose()?;
    let handle = payload
        .username
        .map(|raw| Handle::new(raw).map_err(|err| map_profile_validation_error(&err, "username")))
        .transpose()?;
    Ok(ProfileUpdate { name, handle })
}

/// Fetch the authenticated user's profile.
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    responses(
        (status = 200, description = "Current profile", body = UserResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Profile missing", body = Error)
    ),
    tags = ["users"],
    operation_id = "getCurrentUser"
)]
#[get("/users/me")]
pub async fn current_user(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<UserResponse>> {
    let user_id = session.require_user_id()?;
    let user = state
        .accounts
        .profile(&user_id)
        .await
        .ok_or_else(|| Error::not_found("profile not found"))?;
    Ok(web::Json(UserResponse::from(user)))
}

/// Edit the authenticated user's display name and/or handle.
#[utoipa::path(
    put,
    path = "/api/v1/users/me/profile",
    request_body = ProfileUpdateRequest,
    responses(
        (status = 200, description = "Updated profile", body = UserResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Profile missing", body = Error)
    ),
    tags = ["users"],
    operation_id = "updateProfile"
)]
#[put("/users/me/profile")]
pub async fn update_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ProfileUpdateRequest>,
) -> ApiResult<web::Json<UserResponse>> {
    let user_id = session.require_user_id()?;
    let update = parse_profile_update(payload.into_inner())?;

    if !state.accounts.update_profile(&user_id, update).await {
        return Err(Error::not_found("profile not found"));
    }
    let user = state
        .accounts
        .profile(&user_id)
        .await
        .ok_or_else(|| Error::not_found("profile not found"))?;
    Ok(web::Json(UserResponse::from(user)))
}

/// Fetch the authenticated user's derived progression state.
#[utoipa::path(
    get,
    path = "/api/v1/users/me/level",
    responses(
        (status = 200, description = "Progression state", body = LevelResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Profile missing", body = Error)
    ),
    tags = ["users"],
    operation_id = "getCurrentUserLevel"
)]
#[get("/users/me/level")]
pub async fn current_user_level(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<LevelResponse>> {
    let user_id = session.require_user_id()?;
    let user = state
        .accounts
        .profile(&user_id)
        .await
        .ok_or_else(|| Error::not_found("profile not found"))?;
    let progression = Progression::for_review_count(user.review_count);
    Ok(web::Json(LevelResponse::from(progression)))
}

/// List the authenticated user's reviews, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/users/me/reviews",
    responses(
        (status = 200, description = "Reviews by the current user", body = [ReviewResponse]),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["users"],
    operation_id = "listCurrentUserReviews"
)]
#[get("/users/me/reviews")]
pub async fn current_user_reviews(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<ReviewResponse>>> {
    let user_id = session.require_user_id()?;
    let reviews = state.reviews.by_author(&user_id).await;
    Ok(web::Json(
        reviews.into_iter().map(ReviewResponse::from).collect(),
    ))
}
