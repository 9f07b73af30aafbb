//! OpenAPI document assembled from the handler annotations.

use utoipa::OpenApi;

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::auth::{GoogleLoginRequest, LoginRequest, RegisterRequest};
use crate::inbound::http::place_lists::{
    BookmarkStatusResponse, CreatePlaceListBody, PlaceListResponse,
};
use crate::inbound::http::restaurants::RestaurantResponse;
use crate::inbound::http::reviews::{
    LikeStatusResponse, LikeToggleResponse, SubmitReviewRequest,
};
use crate::inbound::http::schemas::{ReviewResponse, UserResponse};
use crate::inbound::http::users::{LevelResponse, LevelTierResponse, ProfileUpdateRequest};

/// Public OpenAPI surface used by Swagger UI and tooling.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::inbound::http::auth::register,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::login_with_google,
        crate::inbound::http::auth::logout,
        crate::inbound::http::users::current_user,
        crate::inbound::http::users::update_profile,
        crate::inbound::http::users::current_user_level,
        crate::inbound::http::users::current_user_reviews,
        crate::inbound::http::restaurants::list_restaurants,
        crate::inbound::http::restaurants::get_restaurant,
        crate::inbound::http::reviews::list_restaurant_reviews,
        crate::inbound::http::reviews::submit_review,
        crate::inbound::http::reviews::toggle_review_like,
        crate::inbound::http::reviews::review_like_status,
        crate::inbound::http::place_lists::get_place_list,
        crate::inbound::http::place_lists::create_place_list,
        crate::inbound::http::place_lists::list_bookmarked_restaurants,
        crate::inbound::http::place_lists::add_bookmark,
        crate::inbound::http::place_lists::remove_bookmark,
        crate::inbound::http::place_lists::bookmark_status,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        RegisterRequest,
        LoginRequest,
        GoogleLoginRequest,
        ProfileUpdateRequest,
        SubmitReviewRequest,
        CreatePlaceListBody,
        UserResponse,
        ReviewResponse,
        RestaurantResponse,
        LevelResponse,
        LevelTierResponse,
        PlaceListResponse,
        BookmarkStatusResponse,
        LikeToggleResponse,
        LikeStatusResponse,
    )),
    tags(
        (name = "auth", description = "Registration and sign-in"),
        (name = "users", description = "Current-user profile and progression"),
        (name = "restaurants", description = "Restaurant catalogue"),
        (name = "reviews", description = "Reviews and likes"),
        (name = "place-lists", description = "Saved-restaurant lists"),
        (name = "health", description = "Probes"),
    )
)]
pub struct ApiDoc;
