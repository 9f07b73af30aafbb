//! Authentication HTTP handlers.
//!
//! ```text
//! POST /api/v1/auth/register {"email":"...","password":"...","name":"..."}
//! POST /api/v1/auth/login    {"email":"...","password":"..."}
//! POST /api/v1/auth/google   {"idToken":"..."}
//! POST /api/v1/auth/logout
//! ```

use actix_web::{post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{
    AuthValidationError, Error, IdentityEvent, LoginCredentials, SignupDetails, User,
};
use crate::inbound::http::schemas::UserResponse;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::missing_field_error;
use crate::inbound::http::ApiResult;

/// Request body for `POST /api/v1/auth/register`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
}

/// Request body for `POST /api/v1/auth/login`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Request body for `POST /api/v1/auth/google`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GoogleLoginRequest {
    pub id_token: Option<String>,
}

fn map_auth_validation_error(err: AuthValidationError) -> Error {
    let (field, code) = match &err {
        AuthValidationError::InvalidEmail => ("email", "invalid_email"),
        AuthValidationError::EmptyPassword => ("password", "empty_password"),
        AuthValidationError::PasswordTooWeak { .. } => ("password", "password_too_weak"),
        AuthValidationError::InvalidDisplayName(_) => ("name", "invalid_name"),
    };
    Error::invalid_request(err.to_string()).with_details(json!({
        "field": field,
        "code": code,
    }))
}

fn establish_session(session: &SessionContext, user: &User) -> Result<(), Error> {
    session.persist_user(&user.id)
}

/// Register a new email/password account and sign it in.
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = UserResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Email already registered", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "register",
    security([])
)]
#[post("/auth/register")]
pub async fn register(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    let email = payload.email.ok_or_else(|| missing_field_error("email"))?;
    let password = payload
        .password
        .ok_or_else(|| missing_field_error("password"))?;
    let name = payload.name.ok_or_else(|| missing_field_error("name"))?;

    let details = SignupDetails::try_from_parts(&email, &password, &name)
        .map_err(map_auth_validation_error)?;

    let user = state.accounts.register(details).await?;
    establish_session(&session, &user)?;
    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

/// Authenticate with email and password and establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = UserResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    let email = payload.email.ok_or_else(|| missing_field_error("email"))?;
    let password = payload
        .password
        .ok_or_else(|| missing_field_error("password"))?;

    let credentials =
        LoginCredentials::try_from_parts(&email, &password).map_err(map_auth_validation_error)?;

    let user = state.accounts.login(&credentials).await?;
    establish_session(&session, &user)?;
    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

/// Authenticate with a Google ID token and establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/auth/google",
    request_body = GoogleLoginRequest,
    responses(
        (status = 200, description = "Login success", body = UserResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Token rejected", body = Error),
        (status = 503, description = "Identity provider unreachable", body = Error)
    ),
    tags = ["auth"],
    operation_id = "loginWithGoogle",
    security([])
)]
#[post("/auth/google")]
pub async fn login_with_google(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<GoogleLoginRequest>,
) -> ApiResult<HttpResponse> {
    let id_token = payload
        .into_inner()
        .id_token
        .ok_or_else(|| missing_field_error("idToken"))?;

    let user = state.accounts.login_with_google(&id_token).await?;
    establish_session(&session, &user)?;
    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

/// Clear the session, signing the user out.
#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    responses(
        (status = 204, description = "Signed out"),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "logout"
)]
#[post("/auth/logout")]
pub async fn logout(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    if let Some(user_id) = session.user_id()? {
        state
            .identity_events
            .publish(IdentityEvent::SignedOut { user_id });
    }
    session.clear();
    Ok(HttpResponse::NoContent().finish())
}
