//! Test helpers for inbound HTTP components.

use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::cookie::Key;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App, HttpResponse};

use crate::domain::{Error, UserId};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Build an app skeleton with fixture state, session middleware, and a
/// sign-in route tests use to mint a session cookie.
pub fn test_app() -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(HttpState::fixtures()))
        .wrap(test_session_middleware())
        .route(
            "/__test/login",
            web::get().to(|session: SessionContext| async move {
                session.persist_user(&UserId::random())?;
                Ok::<_, Error>(HttpResponse::Ok())
            }),
        )
}

/// Turn a request builder into a request carrying a fresh session cookie.
pub async fn authenticated_request<S, B, E>(
    app: &S,
    req: test::TestRequest,
) -> actix_http::Request
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = E>,
    E: std::fmt::Debug,
{
    let login = test::call_service(
        app,
        test::TestRequest::get().uri("/__test/login").to_request(),
    )
    .await;
    let cookie = login
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie set")
        .into_owned();
    req.cookie(cookie).to_request()
}
