//! Backend entry-point: wires REST endpoints, persistence, and OpenAPI docs.

use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::cookie::SameSite;
use actix_web::{web, App, HttpServer};
#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetricsBuilder;
use clap::Parser;
use tracing::warn;
use tracing_subscriber::{fmt, EnvFilter};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use backend::inbound::http::health::{live, ready, HealthState};
use backend::inbound::http::{auth, place_lists, restaurants, reviews, users};
use backend::outbound::persistence::{migrations, DbPool, PoolConfig};
use backend::server::{build_http_state, AppConfig};
#[cfg(debug_assertions)]
use backend::ApiDoc;
use backend::Trace;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = AppConfig::parse();
    let key = config.load_session_key()?;

    let pool = match config.database_url.clone() {
        Some(url) => {
            let migration_url = url.clone();
            tokio::task::spawn_blocking(move || {
                migrations::run_pending_migrations(&migration_url)
            })
            .await
            .map_err(|e| std::io::Error::other(e.to_string()))?
            .map_err(std::io::Error::other)?;

            let pool = DbPool::new(PoolConfig::new(url))
                .await
                .map_err(|e| std::io::Error::other(e.to_string()))?;
            Some(pool)
        }
        None => {
            warn!("DATABASE_URL not set; serving fixture data only");
            None
        }
    };

    let state = build_http_state(pool, config.google_client_id.clone());
    let cookie_secure = config.cookie_secure;

    let health_state = web::Data::new(HealthState::new());
    // Clone for the server factory so the readiness probe stays reachable.
    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        let session = SessionMiddleware::builder(CookieSessionStore::default(), key.clone())
            .cookie_name("session".into())
            .cookie_path("/".into())
            .cookie_secure(cookie_secure)
            .cookie_http_only(true)
            .cookie_same_site(SameSite::Lax)
            .build();

        let api = web::scope("/api/v1")
            .wrap(session)
            .service(auth::register)
            .service(auth::login)
            .service(auth::login_with_google)
            .service(auth::logout)
            .service(users::current_user)
            .service(users::update_profile)
            .service(users::current_user_level)
            .service(users::current_user_reviews)
            .service(restaurants::list_restaurants)
            .service(restaurants::get_restaurant)
            .service(reviews::list_restaurant_reviews)
            .service(reviews::submit_review)
            .service(reviews::toggle_review_like)
            .service(reviews::review_like_status)
            .service(place_lists::get_place_list)
            .service(place_lists::create_place_list)
            .service(place_lists::list_bookmarked_restaurants)
            .service(place_lists::add_bookmark)
            .service(place_lists::remove_bookmark)
            .service(place_lists::bookmark_status);

        let app = App::new()
            .app_data(server_health_state.clone())
            .app_data(web::Data::new(state.clone()))
            .wrap(Trace)
            .service(api)
            .service(ready)
            .service(live);

        #[cfg(feature = "metrics")]
        let app = app.wrap(make_metrics());

        #[cfg(debug_assertions)]
        let app =
            app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

        app
    })
    .bind(config.bind_addr)?;

    health_state.mark_ready();
    server.run().await
}

#[cfg(feature = "metrics")]
fn make_metrics() -> actix_web_prom::PrometheusMetrics {
    PrometheusMetricsBuilder::new("tastemap")
        .endpoint("/metrics")
        .build()
        .expect("configure Prometheus metrics")
}
