pub mod dto;
pub mod errors;
pub mod models;
pub mod routes;
pub mod session;
pub mod states;
pub mod store;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::states::AppState;

/// Builds the full application router.
pub fn app(state: AppState) -> Router {
    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Public routes (no auth required)
        .route("/health", get(routes::health::health_check))
        .route(
            "/register",
            get(routes::auth::register_form).post(routes::auth::register),
        )
        .route(
            "/login",
            get(routes::auth::login_form).post(routes::auth::login),
        )
        .route("/logout", get(routes::auth::logout))
        .route("/", get(routes::blog::index))
        .route("/{id}", get(routes::blog::view))
        // Protected routes (session required)
        .route(
            "/create",
            get(routes::blog::create_form).post(routes::blog::create),
        )
        .route(
            "/{id}/update",
            get(routes::blog::update_form).post(routes::blog::update),
        )
        .route("/{id}/delete", post(routes::blog::delete))
        // Add state and middleware
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
