//! HTTP surface of the fraction learning app.

#![forbid(unsafe_code)]

pub mod error;
mod handlers;

use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};

use services::AppServices;

pub use error::ApiError;
pub use handlers::BANNER;

/// Build the application router over `app`.
pub fn router(app: AppServices) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::index))
        .route("/api/lessons", get(handlers::list_lessons))
        .route("/api/lessons/{id}", get(handlers::get_lesson))
        .route("/api/lessons/{id}/questions", get(handlers::lesson_questions))
        .route(
            "/api/progress",
            get(handlers::get_progress).post(handlers::update_progress),
        )
        .route("/api/welcome-audio", get(handlers::welcome_audio))
        .layer(cors)
        .with_state(app)
}
