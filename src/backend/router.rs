//! Route configuration for the application.

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Extension, Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{AllowMethods, Any, CorsLayer};

use crate::backend::handlers::{upload, upload_page};
use crate::backend::models::AppState;
use crate::consts::MAX_REQUEST_BYTES;

/// Builds the main router with its middlewares
pub fn get_router(state: Arc<AppState>) -> Router {
    let service = ServiceBuilder::new()
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BYTES))
        .layer(Extension(state));

    let router = Router::new()
        .route("/", get(upload_page)) // Upload form
        .route("/upload", post(upload)) // Form submission
        .layer(service);

    // Allow requests from any origin, in debug builds only
    if cfg!(debug_assertions) {
        let cors = CorsLayer::new()
            .allow_methods(AllowMethods::any())
            .allow_origin(Any);
        router.layer(cors)
    } else {
        router
    }
}
