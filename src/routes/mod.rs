use std::sync::Arc;

use axum::{
    http::{header, Method},
    Extension, Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{docs::docs_handler, posts::posts_handler},
    AppState,
};

pub fn create_routes(app_state: Arc<AppState>) -> Router {
    Router::new()
        .merge(posts_handler())
        .merge(docs_handler(&app_state.config.docs_path))
        .layer(TraceLayer::new_for_http())
        .layer(configure_cors(&app_state))
        .layer(Extension(app_state))
}

/// Only the configured frontend origin may call the API from a browser.
fn configure_cors(app_state: &AppState) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(app_state.config.cors_origin.clone())
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}
