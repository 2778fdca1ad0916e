use std::sync::Arc;

use axum::{
    http::{header, StatusCode},
    response::{Html, IntoResponse},
    routing::{any, get},
    Extension, Json, Router,
};
use utoipa::OpenApi;

use crate::{handlers::posts, models::posts::Post, AppState};

pub const API_DOCS_PATH: &str = "/v3/api-docs";

#[derive(OpenApi)]
#[openapi(
    info(title = "Job listing API", description = "List, search and create job posts"),
    paths(posts::get_posts, posts::search_posts, posts::create_post),
    components(schemas(Post)),
    tags((name = "posts", description = "Job listing posts"))
)]
pub struct ApiDoc;

// `{api_docs}` is filled with API_DOCS_PATH when served.
const SWAGGER_UI_PAGE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <title>Job listing API</title>
  <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js" crossorigin></script>
  <script>
    window.onload = () => {
      window.ui = SwaggerUIBundle({ url: "{api_docs}", dom_id: "#swagger-ui" });
    };
  </script>
</body>
</html>
"##;

pub fn docs_handler(docs_path: &str) -> Router {
    Router::new()
        .route("/", any(redirect_to_docs))
        .route(API_DOCS_PATH, get(api_docs))
        .route(docs_path, get(swagger_ui))
}

async fn redirect_to_docs(Extension(app_state): Extension<Arc<AppState>>) -> impl IntoResponse {
    (
        StatusCode::FOUND,
        [(header::LOCATION, app_state.config.docs_path.clone())],
    )
}

async fn api_docs() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

async fn swagger_ui() -> impl IntoResponse {
    Html(SWAGGER_UI_PAGE.replace("{api_docs}", API_DOCS_PATH))
}
