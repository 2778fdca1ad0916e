use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};

use crate::{
    models::posts::{NewPost, Post},
    AppState, Result,
};

pub fn posts_handler() -> Router {
    Router::new()
        .route("/posts", get(get_posts))
        .route("/posts/{text}", get(search_posts))
        .route("/post", post(create_post))
}

/// Every stored post, in store order.
#[utoipa::path(
    get,
    path = "/posts",
    tag = "posts",
    responses(
        (status = 200, description = "All posts, empty when none are stored", body = [Post]),
        (status = 500, description = "Store unavailable")
    )
)]
pub async fn get_posts(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse> {
    let posts = app_state.posts_service.get_posts().await?;
    Ok((StatusCode::OK, Json(posts)))
}

/// Posts with a string field, or a string in an array field, containing `text`, ignoring case.
#[utoipa::path(
    get,
    path = "/posts/{text}",
    tag = "posts",
    params(("text" = String, Path, description = "Substring to look for")),
    responses(
        (status = 200, description = "Matching posts, empty when nothing matches", body = [Post]),
        (status = 500, description = "Store unavailable")
    )
)]
pub async fn search_posts(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(text): Path<String>,
) -> Result<impl IntoResponse> {
    let posts = app_state.posts_service.search_posts(&text).await?;
    Ok((StatusCode::OK, Json(posts)))
}

#[utoipa::path(
    post,
    path = "/post",
    tag = "posts",
    request_body(content = Post, description = "Any JSON object; `id` is optional"),
    responses(
        (status = 200, description = "The stored post with its id", body = Post),
        (status = 400, description = "Body is not a JSON object"),
        (status = 500, description = "Store unavailable")
    )
)]
pub async fn create_post(
    Extension(app_state): Extension<Arc<AppState>>,
    payload: core::result::Result<Json<NewPost>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(new_post) = payload?;

    let post = app_state.posts_service.create_post(new_post).await?;
    Ok((StatusCode::OK, Json(post)))
}
