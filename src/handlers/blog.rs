use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::blog::*;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/blog/posts",
    tag = "Blog",
    operation_id = "listBlogPosts",
    summary = "List all blog posts, newest first",
    responses(
        (status = 200, description = "All posts ordered by publication date descending", body = [BlogPostResponse]),
    ),
)]
#[instrument(skip(state))]
pub async fn list_blog_posts(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let posts = state.storage.all_blog_posts().await?;
    let posts: Vec<BlogPostResponse> = posts.into_iter().map(Into::into).collect();
    Ok(Json(posts))
}

#[utoipa::path(
    get,
    path = "/api/blog/posts/{slug}",
    tag = "Blog",
    operation_id = "getBlogPost",
    summary = "Fetch a single post by slug",
    params(("slug" = String, Path, description = "Post slug")),
    responses(
        (status = 200, description = "The post", body = BlogPostResponse),
        (status = 404, description = "No post with this slug (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_blog_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let post = state
        .storage
        .blog_post_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound("Blog post not found".into()))?;
    Ok(Json(BlogPostResponse::from(post)))
}

#[utoipa::path(
    post,
    path = "/api/blog/posts",
    tag = "Blog",
    operation_id = "createBlogPost",
    summary = "Publish a new blog post",
    request_body = CreateBlogPostRequest,
    responses(
        (status = 201, description = "Post created", body = BlogPostResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 409, description = "Slug already in use (CONFLICT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(slug = %payload.slug))]
pub async fn create_blog_post(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateBlogPostRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_blog_post(&payload)?;
    let post = state.storage.create_blog_post(payload).await?;
    Ok((StatusCode::CREATED, Json(BlogPostResponse::from(post))))
}
