use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::entity::blog_post;
use crate::error::{AppError, ErrorBody};
use crate::extractors::admin::AdminKey;
use crate::extractors::json::AppJson;
use crate::moderation;
use crate::models::comment::*;
use crate::state::AppState;

/// Comment routes accept either a post id or a post slug in the path, so
/// both the admin UI (ids) and the public site (slugs) can link here.
async fn resolve_post(state: &AppState, id_or_slug: &str) -> Result<blog_post::Model, AppError> {
    if let Some(post) = state.storage.blog_post_by_id(id_or_slug).await? {
        return Ok(post);
    }
    state
        .storage
        .blog_post_by_slug(id_or_slug)
        .await?
        .ok_or_else(|| AppError::NotFound("Blog post not found".into()))
}

#[utoipa::path(
    get,
    path = "/api/blog/posts/{slug}/comments",
    tag = "Comments",
    operation_id = "listComments",
    summary = "List comments on a post",
    description = "By default only approved comments are returned; pass `approved_only=false` to include pending ones.",
    params(
        ("slug" = String, Path, description = "Post id or slug"),
        CommentListQuery,
    ),
    responses(
        (status = 200, description = "Comments, newest first", body = [CommentResponse]),
        (status = 404, description = "No such post (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_comments(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<CommentListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let post = resolve_post(&state, &slug).await?;
    let approved_only = query.approved_only.unwrap_or(true);
    let comments = state
        .storage
        .comments_for_post(&post.id, approved_only)
        .await?;
    let comments: Vec<CommentResponse> = comments.into_iter().map(Into::into).collect();
    Ok(Json(comments))
}

#[utoipa::path(
    post,
    path = "/api/blog/posts/{slug}/comments",
    tag = "Comments",
    operation_id = "createComment",
    summary = "Submit a comment for moderation",
    description = "The comment always enters the queue unapproved, regardless of the payload.",
    params(("slug" = String, Path, description = "Post id or slug")),
    request_body = CreateCommentRequest,
    responses(
        (status = 201, description = "Comment stored and awaiting approval", body = CommentCreatedResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "No such post (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn create_comment(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    AppJson(payload): AppJson<CreateCommentRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_comment(&payload)?;
    let post = resolve_post(&state, &slug).await?;
    let comment = state.storage.create_comment(&post.id, payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(CommentCreatedResponse {
            success: true,
            message: "Váš komentár bol odoslaný a čaká na schválenie.".into(),
            comment: comment.into(),
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/comments/pending",
    tag = "Comments",
    operation_id = "listPendingComments",
    summary = "List the moderation queue",
    description = "Every unapproved comment across all posts, annotated with its post. Requires the administrator key.",
    responses(
        (status = 200, description = "Pending comments, longest-waiting first", body = [PendingCommentResponse]),
        (status = 401, description = "Missing key (ADMIN_KEY_MISSING)", body = ErrorBody),
        (status = 403, description = "Wrong key (ADMIN_KEY_INVALID)", body = ErrorBody),
        (status = 429, description = "Rate limited (RATE_LIMITED)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, _admin))]
pub async fn pending_comments(
    _admin: AdminKey,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let queue = moderation::pending_comments(state.storage.as_ref()).await?;
    Ok(Json(queue))
}

#[utoipa::path(
    patch,
    path = "/api/comments/{id}/approve",
    tag = "Comments",
    operation_id = "approveComment",
    summary = "Approve a pending comment",
    description = "Idempotent; approving an already-approved comment succeeds. Requires the administrator key.",
    params(("id" = String, Path, description = "Comment id")),
    responses(
        (status = 200, description = "The approved comment", body = CommentResponse),
        (status = 401, description = "Missing key (ADMIN_KEY_MISSING)", body = ErrorBody),
        (status = 403, description = "Wrong key (ADMIN_KEY_INVALID)", body = ErrorBody),
        (status = 404, description = "No such comment (NOT_FOUND)", body = ErrorBody),
        (status = 429, description = "Rate limited (RATE_LIMITED)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, _admin))]
pub async fn approve_comment(
    _admin: AdminKey,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let comment = state
        .storage
        .approve_comment(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Comment not found".into()))?;
    Ok(Json(CommentResponse::from(comment)))
}
