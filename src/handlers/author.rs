use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::author::*;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/authors",
    tag = "Authors",
    operation_id = "listAuthors",
    summary = "List all authors",
    responses(
        (status = 200, description = "All authors", body = [AuthorResponse]),
    ),
)]
#[instrument(skip(state))]
pub async fn list_authors(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let authors = state.storage.all_authors().await?;
    let authors: Vec<AuthorResponse> = authors.into_iter().map(Into::into).collect();
    Ok(Json(authors))
}

#[utoipa::path(
    get,
    path = "/api/authors/{slug}",
    tag = "Authors",
    operation_id = "getAuthor",
    summary = "Fetch a single author by slug",
    params(("slug" = String, Path, description = "Author slug")),
    responses(
        (status = 200, description = "The author", body = AuthorResponse),
        (status = 404, description = "No author with this slug (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_author(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let author = state
        .storage
        .author_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound("Author not found".into()))?;
    Ok(Json(AuthorResponse::from(author)))
}

#[utoipa::path(
    post,
    path = "/api/authors",
    tag = "Authors",
    operation_id = "createAuthor",
    summary = "Create a new author",
    request_body = CreateAuthorRequest,
    responses(
        (status = 201, description = "Author created", body = AuthorResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 409, description = "Slug already in use (CONFLICT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(slug = %payload.slug))]
pub async fn create_author(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateAuthorRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_author(&payload)?;
    let author = state.storage.create_author(payload).await?;
    Ok((StatusCode::CREATED, Json(AuthorResponse::from(author))))
}
