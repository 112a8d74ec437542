use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::{error, instrument};

use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::contact::*;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/api/contact",
    tag = "Contact",
    operation_id = "submitContact",
    summary = "Submit a contact / quote request",
    description = "Stores the lead, then sends the operator notification and the customer confirmation in the background. Email failures never fail the submission.",
    request_body = CreateContactSubmissionRequest,
    responses(
        (status = 201, description = "Submission stored", body = ContactCreatedResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn submit_contact(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateContactSubmissionRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_contact(&payload)?;
    let submission = state.storage.create_contact_submission(payload).await?;

    // Fire and forget: the lead is already durable, and both sends audit
    // their own outcome in the email log.
    let email = state.email.clone();
    let for_notification = submission.clone();
    tokio::spawn(async move {
        if let Err(err) = email.send_contact_notification(&for_notification).await {
            error!(%err, "failed to record contact notification email");
        }
    });
    let email = state.email.clone();
    let for_confirmation = submission.clone();
    tokio::spawn(async move {
        if let Err(err) = email.send_confirmation_email(&for_confirmation).await {
            error!(%err, "failed to record confirmation email");
        }
    });

    Ok((
        StatusCode::CREATED,
        Json(ContactCreatedResponse {
            success: true,
            message: "Ďakujeme za vašu správu. Ozveme sa vám čoskoro.".into(),
            submission: submission.into(),
        }),
    ))
}
