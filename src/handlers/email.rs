//! Administrative email endpoints: the configuration singleton, the
//! template library, the delivery audit log, statistics, and a test send.
//! Everything here requires the administrator key.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::{instrument, warn};

use crate::email::EmailStats;
use crate::error::{AppError, ErrorBody};
use crate::extractors::admin::AdminKey;
use crate::extractors::json::AppJson;
use crate::models::email::*;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/admin/email/config",
    tag = "Email",
    operation_id = "getEmailConfig",
    summary = "Fetch the SMTP configuration",
    responses(
        (status = 200, description = "The configuration singleton", body = EmailConfigResponse),
        (status = 401, description = "Missing key (ADMIN_KEY_MISSING)", body = ErrorBody),
        (status = 403, description = "Wrong key (ADMIN_KEY_INVALID)", body = ErrorBody),
        (status = 404, description = "Not configured yet (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, _admin))]
pub async fn get_email_config(
    _admin: AdminKey,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let config = state
        .storage
        .email_config()
        .await?
        .ok_or_else(|| AppError::NotFound("Email configuration not found".into()))?;
    Ok(Json(EmailConfigResponse::from(config)))
}

#[utoipa::path(
    put,
    path = "/api/admin/email/config",
    tag = "Email",
    operation_id = "updateEmailConfig",
    summary = "Update the SMTP configuration",
    description = "Partial update; omitted fields keep their stored values. The mailer is re-initialized immediately so changes take effect without a restart.",
    request_body = UpdateEmailConfigRequest,
    responses(
        (status = 200, description = "The updated configuration", body = EmailConfigResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Missing key (ADMIN_KEY_MISSING)", body = ErrorBody),
        (status = 403, description = "Wrong key (ADMIN_KEY_INVALID)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, _admin, payload))]
pub async fn update_email_config(
    _admin: AdminKey,
    State(state): State<AppState>,
    AppJson(payload): AppJson<UpdateEmailConfigRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_update_email_config(&payload)?;
    let config = state.storage.update_email_config(payload).await?;
    if let Err(err) = state.email.initialize().await {
        warn!(%err, "mailer re-initialization after config update failed");
    }
    Ok(Json(EmailConfigResponse::from(config)))
}

#[utoipa::path(
    get,
    path = "/api/admin/email/templates",
    tag = "Email",
    operation_id = "listEmailTemplates",
    summary = "List all email templates",
    responses(
        (status = 200, description = "Templates ordered by key", body = [EmailTemplateResponse]),
        (status = 401, description = "Missing key (ADMIN_KEY_MISSING)", body = ErrorBody),
        (status = 403, description = "Wrong key (ADMIN_KEY_INVALID)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, _admin))]
pub async fn list_email_templates(
    _admin: AdminKey,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let templates = state.storage.all_email_templates().await?;
    let templates: Vec<EmailTemplateResponse> = templates.into_iter().map(Into::into).collect();
    Ok(Json(templates))
}

#[utoipa::path(
    post,
    path = "/api/admin/email/templates",
    tag = "Email",
    operation_id = "createEmailTemplate",
    summary = "Create an email template",
    request_body = CreateEmailTemplateRequest,
    responses(
        (status = 201, description = "Template created", body = EmailTemplateResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Missing key (ADMIN_KEY_MISSING)", body = ErrorBody),
        (status = 403, description = "Wrong key (ADMIN_KEY_INVALID)", body = ErrorBody),
        (status = 409, description = "Key already in use (CONFLICT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, _admin, payload), fields(key = %payload.key))]
pub async fn create_email_template(
    _admin: AdminKey,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateEmailTemplateRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_email_template(&payload)?;
    let template = state.storage.create_email_template(payload).await?;
    Ok((StatusCode::CREATED, Json(EmailTemplateResponse::from(template))))
}

#[utoipa::path(
    put,
    path = "/api/admin/email/templates/{id}",
    tag = "Email",
    operation_id = "updateEmailTemplate",
    summary = "Update an email template",
    params(("id" = String, Path, description = "Template id")),
    request_body = UpdateEmailTemplateRequest,
    responses(
        (status = 200, description = "The updated template", body = EmailTemplateResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Missing key (ADMIN_KEY_MISSING)", body = ErrorBody),
        (status = 403, description = "Wrong key (ADMIN_KEY_INVALID)", body = ErrorBody),
        (status = 404, description = "No such template (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, _admin, payload))]
pub async fn update_email_template(
    _admin: AdminKey,
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<UpdateEmailTemplateRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_update_email_template(&payload)?;
    let template = state
        .storage
        .update_email_template(&id, payload)
        .await?
        .ok_or_else(|| AppError::NotFound("Email template not found".into()))?;
    Ok(Json(EmailTemplateResponse::from(template)))
}

#[utoipa::path(
    delete,
    path = "/api/admin/email/templates/{id}",
    tag = "Email",
    operation_id = "deleteEmailTemplate",
    summary = "Delete an email template",
    params(("id" = String, Path, description = "Template id")),
    responses(
        (status = 200, description = "Template deleted", body = DeletedResponse),
        (status = 401, description = "Missing key (ADMIN_KEY_MISSING)", body = ErrorBody),
        (status = 403, description = "Wrong key (ADMIN_KEY_INVALID)", body = ErrorBody),
        (status = 404, description = "No such template (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, _admin))]
pub async fn delete_email_template(
    _admin: AdminKey,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    if !state.storage.delete_email_template(&id).await? {
        return Err(AppError::NotFound("Email template not found".into()));
    }
    Ok(Json(DeletedResponse { success: true }))
}

#[utoipa::path(
    get,
    path = "/api/admin/email/logs",
    tag = "Email",
    operation_id = "listEmailLogs",
    summary = "List the delivery audit log",
    responses(
        (status = 200, description = "Log entries, newest first", body = [EmailLogResponse]),
        (status = 401, description = "Missing key (ADMIN_KEY_MISSING)", body = ErrorBody),
        (status = 403, description = "Wrong key (ADMIN_KEY_INVALID)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, _admin))]
pub async fn list_email_logs(
    _admin: AdminKey,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let logs = state.storage.all_email_logs().await?;
    let logs: Vec<EmailLogResponse> = logs.into_iter().map(Into::into).collect();
    Ok(Json(logs))
}

#[utoipa::path(
    delete,
    path = "/api/admin/email/logs/{id}",
    tag = "Email",
    operation_id = "deleteEmailLog",
    summary = "Delete a log entry",
    params(("id" = String, Path, description = "Log entry id")),
    responses(
        (status = 200, description = "Entry deleted", body = DeletedResponse),
        (status = 401, description = "Missing key (ADMIN_KEY_MISSING)", body = ErrorBody),
        (status = 403, description = "Wrong key (ADMIN_KEY_INVALID)", body = ErrorBody),
        (status = 404, description = "No such entry (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, _admin))]
pub async fn delete_email_log(
    _admin: AdminKey,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    if !state.storage.delete_email_log(&id).await? {
        return Err(AppError::NotFound("Email log not found".into()));
    }
    Ok(Json(DeletedResponse { success: true }))
}

#[utoipa::path(
    get,
    path = "/api/admin/email/stats",
    tag = "Email",
    operation_id = "emailStats",
    summary = "Delivery statistics",
    responses(
        (status = 200, description = "Counters over the full audit log", body = EmailStats),
        (status = 401, description = "Missing key (ADMIN_KEY_MISSING)", body = ErrorBody),
        (status = 403, description = "Wrong key (ADMIN_KEY_INVALID)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, _admin))]
pub async fn email_stats(
    _admin: AdminKey,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let stats = state.email.get_stats().await?;
    Ok(Json(stats))
}

#[utoipa::path(
    post,
    path = "/api/admin/email/test",
    tag = "Email",
    operation_id = "testEmail",
    summary = "Send a test email",
    description = "Re-initializes the mailer from the stored configuration and sends a test message to the given address.",
    request_body = TestEmailRequest,
    responses(
        (status = 200, description = "Outcome of the attempt", body = TestEmailResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Missing key (ADMIN_KEY_MISSING)", body = ErrorBody),
        (status = 403, description = "Wrong key (ADMIN_KEY_INVALID)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, _admin, payload))]
pub async fn test_email(
    _admin: AdminKey,
    State(state): State<AppState>,
    AppJson(payload): AppJson<TestEmailRequest>,
) -> Result<impl IntoResponse, AppError> {
    crate::models::shared::validate_email(&payload.to_email, "Recipient")?;
    let (success, message) = state.email.test_email_config(&payload.to_email).await;
    Ok(Json(TestEmailResponse { success, message }))
}
