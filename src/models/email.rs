use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::shared::{double_option, validate_email, validate_slug, validate_text};

/// Update payload for the singleton email configuration. Provided fields
/// replace the stored values; omitted fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
pub struct UpdateEmailConfigRequest {
    pub smtp_host: Option<String>,
    pub smtp_port: Option<i32>,
    pub smtp_user: Option<String>,
    pub smtp_password: Option<String>,
    pub from_name: Option<String>,
    pub from_email: Option<String>,
    pub reply_to: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub bcc: Option<Option<String>>,
    pub enabled: Option<bool>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct EmailConfigResponse {
    pub id: String,
    pub smtp_host: String,
    pub smtp_port: i32,
    pub smtp_user: String,
    pub smtp_password: String,
    pub from_name: String,
    pub from_email: String,
    pub reply_to: String,
    pub bcc: Option<String>,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct CreateEmailTemplateRequest {
    /// Stable lookup key used by senders (e.g. `contact`, `confirmation`).
    pub key: String,
    pub name: String,
    pub subject: String,
    pub html_content: String,
    pub text_content: String,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
pub struct UpdateEmailTemplateRequest {
    pub name: Option<String>,
    pub subject: Option<String>,
    pub html_content: Option<String>,
    pub text_content: Option<String>,
    pub is_default: Option<bool>,
    pub enabled: Option<bool>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct EmailTemplateResponse {
    pub id: String,
    pub key: String,
    pub name: String,
    pub subject: String,
    pub html_content: String,
    pub text_content: String,
    pub is_default: bool,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct EmailLogResponse {
    pub id: String,
    pub template_key: String,
    pub to_email: String,
    pub subject: String,
    pub status: String,
    pub error: Option<String>,
    pub sent_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct DeletedResponse {
    pub success: bool,
}

#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct TestEmailRequest {
    pub to_email: String,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct TestEmailResponse {
    pub success: bool,
    pub message: String,
}

impl From<crate::entity::email_config::Model> for EmailConfigResponse {
    fn from(m: crate::entity::email_config::Model) -> Self {
        Self {
            id: m.id,
            smtp_host: m.smtp_host,
            smtp_port: m.smtp_port,
            smtp_user: m.smtp_user,
            smtp_password: m.smtp_password,
            from_name: m.from_name,
            from_email: m.from_email,
            reply_to: m.reply_to,
            bcc: m.bcc,
            enabled: m.enabled,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

impl From<crate::entity::email_template::Model> for EmailTemplateResponse {
    fn from(m: crate::entity::email_template::Model) -> Self {
        Self {
            id: m.id,
            key: m.key,
            name: m.name,
            subject: m.subject,
            html_content: m.html_content,
            text_content: m.text_content,
            is_default: m.is_default,
            enabled: m.enabled,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

impl From<crate::entity::email_log::Model> for EmailLogResponse {
    fn from(m: crate::entity::email_log::Model) -> Self {
        Self {
            id: m.id,
            template_key: m.template_key,
            to_email: m.to_email,
            subject: m.subject,
            status: m.status,
            error: m.error,
            sent_at: m.sent_at,
            created_at: m.created_at,
        }
    }
}

pub fn validate_update_email_config(req: &UpdateEmailConfigRequest) -> Result<(), AppError> {
    if let Some(port) = req.smtp_port
        && !(1..=65535).contains(&port)
    {
        return Err(AppError::Validation("SMTP port must be 1-65535".into()));
    }
    if let Some(ref from_email) = req.from_email {
        validate_email(from_email, "From email")?;
    }
    if let Some(ref reply_to) = req.reply_to {
        validate_email(reply_to, "Reply-to email")?;
    }
    if let Some(Some(ref bcc)) = req.bcc {
        validate_email(bcc, "Bcc email")?;
    }
    Ok(())
}

pub fn validate_create_email_template(req: &CreateEmailTemplateRequest) -> Result<(), AppError> {
    validate_slug(&req.key)?;
    validate_text(&req.name, "Name", 256)?;
    validate_text(&req.subject, "Subject", 1024)?;
    validate_text(&req.html_content, "HTML content", 262_144)?;
    validate_text(&req.text_content, "Text content", 262_144)?;
    Ok(())
}

pub fn validate_update_email_template(req: &UpdateEmailTemplateRequest) -> Result<(), AppError> {
    if let Some(ref name) = req.name {
        validate_text(name, "Name", 256)?;
    }
    if let Some(ref subject) = req.subject {
        validate_text(subject, "Subject", 1024)?;
    }
    if let Some(ref html) = req.html_content {
        validate_text(html, "HTML content", 262_144)?;
    }
    if let Some(ref text) = req.text_content {
        validate_text(text, "Text content", 262_144)?;
    }
    Ok(())
}
