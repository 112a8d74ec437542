use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::shared::{validate_email, validate_text};

#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct CreateContactSubmissionRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub apartment_size: Option<String>,
    pub move_date: Option<String>,
    pub message: String,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ContactSubmissionResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub apartment_size: Option<String>,
    pub move_date: Option<String>,
    pub message: String,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ContactCreatedResponse {
    pub success: bool,
    pub message: String,
    pub submission: ContactSubmissionResponse,
}

impl From<crate::entity::contact_submission::Model> for ContactSubmissionResponse {
    fn from(m: crate::entity::contact_submission::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            email: m.email,
            phone: m.phone,
            apartment_size: m.apartment_size,
            move_date: m.move_date,
            message: m.message,
            submitted_at: m.submitted_at,
        }
    }
}

pub fn validate_create_contact(req: &CreateContactSubmissionRequest) -> Result<(), AppError> {
    validate_text(&req.name, "Name", 256)?;
    validate_email(&req.email, "Email")?;
    validate_text(&req.phone, "Phone", 64)?;
    validate_text(&req.message, "Message", 16384)?;
    Ok(())
}
