use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::shared::{validate_email, validate_slug, validate_text};

#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct CreateAuthorRequest {
    pub name: String,
    pub slug: String,
    pub bio: String,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
    pub website: Option<String>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct AuthorResponse {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub bio: String,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
    pub website: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<crate::entity::author::Model> for AuthorResponse {
    fn from(m: crate::entity::author::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            slug: m.slug,
            bio: m.bio,
            email: m.email,
            avatar_url: m.avatar_url,
            website: m.website,
            created_at: m.created_at,
        }
    }
}

pub fn validate_create_author(req: &CreateAuthorRequest) -> Result<(), AppError> {
    validate_text(&req.name, "Name", 256)?;
    validate_slug(&req.slug)?;
    validate_text(&req.bio, "Bio", 4096)?;
    if let Some(ref email) = req.email {
        validate_email(email, "Email")?;
    }
    Ok(())
}
