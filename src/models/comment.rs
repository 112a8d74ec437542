use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::shared::{validate_email, validate_text};

/// Insert-subset of a comment. Deliberately has no `approved` field: a
/// comment always enters moderation as pending, whatever the caller sends.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct CreateCommentRequest {
    pub author_name: String,
    pub author_email: String,
    pub content: String,
}

#[derive(Deserialize, utoipa::IntoParams)]
pub struct CommentListQuery {
    /// When false, unapproved comments are included. Defaults to true.
    pub approved_only: Option<bool>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct CommentResponse {
    pub id: String,
    pub post_id: String,
    pub author_name: String,
    pub author_email: String,
    pub content: String,
    pub approved: bool,
    pub created_at: DateTime<Utc>,
}

/// Response for a newly submitted comment, mirroring the public site's
/// "awaiting approval" acknowledgement.
#[derive(Serialize, utoipa::ToSchema)]
pub struct CommentCreatedResponse {
    pub success: bool,
    pub message: String,
    pub comment: CommentResponse,
}

/// Moderation-queue entry: a pending comment annotated with its parent
/// post's title and slug so a moderator needs no second lookup.
#[derive(Serialize, utoipa::ToSchema)]
pub struct PendingCommentResponse {
    pub id: String,
    pub post_id: String,
    pub author_name: String,
    pub author_email: String,
    pub content: String,
    pub approved: bool,
    pub created_at: DateTime<Utc>,
    pub post_title: String,
    pub post_slug: String,
}

impl From<crate::entity::comment::Model> for CommentResponse {
    fn from(m: crate::entity::comment::Model) -> Self {
        Self {
            id: m.id,
            post_id: m.post_id,
            author_name: m.author_name,
            author_email: m.author_email,
            content: m.content,
            approved: m.approved,
            created_at: m.created_at,
        }
    }
}

pub fn validate_create_comment(req: &CreateCommentRequest) -> Result<(), AppError> {
    validate_text(&req.author_name, "Name", 256)?;
    validate_email(&req.author_email, "Email")?;
    validate_text(&req.content, "Comment", 8192)?;
    Ok(())
}
