pub mod database;
pub mod memory;
pub mod seed;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::DbErr;

use crate::entity::{
    author, blog_post, comment, contact_submission, email_config, email_log, email_template,
};
use crate::models::author::CreateAuthorRequest;
use crate::models::blog::CreateBlogPostRequest;
use crate::models::comment::CreateCommentRequest;
use crate::models::contact::CreateContactSubmissionRequest;
use crate::models::email::{
    CreateEmailTemplateRequest, UpdateEmailConfigRequest, UpdateEmailTemplateRequest,
};

pub use database::DatabaseStorage;
pub use memory::MemoryStorage;

/// Error type shared by both storage backends.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error(transparent)]
    Db(#[from] DbErr),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    /// A referenced record does not exist (e.g. comment on a missing post).
    #[error("{0} not found")]
    NotFound(&'static str),
    /// A natural-key collision (duplicate slug or template key).
    #[error("{0}")]
    Conflict(String),
}

/// Insert-subset of an email log row; status starts as `pending`.
#[derive(Debug, Clone)]
pub struct NewEmailLog {
    pub template_key: String,
    pub to_email: String,
    pub subject: String,
}

/// Terminal-state update applied to an email log row at most once.
#[derive(Debug, Clone)]
pub struct EmailLogUpdate {
    /// `sent` or `failed`.
    pub status: String,
    /// Replacement subject once rendering has happened.
    pub subject: Option<String>,
    pub error: Option<String>,
    pub sent_at: Option<DateTime<Utc>>,
}

/// The single capability set every backend must satisfy.
///
/// Exactly two implementations exist: [`DatabaseStorage`] over the durable
/// relational store, and [`MemoryStorage`], the in-process fallback used
/// when no store is configured. The backend is selected once at startup;
/// call sites never branch on it.
#[async_trait]
pub trait Storage: Send + Sync {
    // Blog posts
    async fn all_blog_posts(&self) -> Result<Vec<blog_post::Model>, StorageError>;
    async fn blog_post_by_slug(&self, slug: &str)
    -> Result<Option<blog_post::Model>, StorageError>;
    async fn blog_post_by_id(&self, id: &str) -> Result<Option<blog_post::Model>, StorageError>;
    async fn create_blog_post(
        &self,
        post: CreateBlogPostRequest,
    ) -> Result<blog_post::Model, StorageError>;

    // Authors
    async fn all_authors(&self) -> Result<Vec<author::Model>, StorageError>;
    async fn author_by_slug(&self, slug: &str) -> Result<Option<author::Model>, StorageError>;
    async fn create_author(&self, author: CreateAuthorRequest)
    -> Result<author::Model, StorageError>;

    // Comments
    async fn comments_for_post(
        &self,
        post_id: &str,
        approved_only: bool,
    ) -> Result<Vec<comment::Model>, StorageError>;
    /// Creates the comment as unapproved; the caller's wishes on `approved`
    /// are not consulted. Fails with `NotFound` when the post is missing.
    async fn create_comment(
        &self,
        post_id: &str,
        comment: CreateCommentRequest,
    ) -> Result<comment::Model, StorageError>;
    /// Idempotent: an already-approved comment is returned unchanged.
    async fn approve_comment(&self, id: &str) -> Result<Option<comment::Model>, StorageError>;

    // Contact submissions
    async fn create_contact_submission(
        &self,
        submission: CreateContactSubmissionRequest,
    ) -> Result<contact_submission::Model, StorageError>;

    // Email configuration (singleton)
    async fn email_config(&self) -> Result<Option<email_config::Model>, StorageError>;
    async fn update_email_config(
        &self,
        update: UpdateEmailConfigRequest,
    ) -> Result<email_config::Model, StorageError>;

    // Email templates
    async fn all_email_templates(&self) -> Result<Vec<email_template::Model>, StorageError>;
    async fn email_template_by_key(
        &self,
        key: &str,
    ) -> Result<Option<email_template::Model>, StorageError>;
    async fn create_email_template(
        &self,
        template: CreateEmailTemplateRequest,
    ) -> Result<email_template::Model, StorageError>;
    async fn update_email_template(
        &self,
        id: &str,
        update: UpdateEmailTemplateRequest,
    ) -> Result<Option<email_template::Model>, StorageError>;
    async fn delete_email_template(&self, id: &str) -> Result<bool, StorageError>;

    // Email logs
    async fn all_email_logs(&self) -> Result<Vec<email_log::Model>, StorageError>;
    async fn create_email_log(&self, log: NewEmailLog) -> Result<email_log::Model, StorageError>;
    async fn update_email_log(
        &self,
        id: &str,
        update: EmailLogUpdate,
    ) -> Result<Option<email_log::Model>, StorageError>;
    async fn delete_email_log(&self, id: &str) -> Result<bool, StorageError>;

    /// True while the last read against the durable store failed and reads
    /// are being served from the deterministic fallback set.
    fn degraded(&self) -> bool;

    /// Short backend identifier for the health endpoint.
    fn backend_name(&self) -> &'static str;
}

/// Merge a partial configuration update into the stored singleton.
pub(crate) fn apply_config_update(
    config: &mut email_config::Model,
    update: UpdateEmailConfigRequest,
) {
    if let Some(host) = update.smtp_host {
        config.smtp_host = host;
    }
    if let Some(port) = update.smtp_port {
        config.smtp_port = port;
    }
    if let Some(user) = update.smtp_user {
        config.smtp_user = user;
    }
    if let Some(password) = update.smtp_password {
        config.smtp_password = password;
    }
    if let Some(from_name) = update.from_name {
        config.from_name = from_name;
    }
    if let Some(from_email) = update.from_email {
        config.from_email = from_email;
    }
    if let Some(reply_to) = update.reply_to {
        config.reply_to = reply_to;
    }
    // Outer None means "leave alone"; inner None clears the field.
    if let Some(bcc) = update.bcc {
        config.bcc = bcc;
    }
    if let Some(enabled) = update.enabled {
        config.enabled = enabled;
    }
}

/// Fresh v4 UUID string; ids are opaque unique strings everywhere.
pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

pub(crate) fn now() -> DateTime<Utc> {
    Utc::now()
}
