use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_SENT: &str = "sent";
pub const STATUS_FAILED: &str = "failed";

/// One row per delivery attempt, created before the attempt and updated at
/// most once to its terminal state.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "email_log")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub template_key: String,
    pub to_email: String,
    /// Rendered subject; updated once rendering has happened.
    pub subject: String,

    /// One of: `pending`, `sent`, `failed`.
    pub status: String,
    pub error: Option<String>,
    /// Set only when the attempt succeeded.
    pub sent_at: Option<DateTimeUtc>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
