use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Fixed primary key of the singleton configuration row.
pub const SINGLETON_ID: &str = "email-config";

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "email_config")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub smtp_host: String,
    pub smtp_port: i32,
    pub smtp_user: String,
    pub smtp_password: String,

    pub from_name: String,
    pub from_email: String,
    pub reply_to: String,
    pub bcc: Option<String>,

    /// Master switch; when false every send attempt fails fast.
    pub enabled: bool,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
