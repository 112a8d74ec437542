use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "email_template")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Stable identifier used by senders, independent of the display name.
    #[sea_orm(unique)]
    pub key: String,
    pub name: String,

    /// Handlebars sources: `{{field}}` placeholders plus `{{#if field}}`
    /// sections keyed on field presence.
    pub subject: String,
    pub html_content: String,
    pub text_content: String,

    pub is_default: bool,
    pub enabled: bool,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
