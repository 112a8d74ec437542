use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contact_submission")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub name: String,
    pub email: String,
    pub phone: String,
    /// Free-text apartment size as entered in the quote form.
    pub apartment_size: Option<String>,
    /// Free-text preferred moving date.
    pub move_date: Option<String>,
    pub message: String,

    pub submitted_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
