use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "author")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub name: String,
    /// URL-safe unique handle, the public lookup key.
    #[sea_orm(unique)]
    pub slug: String,
    pub bio: String,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
    pub website: Option<String>,

    #[sea_orm(has_many)]
    pub posts: HasMany<super::blog_post::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
