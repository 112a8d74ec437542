use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "blog_post")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// The sole public lookup key; unique across all posts.
    #[sea_orm(unique)]
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub content: String, // in Markdown
    pub category: String,

    /// Ordered JSON array of tag strings; duplicates allowed.
    #[sea_orm(column_type = "JsonBinary")]
    pub tags: serde_json::Value,

    pub featured_image: Option<String>,

    /// NULL when the post only carries a denormalized author name.
    pub author_id: Option<String>,
    #[sea_orm(belongs_to, from = "author_id", to = "id")]
    pub author: Option<super::author::Entity>,
    pub author_name: String,

    #[sea_orm(has_many)]
    pub comments: HasMany<super::comment::Entity>,

    /// Sort key for every listing (descending).
    pub published_at: DateTimeUtc,
    /// Estimated reading time in minutes.
    pub reading_time: i32,
    pub meta_description: Option<String>,
    /// Ordinal featured flag; 0 = not featured.
    pub featured: i32,
}

impl ActiveModelBehavior for ActiveModel {}
