//! Relational backend over SeaORM.
//!
//! Writes always report their real outcome. Reads are different: when the
//! database is unreachable the public site should stay up, so failed reads
//! fall back to the deterministic sample set and raise the degraded flag.
//! The flag clears as soon as a read succeeds again.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder, Set, SqlErr,
};
use tracing::warn;

use super::{
    EmailLogUpdate, NewEmailLog, Storage, StorageError, apply_config_update, new_id, now, seed,
};
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

pub struct DatabaseStorage {
    db: DatabaseConnection,
    degraded: AtomicBool,
}

impl DatabaseStorage {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            degraded: AtomicBool::new(false),
        }
    }

    fn mark_healthy(&self) {
        self.degraded.store(false, Ordering::Relaxed);
    }

    /// Record a failed read and hand back the fallback value.
    fn degrade<T>(&self, operation: &'static str, err: &DbErr, fallback: T) -> T {
        warn!(%err, operation, "database read failed, serving fallback content");
        self.degraded.store(true, Ordering::Relaxed);
        fallback
    }

    fn map_insert_err(err: DbErr, what: &str) -> StorageError {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                StorageError::Conflict(format!("{what} already exists"))
            }
            _ => StorageError::Db(err),
        }
    }
}

#[async_trait]
impl Storage for DatabaseStorage {
    async fn all_blog_posts(&self) -> Result<Vec<blog_post::Model>, StorageError> {
        let result = blog_post::Entity::find()
            .order_by_desc(blog_post::Column::PublishedAt)
            .all(&self.db)
            .await;
        match result {
            Ok(posts) => {
                self.mark_healthy();
                Ok(posts)
            }
            Err(e) => {
                let mut fallback = seed::sample_blog_posts();
                fallback.sort_by(|a, b| b.published_at.cmp(&a.published_at));
                Ok(self.degrade("all_blog_posts", &e, fallback))
            }
        }
    }

    async fn blog_post_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<blog_post::Model>, StorageError> {
        let result = blog_post::Entity::find()
            .filter(blog_post::Column::Slug.eq(slug))
            .one(&self.db)
            .await;
        match result {
            Ok(post) => {
                self.mark_healthy();
                Ok(post)
            }
            Err(e) => {
                let fallback = seed::sample_blog_posts()
                    .into_iter()
                    .find(|p| p.slug == slug);
                Ok(self.degrade("blog_post_by_slug", &e, fallback))
            }
        }
    }

    async fn blog_post_by_id(&self, id: &str) -> Result<Option<blog_post::Model>, StorageError> {
        match blog_post::Entity::find_by_id(id).one(&self.db).await {
            Ok(post) => {
                self.mark_healthy();
                Ok(post)
            }
            Err(e) => {
                let fallback = seed::sample_blog_posts().into_iter().find(|p| p.id == id);
                Ok(self.degrade("blog_post_by_id", &e, fallback))
            }
        }
    }

    async fn create_blog_post(
        &self,
        post: CreateBlogPostRequest,
    ) -> Result<blog_post::Model, StorageError> {
        let author_name = match post.author_name.clone() {
            Some(name) => name,
            None => match post.author_id.as_deref() {
                Some(author_id) => author::Entity::find_by_id(author_id)
                    .one(&self.db)
                    .await?
                    .map(|a| a.name)
                    .unwrap_or_else(|| "VI&MO Team".to_string()),
                None => "VI&MO Team".to_string(),
            },
        };

        let reading_time = post.effective_reading_time();
        let model = blog_post::ActiveModel {
            id: Set(new_id()),
            slug: Set(post.slug),
            title: Set(post.title),
            excerpt: Set(post.excerpt),
            content: Set(post.content),
            category: Set(post.category),
            tags: Set(serde_json::to_value(&post.tags)?),
            featured_image: Set(post.featured_image),
            author_id: Set(post.author_id),
            author_name: Set(author_name),
            published_at: Set(now()),
            reading_time: Set(reading_time),
            meta_description: Set(post.meta_description),
            featured: Set(post.featured),
        };
        model
            .insert(&self.db)
            .await
            .map_err(|e| Self::map_insert_err(e, "a post with this slug"))
    }

    async fn all_authors(&self) -> Result<Vec<author::Model>, StorageError> {
        let result = author::Entity::find()
            .order_by_asc(author::Column::Name)
            .all(&self.db)
            .await;
        match result {
            Ok(authors) => {
                self.mark_healthy();
                Ok(authors)
            }
            Err(e) => Ok(self.degrade("all_authors", &e, seed::sample_authors())),
        }
    }

    async fn author_by_slug(&self, slug: &str) -> Result<Option<author::Model>, StorageError> {
        let result = author::Entity::find()
            .filter(author::Column::Slug.eq(slug))
            .one(&self.db)
            .await;
        match result {
            Ok(author) => {
                self.mark_healthy();
                Ok(author)
            }
            Err(e) => {
                let fallback = seed::sample_authors().into_iter().find(|a| a.slug == slug);
                Ok(self.degrade("author_by_slug", &e, fallback))
            }
        }
    }

    async fn create_author(
        &self,
        author: CreateAuthorRequest,
    ) -> Result<author::Model, StorageError> {
        let model = author::ActiveModel {
            id: Set(new_id()),
            name: Set(author.name),
            slug: Set(author.slug),
            bio: Set(author.bio),
            email: Set(author.email),
            avatar_url: Set(author.avatar_url),
            website: Set(author.website),
            created_at: Set(now()),
        };
        model
            .insert(&self.db)
            .await
            .map_err(|e| Self::map_insert_err(e, "an author with this slug"))
    }

    async fn comments_for_post(
        &self,
        post_id: &str,
        approved_only: bool,
    ) -> Result<Vec<comment::Model>, StorageError> {
        let mut query = comment::Entity::find().filter(comment::Column::PostId.eq(post_id));
        if approved_only {
            query = query.filter(comment::Column::Approved.eq(true));
        }
        let result = query
            .order_by_desc(comment::Column::CreatedAt)
            .all(&self.db)
            .await;
        match result {
            Ok(comments) => {
                self.mark_healthy();
                Ok(comments)
            }
            Err(e) => Ok(self.degrade("comments_for_post", &e, Vec::new())),
        }
    }

    async fn create_comment(
        &self,
        post_id: &str,
        comment: CreateCommentRequest,
    ) -> Result<comment::Model, StorageError> {
        let post = blog_post::Entity::find_by_id(post_id).one(&self.db).await?;
        if post.is_none() {
            return Err(StorageError::NotFound("blog post"));
        }

        let model = comment::ActiveModel {
            id: Set(new_id()),
            post_id: Set(post_id.to_string()),
            author_name: Set(comment.author_name),
            author_email: Set(comment.author_email),
            content: Set(comment.content),
            approved: Set(false),
            created_at: Set(now()),
        };
        Ok(model.insert(&self.db).await?)
    }

    async fn approve_comment(&self, id: &str) -> Result<Option<comment::Model>, StorageError> {
        let Some(existing) = comment::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        if existing.approved {
            return Ok(Some(existing));
        }

        let update = comment::ActiveModel {
            id: Set(existing.id.clone()),
            approved: Set(true),
            ..Default::default()
        };
        Ok(Some(update.update(&self.db).await?))
    }

    async fn create_contact_submission(
        &self,
        submission: CreateContactSubmissionRequest,
    ) -> Result<contact_submission::Model, StorageError> {
        let model = contact_submission::ActiveModel {
            id: Set(new_id()),
            name: Set(submission.name),
            email: Set(submission.email),
            phone: Set(submission.phone),
            apartment_size: Set(submission.apartment_size),
            move_date: Set(submission.move_date),
            message: Set(submission.message),
            submitted_at: Set(now()),
        };
        Ok(model.insert(&self.db).await?)
    }

    async fn email_config(&self) -> Result<Option<email_config::Model>, StorageError> {
        let result = email_config::Entity::find_by_id(email_config::SINGLETON_ID)
            .one(&self.db)
            .await;
        match result {
            Ok(config) => {
                self.mark_healthy();
                Ok(config)
            }
            Err(e) => Ok(self.degrade("email_config", &e, Some(seed::default_email_config()))),
        }
    }

    async fn update_email_config(
        &self,
        update: UpdateEmailConfigRequest,
    ) -> Result<email_config::Model, StorageError> {
        let existing = email_config::Entity::find_by_id(email_config::SINGLETON_ID)
            .one(&self.db)
            .await?;
        let mut config = existing
            .clone()
            .unwrap_or_else(seed::default_email_config);
        apply_config_update(&mut config, update);
        config.updated_at = now();

        let active = config.clone().into_active_model().reset_all();
        if existing.is_some() {
            active.update(&self.db).await?;
        } else {
            active.insert(&self.db).await?;
        }
        Ok(config)
    }

    async fn all_email_templates(&self) -> Result<Vec<email_template::Model>, StorageError> {
        let result = email_template::Entity::find()
            .order_by_asc(email_template::Column::Key)
            .all(&self.db)
            .await;
        match result {
            Ok(templates) => {
                self.mark_healthy();
                Ok(templates)
            }
            Err(e) => Ok(self.degrade("all_email_templates", &e, seed::default_email_templates())),
        }
    }

    async fn email_template_by_key(
        &self,
        key: &str,
    ) -> Result<Option<email_template::Model>, StorageError> {
        let result = email_template::Entity::find()
            .filter(email_template::Column::Key.eq(key))
            .one(&self.db)
            .await;
        match result {
            Ok(template) => {
                self.mark_healthy();
                Ok(template)
            }
            Err(e) => {
                let fallback = seed::default_email_templates()
                    .into_iter()
                    .find(|t| t.key == key);
                Ok(self.degrade("email_template_by_key", &e, fallback))
            }
        }
    }

    async fn create_email_template(
        &self,
        template: CreateEmailTemplateRequest,
    ) -> Result<email_template::Model, StorageError> {
        let created = now();
        let model = email_template::ActiveModel {
            id: Set(new_id()),
            key: Set(template.key),
            name: Set(template.name),
            subject: Set(template.subject),
            html_content: Set(template.html_content),
            text_content: Set(template.text_content),
            is_default: Set(template.is_default),
            enabled: Set(template.enabled),
            created_at: Set(created),
            updated_at: Set(created),
        };
        model
            .insert(&self.db)
            .await
            .map_err(|e| Self::map_insert_err(e, "a template with this key"))
    }

    async fn update_email_template(
        &self,
        id: &str,
        update: UpdateEmailTemplateRequest,
    ) -> Result<Option<email_template::Model>, StorageError> {
        let Some(existing) = email_template::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut active = email_template::ActiveModel {
            id: Set(existing.id),
            ..Default::default()
        };
        if let Some(name) = update.name {
            active.name = Set(name);
        }
        if let Some(subject) = update.subject {
            active.subject = Set(subject);
        }
        if let Some(html) = update.html_content {
            active.html_content = Set(html);
        }
        if let Some(text) = update.text_content {
            active.text_content = Set(text);
        }
        if let Some(is_default) = update.is_default {
            active.is_default = Set(is_default);
        }
        if let Some(enabled) = update.enabled {
            active.enabled = Set(enabled);
        }
        active.updated_at = Set(now());
        Ok(Some(active.update(&self.db).await?))
    }

    async fn delete_email_template(&self, id: &str) -> Result<bool, StorageError> {
        let result = email_template::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }

    async fn all_email_logs(&self) -> Result<Vec<email_log::Model>, StorageError> {
        let result = email_log::Entity::find()
            .order_by_desc(email_log::Column::CreatedAt)
            .all(&self.db)
            .await;
        match result {
            Ok(logs) => {
                self.mark_healthy();
                Ok(logs)
            }
            Err(e) => Ok(self.degrade("all_email_logs", &e, Vec::new())),
        }
    }

    async fn create_email_log(&self, log: NewEmailLog) -> Result<email_log::Model, StorageError> {
        let model = email_log::ActiveModel {
            id: Set(new_id()),
            template_key: Set(log.template_key),
            to_email: Set(log.to_email),
            subject: Set(log.subject),
            status: Set(email_log::STATUS_PENDING.to_string()),
            error: Set(None),
            sent_at: Set(None),
            created_at: Set(now()),
        };
        Ok(model.insert(&self.db).await?)
    }

    async fn update_email_log(
        &self,
        id: &str,
        update: EmailLogUpdate,
    ) -> Result<Option<email_log::Model>, StorageError> {
        let Some(existing) = email_log::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut active = email_log::ActiveModel {
            id: Set(existing.id),
            status: Set(update.status),
            error: Set(update.error),
            sent_at: Set(update.sent_at),
            ..Default::default()
        };
        if let Some(subject) = update.subject {
            active.subject = Set(subject);
        }
        Ok(Some(active.update(&self.db).await?))
    }

    async fn delete_email_log(&self, id: &str) -> Result<bool, StorageError> {
        let result = email_log::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }

    fn degraded(&self) -> bool {
        self.degraded.load(Ordering::Relaxed)
    }

    fn backend_name(&self) -> &'static str {
        "database"
    }
}
