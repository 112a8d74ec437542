//! In-memory fallback backend.
//!
//! Used when no database URL is configured, and by the test suite. All
//! collections live in a single serialized arena behind one lock, so every
//! operation is atomic with respect to every other. Records are held as
//! JSON with RFC 3339 timestamps, the same shape they would have at rest.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockWriteGuard};

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::{EmailLogUpdate, NewEmailLog, Storage, StorageError, apply_config_update, new_id, now};
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
use crate::storage::seed;

const AUTHORS: &str = "authors";
const BLOG_POSTS: &str = "blog_posts";
const COMMENTS: &str = "comments";
const CONTACT_SUBMISSIONS: &str = "contact_submissions";
const EMAIL_CONFIG: &str = "email_config";
const EMAIL_TEMPLATES: &str = "email_templates";
const EMAIL_LOGS: &str = "email_logs";
/// Marker key set once the sample content has been written.
const SEEDED: &str = "__seeded";

type Arena = HashMap<&'static str, String>;

pub struct MemoryStorage {
    arena: RwLock<Arena>,
}

fn read_all<T: DeserializeOwned>(arena: &Arena, key: &'static str) -> Result<Vec<T>, StorageError> {
    match arena.get(key) {
        Some(raw) => Ok(serde_json::from_str(raw)?),
        None => Ok(Vec::new()),
    }
}

fn write_all<T: Serialize>(
    arena: &mut Arena,
    key: &'static str,
    items: &[T],
) -> Result<(), StorageError> {
    arena.insert(key, serde_json::to_string(items)?);
    Ok(())
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            arena: RwLock::new(HashMap::new()),
        }
    }

    /// Every operation takes the write lock, even pure reads: the first
    /// access has to seed, and a single lock keeps read-modify-write
    /// sequences atomic.
    fn lock(&self) -> Result<RwLockWriteGuard<'_, Arena>, StorageError> {
        let mut arena = self.arena.write().unwrap();
        if !arena.contains_key(SEEDED) {
            write_all(&mut arena, AUTHORS, &seed::sample_authors())?;
            write_all(&mut arena, BLOG_POSTS, &seed::sample_blog_posts())?;
            write_all(&mut arena, COMMENTS, &Vec::<comment::Model>::new())?;
            write_all(
                &mut arena,
                CONTACT_SUBMISSIONS,
                &Vec::<contact_submission::Model>::new(),
            )?;
            write_all(&mut arena, EMAIL_CONFIG, &[seed::default_email_config()])?;
            write_all(&mut arena, EMAIL_TEMPLATES, &seed::default_email_templates())?;
            write_all(&mut arena, EMAIL_LOGS, &Vec::<email_log::Model>::new())?;
            arena.insert(SEEDED, String::new());
        }
        Ok(arena)
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn all_blog_posts(&self) -> Result<Vec<blog_post::Model>, StorageError> {
        let arena = self.lock()?;
        let mut posts: Vec<blog_post::Model> = read_all(&arena, BLOG_POSTS)?;
        posts.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        Ok(posts)
    }

    async fn blog_post_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<blog_post::Model>, StorageError> {
        let arena = self.lock()?;
        let posts: Vec<blog_post::Model> = read_all(&arena, BLOG_POSTS)?;
        Ok(posts.into_iter().find(|p| p.slug == slug))
    }

    async fn blog_post_by_id(&self, id: &str) -> Result<Option<blog_post::Model>, StorageError> {
        let arena = self.lock()?;
        let posts: Vec<blog_post::Model> = read_all(&arena, BLOG_POSTS)?;
        Ok(posts.into_iter().find(|p| p.id == id))
    }

    async fn create_blog_post(
        &self,
        post: CreateBlogPostRequest,
    ) -> Result<blog_post::Model, StorageError> {
        let mut arena = self.lock()?;
        let mut posts: Vec<blog_post::Model> = read_all(&arena, BLOG_POSTS)?;
        if posts.iter().any(|p| p.slug == post.slug) {
            return Err(StorageError::Conflict(format!(
                "A post with slug '{}' already exists",
                post.slug
            )));
        }

        let author_name = match post.author_name.clone() {
            Some(name) => name,
            None => {
                let authors: Vec<author::Model> = read_all(&arena, AUTHORS)?;
                post.author_id
                    .as_deref()
                    .and_then(|id| authors.iter().find(|a| a.id == id))
                    .map(|a| a.name.clone())
                    .unwrap_or_else(|| "VI&MO Team".to_string())
            }
        };

        let reading_time = post.effective_reading_time();
        let model = blog_post::Model {
            id: new_id(),
            slug: post.slug,
            title: post.title,
            excerpt: post.excerpt,
            content: post.content,
            category: post.category,
            tags: serde_json::to_value(&post.tags)?,
            featured_image: post.featured_image,
            author_id: post.author_id,
            author_name,
            published_at: now(),
            reading_time,
            meta_description: post.meta_description,
            featured: post.featured,
        };
        posts.push(model.clone());
        write_all(&mut arena, BLOG_POSTS, &posts)?;
        Ok(model)
    }

    async fn all_authors(&self) -> Result<Vec<author::Model>, StorageError> {
        let arena = self.lock()?;
        let mut authors: Vec<author::Model> = read_all(&arena, AUTHORS)?;
        authors.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(authors)
    }

    async fn author_by_slug(&self, slug: &str) -> Result<Option<author::Model>, StorageError> {
        let arena = self.lock()?;
        let authors: Vec<author::Model> = read_all(&arena, AUTHORS)?;
        Ok(authors.into_iter().find(|a| a.slug == slug))
    }

    async fn create_author(
        &self,
        author: CreateAuthorRequest,
    ) -> Result<author::Model, StorageError> {
        let mut arena = self.lock()?;
        let mut authors: Vec<author::Model> = read_all(&arena, AUTHORS)?;
        if authors.iter().any(|a| a.slug == author.slug) {
            return Err(StorageError::Conflict(format!(
                "An author with slug '{}' already exists",
                author.slug
            )));
        }
        let model = author::Model {
            id: new_id(),
            name: author.name,
            slug: author.slug,
            bio: author.bio,
            email: author.email,
            avatar_url: author.avatar_url,
            website: author.website,
            created_at: now(),
        };
        authors.push(model.clone());
        write_all(&mut arena, AUTHORS, &authors)?;
        Ok(model)
    }

    async fn comments_for_post(
        &self,
        post_id: &str,
        approved_only: bool,
    ) -> Result<Vec<comment::Model>, StorageError> {
        let arena = self.lock()?;
        let comments: Vec<comment::Model> = read_all(&arena, COMMENTS)?;
        let mut matching: Vec<comment::Model> = comments
            .into_iter()
            .filter(|c| c.post_id == post_id && (!approved_only || c.approved))
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matching)
    }

    async fn create_comment(
        &self,
        post_id: &str,
        comment: CreateCommentRequest,
    ) -> Result<comment::Model, StorageError> {
        let mut arena = self.lock()?;
        let posts: Vec<blog_post::Model> = read_all(&arena, BLOG_POSTS)?;
        if !posts.iter().any(|p| p.id == post_id) {
            return Err(StorageError::NotFound("blog post"));
        }
        let mut comments: Vec<comment::Model> = read_all(&arena, COMMENTS)?;
        let model = comment::Model {
            id: new_id(),
            post_id: post_id.to_string(),
            author_name: comment.author_name,
            author_email: comment.author_email,
            content: comment.content,
            approved: false,
            created_at: now(),
        };
        comments.push(model.clone());
        write_all(&mut arena, COMMENTS, &comments)?;
        Ok(model)
    }

    async fn approve_comment(&self, id: &str) -> Result<Option<comment::Model>, StorageError> {
        let mut arena = self.lock()?;
        let mut comments: Vec<comment::Model> = read_all(&arena, COMMENTS)?;
        let Some(entry) = comments.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        entry.approved = true;
        let approved = entry.clone();
        write_all(&mut arena, COMMENTS, &comments)?;
        Ok(Some(approved))
    }

    async fn create_contact_submission(
        &self,
        submission: CreateContactSubmissionRequest,
    ) -> Result<contact_submission::Model, StorageError> {
        let mut arena = self.lock()?;
        let mut submissions: Vec<contact_submission::Model> =
            read_all(&arena, CONTACT_SUBMISSIONS)?;
        let model = contact_submission::Model {
            id: new_id(),
            name: submission.name,
            email: submission.email,
            phone: submission.phone,
            apartment_size: submission.apartment_size,
            move_date: submission.move_date,
            message: submission.message,
            submitted_at: now(),
        };
        submissions.push(model.clone());
        write_all(&mut arena, CONTACT_SUBMISSIONS, &submissions)?;
        Ok(model)
    }

    async fn email_config(&self) -> Result<Option<email_config::Model>, StorageError> {
        let arena = self.lock()?;
        let configs: Vec<email_config::Model> = read_all(&arena, EMAIL_CONFIG)?;
        Ok(configs.into_iter().next())
    }

    async fn update_email_config(
        &self,
        update: UpdateEmailConfigRequest,
    ) -> Result<email_config::Model, StorageError> {
        let mut arena = self.lock()?;
        let configs: Vec<email_config::Model> = read_all(&arena, EMAIL_CONFIG)?;
        let mut config = configs
            .into_iter()
            .next()
            .unwrap_or_else(seed::default_email_config);

        apply_config_update(&mut config, update);
        config.updated_at = now();
        write_all(&mut arena, EMAIL_CONFIG, std::slice::from_ref(&config))?;
        Ok(config)
    }

    async fn all_email_templates(&self) -> Result<Vec<email_template::Model>, StorageError> {
        let arena = self.lock()?;
        let mut templates: Vec<email_template::Model> = read_all(&arena, EMAIL_TEMPLATES)?;
        templates.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(templates)
    }

    async fn email_template_by_key(
        &self,
        key: &str,
    ) -> Result<Option<email_template::Model>, StorageError> {
        let arena = self.lock()?;
        let templates: Vec<email_template::Model> = read_all(&arena, EMAIL_TEMPLATES)?;
        Ok(templates.into_iter().find(|t| t.key == key))
    }

    async fn create_email_template(
        &self,
        template: CreateEmailTemplateRequest,
    ) -> Result<email_template::Model, StorageError> {
        let mut arena = self.lock()?;
        let mut templates: Vec<email_template::Model> = read_all(&arena, EMAIL_TEMPLATES)?;
        if templates.iter().any(|t| t.key == template.key) {
            return Err(StorageError::Conflict(format!(
                "A template with key '{}' already exists",
                template.key
            )));
        }
        let created = now();
        let model = email_template::Model {
            id: new_id(),
            key: template.key,
            name: template.name,
            subject: template.subject,
            html_content: template.html_content,
            text_content: template.text_content,
            is_default: template.is_default,
            enabled: template.enabled,
            created_at: created,
            updated_at: created,
        };
        templates.push(model.clone());
        write_all(&mut arena, EMAIL_TEMPLATES, &templates)?;
        Ok(model)
    }

    async fn update_email_template(
        &self,
        id: &str,
        update: UpdateEmailTemplateRequest,
    ) -> Result<Option<email_template::Model>, StorageError> {
        let mut arena = self.lock()?;
        let mut templates: Vec<email_template::Model> = read_all(&arena, EMAIL_TEMPLATES)?;
        let Some(entry) = templates.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };
        if let Some(name) = update.name {
            entry.name = name;
        }
        if let Some(subject) = update.subject {
            entry.subject = subject;
        }
        if let Some(html) = update.html_content {
            entry.html_content = html;
        }
        if let Some(text) = update.text_content {
            entry.text_content = text;
        }
        if let Some(is_default) = update.is_default {
            entry.is_default = is_default;
        }
        if let Some(enabled) = update.enabled {
            entry.enabled = enabled;
        }
        entry.updated_at = now();
        let updated = entry.clone();
        write_all(&mut arena, EMAIL_TEMPLATES, &templates)?;
        Ok(Some(updated))
    }

    async fn delete_email_template(&self, id: &str) -> Result<bool, StorageError> {
        let mut arena = self.lock()?;
        let mut templates: Vec<email_template::Model> = read_all(&arena, EMAIL_TEMPLATES)?;
        let before = templates.len();
        templates.retain(|t| t.id != id);
        let removed = templates.len() != before;
        if removed {
            write_all(&mut arena, EMAIL_TEMPLATES, &templates)?;
        }
        Ok(removed)
    }

    async fn all_email_logs(&self) -> Result<Vec<email_log::Model>, StorageError> {
        let arena = self.lock()?;
        let mut logs: Vec<email_log::Model> = read_all(&arena, EMAIL_LOGS)?;
        logs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(logs)
    }

    async fn create_email_log(&self, log: NewEmailLog) -> Result<email_log::Model, StorageError> {
        let mut arena = self.lock()?;
        let mut logs: Vec<email_log::Model> = read_all(&arena, EMAIL_LOGS)?;
        let model = email_log::Model {
            id: new_id(),
            template_key: log.template_key,
            to_email: log.to_email,
            subject: log.subject,
            status: email_log::STATUS_PENDING.to_string(),
            error: None,
            sent_at: None,
            created_at: now(),
        };
        logs.push(model.clone());
        write_all(&mut arena, EMAIL_LOGS, &logs)?;
        Ok(model)
    }

    async fn update_email_log(
        &self,
        id: &str,
        update: EmailLogUpdate,
    ) -> Result<Option<email_log::Model>, StorageError> {
        let mut arena = self.lock()?;
        let mut logs: Vec<email_log::Model> = read_all(&arena, EMAIL_LOGS)?;
        let Some(entry) = logs.iter_mut().find(|l| l.id == id) else {
            return Ok(None);
        };
        entry.status = update.status;
        if let Some(subject) = update.subject {
            entry.subject = subject;
        }
        entry.error = update.error;
        entry.sent_at = update.sent_at;
        let updated = entry.clone();
        write_all(&mut arena, EMAIL_LOGS, &logs)?;
        Ok(Some(updated))
    }

    async fn delete_email_log(&self, id: &str) -> Result<bool, StorageError> {
        let mut arena = self.lock()?;
        let mut logs: Vec<email_log::Model> = read_all(&arena, EMAIL_LOGS)?;
        let before = logs.len();
        logs.retain(|l| l.id != id);
        let removed = logs.len() != before;
        if removed {
            write_all(&mut arena, EMAIL_LOGS, &logs)?;
        }
        Ok(removed)
    }

    fn degraded(&self) -> bool {
        false
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
