use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::shared::{validate_slug, validate_text};

/// Words per minute used when the caller does not supply a reading time.
const READING_WORDS_PER_MINUTE: usize = 200;

/// Insert-subset of a blog post: no id, no server-assigned timestamp.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct CreateBlogPostRequest {
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    /// Full post body in Markdown.
    pub content: String,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub featured_image: Option<String>,
    /// Optional link to an Author record.
    pub author_id: Option<String>,
    /// Denormalized byline; defaults to the site team name.
    pub author_name: Option<String>,
    /// Reading time in minutes; estimated from the content when omitted.
    pub reading_time: Option<i32>,
    pub meta_description: Option<String>,
    /// Featured ordinal, 0 = not featured.
    #[serde(default)]
    pub featured: i32,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct BlogPostResponse {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub category: String,
    pub tags: Vec<String>,
    pub featured_image: Option<String>,
    pub author_id: Option<String>,
    pub author_name: String,
    pub published_at: DateTime<Utc>,
    pub reading_time: i32,
    pub meta_description: Option<String>,
    pub featured: i32,
}

impl From<crate::entity::blog_post::Model> for BlogPostResponse {
    fn from(m: crate::entity::blog_post::Model) -> Self {
        let tags = serde_json::from_value(m.tags).unwrap_or_default();
        Self {
            id: m.id,
            slug: m.slug,
            title: m.title,
            excerpt: m.excerpt,
            content: m.content,
            category: m.category,
            tags,
            featured_image: m.featured_image,
            author_id: m.author_id,
            author_name: m.author_name,
            published_at: m.published_at,
            reading_time: m.reading_time,
            meta_description: m.meta_description,
            featured: m.featured,
        }
    }
}

impl CreateBlogPostRequest {
    /// Reading time in minutes: supplied value, or a word-count estimate.
    pub fn effective_reading_time(&self) -> i32 {
        match self.reading_time {
            Some(minutes) => minutes,
            None => {
                let words = self.content.split_whitespace().count();
                (words.div_ceil(READING_WORDS_PER_MINUTE)).max(1) as i32
            }
        }
    }
}

pub fn validate_create_blog_post(req: &CreateBlogPostRequest) -> Result<(), AppError> {
    validate_slug(&req.slug)?;
    validate_text(&req.title, "Title", 256)?;
    validate_text(&req.excerpt, "Excerpt", 1024)?;
    validate_text(&req.content, "Content", 1_000_000)?;
    validate_text(&req.category, "Category", 128)?;
    if let Some(minutes) = req.reading_time
        && minutes < 1
    {
        return Err(AppError::Validation(
            "Reading time must be at least 1 minute".into(),
        ));
    }
    if req.featured < 0 {
        return Err(AppError::Validation("Featured must be >= 0".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_request() -> CreateBlogPostRequest {
        CreateBlogPostRequest {
            slug: "test-post".into(),
            title: "Test".into(),
            excerpt: "An excerpt".into(),
            content: "word ".repeat(450),
            category: "Tipy".into(),
            tags: vec![],
            featured_image: None,
            author_id: None,
            author_name: None,
            reading_time: None,
            meta_description: None,
            featured: 0,
        }
    }

    #[test]
    fn reading_time_is_estimated_from_word_count() {
        let req = base_request();
        // 450 words at 200 wpm rounds up to 3 minutes.
        assert_eq!(req.effective_reading_time(), 3);
    }

    #[test]
    fn supplied_reading_time_wins() {
        let req = CreateBlogPostRequest {
            reading_time: Some(7),
            ..base_request()
        };
        assert_eq!(req.effective_reading_time(), 7);
    }

    #[test]
    fn very_short_content_still_reads_one_minute() {
        let req = CreateBlogPostRequest {
            content: "short".into(),
            ..base_request()
        };
        assert_eq!(req.effective_reading_time(), 1);
    }
}
