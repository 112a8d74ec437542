//! Comment moderation queue.

use crate::models::comment::PendingCommentResponse;
use crate::storage::{Storage, StorageError};

/// Collect every unapproved comment across all posts, annotated with the
/// parent post's title and slug. Ordered longest-waiting first so the queue
/// drains from the back.
pub async fn pending_comments(
    storage: &dyn Storage,
) -> Result<Vec<PendingCommentResponse>, StorageError> {
    let posts = storage.all_blog_posts().await?;
    let mut pending = Vec::new();
    for post in posts {
        let comments = storage.comments_for_post(&post.id, false).await?;
        for comment in comments.into_iter().filter(|c| !c.approved) {
            pending.push(PendingCommentResponse {
                id: comment.id,
                post_id: comment.post_id,
                author_name: comment.author_name,
                author_email: comment.author_email,
                content: comment.content,
                approved: comment.approved,
                created_at: comment.created_at,
                post_title: post.title.clone(),
                post_slug: post.slug.clone(),
            });
        }
    }
    pending.sort_by(|a, b| a.created_at.cmp(&b.created_at));
    Ok(pending)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::comment::CreateCommentRequest;
    use crate::storage::MemoryStorage;

    fn comment(name: &str) -> CreateCommentRequest {
        CreateCommentRequest {
            author_name: name.into(),
            author_email: format!("{name}@example.com"),
            content: "Skvelý článok".into(),
        }
    }

    #[tokio::test]
    async fn queue_contains_only_unapproved_comments() {
        let store = MemoryStorage::new();
        let posts = store.all_blog_posts().await.unwrap();
        let first = store.create_comment(&posts[0].id, comment("jana")).await.unwrap();
        let second = store.create_comment(&posts[1].id, comment("peter")).await.unwrap();
        store.approve_comment(&first.id).await.unwrap();

        let queue = pending_comments(&store).await.unwrap();
        assert_eq!(queue.len(), 1);
        assert_eq!(queue[0].id, second.id);
        assert_eq!(queue[0].post_title, posts[1].title);
        assert_eq!(queue[0].post_slug, posts[1].slug);
    }

    #[tokio::test]
    async fn queue_orders_longest_waiting_first() {
        let store = MemoryStorage::new();
        let posts = store.all_blog_posts().await.unwrap();
        let older = store.create_comment(&posts[0].id, comment("a")).await.unwrap();
        let newer = store.create_comment(&posts[2].id, comment("b")).await.unwrap();

        let queue = pending_comments(&store).await.unwrap();
        assert_eq!(queue.len(), 2);
        assert!(queue[0].created_at <= queue[1].created_at);
        assert_eq!(queue[0].id, older.id);
        assert_eq!(queue[1].id, newer.id);
    }
}
