use axum::{
    Router,
    routing::{delete, get, patch, post, put},
};

use crate::handlers;
use crate::state::AppState;

pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/blog", blog_routes())
        .nest("/authors", author_routes())
        .nest("/comments", comment_routes())
        .route("/contact", post(handlers::contact::submit_contact))
        .nest("/admin/email", email_routes())
        .route("/health", get(handlers::health::health))
}

fn blog_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/posts",
            get(handlers::blog::list_blog_posts).post(handlers::blog::create_blog_post),
        )
        .route("/posts/{slug}", get(handlers::blog::get_blog_post))
        .route(
            "/posts/{slug}/comments",
            get(handlers::comment::list_comments).post(handlers::comment::create_comment),
        )
}

fn author_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::author::list_authors).post(handlers::author::create_author),
        )
        .route("/{slug}", get(handlers::author::get_author))
}

fn comment_routes() -> Router<AppState> {
    Router::new()
        .route("/pending", get(handlers::comment::pending_comments))
        .route("/{id}/approve", patch(handlers::comment::approve_comment))
}

fn email_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/config",
            get(handlers::email::get_email_config).put(handlers::email::update_email_config),
        )
        .route(
            "/templates",
            get(handlers::email::list_email_templates).post(handlers::email::create_email_template),
        )
        .route(
            "/templates/{id}",
            put(handlers::email::update_email_template)
                .delete(handlers::email::delete_email_template),
        )
        .route("/logs", get(handlers::email::list_email_logs))
        .route("/logs/{id}", delete(handlers::email::delete_email_log))
        .route("/stats", get(handlers::email::email_stats))
        .route("/test", post(handlers::email::test_email))
}
