pub mod config;
pub mod database;
pub mod email;
pub mod entity;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod moderation;
pub mod models;
pub mod routes;
pub mod state;
pub mod storage;

use axum::http::{HeaderName, HeaderValue, Method, header};
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as ScalarServable};
use utoipa_swagger_ui::SwaggerUi;

use crate::config::CorsConfig;
use crate::extractors::admin::ADMIN_KEY_HEADER;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Moveco Content API",
        version = "1.0.0",
        description = "Blog, comment moderation, contact lead capture and email administration for the VI&MO moving company site"
    ),
    paths(
        handlers::blog::list_blog_posts,
        handlers::blog::get_blog_post,
        handlers::blog::create_blog_post,
        handlers::author::list_authors,
        handlers::author::get_author,
        handlers::author::create_author,
        handlers::comment::list_comments,
        handlers::comment::create_comment,
        handlers::comment::pending_comments,
        handlers::comment::approve_comment,
        handlers::contact::submit_contact,
        handlers::email::get_email_config,
        handlers::email::update_email_config,
        handlers::email::list_email_templates,
        handlers::email::create_email_template,
        handlers::email::update_email_template,
        handlers::email::delete_email_template,
        handlers::email::list_email_logs,
        handlers::email::delete_email_log,
        handlers::email::email_stats,
        handlers::email::test_email,
        handlers::health::health,
    ),
    tags(
        (name = "Blog", description = "Public blog content"),
        (name = "Authors", description = "Author profiles"),
        (name = "Comments", description = "Comment submission and moderation"),
        (name = "Contact", description = "Contact / quote lead capture"),
        (name = "Email", description = "SMTP configuration, templates and delivery log"),
        (name = "Health", description = "Service status"),
    ),
)]
struct ApiDoc;

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static(ADMIN_KEY_HEADER),
        ])
        .max_age(std::time::Duration::from_secs(config.max_age));

    if config.allow_origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .allow_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        layer.allow_origin(origins)
    }
}

/// Build the application router.
pub fn build_router(state: AppState) -> axum::Router {
    let cors = cors_layer(&state.config.server.cors);
    let api = ApiDoc::openapi();

    axum::Router::new()
        .nest("/api", routes::api_routes())
        .with_state(state)
        .layer(cors)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api.clone()))
        .merge(Scalar::with_url("/scalar", api))
}
