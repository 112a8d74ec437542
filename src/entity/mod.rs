pub mod author;
pub mod blog_post;
pub mod comment;
pub mod contact_submission;
pub mod email_config;
pub mod email_log;
pub mod email_template;
