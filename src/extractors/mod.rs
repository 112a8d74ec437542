pub mod admin;
pub mod json;

pub use admin::{AdminKey, AdminRateLimiter};
pub use json::AppJson;
