use std::sync::Arc;

use crate::config::AppConfig;
use crate::email::EmailService;
use crate::extractors::AdminRateLimiter;
use crate::storage::Storage;

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn Storage>,
    pub email: Arc<EmailService>,
    pub admin_limiter: Arc<AdminRateLimiter>,
    pub config: AppConfig,
}
