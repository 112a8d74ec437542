//! Administrator gate for moderation and email endpoints.
//!
//! Authentication is a shared secret in the `x-admin-key` header, checked
//! against the configured value. Every administrative request is rate
//! limited per client IP before the key is even looked at, and both grants
//! and denials land in the audit log.

use std::cmp;
use std::net::SocketAddr;

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::request::Parts;
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use tracing::{error, info, warn};

use crate::error::AppError;
use crate::state::AppState;

pub const ADMIN_KEY_HEADER: &str = "x-admin-key";

struct Window {
    started_at: DateTime<Utc>,
    count: u32,
}

/// Fixed-window request counter keyed by client IP.
pub struct AdminRateLimiter {
    window: Duration,
    max_requests: u32,
    windows: DashMap<String, Window>,
}

impl AdminRateLimiter {
    pub fn new(window_secs: u64, max_requests: u32) -> Self {
        Self {
            window: Duration::seconds(window_secs as i64),
            max_requests,
            windows: DashMap::new(),
        }
    }

    /// Count one request against `client_ip`'s current window.
    pub fn check(&self, client_ip: &str) -> Result<(), AppError> {
        if self.max_requests == 0 {
            return Ok(());
        }

        let now = Utc::now();
        let mut entry = self
            .windows
            .entry(client_ip.to_string())
            .or_insert_with(|| Window {
                started_at: now,
                count: 0,
            });

        if now - entry.started_at >= self.window {
            entry.started_at = now;
            entry.count = 0;
        }

        if entry.count >= self.max_requests {
            let expires = entry.started_at + self.window;
            let retry_after = cmp::max((expires - now).num_seconds(), 1) as u64;
            return Err(AppError::RateLimited { retry_after });
        }

        entry.count += 1;
        Ok(())
    }
}

/// Proof of administrator access. Add as a handler parameter to protect an
/// endpoint; construction performs the rate-limit and key checks.
pub struct AdminKey;

impl FromRequestParts<AppState> for AdminKey {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let client_ip = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|info| info.0.ip().to_string())
            .unwrap_or_else(|| "unknown".to_string());

        state.admin_limiter.check(&client_ip)?;

        let Some(expected) = state.config.admin.key.as_deref() else {
            error!(
                %client_ip,
                path = %parts.uri.path(),
                "admin request refused: no administrator key configured"
            );
            return Err(AppError::AdminKeyNotConfigured);
        };

        let provided = parts
            .headers
            .get(ADMIN_KEY_HEADER)
            .and_then(|v| v.to_str().ok());
        match provided {
            None => {
                warn!(%client_ip, path = %parts.uri.path(), "admin request without key");
                Err(AppError::AdminKeyMissing)
            }
            Some(key) if key != expected => {
                warn!(%client_ip, path = %parts.uri.path(), "admin request with invalid key");
                Err(AppError::AdminKeyInvalid)
            }
            Some(_) => {
                info!(
                    %client_ip,
                    method = %parts.method,
                    path = %parts.uri.path(),
                    "admin access"
                );
                Ok(AdminKey)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allows_up_to_the_limit_then_rejects() {
        let limiter = AdminRateLimiter::new(900, 3);
        for _ in 0..3 {
            assert!(limiter.check("10.0.0.1").is_ok());
        }
        let err = limiter.check("10.0.0.1").unwrap_err();
        assert!(matches!(err, AppError::RateLimited { retry_after } if retry_after >= 1));
    }

    #[test]
    fn clients_are_limited_independently() {
        let limiter = AdminRateLimiter::new(900, 1);
        assert!(limiter.check("10.0.0.1").is_ok());
        assert!(limiter.check("10.0.0.2").is_ok());
        assert!(limiter.check("10.0.0.1").is_err());
    }

    #[test]
    fn zero_limit_disables_limiting() {
        let limiter = AdminRateLimiter::new(900, 0);
        for _ in 0..100 {
            assert!(limiter.check("10.0.0.1").is_ok());
        }
    }
}
