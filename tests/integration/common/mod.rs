use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use moveco::config::{
    AdminConfig, AppConfig, CorsConfig, DatabaseConfig, RateLimitConfig, ServerConfig,
};
use moveco::email::{EmailService, MailTransport, OutgoingEmail, TransportError};
use moveco::extractors::AdminRateLimiter;
use moveco::state::AppState;
use moveco::storage::{MemoryStorage, Storage};

pub const ADMIN_KEY: &str = "test-admin-key";

/// Transport that records deliveries instead of speaking SMTP.
struct RecordingTransport {
    delivered: Arc<Mutex<Vec<OutgoingEmail>>>,
}

#[async_trait]
impl MailTransport for RecordingTransport {
    async fn deliver(&self, email: &OutgoingEmail) -> Result<(), TransportError> {
        self.delivered.lock().unwrap().push(email.clone());
        Ok(())
    }
}

/// A running test server on the in-memory backend.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    /// Emails captured by the stub transport.
    pub delivered: Arc<Mutex<Vec<OutgoingEmail>>>,
}

/// Parsed HTTP response for test assertions.
pub struct TestResponse {
    pub status: u16,
    /// Parsed JSON body, or `Null` if the response is not valid JSON.
    pub body: Value,
}

impl TestResponse {
    async fn from_response(res: reqwest::Response) -> Self {
        let status = res.status().as_u16();
        let text = res.text().await.expect("Failed to read response body");
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);
        Self { status, body }
    }
}

impl TestApp {
    pub async fn spawn() -> Self {
        // Generous limit so ordinary tests never trip the limiter.
        Self::spawn_with_rate_limit(10_000).await
    }

    pub async fn spawn_with_rate_limit(max_requests: u32) -> Self {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        let delivered = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&delivered);
        let email = Arc::new(EmailService::with_transport_factory(
            Arc::clone(&storage),
            Box::new(move |_| {
                Ok(Arc::new(RecordingTransport {
                    delivered: Arc::clone(&sink),
                }) as Arc<dyn MailTransport>)
            }),
        ));

        let config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors: CorsConfig {
                    allow_origins: vec![],
                    max_age: 3600,
                },
            },
            database: DatabaseConfig { url: None },
            admin: AdminConfig {
                key: Some(ADMIN_KEY.to_string()),
            },
            rate_limit: RateLimitConfig {
                window_secs: 900,
                max_requests,
            },
        };

        let state = AppState {
            storage: Arc::clone(&storage),
            email,
            admin_limiter: Arc::new(AdminRateLimiter::new(900, max_requests)),
            config,
        };

        let app = moveco::build_router(state);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(
                listener,
                app.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .await
            .unwrap();
        });

        Self {
            addr,
            client: Client::new(),
            delivered,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send GET request");
        TestResponse::from_response(res).await
    }

    pub async fn post(&self, path: &str, body: &Value) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to send POST request");
        TestResponse::from_response(res).await
    }

    pub async fn get_admin(&self, path: &str) -> TestResponse {
        self.get_with_key(path, ADMIN_KEY).await
    }

    pub async fn get_with_key(&self, path: &str, key: &str) -> TestResponse {
        let res = self
            .client
            .get(self.url(path))
            .header("x-admin-key", key)
            .send()
            .await
            .expect("Failed to send GET request");
        TestResponse::from_response(res).await
    }

    pub async fn post_admin(&self, path: &str, body: &Value) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .header("x-admin-key", ADMIN_KEY)
            .json(body)
            .send()
            .await
            .expect("Failed to send POST request");
        TestResponse::from_response(res).await
    }

    pub async fn put_admin(&self, path: &str, body: &Value) -> TestResponse {
        let res = self
            .client
            .put(self.url(path))
            .header("x-admin-key", ADMIN_KEY)
            .json(body)
            .send()
            .await
            .expect("Failed to send PUT request");
        TestResponse::from_response(res).await
    }

    pub async fn patch_admin(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .patch(self.url(path))
            .header("x-admin-key", ADMIN_KEY)
            .send()
            .await
            .expect("Failed to send PATCH request");
        TestResponse::from_response(res).await
    }

    pub async fn patch_with_key(&self, path: &str, key: Option<&str>) -> TestResponse {
        let mut req = self.client.patch(self.url(path));
        if let Some(key) = key {
            req = req.header("x-admin-key", key);
        }
        let res = req.send().await.expect("Failed to send PATCH request");
        TestResponse::from_response(res).await
    }

    pub async fn delete_admin(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .delete(self.url(path))
            .header("x-admin-key", ADMIN_KEY)
            .send()
            .await
            .expect("Failed to send DELETE request");
        TestResponse::from_response(res).await
    }

    /// Turn on sending with the stub transport via the admin API.
    pub async fn enable_email(&self) {
        let res = self
            .put_admin(
                "/api/admin/email/config",
                &serde_json::json!({"smtp_password": "secret", "enabled": true}),
            )
            .await;
        assert_eq!(res.status, 200, "enabling email failed: {}", res.body);
    }

    /// Wait for the background email pipeline to capture `count` messages.
    pub async fn wait_for_deliveries(&self, count: usize) {
        for _ in 0..100 {
            if self.delivered.lock().unwrap().len() >= count {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!(
            "expected {count} deliveries, saw {}",
            self.delivered.lock().unwrap().len()
        );
    }
}
