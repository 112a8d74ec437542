//! Template-driven email delivery with a persistent audit trail.
//!
//! Every send writes a `pending` log row before anything can fail, then
//! settles it to `sent` or `failed`. Send methods therefore only surface
//! an error when the log itself cannot be written; delivery problems are
//! reported through the returned log row.

use std::sync::Arc;

use chrono::{Duration, Utc};
use serde::Serialize;
use serde_json::json;
use tokio::sync::RwLock;
use tracing::{info, warn};

use super::template;
use super::transport::{MailTransport, OutgoingEmail, SmtpMailer, TransportError};
use crate::entity::{contact_submission, email_config, email_log};
use crate::storage::{EmailLogUpdate, NewEmailLog, Storage, StorageError};

/// Builds a transport from a configuration; swapped out in tests.
type TransportFactory =
    Box<dyn Fn(&email_config::Model) -> Result<Arc<dyn MailTransport>, TransportError> + Send + Sync>;

enum MailerState {
    /// Not yet initialized, or shut down.
    Uninitialized,
    /// Initialization ran and decided sending is impossible.
    Disabled { reason: String },
    Ready {
        config: email_config::Model,
        transport: Arc<dyn MailTransport>,
    },
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct EmailStats {
    pub total: usize,
    pub sent: usize,
    pub failed: usize,
    pub pending: usize,
    pub last_24_hours: usize,
}

pub struct EmailService {
    storage: Arc<dyn Storage>,
    state: RwLock<MailerState>,
    transport_factory: TransportFactory,
}

impl EmailService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self::with_transport_factory(
            storage,
            Box::new(|config| Ok(Arc::new(SmtpMailer::from_config(config)?) as Arc<dyn MailTransport>)),
        )
    }

    pub fn with_transport_factory(
        storage: Arc<dyn Storage>,
        transport_factory: TransportFactory,
    ) -> Self {
        Self {
            storage,
            state: RwLock::new(MailerState::Uninitialized),
            transport_factory,
        }
    }

    /// Load the stored configuration and build a transport from it. Safe to
    /// call repeatedly; the admin configuration handler re-runs it so edits
    /// take effect without a restart.
    pub async fn initialize(&self) -> Result<(), StorageError> {
        let config = self.storage.email_config().await?;
        let mut state = self.state.write().await;
        *state = match config {
            None => {
                warn!("email service has no configuration, sending disabled");
                MailerState::Disabled {
                    reason: "no configuration".to_string(),
                }
            }
            Some(config) if !config.enabled => MailerState::Disabled {
                reason: "disabled in configuration".to_string(),
            },
            Some(config)
                if config.smtp_host.is_empty()
                    || config.smtp_user.is_empty()
                    || config.smtp_password.is_empty() =>
            {
                warn!("email configuration is incomplete, sending disabled");
                MailerState::Disabled {
                    reason: "incomplete SMTP configuration".to_string(),
                }
            }
            Some(config) => match (self.transport_factory)(&config) {
                Ok(transport) => {
                    info!(host = %config.smtp_host, "email service initialized");
                    MailerState::Ready { config, transport }
                }
                Err(err) => {
                    warn!(%err, "failed to build SMTP transport, sending disabled");
                    MailerState::Disabled {
                        reason: err.to_string(),
                    }
                }
            },
        };
        Ok(())
    }

    /// Drop the transport. The next send re-initializes lazily.
    pub async fn shutdown(&self) {
        let mut state = self.state.write().await;
        *state = MailerState::Uninitialized;
    }

    /// Render a stored template and deliver it, auditing the attempt.
    pub async fn send_email(
        &self,
        template_key: &str,
        to_email: &str,
        data: &serde_json::Value,
        subject_override: Option<&str>,
    ) -> Result<email_log::Model, StorageError> {
        let initial_subject = match subject_override {
            Some(subject) => subject.to_string(),
            None => format!("Email from {}", self.from_name_or_default().await),
        };

        let log = self
            .storage
            .create_email_log(NewEmailLog {
                template_key: template_key.to_string(),
                to_email: to_email.to_string(),
                subject: initial_subject,
            })
            .await?;

        let update = match self
            .try_deliver(template_key, to_email, data, subject_override)
            .await
        {
            Ok(subject) => {
                info!(template_key, to_email, "email sent");
                EmailLogUpdate {
                    status: email_log::STATUS_SENT.to_string(),
                    subject: Some(subject),
                    error: None,
                    sent_at: Some(Utc::now()),
                }
            }
            Err(reason) => {
                warn!(template_key, to_email, %reason, "email delivery failed");
                EmailLogUpdate {
                    status: email_log::STATUS_FAILED.to_string(),
                    subject: None,
                    error: Some(reason),
                    sent_at: None,
                }
            }
        };

        let updated = self.storage.update_email_log(&log.id, update).await?;
        Ok(updated.unwrap_or(log))
    }

    /// The delivery attempt proper. Returns the rendered subject on
    /// success; all failures collapse into a log-friendly reason string.
    async fn try_deliver(
        &self,
        template_key: &str,
        to_email: &str,
        data: &serde_json::Value,
        subject_override: Option<&str>,
    ) -> Result<String, String> {
        if matches!(*self.state.read().await, MailerState::Uninitialized) {
            self.initialize().await.map_err(|e| e.to_string())?;
        }

        let state = self.state.read().await;
        let (config, transport) = match &*state {
            MailerState::Ready { config, transport } => (config.clone(), Arc::clone(transport)),
            MailerState::Disabled { reason } => {
                return Err(format!("email service is disabled: {reason}"));
            }
            MailerState::Uninitialized => {
                return Err("email service is not initialized".to_string());
            }
        };
        drop(state);

        let template = self
            .storage
            .email_template_by_key(template_key)
            .await
            .map_err(|e| e.to_string())?
            .filter(|t| t.enabled)
            .ok_or_else(|| format!("template '{template_key}' not found or disabled"))?;

        let subject = match subject_override {
            Some(subject) => subject.to_string(),
            None => template::render(&template.subject, data),
        };
        let email = OutgoingEmail {
            from_name: config.from_name.clone(),
            from_email: config.from_email.clone(),
            to_email: to_email.to_string(),
            reply_to: config.reply_to.clone(),
            bcc: config.bcc.clone(),
            subject: subject.clone(),
            html_body: template::render(&template.html_content, data),
            text_body: template::render(&template.text_content, data),
        };

        transport.deliver(&email).await.map_err(|e| e.to_string())?;
        Ok(subject)
    }

    /// Notify the site operators about a new contact submission.
    pub async fn send_contact_notification(
        &self,
        submission: &contact_submission::Model,
    ) -> Result<email_log::Model, StorageError> {
        let data = json!({
            "name": submission.name,
            "email": submission.email,
            "phone": submission.phone,
            "apartment_size": submission.apartment_size,
            "move_date": submission.move_date,
            "message": submission.message,
            "submitted_at": submission.submitted_at.format("%d.%m.%Y %H:%M").to_string(),
        });
        let to_email = self.from_email_or_default().await;
        self.send_email("contact", &to_email, &data, None).await
    }

    /// Acknowledge the submission to the person who sent it.
    pub async fn send_confirmation_email(
        &self,
        submission: &contact_submission::Model,
    ) -> Result<email_log::Model, StorageError> {
        let data = json!({
            "name": submission.name,
            "email": submission.email,
            "phone": submission.phone,
            "message": submission.message,
        });
        self.send_email("confirmation", &submission.email, &data, None)
            .await
    }

    /// Send a test message to verify the current configuration end to end.
    pub async fn test_email_config(&self, to_email: &str) -> (bool, String) {
        if let Err(err) = self.initialize().await {
            return (false, err.to_string());
        }

        let data = json!({
            "name": "Test User",
            "email": to_email,
            "message": "This is a test email to verify your email configuration.",
        });
        match self
            .send_email("confirmation", to_email, &data, Some("Test Email Configuration"))
            .await
        {
            Ok(log) if log.status == email_log::STATUS_SENT => {
                (true, "Test email sent successfully".to_string())
            }
            Ok(log) => (
                false,
                format!(
                    "Failed to send test email: {}",
                    log.error.unwrap_or_else(|| "unknown error".to_string())
                ),
            ),
            Err(err) => (false, err.to_string()),
        }
    }

    /// Aggregate counters over the full audit trail.
    pub async fn get_stats(&self) -> Result<EmailStats, StorageError> {
        let logs = self.storage.all_email_logs().await?;
        let cutoff = Utc::now() - Duration::hours(24);
        Ok(EmailStats {
            total: logs.len(),
            sent: logs
                .iter()
                .filter(|l| l.status == email_log::STATUS_SENT)
                .count(),
            failed: logs
                .iter()
                .filter(|l| l.status == email_log::STATUS_FAILED)
                .count(),
            pending: logs
                .iter()
                .filter(|l| l.status == email_log::STATUS_PENDING)
                .count(),
            last_24_hours: logs.iter().filter(|l| l.created_at >= cutoff).count(),
        })
    }

    async fn from_name_or_default(&self) -> String {
        match &*self.state.read().await {
            MailerState::Ready { config, .. } => config.from_name.clone(),
            _ => "VI&MO Sťahovanie".to_string(),
        }
    }

    async fn from_email_or_default(&self) -> String {
        match &*self.state.read().await {
            MailerState::Ready { config, .. } => config.from_email.clone(),
            _ => "info@viamo.sk".to_string(),
        }
    }
}
