//! SMTP delivery behind a trait so the service can be exercised without a
//! mail server.

use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::entity::email_config;

/// A fully rendered message ready for delivery.
#[derive(Debug, Clone)]
pub struct OutgoingEmail {
    pub from_name: String,
    pub from_email: String,
    pub to_email: String,
    pub reply_to: String,
    pub bcc: Option<String>,
    pub subject: String,
    pub html_body: String,
    pub text_body: String,
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),
    #[error("message build failed: {0}")]
    Message(#[from] lettre::error::Error),
    #[error("smtp failure: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn deliver(&self, email: &OutgoingEmail) -> Result<(), TransportError>;
}

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    /// Port 465 speaks TLS from the first byte; everything else is assumed
    /// to upgrade via STARTTLS.
    pub fn from_config(config: &email_config::Model) -> Result<Self, TransportError> {
        let credentials =
            Credentials::new(config.smtp_user.clone(), config.smtp_password.clone());
        let builder = if config.smtp_port == 465 {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
        };
        let transport = builder
            .port(config.smtp_port as u16)
            .credentials(credentials)
            .build();
        Ok(Self { transport })
    }
}

#[async_trait]
impl MailTransport for SmtpMailer {
    async fn deliver(&self, email: &OutgoingEmail) -> Result<(), TransportError> {
        let from = Mailbox::new(
            Some(email.from_name.clone()),
            email.from_email.parse()?,
        );
        let mut builder = Message::builder()
            .from(from)
            .to(email.to_email.parse()?)
            .reply_to(email.reply_to.parse()?)
            .subject(email.subject.clone());
        if let Some(ref bcc) = email.bcc {
            builder = builder.bcc(bcc.parse()?);
        }
        let message = builder.multipart(MultiPart::alternative_plain_html(
            email.text_body.clone(),
            email.html_body.clone(),
        ))?;

        self.transport.send(message).await?;
        Ok(())
    }
}
