pub mod service;
pub mod template;
pub mod transport;

pub use service::{EmailService, EmailStats};
pub use transport::{MailTransport, OutgoingEmail, SmtpMailer, TransportError};
