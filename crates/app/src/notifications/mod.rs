//! Notifications
//!
//! Post-commit delivery of booking invoices. Delivery is best-effort: callers log
//! failures and never surface them to the guest.

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;

pub mod invoice;
mod log;
mod smtp;

pub use invoice::Invoice;
pub use log::LogNotifier;
pub use smtp::{SmtpNotifier, SmtpSettings};

#[derive(Debug, Error)]
pub enum NotifierError {
    #[error("invalid address `{address}`")]
    InvalidAddress {
        address: String,
        #[source]
        source: lettre::address::AddressError,
    },

    #[error("failed to build message")]
    Message(#[from] lettre::error::Error),

    #[error("smtp delivery failed")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

/// A file attached to an email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub filename: String,
    pub content: String,
}

/// An email carrying a booking invoice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceEmail {
    pub recipient: String,
    pub subject: String,
    pub body: String,
    pub attachment: Attachment,
}

#[automock]
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver an invoice email.
    async fn send(&self, email: InvoiceEmail) -> Result<(), NotifierError>;
}
