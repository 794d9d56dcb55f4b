//! Log notifier.

use async_trait::async_trait;
use tracing::info;

use crate::notifications::{InvoiceEmail, Notifier, NotifierError};

/// Records deliveries in the log instead of sending them. Used when SMTP is not configured.
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, email: InvoiceEmail) -> Result<(), NotifierError> {
        info!(
            recipient = %email.recipient,
            subject = %email.subject,
            attachment = %email.attachment.filename,
            "invoice email not sent: smtp is not configured"
        );

        Ok(())
    }
}
