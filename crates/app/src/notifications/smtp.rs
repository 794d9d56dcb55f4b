//! SMTP notifier using Lettre.

use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Attachment as MailAttachment, Mailbox, MultiPart, SinglePart, header::ContentType},
    transport::smtp::authentication::Credentials,
};
use tracing::info;

use crate::notifications::{InvoiceEmail, Notifier, NotifierError};

/// SMTP connection settings.
#[derive(Debug, Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    /// Sender mailbox, e.g. `Front Desk <frontdesk@example.com>`.
    pub from: String,
}

/// Sends invoice emails over an authenticated TLS relay.
#[derive(Clone)]
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl std::fmt::Debug for SmtpNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpNotifier")
            .field("from", &self.from)
            .finish_non_exhaustive()
    }
}

impl SmtpNotifier {
    /// Build a notifier from settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the sender address is invalid or the relay cannot be configured.
    pub fn new(settings: SmtpSettings) -> Result<Self, NotifierError> {
        let from = parse_mailbox(&settings.from)?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.host)?
            .port(settings.port)
            .credentials(Credentials::new(settings.username, settings.password))
            .build();

        Ok(Self { transport, from })
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    #[tracing::instrument(
        name = "notifications.smtp.send",
        skip(self, email),
        fields(recipient = %email.recipient),
        err
    )]
    async fn send(&self, email: InvoiceEmail) -> Result<(), NotifierError> {
        let attachment = MailAttachment::new(email.attachment.filename)
            .body(email.attachment.content, ContentType::TEXT_PLAIN);

        let message = Message::builder()
            .from(self.from.clone())
            .to(parse_mailbox(&email.recipient)?)
            .subject(email.subject)
            .multipart(
                MultiPart::mixed()
                    .singlepart(SinglePart::plain(email.body))
                    .singlepart(attachment),
            )?;

        self.transport.send(message).await?;

        info!("sent invoice email");

        Ok(())
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, NotifierError> {
    address
        .parse()
        .map_err(|source| NotifierError::InvalidAddress {
            address: address.to_string(),
            source,
        })
}
