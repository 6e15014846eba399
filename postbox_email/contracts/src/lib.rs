use std::future::Future;

use postbox_models::email_address::{EmailAddress, EmailAddressWithName};

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait EmailService: Send + Sync + 'static {
    /// Send the given email.
    ///
    /// Resolves to the recipients the mail server accepted the message for,
    /// which may be none even though no error occurred.
    fn send(&self, email: Email) -> impl Future<Output = anyhow::Result<EmailDelivery>> + Send;

    fn ping(&self) -> impl Future<Output = anyhow::Result<()>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub recipient: EmailAddressWithName,
    pub subject: String,
    pub content: EmailContent,
    pub reply_to: Option<EmailAddressWithName>,
}

/// The body of an email, offered both as plain text and as html.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailContent {
    pub text: String,
    pub html: String,
    pub attachments: Vec<InlineAttachment>,
}

/// A resource embedded in the html body and referenced via `cid:{content_id}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineAttachment {
    pub filename: String,
    pub content_id: String,
    pub content_type: String,
    pub data: &'static [u8],
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmailDelivery {
    pub accepted: Vec<EmailAddress>,
}

#[cfg(feature = "mock")]
impl MockEmailService {
    pub fn with_send(mut self, email: Email, accepted: Vec<EmailAddress>) -> Self {
        self.expect_send()
            .once()
            .with(mockall::predicate::eq(email))
            .return_once(move |_| {
                Box::pin(std::future::ready(Ok(EmailDelivery { accepted })))
            });
        self
    }

    pub fn with_send_error(mut self, email: Email, error: &'static str) -> Self {
        self.expect_send()
            .once()
            .with(mockall::predicate::eq(email))
            .return_once(move |_| Box::pin(std::future::ready(Err(anyhow::anyhow!(error)))));
        self
    }

    pub fn with_ping(mut self, ok: bool) -> Self {
        self.expect_ping().once().return_once(move || {
            Box::pin(std::future::ready(if ok {
                Ok(())
            } else {
                Err(anyhow::anyhow!("Failed to ping smtp server"))
            }))
        });
        self
    }
}
