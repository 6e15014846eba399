use anyhow::{anyhow, Context};
use lettre::{
    message::{header::ContentType, Attachment, MultiPart, SinglePart},
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use postbox_email_contracts::{Email, EmailContent, EmailDelivery, EmailService};
use postbox_models::email_address::{EmailAddress, EmailAddressWithName};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct EmailServiceImpl {
    from: EmailAddressWithName,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl EmailServiceImpl {
    pub fn new(url: &str, from: EmailAddressWithName) -> anyhow::Result<Self> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::from_url(url)?.build();

        Ok(Self { from, transport })
    }

    fn build_message(&self, email: Email) -> anyhow::Result<Message> {
        let mut builder = Message::builder()
            .from(self.from.0.clone())
            .to(email.recipient.0)
            .subject(email.subject);

        if let Some(reply_to) = email.reply_to {
            builder = builder.reply_to(reply_to.0);
        }

        builder
            .multipart(body(email.content)?)
            .context("Failed to build email message")
    }
}

/// Plain text alternative plus an html part bundled with its inline attachments.
fn body(content: EmailContent) -> anyhow::Result<MultiPart> {
    let html = content.attachments.into_iter().try_fold(
        MultiPart::related().singlepart(SinglePart::html(content.html)),
        |related, attachment| {
            let content_type = ContentType::parse(&attachment.content_type).map_err(|err| {
                anyhow!(
                    "Invalid content type of attachment {}: {err}",
                    attachment.filename
                )
            })?;
            anyhow::Ok(
                related.singlepart(
                    Attachment::new_inline(attachment.content_id)
                        .body(attachment.data.to_vec(), content_type),
                ),
            )
        },
    )?;

    Ok(MultiPart::alternative()
        .singlepart(SinglePart::plain(content.text))
        .multipart(html))
}

impl EmailService for EmailServiceImpl {
    async fn send(&self, email: Email) -> anyhow::Result<EmailDelivery> {
        let message = self.build_message(email)?;
        let recipients = message.envelope().to().to_vec();

        let response = self.transport.send(message).await?;
        debug!(code = %response.code(), "smtp server responded");

        let accepted = if response.is_positive() {
            recipients.into_iter().map(EmailAddress).collect()
        } else {
            Vec::new()
        };

        Ok(EmailDelivery { accepted })
    }

    async fn ping(&self) -> anyhow::Result<()> {
        self.transport
            .test_connection()
            .await?
            .then_some(())
            .ok_or_else(|| anyhow!("Failed to ping smtp server"))
    }
}

#[cfg(test)]
mod tests {
    use postbox_email_contracts::InlineAttachment;

    use super::*;

    fn sut() -> EmailServiceImpl {
        EmailServiceImpl::new(
            "smtp://localhost:1025",
            "Postbox <automailer@example.com>".parse().unwrap(),
        )
        .unwrap()
    }

    fn email() -> Email {
        Email {
            recipient: "Site Owner <owner@example.com>".parse().unwrap(),
            subject: "The Subject".into(),
            content: EmailContent {
                text: "Hello World!".into(),
                html: r#"<h1>Hello World!</h1><img src="cid:logo" />"#.into(),
                attachments: vec![InlineAttachment {
                    filename: "logo.png".into(),
                    content_id: "logo".into(),
                    content_type: "image/png".into(),
                    data: b"not really a png",
                }],
            },
            reply_to: Some("Jane Doe <jane.doe@example.com>".parse().unwrap()),
        }
    }

    #[tokio::test]
    async fn build_message() {
        // Arrange
        let sut = sut();

        // Act
        let message = sut.build_message(email()).unwrap();

        // Assert
        assert_eq!(
            message.envelope().to(),
            ["owner@example.com".parse::<lettre::Address>().unwrap()]
        );
        let formatted = String::from_utf8(message.formatted()).unwrap();
        assert!(formatted.contains("Subject: The Subject"));
        assert!(formatted.contains("Reply-To:"));
        assert!(formatted.contains("<jane.doe@example.com>"));
        assert!(formatted.contains("multipart/alternative"));
        assert!(formatted.contains("multipart/related"));
        assert!(formatted.contains("Content-ID: <logo>"));
        assert!(formatted.contains("Hello World!"));
    }

    #[tokio::test]
    async fn build_message_without_reply_to() {
        let sut = sut();

        let message = sut
            .build_message(Email {
                reply_to: None,
                ..email()
            })
            .unwrap();

        let formatted = String::from_utf8(message.formatted()).unwrap();
        assert!(!formatted.contains("Reply-To"));
    }

    #[tokio::test]
    async fn invalid_attachment_content_type() {
        let sut = sut();
        let mut email = email();
        email.content.attachments[0].content_type = "not a content type".into();

        let result = sut.build_message(email);

        assert!(result.is_err());
    }
}
