use anyhow::ensure;
use clap::Subcommand;
use postbox_config::Config;
use postbox_email_contracts::{Email, EmailContent, EmailService};
use postbox_models::email_address::EmailAddressWithName;
use tracing::info;

use crate::email;

#[derive(Debug, Subcommand)]
pub enum EmailCommand {
    /// Test email deliverability
    Test { recipient: EmailAddressWithName },
}

impl EmailCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        match self {
            EmailCommand::Test { recipient } => test(config, recipient).await,
        }
    }
}

async fn test(config: Config, recipient: EmailAddressWithName) -> anyhow::Result<()> {
    let email_service = email::connect(&config.email)?;

    let delivery = email_service
        .send(Email {
            recipient,
            subject: "Email Deliverability Test".into(),
            content: EmailContent {
                text: "Email deliverability seems to be working!".into(),
                html: "<p>Email deliverability seems to be working!</p>".into(),
                attachments: Vec::new(),
            },
            reply_to: None,
        })
        .await?;

    ensure!(!delivery.accepted.is_empty(), "Failed to send email");
    info!("Email accepted for {} recipient(s)", delivery.accepted.len());

    Ok(())
}
