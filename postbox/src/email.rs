use anyhow::Context;
use postbox_config::EmailConfig;
use postbox_email_impl::EmailServiceImpl;

/// Set up the smtp transport. No connection is opened until the first ping or send.
pub fn connect(config: &EmailConfig) -> anyhow::Result<EmailServiceImpl> {
    EmailServiceImpl::new(&config.smtp_url, config.from.clone())
        .context("Failed to set up SMTP transport")
}
