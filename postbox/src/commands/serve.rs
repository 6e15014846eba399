use std::sync::Arc;

use anyhow::Context;
use postbox_api_rest::RestServer;
use postbox_config::Config;
use postbox_core_contact_impl::{ContactServiceConfig, ContactServiceImpl};
use postbox_core_health_impl::{HealthServiceConfig, HealthServiceImpl};
use postbox_email_contracts::EmailService;
use postbox_templates_impl::TemplateServiceImpl;
use tracing::{info, warn};

use crate::email;

pub async fn serve(config: Config) -> anyhow::Result<()> {
    info!("Connecting to smtp server");
    let email = email::connect(&config.email)?;
    if let Err(err) = email.ping().await {
        warn!("SMTP server is not reachable yet: {err:#}");
    }

    let template = TemplateServiceImpl::new().context("Failed to load email templates")?;

    let health = HealthServiceImpl::new(
        email.clone(),
        HealthServiceConfig {
            cache_ttl: config.health.cache_ttl.into(),
        },
    );

    let contact = ContactServiceImpl::new(
        email,
        template,
        ContactServiceConfig {
            recipient: Arc::new(config.contact.email),
            notification_subject: config.contact.notification_subject.into(),
            confirmation_subject: config.contact.confirmation_subject.into(),
        },
    );

    info!(
        "Starting http server on {}:{}",
        config.http.host, config.http.port
    );
    RestServer::new(health, contact)
        .serve(config.http.host, config.http.port)
        .await
}
