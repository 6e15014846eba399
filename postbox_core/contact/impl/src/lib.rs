use std::sync::Arc;

use postbox_core_contact_contracts::{
    ConfirmationStatus, ContactDelivery, ContactSendMessageError, ContactService,
};
use postbox_email_contracts::{Email, EmailService};
use postbox_models::{
    contact::{ContactFormValues, ContactSubmission, ValidationOutcome},
    email_address::{EmailAddress, EmailAddressWithName},
};
use postbox_templates_contracts::TemplateService;
use tracing::{debug, error, info, warn};

pub mod content;
pub mod validation;

#[derive(Debug, Clone)]
pub struct ContactServiceImpl<Email, Template> {
    email: Email,
    template: Template,
    config: ContactServiceConfig,
}

#[derive(Debug, Clone)]
pub struct ContactServiceConfig {
    /// The site owner who receives the notifications.
    pub recipient: Arc<EmailAddressWithName>,
    pub notification_subject: Arc<str>,
    pub confirmation_subject: Arc<str>,
}

impl<EmailS, TemplateS> ContactServiceImpl<EmailS, TemplateS> {
    pub fn new(email: EmailS, template: TemplateS, config: ContactServiceConfig) -> Self {
        Self {
            email,
            template,
            config,
        }
    }
}

impl<EmailS, TemplateS> ContactService for ContactServiceImpl<EmailS, TemplateS>
where
    EmailS: EmailService,
    TemplateS: TemplateService,
{
    async fn send_message(
        &self,
        submission: ContactSubmission,
    ) -> Result<ContactDelivery, ContactSendMessageError> {
        let (values, warnings) = match validation::validate_submission(&submission) {
            ValidationOutcome::Valid { values, warnings } => (values, warnings),
            ValidationOutcome::Invalid { problems } => {
                let fields = problems
                    .keys()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                debug!(%fields, "rejected contact form submission");
                return Err(ContactSendMessageError::Invalid(problems));
            }
        };

        // without a parsable address there is no reply-to and no confirmation
        let submitter = values
            .email
            .parse::<EmailAddress>()
            .ok()
            .map(|email| email.with_name(values.name.clone()));

        let notification = Email {
            recipient: (*self.config.recipient).clone(),
            subject: self.config.notification_subject.to_string(),
            content: content::build_notification(&self.template, &values)?,
            reply_to: submitter.clone(),
        };

        let delivery = self.email.send(notification).await.map_err(|err| {
            error!("Failed to send contact form notification: {err:#}");
            ContactSendMessageError::Send(err)
        })?;

        if delivery.accepted.is_empty() {
            error!("Contact form notification was not accepted by any recipient");
            return Err(ContactSendMessageError::NotAccepted);
        }
        info!(
            accepted = delivery.accepted.len(),
            "sent contact form notification"
        );

        let confirmation = match self.send_confirmation(submitter, &values).await {
            Ok(()) => ConfirmationStatus::Sent,
            Err(err) => {
                warn!("Failed to send contact form confirmation: {err:#}");
                ConfirmationStatus::Failed
            }
        };

        Ok(ContactDelivery {
            email: values.email,
            confirmation,
            warnings,
        })
    }
}

impl<EmailS, TemplateS> ContactServiceImpl<EmailS, TemplateS>
where
    EmailS: EmailService,
    TemplateS: TemplateService,
{
    async fn send_confirmation(
        &self,
        submitter: Option<EmailAddressWithName>,
        values: &ContactFormValues,
    ) -> anyhow::Result<()> {
        let recipient = submitter
            .ok_or_else(|| anyhow::anyhow!("{} is not a deliverable address", values.email))?;

        let delivery = self
            .email
            .send(Email {
                recipient,
                subject: self.config.confirmation_subject.to_string(),
                content: content::build_confirmation(&self.template, values)?,
                reply_to: None,
            })
            .await?;

        info!(
            accepted = delivery.accepted.len(),
            "sent contact form confirmation"
        );

        Ok(())
    }
}
