use postbox_email_contracts::{EmailContent, InlineAttachment};
use postbox_models::contact::ContactFormValues;
use postbox_templates_contracts::{
    logo, ContactConfirmationTemplate, ContactNotificationTemplate, RenderedTemplate, Template,
    TemplateService,
};

/// Build the email that informs the site owner about a new message.
pub fn build_notification(
    template: &impl TemplateService,
    values: &ContactFormValues,
) -> anyhow::Result<EmailContent> {
    render(
        template,
        &ContactNotificationTemplate {
            name: values.name.clone(),
            email: values.email.clone(),
            phone: values.phone.clone(),
            header: values.header.clone(),
            message: values.message.clone(),
            logo_cid: logo::CONTENT_ID.into(),
        },
    )
}

/// Build the email that confirms receipt of the message to its sender.
pub fn build_confirmation(
    template: &impl TemplateService,
    values: &ContactFormValues,
) -> anyhow::Result<EmailContent> {
    render(
        template,
        &ContactConfirmationTemplate {
            name: values.name.clone(),
            email: values.email.clone(),
            phone: values.phone.clone(),
            header: values.header.clone(),
            message: values.message.clone(),
            logo_cid: logo::CONTENT_ID.into(),
        },
    )
}

fn render<T: Template + 'static>(
    template: &impl TemplateService,
    data: &T,
) -> anyhow::Result<EmailContent> {
    let RenderedTemplate { html, text } = template.render(data)?;
    Ok(EmailContent {
        text,
        html,
        attachments: vec![logo_attachment()],
    })
}

fn logo_attachment() -> InlineAttachment {
    InlineAttachment {
        filename: logo::FILENAME.into(),
        content_id: logo::CONTENT_ID.into(),
        content_type: logo::CONTENT_TYPE.into(),
        data: logo::DATA,
    }
}

#[cfg(test)]
mod tests {
    use postbox_models::contact::{ContactSubmission, ValidationOutcome};
    use postbox_templates_impl::TemplateServiceImpl;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::validation::validate_submission;

    fn values() -> ContactFormValues {
        ContactFormValues {
            name: "Jane Doe".into(),
            email: "jane.doe@example.com".into(),
            phone: "555-123-4567".into(),
            header: "Question about your work".into(),
            message: "Hello there, I would like to know more.".into(),
        }
    }

    #[test]
    fn notification() {
        // Arrange
        let template = TemplateServiceImpl::new().unwrap();

        // Act
        let result = build_notification(&template, &values()).unwrap();

        // Assert
        assert!(result.html.contains("jane.doe@example.com"));
        assert!(result.html.contains(&format!("cid:{}", logo::CONTENT_ID)));
        assert!(result.text.contains("Question about your work"));
        assert_eq!(result.attachments, [logo_attachment()]);
    }

    #[test]
    fn confirmation() {
        // Arrange
        let template = TemplateServiceImpl::new().unwrap();

        // Act
        let notification = build_notification(&template, &values()).unwrap();
        let confirmation = build_confirmation(&template, &values()).unwrap();

        // Assert
        assert!(confirmation.text.starts_with("Hi Jane Doe"));
        assert!(confirmation.text.contains("Your message said:"));
        assert!(confirmation.text.contains("From: Jane Doe"));
        assert!(!notification.text.contains("Your message said:"));
        assert_eq!(confirmation.attachments, notification.attachments);
    }

    #[test]
    fn message_line_breaks() {
        // Arrange
        let template = TemplateServiceImpl::new().unwrap();
        let outcome = validate_submission(&ContactSubmission {
            name: Some("Jane Doe".into()),
            email: Some("jane.doe@example.com".into()),
            phone: Some("555-123-4567".into()),
            header: Some("Question about your work".into()),
            message: Some("First paragraph.\n\nSecond <paragraph>.".into()),
        });
        let ValidationOutcome::Valid { values, .. } = outcome else {
            panic!("expected a valid submission");
        };

        // Act
        let notification = build_notification(&template, &values).unwrap();
        let confirmation = build_confirmation(&template, &values).unwrap();

        // Assert
        for content in [&notification, &confirmation] {
            assert!(content
                .html
                .contains("First paragraph.<br><br>Second &lt;paragraph&gt;."));
            assert!(content
                .text
                .contains("First paragraph.\n\nSecond <paragraph>."));
        }
    }

    #[test]
    fn builders_are_idempotent() {
        let template = TemplateServiceImpl::new().unwrap();

        assert_eq!(
            build_notification(&template, &values()).unwrap(),
            build_notification(&template, &values()).unwrap()
        );
        assert_eq!(
            build_confirmation(&template, &values()).unwrap(),
            build_confirmation(&template, &values()).unwrap()
        );
    }
}
