use std::future::Future;

use postbox_models::contact::{ContactSubmission, ValidationProblems};
use serde::Serialize;
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactService: Send + Sync + 'static {
    /// Validate a submission, notify the site owner and confirm receipt to
    /// the submitter.
    ///
    /// Once the site owner has been notified the call succeeds, even if the
    /// confirmation could not be delivered.
    fn send_message(
        &self,
        submission: ContactSubmission,
    ) -> impl Future<Output = Result<ContactDelivery, ContactSendMessageError>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactDelivery {
    /// The normalized address of the submitter.
    pub email: String,
    pub confirmation: ConfirmationStatus,
    pub warnings: ValidationProblems,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationStatus {
    Sent,
    Failed,
}

#[derive(Debug, Error)]
pub enum ContactSendMessageError {
    #[error("The submission is invalid.")]
    Invalid(ValidationProblems),
    #[error("Failed to send message: {0}")]
    Send(anyhow::Error),
    #[error("The message was not accepted by any recipient.")]
    NotAccepted,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// The response to a submission: an http status code and a json payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryResult {
    pub status: u16,
    pub info: DeliveryInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DeliveryInfo {
    Problems {
        problems: ValidationProblems,
    },
    Error {
        error: String,
    },
    Message {
        message: String,
        #[serde(skip_serializing_if = "ValidationProblems::is_empty")]
        warnings: ValidationProblems,
    },
}

impl From<Result<ContactDelivery, ContactSendMessageError>> for DeliveryResult {
    fn from(value: Result<ContactDelivery, ContactSendMessageError>) -> Self {
        let (status, info) = match value {
            Ok(ContactDelivery {
                email,
                confirmation: ConfirmationStatus::Sent,
                warnings,
            }) => (
                200,
                DeliveryInfo::Message {
                    message: format!(
                        "Your message has been sent. A confirmation email is on its way to \
                         {email}."
                    ),
                    warnings,
                },
            ),
            Ok(ContactDelivery {
                email,
                confirmation: ConfirmationStatus::Failed,
                warnings,
            }) => (
                207,
                DeliveryInfo::Message {
                    message: format!(
                        "Your message has been sent, but the confirmation email to {email} \
                         could not be delivered. Please verify that this address is correct. \
                         You can still expect a response within two days."
                    ),
                    warnings,
                },
            ),
            Err(ContactSendMessageError::Invalid(problems)) => {
                (400, DeliveryInfo::Problems { problems })
            }
            Err(ContactSendMessageError::Send(_)) => (500, error("Could not send message")),
            Err(ContactSendMessageError::NotAccepted) => (
                500,
                error("The message was not sent for an unknown reason"),
            ),
            Err(ContactSendMessageError::Other(_)) => (500, error("Internal server error")),
        };

        Self { status, info }
    }
}

fn error(error: &str) -> DeliveryInfo {
    DeliveryInfo::Error {
        error: error.into(),
    }
}

#[cfg(feature = "mock")]
impl MockContactService {
    pub fn with_send_message(
        mut self,
        submission: ContactSubmission,
        result: Result<ContactDelivery, ContactSendMessageError>,
    ) -> Self {
        self.expect_send_message()
            .once()
            .with(mockall::predicate::eq(submission))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }
}

#[cfg(test)]
mod tests {
    use postbox_models::contact::ContactField;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn delivery(confirmation: ConfirmationStatus) -> ContactDelivery {
        ContactDelivery {
            email: "jane.doe@example.com".into(),
            confirmation,
            warnings: ValidationProblems::new(),
        }
    }

    #[test]
    fn sent() {
        let result = DeliveryResult::from(Ok(delivery(ConfirmationStatus::Sent)));

        assert_eq!(result.status, 200);
        let info = serde_json::to_value(&result.info).unwrap();
        assert_eq!(info.as_object().unwrap().keys().collect::<Vec<_>>(), ["message"]);
    }

    #[test]
    fn confirmation_failed() {
        let result = DeliveryResult::from(Ok(delivery(ConfirmationStatus::Failed)));

        assert_eq!(result.status, 207);
        let DeliveryInfo::Message { message, .. } = result.info else {
            panic!("expected a message");
        };
        assert!(message.contains("jane.doe@example.com"));
        assert!(message.contains("verify"));
        assert!(message.starts_with("Your message has been sent"));
    }

    #[test]
    fn warnings_are_included() {
        let mut delivery = delivery(ConfirmationStatus::Sent);
        delivery.warnings.insert(
            ContactField::Phone,
            vec!["input is not an American phone number".into()],
        );

        let result = DeliveryResult::from(Ok(delivery));

        let info = serde_json::to_value(&result.info).unwrap();
        assert_eq!(
            info["warnings"],
            json!({"phone": ["input is not an American phone number"]})
        );
    }

    #[test]
    fn invalid() {
        let problems = ValidationProblems::from([(
            ContactField::Header,
            vec!["header and message cannot match".to_owned()],
        )]);

        let result = DeliveryResult::from(Err(ContactSendMessageError::Invalid(problems)));

        assert_eq!(result.status, 400);
        assert_eq!(
            serde_json::to_value(&result.info).unwrap(),
            json!({"problems": {"header": ["header and message cannot match"]}})
        );
    }

    #[test]
    fn send_failed() {
        let result = DeliveryResult::from(Err(ContactSendMessageError::Send(anyhow::anyhow!(
            "connection refused"
        ))));

        assert_eq!(result.status, 500);
        assert_eq!(
            serde_json::to_value(&result.info).unwrap(),
            json!({"error": "Could not send message"})
        );
    }

    #[test]
    fn not_accepted() {
        let result = DeliveryResult::from(Err(ContactSendMessageError::NotAccepted));

        assert_eq!(result.status, 500);
        assert_eq!(
            result.info,
            DeliveryInfo::Error {
                error: "The message was not sent for an unknown reason".into()
            }
        );
    }
}
