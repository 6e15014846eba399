use postbox_models::contact::ContactSubmission;
use serde::Deserialize;
use serde_json::{Map, Value};

/// The json body of a contact form submission.
///
/// The body must be an object. Fields that are missing or not strings are
/// treated as absent and reported by validation instead of failing the whole
/// request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct ApiContactSubmission {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub header: Option<String>,
    pub message: Option<String>,
}

impl From<Map<String, Value>> for ApiContactSubmission {
    fn from(mut value: Map<String, Value>) -> Self {
        let mut field = |key: &str| match value.remove(key) {
            Some(Value::String(value)) => Some(value),
            _ => None,
        };

        Self {
            name: field("name"),
            email: field("email"),
            phone: field("phone"),
            header: field("header"),
            message: field("message"),
        }
    }
}

impl From<ApiContactSubmission> for ContactSubmission {
    fn from(value: ApiContactSubmission) -> Self {
        Self {
            name: value.name,
            email: value.email,
            phone: value.phone,
            header: value.header,
            message: value.message,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn non_strings_are_absent() {
        let body = json!({
            "name": 42,
            "email": "jane.doe@example.com",
            "phone": null,
            "header": ["Hello"],
            "extra": true,
        });

        let submission: ContactSubmission = serde_json::from_value::<ApiContactSubmission>(body)
            .unwrap()
            .into();

        assert_eq!(
            submission,
            ContactSubmission {
                email: Some("jane.doe@example.com".into()),
                ..Default::default()
            }
        );
    }

    #[test]
    fn strings_are_kept_verbatim() {
        let body = json!({"name": "  Jane   Doe ", "message": ""});

        let submission = serde_json::from_value::<ApiContactSubmission>(body).unwrap();

        assert_eq!(submission.name.as_deref(), Some("  Jane   Doe "));
        assert_eq!(submission.message.as_deref(), Some(""));
    }

    #[test]
    fn not_an_object() {
        for body in [json!(["Jane"]), json!("Jane"), json!(42)] {
            assert!(serde_json::from_value::<ApiContactSubmission>(body).is_err());
        }
    }
}
