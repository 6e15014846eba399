use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

/// Problem reported by every validator that receives no usable value.
pub const NO_VALUE_PROVIDED: &str = "no value provided";

/// A contact form submission exactly as it was received.
///
/// A field is `None` if it was missing or not a string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub header: Option<String>,
    pub message: Option<String>,
}

/// The fields of the contact form, ordered as they appear on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactField {
    Name,
    Email,
    Phone,
    Header,
    Message,
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Header => "header",
            Self::Message => "message",
        })
    }
}

/// Problems (or warnings) per field. Fields without entries are omitted.
pub type ValidationProblems = BTreeMap<ContactField, Vec<String>>;

/// The result of validating a single field.
///
/// `value` is empty if and only if `problems` is not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldResult {
    pub value: String,
    pub problems: Vec<String>,
    pub warnings: Vec<String>,
}

impl FieldResult {
    /// Builds a result from a normalized value and the problems found while
    /// checking it. The value is discarded if there are any problems.
    pub fn new(value: String, problems: Vec<String>) -> Self {
        Self::with_warnings(value, problems, Vec::new())
    }

    pub fn with_warnings(value: String, problems: Vec<String>, warnings: Vec<String>) -> Self {
        let value = if problems.is_empty() {
            value
        } else {
            String::new()
        };
        Self {
            value,
            problems,
            warnings,
        }
    }

    pub fn no_value() -> Self {
        Self {
            value: String::new(),
            problems: vec![NO_VALUE_PROVIDED.into()],
            warnings: Vec::new(),
        }
    }

    pub fn is_valid(&self) -> bool {
        !self.value.is_empty()
    }
}

/// The normalized values of a fully validated submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactFormValues {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub header: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Valid {
        values: ContactFormValues,
        /// Non-blocking notes about individual fields.
        warnings: ValidationProblems,
    },
    Invalid {
        problems: ValidationProblems,
    },
}
