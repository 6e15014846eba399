use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// A syntactically valid email address as understood by the mail transport.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmailAddress(pub lettre::Address);

/// An email address with an optional display name, e.g. `Jane Doe <jane@example.com>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailAddressWithName(pub lettre::message::Mailbox);

impl EmailAddress {
    pub fn as_str(&self) -> &str {
        self.0.as_ref()
    }

    pub fn with_name(self, name: impl Into<String>) -> EmailAddressWithName {
        EmailAddressWithName(lettre::message::Mailbox {
            name: Some(name.into()),
            email: self.0,
        })
    }
}

impl EmailAddressWithName {
    pub fn email(&self) -> EmailAddress {
        EmailAddress(self.0.email.clone())
    }

    pub fn name(&self) -> Option<&str> {
        self.0.name.as_deref()
    }
}

impl From<EmailAddress> for EmailAddressWithName {
    fn from(value: EmailAddress) -> Self {
        Self(lettre::message::Mailbox {
            name: None,
            email: value.0,
        })
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Display for EmailAddressWithName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for EmailAddress {
    type Err = <lettre::Address as FromStr>::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

impl FromStr for EmailAddressWithName {
    type Err = <lettre::message::Mailbox as FromStr>::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_with_name() {
        let mailbox = "Jane Doe <jane.doe@example.com>"
            .parse::<EmailAddressWithName>()
            .unwrap();

        assert_eq!(mailbox.name(), Some("Jane Doe"));
        assert_eq!(mailbox.email().as_str(), "jane.doe@example.com");
    }

    #[test]
    fn with_name() {
        let address = "jane.doe@example.com".parse::<EmailAddress>().unwrap();

        let mailbox = address.with_name("Jane Doe");

        assert_eq!(mailbox.name(), Some("Jane Doe"));
        assert_eq!(mailbox.email().as_str(), "jane.doe@example.com");
    }

    #[test]
    fn deserialize_from_string() {
        let mailbox = serde_json::from_value::<EmailAddressWithName>(serde_json::json!(
            "Site Owner <owner@example.com>"
        ))
        .unwrap();

        assert_eq!(mailbox.email().as_str(), "owner@example.com");
    }

    #[test]
    fn reject_invalid() {
        assert!("no-at-sign".parse::<EmailAddress>().is_err());
    }
}
