use std::{net::IpAddr, path::Path};

use anyhow::Context;
use config::{Environment, File, FileFormat};
use postbox_models::email_address::EmailAddressWithName;
use serde::Deserialize;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");

/// Colon separated list of config files applied on top of the defaults.
pub const CONFIG_PATHS_ENV: &str = "POSTBOX_CONFIG";

/// Prefix of environment variables overriding single values, e.g.
/// `POSTBOX__EMAIL__SMTP_URL`.
pub const ENV_PREFIX: &str = "POSTBOX";

/// Load the default config, the files listed in `POSTBOX_CONFIG` and
/// overrides from the environment, in that order.
pub fn load() -> anyhow::Result<Config> {
    let mut paths = vec![DEFAULT_CONFIG_PATH.to_owned()];
    if let Ok(extra) = std::env::var(CONFIG_PATHS_ENV) {
        paths.extend(
            extra
                .split(':')
                .filter(|path| !path.is_empty())
                .map(Into::into),
        );
    }
    load_paths(&paths)
}

pub fn load_paths(paths: &[impl AsRef<Path>]) -> anyhow::Result<Config> {
    paths
        .iter()
        .try_fold(config::Config::builder(), |builder, path| {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))?;
            let source = File::from_str(&content, FileFormat::Toml);
            anyhow::Ok(builder.add_source(source))
        })?
        .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub http: HttpConfig,
    pub email: EmailConfig,
    pub contact: ContactConfig,
    pub health: HealthConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub host: IpAddr,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct EmailConfig {
    pub smtp_url: String,
    pub from: EmailAddressWithName,
}

#[derive(Debug, Deserialize)]
pub struct ContactConfig {
    /// Recipient of the contact form notifications.
    pub email: EmailAddressWithName,
    pub notification_subject: String,
    pub confirmation_subject: String,
}

#[derive(Debug, Deserialize)]
pub struct HealthConfig {
    pub cache_ttl: Duration,
}

/// A duration written as whitespace separated parts like `1d 2h 3m 4s`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Duration(pub std::time::Duration);

impl From<Duration> for std::time::Duration {
    fn from(value: Duration) -> Self {
        value.0
    }
}

impl<'de> Deserialize<'de> for Duration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.split_whitespace()
            .try_fold(std::time::Duration::ZERO, |total, part| {
                parse_duration_part(part).map(|part| total + part)
            })
            .map(Self)
            .ok_or_else(|| serde::de::Error::custom(format!("Invalid duration: {s:?}")))
    }
}

fn parse_duration_part(part: &str) -> Option<std::time::Duration> {
    let unit = part.chars().last()?;
    let factor = match unit {
        's' => 1,
        'm' => 60,
        'h' => 60 * 60,
        'd' => 24 * 60 * 60,
        _ => return None,
    };
    let value = &part[..part.len() - unit.len_utf8()];
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let seconds = value.parse::<u64>().ok()?.checked_mul(factor)?;
    Some(std::time::Duration::from_secs(seconds))
}
