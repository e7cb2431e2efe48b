//! Configuration for nsddns
//!
//! A single JSON object, loaded once per process and never mutated:
//!
//! ```json
//! { "domain": "example.com", "host": "home", "api_key": "..." }
//! ```
//!
//! `host` may be omitted or empty to target the apex record. The older
//! spellings `subdomain`, `apiKey` and the capitalised `Domain`/`Host`/`ApiKey`
//! are accepted as well.

use serde::Deserialize;
use std::path::Path;

/// Default location of the configuration file
pub const DEFAULT_CONFIG_PATH: &str = "/etc/nsddns/conf.json";

/// Maximum length of a fully-qualified DNS name (RFC 1035)
const MAX_NAME_LEN: usize = 253;

/// Maximum length of a single DNS label (RFC 1035)
const MAX_LABEL_LEN: usize = 63;

/// Main nsddns configuration
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct NsddnsConfig {
    /// Registered domain whose A record is managed (e.g. "example.com")
    #[serde(alias = "Domain")]
    pub domain: String,

    /// Subdomain label(s); empty means the apex record
    #[serde(default, alias = "subdomain", alias = "Host")]
    pub host: String,

    /// Namesilo API key
    /// ⚠️ NEVER log this value
    #[serde(alias = "apiKey", alias = "ApiKey")]
    pub api_key: String,
}

// Custom Debug implementation that hides the API key
impl std::fmt::Debug for NsddnsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NsddnsConfig")
            .field("domain", &self.domain)
            .field("host", &self.host)
            .field("api_key", &"<REDACTED>")
            .finish()
    }
}

impl NsddnsConfig {
    /// Create a configuration from its parts
    pub fn new(
        domain: impl Into<String>,
        host: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            domain: domain.into(),
            host: host.into(),
            api_key: api_key.into(),
        }
    }

    /// Parse and validate a configuration from JSON text
    pub fn from_json(json: &str) -> Result<Self, crate::Error> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate the configuration file at `path`
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, crate::Error> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path).map_err(|e| {
            crate::Error::config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        Self::from_json(&data)
    }

    /// The name the registrar reports for the managed record
    pub fn full_hostname(&self) -> String {
        full_hostname(&self.domain, &self.host)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.domain.is_empty() {
            return Err(crate::Error::config("domain is required"));
        }
        if self.api_key.is_empty() {
            return Err(crate::Error::config("api_key is required"));
        }

        validate_name(&self.domain)?;
        if !self.host.is_empty() {
            validate_name(&self.host)?;
        }

        let full = self.full_hostname();
        if full.len() > MAX_NAME_LEN {
            return Err(crate::Error::config(format!(
                "Host name too long: {} chars (max {}). Got: {}",
                full.len(),
                MAX_NAME_LEN,
                full
            )));
        }

        Ok(())
    }
}

/// Join a subdomain and a domain the way the registrar reports record hosts
///
/// An empty `host` yields the apex `domain` itself.
pub fn full_hostname(domain: &str, host: &str) -> String {
    if host.is_empty() {
        domain.to_string()
    } else {
        format!("{}.{}", host, domain)
    }
}

/// Basic DNS name validation per RFC 1035
///
/// Underscores and a `*` wildcard label are tolerated since registrars allow
/// both in record hosts.
fn validate_name(name: &str) -> Result<(), crate::Error> {
    if name.len() > MAX_NAME_LEN {
        return Err(crate::Error::config(format!(
            "Name too long: {} chars (max {}). Got: {}",
            name.len(),
            MAX_NAME_LEN,
            name
        )));
    }

    for label in name.split('.') {
        if label.is_empty() {
            return Err(crate::Error::config(format!(
                "Name has empty label: '{}'",
                name
            )));
        }

        if label.len() > MAX_LABEL_LEN {
            return Err(crate::Error::config(format!(
                "Label too long: {} chars (max {}). Label: '{}'",
                label.len(),
                MAX_LABEL_LEN,
                label
            )));
        }

        if label == "*" {
            continue;
        }

        if !label
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(crate::Error::config(format!(
                "Label contains invalid characters: '{}'",
                label
            )));
        }

        if label.starts_with('-') || label.ends_with('-') {
            return Err(crate::Error::config(format!(
                "Label cannot start or end with hyphen: '{}'",
                label
            )));
        }
    }

    Ok(())
}
