// # HTTP IP Source
//
// This crate provides an HTTP-based IP source for nsddns.
//
// ## Architecture
//
// Fetches the current public IPv4 address from an external echo service
// (api.ipify.org by default). The service answers a plain GET with the
// address as the whole response body, so there is nothing to decode beyond
// trimming and parsing the text.
//
// One request per call; no polling, no caching, no retries.

use nsddns_core::traits::IpSource;
use nsddns_core::{Error, Result};

use std::net::Ipv4Addr;

/// Default IP echo service (returns plain-text IPv4)
pub const DEFAULT_IP_SERVICE_URL: &str = "https://api.ipify.org";

/// HTTP-based IP source
#[derive(Debug, Clone)]
pub struct HttpIpSource {
    /// URL to fetch the IP from
    url: String,

    /// HTTP client
    client: reqwest::Client,
}

impl HttpIpSource {
    /// Create a new HTTP IP source
    ///
    /// # Parameters
    ///
    /// - `url`: URL to fetch IP from (e.g., "https://api.ipify.org")
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
        }
    }

    /// The URL this source queries
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Default for HttpIpSource {
    fn default() -> Self {
        Self::new(DEFAULT_IP_SERVICE_URL)
    }
}

/// Interpret an echo-service body as an IPv4 address
fn parse_ip_body(body: &str) -> Result<Ipv4Addr> {
    let ip_text = body.trim();
    ip_text
        .parse()
        .map_err(|_| Error::parse(format!("Invalid IPv4 address from IP service: {:?}", ip_text)))
}

#[async_trait::async_trait]
impl IpSource for HttpIpSource {
    async fn current(&self) -> Result<Ipv4Addr> {
        tracing::debug!("Fetching current IP from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| Error::transport(format!("Error getting IP from {}: {}", self.url, e)))?;

        if !response.status().is_success() {
            return Err(Error::transport(format!(
                "IP service {} returned HTTP {}",
                self.url,
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::transport(format!("Error reading IP response body: {}", e)))?;

        let ip = parse_ip_body(&body)?;
        tracing::debug!("Current IP: {}", ip);
        Ok(ip)
    }

    fn source_name(&self) -> &'static str {
        "http"
    }
}
