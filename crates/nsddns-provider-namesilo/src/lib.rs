// # Namesilo DNS Provider
//
// This crate provides the Namesilo DNS provider for nsddns.
//
// ## Scope
//
// - ✅ Reads a domain's records with one GET to `dnsListRecords`
// - ✅ Updates one record with one GET to `dnsUpdateRecord`
// - ✅ Validates the `<reply><code>` of every response (300 = success)
// - ❌ NO retry logic (a failed run is re-invoked by the scheduler)
// - ❌ NO record creation (a missing record is an error)
// - ❌ NO caching
//
// ## Security Requirements
//
// - API key NEVER appears in logs or error messages
// - Request URLs (which carry the key) are stripped from transport errors
//
// ## API Reference
//
// - List DNS Records: GET `/api/dnsListRecords?version=1&type=xml&key=&domain=`
// - Update DNS Record: GET `/api/dnsUpdateRecord?version=1&type=xml&key=&domain=&rrid=&rrhost=&rrvalue=`
//
// Namesilo exposes mutations as GET requests too; that is the API's contract,
// not a choice made here.

pub mod xml;

use async_trait::async_trait;
use nsddns_core::traits::{DnsProvider, ResourceRecord, find_a_record};
use nsddns_core::{Error, Result};
use reqwest::Url;

/// Namesilo API base URL
pub const NAMESILO_API_BASE: &str = "https://www.namesilo.com/api";

/// Namesilo API version
const NAMESILO_API_VERSION: &str = "1";

/// Response format requested from the API
const NAMESILO_RESPONSE_TYPE: &str = "xml";

/// Build the `dnsListRecords` request URL
///
/// # Errors
///
/// A configuration error if `base` is not a valid URL.
pub fn list_records_url(base: &str, api_key: &str, domain: &str) -> Result<Url> {
    endpoint_url(
        base,
        "dnsListRecords",
        &[("key", api_key), ("domain", domain)],
    )
}

/// Build the `dnsUpdateRecord` request URL
///
/// `host` is the short host (subdomain only, empty for the apex record), not
/// the fully-qualified name the list endpoint reports.
///
/// # Errors
///
/// A configuration error if `base` is not a valid URL.
pub fn update_record_url(
    base: &str,
    api_key: &str,
    domain: &str,
    record_id: &str,
    host: &str,
    ip: &str,
) -> Result<Url> {
    endpoint_url(
        base,
        "dnsUpdateRecord",
        &[
            ("key", api_key),
            ("domain", domain),
            ("rrid", record_id),
            ("rrhost", host),
            ("rrvalue", ip),
        ],
    )
}

fn endpoint_url(base: &str, operation: &str, params: &[(&str, &str)]) -> Result<Url> {
    let endpoint = format!("{}/{}", base.trim_end_matches('/'), operation);
    let common = [
        ("version", NAMESILO_API_VERSION),
        ("type", NAMESILO_RESPONSE_TYPE),
    ];

    Url::parse_with_params(&endpoint, common.iter().chain(params.iter()))
        .map_err(|e| Error::config(format!("Invalid Namesilo API base URL {:?}: {}", base, e)))
}

/// Namesilo DNS provider
///
/// Stateless and single-shot: every method issues exactly one HTTP request.
///
/// # Security
///
/// The Debug implementation intentionally does NOT expose the API key.
pub struct NamesiloProvider {
    /// Namesilo API key
    /// ⚠️ NEVER log this value
    api_key: String,

    /// API base URL (overridable for tests)
    base_url: String,

    /// HTTP client for API requests
    client: reqwest::Client,
}

// Custom Debug implementation that hides the API key
impl std::fmt::Debug for NamesiloProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NamesiloProvider")
            .field("api_key", &"<REDACTED>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl NamesiloProvider {
    /// Create a provider talking to the production Namesilo API
    ///
    /// # Errors
    ///
    /// A configuration error if `api_key` is empty.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_base_url(api_key, NAMESILO_API_BASE)
    }

    /// Create a provider talking to an alternate API base URL
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(Error::config("Namesilo API key cannot be empty"));
        }

        Ok(Self {
            api_key,
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        })
    }

    /// Issue one GET and return the body text
    async fn get_text(&self, operation: &str, url: Url) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| {
                Error::transport(format!("{} request failed: {}", operation, e.without_url()))
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::transport(format!(
                "{} returned HTTP {}",
                operation, status
            )));
        }

        response.text().await.map_err(|e| {
            Error::transport(format!(
                "Failed to read {} response: {}",
                operation,
                e.without_url()
            ))
        })
    }
}

#[async_trait]
impl DnsProvider for NamesiloProvider {
    /// Fetch the A record for `full_host`
    ///
    /// # API Call
    ///
    /// ```http
    /// GET /api/dnsListRecords?version=1&type=xml&key=<key>&domain=example.com
    /// ```
    async fn fetch_record(&self, domain: &str, full_host: &str) -> Result<ResourceRecord> {
        tracing::debug!("Listing Namesilo DNS records for {}", domain);

        let url = list_records_url(&self.base_url, &self.api_key, domain)?;
        let body = self.get_text("dnsListRecords", url).await?;
        let records = xml::parse_list_records(&body)?;

        let record = find_a_record(records, full_host, domain)?;
        tracing::debug!(
            "Found A record {} for {}: {}",
            record.id,
            record.host,
            record.value
        );
        Ok(record)
    }

    /// Point `record` at `new_ip`
    ///
    /// # API Call
    ///
    /// ```http
    /// GET /api/dnsUpdateRecord?version=1&type=xml&key=<key>&domain=example.com&rrid=<id>&rrhost=home&rrvalue=203.0.113.7
    /// ```
    async fn update_record(
        &self,
        domain: &str,
        host: &str,
        record: &ResourceRecord,
        new_ip: &str,
    ) -> Result<String> {
        tracing::debug!(
            "Updating Namesilo record {} ({}) in {} to {}",
            record.id,
            record.host,
            domain,
            new_ip
        );

        let url = update_record_url(&self.base_url, &self.api_key, domain, &record.id, host, new_ip)?;
        let body = self.get_text("dnsUpdateRecord", url).await?;

        xml::parse_update_record(&body)
    }

    fn provider_name(&self) -> &'static str {
        "namesilo"
    }
}
