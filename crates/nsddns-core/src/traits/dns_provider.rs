// # DNS Provider Trait
//
// Defines the interface for reading and updating the managed A record via a
// registrar's API.
//
// ## Implementations
//
// - Namesilo: `nsddns-provider-namesilo` crate
//
// ## Usage
//
// ```rust,ignore
// use nsddns_core::DnsProvider;
//
// async fn bump(provider: &dyn DnsProvider) -> nsddns_core::Result<()> {
//     let record = provider.fetch_record("example.com", "home.example.com").await?;
//     let new_id = provider
//         .update_record("example.com", "home", &record, "203.0.113.7")
//         .await?;
//     println!("record {} is now {}", record.id, new_id);
//     Ok(())
// }
// ```

use async_trait::async_trait;

/// Record type managed by nsddns
pub const A_RECORD_TYPE: &str = "A";

/// A DNS resource record as the registrar reports it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    /// Registrar-assigned record ID (opaque, changes on update)
    pub id: String,
    /// Record type (e.g. "A", "CNAME")
    pub record_type: String,
    /// Fully-qualified host (e.g. "home.example.com")
    pub host: String,
    /// Record value; the IPv4 address for A records
    pub value: String,
    /// Time-to-live in seconds
    pub ttl: u32,
    /// Priority (MX distance); zero for A records
    pub distance: u32,
}

impl ResourceRecord {
    /// Whether this is the A record for `full_host` (exact, case-sensitive)
    pub fn is_a_record_for(&self, full_host: &str) -> bool {
        self.record_type == A_RECORD_TYPE && self.host == full_host
    }
}

/// Pick the A record for `full_host` out of a domain's record list
///
/// The first match in list order wins; the order is whatever the registrar
/// returned.
///
/// # Errors
///
/// [`crate::Error::NotFound`] naming `full_host` and `domain` when no record
/// matches.
pub fn find_a_record(
    records: impl IntoIterator<Item = ResourceRecord>,
    full_host: &str,
    domain: &str,
) -> Result<ResourceRecord, crate::Error> {
    records
        .into_iter()
        .find(|rr| rr.is_a_record_for(full_host))
        .ok_or_else(|| crate::Error::not_found(full_host, domain))
}

/// Trait for DNS provider implementations
///
/// Providers translate the two registrar calls the engine needs. They are
/// stateless and single-shot: one HTTP request per method call.
///
/// ## Forbidden Capabilities
/// - ❌ Retry or back off (a failed run is re-invoked by the scheduler)
/// - ❌ Decide whether an update is needed (owned by `ReconcileEngine`)
/// - ❌ Create records that do not exist
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// Fetch the A record whose host equals `full_host`
    ///
    /// # Parameters
    ///
    /// - `domain`: The registered domain to list records for
    /// - `full_host`: Fully-qualified host to match ("example.com" for apex)
    ///
    /// # Returns
    ///
    /// - `Ok(ResourceRecord)`: The first matching A record
    /// - `Err(Error::Api)`: The registrar rejected the request
    /// - `Err(Error::NotFound)`: No matching A record
    async fn fetch_record(
        &self,
        domain: &str,
        full_host: &str,
    ) -> Result<ResourceRecord, crate::Error>;

    /// Point `record` at `new_ip`
    ///
    /// # Parameters
    ///
    /// - `domain`: The registered domain
    /// - `host`: The short host (subdomain only, empty for apex)
    /// - `record`: The record previously returned by [`fetch_record`](Self::fetch_record)
    /// - `new_ip`: The value to store
    ///
    /// # Returns
    ///
    /// The record ID assigned by the registrar, which may differ from
    /// `record.id`.
    async fn update_record(
        &self,
        domain: &str,
        host: &str,
        record: &ResourceRecord,
        new_ip: &str,
    ) -> Result<String, crate::Error>;

    /// Get the provider name (for logging/debugging)
    fn provider_name(&self) -> &'static str;
}
