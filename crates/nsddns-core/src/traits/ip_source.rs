// # IP Source Trait
//
// Defines the interface for determining the machine's current public IPv4
// address.
//
// ## Implementations
//
// - HTTP echo service (ipify): `nsddns-ip-http` crate
//
// ## Usage
//
// ```rust,ignore
// use nsddns_core::IpSource;
//
// async fn show(source: &dyn IpSource) -> nsddns_core::Result<()> {
//     let ip = source.current().await?;
//     println!("public address: {}", ip);
//     Ok(())
// }
// ```

use async_trait::async_trait;
use std::net::Ipv4Addr;

/// Trait for IP source implementations
///
/// A source answers one question per call and keeps nothing between calls.
///
/// ## Forbidden Capabilities
/// - ❌ Retry or back off (a failed run is re-invoked by the scheduler)
/// - ❌ Cache the previous answer
/// - ❌ Talk to the registrar
#[async_trait]
pub trait IpSource: Send + Sync {
    /// Get the current public IPv4 address
    ///
    /// # Returns
    ///
    /// - `Ok(Ipv4Addr)`: The current address
    /// - `Err(Error)`: Transport failure or an unparseable answer
    async fn current(&self) -> Result<Ipv4Addr, crate::Error>;

    /// Short name of the source (for logging)
    fn source_name(&self) -> &'static str;
}
