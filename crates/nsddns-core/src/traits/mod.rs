//! Core traits for nsddns
//!
//! This module defines the abstract interfaces the engine depends on.
//!
//! - [`IpSource`]: Determine the current public IPv4 address
//! - [`DnsProvider`]: Read and update the managed record via a registrar API

pub mod ip_source;
pub mod dns_provider;

pub use ip_source::IpSource;
pub use dns_provider::{DnsProvider, ResourceRecord, find_a_record, A_RECORD_TYPE};
