// # nsddns-core
//
// Core library for nsddns, a one-shot dynamic DNS updater for A records
// hosted at Namesilo.
//
// ## Architecture Overview
//
// - **IpSource**: Trait for determining the current public IPv4 address
// - **DnsProvider**: Trait for reading and updating the managed record
// - **ReconcileEngine**: Resolves, compares and writes only when stale
// - **NsddnsConfig**: Domain, host and API key, loaded once per process
//
// ## Design Principles
//
// 1. **Separation of Concerns**: Core logic is separate from the HTTP/XML implementations
// 2. **Single-Shot**: One run per invocation, scheduling is external
// 3. **No Hidden Retries**: Every error aborts the run
// 4. **Idempotency**: A run with an unchanged IP never writes

pub mod traits;
pub mod engine;
pub mod config;
pub mod error;

// Re-export core types for convenience
pub use traits::{IpSource, DnsProvider, ResourceRecord};
pub use engine::{ReconcileEngine, ReconcileOutcome};
pub use config::{NsddnsConfig, full_hostname};
pub use error::{Error, Result};
