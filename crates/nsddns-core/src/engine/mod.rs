//! Reconciliation engine
//!
//! The ReconcileEngine is responsible for:
//! - Fetching the current public IP via IpSource
//! - Reading the managed A record via DnsProvider
//! - Deciding whether the record is stale
//! - Writing the new value when it is
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐      ┌──────────────────┐      ┌──────────────┐
//! │  IpSource   │─────▶│ ReconcileEngine  │◀────▶│ DnsProvider  │
//! │ (current)   │      │ (compare, decide)│      │ (fetch, put) │
//! └─────────────┘      └──────────────────┘      └──────────────┘
//! ```
//!
//! ## Flow
//!
//! 1. Resolve the current IP
//! 2. Fetch the record for the full hostname
//! 3. If the record value equals the IP, stop
//! 4. Otherwise update the record with the short host and the new IP
//!
//! Each run is single-shot. Any error aborts the run; there is no retry.

use crate::config::NsddnsConfig;
use crate::error::Result;
use crate::traits::{DnsProvider, IpSource};
use tracing::{debug, info};

/// What a run observed and did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileOutcome {
    /// Fully-qualified host that was reconciled
    pub hostname: String,
    /// Public IP at the time of the run
    pub current_ip: String,
    /// Registrar's record ID before the run
    pub record_id: String,
    /// Registrar's record value before the run
    pub record_value: String,
    /// Whether the record value differed from the current IP
    pub needs_update: bool,
    /// Record ID assigned by the registrar after a successful write
    pub new_record_id: Option<String>,
    /// Whether the write was suppressed by dry-run mode
    pub dry_run: bool,
}

impl ReconcileOutcome {
    /// Whether the registrar record was changed by this run
    pub fn updated(&self) -> bool {
        self.new_record_id.is_some()
    }
}

/// Core reconciliation engine
///
/// ## Lifecycle
///
/// 1. Create with [`ReconcileEngine::new()`]
/// 2. Call [`ReconcileEngine::run()`] once per scheduled invocation
///
/// The engine holds no state that changes between runs, so calling `run()`
/// twice is safe and the second call is a no-op when the IP did not move.
pub struct ReconcileEngine {
    /// IP source for the current public address
    ip_source: Box<dyn IpSource>,

    /// DNS provider for reading and writing the record
    provider: Box<dyn DnsProvider>,

    /// Immutable run configuration
    config: NsddnsConfig,

    /// Dry-run mode: read and decide but never write
    dry_run: bool,
}

impl ReconcileEngine {
    /// Create a new engine
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `config` does not validate.
    pub fn new(
        ip_source: Box<dyn IpSource>,
        provider: Box<dyn DnsProvider>,
        config: NsddnsConfig,
    ) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            ip_source,
            provider,
            config,
            dry_run: false,
        })
    }

    /// Enable or disable dry-run mode
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Run one reconciliation
    ///
    /// # Returns
    ///
    /// - `Ok(ReconcileOutcome)`: The record is (or, in dry-run, would be) current
    /// - `Err(Error)`: The first failure from the IP source or the provider
    pub async fn run(&self) -> Result<ReconcileOutcome> {
        let domain = self.config.domain.as_str();
        let hostname = self.config.full_hostname();

        debug!(
            "Reconciling {} via {} / {}",
            hostname,
            self.ip_source.source_name(),
            self.provider.provider_name()
        );

        let current_ip = self.ip_source.current().await?.to_string();
        let record = self.provider.fetch_record(domain, &hostname).await?;

        let needs_update = record.value != current_ip;
        info!(
            "Current IP: {}  RR (id: {}): {}  Needs update: {}",
            current_ip, record.id, record.value, needs_update
        );

        let mut outcome = ReconcileOutcome {
            hostname,
            current_ip,
            record_id: record.id.clone(),
            record_value: record.value.clone(),
            needs_update,
            new_record_id: None,
            dry_run: self.dry_run,
        };

        if !needs_update {
            info!("No update needed for {}", outcome.hostname);
            return Ok(outcome);
        }

        if self.dry_run {
            info!(
                "[DRY-RUN] Would update {} (id: {}) from {} to {}",
                outcome.hostname, record.id, record.value, outcome.current_ip
            );
            return Ok(outcome);
        }

        let new_id = self
            .provider
            .update_record(domain, &self.config.host, &record, &outcome.current_ip)
            .await?;

        info!(
            "{} DNS RR {} updated to {}",
            self.provider.provider_name(),
            new_id,
            outcome.current_ip
        );
        outcome.new_record_id = Some(new_id);

        Ok(outcome)
    }
}
