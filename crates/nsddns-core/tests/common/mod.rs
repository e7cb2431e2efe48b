//! Test doubles and common utilities for engine contract tests
//!
//! These doubles record every call so tests can assert on what the engine
//! asked for, not only on what it returned.

#![allow(dead_code)]

use nsddns_core::error::{Error, Result};
use nsddns_core::traits::{DnsProvider, IpSource, ResourceRecord};
use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// An IpSource that returns a fixed address (or a fixed failure)
pub struct FixedIpSource {
    answer: Option<Ipv4Addr>,
    call_count: Arc<AtomicUsize>,
}

impl FixedIpSource {
    pub fn new(ip: Ipv4Addr) -> Self {
        Self {
            answer: Some(ip),
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A source whose every call fails with a transport error
    pub fn failing() -> Self {
        Self {
            answer: None,
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    pub fn sharing_counters_with(other: &Self) -> Self {
        Self {
            answer: other.answer,
            call_count: Arc::clone(&other.call_count),
        }
    }
}

#[async_trait::async_trait]
impl IpSource for FixedIpSource {
    async fn current(&self) -> Result<Ipv4Addr> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.answer
            .ok_or_else(|| Error::transport("connection refused"))
    }

    fn source_name(&self) -> &'static str {
        "fixed"
    }
}

/// Arguments the engine passed to `update_record`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateCall {
    pub domain: String,
    pub host: String,
    pub record_id: String,
    pub new_ip: String,
}

/// How the mock registrar answers
#[derive(Debug, Clone)]
pub enum RegistrarBehavior {
    /// Serve the stored records; updates succeed
    Healthy,
    /// Every read fails with this registrar detail
    RejectReads(String),
    /// Reads succeed, every write fails with this registrar detail
    RejectWrites(String),
}

/// A mock DnsProvider backed by an in-memory zone
///
/// Successful updates rewrite the stored record and hand out a fresh ID, the
/// way the real registrar does.
pub struct MockRegistrar {
    records: Arc<Mutex<Vec<ResourceRecord>>>,
    behavior: RegistrarBehavior,
    fetch_count: Arc<AtomicUsize>,
    updates: Arc<Mutex<Vec<UpdateCall>>>,
    next_id: Arc<AtomicUsize>,
}

impl MockRegistrar {
    pub fn new(records: Vec<ResourceRecord>) -> Self {
        Self {
            records: Arc::new(Mutex::new(records)),
            behavior: RegistrarBehavior::Healthy,
            fetch_count: Arc::new(AtomicUsize::new(0)),
            updates: Arc::new(Mutex::new(Vec::new())),
            next_id: Arc::new(AtomicUsize::new(2)),
        }
    }

    pub fn with_behavior(mut self, behavior: RegistrarBehavior) -> Self {
        self.behavior = behavior;
        self
    }

    pub fn fetch_count(&self) -> usize {
        self.fetch_count.load(Ordering::SeqCst)
    }

    pub fn update_count(&self) -> usize {
        self.updates.lock().unwrap().len()
    }

    pub fn updates(&self) -> Vec<UpdateCall> {
        self.updates.lock().unwrap().clone()
    }

    pub fn records(&self) -> Vec<ResourceRecord> {
        self.records.lock().unwrap().clone()
    }

    /// Create a registrar that shares zone and counters with an existing one
    pub fn sharing_counters_with(other: &Self) -> Self {
        Self {
            records: Arc::clone(&other.records),
            behavior: other.behavior.clone(),
            fetch_count: Arc::clone(&other.fetch_count),
            updates: Arc::clone(&other.updates),
            next_id: Arc::clone(&other.next_id),
        }
    }
}

#[async_trait::async_trait]
impl DnsProvider for MockRegistrar {
    async fn fetch_record(&self, domain: &str, full_host: &str) -> Result<ResourceRecord> {
        self.fetch_count.fetch_add(1, Ordering::SeqCst);

        if let RegistrarBehavior::RejectReads(detail) = &self.behavior {
            return Err(Error::api(detail.clone()));
        }

        nsddns_core::traits::find_a_record(self.records(), full_host, domain)
    }

    async fn update_record(
        &self,
        domain: &str,
        host: &str,
        record: &ResourceRecord,
        new_ip: &str,
    ) -> Result<String> {
        self.updates.lock().unwrap().push(UpdateCall {
            domain: domain.to_string(),
            host: host.to_string(),
            record_id: record.id.clone(),
            new_ip: new_ip.to_string(),
        });

        if let RegistrarBehavior::RejectWrites(detail) = &self.behavior {
            return Err(Error::api(detail.clone()));
        }

        let new_id = format!("r{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        let mut records = self.records.lock().unwrap();
        if let Some(stored) = records.iter_mut().find(|rr| rr.id == record.id) {
            stored.id = new_id.clone();
            stored.value = new_ip.to_string();
        }

        Ok(new_id)
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

/// Build an A record
pub fn a_record(id: &str, host: &str, value: &str) -> ResourceRecord {
    ResourceRecord {
        id: id.to_string(),
        record_type: "A".to_string(),
        host: host.to_string(),
        value: value.to_string(),
        ttl: 7207,
        distance: 0,
    }
}

/// The configuration used by the reference scenarios
pub fn scenario_config() -> nsddns_core::NsddnsConfig {
    nsddns_core::NsddnsConfig::new("example.com", "test", "k")
}
