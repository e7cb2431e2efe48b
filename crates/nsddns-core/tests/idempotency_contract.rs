//! Contract Test: Idempotency Across Runs
//!
//! Each run is independent, yet repeating a run must be harmless.
//!
//! Constraints verified:
//! - A second run with an unchanged IP performs no write
//! - A run after the IP moves performs exactly one write
//! - The engine uses the registrar's current record ID, not a remembered one

mod common;

use common::*;
use nsddns_core::ReconcileEngine;
use std::net::Ipv4Addr;
use std::sync::Arc;

fn run_engine(ip: Ipv4Addr, registrar: &Arc<MockRegistrar>) -> ReconcileEngine {
    ReconcileEngine::new(
        Box::new(FixedIpSource::new(ip)),
        Box::new(MockRegistrar::sharing_counters_with(registrar)),
        scenario_config(),
    )
    .expect("engine construction succeeds")
}

#[tokio::test]
async fn second_run_with_same_ip_does_not_write() {
    let registrar = Arc::new(MockRegistrar::new(vec![a_record(
        "r1",
        "test.example.com",
        "1.2.3.4",
    )]));
    let ip = Ipv4Addr::new(5, 6, 7, 8);

    let first = run_engine(ip, &registrar).run().await.unwrap();
    assert!(first.updated());
    assert_eq!(registrar.update_count(), 1);

    let second = run_engine(ip, &registrar).run().await.unwrap();
    assert!(!second.needs_update);
    assert_eq!(
        registrar.update_count(),
        1,
        "second run must not issue a write"
    );
}

#[tokio::test]
async fn same_engine_run_twice_is_idempotent() {
    let registrar = Arc::new(MockRegistrar::new(vec![a_record(
        "r1",
        "test.example.com",
        "1.2.3.4",
    )]));
    let engine = run_engine(Ipv4Addr::new(1, 2, 3, 4), &registrar);

    engine.run().await.unwrap();
    engine.run().await.unwrap();

    assert_eq!(registrar.fetch_count(), 2);
    assert_eq!(registrar.update_count(), 0);
}

#[tokio::test]
async fn ip_change_between_runs_uses_reassigned_record_id() {
    let registrar = Arc::new(MockRegistrar::new(vec![a_record(
        "r1",
        "test.example.com",
        "1.2.3.4",
    )]));

    let first = run_engine(Ipv4Addr::new(5, 6, 7, 8), &registrar)
        .run()
        .await
        .unwrap();
    let reassigned = first.new_record_id.clone().unwrap();
    assert_ne!(reassigned, "r1");

    let second = run_engine(Ipv4Addr::new(9, 9, 9, 9), &registrar)
        .run()
        .await
        .unwrap();
    assert_eq!(second.record_id, reassigned);
    assert_eq!(second.record_value, "5.6.7.8");

    let updates = registrar.updates();
    assert_eq!(updates.len(), 2);
    assert_eq!(updates[1].record_id, reassigned);
    assert_eq!(updates[1].new_ip, "9.9.9.9");
}
