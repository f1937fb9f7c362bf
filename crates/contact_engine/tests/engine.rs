mod common;

use std::sync::Arc;
use std::time::Duration;

use common::StubTransport;
use contact_core::FormFieldSet;
use contact_engine::{EngineEvent, EngineHandle, FailureKind};

const WAIT: Duration = Duration::from_secs(5);

#[test]
fn every_overlapping_submission_reports_back() {
    let stub = StubTransport::responding("OK").with_delay(Duration::from_millis(50));
    let engine = EngineHandle::with_transport(Arc::new(stub.clone())).expect("engine");

    engine.submit(1, FormFieldSet::contact("Alice", "a@b.com", "Hi", ""));
    engine.submit(2, FormFieldSet::contact("Bob", "b@c.com", "Yo", ""));

    let mut attempts: Vec<_> = (0..2)
        .map(|_| match engine.recv_timeout(WAIT).expect("event") {
            EngineEvent::SubmissionCompleted { attempt, result } => {
                assert_eq!(result, Ok("OK".to_string()));
                attempt
            }
        })
        .collect();
    attempts.sort_unstable();

    assert_eq!(attempts, vec![1, 2]);
    assert_eq!(stub.calls(), 2);
    assert!(engine.try_recv().is_none());
}

#[test]
fn transport_errors_are_reported_as_events() {
    let stub = StubTransport::failing(FailureKind::Timeout, "took too long");
    let engine = EngineHandle::with_transport(Arc::new(stub)).expect("engine");

    engine.submit(7, FormFieldSet::contact("Alice", "a@b.com", "Hi", ""));

    match engine.recv_timeout(WAIT).expect("event") {
        EngineEvent::SubmissionCompleted { attempt, result } => {
            assert_eq!(attempt, 7);
            assert_eq!(result.unwrap_err().kind, FailureKind::Timeout);
        }
    }
}
