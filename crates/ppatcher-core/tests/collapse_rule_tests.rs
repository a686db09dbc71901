//! Integration tests for the ready-collapse rule.

use ppatcher_core::{Progress, StatusSnapshot, UpdateStatus, UpdaterEvent, reduce};

fn at(status: UpdateStatus, progress: f64) -> StatusSnapshot {
    StatusSnapshot {
        status,
        progress: Progress::clamped(progress),
        entry_key: 0,
    }
}

fn ready() -> UpdaterEvent {
    UpdaterEvent::StatusChanged("ready".to_string())
}

#[test]
fn collapse_rule_tests_redundant_ready_becomes_already_ready() {
    assert_eq!(
        reduce(&at(UpdateStatus::Ready, 1.0), &ready()).status,
        UpdateStatus::AlreadyReady
    );
    assert_eq!(
        reduce(&at(UpdateStatus::AlreadyReady, 1.0), &ready()).status,
        UpdateStatus::AlreadyReady
    );
    assert_eq!(
        reduce(&at(UpdateStatus::Checking, 0.2), &ready()).status,
        UpdateStatus::Ready
    );
}

#[test]
fn collapse_rule_tests_ready_forces_full_progress_from_any_state() {
    for status in [
        UpdateStatus::Idle,
        UpdateStatus::Checking,
        UpdateStatus::Downloading,
        UpdateStatus::Ready,
        UpdateStatus::Error,
        UpdateStatus::AlreadyReady,
    ] {
        let next = reduce(&at(status, 0.1), &ready());
        assert_eq!(next.progress.value(), 1.0, "from {status:?}");
    }
}

#[test]
fn collapse_rule_tests_explicit_status_leaves_ready_class() {
    let next = reduce(
        &at(UpdateStatus::AlreadyReady, 1.0),
        &UpdaterEvent::StatusChanged("checking".to_string()),
    );
    assert_eq!(next.status, UpdateStatus::Checking);
}
