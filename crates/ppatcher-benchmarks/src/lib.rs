//! Deterministic workloads shared by the benchmark smoke tests.

use ppatcher_core::UpdaterEvent;

/// One full update cycle: check, download in `steps` increments, then two
/// ready notifications.
pub fn update_cycle(steps: u32) -> Vec<UpdaterEvent> {
    let mut events = vec![
        UpdaterEvent::StatusChanged("checking".to_string()),
        UpdaterEvent::StatusChanged("downloading".to_string()),
    ];
    let total = f64::from(steps.max(1));
    events.extend((1..=steps).map(|step| UpdaterEvent::ProgressChanged(f64::from(step) / total)));
    events.push(UpdaterEvent::StatusChanged("ready".to_string()));
    events.push(UpdaterEvent::StatusChanged("ready".to_string()));
    events
}
