//! Integration tests for the click feedback pulse.

mod common;

use std::sync::Arc;

use common::{ScriptedCommands, Settle, run_pending_tasks};
use ppatcher_gate::{Control, GateTiming, InteractionGate, InteractionState};

#[tokio::test(start_paused = true)]
async fn click_pulse_tests_pulse_ends_independently_of_command() {
    let commands = Arc::new(ScriptedCommands::new(Settle::Hold));
    let timing = GateTiming::default();
    let gate = InteractionGate::new(commands.clone(), timing);

    gate.trigger_start().expect("runtime is available");
    let snapshot = gate.snapshot();
    assert!(snapshot.pulse.is_active(Control::Start));
    assert!(!snapshot.pulse.is_active(Control::UpdateCheck));

    tokio::time::advance(timing.pulse_duration + std::time::Duration::from_millis(1)).await;
    run_pending_tasks().await;

    let snapshot = gate.snapshot();
    assert!(!snapshot.pulse.is_active(Control::Start));
    assert_eq!(snapshot.interaction, InteractionState::LOCKED);
    assert_eq!(commands.start_calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn click_pulse_tests_pulse_duration_counts_from_click() {
    let commands = Arc::new(ScriptedCommands::new(Settle::Hold));
    let timing = GateTiming::default();
    let gate = InteractionGate::new(commands.clone(), timing);

    gate.trigger_start().expect("runtime is available");
    tokio::time::advance(std::time::Duration::from_millis(150)).await;
    run_pending_tasks().await;
    assert!(gate.snapshot().pulse.is_active(Control::Start));

    tokio::time::advance(std::time::Duration::from_millis(60)).await;
    run_pending_tasks().await;
    assert!(!gate.snapshot().pulse.is_active(Control::Start));
    assert_eq!(gate.snapshot().interaction, InteractionState::LOCKED);
}
