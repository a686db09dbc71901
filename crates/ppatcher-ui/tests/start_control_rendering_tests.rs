//! Integration tests for Start control rendering.

use ppatcher_config::AppConfig;
use ppatcher_core::StatusSnapshot;
use ppatcher_gate::{ClickPulse, GateSnapshot, InteractionState};
use ppatcher_ui::{START_LABEL, render};

#[test]
fn start_control_rendering_tests_hidden_without_executable_in_every_gate_state() {
    let config = AppConfig::default();
    for interaction in [InteractionState::default(), InteractionState::LOCKED] {
        for pulse in [ClickPulse::default(), ClickPulse { check: true, start: true }] {
            let gate = GateSnapshot { interaction, pulse };
            let view = render(&StatusSnapshot::default(), &gate, &config);
            assert!(view.start.is_none());
        }
    }
}

#[test]
fn start_control_rendering_tests_shown_and_disabled_with_executable() {
    let config = AppConfig {
        has_executable: true,
        ..AppConfig::default()
    };
    let gate = GateSnapshot {
        interaction: InteractionState::LOCKED,
        pulse: ClickPulse::default(),
    };

    let view = render(&StatusSnapshot::default(), &gate, &config);
    let start = view.start.expect("start control should render");
    assert_eq!(start.label, START_LABEL);
    assert!(start.disabled);
    assert_eq!(start.background, "#d1d5db");
    assert!(view.check.disabled);
}
