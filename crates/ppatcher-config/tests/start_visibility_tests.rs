//! Integration tests for Start control availability.

use ppatcher_config::{AppConfig, ConfigPayload};

fn with_executable(executable: Option<&str>) -> AppConfig {
    AppConfig::from_payload(&ConfigPayload {
        executable: executable.map(str::to_string),
        ..ConfigPayload::default()
    })
}

#[test]
fn start_visibility_tests_requires_non_blank_executable() {
    assert!(!with_executable(None).has_executable);
    assert!(!with_executable(Some("")).has_executable);
    assert!(!with_executable(Some("   ")).has_executable);
    assert!(with_executable(Some("bin/game")).has_executable);
}

#[test]
fn start_visibility_tests_default_config_hides_start() {
    assert!(!AppConfig::default().has_executable);
}
