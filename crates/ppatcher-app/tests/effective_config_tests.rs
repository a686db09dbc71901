//! Integration tests for effective configuration loading.

use std::path::Path;

use ppatcher_app::load_effective_config;
use ppatcher_config::{AppConfig, ColorPalette, DEFAULT_BACKEND};

fn fixture(name: &str) -> String {
    format!("{}/../../contracts/fixtures/{name}", env!("CARGO_MANIFEST_DIR"))
}

#[test]
fn effective_config_tests_missing_file_uses_defaults() {
    let payload = load_effective_config(Path::new("/nonexistent/config.json"), |_| None);

    assert_eq!(payload.backend.as_deref(), Some(DEFAULT_BACKEND));
    assert!(!AppConfig::from_payload(&payload).has_executable);
}

#[test]
fn effective_config_tests_env_overrides_file_values() {
    let payload = load_effective_config(Path::new(&fixture("app-config.valid.json")), |key| {
        (key == "COLOR_PALETTE").then(|| "green".to_string())
    });
    let config = AppConfig::from_payload(&payload);

    assert_eq!(config.color_palette, ColorPalette::Green);
    assert!(config.has_executable);
}
