#![warn(missing_docs)]
//! # ppatcher-app
//!
//! ## Purpose
//! Wires the status reducer, interaction gate and view projection to an
//! updater service for one launcher session.
//!
//! ## Responsibilities
//! - Bootstrap a session: config fetch, channel subscriptions, ready signal.
//! - Fold updater events into status on a single queue.
//! - Route clicks through the interaction gate.
//! - Release subscriptions and timers on teardown.
//! - Load the effective configuration and replay recorded event transcripts
//!   for the command-line binary.
//!
//! ## Data flow
//! Updater events -> [`EventSink`] -> session queue -> reducer -> status
//! watch channel -> [`ppatcher_ui::render`]. Clicks -> [`LauncherSession`] ->
//! gate -> updater commands.
//!
//! ## Ownership and lifetimes
//! [`LauncherSession`] owns its subscriptions, pump task and gate; dropping
//! it tears all of them down.
//!
//! ## Error model
//! Bootstrap and transcript failures are wrapped in [`AppError`]. Config fetch
//! and command failures are logged and swallowed by design of the updater
//! contract.

mod replay;
mod service;
mod session;
mod subscription;

pub mod logging;

use std::path::{Path, PathBuf};

use ppatcher_config::{ConfigError, ConfigPayload, load_config_file, validate_backend};
use ppatcher_gate::GateError;
use thiserror::Error;

pub use replay::{format_frame, replay_transcript};
pub use service::{EventChannel, EventSink, ServiceError, SubscriptionId, UpdaterService};
pub use session::LauncherSession;
pub use subscription::Subscription;

/// Build-time application version loaded from root `VERSION` file.
pub const APP_VERSION: &str = env!("PPATCHER_VERSION");

/// Environment variable naming the configuration file.
pub const CONFIG_FILE_ENV: &str = "PPATCHER_CONFIG_FILE";
/// Configuration file used when [`CONFIG_FILE_ENV`] is unset.
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Returns the app version sourced from root `VERSION`.
pub fn app_version() -> &'static str {
    APP_VERSION
}

/// Resolves the configuration file path from an injectable env lookup.
pub fn config_path<F>(lookup: F) -> PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    lookup(CONFIG_FILE_ENV)
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

/// Builds the effective configuration payload: file contents (or nothing when
/// the file is missing or invalid), build defaults, then env overrides.
pub fn load_effective_config<F>(path: &Path, lookup: F) -> ConfigPayload
where
    F: Fn(&str) -> Option<String>,
{
    let payload = match load_config_file(path) {
        Ok(payload) => payload,
        Err(error) => {
            log::info!("{error}; using built-in defaults");
            ConfigPayload::default()
        }
    };

    let payload = payload.with_defaults().apply_env_overrides(lookup);
    if let Err(error) = payload.backend.as_deref().map(validate_backend).transpose() {
        log::warn!("{error}");
    }

    payload
}

/// App integration error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Interaction gate misuse.
    #[error("gate error: {0}")]
    Gate(#[from] GateError),
    /// Configuration could not be loaded.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    /// Updater refused a channel subscription.
    #[error("subscription to {channel} failed: {source}")]
    Subscribe {
        /// Channel that could not be subscribed.
        channel: EventChannel,
        /// Service-side failure.
        source: ServiceError,
    },
    /// Transcript line is not a valid event entry.
    #[error("transcript line {line}: {reason}")]
    Transcript {
        /// 1-based line number.
        line: usize,
        /// Decode failure description.
        reason: String,
    },
    /// I/O failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Invalid command-line usage.
    #[error("usage: {0}")]
    Usage(String),
}
