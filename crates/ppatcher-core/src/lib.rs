#![warn(missing_docs)]
//! # ppatcher-core
//!
//! ## Purpose
//! Defines the update-status model and the pure reducer that folds updater
//! notifications into launcher state.
//!
//! ## Responsibilities
//! - Represent update statuses and normalized download progress.
//! - Decode raw `downloadStatus` / `downloadProgress` notifications.
//! - Fold events into a [`StatusSnapshot`] with the ready-collapse rule.
//!
//! ## Data flow
//! Updater service emits wire events -> [`UpdaterEvent::from_wire`] ->
//! [`StatusReducer::apply`] -> snapshot consumed by UI projection.
//!
//! ## Ownership and lifetimes
//! Snapshots are small `Copy` values; callers hold their own copies and never
//! borrow reducer internals.
//!
//! ## Error model
//! Decoding failures surface as [`CoreError`]. The reducer itself is total:
//! an unrecognized status is folded into [`UpdateStatus::Error`] and logged.
//!
//! ## Concurrency notes
//! No interior mutability. Events must be applied one at a time in arrival
//! order; any interleaving of status and progress events is tolerated.
//!
//! ## Example
//! ```rust
//! use ppatcher_core::{StatusReducer, UpdateStatus, UpdaterEvent};
//!
//! let mut reducer = StatusReducer::new();
//! reducer.apply(&UpdaterEvent::StatusChanged("ready".to_string()));
//! let snapshot = reducer.apply(&UpdaterEvent::StatusChanged("ready".to_string()));
//! assert_eq!(snapshot.status, UpdateStatus::AlreadyReady);
//! assert_eq!(snapshot.progress.value(), 1.0);
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Event channel carrying status names.
pub const STATUS_CHANNEL: &str = "downloadStatus";
/// Event channel carrying raw progress fractions.
pub const PROGRESS_CHANNEL: &str = "downloadProgress";

/// Launcher-side update status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UpdateStatus {
    /// Session started, nothing reported yet.
    #[default]
    Idle,
    /// Updater is comparing local and remote manifests.
    Checking,
    /// Updater is fetching files.
    Downloading,
    /// Files were just brought up to date.
    Ready,
    /// Updater reported a failure.
    Error,
    /// Files were already up to date.
    AlreadyReady,
}

impl UpdateStatus {
    /// Maps an updater wire name to a status.
    ///
    /// `idle` is launcher-local and never accepted from the wire.
    ///
    /// # Errors
    /// Returns [`CoreError::UnknownStatus`] for any other value.
    pub fn from_wire(raw: &str) -> Result<Self, CoreError> {
        match raw {
            "checking" => Ok(Self::Checking),
            "downloading" => Ok(Self::Downloading),
            "ready" => Ok(Self::Ready),
            "error" => Ok(Self::Error),
            "alreadyReady" => Ok(Self::AlreadyReady),
            other => Err(CoreError::UnknownStatus(other.to_string())),
        }
    }

    /// Returns the wire name, or `None` for [`UpdateStatus::Idle`].
    pub fn wire_name(self) -> Option<&'static str> {
        match self {
            Self::Idle => None,
            Self::Checking => Some("checking"),
            Self::Downloading => Some("downloading"),
            Self::Ready => Some("ready"),
            Self::Error => Some("error"),
            Self::AlreadyReady => Some("alreadyReady"),
        }
    }

    /// Returns `true` for `Ready` and `AlreadyReady`.
    pub fn is_ready_class(self) -> bool {
        matches!(self, Self::Ready | Self::AlreadyReady)
    }
}

/// Download progress saturated into `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize)]
pub struct Progress(f64);

impl Progress {
    /// No progress.
    pub const EMPTY: Self = Self(0.0);
    /// Complete.
    pub const FULL: Self = Self(1.0);

    /// Saturates a raw updater value. `NaN` maps to zero.
    pub fn clamped(raw: f64) -> Self {
        if raw.is_nan() {
            return Self::EMPTY;
        }
        Self(raw.clamp(0.0, 1.0))
    }

    /// Returns the normalized fraction.
    pub fn value(self) -> f64 {
        self.0
    }
}

/// One notification received from the updater service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum UpdaterEvent {
    /// Raw status name from the status channel.
    StatusChanged(String),
    /// Raw progress value from the progress channel.
    ProgressChanged(f64),
}

impl UpdaterEvent {
    /// Decodes one notification from its channel name and JSON payload.
    ///
    /// Non-string status payloads are kept as their JSON text, so they reach
    /// the reducer and fail safe to [`UpdateStatus::Error`].
    ///
    /// # Errors
    /// Returns [`CoreError::UnknownChannel`] for channels other than
    /// [`STATUS_CHANNEL`] and [`PROGRESS_CHANNEL`], and
    /// [`CoreError::InvalidProgress`] for non-numeric progress payloads.
    pub fn from_wire(channel: &str, payload: &Value) -> Result<Self, CoreError> {
        match channel {
            STATUS_CHANNEL => Ok(Self::StatusChanged(match payload {
                Value::String(raw) => raw.clone(),
                other => other.to_string(),
            })),
            PROGRESS_CHANNEL => payload
                .as_f64()
                .map(Self::ProgressChanged)
                .ok_or_else(|| CoreError::InvalidProgress(payload.to_string())),
            other => Err(CoreError::UnknownChannel(other.to_string())),
        }
    }
}

/// One recorded line of an updater event transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    /// Channel name the event arrived on.
    pub channel: String,
    /// Raw JSON payload.
    pub payload: Value,
}

impl TranscriptEntry {
    /// Decodes the entry into an [`UpdaterEvent`].
    ///
    /// # Errors
    /// See [`UpdaterEvent::from_wire`].
    pub fn to_event(&self) -> Result<UpdaterEvent, CoreError> {
        UpdaterEvent::from_wire(&self.channel, &self.payload)
    }
}

/// Status and progress as seen by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct StatusSnapshot {
    /// Current status.
    pub status: UpdateStatus,
    /// Current normalized progress.
    pub progress: Progress,
    /// Entry-animation marker; bumps whenever the rendered status should replay
    /// its transition, even if the label is unchanged.
    pub entry_key: u64,
}

/// Folds one event into a snapshot and returns the next snapshot.
///
/// # Semantics
/// - Progress events clamp into range and leave status untouched. While the
///   status is ready-class, progress stays pinned at `1.0`.
/// - Ready-class status events force progress to `1.0`.
/// - A `ready` event on top of a ready-class status collapses to
///   [`UpdateStatus::AlreadyReady`].
/// - Unknown status names become [`UpdateStatus::Error`].
pub fn reduce(current: &StatusSnapshot, event: &UpdaterEvent) -> StatusSnapshot {
    match event {
        UpdaterEvent::ProgressChanged(raw) => {
            let progress = if current.status.is_ready_class() {
                Progress::FULL
            } else {
                Progress::clamped(*raw)
            };
            let entry_key = if progress == current.progress {
                current.entry_key
            } else {
                current.entry_key.wrapping_add(1)
            };
            StatusSnapshot {
                status: current.status,
                progress,
                entry_key,
            }
        }
        UpdaterEvent::StatusChanged(raw) => {
            let incoming = UpdateStatus::from_wire(raw).unwrap_or_else(|error| {
                log::warn!("updater contract violation: {error}; treating as error status");
                UpdateStatus::Error
            });

            let status = if current.status.is_ready_class() && incoming == UpdateStatus::Ready {
                UpdateStatus::AlreadyReady
            } else {
                incoming
            };

            let progress = if status.is_ready_class() {
                Progress::FULL
            } else {
                current.progress
            };

            StatusSnapshot {
                status,
                progress,
                entry_key: current.entry_key.wrapping_add(1),
            }
        }
    }
}

/// Owns the launcher's status snapshot for one session.
#[derive(Debug, Clone, Default)]
pub struct StatusReducer {
    snapshot: StatusSnapshot,
}

impl StatusReducer {
    /// Creates a reducer at `Idle` with zero progress.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current snapshot.
    pub fn snapshot(&self) -> StatusSnapshot {
        self.snapshot
    }

    /// Applies one event and returns the resulting snapshot.
    pub fn apply(&mut self, event: &UpdaterEvent) -> StatusSnapshot {
        self.snapshot = reduce(&self.snapshot, event);
        self.snapshot
    }

    /// Resets to session defaults.
    pub fn reset(&mut self) {
        self.snapshot = StatusSnapshot::default();
    }
}

/// Errors produced while decoding updater notifications.
#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    /// Status name outside the updater contract.
    #[error("unknown update status `{0}`")]
    UnknownStatus(String),
    /// Event arrived on a channel the launcher does not consume.
    #[error("unknown event channel `{0}`")]
    UnknownChannel(String),
    /// Progress payload was not a number.
    #[error("progress payload is not a number: {0}")]
    InvalidProgress(String),
}
