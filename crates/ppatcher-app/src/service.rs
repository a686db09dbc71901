//! Updater service surface consumed by a launcher session.

use std::fmt;

use async_trait::async_trait;
use ppatcher_config::ConfigPayload;
use ppatcher_core::{PROGRESS_CHANNEL, STATUS_CHANNEL, UpdaterEvent};
use ppatcher_gate::UpdaterCommands;
use serde_json::Value;
use thiserror::Error;
use tokio::sync::mpsc::UnboundedSender;

/// Event channel published by the updater service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventChannel {
    /// Status names (`downloadStatus`).
    Status,
    /// Progress fractions (`downloadProgress`).
    Progress,
}

impl EventChannel {
    /// Wire name of the channel.
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::Status => STATUS_CHANNEL,
            Self::Progress => PROGRESS_CHANNEL,
        }
    }
}

impl fmt::Display for EventChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Opaque handle returned by [`UpdaterService::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// Delivery endpoint handed to the updater for one channel.
///
/// All sinks of a session feed the same queue, so events from both channels
/// are folded one at a time in arrival order.
#[derive(Debug, Clone)]
pub struct EventSink {
    channel: EventChannel,
    queue: UnboundedSender<UpdaterEvent>,
}

impl EventSink {
    pub(crate) fn new(channel: EventChannel, queue: UnboundedSender<UpdaterEvent>) -> Self {
        Self { channel, queue }
    }

    /// Channel this sink belongs to.
    pub fn channel(&self) -> EventChannel {
        self.channel
    }

    /// Delivers a raw JSON payload.
    ///
    /// Returns `false` when the payload cannot be decoded for this channel or
    /// the session is gone.
    pub fn emit(&self, payload: &Value) -> bool {
        match UpdaterEvent::from_wire(self.channel.wire_name(), payload) {
            Ok(event) => self.deliver(event),
            Err(error) => {
                log::warn!("dropping {} payload: {error}", self.channel);
                false
            }
        }
    }

    /// Delivers a status name. Only meaningful on the status channel.
    pub fn emit_status(&self, raw: &str) -> bool {
        self.emit(&Value::String(raw.to_string()))
    }

    /// Delivers a raw progress value. Only meaningful on the progress channel.
    pub fn emit_progress(&self, raw: f64) -> bool {
        if self.channel != EventChannel::Progress {
            log::warn!("progress value sent on {} channel", self.channel);
            return false;
        }
        self.deliver(UpdaterEvent::ProgressChanged(raw))
    }

    fn deliver(&self, event: UpdaterEvent) -> bool {
        self.queue.send(event).is_ok()
    }
}

/// Full updater service contract: the two gated commands plus configuration,
/// event subscription and the readiness handshake.
#[async_trait]
pub trait UpdaterService: UpdaterCommands {
    /// Returns the launcher configuration.
    async fn fetch_config(&self) -> Result<ConfigPayload, ServiceError>;

    /// Registers a sink for one event channel.
    fn subscribe(
        &self,
        channel: EventChannel,
        sink: EventSink,
    ) -> Result<SubscriptionId, ServiceError>;

    /// Removes a previously registered sink.
    fn unsubscribe(&self, id: SubscriptionId);

    /// Tells the updater the launcher is listening. Sent once per session,
    /// after both subscriptions are in place.
    fn signal_ready(&self);
}

/// Updater service failures outside the command path.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// Service cannot be reached.
    #[error("updater unavailable: {0}")]
    Unavailable(String),
    /// Service refused the request.
    #[error("updater rejected request: {0}")]
    Rejected(String),
}
