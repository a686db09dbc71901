//! Scoped event-channel subscriptions.

use std::sync::Arc;

use crate::AppError;
use crate::service::{EventChannel, EventSink, SubscriptionId, UpdaterService};

/// Live subscription to one updater channel; unsubscribes exactly once, on
/// [`Subscription::cancel`] or drop.
pub struct Subscription {
    service: Arc<dyn UpdaterService>,
    channel: EventChannel,
    id: Option<SubscriptionId>,
}

impl Subscription {
    /// Registers `sink` with the service.
    ///
    /// # Errors
    /// Returns [`AppError::Subscribe`] when the service refuses the sink.
    pub fn open(
        service: Arc<dyn UpdaterService>,
        channel: EventChannel,
        sink: EventSink,
    ) -> Result<Self, AppError> {
        let id = service
            .subscribe(channel, sink)
            .map_err(|source| AppError::Subscribe { channel, source })?;
        log::debug!("subscribed to {channel}");

        Ok(Self {
            service,
            channel,
            id: Some(id),
        })
    }

    /// Channel this subscription listens on.
    pub fn channel(&self) -> EventChannel {
        self.channel
    }

    /// Returns `true` until cancelled.
    pub fn is_active(&self) -> bool {
        self.id.is_some()
    }

    /// Unsubscribes now. Later calls are no-ops.
    pub fn cancel(&mut self) {
        if let Some(id) = self.id.take() {
            self.service.unsubscribe(id);
            log::debug!("unsubscribed from {}", self.channel);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}
