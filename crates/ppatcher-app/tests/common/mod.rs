//! Shared fixtures for app integration tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use async_trait::async_trait;
use ppatcher_app::{EventChannel, EventSink, ServiceError, SubscriptionId, UpdaterService};
use ppatcher_config::ConfigPayload;
use ppatcher_gate::{CommandError, UpdaterCommands};

/// Updater service double that records the bootstrap handshake and lets
/// tests push events into live sinks.
pub struct FakeUpdater {
    config: Result<ConfigPayload, ServiceError>,
    refuse: Option<EventChannel>,
    calls: Mutex<Vec<String>>,
    sinks: Mutex<HashMap<SubscriptionId, EventSink>>,
    next_id: AtomicU64,
    unsubscribes: AtomicUsize,
    manual_calls: AtomicUsize,
    start_calls: AtomicUsize,
}

#[allow(dead_code)]
impl FakeUpdater {
    pub fn with_config(config: Result<ConfigPayload, ServiceError>) -> Self {
        Self {
            config,
            refuse: None,
            calls: Mutex::new(Vec::new()),
            sinks: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(1),
            unsubscribes: AtomicUsize::new(0),
            manual_calls: AtomicUsize::new(0),
            start_calls: AtomicUsize::new(0),
        }
    }

    /// Service advertising an executable, so Start is offered.
    pub fn with_executable() -> Self {
        Self::with_config(Ok(ConfigPayload {
            executable: Some("/opt/game/run.sh".to_string()),
            color_palette: Some("blue".to_string()),
            ..ConfigPayload::default()
        }))
    }

    /// Service whose config fetch fails.
    pub fn unreachable() -> Self {
        Self::with_config(Err(ServiceError::Unavailable("offline".to_string())))
    }

    /// Refuses subscriptions on `channel`.
    pub fn refusing(mut self, channel: EventChannel) -> Self {
        self.refuse = Some(channel);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("call log lock").clone()
    }

    pub fn live_sinks(&self) -> usize {
        self.sinks.lock().expect("sink lock").len()
    }

    pub fn unsubscribes(&self) -> usize {
        self.unsubscribes.load(Ordering::SeqCst)
    }

    pub fn manual_calls(&self) -> usize {
        self.manual_calls.load(Ordering::SeqCst)
    }

    pub fn start_calls(&self) -> usize {
        self.start_calls.load(Ordering::SeqCst)
    }

    pub fn emit_status(&self, raw: &str) {
        for sink in self.sinks_on(EventChannel::Status) {
            sink.emit_status(raw);
        }
    }

    pub fn emit_progress(&self, raw: f64) {
        for sink in self.sinks_on(EventChannel::Progress) {
            sink.emit_progress(raw);
        }
    }

    fn sinks_on(&self, channel: EventChannel) -> Vec<EventSink> {
        self.sinks
            .lock()
            .expect("sink lock")
            .values()
            .filter(|sink| sink.channel() == channel)
            .cloned()
            .collect()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().expect("call log lock").push(call.into());
    }
}

#[async_trait]
impl UpdaterCommands for FakeUpdater {
    async fn request_manual_update(&self) -> Result<(), CommandError> {
        self.manual_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn request_executable_start(&self) -> Result<(), CommandError> {
        self.start_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[async_trait]
impl UpdaterService for FakeUpdater {
    async fn fetch_config(&self) -> Result<ConfigPayload, ServiceError> {
        self.record("fetchConfig");
        self.config.clone()
    }

    fn subscribe(
        &self,
        channel: EventChannel,
        sink: EventSink,
    ) -> Result<SubscriptionId, ServiceError> {
        self.record(format!("subscribe:{channel}"));
        if self.refuse == Some(channel) {
            return Err(ServiceError::Rejected(format!("{channel} closed")));
        }
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.sinks.lock().expect("sink lock").insert(id, sink);
        Ok(id)
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.record(format!("unsubscribe:{}", id.0));
        self.unsubscribes.fetch_add(1, Ordering::SeqCst);
        self.sinks.lock().expect("sink lock").remove(&id);
    }

    fn signal_ready(&self) {
        self.record("frontendReady");
    }
}

/// Lets spawned session tasks run without moving the paused clock.
#[allow(dead_code)]
pub async fn run_pending_tasks() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}
