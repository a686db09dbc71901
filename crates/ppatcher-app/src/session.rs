//! Launcher session: bootstrap, event pump and teardown.

use std::sync::Arc;

use ppatcher_config::AppConfig;
use ppatcher_core::{StatusReducer, StatusSnapshot, UpdaterEvent};
use ppatcher_gate::{GateTiming, IgnoreReason, InteractionGate, TriggerOutcome};
use ppatcher_ui::{LauncherView, render};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::AppError;
use crate::service::{EventChannel, EventSink, UpdaterService};
use crate::subscription::Subscription;

/// One launcher session bound to an updater service.
///
/// Status and progress live only for the session; a new session starts at
/// `Idle` with zero progress.
pub struct LauncherSession {
    config: AppConfig,
    gate: InteractionGate,
    status: watch::Receiver<StatusSnapshot>,
    subscriptions: Vec<Subscription>,
    pump: Option<JoinHandle<()>>,
}

impl LauncherSession {
    /// Starts a session.
    ///
    /// Bootstrap order: fetch configuration (failures fall back to
    /// [`AppConfig::default`]), subscribe to the status and progress channels,
    /// then signal readiness so no early event is lost.
    ///
    /// # Errors
    /// Returns [`AppError::Subscribe`] when a channel subscription is refused.
    /// Subscriptions opened before the failure are released.
    pub async fn start<S>(service: Arc<S>, timing: GateTiming) -> Result<Self, AppError>
    where
        S: UpdaterService + 'static,
    {
        let config = match service.fetch_config().await {
            Ok(payload) => AppConfig::from_payload(&payload),
            Err(error) => {
                log::debug!("config fetch failed, using defaults: {error}");
                AppConfig::default()
            }
        };

        let (queue, events) = mpsc::unbounded_channel();
        let shared: Arc<dyn UpdaterService> = service.clone();
        let mut subscriptions = Vec::with_capacity(2);
        for channel in [EventChannel::Status, EventChannel::Progress] {
            let sink = EventSink::new(channel, queue.clone());
            subscriptions.push(Subscription::open(Arc::clone(&shared), channel, sink)?);
        }
        drop(queue);

        let (status_tx, status) = watch::channel(StatusSnapshot::default());
        let pump = tokio::spawn(pump_events(events, status_tx));

        service.signal_ready();
        log::info!(
            "launcher session started (palette={}, start_offered={})",
            config.color_palette.key(),
            config.has_executable
        );

        Ok(Self {
            config,
            gate: InteractionGate::new(service, timing),
            status,
            subscriptions,
            pump: Some(pump),
        })
    }

    /// Session configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Latest status snapshot.
    pub fn status(&self) -> StatusSnapshot {
        *self.status.borrow()
    }

    /// Subscribes to status snapshots.
    pub fn watch_status(&self) -> watch::Receiver<StatusSnapshot> {
        self.status.clone()
    }

    /// Interaction gate of this session.
    pub fn gate(&self) -> &InteractionGate {
        &self.gate
    }

    /// Renders the current view.
    pub fn view(&self) -> LauncherView {
        render(&self.status(), &self.gate.snapshot(), &self.config)
    }

    /// Handles a click on "Check for Updates".
    ///
    /// # Errors
    /// Returns [`AppError::Gate`] when no runtime is available.
    pub fn trigger_update_check(&self) -> Result<TriggerOutcome, AppError> {
        Ok(self.gate.trigger_update_check()?)
    }

    /// Handles a click on "Start". Never dispatches when no executable is
    /// configured, since the control is not offered.
    ///
    /// # Errors
    /// Returns [`AppError::Gate`] when no runtime is available.
    pub fn trigger_start(&self) -> Result<TriggerOutcome, AppError> {
        if !self.config.has_executable {
            return Ok(TriggerOutcome::Ignored(IgnoreReason::Hidden));
        }
        Ok(self.gate.trigger_start()?)
    }

    /// Returns `true` until [`LauncherSession::shutdown`] runs.
    pub fn is_running(&self) -> bool {
        self.pump.is_some()
    }

    /// Tears the session down: unsubscribes from both channels, stops the event
    /// pump and closes the gate. Safe to call repeatedly.
    pub fn shutdown(&mut self) {
        let Some(pump) = self.pump.take() else {
            return;
        };

        for mut subscription in self.subscriptions.drain(..) {
            subscription.cancel();
        }
        pump.abort();
        self.gate.close();
        log::info!("launcher session stopped");
    }
}

impl Drop for LauncherSession {
    fn drop(&mut self) {
        self.shutdown();
    }
}

async fn pump_events(
    mut events: mpsc::UnboundedReceiver<UpdaterEvent>,
    status: watch::Sender<StatusSnapshot>,
) {
    let mut reducer = StatusReducer::new();
    while let Some(event) = events.recv().await {
        let snapshot = reducer.apply(&event);
        status.send_replace(snapshot);
    }
    log::debug!("updater event queue closed");
}
