#![warn(missing_docs)]
//! # ppatcher-gate
//!
//! ## Purpose
//! Serializes the launcher's two user commands (update check, executable
//! start) against each other and owns the control enablement flags.
//!
//! ## Responsibilities
//! - Define the command surface of the updater service ([`UpdaterCommands`]).
//! - Lock both controls while either command is in flight.
//! - Drive the short click pulse used for button feedback.
//! - Re-enable controls a fixed settle delay after the command settles,
//!   whether it succeeded, failed or panicked.
//!
//! ## Data flow
//! UI click -> [`InteractionGate::trigger`] -> flags locked -> command task ->
//! settle timer -> flags cleared. Every flag change is published on a
//! [`tokio::sync::watch`] channel.
//!
//! ## Ownership and lifetimes
//! Timer tasks hold a weak reference to gate state. Once the gate is closed or
//! dropped, a timer that fires late writes nothing.
//!
//! ## Error model
//! Command failures are logged and swallowed; status changes only come from
//! the updater's event stream. [`GateError`] covers misuse (triggering outside
//! a Tokio runtime).
//!
//! ## Concurrency notes
//! The gate prevents the UI from issuing overlapping commands. It does not
//! serialize anything inside the updater service, and it applies no timeout:
//! a command that never settles keeps both controls disabled.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError, Weak};
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Wait between command settlement and re-enabling controls.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(200);
/// Lifetime of the click feedback pulse.
pub const DEFAULT_PULSE_DURATION: Duration = Duration::from_millis(200);

/// Commands the launcher may issue to the updater service.
#[async_trait]
pub trait UpdaterCommands: Send + Sync {
    /// Asks the updater to run a manual update check.
    async fn request_manual_update(&self) -> Result<(), CommandError>;

    /// Asks the updater to launch the managed executable.
    async fn request_executable_start(&self) -> Result<(), CommandError>;
}

/// User-facing control guarded by the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    /// "Check for Updates" button.
    UpdateCheck,
    /// "Start" button.
    Start,
}

impl Control {
    /// Updater command dispatched by this control.
    pub fn command(self) -> &'static str {
        match self {
            Self::UpdateCheck => "requestManualUpdate",
            Self::Start => "requestExecutableStart",
        }
    }
}

/// Enablement flags owned by the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InteractionState {
    /// Update-check control is disabled.
    pub check_disabled: bool,
    /// Start control is disabled.
    pub start_disabled: bool,
}

impl InteractionState {
    /// Both controls disabled.
    pub const LOCKED: Self = Self {
        check_disabled: true,
        start_disabled: true,
    };

    /// Returns the flag for one control.
    pub fn is_disabled(&self, control: Control) -> bool {
        match control {
            Control::UpdateCheck => self.check_disabled,
            Control::Start => self.start_disabled,
        }
    }
}

/// Transient click feedback, independent of the disable lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClickPulse {
    /// Update-check control was just clicked.
    pub check: bool,
    /// Start control was just clicked.
    pub start: bool,
}

impl ClickPulse {
    /// Returns the pulse for one control.
    pub fn is_active(&self, control: Control) -> bool {
        match control {
            Control::UpdateCheck => self.check,
            Control::Start => self.start,
        }
    }

    fn set(&mut self, control: Control, active: bool) {
        match control {
            Control::UpdateCheck => self.check = active,
            Control::Start => self.start = active,
        }
    }
}

/// Everything the gate publishes to renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GateSnapshot {
    /// Enablement flags.
    pub interaction: InteractionState,
    /// Click feedback flags.
    pub pulse: ClickPulse,
}

/// Gate timer configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateTiming {
    /// Delay after command settlement before controls re-enable.
    pub settle_delay: Duration,
    /// How long the click pulse stays active.
    pub pulse_duration: Duration,
}

impl Default for GateTiming {
    fn default() -> Self {
        Self {
            settle_delay: DEFAULT_SETTLE_DELAY,
            pulse_duration: DEFAULT_PULSE_DURATION,
        }
    }
}

/// Result of a trigger attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// Command was dispatched to the updater service.
    Dispatched,
    /// Nothing was dispatched.
    Ignored(IgnoreReason),
}

/// Why a trigger did not dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The invoked control is currently disabled.
    Disabled,
    /// The control is not offered in this session.
    Hidden,
    /// The gate has been closed.
    Closed,
}

struct GateInner {
    commands: Arc<dyn UpdaterCommands>,
    timing: GateTiming,
    state: watch::Sender<GateSnapshot>,
    timers: Mutex<Vec<JoinHandle<()>>>,
    closed: AtomicBool,
}

impl GateInner {
    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    fn release_controls(&self) {
        if self.is_closed() {
            return;
        }
        self.state.send_modify(|snapshot| {
            snapshot.interaction = InteractionState::default();
        });
    }

    fn end_pulse(&self, control: Control) {
        if self.is_closed() {
            return;
        }
        self.state.send_modify(|snapshot| snapshot.pulse.set(control, false));
    }

    fn track(&self, handles: impl IntoIterator<Item = JoinHandle<()>>) {
        let mut timers = self.timers.lock().unwrap_or_else(PoisonError::into_inner);
        timers.retain(|handle| !handle.is_finished());
        timers.extend(handles);
    }
}

/// Controller that gates the update-check and start commands.
pub struct InteractionGate {
    inner: Arc<GateInner>,
}

impl InteractionGate {
    /// Creates an open gate with both controls enabled.
    pub fn new(commands: Arc<dyn UpdaterCommands>, timing: GateTiming) -> Self {
        let (state, _) = watch::channel(GateSnapshot::default());
        Self {
            inner: Arc::new(GateInner {
                commands,
                timing,
                state,
                timers: Mutex::new(Vec::new()),
                closed: AtomicBool::new(false),
            }),
        }
    }

    /// Returns the current flags.
    pub fn snapshot(&self) -> GateSnapshot {
        *self.inner.state.borrow()
    }

    /// Subscribes to flag changes.
    pub fn watch(&self) -> watch::Receiver<GateSnapshot> {
        self.inner.state.subscribe()
    }

    /// Returns the configured timers.
    pub fn timing(&self) -> GateTiming {
        self.inner.timing
    }

    /// Triggers a manual update check.
    ///
    /// # Errors
    /// See [`InteractionGate::trigger`].
    pub fn trigger_update_check(&self) -> Result<TriggerOutcome, GateError> {
        self.trigger(Control::UpdateCheck)
    }

    /// Triggers an executable start.
    ///
    /// # Errors
    /// See [`InteractionGate::trigger`].
    pub fn trigger_start(&self) -> Result<TriggerOutcome, GateError> {
        self.trigger(Control::Start)
    }

    /// Locks both controls and dispatches the control's command.
    ///
    /// # Returns
    /// - `Ignored(Disabled)` without dispatching when the control is disabled.
    /// - `Ignored(Closed)` after [`InteractionGate::close`].
    /// - `Dispatched` otherwise.
    ///
    /// # Errors
    /// Returns [`GateError::NoRuntime`] when called outside a Tokio runtime;
    /// the flags are left untouched in that case.
    pub fn trigger(&self, control: Control) -> Result<TriggerOutcome, GateError> {
        if self.inner.is_closed() {
            return Ok(TriggerOutcome::Ignored(IgnoreReason::Closed));
        }
        let runtime = Handle::try_current().map_err(|_| GateError::NoRuntime)?;

        let mut accepted = false;
        self.inner.state.send_if_modified(|snapshot| {
            if snapshot.interaction.is_disabled(control) {
                return false;
            }
            snapshot.interaction = InteractionState::LOCKED;
            snapshot.pulse.set(control, true);
            accepted = true;
            true
        });

        if !accepted {
            log::debug!("{} ignored: control disabled", control.command());
            return Ok(TriggerOutcome::Ignored(IgnoreReason::Disabled));
        }

        log::info!("dispatching {}", control.command());
        let timing = self.inner.timing;
        let pulse_deadline = Instant::now() + timing.pulse_duration;

        let pulse = runtime.spawn(end_pulse_at(
            Arc::downgrade(&self.inner),
            control,
            pulse_deadline,
        ));
        let settle = runtime.spawn(dispatch_and_settle(
            Arc::downgrade(&self.inner),
            Arc::clone(&self.inner.commands),
            control,
            timing.settle_delay,
        ));
        self.inner.track([pulse, settle]);

        Ok(TriggerOutcome::Dispatched)
    }

    /// Closes the gate: pending pulse and settle timers are cancelled and later
    /// triggers are ignored. Commands already dispatched keep running.
    ///
    /// Calling `close` more than once is a no-op.
    pub fn close(&self) {
        if self.inner.closed.swap(true, Ordering::AcqRel) {
            return;
        }
        let mut timers = self
            .inner
            .timers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        for handle in timers.drain(..) {
            handle.abort();
        }
    }

    /// Returns `true` once [`InteractionGate::close`] has run.
    pub fn is_closed(&self) -> bool {
        self.inner.is_closed()
    }

    /// Number of pulse/settle timers still pending.
    pub fn pending_timers(&self) -> usize {
        self.inner
            .timers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|handle| !handle.is_finished())
            .count()
    }
}

impl Drop for InteractionGate {
    fn drop(&mut self) {
        self.close();
    }
}

// Deadline is fixed at the click, not at the first poll of this task.
async fn end_pulse_at(gate: Weak<GateInner>, control: Control, deadline: Instant) {
    tokio::time::sleep_until(deadline).await;
    if let Some(inner) = gate.upgrade() {
        inner.end_pulse(control);
    }
}

async fn dispatch_and_settle(
    gate: Weak<GateInner>,
    commands: Arc<dyn UpdaterCommands>,
    control: Control,
    settle_delay: Duration,
) {
    // Runs detached: closing the gate cannot retract a dispatched command.
    let dispatched = tokio::spawn(async move {
        match control {
            Control::UpdateCheck => commands.request_manual_update().await,
            Control::Start => commands.request_executable_start().await,
        }
    });

    match dispatched.await {
        Ok(Ok(())) => log::debug!("{} settled", control.command()),
        Ok(Err(error)) => log::warn!("{} failed: {error}", control.command()),
        Err(error) => log::warn!("{} did not complete: {error}", control.command()),
    }

    tokio::time::sleep(settle_delay).await;
    if let Some(inner) = gate.upgrade() {
        inner.release_controls();
    }
}

/// Failure reported by the updater for a dispatched command.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommandError {
    /// Updater rejected or failed the command.
    #[error("updater command failed: {0}")]
    Failed(String),
    /// Updater is unreachable.
    #[error("updater unavailable: {0}")]
    Unavailable(String),
}

/// Gate misuse errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GateError {
    /// Triggered without a Tokio runtime to run the command on.
    #[error("no tokio runtime available to dispatch the command")]
    NoRuntime,
}

#[cfg(test)]
mod tests {
    //! Unit tests for flag helpers and runtime requirements.

    use super::*;

    struct NeverCalled;

    #[async_trait]
    impl UpdaterCommands for NeverCalled {
        async fn request_manual_update(&self) -> Result<(), CommandError> {
            unreachable!("no runtime, no dispatch")
        }

        async fn request_executable_start(&self) -> Result<(), CommandError> {
            unreachable!("no runtime, no dispatch")
        }
    }

    #[test]
    fn locked_state_disables_both_controls() {
        let locked = InteractionState::LOCKED;
        assert!(locked.is_disabled(Control::UpdateCheck));
        assert!(locked.is_disabled(Control::Start));
        assert!(!InteractionState::default().is_disabled(Control::Start));
    }

    #[test]
    fn trigger_outside_runtime_leaves_flags_untouched() {
        let gate = InteractionGate::new(Arc::new(NeverCalled), GateTiming::default());
        assert_eq!(gate.trigger_update_check(), Err(GateError::NoRuntime));
        assert_eq!(gate.snapshot(), GateSnapshot::default());
    }

    #[test]
    fn close_is_idempotent() {
        let gate = InteractionGate::new(Arc::new(NeverCalled), GateTiming::default());
        gate.close();
        gate.close();
        assert!(gate.is_closed());
        assert_eq!(
            gate.trigger_start(),
            Ok(TriggerOutcome::Ignored(IgnoreReason::Closed))
        );
    }
}
