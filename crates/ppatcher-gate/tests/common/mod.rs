//! Shared fixtures for gate integration tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use ppatcher_gate::{CommandError, UpdaterCommands};
use tokio::sync::Notify;

/// How the scripted updater settles each command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(dead_code)]
pub enum Settle {
    /// Resolve successfully right away.
    Succeed,
    /// Reject right away.
    Fail,
    /// Panic inside the command future.
    Panic,
    /// Wait for [`ScriptedCommands::release`], then succeed.
    Hold,
}

/// Updater command double that counts calls.
pub struct ScriptedCommands {
    settle: Settle,
    released: Notify,
    manual_calls: AtomicUsize,
    start_calls: AtomicUsize,
}

#[allow(dead_code)]
impl ScriptedCommands {
    pub fn new(settle: Settle) -> Self {
        Self {
            settle,
            released: Notify::new(),
            manual_calls: AtomicUsize::new(0),
            start_calls: AtomicUsize::new(0),
        }
    }

    /// Lets one held command settle.
    pub fn release(&self) {
        self.released.notify_one();
    }

    pub fn manual_calls(&self) -> usize {
        self.manual_calls.load(Ordering::SeqCst)
    }

    pub fn start_calls(&self) -> usize {
        self.start_calls.load(Ordering::SeqCst)
    }

    async fn settle(&self) -> Result<(), CommandError> {
        match self.settle {
            Settle::Succeed => Ok(()),
            Settle::Fail => Err(CommandError::Failed("scripted failure".to_string())),
            Settle::Panic => panic!("scripted panic"),
            Settle::Hold => {
                self.released.notified().await;
                Ok(())
            }
        }
    }
}

#[async_trait]
impl UpdaterCommands for ScriptedCommands {
    async fn request_manual_update(&self) -> Result<(), CommandError> {
        self.manual_calls.fetch_add(1, Ordering::SeqCst);
        self.settle().await
    }

    async fn request_executable_start(&self) -> Result<(), CommandError> {
        self.start_calls.fetch_add(1, Ordering::SeqCst);
        self.settle().await
    }
}

/// Lets spawned gate tasks run without moving the paused clock.
#[allow(dead_code)]
pub async fn run_pending_tasks() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}
