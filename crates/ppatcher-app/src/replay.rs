//! Offline replay of recorded updater event transcripts.

use std::io::BufRead;

use ppatcher_config::AppConfig;
use ppatcher_core::{StatusReducer, TranscriptEntry};
use ppatcher_gate::GateSnapshot;
use ppatcher_ui::{LauncherView, render};

use crate::AppError;

/// Folds an NDJSON transcript (one [`TranscriptEntry`] per line) through a
/// fresh reducer and renders a view after every event. Blank lines are
/// skipped.
///
/// # Errors
/// Returns [`AppError::Transcript`] with the 1-based line number for lines
/// that are not valid entries, and [`AppError::Io`] for read failures.
pub fn replay_transcript<R: BufRead>(
    reader: R,
    config: &AppConfig,
) -> Result<Vec<LauncherView>, AppError> {
    let mut reducer = StatusReducer::new();
    let gate = GateSnapshot::default();
    let mut frames = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let entry: TranscriptEntry =
            serde_json::from_str(&line).map_err(|error| AppError::Transcript {
                line: index + 1,
                reason: error.to_string(),
            })?;
        let event = entry.to_event().map_err(|error| AppError::Transcript {
            line: index + 1,
            reason: error.to_string(),
        })?;

        frames.push(render(&reducer.apply(&event), &gate, config));
    }

    Ok(frames)
}

/// One-line text rendering of a view, used by the `replay` command.
pub fn format_frame(view: &LauncherView) -> String {
    let status = if view.status_text.is_empty() {
        "-"
    } else {
        view.status_text
    };
    let percent = view
        .percent_text
        .as_deref()
        .map(|text| format!(" {text}"))
        .unwrap_or_default();
    let start = match &view.start {
        Some(control) if control.disabled => "disabled",
        Some(_) => "enabled",
        None => "hidden",
    };

    format!(
        "[{}] {status}{percent} | fill={:.2} {} | check={} start={start}",
        view.entry_key,
        view.progress_fill,
        view.progress_color,
        if view.check.disabled {
            "disabled"
        } else {
            "enabled"
        },
    )
}
