#![warn(missing_docs)]
//! # ppatcher-ui
//!
//! ## Purpose
//! Projects launcher state into a render-ready view model.
//!
//! ## Responsibilities
//! - Map update statuses to labels and semantic tones.
//! - Resolve tones to palette colours.
//! - Decide which controls are offered and how they look.
//!
//! ## Data flow
//! [`StatusSnapshot`] + [`GateSnapshot`] + [`AppConfig`] -> [`render`] ->
//! [`LauncherView`] handed to whatever draws the window.
//!
//! ## Ownership and lifetimes
//! Palette tokens are `'static`; views own their strings so they can cross
//! thread or channel boundaries freely.
//!
//! ## Error model
//! Every mapping here is total; there is nothing to fail.

use ppatcher_config::{AppConfig, ColorPalette};
use ppatcher_core::{Progress, StatusSnapshot, UpdateStatus};
use ppatcher_gate::{Control, GateSnapshot};

/// Label of the update-check control.
pub const CHECK_LABEL: &str = "Check for Updates";
/// Label of the start control.
pub const START_LABEL: &str = "Start";
/// Foreground of enabled controls.
pub const ENABLED_FOREGROUND: &str = "white";

/// Semantic colour role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tone {
    /// Brand colour.
    Primary,
    /// Muted text colour.
    Secondary,
    /// Positive outcome.
    Success,
    /// Failure.
    Error,
    /// Informational, nothing to do.
    Info,
}

/// Colour tokens of one palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteTokens {
    /// Button and progress fill.
    pub primary: &'static str,
    /// Hovered button.
    pub primary_hover: &'static str,
    /// Secondary accents.
    pub secondary: &'static str,
    /// Hovered secondary accents.
    pub secondary_hover: &'static str,
    /// Window background (CSS gradient).
    pub background: &'static str,
    /// Headings.
    pub text_primary: &'static str,
    /// Body and neutral status text.
    pub text_secondary: &'static str,
    /// Success status.
    pub success: &'static str,
    /// Error status.
    pub error: &'static str,
    /// Informational status.
    pub info: &'static str,
    /// Logo card background.
    pub card_bg: &'static str,
    /// Progress track.
    pub progress_bg: &'static str,
    /// Disabled control background.
    pub disabled: &'static str,
    /// Disabled control text.
    pub disabled_text: &'static str,
}

const NEUTRAL: PaletteTokens = PaletteTokens {
    primary: "#6b7280",
    primary_hover: "#4b5563",
    secondary: "#9ca3af",
    secondary_hover: "#6b7280",
    background: "linear-gradient(135deg, #f9fafb 0%, #f3f4f6 100%)",
    text_primary: "#374151",
    text_secondary: "#6b7280",
    success: "#059669",
    error: "#dc2626",
    info: "#2563eb",
    card_bg: "#ffffff",
    progress_bg: "#e5e7eb",
    disabled: "#d1d5db",
    disabled_text: "#9ca3af",
};

const BLUE: PaletteTokens = PaletteTokens {
    primary: "#3182ce",
    primary_hover: "#2b6cb0",
    secondary: "#63b3ed",
    secondary_hover: "#4299e1",
    background: "linear-gradient(135deg, #ebf8ff 0%, #bee3f8 100%)",
    text_primary: "#2a4365",
    text_secondary: "#4c51bf",
    success: "#38a169",
    error: "#e53e3e",
    info: "#3182ce",
    card_bg: "#ffffff",
    progress_bg: "#e6fffa",
    disabled: "#93c5fd",
    disabled_text: "#93c5fd",
};

const GREEN: PaletteTokens = PaletteTokens {
    primary: "#38a169",
    primary_hover: "#2f855a",
    secondary: "#68d391",
    secondary_hover: "#48bb78",
    background: "linear-gradient(135deg, #f0fff4 0%, #c6f6d5 100%)",
    text_primary: "#22543d",
    text_secondary: "#38a169",
    success: "#38a169",
    error: "#e53e3e",
    info: "#3182ce",
    card_bg: "#ffffff",
    progress_bg: "#e6fffa",
    disabled: "#9ae6b4",
    disabled_text: "#9ae6b4",
};

const PURPLE: PaletteTokens = PaletteTokens {
    primary: "#805ad5",
    primary_hover: "#6b46c1",
    secondary: "#9f7aea",
    secondary_hover: "#805ad5",
    background: "linear-gradient(135deg, #faf5ff 0%, #e9d8fd 100%)",
    text_primary: "#322659",
    text_secondary: "#553c9a",
    success: "#38a169",
    error: "#e53e3e",
    info: "#3182ce",
    card_bg: "#ffffff",
    progress_bg: "#e6fffa",
    disabled: "#d6bcfa",
    disabled_text: "#d6bcfa",
};

/// Returns the tokens of a palette.
pub fn palette_tokens(palette: ColorPalette) -> &'static PaletteTokens {
    match palette {
        ColorPalette::Neutral => &NEUTRAL,
        ColorPalette::Blue => &BLUE,
        ColorPalette::Green => &GREEN,
        ColorPalette::Purple => &PURPLE,
    }
}

/// Resolves a tone against palette tokens.
pub fn tone_color(tokens: &PaletteTokens, tone: Tone) -> &'static str {
    match tone {
        Tone::Primary => tokens.primary,
        Tone::Secondary => tokens.text_secondary,
        Tone::Success => tokens.success,
        Tone::Error => tokens.error,
        Tone::Info => tokens.info,
    }
}

/// Human-readable status text. `Idle` renders nothing.
pub fn status_label(status: UpdateStatus) -> &'static str {
    match status {
        UpdateStatus::Idle => "",
        UpdateStatus::Checking => "Checking for updates...",
        UpdateStatus::Downloading => "Downloading files...",
        UpdateStatus::Ready => "Ready",
        UpdateStatus::Error => "Error occurred during update",
        UpdateStatus::AlreadyReady => "Your files are up to date",
    }
}

/// Tone of the status text.
///
/// `AlreadyReady` is informational rather than a success: nothing changed.
pub fn status_tone(status: UpdateStatus) -> Tone {
    match status {
        UpdateStatus::Ready => Tone::Success,
        UpdateStatus::AlreadyReady => Tone::Info,
        UpdateStatus::Error => Tone::Error,
        UpdateStatus::Idle | UpdateStatus::Checking | UpdateStatus::Downloading => {
            Tone::Secondary
        }
    }
}

/// Tone of the progress fill.
pub fn progress_tone(status: UpdateStatus) -> Tone {
    match status {
        UpdateStatus::Ready | UpdateStatus::AlreadyReady => Tone::Success,
        UpdateStatus::Error => Tone::Error,
        UpdateStatus::Idle | UpdateStatus::Checking | UpdateStatus::Downloading => Tone::Primary,
    }
}

/// Rounded whole percentage.
pub fn progress_percent(progress: Progress) -> u8 {
    (progress.value() * 100.0).round() as u8
}

/// One rendered control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlView {
    /// Button caption.
    pub label: &'static str,
    /// Control rejects clicks.
    pub disabled: bool,
    /// Click feedback animation is running.
    pub pulsing: bool,
    /// Background colour.
    pub background: &'static str,
    /// Text colour.
    pub foreground: &'static str,
}

/// Render-ready launcher view.
#[derive(Debug, Clone, PartialEq)]
pub struct LauncherView {
    /// Status text; empty while idle.
    pub status_text: &'static str,
    /// Status text tone.
    pub status_tone: Tone,
    /// Status text colour.
    pub status_color: &'static str,
    /// Key that restarts the status entry animation when it changes.
    pub entry_key: u64,
    /// Percentage caption, only while downloading.
    pub percent_text: Option<String>,
    /// Progress fill fraction in `[0.0, 1.0]`.
    pub progress_fill: f64,
    /// Progress fill tone.
    pub progress_tone: Tone,
    /// Progress fill colour.
    pub progress_color: &'static str,
    /// Update-check control.
    pub check: ControlView,
    /// Start control; `None` when no executable is configured.
    pub start: Option<ControlView>,
    /// Footer caption.
    pub footer: String,
}

fn control_view(
    tokens: &PaletteTokens,
    gate: &GateSnapshot,
    control: Control,
    label: &'static str,
) -> ControlView {
    let disabled = gate.interaction.is_disabled(control);
    ControlView {
        label,
        disabled,
        pulsing: gate.pulse.is_active(control),
        background: if disabled {
            tokens.disabled
        } else {
            tokens.primary
        },
        foreground: if disabled {
            tokens.disabled_text
        } else {
            ENABLED_FOREGROUND
        },
    }
}

/// Builds the launcher view.
///
/// The Start control is omitted whenever `config.has_executable` is false,
/// whatever the gate flags say.
pub fn render(status: &StatusSnapshot, gate: &GateSnapshot, config: &AppConfig) -> LauncherView {
    let tokens = palette_tokens(config.color_palette);
    let text_tone = status_tone(status.status);
    let fill_tone = progress_tone(status.status);

    LauncherView {
        status_text: status_label(status.status),
        status_tone: text_tone,
        status_color: tone_color(tokens, text_tone),
        entry_key: status.entry_key,
        percent_text: (status.status == UpdateStatus::Downloading)
            .then(|| format!("{}%", progress_percent(status.progress))),
        progress_fill: status.progress.value(),
        progress_tone: fill_tone,
        progress_color: tone_color(tokens, fill_tone),
        check: control_view(tokens, gate, Control::UpdateCheck, CHECK_LABEL),
        start: config
            .has_executable
            .then(|| control_view(tokens, gate, Control::Start, START_LABEL)),
        footer: config.footer(),
    }
}
