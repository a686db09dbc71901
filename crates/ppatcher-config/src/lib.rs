#![warn(missing_docs)]
//! # ppatcher-config
//!
//! ## Purpose
//! Defines the launcher configuration contract returned by the updater
//! service and the session-scoped [`AppConfig`] derived from it.
//!
//! ## Responsibilities
//! - Parse the `fetchConfig` JSON payload, tolerating missing fields.
//! - Fill build defaults and apply environment overrides.
//! - Resolve the colour palette key, falling back to `neutral`.
//! - Decide whether the Start control is offered at all.
//!
//! ## Data flow
//! Raw JSON (file or updater response) -> [`parse_config_payload`] ->
//! [`ConfigPayload::with_defaults`] / [`ConfigPayload::apply_env_overrides`] ->
//! [`AppConfig::from_payload`] -> read-only for the rest of the session.
//!
//! ## Ownership and lifetimes
//! Payload fields are owned `String`s; [`AppConfig`] is immutable once built
//! and cloned into whatever needs it.
//!
//! ## Error model
//! Decode and file failures return [`ConfigError`]. Callers on the session
//! path swallow them and fall back to [`AppConfig::default`].

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Backend used when none is configured.
pub const DEFAULT_BACKEND: &str = "http://localhost:3000";
/// Palette key used when none is configured.
pub const DEFAULT_PALETTE: &str = "neutral";
/// Build mode used when none is configured.
pub const DEFAULT_MODE: &str = "production";
/// Version shown when none is configured.
pub const DEFAULT_VERSION: &str = "1.0.0";
/// Tagline shown when none is configured.
pub const DEFAULT_DESCRIPTION: &str = "Keep your files up to date";
/// Window title used when none is configured.
pub const DEFAULT_TITLE: &str = "ppatcher";
/// Display name used when none is configured.
pub const DEFAULT_DISPLAY_NAME: &str = "PPatcher";

/// Configuration payload as published by the updater service.
///
/// Only `executable` and `color_palette` change launcher behaviour; the other
/// fields feed presentation text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigPayload {
    /// Update server base URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend: Option<String>,
    /// Managed executable path. Presence enables the Start control.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executable: Option<String>,
    /// Palette key (`neutral`, `blue`, `green`, `purple`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_palette: Option<String>,
    /// Build mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    /// Version string for the footer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Tagline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Window title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Product name for header and footer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Logo asset reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    /// Window icon asset reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl ConfigPayload {
    /// Fills blank fields with build defaults.
    ///
    /// `executable`, `logo` and `icon` have no defaults: an absent executable
    /// keeps the Start control hidden.
    pub fn with_defaults(mut self) -> Self {
        fill(&mut self.backend, DEFAULT_BACKEND);
        fill(&mut self.color_palette, DEFAULT_PALETTE);
        fill(&mut self.mode, DEFAULT_MODE);
        fill(&mut self.version, DEFAULT_VERSION);
        fill(&mut self.description, DEFAULT_DESCRIPTION);
        fill(&mut self.title, DEFAULT_TITLE);
        fill(&mut self.display_name, DEFAULT_DISPLAY_NAME);
        self
    }

    /// Applies environment overrides through an injectable lookup.
    ///
    /// Recognized keys: `BACKEND`, `EXECUTABLE`, `COLOR_PALETTE`, `MODE`,
    /// `VERSION`, `DESCRIPTION`, `TITLE`, `DISPLAY_NAME`. Empty values are
    /// ignored.
    pub fn apply_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let overrides: [(&str, &mut Option<String>); 8] = [
            ("BACKEND", &mut self.backend),
            ("EXECUTABLE", &mut self.executable),
            ("COLOR_PALETTE", &mut self.color_palette),
            ("MODE", &mut self.mode),
            ("VERSION", &mut self.version),
            ("DESCRIPTION", &mut self.description),
            ("TITLE", &mut self.title),
            ("DISPLAY_NAME", &mut self.display_name),
        ];

        for (key, slot) in overrides {
            if let Some(value) = lookup(key).filter(|value| !value.is_empty()) {
                *slot = Some(value);
            }
        }

        self
    }
}

fn fill(slot: &mut Option<String>, default: &str) {
    if slot.as_deref().is_none_or(|value| value.trim().is_empty()) {
        *slot = Some(default.to_string());
    }
}

/// Colour palette selected by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorPalette {
    /// Grey palette.
    #[default]
    Neutral,
    /// Blue palette.
    Blue,
    /// Green palette.
    Green,
    /// Purple palette.
    Purple,
}

impl ColorPalette {
    /// Resolves a palette key, falling back to [`ColorPalette::Neutral`].
    pub fn from_key(key: &str) -> Self {
        match key.trim().to_ascii_lowercase().as_str() {
            "neutral" => Self::Neutral,
            "blue" => Self::Blue,
            "green" => Self::Green,
            "purple" => Self::Purple,
            other => {
                log::warn!("unknown colour palette `{other}`; using neutral");
                Self::Neutral
            }
        }
    }

    /// Returns the configuration key.
    pub fn key(self) -> &'static str {
        match self {
            Self::Neutral => "neutral",
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Purple => "purple",
        }
    }
}

/// Session configuration consumed by the launcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Palette driving colour mapping.
    pub color_palette: ColorPalette,
    /// Whether the Start control is offered at all.
    pub has_executable: bool,
    /// Product name for header and footer.
    pub display_name: String,
    /// Version string for the footer.
    pub version: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            color_palette: ColorPalette::Neutral,
            has_executable: false,
            display_name: DEFAULT_DISPLAY_NAME.to_string(),
            version: DEFAULT_VERSION.to_string(),
        }
    }
}

impl AppConfig {
    /// Derives session configuration from an updater payload.
    pub fn from_payload(payload: &ConfigPayload) -> Self {
        let defaults = Self::default();
        Self {
            color_palette: payload
                .color_palette
                .as_deref()
                .map(ColorPalette::from_key)
                .unwrap_or_default(),
            has_executable: payload
                .executable
                .as_deref()
                .is_some_and(|path| !path.trim().is_empty()),
            display_name: non_blank(payload.display_name.as_deref())
                .unwrap_or(defaults.display_name),
            version: non_blank(payload.version.as_deref()).unwrap_or(defaults.version),
        }
    }

    /// Footer text, for example `PPatcher v1.0.0`.
    pub fn footer(&self) -> String {
        format!("{} v{}", self.display_name, self.version)
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Parses a raw configuration payload.
///
/// # Errors
/// Returns [`ConfigError::Decode`] for invalid JSON or mistyped fields.
pub fn parse_config_payload(raw: &str) -> Result<ConfigPayload, ConfigError> {
    serde_json::from_str(raw).map_err(ConfigError::Decode)
}

/// Reads and parses a configuration file.
///
/// # Errors
/// Returns [`ConfigError::Io`] when the file cannot be read and
/// [`ConfigError::Decode`] when its content is not a valid payload.
pub fn load_config_file(path: &Path) -> Result<ConfigPayload, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_config_payload(&raw)
}

/// Validates an update server base URL.
///
/// # Errors
/// Returns [`ConfigError::InvalidBackend`] unless the URL is `http` or
/// `https` with a host.
pub fn validate_backend(backend: &str) -> Result<Url, ConfigError> {
    let parsed = Url::parse(backend)
        .map_err(|error| ConfigError::InvalidBackend(format!("invalid backend url: {error}")))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidBackend(format!(
            "unsupported backend scheme `{}`",
            parsed.scheme()
        )));
    }

    if parsed.host_str().is_none() {
        return Err(ConfigError::InvalidBackend(
            "backend url has no host".to_string(),
        ));
    }

    Ok(parsed)
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// JSON decode failure.
    #[error("config decode failure: {0}")]
    Decode(#[from] serde_json::Error),
    /// Configuration file could not be read.
    #[error("unable to read config file '{path}': {source}")]
    Io {
        /// File path as given.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// Backend URL violates the contract.
    #[error("invalid backend: {0}")]
    InvalidBackend(String),
}

#[cfg(test)]
mod tests {
    //! Unit tests for defaults and palette resolution.

    use super::*;

    #[test]
    fn blank_fields_receive_defaults() {
        let payload = ConfigPayload {
            backend: Some("  ".to_string()),
            ..ConfigPayload::default()
        }
        .with_defaults();

        assert_eq!(payload.backend.as_deref(), Some(DEFAULT_BACKEND));
        assert_eq!(payload.color_palette.as_deref(), Some(DEFAULT_PALETTE));
        assert_eq!(payload.executable, None);
    }

    #[test]
    fn palette_keys_are_case_insensitive_with_neutral_fallback() {
        assert_eq!(ColorPalette::from_key("Purple"), ColorPalette::Purple);
        assert_eq!(ColorPalette::from_key("teal"), ColorPalette::Neutral);
    }
}
