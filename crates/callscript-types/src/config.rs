//! Wizard configuration types.
//!
//! `WizardConfig` represents `wizard.toml`, which controls the default
//! telephony region, the audio allow-list, the scratch-storage key and
//! logging. Every field has a default so an empty file is valid.

use serde::{Deserialize, Serialize};

/// Top-level configuration for the agent wizard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WizardConfig {
    /// Region sent with the payload when the draft does not override it.
    #[serde(default = "default_region")]
    pub region: String,

    /// Regions where outbound caller ids are never sent.
    #[serde(default = "default_regions_without_outbound_caller_id")]
    pub regions_without_outbound_caller_id: Vec<String>,

    /// Audio extensions accepted for transcription (lowercase, no dot).
    #[serde(default = "default_audio_extensions")]
    pub audio_extensions: Vec<String>,

    /// Scratch-storage key for the new-agent website draft.
    #[serde(default = "default_scratch_key")]
    pub scratch_key: String,

    /// Replaces the built-in notes block when set.
    #[serde(default)]
    pub notes_override: Option<String>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_region() -> String {
    "us".to_string()
}

fn default_regions_without_outbound_caller_id() -> Vec<String> {
    vec!["eu".to_string()]
}

fn default_audio_extensions() -> Vec<String> {
    ["mp3", "wav", "m4a", "ogg", "webm", "flac"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_scratch_key() -> String {
    "new_agent_website_draft".to_string()
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            region: default_region(),
            regions_without_outbound_caller_id: default_regions_without_outbound_caller_id(),
            audio_extensions: default_audio_extensions(),
            scratch_key: default_scratch_key(),
            notes_override: None,
            logging: LoggingConfig::default(),
        }
    }
}

impl WizardConfig {
    /// Whether `extension` (any case, with or without a leading dot) is on
    /// the audio allow-list.
    pub fn accepts_audio_extension(&self, extension: &str) -> bool {
        let ext = extension.trim().trim_start_matches('.').to_lowercase();
        self.audio_extensions.iter().any(|allowed| *allowed == ext)
    }

    /// Whether outbound caller ids are withheld for `region`.
    pub fn omits_outbound_caller_id(&self, region: &str) -> bool {
        self.regions_without_outbound_caller_id
            .iter()
            .any(|r| r.eq_ignore_ascii_case(region.trim()))
    }
}

/// Tracing subscriber settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_filter")]
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
    /// Bridge spans to OpenTelemetry (stdout exporter).
    #[serde(default)]
    pub otel: bool,
}

fn default_filter() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            json: false,
            otel: false,
        }
    }
}
