//! Wizard configuration loader.
//!
//! Reads `wizard.toml` from the config directory and deserializes it into
//! [`WizardConfig`]. Falls back to defaults when the file is missing or
//! malformed.

use std::path::Path;

use callscript_types::config::WizardConfig;

/// File name looked up inside the config directory.
pub const CONFIG_FILE_NAME: &str = "wizard.toml";

/// Load wizard configuration from `{config_dir}/wizard.toml`.
///
/// - If the file does not exist, returns [`WizardConfig::default()`].
/// - If the file exists but fails to read or parse, logs a warning and
///   returns the default.
/// - Otherwise returns the parsed config, with unset fields defaulted.
pub async fn load_wizard_config(config_dir: &Path) -> WizardConfig {
    let config_path = config_dir.join(CONFIG_FILE_NAME);

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(
                "No {CONFIG_FILE_NAME} found at {}, using defaults",
                config_path.display()
            );
            return WizardConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return WizardConfig::default();
        }
    };

    match toml::from_str::<WizardConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            WizardConfig::default()
        }
    }
}
