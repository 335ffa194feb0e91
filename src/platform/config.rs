// LogLens - platform/config.rs
//
// Platform-specific configuration, data directory resolution, and config.toml
// loading with startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::app::toolbar::ToolbarOptions;
use crate::core::timezone::parse_zone;
use crate::util::constants;
use crate::util::error::{ConfigError, LogLensError};
use chrono_tz::Tz;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Resolved platform paths for LogLens data and configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/loglens/ or %APPDATA%\LogLens\config\)
    pub config_dir: PathBuf,

    /// Data directory for the session file.
    pub data_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            let data_dir = proj_dirs.data_dir().to_path_buf();

            tracing::debug!(
                config = %config_dir.display(),
                data = %data_dir.display(),
                "Platform paths resolved"
            );

            Self {
                config_dir,
                data_dir,
            }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            let fallback = PathBuf::from(".");
            Self {
                config_dir: fallback.clone(),
                data_dir: fallback,
            }
        }
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[filters]` section.
    pub filters: FiltersSection,
    /// `[ui]` section.
    pub ui: UiSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[filters]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct FiltersSection {
    /// Quiet period before free-text filters commit, in ms.
    pub endpoint_debounce_ms: Option<u64>,
    /// IANA zone overriding the system zone.
    pub timezone: Option<String>,
    /// Commit staged date edits when the popover closes without Apply.
    pub apply_on_close: Option<bool>,
}

/// `[ui]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct UiSection {
    /// Theme: "dark" or "light".
    pub theme: Option<String>,
    /// Body font size in points.
    pub font_size: Option<f32>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
    /// Log file path (empty = stderr only).
    pub file: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
///
/// Invalid values produce actionable warnings and fall back to defaults.
#[derive(Debug, Clone)]
pub struct AppConfig {
    // -- Filters --
    /// Free-text debounce in ms.
    pub text_debounce_ms: u64,
    /// Zone override; `None` = use the system zone.
    pub timezone: Option<Tz>,
    /// Apply staged date edits on popover close.
    pub apply_on_close: bool,

    // -- UI --
    /// Dark mode (true) or light mode (false).
    pub dark_mode: bool,
    /// Body font size in points.
    pub font_size: f32,

    // -- Logging --
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
    /// Log file path.
    pub log_file: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            text_debounce_ms: constants::DEFAULT_TEXT_DEBOUNCE_MS,
            timezone: None,
            apply_on_close: true,
            dark_mode: true,
            font_size: constants::DEFAULT_FONT_SIZE,
            log_level: None,
            log_file: None,
        }
    }
}

impl AppConfig {
    /// Toolbar behaviour derived from the `[filters]` section.
    pub fn toolbar_options(&self) -> ToolbarOptions {
        ToolbarOptions {
            text_debounce: Duration::from_millis(self.text_debounce_ms),
            apply_on_close: self.apply_on_close,
        }
    }
}

/// Load and validate `config.toml` from the given config directory.
///
/// Returns `AppConfig` with validated values and a list of non-fatal warnings.
/// A missing file yields defaults with no warnings (first run); an unreadable
/// or unparseable file yields defaults with a warning.
pub fn load_config(config_dir: &Path) -> (AppConfig, Vec<String>) {
    let config_path = config_dir.join(constants::CONFIG_FILE_NAME);

    let mut warnings: Vec<String> = Vec::new();

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
        return (AppConfig::default(), warnings);
    }

    let content = match std::fs::read_to_string(&config_path) {
        Ok(c) => c,
        Err(source) => {
            let err = ConfigError::Io {
                path: config_path.clone(),
                source,
            };
            tracing::warn!(error = %err, "Config file unreadable; using defaults");
            warnings.push(format!("{}. Using defaults.", LogLensError::from(err)));
            return (AppConfig::default(), warnings);
        }
    };

    let raw: RawConfig = match toml::from_str(&content) {
        Ok(r) => r,
        Err(source) => {
            let err = ConfigError::TomlParse {
                path: config_path.clone(),
                source,
            };
            tracing::warn!(error = %err, "Config file unparseable; using defaults");
            warnings.push(format!("{}. Using defaults.", LogLensError::from(err)));
            return (AppConfig::default(), warnings);
        }
    };

    tracing::info!(path = %config_path.display(), "Loaded config.toml");

    let (config, mut field_warnings) = validate(raw);
    warnings.append(&mut field_warnings);

    if !warnings.is_empty() {
        tracing::warn!(
            count = warnings.len(),
            "Config validation produced warnings"
        );
    }

    (config, warnings)
}

/// Validate each field against named constants, accumulating all problems.
pub fn validate(raw: RawConfig) -> (AppConfig, Vec<String>) {
    let mut config = AppConfig::default();
    let mut warnings = Vec::new();

    // -- Filters: endpoint_debounce_ms --
    if let Some(ms) = raw.filters.endpoint_debounce_ms {
        if (constants::MIN_TEXT_DEBOUNCE_MS..=constants::MAX_TEXT_DEBOUNCE_MS).contains(&ms) {
            config.text_debounce_ms = ms;
        } else {
            warnings.push(out_of_range(
                "filters.endpoint_debounce_ms",
                ms,
                format!(
                    "{}-{}",
                    constants::MIN_TEXT_DEBOUNCE_MS,
                    constants::MAX_TEXT_DEBOUNCE_MS
                ),
                constants::DEFAULT_TEXT_DEBOUNCE_MS,
            ));
        }
    }

    // -- Filters: timezone --
    if let Some(ref name) = raw.filters.timezone {
        if !name.trim().is_empty() {
            match parse_zone(name) {
                Ok(tz) => config.timezone = Some(tz),
                Err(e) => warnings.push(format!(
                    "[filters] timezone: {e}. Using the system timezone."
                )),
            }
        }
    }

    // -- Filters: apply_on_close --
    if let Some(apply) = raw.filters.apply_on_close {
        config.apply_on_close = apply;
    }

    // -- UI: theme --
    if let Some(ref theme) = raw.ui.theme {
        match theme.to_lowercase().as_str() {
            "dark" => config.dark_mode = true,
            "light" => config.dark_mode = false,
            other => {
                warnings.push(format!(
                    "[ui] theme = \"{other}\" is not recognised. Expected \"dark\" or \"light\". Using default (dark).",
                ));
            }
        }
    }

    // -- UI: font_size --
    if let Some(size) = raw.ui.font_size {
        if (constants::MIN_FONT_SIZE..=constants::MAX_FONT_SIZE).contains(&size) {
            config.font_size = size;
        } else {
            warnings.push(out_of_range(
                "ui.font_size",
                size,
                format!("{}-{}", constants::MIN_FONT_SIZE, constants::MAX_FONT_SIZE),
                constants::DEFAULT_FONT_SIZE,
            ));
        }
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        if constants::LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.to_lowercase());
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: error, warn, info, debug, trace. Using default (info).",
            ));
        }
    }

    // -- Logging: file --
    if let Some(ref file) = raw.logging.file {
        if !file.is_empty() {
            config.log_file = Some(file.clone());
        }
    }

    (config, warnings)
}

fn out_of_range(
    field: &str,
    value: impl std::fmt::Display,
    expected: String,
    default: impl std::fmt::Display,
) -> String {
    let err = ConfigError::ValueOutOfRange {
        field: field.to_string(),
        value: value.to_string(),
        expected,
    };
    format!("{}. Using default ({default}).", LogLensError::from(err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, body: &str) {
        std::fs::write(dir.path().join(constants::CONFIG_FILE_NAME), body).unwrap();
    }

    #[test]
    fn test_missing_config_uses_defaults_silently() {
        let dir = TempDir::new().unwrap();
        let (config, warnings) = load_config(dir.path());
        assert!(warnings.is_empty());
        assert_eq!(config.text_debounce_ms, constants::DEFAULT_TEXT_DEBOUNCE_MS);
        assert!(config.apply_on_close);
        assert!(config.timezone.is_none());
    }

    #[test]
    fn test_valid_config_is_applied() {
        let dir = TempDir::new().unwrap();
        write_config(
            &dir,
            r#"
[filters]
endpoint_debounce_ms = 250
timezone = "Europe/Berlin"
apply_on_close = false

[ui]
theme = "light"

[logging]
level = "DEBUG"
"#,
        );
        let (config, warnings) = load_config(dir.path());
        assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
        assert_eq!(config.text_debounce_ms, 250);
        assert_eq!(config.timezone, Some(chrono_tz::Europe::Berlin));
        assert!(!config.apply_on_close);
        assert!(!config.dark_mode);
        assert_eq!(config.log_level.as_deref(), Some("debug"));

        let options = config.toolbar_options();
        assert_eq!(options.text_debounce, Duration::from_millis(250));
        assert!(!options.apply_on_close);
    }

    #[test]
    fn test_invalid_values_warn_and_fall_back() {
        let dir = TempDir::new().unwrap();
        write_config(
            &dir,
            r#"
[filters]
endpoint_debounce_ms = 0
timezone = "Atlantis/Capital"

[ui]
font_size = 99.0
"#,
        );
        let (config, warnings) = load_config(dir.path());
        assert_eq!(warnings.len(), 3, "got: {warnings:?}");
        assert!(warnings[0].starts_with("Configuration error:"));
        assert!(warnings[0].contains("endpoint_debounce_ms"));
        assert_eq!(config.text_debounce_ms, constants::DEFAULT_TEXT_DEBOUNCE_MS);
        assert!(config.timezone.is_none());
        assert_eq!(config.font_size, constants::DEFAULT_FONT_SIZE);
    }

    #[test]
    fn test_unparseable_config_warns_once() {
        let dir = TempDir::new().unwrap();
        write_config(&dir, "[filters\nendpoint_debounce_ms = ");
        let (config, warnings) = load_config(dir.path());
        assert_eq!(warnings.len(), 1);
        assert!(config.apply_on_close);
    }
}
