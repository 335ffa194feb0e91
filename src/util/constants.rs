// LogLens - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "LogLens";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "LogLens";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Time-of-day defaults
// =============================================================================

/// Start-of-range time-of-day used when none is set or the input is malformed.
pub const DEFAULT_START_TIME_OF_DAY: &str = "00:00:00";

/// End-of-range time-of-day used when none is set or the input is malformed.
pub const DEFAULT_END_TIME_OF_DAY: &str = "23:59:59";

/// Display format for a time-of-day value.
pub const TIME_OF_DAY_FORMAT: &str = "%H:%M:%S";

/// Accepted short form (time inputs without a seconds component).
pub const TIME_OF_DAY_SHORT_FORMAT: &str = "%H:%M";

/// Calendar date format used by the date-range inputs.
pub const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";

/// Calendar date format used on the date-range button label.
pub const DATE_LABEL_FORMAT: &str = "%m-%d-%Y";

/// Accepted year range for typed dates.
pub const MIN_INPUT_YEAR: i32 = 1;
pub const MAX_INPUT_YEAR: i32 = 9999;

// =============================================================================
// Debounce
// =============================================================================

/// Quiet period after the last keystroke before a free-text filter commits.
pub const DEFAULT_TEXT_DEBOUNCE_MS: u64 = 500;

/// Minimum user-configurable debounce (ms).
pub const MIN_TEXT_DEBOUNCE_MS: u64 = 50;

/// Maximum user-configurable debounce (ms).
pub const MAX_TEXT_DEBOUNCE_MS: u64 = 5_000;

// =============================================================================
// Filter choices
// =============================================================================

/// Status codes offered by the status selector, with their labels.
pub const STATUS_CODES: &[(&str, &str)] = &[
    ("200", "200 OK"),
    ("201", "201 Created"),
    ("204", "204 No Content"),
    ("400", "400 Bad Request"),
    ("401", "401 Unauthorized"),
    ("403", "403 Forbidden"),
    ("404", "404 Not Found"),
    ("500", "500 Server Error"),
    ("502", "502 Bad Gateway"),
    ("503", "503 Service Unavailable"),
];

// =============================================================================
// Request log loading
// =============================================================================

/// Maximum size of a request-log export file in bytes.
pub const MAX_ENTRIES_FILE_SIZE: u64 = 256 * 1024 * 1024; // 256 MB

/// Maximum number of request rows rendered in the table at once.
pub const MAX_RENDERED_ROWS: usize = 100_000;

// =============================================================================
// UI defaults
// =============================================================================

/// Default UI body font size in points.
pub const DEFAULT_FONT_SIZE: f32 = 14.5;

/// Minimum user-configurable UI font size (points).
pub const MIN_FONT_SIZE: f32 = 10.0;

/// Maximum user-configurable UI font size (points).
pub const MAX_FONT_SIZE: f32 = 24.0;

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Recognised log level names for config validation.
pub const LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Session persistence file name (stored in the platform data directory).
pub const SESSION_FILE_NAME: &str = "session.json";
