// LogLens - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// All errors preserve the causal chain for diagnostic logging.
//
// Translator operations (commit/expand/preset matching) are infallible by
// construction; errors here come from the edges: zone names, config files,
// session files and request-log exports.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all LogLens operations.
#[derive(Debug)]
pub enum LogLensError {
    /// Timezone resolution or parsing failed.
    Timezone(TimezoneError),

    /// Configuration loading or validation failed.
    Config(ConfigError),

    /// Session save/load failed.
    Session(SessionError),

    /// Request-log export could not be loaded.
    Entries(EntriesError),
}

impl fmt::Display for LogLensError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timezone(e) => write!(f, "Timezone error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::Session(e) => write!(f, "Session error: {e}"),
            Self::Entries(e) => write!(f, "Request log error: {e}"),
        }
    }
}

impl std::error::Error for LogLensError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Timezone(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Session(e) => Some(e),
            Self::Entries(e) => Some(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Timezone errors
// ---------------------------------------------------------------------------

/// Errors related to timezone identifiers.
#[derive(Debug)]
pub enum TimezoneError {
    /// The identifier is not a known IANA zone name.
    UnknownZone { name: String, reason: String },

    /// The host zone could not be determined.
    HostDetection {
        source: iana_time_zone::GetTimezoneError,
    },
}

impl fmt::Display for TimezoneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownZone { name, reason } => {
                write!(f, "'{name}' is not a known IANA timezone: {reason}")
            }
            Self::HostDetection { source } => {
                write!(f, "Cannot determine the system timezone: {source}")
            }
        }
    }
}

impl std::error::Error for TimezoneError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::HostDetection { source } => Some(source),
            Self::UnknownZone { .. } => None,
        }
    }
}

impl From<TimezoneError> for LogLensError {
    fn from(e: TimezoneError) -> Self {
        Self::Timezone(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for LogLensError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Session errors
// ---------------------------------------------------------------------------

/// Errors related to session persistence.
#[derive(Debug)]
pub enum SessionError {
    /// Creating, writing or renaming the session file failed.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },

    /// Session JSON could not be serialised.
    Serialise { source: serde_json::Error },
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
            Self::Serialise { source } => write!(f, "Failed to serialise session: {source}"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Serialise { source } => Some(source),
        }
    }
}

impl From<SessionError> for LogLensError {
    fn from(e: SessionError) -> Self {
        Self::Session(e)
    }
}

// ---------------------------------------------------------------------------
// Request-log export errors
// ---------------------------------------------------------------------------

/// Errors related to loading a request-log export.
#[derive(Debug)]
pub enum EntriesError {
    /// I/O error reading the export.
    Io { path: PathBuf, source: io::Error },

    /// The export is not a JSON array of request rows.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Export file exceeds the maximum allowed size.
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },
}

impl fmt::Display for EntriesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Cannot read '{}': {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "'{}' is not a valid request-log export: {source}", path.display())
            }
            Self::FileTooLarge {
                path,
                size,
                max_size,
            } => write!(
                f,
                "'{}' is {size} bytes, exceeds maximum of {max_size} bytes",
                path.display()
            ),
        }
    }
}

impl std::error::Error for EntriesError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::FileTooLarge { .. } => None,
        }
    }
}

impl From<EntriesError> for LogLensError {
    fn from(e: EntriesError) -> Self {
        Self::Entries(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_unknown_zone_message_names_the_zone() {
        let err: LogLensError = TimezoneError::UnknownZone {
            name: "Mars/Olympus".to_string(),
            reason: "not found".to_string(),
        }
        .into();
        let msg = err.to_string();
        assert!(msg.contains("Mars/Olympus"), "got: {msg}");
        assert!(err.source().is_some());
    }

    #[test]
    fn test_session_io_error_preserves_source() {
        let err = SessionError::Io {
            path: PathBuf::from("/tmp/session.json"),
            operation: "rename",
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("rename"));
        assert!(err.source().is_some());

        let wrapped = LogLensError::from(err);
        assert!(wrapped.to_string().starts_with("Session error: I/O error during rename"));
    }
}
