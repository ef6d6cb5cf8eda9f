//! Error types for configme
//!
//! Every filesystem and argument failure is reported as a distinct kind so the
//! binary can decide how to exit.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// OS-level failure details: errno, its description and the offending path.
///
/// Renders as `[Errno <code>] <description>: '<path>'`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OsErrorDetail {
    /// Raw OS error number, `0` when the failure did not come from the OS
    pub code: i32,
    /// Human readable description of the failure
    pub description: String,
    /// Path the failing operation was applied to
    pub path: PathBuf,
}

impl OsErrorDetail {
    /// Build the detail from an I/O error raised while working on `path`
    pub fn from_io<P: AsRef<Path>>(err: &io::Error, path: P) -> Self {
        let code = err.raw_os_error().unwrap_or(0);
        let text = err.to_string();
        let suffix = format!(" (os error {code})");
        let description = text
            .strip_suffix(suffix.as_str())
            .map(str::to_string)
            .unwrap_or(text);

        Self {
            code,
            description,
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl fmt::Display for OsErrorDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[Errno {}] {}: '{}'",
            self.code,
            self.description,
            self.path.display()
        )
    }
}

/// Main error type for configme
#[derive(Error, Debug)]
pub enum ConfigmeError {
    /// A required directory does not exist or is inaccessible
    #[error("{message}")]
    LocationNotFound { message: String, path: PathBuf },

    /// A directory could not be created
    #[error("{detail}")]
    LocationCreation {
        detail: OsErrorDetail,
        #[source]
        source: io::Error,
    },

    /// A directory exists but could not be removed
    #[error("{detail}")]
    LocationRemoval {
        detail: OsErrorDetail,
        #[source]
        source: io::Error,
    },

    /// The target asset path is already occupied by a file
    #[error("Asset or Location already exist: {}", .path.display())]
    AssetLocationTaken { path: PathBuf },

    /// An asset file could not be written
    #[error("{detail}")]
    AssetCreation {
        detail: OsErrorDetail,
        #[source]
        source: io::Error,
    },

    /// Malformed or missing command line input
    #[error("{message}")]
    ScriptArgument { message: String },

    /// Help was explicitly requested; the message is the rendered help text
    #[error("{message}")]
    ScriptHelpArgument { message: String },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl ConfigmeError {
    /// Create a new location-not-found error
    pub fn location_not_found<P: Into<PathBuf>>(message: impl Into<String>, path: P) -> Self {
        Self::LocationNotFound {
            message: message.into(),
            path: path.into(),
        }
    }

    /// Create a new location creation error
    pub fn location_creation<P: AsRef<Path>>(path: P, source: io::Error) -> Self {
        Self::LocationCreation {
            detail: OsErrorDetail::from_io(&source, path),
            source,
        }
    }

    /// Create a new location removal error
    pub fn location_removal<P: AsRef<Path>>(path: P, source: io::Error) -> Self {
        Self::LocationRemoval {
            detail: OsErrorDetail::from_io(&source, path),
            source,
        }
    }

    /// Create a new asset-location-taken error
    pub fn asset_location_taken<P: Into<PathBuf>>(path: P) -> Self {
        Self::AssetLocationTaken { path: path.into() }
    }

    /// Create a new asset creation error
    pub fn asset_creation<P: AsRef<Path>>(path: P, source: io::Error) -> Self {
        Self::AssetCreation {
            detail: OsErrorDetail::from_io(&source, path),
            source,
        }
    }

    /// Create a new script argument error
    pub fn script_argument(message: impl Into<String>) -> Self {
        Self::ScriptArgument {
            message: message.into(),
        }
    }

    /// Create a new help request error
    pub fn script_help_argument(message: impl Into<String>) -> Self {
        Self::ScriptHelpArgument {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// OS error details for the kinds that carry them
    pub fn os_detail(&self) -> Option<&OsErrorDetail> {
        match self {
            Self::LocationCreation { detail, .. }
            | Self::LocationRemoval { detail, .. }
            | Self::AssetCreation { detail, .. } => Some(detail),
            _ => None,
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, ConfigmeError>;
