//! Error types for theme loading and color mode operations.
//!
//! Resolution itself never fails: unknown modes and missing preferences
//! degrade to the root palette. Errors only surface at the edges, when a
//! theme document is loaded, when a caller asks to switch to a mode the
//! theme does not define, or when the mode store cannot be written.

use std::io;
use std::path::PathBuf;

/// Error returned when a theme document cannot be loaded.
#[derive(Debug, thiserror::Error)]
pub enum ThemeError {
    /// The theme file could not be read.
    #[error("failed to read theme {path}: {source}")]
    Read {
        /// Path of the theme file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The document is not valid YAML/JSON or has the wrong shape.
    #[error("failed to parse theme {origin}: {message}")]
    Parse {
        /// File path, or `<inline>` for in-memory content.
        origin: String,
        /// Message from the parser.
        message: String,
    },

    /// A color token has a value that cannot be used as a color.
    #[error("invalid value for token '{token}': {message}")]
    InvalidToken {
        /// Flattened token name.
        token: String,
        /// Description of what was wrong.
        message: String,
    },

    /// The file extension does not map to a known theme format.
    #[error("unsupported theme file extension: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// [`Theme::refresh`](crate::Theme::refresh) was called on a theme
    /// that was not loaded from a file.
    #[error("cannot refresh: theme has no source file")]
    NoSource,
}

impl ThemeError {
    pub(crate) fn parse(origin: impl Into<String>, message: impl ToString) -> Self {
        Self::Parse {
            origin: origin.into(),
            message: message.to_string(),
        }
    }
}

/// Error type for color mode operations.
#[derive(Debug, thiserror::Error)]
pub enum ColorModeError {
    /// A mode was requested that the theme does not define.
    #[error("unknown color mode '{name}' (available: {})", .available.join(", "))]
    UnknownMode {
        /// The requested mode name.
        name: String,
        /// Modes the theme defines, root mode first.
        available: Vec<String>,
    },

    /// The mode store file could not be read or written.
    #[error("failed to access mode store {path}: {source}")]
    StoreIo {
        /// Path of the store file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The mode store contents could not be serialized.
    #[error("failed to serialize mode store: {0}")]
    StoreFormat(#[from] serde_json::Error),

    /// No platform configuration directory exists for the default store.
    #[error("no configuration directory available for the mode store")]
    NoStoreLocation,

    /// The startup script template failed to render.
    #[error("failed to render startup script: {0}")]
    Template(#[from] minijinja::Error),

    /// A theme failed to load.
    #[error(transparent)]
    Theme(#[from] ThemeError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_mode_lists_available_modes() {
        let err = ColorModeError::UnknownMode {
            name: "sepia".to_string(),
            available: vec!["default".to_string(), "dark".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("'sepia'"));
        assert!(msg.contains("default, dark"));
    }

    #[test]
    fn parse_error_names_origin() {
        let err = ThemeError::parse("<inline>", "expected a mapping");
        assert_eq!(
            err.to_string(),
            "failed to parse theme <inline>: expected a mapping"
        );
    }

    #[test]
    fn theme_error_converts_transparently() {
        let err: ColorModeError = ThemeError::NoSource.into();
        assert_eq!(err.to_string(), "cannot refresh: theme has no source file");
    }
}
