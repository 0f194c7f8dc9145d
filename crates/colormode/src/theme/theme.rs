//! Theme struct holding a root palette and named mode overrides.
//!
//! # Construction Methods
//!
//! ## Programmatic (Builder API)
//!
//! ```rust
//! use colormode::Theme;
//!
//! let theme = Theme::new()
//!     .color("text", "#000")
//!     .color("background", "#fff")
//!     .mode("dark", [("text", "#fff"), ("background", "#000")]);
//!
//! assert_eq!(theme.mode_names(), vec!["default", "dark"]);
//! ```
//!
//! ## From YAML
//!
//! ```rust
//! use colormode::Theme;
//!
//! let theme = Theme::from_yaml(r##"
//! config:
//!   initialColorModeName: light
//! colors:
//!   text: "#000"
//!   background: "#fff"
//!   modes:
//!     dark:
//!       text: "#fff"
//!       background: "#000"
//! "##).unwrap();
//!
//! assert_eq!(theme.root_mode_name(), "light");
//! assert!(theme.has_mode("dark"));
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_yaml::Value;

use super::tokens::{flatten_tokens, TokenMap, MODES_KEY};
use crate::config::{ColorModeConfig, RawConfig};
use crate::error::ThemeError;

/// Origin label for themes parsed from in-memory content.
const INLINE_ORIGIN: &str = "<inline>";

/// A root color palette plus named, partial mode overrides.
///
/// The root tokens always form an implicit mode named by
/// [`ColorModeConfig::initial_color_mode_name`] (`"default"` unless
/// renamed). Each entry under `colors.modes` is a partial override: tokens
/// it does not mention keep their root value.
#[derive(Debug, Clone, Default)]
pub struct Theme {
    /// Theme name (optional, typically derived from filename).
    name: Option<String>,
    /// Source file path (for refresh support).
    source_path: Option<PathBuf>,
    /// Root tokens.
    tokens: TokenMap,
    /// Mode overrides in declaration order.
    modes: Vec<(String, TokenMap)>,
    config: ColorModeConfig,
    /// Config fields the document or caller set explicitly.
    explicit: RawConfig,
}

#[derive(Debug, Deserialize)]
struct ThemeDocument {
    #[serde(default)]
    colors: Option<Value>,
    #[serde(default)]
    config: Option<RawConfig>,
    #[serde(flatten)]
    legacy: RawConfig,
}

/// Document formats a theme can be loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeFormat {
    /// YAML document (`.yaml`, `.yml`).
    Yaml,
    /// JSON document (`.json`).
    Json,
}

impl ThemeFormat {
    /// Picks the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "yaml" | "yml" => Some(ThemeFormat::Yaml),
            "json" => Some(ThemeFormat::Json),
            _ => None,
        }
    }
}

impl Theme {
    /// Creates an empty, unnamed theme with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty theme with the given name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Sets the name on this theme, returning `self` for chaining.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replaces the color mode configuration.
    pub fn with_config(mut self, config: ColorModeConfig) -> Self {
        self.explicit = RawConfig::changed_fields(&config);
        self.config = config;
        self
    }

    /// Parses a theme from YAML content.
    ///
    /// # Errors
    ///
    /// Returns a [`ThemeError`] if the YAML is malformed or a token value
    /// is not a scalar.
    pub fn from_yaml(yaml: &str) -> Result<Self, ThemeError> {
        Self::parse(yaml, ThemeFormat::Yaml, INLINE_ORIGIN)
    }

    /// Parses a theme from JSON content.
    ///
    /// # Errors
    ///
    /// Returns a [`ThemeError`] if the JSON is malformed or a token value
    /// is not a scalar.
    pub fn from_json(json: &str) -> Result<Self, ThemeError> {
        Self::parse(json, ThemeFormat::Json, INLINE_ORIGIN)
    }

    /// Loads a theme from a YAML or JSON file, chosen by extension.
    ///
    /// The theme name is derived from the filename (without extension).
    /// The source path is stored for [`refresh`](Theme::refresh) support.
    ///
    /// # Errors
    ///
    /// Returns a [`ThemeError`] if the extension is unknown, or if the file
    /// cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ThemeError> {
        let path = path.as_ref();
        let format = ThemeFormat::from_path(path)
            .ok_or_else(|| ThemeError::UnsupportedFormat(path.to_path_buf()))?;
        let content = std::fs::read_to_string(path).map_err(|source| ThemeError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let mut theme = Self::parse(&content, format, &path.display().to_string())?;
        theme.name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .map(|s| s.to_string());
        theme.source_path = Some(path.to_path_buf());
        tracing::debug!(
            path = %path.display(),
            modes = theme.mode_count(),
            tokens = theme.len(),
            "loaded theme"
        );
        Ok(theme)
    }

    /// Reloads the theme from its source file.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::NoSource`] if the theme was not loaded with
    /// [`from_file`](Theme::from_file), or any error from re-reading it.
    pub fn refresh(&mut self) -> Result<(), ThemeError> {
        let path = self.source_path.clone().ok_or(ThemeError::NoSource)?;
        let reloaded = Self::from_file(&path)?;
        self.tokens = reloaded.tokens;
        self.modes = reloaded.modes;
        self.config = reloaded.config;
        self.explicit = reloaded.explicit;
        Ok(())
    }

    fn parse(content: &str, format: ThemeFormat, origin: &str) -> Result<Self, ThemeError> {
        let document: ThemeDocument = match format {
            ThemeFormat::Yaml => {
                serde_yaml::from_str(content).map_err(|e| ThemeError::parse(origin, e))?
            }
            ThemeFormat::Json => {
                serde_json::from_str(content).map_err(|e| ThemeError::parse(origin, e))?
            }
        };
        Self::from_document(document)
    }

    fn from_document(document: ThemeDocument) -> Result<Self, ThemeError> {
        let explicit = match document.config {
            Some(section) => document.legacy.or_else(section),
            None => document.legacy,
        };
        let mut config = ColorModeConfig::default();
        explicit.clone().apply_to(&mut config);

        let mut tokens = TokenMap::new();
        let mut modes = Vec::new();
        if let Some(colors) = document.colors.as_ref() {
            flatten_tokens(colors, "", true, &mut tokens)?;
            if let Some(mode_map) = colors.get(MODES_KEY) {
                modes = parse_modes(mode_map)?;
            }
        }

        Ok(Self {
            name: None,
            source_path: None,
            tokens,
            modes,
            config,
            explicit,
        })
    }

    /// Adds a root color token, returning an updated theme for chaining.
    pub fn color(mut self, token: impl Into<String>, value: impl Into<String>) -> Self {
        self.tokens.insert(token.into(), value.into());
        self
    }

    /// Adds override tokens for a mode, creating the mode if needed.
    ///
    /// Calling this again for an existing mode merges the new overrides
    /// into it.
    pub fn mode<I, K, V>(mut self, name: impl Into<String>, overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let entries = overrides.into_iter().map(|(k, v)| (k.into(), v.into()));
        let name = name.into();
        match self.modes.iter_mut().find(|(n, _)| *n == name) {
            Some((_, tokens)) => tokens.extend(entries),
            None => self.modes.push((name, entries.collect())),
        }
        self
    }

    /// Returns the theme name, if set.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the source file path, if this theme was loaded from a file.
    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    /// Returns the color mode configuration.
    pub fn config(&self) -> &ColorModeConfig {
        &self.config
    }

    /// Returns the color mode configuration for modification.
    pub fn config_mut(&mut self) -> &mut ColorModeConfig {
        &mut self.config
    }

    /// Returns the root tokens, without any mode overrides applied.
    pub fn root_tokens(&self) -> &TokenMap {
        &self.tokens
    }

    /// Name of the implicit mode formed by the root tokens.
    pub fn root_mode_name(&self) -> &str {
        &self.config.initial_color_mode_name
    }

    /// All mode names, root mode first, then overrides in declaration order.
    ///
    /// An explicit mode sharing the root mode's name is listed once.
    pub fn mode_names(&self) -> Vec<&str> {
        let root = self.root_mode_name();
        std::iter::once(root)
            .chain(
                self.modes
                    .iter()
                    .map(|(name, _)| name.as_str())
                    .filter(|name| *name != root),
            )
            .collect()
    }

    /// Returns true if `name` is the root mode or a declared mode.
    pub fn has_mode(&self, name: &str) -> bool {
        name == self.root_mode_name() || self.modes.iter().any(|(n, _)| n == name)
    }

    /// Returns the override tokens declared for a mode.
    pub fn mode_overrides(&self, name: &str) -> Option<&TokenMap> {
        self.modes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, tokens)| tokens)
    }

    /// Number of modes, including the root mode.
    pub fn mode_count(&self) -> usize {
        self.mode_names().len()
    }

    /// Returns true if no root tokens are defined.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Returns the number of root tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Merges another theme into this one.
    ///
    /// Root tokens and mode overrides from `other` take precedence, as do
    /// the config fields `other` sets. Fields `other` leaves at their
    /// defaults keep this theme's value. This allows layering a user theme
    /// on top of a base theme.
    pub fn merge(mut self, other: Theme) -> Self {
        self.tokens.extend(other.tokens);
        for (name, overrides) in other.modes {
            self = self.mode(name, overrides);
        }
        let set = other
            .explicit
            .or_else(RawConfig::changed_fields(&other.config));
        set.clone().apply_to(&mut self.config);
        self.explicit = std::mem::take(&mut self.explicit).or_else(set);
        if other.name.is_some() {
            self.name = other.name;
        }
        self
    }
}

fn parse_modes(value: &Value) -> Result<Vec<(String, TokenMap)>, ThemeError> {
    if value.is_null() {
        return Ok(Vec::new());
    }
    let map = value.as_mapping().ok_or_else(|| ThemeError::InvalidToken {
        token: MODES_KEY.to_string(),
        message: "modes must be a mapping of mode names".to_string(),
    })?;

    let mut modes = Vec::with_capacity(map.len());
    for (key, overrides) in map {
        let name = key.as_str().ok_or_else(|| ThemeError::InvalidToken {
            token: MODES_KEY.to_string(),
            message: format!("mode names must be strings, got {:?}", key),
        })?;
        let mut tokens = TokenMap::new();
        if !overrides.is_null() {
            flatten_tokens(overrides, "", false, &mut tokens)?;
        }
        modes.push((name.to_string(), tokens));
    }
    Ok(modes)
}
