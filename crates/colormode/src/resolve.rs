//! Mode resolution with fallback sources.
//!
//! The active mode is chosen by trying sources in priority order. The first
//! source that names a mode the theme defines wins; a source naming an
//! unknown mode is skipped. If nothing wins, the root mode is used.
//!
//! ```text
//! ModeChain
//! ├── PersistedSource          → None (nothing stored)
//! ├── SystemPreferenceSource   → Some("dark") ← returns this
//! ├── DefaultSource            → (not reached)
//! └── root mode                → (not reached)
//! ```
//!
//! [`resolve`] builds the standard chain from plain values:
//!
//! ```rust
//! use colormode::{resolve, SystemPreference, Theme};
//!
//! let theme = Theme::new().color("text", "#000").mode("dark", [("text", "#fff")]);
//!
//! assert_eq!(resolve(&theme, None, SystemPreference::Dark, None), "dark");
//! assert_eq!(resolve(&theme, Some("default"), SystemPreference::Dark, None), "default");
//! assert_eq!(resolve(&theme, Some("sepia"), SystemPreference::NoPreference, None), "default");
//! ```

use std::fmt;

use crate::preference::SystemPreference;
use crate::theme::Theme;

/// Which source picked the active mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeSourceKind {
    /// The user's persisted choice.
    Persisted,
    /// The system color scheme preference.
    SystemPreference,
    /// The configured default mode.
    ConfiguredDefault,
    /// Nothing else applied; the root mode.
    Root,
    /// An explicit switch during this session.
    UserSelection,
}

impl fmt::Display for ModeSourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ModeSourceKind::Persisted => "persisted choice",
            ModeSourceKind::SystemPreference => "system preference",
            ModeSourceKind::ConfiguredDefault => "configured default",
            ModeSourceKind::Root => "root mode",
            ModeSourceKind::UserSelection => "user selection",
        };
        f.write_str(label)
    }
}

/// A resolved mode name and the source that picked it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMode {
    /// The mode name. Always a mode of the theme it was resolved against.
    pub name: String,
    /// Which source provided it.
    pub source: ModeSourceKind,
}

/// One candidate in a [`ModeChain`].
///
/// Implementations return `None` to defer to the next source. They need not
/// check that the name exists in the theme; the chain does that.
pub trait ModeSource {
    /// What kind of source this is.
    fn kind(&self) -> ModeSourceKind;

    /// The mode this source proposes, if any.
    fn candidate(&self, theme: &Theme) -> Option<String>;
}

/// The mode read from the mode store.
#[derive(Debug, Clone, Default)]
pub struct PersistedSource(Option<String>);

impl PersistedSource {
    /// Creates a source from the stored value.
    pub fn new(stored: Option<impl Into<String>>) -> Self {
        Self(stored.map(Into::into))
    }
}

impl ModeSource for PersistedSource {
    fn kind(&self) -> ModeSourceKind {
        ModeSourceKind::Persisted
    }

    fn candidate(&self, theme: &Theme) -> Option<String> {
        if !theme.config().use_local_storage {
            return None;
        }
        self.0.clone().filter(|s| !s.is_empty())
    }
}

/// The mode matching the system color scheme.
///
/// Proposes nothing when the theme disables `useColorSchemeMediaQuery`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemPreferenceSource(SystemPreference);

impl SystemPreferenceSource {
    /// Creates a source from a detected preference.
    pub fn new(preference: SystemPreference) -> Self {
        Self(preference)
    }
}

impl ModeSource for SystemPreferenceSource {
    fn kind(&self) -> ModeSourceKind {
        ModeSourceKind::SystemPreference
    }

    fn candidate(&self, theme: &Theme) -> Option<String> {
        if !theme.config().use_color_scheme_media_query {
            return None;
        }
        self.0.mode_name().map(str::to_string)
    }
}

/// The configured default mode.
///
/// With no explicit value, proposes the theme's `defaultColorModeName`.
#[derive(Debug, Clone, Default)]
pub struct DefaultSource(Option<String>);

impl DefaultSource {
    /// Uses the theme's configured default.
    pub fn from_config() -> Self {
        Self(None)
    }

    /// Uses an explicit default, overriding the theme's configuration.
    pub fn new(name: impl Into<String>) -> Self {
        Self(Some(name.into()))
    }
}

impl ModeSource for DefaultSource {
    fn kind(&self) -> ModeSourceKind {
        ModeSourceKind::ConfiguredDefault
    }

    fn candidate(&self, theme: &Theme) -> Option<String> {
        self.0
            .clone()
            .or_else(|| theme.config().default_color_mode_name.clone())
    }
}

/// Ordered mode sources with a root-mode fallback.
pub struct ModeChain<'a> {
    sources: Vec<Box<dyn ModeSource + 'a>>,
}

impl<'a> ModeChain<'a> {
    /// Creates an empty chain. An empty chain always resolves to the root mode.
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    /// The standard chain: persisted choice, system preference, configured
    /// default.
    pub fn standard(persisted: Option<String>, preference: SystemPreference) -> Self {
        Self::new()
            .try_source(PersistedSource::new(persisted))
            .try_source(SystemPreferenceSource::new(preference))
            .try_source(DefaultSource::from_config())
    }

    /// Adds a source. Sources are tried in the order they are added.
    pub fn try_source<S: ModeSource + 'a>(mut self, source: S) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Number of sources in the chain.
    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    /// Resolves the chain against `theme`.
    ///
    /// The returned name is always one of [`Theme::mode_names`].
    pub fn resolve(&self, theme: &Theme) -> ResolvedMode {
        for source in &self.sources {
            let Some(name) = source.candidate(theme) else {
                continue;
            };
            if theme.has_mode(&name) {
                tracing::debug!(mode = %name, source = %source.kind(), "resolved color mode");
                return ResolvedMode {
                    name,
                    source: source.kind(),
                };
            }
            tracing::debug!(
                mode = %name,
                source = %source.kind(),
                "skipping color mode the theme does not define"
            );
        }

        let name = theme.root_mode_name().to_string();
        tracing::debug!(mode = %name, "no source applied, using root mode");
        ResolvedMode {
            name,
            source: ModeSourceKind::Root,
        }
    }
}

impl Default for ModeChain<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ModeChain<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModeChain")
            .field(
                "sources",
                &self.sources.iter().map(|s| s.kind()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// Resolves the active mode name and reports which source chose it.
///
/// `configured_default` overrides the theme's `defaultColorModeName` when
/// given.
pub fn resolve_with_source(
    theme: &Theme,
    persisted: Option<&str>,
    preference: SystemPreference,
    configured_default: Option<&str>,
) -> ResolvedMode {
    let default = match configured_default {
        Some(name) => DefaultSource::new(name),
        None => DefaultSource::from_config(),
    };
    ModeChain::new()
        .try_source(PersistedSource::new(persisted))
        .try_source(SystemPreferenceSource::new(preference))
        .try_source(default)
        .resolve(theme)
}

/// Resolves the active mode name.
///
/// Returns `persisted` if it names a mode; else the mode matching the
/// system preference when `useColorSchemeMediaQuery` is on; else
/// `configured_default` (or the theme's `defaultColorModeName`) if it names
/// a mode; else the root mode.
pub fn resolve(
    theme: &Theme,
    persisted: Option<&str>,
    preference: SystemPreference,
    configured_default: Option<&str>,
) -> String {
    resolve_with_source(theme, persisted, preference, configured_default).name
}
