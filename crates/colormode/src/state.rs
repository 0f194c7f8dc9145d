//! Mode selection state.
//!
//! [`ColorModeState`] owns a theme, a [`ModeStore`] and the currently
//! active mode with its resolved palette. It is an ordinary value passed to
//! whoever needs it; there is no process-wide state.
//!
//! ```rust
//! use colormode::{ColorModeState, ElementMarker, FixedPreference, MemoryStore, SystemPreference, Theme};
//!
//! let theme = Theme::new()
//!     .color("text", "#000")
//!     .mode("dark", [("text", "#fff")]);
//!
//! let mut state = ColorModeState::initialize(
//!     theme,
//!     MemoryStore::new(),
//!     &FixedPreference(SystemPreference::NoPreference),
//! );
//! assert_eq!(state.mode(), "default");
//!
//! let mut html = ElementMarker::new("html");
//! state.set_mode("dark", &mut html).unwrap();
//! assert_eq!(state.palette().get("text"), Some("#fff"));
//! assert!(html.has_class("theme-ui-dark"));
//! ```

use crate::error::ColorModeError;
use crate::marker::{Marker, MarkerTarget};
use crate::palette::{get_palette, Palette};
use crate::preference::{PreferenceDetector, SystemPreference};
use crate::resolve::{ModeChain, ModeSourceKind, ResolvedMode};
use crate::store::ModeStore;
use crate::theme::Theme;

/// The active color mode of a session.
#[derive(Debug, Clone)]
pub struct ColorModeState<S> {
    theme: Theme,
    store: S,
    mode: ResolvedMode,
    palette: Palette,
}

impl<S: ModeStore> ColorModeState<S> {
    /// Resolves the initial mode: persisted choice, then system preference,
    /// then configured default, then the root mode.
    ///
    /// The detector is consulted only when the theme enables
    /// `useColorSchemeMediaQuery`, and the store only when it enables
    /// `useLocalStorage`.
    pub fn initialize(theme: Theme, store: S, detector: &dyn PreferenceDetector) -> Self {
        let config = theme.config();
        let persisted = if config.use_local_storage {
            store.get(&config.storage_key)
        } else {
            None
        };
        let preference = if config.use_color_scheme_media_query {
            detector.detect()
        } else {
            SystemPreference::NoPreference
        };

        let mode = ModeChain::standard(persisted, preference).resolve(&theme);
        let palette = get_palette(&theme, &mode.name);
        tracing::debug!(mode = %mode.name, source = %mode.source, "initialized color mode");

        Self {
            theme,
            store,
            mode,
            palette,
        }
    }

    /// Name of the active mode.
    pub fn mode(&self) -> &str {
        &self.mode.name
    }

    /// Which source picked the active mode.
    pub fn source(&self) -> ModeSourceKind {
        self.mode.source
    }

    /// Palette of the active mode.
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// The theme this state resolves against.
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// The backing mode store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consumes the state, returning its store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Marker for the active mode.
    pub fn marker(&self) -> Marker {
        Marker::for_mode(&self.theme, &self.mode.name)
    }

    /// Applies the active mode's marker to `target`.
    pub fn apply_marker<T: MarkerTarget + ?Sized>(&self, target: &mut T) {
        target.apply_marker(&self.marker());
    }

    /// Switches to `name`, persists it, and re-marks `target`.
    ///
    /// A store failure is logged and does not undo the switch.
    ///
    /// # Errors
    ///
    /// Returns [`ColorModeError::UnknownMode`] if the theme does not define
    /// `name`; the state is left unchanged.
    pub fn set_mode<T: MarkerTarget + ?Sized>(
        &mut self,
        name: &str,
        target: &mut T,
    ) -> Result<&Palette, ColorModeError> {
        if !self.theme.has_mode(name) {
            return Err(ColorModeError::UnknownMode {
                name: name.to_string(),
                available: self.available_modes(),
            });
        }

        let config = self.theme.config();
        if config.use_local_storage {
            if let Err(err) = self.store.set(&config.storage_key, name) {
                tracing::warn!(mode = name, error = %err, "failed to persist color mode");
            }
        }

        self.mode = ResolvedMode {
            name: name.to_string(),
            source: ModeSourceKind::UserSelection,
        };
        self.palette = get_palette(&self.theme, name);
        self.apply_marker(target);
        tracing::debug!(mode = name, "switched color mode");
        Ok(&self.palette)
    }

    /// Switches to the next mode in declaration order, wrapping around.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`set_mode`](Self::set_mode).
    pub fn cycle<T: MarkerTarget + ?Sized>(
        &mut self,
        target: &mut T,
    ) -> Result<&Palette, ColorModeError> {
        let next = {
            let modes = self.theme.mode_names();
            let index = modes
                .iter()
                .position(|m| *m == self.mode.name)
                .unwrap_or(0);
            modes[(index + 1) % modes.len()].to_string()
        };
        self.set_mode(&next, target)
    }

    /// Forgets the persisted choice and resolves the mode again.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored choice cannot be removed.
    pub fn reset<T: MarkerTarget + ?Sized>(
        &mut self,
        detector: &dyn PreferenceDetector,
        target: &mut T,
    ) -> Result<&Palette, ColorModeError> {
        let config = self.theme.config();
        if config.use_local_storage {
            self.store.remove(&config.storage_key)?;
        }

        let preference = if config.use_color_scheme_media_query {
            detector.detect()
        } else {
            SystemPreference::NoPreference
        };
        self.mode = ModeChain::standard(None, preference).resolve(&self.theme);
        self.palette = get_palette(&self.theme, &self.mode.name);
        self.apply_marker(target);
        Ok(&self.palette)
    }

    fn available_modes(&self) -> Vec<String> {
        self.theme
            .mode_names()
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}
