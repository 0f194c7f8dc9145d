//! # colormode - Color Modes for Themes
//!
//! `colormode` picks, persists and signals the active color mode of a theme.
//! A theme has a root palette and any number of named, partial overrides
//! ("modes", e.g. `dark`). The crate decides which mode is active, resolves
//! its palette, marks a target element so styling rules can react, and
//! renders a startup script that sets that mark before first paint.
//!
//! ## Core Concepts
//!
//! - [`Theme`]: root color tokens plus named mode overrides and a [`ColorModeConfig`]
//! - [`resolve`]: persisted choice → system preference → configured default → root mode
//! - [`get_palette`]: root tokens with a mode's overrides applied
//! - [`ColorModeState`]: the session's active mode, with [`set_mode`](ColorModeState::set_mode)
//! - [`ModeStore`]: where the chosen mode is persisted ([`MemoryStore`], [`FileStore`])
//! - [`Marker`] / [`MarkerTarget`]: class and custom properties for the target element
//! - [`init_script`] / [`stylesheet`]: markup and CSS for the host page
//!
//! ## Quick Start
//!
//! ```rust
//! use colormode::{get_palette, resolve, SystemPreference, Theme};
//!
//! let theme = Theme::from_yaml(r##"
//! colors:
//!   text: "#000"
//!   background: "#fff"
//!   modes:
//!     dark:
//!       text: "#fff"
//!       background: "#000"
//! "##).unwrap();
//!
//! let mode = resolve(&theme, None, SystemPreference::Dark, None);
//! assert_eq!(mode, "dark");
//!
//! let palette = get_palette(&theme, &mode);
//! assert_eq!(palette.get("background"), Some("#000"));
//! ```
//!
//! ## Session State
//!
//! ```rust
//! use colormode::{ColorModeState, ElementMarker, MemoryStore, ModeStore, SystemPreference, Theme};
//!
//! let theme = Theme::new().color("text", "#000").mode("dark", [("text", "#fff")]);
//! // Real callers pass `&OsPreferenceDetector`
//! let detector = || SystemPreference::Light;
//! let mut state = ColorModeState::initialize(theme, MemoryStore::new(), &detector);
//!
//! let mut html = ElementMarker::new("html");
//! state.set_mode("dark", &mut html).unwrap();
//! assert_eq!(state.store().get("theme-ui-color-mode").as_deref(), Some("dark"));
//! ```
//!
//! ## Failure Model
//!
//! Resolution never fails. Unknown modes resolve to the root palette and
//! missing preferences fall through to the next source. Errors are limited
//! to loading themes ([`ThemeError`]) and explicit operations such as
//! switching to an undefined mode ([`ColorModeError`]).

pub mod config;
mod error;
pub mod marker;
pub mod palette;
pub mod preference;
pub mod resolve;
pub mod script;
pub mod state;
pub mod store;
pub mod theme;
mod util;

// Error types
pub use error::{ColorModeError, ThemeError};

// Theme and configuration
pub use config::ColorModeConfig;
pub use theme::{Theme, ThemeFormat, TokenMap};

// Resolution
pub use palette::{get_palette, Palette};
pub use preference::{
    detect_system_preference, FixedPreference, OsPreferenceDetector, PreferenceDetector,
    SystemPreference,
};
pub use resolve::{
    resolve, resolve_with_source, DefaultSource, ModeChain, ModeSource, ModeSourceKind,
    PersistedSource, ResolvedMode, SystemPreferenceSource,
};
pub use state::ColorModeState;

// Persistence
pub use store::{FileStore, MemoryStore, ModeStore};

// Markers and page output
pub use marker::{ElementMarker, Marker, MarkerTarget};
pub use script::{init_script, init_script_source, stylesheet};

// Utility exports
pub use util::{parse_hex_color, rgb_to_ansi256};
