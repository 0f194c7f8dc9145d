//! Resolved palettes.
//!
//! A [`Palette`] is the read-only token map for one mode: the root tokens
//! with that mode's overrides laid on top. It is derived from a [`Theme`]
//! whenever the active mode changes and is never persisted.

use crate::theme::{custom_property_name, Theme, TokenMap};

/// Token values for a single resolved mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    mode: String,
    tokens: TokenMap,
}

impl Palette {
    /// Name of the mode this palette was resolved for.
    pub fn mode(&self) -> &str {
        &self.mode
    }

    /// Looks up a token value.
    pub fn get(&self, token: &str) -> Option<&str> {
        self.tokens.get(token).map(String::as_str)
    }

    /// Iterates tokens in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.tokens.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the underlying token map.
    pub fn tokens(&self) -> &TokenMap {
        &self.tokens
    }

    /// Consumes the palette, returning its token map.
    pub fn into_tokens(self) -> TokenMap {
        self.tokens
    }

    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns true if the palette has no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// CSS custom properties for this palette, in token order.
    pub fn custom_properties(&self, prefix: &str) -> Vec<(String, String)> {
        self.tokens
            .iter()
            .map(|(token, value)| (custom_property_name(prefix, token), value.clone()))
            .collect()
    }
}

/// Resolves the palette for `mode`.
///
/// The result is the root tokens overridden by the mode's entries. The root
/// mode also picks up an explicit mode declared under its own name. An
/// unknown mode resolves to the root palette.
///
/// ```rust
/// use colormode::{get_palette, Theme};
///
/// let theme = Theme::new()
///     .color("text", "#000")
///     .color("background", "#fff")
///     .mode("dark", [("text", "#fff"), ("background", "#000")]);
///
/// let dark = get_palette(&theme, "dark");
/// assert_eq!(dark.get("text"), Some("#fff"));
/// assert_eq!(dark.get("background"), Some("#000"));
/// ```
pub fn get_palette(theme: &Theme, mode: &str) -> Palette {
    let mode = if theme.has_mode(mode) {
        mode
    } else {
        tracing::warn!(
            mode,
            fallback = theme.root_mode_name(),
            "unknown color mode, using root palette"
        );
        theme.root_mode_name()
    };

    let mut tokens = theme.root_tokens().clone();
    if let Some(overrides) = theme.mode_overrides(mode) {
        tokens.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
    }

    Palette {
        mode: mode.to_string(),
        tokens,
    }
}

impl Theme {
    /// Resolves the palette for `mode`. See [`get_palette`].
    pub fn palette(&self, mode: &str) -> Palette {
        get_palette(self, mode)
    }
}
