//! Color mode configuration.
//!
//! Configuration lives alongside the colors in a theme document, under a
//! `config` section:
//!
//! ```yaml
//! config:
//!   initialColorModeName: light
//!   useColorSchemeMediaQuery: false
//! colors:
//!   text: "#000"
//!   background: "#fff"
//!   modes:
//!     dark: { text: "#fff", background: "#000" }
//! ```
//!
//! The same keys are also accepted at the top level of the document for
//! older themes. When both are present, the `config` section wins.

use serde::{Deserialize, Serialize};

/// Name of the root mode when `initialColorModeName` is not set.
pub const DEFAULT_MODE_NAME: &str = "default";

/// Storage key used when `storageKey` is not set.
pub const DEFAULT_STORAGE_KEY: &str = "theme-ui-color-mode";

/// Class and custom-property prefix used when `classPrefix` is not set.
pub const DEFAULT_CLASS_PREFIX: &str = "theme-ui";

/// Target selector used when neither `target` nor `targetSelector` is set.
pub const DEFAULT_TARGET_SELECTOR: &str = "html";

/// Effective color mode settings for a theme.
///
/// Every field has a default, so an empty `config` section (or none at all)
/// yields a working configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorModeConfig {
    /// Name of the implicit mode formed by the root color tokens.
    pub initial_color_mode_name: String,
    /// Mode selected when there is no persisted choice and no usable
    /// system preference. `None` selects the root mode.
    pub default_color_mode_name: Option<String>,
    /// Whether the OS `prefers-color-scheme` setting may pick the mode.
    pub use_color_scheme_media_query: bool,
    /// Whether markers and stylesheets carry CSS custom properties.
    pub use_custom_properties: bool,
    /// Whether the chosen mode is read from and written to the mode store.
    pub use_local_storage: bool,
    /// Key under which the chosen mode is persisted.
    pub storage_key: String,
    /// Prefix for marker classes and custom properties.
    pub class_prefix: String,
    /// Mode whose palette is forced for print media.
    pub print_color_mode_name: Option<String>,
    /// Selector of the element that receives the marker.
    pub target_selector: String,
}

impl Default for ColorModeConfig {
    fn default() -> Self {
        Self {
            initial_color_mode_name: DEFAULT_MODE_NAME.to_string(),
            default_color_mode_name: None,
            use_color_scheme_media_query: true,
            use_custom_properties: true,
            use_local_storage: true,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            class_prefix: DEFAULT_CLASS_PREFIX.to_string(),
            print_color_mode_name: None,
            target_selector: DEFAULT_TARGET_SELECTOR.to_string(),
        }
    }
}

impl ColorModeConfig {
    /// Creates a configuration with all defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Renames the root mode.
    pub fn initial_mode_name(mut self, name: impl Into<String>) -> Self {
        self.initial_color_mode_name = name.into();
        self
    }

    /// Sets the mode used when nothing else selects one.
    pub fn default_mode_name(mut self, name: impl Into<String>) -> Self {
        self.default_color_mode_name = Some(name.into());
        self
    }

    /// Enables or disables system preference detection.
    pub fn media_query(mut self, enabled: bool) -> Self {
        self.use_color_scheme_media_query = enabled;
        self
    }

    /// Enables or disables custom properties on markers and stylesheets.
    pub fn custom_properties(mut self, enabled: bool) -> Self {
        self.use_custom_properties = enabled;
        self
    }

    /// Enables or disables persistence of the chosen mode.
    pub fn local_storage(mut self, enabled: bool) -> Self {
        self.use_local_storage = enabled;
        self
    }

    /// Sets the key under which the chosen mode is persisted.
    pub fn storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Sets the marker class and custom-property prefix.
    pub fn class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.class_prefix = prefix.into();
        self
    }

    /// Sets the mode forced for print media.
    pub fn print_mode_name(mut self, name: impl Into<String>) -> Self {
        self.print_color_mode_name = Some(name.into());
        self
    }

    /// Sets the selector of the element receiving the marker.
    pub fn target(mut self, selector: impl Into<String>) -> Self {
        self.target_selector = selector.into();
        self
    }
}

/// Configuration as written in a theme document, every key optional.
///
/// Layered onto a [`ColorModeConfig`] with [`apply_to`](Self::apply_to).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawConfig {
    pub initial_color_mode_name: Option<String>,
    pub default_color_mode_name: Option<String>,
    pub use_color_scheme_media_query: Option<bool>,
    pub use_custom_properties: Option<bool>,
    pub use_local_storage: Option<bool>,
    pub storage_key: Option<String>,
    pub class_prefix: Option<String>,
    pub print_color_mode_name: Option<String>,
    #[serde(alias = "target")]
    pub target_selector: Option<String>,
}

impl RawConfig {
    /// Combines two overlays; fields set in `other` win.
    pub fn or_else(self, other: RawConfig) -> RawConfig {
        RawConfig {
            initial_color_mode_name: other.initial_color_mode_name.or(self.initial_color_mode_name),
            default_color_mode_name: other.default_color_mode_name.or(self.default_color_mode_name),
            use_color_scheme_media_query: other
                .use_color_scheme_media_query
                .or(self.use_color_scheme_media_query),
            use_custom_properties: other.use_custom_properties.or(self.use_custom_properties),
            use_local_storage: other.use_local_storage.or(self.use_local_storage),
            storage_key: other.storage_key.or(self.storage_key),
            class_prefix: other.class_prefix.or(self.class_prefix),
            print_color_mode_name: other.print_color_mode_name.or(self.print_color_mode_name),
            target_selector: other.target_selector.or(self.target_selector),
        }
    }

    /// The fields of `config` that differ from [`ColorModeConfig::default`].
    pub fn changed_fields(config: &ColorModeConfig) -> RawConfig {
        let defaults = ColorModeConfig::default();
        let changed = |value: &String, default: &String| (value != default).then(|| value.clone());
        RawConfig {
            initial_color_mode_name: changed(
                &config.initial_color_mode_name,
                &defaults.initial_color_mode_name,
            ),
            default_color_mode_name: config.default_color_mode_name.clone(),
            use_color_scheme_media_query: (config.use_color_scheme_media_query
                != defaults.use_color_scheme_media_query)
                .then_some(config.use_color_scheme_media_query),
            use_custom_properties: (config.use_custom_properties != defaults.use_custom_properties)
                .then_some(config.use_custom_properties),
            use_local_storage: (config.use_local_storage != defaults.use_local_storage)
                .then_some(config.use_local_storage),
            storage_key: changed(&config.storage_key, &defaults.storage_key),
            class_prefix: changed(&config.class_prefix, &defaults.class_prefix),
            print_color_mode_name: config.print_color_mode_name.clone(),
            target_selector: changed(&config.target_selector, &defaults.target_selector),
        }
    }

    /// Overwrites the fields of `config` that are set here.
    pub fn apply_to(self, config: &mut ColorModeConfig) {
        if let Some(v) = self.initial_color_mode_name {
            config.initial_color_mode_name = v;
        }
        if let Some(v) = self.default_color_mode_name {
            config.default_color_mode_name = Some(v);
        }
        if let Some(v) = self.use_color_scheme_media_query {
            config.use_color_scheme_media_query = v;
        }
        if let Some(v) = self.use_custom_properties {
            config.use_custom_properties = v;
        }
        if let Some(v) = self.use_local_storage {
            config.use_local_storage = v;
        }
        if let Some(v) = self.storage_key {
            config.storage_key = v;
        }
        if let Some(v) = self.class_prefix {
            config.class_prefix = v;
        }
        if let Some(v) = self.print_color_mode_name {
            config.print_color_mode_name = Some(v);
        }
        if let Some(v) = self.target_selector {
            config.target_selector = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ColorModeConfig::default();
        assert_eq!(config.initial_color_mode_name, "default");
        assert_eq!(config.default_color_mode_name, None);
        assert!(config.use_color_scheme_media_query);
        assert!(config.use_custom_properties);
        assert!(config.use_local_storage);
        assert_eq!(config.storage_key, "theme-ui-color-mode");
        assert_eq!(config.target_selector, "html");
    }

    #[test]
    fn raw_config_only_overrides_present_keys() {
        let raw: RawConfig = serde_yaml::from_str(
            r#"
            initialColorModeName: light
            useColorSchemeMediaQuery: false
            "#,
        )
        .unwrap();

        let mut config = ColorModeConfig::default();
        raw.apply_to(&mut config);

        assert_eq!(config.initial_color_mode_name, "light");
        assert!(!config.use_color_scheme_media_query);
        assert!(config.use_custom_properties);
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
    }

    #[test]
    fn target_is_an_alias_for_target_selector() {
        let raw: RawConfig = serde_yaml::from_str("target: \"#root\"").unwrap();
        let mut config = ColorModeConfig::default();
        raw.apply_to(&mut config);
        assert_eq!(config.target_selector, "#root");
    }

    #[test]
    fn later_overlay_wins_field_by_field() {
        let legacy: RawConfig = serde_yaml::from_str("storageKey: old\nclassPrefix: app").unwrap();
        let section: RawConfig = serde_yaml::from_str("storageKey: new").unwrap();

        let mut config = ColorModeConfig::default();
        legacy.or_else(section).apply_to(&mut config);
        assert_eq!(config.storage_key, "new");
        assert_eq!(config.class_prefix, "app");
    }

    #[test]
    fn changed_fields_skips_defaults() {
        let config = ColorModeConfig::new().storage_key("site").media_query(false);
        let changed = RawConfig::changed_fields(&config);
        assert_eq!(changed.storage_key.as_deref(), Some("site"));
        assert_eq!(changed.use_color_scheme_media_query, Some(false));
        assert_eq!(changed.initial_color_mode_name, None);
        assert_eq!(changed.class_prefix, None);
    }

    #[test]
    fn builder_chain() {
        let config = ColorModeConfig::new()
            .initial_mode_name("light")
            .default_mode_name("dark")
            .media_query(false)
            .class_prefix("app");

        assert_eq!(config.initial_color_mode_name, "light");
        assert_eq!(config.default_color_mode_name.as_deref(), Some("dark"));
        assert!(!config.use_color_scheme_media_query);
        assert_eq!(config.class_prefix, "app");
    }
}
