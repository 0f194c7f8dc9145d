//! Markers signalling the active mode on a target element.
//!
//! A [`Marker`] carries everything styling rules need to react to a mode
//! change without re-rendering: the class `"{prefix}-{mode}"` and, when the
//! theme uses custom properties, one `--{prefix}-colors-{token}` property
//! per palette token.
//!
//! Markers are delivered to a [`MarkerTarget`]. [`ElementMarker`] keeps the
//! target's class list and inline properties in memory and renders them as
//! HTML attributes, which covers server-side rendering:
//!
//! ```rust
//! use colormode::{ElementMarker, Marker, MarkerTarget, Theme};
//!
//! let theme = Theme::new().color("text", "#000").mode("dark", [("text", "#fff")]);
//! let marker = Marker::for_mode(&theme, "dark");
//!
//! let mut html = ElementMarker::new("html");
//! html.apply_marker(&marker);
//! assert_eq!(
//!     html.to_attributes(),
//!     r#"class="theme-ui-dark" style="--theme-ui-colors-text: #fff""#
//! );
//! ```

use crate::palette::get_palette;
use crate::theme::Theme;

/// What to apply to the target element for one mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    /// The mode this marker signals.
    pub mode: String,
    /// Class added to the target.
    pub class_name: String,
    /// Selector of the target element.
    pub target_selector: String,
    /// Prefix shared by all marker classes and properties.
    pub prefix: String,
    /// Custom properties to set; empty when custom properties are disabled.
    pub custom_properties: Vec<(String, String)>,
}

impl Marker {
    /// Builds the marker for `mode` from the theme's palette and config.
    ///
    /// An unknown mode produces the root mode's marker.
    pub fn for_mode(theme: &Theme, mode: &str) -> Self {
        let config = theme.config();
        let palette = get_palette(theme, mode);
        let custom_properties = if config.use_custom_properties {
            palette.custom_properties(&config.class_prefix)
        } else {
            Vec::new()
        };

        Self {
            class_name: class_name(&config.class_prefix, palette.mode()),
            mode: palette.mode().to_string(),
            target_selector: config.target_selector.clone(),
            prefix: config.class_prefix.clone(),
            custom_properties,
        }
    }
}

/// Marker class for `mode`.
pub fn class_name(prefix: &str, mode: &str) -> String {
    format!("{}-{}", prefix, mode)
}

/// Receiver of mode markers.
pub trait MarkerTarget {
    /// Applies `marker`, replacing whatever a previous marker set.
    fn apply_marker(&mut self, marker: &Marker);
}

impl<T: MarkerTarget + ?Sized> MarkerTarget for &mut T {
    fn apply_marker(&mut self, marker: &Marker) {
        (**self).apply_marker(marker)
    }
}

/// Ignores markers.
impl MarkerTarget for () {
    fn apply_marker(&mut self, _marker: &Marker) {}
}

/// In-memory element state: a class list and inline custom properties.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementMarker {
    selector: String,
    classes: Vec<String>,
    properties: Vec<(String, String)>,
    marker_class: Option<String>,
    marker_prefix: Option<String>,
}

impl ElementMarker {
    /// Creates an element with no classes or properties.
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            ..Self::default()
        }
    }

    /// Adds a class not managed by markers.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        if !self.classes.contains(&class) {
            self.classes.push(class);
        }
        self
    }

    /// Selector this element stands for.
    pub fn selector(&self) -> &str {
        &self.selector
    }

    /// Current classes, in insertion order.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Returns true if the element has `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Current inline custom properties.
    pub fn properties(&self) -> &[(String, String)] {
        &self.properties
    }

    /// Looks up an inline property value.
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// The mode currently signalled, if any marker has been applied.
    pub fn mode(&self) -> Option<&str> {
        let class = self.marker_class.as_deref()?;
        let prefix = self.marker_prefix.as_deref()?;
        class
            .strip_prefix(prefix)
            .and_then(|rest| rest.strip_prefix('-'))
    }

    /// Renders the element state as HTML attributes.
    ///
    /// Empty attributes are omitted, so an untouched element renders as an
    /// empty string.
    pub fn to_attributes(&self) -> String {
        let mut attrs = Vec::new();
        if !self.classes.is_empty() {
            attrs.push(format!(r#"class="{}""#, escape_attr(&self.classes.join(" "))));
        }
        if !self.properties.is_empty() {
            let style = self
                .properties
                .iter()
                .map(|(name, value)| format!("{}: {}", name, value))
                .collect::<Vec<_>>()
                .join("; ");
            attrs.push(format!(r#"style="{}""#, escape_attr(&style)));
        }
        attrs.join(" ")
    }
}

impl MarkerTarget for ElementMarker {
    fn apply_marker(&mut self, marker: &Marker) {
        if let Some(previous) = self.marker_class.take() {
            self.classes.retain(|c| *c != previous);
        }
        if !self.has_class(&marker.class_name) {
            self.classes.push(marker.class_name.clone());
        }
        self.marker_class = Some(marker.class_name.clone());

        let property_prefix = format!("--{}-colors-", marker.prefix);
        self.properties
            .retain(|(name, _)| !name.starts_with(&property_prefix));
        self.properties
            .extend(marker.custom_properties.iter().cloned());
        self.marker_prefix = Some(marker.prefix.clone());
    }
}

fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}
