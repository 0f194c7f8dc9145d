//! Startup script and custom-property stylesheet generation.
//!
//! Both functions are pure: they read only the theme and return markup or
//! CSS text for the caller to embed.
//!
//! [`init_script`] produces a `<script>` element meant to run before first
//! paint. It picks the mode the same way [`resolve`](crate::resolve) does
//! (stored choice, then system preference, then configured default) and
//! adds the marker class to the target element, so the page never shows
//! the wrong palette while the rest of the application loads.
//!
//! [`stylesheet`] produces the CSS custom properties that marker classes
//! switch between.

use minijinja::{context, Environment};
use serde::Serialize;

use crate::error::ColorModeError;
use crate::marker::class_name;
use crate::preference::SystemPreference;
use crate::resolve::resolve;
use crate::theme::Theme;

const INIT_SCRIPT_NAME: &str = "colormode-init";

const INIT_SCRIPT_TEMPLATE: &str = concat!(
    "(function(){try{",
    "var modes={{ modes }};var mode=null;",
    "{% if use_local_storage %}",
    "mode=window.localStorage.getItem({{ storage_key }});",
    "if(modes.indexOf(mode)<0){mode=null;}",
    "{% endif %}",
    "{% if use_media_query %}",
    "if(!mode&&window.matchMedia){",
    "if(window.matchMedia('(prefers-color-scheme: dark)').matches){mode='dark';}",
    "else if(window.matchMedia('(prefers-color-scheme: light)').matches){mode='light';}",
    "if(modes.indexOf(mode)<0){mode=null;}",
    "}",
    "{% endif %}",
    "if(!mode){mode={{ fallback }};}",
    "var target=document.querySelector({{ target }})||document.documentElement;",
    "target.classList.add({{ prefix }}+'-'+mode);",
    "}catch(e){}})();"
);

/// Renders the startup script source, without the `<script>` wrapper.
///
/// Useful when the host page attaches its own element, e.g. to add a CSP
/// nonce.
///
/// # Errors
///
/// Returns [`ColorModeError::Template`] if rendering fails.
pub fn init_script_source(theme: &Theme) -> Result<String, ColorModeError> {
    let config = theme.config();
    let fallback = resolve(theme, None, SystemPreference::NoPreference, None);

    let mut env = Environment::new();
    env.add_template(INIT_SCRIPT_NAME, INIT_SCRIPT_TEMPLATE)?;
    let template = env.get_template(INIT_SCRIPT_NAME)?;

    let source = template.render(context! {
        modes => js_literal(&theme.mode_names())?,
        use_local_storage => config.use_local_storage,
        storage_key => js_literal(&config.storage_key)?,
        use_media_query => config.use_color_scheme_media_query,
        fallback => js_literal(&fallback)?,
        target => js_literal(&config.target_selector)?,
        prefix => js_literal(&config.class_prefix)?,
    })?;
    Ok(source)
}

/// Renders the startup script as a `<script>` element.
///
/// ```rust
/// use colormode::{init_script, Theme};
///
/// let theme = Theme::new().color("text", "#000").mode("dark", [("text", "#fff")]);
/// let script = init_script(&theme).unwrap();
///
/// assert!(script.starts_with("<script>"));
/// assert!(script.contains(r#"var modes=["default","dark"];"#));
/// ```
///
/// # Errors
///
/// Returns [`ColorModeError::Template`] if rendering fails.
pub fn init_script(theme: &Theme) -> Result<String, ColorModeError> {
    Ok(format!("<script>{}</script>", init_script_source(theme)?))
}

/// Serializes a value as a JS literal safe to embed in a `<script>` element.
fn js_literal<T: Serialize + ?Sized>(value: &T) -> Result<String, ColorModeError> {
    let json = serde_json::to_string(value)?;
    Ok(json.replace('<', "\\u003c").replace('>', "\\u003e"))
}

/// Renders the CSS custom properties for every mode of the theme.
///
/// The output contains:
///
/// - the root palette on the target selector
/// - each other mode's full palette under `{target}.{prefix}-{mode}`
/// - when `useColorSchemeMediaQuery` is on, `prefers-color-scheme` blocks
///   for `dark`/`light` modes, applying only while no marker class is set
/// - when `printColorModeName` names a mode, an `@media print` block
///
/// Returns an empty string when `useCustomProperties` is off.
pub fn stylesheet(theme: &Theme) -> String {
    let config = theme.config();
    if !config.use_custom_properties {
        return String::new();
    }

    let prefix = config.class_prefix.as_str();
    let target = config.target_selector.as_str();
    let modes = theme.mode_names();
    let root = theme.root_mode_name();
    let mut css = String::new();

    push_rule(&mut css, "", target, &theme.palette(root).custom_properties(prefix));

    for mode in modes.iter().filter(|m| **m != root) {
        let selector = format!("{}.{}", target, class_name(prefix, mode));
        push_rule(&mut css, "", &selector, &theme.palette(mode).custom_properties(prefix));
    }

    if config.use_color_scheme_media_query {
        let unmarked = modes.iter().fold(target.to_string(), |mut sel, mode| {
            sel.push_str(&format!(":not(.{})", class_name(prefix, mode)));
            sel
        });
        for scheme in [SystemPreference::Dark, SystemPreference::Light] {
            let Some(mode) = scheme.mode_name() else {
                continue;
            };
            if mode == root || !theme.has_mode(mode) {
                continue;
            }
            css.push_str(&format!("@media (prefers-color-scheme: {}) {{\n", mode));
            push_rule(&mut css, "  ", &unmarked, &theme.palette(mode).custom_properties(prefix));
            css.push_str("}\n");
        }
    }

    if let Some(print_mode) = config.print_color_mode_name.as_deref() {
        if theme.has_mode(print_mode) {
            let selector = std::iter::once(target.to_string())
                .chain(
                    modes
                        .iter()
                        .map(|m| format!("{}.{}", target, class_name(prefix, m))),
                )
                .collect::<Vec<_>>()
                .join(", ");
            css.push_str("@media print {\n");
            push_rule(
                &mut css,
                "  ",
                &selector,
                &theme.palette(print_mode).custom_properties(prefix),
            );
            css.push_str("}\n");
        } else {
            tracing::warn!(
                mode = print_mode,
                "printColorModeName names an unknown mode, skipping print styles"
            );
        }
    }

    css
}

fn push_rule(css: &mut String, indent: &str, selector: &str, properties: &[(String, String)]) {
    css.push_str(&format!("{}{} {{\n", indent, selector));
    for (name, value) in properties {
        css.push_str(&format!("{}  {}: {};\n", indent, name, value));
    }
    css.push_str(&format!("{}}}\n", indent));
}
