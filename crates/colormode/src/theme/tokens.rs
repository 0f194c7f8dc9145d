//! Color token maps and flattening of nested token groups.
//!
//! Theme documents may group tokens:
//!
//! ```yaml
//! primary:
//!   base: "#07c"
//!   hover: "#05a"
//! gray: ["#eee", "#ccc", "#999"]
//! ```
//!
//! Groups are flattened with `.` and scales by index, giving
//! `primary.base`, `primary.hover`, `gray.0`, `gray.1` and `gray.2`.

use std::collections::BTreeMap;

use serde_yaml::Value;

use crate::error::ThemeError;

/// Mapping from flattened token name to color value.
pub type TokenMap = BTreeMap<String, String>;

/// Key under the root `colors` mapping that holds mode overrides.
pub(crate) const MODES_KEY: &str = "modes";

/// Flattens a token group into `out`.
///
/// When `skip_modes` is set, a `modes` key directly under the group is
/// ignored; the caller handles it separately.
pub(crate) fn flatten_tokens(
    value: &Value,
    prefix: &str,
    skip_modes: bool,
    out: &mut TokenMap,
) -> Result<(), ThemeError> {
    match value {
        Value::Mapping(map) => {
            for (key, child) in map {
                let key = key_to_string(key).ok_or_else(|| ThemeError::InvalidToken {
                    token: prefix.to_string(),
                    message: format!("token names must be strings, got {:?}", key),
                })?;
                if skip_modes && prefix.is_empty() && key == MODES_KEY {
                    continue;
                }
                flatten_tokens(child, &join(prefix, &key), false, out)?;
            }
            Ok(())
        }
        Value::Sequence(seq) => {
            for (index, child) in seq.iter().enumerate() {
                flatten_tokens(child, &join(prefix, &index.to_string()), false, out)?;
            }
            Ok(())
        }
        Value::Tagged(tagged) => flatten_tokens(&tagged.value, prefix, skip_modes, out),
        scalar => {
            if prefix.is_empty() {
                return Err(ThemeError::InvalidToken {
                    token: String::new(),
                    message: "colors must be a mapping of token names".to_string(),
                });
            }
            let color = scalar_to_string(scalar).ok_or_else(|| ThemeError::InvalidToken {
                token: prefix.to_string(),
                message: "expected a string, number or boolean".to_string(),
            })?;
            out.insert(prefix.to_string(), color);
            Ok(())
        }
    }
}

fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}

fn key_to_string(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Converts a flattened token name to a CSS custom property name.
///
/// ```rust
/// use colormode::theme::custom_property_name;
///
/// assert_eq!(custom_property_name("theme-ui", "primary.base"), "--theme-ui-colors-primary-base");
/// ```
pub fn custom_property_name(prefix: &str, token: &str) -> String {
    format!("--{}-colors-{}", prefix, token.replace('.', "-"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flatten(yaml: &str) -> Result<TokenMap, ThemeError> {
        let value: Value = serde_yaml::from_str(yaml).unwrap();
        let mut out = TokenMap::new();
        flatten_tokens(&value, "", true, &mut out)?;
        Ok(out)
    }

    #[test]
    fn flat_tokens_are_kept() {
        let tokens = flatten("text: \"#000\"\nbackground: \"#fff\"").unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens["text"], "#000");
        assert_eq!(tokens["background"], "#fff");
    }

    #[test]
    fn nested_groups_are_joined_with_dots() {
        let tokens = flatten(
            r##"
            primary:
              base: "#07c"
              hover: "#05a"
            "##,
        )
        .unwrap();
        assert_eq!(tokens["primary.base"], "#07c");
        assert_eq!(tokens["primary.hover"], "#05a");
    }

    #[test]
    fn scales_are_indexed() {
        let tokens = flatten(r##"gray: ["#eee", "#ccc"]"##).unwrap();
        assert_eq!(tokens["gray.0"], "#eee");
        assert_eq!(tokens["gray.1"], "#ccc");
    }

    #[test]
    fn modes_key_is_skipped_at_root() {
        let tokens = flatten(
            r##"
            text: "#000"
            modes:
              dark:
                text: "#fff"
            "##,
        )
        .unwrap();
        assert_eq!(tokens.len(), 1);
        assert!(!tokens.contains_key("modes.dark.text"));
    }

    #[test]
    fn null_value_is_rejected() {
        let err = flatten("text: ~").unwrap_err();
        assert!(matches!(err, ThemeError::InvalidToken { ref token, .. } if token == "text"));
    }

    #[test]
    fn scalar_root_is_rejected() {
        assert!(flatten("\"#000\"").is_err());
    }

    #[test]
    fn custom_property_replaces_dots() {
        assert_eq!(
            custom_property_name("app", "gray.0"),
            "--app-colors-gray-0"
        );
    }
}
