//! System color scheme preference.
//!
//! The OS preference is one input to mode resolution. It is read through a
//! [`PreferenceDetector`] handed to the caller's state, so tests and
//! headless callers can supply a fixed answer:
//!
//! ```rust
//! use colormode::{FixedPreference, PreferenceDetector, SystemPreference};
//!
//! let detector = FixedPreference(SystemPreference::Dark);
//! assert_eq!(detector.detect(), SystemPreference::Dark);
//!
//! // Closures work too
//! let detector = || SystemPreference::Light;
//! assert_eq!(detector.detect(), SystemPreference::Light);
//! ```

use std::fmt;
use std::str::FromStr;

use dark_light::{detect as detect_os_theme, Mode as OsThemeMode};

/// The color scheme the user's system asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SystemPreference {
    /// Light background, dark text.
    Light,
    /// Dark background, light text.
    Dark,
    /// The system expresses no preference, or it could not be read.
    #[default]
    NoPreference,
}

impl SystemPreference {
    /// The mode name this preference selects, if any.
    pub fn mode_name(self) -> Option<&'static str> {
        match self {
            SystemPreference::Light => Some("light"),
            SystemPreference::Dark => Some("dark"),
            SystemPreference::NoPreference => None,
        }
    }
}

impl fmt::Display for SystemPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mode_name().unwrap_or("none"))
    }
}

impl FromStr for SystemPreference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(SystemPreference::Light),
            "dark" => Ok(SystemPreference::Dark),
            "none" | "no-preference" => Ok(SystemPreference::NoPreference),
            other => Err(format!(
                "unknown system preference '{}' (expected light, dark or none)",
                other
            )),
        }
    }
}

/// Source of the system color scheme preference.
pub trait PreferenceDetector {
    /// Reads the current preference.
    fn detect(&self) -> SystemPreference;
}

impl<F> PreferenceDetector for F
where
    F: Fn() -> SystemPreference,
{
    fn detect(&self) -> SystemPreference {
        self()
    }
}

/// Detector that always returns the same preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FixedPreference(pub SystemPreference);

impl PreferenceDetector for FixedPreference {
    fn detect(&self) -> SystemPreference {
        self.0
    }
}

/// Detector that queries the operating system via `dark-light`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsPreferenceDetector;

impl PreferenceDetector for OsPreferenceDetector {
    fn detect(&self) -> SystemPreference {
        detect_system_preference()
    }
}

/// Queries the OS for the user's preferred color scheme.
///
/// Detection failures are logged and reported as
/// [`SystemPreference::NoPreference`].
pub fn detect_system_preference() -> SystemPreference {
    match detect_os_theme() {
        Ok(OsThemeMode::Dark) => SystemPreference::Dark,
        Ok(OsThemeMode::Light) => SystemPreference::Light,
        Ok(OsThemeMode::Unspecified) => SystemPreference::NoPreference,
        Err(err) => {
            tracing::debug!(error = %err, "system color scheme detection failed");
            SystemPreference::NoPreference
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_names() {
        assert_eq!(SystemPreference::Dark.mode_name(), Some("dark"));
        assert_eq!(SystemPreference::Light.mode_name(), Some("light"));
        assert_eq!(SystemPreference::NoPreference.mode_name(), None);
    }

    #[test]
    fn parse_from_str() {
        assert_eq!("Dark".parse::<SystemPreference>(), Ok(SystemPreference::Dark));
        assert_eq!(
            "none".parse::<SystemPreference>(),
            Ok(SystemPreference::NoPreference)
        );
        assert!("sepia".parse::<SystemPreference>().is_err());
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for pref in [
            SystemPreference::Light,
            SystemPreference::Dark,
            SystemPreference::NoPreference,
        ] {
            assert_eq!(pref.to_string().parse::<SystemPreference>(), Ok(pref));
        }
    }

    #[test]
    fn closure_detector() {
        let detector = || SystemPreference::Dark;
        assert_eq!(detector.detect(), SystemPreference::Dark);
    }
}
