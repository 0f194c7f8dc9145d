//! Command-line front end for `colormode`.
//!
//! The binary is a thin shell around [`run`]: it parses [`Cli`], sets up
//! logging and prints whatever `run` returns. Keeping the commands here lets
//! tests drive them without spawning a process.

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colormode::{
    init_script, parse_hex_color, rgb_to_ansi256, stylesheet, ColorModeState, ElementMarker,
    FileStore, FixedPreference, MemoryStore, ModeStore, OsPreferenceDetector, Palette,
    PreferenceDetector, SystemPreference, Theme,
};
use console::Style;

/// Theme used when `--theme` is not given.
pub const DEFAULT_THEME: &str = include_str!("../themes/default.yaml");

/// Inspect, switch and export theme color modes.
#[derive(Debug, Parser)]
#[command(name = "colormode", version)]
#[command(about = "Inspect, switch and export theme color modes")]
pub struct Cli {
    /// Theme file (.yaml, .yml or .json); defaults to the built-in theme
    #[arg(long, global = true, env = "COLORMODE_THEME", value_name = "FILE")]
    pub theme: Option<PathBuf>,

    /// File that persists the chosen mode
    #[arg(long, global = true, env = "COLORMODE_STORE", value_name = "FILE")]
    pub store: Option<PathBuf>,

    /// System color scheme preference
    #[arg(long, global = true, value_enum, default_value_t = SystemChoice::Auto)]
    pub system: SystemChoice,

    /// Log resolution details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the theme's modes, marking the active one
    Modes,
    /// Print the active mode and where it came from
    Resolve,
    /// Print a mode's palette (the active mode by default)
    Palette {
        /// Mode to show
        mode: Option<String>,
    },
    /// Switch to a mode and persist it
    Set {
        /// Mode to switch to
        mode: String,
    },
    /// Switch to the next mode
    Cycle,
    /// Forget the persisted mode
    Reset,
    /// Print the startup script
    Script,
    /// Print the custom-property stylesheet
    Css,
    /// Print the target element's attributes for the active mode
    Marker,
}

impl Command {
    /// Whether the command depends on the persisted mode or the system
    /// preference. The others read only the theme.
    fn uses_session(&self) -> bool {
        !matches!(
            self,
            Command::Script | Command::Css | Command::Palette { mode: Some(_) }
        )
    }
}

/// Where the system preference comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SystemChoice {
    /// Ask the operating system
    Auto,
    Light,
    Dark,
    /// Act as if there were no preference
    None,
}

impl SystemChoice {
    fn detector(self) -> Box<dyn PreferenceDetector> {
        match self {
            SystemChoice::Auto => Box::new(OsPreferenceDetector),
            SystemChoice::Light => Box::new(FixedPreference(SystemPreference::Light)),
            SystemChoice::Dark => Box::new(FixedPreference(SystemPreference::Dark)),
            SystemChoice::None => Box::new(FixedPreference(SystemPreference::NoPreference)),
        }
    }
}

/// Runs a parsed command line and returns its output.
///
/// `use_color` controls the palette swatches; everything else is plain text.
pub fn run(cli: &Cli, use_color: bool) -> Result<String> {
    let theme = load_theme(cli.theme.as_ref())?;

    let (store, detector): (Box<dyn ModeStore>, Box<dyn PreferenceDetector>) =
        if cli.command.uses_session() {
            let store = match &cli.store {
                Some(path) => FileStore::new(path),
                None => FileStore::default_location()?,
            };
            tracing::debug!(store = %store.path().display(), "using mode store");
            (Box::new(store), cli.system.detector())
        } else {
            (
                Box::new(MemoryStore::new()),
                Box::new(FixedPreference(SystemPreference::NoPreference)),
            )
        };

    let mut state = ColorModeState::initialize(theme, store, detector.as_ref());
    let mut element = ElementMarker::new(state.theme().config().target_selector.clone());

    let output = match &cli.command {
        Command::Modes => {
            let mut out = String::new();
            for mode in state.theme().mode_names() {
                let marker = if mode == state.mode() { '*' } else { ' ' };
                writeln!(out, "{} {}", marker, mode)?;
            }
            out
        }
        Command::Resolve => format!("{} ({})\n", state.mode(), state.source()),
        Command::Palette { mode } => {
            let palette = match mode {
                Some(name) => {
                    anyhow::ensure!(
                        state.theme().has_mode(name),
                        "unknown color mode '{}' (available: {})",
                        name,
                        state.theme().mode_names().join(", ")
                    );
                    state.theme().palette(name)
                }
                None => state.palette().clone(),
            };
            render_palette(&palette, use_color)
        }
        Command::Set { mode } => {
            state.set_mode(mode, &mut element)?;
            format!("{}\n", state.mode())
        }
        Command::Cycle => {
            state.cycle(&mut element)?;
            format!("{}\n", state.mode())
        }
        Command::Reset => {
            state.reset(detector.as_ref(), &mut element)?;
            format!("{} ({})\n", state.mode(), state.source())
        }
        Command::Marker => {
            state.apply_marker(&mut element);
            format!("{}\n", element.to_attributes())
        }
        Command::Script => format!("{}\n", init_script(state.theme())?),
        Command::Css => stylesheet(state.theme()),
    };
    Ok(output)
}

fn load_theme(path: Option<&PathBuf>) -> Result<Theme> {
    match path {
        Some(path) => Theme::from_file(path)
            .with_context(|| format!("failed to load theme {}", path.display())),
        None => Theme::from_yaml(DEFAULT_THEME)
            .map(|theme| theme.with_name("default"))
            .context("built-in theme is invalid"),
    }
}

/// One line per token: a swatch, the token name and its value.
///
/// Values that are not hex colors get a blank swatch.
fn render_palette(palette: &Palette, use_color: bool) -> String {
    let width = palette.iter().map(|(token, _)| token.len()).max().unwrap_or(0);
    let mut out = String::new();
    for (token, value) in palette.iter() {
        let swatch = match parse_hex_color(value) {
            Some(rgb) => Style::new()
                .color256(rgb_to_ansi256(rgb))
                .force_styling(use_color)
                .apply_to("██")
                .to_string(),
            None => "  ".to_string(),
        };
        out.push_str(&format!("{} {:<width$}  {}\n", swatch, token, value, width = width));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_theme_loads() {
        let theme = load_theme(None).unwrap();
        assert_eq!(theme.root_mode_name(), "light");
        assert_eq!(theme.mode_names(), vec!["light", "dark", "sepia"]);
    }

    #[test]
    fn palette_swatches_without_color() {
        let theme = Theme::new().color("text", "#000").color("bg", "tomato");
        let out = render_palette(&theme.palette("default"), false);
        assert_eq!(out, "   bg    tomato\n██ text  #000\n");
    }

    #[test]
    fn palette_swatches_with_color() {
        let theme = Theme::new().color("text", "#ff0000");
        let out = render_palette(&theme.palette("default"), true);
        assert!(out.starts_with("\u{1b}[38;5;196m██"));
    }

    #[test]
    fn theme_only_commands_skip_the_session() {
        assert!(!Command::Script.uses_session());
        assert!(!Command::Css.uses_session());
        assert!(!Command::Palette {
            mode: Some("dark".into())
        }
        .uses_session());

        assert!(Command::Palette { mode: None }.uses_session());
        assert!(Command::Resolve.uses_session());
        assert!(Command::Set {
            mode: "dark".into()
        }
        .uses_session());
    }

    #[test]
    fn system_choice_fixed_detectors() {
        assert_eq!(SystemChoice::Dark.detector().detect(), SystemPreference::Dark);
        assert_eq!(
            SystemChoice::None.detector().detect(),
            SystemPreference::NoPreference
        );
    }
}
