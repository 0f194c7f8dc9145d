//! End-to-end tests for the `colormode` commands.
//!
//! Every test passes `--store` and `--system` so nothing touches the real
//! config directory or asks the operating system.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use colormode_cli::{run, Cli};
use tempfile::TempDir;

const THEME: &str = r##"
config:
  printColorModeName: default
colors:
  text: "#000"
  background: "#fff"
  modes:
    dark:
      text: "#fff"
      background: "#000"
    sepia:
      text: "#433"
"##;

struct Fixture {
    dir: TempDir,
    theme: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let theme = dir.path().join("theme.yaml");
        fs::write(&theme, THEME).unwrap();
        Self { dir, theme }
    }

    fn store(&self) -> PathBuf {
        self.dir.path().join("state").join("store.json")
    }

    fn run(&self, system: &str, args: &[&str]) -> anyhow::Result<String> {
        let theme = self.theme.display().to_string();
        let store = self.store().display().to_string();
        let mut argv = vec![
            "colormode",
            "--theme",
            theme.as_str(),
            "--store",
            store.as_str(),
            "--system",
            system,
        ];
        argv.extend_from_slice(args);
        run(&Cli::try_parse_from(argv)?, false)
    }
}

fn stored(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

#[test]
fn modes_marks_active_mode() {
    let fx = Fixture::new();
    let out = fx.run("dark", &["modes"]).unwrap();
    assert_eq!(out, "  default\n* dark\n  sepia\n");
}

#[test]
fn resolve_reports_source() {
    let fx = Fixture::new();
    assert_eq!(
        fx.run("none", &["resolve"]).unwrap(),
        "default (root mode)\n"
    );
    assert_eq!(
        fx.run("dark", &["resolve"]).unwrap(),
        "dark (system preference)\n"
    );
    // No light mode in the theme, so the preference is skipped.
    assert_eq!(
        fx.run("light", &["resolve"]).unwrap(),
        "default (root mode)\n"
    );
}

#[test]
fn set_persists_across_runs() {
    let fx = Fixture::new();
    assert_eq!(fx.run("none", &["set", "sepia"]).unwrap(), "sepia\n");
    assert!(stored(&fx.store()).contains(r#""theme-ui-color-mode": "sepia""#));

    assert_eq!(
        fx.run("dark", &["resolve"]).unwrap(),
        "sepia (persisted choice)\n"
    );
}

#[test]
fn set_unknown_mode_fails_without_writing() {
    let fx = Fixture::new();
    let err = fx.run("none", &["set", "neon"]).unwrap_err();
    assert!(err.to_string().contains("neon"));
    assert!(!fx.store().exists());
}

#[test]
fn cycle_then_reset() {
    let fx = Fixture::new();
    assert_eq!(fx.run("none", &["cycle"]).unwrap(), "dark\n");
    assert_eq!(fx.run("none", &["cycle"]).unwrap(), "sepia\n");
    assert_eq!(fx.run("none", &["cycle"]).unwrap(), "default\n");

    fx.run("none", &["set", "sepia"]).unwrap();
    assert_eq!(
        fx.run("dark", &["reset"]).unwrap(),
        "dark (system preference)\n"
    );
    assert!(!stored(&fx.store()).contains("sepia"));
}

#[test]
fn palette_of_active_and_named_mode() {
    let fx = Fixture::new();
    let active = fx.run("dark", &["palette"]).unwrap();
    assert!(active
        .lines()
        .any(|line| line.contains(" text ") && line.ends_with("#fff")));

    let sepia = fx.run("dark", &["palette", "sepia"]).unwrap();
    assert!(sepia.contains("#433"));
    assert!(sepia.contains("#fff"), "background falls back to the root");

    assert!(fx.run("none", &["palette", "neon"]).is_err());
}

#[test]
fn marker_renders_attributes() {
    let fx = Fixture::new();
    let out = fx.run("dark", &["marker"]).unwrap();
    assert!(out.starts_with(r#"class="theme-ui-dark" style=""#));
    assert!(out.contains("--theme-ui-colors-text: #fff"));
}

#[test]
fn script_and_css_output() {
    let fx = Fixture::new();
    let script = fx.run("none", &["script"]).unwrap();
    assert!(script.starts_with("<script>"));
    assert!(script.contains(r#"var modes=["default","dark","sepia"];"#));

    let css = fx.run("none", &["css"]).unwrap();
    assert!(css.starts_with("html {\n"));
    assert!(css.contains("html.theme-ui-sepia {\n"));
    assert!(css.contains("@media print {\n"));
}

#[test]
fn missing_theme_file_is_an_error() {
    let fx = Fixture::new();
    let missing = fx.dir.path().join("nope.yaml").display().to_string();
    let cli = Cli::try_parse_from([
        "colormode",
        "--theme",
        missing.as_str(),
        "--store",
        "unused.json",
        "--system",
        "none",
        "modes",
    ])
    .unwrap();
    let err = run(&cli, false).unwrap_err();
    assert!(format!("{:#}", err).contains("failed to load theme"));
}

#[test]
fn builtin_theme_is_used_without_theme_flag() {
    let fx = Fixture::new();
    let store = fx.store().display().to_string();
    let cli = Cli::try_parse_from([
        "colormode", "--store", store.as_str(), "--system", "light", "resolve",
    ])
    .unwrap();
    // Skip if the environment points at another theme.
    if cli.theme.is_some() {
        return;
    }
    assert_eq!(run(&cli, false).unwrap(), "light (system preference)\n");
}
