//! Property-based tests for mode resolution and palettes.

use std::collections::BTreeMap;

use colormode::{
    get_palette, resolve, ColorModeConfig, ColorModeState, FixedPreference, MemoryStore,
    SystemPreference, Theme, TokenMap,
};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

fn token_map() -> impl Strategy<Value = TokenMap> {
    prop::collection::btree_map("[a-z]{1,8}", "#[0-9a-f]{6}", 0..8)
}

fn mode_name() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("dark".to_string()),
        Just("light".to_string()),
        Just("default".to_string()),
        "[a-z]{3,8}",
    ]
}

fn preference() -> impl Strategy<Value = SystemPreference> {
    prop_oneof![
        Just(SystemPreference::Light),
        Just(SystemPreference::Dark),
        Just(SystemPreference::NoPreference),
    ]
}

fn theme() -> impl Strategy<Value = Theme> {
    (
        token_map(),
        prop::collection::btree_map(mode_name(), token_map(), 0..4),
        prop::option::of(mode_name()),
        any::<bool>(),
    )
        .prop_map(|(root, modes, initial, media_query)| {
            let mut config = ColorModeConfig::new().media_query(media_query);
            if let Some(initial) = initial {
                config = config.initial_mode_name(initial);
            }
            let mut theme = Theme::new().with_config(config);
            for (token, value) in root {
                theme = theme.color(token, value);
            }
            for (name, overrides) in modes {
                theme = theme.mode(name, overrides);
            }
            theme
        })
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// Whatever the inputs, the resolved mode is one the theme defines.
    #[test]
    fn resolve_returns_a_defined_mode(
        theme in theme(),
        persisted in prop::option::of(mode_name()),
        pref in preference(),
        default in prop::option::of(mode_name()),
    ) {
        let mode = resolve(&theme, persisted.as_deref(), pref, default.as_deref());
        prop_assert!(theme.mode_names().contains(&mode.as_str()));
    }

    /// The root mode's palette is the root token map when no explicit mode
    /// shares its name.
    #[test]
    fn root_palette_is_root_tokens(theme in theme()) {
        let root = theme.root_mode_name().to_string();
        prop_assume!(theme.mode_overrides(&root).is_none());
        let palette = get_palette(&theme, &root);
        prop_assert_eq!(palette.tokens(), theme.root_tokens());
    }

    /// A mode's palette is the root tokens overridden by the mode's entries.
    #[test]
    fn mode_palette_is_root_plus_overrides(root in token_map(), overrides in token_map()) {
        let mut theme = Theme::new();
        for (token, value) in &root {
            theme = theme.color(token.clone(), value.clone());
        }
        let theme = theme.mode("dark", overrides.clone());

        let mut expected: BTreeMap<String, String> = root;
        expected.extend(overrides);

        let palette = get_palette(&theme, "dark");
        prop_assert_eq!(palette.tokens(), &expected);
    }

    /// With the media query disabled, the system preference never matters.
    #[test]
    fn disabled_media_query_ignores_preference(
        theme in theme(),
        persisted in prop::option::of(mode_name()),
        default in prop::option::of(mode_name()),
    ) {
        let mut theme = theme;
        theme.config_mut().use_color_scheme_media_query = false;

        let baseline = resolve(&theme, persisted.as_deref(), SystemPreference::NoPreference, default.as_deref());
        for pref in [SystemPreference::Light, SystemPreference::Dark] {
            let mode = resolve(&theme, persisted.as_deref(), pref, default.as_deref());
            prop_assert_eq!(&mode, &baseline);
        }
    }

    /// Setting a mode and re-initializing from the same store restores it.
    #[test]
    fn set_mode_survives_reload(theme in theme(), pick in any::<prop::sample::Index>(), pref in preference()) {
        let names: Vec<String> = theme.mode_names().into_iter().map(str::to_string).collect();
        let chosen = pick.get(&names).clone();

        let mut state = ColorModeState::initialize(theme.clone(), MemoryStore::new(), &FixedPreference(pref));
        state.set_mode(&chosen, &mut ()).unwrap();

        let reloaded = ColorModeState::initialize(theme, state.into_store(), &FixedPreference(pref));
        prop_assert_eq!(reloaded.mode(), chosen.as_str());
    }
}
