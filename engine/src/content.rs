use std::collections::HashMap;

pub fn builtin_catalogs() -> HashMap<&'static str, &'static str> {
    HashMap::from([("core", include_str!("../content/cards/core.json"))])
}

/// Built-in match requests as `(format, text)`, format being `json` or `yaml`.
pub fn builtin_matches() -> HashMap<&'static str, (&'static str, &'static str)> {
    HashMap::from([
        (
            "fire_vs_water",
            ("json", include_str!("../content/matches/fire_vs_water.json")),
        ),
        (
            "quake_gauntlet",
            ("yaml", include_str!("../content/matches/quake_gauntlet.yaml")),
        ),
    ])
}
