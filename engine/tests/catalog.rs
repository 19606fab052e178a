use battle_engine::content::builtin_catalogs;
use battle_engine::{Ability, CardCatalog, CardKind, Catalog, LevelStats, Ruleset, Rulesets};

#[test]
fn level_lookups_clamp_to_the_last_entry() {
    assert_eq!(LevelStats::at(&[2, 3, 4], 1), 2);
    assert_eq!(LevelStats::at(&[2, 3, 4], 3), 4);
    assert_eq!(LevelStats::at(&[2, 3, 4], 9), 4);
    assert_eq!(LevelStats::at(&[], 2), 0);
}

#[test]
fn builtin_catalog_parses_and_unlocks_ability_tiers() {
    let text = builtin_catalogs()["core"];
    let catalog = Catalog::from_json(text).unwrap();
    assert!(catalog.len() >= 10);
    assert!(catalog.iter().any(|c| c.kind == CardKind::Summoner));

    let cerberus = catalog.lookup(17).unwrap();
    assert_eq!(cerberus.name, "Cerberus");
    assert_eq!(cerberus.max_level(), 3);
    assert_eq!(cerberus.abilities_at(1), vec![Ability::Taunt]);
    assert_eq!(cerberus.abilities_at(3), vec![Ability::Taunt, Ability::Heal]);
    assert!(catalog.lookup(999).is_none());
}

#[test]
fn ability_names_parse_case_insensitively() {
    assert_eq!(Ability::from_name("divine shield"), Some(Ability::DivineShield));
    assert_eq!(Ability::from_name("Void Armor"), Some(Ability::VoidArmor));
    assert_eq!(Ability::from_name("Jump"), None);
    assert_eq!(Ability::TankHeal.to_string(), "Tank Heal");

    let parsed: Vec<Ability> = serde_json::from_str(r#"["Snipe", "true strike"]"#).unwrap();
    assert_eq!(parsed, vec![Ability::Snipe, Ability::TrueStrike]);
    assert!(serde_json::from_str::<Ability>(r#""Laser Eyes""#).is_err());
}

#[test]
fn ruleset_tokens_split_on_pipes_and_skip_unknowns() {
    let rules = Rulesets::parse(&["Earthquake|Aim True", "Moonlight Madness", "earthquake"]);
    assert_eq!(rules.iter().collect::<Vec<_>>(), vec![Ruleset::AimTrue, Ruleset::Earthquake]);
    assert!(rules.contains(Ruleset::Earthquake));
    assert!(!rules.contains(Ruleset::Standard));

    assert!(Rulesets::parse::<&str>(&[]).is_empty());
    assert_eq!(Ruleset::from_name("up close & personal"), Some(Ruleset::UpCloseAndPersonal));
}
