mod common;

use battle_engine::api::{
    load_match, parse_match, sample_matches, simulate_match, simulate_match_many, win_rate,
    MatchConfig, MatchRequest,
};
use battle_engine::team::{CardPick, RosterRequest};
use battle_engine::{Action, CardKind, Catalog, TeamSide};
use common::{card, dummy, striker, Line};

fn builtin(id: &str, seed: Option<u64>) -> MatchConfig {
    MatchConfig {
        match_id: Some(id.into()),
        seed,
        ..MatchConfig::default()
    }
}

#[test]
fn builtin_matches_play_to_a_result() {
    for id in ["fire_vs_water", "quake_gauntlet"] {
        let res = simulate_match(builtin(id, None)).unwrap();
        assert!(res.winner.is_resolved(), "{id}");
        assert!(res.rounds > 0);
        assert_eq!(res.entries.last().unwrap().action, Action::GameOver);
    }
}

#[test]
fn same_seed_same_report() {
    let a = simulate_match(builtin("fire_vs_water", Some(11))).unwrap();
    let b = simulate_match(builtin("fire_vs_water", Some(11))).unwrap();
    assert_eq!(a.winner, b.winner);
    assert_eq!(a.entries, b.entries);
}

#[test]
fn many_summary_adds_up() {
    let stats = simulate_match_many(builtin("quake_gauntlet", Some(1)), 50).unwrap();
    assert_eq!(stats.samples, 50);
    assert_eq!(stats.team_one_wins + stats.team_two_wins + stats.ties, 50);
}

#[test]
fn missing_match_is_an_error() {
    assert!(simulate_match(MatchConfig::default()).is_err());
    assert!(simulate_match(builtin("nope", None)).is_err());
}

#[test]
fn yaml_match_file_loads_from_disk() {
    let manifest = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    let path = manifest
        .join("content/matches/quake_gauntlet.yaml")
        .to_string_lossy()
        .into_owned();
    let req = load_match(&path).unwrap();
    assert_eq!(req.team_one.monsters.len(), 4);
    assert_eq!(req.seed, 99);
}

#[test]
fn match_request_defaults() {
    let req = parse_match(
        r#"{
            "team_one": { "summoner": { "id": 1 }, "monsters": [{ "id": 10 }] },
            "team_two": { "summoner": { "id": 1 }, "monsters": [{ "id": 11, "level": 2 }] }
        }"#,
        false,
    )
    .unwrap();
    assert!(req.logging);
    assert_eq!(req.seed, 0);
    assert!(req.rulesets.is_empty());
    assert_eq!(req.team_one.monsters[0].level, 1);
    assert_eq!(req.team_two.monsters[0].level, 2);
}

fn lopsided() -> (Catalog, MatchRequest) {
    let catalog = Catalog::from_cards([
        card(1, "Caller", CardKind::Summoner, Line::default(), &[]),
        card(10, "Champion", CardKind::Monster, striker(10, 10, 5), &[]),
        card(11, "Peasant", CardKind::Monster, dummy(1, 1), &[]),
    ]);
    let roster = |id| RosterRequest {
        player: String::new(),
        summoner: CardPick { id: 1, level: 1 },
        monsters: vec![CardPick { id, level: 1 }],
    };
    let request = MatchRequest {
        team_one: roster(10),
        team_two: roster(11),
        rulesets: vec![],
        logging: true,
        seed: 0,
    };
    (catalog, request)
}

#[test]
fn dominant_roster_wins_every_sample() {
    let (catalog, request) = lopsided();
    let summary = sample_matches(&catalog, &request, 100, 7).unwrap();
    assert_eq!(summary.samples, 100);
    assert_eq!(summary.team_one_wins, 100);
    assert_eq!(summary.win_rate(TeamSide::One), 1.0);
    assert_eq!(summary.win_rate(TeamSide::Two), 0.0);

    let rate = win_rate(&catalog, &request, 20, 7, TeamSide::Two).unwrap();
    assert_eq!(rate, 0.0);
}

#[test]
fn unknown_card_in_a_request_is_reported() {
    let (catalog, mut request) = lopsided();
    request.team_two.monsters[0].id = 42;
    let err = sample_matches(&catalog, &request, 1, 0).unwrap_err();
    assert!(format!("{err:#}").contains("card 42"));
}
