mod common;

use battle_engine::abilities::Stat;
use battle_engine::{Ability, Action, CardSnapshot, LogEntry, TeamSide};
use common::{monster, striker, summoner_with, Line};

fn entry(action: Action, actor: Option<CardSnapshot>, target: Option<CardSnapshot>, value: i32) -> LogEntry {
    LogEntry { round: 1, action, actor, target, value }
}

#[test]
fn log_lines_render_in_tag_style() {
    let ogre = monster("Pit Ogre", striker(4, 6, 2), &[]);
    let mut crab = monster("Sea Monster", Line { armor: 1, ..striker(3, 2, 2) }, &[]);
    crab.side = TeamSide::Two;

    let attack = entry(
        Action::Attack,
        Some(CardSnapshot::of_monster(&ogre)),
        Some(CardSnapshot::of_monster(&crab)),
        4,
    );
    insta::assert_snapshot!(attack.to_string(), @"[Attack] Pit Ogre#1 hp:6 ar:0 → Sea Monster#2 hp:2 ar:1 (4)");

    let round = entry(Action::RoundStart, None, None, 3);
    insta::assert_snapshot!(round.to_string(), @"[Round start] (3)");

    let mut summoner = summoner_with(Line::default(), &[Ability::Strengthen]);
    summoner.side = TeamSide::Two;
    let buff = entry(
        Action::SummonerBuff(Ability::Strengthen),
        Some(CardSnapshot::of_summoner(&summoner)),
        Some(CardSnapshot::of_monster(&crab)),
        1,
    );
    insta::assert_snapshot!(buff.to_string(), @"[Summoner buff Strengthen] Summoner#2 → Sea Monster#2 hp:2 ar:1 (1)");

    let stat = entry(Action::SummonerStat(Stat::Speed), None, None, 0);
    insta::assert_snapshot!(stat.to_string(), @"[Summoner Speed]");
}

#[test]
fn snapshots_are_detached_from_the_monster() {
    let mut ogre = monster("Pit Ogre", striker(4, 6, 2), &[]);
    ogre.add_debuff(Ability::Weaken);
    let snap = CardSnapshot::of_monster(&ogre);

    ogre.hit_health(5);
    ogre.remove_debuff(Ability::Weaken);

    assert_eq!(snap.health, 5);
    assert_eq!(snap.max_health, 5);
    assert_eq!(snap.debuffs, vec![(Ability::Weaken, 1)]);
    assert_eq!(snap.position, Some(0));
}

#[test]
fn dead_monsters_have_no_position() {
    let mut ogre = monster("Pit Ogre", striker(4, 6, 2), &[]);
    ogre.hit_health(6);
    assert_eq!(CardSnapshot::of_monster(&ogre).position, None);
}

#[test]
fn entries_serialize_with_snake_case_actions() {
    let e = entry(Action::MonsterDebuff(Ability::Slow), None, None, 1);
    let json = serde_json::to_value(&e).unwrap();
    assert_eq!(json["action"], serde_json::json!({ "monster_debuff": "Slow" }));
    assert_eq!(json["round"], 1);
    assert!(json["actor"].is_null());

    let e = entry(Action::GameOver, None, None, 3);
    assert_eq!(serde_json::to_value(&e).unwrap()["action"], "game_over");
}
