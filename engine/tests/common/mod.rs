#![allow(dead_code)]

use std::sync::Arc;

use battle_engine::{
    Ability, Battle, BattleOptions, CardKind, CardStats, Dice, LevelStats, Monster, Ruleset,
    Rulesets, Summoner, Team, TeamSide,
};

/// Level-1 stat line for a hand-built card.
#[derive(Debug, Clone, Copy, Default)]
pub struct Line {
    pub mana: i32,
    pub melee: i32,
    pub ranged: i32,
    pub magic: i32,
    pub armor: i32,
    pub health: i32,
    pub speed: i32,
}

pub fn card(id: u32, name: &str, kind: CardKind, line: Line, abilities: &[Ability]) -> CardStats {
    CardStats {
        id,
        name: name.to_string(),
        kind,
        rarity: 1,
        stats: LevelStats {
            mana: vec![line.mana],
            melee: vec![line.melee],
            ranged: vec![line.ranged],
            magic: vec![line.magic],
            armor: vec![line.armor],
            health: vec![line.health],
            speed: vec![line.speed],
        },
        abilities: vec![abilities.to_vec()],
    }
}

pub fn monster(name: &str, line: Line, abilities: &[Ability]) -> Monster {
    Monster::new(Arc::new(card(100, name, CardKind::Monster, line, abilities)), 1)
}

pub fn summoner_with(line: Line, abilities: &[Ability]) -> Summoner {
    Summoner::new(Arc::new(card(1, "Summoner", CardKind::Summoner, line, abilities)), 1)
}

pub fn team(side: TeamSide, monsters: Vec<Monster>) -> Team {
    Team::new(side, "player", summoner_with(Line::default(), &[]), monsters)
}

/// Every percentile roll is 100: nothing is dodged and no proc fires.
pub fn quiet_dice() -> Dice {
    Dice::from_scripted(vec![100])
}

pub fn battle(one: Vec<Monster>, two: Vec<Monster>, rules: &[Ruleset]) -> Battle {
    Battle::new(
        team(TeamSide::One, one),
        team(TeamSide::Two, two),
        Rulesets::new(rules.iter().copied()),
        BattleOptions::default(),
        quiet_dice(),
    )
}

pub fn striker(melee: i32, health: i32, speed: i32) -> Line {
    Line { melee, health, speed, ..Line::default() }
}

pub fn dummy(health: i32, speed: i32) -> Line {
    Line { health, speed, ..Line::default() }
}
