mod common;

use battle_engine::battle::order::dodge_chance;
use battle_engine::{
    Ability, AttackType, Battle, BattleOptions, Dice, MonsterId, Rulesets, TeamSide,
};
use common::{battle, dummy, monster, striker, team, Line};

#[test]
fn dodge_odds_stack_speed_dodge_flying_and_blind() {
    let slow = monster("Slow", striker(1, 5, 2), &[]);
    let fast = monster("Fast", striker(1, 5, 5), &[]);
    assert_eq!(dodge_chance(&slow, &fast, AttackType::Melee, false), 30);
    assert_eq!(dodge_chance(&fast, &slow, AttackType::Melee, false), 0);
    assert_eq!(dodge_chance(&fast, &slow, AttackType::Melee, true), 30);

    let dodger = monster("Dodger", striker(1, 5, 5), &[Ability::Dodge, Ability::Flying]);
    assert_eq!(dodge_chance(&slow, &dodger, AttackType::Ranged, false), 80);

    let mut blinded = monster("Blinded", striker(1, 5, 2), &[Ability::Flying]);
    blinded.add_debuff(Ability::Blind);
    assert_eq!(dodge_chance(&blinded, &dodger, AttackType::Melee, false), 70);

    let mut snared = monster("Snared", striker(1, 5, 5), &[Ability::Flying]);
    snared.add_debuff(Ability::Snare);
    assert_eq!(dodge_chance(&slow, &snared, AttackType::Melee, false), 30);
}

#[test]
fn magic_only_misses_phase_and_true_strike_never_misses() {
    let caster = monster("Caster", Line { magic: 2, health: 5, speed: 1, ..Line::default() }, &[]);
    let fast = monster("Fast", striker(1, 5, 5), &[Ability::Dodge]);
    let phased = monster("Phased", striker(1, 5, 5), &[Ability::Phase]);
    assert_eq!(dodge_chance(&caster, &fast, AttackType::Magic, false), 0);
    assert_eq!(dodge_chance(&caster, &phased, AttackType::Magic, false), 40);

    let sure = monster("Sure", striker(1, 5, 1), &[Ability::TrueStrike]);
    assert_eq!(dodge_chance(&sure, &fast, AttackType::Melee, false), 0);
}

#[test]
fn faster_monster_goes_first() {
    let mut b = battle(
        vec![monster("A", striker(1, 5, 7), &[])],
        vec![monster("B", striker(1, 5, 5), &[])],
        &[],
    );
    b.setup();
    assert_eq!(
        b.turn_order(),
        vec![MonsterId::new(TeamSide::One, 0), MonsterId::new(TeamSide::Two, 0)]
    );
}

#[test]
fn speed_ties_prefer_magic_then_ranged() {
    let mut b = battle(
        vec![
            monster("Brawler", striker(1, 5, 3), &[]),
            monster("Archer", Line { ranged: 1, health: 5, speed: 3, ..Line::default() }, &[]),
        ],
        vec![monster("Mage", Line { magic: 1, health: 5, speed: 3, ..Line::default() }, &[])],
        &[],
    );
    b.setup();
    assert_eq!(
        b.turn_order(),
        vec![
            MonsterId::new(TeamSide::Two, 0),
            MonsterId::new(TeamSide::One, 1),
            MonsterId::new(TeamSide::One, 0),
        ]
    );
}

#[test]
fn idle_teammates_keep_board_order_in_a_tie() {
    let one = team(
        TeamSide::One,
        vec![monster("Wall", dummy(5, 2), &[]), monster("Post", dummy(5, 2), &[])],
    );
    let two = team(TeamSide::Two, vec![monster("Foe", dummy(5, 1), &[])]);
    // The second wall rolls higher but still waits for the first.
    let dice = Dice::from_scripted(vec![10, 90]);
    let mut b = Battle::new(one, two, Rulesets::default(), BattleOptions::default(), dice);
    b.setup();
    let order = b.turn_order();
    assert_eq!(order[..2], [MonsterId::new(TeamSide::One, 0), MonsterId::new(TeamSide::One, 1)]);
}

#[test]
fn acted_and_dead_monsters_leave_the_order() {
    let mut b = battle(
        vec![monster("A", striker(1, 5, 7), &[]), monster("B", striker(1, 5, 6), &[])],
        vec![monster("C", striker(1, 5, 5), &[])],
        &[],
    );
    b.setup();
    b.monster_mut(MonsterId::new(TeamSide::One, 0)).turn_taken = true;
    b.monster_mut(MonsterId::new(TeamSide::Two, 0)).hit_health(5);
    assert_eq!(b.turn_order(), vec![MonsterId::new(TeamSide::One, 1)]);
}
