mod common;

use battle_engine::{Ability, AttackType};
use common::{monster, Line};

fn brute() -> Line {
    Line { melee: 3, ranged: 2, health: 10, speed: 4, armor: 2, ..Line::default() }
}

#[test]
fn buffs_and_debuffs_shift_derived_stats() {
    let mut m = monster("Brute", brute(), &[]);
    assert_eq!(m.melee_attack(), 3);

    m.add_buff(Ability::Inspire);
    assert_eq!(m.melee_attack(), 4);
    m.add_debuff(Ability::Demoralize);
    m.add_debuff(Ability::Demoralize);
    assert_eq!(m.melee_attack(), 2);

    m.add_debuff(Ability::Headwinds);
    assert_eq!(m.ranged_attack(), 1);
    m.add_debuff(Ability::Headwinds);
    assert_eq!(m.ranged_attack(), 1, "attack never drops below 1");

    m.add_buff(Ability::Swiftness);
    assert_eq!(m.speed(), 5);
    for _ in 0..10 {
        m.add_debuff(Ability::Slow);
    }
    assert_eq!(m.speed(), 1, "speed never drops below 1");
}

#[test]
fn zero_base_attack_stays_zero() {
    let mut m = monster("Wall", Line { health: 5, speed: 1, ..Line::default() }, &[]);
    m.add_buff(Ability::Inspire);
    m.add_summoner_magic(2);
    assert_eq!(m.melee_attack(), 0);
    assert_eq!(m.magic_attack(), 0);
    assert!(!m.has_attack());
}

#[test]
fn halving_rounds_up_and_halves_summoner_bonus() {
    let mut m = monster("Brute", Line { melee: 5, ..brute() }, &[]);
    m.add_summoner_melee(3);
    assert_eq!(m.attack(AttackType::Melee), 8);
    m.add_debuff(Ability::Halving);
    assert_eq!(m.attack(AttackType::Melee), 3 + 1);
}

#[test]
fn protect_and_rust_move_armor_with_max_armor() {
    let mut m = monster("Brute", brute(), &[]);
    m.add_buff(Ability::Protect);
    assert_eq!((m.armor, m.max_armor()), (4, 4));

    m.add_debuff(Ability::Rust);
    assert_eq!((m.armor, m.max_armor()), (2, 2));

    m.remove_buff(Ability::Protect);
    assert_eq!((m.armor, m.max_armor()), (0, 0));

    m.remove_debuff(Ability::Rust);
    assert_eq!((m.armor, m.max_armor()), (2, 2));
}

#[test]
fn weaken_and_strengthen_move_health_with_max_health() {
    let mut m = monster("Brute", brute(), &[]);
    m.add_debuff(Ability::Weaken);
    assert_eq!((m.health, m.max_health()), (9, 9));
    m.remove_debuff(Ability::Weaken);
    assert_eq!((m.health, m.max_health()), (10, 10));

    m.add_buff(Ability::Strengthen);
    assert_eq!((m.health, m.max_health()), (11, 11));
    m.remove_buff(Ability::Strengthen);
    assert_eq!((m.health, m.max_health()), (10, 10));
}

#[test]
fn immunity_blocks_everything_but_amplify() {
    let mut m = monster("Warded", brute(), &[Ability::Immunity]);
    m.add_debuff(Ability::Weaken);
    m.add_debuff(Ability::Poison);
    assert!(!m.has_debuff(Ability::Weaken));
    assert!(!m.has_debuff(Ability::Poison));
    m.add_debuff(Ability::Amplify);
    assert_eq!(m.debuff_count(Ability::Amplify), 1);
}

#[test]
fn snare_does_not_stack() {
    let mut m = monster("Bird", brute(), &[Ability::Flying]);
    m.add_debuff(Ability::Snare);
    m.add_debuff(Ability::Snare);
    assert_eq!(m.debuff_count(Ability::Snare), 1);
}

#[test]
fn cleanse_takes_one_cripple_stack_and_everything_else() {
    let mut m = monster("Brute", brute(), &[]);
    m.health = 5;
    for _ in 0..3 {
        m.add_debuff(Ability::Cripple);
    }
    m.add_debuff(Ability::Slow);
    m.add_debuff(Ability::Amplify);
    assert_eq!(m.max_health(), 7);
    assert_eq!(m.health, 5);

    m.cleanse();
    assert_eq!(m.debuff_count(Ability::Cripple), 2);
    assert!(!m.has_debuff(Ability::Slow));
    assert!(m.has_debuff(Ability::Amplify), "amplify is not cleansable");
    assert_eq!(m.max_health(), 8);
    assert_eq!(m.health, 6);
}

#[test]
fn cripple_clamps_current_health() {
    let mut m = monster("Brute", brute(), &[]);
    m.add_debuff(Ability::Cripple);
    assert_eq!((m.health, m.max_health()), (9, 9));
}

#[test]
fn last_stand_keeps_damage_taken_on_boosted_stats() {
    let mut m = monster("Hero", Line { melee: 4, speed: 3, ..brute() }, &[Ability::LastStand]);
    m.hit_health(4);
    assert_eq!(m.health, 6);

    m.set_lone_survivor();
    assert!(m.in_last_stand());
    assert_eq!(m.max_health(), 15);
    assert_eq!(m.health, 11);
    assert_eq!(m.melee_attack(), 6);
    assert_eq!(m.speed(), 4);
    assert_eq!(m.max_armor(), 3);
}

#[test]
fn enrage_boosts_melee_and_speed_once_damaged() {
    let mut m = monster("Berserker", Line { melee: 4, speed: 3, ..brute() }, &[Ability::Enrage]);
    assert_eq!((m.melee_attack(), m.ranged_attack(), m.speed()), (4, 2, 3));

    m.hit_health(1);
    assert!(m.is_enraged());
    assert_eq!((m.melee_attack(), m.ranged_attack(), m.speed()), (6, 2, 5));
}

#[test]
fn dead_monsters_take_no_buffs_or_healing() {
    let mut m = monster("Corpse", brute(), &[]);
    m.hit_health(10);
    assert!(!m.is_alive());
    m.add_buff(Ability::Protect);
    m.add_debuff(Ability::Rust);
    m.add_health(5);
    assert_eq!(m.buff_count(Ability::Protect), 0);
    assert_eq!(m.debuff_count(Ability::Rust), 0);
    assert_eq!(m.health, 0);
}

#[test]
fn health_and_armor_hits_report_overflow() {
    let mut m = monster("Brute", brute(), &[]);
    assert_eq!(m.hit_armor(5), 3);
    assert_eq!(m.armor, 0);
    assert_eq!(m.hit_health(12), 2);
    assert_eq!(m.health, 0);
}

#[test]
fn resurrect_brings_back_divine_shield_and_full_armor() {
    let mut m = monster("Saint", brute(), &[Ability::DivineShield]);
    m.remove_divine_shield();
    m.add_debuff(Ability::Slow);
    m.hit_armor(2);
    m.hit_health(10);

    m.resurrect();
    assert_eq!(m.health, 1);
    assert_eq!(m.armor, 2);
    assert!(m.has_ability(Ability::DivineShield));
    assert!(!m.has_debuff(Ability::Slow));
}

#[test]
fn summoner_armor_never_goes_negative() {
    let mut m = monster("Brute", brute(), &[]);
    m.add_summoner_armor(-5);
    assert_eq!(m.armor, 0);
    assert_eq!(m.max_armor(), 0);
}

#[test]
fn ability_multiset_removes_one_copy() {
    let mut m = monster("Brute", brute(), &[Ability::Thorns]);
    m.add_ability(Ability::Thorns);
    m.remove_ability(Ability::Thorns);
    assert!(m.has_ability(Ability::Thorns));
    m.remove_ability(Ability::Thorns);
    assert!(!m.has_ability(Ability::Thorns));
}

#[test]
fn reset_restores_card_values() {
    let mut m = monster("Brute", brute(), &[]);
    m.add_debuff(Ability::Weaken);
    m.add_summoner_speed(2);
    m.hit_health(3);
    m.reset();
    assert_eq!((m.health, m.armor, m.speed()), (10, 2, 4));
    assert_eq!(m.debuffs().count(), 0);
}
