mod common;

use battle_engine::damage::{hit_with_magic, hit_with_physical};
use battle_engine::{Ability, BattleDamage};
use common::{monster, Line};
use proptest::prelude::*;

fn tank(armor: i32, health: i32) -> Line {
    Line { armor, health, speed: 1, ..Line::default() }
}

#[test]
fn armor_soaks_a_small_hit() {
    let mut m = monster("Tank", tank(5, 10), &[]);
    let d = hit_with_physical(&mut m, 3);
    assert_eq!((m.armor, m.health), (2, 10));
    assert_eq!(d.damage_done, 3);
    assert_eq!(d.remainder, 0);
}

#[test]
fn physical_overflow_spills_into_health() {
    let mut m = monster("Tank", tank(5, 10), &[]);
    let d = hit_with_physical(&mut m, 8);
    assert_eq!((m.armor, m.health), (0, 7));
    assert_eq!(d.actual_damage_done, 8);
}

#[test]
fn overkill_is_reported_as_remainder() {
    let mut m = monster("Tank", tank(0, 3), &[]);
    let d = hit_with_physical(&mut m, 5);
    assert_eq!(m.health, 0);
    assert_eq!(d.remainder, 2);
    assert_eq!(d.actual_damage_done, 3);
}

#[test]
fn magic_goes_around_armor() {
    let mut m = monster("Tank", tank(5, 10), &[]);
    hit_with_magic(&mut m, 3);
    assert_eq!((m.armor, m.health), (5, 7));
}

#[test]
fn void_armor_stops_magic_at_armor() {
    let mut m = monster("Tank", tank(5, 10), &[Ability::VoidArmor]);
    hit_with_magic(&mut m, 3);
    assert_eq!((m.armor, m.health), (2, 10));

    let d = hit_with_magic(&mut m, 4);
    assert_eq!((m.armor, m.health), (0, 10));
    assert_eq!(d.remainder, 2);

    hit_with_magic(&mut m, 4);
    assert_eq!(m.health, 6, "no armor left to stop it");
}

#[test]
fn void_halves_magic_and_shrugs_off_one() {
    let mut m = monster("Ghost", tank(0, 10), &[Ability::Void]);
    hit_with_magic(&mut m, 5);
    assert_eq!(m.health, 7);
    hit_with_magic(&mut m, 1);
    assert_eq!(m.health, 7);
}

#[test]
fn shield_halves_physical_and_shrugs_off_one() {
    let mut m = monster("Knight", tank(0, 10), &[Ability::Shield]);
    hit_with_physical(&mut m, 5);
    assert_eq!(m.health, 7);
    hit_with_physical(&mut m, 1);
    assert_eq!(m.health, 7);
}

#[test]
fn forcefield_caps_big_hits_to_one() {
    let mut m = monster("Golem", tank(0, 10), &[Ability::Forcefield]);
    hit_with_physical(&mut m, 7);
    assert_eq!(m.health, 9);
    hit_with_magic(&mut m, 5);
    assert_eq!(m.health, 8);
    hit_with_physical(&mut m, 4);
    assert_eq!(m.health, 4);
}

#[test]
fn divine_shield_eats_the_first_hit() {
    let mut m = monster("Saint", tank(2, 10), &[Ability::DivineShield]);
    let d = hit_with_physical(&mut m, 9);
    assert!(d.shield_broken);
    assert_eq!((m.armor, m.health), (2, 10));
    assert!(!m.has_ability(Ability::DivineShield));
    assert!(m.had_divine_shield());

    hit_with_physical(&mut m, 3);
    assert_eq!((m.armor, m.health), (0, 9));
}

#[test]
fn non_positive_damage_does_nothing() {
    let mut m = monster("Tank", tank(2, 10), &[]);
    let d = hit_with_physical(&mut m, 0);
    assert_eq!(d, BattleDamage::default());
    assert_eq!((m.armor, m.health), (2, 10));
}

proptest! {
    #[test]
    fn physical_hits_conserve_damage(armor in 0i32..10, health in 1i32..20, damage in 1i32..40) {
        let mut m = monster("Tank", tank(armor, health), &[]);
        let d = hit_with_physical(&mut m, damage);
        prop_assert!(m.armor >= 0 && m.health >= 0);
        prop_assert_eq!((armor - m.armor) + (health - m.health) + d.remainder, damage);
    }

    #[test]
    fn magic_hits_conserve_damage(armor in 0i32..10, health in 1i32..20, damage in 1i32..40) {
        let mut m = monster("Tank", tank(armor, health), &[]);
        let d = hit_with_magic(&mut m, damage);
        prop_assert_eq!(m.armor, armor);
        prop_assert_eq!((health - m.health) + d.remainder, damage);
    }
}
