//! Turns a raw damage amount into armor and health changes on one monster.

use serde::Serialize;

use crate::abilities::{ceil_half, Ability, FORCEFIELD_THRESHOLD};
use crate::monster::Monster;

/// Outcome of one hit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BattleDamage {
    /// Nominal attack value, used by reflect triggers.
    pub attack: i32,
    /// Damage attempted after reductions.
    pub damage_done: i32,
    /// Damage that found nothing left to absorb it.
    pub remainder: i32,
    /// Damage actually applied; never counts overkill.
    pub actual_damage_done: i32,
    /// The hit was spent breaking a Divine Shield.
    pub shield_broken: bool,
}

impl BattleDamage {
    fn nominal(remainder: i32) -> Self {
        Self { attack: 1, remainder, ..Self::default() }
    }
}

fn shared_gate(target: &mut Monster, damage: i32) -> Result<i32, BattleDamage> {
    let damage = if target.has_ability(Ability::Forcefield) && damage >= FORCEFIELD_THRESHOLD {
        1
    } else {
        damage
    };
    if target.has_ability(Ability::DivineShield) {
        target.remove_divine_shield();
        return Err(BattleDamage { shield_broken: true, ..BattleDamage::nominal(0) });
    }
    if damage < 1 {
        return Err(BattleDamage::default());
    }
    Ok(damage)
}

/// Magic ignores armor unless the target has Void Armor.
pub fn hit_with_magic(target: &mut Monster, damage: i32) -> BattleDamage {
    let mut damage = match shared_gate(target, damage) {
        Ok(d) => d,
        Err(outcome) => return outcome,
    };
    if target.has_ability(Ability::Void) {
        if damage == 1 {
            return BattleDamage::nominal(1);
        }
        damage = ceil_half(damage);
    }
    if target.has_ability(Ability::VoidArmor) && target.armor > 0 {
        let remainder = target.hit_armor(damage);
        return BattleDamage::nominal(remainder);
    }
    let remainder = target.hit_health(damage);
    BattleDamage {
        attack: damage,
        damage_done: damage,
        remainder,
        actual_damage_done: damage - remainder,
        shield_broken: false,
    }
}

/// Melee and ranged hits: armor first, then health.
pub fn hit_with_physical(target: &mut Monster, damage: i32) -> BattleDamage {
    let mut damage = match shared_gate(target, damage) {
        Ok(d) => d,
        Err(outcome) => return outcome,
    };
    if target.has_ability(Ability::Shield) {
        if damage == 1 {
            return BattleDamage::nominal(1);
        }
        damage = ceil_half(damage);
    }
    let overflow = target.hit_armor(damage);
    let remainder = target.hit_health(overflow);
    BattleDamage {
        attack: damage,
        damage_done: damage,
        remainder,
        actual_damage_done: damage - remainder,
        shield_broken: false,
    }
}
