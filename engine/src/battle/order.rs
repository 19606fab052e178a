//! Turn scheduling and dodge odds.

use std::cmp::Ordering;

use crate::abilities::{
    Ability, AttackType, BLIND_DODGE_CHANCE, DODGE_CHANCE, FLYING_DODGE_CHANCE, SPEED_DODGE_CHANCE,
};
use crate::monster::Monster;
use crate::ruleset::Ruleset;

use super::{Battle, MonsterId};

/// Percent chance that `target` dodges an attack of `kind` from `attacker`.
pub fn dodge_chance(attacker: &Monster, target: &Monster, kind: AttackType, reverse_speed: bool) -> u32 {
    if attacker.has_ability(Ability::TrueStrike) {
        return 0;
    }
    if kind == AttackType::Magic && !target.has_ability(Ability::Phase) {
        return 0;
    }
    let mut diff = target.speed() - attacker.speed();
    if reverse_speed {
        diff = -diff;
    }
    let mut chance = diff.max(0) as u32 * SPEED_DODGE_CHANCE;
    if target.has_ability(Ability::Dodge) {
        chance += DODGE_CHANCE;
    }
    if target.has_ability(Ability::Flying)
        && !attacker.has_ability(Ability::Flying)
        && !target.has_debuff(Ability::Snare)
    {
        chance += FLYING_DODGE_CHANCE;
    }
    if attacker.has_debuff(Ability::Blind) {
        chance += BLIND_DODGE_CHANCE;
    }
    chance
}

/// Speed, then magic, then ranged, then rarity, then level.
fn priority(m: &Monster) -> (i32, bool, bool, u8, u8) {
    (m.speed(), m.base_magic > 0, m.base_ranged > 0, m.rarity(), m.level)
}

impl Battle {
    /// Every living monster yet to act this round, fastest first.
    pub fn turn_order(&mut self) -> Vec<MonsterId> {
        let mut pool: Vec<(MonsterId, (i32, bool, bool, u8, u8))> = Vec::new();
        for side in crate::team::TeamSide::BOTH {
            for slot in self.team(side).unmoved_slots() {
                let id = MonsterId::new(side, slot);
                pool.push((id, priority(self.monster(id))));
            }
        }
        pool.sort_by(|a, b| b.1.cmp(&a.1));

        let mut order = Vec::with_capacity(pool.len());
        let mut start = 0;
        while start < pool.len() {
            let end = start + pool[start..].iter().take_while(|e| e.1 == pool[start].1).count();
            let mut group: Vec<MonsterId> = pool[start..end].iter().map(|e| e.0).collect();
            if group.len() > 1 {
                self.break_ties(&mut group);
            }
            order.extend(group);
            start = end;
        }
        order
    }

    /// Shuffles a group of equally ranked monsters, then puts teammates that
    /// cannot attack back in board order among themselves.
    fn break_ties(&mut self, group: &mut [MonsterId]) {
        let mut keyed: Vec<(MonsterId, u32)> = group.iter().map(|&id| (id, self.dice.percent())).collect();
        keyed.sort_by(|a, b| b.1.cmp(&a.1));
        for (dst, (id, _)) in group.iter_mut().zip(keyed) {
            *dst = id;
        }

        for side in crate::team::TeamSide::BOTH {
            let idle: Vec<usize> = (0..group.len())
                .filter(|&i| group[i].side == side && !self.monster(group[i]).has_attack())
                .collect();
            let mut ids: Vec<MonsterId> = idle.iter().map(|&i| group[i]).collect();
            ids.sort_by(|a, b| match self.monster(*a).position.cmp(&self.monster(*b).position) {
                Ordering::Equal => a.slot.cmp(&b.slot),
                other => other,
            });
            for (i, id) in idle.into_iter().zip(ids) {
                group[i] = id;
            }
        }
    }

    /// Front of the turn order, or its back under Reverse Speed.
    pub(crate) fn next_actor(&mut self) -> Option<MonsterId> {
        let order = self.turn_order();
        if self.rulesets.contains(Ruleset::ReverseSpeed) {
            order.last().copied()
        } else {
            order.first().copied()
        }
    }

    pub(crate) fn did_dodge(&mut self, attacker: MonsterId, target: MonsterId, kind: AttackType) -> bool {
        let reverse = self.rulesets.contains(Ruleset::ReverseSpeed);
        let chance = dodge_chance(self.monster(attacker), self.monster(target), kind, reverse);
        chance > 0 && self.dice.succeeds(chance)
    }
}
