//! Target selection and the attack pipeline.

use crate::abilities::{
    ceil_half, Ability, AttackType, BACKFIRE_DAMAGE, PROC_CHANCE, THORNS_DAMAGE,
};
use crate::ruleset::Ruleset;

use super::log::Action;
use super::{Battle, MonsterId, NOBODY};

impl Battle {
    /// Magic, then ranged, then melee, for every type the monster has.
    pub(crate) fn resolve_attacks(&mut self, id: MonsterId) {
        if !self.monster(id).has_attack() {
            return;
        }
        for kind in AttackType::TURN_ORDER {
            if !self.is_alive(id) {
                return;
            }
            if self.monster(id).base_attack(kind) <= 0 {
                continue;
            }
            let Some(target) = self.target_for(id, kind) else {
                continue;
            };
            match kind {
                AttackType::Melee => self.melee_attack(id, target, false),
                AttackType::Ranged | AttackType::Magic => self.attack(id, target, kind),
            }
        }
    }

    /// Enemy that `attacker` would hit with `kind` right now, if any.
    pub fn target_for(&mut self, attacker: MonsterId, kind: AttackType) -> Option<MonsterId> {
        let enemy = attacker.side.opponent();
        if !self.is_alive(attacker) || self.team(enemy).alive_count() == 0 {
            return None;
        }
        let position = self.monster(attacker).position;
        let slot = match kind {
            AttackType::Magic => {
                if position == 0 {
                    self.team(enemy).first_alive()
                } else {
                    self.non_melee_target(attacker)
                }
            }
            AttackType::Ranged => {
                if position != 0 {
                    self.non_melee_target(attacker)
                } else if self.monster(attacker).has_ability(Ability::CloseRange) {
                    self.team(enemy).first_alive()
                } else {
                    None
                }
            }
            AttackType::Melee => {
                let m = self.monster(attacker);
                let team = self.team(enemy);
                if !m.can_melee_attack() {
                    None
                } else if position == 0 {
                    team.first_alive()
                } else if m.has_ability(Ability::Sneak) {
                    team.sneak_target()
                } else if m.has_ability(Ability::Opportunity) {
                    team.opportunity_target()
                } else if m.has_ability(Ability::MeleeMayhem) {
                    team.first_alive()
                } else if position == 1 && m.has_ability(Ability::Reach) {
                    team.first_alive()
                } else {
                    None
                }
            }
        };
        slot.map(|slot| MonsterId::new(enemy, slot))
    }

    fn non_melee_target(&mut self, attacker: MonsterId) -> Option<usize> {
        let enemy = attacker.side.opponent().index();
        let m = self.monster(attacker);
        let scattershot = m.has_ability(Ability::Scattershot);
        let sneak = m.has_ability(Ability::Sneak);
        let snipe = m.has_ability(Ability::Snipe);
        let opportunity = m.has_ability(Ability::Opportunity);

        if scattershot {
            return self.teams[enemy].scattershot_target(&mut self.dice);
        }
        let team = &self.teams[enemy];
        if let Some(taunt) = team.taunt_target() {
            Some(taunt)
        } else if sneak {
            team.sneak_target()
        } else if snipe {
            team.snipe_target()
        } else if opportunity {
            team.opportunity_target()
        } else {
            team.first_alive()
        }
    }

    /// A melee attack that tramples on into the next enemy after a kill.
    fn melee_attack(&mut self, attacker: MonsterId, target: MonsterId, trampled: bool) {
        let (_, next) = self.team(target.side).neighbors(target.slot);
        self.attack(attacker, target, AttackType::Melee);
        if trampled
            || self.is_alive(target)
            || !self.is_alive(attacker)
            || !self.monster(attacker).has_ability(Ability::Trample)
        {
            return;
        }
        if let Some(slot) = next {
            let next = MonsterId::new(target.side, slot);
            if self.is_alive(next) {
                let chain = self.rulesets.contains(Ruleset::Stampede);
                self.melee_attack(attacker, next, !chain);
            }
        }
    }

    pub(crate) fn attack(&mut self, attacker: MonsterId, target: MonsterId, kind: AttackType) {
        if !self.is_alive(attacker) || !self.is_alive(target) {
            return;
        }
        if self.monster(attacker).has_ability(Ability::Recharge) && self.round % 2 == 1 {
            return;
        }
        if !self.rulesets.contains(Ruleset::AimTrue) && self.did_dodge(attacker, target, kind) {
            self.record(Action::Dodged, attacker, target, 0);
            self.backfire(attacker, target);
            return;
        }

        let base = self.monster(attacker).attack(kind);
        let amount = base * self.damage_multiplier(attacker, target);
        let (prev, next) = self.team(target.side).neighbors(target.slot);
        let neighbors = [prev, next].map(|n| n.map(|slot| MonsterId::new(target.side, slot)));

        self.snare_if_flying(attacker, target);

        if self.monster(target).has_ability(Ability::DivineShield) {
            self.monster_mut(target).remove_divine_shield();
            self.record(Action::RemoveDivineShield, attacker, target, 0);
            self.reflect(attacker, target, kind, base);
            self.on_hit_effects(attacker, target);
            self.process_if_dead(attacker);
            self.process_if_dead(target);
            self.blast_neighbors(attacker, neighbors, kind, amount);
            return;
        }

        let damage = self.hit(target, kind, amount);
        self.record(Action::Attack, attacker, target, damage.damage_done);

        if damage.remainder > 0 && self.monster(attacker).has_ability(Ability::Piercing) {
            let overflow = self.monster_mut(target).hit_health(damage.remainder);
            let bled = damage.remainder - overflow;
            if bled > 0 {
                self.record(Action::PiercingRemainder, attacker, target, bled);
            }
        }
        self.life_leech(attacker, damage.actual_damage_done);
        self.reflect(attacker, target, kind, base);
        self.retaliate(attacker, target, kind);
        self.on_hit_effects(attacker, target);
        self.process_if_dead(attacker);
        self.process_if_dead(target);
        self.blast_neighbors(attacker, neighbors, kind, amount);
    }

    /// Recharge ×3, Giant Killer ×2, Deathblow ×2, Knock Out ×2, Oppress ×2.
    pub fn damage_multiplier(&self, attacker: MonsterId, target: MonsterId) -> i32 {
        let a = self.monster(attacker);
        let t = self.monster(target);
        let mut multiplier = 1;
        if a.has_ability(Ability::Recharge) {
            multiplier *= 3;
        }
        if a.has_ability(Ability::GiantKiller) && t.mana() >= 10 {
            multiplier *= 2;
        }
        if a.has_ability(Ability::Deathblow) && t.is_lone_survivor() {
            multiplier *= 2;
        }
        if a.has_ability(Ability::KnockOut) && t.has_debuff(Ability::Stun) {
            multiplier *= 2;
        }
        if a.has_ability(Ability::Oppress) && !t.has_attack() {
            multiplier *= 2;
        }
        multiplier
    }

    fn snare_if_flying(&mut self, attacker: MonsterId, target: MonsterId) {
        let t = self.monster(target);
        if self.monster(attacker).has_ability(Ability::Snare)
            && t.has_ability(Ability::Flying)
            && !t.has_debuff(Ability::Snare)
        {
            self.inflict(attacker, target, Ability::Snare, Action::Snare);
        }
    }

    /// Adds a debuff and logs it if it stuck.
    fn inflict(&mut self, attacker: MonsterId, target: MonsterId, debuff: Ability, action: Action) -> bool {
        let before = self.monster(target).debuff_count(debuff);
        self.monster_mut(target).add_debuff(debuff);
        let applied = self.monster(target).debuff_count(debuff) > before;
        if applied {
            self.record(action, attacker, target, 1);
        }
        applied
    }

    fn backfire(&mut self, attacker: MonsterId, target: MonsterId) {
        if !self.monster(target).has_ability(Ability::Backfire) || !self.is_alive(attacker) {
            return;
        }
        let damage = self.hit(attacker, AttackType::Melee, BACKFIRE_DAMAGE);
        self.record(Action::Backfire, target, attacker, damage.damage_done);
        self.process_if_dead(attacker);
    }

    fn life_leech(&mut self, attacker: MonsterId, actual: i32) {
        if !self.is_alive(attacker) || !self.monster(attacker).has_ability(Ability::LifeLeech) {
            return;
        }
        let stacks = ceil_half(actual);
        if stacks <= 0 {
            return;
        }
        for _ in 0..stacks {
            self.monster_mut(attacker).add_buff(Ability::LifeLeech);
        }
        self.record(Action::LifeLeech, attacker, NOBODY, stacks);
    }

    /// Thorns answers melee, Magic Reflect magic, Return Fire ranged.
    fn reflect(&mut self, attacker: MonsterId, target: MonsterId, kind: AttackType, base: i32) {
        if !self.is_alive(attacker) {
            return;
        }
        let t = self.monster(target);
        let (raw, action) = match kind {
            AttackType::Melee if t.has_ability(Ability::Thorns) => (THORNS_DAMAGE, Action::Thorns),
            AttackType::Magic if t.has_ability(Ability::MagicReflect) => (ceil_half(base), Action::MagicReflect),
            AttackType::Ranged if t.has_ability(Ability::ReturnFire) => (ceil_half(base), Action::ReturnFire),
            _ => return,
        };
        let a = self.monster(attacker);
        if a.has_ability(Ability::ReflectionShield) {
            return;
        }
        let amount = raw + a.debuff_count(Ability::Amplify).min(1);
        let damage = self.hit(attacker, kind, amount);
        self.record(action, target, attacker, damage.damage_done);
    }

    fn retaliate(&mut self, attacker: MonsterId, target: MonsterId, kind: AttackType) {
        let t = self.monster(target);
        if kind != AttackType::Melee
            || !t.is_alive()
            || t.base_melee <= 0
            || !t.has_ability(Ability::Retaliate)
            || !self.is_alive(attacker)
        {
            return;
        }
        if !self.dice.succeeds(PROC_CHANCE) {
            return;
        }
        self.record(Action::Retaliate, target, attacker, 0);
        self.attack(target, attacker, AttackType::Melee);
    }

    /// Halving, Shatter, Stun, Poison, Cripple, Affliction, Dispel.
    fn on_hit_effects(&mut self, attacker: MonsterId, target: MonsterId) {
        let has = |b: &Battle, a: Ability| b.monster(attacker).has_ability(a);

        if has(self, Ability::Halving) && self.is_alive(target) {
            self.inflict(attacker, target, Ability::Halving, Action::Halving);
        }
        if has(self, Ability::Shatter) && self.is_alive(target) {
            self.monster_mut(target).armor = 0;
            self.record(Action::Shatter, attacker, target, 0);
        }
        if has(self, Ability::Stun) && self.is_alive(target) && self.dice.succeeds(PROC_CHANCE) {
            if self.inflict(attacker, target, Ability::Stun, Action::Stun) {
                self.note_stun(attacker, target);
            }
        }
        if has(self, Ability::Poison)
            && self.is_alive(target)
            && !self.monster(target).has_debuff(Ability::Poison)
            && self.dice.succeeds(PROC_CHANCE)
        {
            self.inflict(attacker, target, Ability::Poison, Action::Poison);
        }
        if has(self, Ability::Cripple) && self.is_alive(target) {
            self.inflict(attacker, target, Ability::Cripple, Action::Cripple);
        }
        if has(self, Ability::Affliction)
            && self.is_alive(target)
            && !self.monster(target).has_debuff(Ability::Affliction)
            && self.dice.succeeds(PROC_CHANCE)
        {
            self.inflict(attacker, target, Ability::Affliction, Action::Affliction);
        }
        if has(self, Ability::Dispel) && self.is_alive(target) {
            self.monster_mut(target).remove_all_buffs();
            self.record(Action::Dispel, attacker, target, 0);
        }
    }

    fn blast_neighbors(&mut self, attacker: MonsterId, neighbors: [Option<MonsterId>; 2], kind: AttackType, amount: i32) {
        if !self.monster(attacker).has_ability(Ability::Blast) {
            return;
        }
        for target in neighbors.into_iter().flatten() {
            self.blast(attacker, target, kind, amount);
        }
    }

    /// Splash for half the primary hit. Reflection answers the splash as it
    /// landed, after Void or Forcefield.
    fn blast(&mut self, attacker: MonsterId, target: MonsterId, kind: AttackType, amount: i32) {
        let t = self.monster(target);
        if !t.is_alive() || t.has_ability(Ability::ReflectionShield) {
            return;
        }
        let splash = ceil_half(amount);
        self.snare_if_flying(attacker, target);
        let damage = self.hit(target, kind, splash);
        self.record(Action::Blast, attacker, target, damage.damage_done);
        match kind {
            AttackType::Magic => {
                self.reflect(attacker, target, kind, damage.attack);
                self.life_leech(attacker, damage.actual_damage_done);
            }
            AttackType::Ranged => self.reflect(attacker, target, kind, damage.attack),
            AttackType::Melee => {}
        }
        self.process_if_dead(target);
        self.process_if_dead(attacker);
    }
}
