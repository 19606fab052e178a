use crate::abilities::{
    Ability, AttackType, EARTHQUAKE_DAMAGE, POISON_DAMAGE, REDEMPTION_DAMAGE,
};
use crate::ruleset::Ruleset;
use crate::team::TeamSide;

use super::log::Action;
use super::{Battle, CardRef, MonsterId, NOBODY};

impl Battle {
    /// Runs the death cascade if `id` just reached zero health.
    pub(crate) fn process_if_dead(&mut self, id: MonsterId) {
        self.process_death(id, true);
    }

    fn process_death(&mut self, id: MonsterId, redemption: bool) {
        let m = self.monster(id);
        if m.is_alive() || m.death_handled {
            return;
        }
        tracing::debug!(round = self.round, side = %id.side, name = m.name(), "monster died");
        {
            let m = self.monster_mut(id);
            m.death_handled = true;
            m.turn_taken = true;
        }
        self.dead_this_round.push(id);
        self.team_mut(id.side).refresh_positions();
        self.record(Action::Death, id, NOBODY, 0);

        if redemption && self.monster(id).has_ability(Ability::Redemption) {
            let struck = self.alive_ids(id.side.opponent());
            for &target in &struck {
                let damage = self.hit(target, AttackType::Melee, REDEMPTION_DAMAGE);
                self.record(Action::Redemption, id, target, damage.damage_done);
            }
            for target in struck {
                self.process_death(target, false);
            }
        }

        let resurrected = self.try_resurrect(id);
        if !resurrected {
            self.strip_auras(id);
        }

        for other in self.all_alive_ids() {
            if other != id && self.monster(other).has_ability(Ability::Scavenger) {
                self.monster_mut(other).add_buff(Ability::Scavenger);
                self.record(Action::Scavenger, other, id, 1);
            }
        }

        if !resurrected {
            self.team_mut(id.side).maybe_set_lone_survivor();
        }
    }

    /// Summoner first, then each living teammate in board order.
    fn try_resurrect(&mut self, id: MonsterId) -> bool {
        let side = id.side;
        if self.team(side).summoner.has_ability(Ability::Resurrect) {
            self.team_mut(side).summoner.remove_ability(Ability::Resurrect);
            self.revive(id);
            self.record(Action::Resurrect, Some(CardRef::Summoner(side)), id, 0);
            return true;
        }
        for caster in self.alive_ids(side) {
            if self.monster(caster).has_ability(Ability::Resurrect) {
                self.monster_mut(caster).remove_ability(Ability::Resurrect);
                self.revive(id);
                self.record(Action::Resurrect, caster, id, 0);
                return true;
            }
        }
        false
    }

    fn revive(&mut self, id: MonsterId) {
        self.monster_mut(id).resurrect();
        self.dead_this_round.retain(|d| *d != id);
        self.team_mut(id.side).refresh_positions();
    }

    /// Takes back the pre-game buffs and debuffs a dead monster was handing out.
    fn strip_auras(&mut self, id: MonsterId) {
        let abilities = self.monster(id).abilities.clone();
        let enemies = self.alive_ids(id.side.opponent());
        let friends = self.alive_ids(id.side);
        for ability in abilities {
            if ability.is_monster_debuff() {
                for &enemy in &enemies {
                    self.monster_mut(enemy).remove_debuff(ability);
                }
            }
            if ability.is_monster_buff() {
                for &friend in &friends {
                    self.monster_mut(friend).remove_buff(ability);
                }
            }
        }
    }

    /// Earthquake, poison ticks, then a fresh slate of turns.
    pub(crate) fn post_round(&mut self) {
        if self.rulesets.contains(Ruleset::Earthquake) {
            for id in self.all_alive_ids() {
                let m = self.monster(id);
                if !m.is_alive() || (m.has_ability(Ability::Flying) && !m.has_debuff(Ability::Snare)) {
                    continue;
                }
                let damage = self.hit(id, AttackType::Melee, EARTHQUAKE_DAMAGE);
                self.record(Action::Earthquake, NOBODY, id, damage.damage_done);
                self.process_if_dead(id);
                self.check_winner();
                if self.winner.is_resolved() {
                    return;
                }
            }
        }

        for id in self.all_alive_ids() {
            let m = self.monster(id);
            if !m.is_alive() || !m.has_debuff(Ability::Poison) {
                continue;
            }
            let overflow = self.monster_mut(id).hit_health(POISON_DAMAGE);
            self.record(Action::PoisonDamage, NOBODY, id, POISON_DAMAGE - overflow);
            self.process_if_dead(id);
        }

        for side in TeamSide::BOTH {
            self.team_mut(side).clear_turns();
        }
        self.sweep_stuns();
    }
}
