use crate::abilities::{heal_amount, Ability, REPAIR_AMOUNT};
use crate::team::TeamSide;

use super::log::Action;
use super::{Battle, CardRef, MonsterId};

impl Battle {
    /// Summoner support, once per side per round.
    pub(crate) fn summoner_pre_round(&mut self, side: TeamSide) {
        let summoner = CardRef::Summoner(side);
        let has = |b: &Battle, a: Ability| b.team(side).summoner.has_ability(a);

        if has(self, Ability::Cleanse) {
            if let Some(slot) = self.team(side).first_alive() {
                let id = MonsterId::new(side, slot);
                self.monster_mut(id).cleanse();
                self.record(Action::Cleanse, Some(summoner), id, 0);
            }
        }
        if has(self, Ability::Repair) {
            if let Some(slot) = self.team(side).repair_target() {
                let id = MonsterId::new(side, slot);
                let amount = self.repair(id);
                self.record(Action::Repair, Some(summoner), id, amount);
            }
        }
        if has(self, Ability::TankHeal) {
            if let Some(slot) = self.team(side).first_alive() {
                let id = MonsterId::new(side, slot);
                let amount = self.heal(id);
                self.record(Action::TankHeal, Some(summoner), id, amount);
            }
        }
        if has(self, Ability::Triage) {
            if let Some(slot) = self.team(side).triage_target() {
                let id = MonsterId::new(side, slot);
                let amount = self.heal(id);
                self.record(Action::Triage, Some(summoner), id, amount);
            }
        }
    }

    /// Support abilities a monster uses before attacking. Marks its turn taken.
    pub(crate) fn monster_pre_turn(&mut self, id: MonsterId) {
        self.monster_mut(id).turn_taken = true;
        let side = id.side;
        let has = |b: &Battle, a: Ability| b.monster(id).has_ability(a);

        if has(self, Ability::Cleanse) {
            if let Some(slot) = self.team(side).first_alive() {
                let target = MonsterId::new(side, slot);
                self.monster_mut(target).cleanse();
                self.record(Action::Cleanse, id, target, 0);
            }
        }
        if has(self, Ability::TankHeal) {
            if let Some(slot) = self.team(side).first_alive() {
                let target = MonsterId::new(side, slot);
                let amount = self.heal(target);
                self.record(Action::TankHeal, id, target, amount);
            }
        }
        if has(self, Ability::Repair) {
            if let Some(slot) = self.team(side).repair_target() {
                let target = MonsterId::new(side, slot);
                let amount = self.repair(target);
                self.record(Action::Repair, id, target, amount);
            }
        }
        if has(self, Ability::Triage) {
            if let Some(slot) = self.team(side).triage_target() {
                let target = MonsterId::new(side, slot);
                let amount = self.heal(target);
                self.record(Action::Triage, id, target, amount);
            }
        }
        if has(self, Ability::Heal) {
            let amount = self.heal(id);
            self.record(Action::Heal, id, id, amount);
        }
    }

    /// Heals by a third of max health (at least 2). Afflicted monsters
    /// cannot be healed. Returns the health gained.
    fn heal(&mut self, id: MonsterId) -> i32 {
        let m = self.monster_mut(id);
        if m.has_debuff(Ability::Affliction) {
            return 0;
        }
        let before = m.health;
        let amount = heal_amount(m.max_health());
        m.add_health(amount);
        m.health - before
    }

    fn repair(&mut self, id: MonsterId) -> i32 {
        let m = self.monster_mut(id);
        let restored = (m.armor + REPAIR_AMOUNT).min(m.max_armor());
        let gained = (restored - m.armor).max(0);
        m.armor += gained;
        gained
    }
}
