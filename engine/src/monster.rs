use std::sync::Arc;

use indexmap::IndexMap;

use crate::abilities::{
    ceil_half, scale_ceil, scale_floor, Ability, AttackType, PROTECT_AMOUNT, RUST_AMOUNT,
};
use crate::card::{CardStats, LevelStats};
use crate::team::TeamSide;

/// Stat deltas handed out by summoners, tracked apart from the card's base
/// values so derived stats can be recomputed from scratch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SummonerDelta {
    pub armor: i32,
    pub health: i32,
    pub speed: i32,
    pub melee: i32,
    pub ranged: i32,
    pub magic: i32,
}

/// A monster on the board. Lives for the whole battle and mutates in place;
/// every "post-ability" query is recomputed from current state on demand.
#[derive(Debug, Clone)]
pub struct Monster {
    card: Arc<CardStats>,
    pub level: u8,
    pub side: TeamSide,
    pub health: i32,
    pub armor: i32,
    pub starting_health: i32,
    pub starting_armor: i32,
    pub base_speed: i32,
    pub base_melee: i32,
    pub base_ranged: i32,
    pub base_magic: i32,
    pub abilities: Vec<Ability>,
    buffs: IndexMap<Ability, u32>,
    debuffs: IndexMap<Ability, u32>,
    pub summoner: SummonerDelta,
    /// Index within the alive-only ordering of its team.
    pub position: usize,
    pub turn_taken: bool,
    pub(crate) lone_survivor: bool,
    pub(crate) had_divine_shield: bool,
    pub(crate) unprotected: bool,
    pub(crate) death_handled: bool,
}

impl Monster {
    pub fn new(card: Arc<CardStats>, level: u8) -> Self {
        let stats = &card.stats;
        let health = LevelStats::at(&stats.health, level);
        let armor = LevelStats::at(&stats.armor, level);
        Self {
            level,
            side: TeamSide::One,
            health,
            armor,
            starting_health: health,
            starting_armor: armor,
            base_speed: LevelStats::at(&stats.speed, level),
            base_melee: LevelStats::at(&stats.melee, level),
            base_ranged: LevelStats::at(&stats.ranged, level),
            base_magic: LevelStats::at(&stats.magic, level),
            abilities: card.abilities_at(level),
            buffs: IndexMap::new(),
            debuffs: IndexMap::new(),
            summoner: SummonerDelta::default(),
            position: 0,
            turn_taken: false,
            lone_survivor: false,
            had_divine_shield: false,
            unprotected: false,
            death_handled: false,
            card,
        }
    }

    /// Back to clean level-based stats, keeping side and card.
    pub fn reset(&mut self) {
        let side = self.side;
        *self = Monster::new(self.card.clone(), self.level);
        self.side = side;
    }

    pub fn card(&self) -> &CardStats {
        &self.card
    }

    pub fn card_id(&self) -> u32 {
        self.card.id
    }

    pub fn name(&self) -> &str {
        &self.card.name
    }

    pub fn rarity(&self) -> u8 {
        self.card.rarity
    }

    pub fn mana(&self) -> i32 {
        LevelStats::at(&self.card.stats.mana, self.level)
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn is_lone_survivor(&self) -> bool {
        self.lone_survivor
    }

    pub fn had_divine_shield(&self) -> bool {
        self.had_divine_shield
    }

    /* ---------------- abilities ---------------- */

    pub fn has_ability(&self, ability: Ability) -> bool {
        self.abilities.contains(&ability)
    }

    pub fn add_ability(&mut self, ability: Ability) {
        self.abilities.push(ability);
    }

    /// Removes one occurrence.
    pub fn remove_ability(&mut self, ability: Ability) {
        if let Some(idx) = self.abilities.iter().position(|a| *a == ability) {
            self.abilities.remove(idx);
        }
    }

    pub fn remove_all_abilities(&mut self) {
        self.abilities.clear();
    }

    pub fn remove_divine_shield(&mut self) {
        self.remove_ability(Ability::DivineShield);
        self.had_divine_shield = true;
    }

    /// Any non-zero base attack stat.
    pub fn has_attack(&self) -> bool {
        self.base_melee > 0 || self.base_ranged > 0 || self.base_magic > 0
    }

    pub fn base_attack(&self, kind: AttackType) -> i32 {
        match kind {
            AttackType::Melee => self.base_melee,
            AttackType::Ranged => self.base_ranged,
            AttackType::Magic => self.base_magic,
        }
    }

    pub fn can_melee_attack(&self) -> bool {
        self.position == 0
            || self.has_ability(Ability::Opportunity)
            || self.has_ability(Ability::Sneak)
            || self.has_ability(Ability::MeleeMayhem)
            || (self.position == 1 && self.has_ability(Ability::Reach))
    }

    /* ---------------- buffs / debuffs ---------------- */

    pub fn buff_count(&self, ability: Ability) -> i32 {
        self.buffs.get(&ability).copied().unwrap_or(0) as i32
    }

    pub fn debuff_count(&self, ability: Ability) -> i32 {
        self.debuffs.get(&ability).copied().unwrap_or(0) as i32
    }

    pub fn has_buff(&self, ability: Ability) -> bool {
        self.buff_count(ability) > 0
    }

    pub fn has_debuff(&self, ability: Ability) -> bool {
        self.debuff_count(ability) > 0
    }

    pub fn buffs(&self) -> impl Iterator<Item = (Ability, u32)> + '_ {
        self.buffs.iter().map(|(a, n)| (*a, *n))
    }

    pub fn debuffs(&self) -> impl Iterator<Item = (Ability, u32)> + '_ {
        self.debuffs.iter().map(|(a, n)| (*a, *n))
    }

    pub fn add_buff(&mut self, ability: Ability) {
        if !self.is_alive() {
            return;
        }
        *self.buffs.entry(ability).or_insert(0) += 1;
        match ability {
            Ability::Scavenger | Ability::LifeLeech | Ability::Strengthen => self.add_health(1),
            Ability::Protect => self.gain_armor(PROTECT_AMOUNT),
            _ => {}
        }
    }

    pub fn add_debuff(&mut self, ability: Ability) {
        if !self.is_alive() {
            return;
        }
        if self.has_ability(Ability::Immunity) && ability.is_cleansable() {
            return;
        }
        if ability == Ability::Snare && self.has_debuff(Ability::Snare) {
            return;
        }
        *self.debuffs.entry(ability).or_insert(0) += 1;
        match ability {
            Ability::Weaken => self.health = (self.health - 1).max(1),
            Ability::Rust => self.armor = (self.armor - RUST_AMOUNT).max(0),
            Ability::Cripple => self.health = self.health.min(self.max_health()),
            _ => {}
        }
    }

    /// Drops one stack and reverses its immediate effect.
    pub fn remove_buff(&mut self, ability: Ability) {
        if !take_stack(&mut self.buffs, ability) {
            return;
        }
        match ability {
            Ability::Scavenger | Ability::LifeLeech | Ability::Strengthen => {
                if self.is_alive() {
                    self.health = (self.health - 1).max(1);
                }
            }
            Ability::Protect => self.armor = self.armor.min(self.max_armor()),
            _ => {}
        }
    }

    /// Drops one stack and reverses its immediate effect.
    pub fn remove_debuff(&mut self, ability: Ability) {
        if !take_stack(&mut self.debuffs, ability) {
            return;
        }
        match ability {
            Ability::Weaken | Ability::Cripple => self.add_health(1),
            Ability::Rust => self.armor = (self.armor + RUST_AMOUNT).min(self.max_armor()),
            _ => {}
        }
    }

    pub fn remove_all_of_debuff(&mut self, ability: Ability) {
        for _ in 0..self.debuff_count(ability) {
            self.remove_debuff(ability);
        }
    }

    pub fn remove_all_buffs(&mut self) {
        let held: Vec<Ability> = self.buffs.keys().copied().collect();
        for ability in held {
            for _ in 0..self.buff_count(ability) {
                self.remove_buff(ability);
            }
        }
    }

    /// Strips every cleansable debuff. Cripple only loses one stack, and its
    /// presence restores 1 health.
    pub fn cleanse(&mut self) {
        let held: Vec<Ability> = self
            .debuffs
            .keys()
            .copied()
            .filter(|a| a.is_cleansable() && *a != Ability::Cripple)
            .collect();
        for ability in held {
            self.remove_all_of_debuff(ability);
        }
        if take_stack(&mut self.debuffs, Ability::Cripple) {
            self.add_health(1);
        }
    }

    /* ---------------- health / armor ---------------- */

    /// Clamped to `[0, max_health]`; no-op on the dead.
    pub fn add_health(&mut self, amount: i32) {
        if !self.is_alive() || amount == 0 {
            return;
        }
        self.health = (self.health + amount).clamp(0, self.max_health());
    }

    pub(crate) fn gain_armor(&mut self, amount: i32) {
        if !self.unprotected {
            self.armor += amount;
        }
    }

    /// Returns the part of `damage` the armor could not absorb.
    pub fn hit_armor(&mut self, damage: i32) -> i32 {
        if damage <= 0 {
            return 0;
        }
        let absorbed = damage.min(self.armor.max(0));
        self.armor -= absorbed;
        damage - absorbed
    }

    /// Returns the part of `damage` beyond zero health.
    pub fn hit_health(&mut self, damage: i32) -> i32 {
        if damage <= 0 {
            return 0;
        }
        let absorbed = damage.min(self.health.max(0));
        self.health -= absorbed;
        debug_assert!(self.health >= 0);
        damage - absorbed
    }

    /* ---------------- summoner deltas ---------------- */

    pub fn add_summoner_armor(&mut self, amount: i32) {
        self.summoner.armor += amount;
        if !self.unprotected {
            self.armor = (self.armor + amount).max(0);
        }
    }

    pub fn add_summoner_health(&mut self, amount: i32) {
        self.summoner.health += amount;
        self.health = (self.health + amount).max(1);
    }

    pub fn add_summoner_speed(&mut self, amount: i32) {
        self.summoner.speed += amount;
    }

    pub fn add_summoner_melee(&mut self, amount: i32) {
        self.summoner.melee += amount;
    }

    pub fn add_summoner_ranged(&mut self, amount: i32) {
        self.summoner.ranged += amount;
    }

    pub fn add_summoner_magic(&mut self, amount: i32) {
        self.summoner.magic += amount;
    }

    /* ---------------- lone survivor ---------------- */

    pub fn in_last_stand(&self) -> bool {
        self.lone_survivor && self.has_ability(Ability::LastStand)
    }

    pub fn is_enraged(&self) -> bool {
        self.has_ability(Ability::Enrage) && self.health < self.max_health()
    }

    /// Marks the monster as its team's last one alive. With Last Stand the
    /// damage already taken carries over onto the boosted max health.
    pub fn set_lone_survivor(&mut self) {
        if self.lone_survivor {
            return;
        }
        let taken = self.max_health() - self.health;
        self.lone_survivor = true;
        if self.is_alive() && self.has_ability(Ability::LastStand) {
            self.health = (self.max_health() - taken).max(1);
        }
    }

    pub fn resurrect(&mut self) {
        if self.had_divine_shield && !self.has_ability(Ability::DivineShield) {
            self.add_ability(Ability::DivineShield);
        }
        self.cleanse();
        self.armor = self.max_armor();
        self.health = 1;
        self.death_handled = false;
    }

    /* ---------------- post-ability stats ---------------- */

    pub fn max_health(&self) -> i32 {
        let base = self.starting_health + self.summoner.health;
        let mut max = base.max(1) + self.buff_count(Ability::LifeLeech)
            + self.buff_count(Ability::Scavenger)
            - self.debuff_count(Ability::Cripple);
        if self.in_last_stand() {
            max = scale_floor(max);
        }
        max = max - self.debuff_count(Ability::Weaken) + self.buff_count(Ability::Strengthen);
        if base < 1 {
            max += base - 1;
        }
        max.max(1)
    }

    pub fn max_armor(&self) -> i32 {
        if self.unprotected {
            return 0;
        }
        let mut max = self.starting_armor + self.summoner.armor;
        if self.in_last_stand() {
            max = scale_floor(max);
        }
        max += PROTECT_AMOUNT * self.buff_count(Ability::Protect);
        max -= RUST_AMOUNT * self.debuff_count(Ability::Rust);
        max.max(0)
    }

    pub fn speed(&self) -> i32 {
        let mut speed = self.base_speed + self.summoner.speed;
        if self.in_last_stand() {
            speed = scale_floor(speed);
        }
        if self.is_enraged() {
            speed = scale_ceil(speed);
        }
        speed += self.buff_count(Ability::Swiftness) - self.debuff_count(Ability::Slow);
        speed.max(1)
    }

    pub fn melee_attack(&self) -> i32 {
        self.attack(AttackType::Melee)
    }

    pub fn ranged_attack(&self) -> i32 {
        self.attack(AttackType::Ranged)
    }

    pub fn magic_attack(&self) -> i32 {
        self.attack(AttackType::Magic)
    }

    /// Post-ability attack value of `kind`; 0 when the base stat is 0.
    pub fn attack(&self, kind: AttackType) -> i32 {
        let base = self.base_attack(kind);
        if base <= 0 {
            return 0;
        }
        let halved = self.has_debuff(Ability::Halving);
        let mut value = if halved { ceil_half(base).max(1) } else { base };
        if self.in_last_stand() {
            value = scale_floor(value);
        }
        value += match kind {
            AttackType::Magic => -self.debuff_count(Ability::Silence),
            AttackType::Ranged => -self.debuff_count(Ability::Headwinds),
            AttackType::Melee => {
                self.buff_count(Ability::Inspire) - self.debuff_count(Ability::Demoralize)
            }
        };
        let delta = match kind {
            AttackType::Melee => self.summoner.melee,
            AttackType::Ranged => self.summoner.ranged,
            AttackType::Magic => self.summoner.magic,
        };
        value += if halved { delta.div_euclid(2) } else { delta };
        value = value.max(1);
        if kind == AttackType::Melee && self.is_enraged() {
            value = scale_ceil(value);
        }
        value
    }
}

fn take_stack(stacks: &mut IndexMap<Ability, u32>, ability: Ability) -> bool {
    match stacks.get_mut(&ability) {
        Some(count) if *count > 1 => {
            *count -= 1;
            true
        }
        Some(_) => {
            stacks.shift_remove(&ability);
            true
        }
        None => false,
    }
}
