use std::sync::Arc;

use crate::abilities::{Ability, Stat};
use crate::card::{CardStats, LevelStats};
use crate::team::TeamSide;

/// A summoner only acts before the first round, during pre-round support
/// and through Resurrect.
#[derive(Debug, Clone)]
pub struct Summoner {
    card: Arc<CardStats>,
    pub level: u8,
    pub side: TeamSide,
    pub health: i32,
    pub armor: i32,
    pub speed: i32,
    pub melee: i32,
    pub ranged: i32,
    pub magic: i32,
    pub abilities: Vec<Ability>,
}

impl Summoner {
    pub fn new(card: Arc<CardStats>, level: u8) -> Self {
        let stats = &card.stats;
        Self {
            level,
            side: TeamSide::One,
            health: LevelStats::at(&stats.health, level),
            armor: LevelStats::at(&stats.armor, level),
            speed: LevelStats::at(&stats.speed, level),
            melee: LevelStats::at(&stats.melee, level),
            ranged: LevelStats::at(&stats.ranged, level),
            magic: LevelStats::at(&stats.magic, level),
            abilities: card.abilities_at(level),
            card,
        }
    }

    pub fn reset(&mut self) {
        let side = self.side;
        *self = Summoner::new(self.card.clone(), self.level);
        self.side = side;
    }

    pub fn card_id(&self) -> u32 {
        self.card.id
    }

    pub fn name(&self) -> &str {
        &self.card.name
    }

    pub fn has_ability(&self, ability: Ability) -> bool {
        self.abilities.contains(&ability)
    }

    pub fn remove_ability(&mut self, ability: Ability) {
        if let Some(idx) = self.abilities.iter().position(|a| *a == ability) {
            self.abilities.remove(idx);
        }
    }

    /// Loses every ability and stat delta.
    pub fn silence(&mut self) {
        self.abilities.clear();
        self.armor = 0;
        self.health = 0;
        self.speed = 0;
        self.melee = 0;
        self.ranged = 0;
        self.magic = 0;
    }

    pub fn stat(&self, stat: Stat) -> i32 {
        match stat {
            Stat::Armor => self.armor,
            Stat::Health => self.health,
            Stat::Speed => self.speed,
            Stat::Melee => self.melee,
            Stat::Ranged => self.ranged,
            Stat::Magic => self.magic,
        }
    }
}
