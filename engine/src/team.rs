use serde::{Deserialize, Serialize};

use crate::abilities::Ability;
use crate::card::{CardCatalog, CardKind};
use crate::error::BattleError;
use crate::monster::Monster;
use crate::summoner::Summoner;
use crate::Dice;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamSide {
    One,
    Two,
}

impl TeamSide {
    pub const BOTH: [TeamSide; 2] = [TeamSide::One, TeamSide::Two];

    pub fn opponent(self) -> TeamSide {
        match self {
            TeamSide::One => TeamSide::Two,
            TeamSide::Two => TeamSide::One,
        }
    }

    pub fn index(self) -> usize {
        match self {
            TeamSide::One => 0,
            TeamSide::Two => 1,
        }
    }
}

impl std::fmt::Display for TeamSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            TeamSide::One => "1",
            TeamSide::Two => "2",
        })
    }
}

/// One card slot of a roster request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CardPick {
    pub id: u32,
    #[serde(default = "default_level")]
    pub level: u8,
}

fn default_level() -> u8 {
    1
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RosterRequest {
    #[serde(default)]
    pub player: String,
    pub summoner: CardPick,
    pub monsters: Vec<CardPick>,
}

/// A roster: ordered monsters plus their summoner. Monsters are addressed by
/// slot (their index in `monsters`), which never changes during a battle;
/// `position` is derived from the alive-only ordering.
#[derive(Debug, Clone)]
pub struct Team {
    pub side: TeamSide,
    pub player: String,
    pub summoner: Summoner,
    pub monsters: Vec<Monster>,
}

impl Team {
    pub fn new(side: TeamSide, player: impl Into<String>, mut summoner: Summoner, mut monsters: Vec<Monster>) -> Self {
        summoner.side = side;
        for m in monsters.iter_mut() {
            m.side = side;
        }
        let mut team = Self { side, player: player.into(), summoner, monsters };
        team.refresh_positions();
        team
    }

    pub fn from_request(
        side: TeamSide,
        request: &RosterRequest,
        catalog: &impl CardCatalog,
    ) -> Result<Self, BattleError> {
        let card = lookup(catalog, request.summoner, CardKind::Summoner)?;
        let summoner = Summoner::new(card, request.summoner.level);
        let monsters = request
            .monsters
            .iter()
            .map(|pick| lookup(catalog, *pick, CardKind::Monster).map(|card| Monster::new(card, pick.level)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(side, request.player.clone(), summoner, monsters))
    }

    /// Restores every card to clean level-based stats.
    pub fn reset(&mut self) {
        self.summoner.reset();
        for m in self.monsters.iter_mut() {
            m.reset();
        }
        self.refresh_positions();
        if self.monsters.len() == 1 {
            self.monsters[0].set_lone_survivor();
        }
    }

    pub fn alive_slots(&self) -> Vec<usize> {
        (0..self.monsters.len()).filter(|&i| self.monsters[i].is_alive()).collect()
    }

    pub fn alive_count(&self) -> usize {
        self.monsters.iter().filter(|m| m.is_alive()).count()
    }

    pub fn first_alive(&self) -> Option<usize> {
        self.monsters.iter().position(|m| m.is_alive())
    }

    pub fn unmoved_slots(&self) -> Vec<usize> {
        (0..self.monsters.len())
            .filter(|&i| self.monsters[i].is_alive() && !self.monsters[i].turn_taken)
            .collect()
    }

    pub fn refresh_positions(&mut self) {
        for (pos, slot) in self.alive_slots().into_iter().enumerate() {
            self.monsters[slot].position = pos;
        }
    }

    /// Alive neighbors of `slot` on either side, in board order.
    pub fn neighbors(&self, slot: usize) -> (Option<usize>, Option<usize>) {
        let prev = (0..slot).rev().find(|&i| self.monsters[i].is_alive());
        let next = (slot + 1..self.monsters.len()).find(|&i| self.monsters[i].is_alive());
        (prev, next)
    }

    pub fn taunt_target(&self) -> Option<usize> {
        self.alive_slots()
            .into_iter()
            .find(|&i| self.monsters[i].has_ability(Ability::Taunt))
    }

    /// Last non-Camouflage monster scanning from the back, front excluded.
    pub fn sneak_target(&self) -> Option<usize> {
        if let Some(t) = self.taunt_target() {
            return Some(t);
        }
        let alive = self.alive_slots();
        alive
            .iter()
            .skip(1)
            .rev()
            .copied()
            .find(|&i| !self.monsters[i].has_ability(Ability::Camouflage))
            .or_else(|| alive.first().copied())
    }

    /// First backline monster that cannot attack or attacks from range.
    pub fn snipe_target(&self) -> Option<usize> {
        if let Some(t) = self.taunt_target() {
            return Some(t);
        }
        let alive = self.alive_slots();
        alive
            .iter()
            .skip(1)
            .copied()
            .find(|&i| {
                let m = &self.monsters[i];
                !m.has_ability(Ability::Camouflage)
                    && (!m.has_attack() || m.base_ranged > 0 || m.base_magic > 0)
            })
            .or_else(|| alive.first().copied())
    }

    /// Lowest current health; the front monster is the starting candidate.
    pub fn opportunity_target(&self) -> Option<usize> {
        if let Some(t) = self.taunt_target() {
            return Some(t);
        }
        let alive = self.alive_slots();
        let mut best = *alive.first()?;
        for &i in alive.iter().skip(1) {
            let m = &self.monsters[i];
            if !m.has_ability(Ability::Camouflage) && m.health < self.monsters[best].health {
                best = i;
            }
        }
        Some(best)
    }

    pub fn scattershot_target(&self, dice: &mut Dice) -> Option<usize> {
        let alive = self.alive_slots();
        if alive.is_empty() {
            return None;
        }
        Some(alive[dice.index(alive.len())])
    }

    pub fn repair_target(&self) -> Option<usize> {
        let mut best = None;
        let mut gap = 0;
        for i in self.alive_slots() {
            let m = &self.monsters[i];
            let missing = m.max_armor() - m.armor;
            if missing > gap {
                gap = missing;
                best = Some(i);
            }
        }
        best
    }

    pub fn triage_target(&self) -> Option<usize> {
        let mut best = None;
        let mut gap = 0;
        for i in self.alive_slots().into_iter().skip(1) {
            let m = &self.monsters[i];
            let missing = m.max_health() - m.health;
            if missing > gap {
                gap = missing;
                best = Some(i);
            }
        }
        best
    }

    pub fn maybe_set_lone_survivor(&mut self) {
        let alive = self.alive_slots();
        if let [only] = alive.as_slice() {
            self.monsters[*only].set_lone_survivor();
        }
    }

    pub fn set_all_health_to_max(&mut self) {
        for m in self.monsters.iter_mut() {
            m.health = m.max_health();
        }
    }

    pub fn clear_turns(&mut self) {
        for m in self.monsters.iter_mut() {
            m.turn_taken = false;
        }
    }
}

fn lookup(
    catalog: &impl CardCatalog,
    pick: CardPick,
    expected: CardKind,
) -> Result<std::sync::Arc<crate::card::CardStats>, BattleError> {
    let card = catalog.lookup(pick.id).ok_or(BattleError::UnknownCard(pick.id))?;
    if card.kind != expected {
        return Err(BattleError::WrongCardKind { id: pick.id, expected });
    }
    let max = card.max_level();
    if pick.level == 0 || pick.level > max {
        return Err(BattleError::InvalidLevel { id: pick.id, level: pick.level, max });
    }
    Ok(card)
}
