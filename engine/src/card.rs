//! Card catalog boundary: immutable, level-scaled card definitions.

use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::abilities::Ability;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardKind {
    Summoner,
    Monster,
}

impl std::fmt::Display for CardKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            CardKind::Summoner => "summoner",
            CardKind::Monster => "monster",
        })
    }
}

/// Per-level stat arrays; index 0 is level 1.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LevelStats {
    #[serde(default)]
    pub mana: Vec<i32>,
    #[serde(default)]
    pub melee: Vec<i32>,
    #[serde(default)]
    pub ranged: Vec<i32>,
    #[serde(default)]
    pub magic: Vec<i32>,
    #[serde(default)]
    pub armor: Vec<i32>,
    #[serde(default)]
    pub health: Vec<i32>,
    #[serde(default)]
    pub speed: Vec<i32>,
}

impl LevelStats {
    /// Value for `level`, clamped to the last entry; missing arrays read as 0.
    pub fn at(values: &[i32], level: u8) -> i32 {
        if values.is_empty() {
            return 0;
        }
        let idx = (level.max(1) as usize - 1).min(values.len() - 1);
        values[idx]
    }

    /// Number of levels described by the longest array.
    pub fn levels(&self) -> usize {
        [&self.mana, &self.melee, &self.ranged, &self.magic, &self.armor, &self.health, &self.speed]
            .iter()
            .map(|v| v.len())
            .max()
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CardStats {
    pub id: u32,
    pub name: String,
    pub kind: CardKind,
    #[serde(default = "default_rarity")]
    pub rarity: u8,
    pub stats: LevelStats,
    /// Ability tiers; tier `i` is unlocked at level `i + 1`.
    #[serde(default)]
    pub abilities: Vec<Vec<Ability>>,
}

fn default_rarity() -> u8 {
    1
}

impl CardStats {
    /// Union of every ability tier unlocked at `level`.
    pub fn abilities_at(&self, level: u8) -> Vec<Ability> {
        self.abilities
            .iter()
            .take(level.max(1) as usize)
            .flatten()
            .copied()
            .collect()
    }

    pub fn max_level(&self) -> u8 {
        self.stats.levels().max(1).min(u8::MAX as usize) as u8
    }
}

/// Anything that can resolve a card id to its definition.
pub trait CardCatalog {
    fn lookup(&self, id: u32) -> Option<Arc<CardStats>>;
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    cards: IndexMap<u32, Arc<CardStats>>,
}

impl Catalog {
    pub fn from_cards(cards: impl IntoIterator<Item = CardStats>) -> Self {
        Self {
            cards: cards.into_iter().map(|c| (c.id, Arc::new(c))).collect(),
        }
    }

    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        let cards: Vec<CardStats> = serde_json::from_str(text)?;
        Ok(Self::from_cards(cards))
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CardStats> {
        self.cards.values().map(|c| c.as_ref())
    }
}

impl CardCatalog for Catalog {
    fn lookup(&self, id: u32) -> Option<Arc<CardStats>> {
        self.cards.get(&id).cloned()
    }
}
