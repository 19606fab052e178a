//! The battle log: an append-only trace of events, each carrying owned
//! copies of the cards involved as they stood right after the event.

use std::fmt;

use serde::Serialize;

use crate::abilities::{Ability, Stat};
use crate::card::CardKind;
use crate::monster::Monster;
use crate::summoner::Summoner;
use crate::team::TeamSide;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    RoundStart,
    Attack,
    Dodged,
    Death,
    Earthquake,
    Fatigue,
    PoisonDamage,
    GameOver,
    Affliction,
    Backfire,
    Blast,
    Bloodlust,
    Cleanse,
    Cripple,
    Dispel,
    RemoveDivineShield,
    Halving,
    Heal,
    LifeLeech,
    MagicReflect,
    PiercingRemainder,
    Poison,
    Redemption,
    Repair,
    Resurrect,
    Retaliate,
    ReturnFire,
    Scavenger,
    Shatter,
    Snare,
    Stun,
    StunRemoved,
    TankHeal,
    Thorns,
    Triage,
    SummonerAbility(Ability),
    SummonerBuff(Ability),
    SummonerDebuff(Ability),
    SummonerStat(Stat),
    MonsterBuff(Ability),
    MonsterDebuff(Ability),
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Action::RoundStart => "Round start",
            Action::Attack => "Attack",
            Action::Dodged => "Dodged",
            Action::Death => "Death",
            Action::Earthquake => "Earthquake",
            Action::Fatigue => "Fatigue",
            Action::PoisonDamage => "Poison damage",
            Action::GameOver => "Game over",
            Action::Affliction => "Affliction",
            Action::Backfire => "Backfire",
            Action::Blast => "Blast",
            Action::Bloodlust => "Bloodlust",
            Action::Cleanse => "Cleanse",
            Action::Cripple => "Cripple",
            Action::Dispel => "Dispel",
            Action::RemoveDivineShield => "Remove divine shield",
            Action::Halving => "Halving",
            Action::Heal => "Heal",
            Action::LifeLeech => "Life leech",
            Action::MagicReflect => "Magic reflect",
            Action::PiercingRemainder => "Piercing remainder",
            Action::Poison => "Poison",
            Action::Redemption => "Redemption",
            Action::Repair => "Repair",
            Action::Resurrect => "Resurrect",
            Action::Retaliate => "Retaliate",
            Action::ReturnFire => "Return fire",
            Action::Scavenger => "Scavenger",
            Action::Shatter => "Shatter",
            Action::Snare => "Snare",
            Action::Stun => "Stun",
            Action::StunRemoved => "Stun removed",
            Action::TankHeal => "Tank heal",
            Action::Thorns => "Thorns",
            Action::Triage => "Triage",
            Action::SummonerAbility(a) => return write!(f, "Summoner grants {a}"),
            Action::SummonerBuff(a) => return write!(f, "Summoner buff {a}"),
            Action::SummonerDebuff(a) => return write!(f, "Summoner debuff {a}"),
            Action::SummonerStat(s) => return write!(f, "Summoner {s}"),
            Action::MonsterBuff(a) => return write!(f, "Buff {a}"),
            Action::MonsterDebuff(a) => return write!(f, "Debuff {a}"),
        };
        f.write_str(label)
    }
}

/// Owned copy of a card's state. Nothing in here borrows from the live
/// battle, so later mutation never reaches an emitted entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardSnapshot {
    pub kind: CardKind,
    pub card_id: u32,
    pub name: String,
    pub side: TeamSide,
    pub level: u8,
    pub position: Option<usize>,
    pub health: i32,
    pub max_health: i32,
    pub armor: i32,
    pub speed: i32,
    pub melee: i32,
    pub ranged: i32,
    pub magic: i32,
    pub abilities: Vec<Ability>,
    pub buffs: Vec<(Ability, u32)>,
    pub debuffs: Vec<(Ability, u32)>,
}

impl CardSnapshot {
    pub fn of_monster(m: &Monster) -> Self {
        Self {
            kind: CardKind::Monster,
            card_id: m.card_id(),
            name: m.name().to_string(),
            side: m.side,
            level: m.level,
            position: m.is_alive().then_some(m.position),
            health: m.health,
            max_health: m.max_health(),
            armor: m.armor,
            speed: m.speed(),
            melee: m.melee_attack(),
            ranged: m.ranged_attack(),
            magic: m.magic_attack(),
            abilities: m.abilities.clone(),
            buffs: m.buffs().collect(),
            debuffs: m.debuffs().collect(),
        }
    }

    pub fn of_summoner(s: &Summoner) -> Self {
        Self {
            kind: CardKind::Summoner,
            card_id: s.card_id(),
            name: s.name().to_string(),
            side: s.side,
            level: s.level,
            position: None,
            health: s.health,
            max_health: s.health,
            armor: s.armor,
            speed: s.speed,
            melee: s.melee,
            ranged: s.ranged,
            magic: s.magic,
            abilities: s.abilities.clone(),
            buffs: Vec::new(),
            debuffs: Vec::new(),
        }
    }
}

impl fmt::Display for CardSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            CardKind::Summoner => write!(f, "{}#{}", self.name, self.side),
            CardKind::Monster => {
                write!(f, "{}#{} hp:{} ar:{}", self.name, self.side, self.health, self.armor)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub round: u32,
    pub action: Action,
    pub actor: Option<CardSnapshot>,
    pub target: Option<CardSnapshot>,
    pub value: i32,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.action)?;
        if let Some(actor) = &self.actor {
            write!(f, " {actor}")?;
        }
        if let Some(target) = &self.target {
            write!(f, " → {target}")?;
        }
        if self.value != 0 {
            write!(f, " ({})", self.value)?;
        }
        Ok(())
    }
}
