//! Battle orchestration: setup, the round loop, win detection and the log.

mod attack;
mod death;
pub mod log;
pub mod order;
mod support;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::abilities::{
    fatigue_damage, Ability, Stat, FATIGUE_ROUND, MONSTER_BUFFS, MONSTER_DEBUFFS, SUMMONER_BUFFS,
    SUMMONER_DEBUFFS, SUMMONER_GRANTED,
};
use crate::damage::{hit_with_magic, hit_with_physical, BattleDamage};
use crate::error::BattleError;
use crate::monster::Monster;
use crate::ruleset::{self, Ruleset, Rulesets};
use crate::team::{Team, TeamSide};
use crate::{AttackType, Dice};

use self::log::{Action, CardSnapshot, LogEntry};

/// Rounds played before the battle is called a tie.
pub const MAX_ROUNDS: u32 = 50;

/// Stable handle to a monster: its team and its slot in that team's roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MonsterId {
    pub side: TeamSide,
    pub slot: usize,
}

impl MonsterId {
    pub fn new(side: TeamSide, slot: usize) -> Self {
        Self { side, slot }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Winner {
    Unresolved,
    TeamOne,
    TeamTwo,
    Tie,
}

impl Winner {
    pub fn is_resolved(self) -> bool {
        self != Winner::Unresolved
    }

    fn code(self) -> i32 {
        match self {
            Winner::Unresolved => 0,
            Winner::TeamOne => 1,
            Winner::TeamTwo => 2,
            Winner::Tie => 3,
        }
    }
}

impl std::fmt::Display for Winner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Winner::Unresolved => "unresolved",
            Winner::TeamOne => "team_one",
            Winner::TeamTwo => "team_two",
            Winner::Tie => "tie",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BattleOptions {
    pub logging: bool,
}

impl Default for BattleOptions {
    fn default() -> Self {
        Self { logging: true }
    }
}

/// Who a log entry is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CardRef {
    Monster(MonsterId),
    Summoner(TeamSide),
}

impl From<MonsterId> for CardRef {
    fn from(id: MonsterId) -> Self {
        CardRef::Monster(id)
    }
}

impl From<MonsterId> for Option<CardRef> {
    fn from(id: MonsterId) -> Self {
        Some(CardRef::Monster(id))
    }
}

pub(crate) const NOBODY: Option<CardRef> = None;

pub struct Battle {
    teams: [Team; 2],
    rulesets: Rulesets,
    options: BattleOptions,
    dice: Dice,
    round: u32,
    winner: Winner,
    dead_this_round: Vec<MonsterId>,
    /// (round applied, stunner) → monsters it stunned.
    stun_ledger: IndexMap<(u32, MonsterId), Vec<MonsterId>>,
    log: Vec<LogEntry>,
}

impl Battle {
    pub fn new(team_one: Team, team_two: Team, rulesets: Rulesets, options: BattleOptions, dice: Dice) -> Self {
        let mut teams = [team_one, team_two];
        for side in TeamSide::BOTH {
            let team = &mut teams[side.index()];
            team.side = side;
            team.summoner.side = side;
            for m in team.monsters.iter_mut() {
                m.side = side;
            }
        }
        Self {
            teams,
            rulesets,
            options,
            dice,
            round: 0,
            winner: Winner::Unresolved,
            dead_this_round: Vec::new(),
            stun_ledger: IndexMap::new(),
            log: Vec::new(),
        }
    }

    /* ---------------- accessors ---------------- */

    pub fn winner(&self) -> Winner {
        self.winner
    }

    /// Current round, 1-based. A tie by round cap leaves this at `MAX_ROUNDS + 1`.
    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn rulesets(&self) -> &Rulesets {
        &self.rulesets
    }

    pub fn team(&self, side: TeamSide) -> &Team {
        &self.teams[side.index()]
    }

    pub fn team_mut(&mut self, side: TeamSide) -> &mut Team {
        &mut self.teams[side.index()]
    }

    pub fn monster(&self, id: MonsterId) -> &Monster {
        &self.teams[id.side.index()].monsters[id.slot]
    }

    pub fn monster_mut(&mut self, id: MonsterId) -> &mut Monster {
        &mut self.teams[id.side.index()].monsters[id.slot]
    }

    pub fn log(&self) -> Result<&[LogEntry], BattleError> {
        if !self.options.logging {
            return Err(BattleError::LoggingDisabled);
        }
        Ok(&self.log)
    }

    pub fn into_log(self) -> Result<Vec<LogEntry>, BattleError> {
        if !self.options.logging {
            return Err(BattleError::LoggingDisabled);
        }
        Ok(self.log)
    }

    fn is_alive(&self, id: MonsterId) -> bool {
        self.monster(id).is_alive()
    }

    fn alive_ids(&self, side: TeamSide) -> Vec<MonsterId> {
        self.team(side)
            .alive_slots()
            .into_iter()
            .map(|slot| MonsterId::new(side, slot))
            .collect()
    }

    fn all_alive_ids(&self) -> Vec<MonsterId> {
        TeamSide::BOTH.iter().flat_map(|&side| self.alive_ids(side)).collect()
    }

    /* ---------------- play ---------------- */

    /// Resets both rosters and plays the battle to completion.
    pub fn play(&mut self) -> Winner {
        self.setup();
        let mut round = 1;
        loop {
            if round > MAX_ROUNDS {
                self.round = round;
                self.winner = Winner::Tie;
                break;
            }
            self.round = round;
            if round >= FATIGUE_ROUND {
                self.fatigue();
                self.check_winner();
                if self.winner.is_resolved() {
                    break;
                }
            }
            self.play_round();
            self.check_winner();
            if self.winner.is_resolved() {
                break;
            }
            self.post_round();
            self.check_winner();
            if self.winner.is_resolved() {
                break;
            }
            round += 1;
        }
        tracing::debug!(winner = %self.winner, rounds = self.round, "battle finished");
        self.record(Action::GameOver, NOBODY, NOBODY, self.winner.code());
        self.winner
    }

    /// Clean stats, then every pre-game phase in order.
    pub fn setup(&mut self) {
        self.round = 0;
        self.winner = Winner::Unresolved;
        self.dead_this_round.clear();
        self.stun_ledger.clear();
        self.log.clear();
        for team in self.teams.iter_mut() {
            team.reset();
        }

        ruleset::apply_pre_buffs(&self.rulesets, &mut self.teams);
        for side in TeamSide::BOTH {
            self.apply_summoner_buffs(side);
        }
        for side in TeamSide::BOTH {
            self.apply_summoner_debuffs(side);
        }
        for side in TeamSide::BOTH {
            self.apply_monster_buffs(side);
        }
        for side in TeamSide::BOTH {
            self.apply_monster_debuffs(side);
        }
        ruleset::apply_post_buffs(&self.rulesets, &mut self.teams);
        for team in self.teams.iter_mut() {
            team.set_all_health_to_max();
        }
    }

    fn apply_summoner_buffs(&mut self, side: TeamSide) {
        let abilities = self.team(side).summoner.abilities.clone();
        let friends = self.alive_ids(side);
        let summoner = CardRef::Summoner(side);
        for ability in abilities {
            if SUMMONER_BUFFS.contains(&ability) {
                for &id in &friends {
                    self.monster_mut(id).add_buff(ability);
                    self.record(Action::SummonerBuff(ability), Some(summoner), id, 1);
                }
            }
            if SUMMONER_GRANTED.contains(&ability) {
                for &id in &friends {
                    self.monster_mut(id).add_ability(ability);
                    self.record(Action::SummonerAbility(ability), Some(summoner), id, 0);
                }
            }
        }
        for stat in [Stat::Armor, Stat::Health, Stat::Speed, Stat::Melee, Stat::Ranged, Stat::Magic] {
            let amount = self.team(side).summoner.stat(stat);
            if amount > 0 {
                for &id in &friends {
                    apply_summoner_stat(self.monster_mut(id), stat, amount);
                    self.record(Action::SummonerStat(stat), Some(summoner), id, amount);
                }
            }
        }
    }

    fn apply_summoner_debuffs(&mut self, side: TeamSide) {
        let abilities = self.team(side).summoner.abilities.clone();
        let enemies = self.alive_ids(side.opponent());
        let summoner = CardRef::Summoner(side);
        for ability in abilities {
            if SUMMONER_DEBUFFS.contains(&ability) {
                for &id in &enemies {
                    self.monster_mut(id).add_debuff(ability);
                    self.record(Action::SummonerDebuff(ability), Some(summoner), id, 1);
                }
            }
        }
        for stat in [Stat::Armor, Stat::Health, Stat::Speed, Stat::Melee, Stat::Ranged, Stat::Magic] {
            let amount = self.team(side).summoner.stat(stat);
            if amount < 0 {
                for &id in &enemies {
                    apply_summoner_stat(self.monster_mut(id), stat, amount);
                    self.record(Action::SummonerStat(stat), Some(summoner), id, amount);
                }
            }
        }
    }

    fn apply_monster_buffs(&mut self, side: TeamSide) {
        let friends = self.alive_ids(side);
        for &source in &friends {
            let granted: Vec<Ability> = self
                .monster(source)
                .abilities
                .iter()
                .copied()
                .filter(|a| MONSTER_BUFFS.contains(a))
                .collect();
            for ability in granted {
                for &id in &friends {
                    self.monster_mut(id).add_buff(ability);
                    self.record(Action::MonsterBuff(ability), source, id, 1);
                }
            }
        }
    }

    fn apply_monster_debuffs(&mut self, side: TeamSide) {
        let enemies = self.alive_ids(side.opponent());
        for source in self.alive_ids(side) {
            let inflicted: Vec<Ability> = self
                .monster(source)
                .abilities
                .iter()
                .copied()
                .filter(|a| MONSTER_DEBUFFS.contains(a))
                .collect();
            for ability in inflicted {
                for &id in &enemies {
                    self.monster_mut(id).add_debuff(ability);
                    self.record(Action::MonsterDebuff(ability), source, id, 1);
                }
            }
        }
    }

    fn play_round(&mut self) {
        tracing::debug!(round = self.round, "round start");
        self.record(Action::RoundStart, NOBODY, NOBODY, self.round as i32);
        self.dead_this_round.clear();
        for side in TeamSide::BOTH {
            self.summoner_pre_round(side);
        }

        while let Some(id) = self.next_actor() {
            if TeamSide::BOTH.iter().any(|&s| self.team(s).alive_count() == 0) {
                break;
            }
            self.expire_stuns_from(id);
            if self.monster(id).has_debuff(Ability::Stun) {
                self.monster_mut(id).turn_taken = true;
                continue;
            }
            let kills_before = self.kills_against(id.side.opponent());
            self.monster_pre_turn(id);
            self.resolve_attacks(id);
            if self.monster(id).has_ability(Ability::DoubleStrike) && self.is_alive(id) {
                self.resolve_attacks(id);
            }
            let kills = self.kills_against(id.side.opponent()) - kills_before;
            self.bloodlust(id, kills);
        }
    }

    fn kills_against(&self, side: TeamSide) -> usize {
        self.dead_this_round.iter().filter(|d| d.side == side).count()
    }

    fn bloodlust(&mut self, id: MonsterId, kills: usize) {
        if kills == 0 || !self.is_alive(id) || !self.monster(id).has_ability(Ability::Bloodlust) {
            return;
        }
        let reverse = self.rulesets.contains(Ruleset::ReverseSpeed);
        for _ in 0..kills {
            let m = self.monster_mut(id);
            if m.base_melee > 0 {
                m.base_melee += 1;
            }
            if m.base_ranged > 0 {
                m.base_ranged += 1;
            }
            if m.base_magic > 0 {
                m.base_magic += 1;
            }
            if m.max_armor() > 0 {
                m.starting_armor += 1;
                m.armor += 1;
            }
            if !reverse {
                m.base_speed += 1;
            } else if m.base_speed > 0 {
                m.base_speed -= 1;
            }
            m.starting_health += 1;
            m.health += 1;
            self.record(Action::Bloodlust, id, NOBODY, 1);
        }
    }

    fn fatigue(&mut self) {
        let damage = fatigue_damage(self.round);
        for id in self.all_alive_ids() {
            let overflow = self.monster_mut(id).hit_health(damage);
            self.record(Action::Fatigue, NOBODY, id, damage - overflow);
            self.process_if_dead(id);
        }
    }

    /// Only ever moves out of `Unresolved` once.
    fn check_winner(&mut self) {
        if self.winner.is_resolved() {
            return;
        }
        let one = self.team(TeamSide::One).alive_count();
        let two = self.team(TeamSide::Two).alive_count();
        self.winner = match (one, two) {
            (0, 0) => Winner::Tie,
            (_, 0) => Winner::TeamOne,
            (0, _) => Winner::TeamTwo,
            _ => Winner::Unresolved,
        };
    }

    /* ---------------- stun ledger ---------------- */

    /// Clears stuns `stunner` applied in an earlier round.
    fn expire_stuns_from(&mut self, stunner: MonsterId) {
        let round = self.round;
        let due: Vec<(u32, MonsterId)> = self
            .stun_ledger
            .keys()
            .filter(|(applied, source)| *source == stunner && *applied < round)
            .copied()
            .collect();
        self.expire_stuns(due);
    }

    /// Clears every stun applied before the current round, whatever became
    /// of the monster that applied it.
    fn sweep_stuns(&mut self) {
        let round = self.round;
        let due: Vec<(u32, MonsterId)> =
            self.stun_ledger.keys().filter(|(applied, _)| *applied < round).copied().collect();
        self.expire_stuns(due);
    }

    fn expire_stuns(&mut self, keys: Vec<(u32, MonsterId)>) {
        for key in keys {
            let Some(stunned) = self.stun_ledger.shift_remove(&key) else {
                continue;
            };
            for id in stunned {
                if self.monster(id).has_debuff(Ability::Stun) {
                    self.monster_mut(id).remove_debuff(Ability::Stun);
                    self.record(Action::StunRemoved, key.1, id, 0);
                }
            }
        }
    }

    pub(crate) fn note_stun(&mut self, stunner: MonsterId, target: MonsterId) {
        self.stun_ledger.entry((self.round, stunner)).or_default().push(target);
    }

    /* ---------------- hits and records ---------------- */

    /// Routes a hit through the damage resolver.
    pub(crate) fn hit(&mut self, target: MonsterId, kind: AttackType, amount: i32) -> BattleDamage {
        let m = self.monster_mut(target);
        let damage = match kind {
            AttackType::Magic => hit_with_magic(m, amount),
            AttackType::Melee | AttackType::Ranged => hit_with_physical(m, amount),
        };
        debug_assert!(self.monster(target).health >= 0 && self.monster(target).armor >= 0);
        if damage.shield_broken {
            self.record(Action::RemoveDivineShield, NOBODY, target, 0);
        }
        damage
    }

    fn snapshot(&self, card: CardRef) -> CardSnapshot {
        match card {
            CardRef::Monster(id) => CardSnapshot::of_monster(self.monster(id)),
            CardRef::Summoner(side) => CardSnapshot::of_summoner(&self.team(side).summoner),
        }
    }

    pub(crate) fn record(
        &mut self,
        action: Action,
        actor: impl Into<Option<CardRef>>,
        target: impl Into<Option<CardRef>>,
        value: i32,
    ) {
        if !self.options.logging {
            return;
        }
        let entry = LogEntry {
            round: self.round,
            action,
            actor: actor.into().map(|c| self.snapshot(c)),
            target: target.into().map(|c| self.snapshot(c)),
            value,
        };
        tracing::trace!(%entry, "battle event");
        self.log.push(entry);
    }
}

fn apply_summoner_stat(m: &mut Monster, stat: Stat, amount: i32) {
    match stat {
        Stat::Armor => m.add_summoner_armor(amount),
        Stat::Health => m.add_summoner_health(amount),
        Stat::Speed => m.add_summoner_speed(amount),
        Stat::Melee => m.add_summoner_melee(amount),
        Stat::Ranged => m.add_summoner_ranged(amount),
        Stat::Magic => m.add_summoner_magic(amount),
    }
}
