use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[macro_use]
mod macros;

pub mod abilities;
pub mod api;
pub mod battle;
pub mod card;
pub mod content;
pub mod damage;
pub mod error;
pub mod monster;
pub mod ruleset;
pub mod summoner;
pub mod team;

pub use abilities::{Ability, AttackType};
pub use battle::log::{Action, CardSnapshot, LogEntry};
pub use battle::{Battle, BattleOptions, MonsterId, Winner};
pub use card::{CardCatalog, CardKind, CardStats, Catalog, LevelStats};
pub use damage::BattleDamage;
pub use error::BattleError;
pub use monster::Monster;
pub use ruleset::{Ruleset, Rulesets};
pub use summoner::Summoner;
pub use team::{Team, TeamSide};

enum Source {
    Seeded(ChaCha8Rng),
    Scripted { rolls: Vec<u32>, next: usize },
}

/// The single source of randomness for a battle: dodge rolls, ability
/// procs, Scattershot picks and turn-order tie breaks all draw from here.
pub struct Dice {
    source: Source,
}

impl Dice {
    pub fn from_seed(seed: u64) -> Self {
        Self { source: Source::Seeded(ChaCha8Rng::seed_from_u64(seed)) }
    }

    /// Replays `rolls` in a loop. `percent()` returns the next value as is,
    /// `index(len)` returns it modulo `len`. An empty script always yields 0.
    pub fn from_scripted(rolls: Vec<u32>) -> Self {
        Self { source: Source::Scripted { rolls, next: 0 } }
    }

    fn scripted_next(rolls: &[u32], next: &mut usize) -> u32 {
        if rolls.is_empty() {
            return 0;
        }
        let value = rolls[*next % rolls.len()];
        *next += 1;
        value
    }

    /// Uniform roll in `0..=100`.
    pub fn percent(&mut self) -> u32 {
        match &mut self.source {
            Source::Seeded(rng) => rng.gen_range(0..=100),
            Source::Scripted { rolls, next } => Self::scripted_next(rolls, next),
        }
    }

    /// True when a percentile roll lands strictly below `chance`.
    pub fn succeeds(&mut self, chance: u32) -> bool {
        self.percent() < chance
    }

    /// Uniform index in `0..len`; `len` must be non-zero.
    pub fn index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "index() needs a non-empty range");
        match &mut self.source {
            Source::Seeded(rng) => rng.gen_range(0..len.max(1)),
            Source::Scripted { rolls, next } => Self::scripted_next(rolls, next) as usize % len.max(1),
        }
    }
}
