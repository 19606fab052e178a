//! Abilities, the attack types they gate on, and the tables that decide
//! which pre-game phase an ability participates in.

use serde::{Deserialize, Serialize};

named_enum! {
    /// A named rule tag on a card. Also used as the key of buff and debuff stacks.
    pub enum Ability {
        Affliction => "Affliction",
        Amplify => "Amplify",
        Backfire => "Backfire",
        Blast => "Blast",
        Blind => "Blind",
        Bloodlust => "Bloodlust",
        Camouflage => "Camouflage",
        Cleanse => "Cleanse",
        CloseRange => "Close Range",
        Cripple => "Cripple",
        Deathblow => "Deathblow",
        Demoralize => "Demoralize",
        Dispel => "Dispel",
        DivineShield => "Divine Shield",
        Dodge => "Dodge",
        DoubleStrike => "Double Strike",
        Enrage => "Enrage",
        Flying => "Flying",
        Forcefield => "Forcefield",
        GiantKiller => "Giant Killer",
        Halving => "Halving",
        Headwinds => "Headwinds",
        Heal => "Heal",
        Immunity => "Immunity",
        Inspire => "Inspire",
        KnockOut => "Knock Out",
        LastStand => "Last Stand",
        LifeLeech => "Life Leech",
        MagicReflect => "Magic Reflect",
        /// Only ever granted by the Melee Mayhem ruleset.
        MeleeMayhem => "Melee Mayhem",
        Opportunity => "Opportunity",
        Oppress => "Oppress",
        Phase => "Phase",
        Piercing => "Piercing",
        Poison => "Poison",
        Protect => "Protect",
        Reach => "Reach",
        Recharge => "Recharge",
        Redemption => "Redemption",
        ReflectionShield => "Reflection Shield",
        Repair => "Repair",
        Resurrect => "Resurrect",
        Retaliate => "Retaliate",
        ReturnFire => "Return Fire",
        Rust => "Rust",
        Scattershot => "Scattershot",
        Scavenger => "Scavenger",
        Shatter => "Shatter",
        Shield => "Shield",
        Silence => "Silence",
        Slow => "Slow",
        Snare => "Snare",
        Sneak => "Sneak",
        Snipe => "Snipe",
        Strengthen => "Strengthen",
        Stun => "Stun",
        Swiftness => "Swiftness",
        TankHeal => "Tank Heal",
        Taunt => "Taunt",
        Thorns => "Thorns",
        Trample => "Trample",
        Triage => "Triage",
        TrueStrike => "True Strike",
        Void => "Void",
        VoidArmor => "Void Armor",
        Weaken => "Weaken",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackType {
    Melee,
    Ranged,
    Magic,
}

impl AttackType {
    /// The order in which a monster fires its attack types on its turn.
    pub const TURN_ORDER: [AttackType; 3] = [AttackType::Magic, AttackType::Ranged, AttackType::Melee];
}

/// Summoner stat line touched by pre-game deltas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stat {
    Armor,
    Health,
    Speed,
    Melee,
    Ranged,
    Magic,
}

impl std::fmt::Display for Stat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Stat::Armor => "Armor",
            Stat::Health => "Health",
            Stat::Speed => "Speed",
            Stat::Melee => "Melee",
            Stat::Ranged => "Ranged",
            Stat::Magic => "Magic",
        };
        f.write_str(s)
    }
}

// Fixed amounts.
pub const EARTHQUAKE_DAMAGE: i32 = 2;
pub const REDEMPTION_DAMAGE: i32 = 1;
pub const BACKFIRE_DAMAGE: i32 = 2;
pub const THORNS_DAMAGE: i32 = 2;
pub const POISON_DAMAGE: i32 = 2;
pub const FORCEFIELD_THRESHOLD: i32 = 5;
pub const RUST_AMOUNT: i32 = 2;
pub const PROTECT_AMOUNT: i32 = 2;
pub const REPAIR_AMOUNT: i32 = 2;
pub const MIN_HEAL: i32 = 2;

// Percent chances.
pub const PROC_CHANCE: u32 = 50;
pub const DODGE_CHANCE: u32 = 25;
pub const FLYING_DODGE_CHANCE: u32 = 25;
pub const BLIND_DODGE_CHANCE: u32 = 15;
pub const SPEED_DODGE_CHANCE: u32 = 10;

/// First round in which fatigue damage is dealt.
pub const FATIGUE_ROUND: u32 = 20;

/// A summoner holding one of these hands it to every friendly monster.
pub const SUMMONER_GRANTED: &[Ability] = &[
    Ability::Blast,
    Ability::DivineShield,
    Ability::Flying,
    Ability::LastStand,
    Ability::MagicReflect,
    Ability::Piercing,
    Ability::ReturnFire,
    Ability::Snare,
    Ability::Thorns,
    Ability::TrueStrike,
    Ability::Void,
    Ability::VoidArmor,
    Ability::Poison,
];

pub const SUMMONER_BUFFS: &[Ability] = &[Ability::Strengthen];

pub const SUMMONER_DEBUFFS: &[Ability] = &[Ability::Affliction, Ability::Blind];

pub const MONSTER_BUFFS: &[Ability] = &[
    Ability::Protect,
    Ability::Strengthen,
    Ability::Swiftness,
    Ability::Inspire,
];

pub const MONSTER_DEBUFFS: &[Ability] = &[
    Ability::Amplify,
    Ability::Blind,
    Ability::Demoralize,
    Ability::Headwinds,
    Ability::Rust,
    Ability::Slow,
    Ability::Snare,
    Ability::Silence,
    Ability::Weaken,
];

/// Debuffs that neither Immunity nor Cleanse can touch.
pub const UNCLEANSABLE: &[Ability] = &[Ability::Amplify];

impl Ability {
    pub fn is_monster_buff(self) -> bool {
        MONSTER_BUFFS.contains(&self)
    }

    pub fn is_monster_debuff(self) -> bool {
        MONSTER_DEBUFFS.contains(&self)
    }

    pub fn is_cleansable(self) -> bool {
        !UNCLEANSABLE.contains(&self)
    }
}

/// Damage of the fatigue tick in `round` (1-based); zero before onset.
pub fn fatigue_damage(round: u32) -> i32 {
    if round < FATIGUE_ROUND {
        0
    } else {
        (round - FATIGUE_ROUND + 1) as i32
    }
}

/// Heal amount used by Heal, Tank Heal and Triage.
pub fn heal_amount(max_health: i32) -> i32 {
    (max_health / 3).max(MIN_HEAL)
}

pub(crate) fn ceil_half(n: i32) -> i32 {
    (n + 1).div_euclid(2)
}

/// `floor(n * 1.5)`.
pub(crate) fn scale_floor(n: i32) -> i32 {
    (n * 3).div_euclid(2)
}

/// `ceil(n * 1.5)`.
pub(crate) fn scale_ceil(n: i32) -> i32 {
    -((-n * 3).div_euclid(2))
}
