//! Match-wide rule modifiers and the team-wide changes they make at setup.

use crate::abilities::Ability;
use crate::team::Team;

named_enum! {
    /// A match-wide modifier. Several only constrain team building and
    /// have no effect once the battle starts; they are still accepted.
    pub enum Ruleset {
        AimTrue => "Aim True",
        ArmoredUp => "Armored Up",
        BackToBasics => "Back to Basics",
        BrokenArrows => "Broken Arrows",
        CloseRange => "Close Range",
        Earthquake => "Earthquake",
        EqualOpportunity => "Equal Opportunity",
        Equalizer => "Equalizer",
        EvenStevens => "Even Stevens",
        ExplosiveWeaponry => "Explosive Weaponry",
        FogOfWar => "Fog of War",
        HealedOut => "Healed Out",
        HeavyHitters => "Heavy Hitters",
        HolyProtection => "Holy Protection",
        KeepYourDistance => "Keep Your Distance",
        LittleLeague => "Little League",
        LostLegendaries => "Lost Legendaries",
        LostMagic => "Lost Magic",
        MeleeMayhem => "Melee Mayhem",
        NoxiousFumes => "Noxious Fumes",
        OddOnesOut => "Odd Ones Out",
        ReverseSpeed => "Reverse Speed",
        RiseOfTheCommons => "Rise of the Commons",
        SilencedSummoners => "Silenced Summoners",
        SpreadingFury => "Spreading Fury",
        Stampede => "Stampede",
        Standard => "Standard",
        SuperSneak => "Super Sneak",
        TakingSides => "Taking Sides",
        TargetPractice => "Target Practice",
        Unprotected => "Unprotected",
        UpCloseAndPersonal => "Up Close & Personal",
        WeakMagic => "Weak Magic",
    }
}

/// The active ruleset set of one battle, kept in canonical order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rulesets(Vec<Ruleset>);

impl Rulesets {
    pub fn new(rules: impl IntoIterator<Item = Ruleset>) -> Self {
        let mut rules: Vec<Ruleset> = rules.into_iter().collect();
        rules.sort();
        rules.dedup();
        Self(rules)
    }

    /// Parses free-form tokens; a token may hold several names joined by `|`.
    /// Unknown names are skipped.
    pub fn parse<S: AsRef<str>>(tokens: &[S]) -> Self {
        let mut rules = Vec::new();
        for token in tokens {
            for name in token.as_ref().split('|').map(str::trim).filter(|s| !s.is_empty()) {
                match Ruleset::from_name(name) {
                    Some(rule) => rules.push(rule),
                    None => tracing::warn!(ruleset = name, "ignoring unknown ruleset"),
                }
            }
        }
        Self::new(rules)
    }

    pub fn contains(&self, rule: Ruleset) -> bool {
        self.0.contains(&rule)
    }

    pub fn iter(&self) -> impl Iterator<Item = Ruleset> + '_ {
        self.0.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// First setup phase, before any summoner or monster aura is applied.
pub(crate) fn apply_pre_buffs(rulesets: &Rulesets, teams: &mut [Team; 2]) {
    for rule in rulesets.iter() {
        if rule == Ruleset::Equalizer {
            equalize(teams);
            continue;
        }
        for team in teams.iter_mut() {
            if rule == Ruleset::SilencedSummoners {
                team.summoner.silence();
            }
            for m in team.monsters.iter_mut() {
                match rule {
                    Ruleset::ArmoredUp => m.add_summoner_armor(2),
                    Ruleset::BackToBasics => m.remove_all_abilities(),
                    Ruleset::CloseRange => m.add_ability(Ability::CloseRange),
                    Ruleset::EqualOpportunity => {
                        if !m.has_ability(Ability::Sneak) && !m.has_ability(Ability::Snipe) {
                            m.add_ability(Ability::Opportunity);
                        }
                    }
                    Ruleset::ExplosiveWeaponry => m.add_ability(Ability::Blast),
                    Ruleset::FogOfWar => {
                        m.remove_ability(Ability::Sneak);
                        m.remove_ability(Ability::Snipe);
                    }
                    Ruleset::HealedOut => {
                        m.remove_ability(Ability::TankHeal);
                        m.remove_ability(Ability::Heal);
                        m.remove_ability(Ability::Triage);
                    }
                    Ruleset::HeavyHitters => m.add_ability(Ability::KnockOut),
                    Ruleset::HolyProtection => m.add_ability(Ability::DivineShield),
                    Ruleset::MeleeMayhem => m.add_ability(Ability::MeleeMayhem),
                    Ruleset::NoxiousFumes => m.add_debuff(Ability::Poison),
                    Ruleset::SpreadingFury => m.add_ability(Ability::Enrage),
                    Ruleset::SuperSneak => {
                        if m.base_melee > 0 {
                            m.add_ability(Ability::Sneak);
                        }
                    }
                    Ruleset::WeakMagic => m.add_ability(Ability::VoidArmor),
                    Ruleset::TargetPractice => {
                        if m.base_ranged > 0 || m.base_magic > 0 {
                            m.add_ability(Ability::Snipe);
                        }
                    }
                    _ => {}
                }
            }
        }
    }
}

/// Last setup phase, after every aura is in place.
pub(crate) fn apply_post_buffs(rulesets: &Rulesets, teams: &mut [Team; 2]) {
    if rulesets.contains(Ruleset::Unprotected) {
        for m in teams.iter_mut().flat_map(|t| t.monsters.iter_mut()) {
            m.armor = 0;
            m.unprotected = true;
        }
    }
}

fn equalize(teams: &mut [Team; 2]) {
    let highest = teams
        .iter()
        .flat_map(|t| t.monsters.iter())
        .map(|m| m.starting_health)
        .max()
        .unwrap_or(0);
    for m in teams.iter_mut().flat_map(|t| t.monsters.iter_mut()) {
        m.starting_health = highest;
        m.health = highest;
    }
}
