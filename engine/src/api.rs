use std::{fs, path::Path};

use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::battle::{Battle, BattleOptions, Winner};
use crate::card::{CardCatalog, Catalog};
use crate::content::{builtin_catalogs, builtin_matches};
use crate::battle::log::LogEntry;
use crate::ruleset::Rulesets;
use crate::team::{RosterRequest, Team, TeamSide};
use crate::Dice;

const DEFAULT_CATALOG: &str = "core";

fn default_logging() -> bool {
    true
}

/// Two rosters plus match-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MatchRequest {
    pub team_one: RosterRequest,
    pub team_two: RosterRequest,
    #[serde(default)]
    pub rulesets: Vec<String>,
    #[serde(default = "default_logging")]
    pub logging: bool,
    #[serde(default)]
    pub seed: u64,
}

/// Where to find the match and the cards. Paths win over built-in ids.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MatchConfig {
    #[serde(default)]
    pub match_path: Option<String>,
    #[serde(default)]
    pub match_id: Option<String>,
    #[serde(default)]
    pub catalog_path: Option<String>,
    #[serde(default)]
    pub catalog_id: Option<String>,
    /// Overrides the request's own seed.
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct MatchReport {
    pub winner: Winner,
    pub rounds: u32,
    pub entries: Vec<LogEntry>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct MatchSummary {
    pub samples: u32,
    pub team_one_wins: u32,
    pub team_two_wins: u32,
    pub ties: u32,
}

impl MatchSummary {
    pub fn wins(&self, side: TeamSide) -> u32 {
        match side {
            TeamSide::One => self.team_one_wins,
            TeamSide::Two => self.team_two_wins,
        }
    }

    /// Fraction of samples won by `side`.
    pub fn win_rate(&self, side: TeamSide) -> f64 {
        if self.samples == 0 {
            0.0
        } else {
            self.wins(side) as f64 / self.samples as f64
        }
    }
}

/// Builds fresh rosters from the catalog and wires up a battle.
pub fn build_battle(
    catalog: &impl CardCatalog,
    request: &MatchRequest,
    seed: u64,
    logging: bool,
) -> Result<Battle> {
    let one = Team::from_request(TeamSide::One, &request.team_one, catalog)
        .context("building team one")?;
    let two = Team::from_request(TeamSide::Two, &request.team_two, catalog)
        .context("building team two")?;
    let rulesets = Rulesets::parse(&request.rulesets);
    Ok(Battle::new(one, two, rulesets, BattleOptions { logging }, Dice::from_seed(seed)))
}

/// Plays one match with the request's own seed and logging flag.
pub fn play_match(catalog: &impl CardCatalog, request: &MatchRequest) -> Result<Battle> {
    let mut battle = build_battle(catalog, request, request.seed, request.logging)?;
    battle.play();
    Ok(battle)
}

pub fn report(battle: Battle) -> Result<MatchReport> {
    let winner = battle.winner();
    let rounds = battle.round();
    let entries = battle.into_log()?;
    Ok(MatchReport { winner, rounds, entries })
}

/// Runs `trials` independent matches; trial `i` uses `seed + i`.
pub fn sample_matches(
    catalog: &impl CardCatalog,
    request: &MatchRequest,
    trials: u32,
    seed: u64,
) -> Result<MatchSummary> {
    let mut summary = MatchSummary::default();
    for i in 0..trials {
        let mut battle = build_battle(catalog, request, seed.wrapping_add(i as u64), false)?;
        match battle.play() {
            Winner::TeamOne => summary.team_one_wins += 1,
            Winner::TeamTwo => summary.team_two_wins += 1,
            Winner::Tie => summary.ties += 1,
            Winner::Unresolved => bail!("trial {i} finished without a result"),
        }
        summary.samples += 1;
    }
    tracing::debug!(?summary, "sampling finished");
    Ok(summary)
}

pub fn win_rate(
    catalog: &impl CardCatalog,
    request: &MatchRequest,
    trials: u32,
    seed: u64,
    side: TeamSide,
) -> Result<f64> {
    Ok(sample_matches(catalog, request, trials, seed)?.win_rate(side))
}

pub fn simulate_match(cfg: MatchConfig) -> Result<MatchReport> {
    let catalog = resolve_catalog(&cfg)?;
    let mut request = resolve_match(&cfg)?;
    if let Some(seed) = cfg.seed {
        request.seed = seed;
    }
    request.logging = true;
    report(play_match(&catalog, &request)?)
}

pub fn simulate_match_many(cfg: MatchConfig, trials: u32) -> Result<MatchSummary> {
    let catalog = resolve_catalog(&cfg)?;
    let request = resolve_match(&cfg)?;
    let seed = cfg.seed.unwrap_or(request.seed);
    sample_matches(&catalog, &request, trials, seed)
}

pub fn resolve_catalog(cfg: &MatchConfig) -> Result<Catalog> {
    if let Some(path) = &cfg.catalog_path {
        return load_catalog(path);
    }
    let id = cfg.catalog_id.as_deref().unwrap_or(DEFAULT_CATALOG);
    let text = builtin_catalogs()
        .get(id)
        .copied()
        .ok_or_else(|| anyhow!("no built-in catalog '{}'", id))?;
    Catalog::from_json(text).with_context(|| format!("failed to parse built-in catalog: {}", id))
}

pub fn resolve_match(cfg: &MatchConfig) -> Result<MatchRequest> {
    if let Some(path) = &cfg.match_path {
        return load_match(path);
    }
    let Some(id) = cfg.match_id.as_deref() else {
        bail!("either match_path or match_id is required");
    };
    let (format, text) = builtin_matches()
        .get(id)
        .copied()
        .ok_or_else(|| anyhow!("no built-in match '{}'", id))?;
    parse_match(text, format == "yaml").with_context(|| format!("failed to parse built-in match: {}", id))
}

pub fn load_catalog(path: &str) -> Result<Catalog> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog JSON: {}", path))?;
    Catalog::from_json(&text).with_context(|| format!("failed to parse catalog JSON: {}", path))
}

/// JSON, or YAML when the extension says so.
pub fn load_match(path: &str) -> Result<MatchRequest> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read match file: {}", path))?;
    parse_match(&text, is_yaml(path)).with_context(|| format!("failed to parse match file: {}", path))
}

pub fn parse_match(text: &str, yaml: bool) -> Result<MatchRequest> {
    if yaml {
        Ok(serde_yaml::from_str(text)?)
    } else {
        Ok(serde_json::from_str(text)?)
    }
}

pub fn is_yaml(path: &str) -> bool {
    matches!(
        Path::new(path).extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}
