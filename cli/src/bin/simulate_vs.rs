use battle_cli::{init_tracing, read_text_auto};
use battle_engine::api::{self, MatchConfig, MatchSummary};
use battle_engine::{Catalog, TeamSide};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Copy, Clone, ValueEnum)]
enum Side {
    One,
    Two,
}

impl From<Side> for TeamSide {
    fn from(side: Side) -> Self {
        match side {
            Side::One => TeamSide::One,
            Side::Two => TeamSide::Two,
        }
    }
}

#[derive(Parser)]
#[command(name = "simulate-vs")]
#[command(about = "Monte Carlo sim: win rate of one roster against another")]
struct Args {
    /// Match request file (JSON, or YAML by extension)
    #[arg(long = "match", conflicts_with = "match_id")]
    match_path: Option<PathBuf>,

    /// Built-in match id
    #[arg(long, default_value = "fire_vs_water")]
    match_id: String,

    /// Card catalog JSON (defaults to the built-in catalog)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Number of trials
    #[arg(long, default_value_t = 1000)]
    trials: u32,

    /// RNG base seed (trial i uses seed+i); defaults to the match seed
    #[arg(long)]
    seed: Option<u64>,

    /// Side whose win rate is reported
    #[arg(long, value_enum, default_value_t = Side::One)]
    side: Side,

    /// Log engine diagnostics to stderr
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let catalog = match args.catalog.as_ref() {
        Some(path) => Catalog::from_json(&read_text_auto(path)?)?,
        None => api::resolve_catalog(&MatchConfig::default())?,
    };
    let (label, request) = match args.match_path.as_ref() {
        Some(path) => {
            let text = read_text_auto(path)?;
            let label = path.display().to_string();
            (label.clone(), api::parse_match(&text, api::is_yaml(&label))?)
        }
        None => {
            let cfg = MatchConfig {
                match_id: Some(args.match_id.clone()),
                ..MatchConfig::default()
            };
            (args.match_id.clone(), api::resolve_match(&cfg)?)
        }
    };
    if args.trials == 0 {
        anyhow::bail!("--trials must be at least 1");
    }
    let seed = args.seed.unwrap_or(request.seed);
    let side: TeamSide = args.side.into();

    let summary: MatchSummary = api::sample_matches(&catalog, &request, args.trials, seed)?;
    let tie_rate = summary.ties as f64 / summary.samples as f64;

    println!("simulate-vs results");
    println!("-------------------");
    println!("match:              {}", label);
    println!("trials:             {}", summary.samples);
    println!("base seed:          {}", seed);
    println!(
        "team one:           {} ({} cards)",
        player_or(&request.team_one.player, "team one"),
        request.team_one.monsters.len()
    );
    println!(
        "team two:           {} ({} cards)",
        player_or(&request.team_two.player, "team two"),
        request.team_two.monsters.len()
    );
    println!();
    println!("team one wins:      {}", summary.team_one_wins);
    println!("team two wins:      {}", summary.team_two_wins);
    println!("ties:               {}", summary.ties);
    println!("tie rate:           {:.1}%", tie_rate * 100.0);
    println!("win rate (team {}): {:.1}%", side, summary.win_rate(side) * 100.0);

    Ok(())
}

fn player_or<'a>(player: &'a str, fallback: &'a str) -> &'a str {
    if player.is_empty() {
        fallback
    } else {
        player
    }
}
