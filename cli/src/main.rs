use battle_cli::{init_tracing, read_text_auto};
use battle_engine::api::{self, MatchConfig};
use battle_engine::{Ability, CardKind, Catalog, Ruleset};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Subcommand)]
enum Cmd {
    /// Play one match and print its log
    Run {
        /// Match request file (JSON, or YAML by extension)
        #[arg(long = "match", conflicts_with = "match_id")]
        match_path: Option<PathBuf>,
        /// Built-in match id (fire_vs_water, quake_gauntlet)
        #[arg(long, default_value = "fire_vs_water")]
        match_id: String,
        /// Card catalog JSON (defaults to the built-in catalog)
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// Override the match seed
        #[arg(long)]
        seed: Option<u64>,
        /// Print the whole report as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
        /// Only print the result line
        #[arg(long, default_value_t = false)]
        quiet: bool,
    },
    /// List the cards in a catalog
    Cards {
        /// Card catalog JSON (defaults to the built-in catalog)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
    /// List every known ruleset
    Rulesets,
    /// List every known ability
    Abilities,
}

#[derive(Parser)]
#[command(name = "battle-cli")]
#[command(about = "Card battle simulator harness")]
struct Cli {
    /// Log engine diagnostics to stderr (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    cmd: Cmd,
}

fn load_catalog(path: Option<&PathBuf>) -> anyhow::Result<Catalog> {
    match path {
        Some(path) => {
            let text = read_text_auto(path)?;
            Ok(Catalog::from_json(&text)?)
        }
        None => api::resolve_catalog(&MatchConfig::default()),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Cmd::Run {
            match_path,
            match_id,
            catalog,
            seed,
            json,
            quiet,
        } => {
            let catalog = load_catalog(catalog.as_ref())?;
            let mut request = match match_path {
                Some(path) => {
                    let text = read_text_auto(&path)?;
                    api::parse_match(&text, api::is_yaml(&path.to_string_lossy()))?
                }
                None => api::resolve_match(&MatchConfig {
                    match_id: Some(match_id),
                    ..MatchConfig::default()
                })?,
            };
            if let Some(seed) = seed {
                request.seed = seed;
            }
            request.logging = true;
            let report = api::report(api::play_match(&catalog, &request)?)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
                return Ok(());
            }
            if !quiet {
                for entry in &report.entries {
                    println!("r{:<2} {}", entry.round, entry);
                }
            }
            println!("winner={} rounds={}", report.winner, report.rounds);
        }
        Cmd::Cards { catalog } => {
            let catalog = load_catalog(catalog.as_ref())?;
            for card in catalog.iter() {
                let abilities: Vec<String> = card
                    .abilities
                    .iter()
                    .flatten()
                    .map(|a| a.to_string())
                    .collect();
                let tag = match card.kind {
                    CardKind::Summoner => "S",
                    CardKind::Monster => "M",
                };
                println!(
                    "{:>4} {} {:<24} levels={} [{}]",
                    card.id,
                    tag,
                    card.name,
                    card.max_level(),
                    abilities.join(", ")
                );
            }
        }
        Cmd::Rulesets => {
            for rule in Ruleset::ALL {
                println!("{}", rule);
            }
        }
        Cmd::Abilities => {
            for ability in Ability::ALL {
                println!("{}", ability);
            }
        }
    }
    Ok(())
}
