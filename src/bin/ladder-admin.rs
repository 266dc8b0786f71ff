//! Ladder Admin CLI Tool
//!
//! Command-line tool for operating a club ladder: seeding seasons, placing
//! players, reporting match results, and inspecting standings. State lives
//! in a JSON snapshot file, so each invocation loads, applies, and persists.
//!
//! Usage:
//!   cargo run --bin ladder-admin -- --help
//!   cargo run --bin ladder-admin -- --snapshot ladder.json init-season --year 2024 --name Alice --name Bob
//!   cargo run --bin ladder-admin -- --snapshot ladder.json report --year 2024 --winner Bob --loser Alice
//!   cargo run --bin ladder-admin -- --snapshot ladder.json ladder --year 2024

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use club_ladder::config::AppConfig;
use club_ladder::service::LadderService;
use club_ladder::store::{JsonFileSnapshot, NullSnapshot, SnapshotStore};
use club_ladder::types::{MatchSubmission, PlayerId, Rank, SeasonId, SeasonSelector, SeedList};
use club_ladder::utils::parse_seed_lines;
use std::path::PathBuf;
use std::sync::Arc;

/// Club Ladder Administration - Season and Ranking Management
#[derive(Parser)]
#[command(
    name = "ladder-admin",
    version,
    about = "Administration tool for a season-based competitive club ladder",
    long_about = "Ladder Admin drives the club ladder engine from the command line: it seeds \
                 seasons from ordered or explicitly ranked lists, records match results with \
                 rule-driven rank resolution, normalizes rank gaps, and prints standings and \
                 match history."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Snapshot file override
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Override the snapshot file path from configuration"
    )]
    snapshot: Option<PathBuf>,

    /// Run against an empty in-memory state and discard all changes
    #[arg(long, help = "Run in memory without loading or persisting a snapshot")]
    ephemeral: bool,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Enable debug mode
    #[arg(short, long, help = "Enable debug mode with verbose logging")]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Create and seed a season
    InitSeason {
        /// Season year
        #[arg(long)]
        year: i32,
        /// Seed name in ladder order (repeatable)
        #[arg(long = "name", value_name = "NAME")]
        names: Vec<String>,
        /// File of seed lines, either bare names or "rank,name"
        #[arg(long, value_name = "FILE")]
        seed_file: Option<PathBuf>,
    },
    /// Place a player into a season's ladder
    Place {
        /// Season id
        #[arg(long)]
        season: Option<SeasonId>,
        /// Season year, used when no id is given
        #[arg(long)]
        year: Option<i32>,
        /// Player name
        #[arg(short, long)]
        name: String,
        /// Explicit rank; omitted means one below the current bottom
        #[arg(short, long)]
        rank: Option<Rank>,
    },
    /// Report a match result and resolve ranks
    Report {
        /// Season id
        #[arg(long)]
        season: Option<SeasonId>,
        /// Season year, used when no id is given
        #[arg(long)]
        year: Option<i32>,
        /// Winner name
        #[arg(short, long)]
        winner: String,
        /// Loser name
        #[arg(short, long)]
        loser: String,
        /// When the match was played (RFC 3339 or "YYYY-MM-DD[ HH:MM[:SS]]")
        #[arg(long, value_name = "TIMESTAMP")]
        played_at: Option<String>,
        /// Score annotation, e.g. "3-1"
        #[arg(long)]
        score: Option<String>,
        /// Free-form note
        #[arg(long)]
        note: Option<String>,
    },
    /// Print a season's ladder
    Ladder {
        /// Season id
        #[arg(long)]
        season: Option<SeasonId>,
        /// Season year, used when no id is given
        #[arg(long)]
        year: Option<i32>,
    },
    /// Print a season's match history, most recent first
    Matches {
        /// Season id
        #[arg(long)]
        season: Option<SeasonId>,
        /// Season year, used when no id is given
        #[arg(long)]
        year: Option<i32>,
        /// Maximum number of matches to print
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Collapse a season's rank values to a contiguous 1..K sequence
    Densify {
        /// Season id
        #[arg(long)]
        season: Option<SeasonId>,
        /// Season year, used when no id is given
        #[arg(long)]
        year: Option<i32>,
    },
    /// List all seasons, newest year first
    Seasons,
    /// List all registered players
    Players,
    /// Toggle a player's active flag
    SetActive {
        /// Player id (see 'players')
        #[arg(long)]
        id: Option<PlayerId>,
        /// Player name; must already be registered
        #[arg(long)]
        name: Option<String>,
        /// Mark the player inactive instead of active
        #[arg(long)]
        inactive: bool,
    },
    /// Show service statistics
    Stats,
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load and merge configuration from environment and CLI arguments
fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = AppConfig::load(cli.config.as_deref())?;

    if let Some(log_level) = &cli.log_level {
        config.service.log_level = log_level.clone();
    }

    if cli.debug {
        config.service.log_level = "debug".to_string();
    }

    if let Some(snapshot) = &cli.snapshot {
        config.storage.snapshot_path = Some(snapshot.clone());
    }

    Ok(config)
}

/// Choose the snapshot backend for this invocation
fn build_snapshot(cli: &Cli, config: &AppConfig) -> Result<Arc<dyn SnapshotStore>> {
    if cli.ephemeral {
        return Ok(Arc::new(NullSnapshot));
    }

    match &config.storage.snapshot_path {
        Some(path) => Ok(Arc::new(
            JsonFileSnapshot::new(path).with_pretty(config.storage.pretty_json),
        )),
        None => Err(anyhow!(
            "no snapshot path configured; pass --snapshot, set SNAPSHOT_PATH, or use --ephemeral"
        )),
    }
}

/// Resolve a season from the id/year pair the subcommands accept
async fn resolve_season(
    service: &LadderService,
    season: Option<SeasonId>,
    year: Option<i32>,
) -> Result<SeasonId> {
    if season.is_none() && year.is_none() {
        return Err(anyhow!("pass --season or --year to select a season"));
    }

    let selector = SeasonSelector {
        season_id: season,
        year,
    };
    service
        .resolve_season_id(selector)
        .await?
        .ok_or_else(|| anyhow!("no matching season; run 'seasons' to list them"))
}

/// Build the seed list for a new season from CLI input
fn load_seeds(names: Vec<String>, seed_file: Option<&PathBuf>) -> Result<SeedList> {
    match (names.is_empty(), seed_file) {
        (false, Some(_)) => Err(anyhow!("pass either --name or --seed-file, not both")),
        (true, Some(path)) => {
            let raw = std::fs::read_to_string(path)
                .map_err(|e| anyhow!("failed to read seed file {}: {}", path.display(), e))?;
            Ok(SeedList::Explicit {
                entries: parse_seed_lines(&raw),
            })
        }
        (_, None) => Ok(SeedList::Ordered { names }),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(&cli).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    let snapshot = build_snapshot(&cli, &config)?;
    let service = match LadderService::open(snapshot, config.ladder.clone()).await {
        Ok(service) => service,
        Err(e) => {
            eprintln!("❌ Failed to open ladder state: {}", e);
            std::process::exit(1);
        }
    };

    match cli.command {
        Commands::InitSeason {
            year,
            names,
            seed_file,
        } => {
            let seeds = load_seeds(names, seed_file.as_ref())?;
            match service.init_season(year, seeds).await {
                Ok(season_id) => {
                    println!("✅ Season {} created for year {}", season_id, year);
                    println!("💡 Use 'ladder --season {}' to see the standings", season_id);
                }
                Err(e) => {
                    eprintln!("❌ Failed to create season for year {}: {}", year, e);
                    std::process::exit(1);
                }
            }
        }

        Commands::Place {
            season,
            year,
            name,
            rank,
        } => {
            let season_id = resolve_season(&service, season, year).await?;
            match service.place_player(season_id, &name, rank).await {
                Ok(outcome) => {
                    if outcome.existed {
                        println!(
                            "💡 Player '{}' (id {}) is already ranked {} in season {}",
                            name.trim(),
                            outcome.player_id,
                            outcome.final_rank,
                            season_id
                        );
                    } else {
                        println!(
                            "✅ Placed '{}' (id {}) at rank {} in season {}",
                            name.trim(),
                            outcome.player_id,
                            outcome.final_rank,
                            season_id
                        );
                    }
                }
                Err(e) => {
                    eprintln!("❌ Failed to place '{}': {}", name, e);
                    std::process::exit(1);
                }
            }
        }

        Commands::Report {
            season,
            year,
            winner,
            loser,
            played_at,
            score,
            note,
        } => {
            let season_id = resolve_season(&service, season, year).await?;
            let mut submission = MatchSubmission::new(season_id, &winner, &loser);
            submission.played_at = played_at;
            submission.score = score;
            submission.note = note;

            match service.report_match(submission).await {
                Ok(match_id) => {
                    println!(
                        "✅ Recorded: {} defeated {} (match {})",
                        winner.trim(),
                        loser.trim(),
                        match_id
                    );
                }
                Err(e) => {
                    eprintln!("❌ Failed to record match: {}", e);
                    std::process::exit(1);
                }
            }
        }

        Commands::Ladder { season, year } => {
            let season_id = resolve_season(&service, season, year).await?;
            let rows = service.get_ladder(season_id).await?;
            if rows.is_empty() {
                println!("Season {} has no ranked players yet.", season_id);
            } else {
                println!("Season {} ladder ({} players):", season_id, rows.len());
                for row in rows {
                    println!("  {:>4}  {} (id {})", row.rank, row.name, row.player_id);
                }
            }
        }

        Commands::Matches {
            season,
            year,
            limit,
        } => {
            let season_id = resolve_season(&service, season, year).await?;
            let matches = service.get_matches(season_id, limit).await?;
            if matches.is_empty() {
                println!("Season {} has no recorded matches.", season_id);
            } else {
                println!(
                    "Last {} matches in season {}, most recent first:",
                    matches.len(),
                    season_id
                );
                for view in matches {
                    let score = view
                        .score
                        .map(|s| format!(" ({})", s))
                        .unwrap_or_default();
                    let note = view.note.map(|n| format!(" [{}]", n)).unwrap_or_default();
                    println!(
                        "  {}  {} defeated {}{}{}",
                        view.played_at.format("%Y-%m-%d %H:%M"),
                        view.winner_name,
                        view.loser_name,
                        score,
                        note
                    );
                }
            }
        }

        Commands::Densify { season, year } => {
            let season_id = resolve_season(&service, season, year).await?;
            let changed = service.densify_ranks(season_id).await?;
            println!(
                "✅ Densified season {} - {} entries changed",
                season_id, changed
            );
        }

        Commands::Seasons => {
            let seasons = service.list_seasons().await?;
            if seasons.is_empty() {
                println!("No seasons yet. Create one with 'init-season --year <YEAR>'.");
            } else {
                println!("Found {} seasons:", seasons.len());
                for season in seasons {
                    println!("  Season {}: year {}", season.id, season.year);
                }
            }
        }

        Commands::Players => {
            let players = service.list_players().await?;
            if players.is_empty() {
                println!("No registered players.");
            } else {
                println!("Found {} players:", players.len());
                for player in players {
                    println!(
                        "  {:>4}  {:<8}  {}",
                        player.id,
                        if player.active { "active" } else { "inactive" },
                        player.name
                    );
                }
            }
        }

        Commands::SetActive { id, name, inactive } => {
            let player_id = match (id, name) {
                (Some(id), None) => id,
                (None, Some(name)) => {
                    let trimmed = name.trim().to_string();
                    service
                        .list_players()
                        .await?
                        .into_iter()
                        .find(|p| p.name == trimmed)
                        .map(|p| p.id)
                        .ok_or_else(|| anyhow!("no registered player named '{}'", trimmed))?
                }
                _ => return Err(anyhow!("pass exactly one of --id or --name")),
            };

            service.set_player_active(player_id, !inactive).await?;
            println!(
                "✅ Player {} marked {}",
                player_id,
                if inactive { "inactive" } else { "active" }
            );
        }

        Commands::Stats => {
            let stats = service.get_stats().await?;
            println!("📊 Ladder service statistics:");
            println!("  Total players: {}", stats.total_players);
            println!("  Total seasons: {}", stats.total_seasons);
            println!("  Seasons created this run: {}", stats.seasons_created);
            println!("  Players registered this run: {}", stats.players_registered);
            println!("  Placements this run: {}", stats.placements_performed);
            println!("  Matches reported this run: {}", stats.matches_reported);
            println!("  Densify runs this run: {}", stats.densify_runs);
        }
    }

    Ok(())
}
