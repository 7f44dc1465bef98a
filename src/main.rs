//! Head-to-head player trend CLI
//!
//! Shows a player's recent games against one opponent, a linear-trend
//! prediction for the next meeting, and per-stat bar charts.

use clap::{Args, Parser, Subcommand};
use hoops::display::OutputFormat;
use hoops::{Config, Result};

#[derive(Parser)]
#[command(name = "hoops")]
#[command(about = "Player vs opponent game logs, trends and charts", long_about = None)]
struct Cli {
    /// Config file path
    #[arg(short, long, default_value = "hoops.toml")]
    config: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Cache directory for provider responses
    #[arg(long, global = true)]
    cache: Option<String>,

    /// Use only cached responses (no network requests)
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct MatchupArgs {
    /// Player full name, e.g. "LeBron James"
    player: String,
    /// Opponent team name, e.g. "Golden State Warriors"
    opponent: String,
    /// Number of most recent games to use
    #[arg(long)]
    games: Option<usize>,
    /// Number of seasons to search
    #[arg(long)]
    seasons: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show recent games, the next-game prediction and the chart
    Compare {
        #[command(flatten)]
        matchup: MatchupArgs,
        /// Chart output path (SVG)
        #[arg(long)]
        chart: Option<String>,
        /// Skip writing the chart
        #[arg(long)]
        no_chart: bool,
        /// Output format
        #[arg(long, default_value = "table")]
        format: OutputFormat,
    },
    /// Predict the next game from the recent trend
    Predict {
        #[command(flatten)]
        matchup: MatchupArgs,
        /// Output format
        #[arg(long, default_value = "table")]
        format: OutputFormat,
    },
    /// Draw the performance chart
    Chart {
        #[command(flatten)]
        matchup: MatchupArgs,
        /// Output path (SVG)
        #[arg(long)]
        output: Option<String>,
        /// Print the chart description as JSON instead of writing SVG
        #[arg(long)]
        json: bool,
    },
    /// List known teams
    Teams,
    /// Initialize a new project with default config
    Init,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    // Load or create config
    let mut config = if std::path::Path::new(&cli.config).exists() {
        match Config::load(&cli.config) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        Config::default()
    };
    if let Some(cache) = cli.cache {
        config.provider.cache_dir = Some(cache);
    }
    if cli.offline {
        config.provider.offline = true;
    }

    let result = match cli.command {
        Commands::Compare {
            matchup,
            chart,
            no_chart,
            format,
        } => commands::compare(&config, &matchup, chart, no_chart, format),
        Commands::Predict { matchup, format } => commands::predict(&config, &matchup, format),
        Commands::Chart {
            matchup,
            output,
            json,
        } => commands::chart(&config, &matchup, output, json),
        Commands::Teams => commands::teams(),
        Commands::Init => commands::init(&cli.config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

mod commands {
    use super::*;
    use hoops::chart::build_chart;
    use hoops::data::{
        collect_head_to_head, GameLog, GameLogProvider, NbaStatsClient, Player, Team,
        TeamDirectory,
    };
    use hoops::display::{
        format_compare_csv, format_game_table, format_outcome, prediction_csv, prediction_json,
        warning,
    };
    use hoops::predict::{predict_next, TrendOutcome};
    use hoops::Season;

    /// Games for a resolved player/opponent pair
    struct HeadToHead {
        player: Player,
        team: Team,
        games: GameLog,
        seasons: usize,
    }

    /// Resolve names and fetch games, printing a warning for expected misses
    fn load_head_to_head(config: &Config, matchup: &MatchupArgs) -> Result<Option<HeadToHead>> {
        let teams = TeamDirectory::nba();
        let Some(team) = teams.find(&matchup.opponent).cloned() else {
            log::warn!("Unknown team: {}", matchup.opponent);
            println!(
                "{}",
                warning(&format!("Team '{}' not found.", matchup.opponent))
            );
            return Ok(None);
        };

        let provider = NbaStatsClient::new(&config.provider)?;
        let directory = provider.player_directory()?;
        let Some(player) = directory.find(&matchup.player).cloned() else {
            log::warn!("Unknown player: {}", matchup.player);
            println!(
                "{}",
                warning(&format!("Player '{}' not found.", matchup.player))
            );
            return Ok(None);
        };

        let seasons = matchup.seasons.unwrap_or(config.display.seasons);
        let last_n = matchup.games.unwrap_or(config.display.games);
        let season_list = Season::last_n(chrono::Local::now().date_naive(), seasons);

        let games = collect_head_to_head(&provider, &player, &team, &season_list, last_n)?;
        if games.is_empty() {
            log::warn!(
                "No games for {} vs {} in {} seasons",
                player.full_name,
                team.full_name,
                seasons
            );
            println!(
                "{}",
                warning(&format!(
                    "No games found for {} vs {} in the last {} seasons.",
                    player.full_name, team.full_name, seasons
                ))
            );
            return Ok(None);
        }

        Ok(Some(HeadToHead {
            player,
            team,
            games,
            seasons,
        }))
    }

    /// Predict from the head-to-head games, logging when there are too few
    fn predict_logged(h2h: &HeadToHead) -> TrendOutcome {
        let outcome = predict_next(&h2h.games.chronological());
        if let TrendOutcome::InsufficientData {
            available,
            required,
        } = outcome
        {
            log::warn!(
                "Not enough games to predict {} vs {}: {} of {}",
                h2h.player.full_name,
                h2h.team.full_name,
                available,
                required
            );
        }
        outcome
    }

    pub fn compare(
        config: &Config,
        matchup: &MatchupArgs,
        chart_path: Option<String>,
        no_chart: bool,
        format: OutputFormat,
    ) -> Result<()> {
        let Some(h2h) = load_head_to_head(config, matchup)? else {
            return Ok(());
        };
        let player = h2h.player.full_name.as_str();
        let opponent = h2h.team.full_name.as_str();
        let outcome = predict_logged(&h2h);

        match format {
            OutputFormat::Table => {
                println!(
                    "{} vs {}: last {} games\n",
                    player,
                    opponent,
                    h2h.games.len()
                );
                print!("{}", format_game_table(&h2h.games));
                println!("{}", format_outcome(&outcome, player, opponent));
            }
            OutputFormat::Json => {
                let json = serde_json::json!({
                    "player": player,
                    "opponent": opponent,
                    "games": h2h.games.most_recent_first(),
                    "prediction": prediction_json(&outcome, player, opponent),
                });
                println!("{}", serde_json::to_string_pretty(&json)?);
            }
            OutputFormat::Csv => {
                print!(
                    "{}",
                    format_compare_csv(&h2h.games, &outcome, player, opponent)?
                );
            }
        }

        if no_chart {
            return Ok(());
        }
        let path = chart_path.unwrap_or_else(|| config.display.chart_path.clone());
        match build_chart(&h2h.games, player, opponent, h2h.seasons) {
            Some(chart) => {
                chart.save_svg(&path)?;
                if format == OutputFormat::Table {
                    println!("Chart saved to {}", path);
                }
            }
            None => println!("{}", warning("No data available for selected filters.")),
        }

        Ok(())
    }

    pub fn predict(config: &Config, matchup: &MatchupArgs, format: OutputFormat) -> Result<()> {
        let Some(h2h) = load_head_to_head(config, matchup)? else {
            return Ok(());
        };
        let player = h2h.player.full_name.as_str();
        let opponent = h2h.team.full_name.as_str();
        let outcome = predict_logged(&h2h);

        match format {
            OutputFormat::Table => println!("{}", format_outcome(&outcome, player, opponent)),
            OutputFormat::Json => {
                let json = prediction_json(&outcome, player, opponent);
                println!("{}", serde_json::to_string_pretty(&json)?);
            }
            OutputFormat::Csv => match prediction_csv(&outcome, player, opponent)? {
                Some(csv) => print!("{}", csv),
                None => println!("{}", format_outcome(&outcome, player, opponent)),
            },
        }

        Ok(())
    }

    pub fn chart(
        config: &Config,
        matchup: &MatchupArgs,
        output: Option<String>,
        json: bool,
    ) -> Result<()> {
        let Some(h2h) = load_head_to_head(config, matchup)? else {
            return Ok(());
        };

        let Some(chart) = build_chart(
            &h2h.games,
            &h2h.player.full_name,
            &h2h.team.full_name,
            h2h.seasons,
        ) else {
            println!("{}", warning("No data available for selected filters."));
            return Ok(());
        };

        if json {
            println!("{}", serde_json::to_string_pretty(&chart)?);
        } else {
            let path = output.unwrap_or_else(|| config.display.chart_path.clone());
            chart.save_svg(&path)?;
            println!("Chart saved to {}", path);
        }

        Ok(())
    }

    pub fn teams() -> Result<()> {
        let teams = TeamDirectory::nba();

        println!("Teams");
        println!("───────────────────────────────");
        for team in teams.teams() {
            println!("  {}  {}", team.abbreviation, team.full_name);
        }

        Ok(())
    }

    pub fn init(config_path: &str) -> Result<()> {
        let config = Config::default();
        config.save(config_path)?;
        println!("Created default config at {}", config_path);

        println!("\nNext steps:");
        println!("  1. Edit {} to customize settings", config_path);
        println!("  2. Run 'hoops compare \"LeBron James\" \"Golden State Warriors\"'");
        println!("  3. Add '--cache data/cache' to keep responses for offline use");

        Ok(())
    }
}
