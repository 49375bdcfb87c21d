use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use season_standings::config::Config;
use season_standings::data::{load_record, load_season_list, SeasonPaths};
use season_standings::output::{
    build_posts, format_driver_table, format_heading, format_team_table, should_use_colors,
};
use season_standings::publish::{publish_posts, report_message_ids, PublishEnv, WebhookClient};
use season_standings::standings::{DriverStandings, TeamStandings};

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_DATA: i32 = 1;
const EXIT_NETWORK: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build race results and standings for every season (default if no subcommand)
    Generate,
    /// Print the standings tables of a season
    Show {
        /// Season directory name (defaults to the configured or last listed season)
        #[arg(long)]
        season: Option<String>,
    },
    /// Publish the driver standings table to the chat webhook
    Publish {
        /// Season directory name (defaults to the configured or last listed season)
        #[arg(long)]
        season: Option<String>,
        /// Print the posts instead of sending them
        #[arg(long)]
        dry_run: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "season-standings")]
#[command(about = "Championship standings from dedicated-server race results", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/season-standings/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Directory holding info.json and the season directories
    #[arg(long, global = true)]
    seasons_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() {
    // Install rustls crypto provider (required for rustls 0.23+)
    let _ = rustls::crypto::ring::default_provider().install_default();

    let cli = Cli::parse();
    season_standings::logging::init_logging(cli.verbose);
    let command = cli.command.unwrap_or(Commands::Generate);

    let config_path = cli.config.map(PathBuf::from);
    let mut config = match season_standings::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };
    if let Some(path) = cli.seasons_path {
        config.seasons_path = path;
    }
    tracing::debug!(seasons_path = %config.seasons_path.display(), "Config loaded");

    let code = match command {
        Commands::Generate => run_generate(&config),
        Commands::Show { season } => run_show(&config, season),
        Commands::Publish { season, dry_run } => run_publish(&config, season, dry_run).await,
    };
    std::process::exit(code);
}

fn run_generate(config: &Config) -> i32 {
    match season_standings::generate::generate_all(&config.seasons_path) {
        Ok(summary) => {
            if summary.failed_races > 0 {
                tracing::warn!("{} race(s) could not be ingested", summary.failed_races);
            }
            EXIT_SUCCESS
        }
        Err(e) => {
            tracing::error!("{:#}", e);
            EXIT_DATA
        }
    }
}

/// Season named on the command line, then in config, then the last listed one.
fn resolve_season(config: &Config, season: Option<String>) -> anyhow::Result<String> {
    if let Some(season) = season.or_else(|| config.publish.season.clone()) {
        return Ok(season);
    }
    let seasons = load_season_list(&config.seasons_path)?.unwrap_or_default();
    seasons.last().cloned().ok_or_else(|| {
        anyhow::anyhow!(
            "No seasons listed in {}",
            config.seasons_path.join("info.json").display()
        )
    })
}

fn load_driver_standings(seasons_path: &Path, season: &str) -> anyhow::Result<DriverStandings> {
    let paths = SeasonPaths::new(seasons_path, season);
    load_record(&paths.driver_standings_file())
}

fn run_show(config: &Config, season: Option<String>) -> i32 {
    let result = resolve_season(config, season).and_then(|season| {
        let paths = SeasonPaths::new(&config.seasons_path, &season);
        let drivers = load_driver_standings(&config.seasons_path, &season)?;
        let teams: TeamStandings = load_record(&paths.team_standings_file())?;
        Ok((season, drivers, teams))
    });

    match result {
        Ok((season, drivers, teams)) => {
            let use_colors = should_use_colors();
            println!("{}\n", format_heading(&season, use_colors));
            println!("{}\n", format_driver_table(&drivers, use_colors));
            println!("{}", format_team_table(&teams, use_colors));
            EXIT_SUCCESS
        }
        Err(e) => {
            tracing::error!("{:#}", e);
            EXIT_DATA
        }
    }
}

async fn run_publish(config: &Config, season: Option<String>, dry_run: bool) -> i32 {
    let env = PublishEnv::from_env();

    let drivers = match resolve_season(config, season)
        .and_then(|season| load_driver_standings(&config.seasons_path, &season))
    {
        Ok(d) => d,
        Err(e) => {
            tracing::error!("{:#}", e);
            return EXIT_DATA;
        }
    };

    let table = format_driver_table(&drivers, false);
    let posts = build_posts(&table, config.publish.max_post_len, env.site_url.as_deref());
    tracing::info!("Prepared {} post(s)", posts.len());

    if dry_run {
        for post in &posts {
            println!("{}\n", post);
        }
        return EXIT_SUCCESS;
    }

    let Some(webhook_url) = env.webhook_url.as_deref() else {
        tracing::error!("WEBHOOK_URL is not set");
        return EXIT_CONFIG;
    };

    let client = match WebhookClient::new(webhook_url) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("{:#}", e);
            return EXIT_NETWORK;
        }
    };

    let ids = match publish_posts(&client, &posts, &env.existing_ids).await {
        Ok(ids) => ids,
        Err(e) => {
            tracing::error!("Publish failed: {:#}", e);
            return EXIT_NETWORK;
        }
    };

    match report_message_ids(&ids, env.github_output.as_deref()) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            EXIT_DATA
        }
    }
}
