use clap::{Parser, Subcommand};
use log::{debug, error};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use draft_signal::config::{load_config, Config};
use draft_signal::output::{format_report, render_json, should_use_colors, write_report};
use draft_signal::provider::d1::{DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT};
use draft_signal::provider::{
    D1Client, D1Credentials, FileProvider, PlayerDataProvider, PlayerFilter, ProviderError,
};
use draft_signal::runner::{run_calculator, RunOptions, RunReport};
use draft_signal::scoring::{validate_config, CalculatorKind};

const EXIT_SUCCESS: i32 = 0;
const EXIT_AUTH: i32 = 1;
const EXIT_NETWORK: i32 = 2;
const EXIT_IO: i32 = 3;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug, Clone, Copy)]
enum Commands {
    /// Flag players who fell short of their draft slot
    Busts,
    /// Flag players who outplayed their draft slot
    Steals,
    /// Grade every player's first stint on a 0-1 scale
    Grades,
}

impl Commands {
    fn kind(self) -> CalculatorKind {
        match self {
            Commands::Busts => CalculatorKind::Bust,
            Commands::Steals => CalculatorKind::Steal,
            Commands::Grades => CalculatorKind::Grade,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "draft-signal")]
#[command(about = "Score NFL draftees against what their draft slot promised", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Directory holding tier-mappings.json and scoring.json
    #[arg(long, global = true, env = "DRAFT_SIGNAL_CONFIG_DIR")]
    config_dir: Option<PathBuf>,

    /// Score players from a local JSON file instead of the database
    #[arg(long, global = true)]
    players: Option<PathBuf>,

    /// Only players drafted by this team id
    #[arg(long, global = true)]
    team: Option<i64>,

    /// Only players from this draft class
    #[arg(long, global = true)]
    year: Option<i32>,

    /// Write results back to the database (default is a dry run)
    #[arg(long, global = true)]
    persist: bool,

    /// Print the JSON report instead of console lines
    #[arg(long, global = true)]
    json: bool,

    /// Also write the JSON report to this file
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Database request timeout (e.g. "30s", "2m")
    #[arg(long, global = true, value_parser = humantime::parse_duration, default_value = "30s")]
    timeout: Duration,

    /// Retries after a failed database connection
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_RETRIES)]
    retries: usize,

    #[command(subcommand)]
    command: Commands,
}

fn setup_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn exit_code(err: &ProviderError) -> i32 {
    match err {
        ProviderError::MissingCredentials(_) => EXIT_AUTH,
        ProviderError::Status { status, .. } if *status == 401 || *status == 403 => EXIT_AUTH,
        ProviderError::Connect { .. }
        | ProviderError::Request(_)
        | ProviderError::Status { .. }
        | ProviderError::Api(_)
        | ProviderError::Decode(_) => EXIT_NETWORK,
        ProviderError::Io { .. } => EXIT_IO,
        ProviderError::ReadOnly(_) => EXIT_CONFIG,
        ProviderError::Scoring(_) => EXIT_IO,
    }
}

fn fail(err: &ProviderError) -> ! {
    eprintln!("Error: {}", err);
    std::process::exit(exit_code(err));
}

async fn run<P: PlayerDataProvider>(
    provider: &P,
    config: &Config,
    kind: CalculatorKind,
    options: RunOptions,
) -> RunReport {
    match run_calculator(provider, config, kind, options).await {
        Ok(report) => report,
        Err(e) => fail(&e),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    // Install rustls crypto provider (required for rustls 0.23+)
    if rustls::crypto::ring::default_provider().install_default().is_err() {
        debug!("A rustls crypto provider was already installed");
    }

    let start_time = Instant::now();
    let kind = cli.command.kind();

    let config = match load_config(cli.config_dir.clone()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };
    debug!("Loaded configuration from {}", config.dir.display());

    if let Err(errors) = validate_config(&config.tiers, &config.scoring) {
        eprintln!("Configuration errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let options = RunOptions {
        persist: cli.persist,
        filter: PlayerFilter {
            team_id: cli.team,
            draft_year: cli.year,
        },
    };

    let report = match &cli.players {
        Some(path) => run(&FileProvider::new(path), &config, kind, options).await,
        None => {
            let client = D1Credentials::from_env()
                .and_then(|creds| D1Client::new(creds, cli.timeout, cli.retries))
                .unwrap_or_else(|e| fail(&e));
            if cli.timeout != DEFAULT_TIMEOUT {
                debug!("Database timeout set to {:?}", cli.timeout);
            }
            run(&client, &config, kind, options).await
        }
    };

    if cli.json {
        match render_json(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                error!("{:#}", e);
                std::process::exit(EXIT_IO);
            }
        }
    } else {
        println!("{}", format_report(&report, should_use_colors()));
    }

    if let Some(path) = &cli.output {
        if let Err(e) = write_report(path, &report) {
            eprintln!("Error: {:#}", e);
            std::process::exit(EXIT_IO);
        }
        debug!("Wrote report to {}", path.display());
    }

    debug!("Completed in {:?}", start_time.elapsed());
    std::process::exit(EXIT_SUCCESS);
}
