// Imperium Autonomous Fleet Agent - Main Entry Point

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use imperium_cc::{
    verbosity, Admiral, ConfigManager, CycleOutcome, ImperiumClient, SystemClock, TokenStore, AGENT_TOKEN_FILE,
    DEFAULT_CONFIG_PATH,
};
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(name = "imperium_cc", about = "Autonomous fleet agent for the Imperium game")]
struct Args {
    /// Path to the TOML configuration, created with defaults if missing
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    /// File holding the bearer token; re-read whenever the token expires
    #[arg(long, default_value = AGENT_TOKEN_FILE)]
    token_file: String,

    /// Increase log detail (-v decisions, -vv every API call)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Run a single iteration and exit
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    verbosity::init_logging(args.verbose);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "fleet agent stopped");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    info!("Imperium fleet agent starting");

    let mut config_manager = ConfigManager::new(&args.config)?;
    let tokens = TokenStore::from_file(&args.token_file)?;
    let client = ImperiumClient::new(config_manager.config(), tokens)?;

    let mut admiral = Admiral::new(
        Arc::new(client),
        Arc::new(SystemClock),
        config_manager.config().clone(),
    );

    if args.once {
        match admiral.run_cycle().await? {
            CycleOutcome::Dispatched(report) => {
                for (fleet_id, action) in &report {
                    info!(fleet = %fleet_id, %action, "order");
                }
            }
            CycleOutcome::Idle { wait } => {
                info!(seconds = wait.as_secs(), "no fleet available, next wake computed");
            }
        }
        return Ok(());
    }

    info!("starting continuous operations, press Ctrl+C to stop");
    tokio::select! {
        result = admiral.run_continuous(&mut config_manager) => result?,
        _ = tokio::signal::ctrl_c() => info!("shutdown requested"),
    }
    Ok(())
}
