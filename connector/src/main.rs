// File: connector/src/main.rs
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

use asf_connector::response;
use asf_connector::{AsfConnector, ConnectorConfig, NameList};

#[derive(Parser)]
#[command(name = "asfctl", version, about = "Talk to an ArchiSteamFarm IPC server")]
struct Cli {
    /// TOML file with asf_host / asf_port / asf_password / asf_path
    #[arg(short, long, env = "ASF_CONFIG")]
    config: Option<PathBuf>,

    /// Directory for daily debug log files
    #[arg(long, default_value = "logs")]
    log_dir: PathBuf,

    /// Log to stderr only
    #[arg(long)]
    no_file_log: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Probe /HealthCheck
    Health,
    /// ASF process information
    Info,
    /// Raw bot information (all bots when no name is given)
    Bots { names: Vec<String> },
    /// One status line per bot
    Status {
        #[arg(default_value = "ASF")]
        bot: String,
    },
    Start { names: Vec<String> },
    Stop { names: Vec<String> },
    Pause { names: Vec<String> },
    Resume { names: Vec<String> },
    /// Redeem product keys on a bot
    Redeem {
        bot: String,
        #[arg(required = true)]
        keys: Vec<String>,
    },
    /// Run an ASF command through the legacy endpoint
    Command {
        #[arg(required = true, trailing_var_arg = true)]
        command: Vec<String>,
    },
    /// Fetch the ASF log file
    Log {
        /// Print how to reach the live log stream instead
        #[arg(long)]
        stream: bool,
    },
    /// Current 2FA tokens
    Twofa { names: Vec<String> },
}

fn init_logging(log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::from_default_env()
        .add_directive("asf_connector=info".parse()?)
        .add_directive("asfctl=info".parse()?)
        .add_directive("hyper=warn".parse()?)
        .add_directive("reqwest=warn".parse()?);

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(env_filter);

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
            let appender = tracing_appender::rolling::daily(dir, "asfctl.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_filter(LevelFilter::DEBUG);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .try_init()?;

    Ok(guard)
}

fn names_or_all(names: Vec<String>) -> NameList {
    if names.is_empty() {
        NameList::all_bots()
    } else {
        NameList::from(names)
    }
}

fn pretty(value: &Value) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

async fn run(command: Commands, config: &ConnectorConfig) -> Result<()> {
    let connector = AsfConnector::from_config(config)?;
    let scope = connector.open().await?;

    let output = match command {
        Commands::Health => {
            let health = scope.health();
            if !response::is_success(health) {
                bail!(
                    "ASF health check failed: {}",
                    response::message(health).unwrap_or("Unknown error")
                );
            }
            pretty(health)?
        }
        Commands::Info => pretty(&scope.asf().get_info().await?)?,
        Commands::Bots { names } => pretty(&scope.bot().get_info(names_or_all(names)).await?)?,
        Commands::Status { bot } => scope.get_bot_info(&bot).await,
        Commands::Start { names } => pretty(&scope.bot().start(names_or_all(names)).await?)?,
        Commands::Stop { names } => pretty(&scope.bot().stop(names_or_all(names)).await?)?,
        Commands::Pause { names } => pretty(&scope.bot().pause(names_or_all(names)).await?)?,
        Commands::Resume { names } => pretty(&scope.bot().resume(names_or_all(names)).await?)?,
        Commands::Redeem { bot, keys } => scope.bot_redeem(&bot, keys).await,
        Commands::Command { command } => scope.send_command(&command.join(" ")).await,
        Commands::Log { stream: true } => pretty(&scope.nlog().get_log_stream())?,
        Commands::Log { stream: false } => pretty(&scope.nlog().get_log_file().await?)?,
        Commands::Twofa { names } => pretty(&scope.twofa().get_token(names_or_all(names)).await?)?,
    };

    println!("{}", output);
    scope.close();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_dir = (!cli.no_file_log).then_some(cli.log_dir.as_path());
    let guard = init_logging(log_dir)?;

    let config = ConnectorConfig::load(cli.config.as_deref())
        .context("Failed to load ASF connector configuration")?;
    config.log_config();

    if let Err(e) = run(cli.command, &config).await {
        if config.enable_rich_traceback {
            error!("asfctl failed: {:?}", e);
            eprintln!("Error: {:?}", e);
        } else {
            error!("asfctl failed: {:#}", e);
            eprintln!("Error: {}", e);
        }
        drop(guard);
        std::process::exit(1);
    }

    info!("Done");
    Ok(())
}
