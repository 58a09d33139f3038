use anyhow::Context;
use clap::{Parser, Subcommand};
use lottery_match::config;
use lottery_match::engine::matchengine::{MatchCmdType, MatchEngine};
use lottery_match::server::Server;
use std::path::{Path, PathBuf};
use tokio::signal;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Runtime config file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the matching API and metrics endpoints
    Serve,
    /// Group the participants of a matching input file
    Match {
        #[arg(short, long)]
        input: PathBuf,
        #[arg(long)]
        pretty: bool,
    },
    /// Execute the run described by a run snapshot file
    Execute {
        #[arg(short, long)]
        input: PathBuf,
        #[arg(long)]
        pretty: bool,
    },
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

fn run_once(
    engine: &MatchEngine,
    cmd_type: MatchCmdType,
    input: &Path,
    pretty: bool,
) -> anyhow::Result<()> {
    let body = std::fs::read(input).with_context(|| format!("reading {}", input.display()))?;
    let reply = engine.on_request(cmd_type, &body)?;
    let out = if pretty {
        serde_json::to_string_pretty(&reply)?
    } else {
        serde_json::to_string(&reply)?
    };
    println!("{}", out);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::try_init().unwrap_or_default();
    let args = Args::parse();
    let config = config::RuntimeConfig::from_toml(&args.config);

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            let mut server = Server::builder();
            server.start().await?;
            shutdown_signal().await;
            server.stop().await;
        }
        Command::Match { input, pretty } => {
            let engine = MatchEngine::new(config.max_participants);
            run_once(&engine, MatchCmdType::CreateMatches, &input, pretty)?;
        }
        Command::Execute { input, pretty } => {
            let engine = MatchEngine::new(config.max_participants);
            run_once(&engine, MatchCmdType::ExecuteRun, &input, pretty)?;
        }
    }
    Ok(())
}
