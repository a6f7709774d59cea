use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tandem_server::{AppState, RelayConfig, serve};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tandem")]
#[command(bin_name = "tandem")]
#[command(version, about = "Pairs two browsers by URL path and relays files between them")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the relay server.
    Serve(ServeArgs),
}

#[derive(clap::Args, Debug)]
struct ServeArgs {
    #[arg(long, env = "TANDEM_HOST", default_value = "0.0.0.0")]
    host: String,

    #[arg(short, long, env = "PORT", default_value_t = 8080)]
    port: u16,

    /// Only accept WebSocket upgrades carrying this Origin header.
    #[arg(long, env = "ALLOWED_ORIGIN")]
    allowed_origin: Option<String>,

    /// Largest accepted message (and so file) in bytes.
    #[arg(long, env = "TANDEM_MAX_MESSAGE_SIZE")]
    max_message_size: Option<usize>,

    /// Frames buffered per connection before the drop policy applies.
    #[arg(long, env = "TANDEM_OUTBOUND_CAPACITY")]
    outbound_capacity: Option<usize>,

    /// Directory with `index.html` and `static/`, served at `/<room>`.
    #[arg(long, env = "TANDEM_WEB_ROOT")]
    web_root: Option<PathBuf>,

    /// Used when RUST_LOG is not set.
    #[arg(long, env = "TANDEM_LOG_LEVEL", default_value = "info")]
    log_level: String,
}

impl ServeArgs {
    fn relay_config(&self) -> RelayConfig {
        let defaults = RelayConfig::default();
        RelayConfig {
            outbound_capacity: self.outbound_capacity.unwrap_or(defaults.outbound_capacity),
            max_message_size: self.max_message_size.unwrap_or(defaults.max_message_size),
            allowed_origin: self.allowed_origin.clone(),
            web_root: self.web_root.clone(),
            ..defaults
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let Cli { command } = Cli::parse();

    match command {
        Commands::Serve(args) => run_serve(args).await,
    }
}

async fn run_serve(args: ServeArgs) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .with_context(|| format!("Invalid listen address {}:{}", args.host, args.port))?;
    let config = args.relay_config();

    println!("{}", "Starting Tandem relay...".green().bold());
    if let Some(root) = &config.web_root {
        println!("   Rooms:  http://{}/<room> from {}", addr, root.display());
    }
    println!("   Relay:  ws://{}/ws/<room>", addr);
    if let Some(origin) = &config.allowed_origin {
        println!("   Origin: {}", origin.cyan());
    }

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    serve(listener, Arc::new(AppState::new(config))).await
}
