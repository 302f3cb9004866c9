use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;

use concierge_core::Agent;
use concierge_core::store::AgentStore;
use concierge_gateway::{AskResponse, CorsPolicy, GatewayServer};
use config::ConciergeConfig;

#[derive(Parser)]
#[command(name = "concierge")]
#[command(version)]
#[command(about = "Agent management API with a keyword-routed hotel Q&A bot")]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the agent API server
    Start,

    /// Stop a running server
    Stop,

    /// Initialize config directory and default config
    Init,

    /// Show current configuration
    Config,

    /// List agents on a running server
    List,

    /// Ask an agent a question on a running server
    Ask {
        /// Agent id to ask
        id: String,

        /// The question to ask
        question: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Init => cmd_init().await,
        Commands::Config => cmd_config(&cli.config).await,
        Commands::Start => cmd_start(&cli.config).await,
        Commands::Stop => cmd_stop().await,
        Commands::List => cmd_list(&cli.config).await,
        Commands::Ask { id, question } => cmd_ask(&cli.config, &id, &question).await,
    }
}

async fn cmd_init() -> Result<()> {
    let config_dir = config::config_dir();
    tokio::fs::create_dir_all(&config_dir)
        .await
        .with_context(|| format!("Failed to create config dir: {}", config_dir.display()))?;

    let config_path = config_dir.join("config.toml");
    if config_path.exists() {
        warn!("Config already exists at {}", config_path.display());
    } else {
        let default_config = include_str!("../../../config/default.toml");
        tokio::fs::write(&config_path, default_config).await?;
        info!("Created default config at {}", config_path.display());
    }

    println!("Concierge initialized at {}", config_dir.display());
    println!(
        "Edit {} to adjust the bind address, store path, and CORS mode.",
        config_path.display()
    );
    Ok(())
}

async fn cmd_config(config_path: &Option<PathBuf>) -> Result<()> {
    let cfg = ConciergeConfig::load(config_path)?;
    println!("{}", toml::to_string_pretty(&cfg)?);
    Ok(())
}

async fn cmd_start(config_path: &Option<PathBuf>) -> Result<()> {
    let cfg = ConciergeConfig::load(config_path)?;
    info!("Starting agent API server...");

    let store_path = shellexpand(&cfg.store.path);
    let store = AgentStore::open(store_path).await?;

    if cfg.store.seed_hotel_agent {
        let bot = store.ensure_hotel_agent().await?;
        info!("Hotel Q&A agent ready (id {})", bot.id);
    }

    let cors = match cfg.cors.mode.as_str() {
        "permissive" => CorsPolicy::Permissive,
        "strict" => CorsPolicy::strict(&cfg.cors.allowed_origin)?,
        other => anyhow::bail!(
            "Unknown cors.mode '{}' (expected 'permissive' or 'strict')",
            other
        ),
    };

    let bind: SocketAddr = format!("{}:{}", cfg.server.bind, cfg.server.port)
        .parse()
        .with_context(|| {
            format!(
                "Invalid bind address {}:{}",
                cfg.server.bind, cfg.server.port
            )
        })?;

    println!("Concierge is running on http://{}. Press Ctrl+C to stop.", bind);
    GatewayServer::new(bind, store, cors).run().await?;

    println!("Concierge stopped.");
    Ok(())
}

async fn cmd_stop() -> Result<()> {
    #[cfg(target_os = "windows")]
    let output = tokio::process::Command::new("taskkill")
        .args(["/IM", "concierge.exe", "/F"])
        .output()
        .await?;

    #[cfg(not(target_os = "windows"))]
    let output = tokio::process::Command::new("pkill")
        .args(["-f", "concierge start"])
        .output()
        .await?;

    if output.status.success() {
        println!("Concierge server stopped.");
    } else {
        println!("No running concierge server found.");
    }
    Ok(())
}

async fn cmd_list(config_path: &Option<PathBuf>) -> Result<()> {
    let cfg = ConciergeConfig::load(config_path)?;
    let url = format!("{}/api/agents", server_url(&cfg));

    let agents: Vec<Agent> = reqwest::get(&url)
        .await
        .with_context(|| format!("Failed to reach the server at {}. Is it running?", url))?
        .error_for_status()?
        .json()
        .await?;

    if agents.is_empty() {
        println!("No agents registered.");
        return Ok(());
    }

    for agent in agents {
        println!(
            "{:>4}  {:<9} {:<8}  {}",
            agent.id,
            agent.category.as_str(),
            agent.status.as_str(),
            agent.name
        );
    }
    Ok(())
}

async fn cmd_ask(config_path: &Option<PathBuf>, id: &str, question: &str) -> Result<()> {
    let cfg = ConciergeConfig::load(config_path)?;
    let url = format!("{}/api/agents/{}/ask", server_url(&cfg), id);

    let client = reqwest::Client::new();
    let resp = client
        .post(&url)
        .json(&serde_json::json!({ "question": question }))
        .send()
        .await
        .with_context(|| format!("Failed to reach the server at {}. Is it running?", url))?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body: serde_json::Value = resp.json().await.unwrap_or_default();
        let message = body
            .get("error")
            .and_then(|v| v.as_str())
            .unwrap_or("request failed");
        anyhow::bail!("Server returned {}: {}", status, message);
    }

    let answer: AskResponse = resp.json().await?;
    println!("{}", answer.answer);
    Ok(())
}

/// Base URL of the configured server, from the client's point of view.
fn server_url(cfg: &ConciergeConfig) -> String {
    let host = if cfg.server.bind == "0.0.0.0" {
        "127.0.0.1"
    } else {
        cfg.server.bind.as_str()
    };
    format!("http://{}:{}", host, cfg.server.port)
}

// Utility: expand ~ in paths
fn shellexpand(s: &str) -> PathBuf {
    let mut result = s.to_string();
    if result.starts_with("~/") {
        if let Some(home) = dirs::home_dir() {
            result = format!("{}{}", home.display(), &result[1..]);
        }
    }
    PathBuf::from(result)
}
