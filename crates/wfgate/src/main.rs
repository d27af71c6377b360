use std::io::{self, Write};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Duration;
use clap::{Args, Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::info;

use wfgate::api::{create_router, AppState};
use wfgate::auth::{AuthState, TokenCodec};
use wfgate::config::GatewayConfig;
use wfgate::dispatch::LogCollaborator;
use wfgate::users::{hash_password, InMemoryUserStore};

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "wfgate - bearer-token gateway for workflow trigger and exec dispatch.",
    propagate_version = true
)]
struct Cli {
    #[command(flatten)]
    common: CommonOpts,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Args)]
struct CommonOpts {
    /// Override the config file path
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,
    /// Reduce output to only errors
    #[arg(short, long, action = clap::ArgAction::SetTrue, global = true)]
    quiet: bool,
    /// Increase logging verbosity (stackable)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Output machine readable JSON logs
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Start the gateway server
    Serve(ServeCommand),
    /// Produce a bcrypt hash for the [[users]] table in the config file
    HashPassword(HashPasswordCommand),
}

#[derive(Debug, Args)]
struct ServeCommand {
    /// Override the configured bind host
    #[arg(long)]
    host: Option<String>,
    /// Override the configured bind port
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Debug, Args)]
struct HashPasswordCommand {
    /// Password to hash; read from stdin when omitted
    password: Option<String>,
    /// bcrypt cost factor
    #[arg(long, default_value_t = bcrypt::DEFAULT_COST)]
    cost: u32,
}

fn main() {
    if let Err(err) = try_main() {
        let _ = writeln!(io::stderr(), "{err:?}");
        std::process::exit(1);
    }
}

fn try_main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.common);

    match cli.command {
        Command::Serve(cmd) => run_serve(cli.common, cmd),
        Command::HashPassword(cmd) => handle_hash_password(cmd),
    }
}

fn init_logging(common: &CommonOpts) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let level = if common.quiet {
        "error"
    } else {
        match common.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("wfgate={level},tower_http={level}")));

    if common.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
            .ok();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .try_init()
            .ok();
    }
}

#[tokio::main]
async fn run_serve(common: CommonOpts, cmd: ServeCommand) -> Result<()> {
    let config = GatewayConfig::load(common.config.as_deref())?;

    config
        .auth
        .validate()
        .context("invalid auth configuration")?;
    let secret = config
        .auth
        .resolve_jwt_secret()?
        .context("validated configuration has a secret")?;

    if config.users.is_empty() {
        tracing::warn!("no users configured; every login and token will be rejected");
    }

    let codec = TokenCodec::new(
        &secret,
        Duration::minutes(config.auth.token_ttl_minutes),
    );
    let users = Arc::new(InMemoryUserStore::new(config.users.clone()));
    info!("loaded {} user(s) into the credential store", users.len());

    let auth = AuthState::new(Arc::new(codec), users.clone());
    let state = AppState::new(
        auth,
        users,
        Arc::new(LogCollaborator::new("wf_trigger")),
        Arc::new(LogCollaborator::new("handle")),
    );

    let app = create_router(state, &config.cors.allowed_origins);

    let host = cmd.host.unwrap_or(config.server.host);
    let port = cmd.port.unwrap_or(config.server.port);
    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .with_context(|| format!("invalid bind address {host}:{port}"))?;

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!("listening on {addr}");

    axum::serve(listener, app).await.context("serving")?;
    Ok(())
}

fn handle_hash_password(cmd: HashPasswordCommand) -> Result<()> {
    let password = match cmd.password {
        Some(password) => password,
        None => {
            let mut line = String::new();
            io::stdin()
                .read_line(&mut line)
                .context("reading password from stdin")?;
            line.trim_end_matches(['\r', '\n']).to_string()
        }
    };

    let hash = hash_password(&password, cmd.cost)?;
    println!("{hash}");
    Ok(())
}
