// src/main.rs
// Oracle - spoken answers from a sarcastic (or, on request, clear) AI

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use oracle::{
    api::http_router,
    config::{EnvConfig, PersonaConfig},
    state::create_app_state,
};
use std::path::PathBuf;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "oracle")]
#[command(about = "Spoken answers from a sarcastic (or, on request, clear) AI")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    server: ServerArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server (default)
    Serve,

    /// Validate persona file and environment, then exit
    CheckConfig,
}

#[derive(Args)]
struct ServerArgs {
    /// Persona configuration file
    #[arg(long, env = "ORACLE_CONFIG", default_value = "config.json", global = true)]
    config: PathBuf,

    /// Address to bind
    #[arg(long, env = "ORACLE_HOST", default_value = "0.0.0.0", global = true)]
    host: String,

    /// Port to listen on
    #[arg(short, long, env = "ORACLE_PORT", default_value = "8000", global = true)]
    port: u16,

    /// Directory holding index.html and the UI assets
    #[arg(long, env = "ORACLE_UI_DIR", default_value = "ui", global = true)]
    ui_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "oracle=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => run_server(cli.server).await,
        Commands::CheckConfig => check_config(&cli.server),
    }
}

async fn run_server(args: ServerArgs) -> Result<()> {
    info!(
        "Container started at (UTC): {}",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S")
    );

    let persona = PersonaConfig::load(&args.config)?;
    info!(
        clarity_duration_sec = persona.clarity_duration_sec,
        tts_voice = %persona.tts_voice,
        fancy_voice = %persona.fancy_voice,
        "Persona config loaded"
    );

    let env = EnvConfig::from_env();
    let validation = env.validate();
    if !validation.is_valid() {
        // Values are re-checked per request; start anyway so /health answers
        warn!("{}", validation.report());
    }

    let app_state = create_app_state(persona, env, args.ui_dir).await;
    let app = http_router(app_state);

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Oracle listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn check_config(args: &ServerArgs) -> Result<()> {
    let mut failed = false;

    match PersonaConfig::load(&args.config) {
        Ok(persona) => println!(
            "Persona config {}: OK (clarity {}s, voices {} / {})",
            args.config.display(),
            persona.clarity_duration_sec,
            persona.tts_voice,
            persona.fancy_voice
        ),
        Err(e) => {
            println!("Persona config {}: {}", args.config.display(), e);
            failed = true;
        }
    }

    let validation = EnvConfig::from_env().validate();
    println!("{}", validation.report());
    failed |= !validation.is_valid();

    if failed {
        anyhow::bail!("configuration check failed");
    }
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down..."),
        _ = terminate => info!("Received SIGTERM, shutting down..."),
    }
}
