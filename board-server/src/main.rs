use board_server::{api, AppState, Config, Database, Result};
use clap::Parser;
use std::path::PathBuf;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Job Board Server - post-job endpoint and job listing read interface
#[derive(Parser, Debug)]
#[command(name = "board-server")]
#[command(about = "Job board submission and listing service")]
#[command(version)]
struct Cli {
    /// Configuration file path [default: ~/.jobboard/server.toml]
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listen port (overrides config file)
    #[arg(short, long)]
    port: Option<u16>,

    /// Override database path (overrides config file)
    #[arg(long)]
    database: Option<String>,

    /// Override log level (trace, debug, info, warn, error)
    #[arg(short, long)]
    log_level: Option<String>,

    /// Generate default config and exit
    #[arg(long)]
    generate_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(path) => path,
        None => Config::default_path()?,
    };
    let config_path = config_path.as_path();

    if cli.generate_config {
        Config::default().save(config_path)?;
        println!("Generated default configuration at: {}", config_path.display());
        println!("\nEdit the configuration file and then start the server with:");
        println!("  board-server --config {}", config_path.display());
        return Ok(());
    }

    let (mut config, created) = Config::load_or_init(config_path)?;
    if created {
        println!(
            "First run detected - created default configuration at: {}",
            config_path.display()
        );
    }

    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(database) = cli.database {
        config.database.path = database;
    }
    config.validate()?;

    setup_logging(&config, cli.log_level.as_deref())?;

    info!(version = env!("CARGO_PKG_VERSION"), "Starting job board server");

    let db_path = config.database_path();
    let db = Database::with_pool_size(&db_path, config.database.pool_max_size)?;

    info!("Running database migrations");
    db.migrate()?;

    let app = api::create_router(AppState::new(db));

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(address = %addr, "Job board server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Job board server shut down");

    Ok(())
}

/// Setup logging based on configuration
fn setup_logging(config: &Config, log_level_override: Option<&str>) -> Result<()> {
    let log_level = log_level_override.unwrap_or(&config.logging.level);

    let env_filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    if config.logging.format == "json" {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json())
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().pretty())
            .try_init()?;
    }

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received terminate signal");
        },
    }
}
