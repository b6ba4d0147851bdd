//! pushup-server: HTTP front end for the push-up tracker.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use pushup_core::storage::data_dir;
use pushup_core::{Config, Database, Tracker};
use pushup_server::{create_router, AppState, Credentials};
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "pushup-server", version)]
#[command(about = "HTTP API for the push-up tracker")]
struct Cli {
    /// Data directory holding config.toml and the record database
    #[arg(long, env = "PUSHUP_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Directory served under /static
    #[arg(long, default_value = "static")]
    static_dir: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if dotenvy::dotenv().is_err() {
        // Logging is not up yet; mirror the startup notice on stderr.
        eprintln!("No .env file found, using environment variables or defaults");
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("pushup_server=info".parse()?)
                .add_directive("pushup_core=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    let dir = match cli.data_dir {
        Some(dir) => {
            std::fs::create_dir_all(&dir)?;
            dir
        }
        None => data_dir()?,
    };
    let mut config = Config::load_from(&dir)?;
    config.apply_env_overrides();

    let db_path = config.database_path(&dir);
    info!(path = %db_path.display(), "opening record store");
    let tracker = Tracker::new(Database::open_at(&db_path)?);

    match tracker.ensure_today() {
        Ok(record) => info!(date = %record.date, count = record.target, "today initialized"),
        Err(e) => {
            error!(error = %e, "failed to initialize today's record; serving in degraded mode")
        }
    }

    if config.server.username == "admin" && config.server.password == "admin" {
        warn!("using default credentials; set USERNAME and PASSWORD");
    }

    let state = AppState::new(
        tracker,
        Credentials {
            username: config.server.username.clone(),
            password: config.server.password.clone(),
        },
    );
    let app = create_router(state, cli.static_dir);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server starting on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutting down");
        })
        .await?;

    Ok(())
}
