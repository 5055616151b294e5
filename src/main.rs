//! Entry point: load config, bind, connect to the database, and run the server.

use blog_api::config::{Config, DbFailurePolicy};
use blog_api::{create_app, db, ApiRoutes, AppState};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&level))?;
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    if !config.upload_dir.is_dir() {
        warn!(dir = %config.upload_dir.display(), "upload directory does not exist; uploads will fail");
    }

    let listener = tokio::net::TcpListener::bind(config.server_addr).await?;
    info!(addr = %config.server_addr, "listening");

    let db_pool = match db::connect(&config.database_url).await {
        Ok(pool) => {
            info!("database connected");
            Some(pool)
        }
        Err(e) => match config.db_failure_policy {
            DbFailurePolicy::Serve => {
                error!(error = %e, "database connection failed; serving without persistence");
                None
            }
            DbFailurePolicy::Exit => {
                error!(error = %e, "database connection failed");
                std::process::exit(1);
            }
        },
    };

    let state = AppState::new(&config, db_pool);
    info!(exempt = ?state.gate().exempt().prefixes(), "auth gate ready");
    let app = create_app(state, ApiRoutes::default());

    axum::serve(listener, app).await?;
    Ok(())
}
