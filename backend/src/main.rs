use clap::Parser;
use eyre::WrapErr;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod repository;
mod routes;

use config::Config;
use repository::{MemoryRepository, RedisRepository};
use routes::SharedRepository;

fn setup_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let config = Config::parse();
    setup_logging(&config.log_level);

    let repo: SharedRepository = if config.memory {
        info!("storing tasks in memory");
        Arc::new(MemoryRepository::default())
    } else {
        info!(redis_url = %config.redis_url, "storing tasks in redis");
        Arc::new(RedisRepository::open(&config.redis_url).wrap_err("invalid redis url")?)
    };

    let app = routes::app(repo, &config.static_dir);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .wrap_err_with(|| format!("failed to bind {}", config.bind))?;
    info!("Server running on http://{}", config.bind);
    info!(static_dir = %config.static_dir.display(), "serving frontend");
    axum::serve(listener, app).await?;

    Ok(())
}
