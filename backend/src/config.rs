use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Reference Task Store Service for the reminder board
#[derive(Parser, Debug, Clone)]
#[command(name = "backend")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Address to listen on
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:3000")]
    pub bind: SocketAddr,

    /// Redis connection URL
    #[arg(long, env = "REDIS_URL", default_value = "redis://127.0.0.1:6379")]
    pub redis_url: String,

    /// Keep tasks in process memory instead of Redis
    #[arg(long, env = "TASKS_IN_MEMORY")]
    pub memory: bool,

    /// Directory holding the built frontend
    #[arg(long, env = "STATIC_DIR", default_value = "frontend/dist")]
    pub static_dir: PathBuf,

    /// Log level (trace, debug, info, warn, error); RUST_LOG wins when set
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
