//! filedock - sandboxed file operations server
//!
//! Serves list/read/write/create/delete/search tools over WebSocket, with
//! every path confined to a single storage root.

mod filesystem;
mod format;
mod protocol;
mod server;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use filesystem::config::StorageConfig;
use filesystem::FileSystemService;

#[derive(Parser, Debug)]
#[command(name = "filedock", version, about = "Sandboxed file operations server")]
struct Args {
    /// Listening port
    #[arg(short, long, env = "FILEDOCK_PORT", default_value_t = server::DEFAULT_PORT)]
    port: u16,

    /// Storage root directory (created if absent; defaults to
    /// ~/filedock-storage)
    #[arg(short, long, env = "FILEDOCK_ROOT")]
    root: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let config = match args.root {
        Some(root) if root.is_absolute() => StorageConfig::new(root),
        Some(root) => StorageConfig::new(std::env::current_dir()?.join(root)),
        None => StorageConfig::default(),
    };
    config.ensure_root()?;

    let service = Arc::new(FileSystemService::new(config));
    server::run(args.port, service).await
}
