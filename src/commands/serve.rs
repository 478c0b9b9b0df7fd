use crate::libs::config::Config;
use crate::server;
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Bind host (overrides configuration)
    #[arg(long)]
    host: Option<String>,

    /// Bind port (overrides configuration)
    #[arg(long)]
    port: Option<u16>,
}

/// Starts the HTTP server and blocks until the process is stopped.
pub async fn cmd(args: ServeArgs) -> Result<()> {
    let config = Config::read()?;
    let db_path = config.db_path()?;
    let (host, port) = config.listen_addr();
    server::run(db_path, &args.host.unwrap_or(host), args.port.unwrap_or(port)).await
}
