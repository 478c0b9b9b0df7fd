use tracing_subscriber::EnvFilter;
use vivarium::commands::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Structured logging is active only when explicitly requested; the
    // msg_* macros print plain console output otherwise.
    if std::env::var("RUST_LOG").is_ok() || std::env::var("VIVARIUM_DEBUG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
            .init();
    }
    Cli::menu().await
}
