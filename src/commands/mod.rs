//! Command-line interface definition and dispatch.
//!
//! Each subcommand lives in its own module with an `Args` struct and a
//! `cmd` function; [`Cli::menu`] parses the command line and dispatches.

pub mod export;
pub mod init;
pub mod record;
pub mod serve;
pub mod stats;
pub mod subject;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Run the HTTP server for the browser interface")]
    Serve(serve::ServeArgs),
    #[command(about = "Manage subjects (mice)")]
    Subject(subject::SubjectArgs),
    #[command(about = "Manage experiment records")]
    Record(record::RecordArgs),
    #[command(about = "Show colony statistics")]
    Stats(stats::StatsArgs),
    #[command(about = "Export records to CSV, JSON or Excel")]
    Export(export::ExportArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Serve(args) => serve::cmd(args).await,
            Commands::Subject(args) => subject::cmd(args),
            Commands::Record(args) => record::cmd(args),
            Commands::Stats(args) => stats::cmd(args),
            Commands::Export(args) => export::cmd(args),
        }
    }
}
