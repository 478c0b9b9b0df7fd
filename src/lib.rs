//! # Vivarium - Laboratory Mouse Record Keeping
//!
//! A utility for tracking laboratory mouse colonies: subjects, their
//! experiment records, aggregate statistics and data export.
//!
//! ## Features
//!
//! - **Subject Management**: Register, update and retire mice with unique codes
//! - **Experiment Records**: Weighings, medications, observations and more,
//!   tied to their subject with cascading lifecycle
//! - **Filtered Listings**: Search, categorical filters and date ranges with
//!   consistent pagination
//! - **Statistics**: Colony overview, strain/gender distributions, monthly
//!   trends and per-subject weight series
//! - **Data Export**: CSV, JSON, and Excel formats
//! - **HTTP API**: JSON endpoints for the browser interface
//!
//! ## Usage
//!
//! ```rust,no_run
//! use vivarium::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
pub mod server;
