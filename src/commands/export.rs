//! Data export command for external analysis and backup.
//!
//! Fetches the unpaginated row set matching the given filter and writes it
//! in the selected format:
//!
//! - **CSV**: flat table for spreadsheet applications
//! - **JSON**: full record structure for programmatic processing
//! - **Excel**: formatted workbook

use crate::db::records::Records;
use crate::libs::config::Config;
use crate::libs::export::{ExportFormat, Exporter};
use crate::libs::messages::Message;
use crate::libs::record::ExportFilter;
use crate::{msg_info, msg_warning};
use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Output format for the exported data
    #[arg(short, long, value_enum, default_value = "csv")]
    format: ExportFormat,

    /// Output file path (a timestamped name in the current directory when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Include records dated on or after this date (YYYY-MM-DD)
    #[arg(long)]
    start_date: Option<NaiveDate>,

    /// Include records dated on or before this date (YYYY-MM-DD)
    #[arg(long)]
    end_date: Option<NaiveDate>,

    /// Restrict to these subject ids (repeatable)
    #[arg(long = "subject")]
    subjects: Vec<i64>,

    /// Restrict to these record types (repeatable)
    #[arg(long = "type")]
    kinds: Vec<String>,
}

pub fn cmd(args: ExportArgs) -> Result<()> {
    let db_path = Config::read()?.db_path()?;
    let filter = ExportFilter {
        start_date: args.start_date,
        end_date: args.end_date,
        subject_ids: args.subjects,
        kinds: args.kinds,
    };
    let records = Records::new(&db_path)?.fetch_filtered(&filter)?;
    if records.is_empty() {
        msg_warning!(Message::NoRecordsToExport);
        return Ok(());
    }
    msg_info!(Message::ExportingRecords(records.len()));
    Exporter::new(args.format, args.output).export(&records)
}
