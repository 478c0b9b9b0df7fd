//! Experiment record subcommands.

use crate::db::records::Records;
use crate::libs::config::Config;
use crate::libs::messages::Message;
use crate::libs::pagination::PageRequest;
use crate::libs::record::{RecordFilter, RecordInput};
use crate::libs::view::View;
use crate::{msg_info, msg_print, msg_success};
use anyhow::Result;
use chrono::{NaiveDate, NaiveTime};
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct RecordArgs {
    #[command(subcommand)]
    command: RecordCommand,
}

#[derive(Debug, Subcommand)]
enum RecordCommand {
    /// Add an experiment record for a subject
    Add {
        /// Subject id the record belongs to
        #[arg(long)]
        subject: i64,
        /// Event date as YYYY-MM-DD
        #[arg(long)]
        date: NaiveDate,
        /// Record type, e.g. weighing, medication, behavior
        #[arg(long = "type")]
        kind: String,
        /// Event time as HH:MM:SS
        #[arg(long)]
        time: Option<NaiveTime>,
        /// Body weight in grams
        #[arg(long)]
        weight: Option<f64>,
        /// Body temperature in °C
        #[arg(long)]
        temperature: Option<f64>,
        #[arg(long)]
        medication: Option<String>,
        #[arg(long)]
        dosage: Option<String>,
        #[arg(long)]
        route: Option<String>,
        #[arg(long)]
        notes: Option<String>,
        #[arg(long)]
        results: Option<String>,
        #[arg(long)]
        abnormalities: Option<String>,
        #[arg(long)]
        operator: Option<String>,
    },
    /// List records with optional filters
    List {
        /// Substring match on subject code and operator
        #[arg(long)]
        search: Option<String>,
        #[arg(long = "type")]
        kind: Option<String>,
        #[arg(long)]
        subject: Option<i64>,
        #[arg(long)]
        start_date: Option<NaiveDate>,
        #[arg(long)]
        end_date: Option<NaiveDate>,
        #[arg(long, default_value_t = 1)]
        page: i64,
        #[arg(long, default_value_t = 20)]
        limit: i64,
    },
    /// Show one record
    Show { id: i64 },
    /// Delete one or more records by id
    Delete {
        #[arg(required = true)]
        ids: Vec<i64>,
    },
}

pub fn cmd(args: RecordArgs) -> Result<()> {
    let db_path = Config::read()?.db_path()?;
    match args.command {
        RecordCommand::Add {
            subject,
            date,
            kind,
            time,
            weight,
            temperature,
            medication,
            dosage,
            route,
            notes,
            results,
            abnormalities,
            operator,
        } => {
            let input = RecordInput {
                subject_id: Some(subject),
                date: Some(date),
                time,
                kind,
                weight,
                temperature,
                medications: None,
                medication,
                dosage,
                route,
                notes,
                results,
                abnormalities,
                operator,
            };
            let id = Records::new(&db_path)?.create(&input)?;
            msg_success!(Message::RecordCreated(id));
        }
        RecordCommand::List {
            search,
            kind,
            subject,
            start_date,
            end_date,
            page,
            limit,
        } => {
            let filter = RecordFilter {
                search,
                kind,
                subject_id: subject,
                start_date,
                end_date,
            };
            let result = Records::new(&db_path)?.fetch_page(&filter, PageRequest::new(Some(page), Some(limit)))?;
            if result.data.is_empty() {
                msg_info!(Message::NoRecordsFound);
            } else {
                View::records(&result.data);
                msg_print!(Message::PageSummary(
                    result.pagination.page,
                    result.pagination.total_pages,
                    result.pagination.total
                ));
            }
        }
        RecordCommand::Show { id } => {
            let record = Records::new(&db_path)?.get(id)?;
            View::records(&[record]);
        }
        RecordCommand::Delete { ids } => {
            let mut records = Records::new(&db_path)?;
            if let [id] = ids[..] {
                records.delete(id)?;
                msg_success!(Message::RecordDeleted(id));
            } else {
                let deleted = records.delete_many(&ids)?;
                msg_success!(Message::RecordsDeletedCount(deleted));
            }
        }
    }
    Ok(())
}
