//! Subject management subcommands.

use crate::db::records::Records;
use crate::db::subjects::Subjects;
use crate::libs::config::Config;
use crate::libs::messages::Message;
use crate::libs::pagination::PageRequest;
use crate::libs::subject::{SubjectFilter, SubjectInput, SubjectStatus};
use crate::libs::view::View;
use crate::{msg_info, msg_print, msg_success};
use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct SubjectArgs {
    #[command(subcommand)]
    command: SubjectCommand,
}

#[derive(Debug, Subcommand)]
enum SubjectCommand {
    /// Register a new subject
    Add {
        /// Unique subject code, e.g. M001
        code: String,
        #[arg(long)]
        strain: String,
        #[arg(long)]
        gender: String,
        /// Birth date as YYYY-MM-DD
        #[arg(long)]
        birth_date: NaiveDate,
        #[arg(long)]
        source: Option<String>,
        #[arg(long)]
        cage: Option<String>,
        #[arg(long, value_enum)]
        status: Option<SubjectStatus>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// List subjects with optional filters
    List {
        /// Substring match on code, strain and cage number
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        gender: Option<String>,
        #[arg(long)]
        strain: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: i64,
        #[arg(long, default_value_t = 20)]
        limit: i64,
    },
    /// Show one subject and its records
    Show { id: i64 },
    /// Replace a subject's data (full update)
    Update {
        id: i64,
        #[arg(long)]
        code: String,
        #[arg(long)]
        strain: String,
        #[arg(long)]
        gender: String,
        #[arg(long)]
        birth_date: NaiveDate,
        #[arg(long)]
        source: Option<String>,
        #[arg(long)]
        cage: Option<String>,
        #[arg(long, value_enum)]
        status: Option<SubjectStatus>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Delete a subject and all of its records
    Delete { id: i64 },
}

pub fn cmd(args: SubjectArgs) -> Result<()> {
    let db_path = Config::read()?.db_path()?;
    match args.command {
        SubjectCommand::Add {
            code,
            strain,
            gender,
            birth_date,
            source,
            cage,
            status,
            notes,
        } => {
            let input = SubjectInput {
                code,
                strain,
                gender,
                birth_date: Some(birth_date),
                source,
                cage_number: cage,
                status,
                notes,
            };
            let id = Subjects::new(&db_path)?.create(&input)?;
            msg_success!(Message::SubjectCreated(id));
        }
        SubjectCommand::List {
            search,
            status,
            gender,
            strain,
            page,
            limit,
        } => {
            let filter = SubjectFilter { search, status, gender, strain };
            let result = Subjects::new(&db_path)?.fetch_page(&filter, PageRequest::new(Some(page), Some(limit)))?;
            if result.data.is_empty() {
                msg_info!(Message::NoSubjectsFound);
            } else {
                View::subjects(&result.data);
                msg_print!(Message::PageSummary(
                    result.pagination.page,
                    result.pagination.total_pages,
                    result.pagination.total
                ));
            }
        }
        SubjectCommand::Show { id } => {
            let subject = Subjects::new(&db_path)?.get(id)?;
            View::subjects(&[subject]);
            let records = Records::new(&db_path)?.for_subject(id)?;
            if !records.is_empty() {
                View::records(&records);
            }
        }
        SubjectCommand::Update {
            id,
            code,
            strain,
            gender,
            birth_date,
            source,
            cage,
            status,
            notes,
        } => {
            let input = SubjectInput {
                code,
                strain,
                gender,
                birth_date: Some(birth_date),
                source,
                cage_number: cage,
                status,
                notes,
            };
            Subjects::new(&db_path)?.update(id, &input)?;
            msg_success!(Message::SubjectUpdated(id));
        }
        SubjectCommand::Delete { id } => {
            Subjects::new(&db_path)?.delete(id)?;
            msg_success!(Message::SubjectDeleted(id));
        }
    }
    Ok(())
}
