//! Colony statistics display.

use crate::db::stats::Stats;
use crate::db::subjects::Subjects;
use crate::libs::config::Config;
use crate::libs::messages::Message;
use crate::libs::view::View;
use crate::{msg_info, msg_print};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct StatsArgs {
    /// Show the weight history for one subject id instead of the overview
    #[arg(long)]
    subject: Option<i64>,
}

pub fn cmd(args: StatsArgs) -> Result<()> {
    let db_path = Config::read()?.db_path()?;
    let mut stats = Stats::new(&db_path)?;

    if let Some(id) = args.subject {
        let subject = Subjects::new(&db_path)?.get(id)?;
        let points = stats.weight_history(id)?;
        msg_print!(Message::WeightHistoryHeader(subject.code), true);
        if points.is_empty() {
            msg_info!(Message::NoWeightRecords);
        } else {
            View::weights(&points);
        }
        return Ok(());
    }

    msg_print!(Message::OverviewHeader, true);
    View::overview(&stats.overview()?);
    msg_print!(Message::StrainDistributionHeader, true);
    View::distribution(&stats.strain_distribution()?);
    msg_print!(Message::GenderDistributionHeader, true);
    View::distribution(&stats.gender_distribution()?);
    msg_print!(Message::RecordTypeHeader, true);
    View::kinds(&stats.kind_distribution()?);
    msg_print!(Message::MonthlyTrendHeader, true);
    View::trend(&stats.monthly_trend()?);
    Ok(())
}
