//! Export of filtered record sets to CSV, JSON and Excel files.
//!
//! The exporter receives the unpaginated, fully filtered row set from
//! [`Records::fetch_filtered`](crate::db::records::Records::fetch_filtered)
//! and renders it. Each format has a buffer renderer so the HTTP export
//! endpoints can stream the same bytes that the CLI writes to disk.

use crate::libs::messages::Message;
use crate::libs::record::{Medication, Record};
use crate::msg_success;
use anyhow::Result;
use chrono::Local;
use rust_xlsxwriter::{Format, Workbook};
use std::fs;
use std::path::PathBuf;

/// Supported export output formats.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ExportFormat {
    /// Comma-separated values for universal compatibility.
    Csv,
    /// Pretty-printed JSON preserving the full record structure.
    Json,
    /// Excel workbook with a formatted header row.
    Excel,
}

impl ExportFormat {
    fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Excel => "xlsx",
        }
    }
}

const HEADERS: [&str; 12] = [
    "Date",
    "Time",
    "Subject",
    "Strain",
    "Type",
    "Weight (g)",
    "Temperature (°C)",
    "Medications",
    "Notes",
    "Results",
    "Abnormalities",
    "Operator",
];

pub struct Exporter {
    format: ExportFormat,
    output_path: PathBuf,
}

impl Exporter {
    /// Creates an exporter writing to `output_path`, or to a timestamped
    /// default file name in the current directory.
    pub fn new(format: ExportFormat, output_path: Option<PathBuf>) -> Self {
        let output_path = output_path.unwrap_or_else(|| {
            PathBuf::from(format!("vivarium_records_{}.{}", Local::now().format("%Y%m%d_%H%M%S"), format.extension()))
        });
        Self { format, output_path }
    }

    /// Renders the rows in the configured format and writes the file.
    pub fn export(&self, records: &[Record]) -> Result<()> {
        let bytes = match self.format {
            ExportFormat::Csv => csv_bytes(records)?,
            ExportFormat::Json => json_bytes(records)?,
            ExportFormat::Excel => xlsx_bytes(records)?,
        };
        fs::write(&self.output_path, bytes)?;
        msg_success!(Message::ExportCompleted(self.output_path.display().to_string()));
        Ok(())
    }
}

/// Renders records as a CSV table.
pub fn csv_bytes(records: &[Record]) -> Result<Vec<u8>> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(HEADERS)?;
    for record in records {
        wtr.write_record(&[
            record.date.format("%Y-%m-%d").to_string(),
            record.time.map(|t| t.format("%H:%M").to_string()).unwrap_or_default(),
            record.subject_code.clone().unwrap_or_default(),
            record.strain.clone().unwrap_or_default(),
            record.kind.clone(),
            record.weight.map(|w| w.to_string()).unwrap_or_default(),
            record.temperature.map(|t| t.to_string()).unwrap_or_default(),
            format_medications(&record.medications),
            record.notes.clone().unwrap_or_default(),
            record.results.clone().unwrap_or_default(),
            record.abnormalities.clone().unwrap_or_default(),
            record.operator.clone().unwrap_or_default(),
        ])?;
    }
    wtr.flush()?;
    wtr.into_inner().map_err(|err| anyhow::anyhow!(err.to_string()))
}

/// Renders records as pretty-printed JSON.
pub fn json_bytes(records: &[Record]) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(records)?)
}

/// Renders records as an Excel workbook.
pub fn xlsx_bytes(records: &[Record]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    let header_format = Format::new().set_bold().set_background_color(rust_xlsxwriter::Color::Gray);
    for (col, header) in HEADERS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    for (i, record) in records.iter().enumerate() {
        let row = i as u32 + 1;
        worksheet.write_string(row, 0, record.date.format("%Y-%m-%d").to_string())?;
        worksheet.write_string(row, 1, record.time.map(|t| t.format("%H:%M").to_string()).unwrap_or_default())?;
        worksheet.write_string(row, 2, record.subject_code.clone().unwrap_or_default())?;
        worksheet.write_string(row, 3, record.strain.clone().unwrap_or_default())?;
        worksheet.write_string(row, 4, &record.kind)?;
        if let Some(weight) = record.weight {
            worksheet.write_number(row, 5, weight)?;
        }
        if let Some(temperature) = record.temperature {
            worksheet.write_number(row, 6, temperature)?;
        }
        worksheet.write_string(row, 7, format_medications(&record.medications))?;
        worksheet.write_string(row, 8, record.notes.clone().unwrap_or_default())?;
        worksheet.write_string(row, 9, record.results.clone().unwrap_or_default())?;
        worksheet.write_string(row, 10, record.abnormalities.clone().unwrap_or_default())?;
        worksheet.write_string(row, 11, record.operator.clone().unwrap_or_default())?;
    }

    worksheet.autofit();
    Ok(workbook.save_to_buffer()?)
}

/// Flattens a medication list into one display cell:
/// `name dosage (route); ...`
pub fn format_medications(medications: &[Medication]) -> String {
    medications
        .iter()
        .map(|m| {
            let mut entry = m.name.clone();
            if let Some(dosage) = &m.dosage {
                entry.push(' ');
                entry.push_str(dosage);
            }
            if let Some(route) = &m.route {
                entry.push_str(&format!(" ({})", route));
            }
            entry
        })
        .collect::<Vec<_>>()
        .join("; ")
}
