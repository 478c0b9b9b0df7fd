//! Core library modules for the vivarium application.
//!
//! Serves as the main entry point for all vivarium library components,
//! providing a centralized access point to the application's core
//! functionality.
//!
//! ## Features
//!
//! - **Core Infrastructure**: Configuration, data storage, messaging
//! - **Query Engine**: Shared filter predicates and pagination
//! - **Domain Models**: Subjects (mice) and experiment records
//! - **User Interface**: Console rendering and data export
//!
//! ## Usage
//!
//! ```rust,no_run
//! use vivarium::db::subjects::Subjects;
//! use vivarium::libs::subject::SubjectInput;
//! use chrono::NaiveDate;
//! use std::path::Path;
//!
//! fn main() -> anyhow::Result<()> {
//!     let input = SubjectInput {
//!         code: "M001".to_string(),
//!         strain: "C57BL/6".to_string(),
//!         gender: "F".to_string(),
//!         birth_date: NaiveDate::from_ymd_opt(2024, 1, 1),
//!         ..Default::default()
//!     };
//!     let id = Subjects::new(Path::new("vivarium.db"))?.create(&input)?;
//!     println!("created subject {}", id);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod data_storage;
pub mod error;
pub mod export;
pub mod filter;
pub mod messages;
pub mod pagination;
pub mod record;
pub mod subject;
pub mod view;
