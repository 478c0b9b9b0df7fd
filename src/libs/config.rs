//! Application configuration management.
//!
//! Settings live in a JSON file in the platform data directory: an optional
//! database path override and the HTTP server bind address. A missing file
//! means defaults: the database in the data directory and the server on
//! `127.0.0.1:3000`. The `init` command runs an interactive setup that
//! writes this file.

use crate::db::db::DB_FILE_NAME;
use crate::libs::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::msg_error;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::PathBuf;

pub const CONFIG_FILE_NAME: &str = "config.json";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;

/// HTTP server bind address settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Database file override; the platform data directory when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server: Option<ServerConfig>,
}

impl Config {
    /// Reads the configuration file, falling back to defaults when it does
    /// not exist yet.
    pub fn read() -> Result<Self> {
        let config_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        if !config_path.exists() {
            return Ok(Config::default());
        }
        let raw = fs::read_to_string(&config_path)?;
        match serde_json::from_str(&raw) {
            Ok(config) => Ok(config),
            Err(_) => {
                msg_error!(Message::ConfigParseError);
                Ok(Config::default())
            }
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        serde_json::to_writer_pretty(File::create(config_path)?, self)?;
        Ok(())
    }

    /// Interactive setup: prompts for the database path and server address.
    pub fn init() -> Result<Self> {
        let current = Config::read()?;
        let theme = ColorfulTheme::default();

        let database: String = Input::with_theme(&theme)
            .with_prompt(Message::PromptDatabasePath.to_string())
            .allow_empty(true)
            .default(current.database.as_ref().map(|p| p.display().to_string()).unwrap_or_default())
            .interact_text()?;
        let server = current.server.unwrap_or_default();
        let host: String = Input::with_theme(&theme)
            .with_prompt(Message::PromptServerHost.to_string())
            .default(server.host)
            .interact_text()?;
        let port: u16 = Input::with_theme(&theme)
            .with_prompt(Message::PromptServerPort.to_string())
            .default(server.port)
            .interact_text()?;

        Ok(Config {
            database: if database.trim().is_empty() { None } else { Some(PathBuf::from(database.trim())) },
            server: Some(ServerConfig { host, port }),
        })
    }

    /// Resolves the database file path: the configured override or the
    /// default file in the platform data directory.
    pub fn db_path(&self) -> Result<PathBuf> {
        match &self.database {
            Some(path) => Ok(path.clone()),
            None => DataStorage::new().get_path(DB_FILE_NAME),
        }
    }

    /// Server bind address as (host, port).
    pub fn listen_addr(&self) -> (String, u16) {
        let server = self.server.clone().unwrap_or_default();
        (server.host, server.port)
    }
}
