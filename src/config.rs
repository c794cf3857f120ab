use serde::{Deserialize, Deserializer};
use std::collections::{HashMap, HashSet};
use std::env;
use std::path::Path;
use std::time::Duration;

use crate::error::{Error, Result};

pub const DEFAULT_API_URL: &str = "https://api.monday.com/v2";
pub const DEFAULT_API_VERSION: &str = "2024-10";
pub const DEFAULT_PAGE_SIZE: u32 = 500;
/// Largest `items_page` limit the board API accepts.
pub const MAX_PAGE_SIZE: u32 = 500;
pub const DEFAULT_MAX_ITEMS: usize = 10_000;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Runtime settings taken from the process environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_token: String,
    pub api_url: String,
    pub api_version: String,
    pub request_timeout: Duration,
    pub page_size: u32,
    pub max_items: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the settings from any key lookup, so callers can supply values
    /// without touching the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_token = get("MONDAY_API_TOKEN").ok_or_else(|| {
            Error::Auth("MONDAY_API_TOKEN environment variable not set".to_string())
        })?;

        let api_url = get("MONDAY_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_version =
            get("MONDAY_API_VERSION").unwrap_or_else(|| DEFAULT_API_VERSION.to_string());

        let request_timeout = Duration::from_secs(parse_var(
            "REQUEST_TIMEOUT_SECS",
            get("REQUEST_TIMEOUT_SECS"),
            DEFAULT_REQUEST_TIMEOUT_SECS,
        )?);
        let page_size = parse_var("PAGE_SIZE", get("PAGE_SIZE"), DEFAULT_PAGE_SIZE)?;
        let max_items = parse_var("MAX_ITEMS", get("MAX_ITEMS"), DEFAULT_MAX_ITEMS)?;

        let config = Self {
            api_token,
            api_url,
            api_version,
            request_timeout,
            page_size,
            max_items,
        };
        config.validate()?;
        Ok(config)
    }

    /// Re-run after command-line overrides are applied.
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(Error::Config(format!(
                "page size must be between 1 and {}, got {}",
                MAX_PAGE_SIZE, self.page_size
            )));
        }
        if self.max_items == 0 {
            return Err(Error::Config("max items must be greater than zero".to_string()));
        }
        Ok(())
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, value: Option<String>, default: T) -> Result<T> {
    match value {
        Some(raw) => raw.parse().map_err(|_| {
            Error::Config(format!("{} must be a non-negative integer, got '{}'", key, raw))
        }),
        None => Ok(default),
    }
}

/// The board configuration document (`config.json`).
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    pub boards: Vec<BoardConfig>,
    pub geo_group_mapping: HashMap<String, String>,
    #[serde(default)]
    pub ignored_groups: HashSet<String>,
    pub status_mapping: StatusMapping,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BoardConfig {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub status_column_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatusMapping {
    pub learning: Vec<String>,
    pub waiting: Vec<String>,
}

impl ReportConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Cannot read config file {}: {}", path.display(), e))
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let config: ReportConfig = serde_json::from_str(raw).map_err(Error::ConfigParse)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let board = self
            .boards
            .first()
            .ok_or_else(|| Error::Config("boards[0] is missing".to_string()))?;

        if board.id.trim().is_empty() {
            return Err(Error::Config("boards[0].id is empty".to_string()));
        }
        if board.status_column_id.trim().is_empty() {
            return Err(Error::Config("boards[0].status_column_id is empty".to_string()));
        }
        if self.boards.len() > 1 {
            tracing::debug!(
                "Config lists {} boards, only boards[0] is reported",
                self.boards.len()
            );
        }

        Ok(())
    }

    /// The board the report is built from. `validate` guarantees it exists.
    pub fn board(&self) -> &BoardConfig {
        &self.boards[0]
    }
}

fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(u64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    })
}

/// What a single pipeline run needs to know about the upstream board.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub board_id: String,
    pub status_column_id: String,
    pub page_size: u32,
    pub max_items: usize,
}

impl PipelineConfig {
    pub fn new(report: &ReportConfig, config: &Config) -> Self {
        let board = report.board();
        Self {
            board_id: board.id.clone(),
            status_column_id: board.status_column_id.clone(),
            page_size: config.page_size,
            max_items: config.max_items,
        }
    }
}
