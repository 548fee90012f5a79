//! Run configuration: tracked instruments, bond yield sources and mail settings
//!
//! Instruments and yield sources default to a compiled-in list and may be
//! replaced by a JSON file. Mail credentials and recipients are only ever
//! taken from the environment (optionally seeded from a `.env` file).
use std::path::Path;
use std::{env, fs};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const ENV_SMTP_USER: &str = "MARKET_REPORT_SMTP_USER";
pub const ENV_SMTP_PASSWORD: &str = "MARKET_REPORT_SMTP_PASSWORD";
pub const ENV_SMTP_HOST: &str = "MARKET_REPORT_SMTP_HOST";
pub const ENV_SMTP_PORT: &str = "MARKET_REPORT_SMTP_PORT";
pub const ENV_TO: &str = "MARKET_REPORT_TO";
pub const ENV_BCC: &str = "MARKET_REPORT_BCC";
pub const ENV_INSTRUMENTS: &str = "MARKET_REPORT_INSTRUMENTS";

pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Environment variable {0} is not set")]
    MissingVar(&'static str),
    #[error("Environment variable {name} is invalid: {reason}")]
    InvalidVar { name: &'static str, reason: String },
    #[error("Failed to read instrument file")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse instrument file: {0}")]
    Json(#[from] serde_json::Error),
}

/// A tradable symbol tracked by the report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
    /// Display name, also drives number formatting
    pub name: String,
    /// Ticker symbol at the market data provider
    pub symbol: String,
}

impl Instrument {
    pub fn new(name: &str, symbol: &str) -> Self {
        Instrument {
            name: name.to_string(),
            symbol: symbol.to_string(),
        }
    }
}

/// Web page from which a bond yield is scraped
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YieldSource {
    pub name: String,
    pub url: String,
}

impl YieldSource {
    pub fn new(name: &str, url: &str) -> Self {
        YieldSource {
            name: name.to_string(),
            url: url.to_string(),
        }
    }

    /// First word of the display name, as it appears in front of "10Y" on the page
    pub fn name_prefix(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or("")
    }
}

/// What goes into the report, in row order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    pub instruments: Vec<Instrument>,
    pub yield_sources: Vec<YieldSource>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            instruments: vec![
                Instrument::new("Nikkei 225", "^N225"),
                Instrument::new("Hang Seng", "^HSI"),
                Instrument::new("SSE Composite", "000001.SS"),
                Instrument::new("FTSE 100", "^FTSE"),
                Instrument::new("DAX Index", "^GDAXI"),
                Instrument::new("S&P 500 (prior day)", "^GSPC"),
                Instrument::new("Dow Jones (prior day)", "^DJI"),
                Instrument::new("Nasdaq Composite (prior day)", "^IXIC"),
                Instrument::new("USD/JPY (Yen)", "JPY=X"),
                Instrument::new("EUR/USD (Euro)", "EURUSD=X"),
                Instrument::new("GBP/USD (Pound)", "GBPUSD=X"),
                Instrument::new("Crude Oil (WTI)", "WTI"),
                Instrument::new("S&P Futures", "ES=F"),
                Instrument::new("Dow Jones Futures", "YM=F"),
                Instrument::new("Nasdaq Futures", "NQ=F"),
                Instrument::new("Gold Futures", "GC=F"),
            ],
            yield_sources: vec![
                YieldSource::new(
                    "UK 10Y Gilt Yield",
                    "https://tradingeconomics.com/united-kingdom/government-bond-yield",
                ),
                YieldSource::new(
                    "Germany 10Y Bond Yield",
                    "https://tradingeconomics.com/germany/government-bond-yield",
                ),
            ],
        }
    }
}

impl ReportConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Use the file named by the lookup, or fall back to the compiled-in lists
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        match lookup(ENV_INSTRUMENTS).filter(|v| !v.trim().is_empty()) {
            Some(path) => Self::from_file(Path::new(path.trim())),
            None => Ok(Self::default()),
        }
    }

    /// Number of rows a report built from this configuration will contain
    pub fn row_count(&self) -> usize {
        self.instruments.len() + self.yield_sources.len()
    }
}

/// SMTP account and distribution list
#[derive(Clone, PartialEq)]
pub struct MailConfig {
    pub smtp_host: String,
    pub smtp_port: Option<u16>,
    /// Login name, also used as sender address
    pub username: String,
    pub password: String,
    pub to: Vec<String>,
    pub bcc: Option<String>,
}

impl std::fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailConfig")
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("username", &self.username)
            .field("password", &"***")
            .field("to", &self.to)
            .field("bcc", &self.bcc)
            .finish()
    }
}

impl MailConfig {
    /// Build mail settings from a variable lookup, e.g. `|k| env::var(k).ok()`
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::MissingVar(name))
        };
        let optional = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let to: Vec<String> = required(ENV_TO)?
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        if to.is_empty() {
            return Err(ConfigError::InvalidVar {
                name: ENV_TO,
                reason: "no recipient given".to_string(),
            });
        }

        let smtp_port = match optional(ENV_SMTP_PORT) {
            Some(port) => Some(port.trim().parse::<u16>().map_err(|e| {
                ConfigError::InvalidVar {
                    name: ENV_SMTP_PORT,
                    reason: e.to_string(),
                }
            })?),
            None => None,
        };

        Ok(MailConfig {
            smtp_host: optional(ENV_SMTP_HOST).unwrap_or_else(|| DEFAULT_SMTP_HOST.to_string()),
            smtp_port,
            username: required(ENV_SMTP_USER)?,
            password: required(ENV_SMTP_PASSWORD)?,
            to,
            bcc: optional(ENV_BCC).map(|s| s.trim().to_string()),
        })
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }
}

/// Seed the process environment from `.env`, if there is one
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => log::debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => log::warn!("Ignoring unreadable .env file: {}", e),
    }
}
