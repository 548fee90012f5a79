//! Fetch, render and mail the daily market report, once.
//!
//! Exit status: 0 sent, 1 sending failed, 2 invalid configuration,
//! 3 a data source client could not be set up.
use std::process::ExitCode;

use log::{error, info, LevelFilter};
use thiserror::Error;

use market_report::bond_yields::{trading_economics::TradingEconomics, ScrapeError};
use market_report::config::{self, ConfigError, MailConfig, ReportConfig};
use market_report::date_time_helper::{report_date, report_now};
use market_report::html::render_report;
use market_report::mailer::{send_report, MailError, SmtpMailer};
use market_report::market_quotes::{yahoo::Yahoo, MarketQuoteError};
use market_report::report::assemble_report;

#[derive(Error, Debug)]
enum RunError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("market data client setup failed: {0}")]
    Quotes(#[from] MarketQuoteError),
    #[error("web client setup failed: {0}")]
    Scraper(#[from] ScrapeError),
    #[error("Error sending email: {0}")]
    Mail(#[from] MailError),
}

impl RunError {
    fn exit_code(&self) -> ExitCode {
        match self {
            RunError::Mail(_) => ExitCode::from(1),
            RunError::Config(_) => ExitCode::from(2),
            RunError::Quotes(_) | RunError::Scraper(_) => ExitCode::from(3),
        }
    }
}

fn init_logger() {
    let mut builder = pretty_env_logger::formatted_builder();
    builder.filter_level(LevelFilter::Info).parse_env("RUST_LOG");
    builder.init();
}

async fn run() -> Result<(), RunError> {
    let report_config = ReportConfig::from_lookup(|key| std::env::var(key).ok())?;
    let mail_config = MailConfig::from_env()?;
    let mailer = SmtpMailer::new(&mail_config)?;

    let quotes = Yahoo::new()?;
    let yields = TradingEconomics::new()?;
    let report = assemble_report(&report_config, &quotes, &yields).await;

    let now = report_now();
    let html = render_report(&report, &now);
    send_report(&mailer, &mail_config, report_date(&now), &html).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    config::load_dotenv();
    init_logger();

    match run().await {
        Ok(()) => {
            info!("Email sent successfully!");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            e.exit_code()
        }
    }
}
