use async_trait::async_trait;
use log::{debug, error};
use thiserror::Error;

use crate::config::Instrument;
use crate::date_time_helper::DateTimeError;
use crate::quote::{PriceChange, Quote};

pub mod yahoo;

/// Number of sessions needed to derive a day-over-day change
pub const SESSIONS_FOR_CHANGE: usize = 2;

#[derive(Error, Debug)]
pub enum MarketQuoteError {
    #[error("fetching quote(s) from provider failed: {0}")]
    FetchFailed(String),
    #[error("invalid quote time stamp")]
    InvalidTime(#[from] DateTimeError),
}

/// General interface for market data quotes provider
#[async_trait]
pub trait MarketQuoteProvider: Send + Sync {
    /// Human readable name of the data source, e.g. for report footers
    fn source_name(&self) -> &str;

    /// Fetch the daily closes of at most `sessions` most recent trading sessions,
    /// oldest first. Fewer (or no) quotes are not an error.
    async fn fetch_recent_closes(
        &self,
        symbol: &str,
        sessions: usize,
    ) -> Result<Vec<Quote>, MarketQuoteError>;
}

/// Result of fetching one instrument
#[derive(Debug, Clone, PartialEq)]
pub enum QuoteOutcome {
    Priced(PriceChange),
    /// Provider answered, but with fewer than two sessions
    NoData,
    FetchError(String),
}

/// Fetch the last two closes of an instrument. Never fails; errors are logged
/// and turned into an outcome so the remaining instruments are still fetched.
pub async fn fetch_instrument(
    provider: &dyn MarketQuoteProvider,
    instrument: &Instrument,
) -> QuoteOutcome {
    match provider
        .fetch_recent_closes(&instrument.symbol, SESSIONS_FOR_CHANGE)
        .await
    {
        Ok(quotes) => match PriceChange::from_quotes(&quotes) {
            Some(change) => {
                debug!(
                    "{} ({}): {} -> {}",
                    instrument.name, instrument.symbol, change.previous, change.last
                );
                QuoteOutcome::Priced(change)
            }
            None => {
                debug!(
                    "{} ({}): only {} session(s) returned",
                    instrument.name,
                    instrument.symbol,
                    quotes.len()
                );
                QuoteOutcome::NoData
            }
        },
        Err(e) => {
            error!("Error fetching {}: {}", instrument.name, e);
            QuoteOutcome::FetchError(e.to_string())
        }
    }
}

/// Keep the trailing `sessions` quotes in chronological order
pub(crate) fn last_sessions(mut quotes: Vec<Quote>, sessions: usize) -> Vec<Quote> {
    quotes.sort();
    let skip = quotes.len().saturating_sub(sessions);
    quotes.split_off(skip)
}
