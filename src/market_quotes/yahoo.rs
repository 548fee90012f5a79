use async_trait::async_trait;
use yahoo_finance_api as yahoo;

use super::{last_sessions, MarketQuoteError, MarketQuoteProvider};
use crate::date_time_helper::unix_to_date_time;
use crate::quote::Quote;

/// Daily candles, queried over a range wide enough to span a long weekend
const INTERVAL: &str = "1d";
const RANGE: &str = "5d";

pub struct Yahoo {
    connector: yahoo::YahooConnector,
}

impl Yahoo {
    pub fn new() -> Result<Yahoo, MarketQuoteError> {
        let connector = yahoo::YahooConnector::new()
            .map_err(|e| MarketQuoteError::FetchFailed(e.to_string()))?;
        Ok(Yahoo { connector })
    }
}

#[async_trait]
impl MarketQuoteProvider for Yahoo {
    fn source_name(&self) -> &str {
        "Yahoo Finance"
    }

    async fn fetch_recent_closes(
        &self,
        symbol: &str,
        sessions: usize,
    ) -> Result<Vec<Quote>, MarketQuoteError> {
        let response = self
            .connector
            .get_quote_range(symbol, INTERVAL, RANGE)
            .await
            .map_err(|e| MarketQuoteError::FetchFailed(e.to_string()))?;
        let yahoo_quotes = match response.quotes() {
            Ok(quotes) => quotes,
            Err(yahoo::YahooError::EmptyDataSet) => Vec::new(),
            Err(e) => return Err(MarketQuoteError::FetchFailed(e.to_string())),
        };
        let mut quotes = Vec::with_capacity(yahoo_quotes.len());
        for quote in &yahoo_quotes {
            quotes.push(Quote {
                time: unix_to_date_time(quote.timestamp as i64)?,
                close: quote.close,
            });
        }
        Ok(last_sessions(quotes, sessions))
    }
}
