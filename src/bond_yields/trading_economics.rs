//! Bond yields read from the tradingeconomics.com overview pages
use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;

use super::{extract_yield, visible_text, ScrapeError, YieldProvider};

/// The site refuses requests without a browser-like agent
const USER_AGENT: &str = "Mozilla/5.0";

pub struct TradingEconomics {
    client: Client,
}

impl TradingEconomics {
    pub fn new() -> Result<TradingEconomics, ScrapeError> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(TradingEconomics { client })
    }

    async fn get_page(&self, url: &str) -> Result<String, ScrapeError> {
        let resp = self.client.get(url).send().await?;
        if !resp.status().is_success() {
            return Err(ScrapeError::UnexpectedStatus(resp.status().as_u16()));
        }
        Ok(resp.text().await?)
    }
}

#[async_trait]
impl YieldProvider for TradingEconomics {
    async fn fetch_yield(&self, url: &str, name_prefix: &str) -> Result<Decimal, ScrapeError> {
        let body = self.get_page(url).await?;
        extract_yield(&visible_text(&body), name_prefix)
    }
}
