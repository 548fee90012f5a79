//! Government bond yields scraped from public web pages
//!
//! There is no API behind this: the page is reduced to its visible text and
//! searched for e.g. "Germany 10Y 2.45". Any layout change on the source side
//! breaks it, hence the narrow [`YieldProvider`] seam.
use std::str::FromStr;

use async_trait::async_trait;
use log::{debug, warn};
use regex::Regex;
use rust_decimal::Decimal;
use scraper::Html;
use thiserror::Error;

use crate::config::YieldSource;

pub mod trading_economics;

/// Elements whose text content is never rendered
const HIDDEN_ELEMENTS: [&str; 4] = ["script", "style", "noscript", "template"];

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("unexpected server response (HTTP {0})")]
    UnexpectedStatus(u16),
    #[error("no yield quote found on page")]
    NotFound,
    #[error("invalid yield value '{0}'")]
    InvalidNumber(String),
    #[error("invalid search pattern")]
    Pattern(#[from] regex::Error),
}

#[async_trait]
pub trait YieldProvider: Send + Sync {
    /// Fetch the page at `url` and extract the 10 year yield following `name_prefix`
    async fn fetch_yield(&self, url: &str, name_prefix: &str) -> Result<Decimal, ScrapeError>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum YieldOutcome {
    Found(Decimal),
    NotFound,
    Failed(String),
}

/// Scrape one bond yield; failures are logged and kept in the outcome
pub async fn fetch_bond_yield(provider: &dyn YieldProvider, source: &YieldSource) -> YieldOutcome {
    match provider.fetch_yield(&source.url, source.name_prefix()).await {
        Ok(value) => {
            debug!("{}: {}%", source.name, value);
            YieldOutcome::Found(value)
        }
        Err(ScrapeError::NotFound) => {
            warn!("{}: no yield found at {}", source.name, source.url);
            YieldOutcome::NotFound
        }
        Err(e) => {
            warn!("{}: scraping {} failed: {}", source.name, source.url, e);
            YieldOutcome::Failed(e.to_string())
        }
    }
}

/// Text of all rendered text nodes, trimmed and joined by single spaces
pub fn visible_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut parts = Vec::new();
    for node in document.root_element().descendants() {
        let text = match node.value().as_text() {
            Some(text) => text.trim(),
            None => continue,
        };
        if text.is_empty() {
            continue;
        }
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .map_or(false, |e| HIDDEN_ELEMENTS.contains(&e.name()))
        });
        if !hidden {
            parts.push(text.to_string());
        }
    }
    parts.join(" ")
}

/// Find "<prefix> 10Y <number>" in plain text
pub fn extract_yield(text: &str, name_prefix: &str) -> Result<Decimal, ScrapeError> {
    let pattern = format!(r"{} 10Y\s+(\d+(?:\.\d+)?)", regex::escape(name_prefix));
    let re = Regex::new(&pattern)?;
    let value = re
        .captures(text)
        .and_then(|caps| caps.get(1))
        .ok_or(ScrapeError::NotFound)?
        .as_str();
    Decimal::from_str(value).map_err(|_| ScrapeError::InvalidNumber(value.to_string()))
}
