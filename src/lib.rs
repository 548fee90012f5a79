//! # market_report
//!
//! Builds a daily market summary and sends it by email. Closing prices of a
//! configured list of indices, currency pairs and futures are fetched from a
//! market data provider, two 10 year government bond yields are scraped from
//! public web pages, and the resulting table is rendered as an HTML document.
//!
//! A failing instrument or yield source never stops the report; its row shows
//! a placeholder ("Error", "No Data", "Not found", ...) instead.

// macro exports
#[macro_use]
pub mod macros;

// module exports
pub mod bond_yields;
pub mod config;
pub mod date_time_helper;
pub mod formatting;
pub mod html;
pub mod mailer;
pub mod market_quotes;
pub mod quote;
pub mod report;

pub use config::{Instrument, MailConfig, ReportConfig, YieldSource};
pub use report::{assemble_report, Report, ReportRow};
