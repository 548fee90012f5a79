//! The report table: one row per instrument, followed by one row per bond yield
use log::info;

use crate::bond_yields::{fetch_bond_yield, YieldOutcome, YieldProvider};
use crate::config::ReportConfig;
use crate::formatting::{format_percent, AssetClass};
use crate::market_quotes::{fetch_instrument, MarketQuoteProvider, QuoteOutcome};

pub const COLUMNS: [&str; 4] = ["Asset", "Last Price", "Change", "Change %"];

const NOT_AVAILABLE: &str = "N/A";
const NO_DATA: &str = "No Data";
const ERROR: &str = "Error";
const NOT_FOUND: &str = "Not found";

#[derive(Debug, Clone, PartialEq)]
pub enum ReportRow {
    Quote { name: String, outcome: QuoteOutcome },
    Yield { name: String, outcome: YieldOutcome },
}

impl ReportRow {
    pub fn name(&self) -> &str {
        match self {
            ReportRow::Quote { name, .. } | ReportRow::Yield { name, .. } => name,
        }
    }

    /// Display cells in column order. This is the only place outcomes turn
    /// into placeholder strings.
    pub fn cells(&self) -> [String; 4] {
        match self {
            ReportRow::Quote { name, outcome } => {
                let class = AssetClass::classify(name);
                match outcome {
                    QuoteOutcome::Priced(change) => [
                        name.clone(),
                        class.format_price(change.last),
                        class.format_change(change.change()),
                        format_percent(change.percent_change()),
                    ],
                    QuoteOutcome::NoData => [
                        name.clone(),
                        NO_DATA.to_string(),
                        NOT_AVAILABLE.to_string(),
                        NOT_AVAILABLE.to_string(),
                    ],
                    QuoteOutcome::FetchError(_) => [
                        name.clone(),
                        ERROR.to_string(),
                        ERROR.to_string(),
                        ERROR.to_string(),
                    ],
                }
            }
            ReportRow::Yield { name, outcome } => {
                let value = match outcome {
                    YieldOutcome::Found(value) => format!("{}%", value),
                    YieldOutcome::NotFound => NOT_FOUND.to_string(),
                    YieldOutcome::Failed(reason) => format!("Error: {}", reason),
                };
                [
                    name.clone(),
                    value,
                    NOT_AVAILABLE.to_string(),
                    NOT_AVAILABLE.to_string(),
                ]
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// Where the quotes came from, restated in the footer
    pub source: String,
    pub rows: Vec<ReportRow>,
}

impl Report {
    pub fn table(&self) -> Vec<[String; 4]> {
        self.rows.iter().map(ReportRow::cells).collect()
    }
}

/// Fetch all instruments, then scrape all bond yields, one after the other.
/// Individual failures end up in their row; this never fails as a whole.
pub async fn assemble_report(
    config: &ReportConfig,
    quotes: &dyn MarketQuoteProvider,
    yields: &dyn YieldProvider,
) -> Report {
    let mut rows = Vec::with_capacity(config.row_count());
    for instrument in &config.instruments {
        let outcome = fetch_instrument(quotes, instrument).await;
        rows.push(ReportRow::Quote {
            name: instrument.name.clone(),
            outcome,
        });
    }
    for source in &config.yield_sources {
        let outcome = fetch_bond_yield(yields, source).await;
        rows.push(ReportRow::Yield {
            name: source.name.clone(),
            outcome,
        });
    }
    info!(
        "Collected {} rows ({} quotes, {} yields)",
        rows.len(),
        config.instruments.len(),
        config.yield_sources.len()
    );
    Report {
        source: quotes.source_name().to_string(),
        rows,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::bond_yields::tests::DummyYieldProvider;
    use crate::config::{Instrument, YieldSource};
    use crate::market_quotes::tests::DummyProvider;
    use crate::quote::PriceChange;
    use rust_decimal::Decimal;

    const UK_URL: &str = "https://bonds.example/uk";
    const DE_URL: &str = "https://bonds.example/de";

    pub fn sample_config() -> ReportConfig {
        ReportConfig {
            instruments: vec![
                Instrument::new("FTSE 100", "^FTSE"),
                Instrument::new("USD/JPY (Yen)", "JPY=X"),
                Instrument::new("Crude Oil (WTI)", "WTI"),
                Instrument::new("Gold Futures", "GC=F"),
                Instrument::new("Delisted Index", "GONE"),
                Instrument::new("Broken Feed", "FAIL"),
            ],
            yield_sources: vec![
                YieldSource::new("UK 10Y Gilt Yield", UK_URL),
                YieldSource::new("Germany 10Y Bond Yield", DE_URL),
            ],
        }
    }

    pub fn sample_providers() -> (DummyProvider, DummyYieldProvider) {
        let quotes = DummyProvider::new(&[
            ("^FTSE", &[7550.25, 7500.5]),
            ("JPY=X", &[148.5, 149.1234]),
            ("WTI", &[78.0, 78.0]),
            ("GC=F", &[1900.0, 1925.5]),
            ("GONE", &[]),
        ]);
        // Germany page is missing, so its scrape fails
        let yields = DummyYieldProvider::new(&[(
            UK_URL,
            "<html><body><p>UK 10Y</p><p>4.50</p></body></html>",
        )]);
        (quotes, yields)
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 1)]
    async fn test_assemble_report() {
        let config = sample_config();
        let (quotes, yields) = sample_providers();
        let report = assemble_report(&config, &quotes, &yields).await;

        assert_eq!(report.source, "Dummy");
        assert_eq!(report.rows.len(), config.row_count());
        let names: Vec<&str> = report.rows.iter().map(ReportRow::name).collect();
        assert_eq!(
            names,
            vec![
                "FTSE 100",
                "USD/JPY (Yen)",
                "Crude Oil (WTI)",
                "Gold Futures",
                "Delisted Index",
                "Broken Feed",
                "UK 10Y Gilt Yield",
                "Germany 10Y Bond Yield",
            ]
        );

        let table = report.table();
        assert_eq!(table[0], ["FTSE 100", "7,500.50", "-49.75", "-0.66%"]);
        assert_eq!(table[1], ["USD/JPY (Yen)", "149.1234", "0.6234", "0.42%"]);
        assert_eq!(table[2], ["Crude Oil (WTI)", "78.00", "0.00", "0.00%"]);
        assert_eq!(table[3], ["Gold Futures", "1,925.50", "25.50", "1.34%"]);
        assert_eq!(table[4], ["Delisted Index", "No Data", "N/A", "N/A"]);
        assert_eq!(table[5], ["Broken Feed", "Error", "Error", "Error"]);
        assert_eq!(table[6], ["UK 10Y Gilt Yield", "4.50%", "N/A", "N/A"]);
        assert_eq!(table[7][0], "Germany 10Y Bond Yield");
        assert!(table[7][1].starts_with("Error: "));
        assert_eq!(&table[7][2..], ["N/A", "N/A"]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 1)]
    async fn test_row_count_when_everything_fails() {
        let config = ReportConfig::default();
        let quotes = DummyProvider::new(&[]);
        let yields = DummyYieldProvider::new(&[]);
        let report = assemble_report(&config, &quotes, &yields).await;
        assert_eq!(report.rows.len(), 18);
        assert!(report.rows[..16]
            .iter()
            .all(|row| row.cells()[1..] == ["Error", "Error", "Error"]));
    }

    #[test]
    fn test_gold_futures_row() {
        let row = ReportRow::Quote {
            name: "Gold Futures".to_string(),
            outcome: QuoteOutcome::Priced(PriceChange {
                previous: 1900.0,
                last: 1925.5,
            }),
        };
        assert_eq!(row.cells(), ["Gold Futures", "1,925.50", "25.50", "1.34%"]);
    }

    #[test]
    fn test_yield_row_cells() {
        let found = ReportRow::Yield {
            name: "UK 10Y Gilt Yield".to_string(),
            outcome: YieldOutcome::Found(Decimal::new(4125, 3)),
        };
        assert_eq!(found.cells(), ["UK 10Y Gilt Yield", "4.125%", "N/A", "N/A"]);
        let missing = ReportRow::Yield {
            name: "UK 10Y Gilt Yield".to_string(),
            outcome: YieldOutcome::NotFound,
        };
        assert_eq!(missing.cells()[1], "Not found");
    }
}
