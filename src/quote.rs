//! Quotes as delivered by a market data provider
use std::cmp::Ordering;

use chrono::{DateTime, Utc};

/// Closing price of a single trading session
#[derive(Debug, Clone)]
pub struct Quote {
    pub time: DateTime<Utc>,
    pub close: f64,
}

impl Ord for Quote {
    fn cmp(&self, other: &Self) -> Ordering {
        self.time.cmp(&other.time)
    }
}

impl PartialOrd for Quote {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Quote {
    fn eq(&self, other: &Self) -> bool {
        self.time == other.time
    }
}

impl Eq for Quote {}

/// Last close compared to the close of the session before
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceChange {
    pub last: f64,
    pub previous: f64,
}

impl PriceChange {
    /// Compare the two most recent sessions; `None` if fewer than two are given
    pub fn from_quotes(quotes: &[Quote]) -> Option<Self> {
        match quotes {
            [.., previous, last] => Some(PriceChange {
                last: last.close,
                previous: previous.close,
            }),
            _ => None,
        }
    }

    pub fn change(&self) -> f64 {
        self.last - self.previous
    }

    /// Change relative to the previous close, in percent
    pub fn percent_change(&self) -> f64 {
        self.change() / self.previous * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn quotes(closes: &[f64]) -> Vec<Quote> {
        let start = Utc.with_ymd_and_hms(2024, 1, 2, 21, 0, 0).unwrap();
        closes
            .iter()
            .enumerate()
            .map(|(i, close)| Quote {
                time: start + Duration::days(i as i64),
                close: *close,
            })
            .collect()
    }

    #[test]
    fn test_change_of_gold() {
        let change = PriceChange::from_quotes(&quotes(&[1900.0, 1925.5])).unwrap();
        assert_fuzzy_eq!(change.change(), 25.5, 1e-9);
        assert_fuzzy_eq!(change.percent_change(), 25.5 / 1900.0 * 100.0, 1e-9);
    }

    #[test]
    fn test_uses_last_two_sessions() {
        let change = PriceChange::from_quotes(&quotes(&[10.0, 20.0, 25.0])).unwrap();
        assert_eq!(change.previous, 20.0);
        assert_eq!(change.last, 25.0);
        assert_fuzzy_eq!(change.percent_change(), 25.0, 1e-9);
    }

    #[test]
    fn test_not_enough_sessions() {
        assert!(PriceChange::from_quotes(&[]).is_none());
        assert!(PriceChange::from_quotes(&quotes(&[1.0])).is_none());
    }

    #[test]
    fn test_quote_order_by_time() {
        let mut q = quotes(&[3.0, 2.0, 1.0]);
        q.reverse();
        q.sort();
        assert_eq!(q[0].close, 3.0);
        assert_eq!(q[2].close, 1.0);
    }
}
