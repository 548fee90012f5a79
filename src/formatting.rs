//! Number formatting of report cells, chosen by the kind of asset
//!
//! The kind is derived from the display name, so e.g. everything named
//! "... Yield" is shown as a percentage and FX pairs get four decimals.

const INDEX_MARKERS: [&str; 8] = [
    "Nikkei",
    "Hang Seng",
    "FTSE",
    "DAX",
    "S&P",
    "Dow",
    "Nasdaq",
    "Gold",
];
const FX_MARKERS: [&str; 3] = ["USD/JPY", "EUR/USD", "GBP/USD"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetClass {
    /// Quoted as a yield in percent
    Yield,
    /// Large numbers, shown with thousands separators
    Index,
    /// Currency pairs, four decimals
    Fx,
    /// Commodities and everything else
    Other,
}

impl AssetClass {
    /// Classify by display name; the first matching rule wins
    pub fn classify(name: &str) -> Self {
        if name.contains("Yield") {
            AssetClass::Yield
        } else if INDEX_MARKERS.iter().any(|m| name.contains(m)) {
            AssetClass::Index
        } else if FX_MARKERS.iter().any(|m| name.contains(m)) {
            AssetClass::Fx
        } else {
            AssetClass::Other
        }
    }

    pub fn format_price(&self, price: f64) -> String {
        match self {
            AssetClass::Yield => format!("{:.2}%", price),
            _ => self.format_change(price),
        }
    }

    /// Absolute change, same precision as the price but never with a `%`
    pub fn format_change(&self, value: f64) -> String {
        match self {
            AssetClass::Index => with_thousands_separator(value, 2),
            AssetClass::Fx => format!("{:.4}", value),
            AssetClass::Yield | AssetClass::Other => format!("{:.2}", value),
        }
    }
}

pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value)
}

/// Fixed decimals with `,` grouping of the integer digits, e.g. `-1,234.50`
pub fn with_thousands_separator(value: f64, decimals: usize) -> String {
    let plain = format!("{:.*}", decimals, value);
    let (sign, unsigned) = match plain.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", plain.as_str()),
    };
    let (int_part, frac_part) = match unsigned.find('.') {
        Some(pos) => unsigned.split_at(pos),
        None => (unsigned, ""),
    };
    if !int_part.bytes().all(|b| b.is_ascii_digit()) {
        // inf or NaN
        return plain;
    }

    let mut grouped = String::with_capacity(plain.len() + int_part.len() / 3);
    grouped.push_str(sign);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped.push_str(frac_part);
    grouped
}
