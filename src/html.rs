//! HTML rendering of the report, suitable as an email body
use chrono::DateTime;
use chrono_tz::Tz;

use crate::date_time_helper::report_timestamp;
use crate::report::{Report, COLUMNS};

const STYLE: &str = r#"
        body {
            font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
            line-height: 1.6;
            color: #333;
            max-width: 900px;
            margin: 0 auto;
            padding: 20px;
        }
        h2 {
            color: #2c3e50;
            border-bottom: 2px solid #3498db;
            padding-bottom: 10px;
        }
        table {
            width: 100%;
            border-collapse: collapse;
            margin: 20px 0;
            box-shadow: 0 2px 3px rgba(0,0,0,0.1);
        }
        th {
            background-color: #3498db;
            color: white;
            text-align: center;
            padding: 12px;
            font-weight: bold;
        }
        td {
            padding: 10px;
            text-align: center;
            border-bottom: 1px solid #ddd;
        }
        tr:nth-child(even) {
            background-color: #f8f9fa;
        }
        tr:hover {
            background-color: #e9f7fe;
        }
        .positive {
            color: #27ae60;
            font-weight: bold;
        }
        .negative {
            color: #e74c3c;
            font-weight: bold;
        }
        .footer {
            font-size: 12px;
            color: #7f8c8d;
            text-align: center;
            margin-top: 20px;
        }
"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Positive,
    Negative,
}

impl Trend {
    /// Direction of a rendered "Change" cell; placeholders and zero have none
    pub fn of_change(cell: &str) -> Option<Trend> {
        let value: f64 = cell.replace(',', "").parse().ok()?;
        if value > 0.0 {
            Some(Trend::Positive)
        } else if value < 0.0 {
            Some(Trend::Negative)
        } else {
            None
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Trend::Positive => "positive",
            Trend::Negative => "negative",
        }
    }
}

pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Render the complete document. Same report and time give the same bytes.
pub fn render_report(report: &Report, generated_at: &DateTime<Tz>) -> String {
    let stamp = report_timestamp(generated_at);
    let mut html = String::with_capacity(4096);

    html.push_str(&format!(
        "<html>\n<head>\n    <meta charset=\"utf-8\">\n    <style>{}    </style>\n</head>\n<body>\n",
        STYLE
    ));
    html.push_str(&format!(
        "    <h2>📈 Daily Market Report - {}</h2>\n",
        escape(&stamp)
    ));
    html.push_str("    <table>\n        <thead>\n            <tr>\n");
    for column in COLUMNS.iter() {
        html.push_str(&format!("                <th>{}</th>\n", column));
    }
    html.push_str("            </tr>\n        </thead>\n        <tbody>\n");

    for [asset, price, change, percent] in report.table() {
        let class_attr = match Trend::of_change(&change) {
            Some(trend) => format!(" class=\"{}\"", trend.css_class()),
            None => String::new(),
        };
        html.push_str(&format!(
            "            <tr>\n                <td>{}</td>\n                <td>{}</td>\n                <td{class}>{}</td>\n                <td{class}>{}</td>\n            </tr>\n",
            escape(&asset),
            escape(&price),
            escape(&change),
            escape(&percent),
            class = class_attr
        ));
    }

    html.push_str("        </tbody>\n    </table>\n");
    html.push_str(&format!(
        "    <div class=\"footer\">\n        <p>Data source: {} | Report generated at {}</p>\n    </div>\n",
        escape(&report.source),
        escape(&stamp)
    ));
    html.push_str("</body>\n</html>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date_time_helper::REPORT_TZ;
    use crate::market_quotes::QuoteOutcome;
    use crate::report::tests::{sample_config, sample_providers};
    use crate::report::{assemble_report, ReportRow};
    use chrono::TimeZone;

    fn row_html<'a>(html: &'a str, asset: &str) -> &'a str {
        let cell = format!("<td>{}</td>", asset);
        let start = html.find(&cell).unwrap();
        let end = start + html[start..].find("</tr>").unwrap();
        &html[start..end]
    }

    #[test]
    fn test_trend_of_change() {
        assert_eq!(Trend::of_change("25.50"), Some(Trend::Positive));
        assert_eq!(Trend::of_change("-1,234.50"), Some(Trend::Negative));
        assert_eq!(Trend::of_change("0.00"), None);
        assert_eq!(Trend::of_change("-0.00"), None);
        assert_eq!(Trend::of_change("N/A"), None);
        assert_eq!(Trend::of_change("Error"), None);
        assert_eq!(Trend::of_change("No Data"), None);
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("S&P 500 <prior>"), "S&amp;P 500 &lt;prior&gt;");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 1)]
    async fn test_render_report() {
        let (quotes, yields) = sample_providers();
        let report = assemble_report(&sample_config(), &quotes, &yields).await;
        let time = REPORT_TZ.with_ymd_and_hms(2024, 1, 2, 17, 45, 0).unwrap();
        let html = render_report(&report, &time);

        assert!(html.contains("<h2>📈 Daily Market Report - 2024-01-02 17:45 EST</h2>"));
        assert!(html.contains("Data source: Dummy | Report generated at 2024-01-02 17:45 EST"));
        assert_eq!(html.matches("<th>").count(), 4);
        assert_eq!(html.matches("<tr>").count(), 1 + report.rows.len());

        let gold = row_html(&html, "Gold Futures");
        assert!(gold.contains("<td class=\"positive\">25.50</td>"));
        assert!(gold.contains("<td class=\"positive\">1.34%</td>"));
        let ftse = row_html(&html, "FTSE 100");
        assert!(ftse.contains("<td class=\"negative\">-49.75</td>"));
        let oil = row_html(&html, "Crude Oil (WTI)");
        assert!(!oil.contains("class="));
        let delisted = row_html(&html, "Delisted Index");
        assert!(delisted.contains("<td>No Data</td>"));
        assert!(!delisted.contains("class="));
        let germany = row_html(&html, "Germany 10Y Bond Yield");
        assert!(germany.contains("<td>Error: "));
        assert!(!germany.contains("class="));
    }

    #[test]
    fn test_render_is_deterministic_except_time() {
        let report = Report {
            source: "Yahoo Finance".to_string(),
            rows: vec![ReportRow::Quote {
                name: "S&P 500 (prior day)".to_string(),
                outcome: QuoteOutcome::NoData,
            }],
        };
        let morning = REPORT_TZ.with_ymd_and_hms(2024, 7, 1, 8, 0, 0).unwrap();
        let evening = REPORT_TZ.with_ymd_and_hms(2024, 7, 1, 18, 30, 0).unwrap();
        let first = render_report(&report, &morning);
        assert_eq!(first, render_report(&report, &morning));
        assert!(first.contains("<td>S&amp;P 500 (prior day)</td>"));

        let second = render_report(&report, &evening);
        assert_ne!(first, second);
        assert_eq!(
            first.replace("2024-07-01 08:00 EDT", "T"),
            second.replace("2024-07-01 18:30 EDT", "T")
        );
    }
}
