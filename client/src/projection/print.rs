//! Printable document: header block plus a numbered two-column body.
//!
//! The projection only builds content and ordering. Sending the result to a
//! printer (or a file) is left to the caller.

use serde::Serialize;
use serde_json::{Map, Value};

use super::{lookup, render_leaf, NOT_AVAILABLE};
use crate::config::{Config, DEFAULT_AGENCY_NAME, DEFAULT_WAYBILL_NO};
use crate::models::KiraiRecord;
use crate::registry::{registry, FieldKind, PrintColumn, PrintSource, PRINT_LAYOUT};

/// Document-level constants that do not come from the record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintOptions {
    pub waybill_no: String,
    pub agency_name: String,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            waybill_no: DEFAULT_WAYBILL_NO.to_string(),
            agency_name: DEFAULT_AGENCY_NAME.to_string(),
        }
    }
}

impl From<&Config> for PrintOptions {
    fn from(config: &Config) -> Self {
        Self {
            waybill_no: config.waybill_no.clone(),
            agency_name: config.agency_name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintHeader {
    pub kl_number: String,
    pub rice_mill: String,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrintItem {
    pub number: Option<u8>,
    pub label: &'static str,
    pub value: String,
    #[serde(skip)]
    pub column: PrintColumn,
}

impl PrintItem {
    /// `"10. Per Ton: 950"`, or `"Per Bag: 25"` for unnumbered lines.
    pub fn line(&self) -> String {
        match self.number {
            Some(n) => format!("{}. {}: {}", n, self.label, self.value),
            None => format!("{}: {}", self.label, self.value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrintDocument {
    pub title: String,
    pub header: PrintHeader,
    pub items: Vec<PrintItem>,
}

impl PrintDocument {
    pub fn column(&self, column: PrintColumn) -> impl Iterator<Item = &PrintItem> {
        self.items.iter().filter(move |item| item.column == column)
    }

    /// Item by its printed number.
    pub fn item(&self, number: u8) -> Option<&PrintItem> {
        self.items.iter().find(|item| item.number == Some(number))
    }

    /// Plain-text rendering, `width` characters wide.
    pub fn render_text(&self, width: usize) -> String {
        let width = width.max(40);
        let col_width = (width - 3) / 2;
        let mut out = String::new();

        out.push_str(&format!("{:^width$}\n", self.title, width = width));
        out.push_str(&format!("{}\n", "=".repeat(width)));
        out.push_str(&format!("KL No: {}\n", self.header.kl_number));
        out.push_str(&format!("Rice Mill: {}\n", self.header.rice_mill));
        out.push_str(&format!("Date: {}\n", self.header.date));
        out.push_str(&format!("{}\n", "-".repeat(width)));

        let left: Vec<String> = self.column(PrintColumn::Left).map(PrintItem::line).collect();
        let right: Vec<String> = self.column(PrintColumn::Right).map(PrintItem::line).collect();
        for i in 0..left.len().max(right.len()) {
            let l = left.get(i).map(String::as_str).unwrap_or("");
            let r = right.get(i).map(String::as_str).unwrap_or("");
            let line = format!("{:<col_width$} | {}", l, r, col_width = col_width);
            out.push_str(line.trim_end());
            out.push('\n');
        }

        out
    }
}

/// Build the printable document for `record`.
pub fn print_projection(record: &KiraiRecord, options: &PrintOptions) -> PrintDocument {
    let map = record.to_json_map();

    let header = PrintHeader {
        kl_number: render_leaf(map.get("klno"), FieldKind::Text),
        rice_mill: render_leaf(lookup(&map, "riceMill", "name"), FieldKind::Text),
        date: render_leaf(map.get("loadingDate"), FieldKind::Date),
    };

    let items = PRINT_LAYOUT
        .iter()
        .map(|line| PrintItem {
            number: line.number,
            label: line.label,
            value: match line.source {
                PrintSource::Waybill => options.waybill_no.clone(),
                PrintSource::Paths(paths) => joined(&map, paths),
            },
            column: line.column,
        })
        .collect();

    PrintDocument {
        title: options.agency_name.clone(),
        header,
        items,
    }
}

/// Each part falls back to N/A on its own.
fn joined(map: &Map<String, Value>, paths: &[(&str, &str)]) -> String {
    let parts: Vec<String> = paths
        .iter()
        .map(|(group, key)| {
            let kind = registry()
                .resolve(&format!("{}.{}", group, key))
                .map(|p| p.kind())
                .unwrap_or(FieldKind::Text);
            render_leaf(lookup(map, group, key), kind)
        })
        .collect();
    if parts.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        parts.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> KiraiRecord {
        serde_json::from_value(json!({
            "klno": "KL-1001",
            "loadingDate": "2024-03-01",
            "riceMill": { "name": "Sri Rama Mills" },
            "dhalariDetails": { "name": "Venkat", "rythuName": "Suresh", "location": "Nidadavolu" },
            "loadingDetails": {
                "perBag": 25, "riceType": "Sona", "bagCount": 0, "waymentType": "Lorry",
                "commission": 1500, "totalRate": 32000.5
            },
            "lorryDetails": {
                "lorryNumber": "AP 05 TX 1234", "ownerName": "Prasad",
                "driverName": "Raju", "driverNumber": "9000000001"
            },
            "kiraiDetails": { "perTon": 950, "advance": 5000, "balance": "2000 on delivery" },
            "weightageDetails": { "total": 25.5, "empty": 9, "itemWeight": 16.5 }
        }))
        .unwrap()
    }

    #[test]
    fn test_header_block() {
        let doc = print_projection(&sample(), &PrintOptions::default());
        assert_eq!(doc.title, DEFAULT_AGENCY_NAME);
        assert_eq!(doc.header.kl_number, "KL-1001");
        assert_eq!(doc.header.rice_mill, "Sri Rama Mills");
        assert_eq!(doc.header.date, "01/03/2024");
    }

    #[test]
    fn test_numbered_items() {
        let doc = print_projection(&sample(), &PrintOptions::default());
        let value = |n: u8| doc.item(n).map(|i| i.value.clone()).unwrap();

        assert_eq!(value(1), DEFAULT_WAYBILL_NO);
        assert_eq!(value(2), "Suresh");
        assert_eq!(value(3), "Venkat, Nidadavolu");
        assert_eq!(value(4), "Sona");
        assert_eq!(value(5), "0");
        assert_eq!(value(7), "AP 05 TX 1234");
        assert_eq!(value(8), "Prasad, N/A");
        assert_eq!(value(9), "Raju, N/A, 9000000001");
        assert_eq!(value(10), "950");
        assert_eq!(value(12), "2000 on delivery");
        assert_eq!(value(13), "25.5");
        assert_eq!(value(14), "9");
        assert_eq!(value(16), "1500");
        assert_eq!(value(17), "32000.5");
    }

    #[test]
    fn test_per_bag_is_unnumbered_right_line() {
        let doc = print_projection(&sample(), &PrintOptions::default());
        let last = doc.column(PrintColumn::Right).last().unwrap();
        assert_eq!(last.number, None);
        assert_eq!(last.label, "Per Bag");
        assert_eq!(last.value, "25");
        assert_eq!(doc.column(PrintColumn::Left).count(), 9);
        assert_eq!(doc.column(PrintColumn::Right).count(), 9);
    }

    #[test]
    fn test_empty_record_falls_back_everywhere() {
        let doc = print_projection(&KiraiRecord::new("KL-9"), &PrintOptions::default());
        assert_eq!(doc.header.rice_mill, "N/A");
        assert_eq!(doc.header.date, "N/A");
        assert_eq!(doc.item(3).unwrap().value, "N/A, N/A");
        assert_eq!(doc.item(9).unwrap().value, "N/A, N/A, N/A");
        assert!(doc.items.iter().skip(1).all(|i| i.value.contains("N/A")));
    }

    #[test]
    fn test_waybill_is_configurable() {
        let options = PrintOptions {
            waybill_no: "WB-77".into(),
            agency_name: "Test Agency".into(),
        };
        let doc = print_projection(&sample(), &options);
        assert_eq!(doc.item(1).unwrap().value, "WB-77");
        assert_eq!(doc.title, "Test Agency");
    }

    #[test]
    fn test_render_text_pairs_columns() {
        let doc = print_projection(&sample(), &PrintOptions::default());
        let text = doc.render_text(80);
        assert!(text.contains("KL No: KL-1001"));
        let first_row = text
            .lines()
            .find(|l| l.starts_with("1. Waybill No"))
            .unwrap();
        assert!(first_row.contains("| 10. Per Ton: 950"));
        let last_row = text.lines().find(|l| l.starts_with("9. Lorry Driver")).unwrap();
        assert!(last_row.contains("| Per Bag: 25"));
    }

    #[test]
    fn test_projection_is_deterministic() {
        let record = sample();
        let options = PrintOptions::default();
        assert_eq!(print_projection(&record, &options), print_projection(&record, &options));
    }

    #[test]
    fn test_projection_ignores_input_key_order() {
        let reordered: KiraiRecord = serde_json::from_value(json!({
            "weightageDetails": { "itemWeight": 16.5, "empty": 9, "total": 25.5 },
            "kiraiDetails": { "balance": "2000 on delivery", "advance": 5000, "perTon": 950 },
            "lorryDetails": {
                "driverNumber": "9000000001", "driverName": "Raju",
                "ownerName": "Prasad", "lorryNumber": "AP 05 TX 1234"
            },
            "loadingDetails": {
                "totalRate": 32000.5, "commission": 1500, "waymentType": "Lorry",
                "bagCount": 0, "riceType": "Sona", "perBag": 25
            },
            "dhalariDetails": { "location": "Nidadavolu", "rythuName": "Suresh", "name": "Venkat" },
            "riceMill": { "name": "Sri Rama Mills" },
            "loadingDate": "2024-03-01",
            "klno": "KL-1001"
        }))
        .unwrap();

        let options = PrintOptions::default();
        let doc = print_projection(&reordered, &options);
        assert_eq!(doc, print_projection(&sample(), &options));
        assert_eq!(doc.render_text(80), print_projection(&sample(), &options).render_text(80));
    }
}
