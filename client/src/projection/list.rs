//! One-line summary of a record for the listing table.

use serde::Serialize;

use super::{format_decimal, DISPLAY_DATE_FORMAT, NOT_AVAILABLE};
use crate::models::KiraiRecord;

/// Column headings, in display order.
pub const LIST_HEADERS: [&str; 6] = [
    "KL Number",
    "Loading Date",
    "Rice Mill",
    "Driver Name",
    "Lorry Number",
    "Total Rate",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListRow {
    #[serde(rename = "KL Number")]
    pub kl_number: String,
    #[serde(rename = "Loading Date")]
    pub loading_date: String,
    #[serde(rename = "Rice Mill")]
    pub rice_mill: String,
    #[serde(rename = "Driver Name")]
    pub driver_name: String,
    #[serde(rename = "Lorry Number")]
    pub lorry_number: String,
    #[serde(rename = "Total Rate")]
    pub total_rate: String,
}

impl ListRow {
    pub fn from_record(record: &KiraiRecord) -> Self {
        let lorry = record.lorry_details.as_ref();
        Self {
            kl_number: record.klno.clone(),
            loading_date: record
                .loading_date
                .map(|d| d.format(DISPLAY_DATE_FORMAT).to_string())
                .unwrap_or_else(na),
            rice_mill: record.rice_mill_name().map(str::to_string).unwrap_or_else(na),
            driver_name: lorry.and_then(|l| l.driver_name.clone()).unwrap_or_else(na),
            lorry_number: lorry.and_then(|l| l.lorry_number.clone()).unwrap_or_else(na),
            total_rate: record
                .loading_details
                .as_ref()
                .and_then(|l| l.total_rate)
                .map(|rate| format!("₹{}", format_decimal(rate)))
                .unwrap_or_else(na),
        }
    }

    pub fn cells(&self) -> [&str; 6] {
        [
            &self.kl_number,
            &self.loading_date,
            &self.rice_mill,
            &self.driver_name,
            &self.lorry_number,
            &self.total_rate,
        ]
    }
}

fn na() -> String {
    NOT_AVAILABLE.to_string()
}
