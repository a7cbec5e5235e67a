//! Printed document layout: which record paths feed which numbered line.
//!
//! Lines 1-9 fill the left column and 10-17 the right. Per Bag rides along
//! at the bottom of the right column without a number.

/// Column a printed line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintColumn {
    Left,
    Right,
}

/// Where a printed value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintSource {
    /// The configured waybill constant.
    Waybill,
    /// `(group, key)` paths joined with ", ".
    Paths(&'static [(&'static str, &'static str)]),
}

/// One line of the printed body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrintLine {
    /// `None` for unnumbered extras.
    pub number: Option<u8>,
    pub label: &'static str,
    pub source: PrintSource,
    pub column: PrintColumn,
}

const fn left(number: u8, label: &'static str, paths: &'static [(&'static str, &'static str)]) -> PrintLine {
    PrintLine { number: Some(number), label, source: PrintSource::Paths(paths), column: PrintColumn::Left }
}

const fn right(number: u8, label: &'static str, paths: &'static [(&'static str, &'static str)]) -> PrintLine {
    PrintLine { number: Some(number), label, source: PrintSource::Paths(paths), column: PrintColumn::Right }
}

pub static PRINT_LAYOUT: &[PrintLine] = &[
    PrintLine { number: Some(1), label: "Waybill No", source: PrintSource::Waybill, column: PrintColumn::Left },
    left(2, "Asami Name", &[("dhalariDetails", "rythuName")]),
    left(3, "Dhalari Details", &[("dhalariDetails", "name"), ("dhalariDetails", "location")]),
    left(4, "Rice Type", &[("loadingDetails", "riceType")]),
    left(5, "Bag Count", &[("loadingDetails", "bagCount")]),
    left(6, "Wayment Type", &[("loadingDetails", "waymentType")]),
    left(7, "Lorry No", &[("lorryDetails", "lorryNumber")]),
    left(8, "Lorry Owner", &[("lorryDetails", "ownerName"), ("lorryDetails", "ownerLocation")]),
    left(
        9,
        "Lorry Driver",
        &[("lorryDetails", "driverName"), ("lorryDetails", "driverLocation"), ("lorryDetails", "driverNumber")],
    ),
    right(10, "Per Ton", &[("kiraiDetails", "perTon")]),
    right(11, "Advance", &[("kiraiDetails", "advance")]),
    right(12, "Balance", &[("kiraiDetails", "balance")]),
    right(13, "Total", &[("weightageDetails", "total")]),
    right(14, "Empty", &[("weightageDetails", "empty")]),
    right(15, "Item Weight", &[("weightageDetails", "itemWeight")]),
    right(16, "Commission", &[("loadingDetails", "commission")]),
    right(17, "Total Rate", &[("loadingDetails", "totalRate")]),
    PrintLine {
        number: None,
        label: "Per Bag",
        source: PrintSource::Paths(&[("loadingDetails", "perBag")]),
        column: PrintColumn::Right,
    },
];
