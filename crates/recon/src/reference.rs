//! Reference table: header normalization and row mapping.
//!
//! Loaders (CSV text here, workbooks in `regcheck-io`) produce a [`ReferenceTable`]
//! of raw strings; [`ReferenceTable::records`] turns it into ordered
//! [`ReferenceRecord`]s and fails fast when the chassis column is missing.

use crate::error::ReconError;
use crate::model::ReferenceRecord;

pub const CHASSIS_COLUMN: &str = "chassis number";

/// Raw header + rows as read from the sheet, before any mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// `"  Chassis   Number "` -> `"chassis number"`.
pub fn normalize_header(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

struct ColumnIndex {
    chassis: usize,
    customer_name: Option<usize>,
    dealer_code: Option<usize>,
    dealer_name: Option<usize>,
    model: Option<usize>,
    variant_description: Option<usize>,
    vehicle_status: Option<usize>,
    model_year: Option<usize>,
    variant_year: Option<usize>,
}

impl ColumnIndex {
    fn resolve(headers: &[String]) -> Result<Self, ReconError> {
        let normalized: Vec<String> = headers.iter().map(|h| normalize_header(h)).collect();
        let find = |names: &[&str]| -> Option<usize> {
            names
                .iter()
                .find_map(|name| normalized.iter().position(|h| h == name))
        };

        let chassis = find(&[CHASSIS_COLUMN]).ok_or_else(|| ReconError::MissingColumn {
            column: CHASSIS_COLUMN.into(),
        })?;

        Ok(Self {
            chassis,
            customer_name: find(&["customer name"]),
            dealer_code: find(&["dealer code"]),
            dealer_name: find(&["dealer name"]),
            model: find(&["model"]),
            variant_description: find(&["variant description"]),
            vehicle_status: find(&["vehicle status"]),
            model_year: find(&["my", "model year"]),
            variant_year: find(&["vy", "variant year"]),
        })
    }
}

impl ReferenceTable {
    /// Check the header before touching any row. Used to fail a run before documents are scanned.
    pub fn check_columns(&self) -> Result<(), ReconError> {
        ColumnIndex::resolve(&self.headers).map(|_| ())
    }

    /// Map rows to records, preserving order. Fully blank rows are skipped;
    /// a row with other data but an empty chassis is kept (it can only ever be Pending).
    pub fn records(&self) -> Result<Vec<ReferenceRecord>, ReconError> {
        let idx = ColumnIndex::resolve(&self.headers)?;

        let mut records = Vec::with_capacity(self.rows.len());
        for (i, row) in self.rows.iter().enumerate() {
            if row.iter().all(|cell| cell.trim().is_empty()) {
                continue;
            }
            let cell = |col: Option<usize>| -> String {
                col.and_then(|c| row.get(c))
                    .map(|v| v.trim().to_string())
                    .unwrap_or_default()
            };

            records.push(ReferenceRecord {
                row: i + 1,
                chassis_number: cell(Some(idx.chassis)),
                customer_name: cell(idx.customer_name),
                dealer_code: cell(idx.dealer_code),
                dealer_name: cell(idx.dealer_name),
                model: cell(idx.model),
                variant_description: cell(idx.variant_description),
                vehicle_status: cell(idx.vehicle_status),
                model_year: cell(idx.model_year),
                variant_year: cell(idx.variant_year),
            });
        }

        Ok(records)
    }
}

/// Parse delimited text (first line = header) into a [`ReferenceTable`].
pub fn load_csv_table(csv_data: &str, delimiter: u8) -> Result<ReferenceTable, ReconError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(csv_data.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| ReconError::Io(e.to_string()))?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| ReconError::Io(e.to_string()))?;
        rows.push(record.iter().map(|v| v.to_string()).collect());
    }

    Ok(ReferenceTable { headers, rows })
}
