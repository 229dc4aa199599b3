// Reference table loading, dispatched on file extension

use std::path::Path;

use regcheck_recon::reference::ReferenceTable;
use regcheck_recon::ReconError;

/// Spreadsheet formats calamine can open.
const EXCEL_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xls", "xlsb", "ods"];

/// Load a dealer reference table. `sheet` only applies to Excel/ODS files.
pub fn load_table(path: &Path, sheet: Option<&str>) -> Result<ReferenceTable, ReconError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let mut table = match ext.as_str() {
        "csv" | "tsv" | "txt" => {
            if sheet.is_some() {
                tracing::debug!(file = %path.display(), "sheet name ignored for delimited file");
            }
            crate::csv::import(path)?
        }
        e if EXCEL_EXTENSIONS.contains(&e) => crate::xlsx::import(path, sheet)?,
        _ => {
            return Err(ReconError::Io(format!(
                "unsupported reference file type: {} (expected csv, tsv, xlsx, xls, xlsb or ods)",
                path.display()
            )))
        }
    };

    // Excel ranges often carry trailing blank rows
    while table
        .rows
        .last()
        .is_some_and(|row| row.iter().all(|c| c.trim().is_empty()))
    {
        table.rows.pop();
    }

    tracing::info!(
        file = %path.display(),
        rows = table.rows.len(),
        "reference table loaded"
    );
    Ok(table)
}
