// Report export: CSV, XLSX and JSON with the fixed output columns

use std::path::Path;

use regcheck_recon::model::{ReportRow, REPORT_COLUMNS};
use regcheck_recon::{ReconError, ReconResult};

pub fn write_csv(rows: &[ReportRow], path: &Path) -> Result<(), ReconError> {
    let csv_err = |e: ::csv::Error| ReconError::Io(format!("CSV export: {e}"));
    let mut writer = ::csv::Writer::from_path(path).map_err(csv_err)?;
    writer.write_record(REPORT_COLUMNS).map_err(csv_err)?;
    for row in rows {
        writer.write_record(row.cells()).map_err(csv_err)?;
    }
    writer
        .flush()
        .map_err(|e| ReconError::Io(format!("CSV export: {e}")))?;
    Ok(())
}

pub fn write_xlsx(rows: &[ReportRow], path: &Path) -> Result<(), ReconError> {
    crate::xlsx::export_report(rows, path)
}

/// Full run result (meta, summary, rows, diagnostics) as pretty JSON.
pub fn write_json(result: &ReconResult, path: &Path) -> Result<(), ReconError> {
    let json = serde_json::to_string_pretty(result)
        .map_err(|e| ReconError::Io(format!("JSON export: {e}")))?;
    std::fs::write(path, json + "\n")
        .map_err(|e| ReconError::Io(format!("cannot write {}: {e}", path.display())))
}
