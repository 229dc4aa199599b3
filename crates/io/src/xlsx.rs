// Excel reference sheet import (xlsx, xls, xlsb, ods) and report export

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader, Sheets};
use regcheck_recon::model::{ReportRow, REPORT_COLUMNS};
use regcheck_recon::reference::ReferenceTable;
use regcheck_recon::ReconError;
use rust_xlsxwriter::{Format, Workbook as XlsxWorkbook};

/// Import one worksheet as a reference table. `sheet = None` reads the first sheet.
/// The first non-empty row is the header.
pub fn import(path: &Path, sheet: Option<&str>) -> Result<ReferenceTable, ReconError> {
    let mut workbook: Sheets<_> = open_workbook_auto(path)
        .map_err(|e| ReconError::Io(format!("failed to open Excel file: {e}")))?;

    let sheet_names: Vec<String> = workbook.sheet_names().to_vec();
    let sheet_name = match sheet {
        Some(name) => sheet_names
            .iter()
            .find(|n| n.as_str() == name)
            .cloned()
            .ok_or_else(|| {
                ReconError::Io(format!(
                    "sheet '{name}' not found (available: {})",
                    sheet_names.join(", ")
                ))
            })?,
        None => sheet_names
            .first()
            .cloned()
            .ok_or_else(|| ReconError::Io("Excel file contains no sheets".into()))?,
    };

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| ReconError::Io(format!("failed to read sheet '{sheet_name}': {e}")))?;

    let mut rows = range
        .rows()
        .map(|row| row.iter().map(cell_to_string).collect::<Vec<String>>())
        .skip_while(|row| row.iter().all(|c| c.trim().is_empty()));

    let headers = rows.next().unwrap_or_default();
    let rows: Vec<Vec<String>> = rows.collect();

    tracing::debug!(sheet = %sheet_name, rows = rows.len(), "reference sheet imported");
    Ok(ReferenceTable { headers, rows })
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        // Format nicely: integers without decimals (model years arrive as floats)
        Data::Float(n) => {
            if n.fract() == 0.0 && n.abs() < 1e15 {
                format!("{}", *n as i64)
            } else {
                format!("{n}")
            }
        }
        Data::Int(n) => format!("{n}"),
        Data::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        Data::Error(e) => format!("#{e:?}"),
        Data::DateTime(dt) => format!("{}", dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
    }
}

/// Write the report as a single-sheet workbook: bold header row, frozen, with an autofilter.
pub fn export_report(rows: &[ReportRow], path: &Path) -> Result<(), ReconError> {
    let xlsx_err = |e: rust_xlsxwriter::XlsxError| ReconError::Io(format!("XLSX export: {e}"));

    let mut workbook = XlsxWorkbook::new();
    let header_format = Format::new().set_bold();

    let worksheet = workbook
        .add_worksheet()
        .set_name("RTO status")
        .map_err(xlsx_err)?;

    for (col, name) in REPORT_COLUMNS.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *name, &header_format)
            .map_err(xlsx_err)?;
    }

    for (i, row) in rows.iter().enumerate() {
        let r = (i + 1) as u32;
        for (col, value) in row.cells().iter().enumerate() {
            worksheet
                .write_string(r, col as u16, value)
                .map_err(xlsx_err)?;
        }
    }

    worksheet.set_freeze_panes(1, 0).map_err(xlsx_err)?;
    worksheet
        .autofilter(0, 0, rows.len() as u32, (REPORT_COLUMNS.len() - 1) as u16)
        .map_err(xlsx_err)?;

    workbook.save(path).map_err(xlsx_err)?;
    Ok(())
}
