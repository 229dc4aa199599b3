// CSV/TSV reference sheet import

use std::io::Read;
use std::path::Path;

use regcheck_recon::reference::{load_csv_table, ReferenceTable};
use regcheck_recon::ReconError;

pub fn import(path: &Path) -> Result<ReferenceTable, ReconError> {
    let content = read_file_as_utf8(path)?;
    let delimiter = sniff_delimiter(&content);
    load_csv_table(&content, delimiter)
}

/// Detect the most likely field delimiter by checking consistency across the first few lines.
///
/// For each candidate (tab, semicolon, comma, pipe), count fields per line. The delimiter
/// that produces the most consistent field count (>1 field) wins.
pub(crate) fn sniff_delimiter(content: &str) -> u8 {
    let candidates: &[u8] = &[b'\t', b';', b',', b'|'];
    let sample_lines: Vec<&str> = content.lines().take(10).collect();

    if sample_lines.is_empty() {
        return b',';
    }

    let mut best = b',';
    let mut best_score = 0u64;

    for &delim in candidates {
        let counts: Vec<usize> = sample_lines
            .iter()
            .map(|line| {
                csv::ReaderBuilder::new()
                    .delimiter(delim)
                    .has_headers(false)
                    .flexible(true)
                    .from_reader(line.as_bytes())
                    .records()
                    .next()
                    .and_then(|r| r.ok())
                    .map(|r| r.len())
                    .unwrap_or(1)
            })
            .collect();

        // Must produce >1 field on the header line to be viable
        if counts.first().copied().unwrap_or(0) <= 1 {
            continue;
        }

        // Score: (lines with the header's field count) * field_count
        let target = counts[0];
        let consistent = counts.iter().filter(|&&c| c == target).count() as u64;
        let score = consistent * target as u64;

        if score > best_score {
            best_score = score;
            best = delim;
        }
    }

    best
}

/// Read file and convert to UTF-8 if needed.
/// Dealer sheets exported from Excel are often Windows-1252.
pub fn read_file_as_utf8(path: &Path) -> Result<String, ReconError> {
    let mut file = std::fs::File::open(path)
        .map_err(|e| ReconError::Io(format!("cannot open {}: {e}", path.display())))?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)
        .map_err(|e| ReconError::Io(format!("cannot read {}: {e}", path.display())))?;

    match String::from_utf8(bytes) {
        Ok(s) => Ok(s),
        Err(e) => {
            let bytes = e.into_bytes();
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            Ok(decoded.into_owned())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn sniff_prefers_consistent_delimiter() {
        assert_eq!(sniff_delimiter("a,b,c\n1,2,3\n"), b',');
        assert_eq!(sniff_delimiter("a;b;c\n1;2;3\n"), b';');
        assert_eq!(sniff_delimiter("a\tb\n1\t2\n"), b'\t');
        assert_eq!(sniff_delimiter("single\nvalue\n"), b',');
        // Commas inside a semicolon sheet's values don't win
        assert_eq!(sniff_delimiter("name;city\nDoe, John;Pune\nRoe, Jane;Goa\n"), b';');
    }

    #[test]
    fn import_semicolon_sheet() {
        let mut f = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(f, "Chassis Number;Customer Name\nMA3ERLF1S00123456;JOHN K DOE").unwrap();
        let table = import(f.path()).unwrap();
        let records = table.records().unwrap();
        assert_eq!(records[0].customer_name, "JOHN K DOE");
    }

    #[test]
    fn windows_1252_fallback() {
        let mut f = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        // "Chassis Number,Customer Name\nX,JOS\xC9\n" with É in Windows-1252
        f.write_all(b"Chassis Number,Customer Name\nX,JOS\xC9\n").unwrap();
        let table = import(f.path()).unwrap();
        assert_eq!(table.rows[0][1], "JOS\u{c9}");
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = import(Path::new("/nonexistent/dealers.csv")).unwrap_err();
        assert!(matches!(err, ReconError::Io(_)));
    }
}
