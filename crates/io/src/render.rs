// Document rendering: PDF via pdftotext, plain text read directly

use std::path::Path;
use std::process::Command;

use regcheck_recon::{DocumentRef, DocumentRenderer, ReconError};

/// Renders receipts from disk. `.pdf` goes through `pdftotext -layout`; anything
/// else is read as text (UTF-8, falling back to Windows-1252).
#[derive(Debug, Default, Clone, Copy)]
pub struct FileRenderer;

impl DocumentRenderer for FileRenderer {
    fn render(&self, document: &DocumentRef) -> Result<String, ReconError> {
        let unreadable = |reason: String| ReconError::DocumentUnreadable {
            document: document.name.clone(),
            reason,
        };

        let is_pdf = document
            .path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));

        if is_pdf {
            run_pdftotext(&document.path).map_err(unreadable)
        } else {
            crate::csv::read_file_as_utf8(&document.path).map_err(|e| unreadable(e.to_string()))
        }
    }
}

/// Run `pdftotext -layout <file> -` and capture stdout.
fn run_pdftotext(file: &Path) -> Result<String, String> {
    which::which("pdftotext")
        .map_err(|_| "pdftotext not installed (poppler-utils)".to_string())?;

    let output = Command::new("pdftotext")
        .arg("-layout")
        .arg(file)
        .arg("-")
        .output()
        .map_err(|e| format!("failed to run pdftotext: {e}"))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!(
            "pdftotext failed (exit {}): {}",
            output.status.code().unwrap_or(-1),
            stderr.trim(),
        ));
    }

    let text = String::from_utf8_lossy(&output.stdout).into_owned();
    if text.trim().is_empty() {
        return Err("PDF appears scanned/image-only, no text layer".to_string());
    }
    Ok(text)
}
