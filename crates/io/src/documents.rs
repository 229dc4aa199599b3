// Receipt discovery

use std::path::Path;

use regcheck_recon::{DocumentRef, ReconError};

/// List the documents directly inside `dir` whose extension (case-insensitive)
/// is in `extensions`, sorted by file name. Subdirectories are not descended.
pub fn discover(dir: &Path, extensions: &[String]) -> Result<Vec<DocumentRef>, ReconError> {
    let entries = std::fs::read_dir(dir)
        .map_err(|e| ReconError::Io(format!("cannot read {}: {e}", dir.display())))?;

    let mut documents = Vec::new();
    for entry in entries {
        let entry =
            entry.map_err(|e| ReconError::Io(format!("cannot read {}: {e}", dir.display())))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let matches = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| extensions.iter().any(|want| want.eq_ignore_ascii_case(e)));
        if !matches {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        documents.push(DocumentRef::new(name, path));
    }

    documents.sort_by(|a, b| a.name.cmp(&b.name));
    tracing::debug!(dir = %dir.display(), count = documents.len(), "documents discovered");
    Ok(documents)
}
