//! Scanning pass: render every document, extract its fields, and index the
//! results by identifier for the join.
//!
//! Documents are split into contiguous chunks, one per worker thread. Results
//! are folded back in input order, so which duplicate wins never depends on
//! thread scheduling.

use std::collections::HashMap;

use crate::config::DuplicatePolicy;
use crate::error::ReconError;
use crate::extract::extract;
use crate::model::{DocumentRef, DuplicateIdentifier, ExtractedRecord, UnreadableDocument};

/// Turns a document into plain text. Implementations must be safe to call from
/// several worker threads at once.
pub trait DocumentRenderer: Sync {
    fn render(&self, document: &DocumentRef) -> Result<String, ReconError>;
}

/// One document's outcome, before indexing.
#[derive(Debug, Clone)]
pub struct ScannedDocument {
    pub record: ExtractedRecord,
    /// Set when rendering failed and `record` holds only defaults.
    pub unreadable: Option<String>,
}

#[derive(Debug, Default)]
pub struct ScanOutput {
    /// One record per input document, in input order.
    pub records: Vec<ExtractedRecord>,
    /// Join map: identifier -> the last document carrying it.
    pub by_identifier: HashMap<String, ExtractedRecord>,
    pub unreadable: Vec<UnreadableDocument>,
    pub unidentified: Vec<String>,
    pub duplicates: Vec<DuplicateIdentifier>,
}

/// Render + extract one document. A render failure degrades to the all-default record.
pub fn scan_document<R: DocumentRenderer + ?Sized>(
    renderer: &R,
    document: &DocumentRef,
) -> ScannedDocument {
    match renderer.render(document) {
        Ok(text) => {
            let record = extract(&text, &document.name);
            tracing::debug!(
                document = %document.name,
                identifier = %record.identifier,
                registration = %record.registration_number,
                "extracted"
            );
            ScannedDocument {
                record,
                unreadable: None,
            }
        }
        Err(e) => {
            tracing::warn!(
                document = %document.name,
                error = %e,
                "document unreadable, using defaults"
            );
            ScannedDocument {
                record: ExtractedRecord::unknown(&document.name),
                unreadable: Some(e.to_string()),
            }
        }
    }
}

/// Scan all documents on up to `workers` threads, then index by identifier.
pub fn scan_documents<R: DocumentRenderer + ?Sized>(
    renderer: &R,
    documents: &[DocumentRef],
    workers: usize,
    policy: DuplicatePolicy,
) -> Result<ScanOutput, ReconError> {
    let scanned = scan_parallel(renderer, documents, workers);
    index_scanned(scanned, policy)
}

fn scan_parallel<R: DocumentRenderer + ?Sized>(
    renderer: &R,
    documents: &[DocumentRef],
    workers: usize,
) -> Vec<ScannedDocument> {
    if documents.is_empty() {
        return Vec::new();
    }
    let workers = workers.clamp(1, documents.len());
    if workers == 1 {
        return documents.iter().map(|d| scan_document(renderer, d)).collect();
    }

    let chunk_size = documents.len().div_ceil(workers);
    std::thread::scope(|scope| {
        let handles: Vec<_> = documents
            .chunks(chunk_size)
            .map(|chunk| {
                scope.spawn(move || {
                    chunk
                        .iter()
                        .map(|d| scan_document(renderer, d))
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        // Joining in spawn order restores input order.
        handles
            .into_iter()
            .flat_map(|h| match h.join() {
                Ok(chunk) => chunk,
                Err(panic) => std::panic::resume_unwind(panic),
            })
            .collect()
    })
}

/// Fold scanned documents (input order) into the join map.
pub fn index_scanned(
    scanned: Vec<ScannedDocument>,
    policy: DuplicatePolicy,
) -> Result<ScanOutput, ReconError> {
    let mut out = ScanOutput::default();
    // identifier -> (kept source, superseded sources)
    let mut seen: HashMap<String, (String, Vec<String>)> = HashMap::new();
    let mut duplicate_order: Vec<String> = Vec::new();

    for doc in scanned {
        let record = doc.record;

        if let Some(reason) = doc.unreadable {
            out.unreadable.push(UnreadableDocument {
                document: record.source_name.clone(),
                reason,
            });
        }

        if !record.has_identifier() {
            out.unidentified.push(record.source_name.clone());
            out.records.push(record);
            continue;
        }

        match seen.get_mut(&record.identifier) {
            Some((kept, superseded)) => {
                if policy == DuplicatePolicy::Error {
                    return Err(ReconError::DuplicateIdentifier {
                        identifier: record.identifier.clone(),
                        first: kept.clone(),
                        second: record.source_name.clone(),
                    });
                }
                if policy == DuplicatePolicy::Warn {
                    tracing::warn!(
                        identifier = %record.identifier,
                        previous = %kept,
                        current = %record.source_name,
                        "duplicate identifier, later document wins"
                    );
                }
                if superseded.is_empty() {
                    duplicate_order.push(record.identifier.clone());
                }
                superseded.push(std::mem::replace(kept, record.source_name.clone()));
            }
            None => {
                seen.insert(
                    record.identifier.clone(),
                    (record.source_name.clone(), Vec::new()),
                );
            }
        }

        out.by_identifier
            .insert(record.identifier.clone(), record.clone());
        out.records.push(record);
    }

    if policy != DuplicatePolicy::LastWins {
        for identifier in duplicate_order {
            if let Some((kept, superseded)) = seen.remove(&identifier) {
                out.duplicates.push(DuplicateIdentifier {
                    identifier,
                    kept,
                    superseded,
                });
            }
        }
    }

    Ok(out)
}
