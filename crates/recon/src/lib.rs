//! `regcheck-recon`: receipt field extraction and registration reconciliation.
//!
//! Pure engine crate: extraction and classification are plain functions; the
//! scanning pass takes a [`DocumentRenderer`] so file access stays outside.

pub mod classify;
pub mod config;
pub mod engine;
pub mod error;
pub mod evidence;
pub mod extract;
pub mod model;
pub mod patterns;
pub mod reference;
pub mod scan;

pub use classify::reconcile;
pub use config::{CheckConfig, DuplicatePolicy};
pub use engine::{run, run_with_scan};
pub use error::ReconError;
pub use extract::extract;
pub use model::{
    DocumentRef, ExtractedRecord, ReconResult, ReferenceRecord, RegistrationType, ReportRow,
    Status, Verdict,
};
pub use reference::ReferenceTable;
pub use scan::{scan_documents, DocumentRenderer, ScanOutput};
