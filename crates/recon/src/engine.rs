use std::collections::{HashMap, HashSet};

use crate::classify::{reconcile, REMARK_NOT_UPLOADED};
use crate::evidence::compute_summary;
use crate::model::{
    Diagnostics, ExtractedRecord, ReconMeta, ReconResult, ReferenceRecord, RegistrationType,
    ReportRow, Status, Verdict,
};
use crate::scan::ScanOutput;

/// Join reference rows against extracted documents and classify each row.
///
/// Output order is exactly `references` order; the map carries no order of its own.
pub fn run(
    references: &[ReferenceRecord],
    extracted_by_identifier: &HashMap<String, ExtractedRecord>,
) -> Vec<ReportRow> {
    references
        .iter()
        .map(|reference| {
            match extracted_by_identifier.get(&reference.normalized_identifier()) {
                Some(extracted) => {
                    let verdict = reconcile(extracted, reference);
                    report_row(reference, Some(extracted), verdict)
                }
                None => report_row(
                    reference,
                    None,
                    Verdict {
                        status: Status::Pending,
                        remark: REMARK_NOT_UPLOADED.to_string(),
                        registration_type: RegistrationType::None,
                    },
                ),
            }
        })
        .collect()
}

fn report_row(
    reference: &ReferenceRecord,
    extracted: Option<&ExtractedRecord>,
    verdict: Verdict,
) -> ReportRow {
    ReportRow {
        chassis_number: reference.chassis_number.clone(),
        customer_name: reference.customer_name.clone(),
        dealer_code: reference.dealer_code.clone(),
        dealer_name: reference.dealer_name.clone(),
        model: reference.model.clone(),
        variant_description: reference.variant_description.clone(),
        vehicle_status: reference.vehicle_status.clone(),
        model_year: reference.model_year.clone(),
        variant_year: reference.variant_year.clone(),
        registration_date: extracted
            .map(|e| e.registration_date.clone())
            .unwrap_or_default(),
        registration_type: verdict.registration_type,
        certificate_attached: extracted.is_some(),
        status: verdict.status,
        remark: verdict.remark,
    }
}

/// Full run over a completed scan: report rows, summary, meta and diagnostics.
/// Must only be called once the scanning pass has returned.
pub fn run_with_scan(
    config_name: &str,
    references: &[ReferenceRecord],
    scan: &ScanOutput,
) -> ReconResult {
    let rows = run(references, &scan.by_identifier);
    let summary = compute_summary(&rows, scan.records.len());

    let referenced: HashSet<String> = references
        .iter()
        .map(|r| r.normalized_identifier())
        .collect();
    let mut orphaned: Vec<String> = scan
        .by_identifier
        .values()
        .filter(|e| !referenced.contains(&e.identifier))
        .map(|e| e.source_name.clone())
        .collect();
    orphaned.sort();

    tracing::info!(
        rows = summary.total_rows,
        approved = summary.approved,
        held = summary.held,
        rejected = summary.rejected,
        pending = summary.pending,
        documents = summary.documents_scanned,
        "reconciliation complete"
    );

    ReconResult {
        meta: ReconMeta {
            config_name: config_name.to_string(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
        },
        summary,
        rows,
        diagnostics: Diagnostics {
            unreadable: scan.unreadable.clone(),
            unidentified: scan.unidentified.clone(),
            duplicates: scan.duplicates.clone(),
            orphaned,
        },
    }
}
