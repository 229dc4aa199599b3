use crate::model::{ReconSummary, ReportRow, Status};

/// Compute summary statistics from report rows.
pub fn compute_summary(rows: &[ReportRow], documents_scanned: usize) -> ReconSummary {
    let mut approved = 0;
    let mut held = 0;
    let mut rejected = 0;
    let mut pending = 0;

    for r in rows {
        match r.status {
            Status::Approve => approved += 1,
            Status::Hold => held += 1,
            Status::Reject => rejected += 1,
            Status::Pending => pending += 1,
        }
    }

    ReconSummary {
        total_rows: rows.len(),
        approved,
        held,
        rejected,
        pending,
        documents_scanned,
    }
}
