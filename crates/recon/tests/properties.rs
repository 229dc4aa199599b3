// Property-based tests for extraction and the reconciliation join.
// CI: 256 cases (default). Soak: PROPTEST_CASES=10000 cargo test --release

use std::collections::HashMap;

use proptest::prelude::*;
use regcheck_recon::model::ReferenceRecord;
use regcheck_recon::scan::{index_scanned, ScannedDocument};
use regcheck_recon::{extract, reconcile, run, DuplicatePolicy, ExtractedRecord, Status};

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

fn config_256() -> ProptestConfig {
    ProptestConfig {
        cases: std::env::var("PROPTEST_CASES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(256),
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

fn arb_vin() -> impl Strategy<Value = String> {
    r"[A-HJ-NPR-Z0-9]{17}"
}

fn arb_name() -> impl Strategy<Value = String> {
    r"[A-Z][a-z]{1,8}( [A-Z]\.?)? [A-Z][a-z]{1,10}"
}

fn arb_plate() -> impl Strategy<Value = String> {
    prop_oneof![
        r"[A-Z]{2}[0-9]{2}[A-Z]{0,3}[0-9]{4}",
        r"[0-9]{2}BH[0-9]{4}[A-Z]{2}",
    ]
}

fn arb_registration() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => arb_plate(),
        1 => Just("NEW".to_string()),
    ]
}

fn reference(row: usize, chassis: &str, name: &str) -> ReferenceRecord {
    ReferenceRecord {
        row,
        chassis_number: chassis.to_string(),
        customer_name: name.to_string(),
        ..Default::default()
    }
}

fn extracted(vin: &str, name: &str, reg: &str, source: &str) -> ExtractedRecord {
    ExtractedRecord {
        identifier: vin.to_string(),
        customer_name: name.to_string(),
        registration_number: reg.to_string(),
        registration_date: "01-Jan-2024".to_string(),
        source_name: source.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config_256())]

    /// Re-running extraction on identical text yields an identical record.
    #[test]
    fn extraction_is_idempotent(text in r"(?s).{0,400}") {
        prop_assert_eq!(extract(&text, "doc"), extract(&text, "doc"));
    }

    /// A synthesized receipt always yields back its own fields.
    #[test]
    fn synthesized_receipt_round_trips(
        vin in arb_vin(),
        name in arb_name(),
        plate in r"[A-Z]{2}[0-9]{2}[A-Z]{0,3}[0-9]{4}",
    ) {
        let text = format!(
            "Fee Receipt\nReceived From: {name}\nVehicle No: {plate}\n\
             Chassis No: {vin}\nDate: 05-Jan-2024\n"
        );
        let rec = extract(&text, "doc");
        prop_assert_eq!(rec.customer_name, name);
        prop_assert_eq!(rec.registration_number, plate);
        prop_assert_eq!(rec.registration_date, "05-Jan-2024");
        // The plate line comes first; it must never be mistaken for the VIN.
        prop_assert_eq!(rec.identifier, vin);
    }

    /// Differing identifiers reject, whatever the name and plate say.
    #[test]
    fn identifier_mismatch_always_rejects(
        a in arb_vin(),
        b in arb_vin(),
        name in arb_name(),
        reg in arb_registration(),
    ) {
        prop_assume!(a != b);
        let v = reconcile(&extracted(&a, &name, &reg, "doc"), &reference(1, &b, &name));
        prop_assert_eq!(v.status, Status::Reject);
    }

    /// Same identifier, same name, permanent plate: approved.
    #[test]
    fn full_match_with_plate_approves(vin in arb_vin(), name in arb_name(), plate in arb_plate()) {
        let v = reconcile(
            &extracted(&vin, &name, &plate, "doc"),
            &reference(1, &vin.to_lowercase(), &name.to_uppercase().replace('.', "")),
        );
        prop_assert_eq!(v.status, Status::Approve);
    }

    /// Same identifier never rejects: a name mismatch is held for review.
    #[test]
    fn name_mismatch_never_rejects(
        vin in arb_vin(),
        a in arb_name(),
        b in arb_name(),
        reg in arb_registration(),
    ) {
        let v = reconcile(&extracted(&vin, &a, &reg, "doc"), &reference(1, &vin, &b));
        prop_assert!(v.status == Status::Approve || v.status == Status::Hold);
    }

    /// Report rows follow reference order and count for any document order.
    #[test]
    fn report_order_follows_reference_order(
        vins in prop::collection::hash_set(arb_vin(), 1..20),
        attach_mask in prop::collection::vec(any::<bool>(), 20),
        shuffle_seed in any::<u64>(),
    ) {
        let vins: Vec<String> = vins.into_iter().collect();
        let refs: Vec<ReferenceRecord> = vins
            .iter()
            .enumerate()
            .map(|(i, v)| reference(i + 1, v, "A B"))
            .collect();

        let mut docs: Vec<ExtractedRecord> = vins
            .iter()
            .zip(&attach_mask)
            .filter(|(_, attach)| **attach)
            .map(|(v, _)| extracted(v, "A B", "KA05MN1234", &format!("{v}.pdf")))
            .collect();

        // Deterministic shuffle: rotate by the seed.
        if !docs.is_empty() {
            let k = (shuffle_seed as usize) % docs.len();
            docs.rotate_left(k);
        }

        let scanned: Vec<ScannedDocument> = docs
            .into_iter()
            .map(|record| ScannedDocument { record, unreadable: None })
            .collect();
        let scan = index_scanned(scanned, DuplicatePolicy::Warn).unwrap();
        let rows = run(&refs, &scan.by_identifier);

        prop_assert_eq!(rows.len(), refs.len());
        for (i, (row, r)) in rows.iter().zip(&refs).enumerate() {
            prop_assert_eq!(&row.chassis_number, &r.chassis_number);
            let attached = attach_mask[i];
            prop_assert_eq!(row.certificate_attached, attached);
            if attached {
                prop_assert_eq!(row.status, Status::Approve);
            } else {
                prop_assert_eq!(row.status, Status::Pending);
            }
        }
    }

    /// Rows with no matching document are Pending whatever the sheet says.
    #[test]
    fn unmatched_rows_are_pending(vin in arb_vin(), name in arb_name()) {
        let rows = run(&[reference(1, &vin, &name)], &HashMap::new());
        prop_assert_eq!(rows[0].status, Status::Pending);
        prop_assert!(!rows[0].certificate_attached);
    }
}
