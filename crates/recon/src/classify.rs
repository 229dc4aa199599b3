use crate::model::{
    normalize_identifier, normalize_name, ExtractedRecord, ReferenceRecord, RegistrationType,
    Status, Verdict,
};
use crate::patterns::{self, NEW_REGISTRATION};

pub const REMARK_APPROVED: &str = "Approved";
pub const REMARK_TEMPORARY: &str = "Uploaded document is temporary registration. Kindly upload VAHAN screenshot/Permanent Registration copy/Tax paid receipt.";
pub const REMARK_RELATIONSHIP_PROOF: &str = "Customer name on DCP doesn't match with customer name on receipt. Please provide relationship proof between them.";
pub const REMARK_NOT_UPLOADED: &str = "Document not uploaded";

/// Permanent only for a real plate (state series or Bharat series); `NEW` and
/// anything unrecognised count as temporary.
pub fn registration_type(registration_number: &str) -> RegistrationType {
    let reg = registration_number.trim().to_uppercase();
    if reg == NEW_REGISTRATION {
        return RegistrationType::Temporary;
    }
    if patterns::is_permanent_format(&reg.replace(' ', "")) {
        RegistrationType::Permanent
    } else {
        RegistrationType::Temporary
    }
}

/// Decide the verdict for one document against one reference row.
///
/// Branches are evaluated top to bottom, first hit wins:
///
/// | chassis | name | registration | status  |
/// |---------|------|--------------|---------|
/// | same    | same | permanent    | Approve |
/// | same    | same | temporary    | Hold    |
/// | same    | diff | permanent    | Hold    |
/// | same    | diff | temporary    | Hold    |
/// | diff    | -    | -            | Reject  |
///
/// A name mismatch alone never rejects: it always goes to a human.
pub fn reconcile(extracted: &ExtractedRecord, reference: &ReferenceRecord) -> Verdict {
    let ex_identifier = normalize_identifier(&extracted.identifier);
    let ex_name = normalize_name(&extracted.customer_name);
    let ref_name = normalize_name(&reference.customer_name);
    let registration_type = registration_type(&extracted.registration_number);

    if ex_identifier != reference.normalized_identifier() {
        return Verdict {
            status: Status::Reject,
            remark: format!("Chassis Mismatch. PDF: {ex_identifier}"),
            registration_type,
        };
    }

    let (status, remark) = match (ex_name == ref_name, registration_type) {
        (true, RegistrationType::Permanent) => (Status::Approve, REMARK_APPROVED.to_string()),
        (true, _) => (Status::Hold, REMARK_TEMPORARY.to_string()),
        (false, RegistrationType::Permanent) => {
            (Status::Hold, REMARK_RELATIONSHIP_PROOF.to_string())
        }
        (false, _) => (
            Status::Hold,
            format!("Review Required. Name Mismatch ({ex_name}) & Temp Reg."),
        ),
    };

    Verdict {
        status,
        remark,
        registration_type,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extracted(id: &str, name: &str, reg: &str) -> ExtractedRecord {
        ExtractedRecord {
            identifier: id.into(),
            customer_name: name.into(),
            registration_number: reg.into(),
            registration_date: "12-Mar-2024".into(),
            source_name: "doc.pdf".into(),
        }
    }

    fn reference(chassis: &str, name: &str) -> ReferenceRecord {
        ReferenceRecord {
            row: 1,
            chassis_number: chassis.into(),
            customer_name: name.into(),
            ..Default::default()
        }
    }

    const VIN: &str = "MA3ERLF1S00123456";

    #[test]
    fn registration_type_classification() {
        assert_eq!(registration_type("KA05MN1234"), RegistrationType::Permanent);
        assert_eq!(registration_type("ka 05 mn 1234"), RegistrationType::Permanent);
        assert_eq!(registration_type("22BH1234AB"), RegistrationType::Permanent);
        assert_eq!(registration_type("NEW"), RegistrationType::Temporary);
        assert_eq!(registration_type(" new "), RegistrationType::Temporary);
        assert_eq!(registration_type("T0524KA1234A"), RegistrationType::Temporary);
        assert_eq!(registration_type(""), RegistrationType::Temporary);
    }

    #[test]
    fn approve_on_full_match_with_permanent_plate() {
        let v = reconcile(
            &extracted(VIN, "John K. Doe", "KA05MN1234"),
            &reference(VIN, "JOHN K DOE"),
        );
        assert_eq!(v.status, Status::Approve);
        assert_eq!(v.remark, "Approved");
        assert_eq!(v.registration_type, RegistrationType::Permanent);
    }

    #[test]
    fn hold_for_temporary_registration() {
        let v = reconcile(&extracted(VIN, "JOHN DOE", "NEW"), &reference(VIN, "John Doe"));
        assert_eq!(v.status, Status::Hold);
        assert!(v.remark.contains("VAHAN"));
        assert_eq!(v.registration_type, RegistrationType::Temporary);
    }

    #[test]
    fn hold_for_relationship_proof() {
        let v = reconcile(
            &extracted(VIN, "John K. Doe", "KA05MN1234"),
            &reference(VIN, "JANE DOE"),
        );
        assert_eq!(v.status, Status::Hold);
        assert!(v.remark.contains("relationship proof"));
        assert_eq!(v.registration_type, RegistrationType::Permanent);
    }

    #[test]
    fn hold_for_review_names_extracted_name() {
        let v = reconcile(&extracted(VIN, "Jane. Roe", "NEW"), &reference(VIN, "JOHN DOE"));
        assert_eq!(v.status, Status::Hold);
        assert_eq!(v.remark, "Review Required. Name Mismatch (JANE ROE) & Temp Reg.");
        assert_eq!(v.registration_type, RegistrationType::Temporary);
    }

    #[test]
    fn chassis_mismatch_rejects_even_when_everything_else_agrees() {
        let v = reconcile(
            &extracted("MBHCZC63SPJ123456", "JOHN DOE", "KA05MN1234"),
            &reference(VIN, "JOHN DOE"),
        );
        assert_eq!(v.status, Status::Reject);
        assert_eq!(v.remark, "Chassis Mismatch. PDF: MBHCZC63SPJ123456");
        assert_eq!(v.registration_type, RegistrationType::Permanent);
    }

    #[test]
    fn identifier_comparison_ignores_case_and_padding() {
        let v = reconcile(
            &extracted(VIN, "JOHN DOE", "KA05MN1234"),
            &reference(" ma3erlf1s00123456 ", "john doe"),
        );
        assert_eq!(v.status, Status::Approve);
    }

    #[test]
    fn empty_extracted_name_is_a_mismatch() {
        let v = reconcile(&extracted(VIN, "", "KA05MN1234"), &reference(VIN, "JOHN DOE"));
        assert_eq!(v.status, Status::Hold);
        assert_eq!(v.remark, REMARK_RELATIONSHIP_PROOF);
    }
}
