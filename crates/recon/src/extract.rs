use crate::model::{ExtractedRecord, NO_DATE, UNKNOWN_IDENTIFIER, UNKNOWN_NAME};
use crate::patterns::{self, NAME_MARKER, NAME_SECTION_GUARDS, NEW_REGISTRATION};

/// Pull identifier, customer name, registration number and date out of rendered receipt text.
///
/// Pure and single-pass: the same text always yields the same record. A field that is
/// not found falls back to its sentinel (`UNKNOWN`, `Unknown`, `NEW`, `N/A`), never an error.
pub fn extract(text: &str, source_name: &str) -> ExtractedRecord {
    let identifier = patterns::first_identifier(text)
        .map(|id| id.to_uppercase())
        .unwrap_or_else(|| UNKNOWN_IDENTIFIER.to_string());

    let registration_date = patterns::first_date(text)
        .unwrap_or(NO_DATE)
        .to_string();

    ExtractedRecord {
        identifier,
        customer_name: clean_name(&find_customer_name(text)),
        registration_number: registration_number(text),
        registration_date,
        source_name: source_name.to_string(),
    }
}

/// An explicit `NEW` anywhere beats any plate-shaped token. No plate at all also
/// reads as `NEW`: a receipt without one is for a temporary registration.
fn registration_number(text: &str) -> String {
    if patterns::has_new_marker(text) {
        return NEW_REGISTRATION.to_string();
    }
    patterns::first_plate(text)
        .unwrap_or(NEW_REGISTRATION)
        .to_string()
}

/// Only the first marker line is considered, even when it yields nothing.
fn find_customer_name(text: &str) -> String {
    let lines: Vec<&str> = text.split('\n').collect();

    let Some(pos) = lines.iter().position(|line| line.contains(NAME_MARKER)) else {
        return UNKNOWN_NAME.to_string();
    };

    let inline = lines[pos].replace(NAME_MARKER, "").replace(':', "");
    let inline = inline.trim();
    if inline.chars().count() > 2 {
        return inline.to_string();
    }

    // Label on its own line: the name is printed underneath
    if let Some(next) = lines.get(pos + 1).map(|l| l.trim()) {
        if !next.is_empty() && !NAME_SECTION_GUARDS.iter().any(|g| next.contains(g)) {
            return next.to_string();
        }
    }

    UNKNOWN_NAME.to_string()
}

/// Keep ASCII letters, whitespace and periods. May leave an empty string.
fn clean_name(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphabetic() || c.is_whitespace() || *c == '.')
        .collect::<String>()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECEIPT: &str = "\
            GOVERNMENT OF KARNATAKA
            Transport Department - Fee Receipt
Receipt No: KA0524R00012                     Receipt Date: 12-Mar-2024 10:42
Received From: John K. Doe
Vehicle No: KA05MN1234         Chassis No: MA3ERLF1S00123456
Amount: 1,250.00
";

    #[test]
    fn extracts_all_fields() {
        let rec = extract(RECEIPT, "john.pdf");
        assert_eq!(rec.identifier, "MA3ERLF1S00123456");
        assert_eq!(rec.customer_name, "John K. Doe");
        assert_eq!(rec.registration_number, "KA05MN1234");
        assert_eq!(rec.registration_date, "12-Mar-2024");
        assert_eq!(rec.source_name, "john.pdf");
    }

    #[test]
    fn empty_text_yields_sentinels() {
        let rec = extract("", "blank.pdf");
        assert_eq!(rec, ExtractedRecord::unknown("blank.pdf"));
    }

    #[test]
    fn identifier_is_uppercased() {
        let rec = extract("chassis ma3erlf1s00123456", "x");
        assert_eq!(rec.identifier, "MA3ERLF1S00123456");
    }

    #[test]
    fn first_identifier_wins() {
        let rec = extract("MBHCZC63SPJ123456 MA3ERLF1S00123456", "x");
        assert_eq!(rec.identifier, "MBHCZC63SPJ123456");
    }

    #[test]
    fn first_date_wins() {
        let rec = extract("Paid 01-Feb-2024, valid till 01-Feb-2025", "x");
        assert_eq!(rec.registration_date, "01-Feb-2024");
    }

    #[test]
    fn first_plate_wins() {
        let rec = extract("Old KA05MN1234 new MH12DE5678", "x");
        assert_eq!(rec.registration_number, "KA05MN1234");
    }

    #[test]
    fn new_marker_overrides_plate() {
        let rec = extract("Vehicle No: NEW\nRef KA05MN1234", "x");
        assert_eq!(rec.registration_number, "NEW");
    }

    #[test]
    fn missing_plate_defaults_to_new() {
        let rec = extract("Vehicle No: T0524KA1234A", "x");
        assert_eq!(rec.registration_number, "NEW");
    }

    #[test]
    fn name_on_following_line() {
        let text = "Received From:\n   RAMESH KUMAR  \nVehicle Class: LMV";
        assert_eq!(extract(text, "x").customer_name, "RAMESH KUMAR");
    }

    #[test]
    fn following_line_section_header_is_not_a_name() {
        let text = "Received From:\nReceipt Details\nRAMESH KUMAR";
        assert_eq!(extract(text, "x").customer_name, "Unknown");

        let text = "Received From\nVehicle No: NEW";
        assert_eq!(extract(text, "x").customer_name, "Unknown");
    }

    #[test]
    fn blank_following_line_is_not_a_name() {
        let text = "Received From:\n\nRAMESH KUMAR";
        assert_eq!(extract(text, "x").customer_name, "Unknown");
    }

    #[test]
    fn only_first_marker_line_is_considered() {
        let text = "Received From:\nReceipt Details\nReceived From: SITA DEVI";
        assert_eq!(extract(text, "x").customer_name, "Unknown");

        let text = "Received From: ANIL\nReceived From: SITA DEVI";
        assert_eq!(extract(text, "x").customer_name, "ANIL");
    }

    #[test]
    fn short_inline_remainder_falls_through_to_next_line() {
        // "Mr" is only 2 characters
        let text = "Received From: Mr\nANIL SHARMA";
        assert_eq!(extract(text, "x").customer_name, "ANIL SHARMA");
    }

    #[test]
    fn name_is_cleaned_of_digits_and_punctuation() {
        let text = "Received From: S/O 42 R. Iyer, (Bengaluru)";
        assert_eq!(extract(text, "x").customer_name, "SO  R. Iyer Bengaluru");
    }

    #[test]
    fn name_cleaned_to_empty_is_kept_empty() {
        let text = "Received From: 1234-5678";
        assert_eq!(extract(text, "x").customer_name, "");
    }

    #[test]
    fn no_marker_means_unknown() {
        assert_eq!(extract("Customer: A B", "x").customer_name, "Unknown");
    }

    #[test]
    fn extraction_is_idempotent() {
        assert_eq!(extract(RECEIPT, "a"), extract(RECEIPT, "a"));
    }
}
