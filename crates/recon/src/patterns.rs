//! Fixed text-matching rules shared by extraction and classification.
//!
//! Every `first_*` helper returns the leftmost match only. Callers depend on
//! that: receipts present the target field before any incidental lookalike.

use once_cell::sync::Lazy;
use regex::Regex;

/// 17-character VIN. The alphabet never contains I, O or Q.
static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b([A-HJ-NPR-Z0-9]{17})\b").expect("identifier pattern"));

/// `DD-Mon-YYYY`, e.g. `05-Jan-2024`.
static DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]{2}-[A-Za-z]{3}-[0-9]{4})").expect("date pattern"));

static NEW_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bNEW\b").expect("NEW marker pattern"));

/// State code, district code, 0-3 series letters, 4-digit number: `KA05MN1234`.
static PLATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b([A-Z]{2}[0-9]{2}[A-Z]{0,3}[0-9]{4})\b").expect("plate pattern")
});

static PLATE_ANCHORED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Z]{2}[0-9]{2}[A-Z]{0,3}[0-9]{4}$").expect("anchored plate pattern")
});

/// Bharat series: `22BH1234AB`.
static BHARAT_ANCHORED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{2}BH[0-9]{4}[A-Z]{2}$").expect("bharat pattern"));

/// Label that precedes the customer name on a receipt.
pub const NAME_MARKER: &str = "Received From";

/// Words that mark the line after a bare label as the next receipt section.
pub const NAME_SECTION_GUARDS: [&str; 2] = ["Receipt", "Vehicle"];

/// Literal registration number for a vehicle that has no permanent plate yet.
pub const NEW_REGISTRATION: &str = "NEW";

/// First identifier-shaped token, as it appears in the text.
pub fn first_identifier(text: &str) -> Option<&str> {
    IDENTIFIER.captures(text).and_then(|c| c.get(1)).map(|m| m.as_str())
}

pub fn first_date(text: &str) -> Option<&str> {
    DATE.find(text).map(|m| m.as_str())
}

/// True when the standalone word `NEW` appears anywhere.
pub fn has_new_marker(text: &str) -> bool {
    NEW_MARKER.is_match(text)
}

pub fn first_plate(text: &str) -> Option<&str> {
    PLATE.captures(text).and_then(|c| c.get(1)).map(|m| m.as_str())
}

/// Whole-string check against the permanent plate formats (state series or Bharat series).
/// The input is expected to be uppercase with spaces already removed.
pub fn is_permanent_format(registration: &str) -> bool {
    PLATE_ANCHORED.is_match(registration) || BHARAT_ANCHORED.is_match(registration)
}
