use serde::Serialize;

// ---------------------------------------------------------------------------
// Sentinels
// ---------------------------------------------------------------------------

/// Identifier of a document where no VIN-shaped token was found.
pub const UNKNOWN_IDENTIFIER: &str = "UNKNOWN";
/// Customer name of a document with no `Received From` line.
pub const UNKNOWN_NAME: &str = "Unknown";
/// Registration date of a document with no `DD-Mon-YYYY` token.
pub const NO_DATE: &str = "N/A";

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// A document handed to the scanning pass. `name` is what reports show;
/// `path` is what the renderer opens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRef {
    pub name: String,
    pub path: std::path::PathBuf,
}

impl DocumentRef {
    pub fn new(name: impl Into<String>, path: impl Into<std::path::PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

/// Structured fields pulled out of one document's text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedRecord {
    pub identifier: String,
    pub customer_name: String,
    pub registration_number: String,
    pub registration_date: String,
    pub source_name: String,
}

impl ExtractedRecord {
    /// The record for a document whose text yielded nothing (or could not be read).
    pub fn unknown(source_name: impl Into<String>) -> Self {
        Self {
            identifier: UNKNOWN_IDENTIFIER.to_string(),
            customer_name: UNKNOWN_NAME.to_string(),
            registration_number: crate::patterns::NEW_REGISTRATION.to_string(),
            registration_date: NO_DATE.to_string(),
            source_name: source_name.into(),
        }
    }

    pub fn has_identifier(&self) -> bool {
        self.identifier != UNKNOWN_IDENTIFIER
    }
}

/// One row of the reference table, in the shape the dealer sheet declares it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReferenceRecord {
    /// 1-based data row (header excluded).
    pub row: usize,
    pub chassis_number: String,
    pub customer_name: String,
    pub dealer_code: String,
    pub dealer_name: String,
    pub model: String,
    pub variant_description: String,
    pub vehicle_status: String,
    pub model_year: String,
    pub variant_year: String,
}

impl ReferenceRecord {
    /// Join key: the chassis number uppercased and trimmed.
    pub fn normalized_identifier(&self) -> String {
        normalize_identifier(&self.chassis_number)
    }
}

pub fn normalize_identifier(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Names compare uppercase with periods dropped: `John K. Doe` == `JOHN K DOE`.
pub fn normalize_name(raw: &str) -> String {
    raw.to_uppercase().replace('.', "").trim().to_string()
}

// ---------------------------------------------------------------------------
// Verdict
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Status {
    Approve,
    Hold,
    Reject,
    Pending,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Approve => write!(f, "Approve"),
            Self::Hold => write!(f, "Hold"),
            Self::Reject => write!(f, "Reject"),
            Self::Pending => write!(f, "Pending"),
        }
    }
}

/// `None` is the empty cell of a row with no matching document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RegistrationType {
    Permanent,
    Temporary,
    #[serde(rename = "")]
    None,
}

impl std::fmt::Display for RegistrationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Permanent => write!(f, "Permanent"),
            Self::Temporary => write!(f, "Temporary"),
            Self::None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub status: Status,
    pub remark: String,
    pub registration_type: RegistrationType,
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// Output column names, in order. Downstream sheets key on these exact strings.
pub const REPORT_COLUMNS: [&str; 14] = [
    "Chassis number",
    "Customer name",
    "Dealer code",
    "Dealer name",
    "Model",
    "Variant description",
    "Vehicle status",
    "MY",
    "VY",
    "Registration date",
    "Permanent / Temporary",
    "Certificate Attached",
    "RTO status",
    "Remarks",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    #[serde(rename = "Chassis number")]
    pub chassis_number: String,
    #[serde(rename = "Customer name")]
    pub customer_name: String,
    #[serde(rename = "Dealer code")]
    pub dealer_code: String,
    #[serde(rename = "Dealer name")]
    pub dealer_name: String,
    #[serde(rename = "Model")]
    pub model: String,
    #[serde(rename = "Variant description")]
    pub variant_description: String,
    #[serde(rename = "Vehicle status")]
    pub vehicle_status: String,
    #[serde(rename = "MY")]
    pub model_year: String,
    #[serde(rename = "VY")]
    pub variant_year: String,
    #[serde(rename = "Registration date")]
    pub registration_date: String,
    #[serde(rename = "Permanent / Temporary")]
    pub registration_type: RegistrationType,
    #[serde(rename = "Certificate Attached", serialize_with = "yes_no")]
    pub certificate_attached: bool,
    #[serde(rename = "RTO status")]
    pub status: Status,
    #[serde(rename = "Remarks")]
    pub remark: String,
}

fn yes_no<S: serde::Serializer>(value: &bool, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(if *value { "Yes" } else { "No" })
}

impl ReportRow {
    /// Cell values in `REPORT_COLUMNS` order.
    pub fn cells(&self) -> [String; 14] {
        [
            self.chassis_number.clone(),
            self.customer_name.clone(),
            self.dealer_code.clone(),
            self.dealer_name.clone(),
            self.model.clone(),
            self.variant_description.clone(),
            self.vehicle_status.clone(),
            self.model_year.clone(),
            self.variant_year.clone(),
            self.registration_date.clone(),
            self.registration_type.to_string(),
            if self.certificate_attached { "Yes" } else { "No" }.to_string(),
            self.status.to_string(),
            self.remark.clone(),
        ]
    }
}

// ---------------------------------------------------------------------------
// Scan diagnostics + Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnreadableDocument {
    pub document: String,
    pub reason: String,
}

/// Several documents resolved to one identifier; only `kept` takes part in the join.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateIdentifier {
    pub identifier: String,
    pub kept: String,
    pub superseded: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Diagnostics {
    pub unreadable: Vec<UnreadableDocument>,
    /// Documents where no identifier was found.
    pub unidentified: Vec<String>,
    pub duplicates: Vec<DuplicateIdentifier>,
    /// Documents whose identifier matched no reference row.
    pub orphaned: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconSummary {
    pub total_rows: usize,
    pub approved: usize,
    pub held: usize,
    pub rejected: usize,
    pub pending: usize,
    pub documents_scanned: usize,
}

impl ReconSummary {
    /// Rows a reviewer still has to act on.
    pub fn needs_attention(&self) -> usize {
        self.held + self.rejected + self.pending
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconMeta {
    pub config_name: String,
    pub engine_version: String,
    pub run_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconResult {
    pub meta: ReconMeta,
    pub summary: ReconSummary,
    pub rows: Vec<ReportRow>,
    pub diagnostics: Diagnostics,
}
