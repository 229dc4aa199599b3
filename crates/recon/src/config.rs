use serde::Deserialize;

use crate::error::ReconError;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CheckConfig {
    pub name: String,
    pub reference: ReferenceConfig,
    pub documents: DocumentsConfig,
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// The dealer sheet. CSV/TSV or any workbook format calamine opens.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReferenceConfig {
    pub file: String,
    /// Worksheet to read (workbooks only). Defaults to the first sheet.
    #[serde(default)]
    pub sheet: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DocumentsConfig {
    pub dir: String,
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

fn default_extensions() -> Vec<String> {
    vec!["pdf".into(), "txt".into()]
}

// ---------------------------------------------------------------------------
// Scan
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScanConfig {
    /// Worker threads for rendering + extraction. `None` = available parallelism.
    #[serde(default)]
    pub workers: Option<usize>,
    #[serde(default)]
    pub on_duplicate: DuplicatePolicy,
}

impl ScanConfig {
    pub fn worker_count(&self) -> usize {
        self.workers.unwrap_or_else(default_workers)
    }
}

/// Worker threads when none are configured: available parallelism, at least 1.
pub fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// What to do when two documents carry the same identifier.
/// The later document (input order) is the one that joins in every case but `Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    LastWins,
    #[default]
    Warn,
    Error,
}

impl std::fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LastWins => write!(f, "last_wins"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

impl std::str::FromStr for DuplicatePolicy {
    type Err = ReconError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "last_wins" => Ok(Self::LastWins),
            "warn" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            other => Err(ReconError::ConfigValidation(format!(
                "unknown duplicate policy '{other}' (expected last_wins, warn or error)"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(default)]
    pub json: Option<String>,
    #[serde(default)]
    pub csv: Option<String>,
    #[serde(default)]
    pub xlsx: Option<String>,
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl CheckConfig {
    pub fn from_toml(input: &str) -> Result<Self, ReconError> {
        let config: CheckConfig =
            toml::from_str(input).map_err(|e| ReconError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ReconError> {
        if self.name.trim().is_empty() {
            return Err(ReconError::ConfigValidation("name must not be empty".into()));
        }

        if self.reference.file.trim().is_empty() {
            return Err(ReconError::ConfigValidation(
                "reference.file must not be empty".into(),
            ));
        }

        if self.documents.dir.trim().is_empty() {
            return Err(ReconError::ConfigValidation(
                "documents.dir must not be empty".into(),
            ));
        }

        if self.documents.extensions.is_empty() {
            return Err(ReconError::ConfigValidation(
                "documents.extensions must list at least one extension".into(),
            ));
        }

        if self.scan.workers == Some(0) {
            return Err(ReconError::ConfigValidation(
                "scan.workers must be at least 1".into(),
            ));
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
