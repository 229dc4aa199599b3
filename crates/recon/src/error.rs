use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReconError {
    /// TOML parse / deserialization error.
    #[error("config parse error: {0}")]
    ConfigParse(String),
    /// Config validation error (empty name, no extensions, zero workers, etc.).
    #[error("config validation error: {0}")]
    ConfigValidation(String),
    /// Reference table lacks a required column. Fatal, raised before any document is read.
    #[error("reference table: missing column '{column}'")]
    MissingColumn { column: String },
    /// A single document could not be rendered to text.
    #[error("document '{document}' is unreadable: {reason}")]
    DocumentUnreadable { document: String, reason: String },
    /// Two documents carry the same identifier and the duplicate policy is `error`.
    #[error("identifier {identifier} appears in both '{first}' and '{second}'")]
    DuplicateIdentifier {
        identifier: String,
        first: String,
        second: String,
    },
    /// IO error (file read, CSV decode, etc.).
    #[error("IO error: {0}")]
    Io(String),
}

