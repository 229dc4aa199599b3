//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract: scripts rely on them.
//!
//! # Exit Code Ranges
//!
//! | Range   | Domain           | Description                              |
//! |---------|------------------|------------------------------------------|
//! | 0       | Universal        | Success                                  |
//! | 2       | Universal        | CLI usage error (bad args, missing file) |
//! | 3       | Universal        | IO error (unreadable input, write failed)|
//! | 60-69   | check            | Reconciliation run codes                 |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant in the appropriate range
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Wire it into the relevant command's error handling

use regcheck_recon::ReconError;

// =============================================================================
// Universal (0-3)
// =============================================================================

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

/// IO error - reference sheet, receipt or output file could not be read/written.
pub const EXIT_IO: u8 = 3;

// =============================================================================
// Check (60-69)
// =============================================================================

/// Config failed to parse or validate.
pub const EXIT_CHECK_INVALID_CONFIG: u8 = 60;

/// Reference sheet has no chassis number column. Nothing was scanned.
pub const EXIT_CHECK_MISSING_COLUMN: u8 = 61;

/// Run failed after inputs were loaded (serialization, unexpected engine error).
pub const EXIT_CHECK_RUNTIME: u8 = 62;

/// Run completed but rows are Hold/Reject/Pending and `--fail-on-attention` was given.
pub const EXIT_CHECK_ATTENTION: u8 = 63;

/// Two receipts carry the same chassis number under `on_duplicate = "error"`.
pub const EXIT_CHECK_DUPLICATE: u8 = 64;

/// Map an engine error to its exit code.
pub fn recon_exit_code(err: &ReconError) -> u8 {
    match err {
        ReconError::ConfigParse(_) | ReconError::ConfigValidation(_) => EXIT_CHECK_INVALID_CONFIG,
        ReconError::MissingColumn { .. } => EXIT_CHECK_MISSING_COLUMN,
        ReconError::DuplicateIdentifier { .. } => EXIT_CHECK_DUPLICATE,
        ReconError::DocumentUnreadable { .. } | ReconError::Io(_) => EXIT_IO,
    }
}
