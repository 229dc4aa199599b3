// regcheck CLI - reconcile RTO fee receipts against a dealer sheet

mod check;
mod exit_codes;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use regcheck_recon::DuplicatePolicy;

use exit_codes::{recon_exit_code, EXIT_IO, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "regcheck")]
#[command(about = "Check vehicle registration receipts against a dealer reference sheet")]
#[command(version)]
struct Cli {
    /// More log output on stderr (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a check from a TOML config file
    #[command(after_help = "\
Examples:
  regcheck run march.toml
  regcheck run march.toml --json
  regcheck run march.toml --output result.json
  regcheck run march.toml --fail-on-attention")]
    Run {
        /// Path to the .toml config file
        config: PathBuf,

        /// Output JSON to stdout instead of human summary
        #[arg(long)]
        json: bool,

        /// Write JSON output to file
        #[arg(long)]
        output: Option<PathBuf>,

        /// Exit 63 when any row is Hold, Reject or Pending
        #[arg(long)]
        fail_on_attention: bool,
    },

    /// Run a check from flags, without a config file
    #[command(after_help = "\
Examples:
  regcheck check --reference dealers.xlsx --documents receipts/
  regcheck check --reference dealers.csv --documents receipts/ --xlsx status.xlsx
  regcheck check --reference dealers.xlsx --sheet March --documents receipts/ --json
  regcheck check --reference dealers.csv --documents receipts/ --on-duplicate error")]
    Check {
        /// Dealer reference sheet (csv, tsv, xlsx, xls, xlsb, ods)
        #[arg(long)]
        reference: PathBuf,

        /// Directory of receipts
        #[arg(long)]
        documents: PathBuf,

        /// Worksheet name for workbooks (default: first sheet)
        #[arg(long)]
        sheet: Option<String>,

        /// Receipt file extensions to pick up
        #[arg(long, value_delimiter = ',', default_value = "pdf,txt")]
        extensions: Vec<String>,

        /// Worker threads (default: available parallelism)
        #[arg(long, env = "REGCHECK_WORKERS")]
        workers: Option<usize>,

        /// What to do when two receipts carry the same chassis number:
        /// last_wins, warn or error
        #[arg(long, default_value = "warn")]
        on_duplicate: DuplicatePolicy,

        /// Write the report as CSV
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Write the report as XLSX
        #[arg(long)]
        xlsx: Option<PathBuf>,

        /// Output JSON to stdout instead of human summary
        #[arg(long)]
        json: bool,

        /// Exit 63 when any row is Hold, Reject or Pending
        #[arg(long)]
        fail_on_attention: bool,
    },

    /// Show the fields extracted from a single receipt
    #[command(after_help = "\
Examples:
  regcheck extract receipts/KA05MN1234.pdf
  regcheck extract receipts/scan.txt --json")]
    Extract {
        /// Receipt file (.pdf needs pdftotext on PATH)
        document: PathBuf,

        /// Output JSON to stdout
        #[arg(long)]
        json: bool,
    },

    /// Validate a config without running
    #[command(after_help = "\
Examples:
  regcheck validate march.toml")]
    Validate {
        /// Path to the .toml config file
        config: PathBuf,
    },
}

fn init_logging(verbose: u8) {
    use tracing_subscriber::EnvFilter;

    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // stdout is reserved for --json
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Run { config, json, output, fail_on_attention } => {
            check::cmd_run(config, json, output, fail_on_attention)
        }
        Commands::Check {
            reference,
            documents,
            sheet,
            extensions,
            workers,
            on_duplicate,
            csv,
            xlsx,
            json,
            fail_on_attention,
        } => check::cmd_check(
            check::CheckArgs {
                reference,
                documents,
                sheet,
                extensions,
                workers,
                on_duplicate,
                csv,
                xlsx,
            },
            json,
            fail_on_attention,
        ),
        Commands::Extract { document, json } => check::cmd_extract(document, json),
        Commands::Validate { config } => check::cmd_validate(config),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn new(code: u8, msg: impl Into<String>) -> Self {
        Self { code, message: msg.into(), hint: None }
    }

    pub fn args(msg: impl Into<String>) -> Self {
        Self::new(EXIT_USAGE, msg)
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self::new(EXIT_IO, msg)
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl From<regcheck_recon::ReconError> for CliError {
    fn from(err: regcheck_recon::ReconError) -> Self {
        use regcheck_recon::ReconError;

        let code = recon_exit_code(&err);
        let hint = match &err {
            ReconError::MissingColumn { .. } => {
                Some("the reference sheet's header row must include 'Chassis Number'".to_string())
            }
            ReconError::DuplicateIdentifier { .. } => Some(
                "use --on-duplicate warn (or on_duplicate = \"warn\") to keep the later receipt"
                    .to_string(),
            ),
            ReconError::DocumentUnreadable { reason, .. }
                if reason.contains("pdftotext not installed") =>
            {
                Some("Install with: apt install poppler-utils / brew install poppler".to_string())
            }
            _ => None,
        };
        Self { code, message: err.to_string(), hint }
    }
}
