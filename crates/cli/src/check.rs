//! `regcheck run` / `check` / `extract` / `validate`.

use std::path::{Path, PathBuf};

use regcheck_io::FileRenderer;
use regcheck_recon::config::default_workers;
use regcheck_recon::{
    extract, run_with_scan, scan_documents, CheckConfig, DocumentRef, DocumentRenderer,
    DuplicatePolicy, ReconResult,
};

use crate::exit_codes::{EXIT_CHECK_ATTENTION, EXIT_CHECK_INVALID_CONFIG, EXIT_CHECK_RUNTIME};
use crate::CliError;

/// Everything one reconciliation run needs, with paths already resolved.
pub struct CheckArgs {
    pub reference: PathBuf,
    pub documents: PathBuf,
    pub sheet: Option<String>,
    pub extensions: Vec<String>,
    pub workers: Option<usize>,
    pub on_duplicate: DuplicatePolicy,
    pub csv: Option<PathBuf>,
    pub xlsx: Option<PathBuf>,
}

pub fn cmd_run(
    config_path: PathBuf,
    json_output: bool,
    output_file: Option<PathBuf>,
    fail_on_attention: bool,
) -> Result<(), CliError> {
    let config = load_config(&config_path)?;

    // Resolve file paths relative to config file's directory
    let base_dir = config_path.parent().unwrap_or_else(|| Path::new("."));
    let resolve = |p: &str| base_dir.join(p);

    let args = CheckArgs {
        reference: resolve(&config.reference.file),
        documents: resolve(&config.documents.dir),
        sheet: config.reference.sheet.clone(),
        extensions: config.documents.extensions.clone(),
        workers: Some(config.scan.worker_count()),
        on_duplicate: config.scan.on_duplicate,
        csv: config.output.csv.as_deref().map(resolve),
        xlsx: config.output.xlsx.as_deref().map(resolve),
    };

    let result = execute(&config.name, &args)?;

    let json_targets = config
        .output
        .json
        .as_deref()
        .map(resolve)
        .into_iter()
        .chain(output_file);
    for path in json_targets {
        regcheck_io::report::write_json(&result, &path)?;
        eprintln!("wrote {}", path.display());
    }

    finish(&result, json_output, fail_on_attention)
}

pub fn cmd_check(
    args: CheckArgs,
    json_output: bool,
    fail_on_attention: bool,
) -> Result<(), CliError> {
    if args.workers == Some(0) {
        return Err(CliError::args("--workers must be at least 1"));
    }
    let name = args
        .documents
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "check".to_string());

    let result = execute(&name, &args)?;
    finish(&result, json_output, fail_on_attention)
}

pub fn cmd_extract(document: PathBuf, json_output: bool) -> Result<(), CliError> {
    let name = document
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| CliError::args(format!("not a file: {}", document.display())))?;
    let doc = DocumentRef::new(name, &document);

    let text = FileRenderer.render(&doc)?;
    let record = extract(&text, &doc.name);

    if json_output {
        let json = serde_json::to_string_pretty(&record).map_err(|e| {
            CliError::new(EXIT_CHECK_RUNTIME, format!("JSON serialization error: {e}"))
        })?;
        println!("{json}");
    } else {
        println!("document:      {}", record.source_name);
        println!("chassis:       {}", record.identifier);
        println!("customer:      {}", record.customer_name);
        println!("registration:  {}", record.registration_number);
        println!("date:          {}", record.registration_date);
    }
    Ok(())
}

pub fn cmd_validate(config_path: PathBuf) -> Result<(), CliError> {
    let config = load_config(&config_path)?;
    eprintln!(
        "valid: check '{}' reading {} against {} ({}), on_duplicate = {}",
        config.name,
        config.documents.dir,
        config.reference.file,
        config.documents.extensions.join(", "),
        config.scan.on_duplicate,
    );
    Ok(())
}

fn load_config(path: &Path) -> Result<CheckConfig, CliError> {
    let config_str = std::fs::read_to_string(path)
        .map_err(|e| CliError::io(format!("cannot read config: {e}")))?;
    CheckConfig::from_toml(&config_str).map_err(|e| {
        CliError::new(EXIT_CHECK_INVALID_CONFIG, e.to_string())
            .with_hint(format!("see `regcheck validate {}`", path.display()))
    })
}

/// Load the sheet, scan receipts, reconcile, write file outputs.
fn execute(name: &str, args: &CheckArgs) -> Result<ReconResult, CliError> {
    let table = regcheck_io::load_table(&args.reference, args.sheet.as_deref())?;
    // A sheet without a chassis column fails here, before any receipt is rendered
    table.check_columns()?;
    let references = table.records()?;

    if !args.documents.is_dir() {
        return Err(CliError::io(format!(
            "documents directory not found: {}",
            args.documents.display()
        )));
    }
    let documents = regcheck_io::discover(&args.documents, &args.extensions)?;
    if documents.is_empty() {
        tracing::warn!(dir = %args.documents.display(), "no receipts found");
    }

    let workers = args.workers.unwrap_or_else(default_workers);
    let scan = scan_documents(&FileRenderer, &documents, workers, args.on_duplicate)?;
    let result = run_with_scan(name, &references, &scan);

    if let Some(ref path) = args.csv {
        regcheck_io::report::write_csv(&result.rows, path)?;
        eprintln!("wrote {}", path.display());
    }
    if let Some(ref path) = args.xlsx {
        regcheck_io::report::write_xlsx(&result.rows, path)?;
        eprintln!("wrote {}", path.display());
    }

    Ok(result)
}

/// JSON to stdout or human summary to stderr, then the attention gate.
fn finish(
    result: &ReconResult,
    json_output: bool,
    fail_on_attention: bool,
) -> Result<(), CliError> {
    if json_output {
        let json_str = serde_json::to_string_pretty(result).map_err(|e| {
            CliError::new(EXIT_CHECK_RUNTIME, format!("JSON serialization error: {e}"))
        })?;
        println!("{json_str}");
    } else {
        print_summary(result);
    }

    let attention = result.summary.needs_attention();
    if fail_on_attention && attention > 0 {
        return Err(CliError::new(
            EXIT_CHECK_ATTENTION,
            format!("{attention} row(s) need attention"),
        ));
    }
    Ok(())
}

fn print_summary(result: &ReconResult) {
    let s = &result.summary;
    eprintln!(
        "{}: {} rows - {} approved, {} held, {} rejected, {} pending ({} receipts scanned)",
        result.meta.config_name,
        s.total_rows,
        s.approved,
        s.held,
        s.rejected,
        s.pending,
        s.documents_scanned,
    );

    let d = &result.diagnostics;
    for u in &d.unreadable {
        eprintln!("unreadable: {} ({})", u.document, u.reason);
    }
    if !d.unidentified.is_empty() {
        eprintln!("no chassis number found: {}", d.unidentified.join(", "));
    }
    if !d.orphaned.is_empty() {
        eprintln!("not in reference sheet: {}", d.orphaned.join(", "));
    }
    for dup in &d.duplicates {
        eprintln!(
            "duplicate chassis {}: using {}, ignored {}",
            dup.identifier,
            dup.kept,
            dup.superseded.join(", "),
        );
    }
}
