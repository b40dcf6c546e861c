//! CLI entry point for the renamer.
//!
//! This binary plans and applies batch renames of the entries below a root
//! directory: simplified to traditional script conversion, literal
//! find/replace, symbol stripping, and prefix/suffix injection.
//!
//! # Usage
//!
//! ```bash
//! renamer [OPTIONS] <COMMAND>
//!
//! # Preview converting every name below ./downloads
//! renamer preview ./downloads --op s2t
//!
//! # Apply a prefix to JPEG and PNG files, asking for confirmation twice
//! renamer apply ./photos --ext jpg,png --prefix 2024_
//!
//! # Export the plan as CSV
//! renamer report ./photos --op replace --find _ --replace - --format csv
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

mod confirm;
mod report;

use std::io::{BufRead, Write};
use std::sync::Arc;
use std::time::{Duration, Instant};

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand, ValueEnum};
use rn_convert::{BackendSource, ScriptConverter};
use rn_core::{AppConfig, EntryScope, ExtensionFilter, PrimaryOperation, RenameConfig};
use rn_engine::{
    Evaluator, Executor, PlanSummary, RenameEngine, ScanError, ScanOutcome, Scanner, first_change,
};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::confirm::{ConfirmState, ConfirmStep, NOTHING_TO_APPLY};
use crate::report::{generate_csv_report, generate_json_report};

// =============================================================================
// CLI ARGUMENT TYPES
// =============================================================================

/// Batch rename files and folders below a directory.
///
/// Every command scans first; nothing is renamed until `apply` is confirmed.
#[derive(Parser)]
#[command(name = "renamer", version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    command: Commands,

    /// JSON configuration file providing defaults for every option.
    #[arg(short, long, global = true, env = "RENAMER_CONFIG")]
    config: Option<Utf8PathBuf>,

    /// Directory holding OpenCC `STCharacters.txt` / `STPhrases.txt`.
    #[arg(long, global = true, env = "RENAMER_OPENCC_DIR")]
    dictionary: Option<Utf8PathBuf>,

    /// Enable verbose logging (debug level).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Scan and show what would be renamed.
    Preview {
        #[command(flatten)]
        plan: PlanArgs,

        /// List unchanged entries too.
        #[arg(short, long)]
        all: bool,
    },

    /// Scan, confirm, and rename.
    Apply {
        #[command(flatten)]
        plan: PlanArgs,

        /// Skip the two-step confirmation.
        #[arg(short, long)]
        yes: bool,

        /// Seconds the first confirmation stays valid.
        #[arg(long)]
        confirm_timeout: Option<u64>,
    },

    /// Export the rename plan.
    Report {
        #[command(flatten)]
        plan: PlanArgs,

        /// Output format.
        #[arg(short, long, value_enum, default_value_t = ReportFormat::Json)]
        format: ReportFormat,

        /// Output file (defaults to stdout).
        #[arg(short, long)]
        output: Option<Utf8PathBuf>,
    },

    /// Show whether the full conversion dictionary is in use.
    Status,
}

/// Options describing one planning run. Unset options fall back to the
/// configuration file, then to built-in defaults.
#[derive(Args, Debug, Default)]
struct PlanArgs {
    /// Directory whose contents are renamed.
    #[arg(env = "RENAMER_ROOT")]
    root: Option<Utf8PathBuf>,

    /// Rename folders as well as files.
    #[arg(long)]
    folders: bool,

    /// Only consider the root's immediate children.
    #[arg(long)]
    no_recurse: bool,

    /// Comma-separated file extensions to include, e.g. "jpg,png".
    #[arg(long)]
    ext: Option<String>,

    /// Primary operation applied before stripping and affixes.
    #[arg(long, value_enum)]
    op: Option<OperationArg>,

    /// Text to find (with `--op replace`).
    #[arg(long)]
    find: Option<String>,

    /// Replacement text (with `--op replace`).
    #[arg(long)]
    replace: Option<String>,

    /// Characters to remove from every name.
    #[arg(long)]
    strip: Option<String>,

    /// Text inserted before the name.
    #[arg(long)]
    prefix: Option<String>,

    /// Text inserted after the name, before the extension.
    #[arg(long)]
    suffix: Option<String>,
}

/// Primary operation names on the command line.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum OperationArg {
    /// Leave names as-is.
    None,
    /// Simplified to traditional Chinese.
    S2t,
    /// Literal find/replace.
    Replace,
}

impl From<OperationArg> for PrimaryOperation {
    fn from(arg: OperationArg) -> Self {
        match arg {
            OperationArg::None => Self::None,
            OperationArg::S2t => Self::ScriptConvert,
            OperationArg::Replace => Self::FindReplace,
        }
    }
}

/// Report output format.
#[derive(Clone, Copy, ValueEnum)]
enum ReportFormat {
    /// JSON format.
    Json,
    /// CSV format.
    Csv,
}

// =============================================================================
// INITIALIZATION FUNCTIONS
// =============================================================================

/// Initializes the tracing subscriber for logging.
///
/// Respects the `RUST_LOG` environment variable if set. Otherwise, uses
/// `debug` level if `--verbose` is set, or `info` level by default. Logs go
/// to stderr so reports written to stdout stay clean.
fn init_tracing(verbose: bool, no_color: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { "info" };
        EnvFilter::new(format!("{level},ignore=warn,globset=warn"))
    });

    // Check if colors should be disabled (flag or NO_COLOR env var)
    let use_ansi = !no_color && std::env::var("NO_COLOR").is_err();

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(use_ansi)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

/// Loads the configuration file, or defaults when none was given.
fn load_app_config(cli: &Cli) -> color_eyre::Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    if let Some(dir) = &cli.dictionary {
        config.converter.dictionary_dir = Some(dir.clone());
    }
    Ok(config)
}

/// Builds the [`RenameConfig`] for one run from file defaults and flags.
fn build_rename_config(defaults: &RenameConfig, args: &PlanArgs) -> RenameConfig {
    let mut config = defaults.clone();

    if let Some(root) = &args.root {
        config.root_path.clone_from(root);
    }
    if config.root_path.as_str().is_empty() {
        config.root_path = Utf8PathBuf::from(".");
    }
    if args.folders {
        config.entry_scope = EntryScope::FilesAndFolders;
    }
    if args.no_recurse {
        config.recurse_into_folders = false;
    }
    if let Some(ext) = &args.ext {
        config.extension_filter = ExtensionFilter::parse(ext);
    }
    if let Some(op) = args.op {
        config.primary_operation = op.into();
    }
    if let Some(find) = &args.find {
        config.find_text.clone_from(find);
    }
    if let Some(replace) = &args.replace {
        config.replace_text.clone_from(replace);
    }
    if let Some(strip) = &args.strip {
        config.strip_symbols.clone_from(strip);
    }
    if let Some(prefix) = &args.prefix {
        config.prefix.clone_from(prefix);
    }
    if let Some(suffix) = &args.suffix {
        config.suffix.clone_from(suffix);
    }

    config
}

/// Creates the engine with a converter for the configured dictionary.
fn create_engine(app: &AppConfig) -> RenameEngine {
    let source = BackendSource::from_dictionary_dir(app.converter.dictionary_dir.clone());
    RenameEngine::new(Arc::new(ScriptConverter::new(source)))
}

/// Scans and warns about a root that does not exist.
fn scan(engine: &RenameEngine, config: &RenameConfig) -> ScanOutcome {
    if !config.root_path.exists() {
        warn!(root = %config.root_path, "Root path does not exist, nothing to rename");
    }
    engine.scan(config)
}

// =============================================================================
// COMMAND IMPLEMENTATIONS
// =============================================================================

/// Scans and prints the summary and the planned changes.
fn run_preview(engine: &RenameEngine, config: &RenameConfig, all: bool) -> color_eyre::Result<()> {
    let scanned = scan(engine, config);
    let summary = engine.evaluate(&scanned.plan);

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    print_summary(&mut handle, engine, config, &summary)?;

    let listed: Vec<_> = scanned
        .plan
        .iter()
        .filter(|entry| all || entry.is_change())
        .collect();
    if !listed.is_empty() {
        writeln!(handle)?;
        writeln!(handle, "{} ({}):", if all { "Entries" } else { "Changes" }, listed.len())?;
        for entry in listed {
            let marker = if entry.is_change() { "->" } else { "==" };
            writeln!(
                handle,
                "  [{}] {}  {marker}  {}",
                entry.kind.label(),
                entry.original_path,
                entry.proposed_name
            )?;
        }
    }

    print_diagnostics(&scanned.diagnostics)?;
    Ok(())
}

/// Scans, asks for confirmation twice, and applies the plan.
///
/// # Errors
///
/// Returns an error if any rename failed, so the process exits non-zero.
fn run_apply(
    engine: &RenameEngine,
    config: &RenameConfig,
    yes: bool,
    timeout: Duration,
) -> color_eyre::Result<()> {
    let scanned = scan(engine, config);
    let summary = engine.evaluate(&scanned.plan);

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    print_summary(&mut handle, engine, config, &summary)?;
    print_diagnostics(&scanned.diagnostics)?;

    if summary.changed == 0 {
        writeln!(handle, "{NOTHING_TO_APPLY}")?;
        return Ok(());
    }

    if !yes {
        if let Some(entry) = first_change(&scanned.plan) {
            writeln!(
                handle,
                "Next: {}  ->  {}",
                entry.original_name(),
                entry.proposed_name
            )?;
        }
        drop(handle);
        if !confirm_interactively(summary.changed, timeout)? {
            return Ok(());
        }
        handle = stdout.lock();
    }

    let report = engine.execute(&scanned.plan);

    writeln!(handle)?;
    for item in report.failures() {
        if let rn_core::RenameOutcome::Failed(reason) = &item.outcome {
            writeln!(handle, "  FAILED {}: {reason}", item.original_path)?;
        }
    }
    writeln!(
        handle,
        "Renamed: {}  Failed: {}  Skipped: {}",
        report.success_count,
        report.failure_count,
        report.skipped_count()
    )?;

    if report.is_clean() {
        Ok(())
    } else {
        Err(color_eyre::eyre::eyre!(
            "{} of {} renames failed",
            report.failure_count,
            summary.changed
        ))
    }
}

/// Runs the two-step confirmation on stdin. Returns `true` to execute.
fn confirm_interactively(changed: usize, timeout: Duration) -> color_eyre::Result<bool> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut state = ConfirmState::default();

    let prompts = [
        format!("Rename {changed} entries? [y/N] "),
        format!(
            "This cannot be undone. Confirm within {}s [y/N] ",
            timeout.as_secs()
        ),
    ];

    for prompt in prompts {
        {
            let mut handle = stdout.lock();
            write!(handle, "{prompt}")?;
            handle.flush()?;
        }

        let mut answer = String::new();
        stdin.lock().read_line(&mut answer)?;
        if !matches!(answer.trim(), "y" | "Y" | "yes") {
            state.cancel();
            writeln!(stdout.lock(), "Cancelled")?;
            return Ok(false);
        }

        match state.press(changed, Instant::now(), timeout) {
            ConfirmStep::Armed => {}
            ConfirmStep::Confirmed => return Ok(true),
            ConfirmStep::NothingToApply => {
                writeln!(stdout.lock(), "{NOTHING_TO_APPLY}")?;
                return Ok(false);
            }
            ConfirmStep::Expired | ConfirmStep::NotArmed => break,
        }
    }

    writeln!(stdout.lock(), "Confirmation expired, nothing renamed")?;
    Ok(false)
}

/// Generates a plan report in the specified format.
fn run_report(
    engine: &RenameEngine,
    config: &RenameConfig,
    format: ReportFormat,
    output: Option<Utf8PathBuf>,
) -> color_eyre::Result<()> {
    info!(root = %config.root_path, "Generating report");

    let scanned = scan(engine, config);
    let summary = engine.evaluate(&scanned.plan);

    let content = match format {
        ReportFormat::Json => generate_json_report(
            &config.root_path,
            engine.converter().status_label(),
            &scanned.plan,
            &summary,
        )?,
        ReportFormat::Csv => generate_csv_report(&scanned.plan),
    };

    if let Some(output_path) = output {
        std::fs::write(output_path.as_std_path(), &content)?;
        info!(path = %output_path, "Report written");
    } else {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        write!(handle, "{content}")?;
    }

    print_diagnostics(&scanned.diagnostics)?;
    Ok(())
}

/// Prints the converter status.
fn run_status(engine: &RenameEngine, app: &AppConfig) -> color_eyre::Result<()> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    writeln!(handle, "Converter: {}", engine.converter().status_label())?;
    match &app.converter.dictionary_dir {
        Some(dir) => writeln!(handle, "Dictionary: {dir}")?,
        None => writeln!(handle, "Dictionary: (none, built-in table only)")?,
    }
    Ok(())
}

// =============================================================================
// OUTPUT HELPERS
// =============================================================================

/// Prints the plan summary and its warnings.
fn print_summary(
    handle: &mut impl Write,
    engine: &RenameEngine,
    config: &RenameConfig,
    summary: &PlanSummary,
) -> std::io::Result<()> {
    writeln!(handle)?;
    writeln!(handle, "Rename Plan Summary")?;
    writeln!(handle, "===================")?;
    writeln!(handle)?;
    writeln!(handle, "Root:        {}", config.root_path)?;
    writeln!(handle, "Operation:   {}", config.primary_operation.label())?;
    if config.primary_operation == PrimaryOperation::ScriptConvert {
        writeln!(handle, "Converter:   {}", engine.converter().status_label())?;
    }
    writeln!(handle, "Total:       {}", summary.total)?;
    writeln!(handle, "  Changed:   {}", summary.changed)?;
    writeln!(handle, "  Unchanged: {}", summary.unchanged())?;

    let warnings = summary.warnings();
    if !warnings.is_empty() {
        writeln!(handle)?;
        writeln!(handle, "Warnings:")?;
        for warning in warnings {
            writeln!(handle, "  ! {warning}")?;
        }
    }
    Ok(())
}

/// Prints non-fatal scan problems to stderr.
fn print_diagnostics(diagnostics: &[ScanError]) -> std::io::Result<()> {
    if diagnostics.is_empty() {
        return Ok(());
    }

    let stderr = std::io::stderr();
    let mut handle = stderr.lock();
    writeln!(handle)?;
    writeln!(handle, "Skipped ({}):", diagnostics.len())?;
    for error in diagnostics {
        writeln!(handle, "  {error}")?;
    }
    Ok(())
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Application entry point.
fn main() -> color_eyre::Result<()> {
    // 1. Install color-eyre FIRST (before any potential panics)
    color_eyre::install()?;

    // 2. Parse CLI arguments
    let cli = Cli::parse();

    // 3. Initialize tracing (handles --no-color for log output)
    init_tracing(cli.verbose, cli.no_color);

    // 4. Load configuration and build the engine
    let app = load_app_config(&cli)?;
    let engine = create_engine(&app);

    // 5. Route to appropriate command
    match &cli.command {
        Commands::Preview { plan, all } => {
            let config = build_rename_config(&app.plan, plan);
            run_preview(&engine, &config, *all)
        }
        Commands::Apply {
            plan,
            yes,
            confirm_timeout,
        } => {
            let config = build_rename_config(&app.plan, plan);
            let secs = confirm_timeout.unwrap_or(app.confirm.timeout_secs).max(1);
            let timeout = Duration::from_secs(secs);
            run_apply(&engine, &config, *yes, timeout)
        }
        Commands::Report {
            plan,
            format,
            output,
        } => {
            let config = build_rename_config(&app.plan, plan);
            run_report(&engine, &config, *format, output.clone())
        }
        Commands::Status => run_status(&engine, &app),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flags_override_file_defaults() {
        let defaults = RenameConfig::new(camino::Utf8Path::new("/from/file"))
            .with_prefix("file_")
            .with_suffix("_keep");
        let args = PlanArgs {
            root: Some(Utf8PathBuf::from("/from/flag")),
            folders: true,
            no_recurse: true,
            ext: Some("JPG, png".to_owned()),
            op: Some(OperationArg::Replace),
            find: Some("_".to_owned()),
            replace: Some("-".to_owned()),
            prefix: Some("cli_".to_owned()),
            ..PlanArgs::default()
        };

        let config = build_rename_config(&defaults, &args);
        assert_eq!(config.root_path, "/from/flag");
        assert_eq!(config.entry_scope, EntryScope::FilesAndFolders);
        assert!(!config.recurse_into_folders);
        assert_eq!(config.extension_filter, ExtensionFilter::parse(".jpg,.png"));
        assert_eq!(config.primary_operation, PrimaryOperation::FindReplace);
        assert_eq!((config.find_text.as_str(), config.replace_text.as_str()), ("_", "-"));
        assert_eq!(config.prefix, "cli_");
        assert_eq!(config.suffix, "_keep");
    }

    #[test]
    fn test_root_defaults_to_current_directory() {
        let config = build_rename_config(&RenameConfig::default(), &PlanArgs::default());
        assert_eq!(config.root_path, ".");
    }

    #[test]
    fn test_parse_apply_command() {
        let cli = Cli::try_parse_from([
            "renamer", "apply", "/tmp/photos", "--op", "s2t", "--yes", "--confirm-timeout", "5",
        ])
        .unwrap();
        match cli.command {
            Commands::Apply {
                plan,
                yes,
                confirm_timeout,
            } => {
                assert_eq!(plan.root.as_deref().map(camino::Utf8Path::as_str), Some("/tmp/photos"));
                assert!(matches!(plan.op, Some(OperationArg::S2t)));
                assert!(yes);
                assert_eq!(confirm_timeout, Some(5));
            }
            _ => unreachable!("parsed a different subcommand"),
        }
    }

    #[test]
    fn test_apply_without_changes_does_nothing() {
        let dir = tempfile::TempDir::new().unwrap();
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        std::fs::write(root.join("same.txt"), "").unwrap();

        let engine = RenameEngine::default();
        let config = RenameConfig::new(&root);
        run_apply(&engine, &config, true, Duration::from_secs(1)).unwrap();
        assert!(root.join("same.txt").exists());
    }

    #[test]
    fn test_apply_with_yes_renames() {
        let dir = tempfile::TempDir::new().unwrap();
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        std::fs::write(root.join("国家.txt"), "").unwrap();

        let engine = RenameEngine::default();
        let config = RenameConfig::new(&root).with_primary_operation(PrimaryOperation::ScriptConvert);
        run_apply(&engine, &config, true, Duration::from_secs(1)).unwrap();
        assert!(root.join("國家.txt").exists());
    }

    #[test]
    fn test_apply_reports_failures_as_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        std::fs::write(root.join("a.txt"), "").unwrap();
        std::fs::write(root.join("b.txt"), "").unwrap();

        // a.txt would become b.txt, which already exists.
        let engine = RenameEngine::default();
        let config = RenameConfig::new(&root)
            .with_primary_operation(PrimaryOperation::FindReplace)
            .with_find_replace("a", "b");
        assert!(run_apply(&engine, &config, true, Duration::from_secs(1)).is_err());
        assert!(root.join("a.txt").exists());
    }
}
