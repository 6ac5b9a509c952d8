//! hrmimport - Polar HRM exercise importer
//!
//! Command line entry point: `import` appends HRM files to an exercise
//! list, `show` prints session statistics, `config` manages settings.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hrmimport::export::csv::export_chart_csv;
use hrmimport::hrm::decoder::decode_file;
use hrmimport::import::batch::{import_files, ImportOptions, OutputMode};
use hrmimport::metrics::chart::ChartData;
use hrmimport::metrics::report::SessionReport;
use hrmimport::metrics::summary::ExerciseSummary;
use hrmimport::storage::config::{
    get_config_path, load_config_from, save_config_to, AppConfig, ReportFormat,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const EXIT_FAILURE: u8 = 1;
const EXIT_INTERRUPTED: u8 = 130;

/// import Polar HRM exercises into a SportsTracker exercise list
#[derive(Parser, Debug)]
#[clap(version, about)]
struct Cli {
    /// debug logging
    #[clap(short = 'D', long, global = true)]
    debug: bool,

    /// report progress
    #[clap(short = 'v', long, global = true)]
    verbose: bool,

    /// config file to use instead of the default location
    #[clap(long, global = true)]
    config: Option<PathBuf>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// add HRM files to an exercise list
    Import {
        /// exercise list to write
        #[clap(short = 'o', long)]
        output: Option<PathBuf>,

        /// replace an existing exercise list
        #[clap(short = 'f', long, conflicts_with = "append")]
        force: bool,

        /// append to an existing exercise list
        #[clap(short = 'a', long)]
        append: bool,

        /// sport type id of the new exercises
        #[clap(long = "sport-type")]
        sport_type: Option<u32>,

        /// sport subtype id of the new exercises
        #[clap(long = "sport-subtype")]
        sport_subtype: Option<u32>,

        /// abort on the first file that cannot be decoded
        #[clap(long)]
        strict: bool,

        /// HRM files to import
        #[clap(required = true)]
        files: Vec<PathBuf>,
    },
    /// print session statistics for HRM files
    Show {
        /// print JSON instead of text
        #[clap(long)]
        json: bool,

        /// write heart rate chart data as CSV
        #[clap(long)]
        chart: Option<PathBuf>,

        /// HRM files to show
        #[clap(required = true)]
        files: Vec<PathBuf>,
    },
    /// print the configuration
    Config {
        /// write the default configuration
        #[clap(long)]
        init: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.debug {
        "debug"
    } else if cli.verbose {
        "info"
    } else {
        "warn"
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!("Starting hrmimport v{}", env!("CARGO_PKG_VERSION"));

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config_path = cli.config.clone().unwrap_or_else(get_config_path);
    let config = load_config_from(&config_path)
        .with_context(|| format!("Failed to load config {}", config_path.display()))?;

    match cli.command {
        Command::Import {
            output,
            force,
            append,
            sport_type,
            sport_subtype,
            strict,
            files,
        } => {
            let mode = if force {
                OutputMode::Force
            } else if append {
                OutputMode::Append
            } else {
                OutputMode::Create
            };

            let mut options = ImportOptions::from_settings(&config.import, mode);
            if let Some(output) = output {
                options.output = output;
            }
            if let Some(sport_type) = sport_type {
                options.sport_type_id = sport_type;
            }
            if let Some(sport_subtype) = sport_subtype {
                options.sport_subtype_id = sport_subtype;
            }
            options.strict |= strict;

            run_import(options, &files)
        }
        Command::Show { json, chart, files } => {
            let format = if json {
                ReportFormat::Json
            } else {
                config.report.format
            };
            run_show(format, chart.as_deref(), &files)
        }
        Command::Config { init } => run_config(&config_path, config, init),
    }
}

fn run_import(options: ImportOptions, files: &[PathBuf]) -> Result<ExitCode> {
    let cancel = Arc::new(AtomicBool::new(false));
    interrupt::install(cancel.clone());

    let output = options.output.clone();
    let report = import_files(options, files, cancel.clone())?;

    println!(
        "{}: {} imported, {} already present, {} failed",
        output.display(),
        report.imported,
        report.duplicates,
        report.failed
    );

    if report.interrupted || cancel.load(Ordering::SeqCst) {
        return Ok(ExitCode::from(EXIT_INTERRUPTED));
    }
    Ok(ExitCode::SUCCESS)
}

fn run_show(format: ReportFormat, chart: Option<&Path>, files: &[PathBuf]) -> Result<ExitCode> {
    let mut failures = 0;

    for file in files {
        let exercise = match decode_file(file) {
            Ok(exercise) => exercise,
            Err(e) => {
                tracing::warn!("Skipping {}: {}", file.display(), e);
                failures += 1;
                continue;
            }
        };

        let summary = ExerciseSummary::of(&exercise);
        let report = SessionReport::new(&exercise, &summary).with_source(file.display().to_string());

        match format {
            ReportFormat::Text => println!("{}", report),
            ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        }

        if let Some(chart) = chart {
            let path = chart_path_for(chart, file, files.len() > 1);
            let csv = export_chart_csv(&ChartData::from_exercise(&exercise))?;
            std::fs::write(&path, csv)
                .with_context(|| format!("Failed to write chart {}", path.display()))?;
            tracing::info!("Wrote chart data to {}", path.display());
        }
    }

    if failures > 0 {
        return Ok(ExitCode::from(EXIT_FAILURE));
    }
    Ok(ExitCode::SUCCESS)
}

/// With several inputs, each chart gets the HRM file name as a suffix.
fn chart_path_for(chart: &Path, hrm_file: &Path, several: bool) -> PathBuf {
    if !several {
        return chart.to_path_buf();
    }
    let stem = chart.file_stem().unwrap_or_default().to_string_lossy();
    let hrm_stem = hrm_file.file_stem().unwrap_or_default().to_string_lossy();
    let name = match chart.extension() {
        Some(ext) => format!("{}-{}.{}", stem, hrm_stem, ext.to_string_lossy()),
        None => format!("{}-{}", stem, hrm_stem),
    };
    chart.with_file_name(name)
}

fn run_config(path: &Path, config: AppConfig, init: bool) -> Result<ExitCode> {
    let config = if init {
        let defaults = AppConfig::default();
        save_config_to(&defaults, path)?;
        defaults
    } else {
        config
    };

    println!("# {}", path.display());
    print!("{}", toml::to_string_pretty(&config)?);
    Ok(ExitCode::SUCCESS)
}

/// SIGINT raises the cancel flag of the running import; the batch stops
/// before its next file and keeps what it has.
#[cfg(unix)]
mod interrupt {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, OnceLock};

    static CANCEL: OnceLock<Arc<AtomicBool>> = OnceLock::new();

    extern "C" fn on_sigint(_signal: libc::c_int) {
        if let Some(flag) = CANCEL.get() {
            flag.store(true, Ordering::SeqCst);
        }
    }

    pub fn install(flag: Arc<AtomicBool>) {
        if CANCEL.set(flag).is_err() {
            return;
        }
        let handler: extern "C" fn(libc::c_int) = on_sigint;
        // SAFETY: the handler only performs an atomic store.
        unsafe {
            libc::signal(libc::SIGINT, handler as libc::sighandler_t);
        }
    }
}

#[cfg(not(unix))]
mod interrupt {
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;

    pub fn install(_flag: Arc<AtomicBool>) {}
}
