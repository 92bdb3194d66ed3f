//! CBF Decoder CLI Application
//!
//! This is the command-line interface for the CBF log decoder.
//! It uses the cbf-decoder library and adds:
//! - File loading (one or many files, decoded in parallel)
//! - Configuration files (TOML)
//! - CSV and JSON output to stdout or an output directory
//! - Strict mode for scripting

use anyhow::{bail, Result};
use cbf_decoder::TableRenderer;
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;

mod batch;
mod config;
mod output;

use config::{AppConfig, OutputFormat};
use output::OutputWriter;

/// CBF Decoder - Convert Foxwell CBF data logs to CSV
#[derive(Parser, Debug)]
#[command(name = "cbf-cli")]
#[command(about = "Convert Foxwell scan tool CBF data logs to CSV or JSON", long_about = None)]
#[command(version)]
struct Args {
    /// CBF file(s) to decode
    #[arg(required = true, value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Write one output file per input into this directory (default: stdout)
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Column delimiter for CSV output
    #[arg(short, long, value_name = "CHAR")]
    delimiter: Option<char>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Path to configuration file (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Exit with an error if any file has parse errors
    #[arg(long)]
    strict: bool,

    /// Verbosity level (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all log output except errors
    #[arg(short, long)]
    quiet: bool,
}

impl Args {
    /// Command-line flags take precedence over the config file
    fn apply(&self, config: &mut AppConfig) {
        if let Some(dir) = &self.output_dir {
            config.output.output_dir = Some(dir.clone());
        }
        if let Some(delimiter) = self.delimiter {
            config.output.delimiter = delimiter;
        }
        if let Some(format) = self.format {
            config.output.format = format;
        }
        if self.strict {
            config.decode.strict = true;
        }
    }
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::info!("CBF Decoder CLI v{}", env!("CARGO_PKG_VERSION"));
    log::debug!("Using decoder library v{}", cbf_decoder::VERSION);

    let mut config = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from: {:?}", path);
            config::load_config(path)?
        }
        None => AppConfig::default(),
    };
    args.apply(&mut config);
    log::debug!("Effective configuration: {:?}", config);

    run(&args.files, &config)
}

fn run(files: &[PathBuf], config: &AppConfig) -> Result<()> {
    let renderer = TableRenderer::new(config.output.render_config())?;
    let writer = OutputWriter::new(config.output.format, renderer);

    let decoded = batch::decode_all(files);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut unreadable = 0;
    let mut with_errors = 0;

    for (i, file) in decoded.iter().enumerate() {
        let result = match &file.result {
            Ok(result) => result,
            Err(e) => {
                log::error!("{:#}", e);
                unreadable += 1;
                continue;
            }
        };

        if !result.is_clean() {
            with_errors += 1;
        }

        match &config.output.output_dir {
            Some(dir) => {
                let path = writer.write_to_dir(&file.path, result, dir)?;
                log::info!("Wrote {:?} ({} records)", path, result.records.len());
            }
            None => {
                if i > 0 {
                    writeln!(out)?;
                }
                writer.write(result, &mut out)?;
            }
        }
    }
    out.flush()?;

    if unreadable > 0 {
        bail!("{} of {} file(s) could not be read", unreadable, decoded.len());
    }
    if config.decode.strict && with_errors > 0 {
        bail!("{} file(s) decoded with parse errors", with_errors);
    }
    Ok(())
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
