//! Bulk Ethereum keypair generator CLI
//!
//! Usage:
//!   eth_keygen generate -n 220000 -f json -o accounts.json
//!   eth_keygen generate -n 1000000 -o accounts_raw --append
//!   eth_keygen convert-testnet accounts -o keys.json
//!   eth_keygen lines-to-json accounts_raw -l 500000 -o keys.json

use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use clap::Parser;

use eth_keygen::config::{Command, ConfigError, ConvertArgs, GenerateArgs, LinesToJsonArgs};
use eth_keygen::convert::{lines_to_json, write_testnet_accounts, ConvertError};
use eth_keygen::export::{format_number, BulkKeypairExporter, ExportError, LogProgress};
use eth_keygen::{Config, RngKeySource};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error(transparent)]
    Convert(#[from] ConvertError),
    #[error("Cannot open {path}: {source}")]
    Open { path: String, source: io::Error },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::parse();

    let result = match config.command {
        Command::Generate(args) => generate(args),
        Command::ConvertTestnet(args) => convert_testnet(args),
        Command::LinesToJson(args) => convert_lines(args),
    };

    if let Err(e) = result {
        if let CliError::Export(ref export_err) = e {
            let written = export_err.records_written();
            if written > 0 {
                log::warn!("{} record(s) were written before the failure", written);
            }
        }
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn generate(args: GenerateArgs) -> Result<(), CliError> {
    args.validate()?;
    let job = args.job()?;

    log::info!("Ethereum Keypair Generator");
    log::info!("Count:   {}", job.count());
    log::info!("Format:  {}", job.format());
    log::info!(
        "Output:  {}",
        args.output
            .as_deref()
            .map_or_else(|| "<stdout>".to_string(), |p| p.display().to_string())
    );
    if args.seed.is_some() {
        log::warn!("Using a seeded RNG: generated keys are reproducible");
    }

    let sink = open_output(args.output.as_deref(), args.append)?;

    let stop_flag = Arc::new(AtomicBool::new(false));
    ctrlc_handler(stop_flag.clone());

    let exporter = BulkKeypairExporter::new(job).with_stop_flag(stop_flag);
    let started = Instant::now();

    let summary = match args.seed {
        Some(seed) => exporter.run(RngKeySource::seeded(seed), sink, LogProgress::new()),
        None => exporter.run(RngKeySource::thread(), sink, LogProgress::new()),
    }?;

    let elapsed = started.elapsed().as_secs_f64();
    let rate = if elapsed > 0.0 {
        summary.written as f64 / elapsed
    } else {
        0.0
    };

    if summary.cancelled {
        log::warn!("Stopped by user after {} record(s)", summary.written);
    }
    log::info!(
        "Done: {} keypair(s) in {:.2}s ({}/s)",
        format_number(summary.written),
        elapsed,
        format_number(rate as u64)
    );

    Ok(())
}

fn convert_testnet(args: ConvertArgs) -> Result<(), CliError> {
    let input = open_input(&args.input)?;
    let sink = open_output(args.output.as_deref(), false)?;

    let n = write_testnet_accounts(input, sink)?;
    log::info!("Converted {} testnet account(s)", n);
    Ok(())
}

fn convert_lines(args: LinesToJsonArgs) -> Result<(), CliError> {
    let input = open_input(&args.input)?;
    let sink = open_output(args.output.as_deref(), false)?;

    let n = lines_to_json(input, sink, args.limit)?;
    log::info!("Converted {} account(s)", n);
    Ok(())
}

fn open_input(path: &Path) -> Result<BufReader<File>, CliError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| CliError::Open {
            path: path.display().to_string(),
            source,
        })
}

fn open_output(path: Option<&Path>, append: bool) -> Result<Box<dyn Write>, CliError> {
    let Some(path) = path else {
        return Ok(Box::new(BufWriter::new(io::stdout().lock())));
    };

    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .append(append)
        .truncate(!append)
        .open(path)
        .map_err(|source| CliError::Open {
            path: path.display().to_string(),
            source,
        })?;

    Ok(Box::new(BufWriter::new(file)))
}

fn ctrlc_handler(stop_flag: Arc<AtomicBool>) {
    if let Err(e) = ctrlc::set_handler(move || {
        stop_flag.store(true, Ordering::Relaxed);
    }) {
        log::warn!("Could not install Ctrl-C handler: {}", e);
    }
}
