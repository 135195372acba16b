//! Command-line configuration.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::crypto::AddressStyle;
use crate::export::{ExportError, ExportJob, RecordFormat, DEFAULT_PROGRESS_INTERVAL};

/// Bulk Ethereum keypair generator
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Generate fresh keypairs and stream them to a file or stdout
    Generate(GenerateArgs),
    /// Convert a {"private_keys": {...}} testnet dump into a JSON account array
    ConvertTestnet(ConvertArgs),
    /// Convert an address:privateKey file into a JSON account array
    LinesToJson(LinesToJsonArgs),
}

#[derive(clap::Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Number of keypairs to generate
    #[arg(short = 'n', long, default_value = "1000")]
    pub count: u64,

    /// Output format: lines, json, or jsonl
    #[arg(short = 'f', long, default_value = "lines")]
    pub format: RecordFormat,

    /// Output file (default: stdout)
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Append to the output file instead of truncating it
    #[arg(short = 'a', long, default_value = "false")]
    pub append: bool,

    /// Write EIP-55 checksummed addresses
    #[arg(short = 'c', long, default_value = "false")]
    pub checksum: bool,

    /// Records between progress reports (0 = silent)
    #[arg(short = 'r', long, default_value_t = DEFAULT_PROGRESS_INTERVAL)]
    pub progress_interval: u64,

    /// Seed a reproducible RNG. Never use seeded keys on a public network.
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(clap::Args, Debug, Clone)]
pub struct ConvertArgs {
    /// Testnet account dump to read
    pub input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,
}

#[derive(clap::Args, Debug, Clone)]
pub struct LinesToJsonArgs {
    /// Colon-delimited account file to read
    pub input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Keep only the first N accounts
    #[arg(short = 'l', long)]
    pub limit: Option<u64>,
}

impl GenerateArgs {
    /// Validates the generate options
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.count == 0 {
            return Err(ConfigError::InvalidCount);
        }

        if self.append && self.output.is_none() {
            return Err(ConfigError::AppendWithoutOutput);
        }

        if self.append && self.format == RecordFormat::JsonArray {
            log::warn!("Appending a JSON array to an existing file produces concatenated documents");
        }

        Ok(())
    }

    pub fn address_style(&self) -> AddressStyle {
        if self.checksum {
            AddressStyle::Checksum
        } else {
            AddressStyle::Lowercase
        }
    }

    /// Builds the export job described by these options.
    pub fn job(&self) -> Result<ExportJob, ExportError> {
        Ok(ExportJob::new(self.count, self.format)?
            .with_address_style(self.address_style())
            .with_progress_interval(self.progress_interval))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Count must be at least 1")]
    InvalidCount,
    #[error("--append requires --output")]
    AppendWithoutOutput,
}
