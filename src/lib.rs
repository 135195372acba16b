//! # eth_keygen
//!
//! Bulk Ethereum keypair generation and account dump conversion.
//!
//! ## Architecture
//!
//! - `crypto`: Key generation and address derivation
//! - `export`: Streaming record formats and the bulk export job
//! - `convert`: Testnet dump and colon-file converters
//! - `config`: Command-line configuration

pub mod config;
pub mod convert;
pub mod crypto;
pub mod export;

pub use config::Config;
pub use convert::ConvertError;
pub use crypto::{Address, AddressStyle, KeyGenError, KeySource, Keypair, RngKeySource};
pub use export::{
    export, BulkKeypairExporter, ExportError, ExportJob, ExportRecord, ExportSummary,
    RecordFormat,
};
