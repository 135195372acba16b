//! Converters that reshape existing account dumps into the JSON record layout.

mod lines;
mod testnet;

use std::io;

pub use lines::lines_to_json;
pub use testnet::{convert_testnet_accounts, write_testnet_accounts};

#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Private key for {address} is not a string")]
    InvalidPrivateKey { address: String },
    #[error("Malformed account on line {line}: expected address:privateKey")]
    MalformedLine { line: usize },
}
