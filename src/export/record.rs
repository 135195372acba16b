//! Export records and their formats.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::crypto::{AddressStyle, Keypair};

/// Layout of the exported account stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordFormat {
    /// `address:privateKey` per line
    #[default]
    Lines,
    /// A single JSON array of `{"address", "private"}` objects
    JsonArray,
    /// One JSON object per line
    JsonLines,
}

impl RecordFormat {
    /// Whether private keys carry a 0x prefix in this layout.
    pub fn prefixes_private_key(self) -> bool {
        !matches!(self, RecordFormat::Lines)
    }
}

impl FromStr for RecordFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lines" | "raw" | "colon" => Ok(RecordFormat::Lines),
            "json" | "json-array" | "array" => Ok(RecordFormat::JsonArray),
            "jsonl" | "json-lines" | "ndjson" => Ok(RecordFormat::JsonLines),
            _ => Err(format!("Unknown record format: {}", s)),
        }
    }
}

impl fmt::Display for RecordFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordFormat::Lines => write!(f, "lines"),
            RecordFormat::JsonArray => write!(f, "json"),
            RecordFormat::JsonLines => write!(f, "jsonl"),
        }
    }
}

/// One serialized account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRecord {
    pub address: String,
    pub private: String,
}

impl ExportRecord {
    pub fn new(address: impl Into<String>, private: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            private: private.into(),
        }
    }

    /// Renders a keypair the way `format` lays it out.
    pub fn from_keypair(keypair: &Keypair, format: RecordFormat, style: AddressStyle) -> Self {
        let private = if format.prefixes_private_key() {
            keypair.private_key_hex_prefixed()
        } else {
            keypair.private_key_hex()
        };

        Self {
            address: keypair.address().render(style),
            private,
        }
    }
}

/// Adds a 0x prefix to a hex private key unless it already has one.
pub fn prefixed_private_key(key: &str) -> String {
    if key.starts_with("0x") || key.starts_with("0X") {
        key.to_string()
    } else {
        format!("0x{}", key)
    }
}
