//! Test-network account dump conversion.
//!
//! Input is `{"private_keys": {"<address>": "<hex key>", ...}}`; output is
//! an array of records in the dump's key order with 0x-prefixed keys.

use std::io::{Read, Write};

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::export::{prefixed_private_key, ExportRecord};

use super::ConvertError;

#[derive(Debug, Deserialize)]
struct TestnetDump {
    private_keys: Map<String, Value>,
}

/// Reads a test-network dump and returns its accounts as records.
pub fn convert_testnet_accounts<R: Read>(reader: R) -> Result<Vec<ExportRecord>, ConvertError> {
    let dump: TestnetDump = serde_json::from_reader(reader)?;

    dump.private_keys
        .into_iter()
        .map(|(address, key)| match key {
            Value::String(key) => Ok(ExportRecord {
                private: prefixed_private_key(&key),
                address,
            }),
            _ => Err(ConvertError::InvalidPrivateKey { address }),
        })
        .collect()
}

/// Converts a dump from `reader` and writes a single JSON array to `writer`.
///
/// Returns the number of accounts written.
pub fn write_testnet_accounts<R: Read, W: Write>(
    reader: R,
    mut writer: W,
) -> Result<usize, ConvertError> {
    let records = convert_testnet_accounts(reader)?;
    serde_json::to_writer(&mut writer, &records)?;
    writer.flush()?;

    log::debug!("Converted {} testnet account(s)", records.len());
    Ok(records.len())
}
