//! Colon-delimited account file to JSON array conversion.

use std::io::{BufRead, Write};

use crate::export::{prefixed_private_key, ExportRecord, RecordFormat, RecordWriter};

use super::ConvertError;

/// Streams `address:privateKey` lines from `reader` into a JSON array on `writer`.
///
/// Blank lines are skipped. With `limit`, only the first `limit` accounts are
/// kept. Returns the number of records written.
pub fn lines_to_json<R: BufRead, W: Write>(
    reader: R,
    writer: W,
    limit: Option<u64>,
) -> Result<u64, ConvertError> {
    let mut out = RecordWriter::begin(writer, RecordFormat::JsonArray)?;

    for (index, line) in reader.lines().enumerate() {
        if limit.is_some_and(|limit| out.written() >= limit) {
            break;
        }

        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let record = parse_line(line).ok_or(ConvertError::MalformedLine { line: index + 1 })?;
        out.write_record(&record)?;
    }

    let written = out.written();
    out.finish()?;
    Ok(written)
}

fn parse_line(line: &str) -> Option<ExportRecord> {
    let (address, private) = line.split_once(':')?;
    if address.is_empty() || private.is_empty() || private.contains(':') {
        return None;
    }

    Some(ExportRecord::new(address, prefixed_private_key(private)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const INPUT: &str = "0xaa:11\n0xbb:0x22\n\n0xcc:33\n";

    fn convert(input: &str, limit: Option<u64>) -> Result<(u64, Vec<ExportRecord>), ConvertError> {
        let mut out = Vec::new();
        let n = lines_to_json(input.as_bytes(), &mut out, limit)?;
        Ok((n, serde_json::from_slice(&out).unwrap()))
    }

    #[test]
    fn test_converts_all_lines() {
        let (n, records) = convert(INPUT, None).unwrap();
        assert_eq!(n, 3);
        assert_eq!(
            records,
            vec![
                ExportRecord::new("0xaa", "0x11"),
                ExportRecord::new("0xbb", "0x22"),
                ExportRecord::new("0xcc", "0x33"),
            ]
        );
    }

    #[test]
    fn test_limit() {
        let (n, records) = convert(INPUT, Some(2)).unwrap();
        assert_eq!(n, 2);
        assert_eq!(records.last().unwrap().address, "0xbb");

        let (n, records) = convert(INPUT, Some(0)).unwrap();
        assert_eq!(n, 0);
        assert!(records.is_empty());
    }

    #[test]
    fn test_malformed_line() {
        for input in ["0xaa:11\nnot-an-account\n", "0xaa:11\n:22\n", "0xaa:11\n0xbb:2:2\n"] {
            let err = convert(input, None).unwrap_err();
            assert!(matches!(err, ConvertError::MalformedLine { line: 2 }), "{}", input);
        }
    }
}
