//! Streaming record writer.
//!
//! Holds at most one serialized record at a time. JSON arrays are framed by
//! writing the separator before every element except the first, so the
//! writer never needs to know which record is last.

use std::io::{self, Write};

use super::{ExportRecord, RecordFormat};

pub struct RecordWriter<W: Write> {
    sink: W,
    format: RecordFormat,
    written: u64,
    buf: Vec<u8>,
}

impl<W: Write> RecordWriter<W> {
    /// Wraps `sink` and writes the format header, if any.
    pub fn begin(mut sink: W, format: RecordFormat) -> io::Result<Self> {
        if format == RecordFormat::JsonArray {
            sink.write_all(b"[\n")?;
        }

        Ok(Self {
            sink,
            format,
            written: 0,
            buf: Vec::with_capacity(160),
        })
    }

    /// Appends one record to the sink.
    pub fn write_record(&mut self, record: &ExportRecord) -> io::Result<()> {
        self.buf.clear();

        match self.format {
            RecordFormat::Lines => {
                writeln!(self.buf, "{}:{}", record.address, record.private)?;
            }
            RecordFormat::JsonArray => {
                if self.written > 0 {
                    self.buf.extend_from_slice(b",\n");
                }
                serde_json::to_writer(&mut self.buf, record)?;
            }
            RecordFormat::JsonLines => {
                serde_json::to_writer(&mut self.buf, record)?;
                self.buf.push(b'\n');
            }
        }

        self.sink.write_all(&self.buf)?;
        self.written += 1;
        Ok(())
    }

    /// Number of records fully handed to the sink.
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Writes the format footer, flushes, and returns the sink.
    pub fn finish(mut self) -> io::Result<W> {
        if self.format == RecordFormat::JsonArray {
            let footer: &[u8] = if self.written > 0 { b"\n]" } else { b"]" };
            self.sink.write_all(footer)?;
        }

        self.sink.flush()?;
        Ok(self.sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<ExportRecord> {
        vec![
            ExportRecord::new("0xaa", "0x11"),
            ExportRecord::new("0xbb", "0x22"),
            ExportRecord::new("0xcc", "0x33"),
        ]
    }

    fn render(format: RecordFormat, records: &[ExportRecord]) -> String {
        let mut writer = RecordWriter::begin(Vec::new(), format).unwrap();
        for record in records {
            writer.write_record(record).unwrap();
        }
        assert_eq!(writer.written(), records.len() as u64);
        String::from_utf8(writer.finish().unwrap()).unwrap()
    }

    #[test]
    fn test_lines_layout() {
        assert_eq!(
            render(RecordFormat::Lines, &records()),
            "0xaa:0x11\n0xbb:0x22\n0xcc:0x33\n"
        );
    }

    #[test]
    fn test_json_array_layout() {
        let expected = concat!(
            "[\n",
            r#"{"address":"0xaa","private":"0x11"}"#,
            ",\n",
            r#"{"address":"0xbb","private":"0x22"}"#,
            ",\n",
            r#"{"address":"0xcc","private":"0x33"}"#,
            "\n]"
        );
        assert_eq!(render(RecordFormat::JsonArray, &records()), expected);
    }

    #[test]
    fn test_empty_json_array_is_valid() {
        let out = render(RecordFormat::JsonArray, &[]);
        let parsed: Vec<ExportRecord> = serde_json::from_str(&out).unwrap();
        assert!(parsed.is_empty());
    }

    #[test]
    fn test_json_lines_layout() {
        let out = render(RecordFormat::JsonLines, &records());
        let parsed: Vec<ExportRecord> = out
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(parsed, records());
        assert!(out.ends_with("}\n"));
    }
}
