//! Telemetry sinks for agent-indexed scalar logging.
//!
//! The RL surface carries a `log_val` hook: learners push a scalar (for
//! example a value-function estimate) against an agent each decision
//! step. The host mirrors every logged value into a [`TelemetrySink`] so
//! runs can be inspected offline without the scene having to know about
//! files. Records are encoded by hand to keep the host free of
//! serialization dependencies.

use gantry_core::AgentId;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// One logged scalar.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValRecord {
    /// Scene time when the value was logged.
    pub time: f64,
    /// Agent the value was logged against.
    pub agent: AgentId,
    /// The logged value.
    pub val: f64,
}

/// Abstract sink for logged values.
pub trait TelemetrySink: Send {
    /// Record one value.
    fn record_val(&mut self, record: &ValRecord);

    /// Flush any buffered output.
    fn flush(&mut self) {}
}

/// Sink that discards all records.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TelemetrySink for NoopSink {
    fn record_val(&mut self, _record: &ValRecord) {}
}

/// Line-per-record file sink.
///
/// Each record is one JSON object per line:
/// `{"t":1.2500,"agent":0,"val":0.875}`.
pub struct FileSink {
    writer: BufWriter<File>,
}

impl FileSink {
    /// Create a sink writing to `path`, truncating any existing file.
    pub fn create(path: &Path) -> io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }
}

impl TelemetrySink for FileSink {
    fn record_val(&mut self, record: &ValRecord) {
        // A write failure mid-run must not take the simulation down.
        let _ = writeln!(
            self.writer,
            "{{\"t\":{:.4},\"agent\":{},\"val\":{}}}",
            record.time, record.agent, record.val,
        );
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        let _ = self.writer.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_sink_accepts_records() {
        let mut sink = NoopSink;
        sink.record_val(&ValRecord {
            time: 0.0,
            agent: AgentId(0),
            val: 1.0,
        });
        sink.flush();
    }

    #[test]
    fn file_sink_writes_one_line_per_record() {
        let dir = std::env::temp_dir().join("gantry_telemetry_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("vals.jsonl");

        {
            let mut sink = FileSink::create(&path).unwrap();
            sink.record_val(&ValRecord {
                time: 1.25,
                agent: AgentId(0),
                val: 0.875,
            });
            sink.record_val(&ValRecord {
                time: 1.5,
                agent: AgentId(3),
                val: -2.0,
            });
        }

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "{\"t\":1.2500,\"agent\":0,\"val\":0.875}");
        assert!(lines[1].contains("\"agent\":3"));
    }
}
