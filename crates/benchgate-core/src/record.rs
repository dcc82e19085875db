//! Raw timing records and the result-file decoder.
//!
//! A result file is a JSON array of records, one per executed operation.
//! Producers are loose about which keys they emit, so every field has a
//! default that is applied at parse time; downstream code never sees a
//! partially-populated record.

use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::error::{BenchError, BenchResult};

/// Value used for a missing `operation` or `tool` field.
pub const UNKNOWN: &str = "unknown";

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// One executed operation, as produced by the benchmark runner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingRecord {
    #[serde(default = "unknown", deserialize_with = "string_or_unknown")]
    pub operation: String,

    #[serde(default = "unknown", deserialize_with = "string_or_unknown")]
    pub tool: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub duration_ms: f64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub success: bool,

    /// Opaque, display only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl TimingRecord {
    pub fn new(
        operation: impl Into<String>,
        tool: impl Into<String>,
        duration_ms: f64,
        success: bool,
    ) -> Self {
        Self {
            operation: operation.into(),
            tool: tool.into(),
            duration_ms,
            success,
            timestamp: None,
        }
    }

    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    /// Key into a threshold baseline: `"<operation>_<tool>"`.
    pub fn threshold_key(&self) -> String {
        format!("{}_{}", self.operation, self.tool)
    }
}

fn unknown() -> String {
    UNKNOWN.to_string()
}

fn string_or_unknown<'de, D>(de: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(de)?.unwrap_or_else(unknown))
}

fn null_as_default<'de, D, T>(de: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(de)?.unwrap_or_default())
}

/// Strip a leading UTF-8 byte-order mark, if any.
pub(crate) fn strip_bom(bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes)
}

/// Decode a result file's bytes. `path` is only used for error reporting.
pub fn decode_records(path: &Path, bytes: &[u8]) -> BenchResult<Vec<TimingRecord>> {
    let text = std::str::from_utf8(strip_bom(bytes))
        .map_err(|e| BenchError::malformed(path, format!("invalid utf-8: {}", e)))?;

    let records: Vec<TimingRecord> =
        serde_json::from_str(text).map_err(|e| BenchError::malformed(path, e))?;

    for (idx, r) in records.iter().enumerate() {
        if !r.duration_ms.is_finite() || r.duration_ms < 0.0 {
            return Err(BenchError::malformed(
                path,
                format!("record {}: duration_ms must be non-negative, got {}", idx, r.duration_ms),
            ));
        }
    }

    Ok(records)
}

/// Read and decode a result file.
pub fn load_records(path: &Path) -> BenchResult<Vec<TimingRecord>> {
    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => {
            BenchError::missing_input(format!("File {} does not exist", path.display()))
        }
        _ => BenchError::io(path, e),
    })?;
    let records = decode_records(path, &bytes)?;
    debug!(path = %path.display(), count = records.len(), "loaded timing records");
    Ok(records)
}
