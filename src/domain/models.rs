use serde::Serialize;
use serde_json::{Map, Value};

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

/// One normalized application record.
///
/// `raw` is the upstream data item as received, with `integration_type` and
/// (when found) `developer` merged in.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AppRecord {
    pub app_id: String,
    pub name: Option<String>,
    pub version: Option<String>,
    pub size_bytes: u64,
    pub developer: Option<String>,
    pub package: Option<String>,
    pub sha256: Option<String>,
    pub portal_url: Option<String>,
    pub description: Option<String>,
    pub download_url: String,
    pub integration_type: String,
    pub raw: Map<String, Value>,
}

impl AppRecord {
    pub fn size_mb(&self) -> f64 {
        bytes_to_mb(self.size_bytes)
    }
}

/// Megabytes rounded to two decimals.
pub fn bytes_to_mb(bytes: u64) -> f64 {
    (bytes as f64 / BYTES_PER_MB * 100.0).round() / 100.0
}

/// One line of `results/summary.csv`.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub app_id: String,
    pub name: String,
    pub version: String,
    pub size_mb: f64,
    pub size_bytes: u64,
    pub developer: String,
    pub package: String,
    pub sha256: String,
    pub portal_url: String,
    pub description: String,
    pub status: String,
}

#[derive(Serialize)]
pub struct BatchEntry {
    pub app_id: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<AppRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<String>,
}

#[derive(Serialize)]
pub struct BatchReport {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub results: Vec<BatchEntry>,
}
