use crate::domain::constants::NOT_AVAILABLE;
use crate::domain::models::{AppRecord, SummaryRow};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub const SUMMARY_HEADER: [&str; 11] = [
    "App ID",
    "Name",
    "Version",
    "Size_MB",
    "App Bytes",
    "Developer",
    "Package",
    "SHA256",
    "Portal URL",
    "Description",
    "Status",
];

fn or_na(v: &Option<String>) -> String {
    v.clone().unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Megabytes always carry a decimal point: `50.0`, `11.77`, `0.0`.
fn size_cell(mb: f64) -> String {
    format!("{:?}", mb)
}

impl SummaryRow {
    pub fn from_record(record: &AppRecord, status: &str) -> Self {
        Self {
            app_id: record.app_id.clone(),
            name: or_na(&record.name),
            version: or_na(&record.version),
            size_mb: record.size_mb(),
            size_bytes: record.size_bytes,
            developer: or_na(&record.developer),
            package: or_na(&record.package),
            sha256: or_na(&record.sha256),
            portal_url: or_na(&record.portal_url),
            description: or_na(&record.description),
            status: status.to_string(),
        }
    }

    pub fn failed(app_id: &str, status: &str) -> Self {
        let na = || NOT_AVAILABLE.to_string();
        Self {
            app_id: app_id.to_string(),
            name: na(),
            version: na(),
            size_mb: 0.0,
            size_bytes: 0,
            developer: na(),
            package: na(),
            sha256: na(),
            portal_url: na(),
            description: na(),
            status: status.to_string(),
        }
    }

    fn cells(&self) -> [String; 11] {
        [
            self.app_id.clone(),
            self.name.clone(),
            self.version.clone(),
            size_cell(self.size_mb),
            self.size_bytes.to_string(),
            self.developer.clone(),
            self.package.clone(),
            self.sha256.clone(),
            self.portal_url.clone(),
            self.description.clone(),
            self.status.clone(),
        ]
    }
}

fn needs_quotes(field: &str) -> bool {
    field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r')
}

pub fn csv_line<S: AsRef<str>>(cells: &[S]) -> String {
    let mut line = String::new();
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            line.push(',');
        }
        let cell = cell.as_ref();
        if needs_quotes(cell) {
            line.push('"');
            line.push_str(&cell.replace('"', "\"\""));
            line.push('"');
        } else {
            line.push_str(cell);
        }
    }
    line.push_str("\r\n");
    line
}

/// Append-only `summary.csv`. Concurrent writers are serialized; the header
/// goes in once, when the file is first created.
pub struct SummaryLog {
    path: PathBuf,
    lock: Mutex<()>,
}

impl SummaryLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, row: &SummaryRow) -> anyhow::Result<()> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| anyhow::anyhow!("summary writer poisoned"))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let fresh = std::fs::metadata(&self.path)
            .map(|m| m.len() == 0)
            .unwrap_or(true);

        let mut chunk = String::new();
        if fresh {
            chunk.push_str(&csv_line(&SUMMARY_HEADER));
        }
        chunk.push_str(&csv_line(&row.cells()));

        let mut f = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        f.write_all(chunk.as_bytes())?;
        Ok(())
    }
}
