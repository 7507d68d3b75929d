use crate::domain::models::AppRecord;
use crate::gallery::{LookupError, LookupObserver};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::warn;

/// Console logging through `tracing`.
pub struct TracingObserver;

impl LookupObserver for TracingObserver {
    fn started(&self, app_id: &str) {
        tracing::info!(app_id, "fetching app info");
    }

    fn succeeded(&self, record: &AppRecord) {
        tracing::debug!(
            app_id = %record.app_id,
            name = record.name.as_deref().unwrap_or_default(),
            "app info fetched"
        );
    }

    fn failed(&self, err: &LookupError) {
        tracing::error!(app_id = %err.app_id, kind = err.kind(), error = %err.error, "lookup failed");
    }
}

/// Error-only log file, one line per failure.
pub struct FailureLog {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FailureLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn error(&self, message: &str) {
        let line = format!(
            "[{}] [ERROR] {}\n",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S,%3f"),
            message
        );
        let Ok(_guard) = self.lock.lock() else {
            warn!(path = %self.path.display(), "failure log writer poisoned");
            return;
        };
        if let Err(e) = self.append_line(&line) {
            warn!(path = %self.path.display(), error = %e, "cannot write failure log");
        }
    }

    fn append_line(&self, line: &str) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?
            .write_all(line.as_bytes())
    }
}

impl LookupObserver for FailureLog {
    fn failed(&self, err: &LookupError) {
        self.error(&err.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gallery::GalleryError;
    use std::sync::Arc;

    #[test]
    fn failures_append_one_line_each() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("logs/cli_failures.log");
        let log = FailureLog::new(&path);
        for id in ["C1", "C2"] {
            log.failed(&LookupError {
                app_id: id.to_string(),
                error: GalleryError::NotFound(id.to_string()),
            });
        }
        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("[ERROR] lookup for C1 failed: app C1 not found in response"));
        assert!(lines[1].contains("C2"));
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn unwritable_log_emits_warning() {
        let dir = tempfile::TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();
        let log = FailureLog::new(blocker.join("cli_failures.log"));
        assert!(log.append_line("line\n").is_err());

        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, || log.error("lookup for C1 failed"));

        let out = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(out.contains("WARN"));
        assert!(out.contains("cannot write failure log"));
        assert_eq!(std::fs::read_to_string(&blocker).unwrap(), "x");
    }

    #[test]
    fn successes_are_not_written() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("f.log");
        FailureLog::new(&path).started("C1");
        assert!(!path.exists());
    }
}
