// src/infrastructure/audit/jsonl_store.rs
use crate::domain::audit::{AuditPage, AuditRecord, AuditStore};
use crate::domain::errors::{DomainError, DomainResult};
use async_trait::async_trait;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Audit trail kept as newline-delimited JSON in a single file.
///
/// Every append is one `write` of a complete line on a file opened with
/// `O_APPEND`, issued while holding `write_lock`. The lock orders writers in
/// this process; append mode keeps lines from other processes whole. The
/// guard travels into the blocking write, so a caller that gives up waiting
/// cannot let another writer or a clear overtake a write still in flight. The
/// file and its directory are created on the first append.
pub struct JsonlAuditStore {
    path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

#[derive(Debug, Default)]
struct Scan {
    records: Vec<AuditRecord>,
    skipped: usize,
}

impl JsonlAuditStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn scan(&self) -> DomainResult<Scan> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(parse_lines(&bytes)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Scan::default()),
            Err(err) => Err(io_failure("read", &self.path, &err)),
        }
    }
}

#[async_trait]
impl AuditStore for JsonlAuditStore {
    async fn append(&self, record: &AuditRecord) -> DomainResult<()> {
        let mut line = serde_json::to_vec(record).map_err(|err| {
            DomainError::Persistence(format!("failed to encode audit record: {err}"))
        })?;
        line.push(b'\n');

        let path = self.path.clone();
        let guard = Arc::clone(&self.write_lock).lock_owned().await;
        tokio::task::spawn_blocking(move || {
            let written = append_line(&path, &line);
            drop(guard);
            written
        })
        .await
        .map_err(|err| DomainError::Persistence(format!("audit writer task failed: {err}")))?
    }

    async fn read_page(&self, limit: usize, offset: usize) -> DomainResult<AuditPage> {
        let scan = self.scan().await?;
        let total = scan.records.len() as u64;
        let records = scan
            .records
            .into_iter()
            .rev()
            .skip(offset)
            .take(limit)
            .collect();

        Ok(AuditPage {
            records,
            total,
            skipped: scan.skipped,
        })
    }

    async fn count(&self) -> DomainResult<u64> {
        let scan = self.scan().await?;
        Ok(scan.records.len() as u64)
    }

    async fn clear(&self) -> DomainResult<()> {
        let _guard = self.write_lock.lock().await;
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(io_failure("remove", &self.path, &err)),
        }
    }
}

fn append_line(path: &Path, line: &[u8]) -> DomainResult<()> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|err| io_failure("create directory", dir, &err))?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|err| io_failure("open", path, &err))?;
    file.write_all(line)
        .map_err(|err| io_failure("append to", path, &err))
}

fn parse_lines(bytes: &[u8]) -> Scan {
    let mut scan = Scan::default();
    for (number, line) in bytes.split(|b| *b == b'\n').enumerate() {
        let line = line.trim_ascii();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_slice::<AuditRecord>(line) {
            Ok(record) => scan.records.push(record),
            Err(err) => {
                scan.skipped += 1;
                tracing::debug!(line = number + 1, error = %err, "skipping unreadable audit line");
            }
        }
    }
    scan
}

fn io_failure(op: &str, path: &Path, err: &io::Error) -> DomainError {
    DomainError::Persistence(format!("failed to {op} {}: {err}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::audit::AuditEntry;
    use chrono::{TimeZone, Utc};

    fn record(action: &str) -> AuditRecord {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        AuditRecord::from_entry(AuditEntry::new("scenarios", "GET", action, 200), at)
    }

    #[test]
    fn blank_and_crlf_lines_are_not_counted_as_corrupt() {
        let line = serde_json::to_string(&record("list")).unwrap();
        let raw = format!("\n{line}\r\n\n   \n{line}\n");
        let scan = parse_lines(raw.as_bytes());
        assert_eq!(scan.records.len(), 2);
        assert_eq!(scan.skipped, 0);
    }

    #[test]
    fn invalid_utf8_line_is_skipped() {
        let line = serde_json::to_string(&record("get")).unwrap();
        let mut raw = vec![0xff, 0xfe, b'{', b'\n'];
        raw.extend_from_slice(line.as_bytes());
        raw.push(b'\n');
        let scan = parse_lines(&raw);
        assert_eq!(scan.records.len(), 1);
        assert_eq!(scan.skipped, 1);
    }

    #[tokio::test]
    async fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonlAuditStore::new(dir.path().join("absent.log"));
        assert_eq!(store.count().await.unwrap(), 0);
        assert_eq!(store.read_page(10, 0).await.unwrap(), AuditPage::default());
    }

    #[tokio::test]
    async fn first_append_creates_nested_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("var").join("logs").join("api.log");
        let store = JsonlAuditStore::new(&path);

        store.append(&record("create")).await.unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 1);
        assert!(contents.ends_with('\n'));
    }

    #[tokio::test]
    async fn clear_reports_failure_when_path_cannot_be_removed() {
        let dir = tempfile::tempdir().unwrap();
        // a directory at the store path cannot be removed with remove_file
        let path = dir.path().join("api.log");
        std::fs::create_dir(&path).unwrap();
        let store = JsonlAuditStore::new(&path);

        assert!(matches!(store.clear().await, Err(DomainError::Persistence(_))));
    }
}
