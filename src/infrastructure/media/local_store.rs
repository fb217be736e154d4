// src/infrastructure/media/local_store.rs
use crate::application::{
    ApplicationResult, error::ApplicationError, ports::media::MediaStore,
};
use async_trait::async_trait;
use bytes::Bytes;
use std::io;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const SCENARIO_DIR: &str = "scenarios";
const URL_PREFIX: &str = "/uploads/scenarios/";
const FILE_PREFIX: &str = "scenario_";

/// Scenario archives written under `<root>/scenarios/` and served from
/// `/uploads/scenarios/`.
pub struct LocalMediaStore {
    root: PathBuf,
}

impl LocalMediaStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maps a url produced by `save` back to its file. Anything else,
    /// including names that would leave the scenario directory, is refused.
    fn file_for(&self, url: &str) -> Option<PathBuf> {
        let name = url.strip_prefix(URL_PREFIX)?;
        let plain = name.starts_with(FILE_PREFIX)
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
            && !name.contains("..");
        plain.then(|| self.root.join(SCENARIO_DIR).join(name))
    }
}

fn unique_name(extension: Option<&str>) -> String {
    let stem = format!("{FILE_PREFIX}{}", Uuid::new_v4().simple());
    match extension {
        Some(ext) => format!("{stem}.{ext}"),
        None => stem,
    }
}

fn io_failure(op: &str, path: &Path, err: &io::Error) -> ApplicationError {
    ApplicationError::infrastructure(format!("failed to {op} {}: {err}", path.display()))
}

#[async_trait]
impl MediaStore for LocalMediaStore {
    async fn save(&self, extension: Option<&str>, contents: Bytes) -> ApplicationResult<String> {
        let dir = self.root.join(SCENARIO_DIR);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|err| io_failure("create", &dir, &err))?;

        let name = unique_name(extension);
        let path = dir.join(&name);
        tokio::fs::write(&path, &contents)
            .await
            .map_err(|err| io_failure("write", &path, &err))?;

        Ok(format!("{URL_PREFIX}{name}"))
    }

    async fn remove(&self, url: &str) -> ApplicationResult<()> {
        let path = self.file_for(url).ok_or_else(|| {
            ApplicationError::validation(format!("not a stored scenario archive: {url}"))
        })?;

        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(io_failure("remove", &path, &err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn saved_archives_get_unique_scenario_names() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalMediaStore::new(dir.path());

        let first = store
            .save(Some("zip"), Bytes::from_static(b"PK\x03\x04a"))
            .await
            .unwrap();
        let second = store
            .save(Some("zip"), Bytes::from_static(b"PK\x03\x04b"))
            .await
            .unwrap();

        assert_ne!(first, second);
        for url in [&first, &second] {
            assert!(url.starts_with("/uploads/scenarios/scenario_"), "{url}");
            assert!(url.ends_with(".zip"), "{url}");
        }
        let on_disk = store.file_for(&first).unwrap();
        assert_eq!(std::fs::read(on_disk).unwrap(), b"PK\x03\x04a");
    }

    #[tokio::test]
    async fn removing_twice_is_fine() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalMediaStore::new(dir.path());
        let url = store.save(None, Bytes::from_static(b"PK\x05\x06")).await.unwrap();

        store.remove(&url).await.unwrap();
        assert!(!store.file_for(&url).unwrap().exists());
        store.remove(&url).await.unwrap();
    }

    #[tokio::test]
    async fn urls_outside_the_scenario_directory_are_refused() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalMediaStore::new(dir.path());

        for url in [
            "/uploads/scenarios/../../etc/passwd",
            "/uploads/scenarios/scenario_..",
            "/uploads/scenarios/scenario_a/b.zip",
            "/uploads/other/scenario_a.zip",
            "scenario_a.zip",
        ] {
            assert!(
                matches!(store.remove(url).await, Err(ApplicationError::Validation(_))),
                "{url}"
            );
        }
    }
}
