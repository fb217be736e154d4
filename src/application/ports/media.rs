// src/application/ports/media.rs
use crate::application::ApplicationResult;
use async_trait::async_trait;
use bytes::Bytes;

/// Where uploaded scenario archives are kept.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Store the bytes under a fresh unique name and return the public url.
    async fn save(&self, extension: Option<&str>, contents: Bytes) -> ApplicationResult<String>;

    /// Delete the file behind a url returned by [`save`](Self::save).
    /// A file that is already gone is not an error.
    async fn remove(&self, url: &str) -> ApplicationResult<()>;
}
