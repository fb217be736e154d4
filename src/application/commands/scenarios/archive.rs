use super::ScenarioCommandService;
use crate::application::error::{ApplicationError, ApplicationResult};
use bytes::Bytes;
use std::path::Path;

/// Largest scenario archive accepted, in bytes.
pub const MAX_ARCHIVE_BYTES: usize = 50 * 1024 * 1024;

const MAX_EXTENSION_LEN: usize = 8;

/// Local file header, end of central directory (empty archive), spanning marker.
const ZIP_SIGNATURES: [&[u8; 4]; 3] = [b"PK\x03\x04", b"PK\x05\x06", b"PK\x07\x08"];

/// A file part taken from an upload form.
#[derive(Debug, Clone)]
pub struct UploadedArchive {
    pub file_name: Option<String>,
    pub contents: Bytes,
}

impl UploadedArchive {
    /// Extension of the client-side file name, kept only when it is short
    /// and alphanumeric.
    fn extension(&self) -> Option<String> {
        let name = self.file_name.as_deref()?;
        let ext = Path::new(name).extension()?.to_str()?;
        (!ext.is_empty()
            && ext.len() <= MAX_EXTENSION_LEN
            && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .then(|| ext.to_ascii_lowercase())
    }
}

fn check_archive(contents: &[u8], max_bytes: usize) -> ApplicationResult<()> {
    let is_zip = contents
        .get(..4)
        .is_some_and(|head| ZIP_SIGNATURES.iter().any(|sig| head == sig.as_slice()));
    if !is_zip {
        return Err(ApplicationError::validation("Only zip files are allowed"));
    }
    if contents.len() > max_bytes {
        return Err(ApplicationError::validation(format!(
            "File size must be less than {}MB",
            max_bytes / (1024 * 1024)
        )));
    }
    Ok(())
}

impl ScenarioCommandService {
    /// Validate and store an uploaded archive, returning its public url.
    pub(super) async fn store_archive(
        &self,
        archive: Option<UploadedArchive>,
    ) -> ApplicationResult<Option<String>> {
        let Some(archive) = archive else {
            return Ok(None);
        };
        check_archive(&archive.contents, MAX_ARCHIVE_BYTES)?;

        let size = archive.contents.len();
        let extension = archive.extension();
        let url = self
            .media
            .save(extension.as_deref(), archive.contents)
            .await
            .map_err(|err| {
                tracing::error!(error = %err, size, "scenario archive could not be stored");
                ApplicationError::infrastructure("Failed to upload file")
            })?;

        tracing::debug!(%url, size, "scenario archive stored");
        Ok(Some(url))
    }

    /// Best-effort removal of a stored archive that is no longer referenced.
    pub(super) async fn discard_archive(&self, url: &str) {
        if let Err(err) = self.media.remove(url).await {
            tracing::warn!(error = %err, %url, "stale scenario archive left on disk");
        }
    }
}
