use crate::domain::auth::OwnerSession;
use crate::domain::types::MediaUrl;
use crate::forms::MediaSource;
use crate::storage::{MediaStorage, StoragePath};

pub mod api;
pub mod auth;
pub mod categories;
pub mod cv;
pub mod dashboard;
pub mod errors;
pub mod main;
pub mod portfolio;
pub mod sub_categories;

pub use errors::{ServiceError, ServiceResult};

/// Every dashboard mutation requires the owner session.
pub(crate) fn require_owner(session: Option<&OwnerSession>) -> ServiceResult<&OwnerSession> {
    session.ok_or(ServiceError::Unauthorized)
}

/// Stores an uploaded file under the path built by `path_for` and returns its
/// public URL. URL sources are passed through untouched.
pub(crate) fn store_media<S: MediaStorage>(
    source: MediaSource,
    path_for: impl FnOnce(&str, i64) -> StoragePath,
    storage: &S,
) -> ServiceResult<MediaUrl> {
    match source {
        MediaSource::Url(url) => Ok(url),
        MediaSource::Upload(upload) => {
            let path = path_for(&upload.file_name, chrono::Utc::now().timestamp_millis());
            storage.upload(&path, &upload.bytes, false).map_err(|e| {
                log::error!("Failed to upload {}: {e}", path.as_str());
                ServiceError::from(e)
            })?;
            MediaUrl::new(storage.public_url(&path)).map_err(|e| {
                log::error!("Storage returned an unusable public URL: {e}");
                ServiceError::Internal
            })
        }
    }
}
