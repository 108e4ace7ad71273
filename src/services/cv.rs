use crate::domain::auth::OwnerSession;
use crate::forms::cv::UploadCvFormPayload;
use crate::storage::{MediaStorage, StoragePath};

use super::{ServiceError, ServiceResult, require_owner};

/// Shown to visitors when no CV has been uploaded yet.
pub const CV_MISSING: &str = "السيرة الذاتية غير متوفرة حالياً، يرجى رفعها من لوحة التحكم.";

/// Replaces the CV at its fixed path.
pub fn upload_cv<S: MediaStorage>(
    payload: UploadCvFormPayload,
    session: Option<&OwnerSession>,
    storage: &S,
) -> ServiceResult<()> {
    require_owner(session)?;

    let path = StoragePath::cv();
    match storage.upload(&path, &payload.bytes, true) {
        Ok(()) => {
            log::info!("CV replaced ({} bytes)", payload.bytes.len());
            Ok(())
        }
        Err(e) => {
            log::error!("Failed to upload CV: {e}");
            Err(ServiceError::from(e))
        }
    }
}

/// Public CV link with a `t` query so browsers skip their cached copy.
pub fn cv_link<S: MediaStorage>(storage: &S, now_millis: i64) -> Option<String> {
    let path = StoragePath::cv();
    storage
        .exists(&path)
        .then(|| format!("{}?t={now_millis}", storage.public_url(&path)))
}
