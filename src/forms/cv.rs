use actix_multipart::form::{MultipartForm, tempfile::TempFile};
use thiserror::Error;

use crate::forms::UploadedFile;

/// Largest CV accepted.
pub const MAX_CV_BYTES: usize = 10 * 1024 * 1024;

#[derive(MultipartForm)]
pub struct UploadCvForm {
    #[multipart(limit = "10MB")]
    pub file: TempFile,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadCvFormPayload {
    pub bytes: Vec<u8>,
}

#[derive(Debug, Error)]
pub enum UploadCvFormError {
    #[error("Please choose a PDF file.")]
    MissingFile,
    #[error("Only PDF files are accepted.")]
    NotPdf,
    #[error("The CV must not exceed 10 MB.")]
    TooLarge,
    #[error("Failed to read the uploaded CV: {0}")]
    Upload(#[from] std::io::Error),
}

impl UploadCvFormPayload {
    /// Accepts only `.pdf` files whose declared type, when present, is
    /// `application/pdf`.
    pub fn from_upload(upload: Option<UploadedFile>) -> Result<Self, UploadCvFormError> {
        let upload = upload.ok_or(UploadCvFormError::MissingFile)?;

        let extension_ok = upload.file_name.to_ascii_lowercase().ends_with(".pdf");
        let content_type_ok = upload
            .content_type
            .as_deref()
            .is_none_or(|mime| mime == "application/pdf");
        if !extension_ok || !content_type_ok {
            return Err(UploadCvFormError::NotPdf);
        }
        if upload.bytes.len() > MAX_CV_BYTES {
            return Err(UploadCvFormError::TooLarge);
        }

        Ok(Self {
            bytes: upload.bytes,
        })
    }
}

impl TryFrom<UploadCvForm> for UploadCvFormPayload {
    type Error = UploadCvFormError;

    fn try_from(value: UploadCvForm) -> Result<Self, Self::Error> {
        Self::from_upload(UploadedFile::read(&value.file)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(name: &str, content_type: Option<&str>, size: usize) -> Option<UploadedFile> {
        Some(UploadedFile {
            file_name: name.into(),
            content_type: content_type.map(str::to_string),
            bytes: vec![b'%'; size],
        })
    }

    #[test]
    fn accepts_pdf() {
        let payload =
            UploadCvFormPayload::from_upload(upload("CV.PDF", Some("application/pdf"), 4)).unwrap();
        assert_eq!(payload.bytes.len(), 4);
    }

    #[test]
    fn rejects_other_types() {
        assert!(matches!(
            UploadCvFormPayload::from_upload(upload("cv.docx", None, 4)),
            Err(UploadCvFormError::NotPdf)
        ));
        assert!(matches!(
            UploadCvFormPayload::from_upload(upload("cv.pdf", Some("image/png"), 4)),
            Err(UploadCvFormError::NotPdf)
        ));
        assert!(matches!(
            UploadCvFormPayload::from_upload(None),
            Err(UploadCvFormError::MissingFile)
        ));
    }

    #[test]
    fn rejects_oversized_files() {
        assert!(matches!(
            UploadCvFormPayload::from_upload(upload("cv.pdf", None, MAX_CV_BYTES + 1)),
            Err(UploadCvFormError::TooLarge)
        ));
    }
}
