//! Incoming dashboard forms and their validated payloads.

use actix_multipart::form::tempfile::TempFile;
use actix_multipart::form::text::Text;

use crate::domain::types::{
    MediaType, MediaUrl, SubCategoryId, SubCategoryRef, TypeConstraintError,
};

pub mod auth;
pub mod categories;
pub mod cv;
pub mod portfolio;
pub mod sub_categories;

/// Upload read into memory, detached from the multipart temp file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub file_name: String,
    /// MIME essence such as `image/png`, when the browser sent one.
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    /// Reads the temp file. An empty file input arrives as a zero-sized part
    /// and yields `None`.
    pub fn read(file: &TempFile) -> std::io::Result<Option<Self>> {
        if file.size == 0 {
            return Ok(None);
        }
        let bytes = std::fs::read(file.file.path())?;
        Ok(Some(Self {
            file_name: file.file_name.clone().unwrap_or_default(),
            content_type: file
                .content_type
                .as_ref()
                .map(|mime| mime.essence_str().to_string()),
            bytes,
        }))
    }

    pub fn read_optional(file: Option<&TempFile>) -> std::io::Result<Option<Self>> {
        match file {
            Some(file) => Self::read(file),
            None => Ok(None),
        }
    }
}

/// Where a piece of media comes from: a fresh upload or an existing URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaSource {
    Upload(UploadedFile),
    Url(MediaUrl),
}

impl MediaSource {
    /// The upload wins over the URL. Neither yields `None`.
    pub fn pick(
        upload: Option<UploadedFile>,
        url: Option<String>,
    ) -> Result<Option<Self>, TypeConstraintError> {
        if let Some(upload) = upload {
            return Ok(Some(Self::Upload(upload)));
        }
        url.map(MediaUrl::new).transpose().map(|url| url.map(Self::Url))
    }
}

/// Media type of an upload, from its MIME type. Uploads without one are
/// treated as images.
pub(crate) fn upload_media_type(upload: &UploadedFile) -> Result<MediaType, TypeConstraintError> {
    match upload.content_type.as_deref() {
        Some(mime) => MediaType::from_mime(mime),
        None => Ok(MediaType::Image),
    }
}

/// Optional text field, `None` when absent or blank.
pub(crate) fn optional_text(value: Option<Text<String>>) -> Option<String> {
    value
        .map(Text::into_inner)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Reads a sub-category from a select (`sub_category_id`) and a free-text
/// label. The select wins when both are filled.
pub(crate) fn sub_category_choice(
    id: Option<&str>,
    label: Option<&str>,
) -> Result<SubCategoryRef, TypeConstraintError> {
    let id = id.map(str::trim).filter(|v| !v.is_empty());
    if let Some(raw) = id {
        let raw: i32 = raw
            .parse()
            .map_err(|_| TypeConstraintError::InvalidValue(format!("sub-category id: {raw}")))?;
        return Ok(SubCategoryRef::EntityRef {
            id: SubCategoryId::new(raw)?,
        });
    }
    Ok(SubCategoryRef::from_columns(
        None,
        label.map(str::to_string),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(content_type: Option<&str>) -> UploadedFile {
        UploadedFile {
            file_name: "a.bin".into(),
            content_type: content_type.map(str::to_string),
            bytes: vec![1, 2, 3],
        }
    }

    #[test]
    fn upload_wins_over_url() {
        let url = Some("https://example.com/a.png".to_string());
        let picked = MediaSource::pick(Some(upload(None)), url.clone());
        assert!(matches!(picked, Ok(Some(MediaSource::Upload(_)))));

        let picked = MediaSource::pick(None, url);
        assert!(matches!(picked, Ok(Some(MediaSource::Url(_)))));

        assert_eq!(MediaSource::pick(None, None), Ok(None));
        assert!(MediaSource::pick(None, Some("not a url".into())).is_err());
    }

    #[test]
    fn detects_upload_media_type() {
        assert_eq!(
            upload_media_type(&upload(Some("video/mp4"))),
            Ok(MediaType::Video)
        );
        assert_eq!(upload_media_type(&upload(None)), Ok(MediaType::Image));
        assert!(upload_media_type(&upload(Some("application/zip"))).is_err());
    }

    #[test]
    fn sub_category_choice_prefers_select() {
        assert_eq!(
            sub_category_choice(Some("4"), Some("Posters")).unwrap(),
            SubCategoryRef::EntityRef {
                id: SubCategoryId::new(4).unwrap()
            }
        );
        assert_eq!(
            sub_category_choice(Some(""), Some(" Posters ")).unwrap(),
            SubCategoryRef::LegacyLabel {
                label: "Posters".into()
            }
        );
        assert_eq!(
            sub_category_choice(None, Some("")).unwrap(),
            SubCategoryRef::None
        );
        assert!(sub_category_choice(Some("abc"), None).is_err());
        assert!(sub_category_choice(Some("0"), None).is_err());
    }
}
