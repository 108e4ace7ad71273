use actix_multipart::form::{MultipartForm, tempfile::TempFile, text::Text};
use thiserror::Error;

use crate::domain::types::{CategoryName, CategorySlug, MediaType, TypeConstraintError};
use crate::forms::{MediaSource, UploadedFile, optional_text, upload_media_type};

/// Cover used when a category is created without one.
pub const DEFAULT_COVER_URL: &str =
    "https://images.unsplash.com/photo-1497215728101-856f4ea42174?auto=format&fit=crop&q=80&w=800";

#[derive(MultipartForm)]
pub struct AddCategoryForm {
    pub name: Text<String>,
    pub description: Option<Text<String>>,
    pub cover_url: Option<Text<String>>,
    #[multipart(limit = "10MB")]
    pub cover: Option<TempFile>,
}

#[derive(MultipartForm)]
pub struct UpdateCategoryForm {
    pub name: Text<String>,
    pub description: Option<Text<String>>,
    pub cover_url: Option<Text<String>>,
    #[multipart(limit = "10MB")]
    pub cover: Option<TempFile>,
}

/// Validated category fields shared by add and update.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryFormPayload {
    pub name: CategoryName,
    /// Derived from `name`.
    pub slug: CategorySlug,
    pub description: String,
    /// `None` keeps the current cover on update and uses
    /// [`DEFAULT_COVER_URL`] on add.
    pub cover: Option<MediaSource>,
}

pub type AddCategoryFormPayload = CategoryFormPayload;
pub type UpdateCategoryFormPayload = CategoryFormPayload;

#[derive(Debug, Error)]
pub enum CategoryFormError {
    #[error("Category form contains invalid data: {0}")]
    TypeConstraint(String),
    #[error("Category cover must be an image.")]
    CoverNotImage,
    #[error("Failed to read the uploaded cover: {0}")]
    Upload(#[from] std::io::Error),
}

impl From<TypeConstraintError> for CategoryFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl CategoryFormPayload {
    fn parse(
        name: String,
        description: Option<String>,
        cover_url: Option<String>,
        cover: Option<UploadedFile>,
    ) -> Result<Self, CategoryFormError> {
        let name = CategoryName::new(name)?;
        let slug = CategorySlug::from_name(&name);
        if let Some(upload) = &cover {
            if upload_media_type(upload) != Ok(MediaType::Image) {
                return Err(CategoryFormError::CoverNotImage);
            }
        }
        Ok(Self {
            name,
            slug,
            description: description.unwrap_or_default(),
            cover: MediaSource::pick(cover, cover_url)?,
        })
    }
}

impl TryFrom<AddCategoryForm> for CategoryFormPayload {
    type Error = CategoryFormError;

    fn try_from(value: AddCategoryForm) -> Result<Self, Self::Error> {
        let cover = UploadedFile::read_optional(value.cover.as_ref())?;
        Self::parse(
            value.name.into_inner(),
            optional_text(value.description),
            optional_text(value.cover_url),
            cover,
        )
    }
}

impl TryFrom<UpdateCategoryForm> for CategoryFormPayload {
    type Error = CategoryFormError;

    fn try_from(value: UpdateCategoryForm) -> Result<Self, Self::Error> {
        let cover = UploadedFile::read_optional(value.cover.as_ref())?;
        Self::parse(
            value.name.into_inner(),
            optional_text(value.description),
            optional_text(value.cover_url),
            cover,
        )
    }
}
