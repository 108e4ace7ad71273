use actix_multipart::form::{MultipartForm, tempfile::TempFile, text::Text};
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::portfolio_item::PortfolioItemUpdate;
use crate::domain::types::{
    CategoryId, ItemTitle, MediaType, SubCategoryRef, TypeConstraintError,
};
use crate::forms::{
    MediaSource, UploadedFile, optional_text, sub_category_choice, upload_media_type,
};

#[derive(MultipartForm)]
pub struct AddPortfolioItemForm {
    pub title: Text<String>,
    pub category_id: Text<i32>,
    pub sub_category_id: Option<Text<String>>,
    /// Free-text label, used when no sub-category is selected.
    pub sub_category: Option<Text<String>>,
    pub description: Option<Text<String>>,
    pub media_url: Option<Text<String>>,
    /// Kind of `media_url`; uploads are detected from their content type.
    pub media_type: Option<Text<String>>,
    #[multipart(limit = "50MB")]
    pub media: Option<TempFile>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddPortfolioItemFormPayload {
    pub category_id: CategoryId,
    pub sub_category: SubCategoryRef,
    pub title: ItemTitle,
    pub description: Option<String>,
    /// `None` falls back to the default cover image.
    pub media: Option<MediaSource>,
    pub media_type: MediaType,
}

#[derive(Debug, Error)]
pub enum AddPortfolioItemFormError {
    #[error("Portfolio item form contains invalid data: {0}")]
    TypeConstraint(String),
    #[error("Failed to read the uploaded media: {0}")]
    Upload(#[from] std::io::Error),
}

impl From<TypeConstraintError> for AddPortfolioItemFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<AddPortfolioItemForm> for AddPortfolioItemFormPayload {
    type Error = AddPortfolioItemFormError;

    fn try_from(value: AddPortfolioItemForm) -> Result<Self, Self::Error> {
        let upload = UploadedFile::read_optional(value.media.as_ref())?;
        let media_type = match &upload {
            Some(upload) => upload_media_type(upload)?,
            None => optional_text(value.media_type)
                .map(MediaType::try_from)
                .transpose()?
                .unwrap_or_default(),
        };
        let sub_category_id = optional_text(value.sub_category_id);
        let sub_category_label = optional_text(value.sub_category);

        Ok(Self {
            category_id: CategoryId::new(value.category_id.into_inner())?,
            sub_category: sub_category_choice(
                sub_category_id.as_deref(),
                sub_category_label.as_deref(),
            )?,
            title: ItemTitle::new(value.title.into_inner())?,
            description: optional_text(value.description),
            media: MediaSource::pick(upload, optional_text(value.media_url))?,
            media_type,
        })
    }
}

#[derive(Deserialize, Validate)]
pub struct UpdatePortfolioItemForm {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(range(min = 1))]
    pub category_id: i32,
    pub sub_category_id: Option<String>,
    pub sub_category: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdatePortfolioItemFormPayload {
    pub category_id: CategoryId,
    pub sub_category: SubCategoryRef,
    pub title: ItemTitle,
    pub description: Option<String>,
}

impl UpdatePortfolioItemFormPayload {
    pub fn into_update(self) -> PortfolioItemUpdate {
        PortfolioItemUpdate {
            category_id: self.category_id,
            sub_category: self.sub_category,
            title: self.title,
            description: self.description,
        }
    }
}

#[derive(Debug, Error)]
pub enum UpdatePortfolioItemFormError {
    #[error("Update portfolio item form validation failed: {0}")]
    Validation(String),
    #[error("Update portfolio item form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for UpdatePortfolioItemFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for UpdatePortfolioItemFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<UpdatePortfolioItemForm> for UpdatePortfolioItemFormPayload {
    type Error = UpdatePortfolioItemFormError;

    fn try_from(value: UpdatePortfolioItemForm) -> Result<Self, Self::Error> {
        value.validate()?;
        let description = value
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());
        Ok(Self {
            category_id: CategoryId::new(value.category_id)?,
            sub_category: sub_category_choice(
                value.sub_category_id.as_deref(),
                value.sub_category.as_deref(),
            )?,
            title: ItemTitle::new(value.title)?,
            description,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::SubCategoryId;

    fn form() -> UpdatePortfolioItemForm {
        UpdatePortfolioItemForm {
            title: "Poster".into(),
            category_id: 2,
            sub_category_id: Some(String::new()),
            sub_category: Some(String::new()),
            description: Some("  ".into()),
        }
    }

    #[test]
    fn blank_fields_clear_optional_values() {
        let payload = UpdatePortfolioItemFormPayload::try_from(form()).unwrap();
        assert_eq!(payload.sub_category, SubCategoryRef::None);
        assert_eq!(payload.description, None);
        assert_eq!(payload.into_update().category_id.get(), 2);
    }

    #[test]
    fn selected_sub_category_becomes_reference() {
        let mut form = form();
        form.sub_category_id = Some("5".into());
        let payload = UpdatePortfolioItemFormPayload::try_from(form).unwrap();
        assert_eq!(
            payload.sub_category,
            SubCategoryRef::EntityRef {
                id: SubCategoryId::new(5).unwrap()
            }
        );
    }

    #[test]
    fn rejects_empty_title() {
        let mut form = form();
        form.title = String::new();
        let result = UpdatePortfolioItemFormPayload::try_from(form);
        assert!(matches!(
            result,
            Err(UpdatePortfolioItemFormError::Validation(_))
        ));
    }
}
