use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::types::{MediaType, SubCategoryRef};
use crate::grouping::{GalleryItem, Group, split_legacy_description};

/// One work as rendered in galleries and the dashboard list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GalleryCardDto {
    pub id: i32,
    pub category_id: i32,
    pub title: String,
    pub media_url: String,
    pub media_type: MediaType,
    pub sub_category_label: Option<String>,
    /// Selected sub-category, for edit forms.
    pub sub_category_id: Option<i32>,
    pub description: String,
    /// Stored description without the legacy label prefix and without the
    /// display placeholder, for edit forms.
    pub raw_description: Option<String>,
    pub created_at: NaiveDateTime,
}

impl From<GalleryItem<'_>> for GalleryCardDto {
    fn from(value: GalleryItem<'_>) -> Self {
        let item = value.item;
        let sub_category_id = match &item.sub_category {
            SubCategoryRef::EntityRef { id } => Some(id.get()),
            _ => None,
        };
        let raw_description = item
            .description
            .as_deref()
            .map(|d| split_legacy_description(d).1.trim())
            .filter(|d| !d.is_empty())
            .map(str::to_string);
        Self {
            id: item.id.get(),
            category_id: item.category_id.get(),
            title: item.title.as_str().to_string(),
            media_url: item.image_url.as_str().to_string(),
            media_type: item.media_type,
            sub_category_label: value.sub_category_label,
            sub_category_id,
            description: value.description,
            raw_description,
            created_at: item.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GalleryGroupDto {
    pub label: String,
    pub is_fallback: bool,
    pub items: Vec<GalleryCardDto>,
}

impl From<Group<GalleryItem<'_>>> for GalleryGroupDto {
    fn from(value: Group<GalleryItem<'_>>) -> Self {
        Self {
            label: value.label,
            is_fallback: value.is_fallback,
            items: value.items.into_iter().map(GalleryCardDto::from).collect(),
        }
    }
}
