use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    CategoryId, ItemTitle, MediaType, MediaUrl, PortfolioItemId, SubCategoryRef,
};

/// A single published work: an image or a video with a caption.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PortfolioItem {
    pub id: PortfolioItemId,
    pub category_id: CategoryId,
    pub sub_category: SubCategoryRef,
    pub title: ItemTitle,
    /// Points at an image or a video depending on `media_type`.
    pub image_url: MediaUrl,
    pub media_type: MediaType,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Information required to create a new [`PortfolioItem`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewPortfolioItem {
    pub category_id: CategoryId,
    pub sub_category: SubCategoryRef,
    pub title: ItemTitle,
    pub image_url: MediaUrl,
    pub media_type: MediaType,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Editable fields of an existing item. The media asset itself is not
/// replaced by an edit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PortfolioItemUpdate {
    pub category_id: CategoryId,
    pub sub_category: SubCategoryRef,
    pub title: ItemTitle,
    pub description: Option<String>,
}
