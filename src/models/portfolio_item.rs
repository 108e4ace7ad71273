use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::portfolio_item::{
    NewPortfolioItem as DomainNewPortfolioItem, PortfolioItem as DomainPortfolioItem,
    PortfolioItemUpdate as DomainPortfolioItemUpdate,
};
use crate::domain::types::{
    ItemTitle, MediaType, MediaUrl, SubCategoryId, SubCategoryRef, TypeConstraintError,
};

/// Diesel model representing the `portfolio_items` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::portfolio_items)]
pub struct PortfolioItem {
    pub id: i32,
    pub category_id: i32,
    pub sub_category_id: Option<i32>,
    pub sub_category: Option<String>,
    pub title: String,
    pub image_url: String,
    pub media_type: String,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable form of [`PortfolioItem`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::portfolio_items)]
pub struct NewPortfolioItem {
    pub category_id: i32,
    pub sub_category_id: Option<i32>,
    pub sub_category: Option<String>,
    pub title: String,
    pub image_url: String,
    pub media_type: String,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Patchable form of [`PortfolioItem`]. `treat_none_as_null` so that clearing
/// a sub-category or description is persisted.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = crate::schema::portfolio_items)]
#[diesel(treat_none_as_null = true)]
pub struct PortfolioItemChangeset {
    pub category_id: i32,
    pub sub_category_id: Option<i32>,
    pub sub_category: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<PortfolioItem> for DomainPortfolioItem {
    type Error = TypeConstraintError;

    fn try_from(item: PortfolioItem) -> Result<Self, Self::Error> {
        let sub_category_id = item
            .sub_category_id
            .map(SubCategoryId::new)
            .transpose()?;

        Ok(Self {
            id: item.id.try_into()?,
            category_id: item.category_id.try_into()?,
            sub_category: SubCategoryRef::from_columns(sub_category_id, item.sub_category),
            title: ItemTitle::new(item.title)?,
            image_url: MediaUrl::new(item.image_url)?,
            media_type: MediaType::try_from(item.media_type)?,
            description: item.description,
            created_at: item.created_at,
            updated_at: item.updated_at,
        })
    }
}

impl From<DomainNewPortfolioItem> for NewPortfolioItem {
    fn from(item: DomainNewPortfolioItem) -> Self {
        let (sub_category_id, sub_category) = item.sub_category.into_columns();
        Self {
            category_id: item.category_id.get(),
            sub_category_id,
            sub_category,
            title: item.title.into_inner(),
            image_url: item.image_url.into_inner(),
            media_type: item.media_type.into(),
            description: item.description,
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}

impl PortfolioItemChangeset {
    pub fn new(update: DomainPortfolioItemUpdate, updated_at: NaiveDateTime) -> Self {
        let (sub_category_id, sub_category) = update.sub_category.into_columns();
        Self {
            category_id: update.category_id.get(),
            sub_category_id,
            sub_category,
            title: update.title.into_inner(),
            description: update.description,
            updated_at,
        }
    }
}
