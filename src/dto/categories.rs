use serde::Serialize;

use crate::domain::category::Category;
use crate::domain::portfolio_item::PortfolioItem;
use crate::domain::sub_category::SubCategory;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryDto {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub cover_image: String,
    pub item_count: usize,
}

impl CategoryDto {
    /// Builds the view and counts the category's items in `items`.
    pub fn with_items(category: &Category, items: &[PortfolioItem]) -> Self {
        Self {
            id: category.id.get(),
            name: category.name.as_str().to_string(),
            slug: category.slug.as_str().to_string(),
            description: category.description.clone(),
            cover_image: category.cover_image.as_str().to_string(),
            item_count: items
                .iter()
                .filter(|item| item.category_id == category.id)
                .count(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubCategoryDto {
    pub id: i32,
    pub category_id: i32,
    pub name: String,
}

impl From<&SubCategory> for SubCategoryDto {
    fn from(value: &SubCategory) -> Self {
        Self {
            id: value.id.get(),
            category_id: value.category_id.get(),
            name: value.name.as_str().to_string(),
        }
    }
}
