use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::sub_category::{
    NewSubCategory as DomainNewSubCategory, SubCategory as DomainSubCategory,
};
use crate::domain::types::{SubCategoryName, TypeConstraintError};

/// Diesel model representing the `sub_categories` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::sub_categories)]
pub struct SubCategory {
    pub id: i32,
    pub category_id: i32,
    pub name: String,
    pub created_at: NaiveDateTime,
}

/// Insertable form of [`SubCategory`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::sub_categories)]
pub struct NewSubCategory {
    pub category_id: i32,
    pub name: String,
    pub created_at: NaiveDateTime,
}

impl TryFrom<SubCategory> for DomainSubCategory {
    type Error = TypeConstraintError;

    fn try_from(sub_category: SubCategory) -> Result<Self, Self::Error> {
        Ok(Self {
            id: sub_category.id.try_into()?,
            category_id: sub_category.category_id.try_into()?,
            name: SubCategoryName::new(sub_category.name)?,
            created_at: sub_category.created_at,
        })
    }
}

impl From<DomainNewSubCategory> for NewSubCategory {
    fn from(sub_category: DomainNewSubCategory) -> Self {
        Self {
            category_id: sub_category.category_id.get(),
            name: sub_category.name.into_inner(),
            created_at: sub_category.created_at,
        }
    }
}
