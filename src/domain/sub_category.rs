use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{CategoryId, SubCategoryId, SubCategoryName};

/// Named subdivision of a [`crate::domain::category::Category`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubCategory {
    pub id: SubCategoryId,
    pub category_id: CategoryId,
    pub name: SubCategoryName,
    pub created_at: NaiveDateTime,
}

/// Data required to insert a new [`SubCategory`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewSubCategory {
    pub category_id: CategoryId,
    pub name: SubCategoryName,
    pub created_at: NaiveDateTime,
}
