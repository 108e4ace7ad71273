use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{CategoryId, CategoryName, CategorySlug, MediaUrl};

/// A top-level gallery section such as "Photography".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: CategoryId,
    pub name: CategoryName,
    pub slug: CategorySlug,
    /// Free text, may be empty.
    pub description: String,
    pub cover_image: MediaUrl,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Data required to insert a new [`Category`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewCategory {
    pub name: CategoryName,
    pub slug: CategorySlug,
    pub description: String,
    pub cover_image: MediaUrl,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Full overwrite of an existing [`Category`]; last write wins.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryUpdate {
    pub name: CategoryName,
    pub slug: CategorySlug,
    pub description: String,
    pub cover_image: MediaUrl,
}
