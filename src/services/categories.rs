use crate::domain::auth::OwnerSession;
use crate::domain::category::{Category, CategoryUpdate, NewCategory};
use crate::domain::types::{CategoryId, MediaUrl};
use crate::forms::categories::{
    AddCategoryFormPayload, DEFAULT_COVER_URL, UpdateCategoryFormPayload,
};
use crate::repository::{CategoryReader, CategoryWriter};
use crate::storage::{MediaStorage, StoragePath};

use super::{ServiceError, ServiceResult, require_owner, store_media};

fn find_category<R: CategoryReader>(repo: &R, category_id: i32) -> ServiceResult<Category> {
    let id = CategoryId::new(category_id).map_err(|_| ServiceError::NotFound)?;
    match repo.get_category_by_id(id) {
        Ok(Some(category)) => Ok(category),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get category: {e}");
            Err(e.into())
        }
    }
}

pub fn add_category<R, S>(
    payload: AddCategoryFormPayload,
    session: Option<&OwnerSession>,
    repo: &R,
    storage: &S,
) -> ServiceResult<Category>
where
    R: CategoryWriter,
    S: MediaStorage,
{
    require_owner(session)?;

    let cover_image = match payload.cover {
        Some(source) => store_media(source, StoragePath::category_cover, storage)?,
        None => MediaUrl::new(DEFAULT_COVER_URL)?,
    };

    let now = chrono::Utc::now().naive_utc();
    let category = NewCategory {
        name: payload.name,
        slug: payload.slug,
        description: payload.description,
        cover_image,
        created_at: now,
        updated_at: now,
    };

    match repo.create_category(&category) {
        Ok(created) => {
            log::info!("Created category {} ({})", created.name, created.slug);
            Ok(created)
        }
        Err(e) => {
            log::error!("Failed to create category: {e}");
            Err(e.into())
        }
    }
}

/// Overwrites the category. The slug follows the new name; a missing cover
/// keeps the current one.
pub fn update_category<R, S>(
    category_id: i32,
    payload: UpdateCategoryFormPayload,
    session: Option<&OwnerSession>,
    repo: &R,
    storage: &S,
) -> ServiceResult<()>
where
    R: CategoryReader + CategoryWriter,
    S: MediaStorage,
{
    require_owner(session)?;
    let existing = find_category(repo, category_id)?;

    let cover_image = match payload.cover {
        Some(source) => store_media(source, StoragePath::category_cover, storage)?,
        None => existing.cover_image,
    };

    let update = CategoryUpdate {
        name: payload.name,
        slug: payload.slug,
        description: payload.description,
        cover_image,
    };

    match repo.update_category(existing.id, &update) {
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Failed to update category: {e}");
            Err(e.into())
        }
    }
}

/// Removes the category along with its sub-categories and works.
pub fn delete_category<R>(
    category_id: i32,
    session: Option<&OwnerSession>,
    repo: &R,
) -> ServiceResult<()>
where
    R: CategoryReader + CategoryWriter,
{
    require_owner(session)?;
    let existing = find_category(repo, category_id)?;

    match repo.delete_category(existing.id) {
        Ok(_) => {
            log::info!("Deleted category {}", existing.slug);
            Ok(())
        }
        Err(e) => {
            log::error!("Failed to delete category: {e}");
            Err(e.into())
        }
    }
}
